//! Plan定義

use super::driver::Driver;
use super::platform::Platform;
use super::provisioner::Provisioner;
use super::scenario::Scenario;
use super::verifier::Verifier;
use serde::{Deserialize, Serialize};

/// Plan - プロビジョニングテストの設計図
///
/// シナリオファイル (prov.yml) 1枚に対応し、どのドライバーでインスタンスを
/// 管理し、どのプラットフォームを立ち上げ、どうプロビジョニング・検証するかを
/// 記述します。ロード後に書き換えられることはありません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// インスタンスのライフサイクル（作成・破棄・ログイン）を担当するドライバー
    pub driver: Driver,
    /// 作成するプラットフォーム（VM定義）の順序付きリスト
    pub platforms: Vec<Platform>,
    /// 構成管理ツールの呼び出し設定
    pub provisioner: Provisioner,
    /// ライフサイクルシーケンスの定義
    pub scenario: Scenario,
    /// プロビジョニング後の検証ツール
    pub verifier: Verifier,
}

impl Plan {
    /// 名前でプラットフォームを引く
    pub fn platform(&self, name: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.name == name)
    }
}
