//! ベリファイア定義

use super::lint::Lint;
use serde::{Deserialize, Serialize};

/// ベリファイア設定
///
/// プロビジョニング後の状態を検証するツールを指定します。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verifier {
    /// 検証ツール名（testinfra など）
    pub name: String,

    /// リントツール
    #[serde(default)]
    pub lint: Option<Lint>,
}
