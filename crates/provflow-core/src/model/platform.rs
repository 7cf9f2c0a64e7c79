//! プラットフォーム定義

use serde::{Deserialize, Serialize};

/// プラットフォーム定義
///
/// プロビジョニングとテストの対象となるVMインスタンス1台分の宣言です。
/// groups はプロビジョナーがどの変数・ロールを適用するかの決定に使われます。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// プラットフォーム名（platforms リスト内で一意）
    pub name: String,

    /// ベースイメージの参照（vagrant box 名など）
    #[serde(default)]
    pub vm_base: Option<String>,

    /// 作成されるインスタンスの名前
    #[serde(default)]
    pub vm_name: Option<String>,

    /// 所属グループ（順序保持）
    #[serde(default)]
    pub groups: Vec<String>,
}
