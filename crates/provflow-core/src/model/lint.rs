//! リントツール定義

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// リントツールの参照
///
/// プロビジョナーとベリファイアの両方から使われます。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lint {
    /// リントツール名（ansible-lint, flake8 など）
    pub name: String,

    /// ツール固有のオプション
    #[serde(default)]
    pub options: Mapping,
}
