//! シナリオ定義

use serde::{Deserialize, Serialize};

/// シナリオ設定
///
/// 独立した2つのライフサイクルシーケンスを定義します。
/// ステップ名は外部ランナーが解釈するシンボルであり、この層では解釈しません。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// シナリオ名
    #[serde(default = "default_scenario_name")]
    pub name: String,

    /// 作成のみを行うシーケンス
    #[serde(default = "default_create_sequence")]
    pub create_sequence: Vec<String>,

    /// フルテストのシーケンス
    #[serde(default = "default_test_sequence")]
    pub test_sequence: Vec<String>,
}

fn default_scenario_name() -> String {
    "default".to_string()
}

fn default_create_sequence() -> Vec<String> {
    vec!["create".to_string()]
}

fn default_test_sequence() -> Vec<String> {
    ["destroy", "create", "converge", "verify", "destroy"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: default_scenario_name(),
            create_sequence: default_create_sequence(),
            test_sequence: default_test_sequence(),
        }
    }
}

impl Scenario {
    /// 種別名でシーケンスを引く（create / test）
    pub fn sequence(&self, kind: &str) -> Option<&[String]> {
        match kind {
            "create" => Some(&self.create_sequence),
            "test" => Some(&self.test_sequence),
            _ => None,
        }
    }
}
