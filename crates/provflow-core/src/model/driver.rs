//! ドライバー定義

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// ドライバー設定
///
/// インスタンスの作成・破棄・ログイン方法を提供するバックエンドを指定します。
/// options はバックエンド固有のため、スキーマとしては不透明なマッピングの
/// まま保持し、よく使われるキーにだけ型付きアクセサを用意しています。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    /// バックエンド名（vagrant, docker など）
    pub name: String,

    /// バックエンド固有のオプション
    #[serde(default)]
    pub options: Mapping,
}

impl Driver {
    /// インスタンスが外部管理かどうか
    pub fn managed(&self) -> Option<bool> {
        self.options.get("managed").and_then(|v| v.as_bool())
    }

    /// ログインコマンドのテンプレート
    pub fn login_cmd_template(&self) -> Option<&str> {
        self.options
            .get("login_cmd_template")
            .and_then(|v| v.as_str())
    }

    /// Ansible接続オプションのマッピング
    pub fn ansible_connection_options(&self) -> Option<&Mapping> {
        self.options
            .get("ansible_connection_options")
            .and_then(|v| v.as_mapping())
    }
}
