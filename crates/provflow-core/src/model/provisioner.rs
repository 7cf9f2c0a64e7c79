//! プロビジョナー定義

use super::lint::Lint;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::collections::HashMap;
use std::path::PathBuf;

/// プロビジョナー設定
///
/// インスタンスに適用する構成管理ツールと、その呼び出し方を記述します。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provisioner {
    /// 構成管理ツール名（ansible など）
    pub name: String,

    /// リントツール
    #[serde(default)]
    pub lint: Option<Lint>,

    /// ツール本体の設定ファイルに書き出されるオプション（ネスト可）
    #[serde(default)]
    pub config_options: Mapping,

    /// 呼び出し時のコマンドラインオプション
    #[serde(default)]
    pub options: Mapping,

    /// インベントリのリンク設定
    #[serde(default)]
    pub inventory: Inventory,

    /// 実行時に与える環境変数
    ///
    /// 値は文字列のまま保持し、パス正規化などの加工は一切行いません。
    #[serde(default)]
    pub env: HashMap<String, String>,
}

/// インベントリ設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    /// 変数ファイルへのリンク
    #[serde(default)]
    pub links: InventoryLinks,
}

/// 変数ファイルへのリンク
///
/// パスはそのまま保持し、存在チェックは行いません。
/// 解決されるのはランナー側のファイルシステムです。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryLinks {
    /// グループ変数ディレクトリ
    #[serde(default)]
    pub group_vars: Option<PathBuf>,

    /// ホスト変数ディレクトリ
    #[serde(default)]
    pub host_vars: Option<PathBuf>,
}
