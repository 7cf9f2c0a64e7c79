pub mod error;

pub use error::*;

use std::path::PathBuf;

/// provflowの設定ファイルパスを取得
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("provflow");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// プロジェクトのprov.ymlファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 PROV_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: prov.local.yml, .prov.local.yml, prov.yml, .prov.yml
/// 3. ./.provflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/provflow/prov.yml (グローバル設定)
pub fn find_plan_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var("PROV_CONFIG_PATH") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let current_dir = std::env::current_dir()?;
    let candidates = ["prov.local.yml", ".prov.local.yml", "prov.yml", ".prov.yml"];

    // 2. カレントディレクトリで検索
    for filename in &candidates {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. ./.provflow/ ディレクトリで検索
    let provflow_dir = current_dir.join(".provflow");
    if provflow_dir.is_dir() {
        for filename in &candidates {
            let path = provflow_dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    // 4. グローバル設定ファイル (~/.config/provflow/prov.yml)
    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("provflow").join("prov.yml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    // どの設定ファイルも見つからなかった
    Err(ConfigError::PlanFileNotFound)
}
