use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "シナリオファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: prov.local.yml, .prov.local.yml, prov.yml, .prov.yml\n\
        - ./.provflow/ ディレクトリ\n\
        - ~/.config/provflow/prov.yml\n\
        または PROV_CONFIG_PATH 環境変数で直接指定できます"
    )]
    PlanFileNotFound,

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
