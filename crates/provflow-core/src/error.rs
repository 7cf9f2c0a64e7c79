use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("YAMLパースエラー: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("ファイル読み込みエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO エラー: {path}\n理由: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("無効な設定: {0}")]
    InvalidConfig(String),

    #[error("platforms が空です。少なくとも1つのプラットフォームを定義してください")]
    NoPlatforms,

    #[error("プラットフォーム名が重複しています: {0}")]
    DuplicatePlatform(String),

    #[error("テンプレートエラー: {file}\n理由: {message}")]
    TemplateError {
        file: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("テンプレート展開エラー: {0}")]
    TemplateRenderError(String),

    #[error("ファイル発見エラー: {path}\n理由: {message}")]
    DiscoveryError { path: PathBuf, message: String },

    #[error(
        "プロジェクトルートが見つかりません\n探索開始位置: {0}\nヒント: prov.yml ファイルを含むディレクトリで実行してください"
    )]
    ProjectRootNotFound(PathBuf),

    #[error("シナリオが見つかりません: {0}")]
    ScenarioNotFound(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
