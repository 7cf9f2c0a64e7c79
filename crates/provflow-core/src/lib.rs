//! provflow-core
//!
//! VMプロビジョニングテストのシナリオ設定を扱うコアライブラリ。
//!
//! シナリオファイル (prov.yml) の発見・テンプレート展開・パース・検証を
//! 提供します。シナリオの実行（インスタンスの作成やプロビジョニング）は
//! 外部ランナーの責務であり、このクレートは設定を読むことしかしません。

pub mod discovery;
pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod template;

pub use discovery::{
    DEFAULT_SCENARIO, DiscoveredFiles, discover_files, discover_files_with_scenario,
    find_project_root, list_scenarios,
};
pub use error::{PlanError, Result};
pub use loader::{
    load_plan, load_plan_from_root, load_plan_from_root_with_scenario, load_plan_with_debug,
};
pub use model::*;
pub use parser::{parse_plan_file, parse_plan_str, validate_plan};
pub use template::{TemplateProcessor, Variables};
