//! シナリオファイルのパーサー
//!
//! YAML形式のシナリオ設定をデシリアライズし、スキーマ検証を行います。
//! 必須キーの欠落や型の不一致は serde_yaml がキー名と位置付きで報告し、
//! 型としては表現できてしまう不正（空のplatforms、名前の重複など）は
//! validate モジュールで弾きます。

mod validate;

pub use validate::validate_plan;

use crate::error::Result;
use crate::model::Plan;
use std::fs;
use std::path::Path;

/// YAMLファイルをパースしてPlanを生成
pub fn parse_plan_file<P: AsRef<Path>>(path: P) -> Result<Plan> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_plan_str(&content)
}

/// YAML文字列をパース
///
/// デシリアライズと意味的検証まで行い、完全なPlanまたはエラーを返します。
/// 部分的に構築された設定が返ることはありません。
pub fn parse_plan_str(content: &str) -> Result<Plan> {
    let plan: Plan = serde_yaml::from_str(content)?;
    validate_plan(&plan)?;
    Ok(plan)
}
