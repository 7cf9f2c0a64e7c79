//! 意味的検証ルール

use crate::error::{PlanError, Result};
use crate::model::Plan;
use std::collections::HashSet;

/// デシリアライズ済みのPlanを検証
///
/// エラーメッセージには問題のあるキーパスを含めます。
pub fn validate_plan(plan: &Plan) -> Result<()> {
    validate_names(plan)?;
    validate_platforms(plan)?;
    validate_sequences(plan)?;
    Ok(())
}

/// 各セクションの name が空でないことを確認
fn validate_names(plan: &Plan) -> Result<()> {
    for (key, name) in [
        ("driver.name", &plan.driver.name),
        ("provisioner.name", &plan.provisioner.name),
        ("verifier.name", &plan.verifier.name),
    ] {
        if name.trim().is_empty() {
            return Err(PlanError::InvalidConfig(format!("{key} が空です")));
        }
    }
    Ok(())
}

/// platforms が空でなく、名前が一意であることを確認
fn validate_platforms(plan: &Plan) -> Result<()> {
    if plan.platforms.is_empty() {
        return Err(PlanError::NoPlatforms);
    }

    let mut seen = HashSet::new();
    for (index, platform) in plan.platforms.iter().enumerate() {
        if platform.name.trim().is_empty() {
            return Err(PlanError::InvalidConfig(format!(
                "platforms[{index}].name が空です"
            )));
        }
        if !seen.insert(platform.name.as_str()) {
            return Err(PlanError::DuplicatePlatform(platform.name.clone()));
        }
    }
    Ok(())
}

/// シーケンスのステップ名が空文字列でないことを確認
///
/// ステップ名の意味（create, converge, destroy など）はランナー側の
/// 語彙なので、ここでは一切解釈しません。
fn validate_sequences(plan: &Plan) -> Result<()> {
    for (key, sequence) in [
        ("scenario.create_sequence", &plan.scenario.create_sequence),
        ("scenario.test_sequence", &plan.scenario.test_sequence),
    ] {
        for (index, step) in sequence.iter().enumerate() {
            if step.trim().is_empty() {
                return Err(PlanError::InvalidConfig(format!(
                    "{key}[{index}] のステップ名が空です"
                )));
            }
        }
    }
    Ok(())
}
