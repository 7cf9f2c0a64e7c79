use colored::Colorize;
use provflow_core::DEFAULT_SCENARIO;

pub fn handle() -> anyhow::Result<()> {
    let project_root = provflow_core::find_project_root()?;
    let scenarios = provflow_core::list_scenarios(&project_root)?;

    if scenarios.is_empty() {
        println!("{}", "シナリオが見つかりませんでした".yellow());
        println!("prov init で雛形を作成できます");
        return Ok(());
    }

    println!("シナリオ一覧 ({}個):", scenarios.len());
    for name in &scenarios {
        let scenario_arg = if name == DEFAULT_SCENARIO {
            None
        } else {
            Some(name.as_str())
        };

        match provflow_core::load_plan_from_root_with_scenario(&project_root, scenario_arg) {
            Ok(plan) => {
                println!(
                    "  {} {} (driver: {}, {}台)",
                    "✓".green(),
                    name.cyan(),
                    plan.driver.name,
                    plan.platforms.len()
                );
            }
            Err(e) => {
                println!("  {} {} ({})", "✗".red(), name.cyan(), e);
            }
        }
    }

    Ok(())
}
