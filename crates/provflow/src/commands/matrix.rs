use colored::Colorize;

pub fn handle(sequence: &str, scenario: Option<&str>) -> anyhow::Result<()> {
    let project_root = provflow_core::find_project_root()?;
    let plan = provflow_core::load_plan_from_root_with_scenario(&project_root, scenario)?;

    let Some(steps) = plan.scenario.sequence(sequence) else {
        anyhow::bail!("不明なシーケンス種別です: {sequence}\n指定できるのは create / test です");
    };

    println!(
        "シナリオ {} の {} シーケンス:",
        plan.scenario.name.cyan(),
        sequence.cyan()
    );
    for step in steps {
        println!("  {}", step);
    }

    Ok(())
}
