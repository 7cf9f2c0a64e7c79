use colored::Colorize;
use provflow_core::Plan;

/// シナリオ名を決定する（位置引数と -s フラグの共通ロジック）
///
/// 位置引数が優先。どちらも無い場合は None（デフォルトシナリオ）。
pub fn resolve_scenario(positional: Option<String>, flag: Option<String>) -> Option<String> {
    positional.or(flag)
}

/// ロード済みPlanのサマリーを表示
pub fn print_plan_summary(plan: &Plan) {
    println!("サマリー:");
    println!("  ドライバー: {}", plan.driver.name.cyan());

    println!("  プラットフォーム: {}台", plan.platforms.len());
    for platform in &plan.platforms {
        let base = platform.vm_base.as_deref().unwrap_or("(未設定)");
        let groups = if platform.groups.is_empty() {
            String::new()
        } else {
            format!(" [{}]", platform.groups.join(", "))
        };
        println!("    - {} ({}){}", platform.name.cyan(), base, groups);
    }

    println!(
        "  プロビジョナー: {} (環境変数 {}個)",
        plan.provisioner.name.cyan(),
        plan.provisioner.env.len()
    );

    println!("  シナリオ: {}", plan.scenario.name.cyan());
    println!("    create: {}", plan.scenario.create_sequence.join(" → "));
    println!("    test:   {}", plan.scenario.test_sequence.join(" → "));

    println!("  ベリファイア: {}", plan.verifier.name.cyan());
}
