use crate::utils::print_plan_summary;
use colored::Colorize;

pub fn handle(scenario: Option<&str>) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    // プロジェクトルートを検出
    match provflow_core::find_project_root() {
        Ok(project_root) => {
            println!(
                "プロジェクトルート: {}",
                project_root.display().to_string().cyan()
            );

            let result = match scenario {
                Some(name) => {
                    provflow_core::load_plan_from_root_with_scenario(&project_root, Some(name))
                }
                // シナリオ未指定の場合はデバッグ表示付きでロード
                None => provflow_core::load_plan_with_debug(&project_root),
            };

            match result {
                Ok(plan) => {
                    println!("{}", "✓ シナリオ設定は正常です！".green().bold());
                    println!();
                    print_plan_summary(&plan);
                }
                Err(e) => {
                    eprintln!();
                    eprintln!("{}", "✗ 設定エラー".red().bold());
                    eprintln!("  {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(root_err) => {
            // プロジェクト外の場合は設定ファイルの直接検索にフォールバック
            match provflow_config::find_plan_file() {
                Ok(path) => {
                    println!("シナリオファイル: {}", path.display().to_string().cyan());
                    match provflow_core::parse_plan_file(&path) {
                        Ok(plan) => {
                            println!("{}", "✓ シナリオ設定は正常です！".green().bold());
                            println!();
                            print_plan_summary(&plan);
                        }
                        Err(e) => {
                            eprintln!();
                            eprintln!("{}", "✗ 設定エラー".red().bold());
                            eprintln!("  {}", e);
                            std::process::exit(1);
                        }
                    }
                }
                Err(_) => {
                    eprintln!();
                    eprintln!("{}", "✗ プロジェクトルートが見つかりません".red().bold());
                    eprintln!("  {}", root_err);
                    eprintln!();
                    eprintln!("prov.yml が存在するディレクトリで実行してください");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
