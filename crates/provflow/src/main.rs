mod commands;
mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prov")]
#[command(about = "書いて、流す。VMテストは、宣言になった。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// シナリオ設定を検証
    Validate {
        /// シナリオ名 (default, staging など)
        scenario: Option<String>,
        /// シナリオ名 (-s/--scenario フラグ、PROV_SCENARIO 環境変数)
        #[arg(
            short = 's',
            long = "scenario",
            env = "PROV_SCENARIO",
            conflicts_with = "scenario",
            hide = true
        )]
        scenario_flag: Option<String>,
    },
    /// プロジェクト内のシナリオ一覧を表示
    List,
    /// ライフサイクルシーケンスを表示
    Matrix {
        /// シーケンス種別 (create / test)
        sequence: String,
        /// シナリオ名 (default, staging など)
        scenario: Option<String>,
        /// シナリオ名 (-s/--scenario フラグ、PROV_SCENARIO 環境変数)
        #[arg(
            short = 's',
            long = "scenario",
            env = "PROV_SCENARIO",
            conflicts_with = "scenario",
            hide = true
        )]
        scenario_flag: Option<String>,
    },
    /// シナリオ設定の雛形を作成
    Init {
        /// シナリオ名（省略時はカレントディレクトリに prov.yml を作成）
        name: Option<String>,
        /// 既存ファイルを上書きする
        #[arg(short, long)]
        force: bool,
        /// グローバル設定 (~/.config/provflow/) に作成する
        #[arg(long)]
        global: bool,
    },
    /// バージョン情報を表示
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログはstderrに出力
    tracing_subscriber::fmt::init();

    match cli.command {
        Commands::Validate {
            scenario,
            scenario_flag,
        } => {
            let scenario = utils::resolve_scenario(scenario, scenario_flag);
            commands::validate::handle(scenario.as_deref())
        }
        Commands::List => commands::list::handle(),
        Commands::Matrix {
            sequence,
            scenario,
            scenario_flag,
        } => {
            let scenario = utils::resolve_scenario(scenario, scenario_flag);
            commands::matrix::handle(&sequence, scenario.as_deref())
        }
        Commands::Init {
            name,
            force,
            global,
        } => commands::init::handle(name.as_deref(), force, global),
        Commands::Version => {
            println!("provflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
