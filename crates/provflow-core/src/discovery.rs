//! ファイル自動発見機能
//!
//! 規約ベースのディレクトリ構造からシナリオファイルを自動的に発見します。
//!
//! レイアウト:
//! - `prov.yml` または `.provflow/prov.yml` — デフォルトシナリオ
//! - `scenarios/{name}/prov.yml` — 名前付きシナリオ
//! - `prov.local.yml` — ローカルオーバーライド（コミットしない想定）
//! - `.env` — テンプレート展開用の変数ファイル

use crate::error::{PlanError, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// デフォルトシナリオ名
pub const DEFAULT_SCENARIO: &str = "default";

/// 発見されたファイル群
#[derive(Debug, Clone)]
pub struct DiscoveredFiles {
    /// シナリオファイル (prov.yml)
    pub plan: PathBuf,
    /// ローカルオーバーライドファイル (prov.local.yml)
    pub local_override: Option<PathBuf>,
    /// 環境変数ファイル (.env)
    pub env_file: Option<PathBuf>,
    /// シナリオディレクトリ固有の環境変数ファイル (scenarios/{name}/.env)
    pub scenario_env_file: Option<PathBuf>,
}

/// プロジェクトルートを検出
///
/// 以下の優先順位で検索:
/// 1. 環境変数 PROVFLOW_PROJECT_ROOT
/// 2. カレントディレクトリから上に向かって以下を探す:
///    - prov.yml
///    - .provflow/prov.yml
///    - scenarios/ ディレクトリ
#[tracing::instrument]
pub fn find_project_root() -> Result<PathBuf> {
    // 1. 環境変数
    if let Ok(root) = std::env::var("PROVFLOW_PROJECT_ROOT") {
        let path = PathBuf::from(&root);
        debug!(env_root = %root, "Checking PROVFLOW_PROJECT_ROOT");
        if has_project_markers(&path) {
            info!(project_root = %path.display(), "Found project root from environment variable");
            return Ok(path);
        }
    }

    // 2. カレントディレクトリから上に向かって探す
    let start_dir = std::env::current_dir()?;
    let mut current = start_dir.clone();
    debug!(start_dir = %start_dir.display(), "Searching for project root");

    loop {
        debug!(checking = %current.display(), "Looking for project markers");
        if has_project_markers(&current) {
            info!(project_root = %current.display(), "Found project root");
            return Ok(current);
        }

        // 親ディレクトリへ
        if !current.pop() {
            break;
        }
    }

    warn!(start_dir = %start_dir.display(), "Project root not found");
    Err(PlanError::ProjectRootNotFound(start_dir))
}

/// ディレクトリがプロジェクトルートの目印を持つか
fn has_project_markers(dir: &Path) -> bool {
    dir.join("prov.yml").exists()
        || dir.join(".provflow/prov.yml").exists()
        || dir.join("scenarios").is_dir()
}

/// プロジェクトルートからデフォルトシナリオのファイルを発見
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn discover_files(project_root: &Path) -> Result<DiscoveredFiles> {
    discover_files_with_scenario(project_root, None)
}

/// シナリオ指定でプロジェクトルートからファイルを発見
///
/// scenario が None の場合はデフォルトシナリオを探します。
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn discover_files_with_scenario(
    project_root: &Path,
    scenario: Option<&str>,
) -> Result<DiscoveredFiles> {
    debug!("Starting file discovery");
    let scenario = scenario.unwrap_or(DEFAULT_SCENARIO);

    // シナリオファイル本体
    let plan = find_plan_file(project_root, scenario)
        .ok_or_else(|| PlanError::ScenarioNotFound(scenario.to_string()))?;
    debug!(file = %plan.display(), scenario = %scenario, "Found plan file");

    let plan_dir = plan
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| project_root.to_path_buf());

    // prov.local.yml（シナリオディレクトリ優先、次にルート、最後に .provflow/）
    let override_candidates = [
        plan_dir.join("prov.local.yml"),
        project_root.join("prov.local.yml"),
        project_root.join(".provflow/prov.local.yml"),
    ];
    let local_override = override_candidates.into_iter().find(|p| p.exists());
    if let Some(path) = &local_override {
        debug!(file = %path.display(), "Found local override file");
    }

    // .env または .provflow/.env
    let env_file = [project_root.join(".env"), project_root.join(".provflow/.env")]
        .into_iter()
        .find(|p| p.exists());
    if let Some(path) = &env_file {
        debug!(file = %path.display(), "Found .env file");
    }

    // シナリオディレクトリ固有の .env（ルートの .env を上書きする）
    let scenario_env_file = if plan_dir != project_root {
        let candidate = plan_dir.join(".env");
        candidate.exists().then_some(candidate)
    } else {
        None
    };

    Ok(DiscoveredFiles {
        plan,
        local_override,
        env_file,
        scenario_env_file,
    })
}

/// シナリオ名からシナリオファイルを解決
fn find_plan_file(project_root: &Path, scenario: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // デフォルトシナリオはルート直下（または .provflow/）のファイルも候補になる
    if scenario == DEFAULT_SCENARIO {
        candidates.push(project_root.join("prov.yml"));
        candidates.push(project_root.join(".provflow/prov.yml"));
    }
    candidates.push(project_root.join(format!("scenarios/{scenario}/prov.yml")));

    candidates.into_iter().find(|p| p.exists())
}

/// プロジェクト内のシナリオ名を列挙
///
/// アルファベット順にソートして返す
#[tracing::instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn list_scenarios(project_root: &Path) -> Result<Vec<String>> {
    let mut scenarios = Vec::new();

    // ルート直下のファイルはデフォルトシナリオ
    if project_root.join("prov.yml").exists() || project_root.join(".provflow/prov.yml").exists() {
        scenarios.push(DEFAULT_SCENARIO.to_string());
    }

    // scenarios/*/prov.yml
    let pattern = project_root.join("scenarios/*/prov.yml");
    let pattern = pattern.to_string_lossy();
    let entries = glob(&pattern).map_err(|e| PlanError::DiscoveryError {
        path: project_root.to_path_buf(),
        message: format!("globパターンが不正です: {}", e),
    })?;

    for entry in entries {
        let path = entry.map_err(|e| PlanError::DiscoveryError {
            path: project_root.to_path_buf(),
            message: format!("シナリオディレクトリの読み込みに失敗: {}", e),
        })?;
        if let Some(name) = path
            .parent()
            .and_then(|dir| dir.file_name())
            .and_then(|n| n.to_str())
        {
            scenarios.push(name.to_string());
        }
    }

    scenarios.sort();
    scenarios.dedup();

    info!(scenario_count = scenarios.len(), "Discovered scenarios");
    Ok(scenarios)
}
