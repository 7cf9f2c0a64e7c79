//! 統合ローダー
//!
//! ファイル発見、テンプレート展開、パース、オーバーライドのマージを統合

use crate::discovery::{
    DEFAULT_SCENARIO, DiscoveredFiles, discover_files_with_scenario, find_project_root,
};
use crate::error::Result;
use crate::model::Plan;
use crate::parser::validate_plan;
use crate::template::TemplateProcessor;
use serde_yaml::Value;
use std::path::Path;
use tracing::{debug, info, instrument};

/// プロジェクト全体をロードしてPlanを生成
///
/// 以下の処理を実行:
/// 1. プロジェクトルートの検出
/// 2. シナリオファイルの発見
/// 3. 変数の収集とテンプレート展開
/// 4. YAMLパースとオーバーライドのマージ
/// 5. 検証
#[instrument]
pub fn load_plan() -> Result<Plan> {
    info!("Starting plan load");
    let project_root = find_project_root()?;
    load_plan_from_root(&project_root)
}

/// 指定されたルートディレクトリからデフォルトシナリオをロード
#[instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn load_plan_from_root(project_root: &Path) -> Result<Plan> {
    load_plan_from_root_with_scenario(project_root, None)
}

/// シナリオ指定でプロジェクトをロード
///
/// prov.local.yml が存在する場合、ベースのシナリオファイルに
/// ディープマージされます（マッピングは再帰的にマージ、
/// シーケンスとスカラーはオーバーライド側で置き換え）。
#[instrument(skip(project_root), fields(project_root = %project_root.display()))]
pub fn load_plan_from_root_with_scenario(
    project_root: &Path,
    scenario: Option<&str>,
) -> Result<Plan> {
    // 1. ファイル発見
    debug!("Step 1: Discovering files");
    let discovered = discover_files_with_scenario(project_root, scenario)?;

    // 2. 変数収集とテンプレート準備
    debug!("Step 2: Preparing template processor");
    let mut processor = prepare_template_processor(&discovered, project_root, scenario)?;

    // 3. テンプレート展開
    debug!("Step 3: Expanding templates");
    let base_content = processor.render_file(&discovered.plan)?;
    info!(
        content_size = base_content.len(),
        "Template expansion complete"
    );

    // 4. YAMLパース（オーバーライドがあればマージ）
    debug!("Step 4: Parsing YAML");
    let mut document: Value = serde_yaml::from_str(&base_content)?;

    if let Some(override_file) = &discovered.local_override {
        debug!(file = %override_file.display(), "Merging local override");
        let override_content = processor.render_file(override_file)?;
        let override_document: Value = serde_yaml::from_str(&override_content)?;
        document = merge_values(document, override_document);
    }

    let plan: Plan = serde_yaml::from_value(document)?;

    // 5. 検証
    debug!("Step 5: Validating plan");
    validate_plan(&plan)?;
    info!(
        platforms = plan.platforms.len(),
        scenario = %plan.scenario.name,
        "Plan loaded successfully"
    );

    Ok(plan)
}

/// テンプレートプロセッサを準備
fn prepare_template_processor(
    discovered: &DiscoveredFiles,
    project_root: &Path,
    scenario: Option<&str>,
) -> Result<TemplateProcessor> {
    let mut processor = TemplateProcessor::new();

    // 0. ビルトイン変数を追加（PROJECT_ROOT, SCENARIO_NAME）
    processor.add_variable(
        "PROJECT_ROOT",
        serde_json::Value::String(project_root.to_string_lossy().to_string()),
    );
    processor.add_variable(
        "SCENARIO_NAME",
        serde_json::Value::String(scenario.unwrap_or(DEFAULT_SCENARIO).to_string()),
    );

    // 1. .env ファイルから変数を追加
    if let Some(env_file) = &discovered.env_file {
        processor.add_env_file_variables(env_file)?;
    }

    // 2. シナリオディレクトリの .env から変数を追加（ルートの .env を上書き）
    if let Some(scenario_env_file) = &discovered.scenario_env_file {
        processor.add_env_file_variables(scenario_env_file)?;
    }

    // 3. 環境変数を追加（PROV_*, CI_*, ANSIBLE_* プレフィックスのみ、最優先）
    processor.add_env_variables();

    Ok(processor)
}

/// YAML値をディープマージ
///
/// マッピング同士は再帰的にマージし、それ以外（シーケンス、スカラー）は
/// オーバーライド側の値で置き換えます。platforms のようなリストはマージ
/// されず丸ごと置き換わります。
fn merge_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(mut base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Mapping(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// デバッグ情報を表示しながらロード
///
/// 環境変数 `PROV_SCENARIO` が設定されている場合、そのシナリオを読み込みます。
pub fn load_plan_with_debug(project_root: &Path) -> Result<Plan> {
    // PROV_SCENARIO 環境変数を取得
    let scenario = std::env::var("PROV_SCENARIO").ok();
    let scenario_ref = scenario.as_deref();

    println!("🔍 プロジェクト検出");
    println!("  ルート: {}", project_root.display());
    if let Some(s) = &scenario {
        println!("  シナリオ: {}", s);
    }

    let discovered = discover_files_with_scenario(project_root, scenario_ref)?;

    println!("\n📂 ファイル発見");
    println!("  ✓ {}", discovered.plan.display());
    if let Some(path) = &discovered.local_override {
        println!("  ✓ {} (ローカルオーバーライド)", path.display());
    }

    // .env ファイルの表示
    if discovered.env_file.is_some() || discovered.scenario_env_file.is_some() {
        println!("\n🔐 環境変数ファイル");
        if let Some(env_file) = &discovered.env_file {
            println!("  ✓ {} (base)", env_file.display());
        }
        if let Some(scenario_env_file) = &discovered.scenario_env_file {
            println!("  ✓ {} (scenario-specific)", scenario_env_file.display());
        }
    }

    println!("\n📖 変数収集とテンプレート展開");
    let plan = load_plan_from_root_with_scenario(project_root, scenario_ref)?;
    println!("  ✓ 完了");

    println!("\n⚙️  ロード結果");
    println!("  ドライバー: {}", plan.driver.name);
    println!("  プラットフォーム: {}台", plan.platforms.len());
    println!("  シナリオ: {}", plan.scenario.name);

    println!("\n✅ ロード完了\n");

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const BASE_PLAN: &str = r#"
driver:
  name: vagrant
platforms:
  - name: app
    vm_base: bento/debian-12
    groups:
      - application
provisioner:
  name: ansible
  env:
    ANSIBLE_CONFIG: ../ansible.cfg
scenario:
  name: default
  create_sequence:
    - create
  test_sequence:
    - destroy
    - create
    - converge
    - destroy
verifier:
  name: testinfra
"#;

    #[test]
    fn test_load_plan_basic() -> Result<()> {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_root = temp_dir.path();
        fs::write(project_root.join("prov.yml"), BASE_PLAN)?;

        let plan = load_plan_from_root(project_root)?;

        assert_eq!(plan.driver.name, "vagrant");
        assert_eq!(plan.platforms.len(), 1);
        assert_eq!(plan.platforms[0].vm_base.as_deref(), Some("bento/debian-12"));
        assert_eq!(plan.scenario.test_sequence.len(), 4);

        Ok(())
    }

    #[test]
    fn test_load_named_scenario() -> Result<()> {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_root = temp_dir.path();
        fs::write(project_root.join("prov.yml"), BASE_PLAN)?;

        fs::create_dir_all(project_root.join("scenarios/upgrade"))?;
        fs::write(
            project_root.join("scenarios/upgrade/prov.yml"),
            BASE_PLAN.replace("name: default", "name: upgrade"),
        )?;

        let plan = load_plan_from_root_with_scenario(project_root, Some("upgrade"))?;
        assert_eq!(plan.scenario.name, "upgrade");

        // デフォルトシナリオはルートのファイルから
        let default_plan = load_plan_from_root(project_root)?;
        assert_eq!(default_plan.scenario.name, "default");

        Ok(())
    }

    #[test]
    fn test_load_plan_with_local_override() -> Result<()> {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_root = temp_dir.path();
        fs::write(project_root.join("prov.yml"), BASE_PLAN)?;

        // provisioner.env に1キー追加し、test_sequence を置き換える
        fs::write(
            project_root.join("prov.local.yml"),
            r#"
provisioner:
  env:
    ANSIBLE_ROLES_PATH: ../../roles
scenario:
  test_sequence:
    - converge
"#,
        )?;

        let plan = load_plan_from_root(project_root)?;

        // マッピングはマージされる（既存キーは残る）
        assert_eq!(plan.provisioner.env.len(), 2);
        assert_eq!(plan.provisioner.env["ANSIBLE_CONFIG"], "../ansible.cfg");
        assert_eq!(plan.provisioner.env["ANSIBLE_ROLES_PATH"], "../../roles");

        // シーケンスは置き換えられる
        assert_eq!(plan.scenario.test_sequence, vec!["converge"]);
        // オーバーライドに書かれていないセクションはそのまま
        assert_eq!(plan.platforms.len(), 1);
        assert_eq!(plan.verifier.name, "testinfra");

        Ok(())
    }

    #[test]
    fn test_load_plan_with_env_file_template() -> Result<()> {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_root = temp_dir.path();

        fs::write(project_root.join(".env"), "VM_BASE=bento/ubuntu-24.04\n")?;
        fs::write(
            project_root.join("prov.yml"),
            r#"
driver:
  name: vagrant
platforms:
  - name: app
    vm_base: "{{ VM_BASE }}"
provisioner:
  name: ansible
scenario:
  name: default
verifier:
  name: testinfra
"#,
        )?;

        let plan = load_plan_from_root(project_root)?;
        assert_eq!(
            plan.platforms[0].vm_base.as_deref(),
            Some("bento/ubuntu-24.04")
        );

        Ok(())
    }

    #[test]
    fn test_load_plan_builtin_variables() -> Result<()> {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_root = temp_dir.path();

        fs::write(
            project_root.join("prov.yml"),
            r#"
driver:
  name: vagrant
platforms:
  - name: "app-{{ SCENARIO_NAME }}"
provisioner:
  name: ansible
scenario:
  name: default
verifier:
  name: testinfra
"#,
        )?;

        let plan = load_plan_from_root(project_root)?;
        assert_eq!(plan.platforms[0].name, "app-default");

        Ok(())
    }

    #[test]
    fn test_invalid_plan_is_not_partially_applied() {
        let temp_dir = tempfile::tempdir().unwrap();
        let project_root = temp_dir.path();
        fs::write(
            project_root.join("prov.yml"),
            r#"
driver:
  name: vagrant
platforms:
  - name: app
  - name: app
provisioner:
  name: ansible
scenario:
  name: default
verifier:
  name: testinfra
"#,
        )
        .unwrap();

        // 検証に失敗した場合はPlanが返らない
        let result = load_plan_from_root(project_root);
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_values_deep() {
        let base: Value = serde_yaml::from_str(
            r#"
a:
  x: 1
  y: 2
b: [1, 2]
"#,
        )
        .unwrap();
        let overlay: Value = serde_yaml::from_str(
            r#"
a:
  y: 20
  z: 30
b: [3]
"#,
        )
        .unwrap();

        let merged = merge_values(base, overlay);
        let map = merged.as_mapping().unwrap();
        let a = map.get("a").unwrap().as_mapping().unwrap();

        assert_eq!(a.get("x").unwrap().as_u64(), Some(1));
        assert_eq!(a.get("y").unwrap().as_u64(), Some(20));
        assert_eq!(a.get("z").unwrap().as_u64(), Some(30));
        // シーケンスは置き換え
        assert_eq!(map.get("b").unwrap().as_sequence().unwrap().len(), 1);
    }
}
