use colored::Colorize;
use std::fs;
use std::path::PathBuf;

pub fn handle(name: Option<&str>, force: bool, global: bool) -> anyhow::Result<()> {
    let scenario_name = name.unwrap_or(provflow_core::DEFAULT_SCENARIO);

    let target: PathBuf = if global {
        provflow_config::get_config_dir()?.join("prov.yml")
    } else if let Some(name) = name {
        PathBuf::from(format!("scenarios/{name}/prov.yml"))
    } else {
        PathBuf::from("prov.yml")
    };

    if target.exists() && !force {
        anyhow::bail!(
            "{} は既に存在します。--force で上書きできます",
            target.display()
        );
    }

    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    fs::write(&target, starter_plan(scenario_name))?;

    println!("{}", "✓ シナリオ設定を作成しました！".green());
    println!("  {}", target.display().to_string().cyan());
    println!();
    println!("{}", "次のコマンドで検証できます:".bold());
    println!("  {} validate", "prov".cyan());

    Ok(())
}

/// 雛形のシナリオ設定を生成
fn starter_plan(scenario_name: &str) -> String {
    format!(
        r#"# provflow シナリオ設定
#
# prov validate で検証、prov matrix test でシーケンスを確認できます。
---
driver:
  name: vagrant
  options:
    managed: true
platforms:
  - name: instance-1
    vm_base: bento/debian-12
    vm_name: {scenario_name}-instance-1
    groups:
      - application
provisioner:
  name: ansible
  lint:
    name: ansible-lint
  env:
    ANSIBLE_CONFIG: ansible.cfg
scenario:
  name: {scenario_name}
  create_sequence:
    - create
  test_sequence:
    - destroy
    - create
    - converge
    - verify
    - destroy
verifier:
  name: testinfra
"#
    )
}
