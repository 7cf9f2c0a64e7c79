use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// 検証を通るシナリオ設定（テスト用の共通フィクスチャ）
#[allow(dead_code)]
pub const VALID_PLAN: &str = r#"
driver:
  name: vagrant
platforms:
  - name: app-staging
    vm_base: bento/debian-12
    groups:
      - application
      - staging
  - name: mon-staging
    vm_base: bento/debian-12
    groups:
      - monitoring
      - staging
provisioner:
  name: ansible
  env:
    ANSIBLE_CONFIG: ansible.cfg
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

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    #[allow(dead_code)]
    pub fn write_prov_yml(&self, content: &str) {
        let path = self.root.path().join("prov.yml");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_scenario(&self, name: &str, content: &str) {
        let dir = self.root.path().join("scenarios").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("prov.yml"), content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_local_override(&self, content: &str) {
        let path = self.root.path().join("prov.local.yml");
        fs::write(path, content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }
}
