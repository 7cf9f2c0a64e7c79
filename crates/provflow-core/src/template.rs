//! テンプレート展開機能
//!
//! Teraを使用してシナリオファイルのテンプレート展開を行います。
//! 展開はYAMLパースの前段で行われ、パーサーは展開済みの文字列だけを見ます。

use crate::error::{PlanError, Result};
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};
use tracing::{debug, info};

/// ファイルあたりの推定バイト数（容量事前確保用）
const ESTIMATED_BYTES_PER_FILE: usize = 500;

/// 変数コンテキスト
pub type Variables = HashMap<String, serde_json::Value>;

/// テンプレートプロセッサ
pub struct TemplateProcessor {
    tera: Tera,
    context: Context,
}

impl TemplateProcessor {
    /// 新しいテンプレートプロセッサを作成
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
            context: Context::new(),
        }
    }

    /// 変数を追加
    pub fn add_variable(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.context.insert(key.into(), &value);
    }

    /// 複数の変数を追加
    pub fn add_variables(&mut self, variables: Variables) {
        for (key, value) in variables {
            self.context.insert(key, &value);
        }
    }

    /// 環境変数を追加（安全なもののみ）
    ///
    /// セキュリティ上の理由から、以下のプレフィックスを持つ環境変数のみを許可:
    /// - PROV_*: provflow専用の環境変数
    /// - CI_*: CI/CD環境の変数
    /// - ANSIBLE_*: プロビジョナーに引き渡す変数
    #[tracing::instrument(skip(self))]
    pub fn add_env_variables(&mut self) {
        const ALLOWED_PREFIXES: &[&str] = &["PROV_", "CI_", "ANSIBLE_"];
        let mut count = 0;

        for (key, value) in std::env::vars() {
            // 許可されたプレフィックスを持つ環境変数のみを追加
            if ALLOWED_PREFIXES
                .iter()
                .any(|prefix| key.starts_with(prefix))
            {
                debug!(key = %key, "Adding environment variable");
                self.context.insert(key, &serde_json::Value::String(value));
                count += 1;
            }
        }

        info!(
            env_var_count = count,
            "Added filtered environment variables"
        );
    }

    /// .env ファイルから変数を読み込んで追加
    ///
    /// .env ファイルの変数はプレフィックス制限なしで全て読み込まれます。
    /// これは .env が明示的に配置されたファイルであるためです。
    #[tracing::instrument(skip(self))]
    pub fn add_env_file_variables(&mut self, env_file_path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(env_file_path).map_err(|e| PlanError::IoError {
            path: env_file_path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut count = 0;
        for line in content.lines() {
            let line = line.trim();

            // 空行とコメント行をスキップ
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // KEY=VALUE 形式をパース
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = strip_quotes(value.trim());

                debug!(key = %key, "Adding variable from .env file");
                self.context
                    .insert(key, &serde_json::Value::String(value.to_string()));
                count += 1;
            }
        }

        info!(
            env_file = %env_file_path.display(),
            variable_count = count,
            "Loaded variables from .env file"
        );

        Ok(())
    }

    /// 文字列をテンプレートとして展開
    pub fn render_str(&mut self, template: &str) -> Result<String> {
        self.tera.render_str(template, &self.context).map_err(|e| {
            // Teraのエラーから詳細情報を抽出
            let error_detail = extract_tera_error_detail(&e);
            PlanError::TemplateRenderError(error_detail)
        })
    }

    /// ファイルを読み込んでテンプレート展開
    pub fn render_file(&mut self, path: &Path) -> Result<String> {
        let content = std::fs::read_to_string(path).map_err(|e| PlanError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.render_str(&content).map_err(|e| {
            // TemplateRenderErrorをより詳細なTemplateErrorに変換
            if let PlanError::TemplateRenderError(msg) = e {
                PlanError::TemplateError {
                    file: path.to_path_buf(),
                    line: None,
                    message: msg,
                }
            } else {
                e
            }
        })
    }

    /// 複数のファイルを順に展開して結合
    pub fn render_files(&mut self, paths: &[impl AsRef<Path>]) -> Result<String> {
        // ファイル数から概算容量を計算
        let estimated_capacity = paths.len() * ESTIMATED_BYTES_PER_FILE;
        let mut result = String::with_capacity(estimated_capacity);

        for path in paths {
            let rendered = self.render_file(path.as_ref())?;
            result.push_str(&rendered);
            result.push('\n'); // ファイル間の区切り
        }

        Ok(result)
    }
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// クォートを除去するヘルパー関数
///
/// "value" → value
/// 'value' → value
/// value → value
fn strip_quotes(s: &str) -> &str {
    if (s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Teraエラーから詳細情報を抽出
///
/// Teraのエラーメッセージを解析して、未定義変数などの具体的な情報を取得します。
fn extract_tera_error_detail(e: &tera::Error) -> String {
    use std::error::Error;

    // エラーチェーンを走査して詳細を収集
    let mut details = Vec::new();
    details.push(e.to_string());

    // sourceチェーンをたどる
    let mut source = e.source();
    while let Some(err) = source {
        details.push(err.to_string());
        source = err.source();
    }

    // 未定義変数のパターンを検出
    let full_error = details.join(" | ");

    // Teraの典型的なエラーパターンを解析
    if full_error.contains("not found in context") {
        // 変数名を抽出: "Variable `xxx` not found in context"
        if let Some(start) = full_error.find("Variable `")
            && let Some(end) = full_error[start..].find("` not found")
        {
            let var_name = &full_error[start + 10..start + end];
            return format!(
                "未定義の変数: `{}`\nヒント: .env ファイルに定義するか、PROV_ 接頭辞の環境変数で指定してください",
                var_name
            );
        }
    }

    // フィルターエラーの検出
    if full_error.contains("Filter") && full_error.contains("not found") {
        return format!("未定義のフィルター\n詳細: {full_error}");
    }

    // その他のエラーはそのまま返す
    full_error
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_simple_variable_expansion() {
        let mut processor = TemplateProcessor::new();
        processor.add_variable("name", serde_json::Value::String("staging".to_string()));

        let template = "vm_name: app-{{ name }}";
        let result = processor.render_str(template).unwrap();

        assert_eq!(result, "vm_name: app-staging");
    }

    #[test]
    fn test_nested_variables() {
        let mut processor = TemplateProcessor::new();
        processor.add_variable("base", serde_json::Value::String("bento/debian".to_string()));
        processor.add_variable("release", serde_json::Value::String("12".to_string()));

        let template = "vm_base: {{ base }}-{{ release }}";
        let result = processor.render_str(template).unwrap();

        assert_eq!(result, "vm_base: bento/debian-12");
    }

    #[test]
    fn test_undefined_variable_error() {
        let mut processor = TemplateProcessor::new();

        let result = processor.render_str("{{ missing_var }}");
        let err = result.unwrap_err();

        // 未定義変数はヒント付きのエラーになる
        assert!(err.to_string().contains("missing_var"));
    }

    #[test]
    fn test_if_condition() {
        let mut processor = TemplateProcessor::new();
        processor.add_variable("ephemeral", serde_json::Value::Bool(true));

        let template = r#"
{% if ephemeral %}
managed: false
{% else %}
managed: true
{% endif %}
"#;
        let result = processor.render_str(template).unwrap();

        assert!(result.contains("managed: false"));
        assert!(!result.contains("managed: true"));
    }

    #[test]
    fn test_env_file_variables() {
        let temp_dir = tempfile::tempdir().unwrap();
        let env_path = temp_dir.path().join(".env");
        fs::write(
            &env_path,
            r#"
# コメント行
ROLES_PATH=../../roles
QUOTED="with spaces"
SINGLE='single'
"#,
        )
        .unwrap();

        let mut processor = TemplateProcessor::new();
        processor.add_env_file_variables(&env_path).unwrap();

        let result = processor
            .render_str("{{ ROLES_PATH }} / {{ QUOTED }} / {{ SINGLE }}")
            .unwrap();
        assert_eq!(result, "../../roles / with spaces / single");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes(r#""value""#), "value");
        assert_eq!(strip_quotes("'value'"), "value");
        assert_eq!(strip_quotes("value"), "value");
        assert_eq!(strip_quotes(r#""unbalanced'"#), r#""unbalanced'"#);
    }
}
