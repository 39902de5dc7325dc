use std::path::Path;

use anyhow::Context;
use cloudwidget_core::UploadOptions;
use serde_json::Value;

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reads a JSON document from a file.
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Splits a captured callback document `{"error": ..., "result": ...}` into its two arguments.
pub fn split_callback(document: Value) -> anyhow::Result<(Option<Value>, Option<Value>)> {
    let Value::Object(mut fields) = document else {
        anyhow::bail!("Callback document must be an object with \"error\" and/or \"result\"");
    };
    Ok((fields.remove("error"), fields.remove("result")))
}

/// Parses `key=value`. The value is read as JSON, falling back to a plain string.
pub fn parse_assignment(assignment: &str) -> anyhow::Result<(String, Value)> {
    let (key, raw) = assignment
        .split_once('=')
        .with_context(|| format!("Expected key=value, got '{}'", assignment))?;
    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Option name is empty in '{}'", assignment);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Applies `key=value` assignments in order; later ones win.
pub fn apply_assignments(options: &mut UploadOptions, assignments: &[String]) -> anyhow::Result<()> {
    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        options.set(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn parse_assignment_json_values() {
        assert_eq!(
            parse_assignment("max_files=3").unwrap(),
            ("max_files".to_string(), json!(3))
        );
        assert_eq!(
            parse_assignment("sources=[\"local\",\"url\"]").unwrap(),
            ("sources".to_string(), json!(["local", "url"]))
        );
        assert_eq!(
            parse_assignment("multiple=false").unwrap(),
            ("multiple".to_string(), json!(false))
        );
    }

    #[test]
    fn parse_assignment_plain_string() {
        assert_eq!(
            parse_assignment("cloud_name=demo").unwrap(),
            ("cloud_name".to_string(), json!("demo"))
        );
        // Only the first '=' separates key and value.
        assert_eq!(
            parse_assignment("stylesheet=a=b").unwrap(),
            ("stylesheet".to_string(), json!("a=b"))
        );
    }

    #[test]
    fn parse_assignment_rejects_malformed() {
        assert!(parse_assignment("cloud_name").is_err());
        assert!(parse_assignment("=demo").is_err());
    }

    #[test]
    fn apply_assignments_overrides_in_order() {
        let mut options = UploadOptions::new();
        options.theme(Some("default"));
        apply_assignments(
            &mut options,
            &["theme=white".to_string(), "theme=minimal".to_string()],
        )
        .unwrap();
        assert_eq!(options.get("theme"), Some(&json!("minimal")));
    }

    #[test]
    fn split_callback_fields() {
        let (error, result) =
            split_callback(json!({ "error": { "message": "x" }, "result": [] })).unwrap();
        assert_eq!(error, Some(json!({ "message": "x" })));
        assert_eq!(result, Some(json!([])));

        let (error, result) = split_callback(json!({})).unwrap();
        assert_eq!((error, result), (None, None));

        assert!(split_callback(json!([])).is_err());
    }

    #[test]
    fn read_json_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"public_id\": \"a\"}}]").unwrap();
        assert_eq!(read_json(file.path()).unwrap(), json!([{ "public_id": "a" }]));
    }

    #[test]
    fn read_json_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_json(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON"));
    }
}
