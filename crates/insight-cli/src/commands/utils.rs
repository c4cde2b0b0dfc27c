use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use insight_application::ResearchUseCase;
use insight_core::InsightError;
use insight_core::auth::AuthSession;
use insight_core::research::{AnalysisRecord, Document};
use insight_infrastructure::{ConfigService, JsonHistoryRepository, WatchSessionProvider};
use insight_interaction::AnalysisApiClient;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Composition root: wires config, client, history file and a local session.
pub fn build_usecase() -> Result<ResearchUseCase> {
    let config = ConfigService::new()
        .and_then(|service| service.load())
        .map_err(to_anyhow)?;
    let client = AnalysisApiClient::from_config(&config.service);
    let history = JsonHistoryRepository::default_location().map_err(to_anyhow)?;
    let sessions = WatchSessionProvider::new(Some(local_session()));

    Ok(
        ResearchUseCase::new(Arc::new(client), Arc::new(history), Arc::new(sessions))
            .with_analysis_config(config.analysis),
    )
}

/// The CLI acts for the local OS user.
fn local_session() -> AuthSession {
    let user_id = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "local".to_string());
    AuthSession {
        user_id,
        display_name: None,
    }
}

/// Converts a domain error into a user-facing anyhow error.
pub fn to_anyhow(err: InsightError) -> anyhow::Error {
    tracing::debug!(error = %err, "Command failed");
    anyhow!(err.user_message())
}

/// Reads a text document, guessing its type from the file extension.
pub fn read_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let doc_type = mime_guess::from_path(path)
        .first_or_text_plain()
        .essence_str()
        .to_string();
    Ok(Document::new(name, content, doc_type))
}

pub fn print_record(index: usize, record: &AnalysisRecord) {
    if record.is_fallback() {
        println!("{} {}", "⚠️".yellow(), record.company_name.yellow().bold());
    } else {
        println!("{}. {}", index + 1, record.company_name.green().bold());
    }

    for (key, value) in &record.details {
        if key.starts_with('_') {
            continue;
        }
        println!("   {}: {}", key.dimmed(), render_value(value));
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_guesses_type() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.html");
        std::fs::write(&path, "<h1>Market</h1>").unwrap();

        let doc = read_document(&path).unwrap();

        assert_eq!(doc.name, "notes.html");
        assert_eq!(doc.content, "<h1>Market</h1>");
        assert_eq!(doc.doc_type, "text/html");
    }

    #[test]
    fn test_read_missing_document_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_document(&temp_dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&Value::String("x".into())), "x");
        assert_eq!(render_value(&Value::Null), "-");
        assert_eq!(render_value(&serde_json::json!([1, 2])), "[1,2]");
    }
}
