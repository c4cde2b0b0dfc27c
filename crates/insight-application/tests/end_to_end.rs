use async_trait::async_trait;
use insight_application::ResearchUseCase;
use insight_core::auth::AuthSession;
use insight_core::error::Result;
use insight_core::research::{AnalysisService, Document, RawInputSet, RequestPayload};
use insight_core::view::ViewState;
use insight_infrastructure::{JsonHistoryRepository, WatchSessionProvider};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct CannedAnalysisService {
    body: String,
    seen: Mutex<Vec<RequestPayload>>,
}

#[async_trait]
impl AnalysisService for CannedAnalysisService {
    async fn analyze(&self, payload: &RequestPayload) -> Result<String> {
        self.seen.lock().unwrap().push(payload.clone());
        Ok(self.body.clone())
    }
}

fn research_input() -> RawInputSet {
    RawInputSet {
        documents: vec![Document::new(
            "market-notes.txt",
            "m".repeat(2_000),
            "text/plain",
        )],
        blog_links: vec![],
        product_lines: vec!["Industrial widgets".to_string()],
    }
}

#[tokio::test]
async fn test_submit_with_malformed_fragment_shows_results() {
    let temp_dir = TempDir::new().unwrap();
    let service = Arc::new(CannedAnalysisService {
        body: "{\"companyName\":\"Acme\"}------------------------not json".to_string(),
        seen: Mutex::new(Vec::new()),
    });
    let sessions = Arc::new(WatchSessionProvider::signed_out());
    let usecase = ResearchUseCase::new(
        service.clone(),
        Arc::new(JsonHistoryRepository::with_path(
            temp_dir.path().join("history.json"),
        )),
        sessions.clone(),
    );

    assert_eq!(usecase.view_state().await, ViewState::Auth);
    sessions.sign_in(AuthSession {
        user_id: "analyst".to_string(),
        display_name: None,
    });
    assert_eq!(usecase.view_state().await, ViewState::Main);

    let outcome = usecase.submit(&research_input()).await.unwrap();

    assert!(!outcome.degraded);
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].company_name, "Acme");
    assert_eq!(usecase.view_state().await, ViewState::Results);

    let seen = service.seen.lock().unwrap();
    assert_eq!(seen[0].documents[0].content.chars().count(), 2_000);
    assert!(seen[0].blog_links.is_empty());
}

#[tokio::test]
async fn test_saved_research_round_trips_through_history_file() {
    let temp_dir = TempDir::new().unwrap();
    let history_path = temp_dir.path().join("history.json");
    let sessions = Arc::new(WatchSessionProvider::new(Some(AuthSession {
        user_id: "analyst".to_string(),
        display_name: None,
    })));
    let service = Arc::new(CannedAnalysisService {
        body: "```json\n{\"companyName\":\"Acme\",\"score\":null}\n```\n------------------------\n{\"companyName\":\"Beta\"}".to_string(),
        seen: Mutex::new(Vec::new()),
    });
    let usecase = ResearchUseCase::new(
        service,
        Arc::new(JsonHistoryRepository::with_path(&history_path)),
        sessions.clone(),
    );

    usecase.submit(&research_input()).await.unwrap();
    let first = usecase.save_results(None).await.unwrap();
    let second = usecase.save_results(None).await.unwrap();
    assert!(first.created);
    assert!(!second.created);

    // A fresh use case over the same file sees one entry
    let reopened = ResearchUseCase::new(
        Arc::new(CannedAnalysisService {
            body: String::new(),
            seen: Mutex::new(Vec::new()),
        }),
        Arc::new(JsonHistoryRepository::with_path(&history_path)),
        sessions.clone(),
    );
    let history = reopened.load_history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].company_names(), vec!["Acme", "Beta"]);
    assert_eq!(history[0].data[0].field("score"), Some(&serde_json::Value::Null));

    reopened.select_history_entry(&first.id).await.unwrap();
    assert_eq!(reopened.view_state().await, ViewState::Results);

    sessions.sign_out();
    assert_eq!(reopened.view_state().await, ViewState::Auth);

    reopened.delete_history_entry(&first.id).await.unwrap_err();
    assert_eq!(reopened.history().await.len(), 1);
}
