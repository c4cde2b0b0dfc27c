pub mod config_service;
pub mod json_history_repository;
pub mod paths;
pub mod storage;
pub mod watch_session_provider;

pub use crate::config_service::ConfigService;
pub use crate::json_history_repository::JsonHistoryRepository;
pub use crate::watch_session_provider::WatchSessionProvider;
