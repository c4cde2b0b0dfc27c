pub mod config;
pub mod history;
pub mod submit;
pub mod utils;
