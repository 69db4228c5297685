//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_gemini;

use genealogy_assistant::answer::{
    AnswerStyle, GeminiSettings, GenealogyWebsite, QuestionRequest, ResponseMode,
};
use genealogy_assistant::config::{SecureString, UiConfig};
use genealogy_assistant::ui::app::App;
use genealogy_assistant::ui::assistant::AssistantIntent;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "test-gemini-key";
pub const TEST_MODEL: &str = "gemini-test";
pub const QUESTION: &str = "How do I find birth records for an ancestor in the 1800s?";

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Client settings pointing at a mock server.
pub fn gemini_settings(base_url: &str, mode: ResponseMode) -> GeminiSettings {
    GeminiSettings {
        base_url: base_url.to_string(),
        model: TEST_MODEL.to_string(),
        api_key: SecureString::new(TEST_API_KEY.to_string()),
        mode,
        connect_timeout: Duration::from_secs(2),
        request_timeout: Duration::from_secs(5),
        idle_timeout: Duration::from_secs(5),
    }
}

pub fn question_request() -> QuestionRequest {
    QuestionRequest::new(GenealogyWebsite::FamilySearch, AnswerStyle::StepByStep, QUESTION)
        .expect("valid question")
}

// -- App helpers --------------------------------------------------------------

pub fn make_app() -> App {
    App::new(&UiConfig::default())
}

pub fn type_question(app: &mut App, text: &str) {
    for ch in text.chars() {
        app.edit(AssistantIntent::InsertChar(ch));
    }
}

/// An app on the form screen with a valid question typed in.
pub fn app_ready_to_submit() -> App {
    let mut app = make_app();
    app.start();
    type_question(&mut app, QUESTION);
    app
}
