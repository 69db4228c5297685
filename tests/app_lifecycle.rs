//! App lifecycle: welcome → form → loading → response → form, driven by
//! keys and by answer events delivered through the UI channel.

mod common;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use futures_util::future::BoxFuture;
use genealogy_assistant::answer::{
    failure_payload, AnswerClient, AnswerError, AnswerEvent, AnswerStyle, FragmentStream,
    GenealogyWebsite, QuestionRequest, StaticClient,
};
use genealogy_assistant::clipboard::CopyMode;
use genealogy_assistant::config::UiConfig;
use genealogy_assistant::ui::app::App;
use genealogy_assistant::ui::assistant::AssistantState;
use genealogy_assistant::ui::events::AppEvent;
use genealogy_assistant::ui::input::{handle_key, InputAction};
use genealogy_assistant::ui::runtime::spawn_answer;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

/// Feed answer events from the channel into the app until a terminal one.
fn pump(app: &mut App, rx: &mpsc::Receiver<AppEvent>) {
    loop {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(AppEvent::Answer(event)) => {
                let terminal = matches!(event, AnswerEvent::Finished | AnswerEvent::Failed(_));
                app.on_answer_event(event);
                if terminal {
                    return;
                }
            }
            Ok(_) => {}
            Err(err) => panic!("answer channel stalled: {err:?}"),
        }
    }
}

// -- Keyboard flow -------------------------------------------------------------

#[test]
fn keyboard_flow_reaches_loading_with_selected_options() {
    let mut app = make_app();
    assert!(matches!(app.state(), AssistantState::Welcome));

    handle_key(&mut app, press(KeyCode::Enter));
    let form = app.state().form().unwrap();
    assert_eq!(form.website, GenealogyWebsite::Ancestry);
    assert_eq!(form.style, AnswerStyle::StepByStep);

    // Question is focused first; move to the website selector.
    handle_key(&mut app, press(KeyCode::Tab));
    handle_key(&mut app, press(KeyCode::Tab));
    handle_key(&mut app, press(KeyCode::Down));
    handle_key(&mut app, press(KeyCode::Tab));
    handle_key(&mut app, press(KeyCode::Down));
    handle_key(&mut app, press(KeyCode::Tab));
    for ch in QUESTION.chars() {
        handle_key(&mut app, press(KeyCode::Char(ch)));
    }

    assert_eq!(handle_key(&mut app, ctrl('s')), InputAction::Submit);
    let request = app.submit().expect("valid draft submits");
    assert_eq!(request.website(), GenealogyWebsite::FamilySearch);
    assert_eq!(request.style(), AnswerStyle::Detailed);
    assert_eq!(request.question(), QUESTION);
    assert!(app.state().is_loading());
}

#[test]
fn short_question_keeps_form_with_error() {
    let mut app = make_app();
    app.start();
    type_question(&mut app, "short");

    assert!(app.submit().is_none());
    let form = app.state().form().unwrap();
    assert!(form.error.is_some());
    assert!(!app.is_in_flight());
    assert!(matches!(app.state(), AssistantState::Form { .. }));
}

#[test]
fn keys_are_ignored_while_loading() {
    let mut app = app_ready_to_submit();
    app.submit().unwrap();

    assert_eq!(handle_key(&mut app, ctrl('s')), InputAction::None);
    handle_key(&mut app, press(KeyCode::Char('x')));
    assert_eq!(app.state().form().unwrap().question, QUESTION);
    assert!(app.state().is_loading());
}

// -- Answer delivery -----------------------------------------------------------

#[test]
fn streamed_answer_is_cleaned_once_finished() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let client = Arc::new(StaticClient::with_fragments([
        "```html\n",
        "<p>Search the ",
        "catalog.</p>",
        "\n```",
    ]));

    let mut app = app_ready_to_submit();
    let request = app.submit().unwrap();
    spawn_answer(runtime.handle(), client.clone(), request, tx);
    pump(&mut app, &rx);

    match app.state() {
        AssistantState::Response {
            response,
            error,
            streaming,
            ..
        } => {
            assert_eq!(response, "<p>Search the catalog.</p>");
            assert!(error.is_none());
            assert!(!streaming);
        }
        _ => panic!("expected response state"),
    }
    assert!(!app.is_in_flight());
    assert_eq!(client.request_count(), 1);
}

#[test]
fn failure_shows_payload_with_message() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (tx, rx) = mpsc::channel();
    let client = Arc::new(StaticClient::failing("API key not valid"));

    let mut app = app_ready_to_submit();
    let request = app.submit().unwrap();
    spawn_answer(runtime.handle(), client, request, tx);
    pump(&mut app, &rx);

    let error = app.state().error().expect("error recorded").to_string();
    assert!(error.contains("API key not valid"));
    assert_eq!(app.state().response(), Some(failure_payload(&error).as_str()));
    assert!(!app.is_in_flight());
}

/// Backend with a bug: panics as soon as it is asked.
struct PanickingClient;

impl AnswerClient for PanickingClient {
    fn stream_answer<'a>(
        &'a self,
        _request: &'a QuestionRequest,
    ) -> BoxFuture<'a, Result<FragmentStream, AnswerError>> {
        panic!("backend bug")
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

#[test]
fn panicking_answer_task_still_ends_loading() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (tx, rx) = mpsc::channel();

    let mut app = app_ready_to_submit();
    let request = app.submit().unwrap();
    spawn_answer(runtime.handle(), Arc::new(PanickingClient), request, tx);
    pump(&mut app, &rx);

    let error = app.state().error().expect("error recorded");
    assert!(error.contains("stopped unexpectedly"));
    assert!(!app.state().is_loading());
    assert!(!app.is_in_flight());
}

#[test]
fn partial_answer_is_replaced_by_failure_payload() {
    let mut app = app_ready_to_submit();
    app.submit().unwrap();
    app.on_answer_event(AnswerEvent::Fragment("1. Open the".to_string()));
    assert!(matches!(
        app.state(),
        AssistantState::Response {
            streaming: true,
            ..
        }
    ));

    app.on_answer_event(AnswerEvent::Failed("connection reset".to_string()));
    assert_eq!(
        app.state().response(),
        Some(failure_payload("connection reset").as_str())
    );
}

#[test]
fn second_submit_is_rejected_until_terminal_event() {
    let mut app = app_ready_to_submit();
    assert!(app.submit().is_some());
    assert!(app.submit().is_none());

    app.on_answer_event(AnswerEvent::Fragment("Partial".to_string()));
    assert!(app.submit().is_none());
    assert!(app.is_in_flight());

    app.on_answer_event(AnswerEvent::Finished);
    assert!(!app.is_in_flight());
}

// -- Response actions ----------------------------------------------------------

#[test]
fn copy_and_print_wait_for_stream_end() {
    let mut app = app_ready_to_submit();
    app.submit().unwrap();
    app.on_answer_event(AnswerEvent::Fragment("<ol><li>One</li>".to_string()));

    assert_eq!(handle_key(&mut app, press(KeyCode::Char('c'))), InputAction::None);
    assert!(app.copy_payload(CopyMode::PlainText).is_none());
    assert!(app.printable().is_none());

    app.on_answer_event(AnswerEvent::Fragment("<li>Two</li></ol>".to_string()));
    app.on_answer_event(AnswerEvent::Finished);

    assert_eq!(
        handle_key(&mut app, press(KeyCode::Char('c'))),
        InputAction::Copy(CopyMode::PlainText)
    );
    assert_eq!(
        handle_key(&mut app, press(KeyCode::Char('C'))),
        InputAction::Copy(CopyMode::Source)
    );
    assert_eq!(handle_key(&mut app, press(KeyCode::Char('p'))), InputAction::Print);

    let plain = app.copy_payload(CopyMode::PlainText).unwrap();
    assert!(plain.contains("One"));
    assert!(plain.contains("Two"));
    assert!(!plain.contains("<li>"));
    assert_eq!(
        app.copy_payload(CopyMode::Source).as_deref(),
        Some("<ol><li>One</li><li>Two</li></ol>")
    );
}

#[test]
fn ask_another_question_returns_to_fresh_form() {
    let mut app = App::new(&UiConfig {
        default_website: GenealogyWebsite::MyHeritage,
        ..UiConfig::default()
    });
    app.start();
    type_question(&mut app, QUESTION);
    app.submit().unwrap();
    app.on_answer_event(AnswerEvent::Fragment("Answer".to_string()));

    // Still streaming: reset is ignored.
    handle_key(&mut app, press(KeyCode::Char('n')));
    assert!(matches!(app.state(), AssistantState::Response { .. }));

    app.on_answer_event(AnswerEvent::Finished);
    handle_key(&mut app, press(KeyCode::Char('n')));

    let form = app.state().form().expect("back on the form");
    assert!(matches!(app.state(), AssistantState::Form { .. }));
    assert!(form.question.is_empty());
    assert!(form.error.is_none());
    assert_eq!(form.website, GenealogyWebsite::MyHeritage);
    assert_eq!(app.scroll(), 0);
}

#[test]
fn quit_is_available_in_every_state() {
    let mut app = app_ready_to_submit();
    app.submit().unwrap();
    handle_key(&mut app, ctrl('q'));
    assert!(app.should_quit());
}
