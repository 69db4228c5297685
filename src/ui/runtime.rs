use std::io;
use std::sync::mpsc::{RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;

use crate::answer::{consume_answer, AnswerClient, AnswerEvent, AnswerSink, QuestionRequest};
use crate::clipboard::{ClipboardHandler, CopyMode};
use crate::config::UiConfig;
use crate::print::print_answer;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{handle_key, handle_paste, InputAction};
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Shown when the answer task dies without publishing a terminal event.
const TASK_PANICKED: &str =
    "An error occurred while fetching the answer: the request stopped unexpectedly";

/// Run the assistant until the user quits.
///
/// The UI loop blocks the calling thread; answer requests run on `handle`.
pub fn run(ui: &UiConfig, client: Arc<dyn AnswerClient>, handle: Handle) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let tick_rate = Duration::from_millis(ui.tick_rate_ms);
    let mut app = App::new(ui);
    let events = EventHandler::new(tick_rate);
    let mut clipboard: Option<ClipboardHandler> = None;

    tracing::info!(client = client.name(), "Assistant started");

    loop {
        terminal.draw(|frame| draw(frame, &mut app, Instant::now()))?;
        if app.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => match handle_key(&mut app, key) {
                InputAction::None => {}
                InputAction::Submit => {
                    if let Some(request) = app.submit() {
                        spawn_answer(&handle, Arc::clone(&client), request, events.sender());
                    }
                }
                InputAction::Copy(mode) => copy_response(&mut app, &mut clipboard, mode),
                InputAction::Print => print_response(&mut app),
            },
            Ok(AppEvent::Paste(text)) => handle_paste(&mut app, text),
            Ok(AppEvent::Tick) => app.on_tick(Instant::now()),
            Ok(AppEvent::Resize(_, _)) => {}
            Ok(AppEvent::Answer(event)) => app.on_answer_event(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    tracing::info!("Assistant stopped");
    Ok(())
}

/// Stream one answer into the UI channel on the tokio runtime.
///
/// A watcher publishes `Failed` if the answer task panics, so the UI always
/// sees a terminal event.
pub fn spawn_answer(
    handle: &Handle,
    client: Arc<dyn AnswerClient>,
    request: QuestionRequest,
    sender: Sender<AppEvent>,
) {
    let mut watcher_sink = sender.clone();
    let task = handle.spawn(async move {
        let mut sink = sender;
        // Failures are already published to the sink and logged.
        let _ = consume_answer(client.as_ref(), &request, &mut sink).await;
    });
    handle.spawn(async move {
        if let Err(err) = task.await {
            if err.is_panic() {
                tracing::error!(error = %err, "Answer task panicked");
                watcher_sink.publish(AnswerEvent::Failed(TASK_PANICKED.to_string()));
            }
        }
    });
}

fn copy_response(app: &mut App, clipboard: &mut Option<ClipboardHandler>, mode: CopyMode) {
    let Some(text) = app.copy_payload(mode) else {
        return;
    };
    if clipboard.is_none() {
        match ClipboardHandler::new() {
            Ok(handler) => *clipboard = Some(handler),
            Err(message) => {
                app.on_copy_result(Err(message), Instant::now());
                return;
            }
        }
    }
    let result = match clipboard.as_mut() {
        Some(handler) => handler.set_text(&text),
        None => Err("Clipboard unavailable".to_string()),
    };
    if result.is_ok() {
        tracing::info!(?mode, chars = text.chars().count(), "Answer copied");
    }
    app.on_copy_result(result, Instant::now());
}

fn print_response(app: &mut App) {
    let Some(answer) = app.printable() else {
        return;
    };
    match print_answer(answer) {
        Ok(path) => app.set_status(format!("Opened print view: {}", path.display()), false),
        Err(err) => {
            tracing::error!(error = %err, "Print failed");
            app.set_status(err.to_string(), true);
        }
    }
}
