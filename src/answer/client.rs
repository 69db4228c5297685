//! The outbound answer call, behind a trait so the runtime can be handed a fake.

use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures_core::Stream;
use futures_util::future::BoxFuture;
use futures_util::stream::{self, StreamExt};

use super::error::AnswerError;
use super::request::QuestionRequest;

/// Lazy, finite, non-restartable sequence of answer text fragments.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, AnswerError>> + Send>>;

/// Something that can answer a question as a stream of fragments.
///
/// Single-shot backends return a one-fragment stream.
pub trait AnswerClient: Send + Sync {
    /// Open the stream. Connection and HTTP-status failures surface here;
    /// failures mid-stream surface as `Err` items.
    fn stream_answer<'a>(
        &'a self,
        request: &'a QuestionRequest,
    ) -> BoxFuture<'a, Result<FragmentStream, AnswerError>>;

    /// Short name for logs and the header bar.
    fn name(&self) -> &str;
}

/// What a [`StaticClient`] does when asked.
#[derive(Debug, Clone)]
enum StaticOutcome {
    Fragments(Vec<String>),
    FailToConnect(String),
    FailMidStream {
        fragments: Vec<String>,
        message: String,
    },
}

/// Canned client for `--demo` mode and tests.
#[derive(Debug)]
pub struct StaticClient {
    outcome: StaticOutcome,
    fragment_delay: Duration,
    requests: AtomicUsize,
}

impl StaticClient {
    pub fn with_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_outcome(StaticOutcome::Fragments(
            fragments.into_iter().map(Into::into).collect(),
        ))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_outcome(StaticOutcome::FailToConnect(message.into()))
    }

    pub fn failing_after<I, S>(fragments: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_outcome(StaticOutcome::FailMidStream {
            fragments: fragments.into_iter().map(Into::into).collect(),
            message: message.into(),
        })
    }

    /// Delay each fragment, to make streaming visible in demo mode.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.fragment_delay = delay;
        self
    }

    /// Number of `stream_answer` calls so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn from_outcome(outcome: StaticOutcome) -> Self {
        Self {
            outcome,
            fragment_delay: Duration::ZERO,
            requests: AtomicUsize::new(0),
        }
    }
}

impl AnswerClient for StaticClient {
    fn stream_answer<'a>(
        &'a self,
        _request: &'a QuestionRequest,
    ) -> BoxFuture<'a, Result<FragmentStream, AnswerError>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let delay = self.fragment_delay;
        Box::pin(async move {
            let (fragments, failure) = match &self.outcome {
                StaticOutcome::Fragments(fragments) => (fragments.clone(), None),
                StaticOutcome::FailToConnect(message) => {
                    return Err(AnswerError::Api {
                        message: message.clone(),
                    })
                }
                StaticOutcome::FailMidStream { fragments, message } => {
                    (fragments.clone(), Some(message.clone()))
                }
            };

            let items = fragments
                .into_iter()
                .map(Ok)
                .chain(failure.map(|message| Err(AnswerError::Api { message })));
            let stream = stream::iter(items).then(move |item| async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                item
            });
            Ok(Box::pin(stream) as FragmentStream)
        })
    }

    fn name(&self) -> &str {
        "demo"
    }
}

/// The answer used by `--demo`.
pub fn demo_client() -> StaticClient {
    const DEMO_ANSWER: &str = "Here is how to search for birth records:\n\n\
1. **Open the search page.** Choose *Search* and then *Records* from the top menu.\n\
2. **Enter what you know.** Add the ancestor's name, an approximate birth year, and a place.\n\
3. **Narrow the collections.** Filter to *Birth, Marriage & Death* records for the right country.\n\
4. **Review each match.** Compare parents' names and places before attaching a record.\n\n\
Good luck with your research!";

    let fragments: Vec<String> = DEMO_ANSWER
        .split_inclusive(' ')
        .map(str::to_string)
        .collect();
    StaticClient::with_fragments(fragments).with_delay(Duration::from_millis(30))
}
