//! Drives one answer stream from request to completion.

use futures_util::StreamExt;
use tracing::Instrument;
use uuid::Uuid;

use super::client::AnswerClient;
use super::error::AnswerError;
use super::request::QuestionRequest;

/// Progress of one answer, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    /// One more piece of text to append.
    Fragment(String),
    /// The stream is exhausted.
    Finished,
    /// The request failed; carries the display message.
    Failed(String),
}

/// Receiver of answer progress.
pub trait AnswerSink {
    /// Publish an event. Returns `false` when nobody is listening any more.
    fn publish(&mut self, event: AnswerEvent) -> bool;
}

impl AnswerSink for Vec<AnswerEvent> {
    fn publish(&mut self, event: AnswerEvent) -> bool {
        self.push(event);
        true
    }
}

/// Totals for a completed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamSummary {
    pub fragments: usize,
    pub bytes: usize,
}

/// Request an answer and forward every fragment to `sink` as it arrives.
///
/// Exactly one terminal event is published: `Finished` on success or
/// `Failed` on the first error. Nothing is retried.
pub async fn consume_answer<C, S>(
    client: &C,
    request: &QuestionRequest,
    sink: &mut S,
) -> Result<StreamSummary, AnswerError>
where
    C: AnswerClient + ?Sized,
    S: AnswerSink + ?Sized,
{
    let span = tracing::info_span!(
        "answer",
        request_id = %Uuid::new_v4(),
        client = client.name(),
        website = %request.website(),
        style = %request.style(),
    );

    async move {
        tracing::info!("Answer requested");
        match stream_into(client, request, sink).await {
            Ok(summary) => {
                tracing::info!(
                    fragments = summary.fragments,
                    bytes = summary.bytes,
                    "Answer complete"
                );
                sink.publish(AnswerEvent::Finished);
                Ok(summary)
            }
            Err(err) => {
                tracing::error!(kind = err.kind(), error = %err, "Answer failed");
                sink.publish(AnswerEvent::Failed(err.to_string()));
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

async fn stream_into<C, S>(
    client: &C,
    request: &QuestionRequest,
    sink: &mut S,
) -> Result<StreamSummary, AnswerError>
where
    C: AnswerClient + ?Sized,
    S: AnswerSink + ?Sized,
{
    let mut stream = client.stream_answer(request).await?;
    let mut summary = StreamSummary::default();

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        summary.fragments += 1;
        summary.bytes += fragment.len();
        if !sink.publish(AnswerEvent::Fragment(fragment)) {
            tracing::debug!("Answer listener gone, dropping stream");
            break;
        }
    }
    Ok(summary)
}

/// Display payload shown in place of an answer when the request fails.
///
/// The message is embedded verbatim.
pub fn failure_payload(message: &str) -> String {
    format!(
        "<p>Sorry, I couldn't get an answer. The following error occurred:</p>\
         <p><em>{message}</em></p>\
         <p>Please try again. If the problem persists, the service may be temporarily unavailable.</p>"
    )
}
