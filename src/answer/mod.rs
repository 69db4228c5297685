//! Question → answer pipeline: request model, prompt, outbound client,
//! stream consumption, and the final cleanup pass.

mod cleanup;
mod client;
mod consumer;
mod error;
mod gemini;
mod prompt;
mod request;

pub use cleanup::clean_response;
pub use client::{demo_client, AnswerClient, FragmentStream, StaticClient};
pub use consumer::{consume_answer, failure_payload, AnswerEvent, AnswerSink, StreamSummary};
pub use error::AnswerError;
pub use gemini::{
    build_request_body, fragments_from_payload, sse_fragments, GeminiClient, GeminiSettings,
    ResponseMode,
};
pub use prompt::{build_user_prompt, SYSTEM_INSTRUCTION};
pub use request::{
    validate_question, AnswerStyle, GenealogyWebsite, QuestionRequest, ValidationError,
    MIN_QUESTION_CHARS,
};
