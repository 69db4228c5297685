//! Assistant view feature module.
//!
//! Drives the Welcome → Form → Loading → Response flow.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `form.rs` - Question draft and field focus
//! - `state.rs` - View state enum
//! - `intent.rs` - User actions and answer stream events
//! - `reducer.rs` - State transitions (pure, no side effects)

mod form;
mod intent;
mod reducer;
mod state;

pub use form::{FormDefaults, FormField, FormState};
pub use intent::AssistantIntent;
pub use reducer::AssistantReducer;
pub use state::AssistantState;
