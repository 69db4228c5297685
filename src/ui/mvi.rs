//! Unidirectional state flow for the assistant screens.
//!
//! ```text
//! key / answer event ──→ Intent ──→ Reducer ──→ State ──→ draw
//! ```
//!
//! Reducers never perform I/O. Network calls, clipboard and printing are
//! started by the runtime after it inspects the new state.

/// An input to a reducer: a key-driven edit or a piece of answer progress.
pub trait Intent: Send + 'static {}

/// A complete, renderable snapshot of one screen group.
///
/// `Default` is the state shown before anything has happened.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

/// Pure transition function `(State, Intent) -> State`.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
