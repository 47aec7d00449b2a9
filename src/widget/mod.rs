//! Search Widget State Machine
//!
//! The whole widget is one explicit `WidgetState` value plus a pure transition
//! function `update(&mut state, event) -> Vec<Effect>`. Nothing in here performs
//! I/O or reads a clock; timers and fetches are requested as `Effect`s and their
//! outcomes come back later as `Event`s.
//!
//! ## Ordering
//! - Every fetch is tagged with a `RequestToken` (generation, query, page).
//!   A completion is applied only if its token is still the in-flight one and
//!   still matches the desired (query, page). Late answers are dropped.
//! - Every keystroke bumps an input epoch; a debounce expiry carrying an older
//!   epoch is ignored.
//!
//! ## Submodules
//! - **`types`**: State, events, effects and request tokens.
//! - **`pagination`**: Page count derivation and bounded navigation.
//! - **`update`**: The transition function.

pub mod pagination;
pub mod types;
pub mod update;

#[cfg(test)]
mod tests;
