//! Client-side core for the Lucid Tasks desktop app: the HTTP API client,
//! the task collection controller, and the top-level phase state machine.
//!
//! Everything in `store` and `phase` is synchronous, single-owner state with
//! pure transition functions; the async surface lives entirely in `api` and
//! is driven from the app's backend worker.

pub mod api;
pub mod phase;
pub mod store;

#[cfg(test)]
mod tests;

pub use api::TaskManagerClient;
pub use phase::{AuthFieldError, Phase, PhaseMachine, SubmitTicket, AUTH_ANCHOR_ID};
pub use store::{
    FilterCriteria, FilterUpdate, LoadTicket, TaskStats, TaskStore, PAGE_SIZE,
};
