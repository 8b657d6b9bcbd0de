//! Application orchestration: state, the page orchestrator, background
//! sequence timers and input handling.

pub mod clipboard;
pub mod event;
pub mod handler;
pub mod page;
pub mod sequence_runtime;
pub mod state;
pub mod store;
