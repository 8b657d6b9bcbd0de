//! Core page logic: scroll observation, section tracking, blends, the About
//! sub-pager, entrance sequences and the static content model.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Time is
//! always passed in as an `Instant`, so every state machine here can be
//! driven deterministically from tests.

pub mod blend;
pub mod color;
pub mod content;
pub mod ease;
pub mod members;
pub mod observer;
pub mod pager;
pub mod section;
pub mod sequence;
pub mod tracker;
pub mod works;
