//! Core translation logic for dichbot.
//!
//! Language detection, routing of a request to a target language, and the
//! memoizing translation service sit here. Nothing in this crate knows about
//! the messaging platform.

pub mod services;

pub use services::*;
