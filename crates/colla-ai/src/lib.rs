//! # colla-ai
//!
//! Checks that the bot's AI credentials work before users find out they
//! don't. A probe sends one tiny chat completion and classifies the answer.

mod error;
mod probe;

pub use error::AiError;
pub use probe::{AiProbe, AiProbeReport, ProbeOutcome, classify, mask_key};
