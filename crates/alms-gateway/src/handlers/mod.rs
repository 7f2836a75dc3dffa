//! HTTP request handlers.
//!
//! Each handler is single-pass: validate, call the collaborator, map the
//! result onto a response. No retries, no state between invocations.

pub mod donation;
pub mod health;
pub mod token;
