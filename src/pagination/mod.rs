//! # Pagination & Envelope
//!
//! Computes next/previous page indicators from the total match count and
//! packages a fetched page into the uniform response envelope.

mod calculator;
mod envelope;

pub use calculator::{PageIndicator, Pagination};
pub use envelope::ResultEnvelope;
