//! Certificate probing and classification

pub mod classify;
pub mod probe;

pub use classify::{classify, days_left};
pub use probe::{Probe, TlsProber};
