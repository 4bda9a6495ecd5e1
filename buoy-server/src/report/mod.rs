//! NDBC realtime2 report parsing.
//!
//! Pure text-to-observation conversion; no I/O and no state.

mod parse;

pub use parse::{MISSING_VALUE, NotAvailable, parse};
