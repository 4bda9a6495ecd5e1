//! NDBC (National Data Buoy Center) report retrieval.
//!
//! Reports are plain text files served per station under
//! `/data/realtime2/{STATION}.txt`. NDBC republishes them roughly hourly,
//! about 25 minutes after the hour. Unknown stations answer 404.

mod client;
mod error;
mod mock;
mod source;

pub use client::{DEFAULT_BASE_URL, NdbcClient, NdbcConfig};
pub use error::FetchError;
pub use mock::{MockResponse, MockSource};
pub use source::ReportSource;
