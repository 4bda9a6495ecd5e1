//! NOAA NDBC buoy observation server.
//!
//! Polls NDBC realtime2 reports for a set of stations, keeps the best-known
//! value of every measurement per station, and serves the result over HTTP.

pub mod config;
pub mod domain;
pub mod ndbc;
pub mod poller;
pub mod report;
pub mod sensors;
pub mod web;
