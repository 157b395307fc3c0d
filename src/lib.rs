//! Simulated elevator for the real-time programming lab.
//!
//! One simulated elevator per process, reachable over the 4-byte client
//! protocol used by the lab hardware and over a small HTTP API for the
//! browser frontend.

pub mod config;
pub mod elevator;
pub mod protocol;
pub mod server;
pub mod shared;
pub mod web;

mod config_tests;
