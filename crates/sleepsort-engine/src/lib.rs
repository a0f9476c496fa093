//! Sleep sort engine - delay scheduling and benchmark timing
//!
//! This crate implements the sorter:
//! - One delay task per input element, suspended for value × unit scale
//! - A shared output sink with an explicit, locked append
//! - Cooperative (tokio run loop) and threaded (OS thread per element) backends
//! - Wall-clock measurement from first dispatch to last join

pub mod clock;
pub mod config;
pub mod sink;
pub mod sorter;
mod cooperative;
mod threaded;

pub use clock::*;
pub use config::*;
pub use sink::OutputSink;
pub use sorter::*;
