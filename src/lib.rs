//! Energy generation report processing.
//!
//! Reads generation reports describing wind, gas and coal generators,
//! values each generator's output, finds the highest-emitting fossil
//! generator per day and computes coal heat rates.

/// Aggregation engines and the output assembler.
pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod factors;
/// Generator domain model.
pub mod generators;
/// XML loaders and the output exporter.
pub mod io;
pub mod report;
pub mod runner;
pub mod telemetry;
pub mod watch;

pub use calc::{GenerationOutput, run_aggregation};
pub use error::{AggregationError, ValidationError};
pub use factors::ReferenceFactors;
pub use report::GenerationReport;
