//! Aggregation engines and the assembler that bundles their results.
//!
//! Each engine reads the same report and factors and writes only to the
//! output value it returns, so a failed run leaves nothing half-applied.

/// Combined output of one aggregation run.
pub mod assembler;
/// Maximum daily emissions across fossil generators.
pub mod emissions;
/// Actual heat rate per coal generator.
pub mod heat_rate;
/// Total monetary value per generator.
pub mod valuation;

pub use assembler::{GenerationOutput, run_aggregation};
pub use emissions::{DailyMaxEmission, MaxEmissions, calculate_max_emissions};
pub use heat_rate::{ActualHeatRates, HeatRate, calculate_heat_rates};
pub use valuation::{NamedTotals, ValuationTotals, calculate_totals};

use crate::error::AggregationError;

/// Unwraps an input that an engine cannot run without.
fn require<'a, T>(value: Option<&'a T>, what: &'static str) -> Result<&'a T, AggregationError> {
    value.ok_or(AggregationError::MissingReferenceData(what))
}
