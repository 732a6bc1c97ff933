use std::fmt;

use crate::error::AggregationError;
use crate::factors::ReferenceFactors;
use crate::report::GenerationReport;

use super::emissions::{MaxEmissions, calculate_max_emissions};
use super::heat_rate::{ActualHeatRates, calculate_heat_rates};
use super::require;
use super::valuation::{ValuationTotals, calculate_totals};

/// The three derived reports of one aggregation run.
///
/// Built once by [`run_aggregation`] and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOutput {
    totals: ValuationTotals,
    max_emissions: MaxEmissions,
    heat_rates: ActualHeatRates,
}

impl GenerationOutput {
    /// Bundles engine outputs without further computation.
    pub fn new(
        totals: ValuationTotals,
        max_emissions: MaxEmissions,
        heat_rates: ActualHeatRates,
    ) -> Self {
        Self {
            totals,
            max_emissions,
            heat_rates,
        }
    }

    pub fn totals(&self) -> &ValuationTotals {
        &self.totals
    }

    pub fn max_emissions(&self) -> &MaxEmissions {
        &self.max_emissions
    }

    pub fn heat_rates(&self) -> &ActualHeatRates {
        &self.heat_rates
    }
}

impl fmt::Display for GenerationOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "totals: wind={} gas={} coal={} | emission days={} | heat rates={}",
            self.totals.wind().len(),
            self.totals.gas().len(),
            self.totals.coal().len(),
            self.max_emissions.len(),
            self.heat_rates.len(),
        )
    }
}

/// Runs the valuation, emissions and heat-rate engines over one report.
///
/// # Errors
///
/// Returns `AggregationError::MissingReferenceData` if `report` or `factors`
/// is `None`, or the first engine failure otherwise.
pub fn run_aggregation(
    report: Option<&GenerationReport>,
    factors: Option<&ReferenceFactors>,
) -> Result<GenerationOutput, AggregationError> {
    let report = require(report, "generation report")?;

    let totals = calculate_totals(report, factors)?;
    let max_emissions = calculate_max_emissions(Some(report), factors)?;
    let heat_rates = calculate_heat_rates(Some(report))?;

    Ok(GenerationOutput::new(totals, max_emissions, heat_rates))
}
