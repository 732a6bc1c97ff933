use tracing::debug;

use crate::error::{AggregationError, ValidationError, non_blank, non_negative};
use crate::generators::Generation;
use crate::report::GenerationReport;

use super::require;

/// Actual heat rate of one coal generator.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatRate {
    generator_name: String,
    value: f64,
}

impl HeatRate {
    /// # Errors
    ///
    /// Returns a `ValidationError` if `generator_name` is blank or `value`
    /// is negative.
    pub fn new(generator_name: impl Into<String>, value: f64) -> Result<Self, ValidationError> {
        Ok(Self {
            generator_name: non_blank("name", generator_name)?,
            value: non_negative("heat rate", value)?,
        })
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Heat rates in the order coal generators were processed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActualHeatRates {
    entries: Vec<HeatRate>,
}

impl ActualHeatRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a heat rate for `name`.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `name` is blank or `heat_rate` is
    /// negative.
    pub fn add_coal_heat_rate(
        &mut self,
        name: &str,
        heat_rate: f64,
    ) -> Result<(), ValidationError> {
        self.entries.push(HeatRate::new(name, heat_rate)?);
        Ok(())
    }

    pub fn entries(&self) -> &[HeatRate] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Computes `total heat input / actual net generation` for every coal
/// generator.
///
/// Generators with zero actual net generation are skipped: no entry and no
/// error.
///
/// # Errors
///
/// Returns `AggregationError::MissingReferenceData` if `report` is `None`.
pub fn calculate_heat_rates(
    report: Option<&GenerationReport>,
) -> Result<ActualHeatRates, AggregationError> {
    let report = require(report, "generation report")?;
    let mut heat_rates = ActualHeatRates::new();

    for coal in report.coal_generators() {
        match coal.heat_rate() {
            Some(rate) => heat_rates.add_coal_heat_rate(coal.name(), rate)?,
            None => debug!(
                generator = coal.name(),
                kind = coal.generator_type(),
                "zero net generation, heat rate skipped"
            ),
        }
    }

    Ok(heat_rates)
}
