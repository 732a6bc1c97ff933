use std::collections::HashMap;

use crate::error::AggregationError;
use crate::factors::ReferenceFactors;
use crate::generators::Generation;
use crate::report::GenerationReport;

use super::require;

/// Generator name to total value, in first-insertion order.
///
/// Inserting a name that is already present overwrites its value in place,
/// so the last generator processed under a name wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedTotals {
    entries: Vec<(String, f64)>,
    by_name: HashMap<String, usize>,
}

impl NamedTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the total for `name`.
    pub fn insert(&mut self, name: &str, total: f64) {
        match self.by_name.get(name) {
            Some(&idx) => self.entries[idx].1 = total,
            None => {
                self.by_name.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), total));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.by_name.get(name).map(|&idx| self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, total)| (n.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Total value per generator, kept per generator kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationTotals {
    wind: NamedTotals,
    gas: NamedTotals,
    coal: NamedTotals,
}

impl ValuationTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wind_total(&mut self, name: &str, total: f64) {
        self.wind.insert(name, total);
    }

    pub fn add_gas_total(&mut self, name: &str, total: f64) {
        self.gas.insert(name, total);
    }

    pub fn add_coal_total(&mut self, name: &str, total: f64) {
        self.coal.insert(name, total);
    }

    pub fn wind(&self) -> &NamedTotals {
        &self.wind
    }

    pub fn gas(&self) -> &NamedTotals {
        &self.gas
    }

    pub fn coal(&self) -> &NamedTotals {
        &self.coal
    }

    /// Number of distinct names across the three sections.
    pub fn len(&self) -> usize {
        self.wind.len() + self.gas.len() + self.coal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Computes the total value of every generator in the report.
///
/// Wind uses the low factor offshore and the high factor elsewhere; gas and
/// coal always use the medium factor.
///
/// # Errors
///
/// Returns `AggregationError::MissingReferenceData` if `factors` is `None`.
pub fn calculate_totals(
    report: &GenerationReport,
    factors: Option<&ReferenceFactors>,
) -> Result<ValuationTotals, AggregationError> {
    let factors = require(factors, "reference factors")?;
    let mut totals = ValuationTotals::new();

    for wind in report.wind_generators() {
        totals.add_wind_total(wind.name(), wind.total_value(factors));
    }
    for gas in report.gas_generators() {
        totals.add_gas_total(gas.name(), gas.total_value(factors));
    }
    for coal in report.coal_generators() {
        totals.add_coal_total(coal.name(), coal.total_value(factors));
    }

    Ok(totals)
}
