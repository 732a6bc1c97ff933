//! The generation report: every generator record of one input batch.

use crate::generators::{CoalGenerator, FossilsGenerator, WindGenerator};

/// Aggregate root for one input batch.
///
/// Collections are append-only. Generators are moved in by value, so their
/// day lists cannot change once they belong to a report. Duplicate names are
/// allowed within and across collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    wind: Vec<WindGenerator>,
    gas: Vec<FossilsGenerator>,
    coal: Vec<CoalGenerator>,
}

impl GenerationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_wind_generator(&mut self, generator: WindGenerator) {
        self.wind.push(generator);
    }

    pub fn add_gas_generator(&mut self, generator: FossilsGenerator) {
        self.gas.push(generator);
    }

    pub fn add_coal_generator(&mut self, generator: CoalGenerator) {
        self.coal.push(generator);
    }

    pub fn wind_generators(&self) -> &[WindGenerator] {
        &self.wind
    }

    pub fn gas_generators(&self) -> &[FossilsGenerator] {
        &self.gas
    }

    pub fn coal_generators(&self) -> &[CoalGenerator] {
        &self.coal
    }

    /// Total number of generators across all collections.
    pub fn generator_count(&self) -> usize {
        self.wind.len() + self.gas.len() + self.coal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generator_count() == 0
    }
}
