use crate::error::{ValidationError, non_negative};
use crate::factors::ReferenceFactors;
use crate::generators::fossil::{Fossil, FossilsGenerator};
use crate::generators::types::{GenerationDay, Generation, Generator};

/// A coal generator: a fossil unit that also reports heat input and net
/// generation, from which the actual heat rate is derived.
///
/// Valued with the medium value factor like gas, but emissions use the
/// **high** emissions factor.
#[derive(Debug, Clone, PartialEq)]
pub struct CoalGenerator {
    fossil: FossilsGenerator,
    total_heat_input: f64,
    actual_net_generation: f64,
}

impl CoalGenerator {
    /// Creates a coal generator with no generation days.
    ///
    /// Fields are checked in argument order, so a blank name is reported
    /// before a negative rating.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `name` is blank or any numeric field is
    /// negative or not finite.
    pub fn new(
        name: impl Into<String>,
        emissions_rating: f64,
        total_heat_input: f64,
        actual_net_generation: f64,
    ) -> Result<Self, ValidationError> {
        let fossil = FossilsGenerator::new(name, emissions_rating)?;
        Ok(Self {
            fossil,
            total_heat_input: non_negative("total heat input", total_heat_input)?,
            actual_net_generation: non_negative("actual net generation", actual_net_generation)?,
        })
    }

    /// Consumes the generator and returns it with `days` appended.
    pub fn with_days(mut self, days: impl IntoIterator<Item = GenerationDay>) -> Self {
        for day in days {
            self.add_generation_day(day);
        }
        self
    }

    pub fn add_generation_day(&mut self, day: GenerationDay) {
        self.fossil.add_generation_day(day);
    }

    pub fn total_heat_input(&self) -> f64 {
        self.total_heat_input
    }

    pub fn actual_net_generation(&self) -> f64 {
        self.actual_net_generation
    }

    /// Actual heat rate, `total heat input / actual net generation`.
    ///
    /// Returns `None` when actual net generation is zero.
    pub fn heat_rate(&self) -> Option<f64> {
        (self.actual_net_generation > 0.0)
            .then(|| self.total_heat_input / self.actual_net_generation)
    }
}

impl Generation for CoalGenerator {
    fn generator(&self) -> &Generator {
        self.fossil.generator()
    }

    fn value_factor(&self, factors: &ReferenceFactors) -> f64 {
        self.fossil.value_factor(factors)
    }

    fn generator_type(&self) -> &'static str {
        "Coal"
    }
}

impl Fossil for CoalGenerator {
    fn emissions_rating(&self) -> f64 {
        self.fossil.emissions_rating()
    }

    fn emissions_factor(&self, factors: &ReferenceFactors) -> f64 {
        factors.emissions_factor_high
    }
}
