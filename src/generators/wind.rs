use crate::error::{ValidationError, non_blank};
use crate::factors::ReferenceFactors;
use crate::generators::types::{GenerationDay, Generation, Generator};

/// Location string that selects the low value factor.
pub const OFFSHORE: &str = "Offshore";

/// A wind generator valued by where it is sited.
///
/// # Valuation
/// A generator located exactly at `"Offshore"` is valued with the **low**
/// value factor; every other location is valued with the **high** factor.
#[derive(Debug, Clone, PartialEq)]
pub struct WindGenerator {
    generator: Generator,
    location: String,
}

impl WindGenerator {
    /// Creates a wind generator with no generation days.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::BlankName` if `name` or `location` is blank.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let generator = Generator::new(name)?;
        Ok(Self {
            generator,
            location: non_blank("location", location)?,
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
        self.generator.add_generation_day(day);
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Returns `true` when the location is exactly `"Offshore"` (case-sensitive).
    pub fn is_offshore(&self) -> bool {
        self.location == OFFSHORE
    }
}

impl Generation for WindGenerator {
    fn generator(&self) -> &Generator {
        &self.generator
    }

    fn value_factor(&self, factors: &ReferenceFactors) -> f64 {
        if self.is_offshore() {
            factors.value_factor_low
        } else {
            factors.value_factor_high
        }
    }

    fn generator_type(&self) -> &'static str {
        "Wind"
    }
}
