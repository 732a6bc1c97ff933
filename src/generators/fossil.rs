use crate::error::{ValidationError, non_negative};
use crate::factors::ReferenceFactors;
use crate::generators::types::{GenerationDay, Generation, Generator};

/// Capability of fossil-fuelled generators: an emissions rating per unit of
/// energy and the emissions factor tier that applies to the fuel.
pub trait Fossil: Generation {
    fn emissions_rating(&self) -> f64;

    /// Selects the emissions factor for this fuel.
    fn emissions_factor(&self, factors: &ReferenceFactors) -> f64;

    /// Emissions produced on `day`: `energy × emissions rating × emissions factor`.
    fn daily_emissions(&self, day: &GenerationDay, factors: &ReferenceFactors) -> f64 {
        day.energy() * self.emissions_rating() * self.emissions_factor(factors)
    }
}

/// A gas generator. Also the fossil core embedded in [`super::CoalGenerator`].
///
/// Valued with the medium value factor; emissions use the medium emissions
/// factor.
#[derive(Debug, Clone, PartialEq)]
pub struct FossilsGenerator {
    generator: Generator,
    emissions_rating: f64,
}

impl FossilsGenerator {
    /// Creates a gas generator with no generation days.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `name` is blank or `emissions_rating`
    /// is negative.
    pub fn new(name: impl Into<String>, emissions_rating: f64) -> Result<Self, ValidationError> {
        let generator = Generator::new(name)?;
        Ok(Self {
            generator,
            emissions_rating: non_negative("emissions rating", emissions_rating)?,
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
}

impl Generation for FossilsGenerator {
    fn generator(&self) -> &Generator {
        &self.generator
    }

    fn value_factor(&self, factors: &ReferenceFactors) -> f64 {
        factors.value_factor_medium
    }

    fn generator_type(&self) -> &'static str {
        "Gas"
    }
}

impl Fossil for FossilsGenerator {
    fn emissions_rating(&self) -> f64 {
        self.emissions_rating
    }

    fn emissions_factor(&self, factors: &ReferenceFactors) -> f64 {
        factors.emissions_factor_medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn day(d: u32, energy: f64, price: f64) -> GenerationDay {
        let date = FixedOffset::east_opt(0)
            .and_then(|tz| tz.with_ymd_and_hms(2017, 1, d, 0, 0, 0).single())
            .expect("valid timestamp");
        GenerationDay::new(date, energy, price).expect("valid day")
    }

    #[test]
    fn constructor_sets_properties() {
        let gas = FossilsGenerator::new("Gas[1]", 0.5).expect("valid");
        assert_eq!(gas.name(), "Gas[1]");
        assert_eq!(gas.emissions_rating(), 0.5);
        assert_eq!(gas.generator_type(), "Gas");
    }

    #[test]
    fn negative_emissions_rating_is_rejected() {
        let err = FossilsGenerator::new("Gas[1]", -0.5).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Negative { field: "emissions rating", .. }
        ));
    }

    #[test]
    fn total_uses_medium_value_factor() {
        let factors = ReferenceFactors::new(0.5, 1.0, 1.5, 0.1, 0.2, 0.3);
        let gas = FossilsGenerator::new("Gas[1]", 0.5)
            .expect("valid")
            .with_days([day(1, 100.0, 50.0), day(2, 200.0, 60.0)]);
        assert!((gas.total_value(&factors) - 17000.0).abs() < 1e-6);
    }

    #[test]
    fn daily_emissions_use_medium_emissions_factor() {
        let factors = ReferenceFactors::new(0.5, 1.0, 1.5, 0.1, 0.2, 0.3);
        let gas = FossilsGenerator::new("Gas[1]", 0.5).expect("valid");
        let e = gas.daily_emissions(&day(1, 200.0, 1.0), &factors);
        assert!((e - 20.0).abs() < 1e-9);
    }
}
