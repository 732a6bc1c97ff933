//! Common types and traits for generator records.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::error::{ValidationError, non_blank, non_negative};
use crate::factors::ReferenceFactors;

/// Timestamp of a generation sample, with the offset it was reported in.
pub type Timestamp = DateTime<FixedOffset>;

/// One day's energy output and price for a generator.
///
/// Immutable once constructed; every field is checked in [`GenerationDay::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDay {
    date: Timestamp,
    energy: f64,
    price: f64,
}

impl GenerationDay {
    /// Creates a validated generation day.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `date` is an unset sentinel (see
    /// [`is_unset`]), or if `energy` or `price` is negative or not finite.
    pub fn new(date: Timestamp, energy: f64, price: f64) -> Result<Self, ValidationError> {
        if is_unset(&date) {
            return Err(ValidationError::UnsetDate);
        }
        Ok(Self {
            date,
            energy: non_negative("energy", energy)?,
            price: non_negative("price", price)?,
        })
    }

    /// Full timestamp as reported.
    pub fn date(&self) -> Timestamp {
        self.date
    }

    /// Calendar date in the timestamp's own offset; time of day is dropped.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Returns `true` for an unset-date sentinel: chrono's default value (the
/// Unix epoch) or the zero date `0001-01-01T00:00:00` that report producers
/// write for a missing value.
pub(crate) fn is_unset(date: &Timestamp) -> bool {
    if date.timestamp() == 0 && date.timestamp_subsec_nanos() == 0 {
        return true;
    }
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| date.naive_local() == zero)
}

/// Identity and ordered daily samples shared by every generator kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    name: String,
    days: Vec<GenerationDay>,
}

impl Generator {
    /// Creates a generator with no generation days.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::BlankName` if `name` is empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: non_blank("name", name)?,
            days: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generation days in the order they were added.
    pub fn days(&self) -> &[GenerationDay] {
        &self.days
    }

    /// Appends a day; earlier days are left untouched.
    pub fn add_generation_day(&mut self, day: GenerationDay) {
        self.days.push(day);
    }
}

/// Capability shared by all generator kinds: a named sequence of valued days.
///
/// Implementors choose the value factor tier; the total is always
/// `Σ energy × price × factor` over the generator's days.
pub trait Generation {
    /// Returns the shared identity and day sequence.
    fn generator(&self) -> &Generator;

    /// Selects the value factor that applies to this generator.
    fn value_factor(&self, factors: &ReferenceFactors) -> f64;

    /// Returns a human-readable type name for the generator.
    fn generator_type(&self) -> &'static str;

    fn name(&self) -> &str {
        self.generator().name()
    }

    fn days(&self) -> &[GenerationDay] {
        self.generator().days()
    }

    /// Total monetary value of this generator's output.
    ///
    /// Returns `0.0` for a generator without days.
    fn total_value(&self, factors: &ReferenceFactors) -> f64 {
        let factor = self.value_factor(factors);
        self.days()
            .iter()
            .fold(0.0, |acc, day| acc + day.energy() * day.price() * factor)
    }
}
