use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{AggregationError, ValidationError, non_blank, non_negative};
use crate::factors::ReferenceFactors;
use crate::generators::types::is_unset;
use crate::generators::{Fossil, Timestamp};
use crate::report::GenerationReport;

use super::require;

/// The highest emissions figure recorded for one calendar date and the
/// generator that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMaxEmission {
    date: Timestamp,
    generator_name: String,
    emission: f64,
}

impl DailyMaxEmission {
    /// Creates a validated entry.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `date` is unset, `generator_name` is
    /// blank, or `emission` is negative.
    pub fn new(
        date: Timestamp,
        generator_name: impl Into<String>,
        emission: f64,
    ) -> Result<Self, ValidationError> {
        if is_unset(&date) {
            return Err(ValidationError::UnsetDate);
        }
        Ok(Self {
            date,
            generator_name: non_blank("generator name", generator_name)?,
            emission: non_negative("emission", emission)?,
        })
    }

    /// Timestamp of the first sample seen for this date.
    pub fn date(&self) -> Timestamp {
        self.date
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    pub fn emission(&self) -> f64 {
        self.emission
    }
}

/// Per-date maximum emissions, one entry per distinct calendar date.
///
/// Entries are kept in the order their date was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaxEmissions {
    entries: Vec<DailyMaxEmission>,
    by_date: HashMap<NaiveDate, usize>,
}

impl MaxEmissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an emissions figure for the calendar date of `date`.
    ///
    /// A new date creates an entry. For a known date the stored value and
    /// owner are replaced only when `emission` is strictly greater, so the
    /// first generator to reach the maximum keeps it on ties. Re-adding an
    /// identical triple changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` if `generator_name` is blank, `emission`
    /// is negative, or `date` is unset. Nothing is recorded on error.
    pub fn add_daily_emission(
        &mut self,
        date: Timestamp,
        generator_name: &str,
        emission: f64,
    ) -> Result<(), ValidationError> {
        let generator_name = non_blank("generator name", generator_name)?;
        let emission = non_negative("emission", emission)?;
        if is_unset(&date) {
            return Err(ValidationError::UnsetDate);
        }
        let key = date.date_naive();

        match self.by_date.get(&key) {
            Some(&idx) => {
                let current = &mut self.entries[idx];
                if emission > current.emission {
                    current.emission = emission;
                    current.generator_name = generator_name;
                }
            }
            None => {
                self.by_date.insert(key, self.entries.len());
                self.entries.push(DailyMaxEmission {
                    date,
                    generator_name,
                    emission,
                });
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> &[DailyMaxEmission] {
        &self.entries
    }

    /// Returns the entry for a calendar date, if any generator reported on it.
    pub fn for_date(&self, date: NaiveDate) -> Option<&DailyMaxEmission> {
        self.by_date.get(&date).map(|&idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Finds the highest daily emissions per calendar date across gas and coal
/// generators.
///
/// Gas days use the medium emissions factor and coal days the high one. Gas
/// generators are visited before coal, each in report order.
///
/// # Errors
///
/// Returns `AggregationError::MissingReferenceData` if `report` or `factors`
/// is `None`.
pub fn calculate_max_emissions(
    report: Option<&GenerationReport>,
    factors: Option<&ReferenceFactors>,
) -> Result<MaxEmissions, AggregationError> {
    let report = require(report, "generation report")?;
    let factors = require(factors, "reference factors")?;
    let mut max_emissions = MaxEmissions::new();

    for gas in report.gas_generators() {
        add_generator_days(gas, factors, &mut max_emissions)?;
    }
    for coal in report.coal_generators() {
        add_generator_days(coal, factors, &mut max_emissions)?;
    }

    Ok(max_emissions)
}

fn add_generator_days(
    generator: &impl Fossil,
    factors: &ReferenceFactors,
    max_emissions: &mut MaxEmissions,
) -> Result<(), ValidationError> {
    for day in generator.days() {
        let emission = generator.daily_emissions(day, factors);
        max_emissions.add_daily_emission(day.date(), generator.name(), emission)?;
    }
    Ok(())
}
