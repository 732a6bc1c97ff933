use std::fs;
use std::path::Path;

use super::ParseError;
use super::xml::{Element, parse_document};
use crate::factors::ReferenceFactors;

/// Loads reference factors from an XML file.
///
/// # Errors
///
/// Returns a `ParseError` if the file cannot be read or parsed.
pub fn load_reference_factors(path: &Path) -> Result<ReferenceFactors, ParseError> {
    let xml = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_reference_factors(&xml)
}

/// Parses reference factors from XML.
///
/// The first `Factors` element anywhere in the document (the root included)
/// must contain `ValueFactor` and `EmissionsFactor` groups, each with `Low`,
/// `Medium` and `High` decimal values.
///
/// # Errors
///
/// Returns `ParseError::MissingFactors` without a `Factors` element,
/// `ParseError::MissingElement` for a missing value, and
/// `ParseError::InvalidNumber` for an empty or non-numeric one.
pub fn parse_reference_factors(xml: &str) -> Result<ReferenceFactors, ParseError> {
    let doc = parse_document(xml)?;
    let factors = doc
        .descendants("Factors")
        .into_iter()
        .next()
        .ok_or(ParseError::MissingFactors)?;

    Ok(ReferenceFactors::new(
        factor(factors, "ValueFactor", "Low")?,
        factor(factors, "ValueFactor", "Medium")?,
        factor(factors, "ValueFactor", "High")?,
        factor(factors, "EmissionsFactor", "Low")?,
        factor(factors, "EmissionsFactor", "Medium")?,
        factor(factors, "EmissionsFactor", "High")?,
    ))
}

fn factor(factors: &Element, group: &str, tier: &str) -> Result<f64, ParseError> {
    let path = format!("{group}/{tier}");
    let element = factors
        .child(group)
        .and_then(|g| g.child(tier))
        .ok_or_else(|| ParseError::MissingElement(path.clone()))?;
    element
        .text()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(path))
}
