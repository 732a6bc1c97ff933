use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::ParseError;
use super::xml::{Element, parse_document};
use crate::generators::{CoalGenerator, FossilsGenerator, GenerationDay, Timestamp, WindGenerator};
use crate::report::GenerationReport;

/// Generator element kinds recognised in a generation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    Wind,
    Gas,
    Coal,
}

impl GeneratorKind {
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Wind => "WindGenerator",
            Self::Gas => "GasGenerator",
            Self::Coal => "CoalGenerator",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Wind => "wind",
            Self::Gas => "gas",
            Self::Coal => "coal",
        };
        f.write_str(label)
    }
}

/// A generator element that was skipped while loading.
#[derive(Debug)]
pub struct LoadDiagnostic {
    pub kind: GeneratorKind,
    /// Zero-based position among elements of the same kind.
    pub index: usize,
    /// The `Name` text, when one was present.
    pub name: Option<String>,
    pub error: ParseError,
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error loading {} generator #{}", self.kind, self.index)?;
        if let Some(name) = &self.name {
            write!(f, " ({name})")?;
        }
        write!(f, ": {}", self.error)
    }
}

/// A report together with the generators that could not be loaded.
#[derive(Debug, Default)]
pub struct LoadedReport {
    pub report: GenerationReport,
    pub diagnostics: Vec<LoadDiagnostic>,
}

/// Loads a generation report from an XML file.
///
/// # Errors
///
/// Returns a `ParseError` if the file cannot be read or is not well-formed
/// XML. Problems with individual generators are reported as diagnostics.
pub fn load_generation_report(path: &Path) -> Result<LoadedReport, ParseError> {
    let xml = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_generation_report(&xml)
}

/// Parses a generation report from XML.
///
/// Generator elements are found anywhere in the document. A generator with a
/// missing or empty field, a bad number or date, or a value that fails
/// validation is skipped and recorded in `diagnostics`; the rest still load.
///
/// # Errors
///
/// Returns `ParseError::Xml` if the document itself is malformed.
pub fn parse_generation_report(xml: &str) -> Result<LoadedReport, ParseError> {
    let doc = parse_document(xml)?;
    let mut loaded = LoadedReport::default();

    for (index, el) in doc.descendants(GeneratorKind::Wind.element_name()).into_iter().enumerate() {
        match wind_generator(el) {
            Ok(g) => loaded.report.add_wind_generator(g),
            Err(error) => loaded.skip(GeneratorKind::Wind, index, el, error),
        }
    }
    for (index, el) in doc.descendants(GeneratorKind::Gas.element_name()).into_iter().enumerate() {
        match gas_generator(el) {
            Ok(g) => loaded.report.add_gas_generator(g),
            Err(error) => loaded.skip(GeneratorKind::Gas, index, el, error),
        }
    }
    for (index, el) in doc.descendants(GeneratorKind::Coal.element_name()).into_iter().enumerate() {
        match coal_generator(el) {
            Ok(g) => loaded.report.add_coal_generator(g),
            Err(error) => loaded.skip(GeneratorKind::Coal, index, el, error),
        }
    }

    Ok(loaded)
}

impl LoadedReport {
    fn skip(&mut self, kind: GeneratorKind, index: usize, el: &Element, error: ParseError) {
        let name = el
            .child("Name")
            .map(Element::raw_text)
            .filter(|n| !n.trim().is_empty())
            .map(str::to_owned);
        self.diagnostics.push(LoadDiagnostic {
            kind,
            index,
            name,
            error,
        });
    }
}

fn wind_generator(el: &Element) -> Result<WindGenerator, ParseError> {
    let name = required_text(el, "Name")?;
    let location = required_text(el, "Location")?;
    let days = generation_days(el)?;
    Ok(WindGenerator::new(name, location)?.with_days(days))
}

fn gas_generator(el: &Element) -> Result<FossilsGenerator, ParseError> {
    let name = required_text(el, "Name")?;
    let rating = required_number(el, "EmissionsRating")?;
    let days = generation_days(el)?;
    Ok(FossilsGenerator::new(name, rating)?.with_days(days))
}

fn coal_generator(el: &Element) -> Result<CoalGenerator, ParseError> {
    let name = required_text(el, "Name")?;
    let heat_input = required_number(el, "TotalHeatInput")?;
    let net_generation = required_number(el, "ActualNetGeneration")?;
    let rating = required_number(el, "EmissionsRating")?;
    let days = generation_days(el)?;
    Ok(CoalGenerator::new(name, rating, heat_input, net_generation)?.with_days(days))
}

fn generation_days(el: &Element) -> Result<Vec<GenerationDay>, ParseError> {
    el.descendants("Day")
        .into_iter()
        .map(|day| -> Result<GenerationDay, ParseError> {
            let date = required_date(day, "Date")?;
            let energy = required_number(day, "Energy")?;
            let price = required_number(day, "Price")?;
            Ok(GenerationDay::new(date, energy, price)?)
        })
        .collect()
}

/// Text of the child element `name`, kept exactly as written. Blank text
/// counts as missing.
fn required_text<'a>(el: &'a Element, name: &str) -> Result<&'a str, ParseError> {
    el.child(name)
        .map(Element::raw_text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ParseError::MissingElement(name.to_owned()))
}

fn required_number(el: &Element, name: &str) -> Result<f64, ParseError> {
    required_text(el, name)?
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber(name.to_owned()))
}

fn required_date(el: &Element, name: &str) -> Result<Timestamp, ParseError> {
    let text = required_text(el, name)?.trim();
    parse_timestamp(text).ok_or_else(|| ParseError::InvalidDate(name.to_owned()))
}

/// Parses an RFC 3339 timestamp. Values without an offset, including bare
/// dates, are taken as UTC.
pub fn parse_timestamp(text: &str) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
