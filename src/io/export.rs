//! XML export for aggregation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::SecondsFormat;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

use crate::calc::{GenerationOutput, NamedTotals};

/// Output could not be written.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

/// Exports aggregation results to an XML file at the given path.
///
/// # Errors
///
/// Returns an `ExportError` if file creation or writing fails.
pub fn export_output(output: &GenerationOutput, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut buf = io::BufWriter::new(file);
    write_output_xml(output, &mut buf)?;
    buf.flush()?;
    Ok(())
}

/// Renders aggregation results as an XML string.
///
/// # Errors
///
/// Returns an `ExportError` if rendering fails.
pub fn render_output_xml(output: &GenerationOutput) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_output_xml(output, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes aggregation results as an indented `GenerationOutput` document.
///
/// Sections appear in a fixed order (totals, daily maximum emissions, heat
/// rates) with entries in their stored order, so identical results always
/// produce identical bytes. Empty sections are written as empty elements.
///
/// # Errors
///
/// Returns an `ExportError` if writing fails.
pub fn write_output_xml(output: &GenerationOutput, writer: impl Write) -> Result<(), ExportError> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    start(&mut xml, "GenerationOutput")?;

    start(&mut xml, "Totals")?;
    totals_section(&mut xml, "Wind", output.totals().wind())?;
    totals_section(&mut xml, "Gas", output.totals().gas())?;
    totals_section(&mut xml, "Coal", output.totals().coal())?;
    end(&mut xml, "Totals")?;

    let days = output.max_emissions().entries();
    if days.is_empty() {
        empty(&mut xml, "MaxEmissionGenerators")?;
    } else {
        start(&mut xml, "MaxEmissionGenerators")?;
        for day in days {
            start(&mut xml, "Day")?;
            leaf(&mut xml, "Name", day.generator_name())?;
            leaf(
                &mut xml,
                "Date",
                &day.date().to_rfc3339_opts(SecondsFormat::AutoSi, false),
            )?;
            leaf(&mut xml, "Emission", &day.emission().to_string())?;
            end(&mut xml, "Day")?;
        }
        end(&mut xml, "MaxEmissionGenerators")?;
    }

    let rates = output.heat_rates().entries();
    if rates.is_empty() {
        empty(&mut xml, "ActualHeatRates")?;
    } else {
        start(&mut xml, "ActualHeatRates")?;
        for rate in rates {
            start(&mut xml, "CoalGenerator")?;
            leaf(&mut xml, "Name", rate.generator_name())?;
            leaf(&mut xml, "HeatRate", &rate.value().to_string())?;
            end(&mut xml, "CoalGenerator")?;
        }
        end(&mut xml, "ActualHeatRates")?;
    }

    end(&mut xml, "GenerationOutput")?;
    xml.into_inner().flush()?;
    Ok(())
}

fn totals_section<W: Write>(
    xml: &mut Writer<W>,
    section: &str,
    totals: &NamedTotals,
) -> Result<(), ExportError> {
    if totals.is_empty() {
        return empty(xml, section);
    }
    start(xml, section)?;
    for (name, total) in totals.iter() {
        start(xml, "Generator")?;
        leaf(xml, "Name", name)?;
        leaf(xml, "Total", &total.to_string())?;
        end(xml, "Generator")?;
    }
    end(xml, section)
}

fn start<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<(), ExportError> {
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn end<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<(), ExportError> {
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<(), ExportError> {
    xml.write_event(Event::Empty(BytesStart::new(name)))?;
    Ok(())
}

fn leaf<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<(), ExportError> {
    start(xml, name)?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    end(xml, name)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;
    use crate::calc::run_aggregation;
    use crate::factors::ReferenceFactors;
    use crate::generators::{
        CoalGenerator, FossilsGenerator, GenerationDay, Timestamp, WindGenerator,
    };
    use crate::io::xml::parse_document;
    use crate::report::GenerationReport;

    fn ts(d: u32) -> Timestamp {
        FixedOffset::east_opt(0)
            .and_then(|tz| tz.with_ymd_and_hms(2017, 1, d, 0, 0, 0).single())
            .expect("valid timestamp")
    }

    fn day(d: u32, energy: f64, price: f64) -> GenerationDay {
        GenerationDay::new(ts(d), energy, price).expect("valid day")
    }

    fn factors() -> ReferenceFactors {
        ReferenceFactors::new(0.5, 1.0, 1.5, 1.0, 2.0, 3.0)
    }

    fn sample_output() -> GenerationOutput {
        let mut report = GenerationReport::new();
        report.add_wind_generator(
            WindGenerator::new("Wind A & B", "Offshore")
                .expect("valid wind")
                .with_days([day(1, 100.0, 10.0)]),
        );
        report.add_gas_generator(
            FossilsGenerator::new("Gas 1", 0.5)
                .expect("valid gas")
                .with_days([day(1, 200.0, 5.0)]),
        );
        report.add_coal_generator(
            CoalGenerator::new("Coal 1", 1.0, 30.0, 10.0)
                .expect("valid coal")
                .with_days([day(1, 100.0, 2.0), day(2, 50.0, 2.0)]),
        );
        run_aggregation(Some(&report), Some(&factors())).expect("aggregation succeeds")
    }

    #[test]
    fn document_structure_round_trips() {
        let xml = render_output_xml(&sample_output()).expect("render");
        let doc = parse_document(&xml).expect("output parses");
        let root = doc.root();
        assert_eq!(root.name(), "GenerationOutput");
        let names: Vec<&str> = root.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["Totals", "MaxEmissionGenerators", "ActualHeatRates"]);

        let wind = root
            .child("Totals")
            .and_then(|t| t.child("Wind"))
            .and_then(|w| w.child("Generator"))
            .expect("wind total present");
        assert_eq!(wind.child("Name").map(|n| n.text()), Some("Wind A & B"));
        assert_eq!(wind.child("Total").map(|n| n.text()), Some("500"));

        let days = doc.descendants("Day");
        assert_eq!(days.len(), 2);
        // Coal emits 300 on day 1, beating gas at 200.
        assert_eq!(days[0].child("Name").map(|n| n.text()), Some("Coal 1"));
        assert_eq!(
            days[0].child("Date").map(|n| n.text()),
            Some("2017-01-01T00:00:00+00:00")
        );
        assert_eq!(days[0].child("Emission").map(|n| n.text()), Some("300"));

        let rate = doc.descendants("HeatRate");
        assert_eq!(rate.first().map(|r| r.text()), Some("3"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let xml = render_output_xml(&sample_output()).expect("render");
        assert!(xml.contains("Wind A &amp; B"));
    }

    #[test]
    fn empty_output_writes_empty_sections() {
        let xml = render_output_xml(&GenerationOutput::default()).expect("render");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<Wind/>"));
        assert!(xml.contains("<MaxEmissionGenerators/>"));
        assert!(xml.contains("<ActualHeatRates/>"));
    }

    #[test]
    fn deterministic_output() {
        let output = sample_output();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_output_xml(&output, &mut buf1).expect("write");
        write_output_xml(&output, &mut buf2).expect("write");
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.xml");
        export_output(&sample_output(), &path).expect("export");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(written, render_output_xml(&sample_output()).expect("render"));
    }
}
