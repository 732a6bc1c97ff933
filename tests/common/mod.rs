//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{FixedOffset, TimeZone};
use generation_report::factors::ReferenceFactors;
use generation_report::generators::{
    CoalGenerator, FossilsGenerator, GenerationDay, Timestamp, WindGenerator,
};

/// Midnight UTC on the given day of January 2017.
pub fn jan(day: u32) -> Timestamp {
    FixedOffset::east_opt(0)
        .and_then(|tz| tz.with_ymd_and_hms(2017, 1, day, 0, 0, 0).single())
        .expect("valid timestamp")
}

pub fn day(date: Timestamp, energy: f64, price: f64) -> GenerationDay {
    GenerationDay::new(date, energy, price).expect("valid generation day")
}

/// Factors (low=0.5, medium=1.0, high=1.5) for both tiers sets, with
/// emissions factors (0.1, 0.2, 0.3).
pub fn factors() -> ReferenceFactors {
    ReferenceFactors::new(0.5, 1.0, 1.5, 0.1, 0.2, 0.3)
}

pub fn wind(name: &str, location: &str, days: Vec<GenerationDay>) -> WindGenerator {
    WindGenerator::new(name, location)
        .expect("valid wind generator")
        .with_days(days)
}

pub fn gas(name: &str, rating: f64, days: Vec<GenerationDay>) -> FossilsGenerator {
    FossilsGenerator::new(name, rating)
        .expect("valid gas generator")
        .with_days(days)
}

pub fn coal(
    name: &str,
    rating: f64,
    heat_input: f64,
    net_generation: f64,
    days: Vec<GenerationDay>,
) -> CoalGenerator {
    CoalGenerator::new(name, rating, heat_input, net_generation)
        .expect("valid coal generator")
        .with_days(days)
}

/// Reference data matching [`factors`].
pub const REFERENCE_DATA_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ReferenceData>
  <Factors>
    <ValueFactor>
      <High>1.5</High>
      <Medium>1.0</Medium>
      <Low>0.5</Low>
    </ValueFactor>
    <EmissionsFactor>
      <High>0.3</High>
      <Medium>0.2</Medium>
      <Low>0.1</Low>
    </EmissionsFactor>
  </Factors>
</ReferenceData>"#;

/// One generator of each kind, plus a gas generator with a bad rating.
pub const GENERATION_REPORT_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<GenerationReport>
  <Wind>
    <WindGenerator>
      <Name>Wind[Offshore]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>100</Energy><Price>10</Price></Day>
      </Generation>
      <Location>Offshore</Location>
    </WindGenerator>
    <WindGenerator>
      <Name>Wind[Onshore]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>100</Energy><Price>10</Price></Day>
      </Generation>
      <Location>Onshore</Location>
    </WindGenerator>
  </Wind>
  <Gas>
    <GasGenerator>
      <Name>Gas[1]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>200</Energy><Price>5</Price></Day>
      </Generation>
      <EmissionsRating>0.5</EmissionsRating>
    </GasGenerator>
    <GasGenerator>
      <Name>Gas[Broken]</Name>
      <EmissionsRating>-1</EmissionsRating>
    </GasGenerator>
  </Gas>
  <Coal>
    <CoalGenerator>
      <Name>Coal[1]</Name>
      <Generation>
        <Day><Date>2017-01-01T00:00:00+00:00</Date><Energy>100</Energy><Price>4</Price></Day>
        <Day><Date>2017-01-02T00:00:00+00:00</Date><Energy>50</Energy><Price>4</Price></Day>
      </Generation>
      <TotalHeatInput>300</TotalHeatInput>
      <ActualNetGeneration>150</ActualNetGeneration>
      <EmissionsRating>0.5</EmissionsRating>
    </CoalGenerator>
  </Coal>
</GenerationReport>"#;

/// Writes `contents` to `dir/name`, creating `dir` if needed.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("create fixture folder");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}
