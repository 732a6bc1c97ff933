//! Integration tests for loading, processing and exporting report files.

mod common;

use std::fs;

use generation_report::calc::run_aggregation;
use generation_report::config::AppConfig;
use generation_report::io::generation::{GeneratorKind, load_generation_report};
use generation_report::io::reference::load_reference_factors;
use generation_report::io::xml::parse_document;
use generation_report::runner::{Processor, list_report_files};

use common::{GENERATION_REPORT_XML, REFERENCE_DATA_XML, factors, write_fixture};

fn config(root: &std::path::Path) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.paths.input_folder = root.join("input");
    cfg.paths.output_folder = root.join("output");
    cfg.paths.reference_data = root.join("ReferenceData.xml");
    cfg.watch.settle_delay_ms = 0;
    cfg
}

#[test]
fn reference_file_loads_expected_factors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(dir.path(), "ReferenceData.xml", REFERENCE_DATA_XML);
    let loaded = load_reference_factors(&path).expect("reference data loads");
    assert_eq!(loaded, factors());
}

#[test]
fn report_file_loads_with_diagnostics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(dir.path(), "report.xml", GENERATION_REPORT_XML);
    let loaded = load_generation_report(&path).expect("report loads");

    assert_eq!(loaded.report.wind_generators().len(), 2);
    assert_eq!(loaded.report.gas_generators().len(), 1);
    assert_eq!(loaded.report.coal_generators().len(), 1);

    assert_eq!(loaded.diagnostics.len(), 1);
    let diag = &loaded.diagnostics[0];
    assert_eq!(diag.kind, GeneratorKind::Gas);
    assert_eq!(diag.index, 1);
    assert_eq!(diag.name.as_deref(), Some("Gas[Broken]"));
}

#[test]
fn processed_report_produces_expected_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = config(dir.path());
    write_fixture(dir.path(), "ReferenceData.xml", REFERENCE_DATA_XML);
    write_fixture(&cfg.paths.input_folder, "report.xml", GENERATION_REPORT_XML);

    let processor = Processor::new(cfg);
    assert_eq!(processor.factors(), Some(&factors()));
    let outputs = processor.process_existing().expect("input folder readable");
    assert_eq!(outputs.len(), 1);

    let name = outputs[0]
        .file_name()
        .and_then(|n| n.to_str())
        .expect("utf-8 file name");
    assert!(name.starts_with("GenerationOutput_") && name.ends_with(".xml"));

    let xml = fs::read_to_string(&outputs[0]).expect("output readable");
    let doc = parse_document(&xml).expect("output parses");

    let totals: Vec<(&str, &str)> = doc
        .descendants("Generator")
        .into_iter()
        .map(|g| {
            (
                g.child("Name").map(|n| n.text()).unwrap_or_default(),
                g.child("Total").map(|n| n.text()).unwrap_or_default(),
            )
        })
        .collect();
    assert_eq!(
        totals,
        [
            ("Wind[Offshore]", "500"),
            ("Wind[Onshore]", "1500"),
            ("Gas[1]", "1000"),
            ("Coal[1]", "600"),
        ]
    );

    let days = doc.descendants("Day");
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].child("Name").map(|n| n.text()), Some("Gas[1]"));
    assert_eq!(
        days[1].child("Date").map(|n| n.text()),
        Some("2017-01-02T00:00:00+00:00")
    );
    assert_eq!(days[1].child("Name").map(|n| n.text()), Some("Coal[1]"));

    let rates = doc.descendants("HeatRate");
    assert_eq!(rates.first().map(|r| r.text()), Some("2"));
}

#[test]
fn output_matches_direct_aggregation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cfg = config(dir.path());
    let report_path = write_fixture(&cfg.paths.input_folder, "report.xml", GENERATION_REPORT_XML);

    let processor = Processor::with_factors(cfg, Some(factors()));
    let written = processor.process_file(&report_path).expect("processing succeeds");

    let loaded = load_generation_report(&report_path).expect("report loads");
    let direct = run_aggregation(Some(&loaded.report), Some(&factors())).expect("aggregation");
    let expected =
        generation_report::io::export::render_output_xml(&direct).expect("render output");
    assert_eq!(fs::read_to_string(written).expect("output readable"), expected);
}

#[test]
fn only_xml_files_are_listed_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_fixture(dir.path(), "b.xml", "<r/>");
    write_fixture(dir.path(), "a.xml", "<r/>");
    write_fixture(dir.path(), "c.txt", "<r/>");
    fs::create_dir_all(dir.path().join("nested.xml")).expect("mkdir");

    let files = list_report_files(dir.path()).expect("folder readable");
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, ["a.xml", "b.xml"]);
}
