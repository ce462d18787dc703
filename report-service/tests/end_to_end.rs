use std::io::Cursor;

use energy_domain::queries::Period;
use report_service::{
    config::AppConfig,
    pipeline::{MalformedPolicy, ReportError, Sink},
    report,
    sinks::TextFileSink,
    sources::load_from_reader,
};
use time::macros::date;

const YEAR_EXPORT: &str = "\
Aika;Kulutus (netotettu) kWh;Tuotanto (netotettu) kWh;Vuorokauden keskilämpötila
2025-10-01T00:00:00;5,0;1,0;4,0
2025-10-01T01:00:00;3,0;0,5;6,0
2025-10-01T02:00:00;0,0;0,0;8,0
2025-10-02T00:00:00;2,0;0,0;2,0
";

#[test]
fn csv_export_to_range_report() {
    let cfg = AppConfig::default();
    let records = load_from_reader(&cfg.source, Cursor::new(YEAR_EXPORT)).expect("export loads");
    assert_eq!(records.len(), 4);

    let lines = report::build(&records, &Period::range(date!(2025 - 10 - 01), date!(2025 - 10 - 02)));
    assert_eq!(lines[3], "Kokonaiskulutus: 10,00 kWh");
    assert_eq!(lines[4], "Kokonaistuotanto: 1,50 kWh");
    assert_eq!(lines[5], "Nettokuorma (kulutus - tuotanto): 8,50 kWh");
    assert_eq!(lines[8], "Suurin päiväkulutus: 1.10.2025 | 8,00 kWh | lämpö 6,00 °C");
    assert_eq!(lines[9], "Pienin päiväkulutus: 2.10.2025 | 2,00 kWh | lämpö 2,00 °C");
}

#[test]
fn malformed_line_policy_is_uniform() {
    let broken = format!("{YEAR_EXPORT}2025-10-03T00:00:00;ei-luku;0,0;1,0\n2025-10-04T00:00:00;1,0;0,0;1,0\n");

    let mut cfg = AppConfig::default();
    let err = load_from_reader(&cfg.source, Cursor::new(broken.clone())).expect_err("abort policy fails");
    assert!(matches!(err, ReportError::MalformedRecord { line: 6, .. }));

    cfg.source.malformed = MalformedPolicy::Skip;
    let records = load_from_reader(&cfg.source, Cursor::new(broken)).expect("skip policy loads");
    assert_eq!(records.len(), 5);
}

#[test]
fn report_file_holds_one_line_per_element() {
    let cfg = AppConfig::default();
    let records = load_from_reader(&cfg.source, Cursor::new(YEAR_EXPORT)).expect("export loads");
    let lines = report::build(&records, &Period::Year(2025));

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("raportti.txt");
    TextFileSink::new(&path).write(&lines).expect("report written");

    let written = std::fs::read_to_string(&path).expect("read back");
    assert_eq!(written, lines.iter().map(|l| format!("{l}\n")).collect::<String>());
}

#[test]
fn repeated_requests_are_identical() {
    let cfg = AppConfig::default();
    let records = load_from_reader(&cfg.source, Cursor::new(YEAR_EXPORT)).expect("export loads");
    let period = Period::month_number(10, 2025).expect("valid month");

    let first = report::build(&records, &period);
    let second = report::build(&records, &period);
    assert_eq!(first, second);
}
