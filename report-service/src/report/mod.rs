//! Turns period outcomes into the ordered text lines handed to sinks.

mod daily_table;

pub use daily_table::daily_table;

use energy_domain::{
    domain::{DayExtreme, MeasurementRecord, PeriodOutcome, PeriodSummary},
    queries::{select, summarize, Period},
};

use crate::format::{format_amount, format_date, format_temperature};

const SEPARATOR_WIDTH: usize = 50;

pub(crate) fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Select, summarize and assemble one report over the loaded records.
pub fn build(records: &[MeasurementRecord], period: &Period) -> Vec<String> {
    let selected = select(records, period);
    let outcome = summarize(&selected, *period);

    metrics::counter!("reports_built_total").increment(1);
    tracing::info!(
        period = ?period,
        selected = selected.len(),
        no_data = matches!(outcome, PeriodOutcome::NoData(_)),
        "report built"
    );

    assemble(&outcome)
}

pub fn assemble(outcome: &PeriodOutcome) -> Vec<String> {
    match outcome {
        PeriodOutcome::NoData(period) => vec![no_data_line(period)],
        PeriodOutcome::Summarized(summary) => summary_lines(summary),
    }
}

fn title(period: &Period) -> String {
    match period {
        Period::Range(_) => "PÄIVÄKOHTAINEN YHTEENVETO (aikaväli)".to_string(),
        Period::Month { .. } => "KUUKAUSIKOHTAINEN YHTEENVETO".to_string(),
        Period::Year(year) => format!("VUODEN {year} KOKONAISYHTEENVETO"),
    }
}

// The year report has no scope line; its title carries the year.
fn scope_line(period: &Period) -> Option<String> {
    match period {
        Period::Range(range) => Some(format!(
            "Aikaväli: {} - {}",
            format_date(range.start()),
            format_date(range.end())
        )),
        Period::Month { month, year } => Some(format!("Kuukausi: {}/{year}", u8::from(*month))),
        Period::Year(_) => None,
    }
}

fn no_data_line(period: &Period) -> String {
    match period {
        Period::Range(range) => format!(
            "Ei dataa valitulta aikaväliltä ({} - {}).",
            format_date(range.start()),
            format_date(range.end())
        ),
        Period::Month { month, year } => {
            format!("Ei dataa valitulta kuukaudelta ({}/{year}).", u8::from(*month))
        }
        Period::Year(year) => format!("Ei dataa vuodesta {year}."),
    }
}

fn day_line(label: &str, day: &DayExtreme) -> String {
    format!(
        "{label}: {} | {} kWh | lämpö {} °C",
        format_date(day.date),
        format_amount(day.consumption_kwh),
        format_temperature(day.temperature_avg)
    )
}

fn summary_lines(summary: &PeriodSummary) -> Vec<String> {
    let mut lines = vec![title(&summary.period)];
    lines.extend(scope_line(&summary.period));
    lines.extend([
        separator(),
        format!("Kokonaiskulutus: {} kWh", format_amount(summary.total_consumption)),
        format!("Kokonaistuotanto: {} kWh", format_amount(summary.total_production)),
        format!(
            "Nettokuorma (kulutus - tuotanto): {} kWh",
            format_amount(summary.net_load)
        ),
        format!(
            "Keskilämpötila (tuntien keskiarvo): {} °C",
            format_temperature(summary.average_temperature)
        ),
        separator(),
        day_line("Suurin päiväkulutus", &summary.best_day),
        day_line("Pienin päiväkulutus", &summary.worst_day),
    ]);
    lines
}
