use energy_domain::{
    domain::MeasurementRecord,
    queries::{aggregate_by_day, select, DateRange, Period},
};
use time::Weekday;

use super::separator;
use crate::format::{format_amount, format_date, format_temperature};

fn weekday_fi(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "maanantai",
        Weekday::Tuesday => "tiistai",
        Weekday::Wednesday => "keskiviikko",
        Weekday::Thursday => "torstai",
        Weekday::Friday => "perjantai",
        Weekday::Saturday => "lauantai",
        Weekday::Sunday => "sunnuntai",
    }
}

/// Day-by-day listing of a range, one row per day that has records.
pub fn daily_table(records: &[MeasurementRecord], range: DateRange) -> Vec<String> {
    let selected = select(records, &Period::Range(range));
    let days = aggregate_by_day(selected.iter().copied());

    if days.is_empty() {
        return vec![format!(
            "Ei dataa valitulta aikaväliltä ({} - {}).",
            format_date(range.start()),
            format_date(range.end())
        )];
    }

    let mut lines = vec![
        "PÄIVITTÄINEN ERITTELY (aikaväli)".to_string(),
        format!(
            "Aikaväli: {} - {}",
            format_date(range.start()),
            format_date(range.end())
        ),
        separator(),
        format!(
            "{:<12}{:<12}{:>14}{:>15}{:>12}",
            "Päivä", "Pvm", "Kulutus [kWh]", "Tuotanto [kWh]", "Lämpö [°C]"
        ),
        separator(),
    ];

    lines.extend(days.values().map(|day| {
        format!(
            "{:<12}{:<12}{:>14}{:>15}{:>12}",
            weekday_fi(day.date().weekday()),
            format_date(day.date()),
            format_amount(day.consumption_sum()),
            format_amount(day.production_sum()),
            format_temperature(day.temperature_avg())
        )
    }));

    lines
}
