use crate::domain::{DailyAggregate, DayExtreme, MeasurementRecord, PeriodOutcome, PeriodSummary};

use super::{aggregate_by_day, Period};

/// Summarize the records already selected for `period`.
///
/// Ties between days resolve to the earliest date for both the best and the
/// worst day: days are scanned in ascending date order and a later day only
/// replaces the current pick on a strictly larger (or smaller) sum.
pub fn summarize(selected: &[&MeasurementRecord], period: Period) -> PeriodOutcome {
    let days = aggregate_by_day(selected.iter().copied());

    let mut scan = days.values();
    let Some(first) = scan.next() else {
        return PeriodOutcome::NoData(period);
    };

    let (mut best, mut worst) = (first, first);
    for day in scan {
        if day.consumption_sum() > best.consumption_sum() {
            best = day;
        }
        if day.consumption_sum() < worst.consumption_sum() {
            worst = day;
        }
    }

    let total_consumption: f64 = selected.iter().map(|r| r.consumption_kwh).sum();
    let total_production: f64 = selected.iter().map(|r| r.production_kwh).sum();

    let (temperature_sum, temperature_samples) = selected
        .iter()
        .filter_map(|r| r.temperature_c)
        .fold((0.0, 0usize), |(sum, n), t| (sum + t, n + 1));
    let average_temperature = (temperature_samples > 0).then(|| temperature_sum / temperature_samples as f64);

    PeriodOutcome::Summarized(PeriodSummary {
        period,
        total_consumption,
        total_production,
        net_load: total_consumption - total_production,
        average_temperature,
        best_day: extreme(best),
        worst_day: extreme(worst),
        record_count: selected.len(),
        day_count: days.len(),
    })
}

fn extreme(day: &DailyAggregate) -> DayExtreme {
    DayExtreme {
        date: day.date(),
        consumption_kwh: day.consumption_sum(),
        temperature_avg: day.temperature_avg(),
    }
}
