use std::collections::{btree_map::Entry, BTreeMap};

use time::Date;

use crate::domain::{DailyAggregate, MeasurementRecord};

/// Group records by calendar date in a single pass.
///
/// The map iterates in ascending date order.
pub fn aggregate_by_day<'a, I>(records: I) -> BTreeMap<Date, DailyAggregate>
where
    I: IntoIterator<Item = &'a MeasurementRecord>,
{
    let mut days = BTreeMap::new();

    for record in records {
        match days.entry(record.date()) {
            Entry::Vacant(slot) => {
                slot.insert(DailyAggregate::first(record));
            }
            Entry::Occupied(mut slot) => slot.get_mut().absorb(record),
        }
    }

    days
}
