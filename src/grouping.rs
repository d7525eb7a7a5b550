use chrono::{Datelike, IsoWeek, NaiveDate};
use std::collections::HashMap;
use std::hash::Hash;

use crate::fares::DayFareRecord;
use crate::journey::{Journey, day_label};

/// Calendar date of a journey; `None` collects every invalid timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayKey(pub Option<NaiveDate>);

impl DayKey {
    pub fn label(&self) -> String {
        day_label(self.0)
    }
}

/// ISO-8601 week (Monday to Sunday). The ISO week-year keeps the days
/// around New Year in a single week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekKey(pub Option<IsoWeek>);

impl WeekKey {
    pub fn of(date: Option<NaiveDate>) -> Self {
        WeekKey(date.map(|d| d.iso_week()))
    }
}

/// Values grouped by key, keys kept in first-seen order and values kept in
/// arrival order within each group.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    index: HashMap<K, usize>,
    groups: Vec<(K, Vec<V>)>,
}

impl<K: Copy + Eq + Hash, V> OrderedGroups<K, V> {
    pub fn new() -> Self {
        OrderedGroups {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    pub fn push(&mut self, key: K, value: V) {
        let slot = *self.index.entry(key).or_insert_with(|| {
            self.groups.push((key, Vec::new()));
            self.groups.len() - 1
        });
        self.groups[slot].1.push(value);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(key, values)| (key, values.as_slice()))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut Vec<V>)> {
        self.groups.iter_mut().map(|(key, values)| (&*key, values))
    }
}

impl<K: Copy + Eq + Hash, V> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IntoIterator for OrderedGroups<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = std::vec::IntoIter<(K, Vec<V>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

pub fn group_by_day(journeys: &[Journey]) -> OrderedGroups<DayKey, &Journey> {
    let mut groups = OrderedGroups::new();
    for journey in journeys {
        groups.push(DayKey(journey.timestamp.date()), journey);
    }
    groups
}

pub fn group_by_week(days: Vec<DayFareRecord>) -> OrderedGroups<WeekKey, DayFareRecord> {
    let mut groups = OrderedGroups::new();
    for day in days {
        groups.push(WeekKey::of(day.date), day);
    }
    groups
}
