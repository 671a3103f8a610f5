use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cmp::Ordering;
use tracing::{debug, trace};

use crate::constants::{DEFAULT_DEDUP_KEYS, DEFAULT_TIMESTAMP_FIELD};
use crate::core::record::{
    compare_timestamps, key_value, timestamp, ChangeEntry, ChangeLog, Dataset, FieldDelta,
    KeyValue, Record,
};
use crate::error::{DedupError, Result};

/// Which fields drive a deduplication run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupOptions {
    /// Key fields, one pass each, in this order.
    pub keys: Vec<String>,
    /// Field compared to decide which duplicate is the most recent.
    pub timestamp_field: String,
}

impl Default for DedupOptions {
    /// Deduplicates by `email`, then `_id`, using `entryDate` as the timestamp.
    fn default() -> Self {
        Self {
            keys: DEFAULT_DEDUP_KEYS.iter().map(|key| key.to_string()).collect(),
            timestamp_field: DEFAULT_TIMESTAMP_FIELD.to_string(),
        }
    }
}

impl DedupOptions {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = field.into();
        self
    }
}

/// Counters for a single key pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    pub key: String,
    pub input_records: usize,
    pub output_records: usize,
    /// Duplicates that replaced the winner; one change entry each.
    pub overwrites: usize,
    /// Duplicates that lost to the current winner and left no trace.
    pub discarded: usize,
}

impl PassStats {
    pub fn duplicates_removed(&self) -> usize {
        self.input_records - self.output_records
    }
}

/// Result of a full multi-key run.
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    pub records: Dataset,
    pub change_log: ChangeLog,
    pub passes: Vec<PassStats>,
}

impl DedupOutcome {
    pub fn duplicates_removed(&self) -> usize {
        self.passes.iter().map(PassStats::duplicates_removed).sum()
    }
}

/// Lists every field of `updated` whose value differs in `source`.
///
/// Only the fields of `updated` are inspected. A field that `updated` carries
/// and `source` lacks is an error; `index` is the position of `updated`.
pub fn log_changes(source: &Record, updated: &Record, index: usize) -> Result<Vec<FieldDelta>> {
    let mut changes = Vec::new();

    for (field, to) in updated {
        let from = source
            .get(field)
            .ok_or_else(|| DedupError::MissingFieldOnSuperseded {
                index,
                field: field.clone(),
            })?;

        if from != to {
            changes.push(FieldDelta {
                field: field.clone(),
                from: from.clone(),
                to: to.clone(),
            });
        }
    }

    Ok(changes)
}

/// Deduplicates `records` by a single key field.
///
/// For every key value the record with the greatest (timestamp, position)
/// survives. Each time a later record replaces the current winner a
/// `ChangeEntry` is appended to `log`; duplicates that lose are dropped
/// silently. Survivors come out in the order their key values first appeared.
///
/// Error indexes are positions in `records`. On error nothing is appended to `log`.
pub fn deduplicate_by_key(
    key: &str,
    records: Dataset,
    timestamp_field: &str,
    log: &mut ChangeLog,
) -> Result<Dataset> {
    let (survivors, entries, _) = reduce(key, track(records), timestamp_field)?;
    log.extend(entries);
    Ok(untrack(survivors))
}

/// Runs one `deduplicate_by_key` pass per key in `options.keys`, feeding each
/// pass the survivors of the previous one. The returned change log holds the
/// entries of every pass in pass order.
///
/// Error indexes are positions in the `records` given here, whichever pass fails.
pub fn deduplicate(records: Dataset, options: &DedupOptions) -> Result<DedupOutcome> {
    if options.keys.is_empty() {
        return Err(DedupError::NoKeys);
    }

    let mut records = track(records);
    let mut change_log = ChangeLog::new();
    let mut passes = Vec::with_capacity(options.keys.len());

    for key in &options.keys {
        let (survivors, entries, stats) = reduce(key, records, &options.timestamp_field)?;

        debug!(
            key = %stats.key,
            input = stats.input_records,
            output = stats.output_records,
            overwrites = stats.overwrites,
            discarded = stats.discarded,
            "deduplication pass finished"
        );

        change_log.extend(entries);
        passes.push(stats);
        records = survivors;
    }

    Ok(DedupOutcome {
        records: untrack(records),
        change_log,
        passes,
    })
}

/// A record and its position in the dataset the run started from.
struct Tracked {
    record: Record,
    origin: usize,
}

fn track(records: Dataset) -> Vec<Tracked> {
    records
        .into_iter()
        .enumerate()
        .map(|(origin, record)| Tracked { record, origin })
        .collect()
}

fn untrack(records: Vec<Tracked>) -> Dataset {
    records.into_iter().map(|tracked| tracked.record).collect()
}

/// One pass. Ties break on the position within this pass; errors report `origin`.
fn reduce(
    key: &str,
    records: Vec<Tracked>,
    timestamp_field: &str,
) -> Result<(Vec<Tracked>, ChangeLog, PassStats)> {
    let input_records = records.len();
    let mut winners: IndexMap<KeyValue, (Tracked, usize)> = IndexMap::with_capacity(input_records);
    let mut entries = ChangeLog::new();
    let mut discarded = 0;

    for (index, incoming) in records.into_iter().enumerate() {
        let value = key_value(&incoming.record, key, incoming.origin)?;

        match winners.entry(value) {
            Entry::Vacant(slot) => {
                slot.insert((incoming, index));
            }
            Entry::Occupied(mut slot) => {
                let (current, current_index) = slot.get();
                let current_index = *current_index;

                if !supersedes(&incoming, index, current, current_index, timestamp_field)? {
                    discarded += 1;
                    continue;
                }

                let changes = log_changes(&current.record, &incoming.record, incoming.origin)?;
                trace!(
                    key,
                    value = %slot.key(),
                    superseded = current.origin,
                    by = incoming.origin,
                    changed_fields = changes.len(),
                    "record superseded"
                );

                let updated = incoming.record.clone();
                let (source, _) = slot.insert((incoming, index));
                entries.push(ChangeEntry {
                    source: source.record,
                    updated,
                    changes,
                });
            }
        }
    }

    let survivors: Vec<Tracked> = winners.into_values().map(|(tracked, _)| tracked).collect();
    let stats = PassStats {
        key: key.to_string(),
        input_records,
        output_records: survivors.len(),
        overwrites: entries.len(),
        discarded,
    };

    Ok((survivors, entries, stats))
}

/// True when `incoming` at pass position `index` beats the winner at `current_index`.
fn supersedes(
    incoming: &Tracked,
    index: usize,
    current: &Tracked,
    current_index: usize,
    timestamp_field: &str,
) -> Result<bool> {
    let incoming_ts = timestamp(&incoming.record, timestamp_field, incoming.origin)?;
    let current_ts = timestamp(&current.record, timestamp_field, current.origin)?;

    match compare_timestamps(incoming_ts, current_ts) {
        Some(Ordering::Greater) => Ok(true),
        Some(Ordering::Equal) => Ok(index > current_index),
        Some(Ordering::Less) => Ok(false),
        None => Err(DedupError::IncomparableTimestamps {
            index: incoming.origin,
            field: timestamp_field.to_string(),
        }),
    }
}
