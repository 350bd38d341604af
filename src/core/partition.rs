//! Grouping rows into request batches
//!
//! Rows are grouped by [`GroupKey`] in order of first appearance, then each
//! group is cut into consecutive slices of at most `max_per` rows. Slices never
//! mix groups and together reproduce each group exactly.

use crate::domain::{GroupKey, Row};
use std::collections::HashMap;

/// One request's worth of line items sharing a group key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Shared subject fields, copied into every batch of the group
    pub key: GroupKey,

    /// Line items in input order
    pub rows: Vec<Row>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row id of the first line item, if any
    pub fn first_row_id(&self) -> Option<u64> {
        self.rows.first().map(|r| r.row_id)
    }
}

/// Groups rows by key, preserving first-appearance order of groups
pub fn group_rows(rows: &[Row]) -> Vec<(GroupKey, Vec<Row>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<Row>)> = Vec::new();

    for row in rows {
        let key = row.group_key();
        match index.get(&key) {
            Some(&pos) => groups[pos].1.push(row.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![row.clone()]));
            }
        }
    }

    groups
}

/// Partitions rows into batches of at most `max_per` items
///
/// A `max_per` of zero is treated as one; configuration validation rejects it
/// before it gets here.
pub fn partition(rows: &[Row], max_per: usize) -> Vec<Batch> {
    let max_per = max_per.max(1);

    let batches: Vec<Batch> = group_rows(rows)
        .into_iter()
        .flat_map(|(key, members)| {
            members
                .chunks(max_per)
                .map(|slice| Batch {
                    key: key.clone(),
                    rows: slice.to_vec(),
                })
                .collect::<Vec<_>>()
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        batches = batches.len(),
        max_per = max_per,
        "Rows partitioned into batches"
    );

    batches
}
