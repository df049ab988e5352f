//! Column-value grouping: distinct key combinations joined back against
//! the full table in parallel

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::ChopperError;
use crate::size_pager::chop_by_size;
use crate::table::{cmp_rows, Table, Value};

/// Split `table` into one group per distinct combination of values in the
/// comma-separated `columns_to_split` list.
///
/// Each group is keyed by its combination's non-null values joined with
/// `_`. When `group_size > 0` every group is additionally size-paged, with
/// chunk keys namespaced under the combination's fragment
/// (`{fragment}_{index}`).
///
/// Column names are trimmed and must all exist in the table; validation
/// happens before any parallel work is scheduled.
pub fn chop_by_columns(
    table: &Table,
    columns_to_split: &str,
    group_size: usize,
) -> Result<HashMap<String, Table>, ChopperError> {
    let column_list: Vec<String> = columns_to_split
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();
    if column_list.is_empty() {
        return Err(ChopperError::Config(
            "no split columns were given".to_string(),
        ));
    }

    let mut key_indices = Vec::with_capacity(column_list.len());
    for name in &column_list {
        match table.column_index(name) {
            Some(index) => key_indices.push(index),
            None => {
                return Err(ChopperError::Config(format!(
                    "column '{}' not found in input",
                    name
                )))
            }
        }
    }

    // Sorted distinct projection onto the key columns. Sorting first makes
    // both the dedup and the fragment ordering deterministic across runs.
    let mut filters: Vec<Vec<Value>> = table
        .rows()
        .iter()
        .map(|row| key_indices.iter().map(|&i| row[i].clone()).collect())
        .collect();
    filters.sort_by(|a, b| cmp_rows(a, b));
    filters.dedup_by(|a, b| cmp_rows(a, b) == Ordering::Equal);

    println!(
        "Found {} unique combinations in the specified columns.",
        filters.len()
    );

    if filters.is_empty() {
        return Ok(HashMap::new());
    }

    // Fan the filters out over the worker pool; each worker joins its share
    // against the shared read-only table and the results are merged at the
    // scope barrier. Keys are unique per filter, so merge order is
    // irrelevant.
    let num_workers = num_cpus::get().min(filters.len());
    let batch_size = filters.len().div_ceil(num_workers);

    let outcome = crossbeam::thread::scope(|scope| {
        let mut handles = Vec::new();
        for batch in filters.chunks(batch_size) {
            let key_indices = &key_indices;
            handles.push(scope.spawn(move |_| {
                let mut local = HashMap::new();
                for filter in batch {
                    local.extend(split_one_filter(table, key_indices, filter, group_size));
                }
                local
            }));
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(i, handle)| handle.join().map_err(|_| ChopperError::Worker(i)))
            .collect::<Result<Vec<_>, ChopperError>>()
    });

    let worker_maps = match outcome {
        Ok(maps) => maps?,
        // Every handle is joined above, so a panic already surfaced there.
        Err(payload) => std::panic::resume_unwind(payload),
    };

    let mut groups = HashMap::new();
    for map in worker_maps {
        groups.extend(map);
    }
    Ok(groups)
}

/// Handle a single filter: build its naming fragment, inner-join it against
/// the table, and size-page the result when requested.
fn split_one_filter(
    table: &Table,
    key_indices: &[usize],
    filter: &[Value],
    group_size: usize,
) -> HashMap<String, Table> {
    // Multi-column fragments look like val1_val2_val3; nulls are dropped.
    let fragment = filter
        .iter()
        .filter_map(Value::canonical)
        .collect::<Vec<_>>()
        .join("_");

    let rows: Vec<Vec<Value>> = table
        .rows()
        .iter()
        .filter(|row| {
            key_indices
                .iter()
                .zip(filter.iter())
                .all(|(&i, value)| row[i].join_eq(value))
        })
        .cloned()
        .collect();
    let subset = Table::new(table.columns().to_vec(), rows);

    if group_size > 0 {
        chop_by_size(&subset, group_size, &format!("{}_", fragment))
    } else {
        let mut groups = HashMap::new();
        groups.insert(fragment, subset);
        groups
    }
}
