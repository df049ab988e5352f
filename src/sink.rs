//! Parallel persistence of partitioned groups as delimited-text files

use std::collections::HashMap;
use std::path::Path;

use crate::error::ChopperError;
use crate::sanitize::clean_filename_part;
use crate::table::Table;

/// Create the destination directory (and any missing parents) if absent.
pub fn ensure_directory(path: impl AsRef<Path>) -> Result<(), ChopperError> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).map_err(|e| ChopperError::io(path, e))
}

/// Write every group under `destination` as `{prefix}_{fragment}.csv`,
/// fanned out across the worker pool. Prefix and fragment are sanitized
/// independently.
///
/// Returns the number of files written. The first write failure is
/// propagated with its path; files completed before the failure stay on
/// disk.
pub fn persist_all(
    groups: &HashMap<String, Table>,
    destination: impl AsRef<Path>,
    prefix: &str,
) -> Result<usize, ChopperError> {
    let destination = destination.as_ref();
    let prefix = clean_filename_part(prefix);

    let entries: Vec<(&String, &Table)> = groups.iter().collect();
    if entries.is_empty() {
        return Ok(0);
    }

    // Filenames are disjoint by construction of unique fragments, so the
    // writers need no coordination beyond the scope barrier.
    let num_workers = num_cpus::get().min(entries.len());
    let batch_size = entries.len().div_ceil(num_workers);

    let outcome = crossbeam::thread::scope(|scope| {
        let mut handles = Vec::new();
        for batch in entries.chunks(batch_size) {
            let prefix = prefix.as_str();
            handles.push(scope.spawn(move |_| -> Result<usize, ChopperError> {
                let mut written = 0;
                for (fragment, table) in batch {
                    let filename =
                        format!("{}_{}.csv", prefix, clean_filename_part(fragment));
                    table.save(destination.join(filename))?;
                    written += 1;
                }
                Ok(written)
            }));
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(i, handle)| handle.join().map_err(|_| ChopperError::Worker(i)))
            .collect::<Result<Vec<_>, ChopperError>>()
    });

    let worker_results = match outcome {
        Ok(results) => results?,
        // Every handle is joined above, so a panic already surfaced there.
        Err(payload) => std::panic::resume_unwind(payload),
    };

    let mut total = 0;
    for result in worker_results {
        total += result?;
    }
    Ok(total)
}
