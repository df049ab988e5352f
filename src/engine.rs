//! Top-level partitioning: selects the split strategy and produces the
//! fragment to sub-table mapping

use std::collections::HashMap;

use crate::column_grouper::chop_by_columns;
use crate::error::ChopperError;
use crate::size_pager::chop_by_size;
use crate::table::Table;

/// The split configuration collected from the user, in one place instead
/// of scattered prompt state.
#[derive(Debug, Clone, Default)]
pub struct PartitionOptions {
    /// Comma-separated column names to split by, if column splitting was
    /// requested.
    pub columns: Option<String>,
    /// Maximum rows per output file; 0 disables size splitting.
    pub group_size: usize,
}

/// Partition `table` according to `options`.
///
/// Column splitting drives when both modes are selected; the size cap then
/// applies within each column group. Selecting neither mode is a fatal
/// configuration error, raised before any parallel work or I/O.
pub fn partition(
    table: &Table,
    options: &PartitionOptions,
) -> Result<HashMap<String, Table>, ChopperError> {
    match (&options.columns, options.group_size) {
        (Some(columns), group_size) => chop_by_columns(table, columns, group_size),
        (None, group_size) if group_size > 0 => Ok(chop_by_size(table, group_size, "")),
        (None, _) => Err(ChopperError::Config(
            "must split by columns and/or row count".to_string(),
        )),
    }
}
