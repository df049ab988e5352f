//! Fixed-size row paging

use std::collections::HashMap;

use crate::table::Table;

/// Split `table` into consecutive, non-overlapping chunks of at most
/// `group_size` rows, preserving row order within and across chunks.
///
/// Each chunk is keyed by `{name_prefix}{1-based index}`; numbering is
/// sequential with no gaps. The caller is responsible for filtering out
/// `group_size == 0` (size splitting disabled) before calling.
pub fn chop_by_size(table: &Table, group_size: usize, name_prefix: &str) -> HashMap<String, Table> {
    debug_assert!(group_size > 0);

    let mut groups = HashMap::new();
    for (i, start) in (0..table.len()).step_by(group_size).enumerate() {
        let end = (start + group_size).min(table.len());
        groups.insert(format!("{}{}", name_prefix, i + 1), table.slice(start, end));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn table_of(n: usize) -> Table {
        Table::new(
            vec!["id".to_string()],
            (0..n).map(|i| vec![Value::Int(i as i64)]).collect(),
        )
    }

    #[test]
    fn test_seven_rows_by_three() {
        let groups = chop_by_size(&table_of(7), 3, "");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups["1"].len(), 3);
        assert_eq!(groups["2"].len(), 3);
        assert_eq!(groups["3"].len(), 1);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let groups = chop_by_size(&table_of(6), 3, "");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["1"].len(), 3);
        assert_eq!(groups["2"].len(), 3);
    }

    #[test]
    fn test_empty_table_yields_no_chunks() {
        let groups = chop_by_size(&table_of(0), 5, "");
        assert!(groups.is_empty());
    }

    #[test]
    fn test_prefix_is_prepended() {
        let groups = chop_by_size(&table_of(4), 2, "NY_");
        assert_eq!(groups.len(), 2);
        assert!(groups.contains_key("NY_1"));
        assert!(groups.contains_key("NY_2"));
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let table = table_of(10);
        let groups = chop_by_size(&table, 4, "");

        let mut rebuilt = Vec::new();
        for i in 1..=groups.len() {
            rebuilt.extend_from_slice(groups[&i.to_string()].rows());
        }
        assert_eq!(rebuilt, table.rows());
    }
}
