//! Table sort engine
//!
//! Owns the per-table [`SortState`] map. Each table is registered once with
//! the columns it can be sorted by; activating a column toggles or resets the
//! direction, stably sorts the rows and moves the header indicator.

use std::collections::HashMap;

use super::extract::{SortKey, TextCollation};
use super::platform::SortableTable;
use super::types::{ColumnDescriptor, SortOrder, SortState, TableId};
use crate::error::SortError;

#[derive(Debug, Clone)]
struct TableEntry {
    columns: Vec<ColumnDescriptor>,
    state: SortState,
}

impl TableEntry {
    fn column(&self, key: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    collation: TextCollation,
    tables: HashMap<TableId, TableEntry>,
}

impl SortEngine {
    pub fn new(collation: TextCollation) -> Self {
        Self {
            collation,
            tables: HashMap::new(),
        }
    }

    pub fn collation(&self) -> TextCollation {
        self.collation
    }

    /// Change how text columns compare; registrations and sort state are kept
    pub fn set_collation(&mut self, collation: TextCollation) {
        self.collation = collation;
    }

    /// Register `table` with the columns it may be sorted by
    ///
    /// Descriptors naming a column the table's headers do not declare are
    /// skipped. Returns the number of accepted columns. Registering an id
    /// again replaces its columns and forgets its previous sort.
    pub fn register_sortable_table(
        &mut self,
        id: impl Into<TableId>,
        table: &impl SortableTable,
        descriptors: impl IntoIterator<Item = ColumnDescriptor>,
    ) -> usize {
        let id = id.into();
        let mut columns: Vec<ColumnDescriptor> = Vec::new();
        for descriptor in descriptors {
            if !table.declares_column(&descriptor.key) {
                tracing::warn!(table = %id, column = %descriptor.key, "column not declared by any header, skipping");
                continue;
            }
            if columns.iter().any(|c| c.key == descriptor.key) {
                tracing::warn!(table = %id, column = %descriptor.key, "duplicate column descriptor, keeping the first");
                continue;
            }
            columns.push(descriptor);
        }

        let accepted = columns.len();
        tracing::debug!(table = %id, columns = accepted, "registered sortable table");
        self.tables.insert(
            id,
            TableEntry {
                columns,
                state: SortState::default(),
            },
        );
        accepted
    }

    /// Sort `table` by `column`, toggling direction if it is already active
    pub fn activate_sort(
        &mut self,
        id: &TableId,
        table: &mut impl SortableTable,
        column: &str,
    ) -> Result<SortState, SortError> {
        let collation = self.collation;
        let entry = self
            .tables
            .get_mut(id)
            .ok_or_else(|| SortError::UnknownTable(id.to_string()))?;
        let descriptor = entry
            .column(column)
            .cloned()
            .ok_or_else(|| SortError::UnknownColumn {
                table: id.to_string(),
                column: column.to_string(),
            })?;

        let next = entry.state.activate(column);
        let order = sorted_order(&*table, &descriptor, next.order, collation);
        table.apply_order(&order)?;

        for c in &entry.columns {
            table.set_indicator(&c.key, None);
        }
        table.set_indicator(column, Some(next.order));

        tracing::debug!(table = %id, column, order = ?next.order, rows = order.len(), "sorted table");
        entry.state = next.clone();
        Ok(next)
    }

    pub fn sort_state(&self, id: &TableId) -> Option<&SortState> {
        self.tables.get(id).map(|e| &e.state)
    }

    pub fn is_registered(&self, id: &TableId) -> bool {
        self.tables.contains_key(id)
    }

    /// Columns accepted for a registered table
    pub fn columns(&self, id: &TableId) -> Option<&[ColumnDescriptor]> {
        self.tables.get(id).map(|e| e.columns.as_slice())
    }

    /// Drop a table's registration and state
    pub fn forget_table(&mut self, id: &TableId) -> bool {
        self.tables.remove(id).is_some()
    }
}

/// Row indices of `table` in sorted order
///
/// Uses a stable sort; descending reverses the ascending comparison so rows
/// with equal keys keep their current relative order either way.
pub fn sorted_order(
    table: &impl SortableTable,
    column: &ColumnDescriptor,
    order: SortOrder,
    collation: TextCollation,
) -> Vec<usize> {
    let keys: Vec<SortKey> = (0..table.row_count())
        .map(|row| SortKey::extract(table.cell_text(row, &column.key).as_deref(), column.kind))
        .collect();

    let mut indices: Vec<usize> = (0..keys.len()).collect();
    indices.sort_by(|&a, &b| {
        let cmp = keys[a].compare(&keys[b], collation);
        if order == SortOrder::Descending { cmp.reverse() } else { cmp }
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::memory::{MemoryRow, MemoryTable};
    use crate::sort::types::ColumnType;
    use proptest::prelude::*;

    fn people() -> MemoryTable {
        MemoryTable::new(
            vec![
                ColumnDescriptor::new("name", ColumnType::Text),
                ColumnDescriptor::new("amount", ColumnType::Number),
                ColumnDescriptor::new("created", ColumnType::Date),
            ],
            vec![
                MemoryRow::new(0, [("name", "Bob"), ("amount", "€50"), ("created", "15 Mar 2024")]),
                MemoryRow::new(1, [("name", "Amy"), ("amount", "€200"), ("created", "1 Jan 2023")]),
                MemoryRow::new(2, [("name", "Cid"), ("amount", "€50"), ("created", "pending")]),
            ],
        )
    }

    fn registered(table: &MemoryTable) -> (SortEngine, TableId) {
        let mut engine = SortEngine::default();
        let id = TableId::from("people-table");
        engine.register_sortable_table(id.clone(), table, table.header_columns());
        (engine, id)
    }

    fn names(table: &MemoryTable) -> Vec<&str> {
        table.column_values("name")
    }

    #[test]
    fn amount_ascending_then_descending_is_stable() {
        let mut table = people();
        let (mut engine, id) = registered(&table);

        let state = engine.activate_sort(&id, &mut table, "amount").unwrap();
        assert_eq!(state.order, SortOrder::Ascending);
        assert_eq!(names(&table), vec!["Bob", "Cid", "Amy"]);

        let state = engine.activate_sort(&id, &mut table, "amount").unwrap();
        assert_eq!(state.order, SortOrder::Descending);
        assert_eq!(names(&table), vec!["Amy", "Bob", "Cid"]);
    }

    #[test]
    fn switching_columns_resets_to_ascending() {
        let mut table = people();
        let (mut engine, id) = registered(&table);

        engine.activate_sort(&id, &mut table, "amount").unwrap();
        engine.activate_sort(&id, &mut table, "amount").unwrap();
        let state = engine.activate_sort(&id, &mut table, "name").unwrap();

        assert_eq!(state.active_column.as_deref(), Some("name"));
        assert_eq!(state.order, SortOrder::Ascending);
        assert_eq!(names(&table), vec!["Amy", "Bob", "Cid"]);
    }

    #[test]
    fn unparseable_dates_sort_first() {
        let mut table = people();
        let (mut engine, id) = registered(&table);

        engine.activate_sort(&id, &mut table, "created").unwrap();
        assert_eq!(names(&table), vec!["Cid", "Amy", "Bob"]);
    }

    #[test]
    fn only_active_header_has_indicator() {
        let mut table = people();
        let (mut engine, id) = registered(&table);

        engine.activate_sort(&id, &mut table, "amount").unwrap();
        engine.activate_sort(&id, &mut table, "name").unwrap();
        engine.activate_sort(&id, &mut table, "name").unwrap();

        assert_eq!(table.active_indicators(), 1);
        assert_eq!(table.indicator("name"), Some(SortOrder::Descending));
        assert_eq!(table.indicator("amount"), None);
    }

    #[test]
    fn unknown_column_leaves_table_untouched() {
        let mut table = people();
        let (mut engine, id) = registered(&table);

        let err = engine.activate_sort(&id, &mut table, "phone").unwrap_err();
        assert!(matches!(err, SortError::UnknownColumn { .. }));
        assert_eq!(table.row_ids(), vec![0, 1, 2]);
        assert_eq!(engine.sort_state(&id), Some(&SortState::default()));
    }

    #[test]
    fn unregistered_table_is_an_error() {
        let mut table = people();
        let mut engine = SortEngine::default();
        let err = engine
            .activate_sort(&TableId::from("nope"), &mut table, "name")
            .unwrap_err();
        assert_eq!(err, SortError::UnknownTable("nope".to_string()));
        assert_eq!(table.row_ids(), vec![0, 1, 2]);
    }

    #[test]
    fn undeclared_descriptors_are_skipped() {
        let table = people();
        let mut engine = SortEngine::default();
        let id = TableId::from("people-table");
        let accepted = engine.register_sortable_table(
            id.clone(),
            &table,
            vec![
                ColumnDescriptor::new("name", ColumnType::Text),
                ColumnDescriptor::new("ghost", ColumnType::Number),
                ColumnDescriptor::new("name", ColumnType::Number),
            ],
        );
        assert_eq!(accepted, 1);
        assert_eq!(engine.columns(&id).map(|c| c.len()), Some(1));
    }

    #[test]
    fn reregistering_resets_state() {
        let mut table = people();
        let (mut engine, id) = registered(&table);
        engine.activate_sort(&id, &mut table, "name").unwrap();

        engine.register_sortable_table(id.clone(), &table, table.header_columns());
        assert_eq!(engine.sort_state(&id), Some(&SortState::default()));
    }

    #[test]
    fn tables_have_independent_state() {
        let mut first = people();
        let mut second = people();
        let mut engine = SortEngine::default();
        let a = TableId::from("a");
        let b = TableId::from("b");
        engine.register_sortable_table(a.clone(), &first, first.header_columns());
        engine.register_sortable_table(b.clone(), &second, second.header_columns());

        engine.activate_sort(&a, &mut first, "name").unwrap();
        engine.activate_sort(&a, &mut first, "name").unwrap();
        let state = engine.activate_sort(&b, &mut second, "name").unwrap();

        assert_eq!(state.order, SortOrder::Ascending);
        assert_eq!(engine.sort_state(&a).map(|s| s.order), Some(SortOrder::Descending));
    }

    #[test]
    fn missing_cells_sort_as_defaults() {
        let mut table = MemoryTable::new(
            vec![ColumnDescriptor::new("amount", ColumnType::Number)],
            vec![
                MemoryRow::new(0, [("amount", "5")]),
                MemoryRow::new(1, Vec::<(String, String)>::new()),
                MemoryRow::new(2, [("amount", "-1")]),
            ],
        );
        let (mut engine, id) = registered(&table);
        engine.activate_sort(&id, &mut table, "amount").unwrap();
        assert_eq!(table.row_ids(), vec![2, 1, 0]);
    }

    #[test]
    fn forget_table_drops_state() {
        let table = people();
        let (mut engine, id) = registered(&table);
        assert!(engine.forget_table(&id));
        assert!(!engine.is_registered(&id));
        assert!(!engine.forget_table(&id));
    }

    fn name_table(names: &[&str]) -> MemoryTable {
        MemoryTable::new(
            vec![ColumnDescriptor::new("name", ColumnType::Text)],
            names
                .iter()
                .enumerate()
                .map(|(i, n)| MemoryRow::new(i, [("name", *n)]))
                .collect(),
        )
    }

    #[test]
    fn collation_change_keeps_registrations() {
        let mut table = name_table(&["apple", "Banana"]);
        let (mut engine, id) = registered(&table);
        engine.activate_sort(&id, &mut table, "name").unwrap();
        assert_eq!(names(&table), vec!["apple", "Banana"]);

        engine.set_collation(TextCollation::Ordinal);
        assert!(engine.is_registered(&id));
        assert_eq!(engine.collation(), TextCollation::Ordinal);

        engine.activate_sort(&id, &mut table, "name").unwrap();
        let state = engine.activate_sort(&id, &mut table, "name").unwrap();
        assert_eq!(state.order, SortOrder::Ascending);
        assert_eq!(names(&table), vec!["Banana", "apple"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut table = name_table(&["Zoe", "Émile", "Eve"]);
        let (mut engine, id) = registered(&table);
        engine.activate_sort(&id, &mut table, "name").unwrap();
        assert_eq!(names(&table), vec!["Émile", "Eve", "Zoe"]);
    }

    #[test]
    fn negative_zero_ties_with_zero() {
        let mut table = MemoryTable::new(
            vec![ColumnDescriptor::new("amount", ColumnType::Number)],
            vec![
                MemoryRow::new(0, [("amount", "0")]),
                MemoryRow::new(1, [("amount", "-0")]),
                MemoryRow::new(2, [("amount", "")]),
            ],
        );
        let (mut engine, id) = registered(&table);
        engine.activate_sort(&id, &mut table, "amount").unwrap();
        assert_eq!(table.row_ids(), vec![0, 1, 2]);
    }

    fn amount_table(values: &[u8]) -> MemoryTable {
        MemoryTable::new(
            vec![ColumnDescriptor::new("amount", ColumnType::Number)],
            values
                .iter()
                .enumerate()
                .map(|(i, v)| MemoryRow::new(i, [("amount", format!("€{}", v))]))
                .collect(),
        )
    }

    proptest! {
        #[test]
        fn prop_sort_is_a_permutation(values in prop::collection::vec(0u8..20, 0..40)) {
            let mut table = amount_table(&values);
            let (mut engine, id) = registered(&table);
            engine.activate_sort(&id, &mut table, "amount").unwrap();

            let mut ids = table.row_ids();
            ids.sort();
            prop_assert_eq!(ids, (0..values.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_equal_keys_keep_relative_order(values in prop::collection::vec(0u8..5, 0..40)) {
            let mut table = amount_table(&values);
            let (mut engine, id) = registered(&table);

            for _ in 0..2 {
                let before = table.row_ids();
                engine.activate_sort(&id, &mut table, "amount").unwrap();
                let after = table.row_ids();
                let position = |ids: &[usize], row: usize| ids.iter().position(|&r| r == row);

                for a in 0..values.len() {
                    for b in 0..values.len() {
                        if a != b && values[a] == values[b]
                            && position(&before, a) < position(&before, b)
                        {
                            prop_assert!(position(&after, a) < position(&after, b));
                        }
                    }
                }
            }
        }

        #[test]
        fn prop_toggle_returns_to_ascending_order(values in prop::collection::vec(0u8..8, 0..40)) {
            let mut table = amount_table(&values);
            let (mut engine, id) = registered(&table);

            engine.activate_sort(&id, &mut table, "amount").unwrap();
            let ascending = table.row_ids();
            engine.activate_sort(&id, &mut table, "amount").unwrap();
            engine.activate_sort(&id, &mut table, "amount").unwrap();
            prop_assert_eq!(table.row_ids(), ascending);
        }

        #[test]
        fn prop_descending_reverses_distinct_keys(
            values in prop::collection::hash_set(0u8..100, 0..30)
        ) {
            let values: Vec<u8> = values.into_iter().collect();
            let mut table = amount_table(&values);
            let (mut engine, id) = registered(&table);

            engine.activate_sort(&id, &mut table, "amount").unwrap();
            let mut ascending = table.row_ids();
            engine.activate_sort(&id, &mut table, "amount").unwrap();
            ascending.reverse();
            prop_assert_eq!(table.row_ids(), ascending);
        }
    }
}
