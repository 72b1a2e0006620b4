use crate::config::ViewConfig;
use crate::table::EntryTable;
use crate::types::Column;
use comfy_table::{Attribute, Cell, CellAlignment, ColumnConstraint, Row, Table, Width};

/// Header label for `column`, with an arrow on the column the rows are
/// currently sorted by.
#[must_use]
pub fn header_label(table: &EntryTable, column: Column) -> String {
    if table.last_sorted() == Some(column) {
        // The stored flag is the direction of the *next* sort
        let applied = table.direction(column).flipped();
        format!("{} {}", column.label(), applied.arrow())
    } else {
        column.label().to_string()
    }
}

pub fn build_table(entries: &EntryTable, config: &ViewConfig, styled: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    if !styled {
        table.force_no_tty();
    }

    table.set_header(
        Column::ALL
            .iter()
            .map(|c| {
                Cell::new(header_label(entries, *c))
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Left)
            })
            .collect::<Vec<_>>(),
    );

    // One line per entry; long fields are cut instead of wrapped
    for entry in entries.rows() {
        let mut row = Row::from(vec![
            Cell::new(entry.date()),
            Cell::new(entry.kind()),
            Cell::new(entry.version()),
        ]);
        row.max_height(1);
        table.add_row(row);
    }

    table.set_constraints(
        Column::ALL
            .iter()
            .map(|c| ColumnConstraint::Absolute(Width::Fixed(config.width(*c))))
            .collect::<Vec<_>>(),
    );
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Left);
    }

    table
}

#[must_use]
pub fn render_table(entries: &EntryTable, config: &ViewConfig, styled: bool) -> String {
    build_table(entries, config, styled).to_string()
}
