use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use trac_output::OverflowRecord;

use crate::types::{ExportResult, PushResult};

pub fn print_export_summary(result: &ExportResult) {
    println!("Source: {}", result.source.display());
    println!("Output prefix: {}", result.prefix.display());
    if result.skipped > 0 {
        println!("Skipped tickets: {}", result.skipped);
    }
    let summary = &result.summary;
    if summary.batches.is_empty() {
        println!("No tickets exported ({} in source).", result.tickets);
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Batch"),
        header_cell("Records"),
        header_cell("Oversized"),
    ]);
    apply_result_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for batch in &summary.batches {
        let oversized = summary
            .overflow
            .iter()
            .filter(|record| record.batch == batch.path)
            .count();
        table.add_row(vec![
            Cell::new(batch.path.display()),
            Cell::new(batch.records),
            count_cell(oversized, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total_records()).add_attribute(Attribute::Bold),
        count_cell(summary.overflow.len(), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if let Some(path) = &summary.overflow_path {
        println!("Oversized descriptions copied to {}", path.display());
        print_overflow_table(&summary.overflow);
    }
}

fn print_overflow_table(records: &[OverflowRecord]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Ticket"),
        header_cell("Description bytes"),
        header_cell("Batch"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for record in records {
        table.add_row(vec![
            Cell::new(record.id),
            Cell::new(record.bytes).fg(Color::Yellow),
            dim_cell(record.batch.display()),
        ]);
    }
    println!("{table}");
}

pub fn print_push_summary(result: &PushResult) {
    println!("Source: {}", result.source.display());
    println!("Project: {}", result.project_id);
    if result.dry_run {
        println!("Dry run: no requests were sent");
    }

    let outcome = &result.outcome;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Requestor"),
        header_cell(if result.dry_run { "Built" } else { "Submitted" }),
        header_cell("Failed"),
    ]);
    apply_result_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let requestor = match result.requestor.as_resolved() {
        Some(name) => Cell::new(name),
        None => dim_cell("(unresolved)"),
    };
    table.add_row(vec![
        requestor,
        Cell::new(outcome.submitted).fg(Color::Green),
        count_cell(outcome.failed.len(), Color::Red),
    ]);
    println!("{table}");

    if outcome.failed.is_empty() {
        return;
    }
    let mut failures = Table::new();
    failures.set_header(vec![header_cell("Ticket"), header_cell("Error")]);
    apply_table_style(&mut failures);
    align_column(&mut failures, 0, CellAlignment::Right);
    for failure in &outcome.failed {
        failures.add_row(vec![
            Cell::new(failure.id),
            Cell::new(&failure.error).fg(Color::Red),
        ]);
    }
    println!("{failures}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_result_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
