use crate::config::AuditConfig;
use crate::human::human;
use crate::types::AuditSnapshot;
use colored::Colorize;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

const TOP_EXTENSIONS: usize = 20;

pub fn print_summary(snapshot: &AuditSnapshot, generated_at: &str) {
    println!(
        "Scanned: {}  |  Total: {}  |  Files: {}  |  Generated at: {}",
        snapshot.root.display(),
        human(snapshot.total_bytes).green(),
        snapshot.total_files.to_string().green(),
        generated_at
    );
}

#[must_use]
pub fn category_table(snapshot: &AuditSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Category", "Size", "Files"]);

    for (category, bytes) in &snapshot.category_bytes {
        let count = snapshot.bucket(*category).len();
        table.add_row(vec![
            Cell::new(category.as_str()),
            Cell::new(human(*bytes))
                .set_alignment(CellAlignment::Right)
                .fg(if *bytes > 0 { Color::Yellow } else { Color::White }),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }

    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(human(snapshot.total_bytes))
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
        Cell::new(snapshot.total_files)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);

    table
}

#[must_use]
pub fn largest_files_table(snapshot: &AuditSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Size", "Path"]);

    for file in &snapshot.largest_files {
        table.add_row(vec![
            Cell::new(human(file.size)).set_alignment(CellAlignment::Right),
            Cell::new(file.path.display()),
        ]);
    }

    table
}

/// Extensions from the large-extension hint list are highlighted.
#[must_use]
pub fn extensions_table(snapshot: &AuditSnapshot, config: &AuditConfig) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Size", "Extension"]);

    for ext in snapshot.by_extension.iter().take(TOP_EXTENSIONS) {
        let name = if ext.extension.is_empty() {
            "(no ext)"
        } else {
            ext.extension.as_str()
        };
        let name_cell = if config.is_large_extension(&ext.extension) {
            Cell::new(name).fg(Color::Cyan).add_attribute(Attribute::Bold)
        } else {
            Cell::new(name)
        };
        table.add_row(vec![
            Cell::new(human(ext.bytes)).set_alignment(CellAlignment::Right),
            name_cell,
        ]);
    }

    table
}

pub fn print_categories(snapshot: &AuditSnapshot) {
    println!("\n{}", "== Size by category ==".cyan());
    println!("{}", category_table(snapshot));
}

pub fn print_details(snapshot: &AuditSnapshot, config: &AuditConfig) {
    println!("\n{}", "== Top largest files ==".cyan());
    if snapshot.largest_files.is_empty() {
        println!("No files found.");
    } else {
        println!("{}", largest_files_table(snapshot));
    }

    println!("\n{}", "== Top extensions by space ==".cyan());
    if snapshot.by_extension.is_empty() {
        println!("No files found.");
    } else {
        println!("{}", extensions_table(snapshot, config));
    }
}
