use colored::Colorize;
use domain::session::QueryRecord;
use domain::table::ResultTable;
use shared::utils::truncate_preview;

const PREVIEW_CHARS: usize = 40;

pub fn print_sql(sql: &str) {
    println!("{}", sql.cyan());
}

pub fn print_result_table(table: &ResultTable) {
    print!("{}", format_table(table));
}

/// Plain ASCII table with `+---+` rules and a row-count trailer. Returned as a
/// string so history can prove the stored snapshot matches what was shown.
pub fn format_table(table: &ResultTable) -> String {
    let mut widths: Vec<usize> = table.columns.iter().map(|c| display_width(c)).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(display_width(cell));
            }
        }
    }

    let rule = table_rule(&widths);
    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format_row(&table.columns, &widths));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &table.rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("({} rows)\n", table.row_count()));
    out
}

pub fn print_history_list(records: &[QueryRecord]) {
    println!("{}", "Query History".bold());
    // Most recent first, labeled with insertion numbers counting down.
    for (offset, record) in records.iter().rev().enumerate() {
        let number = records.len() - offset;
        println!(
            "  {} {}",
            format!("[{number}]").blue(),
            truncate_preview(&record.question, PREVIEW_CHARS)
        );
    }
    println!("{}", "Use 'history <n>' to expand an entry.".dimmed());
}

pub fn print_history_entry(number: usize, record: &QueryRecord) {
    println!("{}", format!("Entry {number}").bold());
    println!("{} {}", "Question:".green(), record.question);
    println!("{}", "SQL:".green());
    print_sql(&record.sql);
    println!("{}", "Result:".green());
    print_result_table(&record.result);
}

fn table_rule(widths: &[usize]) -> String {
    let mut out = String::from("+");
    for width in widths {
        out.push_str(&"-".repeat(*width + 2));
        out.push('+');
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let raw = cells.get(i).cloned().unwrap_or_default();
        let cell = raw.replace('\n', "\\n");
        let cell_width = display_width(&cell);
        line.push(' ');
        line.push_str(&cell);
        if *width > cell_width {
            line.push_str(&" ".repeat(*width - cell_width));
        }
        line.push(' ');
        line.push('|');
    }
    line
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}
