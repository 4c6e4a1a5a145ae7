use crate::records::DonationRecord;

/// Shown in place of the table while nothing has been ingested yet
const EMPTY_STATE: &str = "No donations loaded.";

/// Turn a CSV column key into a presentable column heading
///
/// Takes the segment after the first underscore, or the whole key when
/// there is none, then capitalizes it; segments of one or two characters
/// are uppercased whole: `donation_amount` becomes `Amount`, `tx_id`
/// becomes `ID`
pub fn pretty_heading(key: &str) -> String {
    let segment = key.split('_').nth(1).unwrap_or(key);

    if segment.len() > 2 {
        let mut chars = segment.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    } else {
        segment.to_uppercase()
    }
}

/// Render the accumulated donations as a column aligned text table
///
/// Headings are the prettified column keys; records stay in ingestion
/// order. With `hide_anonymous` set, donations without a donor name are
/// left out of the body (the headings stay). With no records at all the
/// empty state text is returned instead of a table
pub fn render(keys: &[String], records: &[DonationRecord], hide_anonymous: bool) -> String {
    if records.is_empty() {
        return EMPTY_STATE.to_string();
    }

    let visible: Vec<&DonationRecord> = records
        .iter()
        .filter(|record| !hide_anonymous || !record.is_anonymous())
        .collect();

    let headings: Vec<String> = keys.iter().map(|key| pretty_heading(key)).collect();

    // each column is as wide as its heading or its widest visible value
    let mut widths: Vec<usize> = headings.iter().map(String::len).collect();
    for record in &visible {
        for (i, key) in keys.iter().enumerate() {
            widths[i] = widths[i].max(record.get(key).unwrap_or("").len());
        }
    }

    let heading_cells: Vec<&str> = headings.iter().map(String::as_str).collect();
    let mut lines = Vec::with_capacity(visible.len() + 1);
    lines.push(format_row(&heading_cells, &widths));
    for record in &visible {
        let cells: Vec<&str> = keys.iter().map(|key| record.get(key).unwrap_or("")).collect();
        lines.push(format_row(&cells, &widths));
    }

    lines.join("\n")
}

// cells left aligned and two spaces apart; the last one is not padded
fn format_row(cells: &[&str], widths: &[usize]) -> String {
    let mut row = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            row.push_str("  ");
        }
        if i + 1 < cells.len() {
            row.push_str(&format!("{:<width$}", cell, width = widths[i]));
        } else {
            row.push_str(cell);
        }
    }
    row
}
