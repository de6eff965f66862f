/// Shared parsing helpers for pipe-delimited tables, the serialized form in
/// which tabular PDF content reaches the extractors.

/// Splits a `| a | b | c |` line into trimmed, lowercase-insensitive cells.
pub(super) fn split_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

pub(super) fn is_table_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Markdown separator rows (`| --- | --- |`) carry no data.
pub(super) fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty()
        && cells
            .iter()
            .all(|c| c.is_empty() || c.chars().all(|ch| ch == '-' || ch == ':'))
}

/// Index of the first header cell containing any of the given keywords,
/// case-insensitive.
pub(super) fn find_column(header: &[String], keywords: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let lowered = cell.to_lowercase();
        keywords.iter().any(|k| lowered.contains(k))
    })
}

/// Parses a numeric cell, tolerating thousands separators and currency
/// prefixes. Empty or non-numeric cells yield None.
pub(super) fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

pub(super) fn cell(cells: &[String], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| cells.get(i))
        .map(|s| s.as_str())
        .filter(|s| !s.is_empty())
}
