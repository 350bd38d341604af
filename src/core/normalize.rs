//! Row normalization
//!
//! Cleans the numeric and mobile columns and numbers the rows that survive the
//! starting-row cut. Malformed values degrade to `"0"` or `""`, never to an error.

use crate::domain::Row;
use regex::Regex;
use std::sync::LazyLock;

/// First spreadsheet row that holds data; row 1 is the header
const FIRST_DATA_ROW: u64 = 2;

/// Iranian mobile number: `09` followed by nine digits
static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"09[0-9]{9}").expect("mobile pattern is valid"));

/// Keeps only ASCII digits, falling back to `"0"` when none are left
pub fn digits_only(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        "0".to_string()
    } else {
        digits
    }
}

/// Returns the first `09` + 9 digit run, or an empty string
pub fn first_mobile(value: &str) -> String {
    MOBILE
        .find(value)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Normalizes the cleaned columns of a single row in place
pub fn normalize_row(row: &mut Row) {
    row.price = digits_only(&row.price);
    row.discount = digits_only(&row.discount);
    row.test_count = digits_only(&row.test_count);
    row.test_code = digits_only(&row.test_code);
    row.mobile = first_mobile(&row.mobile);
}

/// Drops rows above `start_row`, numbers the rest and normalizes them
///
/// `start_row` is a spreadsheet row number with the header on row 1, so the
/// Nth retained record (0-based) gets id `start_row + N`.
pub fn prepare_rows(rows: Vec<Row>, start_row: u64) -> Vec<Row> {
    let skip = usize::try_from(start_row.saturating_sub(FIRST_DATA_ROW)).unwrap_or(usize::MAX);

    let prepared: Vec<Row> = rows
        .into_iter()
        .skip(skip)
        .zip(start_row..)
        .map(|(mut row, row_id)| {
            row.row_id = row_id;
            normalize_row(&mut row);
            row
        })
        .collect();

    tracing::debug!(
        skipped = skip,
        retained = prepared.len(),
        start_row = start_row,
        "Rows prepared"
    );

    prepared
}
