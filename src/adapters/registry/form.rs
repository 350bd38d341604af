//! Form payload for one batch
//!
//! Field order: authentication fields, the group's shared fields, then seven
//! `services[idx][..]` fields per line item.

use crate::config::AuthField;
use crate::core::partition::Batch;
use crate::domain::Row;

/// Credit type sent with every line item
pub const TYPE_CREDIT: &str = "2";

/// Name of the per-item count field
///
/// Items billed by count (`tariffs_basis == "2"`) send `test_count`; every
/// other basis sends `time_execute`. The value is the row's `test_count` in
/// both cases.
pub fn count_field_name(tariffs_basis: &str) -> &'static str {
    if tariffs_basis == "2" {
        "test_count"
    } else {
        "time_execute"
    }
}

/// Builds the ordered form pairs for `batch`
pub fn build_form(auth: &[AuthField], batch: &Batch) -> Vec<(String, String)> {
    let mut form: Vec<(String, String)> = Vec::with_capacity(auth.len() + 6 + batch.len() * 7);

    form.extend(auth.iter().map(AuthField::form_pair));
    form.extend(
        batch
            .key
            .form_fields()
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    );

    for (idx, row) in batch.rows.iter().enumerate() {
        push_item(&mut form, idx, row);
    }

    form
}

fn push_item(form: &mut Vec<(String, String)>, idx: usize, row: &Row) {
    let mut field = |key: &str, value: &str| {
        form.push((format!("services[{idx}][{key}]"), value.to_string()));
    };

    field("test_code", &row.test_code);
    field(count_field_name(&row.tariffs_basis), &row.test_count);
    field("type_credit", TYPE_CREDIT);
    field("tariffs_basis", &row.tariffs_basis);
    field("price", &row.price);
    field("date", &row.date);
    field("discount", &row.discount);
}
