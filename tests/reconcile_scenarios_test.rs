//! Integration tests for the batch → response → outcome path
//!
//! These drive the public pipeline pieces the way the coordinator does:
//! prepare rows, partition them, then reconcile canned API responses.

use svcreg::adapters::registry::build_form;
use svcreg::core::normalize::{digits_only, first_mobile, prepare_rows};
use svcreg::core::partition::{partition, Batch};
use svcreg::core::reconcile::{reconcile, transport_failure};
use svcreg::domain::outcome::{KIND_API, KIND_HTTP, KIND_JSON, NO_MATCH_RESULT};
use svcreg::domain::{Outcome, Row, TransportFailure};
use test_case::test_case;

fn raw_row(national_code: &str, test_code: &str) -> Row {
    Row {
        name: "Sara Ahmadi".to_string(),
        kind: "1".to_string(),
        national_code: national_code.to_string(),
        mobile: "0912-123-4567 / 09351112233".to_string(),
        price: "120,000".to_string(),
        test_count: "1".to_string(),
        date: "1402/05/01".to_string(),
        discount: "0".to_string(),
        test_code: test_code.to_string(),
        tariffs_basis: "1".to_string(),
        ..Default::default()
    }
}

fn single_batch(size: usize) -> Batch {
    let rows = (0..size)
        .map(|i| raw_row("0012345678", &format!("{}", 100 + i)))
        .collect();
    let mut batches = partition(&prepare_rows(rows, 2), size);
    assert_eq!(batches.len(), 1);
    batches.remove(0)
}

#[test]
fn test_group_of_five_splits_two_two_one() {
    let rows: Vec<Row> = (0..5).map(|i| raw_row("0012345678", &i.to_string())).collect();
    let batches = partition(&prepare_rows(rows, 2), 2);

    let sizes: Vec<usize> = batches.iter().map(Batch::len).collect();
    assert_eq!(sizes, vec![2, 2, 1]);

    let ids: Vec<u64> = batches
        .iter()
        .flat_map(|b| b.rows.iter().map(|r| r.row_id))
        .collect();
    assert_eq!(ids, vec![2, 3, 4, 5, 6]);
}

#[test]
fn test_mixed_item_results() {
    let batch = single_batch(2);
    let outcomes = reconcile(
        &batch,
        r#"{"error":0,"result":[{"error":0,"data":"SVC1"},{"error":1,"type":"dup","msg":"exists"}]}"#,
    );

    assert_eq!(
        outcomes,
        vec![Outcome::success(2, "SVC1"), Outcome::error(3, "dup", "exists")]
    );
}

#[test]
fn test_root_error_applies_to_every_row() {
    let batch = single_batch(3);
    let outcomes = reconcile(&batch, r#"{"error":1,"type":"auth","msg":"bad credentials"}"#);

    assert_eq!(
        outcomes,
        vec![
            Outcome::error(2, "auth", "bad credentials"),
            Outcome::error(3, "auth", "bad credentials"),
            Outcome::error(4, "auth", "bad credentials"),
        ]
    );
}

#[test]
fn test_short_result_list_marks_missing_rows() {
    let batch = single_batch(2);
    let outcomes = reconcile(&batch, r#"{"error":0,"result":[{"error":0,"data":"X"}]}"#);

    assert_eq!(
        outcomes,
        vec![
            Outcome::success(2, "X"),
            Outcome::error(3, KIND_API, NO_MATCH_RESULT)
        ]
    );
}

#[test]
fn test_wrapped_response_is_unwrapped() {
    let batch = single_batch(2);
    let outcomes = reconcile(
        &batch,
        r#"{"error":0,"response":{"result":[{"error":0,"data":"A"},{"error":0,"data":"B"}]}}"#,
    );

    assert_eq!(
        outcomes,
        vec![Outcome::success(2, "A"), Outcome::success(3, "B")]
    );
}

#[test_case("<html>502 Bad Gateway</html>" ; "html error page")]
#[test_case("" ; "empty body")]
fn test_unparseable_body_marks_every_row(body: &str) {
    let batch = single_batch(2);
    let outcomes = reconcile(&batch, body);

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        match outcome {
            Outcome::Error(e) => assert_eq!(e.error_kind, KIND_JSON),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }
}

#[test]
fn test_transport_failure_marks_every_row() {
    let batch = single_batch(3);
    let failure = TransportFailure::new(6, "connection refused");
    let outcomes = transport_failure(&batch, &failure);

    assert_eq!(outcomes.len(), 3);
    for (outcome, expected_id) in outcomes.iter().zip(2u64..) {
        match outcome {
            Outcome::Error(e) => {
                assert_eq!(e.row_id, expected_id);
                assert_eq!(e.error_kind, KIND_HTTP);
                assert!(e.message.contains("6 attempt(s)"));
                assert!(e.message.contains("connection refused"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }
}

#[test]
fn test_reconcile_is_repeatable() {
    let batch = single_batch(2);
    let body = r#"{"error":0,"result":[{"error":3,"type":"limit","msg":"quota"}]}"#;
    assert_eq!(reconcile(&batch, body), reconcile(&batch, body));
}

#[test]
fn test_time_execute_carries_test_count() {
    let mut row = raw_row("0012345678", "101");
    row.test_count = "30".to_string();
    let batch = single_batch_from(vec![row]);

    let form = build_form(&[], &batch);

    assert!(form.contains(&("services[0][time_execute]".to_string(), "30".to_string())));
    assert!(!form.iter().any(|(k, _)| k == "services[0][test_count]"));
}

#[test]
fn test_prepared_rows_are_normalized() {
    let batch = single_batch(1);
    let row = &batch.rows[0];

    assert_eq!(row.price, "120000");
    assert_eq!(row.mobile, "09351112233");
    assert_eq!(row.discount, "0");
    assert_eq!(row.date, "1402/05/01");
}

#[test_case("12a3" => "123" ; "letters dropped")]
#[test_case("n/a" => "0" ; "no digits")]
#[test_case("" => "0" ; "empty")]
fn test_digits_only_cases(input: &str) -> String {
    digits_only(input)
}

#[test_case("call 09121234567 or 09351112233" => "09121234567" ; "first of two")]
#[test_case("0912123456" => "" ; "too short")]
fn test_first_mobile_cases(input: &str) -> String {
    first_mobile(input)
}

fn single_batch_from(rows: Vec<Row>) -> Batch {
    let mut batches = partition(&prepare_rows(rows, 2), 10);
    batches.remove(0)
}
