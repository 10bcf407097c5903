use super::*;
use crate::storage::MemoryStore;

fn form(goal: Option<f64>, current: f64, amount: &str) -> DonationForm {
    DonationForm {
        post_id: "p1".to_owned(),
        post_title: "Help Rocky".to_owned(),
        donation_goal: goal,
        current_amount: current,
        user_id: "u1".to_owned(),
        amount: amount.to_owned(),
        ..DonationForm::default()
    }
}

#[test]
fn empty_amount_is_required_field_error() {
    assert_eq!(form(Some(100.0), 0.0, "").validate(), Err("Please fill in all required fields".to_owned()));
}

#[test]
fn non_positive_or_garbage_amount_is_invalid() {
    for raw in ["0", "-5", "abc", " "] {
        assert_eq!(form(Some(100.0), 0.0, raw).validate(), Err("Please enter a valid amount".to_owned()), "{raw}");
    }
}

#[test]
fn amount_over_remaining_goal_is_rejected() {
    assert_eq!(
        form(Some(2500.0), 2400.0, "150").validate(),
        Err("Donation amount exceeds the goal. Maximum remaining: $100".to_owned())
    );
    assert_eq!(
        form(Some(100.0), 99.5, "1").validate(),
        Err("Donation amount exceeds the goal. Maximum remaining: $0.5".to_owned())
    );
}

#[test]
fn exact_remaining_amount_is_accepted() {
    let intent = form(Some(2500.0), 2400.0, "100").validate().unwrap();
    assert!((intent.amount - 100.0).abs() < f64::EPSILON);
    assert_eq!(intent.pet_id, "p1");
    assert_eq!(intent.pet_name, "Help Rocky");
}

#[test]
fn no_goal_means_no_ceiling() {
    assert!(form(None, 0.0, "100000").validate().is_ok());
    assert!(form(Some(0.0), 0.0, "100000").validate().is_ok());
}

#[test]
fn remaining_progress_and_suggestion() {
    let f = form(Some(200.0), 170.0, "");
    assert!((f.remaining_amount() - 30.0).abs() < f64::EPSILON);
    assert!((f.suggested_amount() - 30.0).abs() < f64::EPSILON);
    assert!((f.progress_percent() - 85.0).abs() < 1e-9);

    let big = form(Some(1000.0), 0.0, "");
    assert!((big.suggested_amount() - 50.0).abs() < f64::EPSILON);

    let over = form(Some(100.0), 150.0, "");
    assert!((over.progress_percent() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn submit_stores_intent_under_mock_payment_key() {
    let store = MemoryStore::new();
    let mut f = form(Some(500.0), 0.0, "25");
    f.message = "Good luck".to_owned();

    let intent = f.submit(&store).unwrap();
    assert_eq!(f.error, None);

    let stored: serde_json::Value = storage::load_json(&store, MOCK_PAYMENT_KEY).unwrap();
    assert_eq!(stored["petId"], "p1");
    assert_eq!(stored["petName"], "Help Rocky");
    assert_eq!(stored["userId"], "u1");
    assert_eq!(stored["message"], "Good luck");
    assert_eq!(stored["amount"], 25.0);
    assert_eq!(storage::load_json::<PaymentIntent>(&store, MOCK_PAYMENT_KEY), Some(intent));
}

#[test]
fn failed_submit_records_error_and_stores_nothing() {
    let store = MemoryStore::new();
    let mut f = form(Some(10.0), 0.0, "20");
    assert!(f.submit(&store).is_err());
    assert!(f.error.as_deref().is_some_and(|e| e.starts_with("Donation amount exceeds the goal")));
    assert_eq!(store.get(MOCK_PAYMENT_KEY), None);
}
