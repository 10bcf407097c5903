//! Online and manual donation flows against a scripted backend.

mod support;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use pawsconnect::forms::manual_donation::{ManualDonationForm, SUCCESS_MESSAGE};
use pawsconnect::forms::mock_payment::MockPaymentForm;
use pawsconnect::net::multipart::Attachment;
use pawsconnect::net::types::{DonationStatus, User};
use pawsconnect::pages::donations::{DonationScope, DonationsPage};
use pawsconnect::pages::pet_detail::{DonationOffer, PetDetailPage};
use pawsconnect::storage::MOCK_PAYMENT_KEY;
use pawsconnect::{KeyValueStore, MemoryStore};
use serde_json::json;

fn donor() -> User {
    User { id: "u2".to_owned(), username: "grace".to_owned(), ..User::default() }
}

fn fundraiser() -> serde_json::Value {
    json!({
        "data": {
            "id": "p1",
            "type": "donation",
            "title": "Help Bella",
            "donation_goal": "500.00",
            "current_amount": "450.00",
            "donations_enabled": true,
            "status": "active",
        }
    })
}

fn receipt() -> Attachment {
    Attachment::new("receipt.png", "image/png", vec![0x89, b'P', b'N', b'G'])
}

#[tokio::test]
async fn donation_beyond_goal_is_rejected_before_any_payment_step() {
    let (mock, base) = support::start().await;
    mock.reply(Method::GET, "/api/posts/p1/", StatusCode::OK, fundraiser());
    let store = Arc::new(MemoryStore::new());
    let api = support::client(&base, store.clone());

    let mut page = PetDetailPage::new("p1");
    page.mount(&api).await;
    assert_eq!(page.offer(Some(&donor())), DonationOffer::Available);
    assert_eq!(page.funded_label().as_deref(), Some("90% funded"));
    let requests_after_mount = mock.hits().len();

    let mut form = page.donation_form(Some(&donor())).unwrap();
    form.amount = "100".to_owned();
    assert_eq!(
        form.submit(store.as_ref()),
        Err("Donation amount exceeds the goal. Maximum remaining: $50".to_owned())
    );
    assert!(store.get(MOCK_PAYMENT_KEY).is_none());
    assert_eq!(mock.hits().len(), requests_after_mount);
}

#[tokio::test]
async fn online_donation_hands_intent_to_mock_payment_and_records_it() {
    let (mock, base) = support::start().await;
    mock.reply(Method::GET, "/api/posts/p1/", StatusCode::OK, fundraiser());
    mock.reply(
        Method::POST,
        "/api/donations/create/",
        StatusCode::CREATED,
        json!({ "data": { "id": "d9", "amount": "50.00", "status": "verified", "reference_id": "DEMO-1" } }),
    );
    let store = Arc::new(MemoryStore::new());
    let api = support::client(&base, store.clone());
    let mut page = PetDetailPage::new("p1");
    page.mount(&api).await;

    let mut form = page.donation_form(Some(&donor())).unwrap();
    form.amount = "50".to_owned();
    form.message = "Get well".to_owned();
    let intent = form.submit(store.as_ref()).unwrap();
    assert_eq!(intent.pet_name, "Help Bella");

    let mut payment = MockPaymentForm::load(store.as_ref()).unwrap();
    assert_eq!(payment.submit(&api).await, Err("Please fill in all card details".to_owned()));
    assert!(mock.hits_to(&Method::POST, "/api/donations/create/").is_empty());

    payment.set_card_number("4242424242424242");
    payment.set_expiry_date("1230");
    payment.cvv = "123".to_owned();
    payment.cardholder_name = "Grace Hopper".to_owned();
    let donation = payment.submit(&api).await.unwrap();

    assert_eq!(donation.id, "d9");
    assert!(payment.is_success);
    assert!(store.get(MOCK_PAYMENT_KEY).is_none());
    let sent = mock.hits_to(&Method::POST, "/api/donations/create/")[0].json();
    assert_eq!(sent["post_id"], "p1");
    assert_eq!(sent["amount"], 50.0);
    assert_eq!(sent["payment_method"], "credit_card");
    assert_eq!(sent["message"], "Get well");
}

#[tokio::test]
async fn manual_donation_without_receipt_sends_nothing() {
    let (mock, base) = support::start().await;
    let api = support::client(&base, Arc::new(MemoryStore::new()));

    let mut form = ManualDonationForm { amount: "25".to_owned(), ..ManualDonationForm::new("p1") };
    assert_eq!(form.submit(&api).await, Err("Please upload a receipt image".to_owned()));
    assert!(mock.hits().is_empty());
}

#[tokio::test]
async fn manual_donation_uploads_receipt_as_multipart() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::POST,
        "/api/donations/create-manual/",
        StatusCode::CREATED,
        json!({ "data": support::donation_json("d3", "25.00", "pending") }),
    );
    let api = support::client(&base, Arc::new(MemoryStore::new()));

    let mut form = ManualDonationForm { amount: "25".to_owned(), ..ManualDonationForm::new("p1") };
    form.select_receipt(receipt()).unwrap();
    let donation = form.submit(&api).await.unwrap();

    assert_eq!(donation.status, DonationStatus::Pending);
    assert_eq!(form.success.as_deref(), Some(SUCCESS_MESSAGE));
    assert!(form.receipt.is_none());
    let hit = &mock.hits_to(&Method::POST, "/api/donations/create-manual/")[0];
    assert!(hit.content_type.as_deref().is_some_and(|ct| ct.starts_with("multipart/form-data")));
    assert!(hit.body.contains("name=\"post_id\""));
    assert!(hit.body.contains("name=\"amount\""));
    assert!(hit.body.contains("name=\"receipt_image\"; filename=\"receipt.png\""));
}

#[tokio::test]
async fn scoped_history_reads_the_matching_endpoint() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::GET,
        "/api/donations/user/",
        StatusCode::OK,
        json!({ "data": [support::donation_json("d1", "10.00", "verified")], "total": 1, "success": true }),
    );
    mock.reply(
        Method::GET,
        "/api/donations/post/p1/",
        StatusCode::OK,
        json!({
            "data": [support::donation_json("d2", "20.00", "verified"), support::donation_json("d3", "5.50", "verified")],
            "total_amount": 25.5,
            "total_donations": 2,
            "success": true
        }),
    );
    let api = support::client(&base, Arc::new(MemoryStore::new()));

    let mut mine = DonationsPage::scoped(DonationScope::Mine);
    mine.mount(&api).await;
    assert_eq!(mine.donations.len(), 1);

    let mut for_post = DonationsPage::scoped(DonationScope::Post("p1".to_owned()));
    for_post.mount(&api).await;
    assert_eq!(for_post.donations.len(), 2);
    assert!((for_post.total_amount() - 25.5).abs() < f64::EPSILON);

    assert!(mock.hits_to(&Method::GET, "/api/donations/").is_empty());
}
