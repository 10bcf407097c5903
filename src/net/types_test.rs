use super::*;
use serde_json::json;

#[test]
fn post_decodes_string_money_and_nested_user() {
    let post: Post = serde_json::from_value(json!({
        "id": "p1",
        "user": { "id": "u1", "username": "alice", "is_staff": false },
        "type": "donation",
        "title": "Help Rocky",
        "pet_age": "3",
        "pet_size": "medium",
        "donation_goal": "2500.00",
        "current_amount": 400,
        "status": "active",
        "donations_enabled": true,
        "images": [{ "id": "i1", "image_url": "posts/rocky.jpg" }]
    }))
    .unwrap();

    assert_eq!(post.post_type, PostType::Donation);
    assert_eq!(post.user.username, "alice");
    assert_eq!(post.pet_age, Some(3));
    assert_eq!(post.pet_size, Some(PetSize::Medium));
    assert_eq!(post.donation_goal, Some(2500.0));
    assert!((post.current_amount - 400.0).abs() < f64::EPSILON);
    assert_eq!(post.remaining_goal(), Some(2100.0));
    assert_eq!(post.cover_image(), Some("posts/rocky.jpg"));
}

#[test]
fn post_tolerates_missing_and_blank_fields() {
    let post: Post = serde_json::from_value(json!({
        "id": "p2",
        "title": "Luna",
        "pet_size": "",
        "donation_goal": null,
        "current_amount": "not-a-number"
    }))
    .unwrap();

    assert_eq!(post.post_type, PostType::Adoption);
    assert_eq!(post.pet_size, None);
    assert_eq!(post.donation_goal, None);
    assert!(post.current_amount.abs() < f64::EPSILON);
    assert!(post.images.is_empty());
}

#[test]
fn donation_decodes_status_and_receipt() {
    let donation: Donation = serde_json::from_value(json!({
        "id": "d1",
        "post": { "id": "p1", "title": "Help Rocky" },
        "donor": { "id": "u2", "first_name": "Bob" },
        "amount": "50.00",
        "status": "pending",
        "receipt_image": "receipts/r1.png",
        "is_manual": true
    }))
    .unwrap();

    assert_eq!(donation.status, DonationStatus::Pending);
    assert!((donation.amount - 50.0).abs() < f64::EPSILON);
    assert_eq!(donation.post.title, "Help Rocky");
    assert!(donation.is_manual);
}

#[test]
fn product_stock_quantity_accepts_numbers() {
    let product: Product = serde_json::from_value(json!({
        "id": "pr1",
        "name": "Chew toy",
        "category": "toy",
        "price": 4.5,
        "stock_quantity": 12
    }))
    .unwrap();
    assert_eq!(product.stock_quantity, "12");
    assert_eq!(product.category, ProductCategory::Toy);
}

#[test]
fn wire_enums_round_trip_through_str() {
    for status in DonationStatus::ALL {
        assert_eq!(status.as_str().parse::<DonationStatus>(), Ok(*status));
    }
    assert!("archived".parse::<DonationStatus>().is_err());
    assert_eq!(PostType::Donation.to_string(), "donation");
}

#[test]
fn display_name_prefers_full_name() {
    let user = User {
        username: "bob99".to_owned(),
        first_name: Some("Bob".to_owned()),
        last_name: Some(" ".to_owned()),
        ..User::default()
    };
    assert_eq!(user.display_name(), "Bob");

    let anonymous = User { username: "ghost".to_owned(), ..User::default() };
    assert_eq!(anonymous.display_name(), "ghost");
}

#[test]
fn review_request_serializes_lowercase_action() {
    let body = serde_json::to_value(ReviewRequest { action: ReviewAction::Approve, admin_notes: None }).unwrap();
    assert_eq!(body, json!({ "action": "approve" }));
}

#[test]
fn profile_update_omits_unset_fields() {
    let body = serde_json::to_value(ProfileUpdate { bio: Some("hi".to_owned()), ..ProfileUpdate::default() }).unwrap();
    assert_eq!(body, json!({ "bio": "hi" }));
}

#[test]
fn product_accepts_store_as_bare_name() {
    let products: Vec<Product> = serde_json::from_value(json!([
        {
            "id": "x1",
            "store": "Happy Paws",
            "name": "Kibble",
            "category": "food",
            "price": "12.50",
            "stock_quantity": "10",
            "is_active": true
        },
        { "id": "x2", "store": { "id": "s1", "name": "Bark Mart" }, "name": "Leash" },
        { "id": "x3", "store": null, "name": "Ball" }
    ]))
    .unwrap();

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].store.name, "Happy Paws");
    assert!(products[0].store.id.is_empty());
    assert!((products[0].price - 12.5).abs() < f64::EPSILON);
    assert_eq!(products[1].store.id, "s1");
    assert_eq!(products[2].store, Store::default());
}

#[test]
fn order_reads_store_label_and_product_ids() {
    let order: Order = serde_json::from_value(json!({
        "id": "o1",
        "user": { "id": "u1", "username": "ada" },
        "store": "Happy Paws",
        "products": ["x1", { "id": "x2", "name": "Leash" }, 7, true],
        "total_amount": "31.00",
        "status": "shipped"
    }))
    .unwrap();

    assert_eq!(order.store.name, "Happy Paws");
    assert_eq!(order.products, vec!["x1", "x2", "7"]);
    assert_eq!(order.status, OrderStatus::Shipped);
    assert!((order.total_amount - 31.0).abs() < f64::EPSILON);
}
