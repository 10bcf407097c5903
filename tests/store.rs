//! Store catalog and order history against a scripted backend.

mod support;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use pawsconnect::MemoryStore;
use pawsconnect::net::types::{OrderStatus, ProductCategory, User};
use pawsconnect::pages::orders::{OrdersPage, STAFF_ONLY};
use pawsconnect::pages::store::{CategoryCounts, StorePage};
use serde_json::json;

#[tokio::test]
async fn catalog_lists_products_that_name_their_store() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::GET,
        "/api/items/stores/",
        StatusCode::OK,
        json!({ "data": [
            { "id": "s1", "name": "Happy Paws", "owner": support::user_json("u9", "owner", false), "is_active": true },
            { "id": "s2", "name": "Bark Mart", "is_active": true }
        ], "success": true }),
    );
    mock.reply(
        Method::GET,
        "/api/items/products/",
        StatusCode::OK,
        json!({ "data": [
            support::product_json("x1", "Kibble", "Happy Paws", "food", "10"),
            support::product_json("x2", "Rope", "Happy Paws", "toy", "Out of Stock"),
            support::product_json("x3", "Leash", "Bark Mart", "accessory", "3"),
        ], "success": true }),
    );
    let api = support::client(&base, Arc::new(MemoryStore::new()));

    let mut page = StorePage::new();
    page.mount(&api).await;

    assert!(page.error.is_none());
    assert_eq!(page.visible().len(), 3);
    assert_eq!(page.category_counts(), CategoryCounts { all: 3, food: 1, toy: 1, accessory: 1 });
    assert_eq!(page.products[0].store.name, "Happy Paws");

    page.store_id = Some("s1".to_owned());
    page.tab = Some(ProductCategory::Toy);
    let visible = page.visible();
    assert_eq!(visible.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["x2"]);
    assert_eq!(visible[0].stock_quantity, "Out of Stock");
}

#[tokio::test]
async fn order_history_decodes_store_names_and_product_ids() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::GET,
        "/api/items/orders/",
        StatusCode::OK,
        json!({ "data": [
            {
                "id": "o1",
                "user": support::user_json("u1", "ada", false),
                "store": "Happy Paws",
                "products": ["x1", "x2"],
                "total_amount": "25.00",
                "status": "pending",
            },
            { "id": "o2", "store": "Bark Mart", "products": ["x3"], "total_amount": "12.50", "status": "delivered" }
        ], "success": true }),
    );
    let api = support::client(&base, Arc::new(MemoryStore::new()));

    let mut page = OrdersPage::new();
    page.mount(&api).await;

    assert!(page.error.is_none());
    assert_eq!(page.orders.len(), 2);
    assert_eq!(page.orders[0].store.name, "Happy Paws");
    assert_eq!(page.orders[0].products, vec!["x1", "x2"]);
    assert_eq!(page.open_count(), 1);
}

#[tokio::test]
async fn staff_status_change_replaces_the_row() {
    let (mock, base) = support::start().await;
    mock.reply(
        Method::PUT,
        "/api/items/orders/o1/status/",
        StatusCode::OK,
        json!({ "data": { "id": "o1", "store": "Happy Paws", "status": "shipped" }, "success": true }),
    );
    mock.reply(
        Method::PUT,
        "/api/items/orders/o2/status/",
        StatusCode::NOT_FOUND,
        json!({ "error": "Order not found" }),
    );
    let api = support::client(&base, Arc::new(MemoryStore::new()));
    let staff = User { id: "s1".to_owned(), is_staff: true, ..User::default() };

    let mut page = OrdersPage::new();
    assert_eq!(page.update_status(&api, Some(&staff), "o1", OrderStatus::Shipped).await, Ok("Order status updated successfully"));
    assert_eq!(page.orders[0].status, OrderStatus::Shipped);
    let sent = mock.hits_to(&Method::PUT, "/api/items/orders/o1/status/")[0].json();
    assert_eq!(sent, json!({ "status": "shipped" }));

    assert_eq!(
        page.update_status(&api, Some(&staff), "o2", OrderStatus::Cancelled).await,
        Err("Order not found".to_owned())
    );
    assert_eq!(page.orders.len(), 1);
}

#[tokio::test]
async fn non_staff_cannot_change_order_status() {
    let (mock, base) = support::start().await;
    let api = support::client(&base, Arc::new(MemoryStore::new()));
    let shopper = User { id: "u1".to_owned(), ..User::default() };

    let mut page = OrdersPage::new();
    assert_eq!(page.update_status(&api, Some(&shopper), "o1", OrderStatus::Shipped).await, Err(STAFF_ONLY.to_owned()));
    assert_eq!(page.update_status(&api, None, "o1", OrderStatus::Shipped).await, Err(STAFF_ONLY.to_owned()));
    assert!(mock.hits().is_empty());
}
