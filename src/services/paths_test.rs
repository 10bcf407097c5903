use super::*;
use crate::net::types::{PetSize, PostType};
use serde_json::json;

#[test]
fn post_paths() {
    assert_eq!(posts::post_path("7"), "/posts/7/");
    assert_eq!(posts::edit_path("7"), "/posts/7/edit/");
    assert_eq!(posts::update_path("7"), "/posts/7/update/");
    assert_eq!(posts::updates_path("7"), "/posts/7/updates/");
    assert_eq!(posts::delete_path("7"), "/posts/7/delete/");
    assert_eq!(comments::list_path("7"), "/posts/7/comments/");
    assert_eq!(comments::create_path("7"), "/posts/7/comment/");
    assert_eq!(comments::delete_path("c1"), "/posts/comments/c1/delete/");
    assert_eq!(bookmarks::toggle_path("7"), "/posts/7/bookmark/");
}

#[test]
fn donation_and_commerce_paths() {
    assert_eq!(donations::for_post_path("p"), "/donations/post/p/");
    assert_eq!(donations::review_path("d"), "/donations/d/review/");
    assert_eq!(products::create_path("s"), "/items/stores/s/products/create/");
    assert_eq!(orders::status_path("o"), "/items/orders/o/status/");
    assert_eq!(items::claim_path("i"), "/items/i/claim/");
}

#[test]
fn admin_and_badge_paths() {
    assert_eq!(admin::user_path("u"), "/users/admin/users/u/");
    assert_eq!(admin::toggle_user_path("u"), "/users/admin/users/u/toggle-status/");
    assert_eq!(admin::post_path("p"), "/users/admin/posts/p/");
    assert_eq!(admin::comment_path("c"), "/users/admin/comments/c/");
    assert_eq!(badges::user_badges_path("u"), "/badges/user/u/");
}

#[test]
fn post_query_emits_only_set_filters() {
    let query = posts::PostQuery {
        post_type: Some(PostType::Donation),
        pet_size: Some(PetSize::Large),
        search: Some("rocky".to_owned()),
        ..posts::PostQuery::default()
    };
    assert_eq!(
        query.to_pairs(),
        vec![("type", "donation".to_owned()), ("pet_size", "large".to_owned()), ("search", "rocky".to_owned())]
    );
    assert!(posts::PostQuery::default().to_pairs().is_empty());
}

#[test]
fn donation_query_includes_post_id() {
    let query = donations::DonationQuery { limit: Some(5), post_id: Some("p1".to_owned()), ..Default::default() };
    assert_eq!(query.to_pairs(), vec![("limit", "5".to_owned()), ("post_id", "p1".to_owned())]);
}

#[test]
fn page_from_body_reads_envelope_and_bare_arrays() {
    let page = posts::page_from_body(json!({
        "data": [{ "id": "a" }, { "id": "b" }],
        "total": 12,
        "page": 2,
        "limit": 2,
        "total_pages": 6,
        "success": true
    }));
    assert_eq!(page.data.len(), 2);
    assert_eq!((page.total, page.page, page.limit, page.total_pages), (12, 2, 2, 6));

    let bare = posts::page_from_body(json!([{ "id": "a" }]));
    assert_eq!((bare.total, bare.page, bare.total_pages), (1, 1, 1));

    let junk = posts::page_from_body(json!("oops"));
    assert!(junk.data.is_empty());
}
