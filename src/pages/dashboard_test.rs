use std::sync::Arc;

use super::*;
use crate::config::ClientConfig;
use crate::storage::MemoryStore;

fn offline_api() -> ApiClient {
    let config = ClientConfig { api_base_url: "http://127.0.0.1:9/api".to_owned(), ..ClientConfig::default() };
    ApiClient::new(&config, Arc::new(MemoryStore::new())).unwrap()
}

#[tokio::test]
async fn every_section_defaults_to_empty_offline() {
    let user = User { id: "u1".to_owned(), ..User::default() };
    let page = DashboardPage::load(&offline_api(), &user).await;
    assert_eq!(page, DashboardPage::default());
    assert_eq!(page.stats(), DashboardStats::default());
}

#[tokio::test]
async fn open_before_init_is_pending() {
    let auth = AuthContext::new(offline_api());
    assert_eq!(DashboardPage::open(&auth).await, Err(GuardDecision::Pending));
}

#[tokio::test]
async fn open_without_session_redirects() {
    let mut auth = AuthContext::new(offline_api());
    auth.init().await;
    assert_eq!(DashboardPage::open(&auth).await, Err(GuardDecision::Redirect(guard::LOGIN_ROUTE)));
}

#[test]
fn stats_count_each_section() {
    let page = DashboardPage {
        recent_pets: vec![Post::default(), Post::default()],
        recent_donations: vec![Donation::default()],
        badges: Vec::new(),
    };
    assert_eq!(page.stats(), DashboardStats { pets: 2, donations: 1, badges: 0 });
}
