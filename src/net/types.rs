//! Wire DTOs for the REST API.
//!
//! DESIGN
//! ======
//! Every entity derives `Default` and is decoded with `#[serde(default)]` so a
//! missing field never breaks a list; the backend is the source of truth and
//! the client treats these as read-once snapshots. Money fields accept both
//! JSON numbers and decimal strings, since the backend serializes decimals as
//! strings in some endpoints and numbers in others.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:tt),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim() {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(format!("unknown {}: {other}", stringify!($name))),
                }
            }
        }
    };
}

wire_enum! {
    /// Kind of pet listing.
    PostType {
        #[default]
        Adoption => "adoption",
        Donation => "donation",
    }
}

wire_enum! {
    /// Lifecycle of a pet listing.
    PostStatus {
        #[default]
        Active => "active",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

wire_enum! {
    PetSize {
        #[default]
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

wire_enum! {
    /// Review state of a donation. Manual donations start `Pending`.
    DonationStatus {
        #[default]
        Pending => "pending",
        Verified => "verified",
        Rejected => "rejected",
    }
}

wire_enum! {
    ProductCategory {
        #[default]
        Food => "food",
        Toy => "toy",
        Accessory => "accessory",
    }
}

wire_enum! {
    OrderStatus {
        #[default]
        Pending => "pending",
        Confirmed => "confirmed",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

wire_enum! {
    BadgeCategory {
        #[default]
        Adoption => "adoption",
        Donation => "donation",
        Community => "community",
        Volunteer => "volunteer",
    }
}

wire_enum! {
    /// Kind of in-kind item a donor may list against a post.
    ItemKind {
        #[default]
        Food => "food",
        Toy => "toy",
    }
}

wire_enum! {
    /// Category offered by the volunteer pickup form.
    VolunteerItemType {
        #[default]
        Food => "food",
        Toys => "toys",
        Accessories => "accessories",
        Mixed => "mixed",
    }
}

// =============================================================================
// ENTITIES
// =============================================================================

/// A platform user as returned by auth and profile endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub nid_photo: Option<String>,
    pub profile_photo: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// `"First Last"`, falling back to the username when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() { self.username.clone() } else { full }
    }
}

/// A pet listing: either an adoption listing or a donation fundraiser.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Post {
    pub id: String,
    pub user: User,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub title: String,
    pub description: Option<String>,
    pub pet_type: Option<String>,
    #[serde(deserialize_with = "deserialize_opt_u32_lenient")]
    pub pet_age: Option<u32>,
    #[serde(deserialize_with = "deserialize_opt_enum_lenient")]
    pub pet_size: Option<PetSize>,
    pub pet_species: Option<String>,
    #[serde(deserialize_with = "deserialize_opt_amount")]
    pub donation_goal: Option<f64>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_amount: f64,
    pub status: PostStatus,
    pub donations_enabled: bool,
    pub created_at: String,
    pub updated_at: String,
    pub images: Vec<PostImage>,
}

impl Post {
    /// Amount still needed to reach the goal; `None` when the post has no goal.
    #[must_use]
    pub fn remaining_goal(&self) -> Option<f64> {
        self.donation_goal.map(|goal| goal - self.current_amount)
    }

    /// Relative path of the first image, if any.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(|image| image.image_url.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostImage {
    pub id: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub uploaded_at: String,
}

/// A progress update attached to a post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostUpdate {
    pub id: String,
    pub post: String,
    pub user: User,
    pub update_text: Option<String>,
    pub new_images: Vec<String>,
    pub update_type: String,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    pub id: String,
    pub post: String,
    pub user: User,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bookmark {
    pub id: String,
    pub post: String,
    pub created_at: String,
}

/// A monetary donation toward a donation-type post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Donation {
    pub id: String,
    pub post: Post,
    pub donor: User,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub payment_method: String,
    pub reference_id: String,
    pub message: Option<String>,
    pub status: DonationStatus,
    pub receipt_image: Option<String>,
    pub is_manual: bool,
    pub verified_by: Option<User>,
    pub verified_at: Option<String>,
    pub admin_notes: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: User,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl WireLabel for Store {
    fn from_label(label: String) -> Self {
        Self { name: label, ..Self::default() }
    }
}

/// A store product. `stock_quantity` is free text on the backend, and `store`
/// usually arrives as the store's name rather than a nested object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    #[serde(deserialize_with = "deserialize_ref_lenient")]
    pub store: Store,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: f64,
    #[serde(deserialize_with = "deserialize_text_lenient")]
    pub stock_quantity: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub user: User,
    #[serde(deserialize_with = "deserialize_ref_lenient")]
    pub store: Store,
    /// Product ids; nested product objects are reduced to their id.
    #[serde(deserialize_with = "deserialize_ids_lenient")]
    pub products: Vec<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_amount: f64,
    pub status: OrderStatus,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub author: User,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub published_at: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub criteria: String,
    pub category: BadgeCategory,
    pub points_required: u32,
    pub created_at: String,
}

/// An in-kind item listed against a post.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: String,
    pub post: String,
    pub donor: User,
    pub item_type: String,
    pub item_name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub image: Option<String>,
    pub status: String,
    pub is_claimed: bool,
    pub claimed_by: Option<User>,
    pub claimed_at: Option<String>,
    pub created_at: String,
}

/// A volunteer pickup request for donated goods.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolunteerDonation {
    pub id: String,
    pub item_type: VolunteerItemType,
    pub description: String,
    pub quantity: Option<String>,
    pub pickup_location: String,
    pub contact_number: String,
    pub status: String,
    pub created_at: String,
}

/// Paginated list envelope used by `/posts/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self { data: Vec::new(), total: 0, page: 1, limit: 0, total_pages: 0 }
    }
}

// =============================================================================
// REQUEST / RESPONSE BODIES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by both login and register.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub message: String,
}

/// Editable profile fields; unset fields are omitted from the request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonationCreate {
    pub amount: f64,
    pub post_id: String,
    pub payment_method: String,
    pub reference_id: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReviewRequest {
    pub action: ReviewAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookmarkStatus {
    pub is_bookmarked: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StoreCreate {
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductCreate {
    pub store: String,
    pub name: String,
    pub description: String,
    pub category: ProductCategory,
    pub price: f64,
    pub stock_quantity: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct VolunteerDonationCreate {
    pub item_type: String,
    pub description: String,
    pub quantity: String,
    pub estimated_value: String,
    pub pickup_location: String,
    pub contact_number: String,
    pub available_times: String,
    pub special_instructions: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentCreate {
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ItemCreate {
    pub post: String,
    pub item_type: ItemKind,
    pub item_name: String,
    pub description: String,
    pub quantity: u32,
}

// =============================================================================
// LENIENT DECODERS
// =============================================================================

fn amount_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

/// Decode a money value from a number or decimal string; anything else is `0.0`.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value).unwrap_or(0.0))
}

fn deserialize_opt_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

fn deserialize_opt_u32_lenient<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number.as_u64().and_then(|v| u32::try_from(v).ok()),
        serde_json::Value::String(raw) => raw.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Decode an optional wire enum; blank or unknown values read as `None`.
fn deserialize_opt_enum_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(raw) => raw.parse::<T>().ok(),
        _ => None,
    })
}

/// Decode free text that the backend sometimes sends as a number.
fn deserialize_text_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(raw) => raw,
        serde_json::Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// An entity the backend may send either nested or as its `__str__` label.
trait WireLabel: DeserializeOwned + Default {
    fn from_label(label: String) -> Self;
}

fn ref_from_value<T: WireLabel>(value: serde_json::Value) -> T {
    match value {
        serde_json::Value::String(label) => T::from_label(label),
        serde_json::Value::Number(number) => T::from_label(number.to_string()),
        object @ serde_json::Value::Object(_) => serde_json::from_value(object).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "nested reference did not decode");
            T::default()
        }),
        _ => T::default(),
    }
}

/// Decode a reference that is either a nested object or a bare label.
fn deserialize_ref_lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: WireLabel,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(ref_from_value(value))
}

/// Decode a list of ids, taking `id` from any element sent as an object.
fn deserialize_ids_lenient<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            serde_json::Value::String(id) => Some(id),
            serde_json::Value::Number(number) => Some(number.to_string()),
            serde_json::Value::Object(mut object) => match object.remove("id") {
                Some(serde_json::Value::String(id)) => Some(id),
                Some(serde_json::Value::Number(number)) => Some(number.to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect())
}
