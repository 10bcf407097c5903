//! In-kind item listing: food or toys offered against a pet post.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::types::{Item, ItemCreate, ItemKind};
use crate::services;

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields";
pub const INVALID_QUANTITY: &str = "Quantity must be at least 1";
pub const SUCCESS_MESSAGE: &str = "Item listed successfully";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub post_id: String,
    pub item_type: Option<ItemKind>,
    pub item_name: String,
    pub description: String,
    pub quantity: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ItemForm {
    #[must_use]
    pub fn new(post_id: impl Into<String>) -> Self {
        Self { post_id: post_id.into(), quantity: "1".to_owned(), ..Self::default() }
    }

    /// # Errors
    ///
    /// Returns [`REQUIRED_FIELDS`] when the post, type or name is missing and
    /// [`INVALID_QUANTITY`] unless the quantity is a whole number of at least 1.
    pub fn validate(&self) -> Result<ItemCreate, String> {
        let Some(item_type) = self.item_type else {
            return Err(REQUIRED_FIELDS.to_owned());
        };
        if is_blank(&self.post_id) || is_blank(&self.item_name) {
            return Err(REQUIRED_FIELDS.to_owned());
        }
        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(quantity) if quantity >= 1 => quantity,
            _ => return Err(INVALID_QUANTITY.to_owned()),
        };
        Ok(ItemCreate {
            post: self.post_id.trim().to_owned(),
            item_type,
            item_name: self.item_name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            quantity,
        })
    }

    /// # Errors
    ///
    /// Returns the validation message, the server's message, or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Item, String> {
        self.success = None;
        let result = match self.validate() {
            Ok(request) => services::items::create(api, &request)
                .await
                .map_err(|e| e.user_message("Failed to list item. Please try again.")),
            Err(message) => Err(message),
        };
        match result {
            Ok(item) => {
                *self = Self { success: Some(SUCCESS_MESSAGE.to_owned()), ..Self::new(self.post_id.clone()) };
                Ok(item)
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
