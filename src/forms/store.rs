//! Store and product creation forms.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use super::is_blank;
use crate::net::api::ApiClient;
use crate::net::types::{Product, ProductCategory, ProductCreate, Store, StoreCreate};
use crate::services;
use crate::util::format::parse_amount;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreCreateForm {
    pub name: String,
    pub description: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl StoreCreateForm {
    /// # Errors
    ///
    /// Returns "Please enter a store name" when the name is blank.
    pub fn validate(&self) -> Result<StoreCreate, String> {
        if is_blank(&self.name) {
            return Err("Please enter a store name".to_owned());
        }
        Ok(StoreCreate { name: self.name.trim().to_owned(), description: self.description.clone() })
    }

    /// # Errors
    ///
    /// Returns the validation message or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Store, String> {
        self.success = None;
        let result = match self.validate() {
            Ok(request) => services::stores::create(api, &request).await.map_err(|e| {
                tracing::warn!(error = %e, "failed to create store");
                "Failed to create store. Please try again.".to_owned()
            }),
            Err(message) => Err(message),
        };
        match result {
            Ok(store) => {
                *self = Self { success: Some("Store created successfully!".to_owned()), ..Self::default() };
                Ok(store)
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductCreateForm {
    pub store_id: String,
    pub name: String,
    pub description: String,
    pub category: Option<ProductCategory>,
    pub price: String,
    pub stock_quantity: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl ProductCreateForm {
    /// # Errors
    ///
    /// Returns "Please fill in all required fields" when store, name,
    /// category, price or stock is missing, and "Please enter a valid price"
    /// when the price is not a non-negative number.
    pub fn validate(&self) -> Result<ProductCreate, String> {
        let Some(category) = self.category else {
            return Err("Please fill in all required fields".to_owned());
        };
        if [&self.store_id, &self.name, &self.price, &self.stock_quantity].iter().any(|value| is_blank(value)) {
            return Err("Please fill in all required fields".to_owned());
        }
        let price = parse_amount(&self.price)
            .filter(|price| *price >= 0.0)
            .ok_or_else(|| "Please enter a valid price".to_owned())?;
        Ok(ProductCreate {
            store: self.store_id.clone(),
            name: self.name.trim().to_owned(),
            description: self.description.clone(),
            category,
            price,
            stock_quantity: self.stock_quantity.trim().to_owned(),
        })
    }

    /// # Errors
    ///
    /// Returns the validation message or a fixed fallback.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Product, String> {
        self.success = None;
        let result = match self.validate() {
            Ok(request) => services::products::create(api, &self.store_id, &request).await.map_err(|e| {
                tracing::warn!(error = %e, "failed to add product");
                "Failed to add product. Please try again.".to_owned()
            }),
            Err(message) => Err(message),
        };
        match result {
            Ok(product) => {
                *self = Self { success: Some("Product added successfully!".to_owned()), ..Self::default() };
                Ok(product)
            }
            Err(message) => {
                self.error = Some(message.clone());
                Err(message)
            }
        }
    }
}
