//! Customers and pets.

use super::ApiClient;
use crate::error::Result;
use crate::models::{Pet, User};

impl ApiClient {
    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        self.get_json("/users").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_user(&self, user_id: i64) -> Result<User> {
        self.get_json(&format!("/users/{user_id}")).await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_pets(&self) -> Result<Vec<Pet>> {
        self.get_json("/pets").await
    }

    /// # Errors
    ///
    /// Any transport, status or decode failure.
    pub async fn fetch_pet(&self, pet_id: i64) -> Result<Pet> {
        self.get_json(&format!("/pets/{pet_id}")).await
    }
}
