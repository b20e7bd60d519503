//! Clinic veterinarian roster.

use async_trait::async_trait;
use tracing::info;

use super::{Page, require_text, settle};
use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Veterinarian, VeterinarianForm};

pub struct VeterinariansPage {
    client: ApiClient,
    veterinarians: Vec<Veterinarian>,
    error: Option<String>,
}

/// Trim every text field; all four are required.
fn validated(form: &VeterinarianForm) -> Result<VeterinarianForm> {
    Ok(VeterinarianForm {
        name: require_text(&form.name, "Name is required")?,
        email: require_text(&form.email, "Email is required")?,
        phone_number: require_text(&form.phone_number, "Phone number is required")?,
        specialization: require_text(&form.specialization, "Specialization is required")?,
        profile_picture: form.profile_picture.clone(),
    })
}

impl VeterinariansPage {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, veterinarians: Vec::new(), error: None }
    }

    #[must_use]
    pub fn veterinarians(&self) -> &[Veterinarian] {
        &self.veterinarians
    }

    /// # Errors
    ///
    /// `Validation` for a blank required field; otherwise the backend's
    /// rejection or a failed reload.
    pub async fn create(&mut self, form: &VeterinarianForm) -> Result<Veterinarian> {
        let created = self.client.create_veterinarian(&validated(form)?).await?;
        self.reload().await?;
        Ok(created)
    }

    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&mut self, veterinarian_id: i64, form: &VeterinarianForm) -> Result<Veterinarian> {
        let updated = self.client.update_veterinarian(veterinarian_id, &validated(form)?).await?;
        self.reload().await?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// The backend's rejection, or a failed reload afterwards.
    pub async fn delete(&mut self, veterinarian_id: i64) -> Result<()> {
        self.client.delete_veterinarian(veterinarian_id).await?;
        self.reload().await
    }
}

#[async_trait]
impl Page for VeterinariansPage {
    async fn reload(&mut self) -> Result<()> {
        let loaded = self.client.fetch_veterinarians().await;
        self.veterinarians = settle("veterinarians", "Failed to fetch veterinarians", &mut self.error, loaded)?;
        info!(veterinarians = self.veterinarians.len(), "veterinarians page loaded");
        Ok(())
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
#[path = "veterinarians_test.rs"]
mod tests;
