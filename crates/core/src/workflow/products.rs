//! Product catalog workflow.
//!
//! Admin-only mutations with public listing. Image attachment emits
//! `ImageUploaded` on create and `ImageReplaced` on update; omitting the
//! image on update keeps the stored URL. Events follow the committed write.

use tracing::{info, instrument};

use crate::error::WorkflowError;
use crate::models::Product;
use crate::policy;
use crate::queue::{Event, Notifier};
use crate::storage::{EntityStore, Etag, StorageError};
use crate::types::{Actor, ProductId};

/// Inputs for creating or editing a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    /// Display name; required.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price; must not be negative.
    pub price: f64,
    /// Units in stock.
    pub stock: u32,
    /// Newly uploaded image URL, if any.
    pub image_url: Option<String>,
}

impl ProductDraft {
    fn validate(&self) -> Result<(), WorkflowError> {
        if self.name.trim().is_empty() {
            return Err(WorkflowError::Validation("product name is required".to_owned()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(WorkflowError::Validation(
                "product price must be a non-negative number".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Catalog operations over the entity store and notification queue.
#[derive(Clone)]
pub struct ProductCatalog {
    store: EntityStore,
    notifier: Notifier,
}

impl ProductCatalog {
    /// Create the catalog service.
    #[must_use]
    pub const fn new(store: EntityStore, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Create a product. Emits `ImageUploaded` if an image was attached.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, `Validation` for bad fields,
    /// `Storage` if persistence fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: ProductDraft, actor: &Actor) -> Result<Product, WorkflowError> {
        policy::require_admin(actor)?;
        draft.validate()?;

        let product = Product {
            id: ProductId::generate(),
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            image_url: draft.image_url,
        };
        self.store.add(&product).await?;
        info!(product_id = %product.id, "product created");

        if let Some(url) = &product.image_url {
            self.notifier
                .emit(Event::ImageUploaded {
                    product_id: product.id,
                    file_name: file_name_of(url),
                })
                .await;
        }

        Ok(product)
    }

    /// Edit a product, guarded by `etag`.
    ///
    /// A new image URL replaces the stored one and emits `ImageReplaced`;
    /// `None` keeps the existing image.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, `ProductNotFound` if the row is gone,
    /// `ConcurrencyConflict` on a stale tag.
    #[instrument(skip(self, draft, etag))]
    pub async fn update(
        &self,
        product_id: ProductId,
        draft: ProductDraft,
        etag: Etag,
        actor: &Actor,
    ) -> Result<Product, WorkflowError> {
        policy::require_admin(actor)?;
        draft.validate()?;

        let (existing, _) = self
            .store
            .get::<Product>(&product_id.to_string())
            .await?
            .ok_or(WorkflowError::ProductNotFound)?;

        let replaced_image = draft.image_url.is_some();
        let product = Product {
            id: existing.id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            stock: draft.stock,
            image_url: draft.image_url.or(existing.image_url),
        };

        self.store.update(&product, &etag).await?;
        info!(product_id = %product_id, "product updated");

        if replaced_image {
            if let Some(url) = &product.image_url {
                self.notifier
                    .emit(Event::ImageReplaced {
                        product_id: product.id,
                        file_name: file_name_of(url),
                    })
                    .await;
            }
        }

        Ok(product)
    }

    /// Delete a product. Emits `ProductDeleted` only after the row delete
    /// succeeded.
    ///
    /// # Errors
    ///
    /// `Unauthorized` for non-admins, `ProductNotFound` if absent.
    #[instrument(skip(self))]
    pub async fn delete(&self, product_id: ProductId, actor: &Actor) -> Result<(), WorkflowError> {
        policy::require_admin(actor)?;

        self.store
            .delete::<Product>(&product_id.to_string())
            .await
            .map_err(|e| match e {
                StorageError::NotFound => WorkflowError::ProductNotFound,
                other => other.into(),
            })?;
        info!(product_id = %product_id, "product deleted");

        self.notifier
            .emit(Event::ProductDeleted { product_id })
            .await;
        Ok(())
    }

    /// List the whole catalog. Visible to every authenticated actor.
    ///
    /// # Errors
    ///
    /// `Storage` if the scan fails.
    pub async fn list(&self) -> Result<Vec<(Product, Etag)>, WorkflowError> {
        Ok(self.store.get_all::<Product>().await?)
    }

    /// Fetch a single product with its version tag.
    ///
    /// # Errors
    ///
    /// `ProductNotFound` if absent.
    pub async fn get(&self, product_id: ProductId) -> Result<(Product, Etag), WorkflowError> {
        self.store
            .get::<Product>(&product_id.to_string())
            .await?
            .ok_or(WorkflowError::ProductNotFound)
    }
}

/// Last path segment of an image URL, for event payloads.
fn file_name_of(url: &str) -> String {
    url.rsplit('/').next().unwrap_or(url).to_owned()
}
