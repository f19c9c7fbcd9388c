//! Customer directory workflow.
//!
//! Ownership rules: admins see and mutate everything; a customer sees and
//! mutates only the record whose username matches their own.

use tracing::{info, instrument};

use crate::error::WorkflowError;
use crate::models::Customer;
use crate::policy;
use crate::storage::{EntityStore, Etag};
use crate::types::{Actor, CustomerId};

/// Inputs for creating or editing a customer profile.
#[derive(Debug, Clone)]
pub struct CustomerDraft {
    /// Login name of the owning user.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Shipping address.
    pub shipping_address: String,
}

impl CustomerDraft {
    fn validate(&self) -> Result<(), WorkflowError> {
        if self.username.trim().is_empty() {
            return Err(WorkflowError::Validation("username is required".to_owned()));
        }
        if self.email.trim().is_empty() {
            return Err(WorkflowError::Validation("email is required".to_owned()));
        }
        Ok(())
    }
}

/// Directory operations over the entity store.
#[derive(Clone)]
pub struct CustomerDirectory {
    store: EntityStore,
}

impl CustomerDirectory {
    /// Create the directory service.
    #[must_use]
    pub const fn new(store: EntityStore) -> Self {
        Self { store }
    }

    /// Create a customer profile.
    ///
    /// Customers may only create a profile for their own username; admins
    /// may create any.
    ///
    /// # Errors
    ///
    /// `Unauthorized` on ownership violation, `Validation` for bad fields.
    #[instrument(skip(self, draft), fields(username = %draft.username))]
    pub async fn create(
        &self,
        draft: CustomerDraft,
        actor: &Actor,
    ) -> Result<Customer, WorkflowError> {
        policy::authorize_owner(actor, &draft.username)?;
        draft.validate()?;

        let customer = Customer {
            id: CustomerId::generate(),
            username: draft.username,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            shipping_address: draft.shipping_address,
        };
        self.store.add(&customer).await?;
        info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }

    /// Edit a customer profile, guarded by `etag`.
    ///
    /// Ownership is checked against the stored record, and the username is
    /// immutable: the profile stays bound to its user.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Unauthorized`, `Validation`, or `ConcurrencyConflict`.
    #[instrument(skip(self, draft, etag))]
    pub async fn update(
        &self,
        customer_id: CustomerId,
        draft: CustomerDraft,
        etag: Etag,
        actor: &Actor,
    ) -> Result<Customer, WorkflowError> {
        let (existing, _) = self
            .store
            .get::<Customer>(&customer_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        policy::authorize_owner(actor, &existing.username)?;
        draft.validate()?;

        let customer = Customer {
            id: existing.id,
            username: existing.username,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            shipping_address: draft.shipping_address,
        };
        self.store.update(&customer, &etag).await?;
        info!(customer_id = %customer_id, "customer updated");
        Ok(customer)
    }

    /// Delete a customer profile (owner or admin).
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Unauthorized` on ownership violation.
    #[instrument(skip(self))]
    pub async fn delete(&self, customer_id: CustomerId, actor: &Actor) -> Result<(), WorkflowError> {
        let (customer, _) = self
            .store
            .get::<Customer>(&customer_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        policy::authorize_owner(actor, &customer.username)?;

        self.store
            .delete::<Customer>(&customer_id.to_string())
            .await?;
        info!(customer_id = %customer_id, "customer deleted");
        Ok(())
    }

    /// List customers visible to `actor`: everyone for admins, the actor's
    /// own record otherwise.
    ///
    /// # Errors
    ///
    /// `Storage` if the scan fails.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<(Customer, Etag)>, WorkflowError> {
        let mut customers = self.store.get_all::<Customer>().await?;
        if !actor.is_admin() {
            customers.retain(|(customer, _)| customer.username == actor.username);
        }
        Ok(customers)
    }

    /// Fetch a single customer with its version tag, enforcing ownership.
    ///
    /// # Errors
    ///
    /// `NotFound` if absent, `Unauthorized` if owned by someone else.
    pub async fn get(
        &self,
        customer_id: CustomerId,
        actor: &Actor,
    ) -> Result<(Customer, Etag), WorkflowError> {
        let (customer, etag) = self
            .store
            .get::<Customer>(&customer_id.to_string())
            .await?
            .ok_or(WorkflowError::NotFound)?;
        policy::authorize_owner(actor, &customer.username)?;
        Ok((customer, etag))
    }

    /// Find the profile belonging to a username, if any.
    ///
    /// # Errors
    ///
    /// `Storage` if the scan fails.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(Customer, Etag)>, WorkflowError> {
        let customers = self.store.get_all::<Customer>().await?;
        Ok(customers
            .into_iter()
            .find(|(customer, _)| customer.username == username))
    }
}
