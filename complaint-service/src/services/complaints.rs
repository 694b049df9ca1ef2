//! Complaint domain operations.
//!
//! Every read-modify-write against the store (register, submit, resolve)
//! runs under `write_lock`, so concurrent requests cannot overwrite each
//! other's changes to a user record. Reads go straight to the store.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{Complaint, User};
use crate::services::generator::IdGenerator;
use crate::services::metrics;
use crate::services::store::UserStore;
use crate::services::ServiceError;

pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 32;

/// Input for [`ComplaintService::submit_complaint`].
#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub summary: String,
    pub rating: i64,
}

#[derive(Clone)]
pub struct ComplaintService {
    store: Arc<dyn UserStore>,
    ids: Arc<dyn IdGenerator>,
    write_lock: Arc<Mutex<()>>,
    max_id_attempts: u32,
}

impl ComplaintService {
    pub fn new(store: Arc<dyn UserStore>, ids: Arc<dyn IdGenerator>, max_id_attempts: u32) -> Self {
        Self {
            store,
            ids,
            write_lock: Arc::new(Mutex::new(())),
            max_id_attempts: max_id_attempts.max(1),
        }
    }

    pub async fn register(&self, name: String, email: String) -> Result<User, ServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut duplicate = false;
        let mut taken_ids = HashSet::new();
        let mut taken_codes = HashSet::new();

        self.store
            .for_each(&mut |user: &User| {
                if user.has_email(&email) {
                    duplicate = true;
                    return ControlFlow::Break(());
                }
                taken_ids.insert(user.id.clone());
                taken_codes.insert(user.secret_code.clone());
                ControlFlow::Continue(())
            })
            .await?;

        if duplicate {
            tracing::warn!("Registration rejected: email already registered");
            return Err(ServiceError::EmailAlreadyRegistered);
        }

        let user_id = self.draw_unused("user id", &taken_ids, |ids| ids.user_id())?;
        let secret_code = self.draw_unused("secret code", &taken_codes, |ids| ids.secret_code())?;

        let user = User::new(user_id, secret_code, name, email);
        self.store.put(user.clone()).await?;

        metrics::record_user_registered();
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Find the user holding `secret_code`.
    pub async fn login(&self, secret_code: &str) -> Result<User, ServiceError> {
        let mut found = None;

        self.store
            .for_each(&mut |user: &User| {
                if user.secret_code == secret_code {
                    found = Some(user.clone());
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            })
            .await?;

        match found {
            Some(user) => {
                tracing::info!(user_id = %user.id, "User signed in");
                Ok(user)
            }
            None => {
                tracing::warn!("Sign-in rejected: unknown secret code");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }

    pub async fn find_user(&self, user_id: &str) -> Result<User, ServiceError> {
        self.store
            .get(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    pub async fn submit_complaint(
        &self,
        user_id: &str,
        complaint: NewComplaint,
    ) -> Result<Complaint, ServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut user = self.find_user(user_id).await?;

        let mut taken_ids = HashSet::new();
        self.store
            .for_each(&mut |u: &User| {
                taken_ids.extend(u.complaints.iter().map(|c| c.id.clone()));
                ControlFlow::Continue(())
            })
            .await?;

        let complaint_id = self.draw_unused("complaint id", &taken_ids, |ids| ids.complaint_id())?;
        let complaint = Complaint::new(
            complaint_id,
            complaint.title,
            complaint.summary,
            complaint.rating,
        );

        user.complaints.push(complaint.clone());
        self.store.put(user).await?;

        metrics::record_complaint_submitted();
        tracing::info!(
            user_id = %user_id,
            complaint_id = %complaint.id,
            "Complaint submitted"
        );

        Ok(complaint)
    }

    pub async fn view_complaint(
        &self,
        user_id: &str,
        complaint_id: &str,
    ) -> Result<Complaint, ServiceError> {
        let user = self.find_user(user_id).await?;
        user.complaint(complaint_id)
            .cloned()
            .ok_or(ServiceError::ComplaintNotFound)
    }

    pub async fn complaints_for_user(&self, user_id: &str) -> Result<Vec<Complaint>, ServiceError> {
        Ok(self.find_user(user_id).await?.complaints)
    }

    /// Every complaint in the store, grouped by owner in identifier order.
    pub async fn all_complaints(&self) -> Result<Vec<Complaint>, ServiceError> {
        let mut all = Vec::new();
        self.store
            .for_each(&mut |user: &User| {
                all.extend(user.complaints.iter().cloned());
                ControlFlow::Continue(())
            })
            .await?;
        Ok(all)
    }

    /// Mark a complaint resolved. Resolving an already resolved complaint
    /// succeeds and changes nothing.
    pub async fn resolve_complaint(&self, complaint_id: &str) -> Result<Complaint, ServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut owner = None;
        self.store
            .for_each(&mut |user: &User| {
                if user.complaint(complaint_id).is_some() {
                    owner = Some(user.clone());
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            })
            .await?;

        let mut owner = owner.ok_or(ServiceError::ComplaintNotFound)?;
        let complaint = owner
            .complaint_mut(complaint_id)
            .ok_or(ServiceError::ComplaintNotFound)?;
        if complaint.resolved {
            tracing::debug!(complaint_id = %complaint_id, "Complaint already resolved");
            return Ok(complaint.clone());
        }
        complaint.resolve();
        let resolved = complaint.clone();

        let owner_id = owner.id.clone();
        self.store.put(owner).await?;

        metrics::record_complaint_resolved();
        tracing::info!(
            user_id = %owner_id,
            complaint_id = %complaint_id,
            "Complaint resolved"
        );

        Ok(resolved)
    }

    pub async fn user_count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.len().await?)
    }

    fn draw_unused(
        &self,
        kind: &'static str,
        taken: &HashSet<String>,
        draw: impl Fn(&dyn IdGenerator) -> String,
    ) -> Result<String, ServiceError> {
        for _ in 0..self.max_id_attempts {
            let candidate = draw(self.ids.as_ref());
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }

        tracing::error!(kind, attempts = self.max_id_attempts, "Identifier space exhausted");
        Err(ServiceError::IdSpaceExhausted(kind, self.max_id_attempts))
    }
}
