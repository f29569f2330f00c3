//! The catalog session service.
//!
//! This module owns the local product collection on behalf of the admin views.
//! It is responsible for:
//! 1.  Loading the collection and the category set from the remote catalog.
//! 2.  Running create/update/delete mutations against the remote and mirroring
//!     each successful response into the local collection.
//! 3.  Producing user notices for every settled mutation.
//!
//! Mutations are not serialized against each other: two concurrent edits of
//! the same product race, and whichever response arrives last wins locally.

use crate::app::notices::{Notice, NoticeBoard, NoticeLevel};
use crate::domain::catalog::{CollectionError, DashboardStats, ProductCollection, ProductFilter};
use crate::domain::product::{DraftError, Product, ProductDraft, ProductId};
use crate::infra::remote::{CatalogRemote, RequestFailure};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

const RETRY_HINT: &str = "Please try again later.";

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("catalog session is not loaded")]
    NotLoaded,
    #[error("invalid product draft: {0}")]
    InvalidDraft(#[from] DraftError),
    #[error(transparent)]
    Remote(#[from] RequestFailure),
    /// The session was torn down or reloaded while the request was in flight.
    #[error("catalog session ended before the response arrived")]
    Discarded,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "state", content = "error", rename_all = "snake_case")]
pub enum SessionStatus {
    Unloaded,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    fn verb(self) -> &'static str {
        match self {
            MutationKind::Create => "add",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Settlement {
    Success,
    Failure,
}

/// Lifecycle of one user-initiated mutation.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "phase", content = "settlement", rename_all = "snake_case")]
pub enum MutationPhase {
    Idle,
    InFlight,
    Settled(Settlement),
}

/// Record of a single mutation attempt.
///
/// A value is created `Idle`, goes `InFlight` while the remote request is
/// outstanding and ends `Settled`, which is how it is reported back. It is
/// never reused: the next attempt starts from a fresh `Idle` record.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub kind: MutationKind,
    pub target: Option<ProductId>,
    pub phase: MutationPhase,
}

impl Mutation {
    fn new(kind: MutationKind, target: Option<ProductId>) -> Self {
        Self {
            kind,
            target,
            phase: MutationPhase::Idle,
        }
    }

    fn settle(&mut self, settlement: Settlement) {
        debug_assert_eq!(self.phase, MutationPhase::InFlight);
        self.phase = MutationPhase::Settled(settlement);
    }
}

/// Whether a settled mutation could be mirrored into the local collection.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocalSync {
    Applied,
    /// The remote accepted the mutation but the local collection did not
    /// match it (unknown or duplicate identifier). Local state is unchanged.
    Unmatched,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    pub mutation: Mutation,
    pub product: Product,
    pub local_sync: LocalSync,
}

/// Explicit user answer to the delete confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The user declined; no request was issued.
    Cancelled,
    Deleted(MutationOutcome),
}

/// The visible subset of the collection plus counts for "Showing N of M".
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct FilteredView {
    pub products: Vec<Product>,
    pub shown: usize,
    pub total: usize,
}

#[derive(Debug)]
struct Session {
    status: SessionStatus,
    /// Bumped on every load and teardown; responses carrying an older value are discarded.
    generation: u64,
    products: ProductCollection,
    categories: Vec<String>,
}

/// Counts a mutation as in flight for as long as it lives.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize, mutation: &mut Mutation) -> Self {
        mutation.phase = MutationPhase::InFlight;
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Owns the catalog session for the admin views.
pub struct CatalogService {
    remote: Arc<dyn CatalogRemote>,
    session: RwLock<Session>,
    notices: Mutex<NoticeBoard>,
    in_flight: AtomicUsize,
}

impl CatalogService {
    pub fn new(remote: Arc<dyn CatalogRemote>, notice_capacity: usize) -> Self {
        Self {
            remote,
            session: RwLock::new(Session {
                status: SessionStatus::Unloaded,
                generation: 0,
                products: ProductCollection::new(),
                categories: Vec::new(),
            }),
            notices: Mutex::new(NoticeBoard::new(notice_capacity)),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.read().await.status.clone()
    }

    /// Number of mutations currently awaiting a remote response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Fetches the product listing and the category set; both must succeed.
    ///
    /// Replaces any previously loaded session.
    pub async fn load(&self) -> Result<(), ServiceError> {
        let generation = {
            let mut session = self.session.write().await;
            session.generation += 1;
            session.status = SessionStatus::Loading;
            session.generation
        };

        info!(generation, "loading catalog session");
        let result = tokio::try_join!(self.remote.list(), self.remote.categories());

        let mut session = self.session.write().await;
        if session.generation != generation {
            debug!(generation, "discarding stale catalog load");
            return Err(ServiceError::Discarded);
        }
        match result {
            Ok((products, categories)) => {
                info!(
                    products = products.len(),
                    categories = categories.len(),
                    "catalog session ready"
                );
                session.products.initialize(products);
                session.categories = categories;
                session.status = SessionStatus::Ready;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "catalog session failed to load");
                session.products.initialize(Vec::new());
                session.categories.clear();
                session.status = SessionStatus::Failed(format!("Error loading data: {e}"));
                Err(e.into())
            }
        }
    }

    /// Drops the session. Responses to requests still in flight are discarded.
    pub async fn teardown(&self) {
        let mut session = self.session.write().await;
        session.generation += 1;
        session.status = SessionStatus::Unloaded;
        session.products.initialize(Vec::new());
        session.categories.clear();
        drop(session);

        self.notices.lock().await.clear();
        info!("catalog session torn down");
    }

    pub async fn visible(&self, filter: &ProductFilter) -> Result<FilteredView, ServiceError> {
        let session = self.ready_session().await?;
        let products: Vec<Product> = filter
            .visible(session.products.as_slice())
            .into_iter()
            .cloned()
            .collect();
        Ok(FilteredView {
            shown: products.len(),
            total: session.products.len(),
            products,
        })
    }

    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        let session = self.ready_session().await?;
        Ok(session.products.get(id).cloned())
    }

    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.ready_session().await?.categories.clone())
    }

    pub async fn stats(&self) -> Result<DashboardStats, ServiceError> {
        let session = self.ready_session().await?;
        Ok(DashboardStats::from_products(session.products.as_slice()))
    }

    /// Asks the remote for one category's products. Local state is untouched.
    pub async fn remote_category(&self, category: &str) -> Result<Vec<Product>, ServiceError> {
        Ok(self.remote.list_by_category(category).await?)
    }

    pub async fn notices(&self) -> Vec<Notice> {
        self.notices.lock().await.list()
    }

    pub async fn dismiss_notice(&self, id: u64) -> bool {
        self.notices.lock().await.dismiss(id)
    }

    pub async fn create(&self, draft: ProductDraft) -> Result<MutationOutcome, ServiceError> {
        draft.validate()?;
        let generation = self.ready_generation().await?;
        let mut mutation = Mutation::new(MutationKind::Create, None);

        let result = {
            let _guard = InFlightGuard::enter(&self.in_flight, &mut mutation);
            self.remote.create(&draft).await
        };
        let product = self.settle_remote(&mut mutation, generation, result).await?;
        mutation.target = Some(product.id);

        let record = product.clone();
        let local_sync = self
            .apply(generation, &mutation, move |products| products.record_created(record))
            .await?;
        self.notify(
            NoticeLevel::Success,
            "Product added successfully!",
            format!("{} has been added to your inventory.", draft.title),
        )
        .await;

        Ok(MutationOutcome {
            mutation,
            product,
            local_sync,
        })
    }

    pub async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<MutationOutcome, ServiceError> {
        draft.validate()?;
        let generation = self.ready_generation().await?;
        let mut mutation = Mutation::new(MutationKind::Update, Some(id));

        let result = {
            let _guard = InFlightGuard::enter(&self.in_flight, &mut mutation);
            self.remote.update(id, &draft).await
        };
        let product = self.settle_remote(&mut mutation, generation, result).await?;

        let record = product.clone();
        let local_sync = self
            .apply(generation, &mutation, move |products| {
                products.record_updated(id, record)
            })
            .await?;
        self.notify(
            NoticeLevel::Success,
            "Product updated successfully!",
            format!("{} has been updated.", draft.title),
        )
        .await;

        Ok(MutationOutcome {
            mutation,
            product,
            local_sync,
        })
    }

    /// Deletes a product once the user has confirmed.
    pub async fn delete(
        &self,
        id: ProductId,
        confirmation: DeleteConfirmation,
    ) -> Result<DeleteOutcome, ServiceError> {
        let generation = self.ready_generation().await?;
        if confirmation == DeleteConfirmation::Declined {
            debug!(id, "delete declined");
            return Ok(DeleteOutcome::Cancelled);
        }
        let mut mutation = Mutation::new(MutationKind::Delete, Some(id));

        let result = {
            let _guard = InFlightGuard::enter(&self.in_flight, &mut mutation);
            self.remote.delete(id).await
        };
        let product = self.settle_remote(&mut mutation, generation, result).await?;

        let mut removed_title = None;
        let local_sync = self
            .apply(generation, &mutation, |products| {
                products
                    .record_removed(id)
                    .map(|removed| removed_title = Some(removed.title))
            })
            .await?;
        let description = match removed_title {
            Some(title) => format!("{title} has been removed."),
            None => "Product has been removed.".to_string(),
        };
        self.notify(NoticeLevel::Success, "Product deleted successfully!", description)
            .await;

        Ok(DeleteOutcome::Deleted(MutationOutcome {
            mutation,
            product,
            local_sync,
        }))
    }

    async fn ready_session(
        &self,
    ) -> Result<tokio::sync::RwLockReadGuard<'_, Session>, ServiceError> {
        let session = self.session.read().await;
        match session.status {
            SessionStatus::Ready => Ok(session),
            _ => Err(ServiceError::NotLoaded),
        }
    }

    async fn ready_generation(&self) -> Result<u64, ServiceError> {
        Ok(self.ready_session().await?.generation)
    }

    async fn is_current(&self, generation: u64) -> bool {
        self.session.read().await.generation == generation
    }

    /// Marks the mutation settled; failures are reported to the user and leave local state alone.
    async fn settle_remote(
        &self,
        mutation: &mut Mutation,
        generation: u64,
        result: Result<Product, RequestFailure>,
    ) -> Result<Product, ServiceError> {
        match result {
            Ok(product) => {
                mutation.settle(Settlement::Success);
                Ok(product)
            }
            Err(e) => {
                mutation.settle(Settlement::Failure);
                warn!(
                    kind = ?mutation.kind,
                    target = ?mutation.target,
                    error = %e,
                    "mutation failed"
                );
                if !self.is_current(generation).await {
                    return Err(ServiceError::Discarded);
                }
                self.notify(
                    NoticeLevel::Error,
                    format!("Failed to {} product", mutation.kind.verb()),
                    RETRY_HINT,
                )
                .await;
                Err(e.into())
            }
        }
    }

    /// Mirrors a successful mutation into the local collection.
    async fn apply<F>(
        &self,
        generation: u64,
        mutation: &Mutation,
        change: F,
    ) -> Result<LocalSync, ServiceError>
    where
        F: FnOnce(&mut ProductCollection) -> Result<(), CollectionError>,
    {
        let mut session = self.session.write().await;
        if session.generation != generation {
            debug!(kind = ?mutation.kind, "discarding response for ended session");
            return Err(ServiceError::Discarded);
        }
        match change(&mut session.products) {
            Ok(()) => Ok(LocalSync::Applied),
            Err(e) => {
                drop(session);
                warn!(kind = ?mutation.kind, error = %e, "local collection out of sync");
                self.notify(
                    NoticeLevel::Warning,
                    "Local view out of sync",
                    format!("{e}; reload to refresh the product list."),
                )
                .await;
                Ok(LocalSync::Unmatched)
            }
        }
    }

    async fn notify(
        &self,
        level: NoticeLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.notices.lock().await.push(level, title, description);
    }
}
