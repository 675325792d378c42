//! # Location Selector
//!
//! Async driver for [`LocationResolver`].
//!
//! ## Stale Responses
//! ```text
//! time ──────────────────────────────────────────────────────────────►
//!
//!  select(PROVINCE, A) ── fetch districts(A) ─────────────────┐ (slow)
//!         select(PROVINCE, C) ── fetch districts(C) ──┐        │
//!                                                     ▼        ▼
//!                                               Applied(n)   Stale, dropped
//! ```
//!
//! The resolver sits behind `Arc<Mutex<_>>`. The lock is taken for each
//! state change and released before any fetch is awaited, so overlapping
//! selections are allowed and the ticket generation decides which answer
//! lands.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};
use wellness_core::{
    ApplyOutcome, FetchTicket, LocationId, LocationLevel, LocationNode, LocationResolver,
};

use crate::api::LocationApi;
use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Clone)]
pub struct LocationSelector<L> {
    api: L,
    resolver: Arc<Mutex<LocationResolver>>,
}

impl<L> LocationSelector<L>
where
    L: LocationApi,
{
    /// `target` is the deepest level the caller needs.
    pub fn new(api: L, target: LocationLevel) -> Self {
        LocationSelector {
            api,
            resolver: Arc::new(Mutex::new(LocationResolver::new(target))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LocationResolver> {
        self.resolver.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resets every level and loads the provinces.
    pub async fn initialize(&self) -> StorefrontResult<ApplyOutcome> {
        let ticket = self.lock().initialize();
        self.fetch(ticket).await
    }

    /// Selects `id` at `level` and loads the next level's options.
    ///
    /// Returns `None` when nothing needed fetching (cleared selection or
    /// target level reached). A failed fetch leaves the child level empty
    /// and returns `LocationFetch`; reselecting the parent retries.
    pub async fn select(
        &self,
        level: LocationLevel,
        id: Option<LocationId>,
    ) -> StorefrontResult<Option<ApplyOutcome>> {
        let ticket = self.lock().select(level, id)?;
        match ticket {
            Some(ticket) => self.fetch(ticket).await.map(Some),
            None => Ok(None),
        }
    }

    /// Sets the resolved location at the target level.
    pub fn select_deepest(&self, id: Option<LocationId>) -> StorefrontResult<()> {
        self.lock().select_deepest(id)?;
        Ok(())
    }

    async fn fetch(&self, ticket: FetchTicket) -> StorefrontResult<ApplyOutcome> {
        debug!(level = ?ticket.level, parent = ?ticket.parent, generation = ticket.generation, "Fetching location options");
        let result = self.api.list_locations(ticket.level, ticket.parent).await;

        let mut resolver = self.lock();
        match result {
            Ok(nodes) => {
                let outcome = resolver.apply_options(ticket, nodes);
                match outcome {
                    ApplyOutcome::Stale => {
                        debug!(level = ?ticket.level, "Discarded superseded location response")
                    }
                    _ => debug!(level = ?ticket.level, ?outcome, "Location options loaded"),
                }
                Ok(outcome)
            }
            Err(source) => match resolver.apply_failure(ticket) {
                ApplyOutcome::Stale => {
                    debug!(level = ?ticket.level, error = %source, "Ignoring failure of superseded fetch");
                    Ok(ApplyOutcome::Stale)
                }
                _ => {
                    warn!(level = ?ticket.level, error = %source, "Location fetch failed");
                    Err(StorefrontError::LocationFetch {
                        level: ticket.level,
                        source,
                    })
                }
            },
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub fn target(&self) -> LocationLevel {
        self.lock().target()
    }

    pub fn options(&self, level: LocationLevel) -> Vec<LocationNode> {
        self.lock().options(level).to_vec()
    }

    pub fn selected(&self, level: LocationLevel) -> Option<LocationId> {
        self.lock().selected(level)
    }

    pub fn is_loading(&self, level: LocationLevel) -> bool {
        self.lock().is_loading(level)
    }

    pub fn resolved(&self) -> Option<LocationId> {
        self.lock().resolved()
    }

    pub fn selected_path(&self) -> Vec<LocationId> {
        self.lock().selected_path()
    }
}
