//! # Location Resolver
//!
//! Dependent selection over the administrative hierarchy
//! province → district → sector → cell → village.
//!
//! ## How a Selection Flows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  select(PROVINCE, Some(A))                                              │
//! │    │                                                                    │
//! │    ├── selected[PROVINCE] = A                                           │
//! │    ├── DISTRICT..VILLAGE: selection = None, options = [], gen += 1      │
//! │    ├── resolved = None                                                  │
//! │    └── returns FetchTicket { DISTRICT, parent: A, gen: g }              │
//! │                                                                         │
//! │  (driver fetches /locations/districts?provinceId=A)                     │
//! │                                                                         │
//! │  apply_options(ticket, nodes)                                           │
//! │    ├── gen[DISTRICT] != g         → Stale (a newer selection won)       │
//! │    ├── selected[PROVINCE] != A    → Stale                               │
//! │    └── else keep nodes with parentId == A → Applied(n)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module holds state only. It never performs a fetch; it hands out
//! tickets and the async driver brings the answers back.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Levels and Nodes
// =============================================================================

/// Backend-issued location identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct LocationId(i64);

impl LocationId {
    #[inline]
    pub const fn new(raw: i64) -> Self {
        LocationId(raw)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationLevel {
    Province,
    District,
    Sector,
    Cell,
    Village,
}

impl LocationLevel {
    /// Every level, shallowest first.
    pub const ALL: [LocationLevel; 5] = [
        LocationLevel::Province,
        LocationLevel::District,
        LocationLevel::Sector,
        LocationLevel::Cell,
        LocationLevel::Village,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn child(&self) -> Option<LocationLevel> {
        match self {
            LocationLevel::Province => Some(LocationLevel::District),
            LocationLevel::District => Some(LocationLevel::Sector),
            LocationLevel::Sector => Some(LocationLevel::Cell),
            LocationLevel::Cell => Some(LocationLevel::Village),
            LocationLevel::Village => None,
        }
    }

    pub const fn parent(&self) -> Option<LocationLevel> {
        match self {
            LocationLevel::Province => None,
            LocationLevel::District => Some(LocationLevel::Province),
            LocationLevel::Sector => Some(LocationLevel::District),
            LocationLevel::Cell => Some(LocationLevel::Sector),
            LocationLevel::Village => Some(LocationLevel::Cell),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            LocationLevel::Province => "PROVINCE",
            LocationLevel::District => "DISTRICT",
            LocationLevel::Sector => "SECTOR",
            LocationLevel::Cell => "CELL",
            LocationLevel::Village => "VILLAGE",
        }
    }
}

impl fmt::Display for LocationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable place at some level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LocationNode {
    pub id: LocationId,
    pub name: String,
    pub level: LocationLevel,
    /// `None` only for provinces.
    pub parent_id: Option<LocationId>,
}

// =============================================================================
// Tickets
// =============================================================================

/// A fetch the resolver is waiting on.
///
/// Hand it back with the result; the resolver decides whether the answer
/// is still wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Level whose options are being fetched.
    pub level: LocationLevel,
    /// Selected id at the parent level when the fetch was issued.
    pub parent: Option<LocationId>,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Options populated with this many nodes.
    Applied(usize),
    /// The selection that asked for this fetch has since changed.
    Stale,
    /// Current fetch failed; options stay empty.
    Failed,
}

// =============================================================================
// Resolver
// =============================================================================

#[derive(Debug, Clone, Default)]
struct LevelSlot {
    selected: Option<LocationId>,
    options: Vec<LocationNode>,
    generation: u64,
    loading: bool,
}

impl LevelSlot {
    /// Forgets selection and options; outstanding tickets become stale.
    fn reset(&mut self) {
        self.selected = None;
        self.options.clear();
        self.loading = false;
        self.generation += 1;
    }
}

/// Cascading selection state down to a target level.
///
/// Staff signup resolves to `VILLAGE`; company creation to `PROVINCE`.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    target: LocationLevel,
    slots: [LevelSlot; 5],
    resolved: Option<LocationId>,
}

impl LocationResolver {
    pub fn new(target: LocationLevel) -> Self {
        LocationResolver {
            target,
            slots: Default::default(),
            resolved: None,
        }
    }

    pub fn target(&self) -> LocationLevel {
        self.target
    }

    /// Clears everything and asks for the province list.
    pub fn initialize(&mut self) -> FetchTicket {
        for slot in &mut self.slots {
            slot.reset();
        }
        self.resolved = None;
        self.begin_fetch(LocationLevel::Province, None)
    }

    fn begin_fetch(&mut self, level: LocationLevel, parent: Option<LocationId>) -> FetchTicket {
        let slot = &mut self.slots[level.index()];
        slot.loading = true;
        FetchTicket {
            level,
            parent,
            generation: slot.generation,
        }
    }

    /// Selects `id` at `level` (or clears it with `None`).
    ///
    /// ## Behavior
    /// - Every deeper level loses its selection and options
    /// - The resolved id is cleared
    /// - At the target level a selection resolves immediately, no fetch
    /// - Above it, `Some(id)` returns the ticket for the child level
    ///
    /// ## Errors
    /// State is untouched when the call fails:
    /// - `LevelBeyondTarget`: `level` is deeper than the target
    /// - `ParentNotSelected`: the parent level has no selection
    /// - `LocationNotOffered`: `id` is not in the level's current options
    pub fn select(&mut self, level: LocationLevel, id: Option<LocationId>) -> CoreResult<Option<FetchTicket>> {
        if level > self.target {
            return Err(CoreError::LevelBeyondTarget {
                level,
                target: self.target,
            });
        }

        if let Some(parent) = level.parent() {
            if self.slots[parent.index()].selected.is_none() {
                return Err(CoreError::ParentNotSelected { level });
            }
        }

        if let Some(id) = id {
            if !self.slots[level.index()].options.iter().any(|n| n.id == id) {
                return Err(CoreError::LocationNotOffered { level, id });
            }
        }

        self.slots[level.index()].selected = id;
        for slot in &mut self.slots[level.index() + 1..] {
            slot.reset();
        }
        self.resolved = None;

        if level == self.target {
            self.resolved = id;
            return Ok(None);
        }

        match (id, level.child()) {
            (Some(id), Some(child)) => Ok(Some(self.begin_fetch(child, Some(id)))),
            _ => Ok(None),
        }
    }

    /// Selects at the target level.
    pub fn select_deepest(&mut self, id: Option<LocationId>) -> CoreResult<()> {
        self.select(self.target, id).map(|_| ())
    }

    fn is_current(&self, ticket: &FetchTicket) -> bool {
        let slot = &self.slots[ticket.level.index()];
        if slot.generation != ticket.generation {
            return false;
        }

        match ticket.level.parent() {
            Some(parent) => self.slots[parent.index()].selected == ticket.parent,
            None => ticket.parent.is_none(),
        }
    }

    /// Applies fetched options for `ticket`.
    ///
    /// Nodes from another level, or naming another parent, are dropped.
    /// Nodes without a parent id are taken as children of the ticket's
    /// parent.
    pub fn apply_options(&mut self, ticket: FetchTicket, nodes: Vec<LocationNode>) -> ApplyOutcome {
        if !self.is_current(&ticket) {
            return ApplyOutcome::Stale;
        }

        let slot = &mut self.slots[ticket.level.index()];
        slot.options = nodes
            .into_iter()
            .filter(|n| n.level == ticket.level)
            .filter_map(|mut n| match n.parent_id {
                None => {
                    n.parent_id = ticket.parent;
                    Some(n)
                }
                Some(parent) if Some(parent) == ticket.parent => Some(n),
                Some(_) => None,
            })
            .collect();
        slot.loading = false;
        ApplyOutcome::Applied(slot.options.len())
    }

    /// Records a failed fetch for `ticket`. Options stay empty.
    pub fn apply_failure(&mut self, ticket: FetchTicket) -> ApplyOutcome {
        if !self.is_current(&ticket) {
            return ApplyOutcome::Stale;
        }

        let slot = &mut self.slots[ticket.level.index()];
        slot.options.clear();
        slot.loading = false;
        ApplyOutcome::Failed
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn options(&self, level: LocationLevel) -> &[LocationNode] {
        &self.slots[level.index()].options
    }

    pub fn selected(&self, level: LocationLevel) -> Option<LocationId> {
        self.slots[level.index()].selected
    }

    pub fn is_loading(&self, level: LocationLevel) -> bool {
        self.slots[level.index()].loading
    }

    /// Id at the target level once chosen.
    pub fn resolved(&self) -> Option<LocationId> {
        self.resolved
    }

    /// Selected ids from `PROVINCE` down, stopping at the first gap.
    pub fn selected_path(&self) -> Vec<LocationId> {
        self.slots.iter().map_while(|slot| slot.selected).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
