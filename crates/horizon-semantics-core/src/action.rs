//! Numeric action identifiers and the action registry.
//!
//! Native accessibility services invoke actions by integer ID, while
//! producers name them with free-form strings. The [`ActionRegistry`] binds
//! the two: well-known names reuse fixed native IDs, every other name gets a
//! fresh ID from a counter that starts above the native range.
//!
//! Entries are never removed. A name keeps its ID for the lifetime of the
//! registry, and the same name shares one ID across every element.
//!
//! # Example
//!
//! ```
//! use horizon_semantics_core::action::{ActionId, ActionRegistry};
//!
//! let registry = ActionRegistry::new();
//!
//! assert_eq!(registry.resolve_id("activate")?, ActionId::CLICK);
//!
//! let bookmark = registry.resolve_id("bookmark")?;
//! assert!(bookmark >= ActionId::DYNAMIC_BASE);
//! assert_eq!(registry.resolve_id("bookmark")?, bookmark);
//! assert_eq!(registry.resolve_name(bookmark).as_deref(), Some("bookmark"));
//! # Ok::<(), horizon_semantics_core::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::logging::targets;

/// A numeric accessibility action identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionId(pub i32);

impl ActionId {
    /// Native click.
    pub const CLICK: Self = Self(0x0000_0010);
    /// Native long click.
    pub const LONG_CLICK: Self = Self(0x0000_0020);
    /// Native scroll forward, used for increments.
    pub const SCROLL_FORWARD: Self = Self(0x0000_1000);
    /// Native scroll backward, used for decrements.
    pub const SCROLL_BACKWARD: Self = Self(0x0000_2000);

    /// Default seed of the dynamic ID counter, and the lowest seed accepted.
    ///
    /// Native frameworks keep their own action and resource IDs below this.
    pub const DYNAMIC_BASE: Self = Self(0x3f00_0000);

    /// The largest ID the dynamic counter may hand out.
    pub const DYNAMIC_MAX: Self = Self(i32::MAX);

    /// The raw integer value.
    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<i32> for ActionId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

/// Action names bound to fixed native IDs.
pub const RESERVED_ACTIONS: [(&str, ActionId); 4] = [
    ("activate", ActionId::CLICK),
    ("longpress", ActionId::LONG_CLICK),
    ("increment", ActionId::SCROLL_FORWARD),
    ("decrement", ActionId::SCROLL_BACKWARD),
];

/// Look up the fixed native ID of a reserved action name.
pub fn reserved_action_id(name: &str) -> Option<ActionId> {
    RESERVED_ACTIONS
        .iter()
        .find(|(reserved, _)| *reserved == name)
        .map(|(_, id)| *id)
}

#[derive(Debug)]
struct RegistryTables {
    by_name: HashMap<String, ActionId>,
    by_id: HashMap<ActionId, String>,
    /// `None` once `ActionId::DYNAMIC_MAX` has been handed out.
    next_id: Option<i32>,
}

/// Process-wide table binding action names to numeric IDs.
///
/// All reads and the check-then-allocate sequence run under one lock, so a
/// registry can be shared between threads behind an [`Arc`].
#[derive(Debug)]
pub struct ActionRegistry {
    tables: Mutex<RegistryTables>,
    base: ActionId,
}

/// A registry shared between installers and dispatchers.
pub type SharedActionRegistry = Arc<ActionRegistry>;

impl ActionRegistry {
    /// Create an empty registry seeded at [`ActionId::DYNAMIC_BASE`].
    pub fn new() -> Self {
        Self::seeded(ActionId::DYNAMIC_BASE)
    }

    /// Create an empty registry whose dynamic IDs start at `base`.
    ///
    /// Fails if `base` lies inside the native range, that is below
    /// [`native_ceiling`](Self::native_ceiling).
    pub fn with_base(base: i32) -> Result<Self> {
        let ceiling = Self::native_ceiling();
        if base < ceiling.0 {
            return Err(Error::ReservedActionRange {
                base,
                ceiling: ceiling.0,
            });
        }
        Ok(Self::seeded(ActionId(base)))
    }

    fn seeded(base: ActionId) -> Self {
        Self {
            tables: Mutex::new(RegistryTables {
                by_name: HashMap::new(),
                by_id: HashMap::new(),
                next_id: Some(base.0),
            }),
            base,
        }
    }

    /// The lowest ID a dynamic allocation may take under any seed.
    ///
    /// Every reserved action and every other native action or resource ID
    /// lies below it.
    pub fn native_ceiling() -> ActionId {
        ActionId::DYNAMIC_BASE
    }

    /// The first ID handed out for a non-reserved name.
    pub fn base(&self) -> ActionId {
        self.base
    }

    /// Resolve `name` to its action ID, allocating one on first use.
    ///
    /// Reserved names always map to their fixed native ID. Any other name
    /// keeps the ID it was first given.
    ///
    /// Fails with [`Error::ActionIdsExhausted`] when a new name needs an ID
    /// and the counter has passed [`ActionId::DYNAMIC_MAX`]. Names resolved
    /// before that keep working.
    pub fn resolve_id(&self, name: &str) -> Result<ActionId> {
        let mut tables = self.tables.lock();

        if let Some(&id) = tables.by_name.get(name) {
            tracing::trace!(target: targets::REGISTRY, action = name, %id, "action id reused");
            return Ok(id);
        }

        let id = match reserved_action_id(name) {
            Some(id) => id,
            None => {
                let Some(raw) = tables.next_id else {
                    tracing::warn!(
                        target: targets::REGISTRY,
                        action = name,
                        "action ids exhausted"
                    );
                    return Err(Error::ActionIdsExhausted { base: self.base.0 });
                };
                tables.next_id = raw.checked_add(1);
                let id = ActionId(raw);
                tracing::debug!(
                    target: targets::REGISTRY,
                    action = name,
                    %id,
                    "allocated action id"
                );
                id
            }
        };

        tables.by_name.insert(name.to_owned(), id);
        tables.by_id.insert(id, name.to_owned());
        Ok(id)
    }

    /// Reverse lookup of an ID produced by [`resolve_id`](Self::resolve_id).
    ///
    /// Returns `None` for IDs this registry never handed out, including
    /// native IDs installed by other code paths; those belong to default
    /// handling.
    pub fn resolve_name(&self, id: ActionId) -> Option<String> {
        self.tables.lock().by_id.get(&id).cloned()
    }

    /// Whether `name` has been resolved before.
    pub fn contains(&self, name: &str) -> bool {
        self.tables.lock().by_name.contains_key(name)
    }

    /// Number of names resolved so far.
    pub fn len(&self) -> usize {
        self.tables.lock().by_name.len()
    }

    /// Whether no name has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.tables.lock().by_name.is_empty()
    }

    /// Snapshot of all `(id, name)` entries, ordered by ID.
    pub fn entries(&self) -> Vec<(ActionId, String)> {
        let tables = self.tables.lock();
        let mut entries: Vec<_> = tables
            .by_id
            .iter()
            .map(|(id, name)| (*id, name.clone()))
            .collect();
        entries.sort_unstable_by_key(|(id, _)| *id);
        entries
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedActionRegistry> = OnceLock::new();

/// The process-wide action registry.
///
/// Hosts that do not inject their own registry share this one, which keeps
/// IDs consistent across every element in the process.
pub fn global_action_registry() -> SharedActionRegistry {
    GLOBAL_REGISTRY
        .get_or_init(|| Arc::new(ActionRegistry::new()))
        .clone()
}
