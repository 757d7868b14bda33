//! Core types for spark-headless.
//!
//! These types define the foundation that everything builds on.
//! Tickets flow from the registry through the selection layers and are what
//! a UI binding ultimately reads.

use std::fmt;
use std::hash::Hash;

/// Bound on ticket payloads.
///
/// Values are hashed into the registry's value catalog, so they must be
/// comparable and hashable.
pub trait Payload: Clone + Eq + Hash + 'static {}

impl<T: Clone + Eq + Hash + 'static> Payload for T {}

// =============================================================================
// Ticket Id
// =============================================================================

/// Identifier of a registered ticket.
///
/// Ids are unique within a registry and immutable once assigned. Either a
/// string or a number, so callers can key tickets by whatever they already have.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TicketId {
    Str(String),
    Num(i64),
}

impl TicketId {
    /// String form, if this is a string id.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Num(_) => None,
        }
    }

    /// Numeric form, if this is a numeric id.
    pub fn as_num(&self) -> Option<i64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TicketId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for TicketId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<&String> for TicketId {
    fn from(id: &String) -> Self {
        Self::Str(id.clone())
    }
}

impl From<&TicketId> for TicketId {
    fn from(id: &TicketId) -> Self {
        id.clone()
    }
}

impl From<i64> for TicketId {
    fn from(id: i64) -> Self {
        Self::Num(id)
    }
}

impl From<i32> for TicketId {
    fn from(id: i32) -> Self {
        Self::Num(id as i64)
    }
}

impl From<usize> for TicketId {
    fn from(id: usize) -> Self {
        Self::Num(id as i64)
    }
}

// =============================================================================
// Ticket Value
// =============================================================================

/// Payload associated with a ticket.
///
/// `Index` is the "value mirrors index" case: the ticket was registered without
/// an explicit value, so its value follows its position through every reindex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TicketValue<V> {
    Index(usize),
    Item(V),
}

impl<V> TicketValue<V> {
    /// True if this value is derived from the ticket's index.
    pub fn is_index(&self) -> bool {
        matches!(self, Self::Index(_))
    }

    /// The explicit payload, if any.
    pub fn item(&self) -> Option<&V> {
        match self {
            Self::Item(v) => Some(v),
            Self::Index(_) => None,
        }
    }

    /// Consume into the explicit payload, if any.
    pub fn into_item(self) -> Option<V> {
        match self {
            Self::Item(v) => Some(v),
            Self::Index(_) => None,
        }
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// One registered entry.
///
/// Pure data: the registry owns the authoritative copy and hands out clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<V> {
    pub id: TicketId,
    /// Zero-based position in iteration order.
    pub index: usize,
    pub value: TicketValue<V>,
    /// Excluded from navigation, select-all and automatic selection.
    pub disabled: bool,
}

impl<V> Ticket<V> {
    /// Mirrors the `valueIsIndex` flag: the value is re-derived on reindex.
    pub fn value_is_index(&self) -> bool {
        self.value.is_index()
    }

    /// True if the ticket can take part in navigation and bulk selection.
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}

// =============================================================================
// Ticket Props (registration input)
// =============================================================================

/// Input for [`Registry::register`](crate::Registry::register).
///
/// Everything is optional: a missing id is generated, a missing value mirrors
/// the ticket's index.
#[derive(Debug, Clone)]
pub struct TicketProps<V> {
    pub id: Option<TicketId>,
    pub value: Option<V>,
    pub disabled: bool,
}

impl<V> Default for TicketProps<V> {
    fn default() -> Self {
        Self {
            id: None,
            value: None,
            disabled: false,
        }
    }
}

impl<V> TicketProps<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Props with just an id.
    pub fn with_id(id: impl Into<TicketId>) -> Self {
        Self::new().id(id)
    }

    pub fn id(mut self, id: impl Into<TicketId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn value(mut self, value: V) -> Self {
        self.value = Some(value);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

// =============================================================================
// Ticket Patch (upsert input)
// =============================================================================

/// How an upsert treats the ticket's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValuePatch<V> {
    /// Leave value and index-mirroring untouched.
    #[default]
    Keep,
    /// Replace with an explicit value; the value stops mirroring the index.
    Set(V),
    /// Drop the explicit value; the value mirrors the index again.
    Reset,
}

/// Partial update for [`Registry::upsert`](crate::Registry::upsert).
#[derive(Debug, Clone)]
pub struct TicketPatch<V> {
    pub value: ValuePatch<V>,
    pub disabled: Option<bool>,
}

impl<V> Default for TicketPatch<V> {
    fn default() -> Self {
        Self {
            value: ValuePatch::Keep,
            disabled: None,
        }
    }
}

impl<V> TicketPatch<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: V) -> Self {
        self.value = ValuePatch::Set(value);
        self
    }

    pub fn reset_value(mut self) -> Self {
        self.value = ValuePatch::Reset;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }
}

// =============================================================================
// Direction
// =============================================================================

/// Scan direction for [`Registry::seek`](crate::Registry::seek).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Scan forward from the start (or from the given index).
    #[default]
    First,
    /// Scan backward from the end (or from the given index).
    Last,
}

// =============================================================================
// Mandatory policy
// =============================================================================

/// Whether a selection may become empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mandatory {
    /// Zero selections allowed.
    #[default]
    No,
    /// The last remaining selection cannot be unselected.
    Yes,
    /// Never empty: the first enabled ticket is selected whenever the
    /// selection would otherwise be empty.
    Force,
}

impl Mandatory {
    /// True for both `Yes` and `Force`.
    pub fn is_required(self) -> bool {
        !matches!(self, Self::No)
    }
}

impl From<bool> for Mandatory {
    fn from(mandatory: bool) -> Self {
        if mandatory { Self::Yes } else { Self::No }
    }
}
