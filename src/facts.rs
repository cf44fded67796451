//! The fact boundary.
//!
//! Rules bottom out in queries against a [`FactStore`]: a keyed collection
//! of previously supplied timelines. A [`Session`] wraps a store for one
//! logical evaluation and adds *unknown collection*: while active, a query
//! for a fact nobody has supplied is appended to an ordered pending list
//! exactly once per distinct key. Downstream interview layers read that
//! list to decide what to ask next, which is why the lazy logical
//! combinators matter — operands pruned by a short-circuit are never
//! queried and so never appear in the list.
//!
//! The store is passed in explicitly rather than living in process-wide
//! state, so tests and concurrent callers can each hold their own.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entity::{EntityId, EntitySet};
use crate::error::{StoreError, TemporaResult, ValidationError};
use crate::timeline::Timeline;
use crate::value::TemporalValue;

fn lock_err(context: &'static str) -> StoreError {
    StoreError::Backend {
        message: format!("poisoned lock: {context}"),
    }
}

/// Identifies one fact: a relationship name plus its entity arguments.
///
/// # Examples
///
/// ```
/// use tempora::{EntityId, FactKey};
///
/// let alice = EntityId::new();
/// let key = FactKey::new("is_resident", [alice]).unwrap();
/// assert_eq!(key.relationship(), "is_resident");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FactKey {
    relationship: String,
    args: Vec<EntityId>,
}

impl FactKey {
    /// Creates a fact key.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRelationship`] if the relationship
    /// name is empty.
    pub fn new(
        relationship: impl Into<String>,
        args: impl IntoIterator<Item = EntityId>,
    ) -> Result<Self, ValidationError> {
        let relationship = relationship.into();
        if relationship.trim().is_empty() {
            return Err(ValidationError::EmptyRelationship);
        }
        Ok(Self {
            relationship,
            args: args.into_iter().collect(),
        })
    }

    /// The relationship name.
    #[must_use]
    pub fn relationship(&self) -> &str {
        &self.relationship
    }

    /// The entity arguments, in order.
    #[must_use]
    pub fn args(&self) -> &[EntityId] {
        &self.args
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.relationship)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

/// Storage contract for supplied facts.
///
/// Implementations must be safe to share behind an `Arc`; evaluation itself
/// is single-threaded, and callers that share a store across threads must
/// serialize evaluations themselves.
pub trait FactStore: Send + Sync {
    /// Returns the stored timeline for `key`, if any.
    fn get(&self, key: &FactKey) -> Result<Option<TemporalValue>, StoreError>;

    /// Stores a fact, replacing any previous value for the same key.
    fn assert_fact(&self, key: FactKey, value: TemporalValue) -> Result<(), StoreError>;

    /// Removes a fact.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FactNotFound`] if no such fact exists.
    fn retract(&self, key: &FactKey) -> Result<(), StoreError>;

    /// Returns true if a fact is stored under `key`.
    fn contains(&self, key: &FactKey) -> Result<bool, StoreError>;

    /// Number of stored facts.
    fn len(&self) -> Result<usize, StoreError>;

    /// Returns true if no facts are stored.
    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

/// Thread-safe in-memory fact store, the reference backend for embedded use
/// and tests.
#[derive(Debug, Default)]
pub struct InMemoryFactStore {
    facts: RwLock<HashMap<FactKey, TemporalValue>>,
}

impl InMemoryFactStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FactStore for InMemoryFactStore {
    fn get(&self, key: &FactKey) -> Result<Option<TemporalValue>, StoreError> {
        let facts = self.facts.read().map_err(|_| lock_err("facts.get"))?;
        Ok(facts.get(key).cloned())
    }

    fn assert_fact(&self, key: FactKey, value: TemporalValue) -> Result<(), StoreError> {
        let mut facts = self.facts.write().map_err(|_| lock_err("facts.assert"))?;
        facts.insert(key, value);
        Ok(())
    }

    fn retract(&self, key: &FactKey) -> Result<(), StoreError> {
        let mut facts = self.facts.write().map_err(|_| lock_err("facts.retract"))?;
        if facts.remove(key).is_none() {
            return Err(StoreError::FactNotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn contains(&self, key: &FactKey) -> Result<bool, StoreError> {
        let facts = self.facts.read().map_err(|_| lock_err("facts.contains"))?;
        Ok(facts.contains_key(key))
    }

    fn len(&self) -> Result<usize, StoreError> {
        let facts = self.facts.read().map_err(|_| lock_err("facts.len"))?;
        Ok(facts.len())
    }
}

/// One logical evaluation against a fact store.
///
/// Queries return the stored timeline or the eternal-Unstated default.
/// While unknown collection is active, each distinct missing fact is
/// recorded once, in query order, for a downstream interview to pick up.
pub struct Session {
    store: Arc<dyn FactStore>,
    collecting: bool,
    pending: RwLock<Vec<FactKey>>,
}

impl Session {
    /// Creates a session with unknown collection off.
    #[must_use]
    pub fn new(store: Arc<dyn FactStore>) -> Self {
        Self {
            store,
            collecting: false,
            pending: RwLock::new(Vec::new()),
        }
    }

    /// Creates a session that records missing facts as pending questions.
    #[must_use]
    pub fn collecting(store: Arc<dyn FactStore>) -> Self {
        Self {
            store,
            collecting: true,
            pending: RwLock::new(Vec::new()),
        }
    }

    /// Turns unknown collection on or off.
    pub fn set_collecting(&mut self, collecting: bool) {
        self.collecting = collecting;
    }

    /// Whether unknown collection is active.
    #[must_use]
    pub const fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn FactStore> {
        &self.store
    }

    /// The missing facts recorded so far, in first-query order.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the pending list lock is poisoned.
    pub fn pending_facts(&self) -> TemporaResult<Vec<FactKey>> {
        let pending = self
            .pending
            .read()
            .map_err(|_| lock_err("session.pending"))?;
        Ok(pending.clone())
    }

    /// Clears the pending list, typically between evaluations.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the pending list lock is poisoned.
    pub fn clear_pending(&self) -> TemporaResult<()> {
        let mut pending = self
            .pending
            .write()
            .map_err(|_| lock_err("session.pending"))?;
        pending.clear();
        Ok(())
    }

    /// Stores a fact through this session's store.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty relationship name or a store failure.
    pub fn assert_fact(
        &self,
        relationship: &str,
        args: &[EntityId],
        value: impl Into<TemporalValue>,
    ) -> TemporaResult<()> {
        let key = FactKey::new(relationship, args.iter().copied())?;
        self.store.assert_fact(key, value.into())?;
        Ok(())
    }

    fn lookup(
        &self,
        relationship: &str,
        args: &[EntityId],
    ) -> TemporaResult<Option<TemporalValue>> {
        let key = FactKey::new(relationship, args.iter().copied())?;
        match self.store.get(&key)? {
            Some(value) => Ok(Some(value)),
            None => {
                if self.collecting {
                    let mut pending = self
                        .pending
                        .write()
                        .map_err(|_| lock_err("session.pending"))?;
                    if !pending.contains(&key) {
                        pending.push(key);
                    }
                }
                Ok(None)
            }
        }
    }

    /// Queries a boolean fact.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DomainMismatch`] if the stored fact
    /// belongs to a different domain, or a store failure.
    pub fn query_bool(
        &self,
        relationship: &str,
        args: &[EntityId],
    ) -> TemporaResult<Timeline<bool>> {
        match self.lookup(relationship, args)? {
            None => Ok(Timeline::unstated()),
            Some(value) => value.into_bool().map_err(|other| {
                ValidationError::DomainMismatch {
                    relationship: relationship.to_string(),
                    expected: "boolean",
                    actual: other.domain_name(),
                }
                .into()
            }),
        }
    }

    /// Queries a numeric fact.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DomainMismatch`] if the stored fact
    /// belongs to a different domain, or a store failure.
    pub fn query_number(
        &self,
        relationship: &str,
        args: &[EntityId],
    ) -> TemporaResult<Timeline<f64>> {
        match self.lookup(relationship, args)? {
            None => Ok(Timeline::unstated()),
            Some(value) => value.into_number().map_err(|other| {
                ValidationError::DomainMismatch {
                    relationship: relationship.to_string(),
                    expected: "number",
                    actual: other.domain_name(),
                }
                .into()
            }),
        }
    }

    /// Queries a text fact.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DomainMismatch`] if the stored fact
    /// belongs to a different domain, or a store failure.
    pub fn query_text(
        &self,
        relationship: &str,
        args: &[EntityId],
    ) -> TemporaResult<Timeline<String>> {
        match self.lookup(relationship, args)? {
            None => Ok(Timeline::unstated()),
            Some(value) => value.into_text().map_err(|other| {
                ValidationError::DomainMismatch {
                    relationship: relationship.to_string(),
                    expected: "text",
                    actual: other.domain_name(),
                }
                .into()
            }),
        }
    }

    /// Queries a date fact.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DomainMismatch`] if the stored fact
    /// belongs to a different domain, or a store failure.
    pub fn query_date(
        &self,
        relationship: &str,
        args: &[EntityId],
    ) -> TemporaResult<Timeline<NaiveDate>> {
        match self.lookup(relationship, args)? {
            None => Ok(Timeline::unstated()),
            Some(value) => value.into_date().map_err(|other| {
                ValidationError::DomainMismatch {
                    relationship: relationship.to_string(),
                    expected: "date",
                    actual: other.domain_name(),
                }
                .into()
            }),
        }
    }

    /// Queries a set-valued fact.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DomainMismatch`] if the stored fact
    /// belongs to a different domain, or a store failure.
    pub fn query_set(
        &self,
        relationship: &str,
        args: &[EntityId],
    ) -> TemporaResult<Timeline<EntitySet>> {
        match self.lookup(relationship, args)? {
            None => Ok(Timeline::unstated()),
            Some(value) => value.into_set().map_err(|other| {
                ValidationError::DomainMismatch {
                    relationship: relationship.to_string(),
                    expected: "set",
                    actual: other.domain_name(),
                }
                .into()
            }),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("collecting", &self.collecting)
            .finish_non_exhaustive()
    }
}
