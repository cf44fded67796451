//! Operators over set-valued timelines.
//!
//! Set-valued conclusions track which entities satisfy some rule over time
//! (the members of a household, the dependents of a taxpayer). The engine
//! only stores and compares entity references; all operators here are plain
//! lifts over the reference sets.

use crate::entity::{EntityId, EntitySet};
use crate::lift::{lift1, lift2};
use crate::timeline::Timeline;

/// Union of two set timelines.
#[must_use]
pub fn union(left: &Timeline<EntitySet>, right: &Timeline<EntitySet>) -> Timeline<EntitySet> {
    lift2(left, right, |a, b| a.union(b).copied().collect())
}

/// Intersection of two set timelines.
#[must_use]
pub fn intersection(
    left: &Timeline<EntitySet>,
    right: &Timeline<EntitySet>,
) -> Timeline<EntitySet> {
    lift2(left, right, |a, b| a.intersection(b).copied().collect())
}

/// Members of `left` not in `right`.
#[must_use]
pub fn difference(
    left: &Timeline<EntitySet>,
    right: &Timeline<EntitySet>,
) -> Timeline<EntitySet> {
    lift2(left, right, |a, b| a.difference(b).copied().collect())
}

/// Whether `member` belongs to the set at each point in time.
#[must_use]
pub fn contains(set: &Timeline<EntitySet>, member: EntityId) -> Timeline<bool> {
    lift1(set, move |s| s.contains(&member))
}

/// Cardinality of the set at each point in time, as a numeric timeline.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn count(set: &Timeline<EntitySet>) -> Timeline<f64> {
    lift1(set, |s| s.len() as f64)
}
