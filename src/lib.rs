//! # Tempora - a temporal rule-evaluation engine
//!
//! Tempora expresses legal and policy logic as compositions of time-varying
//! values with an open-world notion of "unknown." A conclusion is a
//! [`Timeline`]: a step function from date to value whose entries may be
//! literal payloads or unknown markers, because an underlying fact has not
//! been supplied, is contradictory, or the covering rule logic is
//! deliberately unimplemented.
//!
//! ## Core Concepts
//!
//! - **Timeline**: a step function of time with strictly increasing
//!   breakpoints starting at the dawn sentinel
//! - **Knowable**: a value cell that is either a known literal or one of
//!   three unknown markers
//! - **Zip**: synchronized traversal aligning several timelines on their
//!   combined breakpoints (a binary merge-join fast path, plus a general
//!   N-ary fallback)
//! - **Session**: one evaluation against a fact store, recording missing
//!   facts as pending interview questions
//!
//! ## Usage
//!
//! ```rust
//! use tempora::{logic, Knowable, Timeline};
//! use chrono::NaiveDate;
//!
//! let adult = Timeline::from_changes(
//!     Knowable::Known(false),
//!     [(NaiveDate::from_ymd_opt(2021, 6, 1).unwrap(), Knowable::Known(true))],
//! )
//! .unwrap();
//! let resident: Timeline<bool> = Timeline::unstated();
//!
//! // Unknown residency blocks the conclusion only where adulthood holds.
//! let eligible = logic::and(&adult, &resident);
//! assert_eq!(eligible.first().1, Knowable::Known(false));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Value model
pub mod certainty;
pub mod entity;
pub mod error;
pub mod knowable;
pub mod value;

// The temporal algebra
pub mod arith;
pub mod compare;
pub mod elapsed;
pub mod lift;
pub mod logic;
pub mod sets;
pub mod timeline;
pub mod zip;

// External boundaries
pub mod facts;
pub mod recurrence;

// Re-export primary types at crate root for convenience
pub use certainty::{dominant_general, dominant_logic, Certainty};
pub use entity::{entity_set, EntityId, EntitySet};
pub use error::{StoreError, TemporaError, TemporaResult, ValidationError};
pub use facts::{FactKey, FactStore, InMemoryFactStore, Session};
pub use knowable::Knowable;
pub use recurrence::Recurrence;
pub use timeline::{breakpoints, Timeline, DAWN};
pub use value::TemporalValue;
