//! Argument validation and reshaping, applied before anything is sent.
//!
//! - [`units`]: display amount ⇄ atomic integer conversion.
//! - [`destinations`]: transfer destination list normalization.
//! - [`schema`]: declarative per-operation schemas for optional wallet
//!   parameters.

pub mod destinations;
pub mod schema;
pub mod units;

pub use destinations::{normalize_destinations, AtomicDestination, Destination};
pub use schema::{check_allowed_keys, FieldKind, FieldSpec, ParamSchema};
pub use units::{to_atomic, to_display, ATOMIC_SCALE};
