//! The resolver graph
//!
//! One resolver wrapper per queryable entity type. Each wrapper owns its
//! decoded record plus a clone of the shared [`Store`](crate::service::Store)
//! handle; scalar accessors are pure projections of the record, while
//! relationship accessors invoke the service layer on demand and wrap the
//! results in fresh child resolvers.
//!
//! There is deliberately no memoization: resolving the same relationship
//! twice within one query execution performs the lookup twice. The query
//! cadence for N users with their posts is 1 + N (+ meta fetches), and that
//! amplification is part of the contract, not an accident to optimize away
//! here.

pub mod post;
pub mod root;
pub mod term;
pub mod user;

pub use post::PostResolver;
pub use root::RootResolver;
pub use term::{TermResolver, TermTaxonomyResolver};
pub use user::UserResolver;

use chrono::NaiveDateTime;

/// Render a storage datetime the way the API exposes it.
pub(crate) fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}
