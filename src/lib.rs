//! # pressgraph
//!
//! A typed GraphQL query layer over a WordPress-compatible MySQL content
//! store. Client field selections resolve into on-demand relational
//! lookups: each entity family has a service that composes optional
//! equality predicates into parameterized SELECTs, and a resolver wrapper
//! that projects the decoded record and fans out into related entities on
//! request.
//!
//! ## Layers
//!
//! - [`core`]: error taxonomy, the external-identifier codec, and the
//!   conditional SELECT builder
//! - [`model`]: plain records mirroring the table columns
//! - [`service`]: SQL construction and row decoding, one service per
//!   entity family, sharing a [`service::Store`] handle
//! - [`resolver`]: the resolver graph the query engine walks, rooted at
//!   [`resolver::RootResolver`]
//! - [`graphql`]: the execution boundary with query parsing, schema
//!   validation, and the depth-first selection walk
//! - [`server`]: the axum route the boundary is mounted on
//! - [`config`]: YAML settings
//!
//! Identifiers are opaque at the boundary: storage keys are 64-bit
//! integers, clients only ever see their decimal text form, and
//! [`core::ExternalId`] is the sole bridge between the two.

pub mod config;
pub mod core;
pub mod graphql;
pub mod model;
pub mod resolver;
pub mod server;
pub mod service;
