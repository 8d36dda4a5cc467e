#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # hrcp
//!
//! Hierarchical resource configuration with propagation.
//!
//! Resources live in a tree addressed by `/`-separated paths. Each resource
//! carries local attributes; reading an attribute through a
//! [`PropagationMode`] decides how values flow between ancestors and
//! descendants, and [`Provenance`] explains where a resolved value came
//! from.
//!
//! ## Core Types
//!
//! - [`ResourceTree`], [`Resource`] and [`ResourceRef`]: the tree and views
//!   into it
//! - [`PropagationMode`] and [`Provenance`]: attribute resolution
//! - [`wildcard::Pattern`]: `*` / `**` path queries
//! - [`schema::SchemaRegistry`]: per-attribute validation
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use hrcp::{PropagationMode, ResourceTree};
//! use serde_json::json;
//!
//! let mut tree = ResourceTree::new("platform").unwrap();
//! tree.set_attribute("/platform", "timeout", json!(30)).unwrap();
//! tree.create("/platform/us-east/api", None).unwrap();
//!
//! let timeout = tree
//!     .resolve("/platform/us-east/api", "timeout", PropagationMode::Inherit)
//!     .unwrap();
//! assert_eq!(timeout, Some(json!(30)));
//!
//! let apis = tree.query("/platform/*/api").unwrap();
//! assert_eq!(apis.len(), 1);
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod operations;
pub mod output;
pub mod path;
pub mod propagation;
pub mod resource;
pub mod schema;
pub mod search;
pub mod serialization;
pub mod tree;
pub mod wildcard;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::PathRelationship;
pub use propagation::{PropagationMode, Provenance};
pub use resource::{Attributes, Resource, ResourceId};
pub use schema::{PropertySchema, SchemaRegistry, ValueType};
pub use serialization::{ResourceRecord, TreeFormat};
pub use tree::{ResourceRef, ResourceTree, Walk};
pub use wildcard::Pattern;
