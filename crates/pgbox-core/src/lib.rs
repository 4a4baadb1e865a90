//! Core pipeline for pgbox: conflict-aware aggregation of extension
//! requirements and deterministic container/image naming.

pub mod aggregate;
pub mod error;
pub mod naming;

pub use aggregate::{Aggregation, GucConflict, SqlFragment, aggregate, aggregate_with_arch};
pub use error::{Error, Result};
pub use naming::{NAME_PREFIX, config_hash, container_name, image_name};
