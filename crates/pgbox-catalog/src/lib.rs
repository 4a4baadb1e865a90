//! Extension catalog for pgbox.
//!
//! Static reference data describing how each known PostgreSQL
//! extension is installed (apt package, direct-download archive, or
//! base-image override) and configured (preload libraries, server
//! parameters, init SQL), plus pure lookup functions over it.

pub mod catalog;
pub mod descriptor;
pub mod error;

pub use catalog::Catalog;
pub use descriptor::{ARCH_PLACEHOLDER, ExtensionDescriptor, VERSION_PLACEHOLDER, host_arch};
pub use error::{Error, Result};
