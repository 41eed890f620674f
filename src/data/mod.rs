//! Catalog loading and validation.

mod loader;

pub use loader::{Catalog, LoadError};
