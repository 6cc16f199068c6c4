//! Build dependency definitions.
//!
//! What to probe, where to look, what to download: everything the resolver
//! needs to know about a dependency lives in its [`DependencyDescriptor`].
//! Adding a dependency is a data change in [`registry`], not a code change.

pub mod descriptor;
pub mod registry;

pub use descriptor::{ArchiveLayout, DependencyDescriptor, VersionFlag};
pub use registry::DependencyRegistry;
