//! Dependency resolution.
//!
//! Resolution runs per dependency, in priority order: PATH probe, then an
//! install-path pattern scan across all logical drives, then the interactive
//! fallback (manual path, auto-fetch, or decline). Results accumulate in a
//! [`state::ResolutionState`] persisted to `.rigger/config.json`; a persisted
//! state short-circuits probing entirely on later runs.

pub mod fallback;
pub mod patterns;
pub mod probe;
pub mod state;

pub use fallback::{decide, FallbackDecision};
pub use probe::{Origin, Resolution, Resolver};
pub use state::ResolutionState;
