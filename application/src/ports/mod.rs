//! Application ports
//!
//! Interfaces the core consumes or produces; adapters live in the
//! infrastructure and presentation layers.

pub mod output;
pub mod participation_store;
pub mod perspective_provider;
pub mod synthesizer;

pub use output::{NoOutput, OutputAdapter};
pub use participation_store::{MemoryParticipationStore, ParticipationStore, StoreError};
pub use perspective_provider::{PerspectiveProvider, ProviderError};
pub use synthesizer::{SynthesisError, Synthesizer};
