//! Application layer for the council deliberation engine
//!
//! Use cases orchestrate the domain model; ports define the interfaces
//! that infrastructure and presentation adapters implement.

pub mod config;
pub mod ports;
pub mod use_cases;

pub use config::CouncilParams;
pub use ports::{
    MemoryParticipationStore, NoOutput, OutputAdapter, ParticipationStore, PerspectiveProvider,
    ProviderError, StoreError, SynthesisError, Synthesizer,
};
pub use use_cases::{
    RunCouncilError, RunCouncilInput, RunCouncilOutcome, RunCouncilUseCase, SelectRosterError,
    SelectRosterInput, SelectRosterOutput, SelectRosterUseCase,
};
