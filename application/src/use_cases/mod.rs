//! Application use cases

pub mod run_council;
pub mod select_roster;

pub use run_council::{RunCouncilError, RunCouncilInput, RunCouncilOutcome, RunCouncilUseCase};
pub use select_roster::{
    SelectRosterError, SelectRosterInput, SelectRosterOutput, SelectRosterUseCase,
};
