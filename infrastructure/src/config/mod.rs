//! Configuration loading and raw file structures

pub mod file_config;
pub mod loader;

pub use file_config::{
    FileAgentConfig, FileConfig, FileCouncilConfig, FileDomainConfig, FileOutputConfig,
    FileQuestionPattern,
};
pub use loader::ConfigLoader;
