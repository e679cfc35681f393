//! Error type
use crate::config::ConfigError;
use crate::simulation::RunError;
use crate::spaces::InvalidStateKind;
use thiserror::Error;

/// Error from the smartcab crate.
#[derive(Error, Debug)]
pub enum SmartcabError {
    #[error("invalid state")]
    InvalidState(#[from] InvalidStateKind),
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    #[error("run failed")]
    Run(#[from] RunError),
}
