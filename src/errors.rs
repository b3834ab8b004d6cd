// src/errors.rs

//! Crate-wide error type and its mapping onto process exit codes.

use std::io::Write;

use thiserror::Error;

use crate::ecs::ProviderError;

#[derive(Error, Debug)]
pub enum DeployError {
    /// Missing flag or malformed `-v` entry. The message is the usage hint.
    #[error("{0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Fetch(ProviderError),

    #[error("{0}")]
    Register(ProviderError),

    #[error("{0}")]
    Update(ProviderError),

    #[error("{0}")]
    Wait(String),

    #[error("service did not become stable after {attempts} attempts")]
    WaitTimeout { attempts: u32 },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl DeployError {
    /// Exit status for this failure.
    ///
    /// | code | failure                         |
    /// |------|---------------------------------|
    /// | 2    | invalid input or config file    |
    /// | 3    | fetching the task definition    |
    /// | 4    | registering the new revision    |
    /// | 5    | updating the service            |
    /// | 6    | waiting for a stable service    |
    pub fn exit_code(&self) -> i32 {
        match self {
            DeployError::Input(_) | DeployError::Config(_) | DeployError::Toml(_) => 2,
            DeployError::Fetch(_) => 3,
            DeployError::Register(_) => 4,
            DeployError::Update(_) => 5,
            DeployError::Wait(_) | DeployError::WaitTimeout { .. } => 6,
        }
    }

    /// The provider error behind a failed remote call, if any.
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            DeployError::Fetch(e) | DeployError::Register(e) | DeployError::Update(e) => Some(e),
            _ => None,
        }
    }
}

/// Exit status for a failed run.
///
/// Legacy mode reproduces the historical behaviour where every failure path
/// printed its message and still exited 0.
pub fn exit_status(err: &DeployError, legacy: bool) -> i32 {
    if legacy { 0 } else { err.exit_code() }
}

/// Print a failed run's message and pick its exit status.
///
/// Deploy failures belong to the run record and are written to `out`
/// (stdout in the binary). Anything else, such as a logging setup failure,
/// goes to stderr and exits 1.
pub fn report_failure(err: &anyhow::Error, legacy: bool, out: &mut impl Write) -> i32 {
    match err.downcast_ref::<DeployError>() {
        Some(deploy_err) => {
            let _ = writeln!(out, "{deploy_err}");
            exit_status(deploy_err, legacy)
        }
        None => {
            eprintln!("ecs-deploy error: {err:?}");
            if legacy { 0 } else { 1 }
        }
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;
