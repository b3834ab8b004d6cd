// src/config/mod.rs

//! Configuration for a deployment run.
//!
//! Responsibilities:
//! - Define the request and settings structs (`model.rs`).
//! - Load the optional TOML tuning file and layer CLI flags over it (`loader.rs`).
//! - Validate required flags and `-v` entries (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, resolve};
pub use model::{
    AwsSection, AwsSettings, DeployConfig, DeployRequest, FileConfig, RawRequest, WaitSection,
    WaitSettings,
};
pub use validate::validate_request;
