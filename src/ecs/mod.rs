// src/ecs/mod.rs

//! Orchestration API layer.
//!
//! - [`backend`] defines the `EcsBackend` trait the deploy driver calls.
//! - [`client`] implements it on top of `aws-sdk-ecs`.
//! - [`errors`] classifies provider error codes.

pub mod backend;
pub mod client;
pub mod errors;

pub use backend::{BackendFuture, EcsBackend, EcsOperation, ProviderResult, ServiceSnapshot, Stability};
pub use client::AwsEcsBackend;
pub use errors::{classify, ProviderError, ProviderErrorKind};
