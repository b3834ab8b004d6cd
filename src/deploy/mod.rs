// src/deploy/mod.rs

//! The rollout itself.
//!
//! - [`image`] parses `-v` entries and rewrites container images.
//! - [`revision`] builds the register request from the fetched definition.
//! - [`wait`] polls the service until it settles.
//! - [`driver`] runs fetch, rewrite, register, update and wait in order.

pub mod driver;
pub mod image;
pub mod revision;
pub mod wait;

pub use driver::{DeployOutcome, Deployer};
pub use image::{parse_image_list, rewrite_images, ImageRewrite, ImageSpec};
pub use revision::{RevisionRequest, TaskDefinitionRef};
pub use wait::wait_until_stable;
