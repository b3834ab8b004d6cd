// src/config/validate.rs

use crate::config::model::{DeployRequest, RawRequest};
use crate::deploy::parse_image_list;
use crate::errors::{DeployError, Result};

/// Check the five required inputs, in flag order `-c -s -t -v -r`, then
/// parse every `-v` entry.
///
/// The first missing flag wins; nothing is contacted remotely before this
/// passes.
pub fn validate_request(raw: &RawRequest) -> Result<DeployRequest> {
    let cluster = require(
        &raw.cluster,
        "exit: No CLUSTER NAME specified, please use option: -c Example: -c ctrade-TEST-cluster",
    )?;
    let service = require(
        &raw.service,
        "exit: No SERVICE NAME specified, please use option: -s Example: -s bff",
    )?;
    let task_family = require(
        &raw.task_family,
        "exit: No TASK FAMILY specified, please use option: -t Example: -t bff-TEST",
    )?;
    let images = require(
        &raw.images,
        "exit: No IMAGE VERSION specified, please use option: -v Example: -v registry.gitlab.com/modulus-derivatives/goesoteric/bff:20201012.1",
    )?;
    let region = require(
        &raw.region,
        "exit: No REGION specified, please use option: -r Example: -r us-west-2",
    )?;

    Ok(DeployRequest {
        cluster,
        service,
        task_family,
        images: parse_image_list(&images)?,
        region,
    })
}

fn require(value: &Option<String>, hint: &str) -> Result<String> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(DeployError::Input(hint.to_string())),
    }
}
