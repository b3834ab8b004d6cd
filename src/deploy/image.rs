// src/deploy/image.rs

//! `-v` entries and the container image rewrite.

use std::fmt;
use std::str::FromStr;

use aws_sdk_ecs::types::ContainerDefinition;
use tracing::{debug, warn};

use crate::errors::{DeployError, Result};

const MALFORMED_IMAGE: &str = "exit: value of -v has to be like <image path>:<image version>";

/// One `<image path>:<tag>` replacement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageSpec {
    path: String,
    tag: String,
}

impl ImageSpec {
    /// Parse a single entry. It must contain exactly one `:` with text on
    /// both sides, so registry ports (`host:5000/app:1`) are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.trim().split(':').collect();
        match parts.as_slice() {
            [path, tag] if !path.is_empty() && !tag.is_empty() => Ok(Self {
                path: (*path).to_string(),
                tag: (*tag).to_string(),
            }),
            _ => Err(DeployError::Input(MALFORMED_IMAGE.to_string())),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The full image reference written into matching containers.
    pub fn reference(&self) -> String {
        format!("{}:{}", self.path, self.tag)
    }
}

impl FromStr for ImageSpec {
    type Err = DeployError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ImageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.tag)
    }
}

/// Parse the comma separated `-v` value. One bad entry rejects the lot.
pub fn parse_image_list(raw: &str) -> Result<Vec<ImageSpec>> {
    raw.split(',').map(str::parse).collect()
}

/// A single container image replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRewrite {
    pub container: Option<String>,
    pub previous: String,
    pub image: String,
}

/// Point every container whose image contains a spec's path at that spec's
/// reference.
///
/// Matching is plain substring containment, so `repo/a` also hits
/// `repo/ab`. Specs are applied in order and each one scans every container,
/// later specs therefore win when several match the same container. A spec
/// that matches nothing is logged and skipped. Containers without an image
/// are never touched.
pub fn rewrite_images(
    containers: &mut [ContainerDefinition],
    specs: &[ImageSpec],
) -> Vec<ImageRewrite> {
    let mut rewrites = Vec::new();

    for spec in specs {
        let mut matched = false;
        for container in containers.iter_mut() {
            let Some(current) = container.image.as_deref() else {
                continue;
            };
            if !current.contains(spec.path()) {
                continue;
            }
            matched = true;
            let rewrite = ImageRewrite {
                container: container.name.clone(),
                previous: current.to_string(),
                image: spec.reference(),
            };
            debug!(container = ?rewrite.container, from = %rewrite.previous, to = %rewrite.image, "rewriting image");
            container.image = Some(rewrite.image.clone());
            rewrites.push(rewrite);
        }
        if !matched {
            warn!(image = %spec, "no container image matches this path; ignoring");
        }
    }

    rewrites
}
