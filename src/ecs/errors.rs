// src/ecs/errors.rs

//! Classification of errors returned by the orchestration API.
//!
//! Every remote call funnels its failure through [`classify`], so the set of
//! recognised error codes lives in exactly one place.

use std::fmt;

/// Taxonomy of provider errors the deploy driver knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorKind {
    Server,
    Client,
    InvalidParameter,
    ClusterNotFound,
    ServiceNotFound,
    ServiceNotActive,
    PlatformUnknown,
    PlatformTaskDefinitionIncompatibility,
    AccessDenied,
    /// Anything not recognised above, including transport failures.
    Unclassified,
}

impl ProviderErrorKind {
    /// The provider's error code for this kind.
    pub fn code(self) -> Option<&'static str> {
        match self {
            ProviderErrorKind::Server => Some("ServerException"),
            ProviderErrorKind::Client => Some("ClientException"),
            ProviderErrorKind::InvalidParameter => Some("InvalidParameterException"),
            ProviderErrorKind::ClusterNotFound => Some("ClusterNotFoundException"),
            ProviderErrorKind::ServiceNotFound => Some("ServiceNotFoundException"),
            ProviderErrorKind::ServiceNotActive => Some("ServiceNotActiveException"),
            ProviderErrorKind::PlatformUnknown => Some("PlatformUnknownException"),
            ProviderErrorKind::PlatformTaskDefinitionIncompatibility => {
                Some("PlatformTaskDefinitionIncompatibilityException")
            }
            ProviderErrorKind::AccessDenied => Some("AccessDeniedException"),
            ProviderErrorKind::Unclassified => None,
        }
    }
}

const KNOWN_KINDS: [ProviderErrorKind; 9] = [
    ProviderErrorKind::Server,
    ProviderErrorKind::Client,
    ProviderErrorKind::InvalidParameter,
    ProviderErrorKind::ClusterNotFound,
    ProviderErrorKind::ServiceNotFound,
    ProviderErrorKind::ServiceNotActive,
    ProviderErrorKind::PlatformUnknown,
    ProviderErrorKind::PlatformTaskDefinitionIncompatibility,
    ProviderErrorKind::AccessDenied,
];

/// Map a provider error code onto the taxonomy.
pub fn classify(code: Option<&str>) -> ProviderErrorKind {
    let Some(code) = code else {
        return ProviderErrorKind::Unclassified;
    };
    KNOWN_KINDS
        .into_iter()
        .find(|kind| kind.code() == Some(code))
        .unwrap_or(ProviderErrorKind::Unclassified)
}

/// A failed remote call, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            kind: classify(code),
            code: code.map(str::to_owned),
            message: message.into(),
        }
    }

    /// An error that did not come with a provider error code.
    pub fn unclassified(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind.code(), self.code.as_deref()) {
            (Some(category), _) => write!(f, "{category} {}", self.message),
            (None, Some(code)) => write!(f, "{code}: {}", self.message),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_round_trips() {
        for kind in KNOWN_KINDS {
            assert_eq!(classify(kind.code()), kind);
        }
    }

    #[test]
    fn unknown_and_missing_codes_are_unclassified() {
        assert_eq!(classify(Some("ThrottlingException")), ProviderErrorKind::Unclassified);
        assert_eq!(classify(None), ProviderErrorKind::Unclassified);
    }

    #[test]
    fn display_prefixes_the_category() {
        let err = ProviderError::new(Some("ClusterNotFoundException"), "Cluster not found.");
        assert_eq!(err.to_string(), "ClusterNotFoundException Cluster not found.");

        let err = ProviderError::new(Some("ThrottlingException"), "Rate exceeded");
        assert_eq!(err.to_string(), "ThrottlingException: Rate exceeded");

        let err = ProviderError::unclassified("dispatch failure");
        assert_eq!(err.to_string(), "dispatch failure");
    }
}
