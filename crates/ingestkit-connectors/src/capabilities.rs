//! Optional capability detection.
//!
//! Connectors that need a third-party stack are compiled behind Cargo
//! features. Callers check the capability before constructing such a
//! connector so that a missing feature surfaces as a distinct error
//! instead of a link or runtime failure deep inside the connector.

use serde::{Deserialize, Serialize};

use ingestkit_core::{Error, Result};

/// An optional capability provided by a Cargo feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// GitHub REST client (reqwest + base64).
    GitHub,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GitHub => write!(f, "github"),
        }
    }
}

impl Capability {
    /// All known capabilities.
    pub const ALL: &'static [Capability] = &[Capability::GitHub];

    /// Cargo feature that enables this capability.
    pub fn feature(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
        }
    }

    /// Whether this capability was compiled in.
    pub fn is_available(&self) -> bool {
        match self {
            Self::GitHub => cfg!(feature = "github"),
        }
    }

    /// Fail with [`Error::MissingCapability`] unless compiled in.
    pub fn require(self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(Error::MissingCapability {
                capability: match self {
                    Self::GitHub => "GitHub API client",
                },
                feature: self.feature(),
            })
        }
    }
}

/// Capabilities compiled into this build.
pub fn available() -> Vec<Capability> {
    Capability::ALL
        .iter()
        .copied()
        .filter(|c| c.is_available())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_names() {
        assert_eq!(Capability::GitHub.feature(), "github");
        assert_eq!(Capability::GitHub.to_string(), "github");
    }

    #[cfg(feature = "github")]
    #[test]
    fn test_github_available() {
        assert!(Capability::GitHub.require().is_ok());
        assert!(available().contains(&Capability::GitHub));
    }

    #[cfg(not(feature = "github"))]
    #[test]
    fn test_github_missing() {
        let err = Capability::GitHub.require().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingCapability { feature: "github", .. }
        ));
        assert!(err.to_string().contains("--features github"));
    }
}
