//! Error types for agrigenome_core.
//!
//! Per-tick evaluation never reports "nothing happened" as an error. The
//! variants here cover broken collaborator contracts and registration-time
//! failures only.

use crate::genetics::GeneId;
use thiserror::Error;

/// Programmer or configuration errors raised while reading or building genomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneticsError {
    /// A genome or registry was asked for a gene it does not know
    #[error("Gene `{0}` is not registered")]
    UnregisteredGene(GeneId),

    /// The stored pair does not carry the requested payload type
    #[error("Gene `{gene}` does not carry `{expected}` allels")]
    TypeMismatch {
        gene: GeneId,
        expected: &'static str,
    },

    /// A genome was sealed before every registered gene was assigned
    #[error("Genome is missing registered genes: {0:?}")]
    IncompleteGenome(Vec<GeneId>),

    /// A selected parent crop exposed no genome
    #[error("Crop carries no genome")]
    MissingGenome,
}

/// Failures reported to callers registering plants, genes, stats or mutations.
///
/// The registry is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind} `{id}` is already registered")]
    Duplicate { kind: &'static str, id: String },

    #[error("{kind} `{id}` is not registered")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} `{id}` cannot be removed")]
    Protected { kind: &'static str, id: String },

    #[error("Invalid {kind} `{id}`: {reason}")]
    Invalid {
        kind: &'static str,
        id: String,
        reason: String,
    },
}

/// Result type alias for agrigenome_core operations.
pub type Result<T, E = GeneticsError> = std::result::Result<T, E>;

impl RegistryError {
    #[must_use]
    pub fn duplicate<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Self::Duplicate {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn not_found<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn protected<S: Into<String>>(kind: &'static str, id: S) -> Self {
        Self::Protected {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn invalid<S: Into<String>, R: Into<String>>(kind: &'static str, id: S, reason: R) -> Self {
        Self::Invalid {
            kind,
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// True for the duplicate-registration outcome.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
