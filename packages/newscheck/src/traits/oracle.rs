//! External trust collaborator traits.
//!
//! The internal logic of these collaborators is out of scope - each is
//! consumed as a pure function with a defined contract, assumed fallible,
//! and always called under the configured deadline.

use async_trait::async_trait;

use crate::error::OracleResult;
use crate::types::verdict::{Credibility, FactVerdict, MisinfoVerdict};

/// Misinformation classifier.
#[async_trait]
pub trait MisinfoOracle: Send + Sync {
    /// Classify article text; returns a verdict and an explanation.
    async fn detect(&self, text: &str) -> OracleResult<(MisinfoVerdict, String)>;
}

/// Fact-check oracle.
#[async_trait]
pub trait FactCheckOracle: Send + Sync {
    /// Check a claim against context; returns a verdict and evidence text.
    async fn check(&self, claim: &str, context: &str) -> OracleResult<(FactVerdict, String)>;
}

/// Source credibility lookup.
#[async_trait]
pub trait CredibilityProvider: Send + Sync {
    /// Credibility for a source label.
    async fn credibility(&self, source_name: &str) -> OracleResult<Credibility>;
}
