use crate::models::{ArticleAnalysis, ClaimVerification, EvidenceSnippet};
use crate::pipeline::completion::ChatMessage;
use crate::Result;
use async_trait::async_trait;

/// Narrow view of a chat-completion service. `Ok(None)` means the service
/// answered without any content.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>>;
}

/// Web evidence for a claim. Infallible: failures degrade to no evidence.
#[async_trait]
pub trait EvidenceSearch: Send + Sync {
    async fn search(&self, claim: &str) -> Vec<EvidenceSnippet>;
}

#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    async fn extract(&self, article: &str) -> Result<ArticleAnalysis>;
}

#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    /// Adjudicates `claim` using only `evidence`.
    async fn verify(&self, claim: &str, evidence: &[EvidenceSnippet])
        -> Result<ClaimVerification>;
}
