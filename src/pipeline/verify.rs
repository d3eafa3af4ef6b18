use crate::error::Result;
use crate::models::{ClaimVerification, VerifiedArticleResponse};
use crate::pipeline::traits::{ClaimExtractor, ClaimVerifier, EvidenceSearch};
use std::sync::Arc;
use tracing::{info, warn};

/// Only the first claims of an article are checked against the web.
pub const MAX_VERIFIED_CLAIMS: usize = 3;

/// Extraction, then search and verification of each selected claim in turn.
///
/// A claim whose search or verification fails gets a fallback result; it never
/// takes the article verdict or the other claims down with it.
#[derive(Clone)]
pub struct VerificationPipeline {
    pub extractor: Arc<dyn ClaimExtractor>,
    pub search: Arc<dyn EvidenceSearch>,
    pub verifier: Arc<dyn ClaimVerifier>,
}

impl VerificationPipeline {
    pub fn new(
        extractor: Arc<dyn ClaimExtractor>,
        search: Arc<dyn EvidenceSearch>,
        verifier: Arc<dyn ClaimVerifier>,
    ) -> Self {
        Self {
            extractor,
            search,
            verifier,
        }
    }

    pub async fn check_article(&self, text: &str) -> Result<VerifiedArticleResponse> {
        let analysis = self.extractor.extract(text).await?;

        let mut verified_claims = Vec::with_capacity(MAX_VERIFIED_CLAIMS);
        for extracted in analysis.claims.iter().take(MAX_VERIFIED_CLAIMS) {
            verified_claims.push(self.verify_claim(&extracted.claim).await);
        }

        info!(
            verdict = %analysis.verdict,
            claims = analysis.claims.len(),
            verified = verified_claims.len(),
            "article checked"
        );
        Ok(VerifiedArticleResponse {
            analysis,
            verified_claims,
        })
    }

    /// Search then verify one claim. Always yields a result.
    pub async fn verify_claim(&self, claim: &str) -> ClaimVerification {
        let evidence = self.search.search(claim).await;
        if evidence.is_empty() {
            warn!("no evidence for claim, returning fallback");
            return ClaimVerification::no_evidence(claim);
        }

        match self.verifier.verify(claim, &evidence).await {
            Ok(verification) => verification,
            Err(err) => {
                warn!(error = %err, "claim verification failed, returning fallback");
                ClaimVerification::verification_failed(claim)
            }
        }
    }
}
