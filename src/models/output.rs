use crate::models::claim::ArticleAnalysis;
use crate::models::evidence::SourceUsed;
use crate::models::verify::{clamp_confidence, ClaimAssessment};
use serde::{Deserialize, Serialize};

pub const NO_EVIDENCE_REASON: &str = "No search results returned or search failed";
pub const VERIFICATION_ERROR_REASON: &str = "Error during verification";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimVerification {
    #[serde(default)]
    pub claim: String,
    pub assessment: ClaimAssessment,
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: Vec<String>,
    #[serde(default)]
    pub sources_used: Vec<SourceUsed>,
}

impl ClaimVerification {
    /// Synthesized result for a claim that could not be adjudicated.
    pub fn fallback(claim: &str, reason: &str) -> Self {
        Self {
            claim: claim.to_string(),
            assessment: ClaimAssessment::Uncertain,
            confidence: 0.0,
            reasoning: vec![reason.to_string()],
            sources_used: Vec::new(),
        }
    }

    pub fn no_evidence(claim: &str) -> Self {
        Self::fallback(claim, NO_EVIDENCE_REASON)
    }

    pub fn verification_failed(claim: &str) -> Self {
        Self::fallback(claim, VERIFICATION_ERROR_REASON)
    }

    pub fn is_fallback(&self) -> bool {
        self.assessment == ClaimAssessment::Uncertain
            && self.confidence == 0.0
            && self.sources_used.is_empty()
            && matches!(
                self.reasoning.as_slice(),
                [r] if r == NO_EVIDENCE_REASON || r == VERIFICATION_ERROR_REASON
            )
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.confidence = clamp_confidence(self.confidence);
        self
    }
}

/// `ArticleAnalysis` plus one verification per processed claim, in claim order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VerifiedArticleResponse {
    #[serde(flatten)]
    pub analysis: ArticleAnalysis,
    #[serde(rename = "verifiedClaims")]
    pub verified_claims: Vec<ClaimVerification>,
}
