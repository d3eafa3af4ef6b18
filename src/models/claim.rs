use crate::models::verify::{clamp_confidence, ArticleVerdict, ClaimAssessment};
use serde::{Deserialize, Serialize};

/// A discrete factual statement pulled out of an article by the extractor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClaim {
    pub claim: String,
    pub assessment: ClaimAssessment,
    pub confidence: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub suggested_evidence: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticleAnalysis {
    pub verdict: ArticleVerdict,
    pub confidence: f64,
    #[serde(default)]
    pub explanation: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub claims: Vec<ExtractedClaim>,
}

impl ArticleAnalysis {
    /// Clamps every confidence into `[0, 1]` and drops claims with no text.
    pub fn normalized(mut self) -> Self {
        self.confidence = clamp_confidence(self.confidence);
        self.claims.retain(|c| !c.claim.trim().is_empty());
        for claim in &mut self.claims {
            claim.confidence = clamp_confidence(claim.confidence);
        }
        self
    }
}
