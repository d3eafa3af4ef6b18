pub mod claim;
pub mod evidence;
pub mod output;
pub mod verify;

pub use claim::{ArticleAnalysis, ExtractedClaim};
pub use evidence::{EvidenceSnippet, SourceUsed};
pub use output::{
    ClaimVerification, VerifiedArticleResponse, NO_EVIDENCE_REASON, VERIFICATION_ERROR_REASON,
};
pub use verify::{clamp_confidence, ArticleVerdict, ClaimAssessment, UnknownLabel};
