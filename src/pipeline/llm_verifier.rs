use crate::error::Result;
use crate::models::{ClaimVerification, EvidenceSnippet};
use crate::pipeline::completion::{decode_reply, ChatMessage};
use crate::pipeline::traits::{ClaimVerifier, CompletionClient};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

const VERIFICATION_PROMPT: &str = "You are a strict claim verification engine. \
Judge the CLAIM using ONLY the numbered EVIDENCE snippets from a web search. \
Never treat the article the claim came from as a source for itself. \
Never cite anything that is not one of the supplied snippets, and never invent titles or URLs. \
If the evidence is insufficient or conflicting, answer \"uncertain\". \
assessment must be one of: \"likely true\", \"likely false\", \"misleading\", \"uncertain\". \
confidence must be a number between 0 and 1. \
Respond with a single JSON object with exactly these keys and no others: \
{\"claim\": string, \"assessment\": string, \"confidence\": number, \"reasoning\": [string], \
\"sources_used\": [{\"title\": string, \"url\": string, \"note\": string}]}";

/// Evidence-grounded adjudication of one claim through one completion call.
pub struct LlmVerifier {
    completion: Arc<dyn CompletionClient>,
}

impl LlmVerifier {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    fn evidence_text(evidence: &[EvidenceSnippet]) -> String {
        evidence
            .iter()
            .enumerate()
            .map(|(i, e)| {
                format!(
                    "[{}] {}\nURL: {}\nSnippet: {}",
                    i + 1,
                    e.title,
                    e.url,
                    e.snippet
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn messages(claim: &str, evidence: &[EvidenceSnippet]) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(VERIFICATION_PROMPT),
            ChatMessage::user(format!(
                "CLAIM:\n{}\n\nEVIDENCE:\n{}",
                claim,
                Self::evidence_text(evidence)
            )),
        ]
    }
}

/// Drops cited sources whose URL is not among the supplied snippets.
/// Returns how many were dropped.
pub fn retain_grounded(verification: &mut ClaimVerification, evidence: &[EvidenceSnippet]) -> usize {
    let supplied: HashSet<&str> = evidence
        .iter()
        .map(|e| e.url.trim())
        .filter(|u| !u.is_empty())
        .collect();
    let before = verification.sources_used.len();
    verification
        .sources_used
        .retain(|s| supplied.contains(s.url.trim()));
    before - verification.sources_used.len()
}

#[async_trait]
impl ClaimVerifier for LlmVerifier {
    async fn verify(
        &self,
        claim: &str,
        evidence: &[EvidenceSnippet],
    ) -> Result<ClaimVerification> {
        if evidence.is_empty() {
            return Ok(ClaimVerification::no_evidence(claim));
        }

        let content = self
            .completion
            .complete(&Self::messages(claim, evidence))
            .await?;
        let parsed: ClaimVerification = decode_reply(content)?;
        let mut verification = parsed.normalized();
        verification.claim = claim.to_string();

        let dropped = retain_grounded(&mut verification, evidence);
        if dropped > 0 {
            warn!(dropped, "verifier cited sources outside the supplied evidence");
        }
        Ok(verification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::ClaimAssessment;
    use crate::pipeline::mock::{verification_json, ScriptedCompletion};

    fn evidence() -> Vec<EvidenceSnippet> {
        vec![
            EvidenceSnippet {
                title: "NASA: Why is the sky blue?".into(),
                snippet: "Sunlight is scattered by gases in the atmosphere.".into(),
                url: "https://spaceplace.nasa.gov/blue-sky/".into(),
            },
            EvidenceSnippet {
                title: "Rayleigh scattering".into(),
                snippet: "Shorter wavelengths scatter more strongly.".into(),
                url: "https://en.wikipedia.org/wiki/Rayleigh_scattering".into(),
            },
        ]
    }

    #[test]
    fn prompt_numbers_snippets_from_one() {
        let messages = LlmVerifier::messages("The sky is green", &evidence());
        let user = &messages[1].content;
        assert!(user.starts_with("CLAIM:\nThe sky is green"));
        assert!(user.contains("[1] NASA: Why is the sky blue?\nURL: https://spaceplace.nasa.gov/blue-sky/"));
        assert!(user.contains("[2] Rayleigh scattering"));
        assert!(!user.contains("[0]"));
    }

    #[tokio::test]
    async fn fabricated_sources_are_dropped() {
        let reply = r#"{
            "claim": "the sky is green",
            "assessment": "likely false",
            "confidence": 0.95,
            "reasoning": ["Sources explain the sky appears blue."],
            "sources_used": [
                {"title": "NASA", "url": "https://spaceplace.nasa.gov/blue-sky/", "note": "explains scattering"},
                {"title": "Made up", "url": "https://not-in-evidence.example/"}
            ]
        }"#;
        let completion = Arc::new(ScriptedCompletion::replies([reply]));
        let verifier = LlmVerifier::new(completion);
        let result = verifier.verify("The sky is green", &evidence()).await.unwrap();

        assert_eq!(result.claim, "The sky is green");
        assert_eq!(result.assessment, ClaimAssessment::LikelyFalse);
        assert_eq!(result.sources_used.len(), 1);
        assert_eq!(result.sources_used[0].url, "https://spaceplace.nasa.gov/blue-sky/");
        assert_eq!(result.sources_used[0].note.as_deref(), Some("explains scattering"));
    }

    #[tokio::test]
    async fn empty_evidence_skips_the_model() {
        let completion = Arc::new(ScriptedCompletion::replies(Vec::<&str>::new()));
        let verifier = LlmVerifier::new(completion.clone());
        let result = verifier.verify("Anything", &[]).await.unwrap();
        assert!(result.is_fallback());
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn malformed_reply_is_an_error() {
        let completion = Arc::new(ScriptedCompletion::replies(["not json at all"]));
        let verifier = LlmVerifier::new(completion);
        assert!(matches!(
            verifier.verify("claim", &evidence()).await,
            Err(Error::MalformedOutput(_))
        ));
    }

    #[tokio::test]
    async fn empty_reply_is_an_error() {
        let completion = Arc::new(ScriptedCompletion::new([Ok(None)]));
        let verifier = LlmVerifier::new(completion);
        assert!(matches!(
            verifier.verify("claim", &evidence()).await,
            Err(Error::EmptyOutput)
        ));
    }

    #[tokio::test]
    async fn unknown_assessment_is_invalid() {
        let reply = verification_json("probably", "https://spaceplace.nasa.gov/blue-sky/");
        let completion = Arc::new(ScriptedCompletion::replies([reply]));
        let verifier = LlmVerifier::new(completion);
        assert!(matches!(
            verifier.verify("claim", &evidence()).await,
            Err(Error::InvalidOutput(_))
        ));
    }
}
