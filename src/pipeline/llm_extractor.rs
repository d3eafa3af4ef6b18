use crate::error::{Error, Result};
use crate::models::ArticleAnalysis;
use crate::pipeline::completion::{decode_reply, ChatMessage};
use crate::pipeline::traits::{ClaimExtractor, CompletionClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub const MAX_ARTICLE_CHARS: usize = 8000;

const EXTRACTION_PROMPT: &str = "You are a careful fact-checking assistant. \
Read the ARTICLE and judge its overall credibility. \
Pick exactly one verdict from: \"likely reliable\", \"questionable\", \"very likely misinformation\", \"uncertain\". \
Give 2-5 short reasons for the verdict in \"explanation\" and any red flags (sensational tone, missing sources, \
manipulated statistics) in \"warnings\". \
Then extract 2-6 discrete, independently checkable factual claims made by the article. \
For each claim give an assessment from: \"likely true\", \"likely false\", \"misleading\", \"uncertain\"; \
a confidence between 0 and 1; 1-3 short reasons; and \"suggested_evidence\" describing the kinds of sources \
that could confirm or refute it. \
Respond with a single JSON object and nothing else, with exactly these keys: \
{\"verdict\": string, \"confidence\": number, \"explanation\": [string], \"warnings\": [string], \
\"claims\": [{\"claim\": string, \"assessment\": string, \"confidence\": number, \"reasons\": [string], \
\"suggested_evidence\": [string]}]}";

/// Cuts `text` to its first `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Verdict and claim extraction through one completion call.
pub struct LlmExtractor {
    completion: Arc<dyn CompletionClient>,
}

impl LlmExtractor {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    fn messages(article: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(EXTRACTION_PROMPT),
            ChatMessage::user(format!("ARTICLE:\n{}", article)),
        ]
    }
}

#[async_trait]
impl ClaimExtractor for LlmExtractor {
    async fn extract(&self, article: &str) -> Result<ArticleAnalysis> {
        if article.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        let article = truncate_chars(article, MAX_ARTICLE_CHARS);
        let content = self.completion.complete(&Self::messages(article)).await?;
        let analysis: ArticleAnalysis = decode_reply(content)?;
        let analysis = analysis.normalized();
        debug!(
            verdict = %analysis.verdict,
            claims = analysis.claims.len(),
            "article analysis parsed"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleVerdict, ClaimAssessment};
    use crate::pipeline::mock::ScriptedCompletion;

    const ANALYSIS: &str = r#"{
        "verdict": "Questionable",
        "confidence": 1.4,
        "explanation": ["no named sources", "emotive language"],
        "warnings": ["headline overstates findings"],
        "claims": [
            {"claim": "Coffee cures cancer", "assessment": "likely_false", "confidence": 0.92,
             "reasons": ["no clinical evidence"], "suggested_evidence": ["peer-reviewed trials"]},
            {"claim": "The study had 40 participants", "assessment": "uncertain", "confidence": 0.3}
        ]
    }"#;

    #[test]
    fn truncation_counts_characters() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 4), "éééé");
        assert_eq!(truncate_chars("short", 8000), "short");
    }

    #[tokio::test]
    async fn parses_and_normalizes_analysis() {
        let completion = Arc::new(ScriptedCompletion::replies([ANALYSIS]));
        let extractor = LlmExtractor::new(completion.clone());
        let analysis = extractor.extract("Some article text").await.unwrap();

        assert_eq!(analysis.verdict, ArticleVerdict::Questionable);
        assert_eq!(analysis.confidence, 1.0);
        assert_eq!(analysis.claims.len(), 2);
        assert_eq!(analysis.claims[0].assessment, ClaimAssessment::LikelyFalse);
        assert!(analysis.claims[1].reasons.is_empty());
    }

    #[tokio::test]
    async fn submits_at_most_eight_thousand_characters() {
        let completion = Arc::new(ScriptedCompletion::replies([ANALYSIS]));
        let extractor = LlmExtractor::new(completion.clone());
        let article = "a".repeat(MAX_ARTICLE_CHARS + 500);
        extractor.extract(&article).await.unwrap();

        let prompts = completion.prompts();
        assert_eq!(prompts.len(), 1);
        let user = &prompts[0][1].content;
        assert_eq!(user.matches('a').count(), MAX_ARTICLE_CHARS);
        assert!(user.starts_with("ARTICLE:\n"));
    }

    #[tokio::test]
    async fn surfaces_model_output_errors() {
        let completion = Arc::new(ScriptedCompletion::new([
            Ok(Some("I think this article is fine.".to_string())),
            Ok(None),
            Ok(Some(r#"{"verdict": "fine", "confidence": 0.5, "claims": []}"#.to_string())),
        ]));
        let extractor = LlmExtractor::new(completion);

        assert!(matches!(
            extractor.extract("text").await,
            Err(Error::MalformedOutput(_))
        ));
        assert!(matches!(extractor.extract("text").await, Err(Error::EmptyOutput)));
        assert!(matches!(
            extractor.extract("text").await,
            Err(Error::InvalidOutput(_))
        ));
    }

    #[tokio::test]
    async fn rejects_blank_article_without_calling_model() {
        let completion = Arc::new(ScriptedCompletion::replies([ANALYSIS]));
        let extractor = LlmExtractor::new(completion.clone());
        assert!(matches!(extractor.extract("  \n").await, Err(Error::EmptyInput)));
        assert_eq!(completion.calls(), 0);
    }
}
