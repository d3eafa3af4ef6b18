//! In-process stand-ins for the completion and search services.

use crate::error::{Error, Result};
use crate::models::EvidenceSnippet;
use crate::pipeline::completion::ChatMessage;
use crate::pipeline::traits::{CompletionClient, EvidenceSearch};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{HashMap, VecDeque};

/// Answers completion calls from a fixed queue and records every prompt.
/// Once the queue is drained, further calls fail.
#[derive(Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Result<Option<String>>>>,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedCompletion {
    pub fn new(replies: impl IntoIterator<Item = Result<Option<String>>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replies<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self::new(replies.into_iter().map(|r| Ok(Some(r.into()))))
    }

    pub fn prompts(&self) -> Vec<Vec<ChatMessage>> {
        self.prompts.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Option<String>> {
        self.prompts.lock().push(messages.to_vec());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Completion("no scripted reply left".into())))
    }
}

/// Returns canned evidence, either per claim or the same for every claim.
#[derive(Default)]
pub struct StaticSearch {
    by_claim: HashMap<String, Vec<EvidenceSnippet>>,
    default: Vec<EvidenceSnippet>,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn always(evidence: Vec<EvidenceSnippet>) -> Self {
        Self {
            default: evidence,
            ..Self::default()
        }
    }

    pub fn with_claim(mut self, claim: &str, evidence: Vec<EvidenceSnippet>) -> Self {
        self.by_claim.insert(claim.to_string(), evidence);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl EvidenceSearch for StaticSearch {
    async fn search(&self, claim: &str) -> Vec<EvidenceSnippet> {
        self.queries.lock().push(claim.to_string());
        self.by_claim
            .get(claim)
            .unwrap_or(&self.default)
            .clone()
    }
}

/// Extractor reply naming `claims`, each marked uncertain.
pub fn analysis_json(claims: &[&str]) -> String {
    let claims: Vec<_> = claims
        .iter()
        .map(|c| {
            json!({
                "claim": c,
                "assessment": "uncertain",
                "confidence": 0.5,
                "reasons": ["needs a source"],
                "suggested_evidence": ["news reports"]
            })
        })
        .collect();
    json!({
        "verdict": "questionable",
        "confidence": 0.6,
        "explanation": ["few sources", "loaded wording"],
        "warnings": [],
        "claims": claims
    })
    .to_string()
}

/// Verifier reply with the given assessment citing one source.
pub fn verification_json(assessment: &str, source_url: &str) -> String {
    json!({
        "claim": "echoed by model",
        "assessment": assessment,
        "confidence": 0.8,
        "reasoning": ["the cited snippet addresses the claim directly"],
        "sources_used": [{"title": "cited", "url": source_url}]
    })
    .to_string()
}
