use serde::{Deserialize, Serialize};

/// One ranked web search hit used as grounding context for a claim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceSnippet {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

/// A source the verifier says it relied on. Must point at a supplied snippet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUsed {
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
