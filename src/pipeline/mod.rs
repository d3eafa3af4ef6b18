pub mod completion;
pub mod llm_extractor;
pub mod llm_verifier;
pub mod mock;
pub mod search;
pub mod traits;
pub mod verify;

pub use completion::{decode_reply, ChatMessage, OpenAiCompletion, Role};
pub use llm_extractor::{LlmExtractor, MAX_ARTICLE_CHARS};
pub use llm_verifier::LlmVerifier;
pub use search::{WebSearch, DEFAULT_SEARCH_URL, MAX_SNIPPETS};
pub use traits::{ClaimExtractor, ClaimVerifier, CompletionClient, EvidenceSearch};
pub use verify::{VerificationPipeline, MAX_VERIFIED_CLAIMS};
