//! Embedding request preparation.
//!
//! The vector service computes embeddings server-side; this adapter is the
//! single point of text normalization, so indexing and query paths always
//! submit identically preprocessed input.

use crate::domain::models::EmbeddingRequest;

/// Turns raw text into an [`EmbeddingRequest`] carrying a fixed model id.
#[derive(Debug, Clone)]
pub struct EmbeddingAdapter {
    model: String,
}

impl EmbeddingAdapter {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    /// Embedding model identifier submitted with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Normalize whitespace and wrap the text with the model id. Texts
    /// differing only in whitespace runs produce identical requests.
    pub fn embed(&self, text: &str) -> EmbeddingRequest {
        EmbeddingRequest {
            model: self.model.clone(),
            text: normalize_whitespace(text),
        }
    }
}

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_runs_and_trims() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace("plain"), "plain");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn whitespace_variants_embed_identically() {
        let adapter = EmbeddingAdapter::new("test-model");
        let a = adapter.embed("cheap    burgers\tdowntown");
        let b = adapter.embed("  cheap burgers\n downtown ");
        assert_eq!(a, b);
        assert_eq!(a.model, "test-model");
    }

    proptest! {
        /// Normalization is idempotent: normalizing twice changes nothing.
        #[test]
        fn proptest_normalization_idempotent(text in ".*") {
            let once = normalize_whitespace(&text);
            let twice = normalize_whitespace(&once);
            prop_assert_eq!(once, twice);
        }

        /// Padding with extra whitespace never changes the normal form.
        #[test]
        fn proptest_padding_invariant(words in prop::collection::vec("[a-z]{1,8}", 0..6)) {
            let tight = words.join(" ");
            let padded = words.join("  \t ");
            prop_assert_eq!(
                normalize_whitespace(&tight),
                normalize_whitespace(&format!(" {padded}\n"))
            );
        }
    }
}
