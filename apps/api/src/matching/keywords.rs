//! Keyword extraction: reduces free text to the set of salient terms.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::matching::tagger::Tagger;

/// Normalized (lower-cased, alphanumeric-only) terms. Ordered so reports are stable.
pub type KeywordSet = BTreeSet<String>;

/// Selects nouns, proper nouns, and named-entity tokens from tagged text.
#[derive(Clone)]
pub struct KeywordExtractor {
    tagger: Arc<dyn Tagger>,
}

impl KeywordExtractor {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self { tagger }
    }

    pub fn extract(&self, text: &str) -> KeywordSet {
        self.tagger
            .tag(text)
            .into_iter()
            .filter(|token| token.pos.is_nominal() || token.entity.is_some())
            .filter(|token| is_alphanumeric_term(&token.text))
            .map(|token| token.text.to_lowercase())
            .collect()
    }
}

fn is_alphanumeric_term(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphanumeric)
}
