use serde::{Deserialize, Serialize};

/// SEO analysis computed by the backend for a piece of content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeoReport {
    /// Overall score, `0..=100`.
    pub score: u8,
    pub word_count: u32,
    /// Keyword → occurrences per hundred words.
    #[serde(default)]
    pub keyword_density: Vec<(String, f64)>,
    pub readability: f64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}
