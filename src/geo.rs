// src/geo.rs
//! Geographic relevance filter. Any single keyword hit is enough; there is no
//! proximity or confidence weighting.

#[derive(Debug, Clone)]
pub struct GeoMatcher {
    /// (original keyword, lowercased keyword)
    keywords: Vec<(String, String)>,
}

impl GeoMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| (k.as_ref().to_string(), k.as_ref().to_lowercase()))
                .filter(|(_, lc)| !lc.is_empty())
                .collect(),
        }
    }

    /// Every configured keyword contained in `text` (case-insensitive), in
    /// configuration order. Empty means "not geographically relevant".
    pub fn matches(&self, text: &str) -> Vec<String> {
        let hay = text.to_lowercase();
        self.keywords
            .iter()
            .filter(|(_, lc)| hay.contains(lc.as_str()))
            .map(|(orig, _)| orig.clone())
            .collect()
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        let hay = text.to_lowercase();
        self.keywords.iter().any(|(_, lc)| hay.contains(lc.as_str()))
    }
}
