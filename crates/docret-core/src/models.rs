use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::chunking::tokenizer::estimate_tokens;

/// Declared content kind of a document; selects the chunking strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Glossary,
    Knowledge,
    Doc,
    Code,
    Contract,
    Script,
    Plugin,
    Other,
}

impl ContentCategory {
    /// Parse a category name from source configuration.
    /// Unknown names map to `Other` so dispatch stays total.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "glossary" => ContentCategory::Glossary,
            "knowledge" => ContentCategory::Knowledge,
            "doc" => ContentCategory::Doc,
            "code" => ContentCategory::Code,
            "contract" => ContentCategory::Contract,
            "script" => ContentCategory::Script,
            "plugin" => ContentCategory::Plugin,
            _ => ContentCategory::Other,
        }
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Grammar variant for the code strategy.
///
/// Derived from the source's declared file extension; only toggles parser
/// grammar options, never used for I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        let is_tsx = path
            .extension()
            .map_or(false, |ext| ext == "tsx" || ext == "jsx");
        if is_tsx {
            Dialect::Tsx
        } else {
            Dialect::TypeScript
        }
    }
}

/// A document handed in by the ingestion pipeline.
///
/// The path is an identity reference; this crate never reads it from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub category: ContentCategory,
    pub content: String,
}

/// A chunk of a document to be embedded.
///
/// Immutable DTO; carries no cross-document identity. Persistence keys
/// chunks by (document identity, index) on the caller's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub index: usize,
    pub content: String,
    pub token_estimate: usize,
    pub content_hash: String,
}

impl Chunk {
    /// Seal a text fragment into a chunk, stamping its position, size
    /// estimate, and content-addressed id.
    pub fn new(index: usize, content: String) -> Self {
        let token_estimate = estimate_tokens(&content);
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        let hash = hex::encode(hasher.finalize());
        Self {
            id: hash[..16].to_string(),
            index,
            content,
            token_estimate,
            content_hash: hash,
        }
    }

    /// Seal an ordered list of fragments, assigning 0-based indices.
    pub fn seal_all(fragments: Vec<String>) -> Vec<Chunk> {
        fragments
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::new(i, text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_name_is_lossy() {
        assert_eq!(ContentCategory::from_name("glossary"), ContentCategory::Glossary);
        assert_eq!(ContentCategory::from_name("Knowledge"), ContentCategory::Knowledge);
        assert_eq!(ContentCategory::from_name("mystery"), ContentCategory::Other);
    }

    #[test]
    fn dialect_from_path() {
        assert_eq!(Dialect::from_path(Path::new("a/b.tsx")), Dialect::Tsx);
        assert_eq!(Dialect::from_path(Path::new("a/b.jsx")), Dialect::Tsx);
        assert_eq!(Dialect::from_path(Path::new("a/b.ts")), Dialect::TypeScript);
        assert_eq!(Dialect::from_path(Path::new("noext")), Dialect::TypeScript);
    }

    #[test]
    fn seal_all_assigns_monotonic_indices() {
        let chunks = Chunk::seal_all(vec!["one".to_string(), "two".to_string()]);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[1].index, 1);
        assert_eq!(chunks[0].id.len(), 16);
        assert!(chunks[0].token_estimate > 0);
    }

    #[test]
    fn category_serde_roundtrip() {
        let json = serde_json::to_string(&ContentCategory::Glossary).unwrap();
        assert_eq!(json, "\"glossary\"");
        let back: ContentCategory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ContentCategory::Glossary);
    }
}
