pub mod code;
pub mod glossary;
pub mod markdown;
pub mod splitter;
pub mod tokenizer;

pub use docret_config::ChunkingConfig;
pub use splitter::chunk_default;

use tracing::debug;

use crate::models::{Chunk, ContentCategory, Dialect, SourceDocument};

/// Outcome of a specialized chunking strategy.
///
/// Explicit discriminated result instead of a nullable return, so the
/// dispatcher's fallthrough chain is exhaustive and statically checkable.
#[derive(Debug, Clone)]
pub enum ChunkOutcome {
    Matched(Vec<Chunk>),
    NoMatch,
}

/// Category-agnostic chunking: exactly the default strategy.
///
/// Kept as its own entry point so callers predating category tags keep
/// byte-identical behavior.
pub fn chunk_content(content: &str, max_tokens: usize, overlap_tokens: usize) -> Vec<Chunk> {
    chunk_with_category(content, max_tokens, overlap_tokens, None, None)
}

/// Dispatch to the strategy for `category`, falling through to the default
/// splitter whenever a specialized strategy signals no applicable
/// structure.
///
/// Never errors; every non-empty input yields a non-empty chunk list.
pub fn chunk_with_category(
    content: &str,
    max_tokens: usize,
    overlap_tokens: usize,
    category: Option<ContentCategory>,
    dialect: Option<Dialect>,
) -> Vec<Chunk> {
    let specialized = match category {
        Some(ContentCategory::Glossary) => Some(("glossary", glossary::chunk_glossary(content))),
        Some(ContentCategory::Knowledge) | Some(ContentCategory::Doc) => Some((
            "sections",
            markdown::chunk_by_sections(content, max_tokens),
        )),
        Some(ContentCategory::Code) | Some(ContentCategory::Contract) => {
            // The code strategy budgets in characters; convert with the
            // same ratio the token estimator uses.
            let max_chars = max_tokens * 7 / 2;
            Some((
                "ast",
                code::chunk_by_ast(content, dialect.unwrap_or(Dialect::TypeScript), max_chars),
            ))
        }
        Some(ContentCategory::Script)
        | Some(ContentCategory::Plugin)
        | Some(ContentCategory::Other)
        | None => None,
    };

    if let Some((strategy, outcome)) = specialized {
        match outcome {
            ChunkOutcome::Matched(chunks) => return chunks,
            ChunkOutcome::NoMatch => {
                debug!(strategy, "no applicable structure, falling back to default");
            }
        }
    }

    splitter::chunk_default(content, max_tokens, overlap_tokens)
}

/// Chunk a document from the ingestion pipeline, deriving the code dialect
/// from the document's declared path.
pub fn chunk_document(doc: &SourceDocument, config: &ChunkingConfig) -> Vec<Chunk> {
    let dialect = Dialect::from_path(&doc.path);
    chunk_with_category(
        &doc.content,
        config.max_tokens,
        config.overlap_tokens,
        Some(doc.category),
        Some(dialect),
    )
}
