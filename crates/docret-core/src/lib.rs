pub mod chunking;
pub mod models;

// Re-export the main entry points for convenience
pub use chunking::{chunk_content, chunk_document, chunk_with_category, ChunkOutcome};
pub use models::{Chunk, ContentCategory, Dialect, SourceDocument};
