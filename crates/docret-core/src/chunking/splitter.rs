//! Default segment splitter
//!
//! Generic paragraph/line windowing with overlap. Every specialized
//! strategy degrades to this one when it finds no applicable structure.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::estimate_tokens;
use crate::models::Chunk;

/// Lines carried into the next window when a paragraph is re-split at line
/// granularity. Fixed, not token-bounded.
const LINE_OVERLAP: usize = 3;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"));

/// Chunk text at paragraph granularity with greedy accumulation.
///
/// Paragraphs are packed into a buffer until adding the next one would
/// exceed `max_tokens`; the buffer is then flushed as a chunk. When the
/// last flushed paragraph is itself within `overlap_tokens`, it seeds the
/// next buffer so consecutive chunks share trailing context. A paragraph
/// that alone exceeds the budget is re-split at line granularity.
pub fn chunk_default(content: &str, max_tokens: usize, overlap_tokens: usize) -> Vec<Chunk> {
    Chunk::seal_all(split_segments(content, max_tokens, overlap_tokens))
}

pub(crate) fn split_segments(
    content: &str,
    max_tokens: usize,
    overlap_tokens: usize,
) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let paragraphs: Vec<&str> = PARAGRAPH_BREAK
        .split(content)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut chunks: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for para in paragraphs {
        if estimate_tokens(para) > max_tokens {
            // Oversized paragraph: flush pending context, then re-split it
            // at line granularity.
            if !buffer.is_empty() {
                chunks.push(buffer.join("\n\n"));
                buffer.clear();
            }
            chunks.extend(split_paragraph_lines(para, max_tokens));
            continue;
        }

        if !buffer.is_empty() {
            let candidate = format!("{}\n\n{}", buffer.join("\n\n"), para);
            if estimate_tokens(&candidate) > max_tokens {
                let last = *buffer.last().expect("non-empty buffer");
                chunks.push(buffer.join("\n\n"));
                buffer.clear();
                // Seed the next buffer with the flushed tail paragraph when
                // it is small enough to serve as overlap and still leaves
                // room for the incoming paragraph.
                if estimate_tokens(last) <= overlap_tokens
                    && estimate_tokens(&format!("{}\n\n{}", last, para)) <= max_tokens
                {
                    buffer.push(last);
                }
            }
        }
        buffer.push(para);
    }

    if !buffer.is_empty() {
        chunks.push(buffer.join("\n\n"));
    }
    chunks
}

/// Re-split one oversized paragraph at line granularity.
///
/// Same greedy packing as the paragraph loop, with the overlap fixed at the
/// last [`LINE_OVERLAP`] lines. A single line exceeding the budget is
/// emitted whole rather than dropped.
pub(crate) fn split_paragraph_lines(paragraph: &str, max_tokens: usize) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in paragraph.lines() {
        if estimate_tokens(line) > max_tokens {
            if !buffer.is_empty() {
                chunks.push(buffer.join("\n"));
                buffer.clear();
            }
            // Unsplittable line: atomic, emitted whole.
            chunks.push(line.to_string());
            continue;
        }

        if !buffer.is_empty() {
            let candidate = format!("{}\n{}", buffer.join("\n"), line);
            if estimate_tokens(&candidate) > max_tokens {
                chunks.push(buffer.join("\n"));
                let tail_start = buffer.len().saturating_sub(LINE_OVERLAP);
                let tail: Vec<&str> = buffer[tail_start..].to_vec();
                buffer.clear();
                // Carry the overlap only when it leaves room for the next
                // line; dropping it keeps forward progress on tight budgets.
                let with_line = format!("{}\n{}", tail.join("\n"), line);
                if estimate_tokens(&with_line) <= max_tokens {
                    buffer = tail;
                }
            }
        }
        buffer.push(line);
    }

    if !buffer.is_empty() {
        chunks.push(buffer.join("\n"));
    }
    chunks
}
