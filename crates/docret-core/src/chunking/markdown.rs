//! Markdown section splitting
//!
//! Splits on heading lines (levels 1–3) so a section's body never drifts
//! away from the heading that introduces it. Oversized sections are
//! subdivided with the heading repeated as a prefix of every sub-chunk,
//! trading chunk-size uniformity for header–body cohesion.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::estimate_tokens;
use super::ChunkOutcome;
use crate::models::Chunk;

static SECTION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,3}\s+\S.*$").expect("section heading regex"));

/// Split markdown into heading-bound sections.
///
/// No headings signals [`ChunkOutcome::NoMatch`]. Content preceding the
/// first heading becomes a standalone preamble chunk.
pub fn chunk_by_sections(content: &str, max_tokens: usize) -> ChunkOutcome {
    let headings: Vec<(usize, usize)> = SECTION_HEADING
        .find_iter(content)
        .map(|m| (m.start(), m.end()))
        .collect();

    if headings.is_empty() {
        return ChunkOutcome::NoMatch;
    }

    let mut fragments = Vec::new();

    let preamble = content[..headings[0].0].trim();
    if !preamble.is_empty() {
        fragments.push(preamble.to_string());
    }

    for (i, &(start, _)) in headings.iter().enumerate() {
        let end = headings.get(i + 1).map(|n| n.0).unwrap_or(content.len());
        let section = content[start..end].trim();
        if estimate_tokens(section) <= max_tokens {
            fragments.push(section.to_string());
        } else {
            fragments.extend(subdivide_section(section, max_tokens));
        }
    }

    ChunkOutcome::Matched(Chunk::seal_all(fragments))
}

/// Subdivide one oversized section at line granularity.
///
/// The heading line is repeated as a prefix in every resulting sub-chunk
/// so each remains self-contextualized. No overlap is carried between
/// sub-chunks — each restarts at the heading.
fn subdivide_section(section: &str, max_tokens: usize) -> Vec<String> {
    let mut lines = section.lines();
    let heading = lines.next().unwrap_or_default();

    let mut out = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in lines {
        // Skip blank lines at the start of a fresh window
        if buffer.is_empty() && line.trim().is_empty() {
            continue;
        }

        if !buffer.is_empty() {
            let candidate = format!("{}\n{}\n{}", heading, buffer.join("\n"), line);
            if estimate_tokens(&candidate) > max_tokens {
                out.push(window(heading, &buffer));
                buffer.clear();
                if line.trim().is_empty() {
                    continue;
                }
            }
        }
        buffer.push(line);
    }

    if !buffer.is_empty() {
        out.push(window(heading, &buffer));
    }
    out
}

fn window(heading: &str, body: &[&str]) -> String {
    format!("{}\n{}", heading, body.join("\n"))
        .trim_end()
        .to_string()
}
