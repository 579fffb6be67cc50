//! Glossary term/definition extraction
//!
//! Matches the recurring shape of business glossaries: a bolded term at the
//! start of a line (optionally followed by a parenthetical acronym), a
//! separator, then free text running until the next bolded term, the next
//! heading, or end of document. Each entry stays whole — splitting a
//! definition away from its term would defeat the strategy.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ChunkOutcome;
use crate::models::Chunk;

static TERM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*\*\*([^*\n]+?)\*\*\s*(\([^)\n]+\))?\s*[-:–—]?\s*")
        .expect("glossary term regex")
});

static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}\s").expect("heading regex"));

/// Extract `**term**: definition` entries.
///
/// Each match becomes exactly one chunk, atomic regardless of the token
/// budget. Zero matches signals [`ChunkOutcome::NoMatch`] — the guard
/// against a mis-tagged source whose content is not term/definition
/// formatted.
pub fn chunk_glossary(content: &str) -> ChunkOutcome {
    struct Entry {
        term: String,
        def_start: usize,
        start: usize,
    }

    let entries: Vec<Entry> = TERM
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).expect("match");
            let mut term = caps[1].trim().to_string();
            if let Some(acronym) = caps.get(2) {
                term.push(' ');
                term.push_str(acronym.as_str());
            }
            Entry {
                term,
                def_start: whole.end(),
                start: whole.start(),
            }
        })
        .collect();

    if entries.is_empty() {
        return ChunkOutcome::NoMatch;
    }

    let heading_starts: Vec<usize> = HEADING.find_iter(content).map(|m| m.start()).collect();

    let mut fragments = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let next_term = entries
            .get(i + 1)
            .map(|n| n.start)
            .unwrap_or(content.len());
        let next_heading = heading_starts
            .iter()
            .copied()
            .find(|&h| h >= entry.def_start)
            .unwrap_or(content.len());
        let def_end = next_term.min(next_heading);
        let definition = content[entry.def_start..def_end].trim();
        let fragment = format!("**{}**: {}", entry.term, definition)
            .trim_end()
            .to_string();
        fragments.push(fragment);
    }

    ChunkOutcome::Matched(Chunk::seal_all(fragments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunks(content: &str) -> Vec<Chunk> {
        match chunk_glossary(content) {
            ChunkOutcome::Matched(chunks) => chunks,
            ChunkOutcome::NoMatch => panic!("expected glossary entries"),
        }
    }

    #[test]
    fn two_entries_become_two_chunks() {
        let content = "**SX**: Service Execution.\n\n**WCF**: Work Completion Form.";
        let result = chunks(content);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].content, "**SX**: Service Execution.");
        assert_eq!(result[1].content, "**WCF**: Work Completion Form.");
    }

    #[test]
    fn acronym_stays_bound_to_term() {
        let content = "**Work Completion Form** (WCF): Signed proof of delivery.";
        let result = chunks(content);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].content,
            "**Work Completion Form (WCF)**: Signed proof of delivery."
        );
    }

    #[test]
    fn definition_runs_to_next_heading() {
        let content =
            "**Term**: First line.\nSecond line of the definition.\n\n## Unrelated section\n\nBody.";
        let result = chunks(content);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].content,
            "**Term**: First line.\nSecond line of the definition."
        );
    }

    #[test]
    fn multiline_definition_is_atomic() {
        let long_def = "every word counts. ".repeat(200); // far beyond any budget
        let content = format!("**Big**: {}", long_def);
        let result = chunks(&content);
        assert_eq!(result.len(), 1);
        assert!(result[0].content.len() > 2000);
    }

    #[test]
    fn dash_separator_is_normalized_to_colon() {
        let content = "**SLA** - The agreed response window.";
        let result = chunks(content);
        assert_eq!(result[0].content, "**SLA**: The agreed response window.");
    }

    #[test]
    fn plain_prose_signals_no_match() {
        let content = "Nothing bold here, just ordinary prose.\n\nAnother paragraph.";
        assert!(matches!(chunk_glossary(content), ChunkOutcome::NoMatch));
    }

    #[test]
    fn chunk_count_equals_term_count() {
        let content = "**A**: one.\n\n**B**: two.\n\n**C**: three.\n\n**D**: four.";
        assert_eq!(chunks(content).len(), 4);
    }
}
