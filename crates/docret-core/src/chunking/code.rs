//! AST-based code construct extraction
//!
//! Parses source with tree-sitter and emits one chunk per top-level
//! declaration, each kept intact with its immediately preceding
//! documentation comment. The combined import block leads the result for
//! contextual grounding. Budgets here are characters, not tokens — the
//! dispatcher converts.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use tree_sitter::{Node, Parser};

use super::ChunkOutcome;
use crate::models::{Chunk, Dialect};

static DECL_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:export\b|declare\b|abstract\b|async\b|public\b|private\b|protected\b|class\b|interface\b|type\b|enum\b|function\b|const\b|let\b|var\b)",
    )
    .expect("declaration header regex")
});

/// Extract top-level constructs from source code.
///
/// Any parse failure is caught here and converted to
/// [`ChunkOutcome::NoMatch`]; it never propagates. An import-only result
/// counts as a failure too — an import block with nothing to ground is not
/// useful on its own.
pub fn chunk_by_ast(content: &str, dialect: Dialect, max_chars: usize) -> ChunkOutcome {
    match extract_constructs(content, dialect, max_chars) {
        Ok(fragments) if !fragments.is_empty() => ChunkOutcome::Matched(Chunk::seal_all(fragments)),
        Ok(_) => ChunkOutcome::NoMatch,
        Err(err) => {
            debug!("code construct extraction failed: {err:#}");
            ChunkOutcome::NoMatch
        }
    }
}

fn extract_constructs(content: &str, dialect: Dialect, max_chars: usize) -> Result<Vec<String>> {
    let mut parser = Parser::new();
    let language = match dialect {
        Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX,
        Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
    };
    parser
        .set_language(&language.into())
        .map_err(|e| anyhow!("failed to set language: {}", e))?;

    let tree = parser
        .parse(content, None)
        .ok_or_else(|| anyhow!("parser produced no tree"))?;

    let root = tree.root_node();
    let mut imports: Vec<&str> = Vec::new();
    let mut constructs: Vec<String> = Vec::new();

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        match child.kind() {
            "import_statement" => {
                imports.push(&content[child.byte_range()]);
            }
            _ if is_construct(child) => {
                let start = leading_comment_start(child);
                constructs.push(content[start..child.end_byte()].to_string());
            }
            _ => {}
        }
    }

    // Degenerate-result guard: an import block alone is a failure.
    if constructs.is_empty() {
        return Ok(Vec::new());
    }

    let mut fragments = Vec::with_capacity(constructs.len() + 1);
    if !imports.is_empty() {
        fragments.push(imports.join("\n"));
    }
    for construct in constructs {
        if construct.chars().count() > max_chars {
            fragments.extend(subdivide_construct(&construct, max_chars));
        } else {
            fragments.push(construct);
        }
    }
    Ok(fragments)
}

/// Top-level node kinds that become construct chunks.
fn is_construct(node: Node) -> bool {
    match node.kind() {
        "function_declaration"
        | "class_declaration"
        | "abstract_class_declaration"
        | "interface_declaration"
        | "type_alias_declaration"
        | "enum_declaration" => true,
        // Exported variables qualify regardless of their value
        "export_statement" => node
            .child_by_field_name("declaration")
            .map_or(false, |decl| {
                matches!(
                    decl.kind(),
                    "function_declaration"
                        | "class_declaration"
                        | "abstract_class_declaration"
                        | "interface_declaration"
                        | "type_alias_declaration"
                        | "enum_declaration"
                        | "lexical_declaration"
                        | "variable_declaration"
                )
            }),
        // Unexported variables only when function-valued
        "lexical_declaration" | "variable_declaration" => is_function_valued(node),
        _ => false,
    }
}

fn is_function_valued(node: Node) -> bool {
    let mut cursor = node.walk();
    let is_fn = node.named_children(&mut cursor).any(|declarator| {
        declarator.kind() == "variable_declarator"
            && declarator.child_by_field_name("value").map_or(false, |v| {
                matches!(v.kind(), "arrow_function" | "function_expression" | "function")
            })
    });
    is_fn
}

/// Walk backwards over adjacent comment siblings so a declaration keeps its
/// documentation. A blank line breaks adjacency.
fn leading_comment_start(node: Node) -> usize {
    let mut start = node.start_byte();
    let mut start_row = node.start_position().row;
    let mut prev = node.prev_sibling();
    while let Some(p) = prev {
        if p.kind() != "comment" || p.end_position().row + 1 < start_row {
            break;
        }
        start = p.start_byte();
        start_row = p.start_position().row;
        prev = p.prev_sibling();
    }
    start
}

/// Subdivide one oversized construct under a repeated declaration header.
///
/// The header is the first line matching a declaration pattern, together
/// with every comment line above it; remaining lines are greedily packed
/// beneath the repeated header, mirroring the markdown section discipline
/// at declaration granularity.
fn subdivide_construct(text: &str, max_chars: usize) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let header_idx = lines
        .iter()
        .position(|l| DECL_HEADER.is_match(l))
        .unwrap_or(0);
    let header = lines[..=header_idx].join("\n");
    let header_chars = header.chars().count();

    let mut out = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();
    let mut buffer_chars = 0usize;

    for line in &lines[header_idx + 1..] {
        let line_chars = line.chars().count();
        if !buffer.is_empty() && header_chars + buffer_chars + line_chars + 2 > max_chars {
            out.push(format!("{}\n{}", header, buffer.join("\n")));
            buffer.clear();
            buffer_chars = 0;
        }
        buffer.push(line);
        buffer_chars += line_chars + 1;
    }
    if !buffer.is_empty() {
        out.push(format!("{}\n{}", header, buffer.join("\n")));
    }

    if out.is_empty() {
        // Nothing below the header to pack (e.g. a minified one-liner):
        // emit the construct whole rather than drop it.
        vec![text.to_string()]
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(content: &str, max_chars: usize) -> Vec<Chunk> {
        match chunk_by_ast(content, Dialect::TypeScript, max_chars) {
            ChunkOutcome::Matched(chunks) => chunks,
            ChunkOutcome::NoMatch => panic!("expected constructs"),
        }
    }

    #[test]
    fn import_block_plus_function_is_two_chunks() {
        let src = "import { api } from './api';\n\nexport function run(): void {\n  api();\n}\n";
        let result = chunks(src, 2000);
        assert_eq!(result.len(), 2);
        assert!(result[0].content.starts_with("import"));
        assert!(result[1].content.contains("export function run"));
    }

    #[test]
    fn imports_only_signals_no_match() {
        let src = "import { a } from './a';\nimport { b } from './b';\n";
        assert!(matches!(
            chunk_by_ast(src, Dialect::TypeScript, 2000),
            ChunkOutcome::NoMatch
        ));
    }

    #[test]
    fn doc_comment_stays_with_its_declaration() {
        let src = "/** Runs the nightly job. */\nexport function nightly(): void {}\n";
        let result = chunks(src, 2000);
        assert_eq!(result.len(), 1);
        assert!(result[0].content.starts_with("/** Runs the nightly job. */"));
        assert!(result[0].content.contains("export function nightly"));
    }

    #[test]
    fn interfaces_types_and_classes_are_extracted_in_source_order() {
        let src = "\
interface Job {\n  id: string;\n}\n\n\
type JobMap = Record<string, Job>;\n\n\
class Runner {\n  run(): void {}\n}\n";
        let result = chunks(src, 2000);
        assert_eq!(result.len(), 3);
        assert!(result[0].content.starts_with("interface Job"));
        assert!(result[1].content.starts_with("type JobMap"));
        assert!(result[2].content.starts_with("class Runner"));
    }

    #[test]
    fn function_valued_const_is_extracted_without_export() {
        let src = "const handler = (x: number) => x * 2;\n\nconst LIMIT = 10;\n";
        let result = chunks(src, 2000);
        assert_eq!(result.len(), 1);
        assert!(result[0].content.starts_with("const handler"));
    }

    #[test]
    fn exported_const_is_extracted_regardless_of_value() {
        let src = "export const LIMIT = 10;\n";
        let result = chunks(src, 2000);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].content, "export const LIMIT = 10;");
    }

    #[test]
    fn oversized_class_repeats_its_header() {
        let methods: Vec<String> = (0..20)
            .map(|i| format!("  method{:02}(): void {{ this.work({}); }}", i, i))
            .collect();
        let src = format!("export class Wide {{\n{}\n}}\n", methods.join("\n"));
        let result = chunks(&src, 300);
        assert!(result.len() > 1);
        for chunk in &result {
            assert!(
                chunk.content.starts_with("export class Wide {"),
                "sub-chunk lost its header"
            );
        }
    }

    #[test]
    fn tsx_component_parses_with_tsx_dialect() {
        let src = "export function Badge() {\n  return <span className=\"badge\">ok</span>;\n}\n";
        let result = match chunk_by_ast(src, Dialect::Tsx, 2000) {
            ChunkOutcome::Matched(chunks) => chunks,
            ChunkOutcome::NoMatch => panic!("tsx should parse"),
        };
        assert_eq!(result.len(), 1);
        assert!(result[0].content.contains("Badge"));
    }

    #[test]
    fn unparseable_soup_signals_no_match() {
        let src = "%%%% ?? !! ???? %%%%\n@@@@\n";
        assert!(matches!(
            chunk_by_ast(src, Dialect::TypeScript, 2000),
            ChunkOutcome::NoMatch
        ));
    }
}
