//! Integration tests for heading extraction, the indent fix and TOC trees

use std::borrow::Cow;

use mdtoc_core::{
    build_toc, clean_heading_text, extract_headings, fix_indented_code_blocks, next_state,
    slugify, Heading, Outline, TocNode,
};

fn heading(level: u8, text: &str, id: &str) -> Heading {
    Heading {
        level,
        text: text.to_string(),
        id: id.to_string(),
    }
}

fn ids(input: &str) -> Vec<String> {
    extract_headings(input).into_iter().map(|h| h.id).collect()
}

// ============================================================================
// Code-Fence Tracker Tests
// ============================================================================

#[test]
fn test_fence_toggles_state() {
    let mut inside = false;
    for line in ["text", "```rust", "# code", "```", "# text"] {
        inside = next_state(inside, line.as_bytes());
    }
    assert!(!inside);
}

#[test]
fn test_fence_state_ignores_short_runs() {
    assert!(!next_state(false, b"``"));
    assert!(next_state(true, b"`inline`"));
}

// ============================================================================
// Heading Extraction Tests
// ============================================================================

#[test]
fn test_extract_levels() {
    let input = "# H1\n## H2\n### H3\n#### H4\n##### H5\n###### H6";
    let headings = extract_headings(input);

    assert_eq!(headings.len(), 6);
    for (i, h) in headings.iter().enumerate() {
        assert_eq!(h.level, (i + 1) as u8);
    }
}

#[test]
fn test_extract_ignores_non_headings() {
    let input = "#NoSpace\n####### Seven hashes\nplain text\n  # indented still counts";
    let headings = extract_headings(input);
    assert_eq!(headings, vec![heading(1, "indented still counts", "indented-still-counts")]);
}

#[test]
fn test_heading_inside_fence_is_skipped() {
    let input = "```\n# not a heading\n```";
    assert!(extract_headings(input).is_empty());
}

#[test]
fn test_fence_with_lang_and_indent() {
    let input = "# Before\n\n    ```bash\n    # comment\n    ```\n\n# After";
    assert_eq!(ids(input), ["before", "after"]);
}

#[test]
fn test_unclosed_fence_hides_rest() {
    let input = "# Visible\n```\n# Hidden\n## Also hidden";
    assert_eq!(ids(input), ["visible"]);
}

#[test]
fn test_explicit_anchor() {
    let headings = extract_headings("## Intro {#intro-1}");
    assert_eq!(headings, vec![heading(2, "Intro", "intro-1")]);
}

#[test]
fn test_explicit_anchor_is_deduplicated() {
    assert_eq!(ids("# A {#same}\n# B {#same}"), ["same", "same-1"]);
}

#[test]
fn test_duplicate_resolution() {
    let headings = extract_headings("## Setup\n\n## Setup\n\n## Setup");
    let ids: Vec<_> = headings.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["setup", "setup-1", "setup-2"]);
    assert!(headings.iter().all(|h| h.text == "Setup"));
}

#[test]
fn test_duplicates_count_per_base_id() {
    // The counter belongs to the base id, not to the last suffixed one.
    assert_eq!(ids("# A\n# B\n# A\n# B\n# A"), ["a", "b", "a-1", "b-1", "a-2"]);
}

#[test]
fn test_digit_leading_slug() {
    let headings = extract_headings("# 2.0 Release");
    assert_eq!(headings[0].id, "heading-2-0-release");
    assert_eq!(headings[0].text, "2.0 Release");
}

#[test]
fn test_digit_prefix_then_duplicates() {
    assert_eq!(ids("# 1\n# 1"), ["heading-1", "heading-1-1"]);
}

#[test]
fn test_unsluggable_heading_gets_fallback_id() {
    let headings = extract_headings("# !!!\n# ???");
    assert_eq!(headings[0].id, "heading");
    assert_eq!(headings[1].id, "heading-1");
    assert_eq!(headings[0].text, "!!!");
}

#[test]
fn test_formatting_is_cleaned() {
    let input = "# The **bold** `code` [link](http://x) ~~old~~ <em>tag</em>";
    let headings = extract_headings(input);
    assert_eq!(headings[0].text, "The bold code link old tag");
    assert_eq!(headings[0].id, "the-bold-code-link-old-tag");
}

#[test]
fn test_ids_have_no_whitespace() {
    let input = "# Tab\tSeparated\n# {#spaced id}\n# Mixed  Spaces ";
    for h in extract_headings(input) {
        assert!(!h.id.is_empty());
        assert!(!h.id.chars().any(char::is_whitespace), "{:?}", h.id);
    }
}

#[test]
fn test_crlf_document() {
    let input = "# One\r\n```\r\n# no\r\n```\r\n## Two\r\n";
    let headings = extract_headings(input);
    assert_eq!(headings, vec![heading(1, "One", "one"), heading(2, "Two", "two")]);
}

#[test]
fn test_invalid_utf8_is_tolerated() {
    let input: &[u8] = b"# Caf\xe9\n## Next\n";
    let headings = extract_headings(input);
    assert_eq!(headings.len(), 2);
    assert_eq!(headings[0].text, "Caf\u{fffd}");
    assert_eq!(headings[0].id, "caf");
}

#[test]
fn test_empty_inputs() {
    assert!(extract_headings("").is_empty());
    assert!(extract_headings("just text\n\nmore text").is_empty());
    assert!(extract_headings("```\n# a\n## b\n```\n").is_empty());
}

#[test]
fn test_extract_is_stateless_between_calls() {
    assert_eq!(ids("# Same"), ["same"]);
    assert_eq!(ids("# Same"), ["same"]);
}

// ============================================================================
// Cleaning and Slug Tests
// ============================================================================

#[test]
fn test_clean_is_idempotent_on_plain_text() {
    for text in ["Plain heading", "Version 2.0 notes", "a - b: c"] {
        assert_eq!(clean_heading_text(text), text);
    }
}

#[test]
fn test_slug_pinned_cases() {
    let cases = [
        ("Hello World", "hello-world"),
        ("API Reference", "api-reference"),
        ("C++ & Rust", "c-rust"),
        ("  Leading and trailing  ", "leading-and-trailing"),
        ("multi---dash", "multi-dash"),
        ("under_score", "under_score"),
        ("Ünïcödé", "n-c-d"),
        ("2.0 Release", "2-0-release"),
        ("İstanbul", "istanbul"),
    ];
    for (input, expected) in cases {
        assert_eq!(slugify(input), expected, "slug of {input:?}");
    }
}

#[test]
fn test_dotted_capital_i_heading() {
    assert_eq!(ids("# İstanbul Guide"), ["istanbul-guide"]);
}

// ============================================================================
// Indent Fixer Tests
// ============================================================================

#[test]
fn test_fixer_round_trip_without_list_fences() {
    let inputs: [&[u8]; 5] = [
        b"",
        b"# Title\n\nparagraph\n",
        b"```\ncode\n```\n",
        b"      ```\n      deep\n      ```",
        b"\xff\xfe binary \n# x",
    ];
    for input in inputs {
        let fixed = fix_indented_code_blocks(input);
        assert_eq!(&fixed[..], input);
        assert!(matches!(fixed, Cow::Borrowed(_)));
    }
}

#[test]
fn test_fixer_shifts_list_code_block() {
    let input = "1. Build:\n\n   ```bash\n   cargo build\n\n   cargo test\n   ```\n\n2. Done\n";
    let expected =
        "1. Build:\n\n     ```bash\n     cargo build\n  \n     cargo test\n     ```\n\n2. Done\n";
    assert_eq!(&fix_indented_code_blocks(input.as_bytes())[..], expected.as_bytes());
}

#[test]
fn test_fixer_handles_several_blocks() {
    let input = "- a\n  ```\n  x\n  ```\n- b\n    ```\n    y\n    ```\n";
    let expected = "- a\n    ```\n    x\n    ```\n- b\n      ```\n      y\n      ```\n";
    assert_eq!(&fix_indented_code_blocks(input.as_bytes())[..], expected.as_bytes());
}

/// Known edge case: a block that is never closed keeps shifting every
/// remaining line, including the empty line after the final newline.
#[test]
fn test_fixer_unterminated_fence_shifts_to_end() {
    let input = "- item\n  ```\n  code\n# Heading\n";
    let expected = "- item\n    ```\n    code\n  # Heading\n  ";
    assert_eq!(&fix_indented_code_blocks(input.as_bytes())[..], expected.as_bytes());
}

#[test]
fn test_fixer_keeps_crlf() {
    let input = "- a\r\n  ```\r\n  x\r\n  ```\r\nb\r\n";
    let expected = "- a\r\n    ```\r\n    x\r\n    ```\r\nb\r\n";
    assert_eq!(&fix_indented_code_blocks(input.as_bytes())[..], expected.as_bytes());
}

#[test]
fn test_headings_after_fix() {
    let input = "- step\n  ```\n  # shell comment\n\n  ```\n## Next";
    let fixed = fix_indented_code_blocks(input.as_bytes());
    let headings = extract_headings(&fixed);
    assert_eq!(headings, vec![heading(2, "Next", "next")]);
}

// ============================================================================
// TOC Tree Tests
// ============================================================================

fn levels(levels: &[u8]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| heading(level, &format!("H{i}"), &format!("h{i}")))
        .collect()
}

#[test]
fn test_tree_shape() {
    let toc = build_toc(&levels(&[1, 2, 2, 3, 1]));

    assert_eq!(toc.len(), 2);
    assert_eq!(toc[0].children.len(), 2);
    assert_eq!(toc[0].children[0].children.len(), 0);
    assert_eq!(toc[0].children[1].children.len(), 1);
    assert_eq!(toc[0].children[1].children[0].heading.level, 3);
    assert!(toc[1].children.is_empty());
}

#[test]
fn test_tree_first_child_nesting() {
    let toc = build_toc(&levels(&[1, 2, 3, 2, 1]));
    assert_eq!(toc[0].children.len(), 2);
    assert_eq!(toc[0].children[0].children.len(), 1);
    assert!(toc[1].is_leaf());
}

#[test]
fn test_tree_skipped_levels() {
    let toc = build_toc(&levels(&[1, 4, 2]));
    assert_eq!(toc.len(), 1);
    let children: Vec<u8> = toc[0].children.iter().map(TocNode::level).collect();
    assert_eq!(children, [4, 2]);
}

#[test]
fn test_tree_without_level_one() {
    let toc = build_toc(&levels(&[3, 3, 4, 2]));
    assert_eq!(toc.len(), 3);
    assert_eq!(toc[1].children.len(), 1);
}

#[test]
fn test_tree_preserves_document_order() {
    let flat = levels(&[1, 2, 3, 3, 2, 1, 2]);
    let toc = build_toc(&flat);
    let walked: Vec<&Heading> = mdtoc_core::walk(&toc).map(|(_, n)| &n.heading).collect();
    let expected: Vec<&Heading> = flat.iter().collect();
    assert_eq!(walked, expected);
}

#[test]
fn test_empty_tree() {
    assert!(build_toc(&extract_headings("no headings")).is_empty());
}

// ============================================================================
// Outline Tests
// ============================================================================

#[test]
fn test_outline_pipeline() {
    let input = b"# Guide\n\n- install\n\n  ```\n  # not a heading\n\n  ```\n\n## Usage\n## Usage\n";
    let outline = Outline::from_markdown(input);

    assert!(outline.was_fixed());
    assert!(outline.content().starts_with(b"# Guide\n\n- install\n\n    ```"));
    assert_eq!(
        outline.headings(),
        &[
            heading(1, "Guide", "guide"),
            heading(2, "Usage", "usage"),
            heading(2, "Usage", "usage-1"),
        ]
    );
    assert_eq!(outline.toc().len(), 1);
    assert_eq!(outline.toc()[0].children.len(), 2);
}

#[test]
fn test_outline_into_parts() {
    let (content, headings, toc) = Outline::from_markdown(b"# Only").into_parts();
    assert!(matches!(content, Cow::Borrowed(_)));
    assert_eq!(headings.len(), 1);
    assert_eq!(toc.len(), 1);
}
