//! Document statistics for `mdtoc stats`.

use mdtoc_core::heading::MAX_LEVEL;
use mdtoc_core::lexer::lines;
use mdtoc_core::{FenceTracker, LineKind, Outline};
use serde::Serialize;

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct DocumentStats {
    pub bytes: usize,
    pub lines: usize,
    pub words: usize,
    /// Empty or whitespace-only lines outside fenced code.
    pub blank_lines: usize,
    pub headings: usize,
    /// Heading counts for levels 1 through 6.
    pub by_level: [usize; MAX_LEVEL as usize],
    pub toc_roots: usize,
    pub toc_depth: usize,
    pub code_blocks: usize,
    pub code_lines: usize,
    /// Whether list-embedded code blocks were re-indented.
    pub fixed: bool,
}

impl DocumentStats {
    pub fn from_outline(outline: &Outline<'_>) -> Self {
        let content = outline.content();
        let mut stats = Self {
            bytes: content.len(),
            words: String::from_utf8_lossy(content).split_whitespace().count(),
            headings: outline.headings().len(),
            toc_roots: outline.toc().len(),
            toc_depth: outline.toc().iter().map(|n| n.depth()).max().unwrap_or(0),
            fixed: outline.was_fixed(),
            ..Self::default()
        };

        for h in outline.headings() {
            stats.by_level[usize::from(h.level) - 1] += 1;
        }

        let mut fences = FenceTracker::new();
        for line in lines(content) {
            stats.lines += 1;
            match fences.observe(line.text) {
                LineKind::Fence if fences.inside() => stats.code_blocks += 1,
                LineKind::Code => stats.code_lines += 1,
                LineKind::Text if line.is_blank() => stats.blank_lines += 1,
                _ => {}
            }
        }

        stats
    }

    pub fn print(&self) {
        println!("Document Statistics");
        println!("-------------------");
        println!("Size:");
        println!("  Bytes:          {}", self.bytes);
        println!("  Lines:          {}", self.lines);
        println!("  Words:          {}", self.words);
        println!("  Blank lines:    {}", self.blank_lines);
        println!();
        println!("Headings:         {}", self.headings);
        for (i, count) in self.by_level.iter().enumerate() {
            if *count > 0 {
                println!("  h{}:             {}", i + 1, count);
            }
        }
        println!("  TOC roots:      {}", self.toc_roots);
        println!("  TOC depth:      {}", self.toc_depth);
        println!();
        println!("Code blocks:      {}", self.code_blocks);
        println!("  Code lines:     {}", self.code_lines);
        println!("Indent fixed:     {}", self.fixed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_counts() {
        let input = b"# A\n\n```\n# code\nmore\n```\n\n## B\n### C\n## D\n";
        let stats = DocumentStats::from_outline(&Outline::from_markdown(input));

        assert_eq!(stats.headings, 4);
        assert_eq!(stats.by_level, [1, 2, 1, 0, 0, 0]);
        assert_eq!(stats.toc_roots, 1);
        assert_eq!(stats.toc_depth, 3);
        assert_eq!(stats.code_blocks, 1);
        assert_eq!(stats.code_lines, 2);
        assert_eq!(stats.lines, 11);
        assert_eq!(stats.blank_lines, 3);
        assert!(!stats.fixed);
    }

    #[test]
    fn test_stats_blank_lines_skip_code() {
        let input = b"# A\r\n \t\r\n```\n\n   \n```\ntext";
        let stats = DocumentStats::from_outline(&Outline::from_markdown(input));
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.code_lines, 2);
    }

    #[test]
    fn test_stats_fixed_document() {
        let input = b"- item\n  ```\n  x\n  ```\n";
        let stats = DocumentStats::from_outline(&Outline::from_markdown(input));
        assert!(stats.fixed);
        assert_eq!(stats.bytes, input.len() + 6);
        assert_eq!(stats.code_blocks, 1);
    }

    #[test]
    fn test_stats_empty() {
        let stats = DocumentStats::from_outline(&Outline::from_markdown(b""));
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.headings, 0);
        assert_eq!(stats.toc_depth, 0);
    }
}
