//! Table-of-contents trees.
//!
//! [`build_toc`] nests the flat heading list the way Markdown readers
//! expect: a heading owns every following heading until the next one of
//! equal or lesser level. Levels may skip (an `h4` straight under an `h1`
//! becomes its child) without synthetic intermediate nodes.

use crate::heading::Heading;

/// A heading together with the headings nested under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub heading: Heading,
    /// Nested headings, in document order. All have a greater level.
    pub children: Vec<TocNode>,
}

impl TocNode {
    pub fn new(heading: Heading) -> Self {
        Self {
            heading,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn level(&self) -> u8 {
        self.heading.level
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TocNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(TocNode::depth).max().unwrap_or(0)
    }
}

/// Nest a flat, ordered heading list into a forest.
///
/// Single pass over a stack of open nodes. The stack conceptually starts
/// with a level-0 sentinel; for each heading, nodes whose level is greater
/// than or equal to the heading's are closed, the heading is attached to
/// whatever is now on top, and then pushed itself.
///
/// # Example
///
/// ```rust
/// use mdtoc_core::{build_toc, extract_headings};
///
/// let headings = extract_headings("# A\n## B\n### C\n## D\n# E\n");
/// let toc = build_toc(&headings);
/// assert_eq!(toc.len(), 2);
/// assert_eq!(toc[0].children.len(), 2);
/// assert_eq!(toc[0].children[0].children[0].heading.text, "C");
/// ```
pub fn build_toc(headings: &[Heading]) -> Vec<TocNode> {
    let mut roots = Vec::new();
    // Open nodes, shallowest first. Empty stands for the sentinel.
    let mut open: Vec<TocNode> = Vec::new();

    for heading in headings {
        while open
            .last()
            .is_some_and(|top| top.level() >= heading.level)
        {
            close_top(&mut open, &mut roots);
        }
        open.push(TocNode::new(heading.clone()));
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

/// Pop the innermost open node and attach it to its parent.
fn close_top(open: &mut Vec<TocNode>, roots: &mut Vec<TocNode>) {
    if let Some(node) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}

/// Depth-first, pre-order iterator over a forest.
///
/// Yields each node with its nesting depth (0 for roots).
pub struct Walk<'a> {
    stack: Vec<(usize, &'a TocNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a TocNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Walk a forest depth-first in document order.
pub fn walk(forest: &[TocNode]) -> Walk<'_> {
    Walk {
        stack: forest.iter().rev().map(|node| (0, node)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(level: u8, text: &str) -> Heading {
        Heading {
            level,
            text: text.to_string(),
            id: text.to_lowercase(),
        }
    }

    #[test]
    fn test_empty() {
        assert!(build_toc(&[]).is_empty());
    }

    #[test]
    fn test_flat_siblings() {
        let toc = build_toc(&[h(2, "A"), h(2, "B"), h(2, "C")]);
        assert_eq!(toc.len(), 3);
        assert!(toc.iter().all(TocNode::is_leaf));
    }

    #[test]
    fn test_shallower_after_deeper_starts_new_root() {
        // A level-2 heading before any level-1 is still a root.
        let toc = build_toc(&[h(2, "A"), h(1, "B"), h(2, "C")]);
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].heading.text, "A");
        assert!(toc[0].is_leaf());
        assert_eq!(toc[1].children[0].heading.text, "C");
    }

    #[test]
    fn test_len_and_depth() {
        let toc = build_toc(&[h(1, "A"), h(2, "B"), h(3, "C"), h(2, "D")]);
        assert_eq!(toc[0].node_count(), 4);
        assert_eq!(toc[0].depth(), 3);
    }

    #[test]
    fn test_walk_order() {
        let toc = build_toc(&[h(1, "A"), h(2, "B"), h(3, "C"), h(2, "D"), h(1, "E")]);
        let visited: Vec<_> = walk(&toc)
            .map(|(depth, node)| (depth, node.heading.text.as_str()))
            .collect();
        assert_eq!(
            visited,
            [(0, "A"), (1, "B"), (2, "C"), (1, "D"), (0, "E")]
        );
    }
}
