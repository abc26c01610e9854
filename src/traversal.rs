//! Pre-order traversal of the design tree.
//!
//! Every analyzer walks the document through [`walk`], which visits each node
//! exactly once in document order and refuses trees deeper than the configured
//! limit. The walk uses an explicit stack, so deep documents cannot exhaust
//! the call stack before the limit is reached.

use crate::error::{ExtractError, Result};
use crate::extractor::Stage;
use crate::figma::DesignNode;

/// Default maximum nesting depth accepted by the walkers.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Where a visited node sits in the tree.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    /// Zero for the root.
    pub depth: usize,
    pub parent: Option<&'a DesignNode>,
    /// Position among the parent's children.
    pub index: usize,
}

/// Visit `root` and all descendants in pre-order.
///
/// The visitor may fail; the first error aborts the walk. A node deeper than
/// `max_depth` raises [`ExtractError::DepthLimit`] tagged with `stage`.
pub fn walk<'a, F>(root: &'a DesignNode, stage: Stage, max_depth: usize, mut visit: F) -> Result<()>
where
    F: FnMut(&'a DesignNode, NodeContext<'a>) -> Result<()>,
{
    let mut stack = vec![(
        root,
        NodeContext {
            depth: 0,
            parent: None,
            index: 0,
        },
    )];

    while let Some((node, ctx)) = stack.pop() {
        if ctx.depth > max_depth {
            return Err(ExtractError::DepthLimit {
                stage,
                limit: max_depth,
                node: node.name.clone(),
            });
        }
        visit(node, ctx)?;

        for (index, child) in node.children.iter().enumerate().rev() {
            stack.push((
                child,
                NodeContext {
                    depth: ctx.depth + 1,
                    parent: Some(node),
                    index,
                },
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figma::NodeType;

    fn tree() -> DesignNode {
        DesignNode::new(NodeType::Document, "doc").with_children(vec![
            DesignNode::new(NodeType::Canvas, "page").with_children(vec![
                DesignNode::new(NodeType::Frame, "a")
                    .with_children(vec![DesignNode::new(NodeType::Text, "a1")]),
                DesignNode::new(NodeType::Frame, "b"),
            ]),
            DesignNode::new(NodeType::Canvas, "page-2"),
        ])
    }

    #[test]
    fn visits_in_document_order() {
        let root = tree();
        let mut seen = Vec::new();
        walk(&root, Stage::Tokens, DEFAULT_MAX_DEPTH, |node, ctx| {
            seen.push((node.name.as_str(), ctx.depth, ctx.index));
            Ok(())
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                ("doc", 0, 0),
                ("page", 1, 0),
                ("a", 2, 0),
                ("a1", 3, 0),
                ("b", 2, 1),
                ("page-2", 1, 1),
            ]
        );
    }

    #[test]
    fn parent_is_reported() {
        let root = tree();
        let mut parents = Vec::new();
        walk(&root, Stage::Tokens, DEFAULT_MAX_DEPTH, |node, ctx| {
            if node.name == "a1" {
                parents.push(ctx.parent.map(|p| p.name.clone()));
            }
            Ok(())
        })
        .unwrap();
        assert_eq!(parents, vec![Some("a".to_string())]);
    }

    #[test]
    fn depth_limit_is_fatal() {
        let root = tree();
        let err = walk(&root, Stage::Components, 2, |_, _| Ok(())).unwrap_err();
        match err {
            ExtractError::DepthLimit { stage, limit, node } => {
                assert_eq!(stage, Stage::Components);
                assert_eq!(limit, 2);
                assert_eq!(node, "a1");
            }
            other => panic!("expected depth limit, got {other:?}"),
        }
    }

    #[test]
    fn visitor_errors_stop_the_walk() {
        let root = tree();
        let mut visited = 0;
        let result = walk(&root, Stage::Layouts, DEFAULT_MAX_DEPTH, |node, _| {
            visited += 1;
            if node.name == "a" {
                return Err(ExtractError::stage(Stage::Layouts, "boom"));
            }
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(visited, 3);
    }
}
