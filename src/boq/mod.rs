//! Bill-of-quantities trees: loading, traversal and leaf work-item selection.

pub mod format;
pub mod types;

pub use types::BoqItem;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use types::BoqDocument;

/// Tier of measurable work items. Levels 1 and 2 are grouping nodes.
pub const LEAF_LEVEL: u32 = 3;

/// Default nesting limit for [`flatten_bounded`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum BoqError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid BOQ document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("BOQ tree nested deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("invalid code pattern: {0}")]
    InvalidPattern(String),
}

/// True for level-3 items with a strictly positive quantity.
pub fn is_leaf_work_item(item: &BoqItem) -> bool {
    item.level == LEAF_LEVEL && item.quantity > 0.0
}

/// Collect every leaf work item in the forest, in pre-order.
///
/// Every node is visited, including the subtrees of matching items. The
/// returned references point into `items`.
pub fn flatten(items: &[BoqItem]) -> Vec<&BoqItem> {
    let mut out = Vec::new();
    let mut stack: Vec<&BoqItem> = items.iter().rev().collect();

    while let Some(item) = stack.pop() {
        if is_leaf_work_item(item) {
            out.push(item);
        }
        stack.extend(item.children.iter().rev());
    }

    out
}

/// Like [`flatten`], but rejects trees nested deeper than `max_depth`.
///
/// Root items are at depth 1.
pub fn flatten_bounded(items: &[BoqItem], max_depth: usize) -> Result<Vec<&BoqItem>, BoqError> {
    let mut out = Vec::new();
    let mut stack: Vec<(&BoqItem, usize)> = items.iter().rev().map(|item| (item, 1)).collect();

    while let Some((item, depth)) = stack.pop() {
        if depth > max_depth {
            return Err(BoqError::DepthExceeded { limit: max_depth });
        }
        if is_leaf_work_item(item) {
            out.push(item);
        }
        stack.extend(item.children.iter().rev().map(|child| (child, depth + 1)));
    }

    debug!(leaves = out.len(), max_depth, "BOQ flattened");
    Ok(out)
}

/// Total number of nodes in the forest.
pub fn count_nodes(items: &[BoqItem]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&BoqItem> = items.iter().collect();
    while let Some(item) = stack.pop() {
        count += 1;
        stack.extend(&item.children);
    }
    count
}

/// Parse a BOQ document: a JSON array of root items or `{ "items": [...] }`.
pub fn parse_forest(json: &str) -> Result<Vec<BoqItem>, BoqError> {
    let document: BoqDocument = serde_json::from_str(json)?;
    Ok(document.into_items())
}

/// Load a BOQ document from `path`, or from stdin when `path` is `-`.
pub fn load_forest(path: &Path) -> Result<Vec<BoqItem>, BoqError> {
    let io_err = |source: std::io::Error| BoqError::Io {
        path: path.to_path_buf(),
        source,
    };

    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    let items = parse_forest(&json)?;
    debug!(path = %path.display(), roots = items.len(), "BOQ document loaded");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn leaf(quantity: f64) -> BoqItem {
        BoqItem::new(3, quantity)
    }

    fn codes<'a>(items: &[&'a BoqItem]) -> Vec<&'a str> {
        items.iter().filter_map(|&i| i.code.as_deref()).collect()
    }

    fn sample_forest() -> Vec<BoqItem> {
        vec![
            BoqItem::new(1, 0.0).with_code("A").with_children(vec![
                BoqItem::new(2, 0.0).with_code("A.1").with_children(vec![
                    leaf(10.0).with_code("A.1.1"),
                    leaf(0.0).with_code("A.1.2"),
                    leaf(2.5).with_code("A.1.3"),
                ]),
                BoqItem::new(2, 7.0).with_code("A.2").with_children(vec![
                    leaf(1.0).with_code("A.2.1"),
                ]),
            ]),
            BoqItem::new(1, 0.0).with_code("B").with_children(vec![
                leaf(3.0).with_code("B.0.1"),
                BoqItem::new(2, 0.0).with_code("B.1").with_children(vec![
                    leaf(4.0).with_code("B.1.1").with_children(vec![
                        leaf(1.0).with_code("B.1.1.a"),
                    ]),
                ]),
            ]),
        ]
    }

    #[test]
    fn empty_forest_yields_nothing() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn single_positive_leaf_is_selected() {
        let items = vec![leaf(5.0)];
        let flat = flatten(&items);
        assert_eq!(flat.len(), 1);
        assert!(std::ptr::eq(flat[0], &items[0]));
    }

    #[test]
    fn zero_quantity_leaf_is_excluded() {
        assert!(flatten(&[leaf(0.0)]).is_empty());
    }

    #[test]
    fn negative_quantity_leaf_is_excluded() {
        assert!(flatten(&[leaf(-2.0)]).is_empty());
    }

    #[test]
    fn parent_excluded_child_included() {
        let items = vec![BoqItem::new(1, 9.0).with_children(vec![leaf(2.0)])];
        let flat = flatten(&items);
        assert_eq!(flat.len(), 1);
        assert!(std::ptr::eq(flat[0], &items[0].children[0]));
    }

    #[test]
    fn matching_leaf_is_still_descended_into() {
        let items = vec![leaf(4.0).with_children(vec![leaf(1.0)])];
        let flat = flatten(&items);
        assert_eq!(flat.len(), 2);
        assert!(std::ptr::eq(flat[0], &items[0]));
        assert!(std::ptr::eq(flat[1], &items[0].children[0]));
    }

    #[test]
    fn non_matching_leaf_is_descended_into() {
        let items = vec![leaf(0.0).with_children(vec![leaf(6.0).with_code("x")])];
        assert_eq!(codes(&flatten(&items)), ["x"]);
    }

    #[test]
    fn preserves_preorder_across_the_forest() {
        let items = sample_forest();
        assert_eq!(
            codes(&flatten(&items)),
            ["A.1.1", "A.1.3", "A.2.1", "B.0.1", "B.1.1", "B.1.1.a"]
        );
    }

    #[test]
    fn selects_exactly_the_matching_nodes() {
        let items = sample_forest();
        let flat = flatten(&items);
        assert!(flat.iter().all(|i| is_leaf_work_item(i)));

        let mut all = Vec::new();
        let mut stack: Vec<&BoqItem> = items.iter().collect();
        while let Some(item) = stack.pop() {
            all.push(item);
            stack.extend(&item.children);
        }
        let expected = all.iter().filter(|i| is_leaf_work_item(i)).count();
        assert_eq!(flat.len(), expected);
    }

    #[test]
    fn does_not_mutate_input() {
        let items = sample_forest();
        let before = items.clone();
        let _ = flatten(&items);
        assert_eq!(items, before);
    }

    #[test]
    fn flattening_detached_result_is_idempotent() {
        let items = sample_forest();
        let once: Vec<BoqItem> = flatten(&items).into_iter().map(BoqItem::detached).collect();
        let twice: Vec<BoqItem> = flatten(&once).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut node = leaf(1.0);
        for _ in 0..100_000 {
            node = BoqItem::new(2, 0.0).with_children(vec![node]);
        }
        let items = vec![node];
        assert_eq!(flatten(&items).len(), 1);
        // Unwind iteratively; the derived Drop would recurse.
        let mut stack = items;
        while let Some(mut item) = stack.pop() {
            stack.append(&mut item.children);
        }
    }

    #[test]
    fn bounded_matches_unbounded_within_limit() {
        let items = sample_forest();
        let bounded = flatten_bounded(&items, 4).unwrap();
        assert_eq!(codes(&bounded), codes(&flatten(&items)));
    }

    #[test]
    fn bounded_rejects_trees_past_the_limit() {
        let items = sample_forest();
        let err = flatten_bounded(&items, 3).unwrap_err();
        assert!(matches!(err, BoqError::DepthExceeded { limit: 3 }));
        assert!(err.to_string().contains("3 levels"), "got: {err}");
    }

    #[test]
    fn bounded_accepts_empty_forest_with_zero_limit() {
        assert!(flatten_bounded(&[], 0).unwrap().is_empty());
    }

    #[test]
    fn counts_every_node() {
        assert_eq!(count_nodes(&sample_forest()), 12);
        assert_eq!(count_nodes(&[]), 0);
    }

    #[test]
    fn parses_bare_array() {
        let items = parse_forest(r#"[{"level": 1, "children": [{"level": 3, "quantity": 2}]}]"#)
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(flatten(&items).len(), 1);
    }

    #[test]
    fn parses_wrapped_document() {
        let items = parse_forest(r#"{"items": [{"level": 3, "quantity": 1}]}"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_forest(r#"[{"quantity": 1}]"#).unwrap_err();
        assert!(matches!(err, BoqError::Parse(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"level": 3, "quantity": 8, "code": "C.1.1"}}]"#).unwrap();

        let items = load_forest(file.path()).unwrap();
        assert_eq!(codes(&flatten(&items)), ["C.1.1"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_forest(Path::new("/nonexistent/boq.json")).unwrap_err();
        assert!(matches!(err, BoqError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/boq.json"), "got: {err}");
    }
}
