//! Live search over flattened work items, plus the display-language toggle.

mod lang;

pub use lang::{Labels, Lang};

use globset::{Glob, GlobMatcher};

use crate::boq::{BoqError, BoqItem};

/// Filter applied to the flattened work-item list.
///
/// An empty query matches every item. A `code_pattern` glob additionally
/// requires the item to carry a matching `code`.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    query: String,
    code_matcher: Option<GlobMatcher>,
}

impl SearchFilter {
    pub fn new(query: &str, code_pattern: Option<&str>) -> Result<Self, BoqError> {
        let code_matcher = code_pattern
            .map(|p| {
                Glob::new(p)
                    .map_err(|e| BoqError::InvalidPattern(e.to_string()))
                    .map(|g| g.compile_matcher())
            })
            .transpose()?;

        Ok(Self {
            query: query.trim().to_lowercase(),
            code_matcher,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.code_matcher.is_none()
    }

    pub fn matches(&self, item: &BoqItem) -> bool {
        let code_ok = self.code_matcher.as_ref().is_none_or(|m| {
            item.code.as_deref().is_some_and(|code| m.is_match(code))
        });
        if !code_ok {
            return false;
        }

        self.query.is_empty()
            || item.description.to_lowercase().contains(&self.query)
            || item
                .code
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(&self.query))
    }

    /// Keep the matching items, preserving order.
    pub fn apply<'a>(&self, items: &[&'a BoqItem]) -> Vec<&'a BoqItem> {
        items.iter().copied().filter(|item| self.matches(item)).collect()
    }
}
