use serde::{Deserialize, Deserializer, Serialize};

use crate::attachment::Attachment;

/// A node in a bill-of-quantities tree.
///
/// `level` marks the tier (1 = section, 2 = sub-section, 3 = work item).
/// Absent, `null` and empty `children` all deserialize to an empty `Vec`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqItem {
    pub level: u32,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<BoqItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<BoqItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<BoqItem>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl BoqItem {
    pub fn new(level: u32, quantity: f64) -> Self {
        Self {
            level,
            quantity,
            code: None,
            description: String::new(),
            unit: None,
            rate: None,
            attachments: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_children(mut self, children: Vec<BoqItem>) -> Self {
        self.children = children;
        self
    }

    /// `quantity * rate`, if the item is priced.
    pub fn amount(&self) -> Option<f64> {
        self.rate.map(|rate| rate * self.quantity)
    }

    /// Clone of this node without its subtree.
    pub fn detached(&self) -> Self {
        Self {
            children: Vec::new(),
            ..self.clone()
        }
    }
}

/// A BOQ document: either a bare array of root items or `{ "items": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum BoqDocument {
    Forest(Vec<BoqItem>),
    Wrapped { items: Vec<BoqItem> },
}

impl BoqDocument {
    pub(super) fn into_items(self) -> Vec<BoqItem> {
        match self {
            BoqDocument::Forest(items) | BoqDocument::Wrapped { items } => items,
        }
    }
}
