//! Bill-of-quantities flattening: turn a BOQ tree into its ordered list of
//! leaf work items, with search, display-language and export helpers.

pub mod attachment;
pub mod boq;
pub mod cli;
mod markdown;
pub mod search;

pub use boq::{BoqError, BoqItem, flatten, flatten_bounded};
