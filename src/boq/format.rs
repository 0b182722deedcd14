use serde::Serialize;

use super::{BoqError, BoqItem};
use crate::markdown::escape_md_cell;
use crate::search::Lang;

fn format_amount(item: &BoqItem) -> String {
    item.amount()
        .map(|a| format!("{a:.2}"))
        .unwrap_or_else(|| "-".to_string())
}

fn total_amount(items: &[&BoqItem]) -> f64 {
    items.iter().filter_map(|i| i.amount()).sum()
}

/// Plain-text listing with one aligned row per work item.
pub fn format_text(items: &[&BoqItem], lang: Lang) -> String {
    let labels = lang.labels();
    let mut out = format!("{}: {}\n", labels.title, items.len());
    if items.is_empty() {
        return out;
    }
    out.push('\n');

    let code_width = items
        .iter()
        .map(|i| i.code.as_deref().unwrap_or("-").chars().count())
        .max()
        .unwrap_or(0)
        .max(labels.code.chars().count());

    out.push_str(&format!(
        "{:<code_width$}  {} | {} | {}\n",
        labels.code, labels.quantity, labels.amount, labels.description
    ));

    for item in items {
        let code = item.code.as_deref().unwrap_or("-");
        let unit = item
            .unit
            .as_deref()
            .map(|u| format!(" {u}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{code:<code_width$}  {}{unit} | {} | {}",
            item.quantity,
            format_amount(item),
            item.description.replace(['\n', '\r'], " ")
        ));
        if !item.attachments.is_empty() {
            out.push_str(&format!(" ({} {})", item.attachments.len(), labels.attachments));
        }
        out.push('\n');
    }

    let total = total_amount(items);
    if total > 0.0 {
        out.push_str(&format!("\n{}: {total:.2}\n", labels.amount));
    }

    out
}

/// Markdown table of work items.
pub fn format_markdown(items: &[&BoqItem], lang: Lang) -> String {
    let labels = lang.labels();
    let mut out = format!("## {} ({})\n\n", labels.title, items.len());
    if items.is_empty() {
        return out;
    }

    out.push_str(&format!(
        "| {} | {} | {} | {} | {} | {} |\n",
        labels.code,
        labels.description,
        labels.quantity,
        labels.unit,
        labels.amount,
        labels.attachments
    ));
    out.push_str("|------|------|-----:|------|-----:|-----:|\n");

    for item in items {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            escape_md_cell(item.code.as_deref().unwrap_or("")),
            escape_md_cell(&item.description),
            item.quantity,
            escape_md_cell(item.unit.as_deref().unwrap_or("")),
            format_amount(item),
            item.attachments.len()
        ));
    }

    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export {
    count: usize,
    total_amount: f64,
    items: Vec<BoqItem>,
}

/// JSON export. Items are written without their subtrees.
pub fn format_json(items: &[&BoqItem]) -> Result<String, BoqError> {
    let export = Export {
        count: items.len(),
        total_amount: total_amount(items),
        items: items.iter().map(|i| i.detached()).collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
