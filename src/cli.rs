use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use crate::boq::{self, BoqError, DEFAULT_MAX_DEPTH, format};
use crate::search::{Lang, SearchFilter};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

/// List the leaf work items (level 3, positive quantity) of a BOQ document.
#[derive(Debug, Parser)]
#[command(name = "boq", version)]
pub struct Args {
    /// BOQ JSON document; `-` reads stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Display language for headers
    #[arg(long, value_enum, env = "BOQ_LANG", default_value_t = Lang::En)]
    pub lang: Lang,

    /// Case-insensitive text matched against description or code
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Glob the item code must match (e.g. "A.1.*")
    #[arg(long)]
    pub code: Option<String>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Reject documents nested deeper than this
    #[arg(long, env = "BOQ_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

/// Load, flatten, filter and render according to `args`.
pub fn run(args: &Args) -> Result<String, BoqError> {
    let filter = SearchFilter::new(&args.search, args.code.as_deref())?;
    let items = boq::load_forest(&args.input)?;
    render(&items, args, &filter)
}

fn render(items: &[boq::BoqItem], args: &Args, filter: &SearchFilter) -> Result<String, BoqError> {
    let leaves = boq::flatten_bounded(items, args.max_depth)?;
    let selected = filter.apply(&leaves);
    if !filter.is_empty() {
        debug!(before = leaves.len(), after = selected.len(), "search filter applied");
    }

    info!(
        nodes = boq::count_nodes(items),
        leaves = leaves.len(),
        selected = selected.len(),
        lang = args.lang.code(),
        "BOQ processed"
    );

    match args.format {
        OutputFormat::Text => Ok(format::format_text(&selected, args.lang)),
        OutputFormat::Markdown => Ok(format::format_markdown(&selected, args.lang)),
        OutputFormat::Json => format::format_json(&selected),
    }
}
