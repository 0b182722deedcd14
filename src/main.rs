use clap::Parser;
use tracing::info;

use boq::cli::{self, Args};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("boq=info".parse()?),
        )
        .init();

    let args = Args::parse();
    info!(input = %args.input.display(), format = ?args.format, "starting boq");

    let output = cli::run(&args).inspect_err(|e| tracing::error!("{e}"))?;
    print!("{output}");
    Ok(())
}
