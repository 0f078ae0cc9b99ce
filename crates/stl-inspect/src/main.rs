//! stl-inspect entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use stl_inspect::{ByteSource, ConfigManager, inspect, load, load_async};

/// Decode an STL file and print a JSON summary of its mesh
#[derive(Debug, Parser)]
#[command(name = "stl-inspect", version)]
struct Args {
    /// STL file to read; omit or pass "-" for stdin
    file: Option<PathBuf>,

    /// Merge coincident vertices (default from config)
    #[arg(long, conflicts_with = "no_weld")]
    weld: bool,

    /// Keep the triangle soup unwelded
    #[arg(long)]
    no_weld: bool,

    /// Scale into a unit bounding box centered on the origin
    #[arg(long)]
    normalize: bool,

    /// Include the edge list in the report
    #[arg(long)]
    edges: bool,

    /// Configuration file (RON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the configuration file
    #[arg(long)]
    save_config: bool,

    /// Read the input asynchronously
    #[arg(long = "async")]
    use_async: bool,
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stl_inspect=info,stl_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut manager = match &args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    if args.weld {
        manager.config_mut().weld = true;
    }
    if args.no_weld {
        manager.config_mut().weld = false;
    }
    if args.normalize {
        manager.config_mut().normalize = true;
    }
    if args.edges {
        manager.config_mut().include_edges = true;
    }
    if args.save_config {
        manager.mark_dirty();
        manager
            .save()
            .with_context(|| format!("saving {}", manager.config_file_path().display()))?;
    }

    let source = ByteSource::from_arg(args.file.as_deref());
    tracing::info!("Inspecting {}", source);

    let loaded = if args.use_async {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("starting async runtime")?;
        runtime.block_on(load_async(&source))
    } else {
        load(&source)
    };
    let loaded = loaded.with_context(|| format!("loading {source}"))?;

    let config = manager.config();
    let report = inspect(source.to_string(), loaded, config);
    println!("{}", report.to_json(config.pretty)?);

    Ok(())
}
