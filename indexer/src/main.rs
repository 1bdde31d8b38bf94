use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vindex_core::builder::{build_topic_indexes, AggregatePolicy, BuildContext, BuildOptions};
use vindex_core::catalog::load_catalog;
use vindex_core::codec::Endian;
use vindex_core::ctr::{load_ctr_int, load_ctr_str};
use vindex_core::writer::dump_topic_indexes;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build the per-topic micro-video ranking index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Join the catalog, topic and engagement files into one binary index
    Build {
        /// Video catalog, one JSON object per line
        #[arg(long)]
        catalog: String,
        /// Topic membership lists, one JSON object per line
        #[arg(long)]
        topics: String,
        /// Engagement records keyed by numeric video id
        #[arg(long)]
        ctr_int: String,
        /// Engagement records keyed by prefixed string key
        #[arg(long)]
        ctr_str: String,
        /// Output index file
        #[arg(long)]
        output: String,
        /// Encode the index big-endian instead of little-endian
        #[arg(long, default_value_t = false)]
        big_endian: bool,
        /// Record every parsed topic in the all-topics list, including ones
        /// dropped by the minimum-videos threshold
        #[arg(long, default_value_t = false)]
        aggregate_all: bool,
        /// Minimum popularity-scored videos a topic needs to be indexed
        #[arg(long, default_value_t = 1)]
        min_videos: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            catalog,
            topics,
            ctr_int,
            ctr_str,
            output,
            big_endian,
            aggregate_all,
            min_videos,
        } => {
            let endian = if big_endian { Endian::Big } else { Endian::Little };
            let opts = BuildOptions {
                min_videos,
                aggregate: if aggregate_all {
                    AggregatePolicy::AllTopics
                } else {
                    AggregatePolicy::SurvivorsOnly
                },
                ..BuildOptions::default()
            };
            build(&catalog, &topics, &ctr_int, &ctr_str, &output, endian, &opts)
        }
    }
}

fn build(
    catalog_path: &str,
    topics_path: &str,
    ctr_int_path: &str,
    ctr_str_path: &str,
    output_path: &str,
    endian: Endian,
    opts: &BuildOptions,
) -> Result<()> {
    // Each stage fully materializes before the next starts; the catalog must
    // come first, the builder joins against it.
    let catalog = load_catalog(catalog_path)?;
    let ctr_int = load_ctr_int(ctr_int_path, endian)?;
    let ctr_str = load_ctr_str(ctr_str_path, endian, &opts.ctr_prefix)?;
    let ctx = BuildContext { catalog, ctr_int, ctr_str };

    let indexes = build_topic_indexes(topics_path, &ctx, opts)?;
    tracing::info!(
        topics = indexes.recency.len(),
        videos = ctx.catalog.len(),
        "joined topics against catalog and engagement stores"
    );

    dump_topic_indexes(output_path, &indexes, endian)?;
    tracing::info!(output = output_path, "index build complete");
    Ok(())
}
