use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use post_series::content::{ContentSource, PostQuery, PostType};
use post_series::{PostSeries, Site, SiteConfig, SERIES_TAXONOMY};
use tracing::info;

#[derive(Parser)]
#[command(about = "Builds the demo blog")]
struct Cli {
    /// The root directory of the site.
    #[arg(long, default_value = "demos/blog")]
    root: PathBuf,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site to `<root>/public`.
    Build,

    /// List every series and its posts, oldest first.
    Series,
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "post_series=info,blog=info",
        1 => "post_series=debug,blog=debug",
        _ => "post_series=trace,blog=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt().with_env_filter(env_filter).with_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SiteConfig::load(&cli.root)
        .with_context(|| format!("failed to load config from {:?}", cli.root))?;

    let mut site = Site::builder()
        .root(&cli.root)
        .plugin(PostSeries::new(config.series.clone()))
        .config(config)
        .build();

    site.load().context("failed to load content")?;

    match cli.command {
        Command::Build => {
            site.render().context("failed to render site")?;

            info!(output = ?site.output_path(), "wrote site");
        }
        Command::Series => {
            let repository = site.repository();

            for term in repository.terms(SERIES_TAXONOMY) {
                println!("{} ({})", term.name, term.permalink);

                let query = PostQuery::new(PostType::Post).in_term(SERIES_TAXONOMY, &term.slug);
                for (index, post) in repository.query_posts(&query)?.into_iter().enumerate() {
                    println!("  Part {}: {}", index + 1, post.title());
                }
            }
        }
    }

    Ok(())
}
