use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use namebuckets::cli_output::{OutputMode, OutputWriter};
use namebuckets::grouping::{self, BucketOrder};
use namebuckets::input::{self, Separator};
use namebuckets::key::KeyKind;
use namebuckets::{group_words, Overrides, Settings};

#[derive(Parser)]
#[command(name = "namebuckets")]
#[command(about = "Group words into buckets keyed by a derived property", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (default: <config dir>/namebuckets/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct GroupArgs {
    /// File to read items from, `-` for stdin (default: built-in sample names)
    input: Option<PathBuf>,

    /// Grouping key (length, bytes, initial, final, vowels)
    #[arg(short, long)]
    key: Option<KeyKind>,

    /// Item separator (whitespace, lines, comma)
    #[arg(short, long)]
    separator: Option<Separator>,

    /// Output format (human, plain, json, table)
    #[arg(short, long)]
    format: Option<OutputMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Group items into buckets
    Group {
        #[command(flatten)]
        args: GroupArgs,

        /// Bucket order (key, first-seen)
        #[arg(short, long)]
        order: Option<BucketOrder>,

        /// Also print a bucket size histogram
        #[arg(long)]
        histogram: bool,
    },

    /// Show bucket sizes only
    Count {
        #[command(flatten)]
        args: GroupArgs,
    },

    /// Group the sample names both ways and compare
    Demo,

    /// List supported grouping keys
    Keys,
}

fn resolve_settings(config: Option<&PathBuf>, overrides: Overrides) -> Result<Settings> {
    let settings = Settings::load(config.map(PathBuf::as_path)).context("Failed to load settings")?;
    Ok(settings.apply(overrides))
}

fn load_items(source: Option<&PathBuf>, separator: Separator) -> Result<Vec<String>> {
    match source {
        Some(path) => {
            let items = input::read_items(path, separator)
                .with_context(|| format!("Could not load items from {}", path.display()))?;
            if items.is_empty() {
                warn!("No items found in {}", path.display());
            }
            Ok(items)
        }
        None => {
            debug!("No input given, using sample names");
            Ok(input::sample_items())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Group {
            args,
            order,
            histogram,
        } => {
            let settings = resolve_settings(
                cli.config.as_ref(),
                Overrides {
                    key: args.key,
                    order,
                    separator: args.separator,
                    format: args.format,
                },
            )?;
            let items = load_items(args.input.as_ref(), settings.separator)?;
            info!(
                "Grouping {} items by {} ({} order)",
                items.len(),
                settings.key,
                settings.order.name()
            );

            let groups = group_words(items, &settings);
            let writer = OutputWriter::new(settings.output_mode());
            println!("{}", writer.render_groups(&groups)?);

            if histogram {
                writer.section("Bucket sizes");
                println!("{}", writer.render_histogram(&groups));
            }

            if let Some(largest) = groups.largest() {
                debug!(
                    "{} buckets, largest is {} with {} items",
                    groups.len(),
                    largest.key,
                    largest.items.len()
                );
            }

            Ok(())
        }

        Commands::Count { args } => {
            let settings = resolve_settings(
                cli.config.as_ref(),
                Overrides {
                    key: args.key,
                    order: None,
                    separator: args.separator,
                    format: args.format,
                },
            )?;
            let items = load_items(args.input.as_ref(), settings.separator)?;
            let kind = settings.key;
            let counts = grouping::group_counts(items, |item| kind.derive(item));

            let writer = OutputWriter::new(settings.output_mode());
            println!("{}", writer.render_counts(&counts)?);
            Ok(())
        }

        Commands::Demo => {
            let settings = resolve_settings(cli.config.as_ref(), Overrides::default())?;
            let writer = OutputWriter::new(settings.output_mode());
            let names = input::sample_items();
            let kind = settings.key;

            writer.section("Membership check, then insert");
            let checked = grouping::group_by_key_checked(names.clone(), |n| kind.derive(n));
            println!("{}", writer.render_groups(&checked)?);

            writer.section("Get or insert default");
            let by_entry = grouping::group_by_key(names, |n| kind.derive(n));
            println!("{}", writer.render_groups(&by_entry)?);

            println!();
            if checked == by_entry {
                writer.success("Both approaches produce the same buckets");
                Ok(())
            } else {
                writer.error("The two approaches disagree");
                anyhow::bail!("grouping mismatch")
            }
        }

        Commands::Keys => {
            println!("\n{}", "Supported grouping keys:".cyan().bold());
            println!();
            for kind in KeyKind::ALL {
                println!("  {:<8} - {}", kind.name().green(), kind.description());
            }
            println!();
            Ok(())
        }
    }
}
