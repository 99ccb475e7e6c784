use clap::{Parser, Subcommand};
use sandvox_modernize::config;
use sandvox_modernize::modernize::{self, RunMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sandvox-modernize")]
#[command(about = "Rewrite a Sandvox site into plain HTML5 pages")]
#[command(long_about = "\
Rewrite a Sandvox site into plain HTML5 pages

Every .html file under the site root that Sandvox produced is rewritten in
place: the main-content region is kept, builder markup is stripped, photo
grids and article indexes are rebuilt, and the page is wrapped in a shared
HTML5 shell with navigation and footer.

Pages are overwritten. Commit the site to git first: if the tree already
looks rewritten, originals are restored with `git checkout HEAD -- .`.

Run 'sandvox-modernize gen-config' to print a documented modernize.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Log progress details (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite every Sandvox page in place (default)
    Run,
    /// Report which pages would be rewritten without touching any file
    Check,
    /// Print a stock modernize.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mode = match cli.command.unwrap_or(Command::Run) {
        Command::Run => RunMode::Run,
        Command::Check => RunMode::Check,
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
    };

    let site_config = config::load_config(&cli.root)?;
    modernize::run(&cli.root, &site_config, mode)?;
    Ok(())
}

/// Diagnostics go to stderr; progress lines stay on stdout.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "info" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
