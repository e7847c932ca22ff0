use anyhow::Context;
use clap::{Parser, Subcommand};
use retail_cli::{commands, CliOutput};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about = "Walk a demo order through picking and delivery")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[arg(long, value_enum, global = true, default_value_t = CliOutput::Text)]
    output: CliOutput,
    /// Shorthand for `--output json`
    #[arg(long, global = true, conflicts_with = "output")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seeded demo order
    Order,
    /// Print the default workflow settings
    Settings,
    /// Apply a scripted sequence of actions and draw every screen
    Play {
        /// start, found:<upc>, not-found:<upc>, next, cancel, option:<name>, complete, done, press
        #[arg(required = true)]
        actions: Vec<String>,
    },
    /// Read actions from stdin, one per line
    Interactive,
}

impl Cli {
    fn output(&self) -> CliOutput {
        if self.json {
            CliOutput::Json
        } else {
            self.output
        }
    }
}

fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;
    let output = cli.output();

    match cli.command {
        Commands::Order => commands::cmd_order(&mut std::io::stdout().lock())?,
        Commands::Settings => commands::cmd_settings(&mut std::io::stdout().lock())?,
        Commands::Play { actions } => commands::cmd_play(actions, output)?,
        Commands::Interactive => commands::cmd_interactive(output)?,
    }

    Ok(())
}
