use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxcalc::core::log::init_logging;
use fxcalc::core::unit::UnitKind;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum ListCommand {
    /// Replace the unit at INDEX; an already listed unit swaps places
    Set { index: usize, code: String },
    /// Move the unit at FROM to TO
    Move { from: usize, to: usize },
}

impl From<ListCommand> for fxcalc::ListEdit {
    fn from(cmd: ListCommand) -> fxcalc::ListEdit {
        match cmd {
            ListCommand::Set { index, code } => fxcalc::ListEdit::Set { index, code },
            ListCommand::Move { from, to } => fxcalc::ListEdit::Move { from, to },
        }
    }
}

/// No subcommand means show the list.
fn list_edit(cmd: Option<ListCommand>) -> fxcalc::ListEdit {
    cmd.map_or(fxcalc::ListEdit::Show, Into::into)
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert the amount into every target unit
    Convert {
        /// Amount in the base unit; keeps the saved amount if omitted
        amount: Option<String>,
        /// Base unit code
        #[arg(short, long)]
        base: Option<String>,
        /// Switch the base to the next fiat unit
        #[arg(long)]
        cycle: bool,
    },
    /// Show a simulated rate history between two units
    History {
        #[arg(short, long)]
        from: Option<String>,
        #[arg(short, long)]
        to: Option<String>,
        /// Number of days to simulate
        #[arg(short, long)]
        days: Option<usize>,
        /// Exchange the from and to units
        #[arg(long)]
        swap: bool,
    },
    /// List units and their current rates
    Rates {
        /// Filter by name or code
        #[arg(short, long)]
        search: Option<String>,
        /// Only show fiat or crypto
        #[arg(short, long)]
        kind: Option<UnitKind>,
        /// Simulate one refresh before listing
        #[arg(long)]
        refresh: bool,
    },
    /// Show or edit the calculator targets
    Targets {
        #[command(subcommand)]
        edit: Option<ListCommand>,
    },
    /// Show or edit the favorite units
    Favorites {
        #[command(subcommand)]
        edit: Option<ListCommand>,
    },
    /// Keep the calculator on screen, refreshing rates periodically
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
}

impl From<Commands> for fxcalc::AppCommand {
    fn from(cmd: Commands) -> fxcalc::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                base,
                cycle,
            } => fxcalc::AppCommand::Convert {
                amount,
                base,
                cycle,
            },
            Commands::History {
                from,
                to,
                days,
                swap,
            } => fxcalc::AppCommand::History {
                from,
                to,
                days,
                swap,
            },
            Commands::Rates {
                search,
                kind,
                refresh,
            } => fxcalc::AppCommand::Rates {
                search,
                kind,
                refresh,
            },
            Commands::Targets { edit } => fxcalc::AppCommand::Targets(list_edit(edit)),
            Commands::Favorites { edit } => fxcalc::AppCommand::Favorites(list_edit(edit)),
            Commands::Watch { ticks } => fxcalc::AppCommand::Watch { ticks },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxcalc::cli::setup::setup().map(|_| ()),
        Some(cmd) => fxcalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
