pub mod cli;
pub mod core;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::session::Session;
use crate::core::unit::UnitKind;
use crate::store::StateStore;
use crate::store::disk::DiskStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An edit to one of the selection lists.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEdit {
    Show,
    Set { index: usize, code: String },
    Move { from: usize, to: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Convert {
        amount: Option<String>,
        base: Option<String>,
        cycle: bool,
    },
    History {
        from: Option<String>,
        to: Option<String>,
        days: Option<usize>,
        swap: bool,
    },
    Rates {
        search: Option<String>,
        kind: Option<UnitKind>,
        refresh: bool,
    },
    Targets(ListEdit),
    Favorites(ListEdit),
    Watch {
        ticks: Option<u64>,
    },
}

/// Opens the on-disk store, falling back to memory so the session still runs.
fn open_store(config: &AppConfig) -> StateStore {
    let opened = config
        .default_data_path()
        .and_then(|path| DiskStore::open(&path).map_err(anyhow::Error::from));
    match opened {
        Ok(disk) => StateStore::new(Arc::new(disk)),
        Err(e) => {
            warn!("State will not be saved this session: {}", e);
            StateStore::in_memory()
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("fxcalc starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let mut session = Session::load(open_store(&config));

    match command {
        AppCommand::Convert {
            amount,
            base,
            cycle,
        } => cli::convert::run(&mut session, amount.as_deref(), base.as_deref(), cycle),
        AppCommand::History {
            from,
            to,
            days,
            swap,
        } => cli::history::run(
            &mut session,
            from.as_deref(),
            to.as_deref(),
            days.unwrap_or(config.history_days),
            swap,
        ),
        AppCommand::Rates {
            search,
            kind,
            refresh,
        } => cli::rates::run(&mut session, search.as_deref(), kind, refresh),
        AppCommand::Targets(edit) => cli::lists::run_targets(&mut session, &edit),
        AppCommand::Favorites(edit) => cli::lists::run_favorites(&mut session, &edit),
        AppCommand::Watch { ticks } => {
            cli::watch::run(session, config.refresh_interval(), ticks).await
        }
    }
}
