use fxcalc::core::state::{ApplicationState, View};
use fxcalc::store::StateStore;
use fxcalc::store::disk::DiskStore;
use fxcalc::{AppCommand, ListEdit};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

mod test_utils {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// A config file whose data path points into a fresh temp dir.
    pub fn create_config(dir: &TempDir) -> PathBuf {
        let data_path = dir.path().join("data");
        let config_path = dir.path().join("config.yaml");
        let config_content = format!(
            r#"
data_path: "{}"
refresh_interval_secs: 1
history_days: 14
"#,
            data_path.display()
        );
        fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path
    }
}

fn saved_store(dir: &Path) -> StateStore {
    let disk = DiskStore::open(&dir.join("data")).expect("Failed to open store");
    StateStore::new(Arc::new(disk))
}

#[test_log::test(tokio::test)]
async fn test_first_run_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::create_config(&dir);

    let targets = AppCommand::Targets(ListEdit::Show);
    let result = fxcalc::run_command(targets, Some(config_path.to_str().unwrap())).await;
    assert!(result.is_ok(), "Command failed with: {:?}", result.err());

    let store = saved_store(dir.path());
    assert_eq!(store.load(), ApplicationState::default());
}

#[test_log::test(tokio::test)]
async fn test_state_persists_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::create_config(&dir);
    let config = Some(config_path.to_str().unwrap());

    let commands = vec![
        AppCommand::Convert {
            amount: Some("100".to_string()),
            base: Some("usd".to_string()),
            cycle: false,
        },
        AppCommand::Targets(ListEdit::Set {
            index: 0,
            code: "EUR".to_string(),
        }),
        AppCommand::Favorites(ListEdit::Move { from: 6, to: 0 }),
        AppCommand::History {
            from: Some("GBP".to_string()),
            to: Some("BTC".to_string()),
            days: None,
            swap: false,
        },
    ];
    for command in commands {
        info!(?command, "Running");
        fxcalc::run_command(command, config)
            .await
            .expect("Command failed");
    }

    let store = saved_store(dir.path());
    let state = store.load();
    assert_eq!(state.view, View::History);
    assert_eq!(state.base_unit_code, "USD");
    assert_eq!(state.amount, "100");
    assert_eq!(state.history_from_unit_code, "GBP");
    assert_eq!(state.history_to_unit_code, "BTC");
    assert_eq!(
        state.target_unit_codes.as_slice(),
        &["EUR", "USD", "CAD", "INR", "SGD", "GBP"]
    );
    assert_eq!(
        store.load_favorites().as_slice(),
        &["AUD", "USD", "EUR", "JPY", "GBP", "INR", "CAD"]
    );
}

#[test_log::test(tokio::test)]
async fn test_invalid_edit_leaves_state_alone() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::create_config(&dir);
    let config = Some(config_path.to_str().unwrap());

    let bad = AppCommand::Targets(ListEdit::Set {
        index: 0,
        code: "NOPE".to_string(),
    });
    assert!(fxcalc::run_command(bad, config).await.is_err());

    let out_of_range = AppCommand::Favorites(ListEdit::Move { from: 0, to: 99 });
    assert!(fxcalc::run_command(out_of_range, config).await.is_err());

    let store = saved_store(dir.path());
    assert_eq!(store.load(), ApplicationState::default());
}

#[test_log::test(tokio::test)]
async fn test_corrupt_saved_state_recovers() {
    use fxcalc::store::{FAVORITES_KEY, KeyValueStore, STATE_KEY};

    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::create_config(&dir);
    {
        let disk = DiskStore::open(&dir.path().join("data")).unwrap();
        disk.put(STATE_KEY, "{\"view\": \"sideways\"").unwrap();
        disk.put(FAVORITES_KEY, r#"["CHF","SEK","NOK"]"#).unwrap();
    }

    let rates = AppCommand::Rates {
        search: None,
        kind: None,
        refresh: true,
    };
    fxcalc::run_command(rates, Some(config_path.to_str().unwrap()))
        .await
        .expect("Command failed");

    let store = saved_store(dir.path());
    assert_eq!(store.load(), ApplicationState::default());
    assert_eq!(store.load_favorites().as_slice(), &["CHF", "SEK", "NOK"]);
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.yaml");
    let result = fxcalc::run_command(
        AppCommand::Targets(ListEdit::Show),
        Some(missing.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
    assert!(!fs::exists(dir.path().join("data")).unwrap());
}
