//! The live application state: working catalog, user selections and the
//! store they are written to.
//!
//! Every mutator applies its change and then saves straight away, so the
//! store always mirrors what is on screen.

use crate::core::amount::AmountInput;
use crate::core::convert::convert;
use crate::core::selection::SelectionList;
use crate::core::simulator::{self, HistoricalPoint};
use crate::core::state::{ApplicationState, View};
use crate::core::unit::{Catalog, FALLBACK_BASE_CODE, FALLBACK_TARGET_CODE, Unit};
use crate::store::StateStore;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info};

/// One line of the calculator: a target unit and the formatted amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion<'a> {
    pub unit: &'a Unit,
    pub value: String,
}

pub struct Session {
    catalog: Catalog,
    state: ApplicationState,
    favorites: SelectionList,
    amount: AmountInput,
    store: StateStore,
}

impl Session {
    /// Restores the previous session from `store`, or starts from defaults.
    pub fn load(store: StateStore) -> Self {
        let state = store.load();
        let favorites = store.load_favorites();
        debug!(?state, ?favorites, "Loaded session");
        Self {
            catalog: Catalog::builtin(),
            amount: AmountInput::new(state.amount.clone()),
            state,
            favorites,
            store,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn favorites(&self) -> &SelectionList {
        &self.favorites
    }

    pub fn amount(&self) -> &AmountInput {
        &self.amount
    }

    pub fn base_unit(&self) -> &Unit {
        self.catalog
            .find_or(&self.state.base_unit_code, FALLBACK_BASE_CODE)
    }

    pub fn history_from_unit(&self) -> &Unit {
        self.catalog
            .find_or(&self.state.history_from_unit_code, FALLBACK_BASE_CODE)
    }

    pub fn history_to_unit(&self) -> &Unit {
        self.catalog
            .find_or(&self.state.history_to_unit_code, FALLBACK_TARGET_CODE)
    }

    /// Favorites that exist in the catalog, in list order.
    pub fn favorite_units(&self) -> Vec<&Unit> {
        self.catalog.resolve(self.favorites.as_slice())
    }

    /// The amount converted into each target unit. Unknown codes are skipped.
    pub fn conversions(&self) -> Vec<Conversion<'_>> {
        let amount = self.amount.value();
        let base = self.base_unit();
        self.catalog
            .resolve(self.state.target_unit_codes.as_slice())
            .into_iter()
            .map(|unit| Conversion {
                unit,
                value: convert(amount, base, unit),
            })
            .collect()
    }

    /// Current rate between the history units.
    pub fn history_rate(&self) -> f64 {
        Catalog::cross_rate(self.history_from_unit(), self.history_to_unit())
    }

    /// The amount converted along the history pair.
    pub fn history_amount(&self) -> String {
        convert(
            self.amount.value(),
            self.history_from_unit(),
            self.history_to_unit(),
        )
    }

    pub fn history<R: Rng + ?Sized>(
        &self,
        days: usize,
        today: NaiveDate,
        rng: &mut R,
    ) -> Vec<HistoricalPoint> {
        simulator::generate_history(
            self.history_from_unit(),
            self.history_to_unit(),
            days,
            today,
            rng,
        )
    }

    fn persist(&self) {
        self.store.save(&self.state);
    }

    fn known_code(&self, code: &str) -> Result<String> {
        match self.catalog.find_by_code(code) {
            Some(unit) => Ok(unit.code.clone()),
            None => bail!("Unknown unit: {}", code),
        }
    }

    pub fn set_view(&mut self, view: View) {
        self.state.view = view;
        self.persist();
    }

    pub fn set_base_unit(&mut self, code: &str) -> Result<()> {
        self.state.base_unit_code = self.known_code(code)?;
        self.persist();
        Ok(())
    }

    /// Moves the base to the next fiat unit.
    pub fn cycle_base_unit(&mut self) {
        let next = self.catalog.next_fiat(&self.state.base_unit_code).code.clone();
        self.state.base_unit_code = next;
        self.persist();
    }

    pub fn set_history_from(&mut self, code: &str) -> Result<()> {
        self.state.history_from_unit_code = self.known_code(code)?;
        self.persist();
        Ok(())
    }

    pub fn set_history_to(&mut self, code: &str) -> Result<()> {
        self.state.history_to_unit_code = self.known_code(code)?;
        self.persist();
        Ok(())
    }

    /// Exchanges the history units, resolving fallbacks first so the swap
    /// always yields two real units.
    pub fn swap_history_units(&mut self) {
        let from = self.history_from_unit().code.clone();
        let to = self.history_to_unit().code.clone();
        self.state.history_from_unit_code = to;
        self.state.history_to_unit_code = from;
        self.persist();
    }

    /// Replaces the amount text as-is.
    pub fn set_amount(&mut self, text: &str) {
        self.amount = AmountInput::new(text);
        self.state.amount = text.to_string();
        self.persist();
    }

    /// Feeds one keypad key to the amount.
    pub fn press_key(&mut self, key: char) {
        if self.amount.press(key) {
            self.state.amount = self.amount.as_str().to_string();
            self.persist();
        }
    }

    pub fn clear_amount(&mut self) {
        self.amount.clear();
        self.state.amount = self.amount.as_str().to_string();
        self.persist();
    }

    pub fn set_target_at(&mut self, index: usize, code: &str) -> Result<()> {
        let code = self.known_code(code)?;
        self.state.target_unit_codes = self.state.target_unit_codes.set_at(index, &code)?;
        self.persist();
        Ok(())
    }

    pub fn reorder_targets(&mut self, from: usize, to: usize) -> Result<()> {
        self.state.target_unit_codes = self.state.target_unit_codes.reorder(from, to)?;
        self.persist();
        Ok(())
    }

    pub fn set_favorite_at(&mut self, index: usize, code: &str) -> Result<()> {
        let code = self.known_code(code)?;
        self.favorites = self.favorites.set_at(index, &code)?;
        self.store.save_favorites(&self.favorites);
        Ok(())
    }

    pub fn reorder_favorites(&mut self, from: usize, to: usize) -> Result<()> {
        self.favorites = self.favorites.reorder(from, to)?;
        self.store.save_favorites(&self.favorites);
        Ok(())
    }

    /// Replaces the working catalog with a freshly simulated one.
    pub fn refresh_rates<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.catalog = simulator::refresh_rates(&self.catalog, rng);
        info!("Refreshed rates for {} units", self.catalog.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::tests::ReadOnlyStore;
    use crate::store::{KeyValueStore, STATE_KEY};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn fresh() -> (Session, StateStore) {
        let store = StateStore::in_memory();
        (Session::load(store.clone()), store)
    }

    #[test]
    fn test_first_run_screen() {
        let (session, _) = fresh();
        assert_eq!(session.base_unit().code, "JPY");
        assert_eq!(session.history_from_unit().code, "JPY");
        assert_eq!(session.history_to_unit().code, "INR");

        let conversions = session.conversions();
        let codes: Vec<&str> = conversions.iter().map(|c| c.unit.code.as_str()).collect();
        assert_eq!(codes, vec!["INR", "USD", "CAD", "EUR", "SGD", "GBP"]);
        assert_eq!(conversions[0].value, "130,521.95");
    }

    #[test]
    fn test_every_mutation_is_saved() {
        let (mut session, store) = fresh();

        session.set_view(View::History);
        assert_eq!(store.load().view, View::History);

        session.set_base_unit("EUR").unwrap();
        assert_eq!(store.load().base_unit_code, "EUR");

        session.set_amount("100");
        assert_eq!(store.load().amount, "100");

        session.set_target_at(0, "USD").unwrap();
        let saved = store.load();
        assert_eq!(saved.target_unit_codes.get(0), Some("USD"));
        assert_eq!(saved.target_unit_codes.get(1), Some("INR"));

        session.reorder_targets(5, 0).unwrap();
        assert_eq!(store.load().target_unit_codes.get(0), Some("GBP"));

        session.set_favorite_at(0, "EUR").unwrap();
        assert_eq!(
            store.load_favorites().as_slice(),
            &["EUR", "USD", "JPY", "GBP", "INR", "CAD", "AUD"]
        );

        session.reorder_favorites(0, 6).unwrap();
        assert_eq!(store.load_favorites().get(6), Some("EUR"));

        assert_eq!(store.load(), *session.state());
    }

    #[test]
    fn test_restores_previous_session() {
        let (mut session, store) = fresh();
        session.set_history_to("BTC").unwrap();
        session.set_favorite_at(2, "CHF").unwrap();

        let restored = Session::load(store);
        assert_eq!(restored.history_to_unit().code, "BTC");
        assert_eq!(restored.favorites().get(2), Some("CHF"));
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        let (mut session, store) = fresh();
        assert!(session.set_base_unit("XXX").is_err());
        assert!(session.set_target_at(0, "XXX").is_err());
        assert!(session.set_favorite_at(0, "XXX").is_err());
        assert!(session.set_target_at(42, "EUR").is_err());
        assert_eq!(store.load(), ApplicationState::default());
    }

    #[test]
    fn test_lookup_miss_uses_fallbacks() {
        let backend = Arc::new(MemoryStore::new());
        let mut state = ApplicationState::default();
        state.base_unit_code = "GONE".to_string();
        state.history_from_unit_code = "GONE".to_string();
        state.history_to_unit_code = "ALSO".to_string();
        backend
            .put(STATE_KEY, &serde_json::to_string(&state).unwrap())
            .unwrap();

        let session = Session::load(StateStore::new(backend));
        assert_eq!(session.base_unit().code, "JPY");
        assert_eq!(session.history_from_unit().code, "JPY");
        assert_eq!(session.history_to_unit().code, "INR");
    }

    #[test]
    fn test_keypad_entry() {
        let (mut session, store) = fresh();
        session.clear_amount();
        assert_eq!(store.load().amount, "0");
        assert!(session.conversions().iter().all(|c| c.value == "0.00"));

        for key in "12.5".chars() {
            session.press_key(key);
        }
        assert_eq!(session.amount().as_str(), "12.5");
        assert_eq!(store.load().amount, "12.5");
    }

    #[test]
    fn test_unparsable_amount_converts_as_zero() {
        let (mut session, _) = fresh();
        session.set_amount("abc");
        assert!(session.conversions().iter().all(|c| c.value == "0.00"));
        assert_eq!(session.history_amount(), "0.00");
    }

    #[test]
    fn test_cycle_and_swap() {
        let (mut session, store) = fresh();
        session.cycle_base_unit();
        assert_eq!(session.base_unit().code, "GBP");

        session.swap_history_units();
        assert_eq!(session.history_from_unit().code, "INR");
        assert_eq!(session.history_to_unit().code, "JPY");
        assert_eq!(store.load().history_from_unit_code, "INR");
    }

    #[test]
    fn test_history_amount() {
        let (mut session, _) = fresh();
        session.set_history_from("USD").unwrap();
        session.set_history_to("EUR").unwrap();
        session.set_amount("100");
        assert_eq!(session.history_rate(), 0.912);
        assert_eq!(session.history_amount(), "91.20");

        let mut rng = StdRng::seed_from_u64(5);
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let points = session.history(30, today, &mut rng);
        assert_eq!(points.len(), 30);
        assert_eq!(points[29].date, "1/15");
    }

    #[test]
    fn test_refresh_changes_rates_not_state() {
        let (mut session, store) = fresh();
        let before = session.catalog().clone();
        let mut rng = StdRng::seed_from_u64(9);
        session.refresh_rates(&mut rng);

        assert_eq!(session.catalog().len(), before.len());
        assert_ne!(session.catalog(), &before);
        assert_eq!(session.catalog().reference(), before.reference());
        assert_eq!(store.load(), *session.state());
    }

    #[test]
    fn test_state_survives_write_failures() {
        let mut session = Session::load(StateStore::new(Arc::new(ReadOnlyStore)));
        session.set_base_unit("EUR").unwrap();
        session.set_favorite_at(0, "BTC").unwrap();
        assert_eq!(session.base_unit().code, "EUR");
        assert_eq!(session.favorites().get(0), Some("BTC"));
    }
}
