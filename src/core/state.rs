//! The persisted snapshot of everything the user sees.

use crate::core::selection::SelectionList;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_CODE: &str = "JPY";
pub const DEFAULT_HISTORY_FROM_CODE: &str = "JPY";
pub const DEFAULT_HISTORY_TO_CODE: &str = "INR";
pub const DEFAULT_AMOUNT: &str = "230000";
pub const DEFAULT_TARGET_CODES: [&str; 6] = ["INR", "USD", "CAD", "EUR", "SGD", "GBP"];
pub const DEFAULT_FAVORITE_CODES: [&str; 7] = ["USD", "EUR", "JPY", "GBP", "INR", "CAD", "AUD"];

/// Which screen is showing. Stored as 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum View {
    #[default]
    Calculator,
    History,
}

impl TryFrom<u8> for View {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(View::Calculator),
            1 => Ok(View::History),
            other => Err(format!("unknown view {other}")),
        }
    }
}

impl From<View> for u8 {
    fn from(view: View) -> Self {
        match view {
            View::Calculator => 0,
            View::History => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub view: View,
    #[serde(rename = "baseCurrencyCode")]
    pub base_unit_code: String,
    #[serde(rename = "historyFromCurrencyCode")]
    pub history_from_unit_code: String,
    #[serde(rename = "historyToCurrencyCode")]
    pub history_to_unit_code: String,
    /// Kept exactly as typed, e.g. "0." while a decimal is being entered.
    pub amount: String,
    #[serde(rename = "calculatorTargetCurrencyCodes")]
    pub target_unit_codes: SelectionList,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self {
            view: View::Calculator,
            base_unit_code: DEFAULT_BASE_CODE.to_string(),
            history_from_unit_code: DEFAULT_HISTORY_FROM_CODE.to_string(),
            history_to_unit_code: DEFAULT_HISTORY_TO_CODE.to_string(),
            amount: DEFAULT_AMOUNT.to_string(),
            target_unit_codes: default_targets(),
        }
    }
}

pub fn default_targets() -> SelectionList {
    SelectionList::new(DEFAULT_TARGET_CODES)
        .unwrap_or_else(|_| unreachable!("defaults are unique"))
}

pub fn default_favorites() -> SelectionList {
    SelectionList::new(DEFAULT_FAVORITE_CODES)
        .unwrap_or_else(|_| unreachable!("defaults are unique"))
}
