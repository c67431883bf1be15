//! Fixed-length, duplicate-free lists of unit codes (favorites, targets).
//!
//! [`SelectionList::set_at`] and [`SelectionList::reorder`] are the only ways
//! to change a list. Both return a new list and leave the receiver alone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("index {index} is out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("code {0} appears more than once")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SelectionList {
    codes: Vec<String>,
}

impl SelectionList {
    pub fn new<I, S>(codes: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::new();
        for code in codes {
            let code = code.into();
            if list.contains(&code) {
                return Err(SelectionError::Duplicate(code));
            }
            list.push(code);
        }
        Ok(Self { codes: list })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.codes.get(index).map(String::as_str)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.codes.iter().position(|c| c == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.codes
    }

    fn check_index(&self, index: usize) -> Result<(), SelectionError> {
        if index >= self.codes.len() {
            return Err(SelectionError::IndexOutOfRange {
                index,
                len: self.codes.len(),
            });
        }
        Ok(())
    }

    /// Puts `new_code` at `index`. If the code already sits at another slot,
    /// that slot receives the code currently at `index`.
    pub fn set_at(&self, index: usize, new_code: &str) -> Result<Self, SelectionError> {
        self.check_index(index)?;
        let mut codes = self.codes.clone();
        if let Some(existing) = self.position(new_code) {
            codes.swap(existing, index);
        } else {
            codes[index] = new_code.to_string();
        }
        Ok(Self { codes })
    }

    /// Moves the entry at `from` to `to`, shifting the ones in between.
    pub fn reorder(&self, from: usize, to: usize) -> Result<Self, SelectionError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let mut codes = self.codes.clone();
        let moved = codes.remove(from);
        codes.insert(to, moved);
        Ok(Self { codes })
    }
}

impl TryFrom<Vec<String>> for SelectionList {
    type Error = SelectionError;

    fn try_from(codes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<SelectionList> for Vec<String> {
    fn from(list: SelectionList) -> Self {
        list.codes
    }
}

/// See [`SelectionList::set_at`].
pub fn set_at(
    list: &SelectionList,
    index: usize,
    new_code: &str,
) -> Result<SelectionList, SelectionError> {
    list.set_at(index, new_code)
}

/// See [`SelectionList::reorder`].
pub fn reorder(
    list: &SelectionList,
    from: usize,
    to: usize,
) -> Result<SelectionList, SelectionError> {
    list.reorder(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn favorites() -> SelectionList {
        SelectionList::new(["USD", "EUR", "JPY", "GBP", "INR", "CAD", "AUD"]).unwrap()
    }

    fn codes(list: &SelectionList) -> Vec<&str> {
        list.iter().collect()
    }

    fn assert_unique(list: &SelectionList) {
        let set: HashSet<&str> = list.iter().collect();
        assert_eq!(set.len(), list.len());
    }

    #[test]
    fn test_set_at_swaps_existing_code() {
        let list = favorites();
        let updated = set_at(&list, 0, "EUR").unwrap();
        assert_eq!(
            codes(&updated),
            vec!["EUR", "USD", "JPY", "GBP", "INR", "CAD", "AUD"]
        );
        // the original is untouched
        assert_eq!(list, favorites());
    }

    #[test]
    fn test_set_at_overwrites_new_code() {
        let updated = favorites().set_at(3, "BTC").unwrap();
        assert_eq!(
            codes(&updated),
            vec!["USD", "EUR", "JPY", "BTC", "INR", "CAD", "AUD"]
        );
    }

    #[test]
    fn test_set_at_same_code_is_noop() {
        let list = favorites();
        for (i, code) in list.iter().enumerate() {
            assert_eq!(list.set_at(i, code).unwrap(), list);
        }
    }

    #[test]
    fn test_set_at_preserves_length_and_uniqueness() {
        let list = favorites();
        let candidates = ["USD", "EUR", "AUD", "BTC", "CHF", "JPY"];
        for index in 0..list.len() {
            for code in candidates {
                let updated = list.set_at(index, code).unwrap();
                assert_eq!(updated.len(), list.len());
                assert_unique(&updated);
                assert_eq!(updated.get(index), Some(code));
            }
        }
    }

    #[test]
    fn test_set_at_out_of_range() {
        let list = favorites();
        assert_eq!(
            list.set_at(7, "BTC"),
            Err(SelectionError::IndexOutOfRange { index: 7, len: 7 })
        );
    }

    #[test]
    fn test_reorder_moves_forward_and_back() {
        let list = favorites();
        let forward = reorder(&list, 0, 3).unwrap();
        assert_eq!(
            codes(&forward),
            vec!["EUR", "JPY", "GBP", "USD", "INR", "CAD", "AUD"]
        );
        let back = forward.reorder(3, 0).unwrap();
        assert_eq!(back, list);

        let last = list.reorder(6, 1).unwrap();
        assert_eq!(
            codes(&last),
            vec!["USD", "AUD", "EUR", "JPY", "GBP", "INR", "CAD"]
        );
        assert_unique(&last);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let list = favorites();
        for i in 0..list.len() {
            assert_eq!(list.reorder(i, i).unwrap(), list);
        }
    }

    #[test]
    fn test_reorder_out_of_range() {
        let list = favorites();
        assert!(list.reorder(0, 9).is_err());
        assert!(list.reorder(9, 0).is_err());
    }

    #[test]
    fn test_new_rejects_duplicates() {
        assert_eq!(
            SelectionList::new(["USD", "EUR", "USD"]),
            Err(SelectionError::Duplicate("USD".to_string()))
        );
    }

    #[test]
    fn test_serde_round_trip_and_rejects_duplicates() {
        let json = serde_json::to_string(&favorites()).unwrap();
        assert_eq!(json, r#"["USD","EUR","JPY","GBP","INR","CAD","AUD"]"#);
        let parsed: SelectionList = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, favorites());

        assert!(serde_json::from_str::<SelectionList>(r#"["USD","USD"]"#).is_err());
    }
}
