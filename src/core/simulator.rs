//! Synthetic rate movement: periodic "live" refreshes and historical series.
//!
//! Both functions take the random source as a parameter so callers decide
//! between `rand::thread_rng()` and a seeded or mocked generator.

use crate::core::unit::{Catalog, Unit};
use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;

/// Largest relative move applied to a rate on each refresh.
pub const REFRESH_VOLATILITY: f64 = 0.005;

/// Bound of the simulated 24h change, in percent.
pub const CHANGE_24H_RANGE: f64 = 2.5;

/// Largest relative move between two consecutive historical days.
pub const HISTORY_VOLATILITY: f64 = 0.015;

/// Window shown by the history view.
pub const DEFAULT_HISTORY_DAYS: usize = 90;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalPoint {
    pub date: String,
    pub rate: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Returns a new catalog with every non-reference rate nudged by up to
/// [`REFRESH_VOLATILITY`] and a freshly drawn 24h change.
pub fn refresh_rates<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Catalog {
    let units = catalog
        .units()
        .iter()
        .map(|unit| {
            if unit.is_reference() {
                return unit.clone();
            }
            let fluctuation = rng.gen_range(-REFRESH_VOLATILITY..REFRESH_VOLATILITY);
            let change = rng.gen_range(-CHANGE_24H_RANGE..CHANGE_24H_RANGE);
            Unit {
                rate_to_reference: unit.rate_to_reference * (1.0 + fluctuation),
                change_24h: round_to(change, 2),
                ..unit.clone()
            }
        })
        .collect();
    Catalog::from_units(units)
}

/// Random-walks the `from`/`to` cross rate backwards from `today`.
///
/// Each day the running rate is perturbed by up to [`HISTORY_VOLATILITY`]
/// and then recorded, so the result holds exactly `days` points ordered
/// oldest first and ending at `today`. Labels are `month/day`, which stay
/// unique for windows of up to a year.
pub fn generate_history<R: Rng + ?Sized>(
    from: &Unit,
    to: &Unit,
    days: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let mut rate = Catalog::cross_rate(from, to);
    let mut points = Vec::with_capacity(days);

    for offset in 0..days {
        rate *= 1.0 + rng.gen_range(-HISTORY_VOLATILITY..HISTORY_VOLATILITY);
        let date = today
            .checked_sub_days(Days::new(offset as u64))
            .unwrap_or(NaiveDate::MIN);
        points.push(HistoricalPoint {
            date: format!("{}/{}", date.month(), date.day()),
            rate: round_to(rate, 4),
        });
    }

    points.reverse();
    points
}

/// Range of a historical series, used to scale charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySummary {
    pub min: f64,
    pub max: f64,
    pub first: f64,
    pub last: f64,
}

impl HistorySummary {
    pub fn from_points(points: &[HistoricalPoint]) -> Option<Self> {
        let first = points.first()?.rate;
        let last = points.last()?.rate;
        let (min, max) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.rate), hi.max(p.rate))
            });
        Some(Self {
            min,
            max,
            first,
            last,
        })
    }

    /// Percent change from the oldest to the newest point.
    pub fn change_pct(&self) -> f64 {
        if self.first == 0.0 {
            return 0.0;
        }
        (self.last - self.first) / self.first * 100.0
    }
}
