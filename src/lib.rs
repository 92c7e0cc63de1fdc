//! A resistor network calculator for circuit design.
//!
//! Given a catalog of discrete resistor values, this enumerates every
//! series/parallel network of up to a configurable number of resistors,
//! selects the networks whose equivalent resistance lands within a tolerance
//! of a target, and ranks them by relative error. Winning component values
//! can be annotated with their standard 4-band, 5-band and SMD
//! identification codes, and an independent entry point derives the bill of
//! materials of an R-2R ladder DAC.
//!
//! # Example
//! Find networks of up to three E12 resistors within 1% of 3.5 kΩ:
//! ```
//! use rnetcalc::RCalc;
//!
//! let rcalc = RCalc::e12().max_size(3);
//!
//! match rcalc.calc(3500.0, 0.01).expect("valid query") {
//!     Some(res) => {
//!         println!("{} of {} matches shown", res.len(), res.total());
//!         res.print_best();
//!     }
//!     None => println!("No network within tolerance."),
//! }
//! ```
//! The best matches print as expression trees over the catalog values:
//! ```text
//! Match 1:
//! (3300.00 + 180.00) = 3480.00 Ω (2 resistors, error 0.57%)
//! ```

#[macro_use]
extern crate lazy_static;

use itertools::Itertools;

mod color_code;
mod enumerate;
mod error;
#[cfg(feature = "expr_filter")]
mod filter_expr;
mod ladder;
mod network;
mod rank;
mod value;

pub use color_code::{
    code_summary, five_band_code, four_band_code, smd_code, unique_values, COLOR_NAMES,
};
pub use enumerate::{enumerate_networks, RNetTable, DEFAULT_MAX_PER_SIZE, DEFAULT_MAX_SIZE};
pub use error::{Error, Result};
#[cfg(feature = "expr_filter")]
pub use filter_expr::RFilterBuilder;
pub use ladder::{compute_ladder, LadderStep, RLadder, MAX_BITS, MIN_BITS};
pub use network::{RNet, RParts, MAX_PARTS};
pub use rank::{rank_results, rank_results_filtered, RMatch, RRes, DEFAULT_MAX_RESULTS};
pub use value::{format_r_value, parse_r_value};

const POWERS: &[f64] = &[1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6];

lazy_static! {
    /// RSeries constant for the E3 standard series
    pub static ref E3: RSeries = RSeries::new(&[1.0, 2.2, 4.7]);
    /// RSeries constant for the E6 standard series
    pub static ref E6: RSeries = RSeries::extend(&E3, &[1.5, 3.3, 6.8]);
    /// RSeries constant for the E12 standard series
    pub static ref E12: RSeries = RSeries::extend(&E6, &[1.2, 1.8, 2.7, 3.9, 5.6, 8.2]);
    /// RSeries constant for the E24 standard series
    pub static ref E24: RSeries = RSeries::extend(
        &E12,
        &[1.1, 1.3, 1.6, 2.0, 2.4, 3.0, 3.6, 4.3, 5.1, 6.2, 7.5, 9.1]
    );
}

/// A series of resistor values, constants are provided for standard resistor
/// array values covering the decades from 1 Ω to 1 MΩ.
#[derive(Debug)]
pub struct RSeries {
    values: Box<[f64]>,
}

impl RSeries {
    fn new(series: &[f64]) -> Self {
        RSeries {
            values: series
                .iter()
                .cartesian_product(POWERS.iter())
                .map(|(val, pow)| val * pow)
                .collect::<Vec<f64>>()
                .into_boxed_slice(),
        }
    }

    fn extend(base: &RSeries, add: &[f64]) -> Self {
        RSeries {
            values: base
                .iter()
                .cloned()
                .chain(
                    add.iter()
                        .cartesian_product(POWERS.iter())
                        .map(|(val, pow)| val * pow),
                )
                .collect::<Vec<f64>>()
                .into_boxed_slice(),
        }
    }

    /// The values of the series, decades interleaved per base value.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + Clone {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Main calculator struct: a value catalog plus the capacity knobs of one
/// query pipeline.
#[derive(Debug)]
pub struct RCalc {
    catalog: Vec<f64>,
    max_size: usize,
    max_per_size: usize,
    max_results: usize,
}

impl RCalc {
    /// Creates a new RCalc drawing candidate resistors from `catalog`.
    pub fn new(catalog: Vec<f64>) -> Self {
        RCalc {
            catalog,
            max_size: DEFAULT_MAX_SIZE,
            max_per_size: DEFAULT_MAX_PER_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Creates a new RCalc drawing from every value of a standard series.
    pub fn from_series(series: &RSeries) -> Self {
        Self::new(series.values().to_vec())
    }

    /// Creates a new RCalc over the E3 series.
    pub fn e3() -> Self {
        Self::from_series(&E3)
    }

    /// Creates a new RCalc over the E6 series.
    pub fn e6() -> Self {
        Self::from_series(&E6)
    }

    /// Creates a new RCalc over the E12 series.
    pub fn e12() -> Self {
        Self::from_series(&E12)
    }

    /// Creates a new RCalc over the E24 series.
    pub fn e24() -> Self {
        Self::from_series(&E24)
    }

    /// Sets the maximum resistors per network (default 5).
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the per-size network bucket capacity (default 10 000).
    pub fn max_per_size(mut self, max_per_size: usize) -> Self {
        self.max_per_size = max_per_size;
        self
    }

    /// Sets the cap on retained results (default 50).
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// The configured catalog.
    pub fn catalog(&self) -> &[f64] {
        &self.catalog
    }

    /// Returns the number of candidate networks an unbounded enumeration
    /// would visit for the configured catalog, counting both the series and
    /// the parallel combination of every pair. This fairly directly maps to
    /// the time a query takes; the per-size capacity caps what is kept, not
    /// what is visited.
    pub fn combinations(&self) -> u128 {
        if self.max_size < 1 {
            return 0;
        }
        let mut counts = vec![0u128; self.max_size + 1];
        counts[1] = self.catalog.len() as u128;
        let mut total = counts[1];
        for n in 2..=self.max_size {
            let mut generated = 0u128;
            for i in 1..n {
                let j = n - i;
                let pairs = if i == j {
                    counts[i].saturating_mul(counts[i] + 1) / 2
                } else {
                    counts[i].saturating_mul(counts[j])
                };
                generated = generated.saturating_add(pairs.saturating_mul(2));
            }
            counts[n] = generated;
            total = total.saturating_add(generated);
        }
        total
    }

    /// Enumerates the per-size network collections for this catalog.
    pub fn networks(&self) -> Result<RNetTable> {
        enumerate_networks(&self.catalog, self.max_size, self.max_per_size)
    }

    /// Runs the full pipeline: enumerate, filter against `target` and
    /// `tolerance` (a fraction), rank. `Ok(None)` means no network
    /// qualified.
    pub fn calc(&self, target: f64, tolerance: f64) -> Result<Option<RRes>> {
        rank_results(&self.networks()?, target, tolerance, self.max_results)
    }

    /// [`RCalc::calc`] with a predicate applied to candidate networks, often
    /// built with [`RFilterBuilder`](crate::RFilterBuilder).
    pub fn calc_where(
        &self,
        target: f64,
        tolerance: f64,
        keep: impl Fn(&RNet) -> bool,
    ) -> Result<Option<RRes>> {
        rank_results_filtered(&self.networks()?, target, tolerance, self.max_results, keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_cover_seven_decades() {
        assert_eq!(E3.len(), 3 * POWERS.len());
        assert_eq!(E6.len(), 6 * POWERS.len());
        assert_eq!(E12.len(), 12 * POWERS.len());
        assert_eq!(E24.len(), 24 * POWERS.len());
        assert!(E24.iter().all(|&v| (1.0..=9.1e6).contains(&v)));
    }

    #[test]
    fn combinations_counts_the_partition_recurrence() {
        // One catalog value: size 2 visits its single unordered pair once
        // (series + parallel), size 3 visits the split from both directions.
        let rcalc = RCalc::new(vec![100.0]).max_size(3);
        // size 1: 1; size 2: 1 pair * 2 ops; size 3: (1*2 + 2*1) pairs * 2.
        assert_eq!(rcalc.combinations(), 1 + 2 + 8);
    }

    #[test]
    fn calc_is_deterministic_end_to_end() {
        let rcalc = RCalc::new(vec![100.0, 220.0, 470.0]).max_size(3);
        let a = rcalc.calc(330.0, 0.05).unwrap().unwrap();
        let b = rcalc.calc(330.0, 0.05).unwrap().unwrap();
        let ka: Vec<_> = a.iter().map(|m| m.net().key().to_string()).collect();
        let kb: Vec<_> = b.iter().map(|m| m.net().key().to_string()).collect();
        assert_eq!(ka, kb);
        assert!(!ka.is_empty());
    }
}
