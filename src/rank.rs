//! Tolerance filtering and ranking of enumerated networks.

use std::fmt;

use crate::enumerate::RNetTable;
use crate::error::{Error, Result};
use crate::network::RNet;

/// Reference cap on results retained for presentation.
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// A network that qualified for one query, with its relative error.
///
/// Matches are rebuilt fresh for every query; nothing is cached across
/// queries.
#[derive(Debug, Clone, PartialEq)]
pub struct RMatch {
    net: RNet,
    error: f64,
}

impl RMatch {
    pub fn net(&self) -> &RNet {
        &self.net
    }

    /// `|resistance − target| / target` for the query that produced this
    /// match.
    pub fn error(&self) -> f64 {
        self.error
    }
}

impl fmt::Display for RMatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} = {:.2} Ω ({} resistor{}, error {:.2}%)",
            self.net.key(),
            self.net.resistance(),
            self.net.count(),
            if self.net.count() > 1 { "s" } else { "" },
            self.error * 100.0
        )
    }
}

/// Ordered results of one query.
///
/// Holds at most the requested number of matches sorted by ascending error,
/// ties broken by ascending resistor count, further ties left in enumeration
/// order. Only built when at least one network qualified, so `best()` always
/// has something to return; a query with no matches yields `Ok(None)` from
/// [`rank_results`] instead.
#[derive(Debug)]
pub struct RRes {
    matches: Vec<RMatch>,
    total: usize,
}

impl RRes {
    /// Retained matches, best first.
    pub fn iter(&self) -> impl Iterator<Item = &RMatch> {
        self.matches.iter()
    }

    /// Number of retained matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The lowest-error match.
    pub fn best(&self) -> &RMatch {
        &self.matches[0]
    }

    /// Every network that qualified, including those beyond the cap.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Qualifying networks that were not retained.
    pub fn overflow(&self) -> usize {
        self.total - self.matches.len()
    }

    /// Print all matches that share the lowest error value.
    pub fn print_best(&self) {
        let best_err = self.matches[0].error;
        for (idx, m) in self
            .matches
            .iter()
            .take_while(|m| m.error == best_err)
            .enumerate()
        {
            println!("Match {}:", idx + 1);
            println!("{}", m);
            println!();
        }
    }
}

/// Ranks every enumerated network against `target`.
///
/// A network qualifies iff its relative error is within `tolerance` (a
/// fraction, e.g. `0.05` for 5%). Fails on a non-positive target or a
/// negative tolerance; returns `Ok(None)` when nothing qualifies.
pub fn rank_results(
    table: &RNetTable,
    target: f64,
    tolerance: f64,
    max_results: usize,
) -> Result<Option<RRes>> {
    rank_results_filtered(table, target, tolerance, max_results, |_| true)
}

/// [`rank_results`] with a caller predicate applied before the tolerance
/// test. Networks rejected by `keep` are not counted as qualifying.
pub fn rank_results_filtered(
    table: &RNetTable,
    target: f64,
    tolerance: f64,
    max_results: usize,
    keep: impl Fn(&RNet) -> bool,
) -> Result<Option<RRes>> {
    if target <= 0.0 {
        return Err(Error::NonPositiveTarget(target));
    }
    if tolerance < 0.0 {
        return Err(Error::NegativeTolerance(tolerance));
    }

    let mut matches: Vec<RMatch> = table
        .iter()
        .filter_map(|net| {
            if !keep(net) {
                return None;
            }
            let error = (net.resistance() - target).abs() / target;
            if error <= tolerance {
                Some(RMatch {
                    net: net.clone(),
                    error,
                })
            } else {
                None
            }
        })
        .collect();

    // Stable sort: exact ties on both keys keep enumeration order.
    matches.sort_by(|a, b| {
        a.error
            .total_cmp(&b.error)
            .then_with(|| a.net.count().cmp(&b.net.count()))
    });

    let total = matches.len();
    if total == 0 {
        return Ok(None);
    }
    matches.truncate(max_results);
    Ok(Some(RRes { matches, total }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::enumerate_networks;

    #[test]
    fn non_positive_target_is_rejected() {
        let table = enumerate_networks(&[100.0], 1, 10).unwrap();
        assert_eq!(
            rank_results(&table, 0.0, 0.05, 50).unwrap_err(),
            Error::NonPositiveTarget(0.0)
        );
        assert_eq!(
            rank_results(&table, -5.0, 0.05, 50).unwrap_err(),
            Error::NonPositiveTarget(-5.0)
        );
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let table = enumerate_networks(&[100.0], 1, 10).unwrap();
        assert_eq!(
            rank_results(&table, 100.0, -0.01, 50).unwrap_err(),
            Error::NegativeTolerance(-0.01)
        );
    }

    #[test]
    fn no_match_is_an_explicit_outcome() {
        let table = enumerate_networks(&[100.0], 1, 10).unwrap();
        assert!(rank_results(&table, 1e6, 0.05, 50).unwrap().is_none());
    }

    #[test]
    fn exact_match_ranks_first_with_zero_error() {
        let table = enumerate_networks(&[50.0, 100.0], 2, 100).unwrap();
        let res = rank_results(&table, 100.0, 0.0, 50).unwrap().unwrap();
        // Exact hits only: the 100 Ω leaf and 50 + 50.
        assert_eq!(res.total(), 2);
        assert_eq!(res.best().error(), 0.0);
        assert_eq!(res.best().net().key(), "100.00");
        assert_eq!(res.best().net().count(), 1);
        // Equal error, more resistors: ranked second.
        assert_eq!(res.iter().nth(1).unwrap().net().key(), "(50.00 + 50.00)");
    }

    #[test]
    fn results_are_sorted_and_within_tolerance() {
        let table = enumerate_networks(&[82.0, 100.0, 120.0], 3, 1000).unwrap();
        let tolerance = 0.1;
        let res = rank_results(&table, 100.0, tolerance, 200).unwrap().unwrap();
        let mut prev: Option<&RMatch> = None;
        for m in res.iter() {
            assert!(m.error() <= tolerance, "{} exceeds tolerance", m);
            if let Some(p) = prev {
                assert!(
                    p.error() < m.error()
                        || (p.error() == m.error() && p.net().count() <= m.net().count()),
                    "order violated between {} and {}",
                    p,
                    m
                );
            }
            prev = Some(m);
        }
    }

    #[test]
    fn cap_reports_overflow() {
        let table = enumerate_networks(&[50.0, 100.0], 2, 100).unwrap();
        let res = rank_results(&table, 100.0, 0.0, 1).unwrap().unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res.total(), 2);
        assert_eq!(res.overflow(), 1);
    }

    #[test]
    fn identical_queries_rank_identically() {
        let table = enumerate_networks(&[82.0, 100.0, 120.0], 3, 500).unwrap();
        let a = rank_results(&table, 110.0, 0.2, 50).unwrap().unwrap();
        let b = rank_results(&table, 110.0, 0.2, 50).unwrap().unwrap();
        let ka: Vec<_> = a.iter().map(|m| m.net().key().to_string()).collect();
        let kb: Vec<_> = b.iter().map(|m| m.net().key().to_string()).collect();
        assert_eq!(ka, kb);
    }

    #[test]
    fn filter_predicate_restricts_candidates() {
        let table = enumerate_networks(&[50.0, 100.0], 2, 100).unwrap();
        let res = rank_results_filtered(&table, 100.0, 0.0, 50, |net| net.count() == 1)
            .unwrap()
            .unwrap();
        assert_eq!(res.total(), 1);
        assert_eq!(res.best().net().key(), "100.00");
    }
}
