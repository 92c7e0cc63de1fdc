//! Partition-based enumeration of series/parallel networks.
//!
//! Networks of `n` resistors are built from every split `i + j = n` of
//! previously enumerated smaller networks. Generation order is normative,
//! because per-size buckets are bounded and keep candidates first come,
//! first kept: partition index ascending, then the left operand, then the
//! right operand, series before parallel for each pair. When a split is
//! combining a bucket with itself the right index starts at the left index,
//! so an unordered pair of networks is visited once. Asymmetric splits
//! `{i, j}` are visited from both directions and generate each combination
//! twice; with bounded buckets this makes the generation order part of the
//! observable result, so it must not change.

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::network::RNet;

/// Reference maximum resistors per network.
pub const DEFAULT_MAX_SIZE: usize = 5;
/// Reference capacity of each per-size bucket.
pub const DEFAULT_MAX_PER_SIZE: usize = 10_000;

/// Per-size collections of enumerated networks.
///
/// Bucket `size` holds every kept network of exactly `size` resistors, in
/// generation order. Candidates that arrived at a full bucket are counted in
/// [`RNetTable::dropped`] rather than stored; a dropped candidate is policy,
/// never an error.
#[derive(Debug)]
pub struct RNetTable {
    buckets: Vec<Vec<RNet>>,
    dropped: Vec<usize>,
    max_per_size: usize,
}

impl RNetTable {
    /// Largest network size enumerated.
    pub fn max_size(&self) -> usize {
        self.buckets.len() - 1
    }

    /// Bucket capacity the table was built with.
    pub fn capacity(&self) -> usize {
        self.max_per_size
    }

    /// Kept networks of exactly `size` resistors, in generation order.
    pub fn networks(&self, size: usize) -> &[RNet] {
        self.buckets.get(size).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidates dropped from the `size` bucket after it filled.
    pub fn dropped(&self, size: usize) -> usize {
        self.dropped.get(size).copied().unwrap_or(0)
    }

    /// Total kept networks across all sizes.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// All kept networks, sizes ascending, buckets in generation order.
    pub fn iter(&self) -> impl Iterator<Item = &RNet> {
        self.buckets.iter().flatten()
    }
}

/// Enumerates every reachable series/parallel network of `1..=max_size`
/// resistors drawn from `catalog`.
///
/// Each catalog value seeds a 1-resistor network rendered with two-decimal
/// precision. Fails only on an empty catalog or `max_size < 1`; a full
/// bucket silently drops further candidates (see [`RNetTable::dropped`]).
pub fn enumerate_networks(
    catalog: &[f64],
    max_size: usize,
    max_per_size: usize,
) -> Result<RNetTable> {
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    if max_size < 1 {
        return Err(Error::InvalidMaxSize(max_size));
    }

    let mut buckets: Vec<Vec<RNet>> = vec![Vec::new(); max_size + 1];
    let mut dropped = vec![0usize; max_size + 1];

    for &value in catalog {
        if buckets[1].len() < max_per_size {
            buckets[1].push(RNet::leaf(value));
        } else {
            dropped[1] += 1;
        }
    }

    for n in 2..=max_size {
        let (lower, rest) = buckets.split_at_mut(n);
        let bucket = &mut rest[0];
        for i in 1..n {
            let j = n - i;
            for a_idx in 0..lower[i].len() {
                let b_start = if i == j { a_idx } else { 0 };
                for b_idx in b_start..lower[j].len() {
                    let a = &lower[i][a_idx];
                    let b = &lower[j][b_idx];

                    if bucket.len() < max_per_size {
                        bucket.push(a.series(b));
                    } else {
                        dropped[n] += 1;
                    }

                    if bucket.len() < max_per_size {
                        if let Some(net) = a.parallel(b) {
                            bucket.push(net);
                        }
                    } else if a.resistance() > 0.0 && b.resistance() > 0.0 {
                        dropped[n] += 1;
                    }
                }
            }
        }
        debug!(
            "size {}: {} networks kept, {} dropped",
            n,
            bucket.len(),
            dropped[n]
        );
        if dropped[n] > 0 {
            warn!(
                "size-{} bucket full at {} networks, dropped {} candidates",
                n, max_per_size, dropped[n]
            );
        }
    }

    Ok(RNetTable {
        buckets,
        dropped,
        max_per_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(nets: &[RNet]) -> Vec<&str> {
        nets.iter().map(RNet::key).collect()
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert_eq!(
            enumerate_networks(&[], 5, 100).unwrap_err(),
            Error::EmptyCatalog
        );
    }

    #[test]
    fn zero_max_size_is_rejected() {
        assert_eq!(
            enumerate_networks(&[100.0], 0, 100).unwrap_err(),
            Error::InvalidMaxSize(0)
        );
    }

    #[test]
    fn single_value_catalog_yields_one_leaf() {
        let table = enumerate_networks(&[470.0], 1, 100).unwrap();
        assert_eq!(table.len(), 1);
        let net = &table.networks(1)[0];
        assert_eq!(net.resistance(), 470.0);
        assert_eq!(net.key(), "470.00");
    }

    #[test]
    fn size_two_generation_order() {
        let table = enumerate_networks(&[100.0, 200.0], 2, 100).unwrap();
        // Same-size split: unordered pairs (0,0), (0,1), (1,1), series first.
        assert_eq!(
            keys(table.networks(2)),
            vec![
                "(100.00 + 100.00)",
                "(100.00 ∥ 100.00)",
                "(100.00 + 200.00)",
                "(100.00 ∥ 200.00)",
                "(200.00 + 200.00)",
                "(200.00 ∥ 200.00)",
            ]
        );
    }

    #[test]
    fn mirrored_splits_generate_asymmetric_pairs_twice() {
        let table = enumerate_networks(&[100.0], 3, 100).unwrap();
        // Size 3 = split (1,2) then split (2,1); each produces 4 networks,
        // so every asymmetric combination appears from both directions.
        let ks = keys(table.networks(3));
        assert_eq!(ks.len(), 8);
        assert_eq!(ks[0], "(100.00 + (100.00 + 100.00))");
        assert_eq!(ks[4], "((100.00 + 100.00) + 100.00)");
    }

    #[test]
    fn full_bucket_keeps_first_generated() {
        let table = enumerate_networks(&[100.0, 200.0], 2, 3).unwrap();
        assert_eq!(
            keys(table.networks(2)),
            vec![
                "(100.00 + 100.00)",
                "(100.00 ∥ 100.00)",
                "(100.00 + 200.00)",
            ]
        );
        assert_eq!(table.dropped(2), 3);
    }

    #[test]
    fn leaf_bucket_honors_capacity() {
        let table = enumerate_networks(&[1.0, 2.0, 3.0, 4.0, 5.0], 1, 3).unwrap();
        assert_eq!(table.networks(1).len(), 3);
        assert_eq!(table.dropped(1), 2);
    }

    #[test]
    fn enumeration_is_deterministic() {
        let catalog = [100.0, 220.0, 470.0];
        let a = enumerate_networks(&catalog, 3, 50).unwrap();
        let b = enumerate_networks(&catalog, 3, 50).unwrap();
        for size in 1..=3 {
            assert_eq!(keys(a.networks(size)), keys(b.networks(size)));
            assert_eq!(a.dropped(size), b.dropped(size));
        }
    }

    #[test]
    fn parallel_skipped_for_nonpositive_legs() {
        let table = enumerate_networks(&[0.0, 100.0], 2, 100).unwrap();
        // Pairs involving the zero leaf only produce series networks.
        let ks = keys(table.networks(2));
        assert_eq!(
            ks,
            vec![
                "(0.00 + 0.00)",
                "(0.00 + 100.00)",
                "(100.00 + 100.00)",
                "(100.00 ∥ 100.00)",
            ]
        );
    }
}
