//! Series/parallel network nodes.
//!
//! An [`RNet`] is one node of an expression tree of discrete resistor values
//! joined by series and parallel operators. Its equivalent resistance and
//! resistor count are derived from its children at construction time and
//! never re-measured.

use std::fmt;

use itertools::Itertools;

/// Maximum individual leaf values tracked per network.
///
/// Merging two networks whose combined leaves exceed this silently drops the
/// excess. Only the parts list is affected: the resistor count and the
/// equivalent resistance always account for every leaf, so a network past
/// the cap merely gets an incomplete component-code annotation.
pub const MAX_PARTS: usize = 8;

/// The leaf resistor values used by a network, bounded at [`MAX_PARTS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RParts(Vec<f64>);

impl RParts {
    fn single(value: f64) -> Self {
        RParts(vec![value])
    }

    fn merged(a: &RParts, b: &RParts) -> Self {
        let mut vals = Vec::with_capacity(MAX_PARTS.min(a.0.len() + b.0.len()));
        for &v in a.0.iter().chain(b.0.iter()) {
            if vals.len() == MAX_PARTS {
                break;
            }
            vals.push(v);
        }
        RParts(vals)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RParts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0.iter().map(|v| format!("{:.2} Ω", v)).join(", ")
        )
    }
}

/// A series/parallel resistor network.
///
/// Equality is structural: two networks are equal iff their canonical
/// expressions ([`RNet::key`]) are identical. Two different trees that
/// happen to reach the same resistance are *not* equal.
#[derive(Debug, Clone)]
pub struct RNet {
    resistance: f64,
    count: u32,
    expr: String,
    parts: RParts,
}

impl RNet {
    /// Wraps a single catalog value as a 1-resistor network.
    pub fn leaf(value: f64) -> Self {
        RNet {
            resistance: value,
            count: 1,
            expr: format!("{:.2}", value),
            parts: RParts::single(value),
        }
    }

    /// Combines two networks in series: resistances add.
    pub fn series(&self, other: &RNet) -> RNet {
        RNet {
            resistance: self.resistance + other.resistance,
            count: self.count + other.count,
            expr: format!("({} + {})", self.expr, other.expr),
            parts: RParts::merged(&self.parts, &other.parts),
        }
    }

    /// Combines two networks in parallel: reciprocal resistances add.
    ///
    /// Defined only when both operands have strictly positive resistance;
    /// returns `None` otherwise, keeping the reciprocal sum away from zero.
    pub fn parallel(&self, other: &RNet) -> Option<RNet> {
        if self.resistance <= 0.0 || other.resistance <= 0.0 {
            return None;
        }
        Some(RNet {
            resistance: 1.0 / (1.0 / self.resistance + 1.0 / other.resistance),
            count: self.count + other.count,
            expr: format!("({} ∥ {})", self.expr, other.expr),
            parts: RParts::merged(&self.parts, &other.parts),
        })
    }

    /// Equivalent resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Number of resistors in the network. Unlike the parts list, this is
    /// never capped.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Canonical structural key: leaves rendered with two decimals, `+` for
    /// series, `∥` for parallel, fully parenthesized. This is the identity
    /// used by `PartialEq` and also the default human-readable rendering.
    pub fn key(&self) -> &str {
        &self.expr
    }

    /// The leaf values used, for component-code annotation.
    pub fn parts(&self) -> &RParts {
        &self.parts
    }
}

impl PartialEq for RNet {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl Eq for RNet {}

impl fmt::Display for RNet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
