//! Expression-based network filters.
//!
//! Builds a predicate over enumerated networks from textual bounds like
//! `"R <= 1e6"` or `"N < 4"`, where `R` is the equivalent resistance and
//! `N` the resistor count. A bound that fails to evaluate (for example by
//! referencing an unknown variable) rejects the candidate.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::network::RNet;

struct Bound {
    op: Box<dyn Fn(f64, f64) -> bool>,
    expr: meval::Expr,
    limit: f64,
}

fn split_expr(s: &str, pat: &str) -> std::result::Result<(meval::Expr, f64), String> {
    let mut split = s.splitn(2, pat);
    let lhs = split.next().unwrap_or("").trim();
    let rhs = split
        .next()
        .ok_or_else(|| format!("bound '{}' is missing a limit", s))?
        .trim();
    let expr = lhs
        .parse::<meval::Expr>()
        .map_err(|e| format!("bad expression '{}': {}", lhs, e))?;
    let limit = rhs
        .parse::<f64>()
        .map_err(|_| format!("bad limit '{}' in bound '{}'", rhs, s))?;
    Ok((expr, limit))
}

impl FromStr for Bound {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        fn bound(op: Box<dyn Fn(f64, f64) -> bool>, (expr, limit): (meval::Expr, f64)) -> Bound {
            Bound { op, expr, limit }
        }
        if s.contains("<=") {
            Ok(bound(Box::new(|a, b| a <= b), split_expr(s, "<=")?))
        } else if s.contains(">=") {
            Ok(bound(Box::new(|a, b| a >= b), split_expr(s, ">=")?))
        } else if s.contains("==") {
            Ok(bound(
                Box::new(|a, b| (a - b).abs() < f64::EPSILON),
                split_expr(s, "==")?,
            ))
        } else if s.contains("!=") {
            Ok(bound(
                Box::new(|a, b| (a - b).abs() > f64::EPSILON),
                split_expr(s, "!=")?,
            ))
        } else if s.contains('<') {
            Ok(bound(Box::new(|a, b| a < b), split_expr(s, "<")?))
        } else if s.contains('>') {
            Ok(bound(Box::new(|a, b| a > b), split_expr(s, ">")?))
        } else {
            Err(format!(
                "bound '{}' must contain one of <, <=, >, >=, == or !=",
                s
            ))
        }
    }
}

/// Builder turning textual bounds into one `Fn(&RNet) -> bool` predicate,
/// suitable for [`RCalc::calc_where`](crate::RCalc::calc_where).
///
/// # Example
/// ```
/// use rnetcalc::{RFilterBuilder, RNet};
///
/// let keep = RFilterBuilder::new()
///     .bound("N <= 2")
///     .bound("R < 500")
///     .finish();
/// assert!(keep(&RNet::leaf(220.0)));
/// assert!(!keep(&RNet::leaf(680.0)));
/// ```
#[derive(Default)]
pub struct RFilterBuilder {
    ops: Vec<Bound>,
}

impl RFilterBuilder {
    pub fn new() -> Self {
        RFilterBuilder { ops: Vec::new() }
    }

    /// Adds a bound of the form `expr op limit`, where `expr` is a math
    /// expression over `R` and `N`, `op` one of `<`, `<=`, `>`, `>=`, `==`,
    /// `!=`, and `limit` a number.
    ///
    /// # Panics
    /// Panics on a malformed bound; see [`RFilterBuilder::try_bound`] for
    /// the fallible variant.
    pub fn bound(self, expr: &str) -> Self {
        match self.try_bound(expr) {
            Ok(builder) => builder,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible [`RFilterBuilder::bound`].
    pub fn try_bound(mut self, expr: &str) -> Result<Self> {
        let bound = expr.parse::<Bound>().map_err(Error::FilterParse)?;
        self.ops.push(bound);
        Ok(self)
    }

    fn chain_fn(&mut self) -> Box<dyn Fn(&meval::Context) -> bool> {
        match self.ops.pop() {
            Some(Bound { op, expr, limit }) => {
                let inner = self.chain_fn();
                Box::new(move |ctx| {
                    expr.eval_with_context(ctx)
                        .map_or(false, |val| op(val, limit))
                        && inner(ctx)
                })
            }
            None => Box::new(|_| true),
        }
    }

    /// Finishes the builder into a predicate accepting networks that satisfy
    /// every bound.
    pub fn finish(mut self) -> impl Fn(&RNet) -> bool {
        let chain = self.chain_fn();
        move |net: &RNet| {
            let mut ctx = meval::Context::new();
            ctx.var("R", net.resistance());
            ctx.var("N", f64::from(net.count()));
            chain(&ctx)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(count: u32, each: f64) -> RNet {
        let mut net = RNet::leaf(each);
        for _ in 1..count {
            net = net.series(&RNet::leaf(each));
        }
        net
    }

    #[test]
    fn resistance_bound_filters() {
        let keep = RFilterBuilder::new().bound("R <= 100").finish();
        assert!(keep(&RNet::leaf(100.0)));
        assert!(!keep(&RNet::leaf(101.0)));
    }

    #[test]
    fn count_bound_filters() {
        let keep = RFilterBuilder::new().bound("N < 3").finish();
        assert!(keep(&series_of(2, 10.0)));
        assert!(!keep(&series_of(3, 10.0)));
    }

    #[test]
    fn bounds_chain_conjunctively() {
        let keep = RFilterBuilder::new()
            .bound("R > 50")
            .bound("R < 150")
            .bound("N == 1")
            .finish();
        assert!(keep(&RNet::leaf(100.0)));
        assert!(!keep(&RNet::leaf(40.0)));
        assert!(!keep(&series_of(2, 50.0)));
    }

    #[test]
    fn expressions_may_combine_variables() {
        let keep = RFilterBuilder::new().bound("R / N >= 50").finish();
        assert!(keep(&series_of(2, 60.0)));
        assert!(!keep(&series_of(2, 40.0)));
    }

    #[test]
    fn malformed_bound_is_reported() {
        assert!(matches!(
            RFilterBuilder::new().try_bound("R ~ 100"),
            Err(Error::FilterParse(_))
        ));
        assert!(matches!(
            RFilterBuilder::new().try_bound("R <"),
            Err(Error::FilterParse(_))
        ));
    }

    #[test]
    #[should_panic(expected = "must contain one of")]
    fn bound_panics_on_malformed_input() {
        let _ = RFilterBuilder::new().bound("no operator here");
    }

    #[test]
    fn unknown_variable_rejects_candidate() {
        let keep = RFilterBuilder::new().bound("Q < 5").finish();
        assert!(!keep(&RNet::leaf(1.0)));
    }
}
