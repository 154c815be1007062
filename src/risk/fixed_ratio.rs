//! Fixed-ratio contract scaling
//!
//! Moving from `n` to `n + 1` contracts requires profit above `delta × n` since
//! the last change. The engine is stateless: callers carry the contract count and
//! the profit accumulated since the last increase between calls.

use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul, ensure_finite, internal_error, to_f64};
use crate::validation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Caller-held fixed-ratio state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRatioState {
    pub contracts: u64,
    /// Profit (or loss, when negative) since the contract count last changed
    pub profit_since_change: Decimal,
}

/// Fixed-ratio sizer
#[derive(Debug, Clone)]
pub struct FixedRatioSizer {
    /// Profit per existing contract needed to add one more
    pub delta: Decimal,
    /// Contract count the sizer never drops below
    pub base_contracts: u64,
}

impl FixedRatioSizer {
    /// Create a new fixed-ratio sizer
    pub fn new(delta: Decimal, base_contracts: u64) -> Result<Self, CalcError> {
        validation::positive("delta", delta)?;
        if base_contracts == 0 {
            return Err(CalcError::invalid("base_contracts", "must be at least 1"));
        }
        Ok(Self {
            delta,
            base_contracts,
        })
    }

    /// Apply one trade's profit or loss to the caller's state.
    ///
    /// Steps up while the carried profit exceeds `delta × contracts`; steps down
    /// while the carried loss exceeds `delta × (contracts − 1)`, never below the
    /// base. The remainder is carried forward.
    pub fn apply_trade(
        &self,
        state: FixedRatioState,
        trade_pnl: Decimal,
    ) -> Result<FixedRatioState, CalcError> {
        validation::within_magnitude("trade_pnl", trade_pnl.abs())?;
        validation::within_magnitude("profit_since_change", state.profit_since_change.abs())?;
        let start = state.contracts.max(self.base_contracts);
        let carried = state
            .profit_since_change
            .checked_add(trade_pnl)
            .ok_or_else(|| internal_error("fixed ratio carried profit"))?;

        // Cumulative profit measured from the base size
        let level = self
            .profit_threshold(start)?
            .checked_add(carried)
            .ok_or_else(|| internal_error("fixed ratio carried profit"))?;

        let contracts = if carried > Decimal::ZERO {
            self.highest_level(level, false)?
        } else if carried.is_zero() {
            start
        } else if level < Decimal::ZERO {
            self.base_contracts
        } else {
            // Step down to just above the last threshold the loss leaves intact
            next_level(self.highest_level(level, true)?)?.min(start)
        };
        let carried = level - self.profit_threshold(contracts)?;

        if contracts != state.contracts {
            tracing::debug!(from = state.contracts, to = contracts, "fixed ratio contracts changed");
        }
        Ok(FixedRatioState {
            contracts,
            profit_since_change: carried,
        })
    }

    /// Cumulative profit at which the sizer reaches `contracts`
    pub fn profit_threshold(&self, contracts: u64) -> Result<Decimal, CalcError> {
        if contracts <= self.base_contracts {
            return Ok(Decimal::ZERO);
        }
        // delta × (base + ... + contracts − 1)
        let n = Decimal::from(contracts);
        let b = Decimal::from(self.base_contracts);
        let span = checked_mul(n, n - Decimal::ONE, "fixed ratio threshold")?
            - checked_mul(b, b - Decimal::ONE, "fixed ratio threshold")?;
        checked_mul(self.delta, span / dec!(2), "fixed ratio threshold")
    }

    /// Cumulative profit needed to add one contract to `contracts`
    pub fn next_threshold(&self, contracts: u64) -> Result<Decimal, CalcError> {
        self.profit_threshold(next_level(contracts)?)
    }

    /// Contract count for a cumulative profit measured from the base size
    pub fn contracts_for_profit(&self, cumulative_profit: Decimal) -> Result<u64, CalcError> {
        validation::within_magnitude("cumulative_profit", cumulative_profit)?;
        self.highest_level(cumulative_profit, false)
    }

    /// Largest count whose threshold lies below `cumulative` (or at it, when
    /// `inclusive`), never less than the base.
    fn highest_level(&self, cumulative: Decimal, inclusive: bool) -> Result<u64, CalcError> {
        if cumulative <= Decimal::ZERO {
            return Ok(self.base_contracts);
        }
        let reached = |contracts: u64| -> Result<bool, CalcError> {
            let threshold = self.profit_threshold(contracts)?;
            Ok(threshold < cumulative || (inclusive && threshold == cumulative))
        };

        // Solve n(n−1) = 2P/delta + b(b−1) for an estimate, then settle on exact thresholds
        let b = to_f64(Decimal::from(self.base_contracts), "fixed ratio base")?;
        let ratio = to_f64(checked_div(cumulative, self.delta, "fixed ratio")?, "fixed ratio")?;
        let estimate = (0.5 + (0.25 + 2.0 * ratio + b * (b - 1.0)).sqrt()).floor();
        let estimate = ensure_finite(estimate, "fixed ratio estimate")?;
        let mut contracts = (estimate as u64).max(self.base_contracts);

        while reached(next_level(contracts)?)? {
            contracts = next_level(contracts)?;
        }
        while contracts > self.base_contracts && !reached(contracts)? {
            contracts -= 1;
        }
        Ok(contracts)
    }
}

fn next_level(contracts: u64) -> Result<u64, CalcError> {
    contracts
        .checked_add(1)
        .ok_or_else(|| internal_error("fixed ratio contracts"))
}
