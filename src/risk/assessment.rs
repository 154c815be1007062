//! Margin utilization and risk:reward classification

use super::types::{CalculationResult, LeverageWarning, RiskAssessment, RiskRewardClass};
use crate::error::CalcError;
use crate::numeric::{checked_div, checked_mul};
use crate::validation;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Utilization above this percentage is flagged `caution`
pub const CAUTION_UTILIZATION: Decimal = dec!(50);
/// Utilization above this percentage is flagged `high`
pub const HIGH_UTILIZATION: Decimal = dec!(80);

/// Derive margin utilization, leverage warning and risk:reward class
pub fn assess_risk(result: &CalculationResult) -> Result<RiskAssessment, CalcError> {
    validation::positive("balance", result.balance)?;
    validation::non_negative("margin", result.margin)?;

    let margin_utilization = percent_of_balance(result.margin, result.balance, "margin utilization")?;
    let effective_leverage = checked_div(result.notional_value, result.balance, "effective leverage")?;
    let risk_percentage = percent_of_balance(result.potential_loss, result.balance, "risk percentage")?;

    let assessment = RiskAssessment {
        margin_utilization,
        leverage_warning: leverage_warning(margin_utilization),
        effective_leverage,
        risk_percentage,
        risk_reward_class: result.risk_reward_ratio.map(classify_risk_reward),
    };
    if assessment.leverage_warning != LeverageWarning::None {
        tracing::debug!(
            instrument = %result.instrument,
            %margin_utilization,
            warning = %assessment.leverage_warning,
            "margin utilization flagged"
        );
    }
    Ok(assessment)
}

/// Band a margin utilization percentage
pub fn leverage_warning(margin_utilization: Decimal) -> LeverageWarning {
    if margin_utilization > HIGH_UTILIZATION {
        LeverageWarning::High
    } else if margin_utilization > CAUTION_UTILIZATION {
        LeverageWarning::Caution
    } else {
        LeverageWarning::None
    }
}

/// Band a risk:reward ratio
pub fn classify_risk_reward(ratio: Decimal) -> RiskRewardClass {
    if ratio < Decimal::ONE {
        RiskRewardClass::Poor
    } else if ratio <= dec!(2) {
        RiskRewardClass::Acceptable
    } else {
        RiskRewardClass::Good
    }
}

fn percent_of_balance(
    amount: Decimal,
    balance: Decimal,
    what: &'static str,
) -> Result<Decimal, CalcError> {
    checked_div(checked_mul(amount, dec!(100), what)?, balance, what)
}
