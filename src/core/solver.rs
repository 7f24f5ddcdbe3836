use super::types::{
    AnnuityTiming, GoalInputs, GoalPlan, RETIREMENT_WITHDRAWAL_YEARS, RetirementInputs,
    RetirementPlan,
};

const ZERO_RATE_EPS: f64 = 1e-12;
const MONTHS_PER_YEAR: u32 = 12;

/// Constant periodic payment that grows `present_value` into `target_future_value`
/// over `periods` at `rate` per period.
///
/// The result is signed: a negative payment means the present value already
/// outgrows the target. Zero periods, and rates at or below -100% per period,
/// have no meaningful payment and yield 0.
pub fn solve_payment(
    target_future_value: f64,
    present_value: f64,
    rate: f64,
    periods: u32,
    timing: AnnuityTiming,
) -> f64 {
    if periods == 0 || rate <= -1.0 {
        return 0.0;
    }
    let n = periods as f64;
    if rate.abs() < ZERO_RATE_EPS {
        return (target_future_value - present_value) / n;
    }

    let growth = (1.0 + rate).powf(n);
    let mut annuity_factor = (growth - 1.0) / rate;
    if timing == AnnuityTiming::StartOfPeriod {
        annuity_factor *= 1.0 + rate;
    }
    (target_future_value - present_value * growth) / annuity_factor
}

/// Inflation-adjusted return, all rates as annual percentages.
pub fn real_return_pct(expected_return: f64, inflation: f64) -> f64 {
    ((1.0 + expected_return / 100.0) / (1.0 + inflation / 100.0) - 1.0) * 100.0
}

/// Solves the retirement contribution. Returns `None` when a rate sits at or
/// below -100%, an input is not finite, or the horizon in months overflows.
pub fn plan_retirement(inputs: &RetirementInputs) -> Option<RetirementPlan> {
    let finite = [
        inputs.monthly_expenses,
        inputs.current_savings,
        inputs.expected_return,
        inputs.inflation,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite || inputs.expected_return <= -100.0 || inputs.inflation <= -100.0 {
        return None;
    }

    let horizon_years = inputs.retirement_age.saturating_sub(inputs.current_age);
    let periods = horizon_years.checked_mul(MONTHS_PER_YEAR)?;
    let exponent = i32::try_from(horizon_years).ok()?;
    let real_return = real_return_pct(inputs.expected_return, inputs.inflation);
    let future_monthly_expenses =
        inputs.monthly_expenses * (1.0 + inputs.inflation / 100.0).powi(exponent);
    let required_corpus = future_monthly_expenses * 12.0 * RETIREMENT_WITHDRAWAL_YEARS as f64;

    let monthly_contribution = solve_payment(
        required_corpus,
        inputs.current_savings,
        real_return / 1200.0,
        periods,
        AnnuityTiming::StartOfPeriod,
    )
    .max(0.0);

    Some(RetirementPlan {
        horizon_years,
        real_return,
        future_monthly_expenses,
        required_corpus,
        monthly_contribution,
    })
}

pub fn plan_goal(inputs: &GoalInputs) -> Option<GoalPlan> {
    let finite = [
        inputs.goal_amount,
        inputs.expected_return,
        inputs.initial_investment,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite || inputs.expected_return <= -100.0 {
        return None;
    }
    let periods = inputs.years.checked_mul(MONTHS_PER_YEAR)?;

    let monthly_contribution = solve_payment(
        inputs.goal_amount,
        inputs.initial_investment,
        inputs.expected_return / 1200.0,
        periods,
        AnnuityTiming::StartOfPeriod,
    )
    .max(0.0);

    Some(GoalPlan {
        monthly_contribution,
    })
}
