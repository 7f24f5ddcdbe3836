use super::solver::{plan_goal, plan_retirement};
use super::types::{
    GoalInputs, LumpsumInputs, ProjectionResult, RetirementInputs, SipInputs, Strategy, SwpInputs,
    YearlyProjection,
};

const MONTHS_PER_YEAR: u32 = 12;
const MAX_PREALLOCATED_YEARS: u32 = 1_200;

/// Year-end state of a simulated balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPoint {
    pub year: u32,
    /// Sum of periodic flows applied so far, excluding the opening balance.
    pub cumulative_flow: f64,
    pub balance: f64,
}

/// Monthly simulation of a balance receiving `periodic_flow` before each period
/// compounds at `periodic_rate`. One point per elapsed year.
///
/// Negative balances are left as-is. A rate at or below -100% per period, a
/// horizon whose month count overflows `u32`, or any non-finite input yields
/// no points.
pub fn simulate_periodic_flow(
    opening_balance: f64,
    periodic_flow: f64,
    periodic_rate: f64,
    years: u32,
) -> Vec<GrowthPoint> {
    let finite =
        opening_balance.is_finite() && periodic_flow.is_finite() && periodic_rate.is_finite();
    if !finite || periodic_rate <= -1.0 || years.checked_mul(MONTHS_PER_YEAR).is_none() {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(years.min(MAX_PREALLOCATED_YEARS) as usize);
    let mut balance = opening_balance;
    let mut cumulative_flow = 0.0;
    for year in 1..=years {
        for _ in 0..MONTHS_PER_YEAR {
            balance = (balance + periodic_flow) * (1.0 + periodic_rate);
            cumulative_flow += periodic_flow;
        }
        points.push(GrowthPoint {
            year,
            cumulative_flow,
            balance,
        });
    }
    points
}

/// Annual compounding of a one-time principal, recording each year-end balance.
pub fn simulate_lumpsum_growth(principal: f64, annual_rate: f64, years: u32) -> Vec<GrowthPoint> {
    let finite = principal.is_finite() && annual_rate.is_finite();
    if !finite || annual_rate <= -1.0 || years.checked_mul(MONTHS_PER_YEAR).is_none() {
        return Vec::new();
    }

    let mut points = Vec::with_capacity(years.min(MAX_PREALLOCATED_YEARS) as usize);
    let mut balance = principal;
    for year in 1..=years {
        balance *= 1.0 + annual_rate;
        points.push(GrowthPoint {
            year,
            cumulative_flow: 0.0,
            balance,
        });
    }
    points
}

pub fn monthly_withdrawal(corpus: f64, withdrawal_rate: f64) -> f64 {
    corpus * withdrawal_rate / 1200.0
}

pub fn run_projection(strategy: &Strategy) -> ProjectionResult {
    match strategy {
        Strategy::PeriodicInvestment(inputs) => calculate_sip(inputs),
        Strategy::Lumpsum(inputs) => calculate_lumpsum(inputs),
        Strategy::Retirement(inputs) => calculate_retirement(inputs),
        Strategy::SystematicWithdrawal(inputs) => calculate_swp(inputs),
        Strategy::GoalBased(inputs) => calculate_goal_based(inputs),
    }
}

pub fn calculate_sip(inputs: &SipInputs) -> ProjectionResult {
    accumulate(
        0.0,
        inputs.monthly_investment,
        inputs.expected_return,
        inputs.years,
    )
}

pub fn calculate_lumpsum(inputs: &LumpsumInputs) -> ProjectionResult {
    let principal = inputs.principal;
    let points = simulate_lumpsum_growth(principal, inputs.expected_return / 100.0, inputs.years);
    build_result(&points, |_| principal, |p| p.balance - principal)
}

pub fn calculate_retirement(inputs: &RetirementInputs) -> ProjectionResult {
    let Some(plan) = plan_retirement(inputs) else {
        return ProjectionResult::empty();
    };
    accumulate(
        inputs.current_savings,
        plan.monthly_contribution,
        plan.real_return,
        plan.horizon_years,
    )
}

pub fn calculate_swp(inputs: &SwpInputs) -> ProjectionResult {
    // Monthly rate stays above -1 here, so the annual bound is checked directly.
    if inputs.expected_return <= -100.0 {
        return ProjectionResult::empty();
    }
    let corpus = inputs.corpus;
    let withdrawal = monthly_withdrawal(corpus, inputs.withdrawal_rate);
    let points = simulate_periodic_flow(
        corpus,
        -withdrawal,
        inputs.expected_return / 1200.0,
        inputs.years,
    );
    // cumulative_flow is the negated amount withdrawn so far.
    build_result(&points, |_| corpus, |p| p.balance - (corpus + p.cumulative_flow))
}

pub fn calculate_goal_based(inputs: &GoalInputs) -> ProjectionResult {
    let Some(plan) = plan_goal(inputs) else {
        return ProjectionResult::empty();
    };
    accumulate(
        inputs.initial_investment,
        plan.monthly_contribution,
        inputs.expected_return,
        inputs.years,
    )
}

fn accumulate(
    opening_balance: f64,
    monthly_contribution: f64,
    annual_return: f64,
    years: u32,
) -> ProjectionResult {
    if annual_return <= -100.0 {
        return ProjectionResult::empty();
    }
    let points = simulate_periodic_flow(
        opening_balance,
        monthly_contribution,
        annual_return / 1200.0,
        years,
    );
    build_result(
        &points,
        |p| opening_balance + p.cumulative_flow,
        |p| p.balance - (opening_balance + p.cumulative_flow),
    )
}

fn build_result(
    points: &[GrowthPoint],
    contribution: impl Fn(&GrowthPoint) -> f64,
    growth: impl Fn(&GrowthPoint) -> f64,
) -> ProjectionResult {
    let Some(last) = points.last() else {
        return ProjectionResult::empty();
    };

    let projections = points
        .iter()
        .map(|p| YearlyProjection {
            year: p.year,
            cumulative_contribution: contribution(p),
            cumulative_growth: growth(p),
            balance: p.balance,
        })
        .collect();

    ProjectionResult {
        total_contribution: contribution(last),
        total_growth: growth(last),
        final_balance: last.balance,
        projections,
    }
}
