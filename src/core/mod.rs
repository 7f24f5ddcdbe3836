mod engine;
mod solver;
mod types;

pub use engine::{
    GrowthPoint, calculate_goal_based, calculate_lumpsum, calculate_retirement, calculate_sip,
    calculate_swp, monthly_withdrawal, run_projection, simulate_lumpsum_growth,
    simulate_periodic_flow,
};
pub use solver::{plan_goal, plan_retirement, real_return_pct, solve_payment};
pub use types::{
    AnnuityTiming, GoalInputs, GoalPlan, LumpsumInputs, ProjectionResult,
    RETIREMENT_WITHDRAWAL_YEARS, RetirementInputs, RetirementPlan, SipInputs, Strategy, SwpInputs,
    YearlyProjection,
};
