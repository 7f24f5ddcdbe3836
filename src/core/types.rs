use serde::Serialize;

/// Years of post-retirement spending the retirement corpus must fund.
pub const RETIREMENT_WITHDRAWAL_YEARS: u32 = 25;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AnnuityTiming {
    /// Payment lands after the period compounds (ordinary annuity).
    EndOfPeriod,
    /// Payment lands before the period compounds (annuity due).
    StartOfPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SipInputs {
    pub monthly_investment: f64,
    pub years: u32,
    pub expected_return: f64,
}

impl Default for SipInputs {
    fn default() -> Self {
        Self {
            monthly_investment: 5_000.0,
            years: 10,
            expected_return: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumpsumInputs {
    pub principal: f64,
    pub years: u32,
    pub expected_return: f64,
}

impl Default for LumpsumInputs {
    fn default() -> Self {
        Self {
            principal: 100_000.0,
            years: 10,
            expected_return: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expenses: f64,
    pub current_savings: f64,
    pub expected_return: f64,
    pub inflation: f64,
}

impl Default for RetirementInputs {
    fn default() -> Self {
        Self {
            current_age: 30,
            retirement_age: 60,
            monthly_expenses: 50_000.0,
            current_savings: 500_000.0,
            expected_return: 12.0,
            inflation: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwpInputs {
    pub corpus: f64,
    pub withdrawal_rate: f64,
    pub years: u32,
    pub expected_return: f64,
}

impl Default for SwpInputs {
    fn default() -> Self {
        Self {
            corpus: 10_000_000.0,
            withdrawal_rate: 4.0,
            years: 20,
            expected_return: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalInputs {
    pub goal_amount: f64,
    pub years: u32,
    pub expected_return: f64,
    pub initial_investment: f64,
}

impl Default for GoalInputs {
    fn default() -> Self {
        Self {
            goal_amount: 1_000_000.0,
            years: 5,
            expected_return: 12.0,
            initial_investment: 100_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    PeriodicInvestment(SipInputs),
    Lumpsum(LumpsumInputs),
    Retirement(RetirementInputs),
    SystematicWithdrawal(SwpInputs),
    GoalBased(GoalInputs),
}

/// Solved parameters for a retirement plan, before simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    pub horizon_years: u32,
    /// Inflation-adjusted annual return in percent.
    pub real_return: f64,
    pub future_monthly_expenses: f64,
    pub required_corpus: f64,
    pub monthly_contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub monthly_contribution: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyProjection {
    pub year: u32,
    pub cumulative_contribution: f64,
    pub cumulative_growth: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_contribution: f64,
    pub total_growth: f64,
    pub final_balance: f64,
    pub projections: Vec<YearlyProjection>,
}

impl ProjectionResult {
    pub fn empty() -> Self {
        Self {
            total_contribution: 0.0,
            total_growth: 0.0,
            final_balance: 0.0,
            projections: Vec::new(),
        }
    }

    /// First year that closes with a negative balance.
    pub fn depletion_year(&self) -> Option<u32> {
        self.projections
            .iter()
            .find(|p| p.balance < 0.0)
            .map(|p| p.year)
    }
}
