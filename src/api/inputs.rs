use clap::Args;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::{GoalInputs, LumpsumInputs, RetirementInputs, SipInputs, Strategy, SwpInputs};

const MAX_YEARS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{field} must be >= {min}")]
    BelowMinimum { field: &'static str, min: f64 },
    #[error("retirementAge must be > currentAge")]
    RetirementNotAfterCurrentAge,
}

/// A request record that resolves into a validated strategy.
pub trait StrategyPayload: DeserializeOwned + Send + 'static {
    fn into_strategy(self) -> Result<Strategy, InputError>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SipPayload {
    monthly_investment: Option<f64>,
    years: Option<u32>,
    expected_return: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LumpsumPayload {
    principal: Option<f64>,
    years: Option<u32>,
    expected_return: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetirementPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    monthly_expenses: Option<f64>,
    current_savings: Option<f64>,
    expected_return: Option<f64>,
    inflation: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SwpPayload {
    #[serde(alias = "initialCorpus")]
    corpus: Option<f64>,
    withdrawal_rate: Option<f64>,
    years: Option<u32>,
    expected_return: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GoalPayload {
    goal_amount: Option<f64>,
    years: Option<u32>,
    expected_return: Option<f64>,
    initial_investment: Option<f64>,
}

impl StrategyPayload for SipPayload {
    fn into_strategy(self) -> Result<Strategy, InputError> {
        let mut inputs = SipInputs::default();
        if let Some(v) = self.monthly_investment {
            inputs.monthly_investment = v;
        }
        if let Some(v) = self.years {
            inputs.years = v;
        }
        if let Some(v) = self.expected_return {
            inputs.expected_return = v;
        }
        validate_sip(&inputs)?;
        Ok(Strategy::PeriodicInvestment(inputs))
    }
}

impl StrategyPayload for LumpsumPayload {
    fn into_strategy(self) -> Result<Strategy, InputError> {
        let mut inputs = LumpsumInputs::default();
        if let Some(v) = self.principal {
            inputs.principal = v;
        }
        if let Some(v) = self.years {
            inputs.years = v;
        }
        if let Some(v) = self.expected_return {
            inputs.expected_return = v;
        }
        validate_lumpsum(&inputs)?;
        Ok(Strategy::Lumpsum(inputs))
    }
}

impl StrategyPayload for RetirementPayload {
    fn into_strategy(self) -> Result<Strategy, InputError> {
        let mut inputs = RetirementInputs::default();
        if let Some(v) = self.current_age {
            inputs.current_age = v;
        }
        if let Some(v) = self.retirement_age {
            inputs.retirement_age = v;
        }
        if let Some(v) = self.monthly_expenses {
            inputs.monthly_expenses = v;
        }
        if let Some(v) = self.current_savings {
            inputs.current_savings = v;
        }
        if let Some(v) = self.expected_return {
            inputs.expected_return = v;
        }
        if let Some(v) = self.inflation {
            inputs.inflation = v;
        }
        validate_retirement(&inputs)?;
        Ok(Strategy::Retirement(inputs))
    }
}

impl StrategyPayload for SwpPayload {
    fn into_strategy(self) -> Result<Strategy, InputError> {
        let mut inputs = SwpInputs::default();
        if let Some(v) = self.corpus {
            inputs.corpus = v;
        }
        if let Some(v) = self.withdrawal_rate {
            inputs.withdrawal_rate = v;
        }
        if let Some(v) = self.years {
            inputs.years = v;
        }
        if let Some(v) = self.expected_return {
            inputs.expected_return = v;
        }
        validate_swp(&inputs)?;
        Ok(Strategy::SystematicWithdrawal(inputs))
    }
}

impl StrategyPayload for GoalPayload {
    fn into_strategy(self) -> Result<Strategy, InputError> {
        let mut inputs = GoalInputs::default();
        if let Some(v) = self.goal_amount {
            inputs.goal_amount = v;
        }
        if let Some(v) = self.years {
            inputs.years = v;
        }
        if let Some(v) = self.expected_return {
            inputs.expected_return = v;
        }
        if let Some(v) = self.initial_investment {
            inputs.initial_investment = v;
        }
        validate_goal(&inputs)?;
        Ok(Strategy::GoalBased(inputs))
    }
}

#[derive(Args, Debug, Clone)]
pub struct SipArgs {
    #[arg(long, default_value_t = 5000.0, help = "Amount invested every month")]
    pub monthly_investment: f64,
    #[arg(long, default_value_t = 10, help = "Investment period in years")]
    pub years: u32,
    #[arg(
        long,
        default_value_t = 12.0,
        help = "Expected annual return in percent, e.g. 12"
    )]
    pub expected_return: f64,
}

#[derive(Args, Debug, Clone)]
pub struct LumpsumArgs {
    #[arg(long, default_value_t = 100000.0)]
    pub principal: f64,
    #[arg(long, default_value_t = 10, help = "Investment period in years")]
    pub years: u32,
    #[arg(long, default_value_t = 12.0, help = "Expected annual return in percent")]
    pub expected_return: f64,
}

#[derive(Args, Debug, Clone)]
pub struct RetirementArgs {
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,
    #[arg(long, default_value_t = 60)]
    pub retirement_age: u32,
    #[arg(
        long,
        default_value_t = 50000.0,
        help = "Monthly expenses in today's money"
    )]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 500000.0)]
    pub current_savings: f64,
    #[arg(long, default_value_t = 12.0, help = "Expected annual return in percent")]
    pub expected_return: f64,
    #[arg(long, default_value_t = 6.0, help = "Expected annual inflation in percent")]
    pub inflation: f64,
}

#[derive(Args, Debug, Clone)]
pub struct SwpArgs {
    #[arg(long, default_value_t = 10000000.0, help = "Corpus at the start of withdrawals")]
    pub corpus: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Annual withdrawal as a percent of the starting corpus"
    )]
    pub withdrawal_rate: f64,
    #[arg(long, default_value_t = 20, help = "Withdrawal period in years")]
    pub years: u32,
    #[arg(long, default_value_t = 8.0, help = "Expected annual return in percent")]
    pub expected_return: f64,
}

#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    #[arg(long, default_value_t = 1000000.0)]
    pub goal_amount: f64,
    #[arg(long, default_value_t = 5, help = "Years until the goal is due")]
    pub years: u32,
    #[arg(long, default_value_t = 12.0, help = "Expected annual return in percent")]
    pub expected_return: f64,
    #[arg(long, default_value_t = 100000.0, help = "Amount already invested towards the goal")]
    pub initial_investment: f64,
}

impl SipArgs {
    pub fn into_strategy(self) -> Result<Strategy, InputError> {
        let inputs = SipInputs {
            monthly_investment: self.monthly_investment,
            years: self.years,
            expected_return: self.expected_return,
        };
        validate_sip(&inputs)?;
        Ok(Strategy::PeriodicInvestment(inputs))
    }
}

impl LumpsumArgs {
    pub fn into_strategy(self) -> Result<Strategy, InputError> {
        let inputs = LumpsumInputs {
            principal: self.principal,
            years: self.years,
            expected_return: self.expected_return,
        };
        validate_lumpsum(&inputs)?;
        Ok(Strategy::Lumpsum(inputs))
    }
}

impl RetirementArgs {
    pub fn into_strategy(self) -> Result<Strategy, InputError> {
        let inputs = RetirementInputs {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            monthly_expenses: self.monthly_expenses,
            current_savings: self.current_savings,
            expected_return: self.expected_return,
            inflation: self.inflation,
        };
        validate_retirement(&inputs)?;
        Ok(Strategy::Retirement(inputs))
    }
}

impl SwpArgs {
    pub fn into_strategy(self) -> Result<Strategy, InputError> {
        let inputs = SwpInputs {
            corpus: self.corpus,
            withdrawal_rate: self.withdrawal_rate,
            years: self.years,
            expected_return: self.expected_return,
        };
        validate_swp(&inputs)?;
        Ok(Strategy::SystematicWithdrawal(inputs))
    }
}

impl GoalArgs {
    pub fn into_strategy(self) -> Result<Strategy, InputError> {
        let inputs = GoalInputs {
            goal_amount: self.goal_amount,
            years: self.years,
            expected_return: self.expected_return,
            initial_investment: self.initial_investment,
        };
        validate_goal(&inputs)?;
        Ok(Strategy::GoalBased(inputs))
    }
}

pub fn validate_sip(inputs: &SipInputs) -> Result<(), InputError> {
    check_min("monthlyInvestment", inputs.monthly_investment, 500.0)?;
    check_years(inputs.years)?;
    check_return(inputs.expected_return)
}

pub fn validate_lumpsum(inputs: &LumpsumInputs) -> Result<(), InputError> {
    check_min("principal", inputs.principal, 1_000.0)?;
    check_years(inputs.years)?;
    check_return(inputs.expected_return)
}

pub fn validate_retirement(inputs: &RetirementInputs) -> Result<(), InputError> {
    check_range("currentAge", inputs.current_age as f64, 18.0, 70.0)?;
    check_range("retirementAge", inputs.retirement_age as f64, 45.0, 80.0)?;
    if inputs.retirement_age <= inputs.current_age {
        return Err(InputError::RetirementNotAfterCurrentAge);
    }
    check_min("monthlyExpenses", inputs.monthly_expenses, 10_000.0)?;
    check_min("currentSavings", inputs.current_savings, 0.0)?;
    check_return(inputs.expected_return)?;
    check_range("inflation", inputs.inflation, 1.0, 15.0)
}

pub fn validate_swp(inputs: &SwpInputs) -> Result<(), InputError> {
    check_min("corpus", inputs.corpus, 100_000.0)?;
    check_range("withdrawalRate", inputs.withdrawal_rate, 1.0, 20.0)?;
    check_years(inputs.years)?;
    check_return(inputs.expected_return)
}

pub fn validate_goal(inputs: &GoalInputs) -> Result<(), InputError> {
    check_min("goalAmount", inputs.goal_amount, 10_000.0)?;
    check_min("initialInvestment", inputs.initial_investment, 0.0)?;
    check_years(inputs.years)?;
    check_return(inputs.expected_return)
}

fn check_years(years: u32) -> Result<(), InputError> {
    check_range("years", years as f64, 1.0, MAX_YEARS as f64)
}

fn check_return(expected_return: f64) -> Result<(), InputError> {
    check_range("expectedReturn", expected_return, 1.0, 30.0)
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if !(min..=max).contains(&value) {
        return Err(InputError::OutOfRange { field, min, max });
    }
    Ok(())
}

fn check_min(field: &'static str, value: f64, min: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < min {
        return Err(InputError::BelowMinimum { field, min });
    }
    Ok(())
}
