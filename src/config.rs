use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{ApprovalError, Result};

/// decision thresholds for the prime personal loan policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimeLoanConfig {
    /// pre-clearance passes at or above this income
    pub min_annual_income: Money,
    /// checker approval passes at or above this score
    pub min_credit_score: u32,
}

impl Default for PrimeLoanConfig {
    fn default() -> Self {
        Self {
            min_annual_income: Money::from_major(1_000_000),
            min_credit_score: 750,
        }
    }
}

impl PrimeLoanConfig {
    /// load thresholds from json, missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ApprovalError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_annual_income.is_negative() {
            return Err(ApprovalError::InvalidConfiguration {
                message: format!(
                    "min_annual_income must not be negative, got {}",
                    self.min_annual_income
                ),
            });
        }
        Ok(())
    }
}
