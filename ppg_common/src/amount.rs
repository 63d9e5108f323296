use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//--------------------------------------    GatewayAmount    ---------------------------------------------------------

/// A monetary amount as reported by the Postpay gateway.
///
/// The gateway serialises amounts as decimal strings (`"59.99"`). Values are carried as IEEE-754 doubles, matching
/// the gateway SDK's own serialiser, so no currency-precision guarantee is made beyond what a double can represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayAmount(f64);

#[derive(Debug, Clone, Error)]
#[error("Invalid gateway amount: {0}")]
pub struct AmountParseError(String);

impl FromStr for GatewayAmount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().parse::<f64>().map_err(|e| AmountParseError(format!("{s}. {e}")))?;
        if !value.is_finite() {
            return Err(AmountParseError(format!("{s} is not a finite amount")));
        }
        Ok(Self(value))
    }
}

impl From<f64> for GatewayAmount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Display for GatewayAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl GatewayAmount {
    pub fn value(&self) -> f64 {
        self.0
    }
}
