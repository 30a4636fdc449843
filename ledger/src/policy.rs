//! Netting policy: residue tolerance and emission precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitledger_common::{round_amount, DEFAULT_DECIMAL_PLACES};

/// Controls how reconciled nets become edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NettingPolicy {
    /// Nets whose magnitude is at or below this are treated as settled.
    pub epsilon: Decimal,
    /// Decimal places of emitted amounts.
    pub decimal_places: u32,
}

impl NettingPolicy {
    /// Create a policy.
    pub fn new(epsilon: Decimal, decimal_places: u32) -> Self {
        Self {
            epsilon,
            decimal_places,
        }
    }

    /// Tolerance absorbing division residues, 0.009.
    pub fn default_epsilon() -> Decimal {
        Decimal::new(9, 3)
    }

    /// Whether an unrounded net is within tolerance of zero.
    pub fn is_settled(&self, net: Decimal) -> bool {
        net.abs() <= self.epsilon
    }

    /// Round an amount for emission.
    pub fn round(&self, value: Decimal) -> Decimal {
        round_amount(value, self.decimal_places)
    }

    /// Validate the policy.
    pub fn validate(&self) -> Result<(), String> {
        if self.epsilon.is_sign_negative() {
            return Err("Epsilon cannot be negative".to_string());
        }

        if self.decimal_places > 28 {
            return Err("Decimal places cannot exceed 28".to_string());
        }

        Ok(())
    }
}

impl Default for NettingPolicy {
    fn default() -> Self {
        Self {
            epsilon: Self::default_epsilon(),
            decimal_places: DEFAULT_DECIMAL_PLACES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_policy() {
        let policy = NettingPolicy::default();
        assert_eq!(policy.epsilon, dec!(0.009));
        assert_eq!(policy.decimal_places, 2);
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_is_settled_boundary() {
        let policy = NettingPolicy::default();
        assert!(policy.is_settled(dec!(0.009)));
        assert!(policy.is_settled(dec!(-0.009)));
        assert!(policy.is_settled(Decimal::ZERO));
        assert!(!policy.is_settled(dec!(0.0091)));
        assert!(!policy.is_settled(dec!(-0.01)));
    }

    #[test]
    fn test_invalid_policy() {
        assert!(NettingPolicy::new(dec!(-0.001), 2).validate().is_err());
        assert!(NettingPolicy::new(dec!(0.009), 29).validate().is_err());
    }
}
