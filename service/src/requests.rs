//! Inbound requests to record expenses and settlements.
//!
//! Every field is optional on the wire so that a missing field surfaces as
//! a [`SplitLedgerError::MissingField`] naming it, not a parse failure.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use splitledger_common::{
    ExpenseRecord, Participant, RecordId, Result, SettlementRecord, SplitLedgerError, UserId,
};

/// Request to add an expense under a trip event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: Option<String>,
    #[serde(default, deserialize_with = "rust_decimal::serde::float_option::deserialize")]
    pub amount: Option<Decimal>,
    pub category: Option<String>,
    pub paid_by: Option<Participant>,
    pub split_between: Option<Vec<Participant>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewExpense {
    /// Validate and turn into a record with a fresh ID.
    pub fn into_record(self) -> Result<ExpenseRecord> {
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .ok_or(SplitLedgerError::MissingField("description"))?;
        let amount = self
            .amount
            .ok_or(SplitLedgerError::MissingField("amount"))?;
        let paid_by = self
            .paid_by
            .filter(|p| !p.user_id.is_empty())
            .ok_or(SplitLedgerError::MissingField("paidBy"))?;
        let split_between = self
            .split_between
            .filter(|split| !split.is_empty())
            .ok_or(SplitLedgerError::MissingField("splitBetween"))?;

        if amount <= Decimal::ZERO {
            return Err(SplitLedgerError::InvalidAmount {
                field: "amount",
                value: amount.to_string(),
            });
        }
        if split_between.iter().any(|p| p.user_id.is_empty()) {
            return Err(SplitLedgerError::MissingField("splitBetween.userId"));
        }

        Ok(ExpenseRecord {
            id: RecordId::new(),
            description,
            amount,
            category: self.category,
            paid_by,
            split_between,
            created_at: Some(self.created_at.unwrap_or_else(Utc::now)),
            receipt_url: None,
        })
    }
}

/// Request to record a direct repayment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSettlement {
    pub from: Option<UserId>,
    pub to: Option<UserId>,
    #[serde(default, deserialize_with = "rust_decimal::serde::float_option::deserialize")]
    pub amount: Option<Decimal>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewSettlement {
    /// Validate and turn into a record with a fresh ID.
    pub fn into_record(self, settled_by: Option<UserId>) -> Result<SettlementRecord> {
        let from = self
            .from
            .filter(|id| !id.is_empty())
            .ok_or(SplitLedgerError::MissingField("from"))?;
        let to = self
            .to
            .filter(|id| !id.is_empty())
            .ok_or(SplitLedgerError::MissingField("to"))?;
        let amount = self
            .amount
            .ok_or(SplitLedgerError::MissingField("amount"))?;

        if amount <= Decimal::ZERO {
            return Err(SplitLedgerError::InvalidAmount {
                field: "amount",
                value: amount.to_string(),
            });
        }

        Ok(SettlementRecord {
            id: RecordId::new(),
            from,
            to,
            amount,
            settled_by,
            created_at: Some(self.created_at.unwrap_or_else(Utc::now)),
        })
    }
}
