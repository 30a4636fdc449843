//! Stored expense and settlement records.
//!
//! These are the shapes the persistence layer hands back. Each converts
//! into the [`LedgerEvent`] the engine consumes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::events::{Expense, LedgerEvent, Participant, Settlement};
use crate::identifiers::{RecordId, UserId};
use crate::monetary;

/// An expense as stored under a trip event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: RecordId,
    pub description: String,
    #[serde(with = "monetary::amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    pub paid_by: Participant,
    pub split_between: Vec<Participant>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Public receipt location, when an upload layer supplied one.
    #[serde(default)]
    pub receipt_url: Option<String>,
}

impl ExpenseRecord {
    /// Engine input for this record.
    pub fn to_event(&self) -> LedgerEvent {
        LedgerEvent::Expense(Expense::new(
            self.amount,
            self.paid_by.clone(),
            self.split_between.clone(),
        ))
    }
}

/// A settlement as stored under a trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRecord {
    pub id: RecordId,
    pub from: UserId,
    pub to: UserId,
    #[serde(with = "monetary::amount")]
    pub amount: Decimal,
    /// The user who recorded the repayment.
    #[serde(default)]
    pub settled_by: Option<UserId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SettlementRecord {
    /// Engine input for this record.
    pub fn to_event(&self) -> LedgerEvent {
        LedgerEvent::Settlement(Settlement::new(
            self.from.clone(),
            self.to.clone(),
            self.amount,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_expense_record_to_event() {
        let alice = Participant::new("u1", "Alice");
        let bob = Participant::new("u2", "Bob");
        let record = ExpenseRecord {
            id: RecordId::new(),
            description: "Taxi".to_string(),
            amount: dec!(24.50),
            category: Some("transport".to_string()),
            paid_by: alice.clone(),
            split_between: vec![alice.clone(), bob.clone()],
            created_at: None,
            receipt_url: None,
        };

        assert_eq!(
            record.to_event(),
            LedgerEvent::Expense(Expense::new(dec!(24.50), alice.clone(), vec![alice, bob]))
        );
    }

    #[test]
    fn test_settlement_record_accepts_string_amount() {
        let json = r#"{
            "id": "019456ab-1234-7def-8901-234567890abc",
            "from": "u2",
            "to": "u1",
            "amount": "15.00",
            "settledBy": "u2"
        }"#;
        let record: SettlementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.amount, dec!(15));
        assert_eq!(record.settled_by, Some(UserId::new("u2")));
        assert_eq!(record.created_at, None);
        assert_eq!(
            record.to_event(),
            LedgerEvent::Settlement(Settlement::new("u2", "u1", dec!(15)))
        );
    }
}
