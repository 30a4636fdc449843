//! Ledger input events: shared expenses and direct settlements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::identifiers::UserId;
use crate::monetary;

/// A participant as referenced from inside an event or a debt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Stable participant identifier.
    pub user_id: UserId,
    /// Display name. May be empty when the source never supplied one.
    #[serde(default)]
    pub name: String,
}

impl Participant {
    /// Create a new participant reference.
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
        }
    }

    /// Display name, falling back to the raw ID when none is known.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.user_id.as_str()
        } else {
            &self.name
        }
    }
}

/// One shared cost, split evenly across `split_between`.
///
/// Entries in `split_between` are counted as given: a participant listed
/// twice owes two shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    #[serde(with = "monetary::amount")]
    pub amount: Decimal,
    /// Who fronted the money.
    pub paid_by: Participant,
    /// Who owes a share.
    pub split_between: Vec<Participant>,
}

impl Expense {
    /// Create a new expense.
    pub fn new(amount: Decimal, paid_by: Participant, split_between: Vec<Participant>) -> Self {
        Self {
            amount,
            paid_by,
            split_between,
        }
    }

    /// Amount owed per `split_between` entry, unrounded.
    /// `None` when the split list is empty.
    pub fn share(&self) -> Option<Decimal> {
        if self.split_between.is_empty() {
            return None;
        }
        self.amount
            .checked_div(Decimal::from(self.split_between.len()))
    }
}

/// A direct repayment from a debtor to a creditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The debtor paying back.
    pub from: UserId,
    /// The recipient.
    pub to: UserId,
    #[serde(with = "monetary::amount")]
    pub amount: Decimal,
}

impl Settlement {
    /// Create a new settlement.
    pub fn new(from: impl Into<UserId>, to: impl Into<UserId>, amount: Decimal) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// A single input to the ledger engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LedgerEvent {
    Expense(Expense),
    Settlement(Settlement),
}

impl From<Expense> for LedgerEvent {
    fn from(expense: Expense) -> Self {
        LedgerEvent::Expense(expense)
    }
}

impl From<Settlement> for LedgerEvent {
    fn from(settlement: Settlement) -> Self {
        LedgerEvent::Settlement(settlement)
    }
}

/// A net obligation between two participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtEdge {
    /// Who owes.
    pub borrower: Participant,
    /// Who is owed.
    pub lender: Participant,
    /// Positive amount, rounded for display.
    #[serde(with = "monetary::amount")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tagged_events_deserialize() {
        let json = r#"[
            {
                "type": "expense",
                "amount": "60",
                "paidBy": {"userId": "u1", "name": "Alice"},
                "splitBetween": [
                    {"userId": "u1", "name": "Alice"},
                    {"userId": "u2", "name": "Bob"}
                ],
                "description": "Dinner"
            },
            {"type": "settlement", "from": "u2", "to": "u1", "amount": 10}
        ]"#;

        let events: Vec<LedgerEvent> = serde_json::from_str(json).unwrap();
        assert_eq!(events.len(), 2);

        match &events[0] {
            LedgerEvent::Expense(expense) => {
                assert_eq!(expense.amount, dec!(60));
                assert_eq!(expense.paid_by.user_id, UserId::new("u1"));
                assert_eq!(expense.split_between.len(), 2);
            }
            other => panic!("expected expense, got {:?}", other),
        }
        assert_eq!(
            events[1],
            LedgerEvent::Settlement(Settlement::new("u2", "u1", dec!(10)))
        );
    }

    #[test]
    fn test_missing_split_is_rejected() {
        let json = r#"{"type": "expense", "amount": 5, "paidBy": {"userId": "u1"}}"#;
        assert!(serde_json::from_str::<LedgerEvent>(json).is_err());
    }

    #[test]
    fn test_share_divides_by_raw_count() {
        let alice = Participant::new("u1", "Alice");
        let bob = Participant::new("u2", "Bob");
        let expense = Expense::new(dec!(90), alice.clone(), vec![alice, bob.clone(), bob]);
        assert_eq!(expense.share(), Some(dec!(30)));

        let empty = Expense::new(dec!(90), Participant::new("u1", "Alice"), vec![]);
        assert_eq!(empty.share(), None);
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        assert_eq!(Participant::new("u9", "").display_name(), "u9");
        assert_eq!(Participant::new("u1", "Alice").display_name(), "Alice");
    }

    #[test]
    fn test_edge_wire_format() {
        let edge = DebtEdge {
            borrower: Participant::new("u2", "Bob"),
            lender: Participant::new("u1", "Alice"),
            amount: dec!(30),
        };
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "borrower": {"userId": "u2", "name": "Bob"},
                "lender": {"userId": "u1", "name": "Alice"},
                "amount": 30
            })
        );
    }
}
