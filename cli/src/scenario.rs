//! Replayable trip scenarios.

use serde::{Deserialize, Serialize};

/// A scripted trip: activity to record and the ledger it must produce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A participant named in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
}

/// A step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioStep {
    /// Record an expense under an event.
    RecordExpense {
        event: String,
        description: String,
        amount: String,
        paid_by: Member,
        split_between: Vec<Member>,
    },
    /// Record a direct repayment.
    RecordSettlement {
        from: String,
        to: String,
        amount: String,
    },
    /// Assert the trip ledger equals `expected`, in any order.
    AssertLedger { expected: Vec<ExpectedDebt> },
}

/// One expected ledger edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedDebt {
    pub borrower: String,
    pub lender: String,
    pub amount: String,
}

impl Scenario {
    /// Names of the built-in scenarios.
    pub const BUILT_IN: [&'static str; 6] = [
        "single-expense",
        "opposing-expenses",
        "partial-settlement",
        "full-settlement",
        "three-way-split",
        "overpaid-settlement",
    ];

    /// Load a scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "single-expense" => Ok(Self::single_expense()),
            "opposing-expenses" => Ok(Self::opposing_expenses()),
            "partial-settlement" => Ok(Self::partial_settlement()),
            "full-settlement" => Ok(Self::full_settlement()),
            "three-way-split" => Ok(Self::three_way_split()),
            "overpaid-settlement" => Ok(Self::overpaid_settlement()),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Alice pays 60 for herself and Bob.
    fn single_expense() -> Self {
        Self {
            name: "single-expense".to_string(),
            description: "One shared expense between two people".to_string(),
            steps: vec![
                dinner("60", alice()),
                assert_ledger(&[("u2", "u1", "30")]),
            ],
        }
    }

    /// Alice pays 60, Bob pays 40, both split evenly.
    fn opposing_expenses() -> Self {
        Self {
            name: "opposing-expenses".to_string(),
            description: "Mutual claims cancel down to one debt".to_string(),
            steps: vec![
                dinner("60", alice()),
                dinner("40", bob()),
                assert_ledger(&[("u2", "u1", "10")]),
            ],
        }
    }

    fn partial_settlement() -> Self {
        Self {
            name: "partial-settlement".to_string(),
            description: "A repayment reduces the outstanding debt".to_string(),
            steps: vec![
                dinner("60", alice()),
                settle("u2", "u1", "10"),
                assert_ledger(&[("u2", "u1", "20")]),
            ],
        }
    }

    fn full_settlement() -> Self {
        Self {
            name: "full-settlement".to_string(),
            description: "A repayment of the full share clears the ledger".to_string(),
            steps: vec![
                dinner("60", alice()),
                settle("u2", "u1", "30"),
                assert_ledger(&[]),
            ],
        }
    }

    fn three_way_split() -> Self {
        Self {
            name: "three-way-split".to_string(),
            description: "Uneven division is rounded at emission".to_string(),
            steps: vec![
                ScenarioStep::RecordExpense {
                    event: "day-1".to_string(),
                    description: "Boat tour".to_string(),
                    amount: "100".to_string(),
                    paid_by: alice(),
                    split_between: vec![alice(), bob(), carol()],
                },
                assert_ledger(&[("u2", "u1", "33.33"), ("u3", "u1", "33.33")]),
            ],
        }
    }

    fn overpaid_settlement() -> Self {
        Self {
            name: "overpaid-settlement".to_string(),
            description: "A repayment with nothing owed creates a reverse debt".to_string(),
            steps: vec![
                settle("u2", "u1", "15"),
                assert_ledger(&[("u1", "u2", "15")]),
            ],
        }
    }
}

fn member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn alice() -> Member {
    member("u1", "Alice")
}

fn bob() -> Member {
    member("u2", "Bob")
}

fn carol() -> Member {
    member("u3", "Carol")
}

fn dinner(amount: &str, paid_by: Member) -> ScenarioStep {
    ScenarioStep::RecordExpense {
        event: "day-1".to_string(),
        description: "Dinner".to_string(),
        amount: amount.to_string(),
        paid_by,
        split_between: vec![alice(), bob()],
    }
}

fn settle(from: &str, to: &str, amount: &str) -> ScenarioStep {
    ScenarioStep::RecordSettlement {
        from: from.to_string(),
        to: to.to_string(),
        amount: amount.to_string(),
    }
}

fn assert_ledger(expected: &[(&str, &str, &str)]) -> ScenarioStep {
    ScenarioStep::AssertLedger {
        expected: expected
            .iter()
            .map(|(borrower, lender, amount)| ExpectedDebt {
                borrower: borrower.to_string(),
                lender: lender.to_string(),
                amount: amount.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_ins_load() {
        for name in Scenario::BUILT_IN {
            let scenario = Scenario::load(name).unwrap();
            assert_eq!(scenario.name, name);
            assert!(matches!(
                scenario.steps.last(),
                Some(ScenarioStep::AssertLedger { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_scenario() {
        assert!(Scenario::load("nope").is_err());
    }

    #[test]
    fn test_scenario_round_trips_through_json() {
        let json = serde_json::to_string(&Scenario::load("partial-settlement").unwrap()).unwrap();
        let parsed: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.steps.len(), 3);
    }
}
