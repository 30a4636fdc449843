//! Scenario replay against a fresh in-memory trip.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context};
use rust_decimal::Decimal;
use tracing::info;

use splitledger_common::{parse_amount, DebtEdge, EventId, Participant, TripId, UserId};
use splitledger_service::{
    InMemoryTripStore, NewExpense, NewSettlement, ServiceConfig, TripService,
};

use crate::scenario::{ExpectedDebt, Member, Scenario, ScenarioStep};

/// Result of a successful replay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub steps_run: usize,
    pub assertions_passed: usize,
    /// Ledger after the last step.
    pub final_ledger: Vec<DebtEdge>,
}

/// Drives scenario steps through the trip service.
pub struct ScenarioController {
    service: TripService,
    trip_id: TripId,
}

impl ScenarioController {
    /// Create a controller over an empty in-memory store.
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            service: TripService::new(config, Arc::new(InMemoryTripStore::new())),
            trip_id: TripId::new("scenario"),
        }
    }

    /// Run a scenario.
    pub async fn run_scenario(&self, scenario: &Scenario) -> anyhow::Result<ScenarioOutcome> {
        info!("Running scenario: {} - {}", scenario.name, scenario.description);

        let mut assertions_passed = 0;
        for (index, step) in scenario.steps.iter().enumerate() {
            self.execute_step(step)
                .await
                .with_context(|| format!("step {} of scenario {}", index + 1, scenario.name))?;
            if matches!(step, ScenarioStep::AssertLedger { .. }) {
                assertions_passed += 1;
            }
        }

        Ok(ScenarioOutcome {
            steps_run: scenario.steps.len(),
            assertions_passed,
            final_ledger: self.service.trip_ledger(&self.trip_id).await?,
        })
    }

    async fn execute_step(&self, step: &ScenarioStep) -> anyhow::Result<()> {
        match step {
            ScenarioStep::RecordExpense {
                event,
                description,
                amount,
                paid_by,
                split_between,
            } => {
                let request = NewExpense {
                    description: Some(description.clone()),
                    amount: Some(parse(amount)?),
                    paid_by: Some(participant(paid_by)),
                    split_between: Some(split_between.iter().map(participant).collect()),
                    ..Default::default()
                };
                self.service
                    .record_expense(&self.trip_id, &EventId::new(event.as_str()), request)
                    .await?;
            }
            ScenarioStep::RecordSettlement { from, to, amount } => {
                let request = NewSettlement {
                    from: Some(UserId::new(from.as_str())),
                    to: Some(UserId::new(to.as_str())),
                    amount: Some(parse(amount)?),
                    created_at: None,
                };
                self.service
                    .record_settlement(&self.trip_id, request, Some(UserId::new(from.as_str())))
                    .await?;
            }
            ScenarioStep::AssertLedger { expected } => {
                let edges = self.service.trip_ledger(&self.trip_id).await?;
                check_ledger(&edges, expected)?;
            }
        }
        Ok(())
    }
}

fn parse(amount: &str) -> anyhow::Result<Decimal> {
    parse_amount(amount).with_context(|| format!("invalid amount {:?}", amount))
}

fn participant(member: &Member) -> Participant {
    Participant::new(member.id.as_str(), member.name.as_str())
}

/// Compare a ledger to expectations, ignoring edge order.
fn check_ledger(edges: &[DebtEdge], expected: &[ExpectedDebt]) -> anyhow::Result<()> {
    let actual: BTreeMap<(String, String), Decimal> = edges
        .iter()
        .map(|e| {
            (
                (e.borrower.user_id.to_string(), e.lender.user_id.to_string()),
                e.amount,
            )
        })
        .collect();

    let mut wanted = BTreeMap::new();
    for debt in expected {
        wanted.insert(
            (debt.borrower.clone(), debt.lender.clone()),
            parse(&debt.amount)?,
        );
    }

    if actual != wanted || actual.len() != edges.len() {
        bail!("ledger mismatch: expected {:?}, got {:?}", wanted, actual);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_built_in_scenarios_pass() {
        for name in Scenario::BUILT_IN {
            let controller = ScenarioController::new(ServiceConfig::default());
            let scenario = Scenario::load(name).unwrap();
            let outcome = controller.run_scenario(&scenario).await.unwrap();
            assert_eq!(outcome.assertions_passed, 1, "scenario {}", name);
        }
    }

    #[tokio::test]
    async fn test_mismatch_is_reported() {
        let mut scenario = Scenario::load("single-expense").unwrap();
        scenario.steps.push(ScenarioStep::AssertLedger {
            expected: vec![ExpectedDebt {
                borrower: "u1".to_string(),
                lender: "u2".to_string(),
                amount: "30".to_string(),
            }],
        });

        let controller = ScenarioController::new(ServiceConfig::default());
        let err = controller.run_scenario(&scenario).await.unwrap_err();
        assert!(format!("{:#}", err).contains("ledger mismatch"));
    }

    #[tokio::test]
    async fn test_final_ledger_reported() {
        let controller = ScenarioController::new(ServiceConfig::default());
        let outcome = controller
            .run_scenario(&Scenario::load("three-way-split").unwrap())
            .await
            .unwrap();

        assert_eq!(outcome.steps_run, 2);
        assert_eq!(outcome.final_ledger.len(), 2);
        assert!(outcome
            .final_ledger
            .iter()
            .all(|e| e.lender.name == "Alice" && e.amount == rust_decimal_macros::dec!(33.33)));
    }
}
