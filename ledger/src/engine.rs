//! Core ledger engine implementation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument};

use splitledger_common::{DebtEdge, Expense, LedgerEvent, Settlement, UserId};

use crate::balance::GrossBalances;
use crate::error::{LedgerError, LedgerResult};
use crate::netting::reconcile;
use crate::policy::NettingPolicy;
use crate::registry::ParticipantRegistry;

/// Outcome of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerReport {
    /// Net debts, one per unordered pair at most.
    pub edges: Vec<DebtEdge>,
    /// Number of input events folded.
    pub events_processed: usize,
    /// Distinct participants named by expenses.
    pub participants: usize,
}

/// The ledger engine nets expenses and settlements into pairwise debts.
///
/// Holds only its policy; every call builds and discards its own working
/// state, so one engine can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct LedgerEngine {
    policy: NettingPolicy,
}

impl LedgerEngine {
    /// Create an engine with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom policy.
    pub fn with_policy(policy: NettingPolicy) -> Self {
        Self { policy }
    }

    /// Fold `events` in order and emit the netted ledger.
    ///
    /// Fails on the first event that breaks the input contract, naming its
    /// position; no partial ledger is returned.
    #[instrument(skip(self, events), fields(events = events.len()))]
    pub fn compute(&self, events: &[LedgerEvent]) -> LedgerResult<LedgerReport> {
        let mut balances = GrossBalances::new();
        let mut registry = ParticipantRegistry::new();

        for (index, event) in events.iter().enumerate() {
            match event {
                LedgerEvent::Settlement(settlement) => {
                    apply_settlement(&mut balances, index, settlement)?
                }
                LedgerEvent::Expense(expense) => {
                    apply_expense(&mut balances, &mut registry, index, expense)?
                }
            }
        }

        let edges = reconcile(&balances, &registry, &self.policy)?;

        info!(
            events = events.len(),
            pairs = balances.len(),
            participants = registry.len(),
            edges = edges.len(),
            "Ledger computed"
        );

        Ok(LedgerReport {
            edges,
            events_processed: events.len(),
            participants: registry.len(),
        })
    }
}

/// Net a trip's events with the default policy.
pub fn compute_ledger(events: &[LedgerEvent]) -> LedgerResult<Vec<DebtEdge>> {
    LedgerEngine::new().compute(events).map(|report| report.edges)
}

/// Per-participant net position implied by a ledger: what others owe them
/// minus what they owe. Positions sum to zero.
pub fn net_positions(edges: &[DebtEdge]) -> LedgerResult<HashMap<UserId, Decimal>> {
    let mut positions: HashMap<UserId, Decimal> = HashMap::new();

    for edge in edges {
        let overflow = || LedgerError::NetOverflow {
            borrower: edge.borrower.user_id.clone(),
            lender: edge.lender.user_id.clone(),
        };

        let lender = positions
            .entry(edge.lender.user_id.clone())
            .or_insert(Decimal::ZERO);
        *lender = lender.checked_add(edge.amount).ok_or_else(overflow)?;

        let borrower = positions
            .entry(edge.borrower.user_id.clone())
            .or_insert(Decimal::ZERO);
        *borrower = borrower.checked_sub(edge.amount).ok_or_else(overflow)?;
    }

    Ok(positions)
}

fn invalid(index: usize, event: &'static str, reason: impl Into<String>) -> LedgerError {
    LedgerError::InvalidEvent {
        index,
        kind: event,
        reason: reason.into(),
    }
}

fn apply_settlement(
    balances: &mut GrossBalances,
    index: usize,
    settlement: &Settlement,
) -> LedgerResult<()> {
    if settlement.from.is_empty() || settlement.to.is_empty() {
        return Err(invalid(index, "settlement", "from and to must be set"));
    }
    if !settlement.amount.is_sign_positive() || settlement.amount.is_zero() {
        return Err(invalid(
            index,
            "settlement",
            format!("amount must be positive, got {}", settlement.amount),
        ));
    }

    debug!(
        index,
        from = %settlement.from,
        to = %settlement.to,
        amount = %settlement.amount,
        "Applying settlement"
    );

    balances
        .debit(&settlement.from, &settlement.to, settlement.amount)
        .ok_or(LedgerError::Overflow {
            index,
            kind: "settlement",
        })?;

    Ok(())
}

fn apply_expense(
    balances: &mut GrossBalances,
    registry: &mut ParticipantRegistry,
    index: usize,
    expense: &Expense,
) -> LedgerResult<()> {
    if expense.paid_by.user_id.is_empty() {
        return Err(invalid(index, "expense", "paidBy has no userId"));
    }
    if !expense.amount.is_sign_positive() || expense.amount.is_zero() {
        return Err(invalid(
            index,
            "expense",
            format!("amount must be positive, got {}", expense.amount),
        ));
    }
    if let Some(position) = expense
        .split_between
        .iter()
        .position(|p| p.user_id.is_empty())
    {
        return Err(invalid(
            index,
            "expense",
            format!("splitBetween entry {} has no userId", position),
        ));
    }
    let share = expense
        .share()
        .ok_or_else(|| invalid(index, "expense", "splitBetween is empty"))?;

    debug!(
        index,
        paid_by = %expense.paid_by.user_id,
        amount = %expense.amount,
        split = expense.split_between.len(),
        share = %share,
        "Applying expense"
    );

    let payer = &expense.paid_by.user_id;
    registry.register(&expense.paid_by);

    for participant in &expense.split_between {
        registry.register(participant);
        if &participant.user_id == payer {
            continue;
        }
        balances
            .credit(&participant.user_id, payer, share)
            .ok_or(LedgerError::Overflow {
                index,
                kind: "expense",
            })?;
    }

    Ok(())
}
