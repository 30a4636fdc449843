//! Trip service: records activity and nets a trip's ledger.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{info, instrument, warn};

use splitledger_common::{
    DebtEdge, EventId, ExpenseRecord, LedgerEvent, Result, SettlementRecord, SplitLedgerError,
    TripId, UserId,
};
use splitledger_ledger::{LedgerEngine, LedgerReport};

use crate::config::ServiceConfig;
use crate::ports::TripStore;
use crate::requests::{NewExpense, NewSettlement};

/// Entry point for recording trip activity and reading ledgers.
pub struct TripService {
    /// Configuration.
    config: ServiceConfig,
    /// Persistence collaborator.
    store: Arc<dyn TripStore>,
    /// Netting engine, configured from `config.netting`.
    engine: LedgerEngine,
}

impl TripService {
    /// Create a new service over `store`.
    pub fn new(config: ServiceConfig, store: Arc<dyn TripStore>) -> Self {
        let engine = LedgerEngine::with_policy(config.netting.clone());
        Self {
            config,
            store,
            engine,
        }
    }

    /// Validate and store an expense under a trip event.
    #[instrument(skip(self, request), fields(trip_id = %trip_id, event_id = %event_id))]
    pub async fn record_expense(
        &self,
        trip_id: &TripId,
        event_id: &EventId,
        request: NewExpense,
    ) -> Result<ExpenseRecord> {
        let record = request.into_record().map_err(|e| {
            warn!(error = %e, "Rejected expense");
            e
        })?;

        self.store
            .insert_expense(trip_id, event_id, record.clone())
            .await?;

        info!(
            record_id = %record.id,
            amount = %record.amount,
            paid_by = %record.paid_by.user_id,
            split = record.split_between.len(),
            "Expense recorded"
        );
        Ok(record)
    }

    /// Expenses of one event, newest first. Records without a timestamp
    /// come last.
    pub async fn event_expenses(
        &self,
        trip_id: &TripId,
        event_id: &EventId,
    ) -> Result<Vec<ExpenseRecord>> {
        let mut records = self.store.list_expenses(trip_id, event_id).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Validate and store a settlement.
    #[instrument(skip(self, request), fields(trip_id = %trip_id))]
    pub async fn record_settlement(
        &self,
        trip_id: &TripId,
        request: NewSettlement,
        settled_by: Option<UserId>,
    ) -> Result<SettlementRecord> {
        let record = request.into_record(settled_by).map_err(|e| {
            warn!(error = %e, "Rejected settlement");
            e
        })?;

        self.store
            .insert_settlement(trip_id, record.clone())
            .await?;

        info!(
            record_id = %record.id,
            from = %record.from,
            to = %record.to,
            amount = %record.amount,
            "Settlement recorded"
        );
        Ok(record)
    }

    /// Every engine input of a trip: all events' expenses first, then all
    /// settlements.
    pub async fn trip_events(&self, trip_id: &TripId) -> Result<Vec<LedgerEvent>> {
        let event_ids = self.store.list_event_ids(trip_id).await?;
        let per_event = try_join_all(
            event_ids
                .iter()
                .map(|event_id| self.store.list_expenses(trip_id, event_id)),
        )
        .await?;
        let settlements = self.store.list_settlements(trip_id).await?;

        let mut events: Vec<LedgerEvent> = per_event
            .iter()
            .flatten()
            .map(ExpenseRecord::to_event)
            .collect();
        events.extend(settlements.iter().map(SettlementRecord::to_event));
        Ok(events)
    }

    /// Net a trip's activity into a ledger report.
    #[instrument(skip(self), fields(trip_id = %trip_id, store = self.store.name()))]
    pub async fn trip_report(&self, trip_id: &TripId) -> Result<LedgerReport> {
        let events = self.trip_events(trip_id).await?;

        if events.len() > self.config.max_events_per_trip {
            return Err(SplitLedgerError::TooManyEvents {
                trip_id: trip_id.clone(),
                count: events.len(),
                max: self.config.max_events_per_trip,
            });
        }

        let report = self.engine.compute(&events).map_err(|e| {
            warn!(error = %e, "Failed to compute trip ledger");
            SplitLedgerError::from(e)
        })?;

        info!(edges = report.edges.len(), "Trip ledger computed");
        Ok(report)
    }

    /// Net a trip's activity into its debt edges.
    pub async fn trip_ledger(&self, trip_id: &TripId) -> Result<Vec<DebtEdge>> {
        self.trip_report(trip_id).await.map(|report| report.edges)
    }
}
