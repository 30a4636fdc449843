//! Persistence port the trip service depends on.

use async_trait::async_trait;
use splitledger_common::{EventId, ExpenseRecord, Result, SettlementRecord, TripId};

/// Storage for a trip's expenses and settlements.
///
/// Implementations map failures to [`SplitLedgerError::StoreError`].
///
/// [`SplitLedgerError::StoreError`]: splitledger_common::SplitLedgerError::StoreError
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Get the store name.
    fn name(&self) -> &str;

    /// Persist an expense under a trip event.
    async fn insert_expense(
        &self,
        trip_id: &TripId,
        event_id: &EventId,
        record: ExpenseRecord,
    ) -> Result<()>;

    /// All expenses recorded under a trip event, in insertion order.
    async fn list_expenses(&self, trip_id: &TripId, event_id: &EventId)
        -> Result<Vec<ExpenseRecord>>;

    /// IDs of every event of a trip.
    async fn list_event_ids(&self, trip_id: &TripId) -> Result<Vec<EventId>>;

    /// Persist a settlement under a trip.
    async fn insert_settlement(&self, trip_id: &TripId, record: SettlementRecord) -> Result<()>;

    /// All settlements recorded under a trip, in insertion order.
    async fn list_settlements(&self, trip_id: &TripId) -> Result<Vec<SettlementRecord>>;
}
