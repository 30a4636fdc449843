//! In-memory trip store.

use async_trait::async_trait;
use dashmap::DashMap;
use splitledger_common::{EventId, ExpenseRecord, Result, SettlementRecord, TripId};
use tracing::debug;

use crate::ports::TripStore;

/// Process-local [`TripStore`] backed by concurrent maps. Used by tests and
/// the CLI; contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryTripStore {
    /// Event IDs per trip, in first-seen order.
    events: DashMap<TripId, Vec<EventId>>,
    /// Expenses per (trip, event).
    expenses: DashMap<(TripId, EventId), Vec<ExpenseRecord>>,
    /// Settlements per trip.
    settlements: DashMap<TripId, Vec<SettlementRecord>>,
}

impl InMemoryTripStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert_expense(
        &self,
        trip_id: &TripId,
        event_id: &EventId,
        record: ExpenseRecord,
    ) -> Result<()> {
        {
            let mut events = self.events.entry(trip_id.clone()).or_default();
            if !events.contains(event_id) {
                events.push(event_id.clone());
            }
        }

        debug!(trip_id = %trip_id, event_id = %event_id, record_id = %record.id, "Storing expense");
        self.expenses
            .entry((trip_id.clone(), event_id.clone()))
            .or_default()
            .push(record);
        Ok(())
    }

    async fn list_expenses(
        &self,
        trip_id: &TripId,
        event_id: &EventId,
    ) -> Result<Vec<ExpenseRecord>> {
        Ok(self
            .expenses
            .get(&(trip_id.clone(), event_id.clone()))
            .map(|records| records.clone())
            .unwrap_or_default())
    }

    async fn list_event_ids(&self, trip_id: &TripId) -> Result<Vec<EventId>> {
        Ok(self
            .events
            .get(trip_id)
            .map(|events| events.clone())
            .unwrap_or_default())
    }

    async fn insert_settlement(&self, trip_id: &TripId, record: SettlementRecord) -> Result<()> {
        debug!(trip_id = %trip_id, record_id = %record.id, "Storing settlement");
        self.settlements
            .entry(trip_id.clone())
            .or_default()
            .push(record);
        Ok(())
    }

    async fn list_settlements(&self, trip_id: &TripId) -> Result<Vec<SettlementRecord>> {
        Ok(self
            .settlements
            .get(trip_id)
            .map(|records| records.clone())
            .unwrap_or_default())
    }
}
