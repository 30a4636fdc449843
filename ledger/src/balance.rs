//! Gross pairwise balance tracking.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use splitledger_common::UserId;

/// Gross amounts owed, keyed by debtor then creditor.
///
/// Lives for a single engine invocation. Positive values mean the debtor
/// owes the creditor; settlements can push a value below zero. Both
/// levels keep first-insertion order so the emitted ledger is
/// deterministic for a given input order.
#[derive(Debug, Clone, Default)]
pub struct GrossBalances {
    balances: IndexMap<UserId, IndexMap<UserId, Decimal>>,
}

impl GrossBalances {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to what `debtor` owes `creditor`, creating the entry
    /// at zero if absent. Returns `None` on decimal overflow, leaving the
    /// entry untouched.
    pub fn credit(&mut self, debtor: &UserId, creditor: &UserId, amount: Decimal) -> Option<Decimal> {
        let entry = self
            .balances
            .entry(debtor.clone())
            .or_default()
            .entry(creditor.clone())
            .or_insert(Decimal::ZERO);
        let updated = entry.checked_add(amount)?;
        *entry = updated;
        Some(updated)
    }

    /// Reduce what `debtor` owes `creditor` by `amount`. The balance may
    /// go negative.
    pub fn debit(&mut self, debtor: &UserId, creditor: &UserId, amount: Decimal) -> Option<Decimal> {
        self.credit(debtor, creditor, -amount)
    }

    /// Gross amount `debtor` owes `creditor`, zero when no entry exists.
    pub fn get(&self, debtor: &UserId, creditor: &UserId) -> Decimal {
        self.balances
            .get(debtor)
            .and_then(|owes| owes.get(creditor))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether an entry exists for the ordered pair.
    pub fn contains(&self, debtor: &UserId, creditor: &UserId) -> bool {
        self.balances
            .get(debtor)
            .map_or(false, |owes| owes.contains_key(creditor))
    }

    /// Iterate `(debtor, creditor, amount)` in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &UserId, Decimal)> {
        self.balances.iter().flat_map(|(debtor, owes)| {
            owes.iter()
                .map(move |(creditor, amount)| (debtor, creditor, *amount))
        })
    }

    /// Number of ordered pairs tracked.
    pub fn len(&self) -> usize {
        self.balances.values().map(IndexMap::len).sum()
    }

    /// Whether no pair has been touched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_operations() {
        let alice = UserId::new("u1");
        let bob = UserId::new("u2");
        let mut balances = GrossBalances::new();

        balances.credit(&bob, &alice, dec!(30));
        balances.credit(&bob, &alice, dec!(5));
        balances.debit(&bob, &alice, dec!(10));

        assert_eq!(balances.get(&bob, &alice), dec!(25));
        assert_eq!(balances.get(&alice, &bob), Decimal::ZERO);
        assert!(balances.contains(&bob, &alice));
        assert!(!balances.contains(&alice, &bob));
        assert_eq!(balances.len(), 1);
    }

    #[test]
    fn test_debit_without_prior_entry_goes_negative() {
        let alice = UserId::new("u1");
        let bob = UserId::new("u2");
        let mut balances = GrossBalances::new();

        balances.debit(&bob, &alice, dec!(15));
        assert_eq!(balances.get(&bob, &alice), dec!(-15));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let a = UserId::new("a");
        let b = UserId::new("b");
        let c = UserId::new("c");
        let mut balances = GrossBalances::new();

        balances.credit(&c, &a, dec!(1));
        balances.credit(&b, &a, dec!(2));
        balances.credit(&c, &b, dec!(3));

        let order: Vec<(&str, &str)> = balances
            .iter()
            .map(|(d, c, _)| (d.as_str(), c.as_str()))
            .collect();
        assert_eq!(order, vec![("c", "a"), ("c", "b"), ("b", "a")]);
    }

    #[test]
    fn test_overflow_leaves_entry_untouched() {
        let a = UserId::new("a");
        let b = UserId::new("b");
        let mut balances = GrossBalances::new();

        balances.credit(&a, &b, Decimal::MAX);
        assert!(balances.credit(&a, &b, Decimal::MAX).is_none());
        assert_eq!(balances.get(&a, &b), Decimal::MAX);
    }
}
