//! Reconciliation of mutual claims into net debt edges.

use std::collections::HashSet;

use splitledger_common::{DebtEdge, UserId};
use tracing::trace;

use crate::balance::GrossBalances;
use crate::error::{LedgerError, LedgerResult};
use crate::policy::NettingPolicy;
use crate::registry::ParticipantRegistry;

/// Canonical key of an unordered participant pair.
fn unordered<'a>(a: &'a UserId, b: &'a UserId) -> (&'a UserId, &'a UserId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Net every unordered pair present in `balances` exactly once.
///
/// For the first-seen ordering `(borrower, lender)` of a pair the net is
/// `balances[borrower][lender] - balances[lender][borrower]`. A positive
/// net beyond the policy epsilon becomes `borrower -> lender`, a negative
/// one flips direction, anything within tolerance is dropped.
///
/// Fails when the two directions of a pair cannot be netted within the
/// decimal range.
pub fn reconcile(
    balances: &GrossBalances,
    registry: &ParticipantRegistry,
    policy: &NettingPolicy,
) -> LedgerResult<Vec<DebtEdge>> {
    let mut resolved: HashSet<(&UserId, &UserId)> = HashSet::new();
    let mut edges = Vec::new();

    for (borrower, lender, owed) in balances.iter() {
        if !resolved.insert(unordered(borrower, lender)) {
            continue;
        }

        let net = owed
            .checked_sub(balances.get(lender, borrower))
            .ok_or_else(|| LedgerError::NetOverflow {
                borrower: borrower.clone(),
                lender: lender.clone(),
            })?;
        if policy.is_settled(net) {
            trace!(borrower = %borrower, lender = %lender, net = %net, "Pair netted out");
            continue;
        }

        let (debtor, creditor) = if net.is_sign_positive() {
            (borrower, lender)
        } else {
            (lender, borrower)
        };

        edges.push(DebtEdge {
            borrower: registry.resolve(debtor),
            lender: registry.resolve(creditor),
            amount: policy.round(net.abs()),
        });
    }

    Ok(edges)
}
