//! SplitLedger Ledger Engine
//!
//! Nets a trip's expenses and settlements into the smallest set of
//! person-to-person debts. The computation runs in three phases:
//!
//! - accumulation of gross pairwise balances ([`GrossBalances`]),
//! - reconciliation of mutual claims ([`netting`]),
//! - emission of one rounded edge per unordered pair.
//!
//! # Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use splitledger_common::{Expense, LedgerEvent, Participant};
//! use splitledger_ledger::compute_ledger;
//!
//! let alice = Participant::new("u1", "Alice");
//! let bob = Participant::new("u2", "Bob");
//! let events = vec![LedgerEvent::Expense(Expense::new(
//!     dec!(60),
//!     alice.clone(),
//!     vec![alice, bob],
//! ))];
//!
//! let edges = compute_ledger(&events).unwrap();
//! assert_eq!(edges.len(), 1);
//! assert_eq!(edges[0].borrower.name, "Bob");
//! assert_eq!(edges[0].amount, dec!(30));
//! ```

pub mod engine;
pub mod balance;
pub mod registry;
pub mod netting;
pub mod policy;
pub mod error;

pub use engine::{compute_ledger, net_positions, LedgerEngine, LedgerReport};
pub use balance::GrossBalances;
pub use registry::ParticipantRegistry;
pub use policy::NettingPolicy;
pub use error::{LedgerError, LedgerResult};
