//! SplitLedger Common Types
//!
//! Shared types used across SplitLedger: identifiers, participant
//! references, expense and settlement events, and money helpers.

pub mod identifiers;
pub mod monetary;
pub mod events;
pub mod records;
pub mod error;

pub use identifiers::*;
pub use monetary::*;
pub use events::*;
pub use records::*;
pub use error::*;
