//! SplitLedger Trip Service
//!
//! Records a trip's expenses and settlements through an injected
//! [`TripStore`] and nets them into a ledger with the engine. Transport,
//! authentication and receipt storage live outside this crate.

pub mod config;
pub mod memory;
pub mod ports;
pub mod requests;
pub mod service;

pub use config::ServiceConfig;
pub use memory::InMemoryTripStore;
pub use ports::TripStore;
pub use requests::{NewExpense, NewSettlement};
pub use service::TripService;
