//! Core business logic for Sitebook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All bookkeeping rules, validation, and balance derivations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping: entry builders, the balance
//!   validator, and balance aggregation over a ledger store

pub mod ledger;
