// src/scoring/mod.rs

//! Score and rank bookkeeping.
//!
//! Everything here is pure: each function takes the current rows and returns
//! the rows to persist. The stores run these inside a single transaction (or
//! lock scope) so a progress/result row is never written without its score.

pub mod answer;
pub mod ledger;
pub mod progress;
pub mod rank;
