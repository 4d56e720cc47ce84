//! Core business logic for Lendbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `lending` - Loan calculator, rate table, repayment rules

pub mod lending;
