//! `SeaORM` entity definitions.

pub mod loans;
pub mod payments;
