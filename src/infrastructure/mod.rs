//! Infrastructure layer implementing the domain storage contract.
//!
//! - [`persistence`] - In-memory and PostgreSQL stores

pub mod persistence;
