//! Outbound adapters implementing the domain's repository ports.
//!
//! [`persistence`] talks to PostgreSQL through Diesel; [`memory`] keeps
//! everything in process for database-less runs and tests.

pub mod memory;
pub mod persistence;
