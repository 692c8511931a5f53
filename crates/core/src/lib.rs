//! Domain types and pure logic for staffledger.
//!
//! Nothing in this crate touches the database or the network; the `db` and
//! `api` crates call into it for date handling, report arithmetic, merge
//! planning and input validation.

pub mod dates;
pub mod error;
pub mod invoice;
pub mod merge;
pub mod money;
pub mod roles;
pub mod types;
pub mod utilization;
pub mod validation;
