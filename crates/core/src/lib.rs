//! Kerbside
//!
//! Kerbside is the domain core of a vehicle rental marketplace: a searchable
//! vehicle catalog, a three-step booking wizard with a duration and cost
//! calculator, and in-memory collaborators (user directory, booking store)
//! standing in for a backend.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod fixtures;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod users;
pub mod vehicles;
pub mod views;
