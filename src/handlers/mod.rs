//! HTTP handlers, one module per resource group.

pub mod account;
pub mod auth;
pub mod customer;
pub mod employee;
pub mod loan;
pub mod records;
pub mod transaction;
