//! Services: generic CRUD plus the multi-statement flows (transfers, loans,
//! account opening) that run inside one database transaction.

mod account;
pub mod credentials;
mod crud;
mod loan;
mod people;
mod records;
mod transaction;
mod transfer;
pub mod validation;

pub use account::AccountService;
pub use crud::CrudService;
pub use loan::LoanService;
pub use people::PeopleService;
pub use records::RecordService;
pub use transaction::TransactionService;
pub use transfer::TransferService;
