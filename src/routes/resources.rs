//! Resource routers. Literal segments (`/types`, `/verify`, `/email/...`)
//! are registered next to `/:id`; axum prefers the static match.

use crate::handlers::{account, auth, customer, employee, loan, records, transaction};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customer::list).post(customer::create))
        .route("/email/:email", get(customer::by_email))
        .route(
            "/:id",
            get(customer::get).put(customer::update).delete(customer::delete),
        )
}

pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::list).post(employee::create))
        .route("/add", post(employee::create))
        .route("/email/:email", get(employee::by_email))
        .route(
            "/:id",
            get(employee::get).put(employee::update).delete(employee::delete),
        )
}

pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::list).post(account::create))
        .route("/types", get(account::types))
        .route("/verify", get(account::verify))
        .route("/verify/:id", get(account::verify_by_id))
        .route(
            "/:id",
            get(account::get).put(account::update).delete(account::delete),
        )
        .route("/:id/balance", get(account::balance))
        .route("/:id/exists", get(account::exists))
        .route("/:id/transactions", get(account::transactions))
}

pub fn loan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(loan::list).post(loan::create))
        .route("/:id", get(loan::get).put(loan::update).delete(loan::delete))
}

pub fn loan_account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(loan::list_accounts).post(loan::create_account))
        .route("/loan/:loan_id", get(loan::account_for_loan))
}

pub fn transaction_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(transaction::list).post(transaction::create))
        .route("/transfer", post(transaction::transfer))
        .route("/types", get(transaction::types))
        .route("/status-options", get(transaction::status_options))
        .route("/:id", get(transaction::get))
}

pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list_payments).post(records::create_payment))
        .route(
            "/:id",
            get(records::get_payment)
                .put(records::update_payment)
                .delete(records::delete_payment),
        )
}

pub fn bank_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list_banks).post(records::create_bank))
        .route(
            "/:id",
            get(records::get_bank)
                .put(records::update_bank)
                .delete(records::delete_bank),
        )
}

pub fn branch_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list_branches).post(records::create_branch))
        .route(
            "/:id",
            get(records::get_branch)
                .put(records::update_branch)
                .delete(records::delete_branch),
        )
}

pub fn manages_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(records::list_manages).post(records::assign_manager))
        .route("/:emp_id/:acc_number", axum::routing::delete(records::unassign_manager))
}

pub fn avail_routes() -> Router<AppState> {
    Router::new().route("/", get(records::list_avail).post(records::link_loan))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/customer/signup", post(auth::customer_signup))
        .route("/customer/login", post(auth::customer_login))
        .route("/employee/login", post(auth::employee_login))
}
