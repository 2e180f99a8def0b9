//! End-to-end flows against a real MySQL server. Each test rebuilds the
//! database from schema and seed first.
//!
//! Connection settings are the usual `DB_*` keys prefixed with `TEST_`
//! (`TEST_DB_HOST`, `TEST_DB_USER`, `TEST_DB_PASSWORD`, ...); the database
//! name defaults to `bank_api_test`. Run with `cargo test -- --ignored`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bank_api::{app, connect, reset_database, AppConfig, AppState};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use serial_test::serial;
use sqlx::MySqlPool;
use std::str::FromStr;
use tower::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match std::env::var(format!("TEST_{}", key)) {
        Ok(v) => Some(v),
        Err(_) if key == "DB_NAME" => Some("bank_api_test".to_string()),
        Err(_) if key == "SEED_DATABASE" => Some("true".to_string()),
        Err(_) => None,
    })
    .unwrap()
}

struct Harness {
    pool: MySqlPool,
    router: Router,
}

impl Harness {
    async fn fresh() -> Self {
        let config = test_config();
        reset_database(&config).await.unwrap();
        let pool = connect(&config).await.unwrap();
        let router = app(AppState::new(pool.clone()), &config).unwrap();
        Harness { pool, router }
    }

    async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let res = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn balance(&self, acc: i32) -> Decimal {
        sqlx::query_scalar("SELECT Balance FROM ACCOUNT WHERE Acc_Number = ?")
            .bind(acc)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    async fn count(&self, sql: &str) -> i64 {
        sqlx::query_scalar(sql).fetch_one(&self.pool).await.unwrap()
    }

    async fn transaction_count(&self) -> i64 {
        self.count("SELECT COUNT(*) FROM TRANSACTIONS").await
    }

    async fn close(self) {
        self.pool.close().await;
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[tokio::test]
#[ignore]
#[serial]
async fn transfer_moves_money_and_records_transaction() {
    let h = Harness::fresh().await;
    let before = h.transaction_count().await;

    let (status, body) = h
        .call(
            Method::POST,
            "/transactions/transfer",
            Some(json!({"fromAccount": 101, "toAccount": 202, "amount": 500})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["message"], "Fund transfer successful");
    let id = body["Transaction_ID"].as_i64().unwrap();

    assert_eq!(h.balance(101).await, dec("500.00"));
    assert_eq!(h.balance(202).await, dec("700.00"));
    assert_eq!(h.transaction_count().await, before + 1);

    let (status, row) = h.call(Method::GET, &format!("/transactions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["Sender_Acc_Number"], 101);
    assert_eq!(row["Receiver_Acc_Number"], 202);
    assert_eq!(row["Status"], "Completed");
    assert_eq!(row["Transaction_Type"], "Transfer");
    assert_eq!(dec(row["Amount"].as_str().unwrap()), dec("500"));
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn create_transaction_uses_supplied_type() {
    let h = Harness::fresh().await;
    let (status, body) = h
        .call(
            Method::POST,
            "/transactions",
            Some(json!({
                "Sender_Acc_Number": "303",
                "Receiver_Acc_Number": 101,
                "Amount": "250.75",
                "Transaction_Type": "NEFT",
                "Description": "rent share"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(h.balance(303).await, dec("24749.25"));
    assert_eq!(h.balance(101).await, dec("1250.75"));

    let (_, types) = h.call(Method::GET, "/transactions/types", None).await;
    assert!(types.as_array().unwrap().contains(&json!("NEFT")));
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn invalid_transfers_change_nothing() {
    let h = Harness::fresh().await;
    let before = h.transaction_count().await;
    let bodies = [
        json!({"fromAccount": 101, "toAccount": 202, "amount": 0}),
        json!({"fromAccount": 101, "toAccount": 202, "amount": -20}),
        json!({"fromAccount": "one", "toAccount": 202, "amount": 20}),
        json!({"fromAccount": 101, "amount": 20}),
    ];
    for body in bodies {
        let (status, _) = h
            .call(Method::POST, "/transactions/transfer", Some(body.clone()))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    }
    assert_eq!(h.balance(101).await, dec("1000.00"));
    assert_eq!(h.balance(202).await, dec("200.00"));
    assert_eq!(h.transaction_count().await, before);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn transfer_to_unknown_account_rolls_back() {
    let h = Harness::fresh().await;
    let before = h.transaction_count().await;

    let (status, body) = h
        .call(
            Method::POST,
            "/transactions/transfer",
            Some(json!({"fromAccount": 101, "toAccount": 999999, "amount": 100})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Receiver account 999999 not found");

    let (status, _) = h
        .call(
            Method::POST,
            "/transactions/transfer",
            Some(json!({"fromAccount": 999999, "toAccount": 101, "amount": 100})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(h.balance(101).await, dec("1000.00"));
    assert_eq!(h.transaction_count().await, before);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn inactive_accounts_cannot_transfer() {
    let h = Harness::fresh().await;
    // 404 is Frozen in the seed data
    let (status, body) = h
        .call(
            Method::POST,
            "/transactions/transfer",
            Some(json!({"fromAccount": 404, "toAccount": 101, "amount": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Sender account 404 is not active");

    let (status, body) = h
        .call(
            Method::POST,
            "/transactions/transfer",
            Some(json!({"fromAccount": 101, "toAccount": 404, "amount": 10})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Receiver account 404 is not active");

    assert_eq!(h.balance(404).await, dec("5000.00"));
    assert_eq!(h.balance(101).await, dec("1000.00"));
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn insufficient_balance_rejected() {
    let h = Harness::fresh().await;
    let before = h.transaction_count().await;
    let (status, body) = h
        .call(
            Method::POST,
            "/transactions/transfer",
            Some(json!({"fromAccount": 202, "toAccount": 101, "amount": "200.01"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Insufficient balance"));
    assert_eq!(h.balance(202).await, dec("200.00"));
    assert_eq!(h.balance(101).await, dec("1000.00"));
    assert_eq!(h.transaction_count().await, before);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn concurrent_transfers_never_overdraw() {
    let h = Harness::fresh().await;
    // 202 holds 200.00: at most two of these five 80.00 debits can succeed.
    let mut tasks = Vec::new();
    for _ in 0..5 {
        let router = h.router.clone();
        tasks.push(tokio::spawn(async move {
            let req = Request::builder()
                .method(Method::POST)
                .uri("/transactions/transfer")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"fromAccount": 202, "toAccount": 303, "amount": 80}).to_string(),
                ))
                .unwrap();
            router.oneshot(req).await.unwrap().status()
        }));
    }
    let mut ok = 0;
    for t in tasks {
        if t.await.unwrap() == StatusCode::CREATED {
            ok += 1;
        }
    }
    assert_eq!(ok, 2);
    assert_eq!(h.balance(202).await, dec("40.00"));
    assert_eq!(h.balance(303).await, dec("25160.00"));
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn loan_creation_opens_matching_loan_account() {
    let h = Harness::fresh().await;
    let (status, body) = h
        .call(
            Method::POST,
            "/loans",
            Some(json!({
                "Amount": 120000,
                "Customer_ID": 2,
                "Interest_Rate": 9.75,
                "Term": 60,
                "Type": "Car Loan",
                "Purpose": "Hatchback"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let loan_id = body["Loan_ID"].as_i64().unwrap();
    assert_eq!(body["data"]["Status"], "Pending");

    let loans = h
        .count(&format!("SELECT COUNT(*) FROM LOAN WHERE Loan_ID = {}", loan_id))
        .await;
    assert_eq!(loans, 1);
    let (status, account) = h
        .call(Method::GET, &format!("/loanAccounts/loan/{}", loan_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec(account["Balance"].as_str().unwrap()), dec("120000"));
    assert_eq!(account["Status"], "Active");
    assert_eq!(
        h.count(&format!(
            "SELECT COUNT(*) FROM LOAN_ACCOUNT WHERE Loan_ID = {}",
            loan_id
        ))
        .await,
        1
    );
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn loan_for_unknown_customer_is_404_and_writes_nothing() {
    let h = Harness::fresh().await;
    let loans = h.count("SELECT COUNT(*) FROM LOAN").await;
    let (status, _) = h
        .call(
            Method::POST,
            "/loans",
            Some(json!({
                "Amount": 1000,
                "Customer_ID": 4242,
                "Interest_Rate": 10,
                "Term": 12,
                "Type": "Personal Loan",
                "Purpose": "Laptop"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(h.count("SELECT COUNT(*) FROM LOAN").await, loans);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn loan_delete_removes_loan_account() {
    let h = Harness::fresh().await;
    // seeded loan 2 has a loan account and an AVAIL link but no payments
    let (status, _) = h.call(Method::DELETE, "/loans/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.count("SELECT COUNT(*) FROM LOAN WHERE Loan_ID = 2").await, 0);
    assert_eq!(
        h.count("SELECT COUNT(*) FROM LOAN_ACCOUNT WHERE Loan_ID = 2").await,
        0
    );
    let (status, _) = h.call(Method::DELETE, "/loans/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn loan_with_payments_cannot_be_deleted() {
    let h = Harness::fresh().await;
    // seeded loan 1 has two payments
    let (status, body) = h.call(Method::DELETE, "/loans/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
    assert_eq!(body["error"], "Conflict");
    assert_eq!(h.count("SELECT COUNT(*) FROM LOAN WHERE Loan_ID = 1").await, 1);
    assert_eq!(
        h.count("SELECT COUNT(*) FROM LOAN_ACCOUNT WHERE Loan_ID = 1").await,
        1
    );
    assert_eq!(h.count("SELECT COUNT(*) FROM AVAIL WHERE Loan_ID = 1").await, 1);
    assert_eq!(h.count("SELECT COUNT(*) FROM PAYMENT WHERE Loan_ID = 1").await, 2);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn loan_amount_update_syncs_loan_account() {
    let h = Harness::fresh().await;
    let (status, _) = h
        .call(Method::PUT, "/loans/2", Some(json!({"Amount": 80000, "Status": "Approved"})))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, account) = h.call(Method::GET, "/loanAccounts/loan/2", None).await;
    assert_eq!(dec(account["Balance"].as_str().unwrap()), dec("80000"));

    let (status, body) = h.call(Method::PUT, "/loans/2", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "No fields to update");
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn update_missing_account_is_404_without_write() {
    let h = Harness::fresh().await;
    let accounts = h.count("SELECT COUNT(*) FROM ACCOUNT").await;
    let (status, body) = h
        .call(Method::PUT, "/accounts/999999", Some(json!({"Status": "Closed"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(h.count("SELECT COUNT(*) FROM ACCOUNT").await, accounts);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn account_opening_and_lookups() {
    let h = Harness::fresh().await;
    let (status, body) = h
        .call(
            Method::POST,
            "/accounts",
            Some(json!({"Balance": 1500, "Type": "Current", "Customer_ID": 3})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let acc = body["Acc_Number"].as_i64().unwrap();
    assert_eq!(body["data"]["Branch_ID"], 1);
    assert_eq!(body["data"]["Status"], "Active");
    assert_eq!(body["data"]["IFSC_Code"], "BHRT0000001");

    let (status, verified) = h
        .call(
            Method::GET,
            &format!("/accounts/verify?ifsc=BHRT0000001&accountNumber={}", acc),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verified["F_Name"], "Neha");

    let (_, balance) = h
        .call(Method::GET, &format!("/accounts/{}/balance", acc), None)
        .await;
    assert_eq!(dec(balance["balance"].as_str().unwrap()), dec("1500"));

    let (_, exists) = h.call(Method::GET, "/accounts/999999/exists", None).await;
    assert_eq!(exists, json!(false));

    let (status, _) = h
        .call(
            Method::POST,
            "/accounts",
            Some(json!({"Balance": 10, "Type": "Savings", "Customer_ID": 4242})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn transaction_filters() {
    let h = Harness::fresh().await;
    let (_, rows) = h.call(Method::GET, "/transactions?accountId=202", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let (_, rows) = h.call(Method::GET, "/transactions?customerId=1", None).await;
    assert_eq!(rows.as_array().unwrap().len(), 3);

    let (_, rows) = h
        .call(
            Method::GET,
            "/transactions?startDate=2024-05-02&endDate=2024-05-10",
            None,
        )
        .await;
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // newest first
    assert_eq!(rows[0]["Description"], "Dinner split");

    let (_, rows) = h
        .call(Method::GET, "/transactions?minAmount=100&type=Transfer", None)
        .await;
    assert_eq!(rows.as_array().unwrap().len(), 2);

    let (status, _) = h
        .call(Method::GET, "/transactions?minAmount=500&maxAmount=100", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn signup_and_login() {
    let h = Harness::fresh().await;
    let signup = json!({
        "name": "Meera Iyer",
        "email": "meera.iyer@example.in",
        "phone": "9000011111",
        "address": "Adyar, Chennai",
        "password": "tulip-2024"
    });
    let (status, body) = h
        .call(Method::POST, "/auth/customer/signup", Some(signup.clone()))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["L_Name"], "Iyer");
    assert!(body["data"].get("Password").is_none());

    let (status, body) = h
        .call(
            Method::POST,
            "/auth/customer/signup",
            Some(json!({
                "name": "Madonna",
                "email": "madonna@example.in",
                "phone": "9000022222",
                "address": "Bandra, Mumbai",
                "password": "lotus-2024"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["data"]["F_Name"], "Madonna");
    assert_eq!(body["data"]["L_Name"], "");

    let (status, body) = h.call(Method::POST, "/auth/customer/signup", Some(signup)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], "Customer already exists");

    let (status, body) = h
        .call(
            Method::POST,
            "/auth/customer/login",
            Some(json!({"email": "meera.iyer@example.in", "password": "tulip-2024"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let (status, _) = h
        .call(
            Method::POST,
            "/auth/customer/login",
            Some(json!({"email": "meera.iyer@example.in", "password": "wrong"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = h
        .call(
            Method::POST,
            "/auth/employee/login",
            Some(json!({"email": "rahul.sharma@bharatbank.in", "password": "employee123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = h
        .call(
            Method::POST,
            "/auth/customer/login",
            Some(json!({"email": "asha.rao@example.in", "password": "customer123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    h.close().await;
}

#[tokio::test]
#[ignore]
#[serial]
async fn reference_data_and_assignments() {
    let h = Harness::fresh().await;
    let (status, body) = h
        .call(
            Method::POST,
            "/branches",
            Some(json!({"Branch_Name": "Salt Lake", "Address": "Kolkata", "IFSC_Code": "BHRT0000009", "B_Code": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);

    let (status, _) = h
        .call(
            Method::POST,
            "/branches",
            Some(json!({"Branch_Name": "Nowhere", "B_Code": 77})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = h
        .call(Method::POST, "/manages", Some(json!({"Emp_ID": 2, "Acc_Number": 303})))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = h.call(Method::DELETE, "/manages/2/303", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = h.call(Method::DELETE, "/manages/2/303", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = h
        .call(Method::POST, "/payments", Some(json!({"Pay_Amount": 5000, "Loan_ID": 1})))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert!(body["data"]["Pay_Date"].is_string());
    let (_, payments) = h.call(Method::GET, "/payments?loanId=1", None).await;
    assert_eq!(payments.as_array().unwrap().len(), 3);
    h.close().await;
}
