use serde_json::{json, Value};

mod common;
use common::TestApp;

#[actix_rt::test]
async fn test_health_endpoint() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn test_missing_or_wrong_api_key_is_rejected() {
    let app = TestApp::new().await;

    let response = app.get_with_token("/api/categories", None).await;
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "UNAUTHORIZED");

    let response = app.get_with_token("/api/funds", Some("wrong")).await;
    assert_eq!(response.status(), 401);
}

#[actix_rt::test]
async fn test_methods_returns_labels() {
    let app = TestApp::new().await;

    let response = app.get("/api/methods").await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(
        body,
        json!(["Tiền mặt", "Chuyển khoản", "Ví điện tử", "Thẻ tín dụng"])
    );
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_create_category_and_duplicate() {
    let app = TestApp::new().await;
    let payload = json!({"name": "Food", "type": "expense"});

    let response = app.post("/api/categories", &payload).await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await;
    assert_eq!(body, json!({"name": "Food", "type": "expense"}));

    let response = app.post("/api/categories", &payload).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "Category already exists");
}

#[actix_rt::test]
async fn test_create_category_rejects_bad_type_and_empty_name() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/categories", &json!({"name": "Food", "type": "savings"}))
        .await;
    assert_eq!(response.status(), 400);

    let response = app
        .post("/api/categories", &json!({"name": "", "type": "income"}))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_rename_category_onto_existing_name_conflicts() {
    let app = TestApp::new().await;
    app.post("/api/categories", &json!({"name": "Food", "type": "expense"}))
        .await;
    app.post("/api/categories", &json!({"name": "Salary", "type": "income"}))
        .await;

    let response = app
        .put("/api/categories/Food", &json!({"name": "Salary"}))
        .await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Category with new name already exists");

    let food: Value = app.get("/api/categories/Food").await.json().await;
    assert_eq!(food["type"], "expense");
    let salary: Value = app.get("/api/categories/Salary").await.json().await;
    assert_eq!(salary["type"], "income");
}

#[actix_rt::test]
async fn test_rename_category() {
    let app = TestApp::new().await;
    app.post("/api/categories", &json!({"name": "Food", "type": "expense"}))
        .await;

    let response = app
        .put(
            "/api/categories/Food",
            &json!({"name": "Groceries", "type": "expense"}),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["name"], "Groceries");

    assert_eq!(app.get("/api/categories/Food").await.status(), 404);
    assert_eq!(app.get("/api/categories/Groceries").await.status(), 200);
}

#[actix_rt::test]
async fn test_update_missing_category_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .put("/api/categories/Nope", &json!({"type": "income"}))
        .await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_empty_category_update_returns_current_row() {
    let app = TestApp::new().await;
    app.post("/api/categories", &json!({"name": "Food", "type": "expense"}))
        .await;

    let response = app.put("/api/categories/Food", &json!({})).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body, json!({"name": "Food", "type": "expense"}));
}

#[actix_rt::test]
async fn test_delete_category_then_get_is_not_found() {
    let app = TestApp::new().await;
    app.post("/api/categories", &json!({"name": "Food", "type": "expense"}))
        .await;

    let response = app.delete("/api/categories/Food").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Category deleted successfully");

    assert_eq!(app.get("/api/categories/Food").await.status(), 404);
    assert_eq!(app.delete("/api/categories/Food").await.status(), 404);
}

#[actix_rt::test]
async fn test_categories_by_type() {
    let app = TestApp::new().await;
    for (name, kind) in [("Food", "expense"), ("Rent", "expense"), ("Salary", "income")] {
        app.post("/api/categories", &json!({"name": name, "type": kind}))
            .await;
    }

    let response = app.get("/api/categories/type/expense").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Food", "Rent"]);

    let response = app.get("/api/categories/type/transfer").await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Invalid type parameter");
}

#[actix_rt::test]
async fn test_list_categories_is_paginated() {
    let app = TestApp::new().await;
    for name in ["A", "B", "C"] {
        app.post("/api/categories", &json!({"name": name, "type": "expense"}))
            .await;
    }

    let response = app.get("/api/categories?page=2&pageSize=2").await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["data"], json!([{"name": "C", "type": "expense"}]));
    assert_eq!(
        body["pagination"],
        json!({"total": 3, "page": 2, "pageSize": 2, "totalPages": 2})
    );
}

// ---------------------------------------------------------------------------
// Funds
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_fund_lifecycle() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/funds",
            &json!({"name": "Emergency", "description": "Six months"}),
        )
        .await;
    assert_eq!(response.status(), 201);

    let response = app.post("/api/funds", &json!({"name": "Emergency"})).await;
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Fund with this name already exists");

    let response = app
        .put("/api/funds/Emergency", &json!({"description": "Twelve months"}))
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["name"], "Emergency");
    assert_eq!(body["description"], "Twelve months");

    let response = app.delete("/api/funds/Emergency").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Fund deleted successfully");

    assert_eq!(app.get("/api/funds/Emergency").await.status(), 404);
}

#[actix_rt::test]
async fn test_fund_without_description_omits_it() {
    let app = TestApp::new().await;

    let response = app.post("/api/funds", &json!({"name": "Daily"})).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await;
    assert_eq!(body, json!({"name": "Daily"}));
}

#[actix_rt::test]
async fn test_empty_fund_update_and_missing_delete() {
    let app = TestApp::new().await;
    app.post("/api/funds", &json!({"name": "Daily", "description": "Pocket money"}))
        .await;

    let response = app.put("/api/funds/Daily", &json!({})).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body, json!({"name": "Daily", "description": "Pocket money"}));

    let response = app.delete("/api/funds/Nope").await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_huge_page_on_funds_is_rejected() {
    let app = TestApp::new().await;
    app.post("/api/funds", &json!({"name": "Cash"})).await;

    let response = app
        .get("/api/funds?page=9223372036854775807&pageSize=10")
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Invalid page parameter");
}

#[actix_rt::test]
async fn test_rename_fund_onto_existing_name_conflicts() {
    let app = TestApp::new().await;
    app.post("/api/funds", &json!({"name": "Daily"})).await;
    app.post("/api/funds", &json!({"name": "Savings"})).await;

    let response = app.put("/api/funds/Daily", &json!({"name": "Savings"})).await;

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Fund with new name already exists");
    assert_eq!(app.get("/api/funds/Daily").await.status(), 200);
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_create_transaction_applies_defaults() {
    let app = TestApp::new().await;

    let response = app.post("/api/transactions", &json!({"amount": 45000})).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await;
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["type"], "expense");
    assert_eq!(body["amount"], 45000.0);
    assert_eq!(body["method"], "Chuyển khoản");
    assert_eq!(body["description"], "");
    assert_eq!(
        body["date"],
        chrono::Utc::now().date_naive().to_string()
    );
    assert!(body.get("toFund").is_none());
}

#[actix_rt::test]
async fn test_create_transaction_rejects_non_positive_amount() {
    let app = TestApp::new().await;

    let response = app.post("/api/transactions", &json!({"amount": 0})).await;
    assert_eq!(response.status(), 400);

    let response = app.post("/api/transactions", &json!({"note": "no amount"})).await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app.post_raw("/api/transactions", "{\"amount\": ").await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_rt::test]
async fn test_transfer_round_trips_to_fund() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/transactions",
            &json!({
                "type": "transfer",
                "date": "2025-03-15",
                "amount": 1000000,
                "fund": "Daily",
                "toFund": "Savings"
            }),
        )
        .await;
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await;
    let id = created["id"].as_str().unwrap();

    let response = app.get(&format!("/api/transactions/{id}")).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["type"], "transfer");
    assert_eq!(body["date"], "2025-03-15");
    assert_eq!(body["toFund"], "Savings");
}

#[actix_rt::test]
async fn test_update_and_delete_transaction() {
    let app = TestApp::new().await;
    let created: Value = app
        .post(
            "/api/transactions",
            &json!({"amount": 20000, "description": "Coffee", "category": "Food"}),
        )
        .await
        .json()
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/api/transactions/{id}"),
            &json!({"amount": 25000, "note": "with cake"}),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["amount"], 25000.0);
    assert_eq!(body["note"], "with cake");
    assert_eq!(body["description"], "Coffee");
    assert_eq!(body["category"], "Food");

    let response = app.delete(&format!("/api/transactions/{id}")).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Transaction deleted successfully");

    assert_eq!(
        app.get(&format!("/api/transactions/{id}")).await.status(),
        404
    );
}

#[actix_rt::test]
async fn test_empty_transaction_update_is_a_no_op() {
    let app = TestApp::new().await;
    let created: Value = app
        .post(
            "/api/transactions",
            &json!({"amount": 1000, "date": "2025-03-10", "note": "bus"}),
        )
        .await
        .json()
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app.put(&format!("/api/transactions/{id}"), &json!({})).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body, created);
}

#[actix_rt::test]
async fn test_null_in_transaction_update_is_rejected() {
    let app = TestApp::new().await;
    let created: Value = app
        .post(
            "/api/transactions",
            &json!({"type": "transfer", "amount": 5, "fund": "Daily", "toFund": "Savings"}),
        )
        .await
        .json()
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put(&format!("/api/transactions/{id}"), &json!({"toFund": null}))
        .await;
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let body: Value = app
        .get(&format!("/api/transactions/{id}"))
        .await
        .json()
        .await;
    assert_eq!(body["toFund"], "Savings");
}

#[actix_rt::test]
async fn test_unknown_transaction_is_not_found() {
    let app = TestApp::new().await;

    assert_eq!(app.get("/api/transactions/does-not-exist").await.status(), 404);
    assert_eq!(
        app.put("/api/transactions/does-not-exist", &json!({"amount": 1}))
            .await
            .status(),
        404
    );
    assert_eq!(
        app.delete("/api/transactions/does-not-exist").await.status(),
        404
    );
}

#[actix_rt::test]
async fn test_transactions_are_newest_first_and_paginated() {
    let app = TestApp::new().await;
    for (day, amount) in [("2025-03-01", 1), ("2025-03-03", 3), ("2025-03-02", 2)] {
        app.post("/api/transactions", &json!({"amount": amount, "date": day}))
            .await;
    }

    let response = app.get("/api/transactions?pageSize=2").await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    let dates: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-03-03", "2025-03-02"]);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);
}

#[actix_rt::test]
async fn test_invalid_pagination_is_rejected() {
    let app = TestApp::new().await;

    for query in [
        "page=0",
        "page=abc",
        "pageSize=0",
        "pageSize=101",
        "page=9223372036854775807&pageSize=10",
    ] {
        let response = app.get(&format!("/api/transactions?{query}")).await;
        assert_eq!(response.status(), 400, "{query}");
    }
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[actix_rt::test]
async fn test_create_budget_defaults() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/budgets",
            &json!({
                "name": "Groceries March",
                "amount": 3000000,
                "start_date": "2025-03-01",
                "end_date": "2025-03-31",
                "category": "Food"
            }),
        )
        .await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await;
    assert_eq!(body["spent"], 0.0);
    assert_eq!(body["status"], "Active");
    assert_eq!(body["category"], "Food");
    assert!(body.get("fund").is_none());
}

#[actix_rt::test]
async fn test_budget_period_must_be_ordered() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/budgets",
            &json!({
                "name": "Backwards",
                "amount": 100,
                "start_date": "2025-03-31",
                "end_date": "2025-03-01"
            }),
        )
        .await;
    assert_eq!(response.status(), 400);

    let created: Value = app
        .post(
            "/api/budgets",
            &json!({
                "name": "March",
                "amount": 100,
                "start_date": "2025-03-01",
                "end_date": "2025-03-31"
            }),
        )
        .await
        .json()
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/api/budgets/{id}"),
            &json!({"end_date": "2025-02-01"}),
        )
        .await;
    assert_eq!(response.status(), 400);
}

#[actix_rt::test]
async fn test_update_and_delete_budget() {
    let app = TestApp::new().await;
    let created: Value = app
        .post(
            "/api/budgets",
            &json!({
                "name": "March",
                "amount": 100,
                "start_date": "2025-03-01",
                "end_date": "2025-03-31"
            }),
        )
        .await
        .json()
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .put(
            &format!("/api/budgets/{id}"),
            &json!({"spent": 40, "status": "Completed"}),
        )
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["spent"], 40.0);
    assert_eq!(body["status"], "Completed");
    assert_eq!(body["name"], "March");

    let list: Value = app.get("/api/budgets").await.json().await;
    assert_eq!(list["pagination"]["total"], 1);

    let response = app.delete(&format!("/api/budgets/{id}")).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body["message"], "Budget deleted successfully");
    assert_eq!(app.get(&format!("/api/budgets/{id}")).await.status(), 404);
}

#[actix_rt::test]
async fn test_empty_budget_update_and_missing_delete() {
    let app = TestApp::new().await;
    let created: Value = app
        .post(
            "/api/budgets",
            &json!({
                "name": "April",
                "amount": 500,
                "start_date": "2025-04-01",
                "end_date": "2025-04-30",
                "note": "tight month"
            }),
        )
        .await
        .json()
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app.put(&format!("/api/budgets/{id}"), &json!({})).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await;
    assert_eq!(body, created);

    let response = app.put(&format!("/api/budgets/{id}"), &json!({"note": null})).await;
    assert_eq!(response.status(), 400);

    let response = app.delete("/api/budgets/does-not-exist").await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await;
    assert_eq!(body["error"], "NOT_FOUND");
}
