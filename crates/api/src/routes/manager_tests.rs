use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use reimburse_core::expense::{ExpenseStatusKind, NewExpense};
use reimburse_core::{MemoryStore, ReimbursementStore};
use reimburse_shared::types::{CategoryId, EmployeeId, ExpenseId, RoleId};

use crate::{AppState, create_router};

struct TestApp {
    app: Router,
    store: Arc<MemoryStore>,
    role_id: RoleId,
    employee_id: EmployeeId,
    category_id: CategoryId,
}

async fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::with_default_statuses());
    let role = store.add_role("Analyst", true).await;
    let employee = store
        .add_employee("Katherine Johnson", "katherine@example.com", role.id)
        .await;
    let category = store.add_category("Lodging").await;
    let app = create_router(AppState::new(store.clone()));

    TestApp {
        app,
        store,
        role_id: role.id,
        employee_id: employee.id,
        category_id: category.id,
    }
}

impl TestApp {
    async fn add_expense(&self, status: ExpenseStatusKind, day: u32) -> ExpenseId {
        self.store
            .add_expense(NewExpense {
                employee_id: self.employee_id,
                category_id: self.category_id,
                status_id: status.id(),
                amount: 40,
                submit_date: Utc.with_ymd_and_hms(2024, 7, day, 12, 0, 0).unwrap(),
            })
            .await
            .id
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_pending_queue_newest_first() {
    let t = test_app().await;
    let older = t.add_expense(ExpenseStatusKind::Pending, 1).await;
    let newer = t.add_expense(ExpenseStatusKind::Pending, 5).await;
    t.add_expense(ExpenseStatusKind::Rejected, 3).await;

    let (status, body) = send(&t.app, request("GET", "/api/v1/manager/employees/expenses")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&body),
        vec![i64::from(newer.into_inner()), i64::from(older.into_inner())]
    );
}

#[tokio::test]
async fn test_all_expenses() {
    let t = test_app().await;
    t.add_expense(ExpenseStatusKind::Pending, 1).await;
    t.add_expense(ExpenseStatusKind::Approved, 2).await;

    let (status, body) = send(
        &t.app,
        request("GET", "/api/v1/manager/employees/expenses/all"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[rstest]
#[case("statusId=2", StatusCode::OK, 1)]
#[case("statusName=approved", StatusCode::OK, 1)]
#[case("statusName=PENDING", StatusCode::OK, 2)]
#[case("statusId=2&statusName=Pending", StatusCode::OK, 1)]
#[case("statusId=9", StatusCode::NOT_FOUND, 0)]
#[case("statusName=Archived", StatusCode::NOT_FOUND, 0)]
#[case("", StatusCode::BAD_REQUEST, 0)]
#[tokio::test]
async fn test_filter_by_status(
    #[case] query: &str,
    #[case] expected: StatusCode,
    #[case] count: usize,
) {
    let t = test_app().await;
    t.add_expense(ExpenseStatusKind::Pending, 1).await;
    t.add_expense(ExpenseStatusKind::Pending, 2).await;
    t.add_expense(ExpenseStatusKind::Approved, 3).await;

    let (status, body) = send(
        &t.app,
        request(
            "GET",
            &format!("/api/v1/manager/employees/expenses/status?{query}"),
        ),
    )
    .await;

    assert_eq!(status, expected);
    if expected == StatusCode::OK {
        assert_eq!(body.as_array().unwrap().len(), count);
    }
}

#[tokio::test]
async fn test_update_status_via_query() {
    let t = test_app().await;
    let id = t.add_expense(ExpenseStatusKind::Pending, 1).await;

    let (status, body) = send(
        &t.app,
        request(
            "PATCH",
            &format!("/api/v1/manager/updateStatus?expenseId={id}&statusId=2"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Approved");
    assert!(body["approvedDate"].is_string());

    let (status, body) = send(
        &t.app,
        request(
            "PATCH",
            &format!("/api/v1/manager/updateStatus?expenseId={id}&statusId=3"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Rejected");
    assert!(body["approvedDate"].is_null());
}

#[tokio::test]
async fn test_update_status_via_path() {
    let t = test_app().await;
    let id = t.add_expense(ExpenseStatusKind::Pending, 1).await;

    let (status, body) = send(
        &t.app,
        request("PATCH", &format!("/api/v1/manager/expenses/{id}/status/2")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusId"], 2);
}

#[tokio::test]
async fn test_update_status_rejects_out_of_range() {
    let t = test_app().await;
    let id = t.add_expense(ExpenseStatusKind::Pending, 1).await;
    let before = t.store.find_expense(id).await.unwrap();

    let (status, body) = send(
        &t.app,
        request("PATCH", &format!("/api/v1/manager/expenses/{id}/status/4")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_status");
    assert_eq!(t.store.find_expense(id).await.unwrap(), before);
}

#[tokio::test]
async fn test_update_status_unknown_expense() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        request("PATCH", "/api/v1/manager/expenses/123456/status/2"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "expense_not_found");
}

#[tokio::test]
async fn test_validate_expense() {
    let t = test_app().await;
    let other_role = t.store.add_role("Contractor", true).await;

    let (_, package) = send(
        &t.app,
        post_json(
            "/api/v1/manager/category-package",
            &json!({
                "categoryId": t.category_id,
                "packageName": "Standard",
                "expenseLimit": 1000
            }),
        ),
    )
    .await;
    let (_, link) = send(
        &t.app,
        post_json(
            "/api/v1/manager/role-category-package",
            &json!({ "roleId": t.role_id, "categoryPackageId": package["id"] }),
        ),
    )
    .await;

    let cases = [
        (t.role_id, 900, true),
        (t.role_id, 1000, true),
        (t.role_id, 1100, false),
        (other_role.id, 500, false),
    ];
    for (role_id, amount, expected) in cases {
        let (status, body) = send(
            &t.app,
            post_json(
                "/api/v1/manager/employees/validateExpense",
                &json!({
                    "roleId": role_id,
                    "categoryPackageId": link["id"],
                    "expenseAmount": amount
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Bool(expected));
    }
}

#[tokio::test]
async fn test_create_package_validation() {
    let t = test_app().await;

    let (status, body) = send(
        &t.app,
        post_json(
            "/api/v1/manager/category-package",
            &json!({ "categoryId": t.category_id, "packageName": " ", "expenseLimit": 10 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_package");

    let (status, body) = send(
        &t.app,
        post_json(
            "/api/v1/manager/category-package",
            &json!({ "categoryId": 777_777, "packageName": "Gold", "expenseLimit": 10 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "category_not_found");

    let (status, body) = send(
        &t.app,
        post_json(
            "/api/v1/manager/role-category-package",
            &json!({ "roleId": t.role_id, "categoryPackageId": 777_777 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "category_package_not_found");
}

#[tokio::test]
async fn test_delete_employee() {
    let t = test_app().await;
    t.add_expense(ExpenseStatusKind::Pending, 1).await;

    let uri = format!("/api/v1/manager/employees/{}", t.employee_id);
    let (status, body) = send(&t.app, request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    assert!(t.store.list_expenses().await.unwrap().is_empty());

    let (status, _) = send(&t.app, request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
