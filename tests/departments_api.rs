use axum::http::{Method, StatusCode};
use ems_tests::TestContext;
use serde_json::json;

#[tokio::test]
async fn create_department_and_reject_duplicate_name() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/departments",
            Some(json!({"name": "QA", "creationDate": "2023-01-01"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_i64());
    assert_eq!(body["name"], "QA");
    assert_eq!(body["creationDate"], "2023-01-01");
    assert_eq!(body["departmentHead"], serde_json::Value::Null);
    assert!(body.get("employees").is_none());

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/departments",
            Some(json!({"name": "QA", "creationDate": "2024-05-05"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");
    assert_eq!(body["message"], "Department with name 'QA' already exists.");

    // A fresh name still works.
    let (status, _) = ctx
        .request(
            Method::POST,
            "/api/departments",
            Some(json!({"name": "Platform", "creationDate": "2024-05-05"})),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    ctx.cleanup().await;
}

#[tokio::test]
async fn create_department_with_unknown_head_is_not_found() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let (status, body) = ctx
        .request(
            Method::POST,
            "/api/departments",
            Some(json!({
                "name": "Support",
                "creationDate": "2023-01-01",
                "departmentHeadId": 9999,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Employee not found with ID: 9999");

    ctx.cleanup().await;
}

#[tokio::test]
async fn expansion_embeds_roster_one_level_deep() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let dept_id = ctx.create_department("Engineering").await;
    let first = ctx.create_employee("Grace Hopper", Some(dept_id)).await;
    let second = ctx.create_employee("Alan Kay", Some(dept_id)).await;

    let (status, body) = ctx
        .request(Method::GET, &format!("/api/departments/{dept_id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("employees").is_none());

    let (status, body) = ctx
        .request(
            Method::GET,
            &format!("/api/departments/{dept_id}?expand=true"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let roster = body["employees"].as_array().expect("expanded roster");
    assert_eq!(roster.len(), 2);
    let ids: Vec<i64> = roster.iter().map(|e| e["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![first, second]);
    // Members carry the lookup projection only, never a nested roster.
    for member in roster {
        assert_eq!(member["department"], json!({"id": dept_id, "name": "Engineering"}));
    }

    ctx.cleanup().await;
}

#[tokio::test]
async fn update_replaces_name_and_date_and_clears_omitted_head() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let dept_id = ctx.create_department("Research").await;
    let head_id = ctx.create_employee("Head Person", Some(dept_id)).await;

    let (status, body) = ctx
        .request(
            Method::PUT,
            &format!("/api/departments/{dept_id}"),
            Some(json!({
                "name": "Research",
                "creationDate": "2023-01-01",
                "departmentHeadId": head_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departmentHead"]["id"], head_id);

    // Omitting the head id clears it entirely.
    let (status, body) = ctx
        .request(
            Method::PUT,
            &format!("/api/departments/{dept_id}"),
            Some(json!({"name": "R&D", "creationDate": "2020-02-02"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "R&D");
    assert_eq!(body["creationDate"], "2020-02-02");
    assert_eq!(body["departmentHead"], serde_json::Value::Null);

    // Renaming onto another department's name is rejected.
    ctx.create_department("Design").await;
    let (status, body) = ctx
        .request(
            Method::PUT,
            &format!("/api/departments/{dept_id}"),
            Some(json!({"name": "Design", "creationDate": "2020-02-02"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION");

    // Keeping its own name is not a duplicate.
    let (status, _) = ctx
        .request(
            Method::PUT,
            &format!("/api/departments/{dept_id}"),
            Some(json!({"name": "R&D", "creationDate": "2020-02-02"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    ctx.cleanup().await;
}

#[tokio::test]
async fn delete_requires_an_empty_department() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    let staffed = ctx.create_department("Staffed").await;
    ctx.create_employee("Worker", Some(staffed)).await;
    let empty = ctx.create_department("Empty").await;

    let (status, body) = ctx
        .request(Method::DELETE, &format!("/api/departments/{empty}"), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);
    let (status, _) = ctx
        .request(Method::GET, &format!("/api/departments/{empty}"), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx
        .request(Method::DELETE, &format!("/api/departments/{staffed}"), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Cannot delete department as there are 1 employees assigned to it."
    );
    // The department survives a rejected delete.
    let (status, _) = ctx
        .request(Method::GET, &format!("/api/departments/{staffed}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = ctx
        .request(Method::DELETE, "/api/departments/424242", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    ctx.cleanup().await;
}

#[tokio::test]
async fn listing_pages_through_departments() {
    let Some(ctx) = TestContext::new().await else {
        return;
    };

    for name in ["Alpha", "Beta", "Gamma"] {
        ctx.create_department(name).await;
    }

    let (status, body) = ctx
        .request(Method::GET, "/api/departments?size=2", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"], 0);
    assert_eq!(body["size"], 2);
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["first"], true);
    assert_eq!(body["last"], false);

    let (status, body) = ctx
        .request(Method::GET, "/api/departments?size=2&page=1", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
    assert_eq!(body["first"], false);
    assert_eq!(body["last"], true);

    ctx.cleanup().await;
}
