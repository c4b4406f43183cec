use crate::e2e::helpers;

use helpers::assertions::{assert_activity_shape, assert_error_envelope, assert_success_envelope};
use helpers::fixtures::{course, enrollment, student};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_context::test_context;

fn seed_twelve(ctx: &TestContext) {
    ctx.catalog.set(
        "students",
        (0..4)
            .map(|i| student(&format!("s{i}"), "Student", &i.to_string(), i * 3))
            .collect(),
    );
    ctx.catalog.set(
        "courses",
        (0..4)
            .map(|i| course(&format!("c{i}"), &format!("Course {i}"), i * 3 + 1))
            .collect(),
    );
    ctx.catalog.set(
        "enrollments",
        (0..4)
            .map(|i| {
                let id = format!("e{i}");
                enrollment(&id, Some(("Student", "0")), Some("Course 0"), i * 3 + 2)
            })
            .collect(),
    );
}

fn ids(data: &Value) -> Vec<String> {
    data["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_catalog_totals(ctx: &TestContext) {
    ctx.catalog.set("students", (0..3).map(|i| student(&i.to_string(), "A", "B", i)).collect());
    ctx.catalog.set("courses", vec![course("c1", "Algebra", 1), course("c2", "Physics", 2)]);
    ctx.catalog.set("enrollments", vec![enrollment("e1", None, None, 1)]);

    let response = ctx.client.get("/api/dashboard/stats").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        assert_success_envelope(response.body()),
        &json!({
            "totalStudents": 3,
            "totalCourses": 2,
            "totalEnrollments": 1,
            "activeCourses": 2
        })
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_zero_stats_when_any_list_fails(ctx: &TestContext) {
    ctx.catalog.set("students", vec![student("s1", "Ada", "Lovelace", 1)]);
    ctx.catalog.fail("enrollments");

    let response = ctx.client.get("/api/dashboard/stats").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        assert_success_envelope(response.body()),
        &json!({
            "totalStudents": 0,
            "totalCourses": 0,
            "totalEnrollments": 0,
            "activeCourses": 0
        })
    );
    assert!(ctx.store.is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_page_merged_activities_newest_first(ctx: &TestContext) {
    seed_twelve(ctx);

    let response = ctx
        .client
        .get("/api/dashboard/activities?page=2")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let data = assert_success_envelope(response.body());
    assert_eq!(data["currentPage"], 2);
    assert_eq!(data["totalPages"], 3);
    assert_eq!(data["totalActivities"], 12);
    assert_eq!(data["hasNextPage"], true);
    assert_eq!(data["hasPreviousPage"], true);
    // Interleaved every hour: s0 c0 e0 s1 c1 | e1 s2 c2 e2 s3 | c3 e3
    assert_eq!(
        ids(data),
        vec!["enrollment_e1", "student_s2", "course_c2", "enrollment_e2", "student_s3"]
    );
    data["activities"]
        .as_array()
        .unwrap()
        .iter()
        .for_each(assert_activity_shape);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_describe_each_activity_type(ctx: &TestContext) {
    ctx.catalog.set("students", vec![student("s1", "Ada", "Lovelace", 1)]);
    ctx.catalog.set("courses", vec![course("c1", "Algebra", 2)]);
    ctx.catalog.set(
        "enrollments",
        vec![
            enrollment("e1", Some(("Ada", "Lovelace")), Some("Algebra"), 3),
            enrollment("e2", None, None, 4),
        ],
    );

    let response = ctx.client.get("/api/dashboard/activities").await.unwrap();

    let data = assert_success_envelope(response.body());
    let described: Vec<(&str, &str)> = data["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| (a["type"].as_str().unwrap(), a["description"].as_str().unwrap()))
        .collect();
    assert_eq!(
        described,
        vec![
            ("student_created", "New student added: Ada Lovelace"),
            ("course_created", "New course created: Algebra"),
            ("enrollment_created", "Student enrolled: Ada Lovelace - Algebra"),
            ("enrollment_created", "Student enrolled: Unknown student - Unknown course"),
        ]
    );
    assert_eq!(data["currentPage"], 1);
    assert_eq!(data["totalPages"], 1);
    assert_eq!(data["hasNextPage"], false);
    assert_eq!(data["hasPreviousPage"], false);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_placeholders_when_the_catalog_is_down(ctx: &TestContext) {
    ctx.catalog.fail("courses");

    let response = ctx
        .client
        .get("/api/dashboard/activities?page=1")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let data = assert_success_envelope(response.body());
    assert_eq!(data["totalActivities"], 15);
    assert_eq!(data["totalPages"], 3);
    assert_eq!(
        ids(data),
        vec!["fallback_1", "fallback_2", "fallback_3", "fallback_4", "fallback_5"]
    );
    let types: Vec<&str> = data["activities"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            "student_created",
            "course_created",
            "enrollment_created",
            "enrollment_deleted",
            "student_created"
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_out_of_range_pages_without_calling_the_catalog(ctx: &TestContext) {
    for path in [
        "/api/dashboard/activities?page=0",
        "/api/dashboard/activities?page=4",
        "/api/dashboard/activities?page=two",
    ] {
        let response = ctx.client.get(path).await.unwrap();
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_error_envelope(response.body(), "VALIDATION_ERROR");
    }

    assert_eq!(ctx.catalog.requests(), 0);
}
