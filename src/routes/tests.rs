use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};

use super::configure_api_routes;
use crate::config::ReportsConfig;
use crate::middlewares::require_actor::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::{SeaOrmStorage, fixtures};
use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

macro_rules! init_app {
    ($storage:expr) => {{
        let storage: Arc<dyn Storage> = $storage.clone();
        test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(ReportsConfig {
                    max_batch_students: 5,
                    fan_out_concurrency: 2,
                }))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::PathConfig::default().error_handler(path_error_handler))
                .configure(configure_api_routes),
        )
        .await
    }};
}

fn as_actor(req: test::TestRequest, id: i64, role: &str) -> test::TestRequest {
    req.insert_header((ACTOR_ID_HEADER, id.to_string()))
        .insert_header((ACTOR_ROLE_HEADER, role.to_string()))
}

async fn storage() -> Arc<SeaOrmStorage> {
    Arc::new(fixtures::storage().await)
}

#[actix_web::test]
async fn test_missing_actor_is_unauthorized() {
    let storage = storage().await;
    let app = init_app!(storage);

    let req = test::TestRequest::get().uri("/api/v1/internships").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1001);
}

#[actix_web::test]
async fn test_wrong_role_is_forbidden() {
    let storage = storage().await;
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::post(), 3, "student")
        .uri("/api/v1/internships")
        .set_json(json!({
            "host_institution": "Acme",
            "category": "Engineering",
            "start_date": "2025-06-01",
            "end_date": "2025-08-31"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_invalid_path_id_is_bad_request() {
    let storage = storage().await;
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::get(), 1, "admin")
        .uri("/api/v1/internships/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_toggle_approval_twice_restores_state() {
    let storage = storage().await;
    let internship = fixtures::internship(&storage).await;
    let app = init_app!(storage);
    let uri = format!("/api/v1/internships/{}/approval", internship.id);

    let req = as_actor(test::TestRequest::put(), 40, "enterprise_cell")
        .uri(&uri)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_approved"], true);
    assert_eq!(body["data"]["approval_state"], "approved");

    let req = as_actor(test::TestRequest::put(), 40, "enterprise_cell")
        .uri(&uri)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["is_approved"], false);
    assert_eq!(body["data"]["version"], 2);

    // 教师不能审批
    let req = as_actor(test::TestRequest::put(), 41, "faculty")
        .uri(&uri)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = as_actor(test::TestRequest::get(), 40, "enterprise_cell")
        .uri(&format!("{uri}/history"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["from_state"], "pending");
    assert_eq!(items[0]["to_state"], "approved");
    assert_eq!(items[1]["actor_id"], 40);
}

#[actix_web::test]
async fn test_report_end_to_end_across_origins() {
    let storage = storage().await;
    let dept = fixtures::department(&storage, "CS").await;
    let student = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
    let faculty = fixtures::faculty(&storage, dept.id, "f@uni.edu").await;
    let app = init_app!(storage);

    // 创建实习
    let req = as_actor(test::TestRequest::post(), 40, "enterprise_cell")
        .uri("/api/v1/internships")
        .set_json(json!({
            "host_institution": "Acme Robotics",
            "category": "Engineering",
            "start_date": "2025-06-01",
            "end_date": "2025-08-31"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let internship_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["created_by"], 40);

    // 分配学生（重复分配幂等）
    for expected in [true, false] {
        let req = as_actor(test::TestRequest::put(), 40, "enterprise_cell")
            .uri(&format!("/api/v1/internships/{internship_id}/students"))
            .set_json(json!({ "student_id": student.id }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["newly_assigned"], expected);
        assert_eq!(body["data"]["internship"]["assigned_students"], json!([student.id]));
    }

    let req = as_actor(test::TestRequest::put(), 40, "enterprise_cell")
        .uri(&format!("/api/v1/internships/{internship_id}/faculty"))
        .set_json(json!({ "faculty_id": faculty.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 两种来源的任务
    let mut task_ids = Vec::new();
    for (origin, role, actor_id, title, marks) in [
        ("faculty", "faculty", faculty.id, "T1", 50.0),
        ("faculty", "faculty", faculty.id, "T2", 30.0),
        ("industry", "industry_supervisor", 77, "T3", 20.0),
    ] {
        let req = as_actor(test::TestRequest::post(), actor_id, role)
            .uri(&format!("/api/v1/tasks/{origin}"))
            .set_json(json!({
                "internship_id": internship_id,
                "title": title,
                "description": format!("{title} description"),
                "deadline": "2026-12-01T12:00:00Z",
                "marks": marks,
                "weightage": marks,
                "assigned_students": [student.id, 9999]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["task"]["assigned_students"], json!([student.id]));
        assert_eq!(body["data"]["rejected_students"], json!([9999]));
        task_ids.push((origin, body["data"]["task"]["id"].as_i64().unwrap()));
    }

    // 学生提交 T1、T2，教师批改
    for ((origin, task_id), grade) in task_ids.iter().take(2).zip([40.0, 25.0]) {
        let req = as_actor(test::TestRequest::post(), student.id, "student")
            .uri(&format!("/api/v1/tasks/{origin}/{task_id}/submissions"))
            .set_json(json!({ "file_ref": format!("files/{task_id}.pdf") }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let submission_id = body["data"]["id"].as_i64().unwrap();

        let req = as_actor(test::TestRequest::put(), faculty.id, "faculty")
            .uri(&format!("/api/v1/submissions/{submission_id}/grade"))
            .set_json(json!({ "grade": grade }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["grade"], grade);
        assert_eq!(body["data"]["graded_by"], faculty.id);
    }

    let req = as_actor(test::TestRequest::get(), student.id, "student")
        .uri(&format!(
            "/api/v1/internships/{internship_id}/reports/{}",
            student.id
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body["data"]["rows"].as_array().unwrap();
    let summary: Vec<(Value, Value, Value)> = rows
        .iter()
        .map(|r| {
            (
                r["task_title"].clone(),
                r["total_marks"].clone(),
                r["obtained_marks"].clone(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (json!("T1"), json!(50.0), json!(40.0)),
            (json!("T2"), json!(30.0), json!(25.0)),
            (json!("T3"), json!(20.0), json!("Not Submitted")),
        ]
    );
    assert_eq!(body["data"]["obtained_marks"], 65.0);

    // 学生不能查看他人的报告
    let req = as_actor(test::TestRequest::get(), student.id + 1, "student")
        .uri(&format!(
            "/api/v1/internships/{internship_id}/reports/{}",
            student.id
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 批量报告：一个未知学生，部分失败
    let req = as_actor(test::TestRequest::post(), faculty.id, "faculty")
        .uri(&format!("/api/v1/internships/{internship_id}/reports"))
        .set_json(json!({ "student_ids": [4242, student.id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4000);
    assert_eq!(body["data"]["failed"], 1);
    assert_eq!(body["data"]["entries"][0]["status"], "failed");
    assert_eq!(body["data"]["entries"][1]["status"], "ok");
    assert_eq!(body["data"]["entries"][1]["student_id"], student.id);

    // 取消分配后任务中也不再有该学生
    let req = as_actor(test::TestRequest::delete(), 40, "enterprise_cell")
        .uri(&format!(
            "/api/v1/internships/{internship_id}/students/{}",
            student.id
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["removed_task_links"], 3);
    assert_eq!(body["data"]["internship"]["assigned_students"], json!([]));
}

#[actix_web::test]
async fn test_grade_above_marks_is_rejected() {
    let storage = storage().await;
    let dept = fixtures::department(&storage, "CS").await;
    let student = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
    let internship = fixtures::internship(&storage).await;
    storage.assign_student(internship.id, student.id).await.unwrap();
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::post(), 5, "faculty")
        .uri("/api/v1/tasks/faculty")
        .set_json(json!({
            "internship_id": internship.id,
            "title": "Weekly log",
            "description": "Submit the weekly log",
            "deadline": "2026-12-01T12:00:00Z",
            "marks": 50.0,
            "weightage": 10.0,
            "assigned_students": [student.id]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let task_id = body["data"]["task"]["id"].as_i64().unwrap();

    let req = as_actor(test::TestRequest::post(), student.id, "student")
        .uri(&format!("/api/v1/tasks/faculty/{task_id}/submissions"))
        .set_json(json!({ "file_ref": "files/log.pdf" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let submission_id = body["data"]["id"].as_i64().unwrap();

    let req = as_actor(test::TestRequest::put(), 5, "faculty")
        .uri(&format!("/api/v1/submissions/{submission_id}/grade"))
        .set_json(json!({ "grade": 60.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1022);

    // 企业导师不能批改校内任务
    let req = as_actor(test::TestRequest::put(), 77, "industry_supervisor")
        .uri(&format!("/api/v1/submissions/{submission_id}/grade"))
        .set_json(json!({ "grade": 10.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let submission = storage.get_submission_by_id(submission_id).await.unwrap().unwrap();
    assert_eq!(submission.grade, None);
}

#[actix_web::test]
async fn test_submit_by_student_outside_task_is_rejected() {
    let storage = storage().await;
    let dept = fixtures::department(&storage, "CS").await;
    let s1 = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
    let s2 = fixtures::student(&storage, dept.id, "R2", "2022", "A").await;
    let internship = fixtures::internship(&storage).await;
    storage.assign_student(internship.id, s1.id).await.unwrap();
    storage.assign_student(internship.id, s2.id).await.unwrap();
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::post(), 5, "faculty")
        .uri("/api/v1/tasks/faculty")
        .set_json(json!({
            "internship_id": internship.id,
            "title": "Weekly log",
            "description": "Submit the weekly log",
            "deadline": "2026-12-01T12:00:00Z",
            "marks": 20.0,
            "weightage": 10.0,
            "assigned_students": [s1.id]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let task_id = body["data"]["task"]["id"].as_i64().unwrap();

    // s2 在实习中，但不在该任务的分配名单里
    let req = as_actor(test::TestRequest::post(), s2.id, "student")
        .uri(&format!("/api/v1/tasks/faculty/{task_id}/submissions"))
        .set_json(json!({ "file_ref": "files/log.pdf" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1022);

    assert!(storage.list_task_submissions(task_id).await.unwrap().is_empty());
    assert!(
        storage
            .list_student_submissions(s2.id, &[task_id])
            .await
            .unwrap()
            .is_empty()
    );
}

#[actix_web::test]
async fn test_task_origin_must_match_role_and_path() {
    let storage = storage().await;
    let internship = fixtures::internship(&storage).await;
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::post(), 5, "faculty")
        .uri("/api/v1/tasks/industry")
        .set_json(json!({
            "internship_id": internship.id,
            "title": "Site visit",
            "description": "Visit the plant",
            "deadline": "2026-12-01T12:00:00Z",
            "marks": 10.0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3001);

    let req = as_actor(test::TestRequest::post(), 5, "faculty")
        .uri("/api/v1/tasks/faculty")
        .set_json(json!({
            "internship_id": internship.id,
            "title": "Site visit",
            "description": "Visit the plant",
            "deadline": "2026-12-01T12:00:00Z",
            "marks": 10.0
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let task_id = body["data"]["task"]["id"].as_i64().unwrap();

    // 从另一来源的路径读取视为不存在
    let req = as_actor(test::TestRequest::get(), 5, "faculty")
        .uri(&format!("/api/v1/tasks/industry/{task_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = as_actor(test::TestRequest::get(), 5, "faculty")
        .uri(&format!(
            "/api/v1/tasks/faculty?internship_id={}",
            internship.id
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

    let req = as_actor(test::TestRequest::get(), 5, "faculty")
        .uri("/api/v1/tasks/internal?internship_id=1")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_department_batches_rollup() {
    let storage = storage().await;
    let dept = fixtures::department(&storage, "CS").await;
    let s1 = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
    fixtures::student(&storage, dept.id, "R2", "2022", "B").await;
    fixtures::student(&storage, dept.id, "R3", "2023", "A").await;
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::put(), 40, "enterprise_cell")
        .uri(&format!("/api/v1/students/{}/completion", s1.id))
        .set_json(json!({ "did_internship": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = as_actor(test::TestRequest::get(), 40, "enterprise_cell")
        .uri(&format!("/api/v1/departments/{}/batches", dept.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["data"]["batches"],
        json!([
            {"batch": "2022", "total": 2, "did_internship": 1, "missing_internship": 1, "total_sections": 2},
            {"batch": "2023", "total": 1, "did_internship": 0, "missing_internship": 1, "total_sections": 1}
        ])
    );

    let req = as_actor(test::TestRequest::get(), 9, "student")
        .uri(&format!("/api/v1/departments/{}/batches", dept.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = as_actor(test::TestRequest::get(), 40, "enterprise_cell")
        .uri("/api/v1/departments/999/batches")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_list_internships_with_filters() {
    let storage = storage().await;
    let first = fixtures::internship(&storage).await;
    fixtures::internship(&storage).await;
    let app = init_app!(storage);

    let req = as_actor(test::TestRequest::put(), 40, "enterprise_cell")
        .uri(&format!("/api/v1/internships/{}/approval", first.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = as_actor(test::TestRequest::get(), 3, "student")
        .uri("/api/v1/internships?approved=true&search=acme&page=1&size=10")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], first.id);
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let req = as_actor(test::TestRequest::get(), 3, "student")
        .uri("/api/v1/internships?approved=false")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
}
