//! 参与度 / 成绩报告聚合
//!
//! 每个学生的报告只需两次查询：一次取分配给该学生的任务（两种来源），
//! 一次取该学生在这些任务上的全部提交，然后在内存中按任务拼接。

use std::collections::{HashMap, HashSet};

use futures_util::{StreamExt, stream};
use tracing::{debug, warn};

use crate::config::ReportsConfig;
use crate::errors::{PortalError, Result};
use crate::models::registry::entities::Student;
use crate::models::reports::{
    entities::{InvolvementReport, InvolvementRow, ObtainedMarks},
    responses::{BatchInvolvementResponse, BatchReportEntry},
};
use crate::models::submissions::entities::Submission;
use crate::models::tasks::entities::Task;
use crate::storage::Storage;

/// 每个任务选出一条提交：submitted_at 最新者，相同时取 ID 较大者
fn latest_submissions(submissions: Vec<Submission>) -> HashMap<i64, Submission> {
    let mut latest: HashMap<i64, Submission> = HashMap::new();
    for submission in submissions {
        match latest.get(&submission.task_id) {
            Some(current)
                if (current.submitted_at, current.id)
                    >= (submission.submitted_at, submission.id) => {}
            _ => {
                latest.insert(submission.task_id, submission);
            }
        }
    }
    latest
}

/// 由任务与提交拼出报告，行顺序与 `tasks` 一致
pub fn assemble_report(
    internship_id: i64,
    student: &Student,
    tasks: &[Task],
    submissions: Vec<Submission>,
) -> InvolvementReport {
    let latest = latest_submissions(submissions);

    let rows: Vec<InvolvementRow> = tasks
        .iter()
        .map(|task| {
            let grade = latest.get(&task.id).and_then(|s| s.grade);
            InvolvementRow {
                task_id: task.id,
                task_title: task.title.clone(),
                origin: task.origin,
                total_marks: task.marks,
                obtained_marks: ObtainedMarks::from(grade),
            }
        })
        .collect();

    let mut total_marks = 0.0;
    let mut obtained_marks = 0.0;
    let mut weighted_score = 0.0;
    for (task, row) in tasks.iter().zip(&rows) {
        if let Some(grade) = row.obtained_marks.graded() {
            total_marks += task.marks;
            obtained_marks += grade;
            weighted_score += grade / task.marks * task.weightage;
        }
    }

    InvolvementReport {
        internship_id,
        student_id: student.id,
        student_name: student.name.clone(),
        rows,
        total_marks,
        obtained_marks,
        weighted_score,
    }
}

async fn ensure_internship(storage: &dyn Storage, internship_id: i64) -> Result<()> {
    match storage.get_internship_by_id(internship_id).await? {
        Some(_) => Ok(()),
        None => Err(PortalError::not_found(format!(
            "Internship {internship_id} not found"
        ))),
    }
}

// 实习已确认存在时的单个学生报告
async fn report_for_student(
    storage: &dyn Storage,
    internship_id: i64,
    student_id: i64,
) -> Result<InvolvementReport> {
    let student = storage
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| PortalError::not_found(format!("Student {student_id} not found")))?;

    let tasks = storage
        .list_tasks_for_student(internship_id, student_id)
        .await?;
    let task_ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    let submissions = storage
        .list_student_submissions(student_id, &task_ids)
        .await?;

    debug!(
        "Assembling report for student {} in internship {}: {} tasks, {} submissions",
        student_id,
        internship_id,
        tasks.len(),
        submissions.len()
    );

    Ok(assemble_report(internship_id, &student, &tasks, submissions))
}

/// 单个学生的报告，实习或学生不存在时返回 NotFound
pub async fn build_involvement_report(
    storage: &dyn Storage,
    internship_id: i64,
    student_id: i64,
) -> Result<InvolvementReport> {
    ensure_internship(storage, internship_id).await?;
    report_for_student(storage, internship_id, student_id).await
}

/// 批量报告
///
/// 各学生并发计算，结果按学生 ID 归并后按请求顺序输出（重复 ID 只保留首次出现）。
/// 单个学生失败时记为 `failed` 条目，不影响其他学生。
pub async fn build_involvement_reports(
    storage: &dyn Storage,
    internship_id: i64,
    student_ids: &[i64],
    limits: &ReportsConfig,
) -> Result<BatchInvolvementResponse> {
    if student_ids.is_empty() {
        return Err(PortalError::validation("student_ids must not be empty"));
    }

    let mut seen = HashSet::new();
    let ordered: Vec<i64> = student_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    // 上限按去重后的学生数计算
    if ordered.len() > limits.max_batch_students {
        return Err(PortalError::validation(format!(
            "At most {} students per batch report",
            limits.max_batch_students
        )));
    }

    ensure_internship(storage, internship_id).await?;

    let mut results: HashMap<i64, Result<InvolvementReport>> = stream::iter(ordered.clone())
        .map(move |student_id| async move {
            let result = report_for_student(storage, internship_id, student_id).await;
            (student_id, result)
        })
        .buffer_unordered(limits.fan_out_concurrency.max(1))
        .collect()
        .await;

    let mut entries = Vec::with_capacity(ordered.len());
    for student_id in ordered {
        let entry = match results.remove(&student_id) {
            Some(Ok(report)) => BatchReportEntry::Ok { student_id, report },
            Some(Err(e)) => {
                warn!(
                    "Report for student {} in internship {} failed: {}",
                    student_id, internship_id, e
                );
                BatchReportEntry::Failed {
                    student_id,
                    error_code: e.code().to_string(),
                    reason: e.message().to_string(),
                }
            }
            None => BatchReportEntry::Failed {
                student_id,
                error_code: PortalError::partial_aggregation("").code().to_string(),
                reason: "No result produced".to_string(),
            },
        };
        entries.push(entry);
    }

    let failed = entries.iter().filter(|e| e.is_failed()).count() as i64;
    let succeeded = entries.len() as i64 - failed;

    Ok(BatchInvolvementResponse {
        internship_id,
        succeeded,
        failed,
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tasks::{entities::TaskOrigin, requests::CreateTaskRequest};
    use crate::storage::sea_orm_storage::fixtures;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_750_000_000 + secs, 0).unwrap()
    }

    fn student() -> Student {
        Student {
            id: 7,
            department_id: 1,
            name: "Asha".to_string(),
            batch: "2022".to_string(),
            section: "A".to_string(),
            registration_number: "R-7".to_string(),
            did_internship: false,
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn task(id: i64, title: &str, origin: TaskOrigin, marks: f64, weightage: f64) -> Task {
        Task {
            id,
            internship_id: 1,
            origin,
            issued_by: 1,
            title: title.to_string(),
            description: String::new(),
            deadline: at(1000),
            marks,
            weightage,
            assigned_students: vec![7],
            created_at: at(id),
        }
    }

    fn submission(id: i64, task_id: i64, grade: Option<f64>, submitted: i64) -> Submission {
        Submission {
            id,
            task_id,
            student_id: 7,
            student_name: "Asha".to_string(),
            file_ref: format!("files/{id}.pdf"),
            grade,
            graded_by: grade.map(|_| 1),
            submitted_at: at(submitted),
            graded_at: None,
        }
    }

    #[test]
    fn test_assemble_mixed_origins_in_task_order() {
        let tasks = vec![
            task(1, "T1", TaskOrigin::Faculty, 50.0, 50.0),
            task(2, "T2", TaskOrigin::Faculty, 30.0, 30.0),
            task(3, "T3", TaskOrigin::Industry, 20.0, 20.0),
        ];
        let submissions = vec![
            submission(10, 2, Some(25.0), 5),
            submission(11, 1, Some(40.0), 6),
        ];

        let report = assemble_report(1, &student(), &tasks, submissions);

        let rows: Vec<(&str, f64, ObtainedMarks)> = report
            .rows
            .iter()
            .map(|r| (r.task_title.as_str(), r.total_marks, r.obtained_marks))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("T1", 50.0, ObtainedMarks::Graded(40.0)),
                ("T2", 30.0, ObtainedMarks::Graded(25.0)),
                ("T3", 20.0, ObtainedMarks::NotSubmitted),
            ]
        );
        assert_eq!(report.total_marks, 80.0);
        assert_eq!(report.obtained_marks, 65.0);
        assert!((report.weighted_score - 65.0).abs() < 1e-9);
        assert_eq!(report.student_name, "Asha");
    }

    #[test]
    fn test_duplicate_rows_pick_latest_submission() {
        let tasks = vec![task(1, "T1", TaskOrigin::Faculty, 10.0, 100.0)];
        let submissions = vec![
            submission(1, 1, Some(3.0), 10),
            submission(2, 1, Some(9.0), 30),
            submission(3, 1, Some(5.0), 20),
        ];

        let report = assemble_report(1, &student(), &tasks, submissions);
        assert_eq!(report.rows[0].obtained_marks, ObtainedMarks::Graded(9.0));
    }

    #[test]
    fn test_duplicate_rows_tie_breaks_on_id() {
        let tasks = vec![task(1, "T1", TaskOrigin::Faculty, 10.0, 100.0)];
        let submissions = vec![
            submission(8, 1, Some(4.0), 10),
            submission(5, 1, Some(6.0), 10),
        ];

        let report = assemble_report(1, &student(), &tasks, submissions.clone());
        assert_eq!(report.rows[0].obtained_marks, ObtainedMarks::Graded(4.0));

        // 输入顺序不影响结果
        let reversed: Vec<Submission> = submissions.into_iter().rev().collect();
        let report = assemble_report(1, &student(), &tasks, reversed);
        assert_eq!(report.rows[0].obtained_marks, ObtainedMarks::Graded(4.0));
    }

    #[test]
    fn test_ungraded_submission_reports_not_submitted() {
        let tasks = vec![task(1, "T1", TaskOrigin::Industry, 10.0, 50.0)];
        let report = assemble_report(1, &student(), &tasks, vec![submission(1, 1, None, 1)]);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].obtained_marks, ObtainedMarks::NotSubmitted);
        assert_eq!(report.total_marks, 0.0);
    }

    fn task_request(internship_id: i64, title: &str, marks: f64, students: Vec<i64>) -> CreateTaskRequest {
        CreateTaskRequest {
            internship_id,
            title: Some(title.to_string()),
            description: Some(format!("{title} description")),
            deadline: Some(at(86_400)),
            marks,
            weightage: 10.0,
            assigned_students: students,
        }
    }

    #[tokio::test]
    async fn test_scenario_report_across_both_origins() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        let s = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let other = fixtures::student(&storage, dept.id, "R2", "2022", "A").await;
        let internship = fixtures::internship(&storage).await;
        storage.assign_student(internship.id, s.id).await.unwrap();
        storage.assign_student(internship.id, other.id).await.unwrap();

        let t1 = storage
            .create_task(TaskOrigin::Faculty, 1, task_request(internship.id, "T1", 50.0, vec![s.id]))
            .await
            .unwrap()
            .task;
        let t2 = storage
            .create_task(TaskOrigin::Faculty, 1, task_request(internship.id, "T2", 30.0, vec![s.id]))
            .await
            .unwrap()
            .task;
        storage
            .create_task(TaskOrigin::Industry, 2, task_request(internship.id, "T3", 20.0, vec![s.id]))
            .await
            .unwrap();
        // 未分配给 s 的任务不出现在报告中
        storage
            .create_task(
                TaskOrigin::Industry,
                2,
                task_request(internship.id, "Other", 5.0, vec![other.id]),
            )
            .await
            .unwrap();

        let sub1 = storage
            .upsert_submission(t1.id, s.id, &s.name, "files/t1.pdf")
            .await
            .unwrap();
        storage.grade_submission(sub1.id, 40.0, 1).await.unwrap();
        let sub2 = storage
            .upsert_submission(t2.id, s.id, &s.name, "files/t2.pdf")
            .await
            .unwrap();
        storage.grade_submission(sub2.id, 25.0, 1).await.unwrap();

        let report = build_involvement_report(&storage, internship.id, s.id)
            .await
            .unwrap();
        let rows: Vec<(&str, f64, ObtainedMarks)> = report
            .rows
            .iter()
            .map(|r| (r.task_title.as_str(), r.total_marks, r.obtained_marks))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("T1", 50.0, ObtainedMarks::Graded(40.0)),
                ("T2", 30.0, ObtainedMarks::Graded(25.0)),
                ("T3", 20.0, ObtainedMarks::NotSubmitted),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_student_or_internship_is_not_found() {
        let storage = fixtures::storage().await;
        let internship = fixtures::internship(&storage).await;

        let err = build_involvement_report(&storage, internship.id, 9999)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));

        let err = build_involvement_report(&storage, 9999, 1).await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order_and_marks_failures() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "CS").await;
        let s1 = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let s2 = fixtures::student(&storage, dept.id, "R2", "2022", "A").await;
        let internship = fixtures::internship(&storage).await;
        storage.assign_student(internship.id, s1.id).await.unwrap();
        storage.assign_student(internship.id, s2.id).await.unwrap();
        storage
            .create_task(
                TaskOrigin::Faculty,
                1,
                task_request(internship.id, "T1", 10.0, vec![s1.id, s2.id]),
            )
            .await
            .unwrap();

        let limits = ReportsConfig {
            max_batch_students: 10,
            fan_out_concurrency: 3,
        };
        let response = build_involvement_reports(
            &storage,
            internship.id,
            &[s2.id, 4242, s1.id, s2.id],
            &limits,
        )
        .await
        .unwrap();

        let order: Vec<i64> = response.entries.iter().map(|e| e.student_id()).collect();
        assert_eq!(order, vec![s2.id, 4242, s1.id]);
        assert_eq!(response.succeeded, 2);
        assert_eq!(response.failed, 1);
        assert!(response.is_partial());

        match &response.entries[1] {
            BatchReportEntry::Failed {
                error_code, reason, ..
            } => {
                assert_eq!(error_code, "E005");
                assert!(reason.contains("4242"));
            }
            other => panic!("expected failure entry, got {other:?}"),
        }
        match &response.entries[0] {
            BatchReportEntry::Ok { report, .. } => assert_eq!(report.rows.len(), 1),
            other => panic!("expected report entry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_batch_validates_size_and_internship() {
        let storage = fixtures::storage().await;
        let internship = fixtures::internship(&storage).await;
        let limits = ReportsConfig {
            max_batch_students: 2,
            fan_out_concurrency: 2,
        };

        let err = build_involvement_reports(&storage, internship.id, &[], &limits)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));

        let err = build_involvement_reports(&storage, internship.id, &[1, 2, 3], &limits)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));

        let dept = fixtures::department(&storage, "CS").await;
        let student = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        let response = build_involvement_reports(
            &storage,
            internship.id,
            &[student.id, student.id, student.id],
            &limits,
        )
        .await
        .unwrap();
        assert_eq!(response.entries.len(), 1);
        assert_eq!(response.entries[0].student_id(), student.id);

        let err = build_involvement_reports(&storage, 777, &[1], &limits)
            .await
            .unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
