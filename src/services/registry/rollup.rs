//! 院系批次统计
//!
//! 每次调用都从学生档案重新计算，不做缓存。

use std::collections::{BTreeMap, HashSet};

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RegistryService;
use crate::errors::{PortalError, Result};
use crate::models::registry::{
    entities::Student,
    responses::{BatchSummary, DepartmentBatchesResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

#[derive(Default)]
struct BatchTally<'a> {
    total: i64,
    did_internship: i64,
    sections: HashSet<&'a str>,
}

/// 按批次分组统计，批次升序
pub fn summarize(students: &[Student]) -> Vec<BatchSummary> {
    let mut tallies: BTreeMap<&str, BatchTally> = BTreeMap::new();
    for student in students {
        let tally = tallies.entry(student.batch.as_str()).or_default();
        tally.total += 1;
        if student.did_internship {
            tally.did_internship += 1;
        }
        tally.sections.insert(student.section.as_str());
    }

    tallies
        .into_iter()
        .map(|(batch, tally)| BatchSummary {
            batch: batch.to_string(),
            total: tally.total,
            did_internship: tally.did_internship,
            missing_internship: tally.total - tally.did_internship,
            total_sections: tally.sections.len() as i64,
        })
        .collect()
}

pub async fn build_department_batches(
    storage: &dyn Storage,
    department_id: i64,
) -> Result<DepartmentBatchesResponse> {
    if storage.get_department_by_id(department_id).await?.is_none() {
        return Err(PortalError::not_found(format!(
            "Department {department_id} not found"
        )));
    }

    let students = storage.list_students_by_department(department_id).await?;
    Ok(DepartmentBatchesResponse {
        department_id,
        batches: summarize(&students),
    })
}

pub async fn summarize_batches(
    service: &RegistryService,
    request: &HttpRequest,
    department_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match build_department_batches(storage.as_ref(), department_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Batch summary generated successfully",
        ))),
        Err(PortalError::NotFound(msg)) => Ok(HttpResponse::NotFound()
            .json(ApiResponse::error_empty(ErrorCode::DepartmentNotFound, msg))),
        Err(e) => Ok(e.to_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::fixtures;

    #[test]
    fn test_summarize_groups_by_batch() {
        let now = chrono::Utc::now();
        let make = |id: i64, batch: &str, section: &str, did: bool| Student {
            id,
            department_id: 1,
            name: format!("S{id}"),
            batch: batch.to_string(),
            section: section.to_string(),
            registration_number: format!("R{id}"),
            did_internship: did,
            created_at: now,
            updated_at: now,
        };
        let students = vec![
            make(1, "2023", "A", true),
            make(2, "2022", "A", true),
            make(3, "2022", "B", false),
            make(4, "2022", "A", true),
        ];

        let summary = summarize(&students);
        assert_eq!(
            summary,
            vec![
                BatchSummary {
                    batch: "2022".to_string(),
                    total: 3,
                    did_internship: 2,
                    missing_internship: 1,
                    total_sections: 2,
                },
                BatchSummary {
                    batch: "2023".to_string(),
                    total: 1,
                    did_internship: 1,
                    missing_internship: 0,
                    total_sections: 1,
                },
            ]
        );
    }

    #[test]
    fn test_summarize_empty_department() {
        assert!(summarize(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_rollup_reflects_completion_flag() {
        let storage = fixtures::storage().await;
        let dept = fixtures::department(&storage, "ME").await;
        let other = fixtures::department(&storage, "EE").await;
        let s1 = fixtures::student(&storage, dept.id, "R1", "2022", "A").await;
        fixtures::student(&storage, dept.id, "R2", "2022", "B").await;
        fixtures::student(&storage, other.id, "R3", "2022", "A").await;

        storage
            .set_student_internship_completion(s1.id, true)
            .await
            .unwrap();

        let response = build_department_batches(&storage, dept.id).await.unwrap();
        assert_eq!(response.batches.len(), 1);
        let batch = &response.batches[0];
        assert_eq!(batch.total, 2);
        assert_eq!(batch.did_internship, 1);
        assert_eq!(batch.missing_internship, 1);
        assert_eq!(batch.total_sections, 2);

        let err = build_department_batches(&storage, 9999).await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
    }
}
