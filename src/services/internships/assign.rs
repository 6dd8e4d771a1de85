use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::InternshipService;
use crate::models::internships::{
    entities::Internship,
    requests::{AssignFacultyRequest, AssignStudentRequest},
    responses::{AssignmentResponse, UnassignStudentResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 读取实习，不存在时返回 404 响应
async fn load_internship(
    storage: &Arc<dyn Storage>,
    internship_id: i64,
) -> Result<Internship, HttpResponse> {
    match storage.get_internship_by_id(internship_id).await {
        Ok(Some(internship)) => Ok(internship),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::InternshipNotFound,
            "Internship not found",
        ))),
        Err(e) => Err(e.to_response()),
    }
}

pub async fn assign_student(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
    body: AssignStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_internship(&storage, internship_id).await {
        return Ok(resp);
    }
    match storage.get_student_by_id(body.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    }

    let newly_assigned = match storage.assign_student(internship_id, body.student_id).await {
        Ok(created) => created,
        Err(e) => return Ok(e.to_response()),
    };
    if newly_assigned {
        info!(
            "Student {} assigned to internship {}",
            body.student_id, internship_id
        );
    }

    match load_internship(&storage, internship_id).await {
        Ok(internship) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentResponse {
                internship,
                newly_assigned,
            },
            "Student assigned successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn unassign_student(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_internship(&storage, internship_id).await {
        return Ok(resp);
    }

    let removed_task_links = match storage.unassign_student(internship_id, student_id).await {
        Ok(Some(removed)) => removed,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Student is not assigned to this internship",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    };
    info!(
        "Student {} unassigned from internship {}, {} task links removed",
        student_id, internship_id, removed_task_links
    );

    match load_internship(&storage, internship_id).await {
        Ok(internship) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnassignStudentResponse {
                internship,
                removed_task_links,
            },
            "Student unassigned successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn assign_faculty(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
    body: AssignFacultyRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_internship(&storage, internship_id).await {
        return Ok(resp);
    }
    match storage.get_faculty_by_id(body.faculty_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FacultyNotFound,
                "Faculty not found",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    }

    let newly_assigned = match storage.assign_faculty(internship_id, body.faculty_id).await {
        Ok(created) => created,
        Err(e) => return Ok(e.to_response()),
    };
    if newly_assigned {
        info!(
            "Faculty {} assigned to internship {}",
            body.faculty_id, internship_id
        );
    }

    match load_internship(&storage, internship_id).await {
        Ok(internship) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AssignmentResponse {
                internship,
                newly_assigned,
            },
            "Faculty assigned successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}

pub async fn unassign_faculty(
    service: &InternshipService,
    request: &HttpRequest,
    internship_id: i64,
    faculty_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = load_internship(&storage, internship_id).await {
        return Ok(resp);
    }

    match storage.unassign_faculty(internship_id, faculty_id).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::NotFound,
                "Faculty is not assigned to this internship",
            )));
        }
        Err(e) => return Ok(e.to_response()),
    }
    info!(
        "Faculty {} unassigned from internship {}",
        faculty_id, internship_id
    );

    match load_internship(&storage, internship_id).await {
        Ok(internship) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            internship,
            "Faculty unassigned successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
