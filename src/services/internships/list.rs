use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::InternshipService;
use crate::models::ApiResponse;
use crate::models::internships::requests::{InternshipListParams, InternshipListQuery};

pub async fn list_internships(
    service: &InternshipService,
    request: &HttpRequest,
    query: InternshipListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let list_query = InternshipListQuery::from(query);
    match storage.list_internships_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Internships retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response()),
    }
}
