pub mod involvement;
pub mod report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::config::{AppConfig, ReportsConfig};
use crate::models::reports::requests::BatchReportRequest;
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    /// 批量报告的限制，未注册到 app data 时回退到全局配置
    pub(crate) fn get_limits(&self, request: &HttpRequest) -> ReportsConfig {
        match request.app_data::<web::Data<ReportsConfig>>() {
            Some(limits) => limits.get_ref().clone(),
            None => AppConfig::get().reports.clone(),
        }
    }

    // 单个学生的参与度报告
    pub async fn get_report(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        report::get_report(self, request, internship_id, student_id).await
    }

    // 批量报告
    pub async fn batch_reports(
        &self,
        request: &HttpRequest,
        internship_id: i64,
        body: BatchReportRequest,
    ) -> ActixResult<HttpResponse> {
        report::batch_reports(self, request, internship_id, body).await
    }
}
