pub mod internships;

pub mod tasks;

pub mod submissions;

pub mod registry;

pub mod system;

#[cfg(test)]
mod tests;

pub use internships::configure_internship_routes;
pub use registry::configure_registry_routes;
pub use submissions::configure_submission_routes;
pub use system::configure_system_routes;
pub use tasks::configure_task_routes;

use actix_web::web;

/// 注册全部业务路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_internship_routes)
        .configure(configure_task_routes)
        .configure(configure_submission_routes)
        .configure(configure_registry_routes)
        .configure(configure_system_routes);
}
