/*!
 * 调用方身份中间件
 *
 * 认证由上游网关完成，网关在请求头中写入调用方身份：
 *
 * - `X-Actor-Id`: 调用方 ID（学生角色即学生 ID，教师角色即教师 ID）
 * - `X-Actor-Role`: `student` / `faculty` / `industry_supervisor` / `enterprise_cell` / `admin`
 *
 * 中间件解析这两个请求头并把 [`Actor`] 放入请求扩展，缺失或非法时返回 401。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireActor;
 *
 * App::new().service(
 *     web::scope("/api/v1/internships")
 *         .wrap(RequireActor)
 *         .route("", web::get().to(list_internships)),
 * );
 *
 * async fn handler(req: HttpRequest) -> Result<HttpResponse> {
 *     let actor = RequireActor::extract_actor(&req);
 *     // ...
 * }
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::HeaderMap,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use super::create_error_response;
use crate::models::{
    ErrorCode,
    actors::entities::{Actor, ActorRole},
};

pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";

#[derive(Clone)]
pub struct RequireActor;

// 辅助函数：从请求头解析调用方身份
fn parse_actor(headers: &HeaderMap) -> Result<Actor, String> {
    let id = headers
        .get(ACTOR_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {ACTOR_ID_HEADER} header"))?
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid {ACTOR_ID_HEADER} header"))?;

    if id <= 0 {
        return Err(format!("Invalid {ACTOR_ID_HEADER} header"));
    }

    let role = headers
        .get(ACTOR_ROLE_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| format!("Missing {ACTOR_ROLE_HEADER} header"))?
        .trim()
        .parse::<ActorRole>()?;

    Ok(Actor::new(id, role))
}

impl<S, B> Transform<S, ServiceRequest> for RequireActor
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireActorMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireActorMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireActorMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireActorMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 处理 OPTIONS 请求
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match parse_actor(req.headers()) {
                Ok(actor) => {
                    debug!("Actor resolved: {} ({})", actor.id, actor.role);
                    req.extensions_mut().insert(actor);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!("Actor resolution failed for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取调用方
impl RequireActor {
    /// 从请求扩展中提取调用方
    /// 此函数应该在应用了 RequireActor 中间件的路由处理程序中使用
    pub fn extract_actor(req: &HttpRequest) -> Option<Actor> {
        req.extensions().get::<Actor>().copied()
    }

    pub fn extract_actor_role(req: &HttpRequest) -> Option<ActorRole> {
        req.extensions().get::<Actor>().map(|actor| actor.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        map
    }

    #[test]
    fn test_parse_valid_actor() {
        let actor = parse_actor(&headers(&[
            ("x-actor-id", "42"),
            ("x-actor-role", "enterprise_cell"),
        ]))
        .unwrap();
        assert_eq!(actor, Actor::new(42, ActorRole::EnterpriseCell));
    }

    #[test]
    fn test_parse_rejects_missing_or_invalid() {
        assert!(parse_actor(&headers(&[("x-actor-role", "admin")])).is_err());
        assert!(parse_actor(&headers(&[("x-actor-id", "7")])).is_err());
        assert!(
            parse_actor(&headers(&[("x-actor-id", "abc"), ("x-actor-role", "admin")])).is_err()
        );
        assert!(
            parse_actor(&headers(&[("x-actor-id", "0"), ("x-actor-role", "admin")])).is_err()
        );
        assert!(
            parse_actor(&headers(&[("x-actor-id", "3"), ("x-actor-role", "dean")])).is_err()
        );
    }
}
