/// Health check endpoint
use actix_web::HttpResponse;

use crate::models::CallResult;

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(CallResult::<()>::ok_msg("service is healthy"))
}
