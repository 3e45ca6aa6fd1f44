use actix_web::HttpResponse;

pub(crate) async fn home() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Welcome to PDGmail API" }))
}
