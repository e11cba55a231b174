use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::api::AdvocatesQuery;
use crate::repository::DieselRepository;
use crate::services::advocates::list_advocates;

#[get("/advocates")]
pub async fn api_advocates(
    params: web::Query<AdvocatesQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();

    match list_advocates(repo.get_ref(), params.limit.as_deref()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Failed to list advocates: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
