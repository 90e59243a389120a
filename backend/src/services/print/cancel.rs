use crate::state::KioskState;
use actix_web::{web, HttpResponse, Responder};
use common::jobs::CancelResult;

pub(crate) async fn process(state: web::Data<KioskState>) -> impl Responder {
    let success = state.dispatcher.cancel_all().await;
    HttpResponse::Ok().json(CancelResult { success })
}
