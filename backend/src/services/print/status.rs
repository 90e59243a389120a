use crate::error::ServiceError;
use crate::state::KioskState;
use actix_web::http::header::CACHE_CONTROL;
use actix_web::{web, HttpResponse};
use common::jobs::PrinterStatus;

pub(crate) async fn process(state: web::Data<KioskState>) -> Result<HttpResponse, ServiceError> {
    let idle = state.consumables.is_printer_idle().await?;
    Ok(HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, "no-store"))
        .json(PrinterStatus {
            success: true,
            printing: !idle,
        }))
}
