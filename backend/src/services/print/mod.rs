//! # Print Service Module
//!
//! The kiosk's printer API, mounted under `/api/print`.
//!
//! ## Sub-modules:
//! - `status`: reports whether the spooler still holds jobs.
//! - `cancel`: flushes the spooler queue.
//! - `submit`: admits, prepares and spools one sheet of a document.

mod cancel;
mod status;
mod submit;

use actix_web::web::{delete, get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/print";

/// Configures and returns the Actix `Scope` for the printer routes.
///
/// # Registered Routes:
///
/// *   **`GET /api/print`**:
///     - **Handler**: `status::process`
///     - **Description**: Returns `{success, printing}`. Clients poll it
///       after each submission until the printer is idle.
///
/// *   **`DELETE /api/print`**:
///     - **Handler**: `cancel::process`
///     - **Description**: Cancels every queued job and returns `{success}`.
///
/// *   **`POST /api/print`**:
///     - **Handler**: `submit::process`
///     - **Description**: Multipart upload of the whole PDF plus the sheet
///       to print. Answers `{success: true, hash, preview}` once spooled,
///       or `{success: false, message}` when the job is not admitted.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(status::process))
        .route("", delete().to(cancel::process))
        .route("", post().to(submit::process))
}
