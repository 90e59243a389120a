mod admission;
mod command;
mod config;
mod consumables;
mod dispatch;
mod error;
mod notify;
mod pipeline;
mod services;
mod spooler;
mod state;
#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::notify::Notifier;
use crate::pipeline::transform::PdfTools;
use crate::spooler::cups::Cups;
use crate::spooler::Spooler;
use crate::state::KioskState;
use actix_files::{Files, NamedFile};
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Capacity of the notice channel between the request path and the mailer.
const NOTICE_QUEUE: usize = 32;

/// Serves the built UI, answering unknown paths with `index.html` so the
/// client-side router can resolve them.
fn static_files(static_dir: &Path) -> Files {
    let index = static_dir.join("index.html");
    Files::new("/", static_dir)
        .index_file("index.html")
        .default_handler(fn_service(move |req: ServiceRequest| {
            let index = index.clone();
            async move {
                let (req, _) = req.into_parts();
                let file = NamedFile::open_async(index).await?;
                let res = file.into_response(&req);
                Ok(ServiceResponse::new(req, res))
            }
        }))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if !cfg!(target_os = "linux") {
        error!("the print kiosk only runs on Linux");
        return Err(io::Error::other("unsupported platform"));
    }

    let env_file = config::env_file(Path::new("."));
    if let Some(path) = &env_file {
        info!("reading configuration from {}", path.display());
    }
    let config = Config::from_env(env_file.as_deref()).map_err(|e| {
        error!("invalid configuration: {}", e);
        io::Error::other(e)
    })?;

    let spooler: Arc<dyn Spooler> = Arc::new(Cups);
    let destination = spooler.default_destination().await.map_err(|e| {
        error!("no usable printer: {}", e);
        io::Error::other(e)
    })?;
    if destination.is_empty() || destination.contains("no system default destination") {
        error!("no default printer is configured in CUPS");
        return Err(io::Error::other("no default printer"));
    }
    info!("{}", destination.trim());

    tokio::fs::create_dir_all(&config.tmp_dir).await?;

    let (notifier, notices) = Notifier::channel(NOTICE_QUEUE);
    tokio::spawn(notify::start_dispatcher(notices, config.smtp.clone()));

    let state = KioskState::new(&config, spooler, Arc::new(PdfTools), notifier);

    let url = format!("http://localhost:{}", config.port);
    if config.open_browser {
        let url = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&url) {
                error!("could not open a browser at {}: {}", url, e);
            }
        });
    }

    info!(
        "Server running at {} ({} paper(s), ink check {})",
        url,
        config.initial_papers,
        if config.check_inks { "on" } else { "off" }
    );

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .service(services::print::configure_routes())
            .service(static_files(&static_dir))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
