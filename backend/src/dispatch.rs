use crate::consumables::Consumables;
use crate::error::ServiceError;
use crate::pipeline::PreparedJob;
use crate::spooler::{SpoolJob, Spooler};
use common::jobs::PrintOutcome;
use common::requests::PrintRequest;
use log::{info, warn};
use std::sync::Arc;

/// Hands prepared jobs to the spooler and books the paper they use.
pub struct Dispatcher {
    spooler: Arc<dyn Spooler>,
    consumables: Arc<Consumables>,
    media: String,
}

impl Dispatcher {
    pub fn new(spooler: Arc<dyn Spooler>, consumables: Arc<Consumables>, media: String) -> Self {
        Self {
            spooler,
            consumables,
            media,
        }
    }

    /// Spools sheet `request.page` of the prepared document, `request.copies` times.
    ///
    /// The artifact is deleted whether or not the spooler accepted it. Paper
    /// is only booked on success.
    pub async fn spool(
        &self,
        job: PreparedJob,
        request: &PrintRequest,
    ) -> Result<PrintOutcome, ServiceError> {
        let PreparedJob { artifact, preview } = job;
        let submitted = self
            .spooler
            .submit(&SpoolJob {
                path: artifact.path(),
                page: request.page,
                copies: request.copies,
                media: &self.media,
            })
            .await;
        drop(artifact);
        submitted.map_err(ServiceError::Spool)?;

        info!(
            "spooled sheet {}/{} x{}",
            request.page, request.total_pages, request.copies
        );
        self.consumables.account_for_job(request.copies);

        let hash = format!("{:x}", md5::compute(&request.pdf));
        Ok(PrintOutcome::accepted(hash, preview))
    }

    /// Flushes the spooler queue.
    pub async fn cancel_all(&self) -> bool {
        match self.spooler.cancel_all().await {
            Ok(()) => {
                info!("print queue cancelled");
                true
            }
            Err(e) => {
                warn!("could not cancel the print queue: {}", e);
                false
            }
        }
    }
}
