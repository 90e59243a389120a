//! Turns an uploaded PDF into the file handed to the spooler.
//!
//! Every request gets a fresh [`artifact::JobToken`] and its own set of
//! scratch files under the configured temporary directory.
//!
//! # Workflow
//!
//! 1. The upload is written to `<token>.pdf`.
//! 2. Black-and-white requests are converted to `<token>-grayscaled.pdf`.
//! 3. Requests with more than one page per sheet are imposed into
//!    `<token>-nup.pdf`.
//! 4. The requested sheet of the result is rasterized to
//!    `<token>-<page>.jpg`, read back as a data URI and deleted.
//!
//! Each stage replaces the current [`artifact::Artifact`], so at most one
//! PDF of the job exists between stages. On any failure the artifacts in
//! scope are dropped and the directory is left as it was.

pub mod artifact;
pub mod preview;
pub mod transform;

use crate::error::ServiceError;
use artifact::{Artifact, JobToken};
use common::model::layout::ColorMode;
use common::requests::PrintRequest;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use transform::{RasterTarget, Transformer};

/// Final PDF of a request, ready to spool, and the preview of its sheet.
#[derive(Debug)]
pub struct PreparedJob {
    pub artifact: Artifact,
    pub preview: String,
}

pub struct TransformChain {
    tmp_dir: PathBuf,
    transformer: Arc<dyn Transformer>,
}

impl TransformChain {
    pub fn new(tmp_dir: PathBuf, transformer: Arc<dyn Transformer>) -> Self {
        Self {
            tmp_dir,
            transformer,
        }
    }

    /// Runs the conversion stages the request asks for.
    ///
    /// # Arguments
    ///
    /// * `request` - the submission; only `pdf`, `color`, `npps`, `page` and
    ///   `total_pages` are read.
    ///
    /// # Returns
    ///
    /// The last artifact of the chain and the rasterized preview. The
    /// caller owns the artifact and must keep it alive until spooled.
    pub async fn prepare(&self, request: &PrintRequest) -> Result<PreparedJob, ServiceError> {
        let token = JobToken::allocate(&self.tmp_dir).await?;
        debug!("job {} uses {}", token.as_str(), self.tmp_dir.display());

        let mut current = Artifact::claim(token.path(&self.tmp_dir, ".pdf"));
        tokio::fs::write(current.path(), &request.pdf).await?;

        if request.color == ColorMode::BlackAndWhite {
            let next = Artifact::claim(token.path(&self.tmp_dir, "-grayscaled.pdf"));
            self.transformer
                .grayscale(current.path(), next.path())
                .await
                .map_err(|source| ServiceError::Transform {
                    stage: "grayscale",
                    source,
                })?;
            current = next;
        }

        if let Some(imposition) = request.npps.imposition() {
            let next = Artifact::claim(token.path(&self.tmp_dir, "-nup.pdf"));
            self.transformer
                .impose(current.path(), next.path(), imposition)
                .await
                .map_err(|source| ServiceError::Transform {
                    stage: "impose",
                    source,
                })?;
            current = next;
        }

        let suffix = preview::page_suffix(request.page, request.total_pages);
        let target = RasterTarget {
            page: request.page,
            root: token.path(&self.tmp_dir, ""),
            output: token.path(&self.tmp_dir, &format!("-{}.jpg", suffix)),
        };
        let raster = Artifact::claim(target.output.clone());
        self.transformer
            .rasterize(current.path(), &target)
            .await
            .map_err(|source| ServiceError::Transform {
                stage: "rasterize",
                source,
            })?;
        let jpeg = tokio::fs::read(raster.path()).await?;
        drop(raster);

        Ok(PreparedJob {
            artifact: current,
            preview: preview::jpeg_data_uri(&jpeg),
        })
    }
}
