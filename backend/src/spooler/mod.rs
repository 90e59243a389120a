//! The physical print spooler and the ink tool, seen as opaque commands.
//!
//! `Spooler` is the seam between the print pipeline and the machine: the
//! production implementation is [`cups::Cups`], tests plug in a fake.

pub mod cups;

use crate::error::CommandError;
use async_trait::async_trait;
use std::path::Path;

/// A document handed to the spooler.
#[derive(Debug, Clone)]
pub struct SpoolJob<'a> {
    pub path: &'a Path,
    /// Page of the (already imposed) document to print.
    pub page: u32,
    pub copies: u32,
    pub media: &'a str,
}

#[async_trait]
pub trait Spooler: Send + Sync {
    /// Free text describing queued jobs; empty when the printer is idle.
    async fn queue_status(&self) -> Result<String, CommandError>;

    /// Name of the default destination, as reported by the spooler.
    async fn default_destination(&self) -> Result<String, CommandError>;

    /// Flushes every queued job.
    async fn cancel_all(&self) -> Result<(), CommandError>;

    /// Line-oriented `<channel>: <percent>%` ink report.
    async fn ink_report(&self) -> Result<String, CommandError>;

    async fn submit(&self, job: &SpoolJob<'_>) -> Result<(), CommandError>;
}
