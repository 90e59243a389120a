use super::{SpoolJob, Spooler};
use crate::command;
use crate::error::CommandError;
use async_trait::async_trait;
use log::info;
use std::ffi::OsStr;

/// CUPS command-line client (`lpstat`, `lp`, `cancel`) plus the `ink` tool.
#[derive(Debug, Default)]
pub struct Cups;

#[async_trait]
impl Spooler for Cups {
    async fn queue_status(&self) -> Result<String, CommandError> {
        command::run("lpstat", ["-o"]).await
    }

    async fn default_destination(&self) -> Result<String, CommandError> {
        command::run("lpstat", ["-d"]).await
    }

    async fn cancel_all(&self) -> Result<(), CommandError> {
        command::run("cancel", ["-a"]).await?;
        info!("cancelled every queued print job");
        Ok(())
    }

    async fn ink_report(&self) -> Result<String, CommandError> {
        command::run("ink", ["-p", "usb"]).await
    }

    async fn submit(&self, job: &SpoolJob<'_>) -> Result<(), CommandError> {
        let page = job.page.to_string();
        let copies = job.copies.to_string();
        let media = format!("media={}", job.media);
        let args: [&OsStr; 8] = [
            OsStr::new("-s"),
            OsStr::new("-P"),
            OsStr::new(&page),
            OsStr::new("-n"),
            OsStr::new(&copies),
            OsStr::new("-o"),
            OsStr::new(&media),
            job.path.as_os_str(),
        ];

        command::run("lp", args).await?;
        Ok(())
    }
}
