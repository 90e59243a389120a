//! Fakes for the external commands, shared by the unit tests.

use crate::config::Config;
use crate::error::CommandError;
use crate::notify::{Notice, Notifier};
use crate::pipeline::transform::{RasterTarget, Transformer};
use crate::spooler::{SpoolJob, Spooler};
use crate::state::KioskState;
use async_trait::async_trait;
use common::model::layout::Imposition;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedJob {
    pub path: PathBuf,
    pub page: u32,
    pub copies: u32,
    pub media: String,
    pub existed: bool,
}

#[derive(Default)]
pub struct FakeSpooler {
    pub queue: Mutex<String>,
    pub ink: Mutex<String>,
    pub status_fails: Mutex<bool>,
    pub submitted: Mutex<Vec<SubmittedJob>>,
    pub cancels: AtomicUsize,
}

impl FakeSpooler {
    pub fn set_queue(&self, queue: &str) {
        *self.queue.lock().unwrap() = queue.to_string();
    }

    pub fn set_ink(&self, report: &str) {
        *self.ink.lock().unwrap() = report.to_string();
    }

    pub fn submitted(&self) -> Vec<SubmittedJob> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

fn unavailable(program: &str) -> CommandError {
    CommandError::Failed {
        program: program.to_string(),
        status: "exit status: 1".to_string(),
        stderr: "scheduler is not running".to_string(),
    }
}

#[async_trait]
impl Spooler for FakeSpooler {
    async fn queue_status(&self) -> Result<String, CommandError> {
        if *self.status_fails.lock().unwrap() {
            return Err(unavailable("lpstat"));
        }
        Ok(self.queue.lock().unwrap().clone())
    }

    async fn default_destination(&self) -> Result<String, CommandError> {
        Ok("system default destination: kiosk".to_string())
    }

    async fn cancel_all(&self) -> Result<(), CommandError> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn ink_report(&self) -> Result<String, CommandError> {
        Ok(self.ink.lock().unwrap().clone())
    }

    async fn submit(&self, job: &SpoolJob<'_>) -> Result<(), CommandError> {
        self.submitted.lock().unwrap().push(SubmittedJob {
            path: job.path.to_path_buf(),
            page: job.page,
            copies: job.copies,
            media: job.media.to_string(),
            existed: job.path.exists(),
        });
        Ok(())
    }
}

/// One call into the fake transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct StageCall {
    pub stage: &'static str,
    /// PDF files in the scratch directory when the stage started.
    pub pdfs_on_disk: usize,
    /// File the stage was asked to produce.
    pub output: PathBuf,
}

/// Copies PDFs instead of converting them and writes a tiny fake JPEG.
pub struct FakeTransformer {
    pub dir: PathBuf,
    pub fail_stage: Option<&'static str>,
    pub calls: Mutex<Vec<StageCall>>,
}

impl FakeTransformer {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            fail_stage: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn stages(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|c| c.stage).collect()
    }

    /// Paths each call was asked to write, in call order.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().iter().map(|c| c.output.clone()).collect()
    }

    fn enter(&self, stage: &'static str, output: &Path) -> Result<(), CommandError> {
        self.calls.lock().unwrap().push(StageCall {
            stage,
            pdfs_on_disk: count_files(&self.dir, "pdf"),
            output: output.to_path_buf(),
        });
        if self.fail_stage == Some(stage) {
            return Err(unavailable(stage));
        }
        Ok(())
    }
}

pub const FAKE_JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xD9];

#[async_trait]
impl Transformer for FakeTransformer {
    async fn grayscale(&self, src: &Path, dst: &Path) -> Result<(), CommandError> {
        self.enter("grayscale", dst)?;
        std::fs::copy(src, dst).map_err(|e| spawn_failure("gs", e))?;
        Ok(())
    }

    async fn impose(&self, src: &Path, dst: &Path, _imposition: Imposition) -> Result<(), CommandError> {
        self.enter("impose", dst)?;
        std::fs::copy(src, dst).map_err(|e| spawn_failure("pdfjam", e))?;
        Ok(())
    }

    async fn rasterize(&self, _src: &Path, target: &RasterTarget) -> Result<(), CommandError> {
        self.enter("rasterize", &target.output)?;
        std::fs::write(&target.output, FAKE_JPEG).map_err(|e| spawn_failure("pdftoppm", e))?;
        Ok(())
    }
}

fn spawn_failure(program: &str, source: std::io::Error) -> CommandError {
    CommandError::Spawn {
        program: program.to_string(),
        source,
    }
}

/// Number of files in `dir` with the given extension.
pub fn count_files(dir: &Path, extension: &str) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().is_some_and(|x| x == extension))
                .count()
        })
        .unwrap_or(0)
}

/// Default configuration rooted in `tmp_dir`.
pub fn test_config(tmp_dir: &Path, initial_papers: i64, check_inks: bool) -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.tmp_dir = tmp_dir.to_path_buf();
    config.initial_papers = initial_papers;
    config.check_inks = check_inks;
    config
}

pub struct Harness {
    pub state: KioskState,
    pub spooler: Arc<FakeSpooler>,
    pub transformer: Arc<FakeTransformer>,
    pub notices: mpsc::Receiver<Notice>,
    pub dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(initial_papers: i64, check_inks: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let spooler = Arc::new(FakeSpooler::default());
        let transformer = Arc::new(FakeTransformer::new(dir.path()));
        let (notifier, notices) = Notifier::channel(16);
        let state = KioskState::new(
            &test_config(dir.path(), initial_papers, check_inks),
            spooler.clone(),
            transformer.clone(),
            notifier,
        );

        Self {
            state,
            spooler,
            transformer,
            notices,
            dir,
        }
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut out = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            out.push(notice);
        }
        out
    }
}

/// Builds a `multipart/form-data` body; returns the content type and the bytes.
pub fn multipart_body(fields: &[(&str, String)], pdf: &[u8]) -> (String, Vec<u8>) {
    const BOUNDARY: &str = "----kiosk-test-boundary";
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"pdf\"; filename=\"blob\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(pdf);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
