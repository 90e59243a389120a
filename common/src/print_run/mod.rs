//! Client-side driver that prints a whole document one sheet at a time.
//!
//! A run is strictly sequential:
//!
//! 1.  **Gathering**: the document descriptor and the source PDF are fetched
//!     once from the upload service. The batch has `ceil(pages / npps)`
//!     sheets and resumes after the `printed` sheets already confirmed.
//! 2.  **Printing**: each sheet is submitted to the kiosk backend together
//!     with the number of sheets still needed for the rest of the batch,
//!     so the backend can refuse early when paper is short.
//! 3.  **Polling**: once accepted, the spooler is polled every second until
//!     it reports idle. After 90 seconds the queue is flushed and the run
//!     fails (see [`poll::wait_until_idle`]).
//! 4.  **Advancing**: the sheet and its content hash are confirmed with the
//!     upload service before the next sheet starts.
//!
//! Any failure stops the batch. The failure is reported, and after a short
//! delay the run hands back [`Route::Home`]. Nothing is retried; a new run
//! resumes from whatever the upload service has recorded as printed.
//!
//! I/O goes through the [`PrintBackend`], [`UploadService`] and [`Timer`]
//! traits so the same driver runs in the browser and in tests.

mod error;
pub mod poll;
mod state;

pub use error::{RunError, TIMEOUT_MESSAGE};
pub use state::{Route, RunState};

use crate::jobs::PrintOutcome;
use crate::model::document::{Document, DocumentEnvelope};
use crate::requests::{ConfirmPage, PrintRequest};
use std::time::Duration;

/// The kiosk print backend (`/api/print`).
#[allow(async_fn_in_trait)]
pub trait PrintBackend {
    async fn submit(&self, request: &PrintRequest) -> Result<PrintOutcome, RunError>;
    async fn is_printing(&self) -> Result<bool, RunError>;
    async fn cancel_all(&self) -> Result<(), RunError>;
}

/// The upload service that owns documents and their printed-page records.
#[allow(async_fn_in_trait)]
pub trait UploadService {
    async fn document(&self, upload: &str) -> Result<DocumentEnvelope, RunError>;
    async fn pdf(&self, upload: &str) -> Result<Vec<u8>, RunError>;
    async fn confirm(&self, confirmation: &ConfirmPage) -> Result<(), RunError>;
}

#[allow(async_fn_in_trait)]
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

/// Timing of the poll loop and of the failure redirect.
#[derive(Debug, Clone)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
    pub redirect_delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(90),
            redirect_delay: Duration::from_millis(2500),
        }
    }
}

/// One "print this upload" operation.
pub struct PrintRun<'a, B, U, T> {
    upload: String,
    backend: &'a B,
    uploads: &'a U,
    timer: &'a T,
    settings: PollSettings,
}

impl<'a, B, U, T> PrintRun<'a, B, U, T>
where
    B: PrintBackend,
    U: UploadService,
    T: Timer,
{
    pub fn new(upload: impl Into<String>, backend: &'a B, uploads: &'a U, timer: &'a T) -> Self {
        Self {
            upload: upload.into(),
            backend,
            uploads,
            timer,
            settings: PollSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs the whole batch and returns where the kiosk should navigate next.
    ///
    /// `observe` is called on every state transition.
    pub async fn execute<F>(&self, mut observe: F) -> Route
    where
        F: FnMut(&RunState),
    {
        observe(&RunState::Gathering);

        match self.print_all(&mut observe).await {
            Ok(document) => {
                observe(&RunState::Done {
                    filename: document.filename.clone(),
                });
                Route::Success {
                    filename: document.filename,
                    upload: self.upload.clone(),
                }
            }
            Err(err) => {
                observe(&RunState::Failed {
                    message: err.to_string(),
                });
                self.timer.sleep(self.settings.redirect_delay).await;
                observe(&RunState::Redirecting);
                Route::Home
            }
        }
    }

    async fn print_all<F>(&self, observe: &mut F) -> Result<Document, RunError>
    where
        F: FnMut(&RunState),
    {
        let document = self.load_document().await?;
        let pdf = self.uploads.pdf(&self.upload).await?;
        let total_pages = document.total_pages();

        let mut request = PrintRequest {
            page: 0,
            total_pages,
            total: 0,
            npps: document.npps,
            color: document.color,
            copies: document.copies,
            pdf,
        };

        for index in document.printed..total_pages {
            let page = index + 1;
            request.page = page;
            request.total = (total_pages - index) * document.copies;

            observe(&RunState::Printing { page, total_pages });
            let outcome = self.backend.submit(&request).await?;
            if !outcome.success {
                return Err(RunError::Rejected(
                    outcome
                        .message
                        .unwrap_or_else(|| "Print request was rejected".to_string()),
                ));
            }
            let hash = outcome
                .hash
                .ok_or_else(|| RunError::Transport("Print response carried no hash".to_string()))?;

            observe(&RunState::Polling {
                page,
                total_pages,
                preview: outcome.preview.unwrap_or_default(),
            });
            if let Err(err) = poll::wait_until_idle(self.backend, self.timer, &self.settings).await
            {
                if err == RunError::TimedOut {
                    observe(&RunState::TimedOut { page });
                }
                return Err(err);
            }

            let confirmation = ConfirmPage {
                upload: self.upload.clone(),
                page,
                hash,
            };
            self.uploads
                .confirm(&confirmation)
                .await
                .map_err(|e| RunError::Confirmation(e.to_string()))?;

            observe(&RunState::Advancing { page, total_pages });
        }

        Ok(document)
    }

    async fn load_document(&self) -> Result<Document, RunError> {
        let envelope = self.uploads.document(&self.upload).await?;
        if !envelope.success {
            return Err(RunError::Document(
                envelope
                    .message
                    .unwrap_or_else(|| "Document is not available".to_string()),
            ));
        }
        envelope
            .document
            .ok_or_else(|| RunError::Document("Document descriptor is incomplete".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::layout::{ColorMode, PagesPerSheet};
    use std::cell::{Cell, RefCell};
    use tokio::time::Instant;

    struct TokioTimer;

    impl Timer for TokioTimer {
        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }

    /// Backend whose printer stays busy for `busy_for` after every accepted sheet.
    struct FakeBackend {
        busy_for: Duration,
        reject_with: Option<String>,
        busy_until: Cell<Option<Instant>>,
        submitted: RefCell<Vec<(u32, u32)>>,
        polls: Cell<u32>,
        cancels: Cell<u32>,
    }

    impl FakeBackend {
        fn new(busy_for: Duration) -> Self {
            Self {
                busy_for,
                reject_with: None,
                busy_until: Cell::new(None),
                submitted: RefCell::new(Vec::new()),
                polls: Cell::new(0),
                cancels: Cell::new(0),
            }
        }

        fn rejecting(message: &str) -> Self {
            Self {
                reject_with: Some(message.to_string()),
                ..Self::new(Duration::ZERO)
            }
        }
    }

    impl PrintBackend for FakeBackend {
        async fn submit(&self, request: &PrintRequest) -> Result<PrintOutcome, RunError> {
            self.submitted.borrow_mut().push((request.page, request.total));
            if let Some(message) = &self.reject_with {
                return Ok(PrintOutcome::rejected(message.clone()));
            }
            self.busy_until.set(Some(Instant::now() + self.busy_for));
            Ok(PrintOutcome::accepted(
                format!("hash-{}", request.page),
                "data:image/jpeg;base64,AAAA".to_string(),
            ))
        }

        async fn is_printing(&self) -> Result<bool, RunError> {
            self.polls.set(self.polls.get() + 1);
            Ok(self
                .busy_until
                .get()
                .is_some_and(|until| Instant::now() < until))
        }

        async fn cancel_all(&self) -> Result<(), RunError> {
            self.cancels.set(self.cancels.get() + 1);
            Ok(())
        }
    }

    struct FakeUploads {
        envelope: DocumentEnvelope,
        fail_confirm: bool,
        confirmed: RefCell<Vec<ConfirmPage>>,
    }

    impl FakeUploads {
        fn with(document: Document) -> Self {
            Self {
                envelope: DocumentEnvelope {
                    success: true,
                    message: None,
                    document: Some(document),
                },
                fail_confirm: false,
                confirmed: RefCell::new(Vec::new()),
            }
        }
    }

    impl UploadService for FakeUploads {
        async fn document(&self, _upload: &str) -> Result<DocumentEnvelope, RunError> {
            Ok(self.envelope.clone())
        }

        async fn pdf(&self, _upload: &str) -> Result<Vec<u8>, RunError> {
            Ok(b"%PDF-1.4 fake".to_vec())
        }

        async fn confirm(&self, confirmation: &ConfirmPage) -> Result<(), RunError> {
            if self.fail_confirm {
                return Err(RunError::Transport("connection reset".to_string()));
            }
            self.confirmed.borrow_mut().push(confirmation.clone());
            Ok(())
        }
    }

    fn document(pages: u32, npps: PagesPerSheet, copies: u32, printed: u32) -> Document {
        Document {
            filename: "notes.pdf".to_string(),
            pages,
            copies,
            npps,
            color: ColorMode::Color,
            printed,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn prints_every_sheet_and_confirms_each() {
        let backend = FakeBackend::new(Duration::from_millis(2500));
        let uploads = FakeUploads::with(document(5, PagesPerSheet::Two, 2, 0));
        let mut states = Vec::new();

        let route = PrintRun::new("up-1", &backend, &uploads, &TokioTimer)
            .execute(|s| states.push(s.clone()))
            .await;

        assert_eq!(
            route,
            Route::Success {
                filename: "notes.pdf".to_string(),
                upload: "up-1".to_string(),
            }
        );
        assert_eq!(*backend.submitted.borrow(), vec![(1, 6), (2, 4), (3, 2)]);
        let confirmed: Vec<_> = uploads
            .confirmed
            .borrow()
            .iter()
            .map(|c| (c.page, c.hash.clone()))
            .collect();
        assert_eq!(
            confirmed,
            vec![
                (1, "hash-1".to_string()),
                (2, "hash-2".to_string()),
                (3, "hash-3".to_string()),
            ]
        );
        assert_eq!(states.first(), Some(&RunState::Gathering));
        assert_eq!(
            states.last(),
            Some(&RunState::Done {
                filename: "notes.pdf".to_string()
            })
        );
        assert_eq!(backend.cancels.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn resumes_after_printed_sheets() {
        let backend = FakeBackend::new(Duration::ZERO);
        let uploads = FakeUploads::with(document(3, PagesPerSheet::One, 2, 2));

        let route = PrintRun::new("up-2", &backend, &uploads, &TokioTimer)
            .execute(|_| {})
            .await;

        assert!(matches!(route, Route::Success { .. }));
        assert_eq!(*backend.submitted.borrow(), vec![(3, 2)]);
        assert_eq!(uploads.confirmed.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rejection_stops_the_batch_and_redirects_home() {
        let backend = FakeBackend::rejecting("Not enough papers");
        let uploads = FakeUploads::with(document(4, PagesPerSheet::One, 1, 0));
        let mut states = Vec::new();
        let started = Instant::now();

        let route = PrintRun::new("up-3", &backend, &uploads, &TokioTimer)
            .execute(|s| states.push(s.clone()))
            .await;

        assert_eq!(route, Route::Home);
        assert_eq!(backend.submitted.borrow().len(), 1);
        assert_eq!(backend.polls.get(), 0);
        assert!(uploads.confirmed.borrow().is_empty());
        assert!(states.contains(&RunState::Failed {
            message: "Not enough papers".to_string()
        }));
        assert_eq!(states.last(), Some(&RunState::Redirecting));
        assert!(started.elapsed() >= Duration::from_millis(2500));
    }

    #[tokio::test(start_paused = true)]
    async fn busy_printer_times_out_and_flushes_queue() {
        let backend = FakeBackend::new(Duration::from_secs(95));
        let uploads = FakeUploads::with(document(2, PagesPerSheet::One, 1, 0));
        let mut states = Vec::new();
        let started = Instant::now();

        let route = PrintRun::new("up-4", &backend, &uploads, &TokioTimer)
            .execute(|s| states.push(s.clone()))
            .await;

        assert_eq!(route, Route::Home);
        assert_eq!(backend.cancels.get(), 1);
        assert_eq!(backend.submitted.borrow().len(), 1);
        assert!(uploads.confirmed.borrow().is_empty());
        assert!(states.contains(&RunState::TimedOut { page: 1 }));
        assert!(states.contains(&RunState::Failed {
            message: TIMEOUT_MESSAGE.to_string()
        }));
        // 90 s deadline plus the redirect delay, well short of the 95 s busy period.
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(92_500));
        assert!(elapsed < Duration::from_secs(95));
        assert!(backend.polls.get() <= 90);
    }

    #[tokio::test]
    async fn custom_timings_shorten_the_wait() {
        let backend = FakeBackend::new(Duration::from_secs(5));
        let uploads = FakeUploads::with(document(1, PagesPerSheet::One, 1, 0));
        let settings = PollSettings {
            interval: Duration::from_millis(10),
            timeout: Duration::from_millis(200),
            redirect_delay: Duration::from_millis(50),
        };
        let started = Instant::now();

        let route = PrintRun::new("up-6", &backend, &uploads, &TokioTimer)
            .with_settings(settings)
            .execute(|_| {})
            .await;

        assert_eq!(route, Route::Home);
        assert_eq!(backend.cancels.get(), 1);
        assert!(backend.polls.get() >= 2);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(250));
        assert!(elapsed < Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn confirmation_failure_is_terminal() {
        let backend = FakeBackend::new(Duration::ZERO);
        let mut uploads = FakeUploads::with(document(3, PagesPerSheet::One, 1, 0));
        uploads.fail_confirm = true;
        let mut failure = None;

        let route = PrintRun::new("up-5", &backend, &uploads, &TokioTimer)
            .execute(|s| {
                if let RunState::Failed { message } = s {
                    failure = Some(message.clone());
                }
            })
            .await;

        assert_eq!(route, Route::Home);
        assert_eq!(backend.submitted.borrow().len(), 1);
        assert_eq!(
            failure.as_deref(),
            Some("Page printed but could not be recorded: connection reset")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_upload_never_reaches_the_printer() {
        let backend = FakeBackend::new(Duration::ZERO);
        let mut uploads = FakeUploads::with(document(1, PagesPerSheet::One, 1, 0));
        uploads.envelope = DocumentEnvelope {
            success: false,
            message: Some("Upload not found".to_string()),
            document: None,
        };
        let mut failure = None;

        let route = PrintRun::new("missing", &backend, &uploads, &TokioTimer)
            .execute(|s| {
                if let RunState::Failed { message } = s {
                    failure = Some(message.clone());
                }
            })
            .await;

        assert_eq!(route, Route::Home);
        assert!(backend.submitted.borrow().is_empty());
        assert_eq!(failure.as_deref(), Some("Upload not found"));
    }
}
