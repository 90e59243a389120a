//! Decides whether a submission may use the printer.
//!
//! Only one job is processed at a time. The gate's lock is taken without
//! waiting and the returned [`Admission`] keeps it until the job has been
//! handed to the spooler, so a second request arriving in between is told
//! the server is busy instead of queueing behind the first.

use crate::consumables::Consumables;
use crate::error::ServiceError;
use log::info;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Busy,
    NoInk,
    NotEnoughPapers,
}

impl Rejection {
    pub fn message(self) -> &'static str {
        match self {
            Rejection::Busy => "Server is busy printing...",
            Rejection::NoInk => "Printer has no inks. Please try again later",
            Rejection::NotEnoughPapers => "Not enough papers",
        }
    }
}

/// Proof that the caller holds the printer.
pub struct Admission<'a> {
    _slot: MutexGuard<'a, ()>,
}

pub enum Decision<'a> {
    Admitted(Admission<'a>),
    Rejected(Rejection),
}

pub struct AdmissionGate {
    slot: Mutex<()>,
    consumables: Arc<Consumables>,
    check_inks: bool,
}

impl AdmissionGate {
    pub fn new(consumables: Arc<Consumables>, check_inks: bool) -> Self {
        Self {
            slot: Mutex::new(()),
            consumables,
            check_inks,
        }
    }

    /// Runs the checks in order: exclusivity, printer queue, ink (when
    /// enabled), then paper for `sheets` sheets.
    ///
    /// A spooler that cannot be queried is an error, never an admission.
    pub async fn admit(&self, sheets: u32) -> Result<Decision<'_>, ServiceError> {
        let Ok(slot) = self.slot.try_lock() else {
            return Ok(self.reject(Rejection::Busy));
        };

        if !self.consumables.is_printer_idle().await? {
            return Ok(self.reject(Rejection::Busy));
        }

        if self.check_inks && !self.consumables.check_ink_levels().await? {
            return Ok(self.reject(Rejection::NoInk));
        }

        if !self.consumables.has_papers_for(sheets) {
            return Ok(self.reject(Rejection::NotEnoughPapers));
        }

        info!("admitted a job needing {} sheet(s)", sheets);
        Ok(Decision::Admitted(Admission { _slot: slot }))
    }

    fn reject(&self, rejection: Rejection) -> Decision<'_> {
        info!("rejected a job: {}", rejection.message());
        Decision::Rejected(rejection)
    }
}
