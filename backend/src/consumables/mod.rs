//! In-memory tracking of the printer's consumables.
//!
//! `Consumables` owns the paper estimate and the ink-notice hysteresis key.
//! One instance lives in the shared `KioskState` for the whole process; it is
//! initialised from configuration and never persisted, so a restart resets
//! the paper count.
//!
//! The paper count is a best-effort estimate. It is only decremented after a
//! successful spool, never reconciled with the printer, and may go negative
//! when the configured supply was too low.

pub mod ink;

use crate::error::ServiceError;
use crate::notify::{Notice, Notifier};
use crate::spooler::Spooler;
use ink::parse_ink_levels;
use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumablesState {
    pub papers: i64,
    /// Depleted-channel signature of the last ink notice; empty when none is pending.
    pub last_ink_notice: String,
}

/// Signature used when the ink tool reports no channel at all.
const NO_INK_SIGNATURE: &str = "<none>";

pub struct Consumables {
    spooler: Arc<dyn Spooler>,
    notifier: Notifier,
    low_paper: i64,
    state: Mutex<ConsumablesState>,
}

impl Consumables {
    pub fn new(
        spooler: Arc<dyn Spooler>,
        notifier: Notifier,
        initial_papers: i64,
        low_paper: i64,
    ) -> Self {
        Self {
            spooler,
            notifier,
            low_paper,
            state: Mutex::new(ConsumablesState {
                papers: initial_papers,
                last_ink_notice: String::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ConsumablesState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn papers(&self) -> i64 {
        self.state().papers
    }

    /// Whether the spooler queue is empty.
    ///
    /// An error means the printer state is unknown and the caller must not
    /// proceed.
    pub async fn is_printer_idle(&self) -> Result<bool, ServiceError> {
        let queue = self
            .spooler
            .queue_status()
            .await
            .map_err(ServiceError::SpoolerQuery)?;
        Ok(queue.trim().is_empty())
    }

    /// Reads the ink tool and records the result, see [`Self::record_ink_report`].
    pub async fn check_ink_levels(&self) -> Result<bool, ServiceError> {
        let report = self
            .spooler
            .ink_report()
            .await
            .map_err(ServiceError::SpoolerQuery)?;
        Ok(self.record_ink_report(&report))
    }

    /// Returns true when at least one ink channel is above 10%.
    ///
    /// A notice goes out when the set of depleted channels differs from the
    /// one last notified; repeating the same condition stays silent. Once no
    /// channel is depleted the key is cleared, so a later shortage alerts
    /// again.
    pub fn record_ink_report(&self, report: &str) -> bool {
        let levels = parse_ink_levels(report);
        let has_ink = levels.iter().any(|level| level.is_usable());
        let depleted: Vec<String> = levels
            .into_iter()
            .filter(|level| !level.is_usable())
            .map(|level| level.channel)
            .collect();

        let (signature, notice) = if !depleted.is_empty() {
            (depleted.join(", "), Notice::InkLow { channels: depleted })
        } else if !has_ink {
            (NO_INK_SIGNATURE.to_string(), Notice::NoInk)
        } else {
            self.state().last_ink_notice.clear();
            return true;
        };

        let changed = {
            let mut state = self.state();
            if state.last_ink_notice == signature {
                false
            } else {
                state.last_ink_notice = signature;
                true
            }
        };
        if changed {
            warn!("ink condition changed: {}", notice.body());
            self.notifier.send(notice);
        }

        has_ink
    }

    /// Whether `sheets` can be printed with the paper left.
    pub fn has_papers_for(&self, sheets: u32) -> bool {
        self.papers() >= i64::from(sheets)
    }

    /// Books `copies` sheets after a successful spool.
    ///
    /// Every call that ends at or below the low-paper threshold sends a
    /// notice.
    pub fn account_for_job(&self, copies: u32) {
        let remaining = {
            let mut state = self.state();
            state.papers -= i64::from(copies);
            state.papers
        };
        info!("{} sheet(s) spooled, {} paper(s) left", copies, remaining);

        if remaining <= self.low_paper {
            self.notifier.send(Notice::NoPapers);
        }
    }
}
