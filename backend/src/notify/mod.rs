//! Delivery of consumable notices (low paper, low or missing ink).
//!
//! Notices must never slow down a print request, so they are decoupled from
//! the request path:
//! - `Notifier`: a clonable handle holding the sending half of a bounded
//!   MPSC channel. The consumables tracker pushes `Notice`s through it with
//!   `try_send`; a full or closed channel drops the notice with a warning.
//! - `start_dispatcher`: a long-running task spawned in `main.rs` that drains
//!   the channel and mails each notice (see `mail`), or only logs it when no
//!   SMTP relay is configured.

mod mail;

use crate::config::SmtpConfig;
use log::{error, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Subject line of every notice mail.
pub const NOTIFY_SUBJECT: &str = "PRINTU KIOSK NOTIFY";

/// A condition the kiosk operator should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The paper estimate reached the low-paper threshold.
    NoPapers,
    /// These ink channels are at or below 10%.
    InkLow { channels: Vec<String> },
    /// The ink tool reported no channel at all.
    NoInk,
}

impl Notice {
    pub fn body(&self) -> String {
        match self {
            Notice::NoPapers => "No papers".to_string(),
            Notice::InkLow { channels } => format!("{} ink(s) is below 10%!", channels.join(", ")),
            Notice::NoInk => "Printer has no ink".to_string(),
        }
    }
}

/// Sending half of the notice channel.
#[derive(Clone, Debug)]
pub struct Notifier {
    tx: mpsc::Sender<Notice>,
}

impl Notifier {
    /// Creates a notifier and the receiver to hand to [`start_dispatcher`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queues a notice without waiting.
    pub fn send(&self, notice: Notice) {
        match self.tx.try_send(notice) {
            Ok(()) => {}
            Err(TrySendError::Full(notice)) => {
                warn!("notice queue is full, dropping: {}", notice.body())
            }
            Err(TrySendError::Closed(notice)) => {
                warn!("notice dispatcher is gone, dropping: {}", notice.body())
            }
        }
    }
}

/// Drains the notice channel until every [`Notifier`] is dropped.
pub async fn start_dispatcher(mut rx: mpsc::Receiver<Notice>, smtp: Option<SmtpConfig>) {
    while let Some(notice) = rx.recv().await {
        warn!("{}: {}", NOTIFY_SUBJECT, notice.body());

        if let Some(smtp) = &smtp {
            if let Err(e) = mail::send(smtp, &notice).await {
                error!("could not mail notice to {}: {}", smtp.to, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_match_operator_wording() {
        assert_eq!(Notice::NoPapers.body(), "No papers");
        assert_eq!(
            Notice::InkLow {
                channels: vec!["cyan".to_string(), "yellow".to_string()]
            }
            .body(),
            "cyan, yellow ink(s) is below 10%!"
        );
        assert_eq!(Notice::NoInk.body(), "Printer has no ink");
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (notifier, mut rx) = Notifier::channel(1);

        notifier.send(Notice::NoInk);
        notifier.send(Notice::NoPapers);

        assert_eq!(rx.try_recv().unwrap(), Notice::NoInk);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dispatcher_stops_when_senders_are_dropped() {
        let (notifier, rx) = Notifier::channel(4);
        notifier.send(Notice::NoInk);
        drop(notifier);

        // Without SMTP the dispatcher only logs, then ends with the channel.
        start_dispatcher(rx, None).await;
    }
}
