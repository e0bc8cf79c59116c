//! Kernel-side half of desktop-notify.
//!
//! [`NotifyMagics`] implements the `%%notify` cell magic and the `%notify_all` line magic. It
//! publishes [`notify_contract::NotificationRecord`]s through a [`DisplaySink`] and leaves cell
//! execution to the embedding kernel, which reports each run as a [`CellOutcome`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod args;
pub mod display;
pub mod magics;
pub mod mail;
pub mod smtp;

use thiserror::Error;

pub use args::{
    parse_magic_line, parse_notify_all_line, NotifyAllArgs, NotifyArgs, DEFAULT_FAILURE_MESSAGE,
    DEFAULT_SUCCESS_MESSAGE, DEFAULT_THRESHOLD_SECS,
};
pub use display::{DisplaySink, MemoryDisplaySink};
pub use magics::{CellOutcome, Delivery, NotifyAllSettings, NotifyAllStatus, NotifyMagics};
pub use mail::{MailMessage, MailTransport, MemoryMailTransport};
pub use smtp::{
    build_message, mailbox_for, SmtpConfig, SmtpMailTransport, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};

/// Errors surfaced to the notebook user by the magics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// The magic line could not be parsed.
    #[error("invalid `%{magic}` arguments: {message}")]
    InvalidArguments {
        /// Magic name without the `%` prefix.
        magic: &'static str,
        /// Parser diagnostics.
        message: String,
    },

    /// `--mail` was requested but no transport is configured.
    #[error("mail delivery requested but no mail transport is configured")]
    MailUnavailable,

    /// The SMTP relay settings are unusable.
    #[error("invalid SMTP configuration: {0}")]
    MailConfiguration(String),

    /// The mail transport rejected the message.
    #[error("mail delivery failed: {0}")]
    Mail(String),
}

/// Login name of the current user, used as the mail sender and recipient.
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}
