//! `%%notify` and `%notify_all` magics.
//!
//! The embedding kernel runs cells itself and reports what happened through [`CellOutcome`]
//! and the pre/post run hooks; this module decides whether and how to notify.

use std::rc::Rc;

use leptos::logging;
use notify_contract::NotificationRecord;
use platform_host::{elapsed_ms, unix_time_ms_now};

use crate::{
    args::{parse_magic_line, parse_notify_all_line, NotifyArgs},
    mail::{MailMessage, MailTransport},
    smtp::{SmtpConfig, SmtpMailTransport},
    DisplaySink, KernelError,
};

/// Result of running one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellOutcome {
    /// String form of the cell's result value, if any.
    pub result: Option<String>,
    /// Error raised before the cell could run (e.g. a syntax error).
    pub error_before_exec: Option<String>,
    /// Error raised while the cell ran.
    pub error_in_exec: Option<String>,
}

impl CellOutcome {
    /// Successful run producing `result`.
    pub fn succeeded(result: Option<String>) -> Self {
        Self {
            result,
            ..Self::default()
        }
    }

    /// Run that raised `error` during execution.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error_in_exec: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether the cell ran without error.
    pub fn success(&self) -> bool {
        self.error_before_exec.is_none() && self.error_in_exec.is_none()
    }
}

/// How a notification left the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// A NOTIFY record was displayed for the renderer to pick up.
    Desktop {
        /// Id of the displayed record.
        record_id: String,
        /// Notification title.
        title: String,
    },
    /// A mail was handed to the transport.
    Mail {
        /// Subject of the mail.
        subject: String,
    },
}

/// Settings active while `%notify_all` is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyAllSettings {
    /// Minimum runtime, in milliseconds, that triggers a notification.
    pub threshold_ms: u64,
    /// Title for successful cells.
    pub success: String,
    /// Title for failed cells.
    pub failure: String,
    /// Deliver by mail instead of desktop notification.
    pub mail: bool,
}

/// What a `%notify_all` invocation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyAllStatus {
    /// Hooks are (still) registered with these settings.
    Enabled(NotifyAllSettings),
    /// Hooks were removed.
    Disabled,
}

/// Per-kernel magic state.
pub struct NotifyMagics {
    display: Rc<dyn DisplaySink>,
    mail: Option<Rc<dyn MailTransport>>,
    user: String,
    notify_all: Option<NotifyAllSettings>,
    run_started_ms: Option<u64>,
}

impl std::fmt::Debug for NotifyMagics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyMagics")
            .field("user", &self.user)
            .field("mail_configured", &self.mail.is_some())
            .field("notify_all", &self.notify_all)
            .field("run_started_ms", &self.run_started_ms)
            .finish_non_exhaustive()
    }
}

impl NotifyMagics {
    /// Loads the magics and displays the INIT handshake so the renderer can ask for permission.
    pub fn new(display: Rc<dyn DisplaySink>, user: impl Into<String>) -> Self {
        display.display(NotificationRecord::init().into_bundle());
        Self {
            display,
            mail: None,
            user: user.into(),
            notify_all: None,
            run_started_ms: None,
        }
    }

    /// Enables `--mail` delivery through `transport`.
    pub fn with_mail_transport(mut self, transport: Rc<dyn MailTransport>) -> Self {
        self.mail = Some(transport);
        self
    }

    /// Enables `--mail` delivery through the SMTP relay described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MailConfiguration`] when `config` does not validate.
    pub fn with_smtp(self, config: SmtpConfig) -> Result<Self, KernelError> {
        let transport = SmtpMailTransport::new(config)?;
        Ok(self.with_mail_transport(Rc::new(transport)))
    }

    /// Active `%notify_all` settings, if enabled.
    pub fn notify_all_settings(&self) -> Option<&NotifyAllSettings> {
        self.notify_all.as_ref()
    }

    /// `%%notify [-s TITLE] [-f TITLE] [-m]`: reports the outcome of the cell it wrapped.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidArguments`] for a bad magic line and the mail errors of
    /// [`NotifyMagics::handle_result`].
    pub fn notify(&self, line: &str, outcome: &CellOutcome) -> Result<Delivery, KernelError> {
        let args: NotifyArgs = parse_magic_line("notify", line)?;
        self.handle_result(outcome, args.mail, &args.success, &args.failure)
    }

    /// `%notify_all [-t SECONDS] [-s TITLE] [-f TITLE] [-m] [-d]`.
    ///
    /// Enabling twice only updates the settings; the hooks stay registered once.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidArguments`] for a bad line, including `--disable` combined
    /// with `--mail` or a non-zero `--threshold`.
    pub fn notify_all(&mut self, line: &str) -> Result<NotifyAllStatus, KernelError> {
        let args = parse_notify_all_line(line)?;
        if args.disable {
            self.notify_all = None;
            self.run_started_ms = None;
            logging::log!("Notebook notifications are disabled");
            return Ok(NotifyAllStatus::Disabled);
        }

        let settings = NotifyAllSettings {
            threshold_ms: args.threshold_secs().saturating_mul(1_000),
            success: args.success,
            failure: args.failure,
            mail: args.mail,
        };
        self.notify_all = Some(settings.clone());
        Ok(NotifyAllStatus::Enabled(settings))
    }

    /// Pre-run hook: records when the next cell starts.
    pub fn pre_run_cell(&mut self) {
        self.pre_run_cell_at(unix_time_ms_now());
    }

    /// [`NotifyMagics::pre_run_cell`] with an explicit start time.
    pub fn pre_run_cell_at(&mut self, started_ms: u64) {
        if self.notify_all.is_some() {
            self.run_started_ms = Some(started_ms);
        }
    }

    /// Post-run hook: notifies when the cell ran past the threshold or failed.
    ///
    /// Cells without a recorded start (such as the one that enabled `%notify_all`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns the mail errors of [`NotifyMagics::handle_result`].
    pub fn post_run_cell(&mut self, outcome: &CellOutcome) -> Result<Option<Delivery>, KernelError> {
        self.post_run_cell_at(outcome, unix_time_ms_now())
    }

    /// [`NotifyMagics::post_run_cell`] with an explicit finish time.
    ///
    /// # Errors
    ///
    /// Returns the mail errors of [`NotifyMagics::handle_result`].
    pub fn post_run_cell_at(
        &mut self,
        outcome: &CellOutcome,
        finished_ms: u64,
    ) -> Result<Option<Delivery>, KernelError> {
        let Some(settings) = self.notify_all.clone() else {
            return Ok(None);
        };
        let Some(started_ms) = self.run_started_ms.take() else {
            return Ok(None);
        };

        if elapsed_ms(started_ms, finished_ms) < settings.threshold_ms && outcome.success() {
            return Ok(None);
        }
        self.handle_result(outcome, settings.mail, &settings.success, &settings.failure)
            .map(Some)
    }

    /// Picks the title for `outcome` and delivers it by mail or desktop notification.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MailUnavailable`] when mail is requested without a transport and
    /// [`KernelError::Mail`] when the transport fails.
    pub fn handle_result(
        &self,
        outcome: &CellOutcome,
        mail: bool,
        success: &str,
        failure: &str,
    ) -> Result<Delivery, KernelError> {
        let title = if outcome.success() { success } else { failure };

        if mail {
            let transport = self.mail.as_ref().ok_or(KernelError::MailUnavailable)?;
            let message = MailMessage::for_outcome(title, &self.user, outcome);
            transport.send_message(&message).map_err(KernelError::Mail)?;
            logging::log!("desktop-notify mailed `{title}` to {}", self.user);
            return Ok(Delivery::Mail {
                subject: message.subject,
            });
        }

        let record = NotificationRecord::notify(title);
        let record_id = record.id.clone();
        self.display.display(record.into_bundle());
        Ok(Delivery::Desktop {
            record_id,
            title: title.to_string(),
        })
    }
}
