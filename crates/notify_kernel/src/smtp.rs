//! SMTP delivery for `--mail`.

use lettre::{
    message::{header::ContentType, Mailbox},
    Message, SmtpTransport, Transport,
};

use crate::{
    mail::{MailMessage, MailTransport},
    KernelError,
};

/// Relay used when nothing else is configured.
pub const DEFAULT_SMTP_HOST: &str = "localhost";

/// Plain SMTP port.
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Where outgoing mail is relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    /// Relay host name or address.
    pub host: String,
    /// Relay port.
    pub port: u16,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
        }
    }
}

impl SmtpConfig {
    /// Checks the relay settings before any connection is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MailConfiguration`] for an empty host or port `0`.
    pub fn validate(&self) -> Result<(), KernelError> {
        if self.host.trim().is_empty() {
            return Err(KernelError::MailConfiguration(
                "SMTP host must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(KernelError::MailConfiguration(
                "SMTP port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unencrypted SMTP relay transport, meant for a local mail server.
#[derive(Clone)]
pub struct SmtpMailTransport {
    config: SmtpConfig,
    transport: SmtpTransport,
}

impl std::fmt::Debug for SmtpMailTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SmtpMailTransport {
    /// Builds a transport for `config`. No connection is opened until a message is sent.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::MailConfiguration`] when `config` does not validate.
    pub fn new(config: SmtpConfig) -> Result<Self, KernelError> {
        config.validate()?;
        let transport = SmtpTransport::builder_dangerous(config.host.as_str())
            .port(config.port)
            .build();
        Ok(Self { config, transport })
    }

    /// Relay settings in use.
    pub fn config(&self) -> &SmtpConfig {
        &self.config
    }
}

impl MailTransport for SmtpMailTransport {
    fn send_message(&self, message: &MailMessage) -> Result<(), String> {
        let email = build_message(message)?;
        self.transport.send(&email).map(|_| ()).map_err(|err| {
            format!(
                "SMTP delivery via {}:{} failed: {err}",
                self.config.host, self.config.port
            )
        })
    }
}

/// Mailbox for a login name. Bare names are addressed on `localhost`.
///
/// # Errors
///
/// Returns the parser message when the resulting address is invalid.
pub fn mailbox_for(user: &str) -> Result<Mailbox, String> {
    let address = if user.contains('@') {
        user.to_string()
    } else {
        format!("{user}@localhost")
    };
    address
        .parse::<Mailbox>()
        .map_err(|err| format!("invalid mail address `{address}`: {err}"))
}

/// Plain-text RFC 5322 message for `message`.
///
/// # Errors
///
/// Returns a message when an address is invalid or the mail cannot be assembled.
pub fn build_message(message: &MailMessage) -> Result<Message, String> {
    Message::builder()
        .from(mailbox_for(&message.from)?)
        .to(mailbox_for(&message.to)?)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|err| format!("could not build mail: {err}"))
}
