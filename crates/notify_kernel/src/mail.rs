//! Mail delivery contract for notifications sent instead of desktop popups.

use std::{cell::RefCell, rc::Rc};

use crate::CellOutcome;

/// Plain-text mail describing one finished cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Subject line, the notification title.
    pub subject: String,
    /// Sender address.
    pub from: String,
    /// Recipient address.
    pub to: String,
    /// Cell result on success, error text on failure.
    pub body: String,
}

impl MailMessage {
    /// Builds the message sent to `user` (as both sender and recipient) for `outcome`.
    pub fn for_outcome(title: &str, user: &str, outcome: &CellOutcome) -> Self {
        let body = if outcome.success() {
            outcome.result.clone().unwrap_or_default()
        } else {
            outcome
                .error_in_exec
                .clone()
                .or_else(|| outcome.error_before_exec.clone())
                .unwrap_or_default()
        };
        Self {
            subject: title.to_string(),
            from: user.to_string(),
            to: user.to_string(),
            body,
        }
    }
}

/// Outgoing mail transport, e.g. a local SMTP relay.
pub trait MailTransport {
    /// Sends `message`.
    fn send_message(&self, message: &MailMessage) -> Result<(), String>;
}

#[derive(Debug, Clone, Default)]
/// Transport that records messages instead of sending them.
pub struct MemoryMailTransport {
    sent: Rc<RefCell<Vec<MailMessage>>>,
}

impl MemoryMailTransport {
    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.borrow().clone()
    }
}

impl MailTransport for MemoryMailTransport {
    fn send_message(&self, message: &MailMessage) -> Result<(), String> {
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_body_prefers_the_runtime_error() {
        let outcome = CellOutcome {
            result: None,
            error_before_exec: Some("SyntaxError".to_string()),
            error_in_exec: Some("ZeroDivisionError".to_string()),
        };
        let message = MailMessage::for_outcome("Cell execution failed", "ada", &outcome);
        assert_eq!(message.body, "ZeroDivisionError");
        assert_eq!(message.from, "ada");
        assert_eq!(message.to, "ada");

        let outcome = CellOutcome {
            error_in_exec: None,
            ..outcome
        };
        assert_eq!(
            MailMessage::for_outcome("t", "ada", &outcome).body,
            "SyntaxError"
        );
    }

    #[test]
    fn success_body_is_the_result_or_empty() {
        let outcome = CellOutcome::succeeded(Some("42".to_string()));
        assert_eq!(MailMessage::for_outcome("t", "u", &outcome).body, "42");
        assert_eq!(
            MailMessage::for_outcome("t", "u", &CellOutcome::succeeded(None)).body,
            ""
        );
    }
}
