/// Contains API-related struct definitions shared between the submission
/// controller and its transports.
use std::convert::From;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::form::FormFields;

/// Subject used when the form somehow produced an empty one.
pub const DEFAULT_SUBJECT: &str = "Contact Form Submission";

const GENERIC_FAILURE: &str = "Email sending failed. Please try again.";

/// Outbound JSON payload for the mail endpoint.
/// Key names are fixed by the endpoint; SMTP parameters come from config,
/// never from the form.
#[derive(Clone, Debug, Serialize)]
pub struct Payload {
    pub subject: String,
    pub from: String,
    pub to: String,
    pub smtp_server: String,
    pub smtp_port: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub body: String,
}

impl Payload {
    pub fn new(config: &Config, fields: &FormFields) -> Self {
        let subject = if fields.subject.is_empty() {
            DEFAULT_SUBJECT.to_string()
        } else {
            fields.subject.clone()
        };

        let body = format!(
            "Contact Form Submission\n\nFull Name: {}\nEmail Address: {}\n\nMessage:\n{}",
            fields.name, fields.email, fields.message
        );

        Self {
            subject,
            from: config.from.clone(),
            to: config.to.clone(),
            smtp_server: config.smtp_server.clone(),
            smtp_port: config.smtp_port.clone(),
            smtp_username: config.smtp_username.clone(),
            smtp_password: config.smtp_password.clone(),
            body,
        }
    }
}

/// JSON reply from the mail endpoint.
///
/// Any shape is tolerated: all fields are optional, unknown fields are
/// ignored, and a body that is not JSON at all is treated as a plain-text
/// success message.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServerReply {
    pub success: Option<bool>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ServerReply {
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(reply) => reply,
            Err(_) => ServerReply {
                success: Some(true),
                message: Some(body.to_string()),
                error: None,
            },
        }
    }

    /// A reply can report failure even when the transport succeeded.
    pub fn is_failure(&self) -> bool {
        self.success == Some(false) || self.error.is_some()
    }
}

/// Terminal result of a submission, rendered by the front end and then
/// discarded.
#[derive(Clone, Debug, Default)]
pub struct Outcome {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl From<ServerReply> for Outcome {
    fn from(reply: ServerReply) -> Self {
        if reply.is_failure() {
            let error = reply
                .error
                .or(reply.message)
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());

            Outcome {
                success: false,
                message: None,
                error: Some(error),
            }
        } else {
            Outcome {
                success: true,
                message: reply.message,
                error: None,
            }
        }
    }
}

/// Map a non-2xx response to a server error, preferring a message the
/// server put in its body over the bare status line.
pub fn server_error(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<ServerReply>(body) {
        Ok(reply) => reply.message.or(reply.error),
        Err(_) if !body.is_empty() => Some(body.to_string()),
        Err(_) => None,
    };

    Error::Server {
        status,
        message: message.unwrap_or_else(|| format!("Server error: {}", status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::config;

    fn fields() -> FormFields {
        FormFields {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "A message".to_string(),
        }
    }

    #[test]
    fn test_payload_wire_keys() {
        let payload = Payload::new(&config(), &fields());
        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();

        for key in &[
            "subject",
            "from",
            "to",
            "smtp_server",
            "smtp_port",
            "smtp_username",
            "smtp_password",
            "body",
        ] {
            assert!(obj.contains_key(*key), "missing key {}", key);
        }
        assert_eq!(obj.len(), 8);
    }

    #[test]
    fn test_payload_body_format() {
        let payload = Payload::new(&config(), &fields());
        assert_eq!(
            payload.body,
            "Contact Form Submission\n\n\
             Full Name: Ada Lovelace\n\
             Email Address: ada@example.com\n\n\
             Message:\nA message"
        );
    }

    #[test]
    fn test_payload_empty_subject_falls_back() {
        let mut f = fields();
        f.subject = String::new();

        let payload = Payload::new(&config(), &f);
        assert_eq!(payload.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn test_plain_text_reply_is_success() {
        let reply = ServerReply::from_body("queued");

        assert_eq!(reply.success, Some(true));
        assert_eq!(reply.message.as_deref(), Some("queued"));
        assert!(!reply.is_failure());
    }

    #[test]
    fn test_reply_failure_flag() {
        let reply = ServerReply::from_body(r#"{"success": false, "message": "SMTP auth failed"}"#);
        assert!(reply.is_failure());

        let outcome = Outcome::from(reply);
        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("SMTP auth failed"));
    }

    #[test]
    fn test_reply_error_field_wins_over_message() {
        let reply = ServerReply::from_body(r#"{"error": "mailbox full", "message": "sorry"}"#);

        let outcome = Outcome::from(reply);
        assert_eq!(outcome.error.as_deref(), Some("mailbox full"));
    }

    #[test]
    fn test_reply_unknown_shape_is_success() {
        let reply = ServerReply::from_body(r#"{"queued_at": "2021-01-01"}"#);
        assert!(!reply.is_failure());
    }

    #[test]
    fn test_server_error_uses_body_message() {
        match server_error(500, r#"{"message": "backend down"}"#) {
            Error::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "backend down");
            }
            other => panic!("Expected Server, got {:?}", other),
        }
    }

    #[test]
    fn test_server_error_plain_body() {
        match server_error(400, "bad request") {
            Error::Server { message, .. } => assert_eq!(message, "bad request"),
            other => panic!("Expected Server, got {:?}", other),
        }
    }

    #[test]
    fn test_server_error_empty_body() {
        match server_error(502, "") {
            Error::Server { message, .. } => assert_eq!(message, "Server error: 502"),
            other => panic!("Expected Server, got {:?}", other),
        }
    }
}
