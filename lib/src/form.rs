use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::Error;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A single contact-form submission as entered by the user.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormFields {
    /// Trim all fields, then check them in entry order.
    /// A missing field is reported before a malformed email address.
    pub fn validate(self) -> Result<FormFields, Error> {
        let fields = FormFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        if fields.name.is_empty() {
            return Err(Error::MissingField("name"));
        }
        if fields.email.is_empty() {
            return Err(Error::MissingField("email"));
        }
        if fields.subject.is_empty() {
            return Err(Error::MissingField("subject"));
        }
        if fields.message.is_empty() {
            return Err(Error::MissingField("message"));
        }

        if !EMAIL_PATTERN.is_match(&fields.email) {
            return Err(Error::InvalidEmail(fields.email));
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> FormFields {
        FormFields {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "A message".to_string(),
        }
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut f = fields();
        f.name = "  Ada Lovelace ".to_string();
        f.message = "\nA message\n".to_string();

        let f = f.validate().unwrap();

        assert_eq!(f.name, "Ada Lovelace");
        assert_eq!(f.message, "A message");
    }

    #[test]
    fn test_missing_fields() {
        for field in &["name", "email", "subject", "message"] {
            let mut f = fields();
            match *field {
                "name" => f.name = "  ".to_string(),
                "email" => f.email = String::new(),
                "subject" => f.subject = "\t".to_string(),
                _ => f.message = String::new(),
            }

            match f.validate() {
                Err(Error::MissingField(name)) => assert_eq!(name, *field),
                other => panic!("Expected MissingField, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_invalid_emails() {
        let bad = &[
            "plain",
            "no@tld",
            "two@@example.com",
            "spa ce@example.com",
            "@example.com",
            "ada@.com@",
        ];

        for email in bad {
            let mut f = fields();
            f.email = email.to_string();
            match f.validate() {
                Err(Error::InvalidEmail(_)) => {}
                other => panic!("{} should be rejected, got {:?}", email, other),
            }
        }
    }

    #[test]
    fn test_missing_field_wins_over_invalid_email() {
        let mut f = fields();
        f.name = String::new();
        f.email = "not-an-email".to_string();

        match f.validate() {
            Err(Error::MissingField("name")) => {}
            other => panic!("Expected MissingField(name), got {:?}", other),
        }
    }
}
