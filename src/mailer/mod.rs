//! Outbound mail
//!
//! The handler only sees the [`MailSender`] trait; production uses the SMTP
//! relay in [`smtp`], tests substitute their own implementation.

pub mod smtp;

use async_trait::async_trait;

use crate::config::MailConfig;
use crate::contact::Submission;
use crate::error::MailError;

pub use smtp::SmtpMailSender;

/// Email composed from one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailPayload {
    /// Display name shown as the sender
    pub from_name: String,
    /// Actual sender address (the service account)
    pub from_address: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub reply_to: String,
}

#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, payload: MailPayload) -> Result<(), MailError>;
}

/// Build the notification email for a submission.
///
/// Field values are embedded verbatim unless `escape_html` is set.
pub fn compose(submission: &Submission, config: &MailConfig) -> MailPayload {
    let field = |value: &str| {
        if config.escape_html {
            ammonia::clean_text(value)
        } else {
            value.to_string()
        }
    };

    let name = field(submission.name());
    let email = field(submission.email());
    let phone = field(submission.phone());
    let message = field(submission.message());

    let html = format!(
        "\n<h2>Detalles del mensaje:</h2>\
         \n<p><strong>Nombre:</strong> {name}</p>\
         \n<p><strong>Email:</strong> {email}</p>\
         \n<p><strong>Teléfono:</strong> {phone}</p>\
         \n<p><strong>Mensaje:</strong></p>\
         \n<p>{message}</p>\n"
    );

    MailPayload {
        from_name: submission.name().to_string(),
        from_address: config.user.clone(),
        to: config.user.clone(),
        subject: format!(
            "Mensaje de {} desde {}",
            submission.name(),
            config.site_name
        ),
        html,
        reply_to: submission.email().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use serde_json::json;

    fn submission(message: &str) -> Submission {
        Submission::from_value(&json!({
            "name": "Ana Lopez",
            "email": "ana@example.com",
            "phone": "+1234567890",
            "message": message
        }))
        .unwrap()
    }

    #[test]
    fn test_compose_addresses() {
        let cfg = test_config();
        let payload = compose(&submission("hello"), &cfg.mail);
        assert_eq!(payload.from_name, "Ana Lopez");
        assert_eq!(payload.from_address, "contacto@puntocero.dev");
        assert_eq!(payload.to, "contacto@puntocero.dev");
        assert_eq!(payload.reply_to, "ana@example.com");
        assert_eq!(payload.subject, "Mensaje de Ana Lopez desde PuntoCero");
    }

    #[test]
    fn test_compose_body_embeds_all_fields() {
        let cfg = test_config();
        let payload = compose(&submission("hello there"), &cfg.mail);
        assert!(payload.html.contains("<p><strong>Nombre:</strong> Ana Lopez</p>"));
        assert!(payload.html.contains("<p><strong>Email:</strong> ana@example.com</p>"));
        assert!(payload.html.contains("<p><strong>Teléfono:</strong> +1234567890</p>"));
        assert!(payload.html.contains("<p>hello there</p>"));
    }

    #[test]
    fn test_compose_embeds_markup_verbatim_by_default() {
        let cfg = test_config();
        let payload = compose(&submission("<b>bold</b>"), &cfg.mail);
        assert!(payload.html.contains("<p><b>bold</b></p>"));
    }

    #[test]
    fn test_compose_escapes_when_enabled() {
        let mut cfg = test_config();
        cfg.mail.escape_html = true;
        let payload = compose(&submission("<script>x</script>"), &cfg.mail);
        assert!(!payload.html.contains("<script>"));
        assert!(payload.html.contains("&lt;script&gt;"));
    }
}
