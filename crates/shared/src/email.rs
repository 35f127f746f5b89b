//! Email delivery for expense reports.
//!
//! Uses `lettre` for SMTP transport. When no SMTP credentials are configured
//! the service runs in preview mode: the rendered message body is written to
//! a spool directory and a preview reference is returned instead of sending.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};
use thiserror::Error;
use uuid::Uuid;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
    /// Failed to write a preview-mode message.
    #[error("Failed to write preview message: {0}")]
    PreviewError(String),
}

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Message handed to the SMTP relay.
    Sent,
    /// Preview mode: message spooled to disk instead of delivered.
    Preview {
        /// Path of the spooled HTML file.
        path: String,
    },
}

/// Checks that an address has the basic `local@domain.tld` shape.
///
/// This is a syntactic gate, not RFC 5322 validation: one `@`, no whitespace,
/// and a dot-separated domain with non-empty segments around the last dot.
#[must_use]
pub fn is_valid_address(addr: &str) -> bool {
    if addr.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = addr.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Email service for sending HTML reports.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Returns true when no SMTP credentials are configured.
    #[must_use]
    pub fn is_preview_mode(&self) -> bool {
        self.config.smtp_username.is_empty() || self.config.smtp_password.is_empty()
    }

    /// Creates an SMTP transport.
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let creds = Credentials::new(
            self.config.smtp_username.clone(),
            self.config.smtp_password.clone(),
        );

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
                .map_err(|e| EmailError::SendError(e.to_string()))?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build(),
        )
    }

    /// Sends an HTML message, or spools it in preview mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the message cannot be built, sent, or spooled.
    pub async fn send_html(
        &self,
        to_email: &str,
        subject: &str,
        html: &str,
    ) -> Result<DeliveryOutcome, EmailError> {
        if !is_valid_address(to_email) {
            return Err(EmailError::InvalidAddress(to_email.to_string()));
        }

        if self.is_preview_mode() {
            return self.spool_preview(html).await;
        }

        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let email = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(DeliveryOutcome::Sent)
    }

    /// Writes the message body to the preview spool directory.
    async fn spool_preview(&self, html: &str) -> Result<DeliveryOutcome, EmailError> {
        let dir = std::path::Path::new(&self.config.preview_dir);
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| EmailError::PreviewError(e.to_string()))?;

        let path = dir.join(format!("report-{}.html", Uuid::new_v4()));
        tokio::fs::write(&path, html)
            .await
            .map_err(|e| EmailError::PreviewError(e.to_string()))?;

        Ok(DeliveryOutcome::Preview {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("alice@company.com", true)]
    #[case("a@b.co", true)]
    #[case("first.last@sub.domain.org", true)]
    #[case("", false)]
    #[case("no-at-sign", false)]
    #[case("@company.com", false)]
    #[case("alice@", false)]
    #[case("alice@nodot", false)]
    #[case("alice@.com", false)]
    #[case("alice@domain.", false)]
    #[case("has space@domain.com", false)]
    #[case("two@@domain.com", false)]
    fn test_address_shapes(#[case] addr: &str, #[case] valid: bool) {
        assert_eq!(is_valid_address(addr), valid, "{addr}");
    }

    #[tokio::test]
    async fn test_preview_mode_spools_to_disk() {
        let dir = std::env::temp_dir().join(format!("corpspend-mail-{}", Uuid::new_v4()));
        let config = EmailConfig {
            preview_dir: dir.display().to_string(),
            ..EmailConfig::default()
        };
        let service = EmailService::new(config);
        assert!(service.is_preview_mode());

        let outcome = service
            .send_html("alice@company.com", "Report", "<html>hi</html>")
            .await
            .unwrap();

        let DeliveryOutcome::Preview { path } = outcome else {
            panic!("expected preview outcome");
        };
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(written, "<html>hi</html>");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn test_rejects_malformed_recipient() {
        let service = EmailService::new(EmailConfig::default());
        let result = service.send_html("not-an-address", "x", "y").await;
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }
}
