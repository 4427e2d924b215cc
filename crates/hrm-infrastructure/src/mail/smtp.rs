//! SMTP mail transport on lettre.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info};

use hrm_core::error::DomainError;
use hrm_core::gateways::{MailTransport, OutgoingMail};
use hrm_shared::config::MailSettings;
use hrm_shared::utils::mask_email;

pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailTransport {
    pub fn new(settings: &MailSettings) -> Result<Self, DomainError> {
        let host = settings.smtp_host.as_str();
        let mut builder = if settings.use_tls {
            let tls_params = TlsParameters::new(host.to_string())
                .map_err(|e| DomainError::InternalError(format!("TLS configuration error: {}", e)))?;

            // Port 465 uses implicit TLS (SMTPS), other ports use STARTTLS
            if settings.smtp_port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| DomainError::InternalError(format!("SMTP relay error: {}", e)))?
                    .port(settings.smtp_port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| DomainError::InternalError(format!("SMTP relay error: {}", e)))?
                    .port(settings.smtp_port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(settings.smtp_port)
        };

        if let (Some(user), Some(pass)) = (&settings.smtp_username, &settings.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = match &settings.from_name {
            Some(name) => format!("{} <{}>", name, settings.from_address),
            None => settings.from_address.clone(),
        };
        let from = from
            .parse()
            .map_err(|e| DomainError::InternalError(format!("Invalid from address: {}", e)))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// HTML body followed by each attachment, as one multipart/mixed message.
    fn build_message(&self, mail: OutgoingMail) -> Result<Message, DomainError> {
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e| DomainError::TransportFailed(format!("Invalid recipient address: {}", e)))?;

        let mut body = MultiPart::mixed().singlepart(SinglePart::html(mail.body));
        for attachment in mail.attachments {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| DomainError::TransportFailed(format!("Invalid attachment type: {}", e)))?;
            body = body.singlepart(Attachment::new(attachment.filename).body(attachment.content, content_type));
        }

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(mail.subject)
            .multipart(body)
            .map_err(|e| DomainError::TransportFailed(format!("Failed to build email: {}", e)))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DomainError> {
        let recipient = mask_email(&mail.to);
        let message = self.build_message(mail)?;

        self.transport.send(message).await.map_err(|e| {
            error!("SMTP delivery to {} failed: {}", recipient, e);
            DomainError::TransportFailed(e.to_string())
        })?;

        info!("Email delivered to {}", recipient);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hrm_core::gateways::MailAttachment;

    fn settings(use_tls: bool, port: u16) -> MailSettings {
        MailSettings {
            smtp_host: "localhost".to_string(),
            smtp_port: port,
            smtp_username: Some("user".to_string()),
            smtp_password: Some("pass".to_string()),
            use_tls,
            from_address: "billing@acme.io".to_string(),
            from_name: Some("Acme Billing".to_string()),
        }
    }

    fn mail(to: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.to_string(),
            subject: "Invoice INV-1001".to_string(),
            body: "<p>Please find your invoice attached.</p>".to_string(),
            attachments: vec![MailAttachment {
                filename: "invoice-INV-1001.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                content: b"%PDF-1.5".to_vec(),
            }],
        }
    }

    #[tokio::test]
    async fn test_transport_creation() {
        assert!(SmtpMailTransport::new(&settings(false, 25)).is_ok());
        assert!(SmtpMailTransport::new(&settings(true, 587)).is_ok());
        assert!(SmtpMailTransport::new(&settings(true, 465)).is_ok());
    }

    #[test]
    fn test_invalid_from_address() {
        let mut bad = settings(false, 25);
        bad.from_address = "not an address".to_string();
        bad.from_name = None;
        assert!(SmtpMailTransport::new(&bad).is_err());
    }

    #[tokio::test]
    async fn test_message_carries_pdf_attachment() {
        let transport = SmtpMailTransport::new(&settings(false, 25)).unwrap();
        let message = transport.build_message(mail("client@globex.test")).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(raw.contains("Subject: Invoice INV-1001"));
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("Content-Type: application/pdf"));
        assert!(raw.contains("invoice-INV-1001.pdf"));
        assert!(raw.contains("Acme Billing"));
    }

    #[tokio::test]
    async fn test_invalid_recipient_is_a_transport_failure() {
        let transport = SmtpMailTransport::new(&settings(false, 25)).unwrap();
        assert!(matches!(
            transport.build_message(mail("nobody")),
            Err(DomainError::TransportFailed(_))
        ));
    }
}
