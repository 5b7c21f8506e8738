//! src/services/mail_service.rs
//!
//! MailService — renders and sends the admin notification email for a new
//! booking. The SMTP transport sits behind the [`MailTransport`] trait so
//! tests can substitute fakes. This path never fails the HTTP request:
//! missing configuration is a deliberate skip and transport failures are
//! caught and reported inside the success envelope.

use crate::config::MailSettings;
use crate::models::booking::NotifyPayload;
use async_trait::async_trait;
use chrono::Local;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::MultiPart,
    transport::smtp::authentication::Credentials,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Placeholder for booking fields the caller left out.
const FIELD_PLACEHOLDER: &str = "Не указано";

/// Placeholder for an absent comment.
const COMMENT_PLACEHOLDER: &str = "Нет";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("email build error: {0}")]
    Build(String),
}

/// A rendered notification ready for the transport: subject plus both
/// plaintext and HTML bodies of the same content.
#[derive(Debug, Clone)]
pub struct NoticeMessage {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Capability: send a multi-part message to the admin recipient.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, settings: &MailSettings, notice: &NoticeMessage)
    -> Result<(), NotifyError>;
}

/// How a notification attempt ended. Always reported inside an HTTP 200
/// envelope; only the nested flag and message differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent,
    Skipped,
    Failed(String),
}

impl NotifyOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, NotifyOutcome::Failed(_))
    }

    pub fn message(&self) -> String {
        match self {
            NotifyOutcome::Sent => "Email notification sent successfully".into(),
            NotifyOutcome::Skipped => {
                "Email settings not configured, notification skipped".into()
            }
            NotifyOutcome::Failed(err) => format!("Failed to send email: {}", err),
        }
    }
}

/// MailService pairs the optional SMTP settings with a transport.
///
/// Settings come from [`crate::config::AppConfig`] at startup; when absent
/// the service degrades to a no-op and never touches the network.
#[derive(Clone)]
pub struct MailService {
    settings: Option<MailSettings>,
    transport: Arc<dyn MailTransport>,
}

impl MailService {
    pub fn new(settings: Option<MailSettings>, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// Production service using the SMTP transport.
    pub fn smtp(settings: Option<MailSettings>) -> Self {
        Self::new(settings, Arc::new(SmtpMailTransport))
    }

    /// Render and send the notification for a new booking.
    pub async fn notify(&self, payload: &NotifyPayload) -> NotifyOutcome {
        let Some(settings) = &self.settings else {
            info!("mail settings absent, skipping notification");
            return NotifyOutcome::Skipped;
        };

        let received_at = Local::now().format("%d.%m.%Y %H:%M").to_string();
        let notice = render_notice(payload, &received_at);

        match self.transport.send(settings, &notice).await {
            Ok(()) => {
                info!(to = %settings.admin_email, "booking notification sent");
                NotifyOutcome::Sent
            }
            Err(err) => {
                warn!(error = %err, "booking notification failed");
                NotifyOutcome::Failed(err.to_string())
            }
        }
    }
}

/// SMTP transport backed by lettre (STARTTLS relay, authenticated).
pub struct SmtpMailTransport;

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(
        &self,
        settings: &MailSettings,
        notice: &NoticeMessage,
    ) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(settings.user.parse()?)
            .to(settings.admin_email.parse()?)
            .subject(notice.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                notice.text.clone(),
                notice.html.clone(),
            ))
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.user.clone(),
                settings.password.clone(),
            ))
            .build();

        mailer.send(email).await?;
        Ok(())
    }
}

/// Fill the fixed notification template with the payload, substituting
/// localized placeholders for absent fields.
pub fn render_notice(payload: &NotifyPayload, received_at: &str) -> NoticeMessage {
    let field = |value: &Option<String>| -> String {
        match value {
            Some(v) if !v.is_empty() => v.clone(),
            _ => FIELD_PLACEHOLDER.to_string(),
        }
    };

    let room_name = field(&payload.room_name);
    let guest_name = field(&payload.guest_name);
    let guest_phone = field(&payload.guest_phone);
    let check_in_date = field(&payload.check_in_date);
    let check_out_date = field(&payload.check_out_date);
    let guests_count = payload.guests_count.unwrap_or(1);
    let comment = match &payload.comment {
        Some(c) if !c.is_empty() => c.clone(),
        _ => COMMENT_PLACEHOLDER.to_string(),
    };

    let subject = format!("Новое бронирование: {}", room_name);

    let text = format!(
        "Новое бронирование - Турбаза \"Сосны\"\n\
         \n\
         Номер: {room_name}\n\
         Гость: {guest_name}\n\
         Телефон: {guest_phone}\n\
         Дата заезда: {check_in_date}\n\
         Дата выезда: {check_out_date}\n\
         Количество гостей: {guests_count}\n\
         Комментарий: {comment}\n\
         \n\
         Получено: {received_at}\n"
    );

    let info_rows = [
        ("Номер", room_name.as_str()),
        ("Гость", guest_name.as_str()),
        ("Телефон", guest_phone.as_str()),
        ("Дата заезда", check_in_date.as_str()),
        ("Дата выезда", check_out_date.as_str()),
    ]
    .iter()
    .map(|(label, value)| info_row(label, value))
    .chain([
        info_row("Количество гостей", &guests_count.to_string()),
        info_row("Комментарий", &comment),
    ])
    .collect::<String>();

    let html = format!(
        concat!(
            "<html>\n",
            "  <head>\n",
            "    <style>\n",
            "      body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}\n",
            "      .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}\n",
            "      .header {{ background: linear-gradient(135deg, #10b981 0%, #059669 100%); ",
            "color: white; padding: 20px; border-radius: 10px 10px 0 0; }}\n",
            "      .content {{ background: #f9fafb; padding: 30px; border-radius: 0 0 10px 10px; }}\n",
            "      .info-row {{ margin: 15px 0; padding: 10px; background: white; border-radius: 5px; }}\n",
            "      .label {{ font-weight: bold; color: #10b981; }}\n",
            "      .value {{ color: #333; }}\n",
            "    </style>\n",
            "  </head>\n",
            "  <body>\n",
            "    <div class=\"container\">\n",
            "      <div class=\"header\">\n",
            "        <h1 style=\"margin: 0;\">🌲 Новое бронирование!</h1>\n",
            "        <p style=\"margin: 5px 0 0 0;\">Турбаза \"Сосны\"</p>\n",
            "      </div>\n",
            "      <div class=\"content\">\n",
            "{info_rows}",
            "        <p style=\"margin-top: 20px; color: #6b7280; font-size: 14px;\">\n",
            "          Получено: {received_at}\n",
            "        </p>\n",
            "      </div>\n",
            "    </div>\n",
            "  </body>\n",
            "</html>\n",
        ),
        info_rows = info_rows,
        received_at = received_at,
    );

    NoticeMessage {
        subject,
        text,
        html,
    }
}

fn info_row(label: &str, value: &str) -> String {
    format!(
        concat!(
            "        <div class=\"info-row\">\n",
            "          <span class=\"label\">{}:</span>\n",
            "          <span class=\"value\">{}</span>\n",
            "        </div>\n",
        ),
        label, value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingTransport {
        calls: AtomicUsize,
        fail_with: Option<String>,
    }

    impl RecordingTransport {
        fn new(fail_with: Option<String>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail_with,
            })
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(
            &self,
            _settings: &MailSettings,
            _notice: &NoticeMessage,
        ) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(msg) => Err(NotifyError::Build(msg.clone())),
                None => Ok(()),
            }
        }
    }

    fn settings() -> MailSettings {
        MailSettings {
            host: "smtp.example.com".into(),
            port: 587,
            user: "mailer@example.com".into(),
            password: "secret".into(),
            admin_email: "admin@example.com".into(),
        }
    }

    #[tokio::test]
    async fn skips_without_settings_and_never_calls_transport() {
        let transport = RecordingTransport::new(None);
        let service = MailService::new(None, transport.clone());

        let outcome = service.notify(&NotifyPayload::default()).await;
        assert_eq!(outcome, NotifyOutcome::Skipped);
        assert!(outcome.is_success());
        assert!(outcome.message().contains("skipped"));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn sends_when_configured() {
        let transport = RecordingTransport::new(None);
        let service = MailService::new(Some(settings()), transport.clone());

        let outcome = service.notify(&NotifyPayload::default()).await;
        assert_eq!(outcome, NotifyOutcome::Sent);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_not_propagated() {
        let transport = RecordingTransport::new(Some("connection refused".into()));
        let service = MailService::new(Some(settings()), transport);

        let outcome = service.notify(&NotifyPayload::default()).await;
        assert!(!outcome.is_success());
        assert!(outcome.message().starts_with("Failed to send email:"));
        assert!(outcome.message().contains("connection refused"));
    }

    #[test]
    fn render_substitutes_placeholders_for_absent_fields() {
        let notice = render_notice(&NotifyPayload::default(), "01.06.2024 12:00");

        assert_eq!(notice.subject, "Новое бронирование: Не указано");
        assert!(notice.text.contains("Гость: Не указано"));
        assert!(notice.text.contains("Комментарий: Нет"));
        assert!(notice.text.contains("Количество гостей: 1"));
        assert!(notice.text.contains("Получено: 01.06.2024 12:00"));
        assert!(notice.html.contains("Не указано"));
    }

    #[test]
    fn render_interpolates_provided_fields() {
        let payload = NotifyPayload {
            room_name: Some("Deluxe A".into()),
            guest_name: Some("Ivan".into()),
            guest_phone: Some("+79001234567".into()),
            check_in_date: Some("2024-06-01".into()),
            check_out_date: Some("2024-06-05".into()),
            guests_count: Some(3),
            comment: Some("late arrival".into()),
        };
        let notice = render_notice(&payload, "01.06.2024 12:00");

        assert_eq!(notice.subject, "Новое бронирование: Deluxe A");
        assert!(notice.text.contains("Номер: Deluxe A"));
        assert!(notice.text.contains("Количество гостей: 3"));
        assert!(notice.html.contains("<span class=\"value\">Ivan</span>"));
        assert!(notice.html.contains("late arrival"));
    }
}
