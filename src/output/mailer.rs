//! Feedback delivery over SMTP, or to stdout/files for dry runs

use crate::config::MailConfig;
use crate::error::{Result, ScreenerError};
use crate::output::feedback::FeedbackMessage;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{error, info};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub trait FeedbackSender {
    fn send(&self, message: &FeedbackMessage) -> impl Future<Output = Result<()>> + Send;
}

/// Implicit-TLS SMTP relay authenticated as the screening mailbox.
#[derive(Clone)]
pub struct SmtpMailer {
    from: String,
    username: String,
    password: String,
    host: String,
    port: u16,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(mail: &MailConfig) -> Self {
        Self {
            from: mail.address.clone(),
            username: mail.address.clone(),
            password: mail.app_password.clone(),
            host: mail.smtp_host.clone(),
            port: mail.smtp_port,
            timeout: Duration::from_secs(mail.smtp_timeout_secs),
        }
    }

    fn deliver(&self, email: Message) -> Result<()> {
        let credentials = Credentials::new(self.username.clone(), self.password.clone());
        let transport = SmtpTransport::relay(&self.host)
            .map_err(|e| ScreenerError::Mail(format!("Invalid SMTP relay {}: {}", self.host, e)))?
            .port(self.port)
            .timeout(Some(self.timeout))
            .credentials(credentials)
            .build();

        transport
            .send(&email)
            .map(|_| ())
            .map_err(|e| ScreenerError::Mail(e.to_string()))
    }
}

impl FeedbackSender for SmtpMailer {
    async fn send(&self, message: &FeedbackMessage) -> Result<()> {
        let email = build_email(&self.from, message)?;
        let mailer = self.clone();

        let result = tokio::task::spawn_blocking(move || mailer.deliver(email))
            .await
            .map_err(|e| ScreenerError::Mail(format!("Mail task failed: {}", e)))
            .and_then(|sent| sent);

        match &result {
            Ok(()) => info!("Feedback email sent to {} for {}", message.to, message.resume),
            Err(e) => error!("Failed to send feedback email for {}: {}", message.resume, e),
        }
        result
    }
}

pub fn build_email(from: &str, message: &FeedbackMessage) -> Result<Message> {
    let from: Mailbox = from
        .parse()
        .map_err(|e| ScreenerError::Mail(format!("Invalid sender address {}: {}", from, e)))?;
    let to: Mailbox = message.to.parse().map_err(|e| {
        ScreenerError::Mail(format!("Invalid recipient address {}: {}", message.to, e))
    })?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| ScreenerError::Mail(format!("Failed to build email: {}", e)))
}

/// Prints each message, or writes `<resume-stem>.txt` into an outbox directory.
#[derive(Debug, Clone, Default)]
pub struct DryRunSender {
    outbox: Option<PathBuf>,
}

impl DryRunSender {
    pub fn new(outbox: Option<PathBuf>) -> Self {
        Self { outbox }
    }

    fn outbox_path(dir: &Path, resume: &str) -> PathBuf {
        let stem = Path::new(resume)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "feedback".to_string());
        dir.join(format!("{}.txt", stem))
    }
}

impl FeedbackSender for DryRunSender {
    async fn send(&self, message: &FeedbackMessage) -> Result<()> {
        let rendered = format!(
            "To: {}\nSubject: {}\n\n{}",
            message.to, message.subject, message.body
        );

        match &self.outbox {
            Some(dir) => {
                tokio::fs::create_dir_all(dir).await?;
                let path = Self::outbox_path(dir, &message.resume);
                tokio::fs::write(&path, rendered).await?;
                info!("Dry run: feedback for {} written to {}", message.resume, path.display());
            }
            None => {
                println!("{}", rendered);
                info!("Dry run: feedback for {} printed", message.resume);
            }
        }
        Ok(())
    }
}
