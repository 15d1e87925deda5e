//! IMAP resume source: saves resume attachments of unread messages

use crate::config::MailConfig;
use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use log::{debug, info, warn};
use mailparse::{MailHeaderMap, ParsedMail};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct InboxSource {
    host: String,
    port: u16,
    username: String,
    password: String,
    mailbox: String,
    save_dir: PathBuf,
}

impl InboxSource {
    pub fn new(mail: &MailConfig, save_dir: impl Into<PathBuf>) -> Self {
        Self {
            host: mail.imap_host.clone(),
            port: mail.imap_port,
            username: mail.address.clone(),
            password: mail.app_password.clone(),
            mailbox: mail.mailbox.clone(),
            save_dir: save_dir.into(),
        }
    }

    /// Download resume attachments from every unread message into the save
    /// directory and return the written paths. Fetching marks messages seen.
    pub async fn fetch_resumes(&self) -> Result<Vec<PathBuf>> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.fetch_blocking())
            .await
            .map_err(|e| ScreenerError::Inbox(format!("Inbox task failed: {}", e)))?
    }

    fn fetch_blocking(&self) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.save_dir)?;

        let tls = native_tls::TlsConnector::builder()
            .build()
            .map_err(|e| ScreenerError::Inbox(format!("TLS setup failed: {}", e)))?;

        info!("Connecting to {}:{}", self.host, self.port);
        let client = imap::connect((self.host.as_str(), self.port), &self.host, &tls)?;
        let mut session = client
            .login(&self.username, &self.password)
            .map_err(|(e, _)| ScreenerError::Inbox(format!("Login failed: {}", e)))?;

        session.select(&self.mailbox)?;
        let mut unseen: Vec<u32> = session.search("UNSEEN")?.into_iter().collect();
        unseen.sort_unstable();
        info!("{} unread message(s) in {}", unseen.len(), self.mailbox);

        let mut saved = Vec::new();
        for seq in unseen {
            let messages = session.fetch(seq.to_string(), "RFC822")?;
            for message in messages.iter() {
                let Some(raw) = message.body() else {
                    debug!("Message {} has no body", seq);
                    continue;
                };

                let attachments = match resume_attachments(raw) {
                    Ok(attachments) => attachments,
                    Err(e) => {
                        warn!("Skipping message {}: {}", seq, e);
                        continue;
                    }
                };

                for attachment in attachments {
                    saved.push(save_attachment(&self.save_dir, &attachment)?);
                }
            }
        }

        session.logout()?;
        Ok(saved)
    }
}

/// `.pdf`/`.docx` attachments of one RFC822 message, in MIME walk order.
/// Parts without a `Content-Disposition` header are not attachments. The
/// file name comes from its `filename` parameter, else from the
/// `Content-Type` `name` parameter.
pub fn resume_attachments(raw: &[u8]) -> Result<Vec<Attachment>> {
    let mail = mailparse::parse_mail(raw)
        .map_err(|e| ScreenerError::Inbox(format!("Unparseable message: {}", e)))?;

    let mut found = Vec::new();
    collect_attachments(&mail, &mut found)?;
    Ok(found)
}

fn collect_attachments(part: &ParsedMail, found: &mut Vec<Attachment>) -> Result<()> {
    if part.ctype.mimetype.starts_with("multipart/") {
        for sub in &part.subparts {
            collect_attachments(sub, found)?;
        }
        return Ok(());
    }

    if part.headers.get_first_value("Content-Disposition").is_none() {
        return Ok(());
    }

    // Some clients only name the file in Content-Type.
    let disposition = part.get_content_disposition();
    let Some(filename) = disposition
        .params
        .get("filename")
        .or_else(|| part.ctype.params.get("name"))
        .and_then(|f| safe_file_name(f))
    else {
        return Ok(());
    };

    if !FileType::from_path(Path::new(&filename)).is_resume_format() {
        return Ok(());
    }

    let content = part
        .get_body_raw()
        .map_err(|e| ScreenerError::Inbox(format!("Undecodable attachment {}: {}", filename, e)))?;

    found.push(Attachment { filename, content });
    Ok(())
}

/// Final path component only, so a crafted name cannot escape the folder.
fn safe_file_name(name: &str) -> Option<String> {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.trim().is_empty())
}

fn save_attachment(dir: &Path, attachment: &Attachment) -> Result<PathBuf> {
    let path = dir.join(&attachment.filename);
    std::fs::write(&path, &attachment.content)?;
    info!("Saved resume: {}", attachment.filename);
    Ok(path)
}
