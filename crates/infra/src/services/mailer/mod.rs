use crate::config::SmtpConfig;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Mutex;
use tracing::info;

/// Outbound notification channel. Every notification carries a rich body
/// and a plain text fallback with the same content. A send either
/// succeeds or fails, there is no retry layer behind this trait.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> anyhow::Result<()>;
}

/// Delivers over SMTP with STARTTLS, used outside of tests
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid SMTP_FROM mailbox {}: {}", config.from, e))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> anyhow::Result<()> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid recipient mailbox {}: {}", to, e))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to.clone())
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text.to_string(),
                html.to_string(),
            ))?;

        self.transport.send(message).await?;
        info!("Email sent to {}", to);
        Ok(())
    }
}

/// A message recorded by the `InMemoryMailer`
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Records messages instead of delivering them, used when testing.
/// Setting `fail_sends` makes every send error so that tests can walk
/// the dispatch failure path.
pub struct InMemoryMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail_sends: std::sync::atomic::AtomicBool,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(vec![]),
            fail_sends: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn outbox(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> anyhow::Result<()> {
        if self.fail_sends.load(std::sync::atomic::Ordering::SeqCst) {
            anyhow::bail!("Mailer is configured to fail sends");
        }
        self.sent.lock().unwrap().push(OutgoingEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
