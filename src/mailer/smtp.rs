//! SMTP relay backed by lettre's async transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailPayload, MailSender};
use crate::config::MailConfig;
use crate::error::MailError;

/// Mail sender relaying through an authenticated SMTP server.
///
/// The transport is built once at startup and shared by all requests;
/// connections are pooled by lettre.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, payload: MailPayload) -> Result<(), MailError> {
        let message = build_message(&payload)?;
        self.transport.send(message).await?;
        Ok(())
    }
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Convert a payload into a lettre message
pub fn build_message(payload: &MailPayload) -> Result<Message, MailError> {
    let from = Mailbox::new(
        Some(payload.from_name.clone()),
        parse_address(&payload.from_address)?,
    );
    let to = Mailbox::new(None, parse_address(&payload.to)?);
    let reply_to = Mailbox::new(None, parse_address(&payload.reply_to)?);

    Ok(Message::builder()
        .from(from)
        .reply_to(reply_to)
        .to(to)
        .subject(payload.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(payload.html.clone())?)
}
