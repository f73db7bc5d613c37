// Application state module
// Read-only state shared by every connection

use std::sync::Arc;

use super::types::Config;
use crate::mailer::MailSender;

/// Application state
///
/// Built once at startup and never mutated afterwards.
pub struct AppState {
    pub config: Config,
    pub mailer: Arc<dyn MailSender>,
}

impl AppState {
    pub fn new(config: Config, mailer: Arc<dyn MailSender>) -> Self {
        Self { config, mailer }
    }
}
