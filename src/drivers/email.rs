//! Email Driver
//!
//! Issues a random one-time code and dispatches it through the host
//! mailer, in the user's preferred language where one is set. The code
//! itself is hashed and stored by the verification engine; this driver
//! only ever sees the stored hash again when checking a submission.

use std::sync::Arc;

use crate::application::config::TwofaConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{CODE_SETTING, Mailer, SettingStore, VerificationMail};
use crate::domain::value_object::verification_code::{CodeHash, VerificationCode};
use crate::drivers::{Driver, DriverKind, Issued};
use crate::error::TwofaResult;

const MAIL_SUBJECT: &str = "Two-Factor Authentication";

/// Emailed one-time code driver
pub struct EmailDriver {
    mailer: Arc<dyn Mailer>,
    config: Arc<TwofaConfig>,
}

impl EmailDriver {
    /// Create the driver with the host mailer
    pub fn new(mailer: Arc<dyn Mailer>, config: Arc<TwofaConfig>) -> Self {
        Self { mailer, config }
    }
}

impl Driver for EmailDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Email
    }

    fn name(&self) -> &str {
        "E-mail"
    }

    fn info(&self) -> &str {
        "Please find a verifying code sent to your email-address."
    }

    fn is_installed(&self) -> bool {
        // Mail dispatch is always available through the host mailer
        true
    }

    fn send(&self, user: &User, _store: &dyn SettingStore) -> TwofaResult<Issued> {
        let code = VerificationCode::generate(self.config.code_length);

        // Render in the user's language, falling back to the system default
        let language = user
            .language
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.config.default_language.clone());

        let mail = VerificationMail {
            to: user.email.clone(),
            subject: MAIL_SUBJECT.to_string(),
            code: code.as_str().to_string(),
            language,
        };
        self.mailer.send(&mail)?;

        tracing::debug!(user_id = %user.user_id, "Verification code dispatched by mail");

        Ok(Issued::Code(code))
    }

    fn check_code(&self, user: &User, store: &dyn SettingStore, code: &str) -> TwofaResult<bool> {
        let Some(stored) = store.get(&user.user_id, CODE_SETTING)? else {
            // No pending code, nothing to match against
            return Ok(false);
        };

        Ok(CodeHash::from_stored(stored).matches(code))
    }
}
