//! Welcome mail over the platform mail transport

use platform::mail::{Mailer, OutgoingMail};

use crate::domain::entity::user::User;
use crate::domain::repository::WelcomeNotifier;
use crate::error::{AuthError, AuthResult};

pub const WELCOME_SUBJECT: &str = "Welcome to Our Medical Site!";

pub fn welcome_body(user_name: &str) -> String {
    format!(
        "Hello {user_name},\n\nThanks for registering with us!\n\nBest regards,\nMedical Island Team"
    )
}

#[derive(Clone)]
pub struct MailWelcomeNotifier<M>
where
    M: Mailer,
{
    mailer: M,
}

impl<M> MailWelcomeNotifier<M>
where
    M: Mailer,
{
    pub fn new(mailer: M) -> Self {
        Self { mailer }
    }
}

impl<M> WelcomeNotifier for MailWelcomeNotifier<M>
where
    M: Mailer + Sync,
{
    async fn send_welcome(&self, user: &User) -> AuthResult<()> {
        let Some(email) = &user.email else {
            return Ok(());
        };

        let mail = OutgoingMail::new(
            email.as_str(),
            WELCOME_SUBJECT,
            welcome_body(user.user_name.original()),
        );

        self.mailer
            .send(mail)
            .await
            .map_err(|e| AuthError::Internal(format!("Welcome mail: {e}")))
    }
}
