//! Delivery over the platform mail and SMS transports

use platform::mail::{Mailer, OutgoingMail};
use platform::sms::SmsSender;

use crate::domain::repository::OtpNotifier;
use crate::domain::services::EMAIL_SUBJECT;
use crate::domain::value_objects::Destination;
use crate::error::{OtpError, OtpResult};

#[derive(Clone)]
pub struct ChannelNotifier<M, S> {
    mailer: M,
    sms: S,
}

impl<M, S> ChannelNotifier<M, S> {
    pub fn new(mailer: M, sms: S) -> Self {
        Self { mailer, sms }
    }
}

impl<M, S> OtpNotifier for ChannelNotifier<M, S>
where
    M: Mailer + Sync,
    S: SmsSender + Sync,
{
    async fn deliver(&self, destination: &Destination, text: &str) -> OtpResult<()> {
        match destination {
            Destination::Email(to) => self
                .mailer
                .send(OutgoingMail::new(to.as_str(), EMAIL_SUBJECT, text))
                .await
                .map_err(|e| OtpError::DeliveryFailed(e.to_string())),
            Destination::Phone(to) => self
                .sms
                .send(to, text)
                .await
                .map_err(|e| OtpError::DeliveryFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mail::LogMailer;
    use platform::sms::LogSmsSender;

    #[tokio::test]
    async fn routes_by_destination() {
        let notifier = ChannelNotifier::new(LogMailer, LogSmsSender);

        notifier
            .deliver(&Destination::Email("a@x.com".into()), "Your OTP is: 1")
            .await
            .unwrap();
        notifier
            .deliver(&Destination::Phone("555".into()), "Your OTP is: 1")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn transport_errors_become_delivery_failures() {
        let notifier = ChannelNotifier::new(LogMailer, LogSmsSender);

        let err = notifier
            .deliver(&Destination::Phone("  ".into()), "Your OTP is: 1")
            .await
            .unwrap_err();
        assert!(matches!(err, OtpError::DeliveryFailed(_)));
    }
}
