// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Notification delivery over interchangeable channels.

use crate::PipelineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(to: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A delivery channel.
pub trait Notifier {
    fn channel(&self) -> &'static str;

    /// # Errors
    ///
    /// Returns [`PipelineError::Delivery`] when the channel refuses the message.
    fn send(&self, notification: &Notification) -> Result<(), PipelineError>;
}

impl<N: Notifier + ?Sized> Notifier for Box<N> {
    fn channel(&self) -> &'static str {
        (**self).channel()
    }

    fn send(&self, notification: &Notification) -> Result<(), PipelineError> {
        (**self).send(notification)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "Email"
    }

    fn send(&self, n: &Notification) -> Result<(), PipelineError> {
        tracing::info!("[Email] To: {} | {} -> {}", n.to, n.title, n.body);
        Ok(())
    }
}

/// SMS gateway. Recipients must be in international format.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmsNotifier;

impl Notifier for SmsNotifier {
    fn channel(&self) -> &'static str {
        "SMS"
    }

    fn send(&self, n: &Notification) -> Result<(), PipelineError> {
        if !n.to.starts_with('+') {
            return Err(PipelineError::delivery(
                self.channel(),
                format!("invalid number '{}' (must start with '+')", n.to),
            ));
        }
        tracing::info!("[SMS] To: {} | {} -> {}", n.to, n.title, n.body);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PushNotifier;

impl Notifier for PushNotifier {
    fn channel(&self) -> &'static str {
        "Push"
    }

    fn send(&self, n: &Notification) -> Result<(), PipelineError> {
        tracing::info!("[Push] To: {} | {} -> {}", n.to, n.title, n.body);
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SlackNotifier;

impl Notifier for SlackNotifier {
    fn channel(&self) -> &'static str {
        "Slack"
    }

    fn send(&self, n: &Notification) -> Result<(), PipelineError> {
        tracing::info!("[Slack] Channel/User: {} | {} -> {}", n.to, n.title, n.body);
        Ok(())
    }
}

/// Single-channel service; delivery errors reach the caller.
pub struct NotificationService {
    notifier: Box<dyn Notifier>,
}

impl NotificationService {
    pub fn new(notifier: impl Notifier + 'static) -> Self {
        Self {
            notifier: Box::new(notifier),
        }
    }

    pub fn channel(&self) -> &'static str {
        self.notifier.channel()
    }

    pub fn notify(&self, to: &str, title: &str, body: &str) -> Result<(), PipelineError> {
        self.notifier.send(&Notification::new(to, title, body))
    }
}

/// Result of a fan-out.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FanOutReport {
    pub delivered: Vec<&'static str>,
    pub failed: Vec<(&'static str, PipelineError)>,
}

impl FanOutReport {
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Best-effort delivery over several channels.
///
/// Every channel is tried; a failing channel is logged and skipped.
pub struct MultiChannelNotificationService {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl MultiChannelNotificationService {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    /// Email, SMS, Push and Slack.
    pub fn all_channels() -> Self {
        Self::new(vec![
            Box::new(EmailNotifier),
            Box::new(SmsNotifier),
            Box::new(PushNotifier),
            Box::new(SlackNotifier),
        ])
    }

    pub fn channels(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.channel()).collect()
    }

    pub fn notify_all(&self, to: &str, title: &str, body: &str) -> FanOutReport {
        let notification = Notification::new(to, title, body);
        let mut report = FanOutReport::default();

        for notifier in &self.notifiers {
            match notifier.send(&notification) {
                Ok(()) => report.delivered.push(notifier.channel()),
                Err(e) => {
                    tracing::warn!(channel = notifier.channel(), error = %e, "channel failed");
                    report.failed.push((notifier.channel(), e));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sms_requires_international_number() {
        let sms = SmsNotifier;
        assert!(sms.send(&Notification::new("+573001234567", "Code", "9999")).is_ok());

        let err = sms
            .send(&Notification::new("3001234567", "Code", "9999"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Delivery { ref channel, .. } if channel == "SMS"));
    }

    #[test]
    fn single_channel_propagates_failure() {
        let service = NotificationService::new(SmsNotifier);
        assert!(service.notify("3001234567", "Code", "9999").is_err());

        let service = NotificationService::new(SlackNotifier);
        assert_eq!(service.channel(), "Slack");
        assert!(service.notify("#general", "Deploy", "v1.2.0").is_ok());
    }

    #[test]
    fn fan_out_skips_failing_channel() {
        let service = MultiChannelNotificationService::all_channels();

        let report = service.notify_all("3001234567", "Alert", "SMS fails, others continue");

        assert_eq!(report.delivered, vec!["Email", "Push", "Slack"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "SMS");
        assert!(!report.all_delivered());
    }

    #[test]
    fn fan_out_with_valid_number_delivers_everywhere() {
        let service = MultiChannelNotificationService::all_channels();
        let report = service.notify_all("+573001234567", "Alert", "all good");
        assert!(report.all_delivered());
        assert_eq!(report.delivered.len(), 4);
    }
}
