//! Email notifications for leave-request state changes.
//!
//! Dispatch is fire-and-forget: the ledger hands an event to a [`Notifier`]
//! after its transaction commits and never waits for or inspects the result.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info, warn};

use crate::config::EmailConfig;
use crate::model::employee::Employee;
use crate::model::leave_request::{LeaveRequest, LeaveStatus, LeaveType};

#[derive(Debug, Clone, PartialEq)]
pub struct LeaveEvent {
    pub request_id: i64,
    pub new_status: LeaveStatus,
    pub employee_name: String,
    pub employee_email: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: f64,
}

impl LeaveEvent {
    pub fn new(request: &LeaveRequest, employee: &Employee) -> Self {
        Self {
            request_id: request.id,
            new_status: request.status,
            employee_name: employee.name.clone(),
            employee_email: employee.email.clone(),
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            days: request.days_requested,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, event: LeaveEvent);
}

/// Who an event is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Admin,
    Employee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub recipient: Recipient,
    pub subject: String,
    pub body: String,
}

/// New requests go to the admin; decisions go to the employee.
pub fn compose(event: &LeaveEvent) -> Notice {
    match event.new_status {
        LeaveStatus::Pending => Notice {
            recipient: Recipient::Admin,
            subject: "New Leave Request".to_string(),
            body: format!(
                "{} applied for {} days ({}) from {} to {}.",
                event.employee_name, event.days, event.leave_type, event.start_date, event.end_date
            ),
        },
        decided => {
            let (subject, verdict) = match decided {
                LeaveStatus::Approved => ("Leave Approved", "APPROVED"),
                _ => ("Leave Rejected", "REJECTED"),
            };
            Notice {
                recipient: Recipient::Employee,
                subject: subject.to_string(),
                body: format!(
                    "{}'s leave ({} → {}) has been {}.",
                    event.employee_name, event.start_date, event.end_date, verdict
                ),
            }
        }
    }
}

/// Used when email is switched off or not fully configured.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: LeaveEvent) {
        debug!(
            request_id = event.request_id,
            status = %event.new_status,
            "Email disabled, skipping leave notification"
        );
    }
}

pub struct SmtpNotifier {
    transport: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    admin: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig, admin_email: &str, password: &str) -> Result<Self> {
        let admin = admin_email
            .parse::<Mailbox>()
            .with_context(|| format!("ADMIN_EMAIL is not a valid address: {admin_email}"))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_server)
            .with_context(|| format!("Cannot use SMTP relay {}", config.smtp_server))?
            .port(config.smtp_port)
            .credentials(Credentials::new(admin_email.to_string(), password.to_string()))
            .build();

        Ok(Self {
            transport: Arc::new(transport),
            admin,
        })
    }

    fn build_message(&self, event: &LeaveEvent) -> Result<Message> {
        let notice = compose(event);
        let to = match notice.recipient {
            Recipient::Admin => self.admin.clone(),
            Recipient::Employee => event
                .employee_email
                .parse::<Mailbox>()
                .with_context(|| format!("Invalid employee address {}", event.employee_email))?,
        };

        Message::builder()
            .from(self.admin.clone())
            .to(to)
            .subject(notice.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(notice.body)
            .context("Failed to build email")
    }
}

impl Notifier for SmtpNotifier {
    fn notify(&self, event: LeaveEvent) {
        let message = match self.build_message(&event) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, request_id = event.request_id, "Leave notification not sent");
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let request_id = event.request_id;
        actix_web::rt::spawn(async move {
            match transport.send(message).await {
                Ok(_) => info!(request_id, "Leave notification sent"),
                Err(e) => warn!(error = %e, request_id, "Email error"),
            }
        });
    }
}

/// Picks the notifier for the configured email settings.
pub fn from_config(config: &EmailConfig) -> Arc<dyn Notifier> {
    if !config.enabled {
        return Arc::new(LogNotifier);
    }

    let (Some(admin_email), Some(password)) = (&config.admin_email, &config.password) else {
        warn!("ENABLE_EMAIL is set but ADMIN_EMAIL or EMAIL_PASSWORD is missing; email disabled");
        return Arc::new(LogNotifier);
    };

    match SmtpNotifier::new(config, admin_email, password) {
        Ok(n) => Arc::new(n),
        Err(e) => {
            warn!(error = %e, "SMTP setup failed; email disabled");
            Arc::new(LogNotifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(status: LeaveStatus) -> LeaveEvent {
        LeaveEvent {
            request_id: 7,
            new_status: status,
            employee_name: "Asha".to_string(),
            employee_email: "asha@example.com".to_string(),
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
            days: 3.0,
        }
    }

    #[test]
    fn new_request_goes_to_admin() {
        let notice = compose(&event(LeaveStatus::Pending));
        assert_eq!(notice.recipient, Recipient::Admin);
        assert_eq!(notice.subject, "New Leave Request");
        assert_eq!(
            notice.body,
            "Asha applied for 3 days (annual) from 2026-03-02 to 2026-03-04."
        );
    }

    #[test]
    fn decisions_go_to_employee() {
        let approved = compose(&event(LeaveStatus::Approved));
        assert_eq!(approved.recipient, Recipient::Employee);
        assert_eq!(approved.subject, "Leave Approved");
        assert!(approved.body.ends_with("has been APPROVED."));

        let rejected = compose(&event(LeaveStatus::Rejected));
        assert_eq!(rejected.subject, "Leave Rejected");
        assert!(rejected.body.contains("2026-03-02 → 2026-03-04"));
    }

    #[test]
    fn disabled_config_selects_log_notifier() {
        let config = EmailConfig {
            enabled: false,
            smtp_server: "smtp.example.com".to_string(),
            smtp_port: 587,
            admin_email: Some("hr@example.com".to_string()),
            password: Some("pw".to_string()),
        };
        // Only checks this does not try to reach a relay.
        from_config(&config).notify(event(LeaveStatus::Approved));
    }
}
