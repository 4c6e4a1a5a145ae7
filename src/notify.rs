use log::*;
use serde::Serialize;

use crate::email_list::EmailAddressList;
use crate::records::DonationRecord;
use crate::stats;

/// Service the external dispatch routes requests through
pub const SERVICE_ID: &str = "default_service";
/// Message template the service fills with our payload
pub const TEMPLATE_ID: &str = "default";
/// Subject line for every batch alert
pub const SUBJECT: &str = "Donation Tool Alert";

/// Payload the mail service fills into its template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotifyPayload {
    pub subject: String,
    pub content: String,
    /// Recipients as one comma separated field, the shape the service wants
    pub to_addresses: String,
}

/// One prepared notification, everything the external service needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotifyRequest {
    pub service_id: &'static str,
    pub template_id: &'static str,
    /// Trimmed mail service credential the user supplied
    pub user_id: String,
    pub payload: NotifyPayload,
}

/// External notification capability
/// Injected at the boundary so tests can substitute a recording fake
pub trait Notifier {
    fn notify(&mut self, request: &NotifyRequest) -> anyhow::Result<()>;
}

/// Outcome of one notification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyStatus {
    /// The notifier accepted the request
    Sent,
    /// The gate rejected the recipient list or the credential, nothing sent
    Skipped,
    /// The notifier reported an error; there are no retries
    Failed,
}

/// Format the human readable summary for one ingested batch
///
/// This text becomes the status note and the alert body, in the shape
/// `Add #1: 3 donations added: value $ 199.50, 33% are anonymous, 15%
/// anonymous by value.` An empty batch has no shares to compute and
/// reports both percentages as 0 instead of NaN
pub fn compose_summary(batch_index: usize, records: &[DonationRecord]) -> String {
    let value = stats::total_value(records);
    let share = if records.is_empty() {
        stats::AnonymousShare {
            count_percent: 0.0,
            value_percent: 0.0,
        }
    } else {
        stats::anonymous_share(records)
    };

    format!(
        "Add #{}: {} donations added: value $ {:.2}, {}% are anonymous, {}% anonymous by value.",
        batch_index,
        records.len(),
        value,
        share.count_percent,
        share.value_percent
    )
}

/// Build the request for one batch alert, if the gate allows it
///
/// `Some` only when the recipient input parses as a valid address list and
/// the trimmed credential is non empty; anything else suppresses the send
/// without being an error
pub fn prepare_request(
    summary: &str,
    addresses_input: &str,
    credential: &str,
) -> Option<NotifyRequest> {
    let addresses = EmailAddressList::parse(addresses_input)?;

    let credential = credential.trim();
    if credential.is_empty() {
        return None;
    }

    Some(NotifyRequest {
        service_id: SERVICE_ID,
        template_id: TEMPLATE_ID,
        user_id: credential.to_string(),
        payload: NotifyPayload {
            subject: SUBJECT.to_string(),
            content: summary.to_string(),
            to_addresses: addresses.to_string(),
        },
    })
}

/// Hand a prepared request to the notifier
/// Delivery failure is logged and reported as `Failed`, never retried
pub fn dispatch(notifier: &mut dyn Notifier, request: &NotifyRequest) -> NotifyStatus {
    match notifier.notify(request) {
        Ok(()) => NotifyStatus::Sent,
        Err(err) => {
            warn!("Alert was not delivered. {}", err);
            NotifyStatus::Failed
        }
    }
}

/// Gate and dispatch in one step: validate the recipients and credential,
/// then send `summary` through the notifier
pub fn maybe_notify(
    notifier: &mut dyn Notifier,
    summary: &str,
    addresses_input: &str,
    credential: &str,
) -> NotifyStatus {
    match prepare_request(summary, addresses_input, credential) {
        Some(request) => dispatch(notifier, &request),
        None => NotifyStatus::Skipped,
    }
}
