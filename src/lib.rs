// A donation table tool as a library: CSV ingestion, an accumulated
// in-memory table, per batch statistics and optional email alerts.

pub mod app;
pub mod controller;
pub mod csv_parser;
pub mod email_list;
pub mod notify;
pub mod records;
pub mod stats;
pub mod store;
pub mod table;

pub use app::{AppOptions, DonationToolApp};
pub use controller::{run_loop, Controller, Effect, Event};
pub use csv_parser::ParsedCsv;
pub use email_list::EmailAddressList;
pub use notify::{Notifier, NotifyPayload, NotifyRequest, NotifyStatus};
pub use records::DonationRecord;
pub use stats::AnonymousShare;
pub use store::{Batch, DonationStore};
