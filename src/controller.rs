use crossbeam_channel::Receiver;
use log::*;

use crate::notify::{self, Notifier, NotifyRequest};
use crate::store::DonationStore;

/// A discrete input to the tool, delivered one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A dropped file finished loading
    FileLoaded { source: String, text: String },
    /// Flip the anonymous donor filter on the rendered table
    ToggleAnonFilter,
    /// Replace the alert recipient input
    SetAddresses(String),
    /// Replace the mail service credential
    SetCredential(String),
}

/// A side effect the controller wants performed on its behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Hand this request to the external notifier
    Notify(NotifyRequest),
}

/// Owns the tool state and reacts to events
///
/// All mutation goes through [`Controller::apply`]: one event in, zero or
/// more effects out, no I/O of its own. Every reaction is deterministic and
/// can be tested without a UI or a live mail service
#[derive(Debug, Default)]
pub struct Controller {
    store: DonationStore,
    hide_anonymous: bool,
    addresses: String,
    credential: String,
    note: Option<String>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// React to one event, returning the effects to perform
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::FileLoaded { source, text } => self.file_loaded(&source, &text),
            Event::ToggleAnonFilter => {
                self.hide_anonymous = !self.hide_anonymous;
                Vec::new()
            }
            Event::SetAddresses(addresses) => {
                self.addresses = addresses;
                Vec::new()
            }
            Event::SetCredential(credential) => {
                self.credential = credential;
                Vec::new()
            }
        }
    }

    /// Ingest a loaded file as the next batch: remember its summary as the
    /// note and ask for an alert when the gate allows one. A file that does
    /// not ingest is reported and changes nothing
    fn file_loaded(&mut self, source: &str, text: &str) -> Vec<Effect> {
        let batch = match self.store.ingest(text) {
            Ok(batch) => batch,
            Err(err) => {
                error!("Could not ingest {}. {}", source, err);
                return Vec::new();
            }
        };

        info!(
            "{}: batch #{} added {} record(s)",
            source,
            batch.index,
            batch.records.len()
        );

        let summary = notify::compose_summary(batch.index, &batch.records);
        self.note = Some(summary.clone());

        match notify::prepare_request(&summary, &self.addresses, &self.credential) {
            Some(request) => vec![Effect::Notify(request)],
            None => Vec::new(),
        }
    }

    /// The accumulated donation table
    pub fn store(&self) -> &DonationStore {
        &self.store
    }

    /// Whether the rendered table hides anonymous donations
    pub fn hide_anonymous(&self) -> bool {
        self.hide_anonymous
    }

    /// The latest batch summary, once a batch has been ingested
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Drain `events` until every sender is gone, applying each event to
/// completion before the next and performing the effects it asks for
///
/// File loads may finish in any order; this loop is what serializes the
/// store mutations into a strict append sequence
pub fn run_loop(controller: &mut Controller, events: Receiver<Event>, notifier: &mut dyn Notifier) {
    for event in events {
        for effect in controller.apply(event) {
            match effect {
                Effect::Notify(request) => {
                    let status = notify::dispatch(notifier, &request);
                    debug!("batch alert: {:?}", status);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DONATIONS: &str = "donor_name,donation_amount\n\
                             Ada Lovelace,120.00\n\
                             ,30.00\n\
                             Grace Hopper,49.50\n";

    #[derive(Default)]
    struct RecordingNotifier {
        requests: Vec<NotifyRequest>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, request: &NotifyRequest) -> anyhow::Result<()> {
            self.requests.push(request.clone());
            Ok(())
        }
    }

    /*  User scenario: recipients and credential are set up, then a file
        drops. The note carries the batch summary and one alert effect
        comes out with that summary as its body
    */
    #[test]
    fn test_file_loaded_notes_the_batch_and_asks_for_an_alert() {
        let mut controller = Controller::new();

        assert!(controller
            .apply(Event::SetAddresses("alerts@example.com".to_string()))
            .is_empty());
        assert!(controller
            .apply(Event::SetCredential(" user_4711 ".to_string()))
            .is_empty());

        let effects = controller.apply(Event::FileLoaded {
            source: "drop".to_string(),
            text: DONATIONS.to_string(),
        });

        let note = controller.note().expect("a batch was ingested");
        assert_eq!(
            note,
            "Add #0: 3 donations added: value $ 199.50, \
             33% are anonymous, 15% anonymous by value."
        );
        assert_eq!(controller.store().records().len(), 3);

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Notify(request) => {
                assert_eq!(request.user_id, "user_4711");
                assert_eq!(request.payload.content, note);
                assert_eq!(request.payload.to_addresses, "alerts@example.com");
            }
        }
    }

    // without recipients and a credential the note still updates,
    // there is just nothing to send
    #[test]
    fn test_file_loaded_with_a_closed_gate_emits_nothing() {
        let mut controller = Controller::new();

        let effects = controller.apply(Event::FileLoaded {
            source: "drop".to_string(),
            text: DONATIONS.to_string(),
        });

        assert!(effects.is_empty());
        assert!(controller.note().is_some());
        assert_eq!(controller.store().batch_count(), 1);
    }

    // a file that does not ingest leaves every piece of state untouched
    #[test]
    fn test_failed_ingest_changes_nothing() {
        let mut controller = Controller::new();

        let effects = controller.apply(Event::FileLoaded {
            source: "empty".to_string(),
            text: "  \n ".to_string(),
        });

        assert!(effects.is_empty());
        assert!(controller.note().is_none());
        assert_eq!(controller.store().batch_count(), 0);
        assert!(controller.store().records().is_empty());
    }

    #[test]
    fn test_toggle_anon_filter_flips_the_flag() {
        let mut controller = Controller::new();
        assert!(!controller.hide_anonymous());

        controller.apply(Event::ToggleAnonFilter);
        assert!(controller.hide_anonymous());

        controller.apply(Event::ToggleAnonFilter);
        assert!(!controller.hide_anonymous());
    }

    /*  The whole loop: events queued ahead of time drain one at a time,
        every batch lands in the store and every alert reaches the fake
        notifier in batch order
    */
    #[test]
    fn test_run_loop_drains_events_in_order() {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();

        events_tx
            .send(Event::SetAddresses("alerts@example.com".to_string()))
            .unwrap();
        events_tx
            .send(Event::SetCredential("user_4711".to_string()))
            .unwrap();
        events_tx
            .send(Event::FileLoaded {
                source: "first.csv".to_string(),
                text: DONATIONS.to_string(),
            })
            .unwrap();
        events_tx
            .send(Event::FileLoaded {
                source: "second.csv".to_string(),
                text: "donor_name,donation_amount\n,10.00\n".to_string(),
            })
            .unwrap();
        drop(events_tx);

        let mut controller = Controller::new();
        let mut notifier = RecordingNotifier::default();
        run_loop(&mut controller, events_rx, &mut notifier);

        assert_eq!(controller.store().batch_count(), 2);
        assert_eq!(controller.store().records().len(), 4);

        assert_eq!(notifier.requests.len(), 2);
        assert!(notifier.requests[0].payload.content.starts_with("Add #0: "));
        assert!(notifier.requests[1].payload.content.starts_with("Add #1: "));
        assert_eq!(
            notifier.requests[1].payload.content,
            controller.note().unwrap()
        );
    }
}
