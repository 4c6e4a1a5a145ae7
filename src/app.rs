use std::path::{Path, PathBuf};

use log::*;
use threadpool::ThreadPool;

use crate::controller::{run_loop, Controller, Event};
use crate::notify::Notifier;
use crate::table;

/// Startup options for one run, the counterpart of the form fields and the
/// filter button in a UI
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    /// Hide anonymous donations in the rendered table
    pub hide_anonymous: bool,
    /// Comma separated alert recipients
    pub addresses: String,
    /// Mail service credential
    pub credential: String,
}

/// The main application
pub struct DonationToolApp {}

impl DonationToolApp {
    /// Runs the tool over the CSV files in `paths`
    ///
    /// Files are read on a worker pool and may finish in any order, like
    /// several files dropped on the widget at once; their loaded events are
    /// drained one at a time so each ingestion runs to completion before
    /// the next starts. A file that cannot be read is reported and never
    /// fires its event. Returns the controller so callers can inspect the
    /// final state
    pub fn run<P: AsRef<Path>>(
        paths: &[P],
        options: AppOptions,
        notifier: &mut dyn Notifier,
        report_results: bool,
    ) -> anyhow::Result<Controller> {
        let mut controller = Controller::new();
        if options.hide_anonymous {
            controller.apply(Event::ToggleAnonFilter);
        }
        controller.apply(Event::SetAddresses(options.addresses));
        controller.apply(Event::SetCredential(options.credential));

        // every pending load fits in the queue, a worker never blocks
        let (events_tx, events_rx) = crossbeam_channel::bounded::<Event>(paths.len().max(1));

        let pool = ThreadPool::new(num_cpus::get());
        for path in paths {
            let path: PathBuf = path.as_ref().to_path_buf();
            let events_tx = events_tx.clone();
            pool.execute(move || match std::fs::read_to_string(&path) {
                Ok(text) => {
                    let event = Event::FileLoaded {
                        source: path.display().to_string(),
                        text,
                    };
                    // the receiver lives until the loop below is done
                    let _ = events_tx.send(event);
                }
                Err(err) => error!("Could not read {}. {}", path.display(), err),
            });
        }
        drop(events_tx);

        run_loop(&mut controller, events_rx, notifier);

        if report_results {
            Self::report(&controller);
        }

        Ok(controller)
    }

    /// Print the table, the running total and the latest batch note
    fn report(controller: &Controller) {
        let store = controller.store();

        println!(
            "{}",
            table::render(store.keys(), store.records(), controller.hide_anonymous())
        );
        println!("Total donation amount: ${:.2}", store.total_value());
        if let Some(note) = controller.note() {
            println!("{}", note);
        }
    }
}
