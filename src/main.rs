use log::*;
use std::env;

use donatoy::{AppOptions, DonationToolApp, Notifier, NotifyRequest};

const USAGE: &str =
    "usage: donatoy [--hide-anon] [--to <addresses>] [--user-id <credential>] <file.csv>...";

/// Stands in for the external mail service: prints every request it is
/// handed as JSON
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, request: &NotifyRequest) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(request)?);
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut options = AppOptions::default();
    let mut paths = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--hide-anon" => options.hide_anonymous = true,
            "--to" => {
                options.addresses = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--to needs a value\n{}", USAGE))?;
            }
            "--user-id" => {
                options.credential = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--user-id needs a value\n{}", USAGE))?;
            }
            flag if flag.starts_with("--") => {
                return Err(anyhow::anyhow!("unknown flag {}\n{}", flag, USAGE));
            }
            _ => paths.push(arg),
        }
    }

    if paths.is_empty() {
        return Err(anyhow::anyhow!(USAGE));
    }

    info!("Reading {} CSV file(s)", paths.len());

    let mut notifier = ConsoleNotifier;
    DonationToolApp::run(&paths, options, &mut notifier, true)?;

    Ok(())
}
