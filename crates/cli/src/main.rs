//! Host shell for the BPOU locator engine: loads the four data sources,
//! runs one search, and renders the resulting `DisplayContent` as plain
//! text. Rendering here is a pure projection of the engine's output; a web
//! host would project the same values into DOM instead.

use anyhow::Result;
use bpou_engine::{Channel, ContactChannels, DisplayContent, Session, BPOU_UNKNOWN_MESSAGE};
use bpou_geocode::{Nominatim, StructuredQuery};
use bpou_geodata::{load_all, DataSources, Fetch, FileFetcher, HttpFetcher};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "bpou-locator",
    about = "Resolve an address to its BPOU and Congressional District"
)]
struct Args {
    /// Directory or base URL holding BPOUMap.geojson, CDMap.geojson,
    /// bpouContacts.json and cdContacts.json
    #[arg(long, default_value = ".")]
    data: String,

    /// Free-text address to search
    #[arg(long, conflicts_with_all = ["street", "city", "zip"])]
    address: Option<String>,

    /// Street line of a structured search
    #[arg(long)]
    street: Option<String>,

    /// City of a structured search
    #[arg(long)]
    city: Option<String>,

    /// ZIP code of a structured search
    #[arg(long)]
    zip: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sources = DataSources {
        bpou_boundaries: join_source(&args.data, "BPOUMap.geojson"),
        cd_boundaries: join_source(&args.data, "CDMap.geojson"),
        bpou_contacts: join_source(&args.data, "bpouContacts.json"),
        cd_contacts: join_source(&args.data, "cdContacts.json"),
    };

    let fetcher: Box<dyn Fetch> = if args.data.starts_with("http://") || args.data.starts_with("https://") {
        Box::new(HttpFetcher::new()?)
    } else {
        Box::new(FileFetcher)
    };

    let (store, directory, report) = load_all(fetcher.as_ref(), &sources).await;
    if let Some(notice) = report.notice() {
        eprintln!("WARNING: {notice}");
    }

    let mut session = Session::new(store, directory, Nominatim::new()?).with_load_report(&report);

    let outcome = if let Some(address) = &args.address {
        session.search_text(address).await
    } else {
        let query = StructuredQuery {
            street: args.street.unwrap_or_default(),
            city: args.city.unwrap_or_default(),
            zip: args.zip.unwrap_or_default(),
        };
        session.search_structured(&query).await
    };

    match outcome {
        Ok(content) => {
            render(&content);
            Ok(())
        }
        Err(err) => {
            log::debug!("Search failed: {err}");
            anyhow::bail!("{}", err.user_guidance())
        }
    }
}

fn join_source(base: &str, file: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), file)
}

fn render(content: &DisplayContent) {
    if let Some(notice) = &content.fallback_notice {
        println!("{notice}");
        println!();
    }

    match &content.bpou.name {
        Some(name) => {
            println!("Your local BPOU is: {name}");
            render_channels(&content.bpou.contact);
        }
        None => println!("{BPOU_UNKNOWN_MESSAGE}"),
    }

    println!();
    println!("Your Congressional District is: {}", content.cd.id);
    render_channels(&content.cd.contact);

    println!();
    println!("Something out of date? {}", content.feedback.subject);
    println!("  {}", content.feedback.body);
}

fn render_channels(contact: &ContactChannels) {
    let channels = [
        ("Website", &contact.website),
        ("Phone", &contact.phone),
        ("Email", &contact.email),
        ("Facebook", &contact.facebook),
        ("Twitter", &contact.twitter),
        ("Meetings", &contact.meeting_info),
    ];
    for (label, channel) in channels {
        match channel {
            Channel::Available(value) => println!("  {label}: {value}"),
            Channel::NotAvailable => println!("  {label}: not available"),
        }
    }
}
