use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use backroom::{
    config::BackendConfig,
    core::fixtures::sample_draft,
    describe::{DescriptionRequest, TemplateDescriber, describe_or_fallback},
    feed::ListingFeed,
    geo,
    listing::Listing,
    query::{PriceRange, QueryParams, SortKey},
    runtime::handle::spawn_from_config,
    types::Language,
};

#[derive(Parser, Debug)]
#[command(name = "backroom")]
#[command(about = "Browse and post room listings from the command line")]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite file overriding the configured storage path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Skip the simulated network delays
    #[arg(long, global = true)]
    no_latency: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print listings matching the filters
    List {
        /// Text matched against title and description
        #[arg(long, default_value = "")]
        search: String,

        /// Exact suburb
        #[arg(long)]
        suburb: Option<String>,

        /// Price bucket: ALL, 500-1500, 1500-2500, 2500-3500, 3500-5000
        #[arg(long, default_value = "ALL")]
        price: PriceRange,

        /// RECENT, PRICE_ASC, PRICE_DESC or SAFETY
        #[arg(long, default_value = "RECENT")]
        sort: SortKey,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Post a demo listing
    Post {
        /// Residence name
        #[arg(long)]
        title: String,

        /// Monthly rent in rand
        #[arg(long)]
        price: u32,

        /// Suburb (defaults to the sample suburb)
        #[arg(long)]
        suburb: Option<String>,

        /// Language for user-facing messages
        #[arg(long, default_value = "en")]
        lang: Language,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("backroom=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config.clone().or_else(BackendConfig::default_path) {
        Some(path) => BackendConfig::load(path)?,
        None => BackendConfig::default(),
    };
    if let Some(db) = cli.db.clone() {
        config.storage.path = Some(db);
    }
    if config.storage.path.is_none() {
        config.storage.path = BackendConfig::default_db_path();
    }
    if cli.no_latency {
        config.latency.get_listings_ms = 0;
        config.latency.add_listing_ms = 0;
        config.latency.otp_ms = 0;
    }

    let backend = spawn_from_config(&config)?;
    let mut feed = ListingFeed::new();
    let loaded = feed.refresh(&backend).await?;
    info!(count = loaded, "listings loaded");

    match cli.command {
        Command::List {
            search,
            suburb,
            price,
            sort,
            json,
        } => {
            let params = QueryParams::new()
                .search(search)
                .suburb(suburb.unwrap_or_default())
                .price(price)
                .sort(sort);
            let hits = feed.query(&params);
            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("no listings match");
            } else {
                for listing in hits {
                    print_row(listing);
                }
            }
        }
        Command::Post {
            title,
            price,
            suburb,
            lang,
        } => {
            let mut draft = sample_draft(&title, price);
            if let Some(suburb) = suburb {
                draft.address.suburb = suburb;
            }
            let pin = geo::pin_near_johannesburg();
            draft.address.lat = pin.lat;
            draft.address.lng = pin.lng;

            let request = DescriptionRequest {
                title: draft.title.clone(),
                address: draft.address.clone(),
                price: draft.price,
                amenities: draft.amenities,
            };
            draft.description = describe_or_fallback(&TemplateDescriber, &request).await?;

            match feed.post(&backend, draft, lang).await {
                Ok(listing) => {
                    print_row(&listing);
                    println!("  call: {}", listing.phone_link());
                    if let Some(link) = listing.whatsapp_link() {
                        println!("  chat: {link}");
                    }
                    if let Some(link) = listing.maps_link() {
                        println!("  map: {link}");
                    }
                    if let Some(photo) = listing.cover_photo() {
                        println!("  photo: {photo}");
                    }
                }
                Err(err) => eprintln!("{err} ({})", err.source),
            }
        }
    }

    backend.shutdown().await?;
    Ok(())
}

fn print_row(listing: &Listing) {
    let taken = if listing.availability.is_open() { "" } else { "  (taken)" };
    println!(
        "{:>14}  R{:<6} {:<12} safety {:>3}  {}{taken}",
        listing.id, listing.price, listing.address.suburb, listing.safety, listing.title
    );
}
