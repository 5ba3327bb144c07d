use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use holidaze_application::{build, App, DataSource};
use holidaze_core::auth::RegistrationForm;
use holidaze_core::booking::BookingDraft;
use holidaze_core::venue::Venue;
use holidaze_gateway::GatewayConfig;
use holidaze_infrastructure::TomlSessionStore;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "holidaze")]
#[command(about = "Command-line client for the Holidaze booking marketplace", long_about = None)]
struct Cli {
    /// Run against seeded in-memory data instead of the live service
    #[arg(long, global = true)]
    fixtures: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an existing profile
    Login {
        email: String,
        password: String,
    },
    /// Create a profile and log in
    Register {
        name: String,
        email: String,
        password: String,
        /// Repeat the password; must match
        confirm_password: String,
        /// Register as a venue manager
        #[arg(long)]
        manager: bool,
    },
    /// Drop the current session
    Logout,
    /// Show the current session
    Whoami,
    /// List venues, optionally filtered by name
    Venues {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one venue in detail
    Venue { venue_id: String },
    /// Reserve a stay at a venue
    Book {
        venue_id: String,
        /// Check-in date, YYYY-MM-DD
        from: NaiveDate,
        /// Check-out date, YYYY-MM-DD
        to: NaiveDate,
        #[arg(default_value_t = 1)]
        guests: u32,
    },
    /// List your reservations
    Bookings,
    /// List the venues you manage
    MyVenues,
    /// Replace your profile avatar
    SetAvatar { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let app = wire(cli.fixtures)?;
    app.session.restore().await;

    match cli.command {
        Commands::Login { email, password } => {
            let session = app.session.login(&email, &password).await?;
            println!("Logged in as {} <{}>", session.name, session.email);
        }
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
            manager,
        } => {
            let form = RegistrationForm {
                name,
                email,
                password,
                confirm_password,
                venue_manager: manager,
            };
            let session = app.session.register(&form).await?;
            println!("Registered and logged in as {}", session.name);
        }
        Commands::Logout => {
            app.session.logout().await;
            println!("Logged out");
        }
        Commands::Whoami => match app.session.current() {
            Some(session) => {
                let role = if session.venue_manager {
                    "venue manager"
                } else {
                    "guest"
                };
                println!("{} <{}> ({role})", session.name, session.email);
            }
            None => println!("Not logged in"),
        },
        Commands::Venues { search } => {
            let venues = match search {
                Some(query) => app.catalog.search(&query).await?,
                None => app.catalog.browse().await?,
            };
            for venue in &venues {
                print_venue_line(venue);
            }
            if venues.is_empty() {
                println!("No venues found");
            }
        }
        Commands::Venue { venue_id } => {
            let venue = app.catalog.venue(&venue_id).await?;
            print_venue_detail(&venue);
        }
        Commands::Book {
            venue_id,
            from,
            to,
            guests,
        } => {
            let draft = BookingDraft::new(from, to, guests);
            let quote = app.bookings.quote(&venue_id, &draft).await?;
            let booking = app.bookings.reserve(&venue_id, &draft).await?;
            println!(
                "Booked {} -> {} for {} guest(s), {} night(s), total {:.2} ({})",
                from, to, guests, quote.nights, quote.total_price, booking.id
            );
        }
        Commands::Bookings => {
            let bookings = app.bookings.my_bookings().await?;
            for booking in &bookings {
                let venue = booking
                    .venue
                    .as_deref()
                    .map(|venue| venue.name.as_str())
                    .unwrap_or("(venue unknown)");
                println!(
                    "{}  {} -> {}  {} guest(s)  {}",
                    booking.id,
                    booking.check_in(),
                    booking.check_out(),
                    booking.guests,
                    venue
                );
            }
            if bookings.is_empty() {
                println!("No reservations");
            }
        }
        Commands::MyVenues => {
            let venues = app.catalog.my_venues().await?;
            for venue in &venues {
                print_venue_line(venue);
            }
            if venues.is_empty() {
                println!("No venues managed by this profile");
            }
        }
        Commands::SetAvatar { url } => {
            let session = app.session.update_avatar(&url).await?;
            println!(
                "Avatar updated for {}: {}",
                session.name,
                session.avatar.map(|media| media.url).unwrap_or_default()
            );
        }
    }

    Ok(())
}

fn wire(fixtures: bool) -> Result<App> {
    let store = Arc::new(TomlSessionStore::default_location()?);
    let app = if fixtures {
        build(DataSource::Fixture, GatewayConfig::new("unused"), store)
    } else {
        build(DataSource::Live, GatewayConfig::from_env()?, store)
    };
    Ok(app)
}

fn print_venue_line(venue: &Venue) {
    println!(
        "{}  {}  {:.2}/night  sleeps {}  rating {:.1}",
        venue.id, venue.name, venue.price, venue.max_guests, venue.rating
    );
}

fn print_venue_detail(venue: &Venue) {
    print_venue_line(venue);
    if !venue.description.is_empty() {
        println!("  {}", venue.description);
    }
    if let Some(city) = venue.location.city.as_deref() {
        let country = venue.location.country.as_deref().unwrap_or("");
        println!("  {city} {country}");
    }
    if let Some(owner) = &venue.owner {
        println!("  managed by {}", owner.name);
    }
    if let Some(bookings) = &venue.bookings {
        println!("  {} existing booking(s)", bookings.len());
    }
}
