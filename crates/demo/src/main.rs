//! Kerbside demo CLI.
//!
//! Browse the showroom fixture catalog, quote and place bookings, list the
//! booking history and show the admin dashboard.

use std::io;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use jiff::{Zoned, civil::Date};
use kerbside::{
    admin::AdminStats,
    booking::{
        picker::ScriptedPicker,
        store::StatusFilter,
        wizard::{BookingWizard, ConfirmPrompt, ConfirmSummary},
    },
    catalog::CatalogFilter,
    fixtures::Fixture,
    receipt::BookingReceipt,
    vehicles::VehicleClass,
};
use tabled::{
    builder::Builder,
    settings::{Style, Theme},
};

/// Arguments for the demo CLI
#[derive(Debug, Parser)]
struct Args {
    /// Fixture set to load
    #[clap(short, long, default_value = "showroom")]
    fixture: String,

    /// Base path for fixture files
    #[clap(long, default_value = "crates/core/fixtures")]
    fixtures_dir: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List vehicles, optionally filtered
    Browse {
        /// Case-insensitive search over name, category and location
        #[clap(short, long)]
        query: Option<String>,

        /// Restrict to a vehicle class (car, motorcycle, truck, scooter, bicycle)
        #[clap(short, long)]
        class: Option<String>,
    },

    /// Quote and place a booking
    Book {
        /// Vehicle id from the fixture set
        vehicle: String,

        /// Pickup date (e.g. 2025-09-05)
        #[clap(short, long)]
        pickup: Date,

        /// Return date
        #[clap(short, long)]
        dropoff: Date,

        /// Record the booking instead of just quoting it
        #[clap(short, long)]
        yes: bool,
    },

    /// List the booking history
    Bookings {
        /// Tab to show: all, active, completed or cancelled
        #[clap(short, long, default_value = "all")]
        tab: String,
    },

    /// Show the admin dashboard figures
    Stats,
}

/// Prints the confirmation summary, then accepts or declines per `--yes`.
struct CliPrompt {
    accept: bool,
}

impl ConfirmPrompt for CliPrompt {
    #[expect(clippy::print_stdout, reason = "Demo program output to user")]
    fn confirm(&mut self, summary: &ConfirmSummary<'_>) -> bool {
        println!(
            "Book {} for {} day(s) at {} total?",
            summary.vehicle_name, summary.days, summary.total
        );

        self.accept
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let fixture = Fixture::from_set_in(&args.fixtures_dir, &args.fixture)?;

    match args.command {
        Command::Browse { query, class } => browse(&fixture, query, class.as_deref())?,
        Command::Book {
            vehicle,
            pickup,
            dropoff,
            yes,
        } => book(fixture, &vehicle, pickup, dropoff, yes)?,
        Command::Bookings { tab } => bookings(&fixture, &tab)?,
        Command::Stats => stats(&fixture)?,
    }

    Ok(())
}

#[expect(clippy::print_stdout, reason = "Demo program output to user")]
fn browse(fixture: &Fixture, query: Option<String>, class: Option<&str>) -> Result<()> {
    let class = class.map(parse_class).transpose()?;
    let filter = CatalogFilter {
        query,
        class,
        availability: None,
    };

    let mut builder = Builder::default();
    builder.push_record(["Name", "Category", "Class", "Rate", "Location", "Rating"]);

    let mut rows = 0;

    for (_, vehicle) in fixture.catalog().search(&filter) {
        builder.push_record([
            vehicle.name.clone(),
            vehicle.category.clone(),
            vehicle.class.to_string(),
            format!("{}/day", vehicle.daily_rate),
            vehicle.location.clone(),
            format!("{:.1} ({})", vehicle.rating, vehicle.reviews),
        ]);
        rows += 1;
    }

    if rows == 0 {
        println!("No vehicles match.");
        return Ok(());
    }

    let mut table = builder.build();
    table.with(Theme::from(Style::modern_rounded()));

    println!("{table}");

    Ok(())
}

fn book(fixture: Fixture, vehicle: &str, pickup: Date, dropoff: Date, yes: bool) -> Result<()> {
    let key = fixture.vehicle_key(vehicle)?;
    let (catalog, _, mut store) = fixture.into_parts();

    let now = Zoned::now().datetime();
    let mut wizard = BookingWizard::open(key, now)?;

    let mut picker = ScriptedPicker::new();
    picker.push_date(pickup);
    picker.push_date(dropoff);

    wizard.next();
    wizard.pick_pickup_date(&mut picker, now.date());
    wizard.pick_return_date(&mut picker);
    wizard.next();

    let mut prompt = CliPrompt { accept: yes };
    let recorded = wizard.confirm(&catalog, &mut store, &mut prompt, now)?;

    match recorded {
        Some(booking_key) => {
            let booking = store.get(booking_key)?;
            BookingReceipt::new(booking).write_to(io::stdout().lock())?;
        }
        None => bail!("booking not recorded; pass --yes to confirm"),
    }

    Ok(())
}

#[expect(clippy::print_stdout, reason = "Demo program output to user")]
fn bookings(fixture: &Fixture, tab: &str) -> Result<()> {
    let filter = match tab {
        "all" => StatusFilter::All,
        "active" => StatusFilter::Active,
        "completed" => StatusFilter::Completed,
        "cancelled" => StatusFilter::Cancelled,
        other => bail!("unknown tab: {other}"),
    };

    for (_, booking) in fixture.store().filtered(filter) {
        println!(
            "{} — {} to {} — {} day(s) — {} — {}",
            booking.vehicle_name,
            booking.pickup.strftime("%b %d, %Y"),
            booking.dropoff.strftime("%b %d, %Y"),
            booking.days,
            booking.cost.total,
            booking.status,
        );
    }

    Ok(())
}

#[expect(clippy::print_stdout, reason = "Demo program output to user")]
fn stats(fixture: &Fixture) -> Result<()> {
    let currency = fixture
        .currency()
        .context("fixture set has no vehicles, currency unknown")?;

    let stats = AdminStats::collect(
        fixture.directory(),
        fixture.catalog(),
        fixture.store(),
        currency,
    )?;

    println!("Users:            {}", stats.total_users);
    println!("Vehicles:         {}", stats.total_vehicles);
    println!("Bookings:         {}", stats.total_bookings);
    println!("Active bookings:  {}", stats.active_bookings);
    println!("Pending bookings: {}", stats.pending_bookings);
    println!("Revenue:          {}", stats.total_revenue);

    for popular in &stats.popular_vehicles {
        let name = fixture
            .catalog()
            .get(popular.vehicle)
            .map_or("<removed>", |vehicle| vehicle.name.as_str());

        println!("  {} booking(s): {name}", popular.bookings);
    }

    Ok(())
}

fn parse_class(value: &str) -> Result<VehicleClass> {
    let class = match value {
        "car" => VehicleClass::Car,
        "motorcycle" => VehicleClass::Motorcycle,
        "truck" => VehicleClass::Truck,
        "scooter" => VehicleClass::Scooter,
        "bicycle" => VehicleClass::Bicycle,
        other => bail!("unknown vehicle class: {other}"),
    };

    Ok(class)
}
