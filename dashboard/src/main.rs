//! Donor portal dashboard — entry point.
//!
//! Opens the file-backed substrate, runs the one-time store
//! initialisation, and renders the current state the way the web pages
//! do: the user's summary stats and recent activity, the community
//! roll-up, and the upcoming event lineup.

mod config;

use std::rc::Rc;

use anyhow::Result;
use chrono::Utc;
use foundation_store::{catalog, format, AdminStore, AuthStore, FileStorage, UserStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

fn main() -> Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;
    info!("Opening substrate at {}", config.storage_path);

    let storage = Rc::new(FileStorage::open_with_quota(
        &config.storage_path,
        config.quota_bytes,
    )?);
    let users = UserStore::new(storage.clone());
    let auth = AuthStore::new(storage.clone());
    let admin = AdminStore::new(storage.clone());

    users.init()?;
    admin.init()?;

    if config.seed_demo_data {
        users.add_sample_data()?;
        info!("Demo data seeded");
    }

    let now = Utc::now();

    println!("Signed in as: {}", auth.get_display_name());

    let stats = users.get_dashboard_stats();
    println!("\nYour impact");
    println!("  Total donated      {}", format::format_inr(stats.total_donated));
    println!("  Donations          {}", stats.donation_count);
    println!("  Volunteer hours    {}", stats.volunteer_hours);
    println!("  Causes supported   {}", stats.causes_supported);
    println!("  Events registered  {}", stats.events_registered);

    println!("\nRecent activity");
    let activities = users.get_activities(config.recent_limit);
    if activities.is_empty() {
        println!("  (nothing yet)");
    }
    for activity in activities {
        println!(
            "  [{:9}] {} {} — {}",
            activity.kind.as_str(),
            activity.title,
            activity.description,
            format::format_relative(&activity.date, now)
        );
    }

    let global = admin.get_global_stats();
    println!("\nCommunity");
    println!("  Raised        {}", format::format_inr(global.total_donations));
    println!("  Donors        {}", global.total_donors);
    println!("  Volunteers    {}", global.active_volunteers);
    println!("  Campaigns     {}", global.active_campaigns);

    println!("\nRecent donations");
    for donation in admin.get_all_donations(config.recent_limit) {
        println!(
            "  {:20} {:>10}  {} ({})",
            donation.donor_name,
            format::format_inr(donation.amount),
            donation.cause,
            format::format_relative(&donation.date, now)
        );
    }

    println!("\nUpcoming events");
    for event in catalog::all() {
        println!(
            "  {} {}  {} — {}",
            event.month, event.day, event.title, event.location
        );
    }

    Ok(())
}
