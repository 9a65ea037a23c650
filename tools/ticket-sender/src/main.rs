//! Ticket sender: bulk-delivers the ticket confirmation message to registered
//! participants.
//!
//! # Usage
//!
//! ```bash
//! # Print every payload, send nothing
//! cargo run -p ticket-sender
//!
//! # Send only to registrations made with these numbers
//! cargo run -p ticket-sender -- --send --test +919812345678,9811111111
//!
//! # Send to everyone
//! cargo run -p ticket-sender -- --send --yes
//! ```
//!
//! Exits 0 when every send succeeded, exits 1 when any failed.

use anyhow::{Context, Result, bail};
use clap::Parser;
use sea_orm::Database;

use marathon_core::config::Config;
use marathon_core::tracing::init_tracing;
use marathon_notify::DovesoftSender;
use marathon_participants::infra::db::DbParticipantRepository;

mod config;
mod reporter;
mod runner;

use config::{DeliveryConfig, TicketSenderConfig};
use reporter::Reporter;
use runner::{Runner, SEND_PAUSE, select_targets};

#[derive(Parser)]
#[command(about = "Send ticket confirmation messages to registered participants")]
struct Args {
    /// Actually call the provider. Without it every payload is only printed.
    #[arg(long)]
    send: bool,

    /// Comma-separated phone numbers; only matching registrations are targeted.
    #[arg(long, value_delimiter = ',')]
    test: Vec<String>,

    /// Confirm a send to every registered participant.
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing("warn");
    let args = Args::parse();

    let config = TicketSenderConfig::from_env().context("load DATABASE_URL")?;
    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;
    let participants = DbParticipantRepository { db };

    if !args.send {
        println!("Dry run: no messages will be sent.");
    }
    let targets = select_targets(&participants, &args.test).await?;
    if targets.is_empty() {
        println!("No participants to message.");
        return Ok(());
    }
    if args.send && args.test.is_empty() && !args.yes {
        bail!(
            "refusing to message all {} participants without --yes",
            targets.len()
        );
    }

    println!("Processing {} participant(s)", targets.len());
    println!();

    let mut reporter = Reporter::new(!args.send);
    if args.send {
        let delivery = DeliveryConfig::from_env().context("load Dovesoft credentials")?;
        let runner = Runner::sending(
            DovesoftSender::new(delivery.dovesoft),
            config.pass_placeholder_url,
            SEND_PAUSE,
        );
        runner.run(&targets, &mut reporter).await;
    } else {
        let runner: Runner<DovesoftSender> = Runner::dry_run(config.pass_placeholder_url);
        runner.run(&targets, &mut reporter).await;
    }

    reporter.print_summary();

    if reporter.all_passed() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
