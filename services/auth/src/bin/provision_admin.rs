//! Create an admin operator, or reset an existing admin's password.
//!
//! ```text
//! DATABASE_URL=postgres://... provision-admin --username desk1 --password '...'
//! ```

use clap::Parser;
use sea_orm::Database;

use marathon_auth::infra::db::DbAdminRepository;
use marathon_auth::usecase::login::{ProvisionAdminInput, ProvisionAdminUseCase};
use marathon_core::tracing::init_tracing;

#[derive(Parser)]
#[command(name = "provision-admin", about = "Create or update an admin operator")]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long)]
    username: String,

    /// Plain-text password; stored as a bcrypt hash.
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("warn");
    let cli = Cli::parse();

    let db = Database::connect(&cli.database_url).await?;
    let usecase = ProvisionAdminUseCase {
        admins: DbAdminRepository { db },
    };
    usecase
        .execute(ProvisionAdminInput {
            username: cli.username.clone(),
            password: cli.password,
        })
        .await?;

    println!("admin '{}' provisioned", cli.username.trim());
    Ok(())
}
