use sea_orm_migration::prelude::*;

mod m20260301_000001_create_participants;
mod m20260301_000002_create_scan_logs;
mod m20260301_000003_add_participant_indexes;
mod m20261019_000004_add_participant_identity_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_participants::Migration),
            Box::new(m20260301_000002_create_scan_logs::Migration),
            Box::new(m20260301_000003_add_participant_indexes::Migration),
            Box::new(m20261019_000004_add_participant_identity_index::Migration),
        ]
    }
}
