use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Same identity `find_duplicate` checks: names compared case-insensitively,
/// phone number exactly.
const CREATE_IDENTITY_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
     uq_participants_identity ON participants \
     (lower(first_name), lower(last_name), phone_number)";

const DROP_IDENTITY_INDEX: &str = "DROP INDEX IF EXISTS uq_participants_identity";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(CREATE_IDENTITY_INDEX)
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(DROP_IDENTITY_INDEX)
            .await?;
        Ok(())
    }
}
