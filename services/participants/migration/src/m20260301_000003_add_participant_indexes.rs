use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const INDEXES: [(&str, Participants); 3] = [
    ("idx_participants_phone_number", Participants::PhoneNumber),
    ("idx_participants_created_at", Participants::CreatedAt),
    ("idx_participants_counter_no", Participants::CounterNo),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, col) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .table(Participants::Table)
                        .col(col)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }
        manager
            .create_index(
                Index::create()
                    .table(ScanLogs::Table)
                    .col(ScanLogs::ParticipantId)
                    .name("idx_scan_logs_participant_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_scan_logs_participant_id").to_owned())
            .await?;
        for (name, _) in INDEXES {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden, Clone, Copy)]
enum Participants {
    Table,
    PhoneNumber,
    CreatedAt,
    CounterNo,
}

#[derive(Iden)]
enum ScanLogs {
    Table,
    ParticipantId,
}
