use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScanLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ScanLogs::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(ScanLogs::ParticipantId)
                            .string_len(6)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScanLogs::AdminId).uuid().not_null())
                    .col(
                        ColumnDef::new(ScanLogs::ScannedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScanLogs::Table, ScanLogs::ParticipantId)
                            .to(Participants::Table, Participants::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScanLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ScanLogs {
    Table,
    Id,
    ParticipantId,
    AdminId,
    ScannedAt,
}

#[derive(Iden)]
enum Participants {
    Table,
    Id,
}
