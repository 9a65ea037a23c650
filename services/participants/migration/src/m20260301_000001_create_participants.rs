use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .string_len(6)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Participants::FirstName).string().not_null())
                    .col(ColumnDef::new(Participants::MiddleName).string().null())
                    .col(ColumnDef::new(Participants::LastName).string().not_null())
                    .col(ColumnDef::new(Participants::Email).string().not_null())
                    .col(ColumnDef::new(Participants::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Participants::Gender).string().not_null())
                    .col(ColumnDef::new(Participants::Gotra).string().null())
                    .col(ColumnDef::new(Participants::Birthdate).date().not_null())
                    .col(ColumnDef::new(Participants::Age).integer().not_null())
                    .col(ColumnDef::new(Participants::Address).text().not_null())
                    .col(
                        ColumnDef::new(Participants::EmergencyContactName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::EmergencyContactRelation)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::EmergencyContactPhone)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::Distance).string().not_null())
                    .col(ColumnDef::new(Participants::TshirtSize).string().not_null())
                    .col(ColumnDef::new(Participants::MedicalConditions).text().null())
                    .col(ColumnDef::new(Participants::Medications).text().null())
                    .col(ColumnDef::new(Participants::Allergies).text().null())
                    .col(
                        ColumnDef::new(Participants::AcceptedDeclaration)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Participants::BibNum).string().null())
                    .col(
                        ColumnDef::new(Participants::IsBibGiven)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Participants::IsTshirtGiven)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Participants::CounterNo).string().null())
                    .col(ColumnDef::new(Participants::PassLink).string().null())
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Participants::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Participants::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Participants {
    Table,
    Id,
    FirstName,
    MiddleName,
    LastName,
    Email,
    PhoneNumber,
    Gender,
    Gotra,
    Birthdate,
    Age,
    Address,
    EmergencyContactName,
    EmergencyContactRelation,
    EmergencyContactPhone,
    Distance,
    TshirtSize,
    MedicalConditions,
    Medications,
    Allergies,
    AcceptedDeclaration,
    BibNum,
    IsBibGiven,
    IsTshirtGiven,
    CounterNo,
    PassLink,
    CreatedAt,
    UpdatedAt,
}
