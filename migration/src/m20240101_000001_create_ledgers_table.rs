use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ledgers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ledgers::Mode)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Ledgers::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    // JSON array of guessed flight ids
                    .col(
                        ColumnDef::new(Ledgers::GuessedFlightIds)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ledgers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ledgers {
    Table,
    Mode,
    Score,
    GuessedFlightIds,
}
