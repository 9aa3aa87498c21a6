use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiUsage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ApiUsage::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ApiUsage::Username).string().not_null())
                    .col(
                        ColumnDef::new(ApiUsage::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ApiUsage::Model).string().not_null())
                    .col(
                        ColumnDef::new(ApiUsage::TokensUsed)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ApiUsage::Table, ApiUsage::Username)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ApiUsage::Table)
                    .col(ApiUsage::Username)
                    .name("idx_api_usage_username")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ApiUsage::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ApiUsage {
    Table,
    Id,
    Username,
    RecordedAt,
    Model,
    TokensUsed,
}

#[derive(Iden)]
enum Users {
    Table,
    Username,
}
