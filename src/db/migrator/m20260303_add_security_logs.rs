use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SecurityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SecurityLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SecurityLogs::UserId).integer().not_null())
                    .col(ColumnDef::new(SecurityLogs::EventType).string().not_null())
                    .col(ColumnDef::new(SecurityLogs::Details).string().not_null())
                    .col(ColumnDef::new(SecurityLogs::IpAddress).string().null())
                    .col(
                        ColumnDef::new(SecurityLogs::CreatedAt)
                            .string()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_owned()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_security_logs_user")
                            .from(SecurityLogs::Table, SecurityLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_security_logs_user_created_at")
                    .table(SecurityLogs::Table)
                    .col(SecurityLogs::UserId)
                    .col(SecurityLogs::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SecurityLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SecurityLogs {
    Table,
    Id,
    UserId,
    EventType,
    Details,
    IpAddress,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
