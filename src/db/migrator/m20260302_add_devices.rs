use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Devices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Devices::UserId).integer().not_null())
                    .col(
                        ColumnDef::new(Devices::DeviceId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Devices::DeviceName).string().not_null())
                    .col(ColumnDef::new(Devices::Browser).string().null())
                    .col(ColumnDef::new(Devices::Os).string().null())
                    .col(ColumnDef::new(Devices::IpAddress).string().null())
                    .col(
                        ColumnDef::new(Devices::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Devices::LastActive).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_devices_user")
                            .from(Devices::Table, Devices::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // List query filters by user and sorts by recency
        manager
            .create_index(
                Index::create()
                    .name("idx_devices_user_last_active")
                    .table(Devices::Table)
                    .col(Devices::UserId)
                    .col(Devices::LastActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Devices {
    Table,
    Id,
    UserId,
    DeviceId,
    DeviceName,
    Browser,
    Os,
    IpAddress,
    IsCurrent,
    LastActive,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
