//! Migration: Create accounts table.

use sea_orm_migration::prelude::*;

use super::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // revoked_on and revoked_by are set and cleared together
        let revocation_pair = Expr::col(Accounts::RevokedOn)
            .is_null()
            .and(Expr::col(Accounts::RevokedBy).is_null())
            .or(Expr::col(Accounts::RevokedOn)
                .is_not_null()
                .and(Expr::col(Accounts::RevokedBy).is_not_null()));

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Accounts::Login)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::Password).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::Gender)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(ColumnDef::new(Accounts::Birthday).date().null())
                    .col(
                        ColumnDef::new(Accounts::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::ModifiedOn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::ModifiedBy).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::RevokedOn)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Accounts::RevokedBy).string().null())
                    .col(
                        ColumnDef::new(Accounts::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .check(revocation_pair)
                    .check(Expr::col(Accounts::Gender).is_in([0, 1, 2]))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_accounts_created_on")
                    .table(Accounts::Table)
                    .col(Accounts::CreatedOn)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}
