//! Migration: Seed the initial administrator account.

use chrono::Utc;
use domain::{Gender, SEED_ADMIN_LOGIN, SEED_ADMIN_NAME, SEED_ADMIN_PASSWORD};
use sea_orm_migration::prelude::*;
use uuid::Uuid;

use super::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = Utc::now();

        let insert = Query::insert()
            .into_table(Accounts::Table)
            .columns([
                Accounts::Id,
                Accounts::Login,
                Accounts::Password,
                Accounts::Name,
                Accounts::Gender,
                Accounts::IsAdmin,
                Accounts::CreatedOn,
                Accounts::CreatedBy,
                Accounts::ModifiedOn,
                Accounts::ModifiedBy,
                Accounts::Version,
            ])
            .values([
                Uuid::new_v4().into(),
                SEED_ADMIN_LOGIN.into(),
                SEED_ADMIN_PASSWORD.into(),
                SEED_ADMIN_NAME.into(),
                Gender::Unknown.code().into(),
                true.into(),
                now.into(),
                SEED_ADMIN_LOGIN.into(),
                now.into(),
                SEED_ADMIN_LOGIN.into(),
                1.into(),
            ])
            .map_err(|e| DbErr::Migration(e.to_string()))?
            .to_owned();

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Accounts::Table)
            .and_where(Expr::col(Accounts::Login).eq(SEED_ADMIN_LOGIN))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
