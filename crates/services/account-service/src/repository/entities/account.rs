//! Account database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use domain::{Account, Gender, Password, Revocation};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub login: String,
    pub password: String,
    pub name: String,
    /// 0 female, 1 male, 2 unknown
    pub gender: i32,
    pub birthday: Option<Date>,
    pub is_admin: bool,
    pub created_on: DateTimeUtc,
    pub created_by: String,
    pub modified_on: DateTimeUtc,
    pub modified_by: String,
    /// Soft delete timestamp (NULL = active, set = revoked)
    pub revoked_on: Option<DateTimeUtc>,
    pub revoked_by: Option<String>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Account {
    fn from(model: Model) -> Self {
        let revocation = match (model.revoked_on, model.revoked_by) {
            (Some(revoked_on), Some(revoked_by)) => Some(Revocation {
                revoked_on,
                revoked_by,
            }),
            _ => None,
        };

        Account {
            id: model.id,
            login: model.login,
            password: Password::from_stored(model.password),
            name: model.name,
            gender: Gender::from_stored(model.gender),
            birthday: model.birthday,
            is_admin: model.is_admin,
            created_on: model.created_on,
            created_by: model.created_by,
            modified_on: model.modified_on,
            modified_by: model.modified_by,
            revocation,
            version: model.version,
        }
    }
}

/// Convert domain entity to a fully populated active model
impl From<&Account> for ActiveModel {
    fn from(account: &Account) -> Self {
        ActiveModel {
            id: Set(account.id),
            login: Set(account.login.clone()),
            password: Set(account.password.as_str().to_string()),
            name: Set(account.name.clone()),
            gender: Set(account.gender.code()),
            birthday: Set(account.birthday),
            is_admin: Set(account.is_admin),
            created_on: Set(account.created_on),
            created_by: Set(account.created_by.clone()),
            modified_on: Set(account.modified_on),
            modified_by: Set(account.modified_by.clone()),
            revoked_on: Set(account.revoked_on()),
            revoked_by: Set(account.revoked_by().map(str::to_string)),
            version: Set(account.version),
        }
    }
}
