use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One browser/OS/IP combination a user has signed in from.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i32,

    pub user_id: i32,

    /// Opaque UUID handed back to the client.
    #[sea_orm(unique)]
    pub device_id: String,

    pub device_name: String,

    pub browser: Option<String>,

    pub os: Option<String>,

    pub ip_address: Option<String>,

    pub is_current: bool,

    /// RFC 3339, sortable as text.
    pub last_active: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
