use sea_orm::entity::prelude::*;

/// Account record for the gated service. Created once; `quota_used` is the
/// only column mutated on every billable action.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password_hash: String,
    #[sea_orm(unique)]
    pub email: String,
    pub quota_limit: i64,
    pub quota_used: i64,
    pub last_reset_date: chrono::NaiveDate,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::api_usage::Entity")]
    ApiUsage,
}

impl Related<super::api_usage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApiUsage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
