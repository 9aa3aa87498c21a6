use sea_orm::entity::prelude::*;

/// One-time verification code, keyed by the email address or phone number it
/// was sent to. Reissues overwrite the row; successful verification deletes
/// it. Valid for 15 minutes from `created_at`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub identity: String,
    pub code: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub attempts: i32,
    pub last_attempt_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
