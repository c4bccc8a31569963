use sea_orm::entity::prelude::*;

/// The single local session identity row. Transient connection and response
/// state is never written here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub player_name: String,
    pub lobby_id: Option<String>,
    pub use_origin: bool,
    pub use_destination: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
