use anyhow::Result;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use guess_types::Rules;

use crate::entities::{prelude::*, session};

const SESSION_ROW_ID: i32 = 1;

/// The part of a lobby session that survives restarts: who the player is and
/// which lobby (if any) they belong to, under which rules.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionIdentity {
    pub player_name: String,
    pub lobby_id: Option<String>,
    pub rules: Rules,
}

pub struct SessionRepository {
    db: DatabaseConnection,
}

impl SessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn load(&self) -> Result<Option<SessionIdentity>> {
        let model = Session::find_by_id(SESSION_ROW_ID).one(&self.db).await?;
        Ok(model.map(|model| SessionIdentity {
            player_name: model.player_name,
            lobby_id: model.lobby_id,
            rules: Rules {
                use_origin: model.use_origin,
                use_destination: model.use_destination,
            },
        }))
    }

    pub async fn save(&self, identity: &SessionIdentity) -> Result<()> {
        let model = session::ActiveModel {
            id: ActiveValue::Set(SESSION_ROW_ID),
            player_name: ActiveValue::Set(identity.player_name.clone()),
            lobby_id: ActiveValue::Set(identity.lobby_id.clone()),
            use_origin: ActiveValue::Set(identity.rules.use_origin),
            use_destination: ActiveValue::Set(identity.rules.use_destination),
        };

        Session::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(session::Column::Id)
                    .update_columns([
                        session::Column::PlayerName,
                        session::Column::LobbyId,
                        session::Column::UseOrigin,
                        session::Column::UseDestination,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::connect_to_memory_database;
    use migration::{Migrator, MigratorTrait};

    async fn test_repository() -> SessionRepository {
        let db = connect_to_memory_database().await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        SessionRepository::new(db)
    }

    fn identity(lobby_id: Option<&str>) -> SessionIdentity {
        SessionIdentity {
            player_name: "brave-otter".to_string(),
            lobby_id: lobby_id.map(str::to_string),
            rules: Rules {
                use_origin: true,
                use_destination: true,
            },
        }
    }

    #[tokio::test]
    async fn test_load_without_save_is_none() {
        let repo = test_repository().await;
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let repo = test_repository().await;
        let identity = identity(Some("lobby-9"));

        repo.save(&identity).await.unwrap();
        let loaded = repo.load().await.unwrap();
        assert_eq!(loaded, Some(identity));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_identity() {
        let repo = test_repository().await;

        repo.save(&identity(Some("lobby-9"))).await.unwrap();
        repo.save(&identity(None)).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.lobby_id, None);
    }
}
