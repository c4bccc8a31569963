use std::collections::HashSet;

use anyhow::Result;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use guess_core::Ledger;

use crate::entities::{ledgers, prelude::*};

/// Persistence key for a ledger. Each mode owns its ledger exclusively; the
/// two only interact through reconciliation in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerMode {
    Singleplayer,
    Multiplayer,
}

impl LedgerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerMode::Singleplayer => "singleplayer",
            LedgerMode::Multiplayer => "multiplayer",
        }
    }
}

pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_ledger(model: ledgers::Model) -> Result<Ledger> {
        let guessed_flight_ids: HashSet<String> =
            serde_json::from_str(&model.guessed_flight_ids)?;
        Ok(Ledger {
            score: model.score,
            guessed_flight_ids,
        })
    }

    /// Load the ledger for a mode, falling back to an empty ledger when no
    /// row exists yet.
    pub async fn load(&self, mode: LedgerMode) -> Result<Ledger> {
        let model = Ledgers::find_by_id(mode.as_str()).one(&self.db).await?;
        match model {
            Some(model) => Self::model_to_ledger(model),
            None => Ok(Ledger::new()),
        }
    }

    pub async fn save(&self, mode: LedgerMode, ledger: &Ledger) -> Result<()> {
        let ids: Vec<&String> = ledger.guessed_flight_ids.iter().collect();
        let model = ledgers::ActiveModel {
            mode: ActiveValue::Set(mode.as_str().to_string()),
            score: ActiveValue::Set(ledger.score),
            guessed_flight_ids: ActiveValue::Set(serde_json::to_string(&ids)?),
        };

        Ledgers::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(ledgers::Column::Mode)
                    .update_columns([
                        ledgers::Column::Score,
                        ledgers::Column::GuessedFlightIds,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        Ok(())
    }

    pub async fn clear(&self, mode: LedgerMode) -> Result<()> {
        Ledgers::delete_by_id(mode.as_str()).exec(&self.db).await?;
        Ok(())
    }
}
