use actix::prelude::*;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use super::actor::{
    Act, GameTable, Join, Remake, Start, Status, Subscribe, TableStatus, ViewFor, ViewUpdate,
};
use crate::config::timing::ResolutionDelays;
use crate::domain::{GameAction, GameId, GameView, PlayerInfo};
use crate::error::AppError;
use crate::utils::join_code::{generate_join_code, normalize_join_code};

/// Live tables keyed by join code.
///
/// Must be used from inside a running actix system; `create` starts actors.
pub struct TableRegistry {
    tables: DashMap<String, Addr<GameTable>>,
    delays: ResolutionDelays,
}

impl TableRegistry {
    pub fn new(delays: ResolutionDelays) -> Self {
        Self {
            tables: DashMap::new(),
            delays,
        }
    }

    /// Open a table under a fresh join code.
    pub fn create(&self) -> (String, Addr<GameTable>) {
        self.create_with(|code| GameTable::new(code, self.delays))
    }

    /// Open a table whose deals are reproducible from `seed`.
    pub fn create_seeded(&self, seed: u64) -> (String, Addr<GameTable>) {
        self.create_with(|code| GameTable::seeded(code, self.delays, seed))
    }

    fn create_with(&self, build: impl Fn(&str) -> GameTable) -> (String, Addr<GameTable>) {
        loop {
            let code = generate_join_code();
            if let Entry::Vacant(slot) = self.tables.entry(code.clone()) {
                let addr = build(&code).start();
                slot.insert(addr.clone());
                info!(code = %code, tables = self.tables.len(), "Table registered");
                return (code, addr);
            }
        }
    }

    pub fn get(&self, code: &str) -> Result<Addr<GameTable>, AppError> {
        let code = normalize_join_code(code);
        self.tables
            .get(&code)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::game_doesnt_exist(format!("no table with code {code}")))
    }

    /// Drop a table; its actor stops once the last address is gone.
    pub fn remove(&self, code: &str) -> bool {
        let removed = self.tables.remove(&normalize_join_code(code)).is_some();
        if removed {
            info!(code = %code, "Table removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub async fn join(&self, code: &str, player: PlayerInfo) -> Result<GameView, AppError> {
        self.get(code)?.send(Join { player }).await?
    }

    pub async fn start(&self, code: &str) -> Result<GameId, AppError> {
        self.get(code)?.send(Start).await?
    }

    pub async fn act(
        &self,
        code: &str,
        actor_id: &str,
        action: GameAction,
    ) -> Result<GameView, AppError> {
        let msg = Act {
            actor_id: actor_id.to_owned(),
            action,
        };
        self.get(code)?.send(msg).await?
    }

    pub async fn remake(&self, code: &str, requester_id: &str) -> Result<GameId, AppError> {
        let msg = Remake {
            requester_id: requester_id.to_owned(),
        };
        self.get(code)?.send(msg).await?
    }

    pub async fn view(&self, code: &str, viewer_id: &str) -> Result<GameView, AppError> {
        let msg = ViewFor {
            viewer_id: viewer_id.to_owned(),
        };
        Ok(self.get(code)?.send(msg).await?)
    }

    pub async fn status(&self, code: &str) -> Result<TableStatus, AppError> {
        Ok(self.get(code)?.send(Status).await?)
    }

    pub async fn subscribe(
        &self,
        code: &str,
        viewer_id: &str,
        recipient: Recipient<ViewUpdate>,
    ) -> Result<(), AppError> {
        let msg = Subscribe {
            viewer_id: viewer_id.to_owned(),
            recipient,
        };
        Ok(self.get(code)?.send(msg).await?)
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new(ResolutionDelays::default())
    }
}
