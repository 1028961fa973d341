//! Serialized game tables: one actor per game cell, plus the code registry.

pub mod actor;
pub mod registry;

pub use actor::{
    Act, GameTable, Join, PauseTicket, Remake, Start, Status, Subscribe, TableStatus, ViewFor,
    ViewUpdate,
};
pub use registry::TableRegistry;
