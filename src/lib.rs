//! Движок одного стола Texas Hold'em: стеки, банк, улицы и торговля.
//!
//! Слои:
//! - `domain` – карты, колода, игроки, конфиг стола;
//! - `engine` – раунд ставок, переход улиц, шоудаун (`HandEngine`);
//! - `api` – команды, запросы и DTO для внешнего UI;
//! - `infra` – реализации RNG;
//! - `agents` – простые боты.

pub mod agents;
pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;

pub use engine::{EngineError, HandEngine, HandStatus};
