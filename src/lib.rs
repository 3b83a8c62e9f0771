#![doc = include_str!("../README.md")]

/// Article model and builder
pub mod article;
/// Placement slots and block mappings
pub mod block;
/// Random-draw block builders
pub mod builder;
mod config;
/// Running placement counters shared between facades
pub mod counters;
/// Observer effects and their dispatcher
pub mod effects;
mod error;
/// Append-only per-concern event log
pub mod eventlog;
mod facade;
/// Block subject, observer trait and observer catalog
pub mod observer;
/// Report readers over the event log and repository
pub mod report;
mod repository;
mod request;
/// Selection strategies, strategy facades and the block director
pub mod strategy;
/// Article field limits
pub mod validation;

pub use article::{Article, ArticleBuilder, ArticleId, Author, Tag, UNKNOWN_AUTHOR};
pub use block::{BlockKind, Blocks, Placement};
pub use config::{PortalConfig, SeoWindow};
pub use counters::{CounterStore, SharedCounters};
pub use effects::{Effect, EffectDispatcher};
pub use error::{PortalError, Result};
pub use eventlog::{EventLog, LogChannel, LogRecord, Stamped};
pub use facade::{Assembly, BuildOutcome, Family, NewsFacade, Portal};
pub use observer::{BlockSubject, FaultPolicy, Notification, Observer, ObserverKind};
pub use report::Reports;
pub use repository::{ArticleRepository, InMemoryRepository};
pub use request::{ANONYMOUS, RequestContext};
pub use strategy::{
    BlockDirector, SelectionStrategy, StrategyFacade, assemble_blocks, select_strategy,
};
