//! Block subject and observers
//!
//! A [`BlockSubject`] owns the blocks of an assembly, the request that
//! triggered it and an ordered list of [`Observer`]s. [`BlockSubject::notify`]
//! hands every observer a [`Notification`] in attachment order; observers
//! read the blocks and emit [`Effect`]s into the notification. The effects
//! collect in the subject's outbox until the owner drains and dispatches
//! them.
//!
//! # Fault policy
//!
//! What happens when an observer returns an error is explicit, see
//! [`FaultPolicy`].

mod catalog;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::Result;
use crate::block::Blocks;
use crate::effects::Effect;
use crate::eventlog::LogRecord;
use crate::request::RequestContext;

pub use self::catalog::{
    ArticleCountObserver, ArticleSaveTracker, AuthorActivityTracker, BlockCreationTimeObserver,
    JsonErrorObserver, NewTagObserver, PopularArticleTracker, ProhibitedWordsObserver,
    SeoTitleChecker, TextErrorObserver, UserActivityObserver,
};

/// Observer failure handling during [`BlockSubject::notify`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Log a warning, drop the effects the failing observer emitted during
    /// that update, and keep notifying the remaining observers
    #[default]
    Isolate,
    /// Stop at the first failing observer and return its error; effects of
    /// the observers that already ran are kept
    Abort,
}

/// Observer variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObserverKind {
    /// Missing blocks as plain error lines
    TextError,
    /// Missing blocks as one JSON record
    JsonError,
    /// Flash message with the number of placed articles
    ArticleCount,
    /// Block creation timing
    BlockCreationTime,
    /// Tags not seen before
    NewTag,
    /// Prohibited words in placed articles
    ProhibitedWords,
    /// Which user viewed which blocks
    UserActivity,
    /// Per-article placement counters
    PopularArticleTracker,
    /// Per-author placement counters
    AuthorActivityTracker,
    /// Titles outside the SEO window
    SeoTitleChecker,
    /// Placed articles users have saved
    ArticleSaveTracker,
}

impl ObserverKind {
    /// Stable snake_case name
    pub fn name(self) -> &'static str {
        match self {
            ObserverKind::TextError => "text_error",
            ObserverKind::JsonError => "json_error",
            ObserverKind::ArticleCount => "article_count",
            ObserverKind::BlockCreationTime => "block_creation_time",
            ObserverKind::NewTag => "new_tag",
            ObserverKind::ProhibitedWords => "prohibited_words",
            ObserverKind::UserActivity => "user_activity",
            ObserverKind::PopularArticleTracker => "popular_article_tracker",
            ObserverKind::AuthorActivityTracker => "author_activity_tracker",
            ObserverKind::SeoTitleChecker => "seo_title_checker",
            ObserverKind::ArticleSaveTracker => "article_save_tracker",
        }
    }
}

impl fmt::Display for ObserverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What an observer sees during one notification
pub struct Notification<'a> {
    blocks: &'a Blocks,
    request: &'a RequestContext,
    effects: Vec<Effect>,
}

impl<'a> Notification<'a> {
    fn new(blocks: &'a Blocks, request: &'a RequestContext) -> Self {
        Self {
            blocks,
            request,
            effects: Vec::new(),
        }
    }

    /// Blocks of the subject
    pub fn blocks(&self) -> &'a Blocks {
        self.blocks
    }

    /// Request that triggered the assembly
    pub fn request(&self) -> &'a RequestContext {
        self.request
    }

    /// Emit an effect
    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Emit an event-log record
    pub fn log(&mut self, record: LogRecord) {
        self.emit(Effect::Log(record));
    }

    /// Emit a flash message
    pub fn flash(&mut self, message: impl Into<String>) {
        self.emit(Effect::Flash(message.into()));
    }

    /// Effects emitted so far
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }
}

/// Side-effect handler notified after blocks are built
pub trait Observer: Send {
    /// Which catalog entry this is
    fn kind(&self) -> ObserverKind;

    /// React to the subject's current blocks
    fn update(&mut self, event: &mut Notification<'_>) -> Result<()>;
}

/// Blocks plus the observers interested in them
pub struct BlockSubject {
    blocks: Blocks,
    request: RequestContext,
    observers: Vec<Box<dyn Observer>>,
    policy: FaultPolicy,
    outbox: Vec<Effect>,
}

impl fmt::Debug for BlockSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockSubject")
            .field("blocks", &self.blocks)
            .field("request", &self.request)
            .field("observers", &self.observer_kinds())
            .field("policy", &self.policy)
            .field("outbox", &self.outbox.len())
            .finish()
    }
}

impl BlockSubject {
    /// Subject with empty blocks and no observers
    pub fn new(request: RequestContext) -> Self {
        Self {
            blocks: Blocks::new(),
            request,
            observers: Vec::new(),
            policy: FaultPolicy::default(),
            outbox: Vec::new(),
        }
    }

    /// Set the fault policy
    #[must_use]
    pub fn with_policy(mut self, policy: FaultPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Append an observer; duplicates are allowed
    pub fn attach(&mut self, observer: Box<dyn Observer>) {
        trace!("Attaching observer {}", observer.kind());
        self.observers.push(observer);
    }

    /// Remove and return the first observer of the given kind
    pub fn detach(&mut self, kind: ObserverKind) -> Option<Box<dyn Observer>> {
        let index = self.observers.iter().position(|o| o.kind() == kind)?;
        Some(self.observers.remove(index))
    }

    /// Kinds of attached observers, in attachment order
    pub fn observer_kinds(&self) -> Vec<ObserverKind> {
        self.observers.iter().map(|o| o.kind()).collect()
    }

    /// Notify every observer once, in attachment order
    ///
    /// Emitted effects are queued in the outbox, see [`drain_effects`](Self::drain_effects).
    pub fn notify(&mut self) -> Result<()> {
        let mut event = Notification::new(&self.blocks, &self.request);
        for observer in &mut self.observers {
            let mark = event.effects.len();
            if let Err(e) = observer.update(&mut event) {
                match self.policy {
                    FaultPolicy::Abort => {
                        self.outbox.append(&mut event.effects);
                        return Err(e);
                    }
                    FaultPolicy::Isolate => {
                        warn!("Observer {} failed, continuing: {}", observer.kind(), e);
                        event.effects.truncate(mark);
                    }
                }
            }
        }
        self.outbox.append(&mut event.effects);
        Ok(())
    }

    /// Take every queued effect
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }

    /// Current blocks
    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    /// Mutable access for builders
    pub fn blocks_mut(&mut self) -> &mut Blocks {
        &mut self.blocks
    }

    /// Request that triggered the assembly
    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Consume the subject, keeping its blocks
    pub fn into_blocks(self) -> Blocks {
        self.blocks
    }
}
