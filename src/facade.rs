//! News facades and the portal
//!
//! A [`NewsFacade`] runs one front-page assembly for one report
//! [`Family`]: it attaches the family's observers to a fresh subject, runs
//! the four selection strategies against the candidate list, notifies once
//! and dispatches the emitted effects.
//!
//! A [`Portal`] bundles what every facade needs (configuration, article
//! repository, shared counters, event log) and hands out facades by family
//! key.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use towns_news::article::ArticleBuilder;
//! use towns_news::{InMemoryRepository, Portal, PortalConfig, RequestContext};
//!
//! # fn main() -> towns_news::Result<()> {
//! let dir = tempfile::TempDir::new()?;
//! let repo = InMemoryRepository::with_articles(
//!     (1..=12).map(|id| ArticleBuilder::new(id).title(format!("Story {}", id)).build().unwrap()),
//! );
//! let portal = Portal::new(PortalConfig::new(dir.path()), Arc::new(repo));
//!
//! let mut facade = portal.facade("Count", RequestContext::for_user("editor"))?;
//! let mut candidates = portal.repository().articles();
//! let outcome = facade.build_and_notify(&mut candidates)?;
//!
//! assert_eq!(outcome.blocks.article_count(), 12);
//! assert_eq!(outcome.messages, vec!["News updated: 12 articles added."]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::article::Article;
use crate::block::Blocks;
use crate::config::PortalConfig;
use crate::counters::{CounterStore, SharedCounters};
use crate::effects::{Effect, EffectDispatcher};
use crate::eventlog::EventLog;
use crate::observer::{
    ArticleCountObserver, ArticleSaveTracker, AuthorActivityTracker, BlockCreationTimeObserver,
    BlockSubject, JsonErrorObserver, NewTagObserver, Observer, ObserverKind,
    PopularArticleTracker, ProhibitedWordsObserver, SeoTitleChecker, TextErrorObserver,
    UserActivityObserver,
};
use crate::report::{Reports, WordReport};
use crate::repository::ArticleRepository;
use crate::request::RequestContext;
use crate::strategy::assemble_blocks;
use crate::{PortalError, Result};

/// Report family: which observers run and which reports apply
///
/// Serializes as the lower-case key; deserializes through [`FromStr`], so
/// configuration files accept the same case-insensitive keys as
/// [`Portal::facade`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// Missing-block error logs
    #[default]
    Error,
    /// User and author activity
    Activity,
    /// Popular and saved articles
    Tracker,
    /// Tags, prohibited words and SEO titles
    Word,
    /// Placed-article counts and creation timings
    Count,
}

impl Family {
    /// Every family
    pub const ALL: [Family; 5] = [
        Family::Error,
        Family::Activity,
        Family::Tracker,
        Family::Word,
        Family::Count,
    ];

    /// Lower-case family key
    pub fn name(self) -> &'static str {
        match self {
            Family::Error => "error",
            Family::Activity => "activity",
            Family::Tracker => "tracker",
            Family::Word => "word",
            Family::Count => "count",
        }
    }

    /// Observers attached for this family, in attachment order
    pub fn observer_kinds(self) -> &'static [ObserverKind] {
        match self {
            Family::Error => &[ObserverKind::TextError, ObserverKind::JsonError],
            Family::Activity => &[
                ObserverKind::UserActivity,
                ObserverKind::AuthorActivityTracker,
            ],
            Family::Tracker => &[
                ObserverKind::PopularArticleTracker,
                ObserverKind::ArticleSaveTracker,
            ],
            Family::Word => &[
                ObserverKind::NewTag,
                ObserverKind::ProhibitedWords,
                ObserverKind::SeoTitleChecker,
            ],
            Family::Count => &[ObserverKind::ArticleCount, ObserverKind::BlockCreationTime],
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Family {
    type Err = PortalError;

    /// Case-insensitive; never falls back to a default family
    fn from_str(s: &str) -> Result<Self> {
        Family::ALL
            .into_iter()
            .find(|family| family.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PortalError::UnknownFacade(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Family {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(de::Error::custom)
    }
}

/// Blocks and effects of one assembly, before dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    /// Id stamped on every log record of the assembly
    pub id: Uuid,
    /// Combined blocks
    pub blocks: Blocks,
    /// Effects emitted by the family's observers, in emission order
    pub effects: Vec<Effect>,
}

/// Result of [`NewsFacade::build_and_notify`]
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    /// Id stamped on every log record of the assembly
    pub assembly: Uuid,
    /// Combined blocks
    pub blocks: Blocks,
    /// Flash messages queued during the assembly
    pub messages: Vec<String>,
    /// Word family report tables, read after dispatch
    pub word_report: Option<WordReport>,
}

/// Front-page assembly for one family
pub struct NewsFacade {
    family: Family,
    request: RequestContext,
    config: Arc<PortalConfig>,
    repo: Arc<dyn ArticleRepository>,
    counters: SharedCounters,
    dispatcher: EffectDispatcher,
    rng: StdRng,
}

impl fmt::Debug for NewsFacade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsFacade")
            .field("family", &self.family)
            .field("request", &self.request)
            .field("log_dir", &self.dispatcher.event_log().dir())
            .finish_non_exhaustive()
    }
}

impl NewsFacade {
    /// Facade for `family` serving `request`
    pub fn new(
        family: Family,
        request: RequestContext,
        config: Arc<PortalConfig>,
        repo: Arc<dyn ArticleRepository>,
        counters: SharedCounters,
    ) -> Self {
        let dispatcher = EffectDispatcher::new(EventLog::new(config.log_dir.clone()));
        Self {
            family,
            request,
            config,
            repo,
            counters,
            dispatcher,
            rng: StdRng::from_entropy(),
        }
    }

    /// Draw from a seeded generator instead of entropy
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Family of this facade
    pub fn family(&self) -> Family {
        self.family
    }

    /// Request served by this facade, including queued flash messages
    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    /// Mutable request access, e.g. to drain flash messages
    pub fn request_mut(&mut self) -> &mut RequestContext {
        &mut self.request
    }

    /// Fresh observers of the family, in attachment order
    pub fn observers(&self) -> Vec<Box<dyn Observer>> {
        match self.family {
            Family::Error => vec![boxed(TextErrorObserver), boxed(JsonErrorObserver)],
            Family::Activity => vec![
                boxed(UserActivityObserver),
                boxed(AuthorActivityTracker::new(Arc::clone(&self.counters))),
            ],
            Family::Tracker => vec![
                boxed(PopularArticleTracker::new(Arc::clone(&self.counters))),
                boxed(ArticleSaveTracker),
            ],
            Family::Word => {
                let known = self.repo.tags().into_iter().map(|tag| tag.name);
                let words = self
                    .config
                    .prohibited_words
                    .iter()
                    .cloned()
                    .chain(self.repo.prohibited_words());
                vec![
                    boxed(NewTagObserver::new(known)),
                    boxed(ProhibitedWordsObserver::new(words)),
                    boxed(SeoTitleChecker::new(self.config.seo_window)),
                ]
            }
            Family::Count => vec![
                boxed(ArticleCountObserver),
                boxed(BlockCreationTimeObserver::new()),
            ],
        }
    }

    /// Build blocks and run the observers without executing their effects
    ///
    /// Drawn articles are removed from `candidates`.
    pub fn assemble(&mut self, candidates: &mut Vec<Article>) -> Result<Assembly> {
        let id = Uuid::new_v4();
        let mut subject =
            BlockSubject::new(self.request.clone()).with_policy(self.config.fault_policy);
        for observer in self.observers() {
            subject.attach(observer);
        }

        *subject.blocks_mut() = assemble_blocks(candidates, &mut self.rng)?;
        subject.notify()?;

        let effects = subject.drain_effects();
        debug!(
            "Assembly {} ({} family): {} effects",
            id,
            self.family,
            effects.len()
        );
        Ok(Assembly {
            id,
            blocks: subject.into_blocks(),
            effects,
        })
    }

    /// Build blocks, notify the family's observers and execute their effects
    ///
    /// Log records are appended to the event log; flash messages are queued
    /// on the request and returned. The word family also returns its report
    /// tables, read after the new records were written.
    pub fn build_and_notify(&mut self, candidates: &mut Vec<Article>) -> Result<BuildOutcome> {
        let assembly = self.assemble(candidates)?;
        let messages = self.dispatcher.dispatch(assembly.effects, assembly.id)?;
        for message in &messages {
            self.request.push_message(message.clone());
        }

        let word_report = match self.family {
            Family::Word => Some(self.reports().word_report()?),
            _ => None,
        };

        info!(
            "Front page for {} built by {} family: {}",
            self.request.display_user(),
            self.family,
            assembly.blocks.describe()
        );
        Ok(BuildOutcome {
            assembly: assembly.id,
            blocks: assembly.blocks,
            messages,
            word_report,
        })
    }

    /// Report readers over this facade's event log and repository
    pub fn reports(&self) -> Reports<'_> {
        Reports::new(
            self.dispatcher.event_log(),
            self.repo.as_ref(),
            &self.config,
        )
    }
}

fn boxed(observer: impl Observer + 'static) -> Box<dyn Observer> {
    Box::new(observer)
}

/// Configuration, repository, counters and event log shared by facades
///
/// Counters accumulate across every facade the portal creates.
#[derive(Clone)]
pub struct Portal {
    config: Arc<PortalConfig>,
    repo: Arc<dyn ArticleRepository>,
    counters: SharedCounters,
    log: EventLog,
}

impl fmt::Debug for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Portal")
            .field("config", &self.config)
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl Portal {
    /// Portal with fresh counters
    pub fn new(config: PortalConfig, repo: Arc<dyn ArticleRepository>) -> Self {
        let log = EventLog::new(config.log_dir.clone());
        Self {
            config: Arc::new(config),
            repo,
            counters: CounterStore::shared(),
            log,
        }
    }

    /// Use an existing counter store
    #[must_use]
    pub fn with_counters(mut self, counters: SharedCounters) -> Self {
        self.counters = counters;
        self
    }

    /// Portal configuration
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Article repository
    pub fn repository(&self) -> &dyn ArticleRepository {
        self.repo.as_ref()
    }

    /// Shared counter store
    pub fn counters(&self) -> &SharedCounters {
        &self.counters
    }

    /// Event log written by the portal's facades
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Facade for a case-insensitive family key
    ///
    /// Fails with [`PortalError::UnknownFacade`] for anything other than
    /// `error`, `activity`, `tracker`, `word` or `count`.
    pub fn facade(&self, key: &str, request: RequestContext) -> Result<NewsFacade> {
        let family = key.parse()?;
        Ok(self.facade_for(family, request))
    }

    /// Facade for a family
    pub fn facade_for(&self, family: Family, request: RequestContext) -> NewsFacade {
        NewsFacade::new(
            family,
            request,
            Arc::clone(&self.config),
            Arc::clone(&self.repo),
            Arc::clone(&self.counters),
        )
    }

    /// Report readers over the portal's event log and repository
    pub fn reports(&self) -> Reports<'_> {
        Reports::new(&self.log, self.repo.as_ref(), &self.config)
    }

    /// Build the front page from every stored article
    ///
    /// Uses the configured family. Fails with [`PortalError::NoArticles`]
    /// when the repository is empty.
    pub fn front_page(&self, request: RequestContext) -> Result<BuildOutcome> {
        let mut candidates = self.repo.articles();
        if candidates.is_empty() {
            return Err(PortalError::NoArticles);
        }
        self.facade_for(self.config.selected_family, request)
            .build_and_notify(&mut candidates)
    }
}
