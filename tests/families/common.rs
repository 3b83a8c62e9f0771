//! Shared fixtures for the family tests

use std::sync::Arc;

use tempfile::TempDir;
use towns_news::{
    Article, ArticleBuilder, ArticleRepository, InMemoryRepository, Portal, PortalConfig,
};

/// Portal over an in-memory repository, logging into a temp directory
pub struct Fixture {
    /// Keeps the log directory alive
    pub dir: TempDir,
    pub repo: Arc<InMemoryRepository>,
    pub portal: Portal,
}

impl Fixture {
    pub fn new(articles: Vec<Article>) -> Self {
        Self::with_config(articles, |config| config)
    }

    pub fn with_config(
        articles: Vec<Article>,
        configure: impl FnOnce(PortalConfig) -> PortalConfig,
    ) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let dir = TempDir::new().expect("temp dir");
        let repo = Arc::new(InMemoryRepository::with_articles(articles));
        let shared: Arc<dyn ArticleRepository> = repo.clone();
        let portal = Portal::new(configure(PortalConfig::new(dir.path())), shared);
        Self { dir, repo, portal }
    }

    /// Every stored article, as a fresh candidate list
    pub fn candidates(&self) -> Vec<Article> {
        self.repo.articles()
    }
}

pub fn article(id: u64, title: &str) -> Article {
    ArticleBuilder::new(id).title(title).build().unwrap()
}

/// `n` articles titled "Article 1" .. "Article n"
pub fn numbered(n: u64) -> Vec<Article> {
    (1..=n)
        .map(|id| article(id, &format!("Article {}", id)))
        .collect()
}
