//! Block builders
//!
//! A [`BlockBuilder`] draws a random sample from the shared candidate list,
//! stores it under its block key and removes it from the list, so blocks
//! built one after another against the same list never share an article.
//!
//! Every builder owns a [`BlockSubject`] and notifies it exactly once per
//! [`build_block`](BlockBuilder::build_block) call, whether or not a draw
//! happened.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use towns_news::article::ArticleBuilder;
//! use towns_news::builder::{BlockBuilder, BlockShape};
//! use towns_news::BlockKind;
//!
//! let mut candidates: Vec<_> = (1..=5)
//!     .map(|id| ArticleBuilder::new(id).title(format!("Story {}", id)).build().unwrap())
//!     .collect();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let mut builder = BlockBuilder::new(BlockShape::Two);
//! builder.build_block(&mut candidates, &mut rng).unwrap();
//!
//! assert_eq!(builder.block().get(BlockKind::TwoArticles).unwrap().len(), 2);
//! assert_eq!(candidates.len(), 3);
//! ```

use std::fmt;

use rand::RngCore;
use rand::seq::index;
use tracing::trace;

use crate::article::Article;
use crate::block::{BlockKind, Blocks, Placement};
use crate::effects::Effect;
use crate::observer::{BlockSubject, Observer, ObserverKind};
use crate::request::RequestContext;
use crate::{PortalError, Result};

/// Number of articles the six-article builder splits into each half
const SIX_HALF: usize = 3;

/// Builder arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockShape {
    /// One headline article
    One,
    /// Two-article row
    Two,
    /// Three-article row
    Three,
    /// Six-article grid, split in two halves
    Six,
}

impl BlockShape {
    /// Every shape, in build order
    pub const ALL: [BlockShape; 4] = [
        BlockShape::One,
        BlockShape::Two,
        BlockShape::Three,
        BlockShape::Six,
    ];

    /// Number of articles drawn
    pub fn size(self) -> usize {
        match self {
            BlockShape::One => 1,
            BlockShape::Two => 2,
            BlockShape::Three => 3,
            BlockShape::Six => 6,
        }
    }

    /// Block key the shape fills first
    pub fn kind(self) -> BlockKind {
        match self {
            BlockShape::One => BlockKind::OneArticle,
            BlockShape::Two => BlockKind::TwoArticles,
            BlockShape::Three => BlockKind::ThreeArticles,
            BlockShape::Six => BlockKind::SixArticles,
        }
    }
}

impl fmt::Display for BlockShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-article builder", self.size())
    }
}

/// Draws one block from a candidate list
#[derive(Debug)]
pub struct BlockBuilder {
    shape: BlockShape,
    subject: BlockSubject,
}

impl BlockBuilder {
    /// Builder for an anonymous request
    pub fn new(shape: BlockShape) -> Self {
        Self::with_request(shape, RequestContext::anonymous())
    }

    /// Builder whose subject carries `request`
    pub fn with_request(shape: BlockShape, request: RequestContext) -> Self {
        Self {
            shape,
            subject: BlockSubject::new(request),
        }
    }

    /// Builder arity
    pub fn shape(&self) -> BlockShape {
        self.shape
    }

    /// Draw from `articles`, store the block and notify observers once
    ///
    /// Drawn articles are removed from `articles`; the rest keep their order.
    /// One/two/three builders leave the list untouched when it holds fewer
    /// than [`BlockShape::size`] articles. The six builder draws up to six:
    /// the first three go to `six_articles_block`, any others to
    /// `six_articles_block2`. With an empty list it still stores an empty
    /// `six_articles_block`.
    pub fn build_block(
        &mut self,
        articles: &mut Vec<Article>,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        match self.shape {
            BlockShape::One => {
                if let Some(article) = draw(articles, 1, rng).pop() {
                    self.store(BlockKind::OneArticle, Placement::Single(article));
                }
            }
            BlockShape::Two | BlockShape::Three => {
                let drawn = draw(articles, self.shape.size(), rng);
                if !drawn.is_empty() {
                    self.store(self.shape.kind(), Placement::Group(drawn));
                }
            }
            BlockShape::Six => {
                let amount = articles.len().min(self.shape.size());
                let mut first = draw(articles, amount, rng);
                let second = first.split_off(first.len().min(SIX_HALF));
                self.store(BlockKind::SixArticles, Placement::Group(first));
                if !second.is_empty() {
                    self.store(BlockKind::SixArticles2, Placement::Group(second));
                }
            }
        }
        self.subject.notify()
    }

    fn store(&mut self, kind: BlockKind, placement: Placement) {
        trace!("{} stored {} articles under {}", self.shape, placement.len(), kind);
        self.subject.blocks_mut().insert(kind, placement);
    }

    /// Blocks built so far
    pub fn block(&self) -> &Blocks {
        self.subject.blocks()
    }

    /// Consume the builder, keeping its blocks
    pub fn into_block(self) -> Blocks {
        self.subject.into_blocks()
    }

    /// Attach an observer to the builder's subject
    pub fn attach_observer(&mut self, observer: Box<dyn Observer>) {
        self.subject.attach(observer);
    }

    /// Detach the first observer of the given kind
    pub fn detach_observer(&mut self, kind: ObserverKind) -> Option<Box<dyn Observer>> {
        self.subject.detach(kind)
    }

    /// Notify the builder's observers
    pub fn notify_observers(&mut self) -> Result<()> {
        self.subject.notify()
    }

    /// Take the effects emitted by the builder's observers
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.subject.drain_effects()
    }
}

/// Move `amount` uniformly drawn articles out of `articles`
///
/// Returns nothing and leaves the list alone when it is too short.
fn draw(articles: &mut Vec<Article>, amount: usize, rng: &mut dyn RngCore) -> Vec<Article> {
    if amount == 0 || articles.len() < amount {
        return Vec::new();
    }
    let picked = index::sample(rng, articles.len(), amount);
    let mut slots: Vec<Option<Article>> = articles.drain(..).map(Some).collect();
    let drawn = picked.iter().filter_map(|i| slots[i].take()).collect();
    articles.extend(slots.into_iter().flatten());
    drawn
}

/// Builders grouped the way the front page uses them
///
/// The one-three facade covers the one- and three-article builders, the
/// other two cover a single shape each. Asking a facade for a shape outside
/// its group fails with [`PortalError::UnknownStrategy`].
#[derive(Debug, Clone)]
pub struct BuilderFacade {
    shapes: &'static [BlockShape],
    request: RequestContext,
}

impl BuilderFacade {
    /// One- and three-article builders
    pub fn one_three(request: RequestContext) -> Self {
        Self {
            shapes: &[BlockShape::One, BlockShape::Three],
            request,
        }
    }

    /// Two-article builder
    pub fn two(request: RequestContext) -> Self {
        Self {
            shapes: &[BlockShape::Two],
            request,
        }
    }

    /// Six-article builder
    pub fn six(request: RequestContext) -> Self {
        Self {
            shapes: &[BlockShape::Six],
            request,
        }
    }

    /// Shapes this facade can build
    pub fn shapes(&self) -> &'static [BlockShape] {
        self.shapes
    }

    /// Run a fresh builder of `shape` and return its blocks
    pub fn build(
        &self,
        shape: BlockShape,
        articles: &mut Vec<Article>,
        rng: &mut dyn RngCore,
    ) -> Result<Blocks> {
        if !self.shapes.contains(&shape) {
            return Err(PortalError::UnknownStrategy(shape.to_string()));
        }
        let mut builder = BlockBuilder::with_request(shape, self.request.clone());
        builder.build_block(articles, rng)?;
        Ok(builder.into_block())
    }
}
