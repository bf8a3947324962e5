use serde::Serialize;
use tracing::info;

use crate::{
    error::Result,
    facts::{Fact, ResolvedLink},
    pairing::CoordinatePairAssembler,
    resolver::{EntityResolver, Outcome},
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub facts: usize,
    pub coordinate_facts: usize,
    pub pairs: usize,
    pub unique: usize,
    pub disambiguated: usize,
    pub not_nearby: usize,
    pub unknown: usize,
    /// Names still waiting for their other half when the stream ended.
    pub unpaired: usize,
}

impl Statistics {
    pub fn links(&self) -> usize {
        self.unique + self.disambiguated
    }

    pub fn log(&self) {
        info!(
            "{} facts, {} coordinate facts, {} pairs",
            self.facts, self.coordinate_facts, self.pairs
        );
        info!(
            "{} linked ({} unique, {} disambiguated)",
            self.links(),
            self.unique,
            self.disambiguated
        );
        info!(
            "{} not nearby, {} unknown, {} unpaired",
            self.not_nearby, self.unknown, self.unpaired
        );
        if self.pairs > 0 {
            info!(
                "{:.01}% of pairs linked",
                self.links() as f64 / self.pairs as f64 * 100.0
            );
        }
    }
}

/// One pass over a fact stream, turning coordinate facts into gazetteer links.
pub struct Linker<'a> {
    resolver: &'a EntityResolver<'a>,
    pairs: CoordinatePairAssembler,
    stats: Statistics,
}

impl<'a> Linker<'a> {
    pub fn new(resolver: &'a EntityResolver<'a>) -> Self {
        Self {
            resolver,
            pairs: CoordinatePairAssembler::new(),
            stats: Statistics::default(),
        }
    }

    /// Facts must arrive in stream order. Only the fact completing a pair can
    /// produce a link.
    pub fn observe(&mut self, fact: &Fact) -> Result<Option<ResolvedLink>> {
        self.stats.facts += 1;
        let Some(axis) = fact.axis() else {
            return Ok(None);
        };
        self.stats.coordinate_facts += 1;

        let value = fact.coordinate()?;
        let Some(pair) = self.pairs.observe(&fact.subject, axis, value) else {
            return Ok(None);
        };
        self.stats.pairs += 1;

        let outcome = self.resolver.classify(&fact.subject, Some(pair));
        match outcome {
            Outcome::Unknown => self.stats.unknown += 1,
            Outcome::Unique(_) => self.stats.unique += 1,
            Outcome::Disambiguated(_) => self.stats.disambiguated += 1,
            // classify always gets a pair here
            Outcome::Ambiguous => {}
            Outcome::NotNearby => self.stats.not_nearby += 1,
        }

        Ok(outcome.id().map(|id| ResolvedLink {
            entity: fact.subject.clone(),
            id,
        }))
    }

    /// Runs the whole stream, handing each link to `sink`. Stops at the first error.
    pub fn run(
        mut self,
        facts: impl IntoIterator<Item = Result<Fact>>,
        mut sink: impl FnMut(ResolvedLink) -> Result<()>,
    ) -> Result<Statistics> {
        for fact in facts {
            if let Some(link) = self.observe(&fact?)? {
                sink(link)?;
            }
        }
        Ok(self.finish())
    }

    pub fn finish(mut self) -> Statistics {
        self.stats.unpaired = self.pairs.pending_len();
        self.stats
    }
}
