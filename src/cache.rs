use std::collections::HashMap;

use tracing::trace;

use crate::model::entity::{Index, Roster};
use crate::model::score::{score, Score};

/// Scores for (homeowner, neighborhood) pairs, computed on first request.
pub struct ScoreCache {
    scores: HashMap<(Index, Index), Score>,
}

impl ScoreCache {
    pub fn new() -> ScoreCache {
        ScoreCache { scores: HashMap::new() }
    }

    pub fn get(&mut self, roster: &Roster, homeowner: Index, neighborhood: Index) -> Score {
        *self.scores.entry((homeowner, neighborhood)).or_insert_with(|| {
            let value = score(&roster.homeowners[homeowner], &roster.neighborhoods[neighborhood]);
            trace!(
                homeowner = %roster.homeowners[homeowner].id,
                neighborhood = %roster.neighborhoods[neighborhood].id,
                score = value,
                "scored pair"
            );
            value
        })
    }

    /// Sum of the homeowner's scores over their whole preference list.
    pub fn preference_value(&mut self, roster: &Roster, homeowner: Index) -> Score {
        roster.homeowners[homeowner].preferences.iter()
            .map(|&neighborhood| self.get(roster, homeowner, neighborhood))
            .sum()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        ScoreCache::new()
    }
}
