use std::cmp::Reverse;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::cache::ScoreCache;
use crate::model::entity::{Id, Index, Member, Roster};
use crate::model::score::Score;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Every homeowner joins the first neighborhood on their list.
    TopPreference,
    /// Neighborhoods share homeowners evenly; each neighborhood takes the
    /// best-scoring homeowners among those asking for it.
    ///
    /// Requires the homeowner count to be a multiple of the neighborhood
    /// count, and every neighborhood ends up with the same number of members.
    /// Inputs where some neighborhood is wanted by nobody, or cannot be split
    /// evenly, fail with [`AssignError::UnevenCapacity`] or
    /// [`AssignError::UnassignableHomeowner`]; use `TopPreference` for those.
    #[default]
    Balanced,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::TopPreference => f.write_str("top_preference"),
            Strategy::Balanced => f.write_str("balanced"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AssignError {
    #[error("homeowner `{id}` cannot be assigned to any neighborhood")]
    UnassignableHomeowner { id: Id },
    #[error("{homeowners} homeowners cannot be split evenly across {neighborhoods} neighborhoods")]
    UnevenCapacity { homeowners: usize, neighborhoods: usize },
    #[error("homeowners declared but no neighborhoods")]
    NoNeighborhoods,
}

/// Commits every homeowner in `roster` to exactly one neighborhood.
/// Must run once per roster: a second run would append duplicate members.
pub fn assign(roster: &mut Roster, strategy: Strategy) -> Result<(), AssignError> {
    debug_assert!(roster.homeowners.iter().all(|h| h.assigned.is_none()));
    if let Some(homeowner) = roster.homeowners.iter().find(|h| h.preferences.is_empty()) {
        return Err(AssignError::UnassignableHomeowner { id: homeowner.id.clone() });
    }

    let mut cache = ScoreCache::new();
    match strategy {
        Strategy::TopPreference => assign_top_preference(roster, &mut cache),
        Strategy::Balanced => assign_balanced(roster, &mut cache)?,
    }
    info!(
        strategy = %strategy,
        homeowners = roster.homeowners.len(),
        scored_pairs = cache.len(),
        "assigned homeowners"
    );
    Ok(())
}

fn commit(roster: &mut Roster, homeowner: Index, neighborhood: Index, score: Score) {
    debug!(
        homeowner = %roster.homeowners[homeowner].id,
        neighborhood = %roster.neighborhoods[neighborhood].id,
        score,
        "commit"
    );
    roster.neighborhoods[neighborhood].members.push(Member { homeowner, score });
    roster.homeowners[homeowner].assigned = Some(neighborhood);
}

fn assign_top_preference(roster: &mut Roster, cache: &mut ScoreCache) {
    for homeowner in 0..roster.homeowners.len() {
        let neighborhood = roster.homeowners[homeowner].preferences[0];
        let score = cache.get(roster, homeowner, neighborhood);
        commit(roster, homeowner, neighborhood, score);
    }
}

fn assign_balanced(roster: &mut Roster, cache: &mut ScoreCache) -> Result<(), AssignError> {
    let homeowners = roster.homeowners.len();
    let neighborhoods = roster.neighborhoods.len();
    if homeowners == 0 {
        return Ok(());
    }
    if neighborhoods == 0 {
        return Err(AssignError::NoNeighborhoods);
    }
    if homeowners % neighborhoods != 0 {
        return Err(AssignError::UnevenCapacity { homeowners, neighborhoods });
    }
    let capacity = homeowners / neighborhoods;

    // Per neighborhood: homeowners asking for it, best score first, ties in input order.
    let mut rankings: Vec<Vec<Index>> = vec![Vec::new(); neighborhoods];
    for (homeowner, entry) in roster.homeowners.iter().enumerate() {
        for &neighborhood in &entry.preferences {
            rankings[neighborhood].push(homeowner);
        }
    }
    for (neighborhood, ranking) in rankings.iter_mut().enumerate() {
        ranking.sort_by_key(|&homeowner| Reverse(cache.get(roster, homeowner, neighborhood)));
    }

    // Lowest preference value first; rounds walk it from the back.
    let values: Vec<Score> = (0..homeowners).map(|h| cache.preference_value(roster, h)).collect();
    let mut queue: Vec<Index> = (0..homeowners).sorted_by_key(|&h| values[h]).collect();

    let mut depth = 0;
    while !queue.is_empty() {
        let mut committed = 0;
        for &homeowner in queue.iter().rev() {
            let neighborhood = match roster.homeowners[homeowner].preferences.get(depth) {
                Some(&neighborhood) => neighborhood,
                None => continue,
            };
            let free = capacity - roster.neighborhoods[neighborhood].members.len();
            let selected = rankings[neighborhood].iter()
                .filter(|&&candidate| roster.homeowners[candidate].assigned.is_none())
                .take(free)
                .any(|&candidate| candidate == homeowner);
            if selected {
                let score = cache.get(roster, homeowner, neighborhood);
                commit(roster, homeowner, neighborhood, score);
                committed += 1;
            }
        }
        queue.retain(|&h| roster.homeowners[h].assigned.is_none());

        if committed == 0 {
            depth += 1;
            let longest = queue.iter()
                .map(|&h| roster.homeowners[h].preferences.len())
                .max()
                .unwrap_or(0);
            if depth >= longest {
                if let Some(&stuck) = queue.first() {
                    return Err(AssignError::UnassignableHomeowner { id: roster.homeowners[stuck].id.clone() });
                }
            }
        }
        debug!(depth, committed, remaining = queue.len(), "balanced round");
    }
    Ok(())
}
