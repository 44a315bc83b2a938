use std::cmp::Reverse;
use std::fmt;

use itertools::Itertools;

use crate::model::entity::{Id, Roster};
use crate::model::score::Score;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub neighborhood: Id,
    /// Homeowner ids with their score, best score first.
    pub members: Vec<(Id, Score)>,
}

/// Final grouping of homeowners, one line per declared neighborhood.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub lines: Vec<ReportLine>,
}

impl Report {
    /// Neighborhoods by id ascending; members by score descending, equal
    /// scores by homeowner id ascending.
    pub fn build(roster: &Roster) -> Report {
        let lines = roster.neighborhoods.iter()
            .sorted_by(|a, b| a.id.cmp(&b.id))
            .map(|neighborhood| {
                let members = neighborhood.members.iter()
                    .map(|member| (roster.homeowners[member.homeowner].id.clone(), member.score))
                    .sorted_by(|(id_a, score_a), (id_b, score_b)| {
                        Reverse(score_a).cmp(&Reverse(score_b)).then_with(|| id_a.cmp(id_b))
                    })
                    .collect();
                ReportLine { neighborhood: neighborhood.id.clone(), members }
            })
            .collect();
        Report { lines }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.neighborhood)?;
        for (homeowner, score) in &self.members {
            write!(f, " {}({})", homeowner, score)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.iter().join("\n"))
    }
}
