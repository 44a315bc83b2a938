pub mod attribute {
    use std::fmt;

    pub type Code = String;
    pub type Value = u32;

    /// Ordered set of attribute codes shared by neighborhoods and homeowners.
    /// Record values are stored in the same order as the codes.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AttributeSet {
        codes: Vec<Code>,
    }

    impl AttributeSet {
        pub fn new<I, S>(codes: I) -> AttributeSet
        where
            I: IntoIterator<Item = S>,
            S: Into<Code>,
        {
            AttributeSet { codes: codes.into_iter().map(Into::into).collect() }
        }

        pub fn len(&self) -> usize {
            self.codes.len()
        }

        pub fn is_empty(&self) -> bool {
            self.codes.is_empty()
        }

        pub fn position(&self, code: &str) -> Option<usize> {
            self.codes.iter().position(|c| c == code)
        }

        pub fn codes(&self) -> &[Code] {
            &self.codes
        }
    }

    impl Default for AttributeSet {
        /// Environment, Walkability, Recreation.
        fn default() -> Self {
            AttributeSet::new(["E", "W", "R"])
        }
    }

    impl fmt::Display for AttributeSet {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.codes.join(","))
        }
    }
}

pub mod entity {
    use super::attribute::Value;
    use super::score::Score;

    pub type Id = String;
    pub type Index = usize;

    #[derive(Debug, Clone, PartialEq)]
    pub struct Member {
        pub homeowner: Index,
        pub score: Score,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Neighborhood {
        pub id: Id,
        pub weights: Vec<Value>,
        pub members: Vec<Member>,
    }

    impl Neighborhood {
        pub fn new(id: impl Into<Id>, weights: Vec<Value>) -> Neighborhood {
            Neighborhood { id: id.into(), weights, members: Vec::new() }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Homeowner {
        pub id: Id,
        pub values: Vec<Value>,
        /// Neighborhood indices, most preferred first.
        pub preferences: Vec<Index>,
        pub assigned: Option<Index>,
    }

    impl Homeowner {
        pub fn new(id: impl Into<Id>, values: Vec<Value>, preferences: Vec<Index>) -> Homeowner {
            Homeowner { id: id.into(), values, preferences, assigned: None }
        }
    }

    /// Everything read from one input file. Indices in `Homeowner::preferences`,
    /// `Homeowner::assigned` and `Member::homeowner` point into these vectors.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Roster {
        pub neighborhoods: Vec<Neighborhood>,
        pub homeowners: Vec<Homeowner>,
    }
}

pub mod score {
    use super::entity::{Homeowner, Neighborhood};

    /// Each `u32 * u32` product fits in 64 bits, so sums of them stay in range.
    pub type Score = u128;

    /// Weighted dot product of the homeowner's values against the
    /// neighborhood's weights. Both sides must come from the same attribute set.
    pub fn score(homeowner: &Homeowner, neighborhood: &Neighborhood) -> Score {
        debug_assert_eq!(homeowner.values.len(), neighborhood.weights.len());
        homeowner.values.iter()
            .zip(neighborhood.weights.iter())
            .map(|(value, weight)| Score::from(*value) * Score::from(*weight))
            .sum()
    }
}
