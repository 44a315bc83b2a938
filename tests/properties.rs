use proptest::collection::vec;
use proptest::prelude::*;

use homematch::assign::{AssignError, Strategy as AssignStrategy};
use homematch::config::MatchConfig;
use homematch::report::Report;
use homematch::{run, Error};

#[derive(Debug, Clone)]
struct Input {
    weights: Vec<Vec<u32>>,
    homeowners: Vec<(Vec<u32>, Vec<usize>)>,
}

impl Input {
    fn text(&self) -> String {
        let mut lines = Vec::new();
        for (n, w) in self.weights.iter().enumerate() {
            lines.push(format!("N N{} E:{} W:{} R:{}", n, w[0], w[1], w[2]));
        }
        for (h, (values, preferences)) in self.homeowners.iter().enumerate() {
            let preferences: Vec<String> = preferences.iter().map(|n| format!("N{}", n)).collect();
            lines.push(format!(
                "H H{} E:{} W:{} R:{} {}",
                h, values[0], values[1], values[2], preferences.join(">")
            ));
        }
        lines.join("\n")
    }

    fn score(&self, homeowner: usize, neighborhood: usize) -> u128 {
        self.homeowners[homeowner].0.iter()
            .zip(&self.weights[neighborhood])
            .map(|(v, w)| u128::from(*v) * u128::from(*w))
            .sum()
    }
}

prop_compose! {
    // Each homeowner lists a single neighborhood, spread round-robin, so an
    // even split always exists.
    fn arb_feasible_input()(count in 1usize..5, per in 0usize..4)(
        count in Just(count),
        weights in vec(vec(any::<u32>(), 3), count),
        values in vec(vec(any::<u32>(), 3), count * per)
    ) -> Input {
        let homeowners = values.into_iter()
            .enumerate()
            .map(|(h, values)| (values, vec![h % count]))
            .collect();
        Input { weights, homeowners }
    }
}

prop_compose! {
    fn arb_input()(count in 1usize..5)(
        weights in vec(vec(0u32..20, 3), count),
        homeowners in vec(
            (vec(0u32..20, 3), Just((0..count).collect::<Vec<usize>>()).prop_shuffle(), 1..=count),
            0..13,
        )
    ) -> Input {
        let homeowners = homeowners.into_iter()
            .map(|(values, mut preferences, len)| {
                preferences.truncate(len);
                (values, preferences)
            })
            .collect();
        Input { weights, homeowners }
    }
}

fn find(report: &Report, homeowner: &str) -> Vec<(String, u128)> {
    report.lines.iter()
        .flat_map(|line| {
            line.members.iter()
                .filter(|(id, _)| id == homeowner)
                .map(move |(_, score)| (line.neighborhood.clone(), *score))
        })
        .collect()
}

fn assert_sorted(report: &Report, neighborhoods: usize) {
    let ids: Vec<&str> = report.lines.iter().map(|l| l.neighborhood.as_str()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), neighborhoods);
    for line in &report.lines {
        assert!(line.members.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    }
}

proptest! {
    #[test]
    fn top_preference_properties(input in arb_input()) {
        let config = MatchConfig::new().with_strategy(AssignStrategy::TopPreference);
        let text = input.text();
        let report = run(&text, &config).unwrap();

        assert_sorted(&report, input.weights.len());
        for (h, (_, preferences)) in input.homeowners.iter().enumerate() {
            let placed = find(&report, &format!("H{}", h));
            let top = preferences[0];
            prop_assert_eq!(placed, vec![(format!("N{}", top), input.score(h, top))]);
        }
        prop_assert_eq!(report.to_string(), run(&text, &config).unwrap().to_string());
    }

    #[test]
    fn balanced_properties(input in arb_input()) {
        let mut input = input;
        let count = input.weights.len();
        let keep = input.homeowners.len() / count * count;
        input.homeowners.truncate(keep);
        let text = input.text();

        match run(&text, &MatchConfig::default()) {
            Ok(report) => {
                assert_sorted(&report, count);
                let capacity = keep / count;
                for line in &report.lines {
                    prop_assert_eq!(line.members.len(), capacity);
                }
                for (h, (_, preferences)) in input.homeowners.iter().enumerate() {
                    let placed = find(&report, &format!("H{}", h));
                    prop_assert_eq!(placed.len(), 1);
                    let chosen: usize = placed[0].0[1..].parse().unwrap();
                    prop_assert!(preferences.contains(&chosen));
                    prop_assert_eq!(placed[0].1, input.score(h, chosen));
                }
                prop_assert_eq!(report.to_string(), run(&text, &MatchConfig::default()).unwrap().to_string());
            }
            Err(err) => {
                // A single neighborhood takes everyone, so only a real split can get stuck.
                prop_assert!(count > 1);
                prop_assert!(
                    matches!(err, Error::Assign(AssignError::UnassignableHomeowner { .. })),
                    "unexpected error: {}",
                    err
                );
                prop_assert_eq!(
                    run(&text, &MatchConfig::default()).unwrap_err().to_string(),
                    err.to_string()
                );
            }
        }
    }

    #[test]
    fn balanced_succeeds_on_even_split(input in arb_feasible_input()) {
        let count = input.weights.len();
        let capacity = input.homeowners.len() / count;
        let report = run(&input.text(), &MatchConfig::default());
        prop_assert!(report.is_ok(), "balanced run failed: {:?}", report);
        let report = report.unwrap();

        assert_sorted(&report, count);
        for line in &report.lines {
            prop_assert_eq!(line.members.len(), capacity);
        }
        for (h, (_, preferences)) in input.homeowners.iter().enumerate() {
            let placed = find(&report, &format!("H{}", h));
            prop_assert_eq!(placed, vec![(format!("N{}", preferences[0]), input.score(h, preferences[0]))]);
        }
    }
}
