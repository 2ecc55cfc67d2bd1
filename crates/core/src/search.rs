use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::chart::Chart;

pub fn fuzzy_score(needle: &str, hay: &str) -> Option<i64> {
    let m = SkimMatcherV2::default();
    m.fuzzy_match(hay, needle)
}

/// Indices of cells whose name matches `needle`, best match first.
pub fn matching_cells(chart: &Chart, needle: &str) -> Vec<usize> {
    let needle = needle.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let m = SkimMatcherV2::default();
    let mut hits: Vec<(i64, usize)> = chart
        .cells
        .iter()
        .enumerate()
        .filter_map(|(i, c)| m.fuzzy_match(&c.name, needle).map(|s| (s, i)))
        .collect();
    hits.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    hits.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::model::{Dataset, Game, Platform};
    use crate::treemap::Squarified;

    #[test]
    fn finds_games_by_fuzzy_name() {
        let data = Dataset {
            name: "data".into(),
            children: vec![Platform {
                name: "Wii".into(),
                children: vec![
                    Game { name: "Wii Sports".into(), category: "Wii".into(), value: 82.74 },
                    Game { name: "Mario Kart Wii".into(), category: "Wii".into(), value: 35.82 },
                ],
            }],
        };
        let chart = Chart::build(&data, &ChartConfig::default(), &Squarified::default());
        let hits = matching_cells(&chart, "mkart");
        assert_eq!(hits.len(), 1);
        assert_eq!(chart.cells[hits[0]].name, "Mario Kart Wii");
        assert!(matching_cells(&chart, "  ").is_empty());
        assert!(fuzzy_score("zzz", "Wii Sports").is_none());
    }
}
