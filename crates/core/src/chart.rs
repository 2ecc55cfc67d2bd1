use serde::Serialize;

use crate::color::{Color, ColorMap};
use crate::config::ChartConfig;
use crate::label::split_label;
use crate::model::{Dataset, Hierarchy};
use crate::treemap::{Rect, TreemapLayout};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelLine {
    pub text: String,
    /// Offsets relative to the cell's top-left corner.
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub name: String,
    pub category: String,
    pub value: f64,
    pub rect: Rect,
    pub fill: Color,
    pub label: Vec<LabelLine>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendItem {
    pub label: String,
    pub fill: Color,
    pub x: f64,
    pub y: f64,
}

/// A fully laid-out chart, ready to be written out or painted.
#[derive(Clone, Debug)]
pub struct Chart {
    pub config: ChartConfig,
    pub cells: Vec<Cell>,
    pub legend: Vec<LegendItem>,
}

impl Chart {
    pub fn build(data: &Dataset, config: &ChartConfig, layout: &dyn TreemapLayout) -> Self {
        let tree = Hierarchy::from_dataset(data);
        let colors = ColorMap::from_hierarchy(&config.palette, &tree);
        let fallback = config.palette.first().copied().unwrap_or(crate::color::SET3[0]);

        let items = layout.layout(&tree, config.size(), config.padding_inner);
        let cells: Vec<Cell> = items
            .into_iter()
            .map(|item| {
                let node = tree.node(item.id);
                let category = node.category.clone().unwrap_or_default();
                let label = split_label(&node.name)
                    .into_iter()
                    .enumerate()
                    .map(|(i, text)| LabelLine {
                        text,
                        x: config.label.inset_x,
                        y: config.label.first_line_y + i as f64 * config.label.line_height,
                    })
                    .collect();
                Cell {
                    name: node.name.clone(),
                    fill: colors.get(&category).unwrap_or(fallback),
                    category,
                    value: node.own_value,
                    rect: item.rect,
                    label,
                }
            })
            .collect();

        let legend = tree
            .categories()
            .into_iter()
            .enumerate()
            .map(|(i, label)| LegendItem {
                fill: colors.get(&label).unwrap_or(fallback),
                label,
                x: config.legend.offset_x + i as f64 * config.legend.spacing,
                y: config.legend.row_y,
            })
            .collect();

        tracing::info!(cells = cells.len(), total = tree.total(), "chart laid out");
        Chart { config: config.clone(), cells, legend }
    }

    /// Chart with no cells and no legend, shown while nothing has loaded.
    pub fn empty(config: &ChartConfig) -> Self {
        Chart { config: config.clone(), cells: Vec::new(), legend: Vec::new() }
    }

    /// Topmost cell under a canvas point.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<&Cell> {
        self.cells.iter().rev().find(|c| c.rect.contains(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, Platform};
    use crate::treemap::{Size, Squarified, TreemapItem};

    fn game(name: &str, category: &str, value: f64) -> Game {
        Game { name: name.into(), category: category.into(), value }
    }

    fn sample() -> Dataset {
        Dataset {
            name: "data".into(),
            children: vec![
                Platform {
                    name: "Wii".into(),
                    children: vec![game("Wii Sports", "Wii", 82.74), game("MarioKartWii", "Wii", 35.82)],
                },
                Platform { name: "NES".into(), children: vec![game("SuperMarioBros", "NES", 40.24)] },
                Platform { name: "GB".into(), children: vec![game("Tetris", "GB", 30.26)] },
            ],
        }
    }

    /// Stacks leaves in horizontal strips of equal height, ignoring values.
    struct Strips;

    impl TreemapLayout for Strips {
        fn layout(&self, tree: &Hierarchy, size: Size, _padding: f64) -> Vec<TreemapItem> {
            let leaves = tree.leaves();
            let h = size.height / leaves.len() as f64;
            leaves
                .into_iter()
                .enumerate()
                .map(|(i, id)| TreemapItem {
                    id,
                    weight: tree.node(id).value,
                    rect: Rect::new(0.0, i as f64 * h, size.width, (i + 1) as f64 * h),
                })
                .collect()
        }
    }

    #[test]
    fn single_game_scenario() {
        let data = Dataset {
            name: "data".into(),
            children: vec![Platform { name: "Wii".into(), children: vec![game("Wii Sports", "Wii", 82.74)] }],
        };
        let chart = Chart::build(&data, &ChartConfig::default(), &Squarified::default());
        assert_eq!(chart.cells.len(), 1);
        let cell = &chart.cells[0];
        assert_eq!(cell.name, "Wii Sports");
        assert_eq!(cell.category, "Wii");
        assert_eq!(cell.value, 82.74);
        assert_eq!(cell.rect, Rect::new(0.0, 0.0, 1000.0, 600.0));
        assert_eq!(chart.legend.len(), 1);
        assert_eq!(chart.legend[0].label, "Wii");
    }

    #[test]
    fn cells_follow_layout_and_carry_labels() {
        let chart = Chart::build(&sample(), &ChartConfig::default(), &Strips);
        let names: Vec<&str> = chart.cells.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Wii Sports", "MarioKartWii", "SuperMarioBros", "Tetris"]);
        assert_eq!(chart.cells[1].rect, Rect::new(0.0, 150.0, 1000.0, 300.0));

        let lines = &chart.cells[2].label;
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Super", "Mario", "Bros"]);
        assert_eq!((lines[0].x, lines[0].y), (4.0, 14.0));
        assert_eq!((lines[2].x, lines[2].y), (4.0, 38.0));
    }

    #[test]
    fn same_category_same_color_in_cells_and_legend() {
        let chart = Chart::build(&sample(), &ChartConfig::default(), &Squarified::default());
        for cell in &chart.cells {
            let swatch = chart.legend.iter().find(|l| l.label == cell.category).unwrap();
            assert_eq!(swatch.fill, cell.fill);
        }
        let wii: Vec<Color> = chart.cells.iter().filter(|c| c.category == "Wii").map(|c| c.fill).collect();
        assert!(wii.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn legend_keeps_dataset_order_and_spacing() {
        let chart = Chart::build(&sample(), &ChartConfig::default(), &Strips);
        let labels: Vec<&str> = chart.legend.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["Wii", "NES", "GB"]);
        let xs: Vec<f64> = chart.legend.iter().map(|l| l.x).collect();
        assert_eq!(xs, vec![100.0, 220.0, 340.0]);
        assert!(chart.legend.iter().all(|l| l.y == 40.0));
    }

    #[test]
    fn cell_at_hits_the_right_cell() {
        let chart = Chart::build(&sample(), &ChartConfig::default(), &Strips);
        assert_eq!(chart.cell_at(10.0, 10.0).map(|c| c.name.as_str()), Some("Wii Sports"));
        assert_eq!(chart.cell_at(500.0, 599.0).map(|c| c.name.as_str()), Some("Tetris"));
        assert!(chart.cell_at(1200.0, 10.0).is_none());
    }
}
