use crate::color::{Color, SET3};
use crate::treemap::Size;

pub const DEFAULT_URL: &str =
    "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json";

#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    pub inset_x: f64,
    pub first_line_y: f64,
    pub line_height: f64,
    pub font_size: f64,
    pub fill: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendStyle {
    pub width: f64,
    pub height: f64,
    pub offset_x: f64,
    pub spacing: f64,
    pub row_y: f64,
    pub swatch: f64,
    pub text_x: f64,
    pub text_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TooltipStyle {
    pub offset_x: f64,
    pub offset_y: f64,
    pub opacity: f32,
}

/// Everything the renderer needs to know about geometry and styling.
/// Built once at startup and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub padding_inner: f64,
    pub label: LabelStyle,
    pub legend: LegendStyle,
    pub tooltip: TooltipStyle,
    pub palette: Vec<Color>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            padding_inner: 3.0,
            label: LabelStyle {
                inset_x: 4.0,
                first_line_y: 14.0,
                line_height: 12.0,
                font_size: 11.0,
                fill: Color::rgb(0xff, 0xff, 0xff),
            },
            legend: LegendStyle {
                width: 1000.0,
                height: 100.0,
                offset_x: 100.0,
                spacing: 120.0,
                row_y: 40.0,
                swatch: 18.0,
                text_x: 24.0,
                text_y: 14.0,
            },
            tooltip: TooltipStyle { offset_x: 10.0, offset_y: -28.0, opacity: 0.9 },
            palette: SET3.to_vec(),
        }
    }
}

impl ChartConfig {
    pub fn size(&self) -> Size {
        Size { width: self.width, height: self.height }
    }

    /// Canvas overrides; the legend keeps its own height but tracks the chart width.
    pub fn with_canvas(mut self, width: Option<f64>, height: Option<f64>, padding: Option<f64>) -> Self {
        if let Some(w) = width {
            self.width = w;
            self.legend.width = w;
        }
        if let Some(h) = height {
            self.height = h;
        }
        if let Some(p) = padding {
            self.padding_inner = p;
        }
        self
    }
}
