//! Floating tooltip shown while the pointer is over a cell.
//!
//! State only changes through [`on_hover`] and [`on_unhover`]; each call
//! replaces the previous state, so the last pointer event wins.

use crate::config::TooltipStyle;
use crate::human::{format_value, human_sales};

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub name: String,
    pub category: String,
    pub value: f64,
}

impl TooltipContent {
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Platform: {}", self.category),
            format!("Sales: {}", human_sales(self.value)),
        ]
    }

    /// Markup written into the tooltip element.
    pub fn html(&self) -> String {
        self.lines().join("<br>")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub opacity: f32,
    pub content: Option<TooltipContent>,
    /// Raw value of the hovered cell, as written to `data-value`.
    pub data_value: Option<String>,
    pub left: f64,
    pub top: f64,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HoverEvent<'a> {
    pub page_x: f64,
    pub page_y: f64,
    pub name: &'a str,
    pub category: &'a str,
    pub value: f64,
}

pub fn on_hover(_state: &TooltipState, style: &TooltipStyle, event: HoverEvent<'_>) -> TooltipState {
    TooltipState {
        opacity: style.opacity,
        content: Some(TooltipContent {
            name: event.name.to_string(),
            category: event.category.to_string(),
            value: event.value,
        }),
        data_value: Some(format_value(event.value)),
        left: event.page_x + style.offset_x,
        top: event.page_y + style.offset_y,
    }
}

/// Hides the tooltip. Content and position stay as they were.
pub fn on_unhover(state: &TooltipState) -> TooltipState {
    TooltipState { opacity: 0.0, ..state.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;

    fn wii_sports() -> HoverEvent<'static> {
        HoverEvent { page_x: 200.0, page_y: 150.0, name: "Wii Sports", category: "Wii", value: 82.74 }
    }

    #[test]
    fn hover_shows_content_and_position() {
        let style = ChartConfig::default().tooltip;
        let state = on_hover(&TooltipState::hidden(), &style, wii_sports());
        assert_eq!(state.opacity, 0.9);
        assert_eq!(
            state.content.as_ref().unwrap().html(),
            "Name: Wii Sports<br>Platform: Wii<br>Sales: 82.74 million"
        );
        assert_eq!(state.data_value.as_deref(), Some("82.74"));
        assert_eq!((state.left, state.top), (210.0, 122.0));
    }

    #[test]
    fn unhover_hides_only() {
        let style = ChartConfig::default().tooltip;
        let shown = on_hover(&TooltipState::hidden(), &style, wii_sports());
        let hidden = on_unhover(&shown);
        assert_eq!(hidden.opacity, 0.0);
        assert!(!hidden.is_visible());
        assert_eq!(hidden.content, shown.content);
    }

    #[test]
    fn last_event_wins() {
        let style = ChartConfig::default().tooltip;
        let first = on_hover(&TooltipState::hidden(), &style, wii_sports());
        let second = on_hover(
            &first,
            &style,
            HoverEvent { page_x: 0.0, page_y: 0.0, name: "Tetris", category: "GB", value: 30.26 },
        );
        assert_eq!(second.content.unwrap().name, "Tetris");
        assert_eq!(second.data_value.as_deref(), Some("30.26"));
    }
}
