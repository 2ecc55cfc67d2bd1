use crate::chart::{Cell, Chart};
use crate::config::ChartConfig;
use crate::fetch::LoadMsg;
use crate::tooltip::{on_hover, on_unhover, HoverEvent, TooltipState};
use crate::treemap::TreemapLayout;

pub enum ViewState {
    /// Waiting on the fetch. Also where a failed fetch leaves the view.
    Loading,
    Rendered(Chart),
}

/// Page-level state: the chart once it exists, and the tooltip.
pub struct View {
    pub config: ChartConfig,
    pub state: ViewState,
    pub tooltip: TooltipState,
    pub failed: bool,
    empty: Chart,
}

impl View {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            empty: Chart::empty(&config),
            config,
            state: ViewState::Loading,
            tooltip: TooltipState::hidden(),
            failed: false,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.state, ViewState::Rendered(_))
    }

    pub fn chart(&self) -> &Chart {
        match &self.state {
            ViewState::Rendered(chart) => chart,
            ViewState::Loading => &self.empty,
        }
    }

    /// Applies the loader's result. Rendering is terminal; later messages are ignored.
    pub fn apply(&mut self, msg: LoadMsg, layout: &dyn TreemapLayout) {
        if self.is_rendered() {
            return;
        }
        match msg {
            LoadMsg::Done(data) => {
                self.state = ViewState::Rendered(Chart::build(&data, &self.config, layout));
            }
            LoadMsg::Error(e) => {
                tracing::debug!("chart left empty: {e}");
                self.failed = true;
            }
        }
    }

    /// Pointer moved to a canvas position. Hovering empty space hides the tooltip.
    pub fn pointer_moved(&mut self, canvas_x: f64, canvas_y: f64, page_x: f64, page_y: f64) -> Option<&Cell> {
        let chart = match &self.state {
            ViewState::Rendered(chart) => chart,
            ViewState::Loading => return None,
        };
        match chart.cell_at(canvas_x, canvas_y) {
            Some(cell) => {
                self.tooltip = on_hover(
                    &self.tooltip,
                    &self.config.tooltip,
                    HoverEvent {
                        page_x,
                        page_y,
                        name: &cell.name,
                        category: &cell.category,
                        value: cell.value,
                    },
                );
                Some(cell)
            }
            None => {
                self.tooltip = on_unhover(&self.tooltip);
                None
            }
        }
    }

    pub fn pointer_left(&mut self) {
        self.tooltip = on_unhover(&self.tooltip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Dataset, Game, Platform};
    use crate::treemap::Squarified;

    fn wii() -> Dataset {
        Dataset {
            name: "data".into(),
            children: vec![Platform {
                name: "Wii".into(),
                children: vec![Game { name: "Wii Sports".into(), category: "Wii".into(), value: 82.74 }],
            }],
        }
    }

    #[test]
    fn failed_fetch_leaves_empty_loading_view() {
        let mut view = View::new(ChartConfig::default());
        view.apply(LoadMsg::Error("network down".into()), &Squarified::default());
        assert!(!view.is_rendered());
        assert!(view.failed);
        assert!(view.chart().cells.is_empty());
        assert!(view.chart().legend.is_empty());
        assert!(view.pointer_moved(10.0, 10.0, 10.0, 10.0).is_none());
        assert_eq!(view.tooltip.opacity, 0.0);
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn failed_fetch_logs_a_single_error() {
        use crate::fetch::{Loader, Source};

        let out = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(out.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let missing = std::env::temp_dir().join(format!("salesmap-{}-absent.json", std::process::id()));
        let mut view = View::new(ChartConfig::default());
        tracing::subscriber::with_default(subscriber, || {
            let (tx, rx) = crossbeam_channel::unbounded();
            Loader::new(Source::File(missing)).load(tx);
            view.apply(rx.recv().unwrap(), &Squarified::default());
        });

        assert!(view.failed);
        let text = String::from_utf8(out.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1, "{text}");
        assert!(lines[0].contains("ERROR"));
    }

    #[test]
    fn hover_and_leave_drive_tooltip() {
        let mut view = View::new(ChartConfig::default());
        view.apply(LoadMsg::Done(wii()), &Squarified::default());
        assert!(view.is_rendered());

        let hit = view.pointer_moved(500.0, 300.0, 520.0, 400.0).map(|c| c.name.clone());
        assert_eq!(hit.as_deref(), Some("Wii Sports"));
        assert_eq!(view.tooltip.opacity, 0.9);
        assert_eq!(
            view.tooltip.content.as_ref().unwrap().html(),
            "Name: Wii Sports<br>Platform: Wii<br>Sales: 82.74 million"
        );
        assert_eq!((view.tooltip.left, view.tooltip.top), (530.0, 372.0));

        view.pointer_left();
        assert_eq!(view.tooltip.opacity, 0.0);
    }

    #[test]
    fn rendered_is_terminal() {
        let mut view = View::new(ChartConfig::default());
        view.apply(LoadMsg::Done(wii()), &Squarified::default());
        view.apply(LoadMsg::Error("late".into()), &Squarified::default());
        assert!(view.is_rendered());
        assert!(!view.failed);
        assert_eq!(view.chart().cells.len(), 1);
    }
}
