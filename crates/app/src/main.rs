mod state;
mod ui;

use eframe::egui;
use salesmap_core::{ChartConfig, DEFAULT_URL};
use state::AppState;

struct SalesMapApp {
    state: AppState,
}

impl SalesMapApp {
    fn new(_cc: &eframe::CreationContext<'_>, source: String) -> Self {
        let mut state = AppState::new(source.clone(), ChartConfig::default());
        state.start_load(source);
        Self { state }
    }
}

impl eframe::App for SalesMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::draw(&mut self.state, ctx);
    }
}

fn main() -> eframe::Result<()> {
    salesmap_core::logging::init();
    let source = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1400.0, 820.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Video Game Sales",
        options,
        Box::new(move |cc| Ok(Box::new(SalesMapApp::new(cc, source)))),
    )
}
