use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use salesmap_core::fetch::{LoadMsg, Loader, Source};
use salesmap_core::search::matching_cells;
use salesmap_core::treemap::Squarified;
use salesmap_core::view::View;
use salesmap_core::ChartConfig;

pub struct AppState {
    pub source: String,
    pub config: ChartConfig,
    pub layout: Squarified,
    pub load_rx: Option<Receiver<LoadMsg>>,
    pub view: View,
    pub loaded_at: Option<chrono::DateTime<chrono::Local>>,
    pub search: String,
    /// Cell indices matching `search`, recomputed when the query changes.
    pub matches: Vec<usize>,
    last_search: String,
}

impl AppState {
    pub fn new(source: String, config: ChartConfig) -> Self {
        Self {
            source,
            view: View::new(config.clone()),
            config,
            layout: Squarified::default(),
            load_rx: None,
            loaded_at: None,
            search: String::new(),
            matches: Vec::new(),
            last_search: String::new(),
        }
    }

    /// Starts a fresh page view: the previous chart is dropped and one fetch is issued.
    pub fn start_load(&mut self, source: String) {
        self.source = source;
        self.view = View::new(self.config.clone());
        self.loaded_at = None;
        self.matches.clear();
        self.last_search.clear();

        let (tx, rx): (Sender<LoadMsg>, Receiver<LoadMsg>) = unbounded();
        self.load_rx = Some(rx);
        Loader::new(Source::parse(&self.source)).spawn(tx);
    }

    /// Drains the loader channel without blocking. Returns true once the
    /// fetch has resolved, either way.
    pub fn poll_load(&mut self) -> bool {
        // Take ownership of the receiver to avoid borrowing while we might assign to it.
        let Some(rx) = self.load_rx.take() else { return false; };
        match rx.try_recv() {
            Ok(msg) => {
                self.finish_load(msg);
                true
            }
            Err(TryRecvError::Empty) => {
                // Put the receiver back to keep polling next frame
                self.load_rx = Some(rx);
                false
            }
            Err(TryRecvError::Disconnected) => {
                tracing::error!(source = %self.source, "loader exited without a result");
                self.finish_load(LoadMsg::Error("loader exited without a result".into()));
                true
            }
        }
    }

    pub fn finish_load(&mut self, msg: LoadMsg) {
        self.view.apply(msg, &self.layout);
        if self.view.is_rendered() {
            self.loaded_at = Some(chrono::Local::now());
        }
    }

    pub fn refresh_matches(&mut self) {
        if self.search != self.last_search {
            self.matches = matching_cells(self.view.chart(), &self.search);
            self.last_search = self.search.clone();
        }
    }

    pub fn export_page(&self) -> anyhow::Result<std::path::PathBuf> {
        let path = std::env::temp_dir().join("salesmap.html");
        std::fs::write(&path, salesmap_core::svg::page_html(self.view.chart(), "Video Game Sales"))?;
        Ok(path)
    }
}
