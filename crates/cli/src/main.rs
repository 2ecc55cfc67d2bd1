use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use salesmap_core::fetch::{LoadMsg, Loader, Source};
use salesmap_core::treemap::Squarified;
use salesmap_core::view::View;
use salesmap_core::{export, search, svg, ChartConfig, DEFAULT_URL};

#[derive(Parser, Debug)]
#[command(name = "salesmap-cli", about = "Video game sales treemap renderer")]
struct Args {
    /// Dataset URL or local JSON file
    #[arg(default_value = DEFAULT_URL)]
    source: String,
    /// Output HTML page path
    #[arg(long)]
    html: Option<PathBuf>,
    /// Output chart SVG path
    #[arg(long)]
    chart_svg: Option<PathBuf>,
    /// Output legend SVG path
    #[arg(long)]
    legend_svg: Option<PathBuf>,
    /// Output CSV of laid-out cells
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Output JSON of laid-out cells
    #[arg(short, long)]
    json: Option<PathBuf>,
    /// Output PDF drawing
    #[arg(long)]
    pdf: Option<PathBuf>,
    /// List games whose name fuzzy-matches this query
    #[arg(long)]
    find: Option<String>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    height: Option<f64>,
    /// Gap between neighbouring tiles
    #[arg(long)]
    padding: Option<f64>,
}

fn main() -> Result<()> {
    salesmap_core::logging::init();
    let args = Args::parse();
    let config = ChartConfig::default().with_canvas(args.width, args.height, args.padding);
    let mut view = View::new(config);

    let (tx, rx) = crossbeam_channel::unbounded::<LoadMsg>();
    Loader::new(Source::parse(&args.source)).spawn(tx);
    if let Ok(msg) = rx.recv() {
        view.apply(msg, &Squarified::default());
    }
    if !view.is_rendered() {
        bail!("no chart rendered from {}", args.source);
    }
    let chart = view.chart();

    if let Some(path) = &args.html {
        std::fs::write(path, svg::page_html(chart, "Video Game Sales"))
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.chart_svg {
        std::fs::write(path, svg::chart_svg(chart)).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.legend_svg {
        std::fs::write(path, svg::legend_svg(chart)).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.csv {
        let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::to_csv(chart, file)?;
    }
    if let Some(path) = &args.json {
        let json = export::to_json(chart);
        std::fs::write(path, serde_json::to_string_pretty(&json)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.pdf {
        export::to_pdf(chart, path)?;
    }
    if let Some(query) = &args.find {
        for i in search::matching_cells(chart, query) {
            let c = &chart.cells[i];
            println!("{}\t{}\t{}", c.name, c.category, salesmap_core::human::human_sales(c.value));
        }
    }

    println!("Rendered {} tiles across {} platforms", chart.cells.len(), chart.legend.len());
    Ok(())
}
