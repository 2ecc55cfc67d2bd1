use thiserror::Error;

use crate::chart::Chart;
use crate::human::format_value;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("pdf export failed: {0}")]
    Pdf(String),
}

pub fn to_csv(chart: &Chart, mut w: impl std::io::Write) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(&mut w);
    writer.write_record(["name", "category", "value", "x0", "y0", "x1", "y1", "fill"])?;
    for c in &chart.cells {
        writer.write_record([
            c.name.clone(),
            c.category.clone(),
            format_value(c.value),
            format_value(c.rect.x0),
            format_value(c.rect.y0),
            format_value(c.rect.x1),
            format_value(c.rect.y1),
            c.fill.to_hex(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_json(chart: &Chart) -> serde_json::Value {
    serde_json::json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "width": chart.config.width,
        "height": chart.config.height,
        "padding_inner": chart.config.padding_inner,
        "cells": chart.cells,
        "legend": chart.legend,
    })
}

/// One landscape A4 page with the tiles scaled to fit and the legend underneath.
pub fn to_pdf(chart: &Chart, out: &std::path::Path) -> Result<(), ExportError> {
    use printpdf::{BuiltinFont, Color as PdfColor, Mm, PdfDocument, Rect, Rgb};

    const PAGE_W: f32 = 297.0;
    const PAGE_H: f32 = 210.0;
    const MARGIN: f32 = 10.0;

    let pdf_err = |e: printpdf::Error| ExportError::Pdf(e.to_string());

    let (doc, page1, layer1) = PdfDocument::new("Video Game Sales", Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;

    let cfg = &chart.config;
    let scale = ((PAGE_W - 2.0 * MARGIN) / cfg.width as f32).min((PAGE_H - 50.0) / cfg.height as f32);
    let top = PAGE_H - 20.0;
    let fill = |c: crate::color::Color| {
        PdfColor::Rgb(Rgb::new(c.r as f32 / 255.0, c.g as f32 / 255.0, c.b as f32 / 255.0, None))
    };
    let black = PdfColor::Rgb(Rgb::new(0.0, 0.0, 0.0, None));

    layer.set_fill_color(black.clone());
    layer.use_text("Video Game Sales", 14.0, Mm(MARGIN), Mm(PAGE_H - 12.0), &font);

    // PDF space grows upwards, canvas space grows downwards
    for cell in &chart.cells {
        let r = cell.rect;
        layer.set_fill_color(fill(cell.fill));
        layer.add_rect(Rect::new(
            Mm(MARGIN + r.x0 as f32 * scale),
            Mm(top - r.y1 as f32 * scale),
            Mm(MARGIN + r.x1 as f32 * scale),
            Mm(top - r.y0 as f32 * scale),
        ));
    }

    let legend_y = top - cfg.height as f32 * scale - 12.0;
    let step = (PAGE_W - 2.0 * MARGIN) / chart.legend.len().max(1) as f32;
    for (i, item) in chart.legend.iter().enumerate() {
        let x = MARGIN + i as f32 * step;
        layer.set_fill_color(fill(item.fill));
        layer.add_rect(Rect::new(Mm(x), Mm(legend_y), Mm(x + 4.0), Mm(legend_y + 4.0)));
        layer.set_fill_color(black.clone());
        layer.use_text(item.label.as_str(), 7.0, Mm(x + 5.0), Mm(legend_y + 0.8), &font);
    }

    let file = std::fs::File::create(out)?;
    let mut buf = std::io::BufWriter::new(file);
    doc.save(&mut buf).map_err(pdf_err)?;
    tracing::info!(path = %out.display(), "pdf written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::model::{Dataset, Game, Platform};
    use crate::treemap::Squarified;

    fn chart() -> Chart {
        let data = Dataset {
            name: "data".into(),
            children: vec![
                Platform {
                    name: "Wii".into(),
                    children: vec![Game { name: "Wii Sports".into(), category: "Wii".into(), value: 82.74 }],
                },
                Platform {
                    name: "GB".into(),
                    children: vec![Game { name: "Tetris, Deluxe".into(), category: "GB".into(), value: 30.26 }],
                },
            ],
        };
        Chart::build(&data, &ChartConfig::default(), &Squarified::default())
    }

    #[test]
    fn csv_has_header_and_one_row_per_cell() {
        let mut buf = Vec::new();
        to_csv(&chart(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,category,value,x0,y0,x1,y1,fill");
        assert!(lines[1].starts_with("Wii Sports,Wii,82.74,0,0,"));
        assert!(lines[2].starts_with("\"Tetris, Deluxe\",GB,30.26,"));
    }

    #[test]
    fn json_lists_cells_and_legend() {
        let v = to_json(&chart());
        assert_eq!(v["cells"].as_array().unwrap().len(), 2);
        assert_eq!(v["cells"][0]["name"], "Wii Sports");
        assert_eq!(v["cells"][0]["fill"], "#8dd3c7");
        assert_eq!(v["legend"][1]["label"], "GB");
        assert!(v["generated_at"].is_string());
    }

    #[test]
    fn pdf_is_written() {
        let path = std::env::temp_dir().join(format!("salesmap-{}.pdf", std::process::id()));
        to_pdf(&chart(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
