use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use salesmap_core::color::Color;
use salesmap_core::human::format_value;

use crate::state::AppState;

pub fn draw(app: &mut AppState, ctx: &egui::Context) {
    poll_load(app, ctx);
    app.refresh_matches();

    // Keep repainting until the fetch resolves
    if app.load_rx.is_some() {
        ctx.request_repaint();
    }

    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        top_bar(ui, app);
    });

    egui::SidePanel::left("sidebar").resizable(true).default_width(320.0).show(ctx, |ui| {
        ui.heading("Games");
        status(ui, app);
        ui.separator();
        games_table(ui, app);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            chart_canvas(ui, app);
            ui.add_space(8.0);
            legend_canvas(ui, app);
        });
    });

    tooltip(ctx, app);
}

fn top_bar(ui: &mut Ui, app: &mut AppState) {
    ui.horizontal(|ui| {
        if ui.button("Open JSON…").clicked() {
            if let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() {
                app.start_load(path.display().to_string());
            }
        }
        if ui.button("Default dataset").clicked() {
            app.start_load(salesmap_core::DEFAULT_URL.to_string());
        }
        ui.add_enabled_ui(app.view.is_rendered(), |ui| {
            if ui.button("Open in browser").clicked() {
                match app.export_page() {
                    Ok(path) => {
                        if let Err(e) = open::that(&path) {
                            tracing::error!("could not open {}: {e}", path.display());
                        }
                    }
                    Err(e) => tracing::error!("html export failed: {e:#}"),
                }
            }
        });
        ui.separator();
        ui.label("Search:");
        ui.text_edit_singleline(&mut app.search);
    });
}

fn status(ui: &mut Ui, app: &AppState) {
    ui.label(app.source.as_str());
    if app.view.is_rendered() {
        let chart = app.view.chart();
        let when = app.loaded_at.map(|t| t.format("%H:%M:%S").to_string()).unwrap_or_default();
        ui.label(format!("{} games on {} platforms, loaded {}", chart.cells.len(), chart.legend.len(), when));
    } else if app.view.failed {
        ui.colored_label(ui.visuals().error_fg_color, "Error loading data");
    } else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading…");
        });
    }
}

fn games_table(ui: &mut Ui, app: &AppState) {
    let chart = app.view.chart();
    let rows: Vec<usize> = if app.search.trim().is_empty() {
        (0..chart.cells.len()).collect()
    } else {
        app.matches.clone()
    };
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::remainder())
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Name");
            });
            header.col(|ui| {
                ui.strong("Platform");
            });
            header.col(|ui| {
                ui.strong("Sales (M)");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let cell = &chart.cells[rows[row.index()]];
                row.col(|ui| {
                    ui.label(cell.name.as_str());
                });
                row.col(|ui| {
                    ui.label(cell.category.as_str());
                });
                row.col(|ui| {
                    ui.label(format_value(cell.value));
                });
            });
        });
}

fn chart_canvas(ui: &mut Ui, app: &mut AppState) {
    let cfg = &app.config;
    let (response, painter) =
        ui.allocate_painter(egui::vec2(cfg.width as f32, cfg.height as f32), Sense::hover());
    let origin = response.rect.min;
    let chart = app.view.chart();

    for (i, cell) in chart.cells.iter().enumerate() {
        let r = cell.rect;
        let rect = egui::Rect::from_min_max(
            origin + egui::vec2(r.x0 as f32, r.y0 as f32),
            origin + egui::vec2(r.x1 as f32, r.y1 as f32),
        );
        painter.rect_filled(rect, 0.0, color32(cell.fill));
        if app.matches.contains(&i) {
            painter.rect_stroke(rect, 0.0, Stroke::new(2.0, Color32::BLACK));
        }
        let clipped = painter.with_clip_rect(rect);
        for line in &cell.label {
            clipped.text(
                rect.min + egui::vec2(line.x as f32, line.y as f32),
                Align2::LEFT_BOTTOM,
                &line.text,
                FontId::proportional(cfg.label.font_size as f32),
                color32(cfg.label.fill),
            );
        }
    }

    match response.hover_pos() {
        Some(pos) => {
            let local = pos - origin;
            app.view.pointer_moved(local.x as f64, local.y as f64, pos.x as f64, pos.y as f64);
        }
        None => {
            if app.view.tooltip.is_visible() {
                app.view.pointer_left();
            }
        }
    }
}

fn legend_canvas(ui: &mut Ui, app: &AppState) {
    let lg = &app.config.legend;
    let (response, painter) = ui.allocate_painter(egui::vec2(lg.width as f32, lg.height as f32), Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    for item in &app.view.chart().legend {
        let at = origin + egui::vec2(item.x as f32, item.y as f32);
        let swatch = egui::Rect::from_min_size(at, egui::vec2(lg.swatch as f32, lg.swatch as f32));
        painter.rect_filled(swatch, 0.0, color32(item.fill));
        painter.text(
            at + egui::vec2(lg.text_x as f32, lg.text_y as f32),
            Align2::LEFT_BOTTOM,
            &item.label,
            FontId::proportional(12.0),
            text_color,
        );
    }
}

fn tooltip(ctx: &egui::Context, app: &AppState) {
    let tip = &app.view.tooltip;
    let Some(content) = tip.content.as_ref().filter(|_| tip.is_visible()) else { return; };
    let alpha = (tip.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    egui::Area::new(egui::Id::new("tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(egui::pos2(tip.left as f32, tip.top as f32))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(Color32::from_rgba_unmultiplied(51, 51, 51, alpha))
                .show(ui, |ui| {
                    for line in content.lines() {
                        ui.colored_label(Color32::WHITE, line);
                    }
                });
        });
}

fn color32(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

fn poll_load(app: &mut AppState, ctx: &egui::Context) {
    if app.poll_load() {
        ctx.request_repaint();
    }
}
