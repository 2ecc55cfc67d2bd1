use std::fmt::Write;

use crate::chart::Chart;
use crate::human::format_value;

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// The main canvas: one group per cell holding the tagged tile and its label.
pub fn chart_svg(chart: &Chart) -> String {
    let cfg = &chart.config;
    let mut s = String::new();
    let _ = writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        format_value(cfg.width),
        format_value(cfg.height)
    );
    for cell in &chart.cells {
        let _ = writeln!(
            s,
            r#"  <g transform="translate({},{})">"#,
            format_value(cell.rect.x0),
            format_value(cell.rect.y0)
        );
        let _ = writeln!(
            s,
            r#"    <rect class="tile" data-name="{}" data-category="{}" data-value="{}" width="{}" height="{}" fill="{}"></rect>"#,
            escape(&cell.name),
            escape(&cell.category),
            format_value(cell.value),
            format_value(cell.rect.width()),
            format_value(cell.rect.height()),
            cell.fill
        );
        s.push_str("    <text>");
        for line in &cell.label {
            let _ = write!(
                s,
                r#"<tspan x="{}" y="{}" style="fill: {}; font-size: {}px; pointer-events: none;">{}</tspan>"#,
                format_value(line.x),
                format_value(line.y),
                cfg.label.fill,
                format_value(cfg.label.font_size),
                escape(&line.text)
            );
        }
        s.push_str("</text>\n  </g>\n");
    }
    s.push_str("</svg>\n");
    s
}

pub fn legend_svg(chart: &Chart) -> String {
    let lg = &chart.config.legend;
    let mut s = String::new();
    let _ = writeln!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="legend" width="{}" height="{}">"#,
        format_value(lg.width),
        format_value(lg.height)
    );
    for item in &chart.legend {
        let _ = writeln!(
            s,
            r#"  <g class="legend-item" transform="translate({}, {})"><rect width="{}" height="{}" fill="{}"></rect><text x="{}" y="{}">{}</text></g>"#,
            format_value(item.x),
            format_value(item.y),
            format_value(lg.swatch),
            format_value(lg.swatch),
            item.fill,
            format_value(lg.text_x),
            format_value(lg.text_y),
            escape(&item.label)
        );
    }
    s.push_str("</svg>\n");
    s
}

/// Standalone page with the chart, tooltip and legend mount points filled in.
/// The tooltip starts hidden; a small script drives it from the tile attributes.
pub fn page_html(chart: &Chart, title: &str) -> String {
    let tip = &chart.config.tooltip;
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  body {{ font-family: sans-serif; }}
  #tooltip {{ position: absolute; pointer-events: none; background: #333; color: #fff; padding: 6px 8px; border-radius: 4px; font-size: 12px; }}
</style>
</head>
<body>
<h1 id="title">{title}</h1>
<div id="chart">
{chart}</div>
<div id="tooltip" style="opacity: 0"></div>
<div id="legend">
{legend}</div>
<script>
  const tooltip = document.getElementById("tooltip");
  document.querySelectorAll("#chart rect.tile").forEach((tile) => {{
    tile.addEventListener("mousemove", (event) => {{
      const v = tile.dataset.value;
      tooltip.style.opacity = {opacity};
      tooltip.innerHTML = `Name: ${{tile.dataset.name}}<br>Platform: ${{tile.dataset.category}}<br>Sales: ${{v}} million`;
      tooltip.setAttribute("data-value", v);
      tooltip.style.left = (event.pageX + {dx}) + "px";
      tooltip.style.top = (event.pageY + {dy}) + "px";
    }});
    tile.addEventListener("mouseout", () => {{ tooltip.style.opacity = 0; }});
  }});
</script>
</body>
</html>
"##,
        title = escape(title),
        chart = chart_svg(chart),
        legend = legend_svg(chart),
        opacity = tip.opacity,
        dx = format_value(tip.offset_x),
        dy = format_value(tip.offset_y),
    )
}
