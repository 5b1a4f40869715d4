//! SVG rendering of throughput (1 / average time) against thread count.

use std::fmt::Write as _;

use crate::types::ConfigurationResult;

const SVG_WIDTH: f64 = 720.0;
const SVG_HEIGHT: f64 = 600.0;
const LEFT_MARGIN: f64 = 90.0;
const RIGHT_MARGIN: f64 = 30.0;
const TOP_MARGIN: f64 = 60.0;
const BOTTOM_MARGIN: f64 = 70.0;
const Y_TICKS: usize = 5;
const MAX_X_TICKS: usize = 12;
const LINE_COLOR: &str = "#348abd";

struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Render the speed-vs-threads chart titled `OpenMP Performance vs Threads <name>`.
pub fn render_svg(results: &[ConfigurationResult], name: &str) -> String {
    let points: Vec<(f64, f64)> = results
        .iter()
        .map(|r| (r.threads as f64, r.speed()))
        .filter(|(_, speed)| speed.is_finite())
        .collect();

    let x_axis = x_axis(&points);
    let y_axis = y_axis(&points);
    let plot_w = SVG_WIDTH - LEFT_MARGIN - RIGHT_MARGIN;
    let plot_h = SVG_HEIGHT - TOP_MARGIN - BOTTOM_MARGIN;

    let px = |x: f64| LEFT_MARGIN + (x - x_axis.min) / x_axis.span() * plot_w;
    let py = |y: f64| TOP_MARGIN + plot_h - (y - y_axis.min) / y_axis.span() * plot_h;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" viewBox=\"0 0 {SVG_WIDTH} {SVG_HEIGHT}\">"
    );
    let _ = write!(
        svg,
        "<rect x=\"0\" y=\"0\" width=\"{SVG_WIDTH}\" height=\"{SVG_HEIGHT}\" fill=\"#eeeeee\"/>"
    );
    let _ = write!(
        svg,
        "<rect x=\"{LEFT_MARGIN}\" y=\"{TOP_MARGIN}\" width=\"{plot_w}\" height=\"{plot_h}\" fill=\"#ffffff\"/>"
    );
    let _ = write!(
        svg,
        "<text x=\"{}\" y=\"34\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"18\">OpenMP Performance vs Threads {}</text>",
        SVG_WIDTH / 2.0,
        xml_escape(name)
    );

    // Grid and tick labels
    for tick in x_ticks(&points, &x_axis) {
        let x = px(tick);
        let _ = write!(
            svg,
            "<line x1=\"{x:.2}\" y1=\"{TOP_MARGIN}\" x2=\"{x:.2}\" y2=\"{:.2}\" stroke=\"#b0b0b0\" stroke-dasharray=\"4 3\" stroke-opacity=\"0.6\"/>",
            TOP_MARGIN + plot_h
        );
        let _ = write!(
            svg,
            "<text x=\"{x:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\">{}</text>",
            TOP_MARGIN + plot_h + 22.0,
            format_tick(tick)
        );
    }
    for i in 0..=Y_TICKS {
        let value = y_axis.min + y_axis.span() * i as f64 / Y_TICKS as f64;
        let y = py(value);
        let _ = write!(
            svg,
            "<line x1=\"{LEFT_MARGIN}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"#b0b0b0\" stroke-dasharray=\"4 3\" stroke-opacity=\"0.6\"/>",
            LEFT_MARGIN + plot_w
        );
        let _ = write!(
            svg,
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"sans-serif\" font-size=\"14\">{}</text>",
            LEFT_MARGIN - 8.0,
            y + 5.0,
            format_tick(value)
        );
    }

    // Zero baseline
    let zero = py(0.0);
    let _ = write!(
        svg,
        "<line x1=\"{LEFT_MARGIN}\" y1=\"{zero:.2}\" x2=\"{:.2}\" y2=\"{zero:.2}\" stroke=\"#000000\" stroke-dasharray=\"6 4\"/>",
        LEFT_MARGIN + plot_w
    );

    if !points.is_empty() {
        let coords: Vec<String> = points
            .iter()
            .map(|&(x, y)| format!("{:.2},{:.2}", px(x), py(y)))
            .collect();
        let _ = write!(
            svg,
            "<polyline points=\"{}\" fill=\"none\" stroke=\"{LINE_COLOR}\" stroke-width=\"2\"/>",
            coords.join(" ")
        );
        for &(x, y) in &points {
            let _ = write!(
                svg,
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{LINE_COLOR}\"/>",
                px(x),
                py(y)
            );
        }
    }

    // Axis labels
    let _ = write!(
        svg,
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"15\">Number of Threads</text>",
        LEFT_MARGIN + plot_w / 2.0,
        SVG_HEIGHT - 20.0
    );
    let _ = write!(
        svg,
        "<text x=\"24\" y=\"{y:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"15\" transform=\"rotate(-90 24 {y:.2})\">Average Execution Speed (s\u{207b}\u{b9})</text>",
        y = TOP_MARGIN + plot_h / 2.0
    );

    svg.push_str("</svg>");
    svg
}

fn x_axis(points: &[(f64, f64)]) -> Axis {
    let min = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return Axis { min: 0.0, max: 1.0 };
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    Axis {
        min: min - pad,
        max: max + pad,
    }
}

fn y_axis(points: &[(f64, f64)]) -> Axis {
    let max = points.iter().map(|p| p.1).fold(0.0, f64::max);
    let min = points.iter().map(|p| p.1).fold(0.0, f64::min);
    let span = max - min;
    if span <= 0.0 {
        return Axis { min: 0.0, max: 1.0 };
    }
    Axis {
        min: if min < 0.0 { min - span * 0.05 } else { -span * 0.05 },
        max: max + span * 0.08,
    }
}

/// Every distinct thread count when few, otherwise evenly spaced integers.
fn x_ticks(points: &[(f64, f64)], axis: &Axis) -> Vec<f64> {
    let mut distinct: Vec<f64> = points.iter().map(|p| p.0).collect();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();
    if !distinct.is_empty() && distinct.len() <= MAX_X_TICKS {
        return distinct;
    }

    let lo = axis.min.ceil().max(0.0);
    let hi = axis.max.floor();
    let step = ((hi - lo) / MAX_X_TICKS as f64).ceil().max(1.0);
    let mut ticks = Vec::new();
    let mut t = lo;
    while t <= hi {
        ticks.push(t);
        t += step;
    }
    ticks
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e6 {
        format!("{}", value as i64)
    } else if value.abs() >= 100.0 {
        format!("{:.0}", value)
    } else if value.abs() >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.3}", value)
    }
}

fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
