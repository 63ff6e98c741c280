//! # charts — PNG chart rendering
//!
//! Both charts draw into an in-memory RGB buffer (`plotters` bitmap backend)
//! and are PNG-encoded on the way out — nothing is written to disk.
//!
//! * Allocation pie — one slice per transaction *amount*.  Not aggregated by
//!   symbol, so duplicate symbols produce duplicate slices.
//! * Profit/loss bars — one bar per transaction, green when non-negative,
//!   red otherwise.

use std::io::Cursor;

use anyhow::Context;
use image::{ImageOutputFormat, RgbImage};
use plotters::coord::ranged1d::SegmentValue;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;

/// Canvas size — a 10×5 inch figure at 100 dpi.
const CHART_WIDTH:  u32 = 1000;
const CHART_HEIGHT: u32 = 500;

/// Slice colors, cycled when a portfolio has more transactions than entries.
const SLICE_COLORS: [RGBColor; 8] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
];

// ─── Allocation Pie ───────────────────────────────────────────────────────────

/// Render the portfolio distribution pie from `(symbol, amount)` pairs.
///
/// Non-positive amounts cannot form a slice and are skipped; if nothing
/// remains the chart degrades to a placeholder message instead of failing.
pub fn allocation_pie(slices: &[(String, f64)]) -> anyhow::Result<Vec<u8>> {
    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        let root = root
            .titled("Portfolio Distribution", ("sans-serif", 30))
            .map_err(plot_err)?;

        let mut sizes  = Vec::new();
        let mut labels = Vec::new();
        for (symbol, amount) in slices {
            if *amount > 0.0 {
                sizes.push(*amount);
                labels.push(symbol.clone());
            }
        }

        if sizes.is_empty() {
            draw_placeholder(&root, "No holdings to chart")?;
        } else {
            let colors: Vec<RGBColor> = (0..sizes.len())
                .map(|i| SLICE_COLORS[i % SLICE_COLORS.len()])
                .collect();

            let center = ((CHART_WIDTH / 2) as i32, (CHART_HEIGHT / 2) as i32);
            let radius = 170.0;

            let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
            pie.start_angle(140.0);
            pie.label_style(("sans-serif", 18).into_font());
            pie.percentages(("sans-serif", 14).into_font());

            root.draw(&pie).map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
    }

    encode_png(buf)
}

// ─── Profit/Loss Bars ─────────────────────────────────────────────────────────

/// Render the per-transaction profit/loss bar chart from `(symbol, pnl)`
/// pairs, where `pnl = amount × (live price − purchase price)`.
pub fn profit_loss_bars(entries: &[(String, f64)]) -> anyhow::Result<Vec<u8>> {
    let mut buf = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;

        if entries.is_empty() {
            draw_placeholder(&root, "No transactions to chart")?;
        } else {
            let mut lo = 0.0f64;
            let mut hi = 0.0f64;
            for (_, pnl) in entries {
                lo = lo.min(*pnl);
                hi = hi.max(*pnl);
            }
            // Flat data must not collapse the value axis to an empty range.
            if lo == hi {
                lo -= 1.0;
                hi += 1.0;
            }
            let pad = (hi - lo) * 0.1;

            let symbols: Vec<String> = entries.iter().map(|(s, _)| s.clone()).collect();

            let mut chart = ChartBuilder::on(&root)
                .caption("Profit/Loss Chart", ("sans-serif", 30))
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d((0..entries.len()).into_segmented(), (lo - pad)..(hi + pad))
                .map_err(plot_err)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc("Symbols")
                .y_desc("Profit/Loss")
                .x_label_formatter(&|seg| match seg {
                    SegmentValue::CenterOf(i) if *i < symbols.len() => symbols[*i].clone(),
                    _ => String::new(),
                })
                .draw()
                .map_err(plot_err)?;

            chart
                .draw_series(entries.iter().enumerate().map(|(i, (_, pnl))| {
                    let color = if *pnl >= 0.0 { GREEN } else { RED };
                    Rectangle::new(
                        [
                            (SegmentValue::Exact(i), 0.0),
                            (SegmentValue::Exact(i + 1), *pnl),
                        ],
                        color.filled(),
                    )
                }))
                .map_err(plot_err)?;
        }

        root.present().map_err(plot_err)?;
    }

    encode_png(buf)
}

// ─── Shared Plumbing ──────────────────────────────────────────────────────────

fn draw_placeholder(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    message: &str,
) -> anyhow::Result<()> {
    let pos = ((CHART_WIDTH / 2) as i32 - 120, (CHART_HEIGHT / 2) as i32);
    area.draw(&Text::new(
        message.to_string(),
        pos,
        ("sans-serif", 24).into_font().color(&BLACK),
    ))
    .map_err(plot_err)
}

fn encode_png(buf: Vec<u8>) -> anyhow::Result<Vec<u8>> {
    let img = RgbImage::from_raw(CHART_WIDTH, CHART_HEIGHT, buf)
        .context("Rendered buffer does not match chart dimensions")?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .context("PNG encoding failed")?;

    Ok(png)
}

/// Plotters error types borrow the backend; flatten them to `anyhow` at the
/// boundary.
fn plot_err<E: std::fmt::Display>(err: E) -> anyhow::Error {
    anyhow::anyhow!("Chart rendering failed: {err}")
}

// ─── Tests ────────────────────────────────────────────────────────────────────
