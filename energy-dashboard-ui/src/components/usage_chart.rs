//! Usage Chart Component
//!
//! Single-series bar chart drawn on an HTML5 canvas.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use energy_dashboard::projection::chart::LegendPosition;
use energy_dashboard::ChartInput;

use crate::state::global::DashboardState;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

/// Bar chart of the most recent usage points
#[component]
pub fn UsageChart() -> impl IntoView {
    let state = expect_context::<DashboardState>();
    let canvas_ref = create_node_ref::<html::Canvas>();
    let hovered = create_rw_signal(None::<usize>);

    let chart = create_memo(move |_| state.chart_of(&state.snapshot.get()));

    // Redraw when the chart input changes
    create_effect(move |_| {
        let chart = chart.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_chart(&canvas, &chart);
        }
    });

    // Index mode: the hovered column selects the bar, no intersection needed
    let on_move = move |ev: ev::MouseEvent| {
        let chart = chart.get_untracked();
        if !chart.options.tooltip_index_mode {
            return;
        }
        let index = canvas_ref.get_untracked().and_then(|canvas| {
            let rect = canvas.get_bounding_client_rect();
            let scale = canvas.width() as f64 / rect.width().max(1.0);
            let x = (ev.client_x() as f64 - rect.left()) * scale;
            bar_index(x, canvas.width() as f64, chart.labels.len())
        });
        hovered.set(index);
    };

    let tooltip = move || {
        let chart = chart.get();
        hovered.get().and_then(|i| {
            let (label, value) = chart.points().nth(i)?;
            Some(format!("{}: {}: {}", label, chart.series.label, value))
        })
    };

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
                on:mousemove=on_move
                on:mouseleave=move |_| hovered.set(None)
            />
            <div class="h-6 mt-2 text-center text-sm text-gray-300">
                {move || tooltip().unwrap_or_default()}
            </div>
        </div>
    }
}

/// Bar under canvas x coordinate, if any
fn bar_index(x: f64, width: f64, count: usize) -> Option<usize> {
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    if count == 0 || plot_width <= 0.0 || x < MARGIN_LEFT || x >= MARGIN_LEFT + plot_width {
        return None;
    }
    let slot = plot_width / count as f64;
    Some((((x - MARGIN_LEFT) / slot) as usize).min(count - 1))
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, chart: &ChartInput) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    let options = &chart.options;

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    // Title and legend
    ctx.set_fill_style(&"#e5e7eb".into());
    ctx.set_font("16px sans-serif");
    ctx.set_text_align("center");
    let _ = ctx.fill_text(&options.title, width / 2.0, 20.0);

    let legend_y = match options.legend {
        LegendPosition::Bottom => height - 8.0,
        _ => 40.0,
    };
    ctx.set_fill_style(&options.bar_color.as_str().into());
    ctx.fill_rect(width / 2.0 - 60.0, legend_y - 9.0, 12.0, 10.0);
    ctx.set_fill_style(&"#d1d5db".into());
    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    let _ = ctx.fill_text(&chart.series.label, width / 2.0 - 42.0, legend_y);

    if chart.is_empty() {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("No data", width / 2.0, height / 2.0);
        return;
    }

    // Bars start at zero
    let max = chart.values().iter().cloned().fold(0.0_f64, f64::max);
    let y_max = if max > 0.0 { max * 1.1 } else { 1.0 };

    // Horizontal grid lines (5 lines)
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_text_align("right");
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(width - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * y_max;
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(&format!("{:.1}", value), MARGIN_LEFT - 6.0, y + 4.0);
    }

    let slot = chart_width / chart.labels.len() as f64;
    let bar_width = slot * 0.8;

    ctx.set_text_align("center");
    for (i, (label, value)) in chart.points().enumerate() {
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (value.max(0.0) / y_max) * chart_height;

        ctx.set_fill_style(&options.bar_color.as_str().into());
        ctx.fill_rect(x, MARGIN_TOP + chart_height - bar_height, bar_width, bar_height);

        ctx.set_fill_style(&"#9ca3af".into());
        let _ = ctx.fill_text(label, x + bar_width / 2.0, MARGIN_TOP + chart_height + 16.0);
    }

    // Axis titles
    ctx.set_fill_style(&"#d1d5db".into());
    let _ = ctx.fill_text(&options.x_axis_title, width / 2.0, height - 24.0);
    ctx.save();
    let _ = ctx.translate(14.0, MARGIN_TOP + chart_height / 2.0);
    let _ = ctx.rotate(-std::f64::consts::FRAC_PI_2);
    let _ = ctx.fill_text(&options.y_axis_title, 0.0, 0.0);
    ctx.restore();
}
