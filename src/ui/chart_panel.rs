use std::f32::consts::FRAC_PI_2;

use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

use crate::processing::kd_tree::HoverTree;
use crate::render::axis::{AxisHandle, Orientation};
use crate::render::marks::MarkLabel;
use crate::state::chart::{Chart, ChartEvent};
use crate::state::field::{Axis, Field};
use crate::state::theme::Theme;

const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;
const TICK_FONT: f32 = 10.0;
const AXIS_LABEL_FONT: f32 = 15.0;
/// Gap between the x-axis line and its label group.
const X_LABEL_GAP: f32 = 20.0;
/// Baseline shift of rotated y labels, one em of the label font.
const Y_LABEL_DY: f32 = AXIS_LABEL_FONT;

/// Paint `chart` at the top-left of the available space and return the
/// events produced by this frame's input.
pub fn show_chart(chart: &Chart, ui: &mut egui::Ui, theme: &Theme, now: f64) -> Vec<ChartEvent> {
    let layout = chart.layout();
    let (surface, _) = ui.allocate_exact_size(
        vec2(layout.surface_width, layout.surface_height),
        Sense::hover(),
    );
    let origin = surface.min + vec2(layout.margin.left, layout.margin.top);
    let painter = ui.painter_at(surface);
    painter.rect_filled(surface, 0.0, theme.surface_bg());

    let mut events = Vec::new();

    draw_axis(&painter, chart.axis(Axis::X), origin, layout.plot_height(), theme, now);
    draw_axis(&painter, chart.axis(Axis::Y), origin, layout.plot_height(), theme, now);
    draw_marks(&painter, chart, origin, theme, now);

    x_label_group(ui, &painter, chart, origin, theme, &mut events);
    y_label_group(ui, &painter, chart, origin, theme, &mut events);

    let pointer = ui.ctx().input(|i| i.pointer.hover_pos());
    hover_events(chart, origin, surface, pointer, now, &mut events);

    draw_tooltip(&painter, chart, origin, theme);
    events
}

// ---------------------------------------------------------------------------
// Axes
// ---------------------------------------------------------------------------

fn draw_axis(
    painter: &egui::Painter,
    axis: &AxisHandle,
    origin: Pos2,
    plot_height: f32,
    theme: &Theme,
    now: f64,
) {
    let color = theme.axis_color();
    let stroke = Stroke::new(1.0, color);
    let range = axis.scale().range();
    let font = FontId::proportional(TICK_FONT);

    match axis.orientation() {
        Orientation::Bottom => {
            let y = origin.y + plot_height;
            painter.line_segment(
                [pos2(origin.x + range.min() as f32, y), pos2(origin.x + range.max() as f32, y)],
                stroke,
            );
            for tick in axis.ticks(now) {
                let x = origin.x + tick.offset as f32;
                painter.line_segment([pos2(x, y), pos2(x, y + TICK_SIZE)], stroke);
                painter.text(
                    pos2(x, y + TICK_SIZE + TICK_PADDING),
                    Align2::CENTER_TOP,
                    tick.label,
                    font.clone(),
                    color,
                );
            }
        }
        Orientation::Left => {
            let x = origin.x;
            painter.line_segment(
                [pos2(x, origin.y + range.min() as f32), pos2(x, origin.y + range.max() as f32)],
                stroke,
            );
            for tick in axis.ticks(now) {
                let y = origin.y + tick.offset as f32;
                painter.line_segment([pos2(x - TICK_SIZE, y), pos2(x, y)], stroke);
                painter.text(
                    pos2(x - TICK_SIZE - TICK_PADDING, y),
                    Align2::RIGHT_CENTER,
                    tick.label,
                    font.clone(),
                    color,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Marks
// ---------------------------------------------------------------------------

fn draw_marks(painter: &egui::Painter, chart: &Chart, origin: Pos2, theme: &Theme, now: f64) {
    let layout = chart.layout();
    let hovered = chart.hovered();

    for mark in chart.marks().circles() {
        let center = origin + mark.position_at(now).to_vec2();
        let stroke = if hovered == Some(mark.record) {
            Stroke::new(2.0, theme.axis_color())
        } else {
            Stroke::new(1.0, theme.mark_stroke())
        };
        painter.circle(center, layout.circle_radius, theme.mark_fill(), stroke);
    }

    let font = FontId::proportional(layout.label_font_size);
    for label in chart.marks().labels() {
        painter.text(
            origin + abbr_anchor(label, layout.label_nudge, now).to_vec2(),
            Align2::CENTER_CENTER,
            &label.text,
            font.clone(),
            theme.mark_text(),
        );
    }
}

/// Centre of the abbreviation text box.
///
/// The nudge places the glyph baseline below the circle centre. egui anchors
/// the whole text box instead, so the box is centred on the circle itself.
fn abbr_anchor(label: &MarkLabel, nudge: f32, now: f64) -> Pos2 {
    label.position_at(now) - vec2(0.0, nudge)
}

// ---------------------------------------------------------------------------
// Clickable axis labels
// ---------------------------------------------------------------------------

fn label_color(chart: &Chart, field: Field, theme: &Theme) -> Color32 {
    if chart.labels(field.axis()).is_active(field) {
        theme.label_active()
    } else {
        theme.label_inactive()
    }
}

fn label_font(chart: &Chart, field: Field) -> FontId {
    let size = if chart.labels(field.axis()).is_active(field) {
        AXIS_LABEL_FONT + 1.0
    } else {
        AXIS_LABEL_FONT
    };
    FontId::proportional(size)
}

fn x_label_group(
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    chart: &Chart,
    origin: Pos2,
    theme: &Theme,
    events: &mut Vec<ChartEvent>,
) {
    let layout = chart.layout();
    let anchor = origin + vec2(layout.plot_width() / 2.0, layout.plot_height() + X_LABEL_GAP);

    for (i, label) in chart.labels(Axis::X).labels().iter().enumerate() {
        let baseline = layout.margin.bottom * (i as f32 + 1.0) / 4.0;
        let rect = painter.text(
            anchor + vec2(0.0, baseline),
            Align2::CENTER_BOTTOM,
            label.field.label(),
            label_font(chart, label.field),
            label_color(chart, label.field, theme),
        );
        if label_clicked(ui, rect, label.field) {
            events.push(ChartEvent::LabelClicked(label.field));
        }
    }
}

fn y_label_group(
    ui: &mut egui::Ui,
    painter: &egui::Painter,
    chart: &Chart,
    origin: Pos2,
    theme: &Theme,
    events: &mut Vec<ChartEvent>,
) {
    let layout = chart.layout();
    let anchor = origin + vec2(-layout.margin.left, layout.plot_height() / 2.0);

    // Healthcare sits closest to the axis, smokes furthest out.
    let offsets = [layout.margin.left / 2.0, layout.margin.left / 4.0, 0.0];

    for (label, offset) in chart.labels(Axis::Y).labels().iter().zip(offsets) {
        let galley = painter.layout_no_wrap(
            label.field.label().to_string(),
            label_font(chart, label.field),
            label_color(chart, label.field, theme),
        );
        let size = galley.size();

        // Rotated a quarter turn anticlockwise about its top-left corner,
        // the galley spans `size.y` horizontally and `size.x` upwards.
        let baseline_x = anchor.x + offset + Y_LABEL_DY;
        let pos = pos2(baseline_x - size.y, anchor.y + size.x / 2.0);
        let rect = Rect::from_min_max(pos2(pos.x, pos.y - size.x), pos2(pos.x + size.y, pos.y));

        let color = label_color(chart, label.field, theme);
        painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(-FRAC_PI_2));
        if label_clicked(ui, rect, label.field) {
            events.push(ChartEvent::LabelClicked(label.field));
        }
    }
}

fn label_clicked(ui: &mut egui::Ui, rect: Rect, field: Field) -> bool {
    let id = ui.id().with(("axis_label", field));
    ui.interact(rect, id, Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
}

// ---------------------------------------------------------------------------
// Hover tooltip
// ---------------------------------------------------------------------------

fn hover_events(
    chart: &Chart,
    origin: Pos2,
    surface: Rect,
    pointer: Option<Pos2>,
    now: f64,
    events: &mut Vec<ChartEvent>,
) {
    let local = pointer
        .filter(|p| surface.contains(*p))
        .map(|p| pos2(p.x - origin.x, p.y - origin.y));

    let hit = local.and_then(|p| {
        let tree = HoverTree::build(&chart.marks().positions_at(now));
        tree.hit(p, chart.layout().circle_radius)
    });

    match (chart.hovered(), hit, local) {
        (Some(current), Some(mark), Some(pointer)) if current == mark => {
            events.push(ChartEvent::HoverMove { pointer });
        }
        (current, Some(mark), Some(pointer)) => {
            if current.is_some() {
                events.push(ChartEvent::HoverExit);
            }
            events.push(ChartEvent::HoverEnter { mark, pointer });
        }
        (Some(_), None, _) => events.push(ChartEvent::HoverExit),
        _ => {}
    }
}

fn draw_tooltip(painter: &egui::Painter, chart: &Chart, origin: Pos2, theme: &Theme) {
    let Some(popup) = chart.popup() else {
        return;
    };

    let font = FontId::proportional(12.0);
    let galleys: Vec<_> = popup
        .lines
        .into_iter()
        .map(|line| painter.layout_no_wrap(line, font.clone(), theme.tooltip_text()))
        .collect();
    let width = galleys.iter().map(|g| g.size().x).fold(0.0_f32, f32::max);
    let height: f32 = galleys.iter().map(|g| g.size().y).sum();

    let padding = 6.0;
    let top_left = origin + popup.position.to_vec2();
    let bg_size = vec2(width + 2.0 * padding, height + 2.0 * padding);
    let bg_rect = Rect::from_min_size(top_left, bg_size);
    painter.rect_filled(bg_rect, 4.0, theme.tooltip_bg());

    let mut y = bg_rect.top() + padding;
    for galley in galleys {
        let h = galley.size().y;
        let x = bg_rect.center().x - galley.size().x / 2.0;
        painter.galley(pos2(x, y), galley, theme.tooltip_text());
        y += h;
    }
}
