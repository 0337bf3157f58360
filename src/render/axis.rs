use crate::processing::scale::{Interval, LinearScale};
use crate::render::transition::Transition;

/// Approximate number of ticks requested per axis.
pub const TICK_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal axis with ticks hanging below the line.
    Bottom,
    /// Vertical axis with ticks pointing left.
    Left,
}

/// One tick mark: pixel offset along the axis and label.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub offset: f64,
    pub label: String,
}

/// Animated axis bound to a scale.
///
/// The pixel range never changes; only the domain animates, which makes tick
/// marks slide from their old positions to the new ones.
#[derive(Debug, Clone)]
pub struct AxisHandle {
    orientation: Orientation,
    scale: LinearScale,
    domain: Transition<Interval>,
}

impl AxisHandle {
    pub fn new(scale: LinearScale, orientation: Orientation) -> Self {
        Self {
            orientation,
            scale,
            domain: Transition::settled(scale.domain()),
        }
    }

    /// Bind a new scale and start easing from the displayed domain to it.
    pub fn render(&mut self, scale: LinearScale, now: f64, duration: f64) {
        self.scale = scale;
        self.domain.retarget(scale.domain(), now, duration);
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The scale the axis is heading to.
    pub fn scale(&self) -> LinearScale {
        self.scale
    }

    /// The scale as drawn at `now`.
    pub fn displayed_scale(&self, now: f64) -> LinearScale {
        self.scale.with_domain(self.domain.value_at(now))
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.domain.is_active(now)
    }

    pub fn ticks(&self, now: f64) -> Vec<Tick> {
        let scale = self.displayed_scale(now);
        let domain = scale.domain();
        let step = tick_step(domain.min(), domain.max(), TICK_COUNT);
        tick_values(domain, TICK_COUNT)
            .into_iter()
            .map(|value| Tick {
                offset: scale.map(value),
                label: format_tick(value, step),
            })
            .collect()
    }
}

/// Nice step (1, 2 or 5 times a power of ten) covering `[start, stop]` with
/// roughly `count` intervals.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = raw.log10().floor();
    let order = 10f64.powf(power);
    let error = raw / order;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * order
}

/// Tick values inside `domain`, ascending.
pub fn tick_values(domain: Interval, count: usize) -> Vec<f64> {
    let (lo, hi) = (domain.min(), domain.max());
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    if lo == hi {
        return vec![lo];
    }

    let step = tick_step(lo, hi, count);
    if step <= 0.0 {
        return Vec::new();
    }

    if step >= 1.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        // Work in units of an integral inverse so fractional steps do not drift.
        let inverse = (1.0 / step).round();
        let first = (lo * inverse).ceil() as i64;
        let last = (hi * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    }
}

/// Fixed-point label with as many decimals as the step needs, grouped by
/// thousands.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let text = format!("{value:.decimals$}");
    let text = if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    };
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(pos) => rest.split_at(pos),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_nice() {
        assert_eq!(tick_step(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_step(8.1, 25.3, 10), 2.0);
        assert_eq!(tick_step(34000.0, 82000.0, 10), 5000.0);
        assert!((tick_step(0.0, 0.45, 10) - 0.05).abs() < 1e-12);
        assert_eq!(tick_step(3.0, 3.0, 10), 0.0);
    }

    #[test]
    fn values_stay_inside_domain() {
        let ticks = tick_values(Interval::new(8.1, 25.3), 10);
        assert_eq!(ticks, vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0]);
        // Inverted intervals produce the same ascending ticks.
        assert_eq!(tick_values(Interval::new(25.3, 8.1), 10), ticks);
    }

    #[test]
    fn fractional_steps_do_not_drift() {
        let ticks = tick_values(Interval::new(0.0, 0.5), 10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[3], 0.15);
        assert_eq!(ticks[10], 0.5);
    }

    #[test]
    fn labels_use_step_precision_and_grouping() {
        assert_eq!(format_tick(30000.0, 5000.0), "30,000");
        assert_eq!(format_tick(1234567.0, 1.0), "1,234,567");
        assert_eq!(format_tick(9.0, 0.5), "9.0");
        assert_eq!(format_tick(12.0, 2.0), "12");
        assert_eq!(format_tick(-0.0, 1.0), "0");
        assert_eq!(format_tick(-1500.0, 500.0), "-1,500");
    }

    #[test]
    fn render_animates_between_domains() {
        let old = LinearScale::new(Interval::new(0.0, 10.0), Interval::new(0.0, 100.0));
        let new = LinearScale::new(Interval::new(0.0, 20.0), Interval::new(0.0, 100.0));
        let mut axis = AxisHandle::new(old, Orientation::Bottom);
        axis.render(new, 5.0, 1.0);

        assert!(axis.is_animating(5.5));
        assert_eq!(axis.displayed_scale(5.0).domain(), old.domain());
        assert_eq!(axis.displayed_scale(5.5).domain(), Interval::new(0.0, 15.0));
        assert_eq!(axis.displayed_scale(6.0), new);
        assert_eq!(axis.scale(), new);

        let ticks = axis.ticks(6.0);
        assert_eq!(ticks.first().map(|t| t.label.as_str()), Some("0"));
        assert_eq!(ticks.last().map(|t| t.offset), Some(100.0));
    }
}
