use serde::{Deserialize, Serialize};

use crate::processing::scale::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 50.0,
            bottom: 100.0,
            left: 100.0,
        }
    }
}

/// Geometry and timing of the chart surface. All lengths are logical points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub surface_width: f32,
    pub surface_height: f32,
    pub margin: Margin,
    /// Duration shared by axis and mark transitions.
    pub transition_ms: u64,
    pub circle_radius: f32,
    pub label_font_size: f32,
    /// Downward shift of the abbreviation text relative to its circle centre.
    pub label_nudge: f32,
    /// Tooltip placement relative to the pointer, `[dx, dy]`.
    pub tooltip_offset: [f32; 2],
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            surface_width: 900.0,
            surface_height: 600.0,
            margin: Margin::default(),
            transition_ms: 1000,
            circle_radius: 10.0,
            label_font_size: 10.0,
            label_nudge: 3.0,
            tooltip_offset: [-70.0, 40.0],
        }
    }
}

impl ChartLayout {
    pub fn plot_width(&self) -> f32 {
        self.surface_width - self.margin.left - self.margin.right
    }

    pub fn plot_height(&self) -> f32 {
        self.surface_height - self.margin.top - self.margin.bottom
    }

    pub fn x_range(&self) -> Interval {
        Interval::new(0.0, self.plot_width() as f64)
    }

    /// Inverted so that larger values are drawn higher up.
    pub fn y_range(&self) -> Interval {
        Interval::new(self.plot_height() as f64, 0.0)
    }

    pub fn transition_secs(&self) -> f64 {
        self.transition_ms as f64 / 1000.0
    }
}
