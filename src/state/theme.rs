use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn visuals(&self) -> Visuals {
        match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        }
    }

    pub fn surface_bg(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(20, 20, 20),
            Theme::Light => Color32::from_rgb(255, 255, 255),
        }
    }

    pub fn axis_color(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_gray(200),
            Theme::Light => Color32::from_gray(0),
        }
    }

    /// Fill of the region circles.
    pub fn mark_fill(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(70, 130, 180),
            Theme::Light => Color32::from_rgb(137, 189, 211),
        }
    }

    pub fn mark_stroke(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(160, 200, 230),
            Theme::Light => Color32::from_rgb(224, 224, 224),
        }
    }

    /// Abbreviation text drawn on top of each circle.
    pub fn mark_text(&self) -> Color32 {
        Color32::WHITE
    }

    pub fn label_active(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::WHITE,
            Theme::Light => Color32::from_gray(0),
        }
    }

    pub fn label_inactive(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_gray(110),
            Theme::Light => Color32::from_gray(170),
        }
    }

    pub fn tooltip_bg(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(0, 0, 0, 200)
    }

    pub fn tooltip_text(&self) -> Color32 {
        Color32::WHITE
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}
