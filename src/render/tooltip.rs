use egui::{vec2, Pos2};

use crate::state::field::Field;
use crate::state::record::Record;

/// Line separator inside tooltip content.
pub const LINE_BREAK: &str = "<br>";

/// Tooltip content generator, frozen to the field selection it was attached
/// with. A selection change requires attaching a new binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipBinding {
    x_field: Field,
    y_field: Field,
}

pub fn attach_tooltips(x_field: Field, y_field: Field) -> TooltipBinding {
    TooltipBinding { x_field, y_field }
}

impl TooltipBinding {
    /// `"{state}<br>{x prefix}{x}{x suffix}<br>{y prefix}{y}%"`.
    ///
    /// The vertical row always ends in `%`, whatever the y field's own suffix.
    pub fn content(&self, record: &Record) -> String {
        let x_prefix = self.x_field.tooltip_prefix();
        let x_suffix = self.x_field.tooltip_suffix();
        let y_prefix = self.y_field.tooltip_prefix();
        let x_value = format_value(record.value(self.x_field));
        let y_value = format_value(record.value(self.y_field));
        format!(
            "{}{LINE_BREAK}{x_prefix}{x_value}{x_suffix}{LINE_BREAK}{y_prefix}{y_value}%",
            record.state
        )
    }
}

/// Shortest decimal that round-trips, so 14.2 stays "14.2" and 44000.0 is
/// printed as "44000".
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NaN".to_string(),
    }
}

/// A tooltip ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Top-left corner in plot-local coordinates.
    pub position: Pos2,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Hover {
    mark: usize,
    pointer: Pos2,
}

/// Shows and hides the hover popup for the mark under the pointer.
#[derive(Debug, Clone)]
pub struct TooltipController {
    binding: TooltipBinding,
    offset: [f32; 2],
    hover: Option<Hover>,
}

impl TooltipController {
    pub fn new(binding: TooltipBinding, offset: [f32; 2]) -> Self {
        Self {
            binding,
            offset,
            hover: None,
        }
    }

    /// Replace the content binding. A visible popup switches to the new content.
    pub fn attach(&mut self, binding: TooltipBinding) {
        self.binding = binding;
    }

    pub fn show(&mut self, mark: usize, pointer: Pos2) {
        self.hover = Some(Hover { mark, pointer });
    }

    pub fn follow(&mut self, pointer: Pos2) {
        if let Some(hover) = &mut self.hover {
            hover.pointer = pointer;
        }
    }

    pub fn hide(&mut self) {
        self.hover = None;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hover.map(|h| h.mark)
    }

    pub fn popup(&self, records: &[Record]) -> Option<Popup> {
        let hover = self.hover?;
        let record = records.get(hover.mark)?;
        let content = self.binding.content(record);
        Some(Popup {
            position: hover.pointer + vec2(self.offset[0], self.offset[1]),
            lines: content.split(LINE_BREAK).map(str::to_string).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn ohio() -> Record {
        Record::new("Ohio", "OH")
            .with(Field::Poverty, 14.2)
            .with(Field::Age, 38.1)
            .with(Field::Income, 44000.0)
            .with(Field::Healthcare, 12.5)
            .with(Field::Obesity, 30.4)
            .with(Field::Smokes, 23.4)
    }

    #[test]
    fn poverty_and_healthcare_content() {
        let binding = attach_tooltips(Field::Poverty, Field::Healthcare);
        assert_eq!(
            binding.content(&ohio()),
            "Ohio<br>Poverty: 14.2%<br>Lacks Healthcare: 12.5%"
        );
    }

    #[test]
    fn age_row_has_no_suffix() {
        let content = attach_tooltips(Field::Age, Field::Smokes).content(&ohio());
        let rows: Vec<&str> = content.split(LINE_BREAK).collect();
        assert_eq!(rows, ["Ohio", "Age: 38.1", "Smokes: 23.4%"]);
    }

    #[test]
    fn income_prints_as_integer_dollars() {
        let content = attach_tooltips(Field::Income, Field::Obesity).content(&ohio());
        assert_eq!(content, "Ohio<br>Income: $44000<br>Obesity: 30.4%");
    }

    #[test]
    fn popup_follows_pointer_and_hides() {
        let records = vec![ohio()];
        let binding = attach_tooltips(Field::Poverty, Field::Healthcare);
        let mut tips = TooltipController::new(binding, [-70.0, 40.0]);
        assert!(tips.popup(&records).is_none());

        tips.show(0, pos2(100.0, 100.0));
        let popup = tips.popup(&records).unwrap();
        assert_eq!(popup.position, pos2(30.0, 140.0));
        assert_eq!(popup.lines.len(), 3);

        tips.follow(pos2(110.0, 90.0));
        assert_eq!(tips.popup(&records).unwrap().position, pos2(40.0, 130.0));

        tips.attach(attach_tooltips(Field::Age, Field::Healthcare));
        assert_eq!(tips.popup(&records).unwrap().lines[1], "Age: 38.1");

        tips.hide();
        assert_eq!(tips.hovered(), None);
        assert!(tips.popup(&records).is_none());
    }
}
