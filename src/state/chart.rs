use egui::Pos2;

use crate::processing::scale::{build_dataset_scale, ScaleError};
use crate::render::axis::{AxisHandle, Orientation};
use crate::render::marks::{MarkSet, Projection};
use crate::render::tooltip::{attach_tooltips, Popup, TooltipController};
use crate::state::field::{Axis, Field};
use crate::state::layout::ChartLayout;
use crate::state::record::Dataset;

/// Input delivered to a [`Chart`] by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    /// An axis label was clicked; the field names its axis group.
    LabelClicked(Field),
    HoverEnter { mark: usize, pointer: Pos2 },
    HoverMove { pointer: Pos2 },
    HoverExit,
}

/// What handling an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Selection changed: scale, axis, marks and tooltips were redone.
    Rerendered,
    /// The field was already selected; only label styling was re-applied.
    Restyled,
    /// Tooltip shown, moved or hidden.
    Hover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLabel {
    pub field: Field,
    pub active: bool,
}

/// The three clickable labels of one axis.
#[derive(Debug, Clone)]
pub struct LabelGroup {
    labels: Vec<AxisLabel>,
    restyles: u32,
}

impl LabelGroup {
    fn new(axis: Axis, selected: Field) -> Self {
        let mut group = Self {
            labels: axis
                .options()
                .into_iter()
                .map(|field| AxisLabel { field, active: false })
                .collect(),
            restyles: 0,
        };
        group.apply(selected);
        group
    }

    /// Mark `selected` active and every sibling inactive.
    fn apply(&mut self, selected: Field) {
        for label in &mut self.labels {
            label.active = label.field == selected;
        }
        self.restyles += 1;
        tracing::trace!("Label styling applied ({} times)", self.restyles);
    }

    pub fn labels(&self) -> &[AxisLabel] {
        &self.labels
    }

    pub fn is_active(&self, field: Field) -> bool {
        self.labels.iter().any(|l| l.field == field && l.active)
    }

    /// How many times styling has been applied, including at construction.
    #[cfg(test)]
    pub fn restyles(&self) -> u32 {
        self.restyles
    }
}

/// One interactive scatter chart: the selection state and everything drawn
/// from it.
#[derive(Debug, Clone)]
pub struct Chart {
    dataset: Dataset,
    layout: ChartLayout,
    x_field: Field,
    y_field: Field,
    x_axis: AxisHandle,
    y_axis: AxisHandle,
    marks: MarkSet,
    tooltip: TooltipController,
    x_labels: LabelGroup,
    y_labels: LabelGroup,
}

impl Chart {
    /// Build the first frame with the default selection.
    pub fn new(dataset: Dataset, layout: ChartLayout) -> Result<Self, ScaleError> {
        let x_field = Axis::X.default_field();
        let y_field = Axis::Y.default_field();
        let x_scale = build_dataset_scale(&dataset, x_field, layout.x_range())?;
        let y_scale = build_dataset_scale(&dataset, y_field, layout.y_range())?;

        let projection = Projection {
            x_scale,
            y_scale,
            x_field,
            y_field,
        };
        let marks = MarkSet::new(&dataset, &projection, layout.label_nudge);
        let binding = attach_tooltips(x_field, y_field);
        let tooltip = TooltipController::new(binding, layout.tooltip_offset);

        Ok(Self {
            x_axis: AxisHandle::new(x_scale, Orientation::Bottom),
            y_axis: AxisHandle::new(y_scale, Orientation::Left),
            x_labels: LabelGroup::new(Axis::X, x_field),
            y_labels: LabelGroup::new(Axis::Y, y_field),
            dataset,
            layout,
            x_field,
            y_field,
            marks,
            tooltip,
        })
    }

    pub fn handle(&mut self, event: ChartEvent, now: f64) -> Result<Outcome, ScaleError> {
        match event {
            ChartEvent::LabelClicked(field) => self.select(field, now),
            ChartEvent::HoverEnter { mark, pointer } => {
                tracing::debug!("Hover enter on mark {mark}");
                self.tooltip.show(mark, pointer);
                Ok(Outcome::Hover)
            }
            ChartEvent::HoverMove { pointer } => {
                self.tooltip.follow(pointer);
                Ok(Outcome::Hover)
            }
            ChartEvent::HoverExit => {
                self.tooltip.hide();
                Ok(Outcome::Hover)
            }
        }
    }

    fn select(&mut self, field: Field, now: f64) -> Result<Outcome, ScaleError> {
        let axis = field.axis();
        let outcome = if field == self.selected(axis) {
            tracing::debug!("{field} already selected on {axis:?} axis");
            Outcome::Restyled
        } else {
            let duration = self.layout.transition_secs();
            // Build first so a failure leaves the selection untouched.
            match axis {
                Axis::X => {
                    let scale = build_dataset_scale(&self.dataset, field, self.layout.x_range())?;
                    self.x_field = field;
                    self.x_axis.render(scale, now, duration);
                }
                Axis::Y => {
                    let scale = build_dataset_scale(&self.dataset, field, self.layout.y_range())?;
                    self.y_field = field;
                    self.y_axis.render(scale, now, duration);
                }
            }

            let projection = self.projection();
            self.marks.render_marks(&self.dataset, &projection, now, duration);
            self.marks.render_labels(&self.dataset, &projection, now, duration);
            self.tooltip.attach(attach_tooltips(self.x_field, self.y_field));
            tracing::info!("Selected {} vs {}", self.x_field, self.y_field);
            Outcome::Rerendered
        };

        let selected = self.selected(axis);
        match axis {
            Axis::X => self.x_labels.apply(selected),
            Axis::Y => self.y_labels.apply(selected),
        }
        Ok(outcome)
    }

    pub fn selected(&self, axis: Axis) -> Field {
        match axis {
            Axis::X => self.x_field,
            Axis::Y => self.y_field,
        }
    }

    pub fn projection(&self) -> Projection {
        Projection {
            x_scale: self.x_axis.scale(),
            y_scale: self.y_axis.scale(),
            x_field: self.x_field,
            y_field: self.y_field,
        }
    }

    pub fn axis(&self, axis: Axis) -> &AxisHandle {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
        }
    }

    pub fn labels(&self, axis: Axis) -> &LabelGroup {
        match axis {
            Axis::X => &self.x_labels,
            Axis::Y => &self.y_labels,
        }
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn hovered(&self) -> Option<usize> {
        self.tooltip.hovered()
    }

    pub fn popup(&self) -> Option<Popup> {
        self.tooltip.popup(self.dataset.records())
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.x_axis.is_animating(now)
            || self.y_axis.is_animating(now)
            || self.marks.is_animating(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::record::fixtures::sample_dataset;
    use egui::pos2;

    fn chart() -> Chart {
        Chart::new(sample_dataset(), ChartLayout::default()).unwrap()
    }

    #[test]
    fn starts_with_default_selection() {
        let chart = chart();
        assert_eq!(chart.selected(Axis::X), Field::Poverty);
        assert_eq!(chart.selected(Axis::Y), Field::Healthcare);
        assert!(chart.labels(Axis::X).is_active(Field::Poverty));
        assert!(chart.labels(Axis::Y).is_active(Field::Healthcare));
        assert_eq!(chart.axis(Axis::X).orientation(), Orientation::Bottom);
        assert_eq!(chart.axis(Axis::Y).orientation(), Orientation::Left);
        assert!(!chart.is_animating(0.0));
    }

    #[test]
    fn clicking_income_rebinds_the_x_axis() {
        let mut chart = chart();
        let outcome = chart.handle(ChartEvent::LabelClicked(Field::Income), 1.0).unwrap();
        assert_eq!(outcome, Outcome::Rerendered);
        assert_eq!(chart.selected(Axis::X), Field::Income);

        let labels = chart.labels(Axis::X);
        assert!(!labels.is_active(Field::Poverty));
        assert!(!labels.is_active(Field::Age));
        assert!(labels.is_active(Field::Income));
        assert_eq!(labels.labels().iter().filter(|l| l.active).count(), 1);

        let dataset = sample_dataset();
        let scale = chart.axis(Axis::X).scale();
        for (i, target) in chart.marks().targets().iter().enumerate() {
            let expected = scale.map(dataset.value(i, Field::Income)) as f32;
            assert_eq!(target.x, expected);
        }
        assert!(chart.is_animating(1.5));
        assert!(!chart.is_animating(2.0));
        // Y labels untouched by an x click.
        assert_eq!(chart.labels(Axis::Y).restyles(), 1);
    }

    #[test]
    fn reclicking_active_field_only_restyles() {
        let mut chart = chart();
        let before = chart.marks().targets();
        let scale_before = chart.axis(Axis::X).scale();
        let restyles = chart.labels(Axis::X).restyles();

        let outcome = chart.handle(ChartEvent::LabelClicked(Field::Poverty), 3.0).unwrap();
        assert_eq!(outcome, Outcome::Restyled);
        assert_eq!(chart.selected(Axis::X), Field::Poverty);
        assert_eq!(chart.marks().targets(), before);
        assert_eq!(chart.marks().positions_at(3.5), before);
        assert_eq!(chart.axis(Axis::X).scale(), scale_before);
        assert!(!chart.is_animating(3.0));
        assert_eq!(chart.labels(Axis::X).restyles(), restyles + 1);
        assert!(chart.labels(Axis::X).is_active(Field::Poverty));
    }

    #[test]
    fn selecting_back_restores_positions() {
        let mut chart = chart();
        chart.handle(ChartEvent::LabelClicked(Field::Obesity), 0.0).unwrap();
        let after_first = chart.marks().positions_at(5.0);

        chart.handle(ChartEvent::LabelClicked(Field::Smokes), 5.0).unwrap();
        // Interrupt the second transition half-way.
        chart.handle(ChartEvent::LabelClicked(Field::Obesity), 5.5).unwrap();

        assert_eq!(chart.selected(Axis::Y), Field::Obesity);
        assert_eq!(chart.marks().positions_at(10.0), after_first);
        assert!(chart.labels(Axis::Y).is_active(Field::Obesity));
    }

    #[test]
    fn tooltips_follow_the_selection() {
        let mut chart = chart();
        chart
            .handle(ChartEvent::HoverEnter { mark: 0, pointer: pos2(200.0, 100.0) }, 0.0)
            .unwrap();
        assert_eq!(chart.hovered(), Some(0));
        assert_eq!(
            chart.popup().unwrap().lines,
            ["Ohio", "Poverty: 14.2%", "Lacks Healthcare: 12.5%"]
        );

        chart.handle(ChartEvent::LabelClicked(Field::Age), 0.0).unwrap();
        chart.handle(ChartEvent::LabelClicked(Field::Smokes), 0.0).unwrap();
        assert_eq!(
            chart.popup().unwrap().lines,
            ["Ohio", "Age: 39.3", "Smokes: 23.4%"]
        );

        chart.handle(ChartEvent::HoverMove { pointer: pos2(210.0, 100.0) }, 0.0).unwrap();
        assert_eq!(chart.popup().unwrap().position, pos2(140.0, 140.0));

        assert_eq!(chart.handle(ChartEvent::HoverExit, 0.0).unwrap(), Outcome::Hover);
        assert!(chart.popup().is_none());
    }

    #[test]
    fn charts_are_independent() {
        let mut a = chart();
        let b = chart();
        a.handle(ChartEvent::LabelClicked(Field::Age), 0.0).unwrap();
        assert_eq!(a.selected(Axis::X), Field::Age);
        assert_eq!(b.selected(Axis::X), Field::Poverty);
    }
}
