use egui::{pos2, Pos2};

use crate::processing::scale::LinearScale;
use crate::render::transition::Transition;
use crate::state::field::Field;
use crate::state::record::Dataset;

/// Circle drawn for one record. Positions are in plot-local coordinates.
#[derive(Debug, Clone)]
pub struct Mark {
    pub record: usize,
    position: Transition<Pos2>,
}

impl Mark {
    pub fn position_at(&self, now: f64) -> Pos2 {
        self.position.value_at(now)
    }

    #[cfg(test)]
    pub fn target(&self) -> Pos2 {
        self.position.target()
    }
}

/// Abbreviation text drawn over a circle.
#[derive(Debug, Clone)]
pub struct MarkLabel {
    pub record: usize,
    pub text: String,
    position: Transition<Pos2>,
}

impl MarkLabel {
    pub fn position_at(&self, now: f64) -> Pos2 {
        self.position.value_at(now)
    }

    #[cfg(test)]
    pub fn target(&self) -> Pos2 {
        self.position.target()
    }
}

/// Bundle of the two scales and the fields they were built for.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub x_field: Field,
    pub y_field: Field,
}

impl Projection {
    fn place(&self, dataset: &Dataset, index: usize) -> Pos2 {
        let x = self.x_scale.map(dataset.value(index, self.x_field));
        let y = self.y_scale.map(dataset.value(index, self.y_field));
        pos2(x as f32, y as f32)
    }
}

/// One circle and one label per record, in dataset order.
///
/// Created once per dataset. Re-rendering only moves existing marks, so the
/// mark at index `i` always belongs to record `i`.
#[derive(Debug, Clone)]
pub struct MarkSet {
    circles: Vec<Mark>,
    labels: Vec<MarkLabel>,
    label_nudge: f32,
}

impl MarkSet {
    pub fn new(dataset: &Dataset, projection: &Projection, label_nudge: f32) -> Self {
        let circles = (0..dataset.len())
            .map(|i| Mark {
                record: i,
                position: Transition::settled(projection.place(dataset, i)),
            })
            .collect();
        let nudge = egui::vec2(0.0, label_nudge);
        let labels = dataset
            .records()
            .iter()
            .enumerate()
            .map(|(i, r)| MarkLabel {
                record: i,
                text: r.abbr.clone(),
                position: Transition::settled(projection.place(dataset, i) + nudge),
            })
            .collect();
        Self {
            circles,
            labels,
            label_nudge,
        }
    }

    /// Start moving every circle to its position under `projection`.
    pub fn render_marks(
        &mut self,
        dataset: &Dataset,
        projection: &Projection,
        now: f64,
        duration: f64,
    ) {
        for mark in &mut self.circles {
            let target = projection.place(dataset, mark.record);
            mark.position.retarget(target, now, duration);
        }
    }

    /// Same as [`MarkSet::render_marks`] for the abbreviation labels.
    pub fn render_labels(
        &mut self,
        dataset: &Dataset,
        projection: &Projection,
        now: f64,
        duration: f64,
    ) {
        let nudge = egui::vec2(0.0, self.label_nudge);
        for label in &mut self.labels {
            let target = projection.place(dataset, label.record) + nudge;
            label.position.retarget(target, now, duration);
        }
    }

    pub fn circles(&self) -> &[Mark] {
        &self.circles
    }

    pub fn labels(&self) -> &[MarkLabel] {
        &self.labels
    }

    pub fn positions_at(&self, now: f64) -> Vec<Pos2> {
        self.circles.iter().map(|m| m.position_at(now)).collect()
    }

    /// Where every circle is heading, in dataset order.
    #[cfg(test)]
    pub fn targets(&self) -> Vec<Pos2> {
        self.circles.iter().map(Mark::target).collect()
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.circles.iter().any(|m| m.position.is_active(now))
            || self.labels.iter().any(|l| l.position.is_active(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scale::{build_dataset_scale, Interval};
    use crate::state::record::fixtures::sample_dataset;

    fn projection(ds: &Dataset, x_field: Field, y_field: Field) -> Projection {
        Projection {
            x_scale: build_dataset_scale(ds, x_field, Interval::new(0.0, 750.0)).unwrap(),
            y_scale: build_dataset_scale(ds, y_field, Interval::new(450.0, 0.0)).unwrap(),
            x_field,
            y_field,
        }
    }

    #[test]
    fn one_mark_and_label_per_record() {
        let ds = sample_dataset();
        let marks = MarkSet::new(&ds, &projection(&ds, Field::Poverty, Field::Healthcare), 3.0);
        assert_eq!(marks.circles().len(), 3);
        assert_eq!(marks.labels().len(), 3);
        let abbrs: Vec<&str> = marks.labels().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(abbrs, ["OH", "UT", "TX"]);
    }

    #[test]
    fn labels_sit_slightly_below_circle_centres() {
        let ds = sample_dataset();
        let marks = MarkSet::new(&ds, &projection(&ds, Field::Poverty, Field::Healthcare), 3.0);
        for (circle, label) in marks.circles().iter().zip(marks.labels()) {
            assert_eq!(label.target(), circle.target() + egui::vec2(0.0, 3.0));
        }
    }

    #[test]
    fn render_moves_existing_marks_to_new_targets() {
        let ds = sample_dataset();
        let initial = projection(&ds, Field::Poverty, Field::Healthcare);
        let mut marks = MarkSet::new(&ds, &initial, 3.0);
        let before = marks.targets();

        let next = projection(&ds, Field::Income, Field::Healthcare);
        marks.render_marks(&ds, &next, 2.0, 1.0);
        marks.render_labels(&ds, &next, 2.0, 1.0);

        assert_eq!(marks.circles().len(), 3);
        assert_eq!(marks.positions_at(2.0), before);
        assert!(marks.is_animating(2.5));
        assert!(!marks.is_animating(3.0));
        let expected_x = next.x_scale.map(60922.0) as f32;
        assert_eq!(marks.positions_at(3.0)[1].x, expected_x);
        // Vertical field unchanged, so y stays put.
        assert_eq!(marks.targets()[1].y, before[1].y);
    }
}
