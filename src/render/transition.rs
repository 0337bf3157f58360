use crate::processing::scale::Interval;

/// Values that can be blended between two endpoints.
pub trait Interpolate: Copy {
    fn interpolate(self, to: Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Interval {
    fn interpolate(self, to: Self, t: f64) -> Self {
        Interval::new(self.start.interpolate(to.start, t), self.end.interpolate(to.end, t))
    }
}

impl Interpolate for egui::Pos2 {
    fn interpolate(self, to: Self, t: f64) -> Self {
        self.lerp(to, t as f32)
    }
}

/// Symmetric cubic easing, slow at both ends.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// A value animating from `from` to `to` over `[start, start + duration]`.
///
/// Times are seconds on the UI clock. Retargeting mid-flight starts the new
/// transition from whatever is currently displayed, so a later request always
/// supersedes an earlier one without a visual jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<T> {
    from: T,
    to: T,
    start: f64,
    duration: f64,
}

impl<T: Interpolate> Transition<T> {
    /// A transition that has already finished at `value`.
    pub fn settled(value: T) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration: 0.0,
        }
    }

    pub fn retarget(&mut self, to: T, now: f64, duration: f64) {
        self.from = self.value_at(now);
        self.to = to;
        self.start = now;
        self.duration = duration;
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now: f64) -> T {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        self.from.interpolate(self.to, ease_cubic_in_out(p))
    }

    #[cfg(test)]
    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_active(&self, now: f64) -> bool {
        self.progress(now) < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn transition_runs_over_its_duration() {
        let mut t = Transition::settled(0.0_f64);
        assert!(!t.is_active(0.0));
        t.retarget(100.0, 10.0, 1.0);
        assert_eq!(t.value_at(10.0), 0.0);
        assert_eq!(t.value_at(10.5), 50.0);
        assert!(t.is_active(10.9));
        assert_eq!(t.value_at(11.0), 100.0);
        assert!(!t.is_active(11.0));
        assert_eq!(t.target(), 100.0);
    }

    #[test]
    fn retarget_starts_from_displayed_value() {
        let mut t = Transition::settled(0.0_f64);
        t.retarget(100.0, 0.0, 1.0);
        t.retarget(0.0, 0.5, 1.0);
        assert_eq!(t.value_at(0.5), 50.0);
        assert_eq!(t.value_at(1.5), 0.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let mut t = Transition::settled(egui::pos2(0.0, 0.0));
        t.retarget(egui::pos2(4.0, 8.0), 3.0, 0.0);
        assert_eq!(t.value_at(3.0), egui::pos2(4.0, 8.0));
    }
}
