//! Exponential moving average over successive measurement sets.
//!
//! Only continuous capture (a live camera feed) is smoothed. Each capture
//! session owns its own [`MeasurementSmoother`]; call
//! [`MeasurementSmoother::reset`] before reusing one for an unrelated face.

use tracing::trace;

use crate::measurements::Measurements;

/// Weight of the newest frame.
pub const DEFAULT_ALPHA: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct MeasurementSmoother {
    alpha: f64,
    previous: Option<Measurements>,
}

impl Default for MeasurementSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl MeasurementSmoother {
    /// `alpha` is clamped into [0, 1].
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            previous: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Blend `current` into the running state and return the smoothed set.
    ///
    /// The first frame of a session passes through unchanged and seeds the
    /// state. Later frames blend against the previous *smoothed* value, so
    /// the smoothing compounds across frames.
    pub fn smooth(&mut self, current: Measurements) -> Measurements {
        let smoothed = match &self.previous {
            None => current,
            Some(prev) => prev.blend(&current, self.alpha),
        };
        trace!(seeded = self.previous.is_none(), "smoothed measurements");
        self.previous = Some(smoothed);
        smoothed
    }

    pub fn previous(&self) -> Option<&Measurements> {
        self.previous.as_ref()
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(v: f64) -> Measurements {
        Measurements::from_array([v; 12])
    }

    #[test]
    fn first_frame_passes_through() {
        let mut s = MeasurementSmoother::default();
        let m = uniform(5.0);
        assert_eq!(s.smooth(m), m);
        assert_eq!(s.previous(), Some(&m));
    }

    #[test]
    fn second_frame_blends() {
        let mut s = MeasurementSmoother::default();
        s.smooth(uniform(10.0));
        let out = s.smooth(uniform(20.0));
        assert!((out.jaw_angle - 13.0).abs() < 1e-12);
        assert!((out.ipd - 13.0).abs() < 1e-12);
    }

    #[test]
    fn smoothing_compounds() {
        let mut s = MeasurementSmoother::default();
        s.smooth(uniform(0.0));
        s.smooth(uniform(10.0)); // 3.0
        let out = s.smooth(uniform(10.0)); // 0.7*3 + 3 = 5.1
        assert!((out.face_length - 5.1).abs() < 1e-12);
    }

    #[test]
    fn reset_starts_a_new_session() {
        let mut s = MeasurementSmoother::default();
        s.smooth(uniform(1.0));
        s.reset();
        assert!(s.previous().is_none());
        assert_eq!(s.smooth(uniform(9.0)), uniform(9.0));
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(MeasurementSmoother::new(1.7).alpha(), 1.0);
        assert_eq!(MeasurementSmoother::new(-0.2).alpha(), 0.0);
    }
}
