//! Tunable parameters of the pipe pipeline.

use crate::error::GeomError;
use crate::polygon::ClipOptions;
use num_traits::Float;

/// Parameters used to turn branches into pipes and overlap them.
///
/// # Example
///
/// ```
/// use pipeshape::PipeConfig;
///
/// let config = PipeConfig::<f64>::default().half_width(25.0).sample_count(120);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeConfig<F> {
    /// Number of centerline samples per branch.
    pub sample_count: usize,
    /// Catmull-Rom knot exponent: 0 uniform, 0.5 centripetal, 1 chordal.
    pub tension: F,
    /// Distance from the centerline to each pipe wall.
    pub half_width: F,
    /// Control points closer than this across branches are reported.
    pub proximity_threshold: F,
    /// Options for the overlap clipper.
    pub clip: ClipOptions<F>,
}

impl<F: Float> Default for PipeConfig<F> {
    fn default() -> Self {
        Self {
            sample_count: 70,
            tension: F::from(0.5).unwrap(),
            half_width: F::from(40.0).unwrap(),
            proximity_threshold: F::from(50.0).unwrap(),
            clip: ClipOptions::default(),
        }
    }
}

impl<F: Float> PipeConfig<F> {
    /// Sets the number of centerline samples.
    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the spline tension.
    pub fn tension(mut self, tension: F) -> Self {
        self.tension = tension;
        self
    }

    /// Sets the pipe half-width.
    pub fn half_width(mut self, half_width: F) -> Self {
        self.half_width = half_width;
        self
    }

    /// Sets the proximity threshold.
    pub fn proximity_threshold(mut self, threshold: F) -> Self {
        self.proximity_threshold = threshold;
        self
    }

    /// Sets the clipper options.
    pub fn clip_options(mut self, clip: ClipOptions<F>) -> Self {
        self.clip = clip;
        self
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// [`GeomError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> Result<(), GeomError> {
        // Two samples give a single segment, whose outline has no area.
        if self.sample_count < 3 {
            return Err(GeomError::InvalidConfig("sample_count must be at least 3"));
        }
        if !self.tension.is_finite() || self.tension < F::zero() || self.tension > F::one() {
            return Err(GeomError::InvalidConfig("tension must be within [0, 1]"));
        }
        if !self.half_width.is_finite() || self.half_width <= F::zero() {
            return Err(GeomError::InvalidConfig(
                "half_width must be finite and positive",
            ));
        }
        if !self.proximity_threshold.is_finite() || self.proximity_threshold < F::zero() {
            return Err(GeomError::InvalidConfig(
                "proximity_threshold must be finite and non-negative",
            ));
        }
        if !self.clip.tolerance.is_finite() || self.clip.tolerance < F::zero() {
            return Err(GeomError::InvalidConfig(
                "clip tolerance must be finite and non-negative",
            ));
        }
        Ok(())
    }
}
