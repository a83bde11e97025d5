use crate::core::kinematics::TelemetrySample;

/// Samples of one flight in the order they were produced. Grows by one per
/// processed frame and is only ever emptied by a reset.
#[derive(Clone, Debug, Default)]
pub struct Trajectory {
    samples: Vec<TelemetrySample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: TelemetrySample) {
        self.samples.push(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[TelemetrySample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetrySample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&TelemetrySample> {
        self.samples.last()
    }

    /// Polyline vertices for the path renderer.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().map(|s| (s.x_m, s.y_m))
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TelemetrySample;
    type IntoIter = std::slice::Iter<'a, TelemetrySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
