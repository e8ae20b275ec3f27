pub mod historical;
pub mod live;
pub mod news;
pub mod synthetic;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::{Rng, RngCore};

use self::synthetic::SyntheticSeriesGenerator;

/// Generator shared between the service, the historical feed and the live feed.
pub type SharedGenerator<R> = Arc<Mutex<SyntheticSeriesGenerator<R>>>;

/// Source of uniform draws in `[0, 1)` driving the synthetic generator.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R> RandomSource for R
where
    R: RngCore,
{
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` so a scripted sequence can pin the generator to its
/// extremes (eg/ all `0.0` for the steepest possible decline).
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let value = self.values[self.position % self.values.len()];
        self.position = self.position.wrapping_add(1);
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
