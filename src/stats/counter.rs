use std::time::Duration;

use crate::report::HitRecord;

/// Running totals over a sequence of hits.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Counter {
    /// Number of hits.
    pub hits:      u64,
    /// Hits that succeeded.
    pub successes: u64,
    /// Hits that failed.
    pub failures:  u64,
    /// Sum of all hit durations.
    pub duration:  Duration,
}

impl Counter {
    /// Mean duration in milliseconds, `None` without hits.
    pub fn mean_ms(&self) -> Option<f64> {
        (self.hits > 0).then(|| self.duration.as_secs_f64() * 1_000.0 / self.hits as f64)
    }
}

impl std::ops::AddAssign<&HitRecord> for Counter {
    fn add_assign(&mut self, hit: &HitRecord) {
        self.hits += 1;
        if hit.success {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.duration += hit.duration;
    }
}

impl<'a> FromIterator<&'a HitRecord> for Counter {
    fn from_iter<I: IntoIterator<Item = &'a HitRecord>>(iter: I) -> Self {
        let mut counter = Counter::default();
        for hit in iter {
            counter += hit;
        }
        counter
    }
}
