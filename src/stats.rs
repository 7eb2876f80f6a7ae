// Copyright (C) 2020-2026 Andy Kurnia.

// Running summary of simulated differentials (Welford's online algorithm).
#[derive(Clone, Debug)]
pub struct Stats {
    count: usize,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Default for Stats {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, sample: f64) {
        self.count += 1;
        let before = sample - self.mean;
        self.mean += before / self.count as f64;
        self.m2 += before * (sample - self.mean);
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
    }

    #[inline(always)]
    pub fn count(&self) -> usize {
        self.count
    }

    // 0 when empty.
    #[inline(always)]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    // sample variance, 0 until there are two samples.
    #[inline(always)]
    pub fn variance(&self) -> f64 {
        match self.count {
            0 | 1 => 0.0,
            n => self.m2 / (n - 1) as f64,
        }
    }

    #[inline(always)]
    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    // (min, max), None when empty.
    pub fn range(&self) -> Option<(f64, f64)> {
        (self.count > 0).then_some((self.min, self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary() {
        let stats = Stats::default();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.range(), None);
    }

    #[test]
    fn single_sample_has_no_spread() {
        let mut stats = Stats::new();
        stats.update(-3.0);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.mean(), -3.0);
        assert_eq!(stats.variance(), 0.0);
        assert_eq!(stats.range(), Some((-3.0, -3.0)));
    }

    #[test]
    fn mean_variance_and_range() {
        let mut stats = Stats::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            stats.update(x);
        }
        assert_eq!(stats.count(), 8);
        assert!((stats.mean() - 5.0).abs() < 1e-9);
        assert!((stats.variance() - 32.0 / 7.0).abs() < 1e-9);
        assert!((stats.standard_deviation() - (32.0f64 / 7.0).sqrt()).abs() < 1e-9);
        assert_eq!(stats.range(), Some((2.0, 9.0)));
    }
}
