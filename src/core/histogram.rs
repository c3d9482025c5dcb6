use std::collections::HashMap;

use super::color::RgbColor;

#[derive(Clone, Copy, Debug)]
struct Bucket {
    count: usize,
    first_seen: usize,
}

/// Occurrence counter over sampled colors.
///
/// Remembers the order in which colors were first added so that the mode is
/// deterministic: equal counts resolve to the earliest color.
#[derive(Debug, Default)]
pub struct ColorHistogram {
    buckets: HashMap<RgbColor, Bucket>,
}

impl ColorHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: RgbColor) {
        let next = self.buckets.len();
        self.buckets
            .entry(color)
            .or_insert(Bucket { count: 0, first_seen: next })
            .count += 1;
    }

    #[cfg(test)]
    pub fn count(&self, color: RgbColor) -> usize {
        self.buckets.get(&color).map_or(0, |b| b.count)
    }

    pub fn distinct(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Most frequent color, or `None` when nothing was added.
    pub fn mode(&self) -> Option<RgbColor> {
        self.buckets
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.count
                    .cmp(&b.count)
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(color, _)| *color)
    }
}
