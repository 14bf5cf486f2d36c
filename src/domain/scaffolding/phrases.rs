//! Phrase variant selection.

use rand::Rng;

/// Chooses which of several equivalent phrasings to use.
pub trait PhrasePicker: Send + Sync {
    /// Index in `0..count`. `count` is never zero.
    fn pick(&self, count: usize) -> usize;

    /// Picks one of `options`, or `""` if there are none.
    fn choose(&self, options: &[&'static str]) -> &'static str {
        if options.is_empty() {
            return "";
        }
        let idx = self.pick(options.len()).min(options.len() - 1);
        options[idx]
    }
}

/// Uniform random choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl PhrasePicker for RandomPicker {
    fn pick(&self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count)
    }
}

/// Always the same index (clamped to the last option).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl PhrasePicker for FixedPicker {
    fn pick(&self, count: usize) -> usize {
        self.0.min(count.saturating_sub(1))
    }
}
