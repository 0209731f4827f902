//! Step search for the largest font size whose text fits a target width.
//!
//! There is no "fit text to box" primitive to lean on, only a measurement
//! function. [`TextFitSizer`] hill-climbs the font size in fixed steps,
//! reversing direction at most once:
//!
//! - narrower than the target: grow, unless the previous probe was wider, in
//!   which case the current (narrower) size is the answer;
//! - wider than the target: shrink, unless the previous probe was narrower,
//!   in which case the search overshot and steps back to the previous size;
//! - exactly the target: done.
//!
//! For a monotonic measurement the result satisfies
//! `measure(size) <= target < measure(size + step)`.

use core::cmp::Ordering;

use log::{debug, warn};

/// Upper bound on probes per search. Only reached by pathological
/// measurement functions; monotonic ones converge long before.
pub const MAX_FIT_ITERATIONS: usize = 1024;

/// Pixel extent of a run of text at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: i32,
    pub height: i32,
}

impl TextExtent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Outcome of one fit search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    pub size: f32,
    pub measured_width: i32,
    pub measured_height: i32,
}

impl FitResult {
    fn new(size: f32, extent: TextExtent) -> Self {
        Self {
            size,
            measured_width: extent.width,
            measured_height: extent.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Narrower,
    Wider,
}

/// Direction-reversal hill climb over font sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextFitSizer {
    step: f32,
}

impl TextFitSizer {
    pub const fn new(step: f32) -> Self {
        Self { step }
    }

    /// Find the largest step-aligned size (starting from `initial_size`)
    /// whose measured width does not exceed `target_width`.
    ///
    /// A non-positive (or NaN) step returns the starting size untouched. When
    /// the text is still too wide at the smallest positive size the search can
    /// reach, that size is returned and the caller draws a slightly
    /// overflowing line.
    pub fn fit<F>(&self, target_width: i32, initial_size: f32, mut measure: F) -> FitResult
    where
        F: FnMut(f32) -> TextExtent,
    {
        let step = self.step;
        let mut size = if initial_size > 0.0 {
            initial_size
        } else {
            step.max(0.0)
        };
        let mut extent = measure(size);

        if !(step > 0.0) {
            debug!("Fit step {} cannot converge, keeping size {}", step, size);
            return FitResult::new(size, extent);
        }

        let mut previous: Option<Probe> = None;
        for _ in 0..MAX_FIT_ITERATIONS {
            let probe = match extent.width.cmp(&target_width) {
                Ordering::Equal => return FitResult::new(size, extent),
                Ordering::Less => Probe::Narrower,
                Ordering::Greater => Probe::Wider,
            };

            match (probe, previous) {
                (Probe::Narrower, Some(Probe::Wider)) => return FitResult::new(size, extent),
                (Probe::Narrower, _) => size += step,
                (Probe::Wider, Some(Probe::Narrower)) => {
                    size -= step;
                    return FitResult::new(size, measure(size));
                }
                (Probe::Wider, _) => {
                    if size - step <= 0.0 {
                        return FitResult::new(size, extent);
                    }
                    size -= step;
                }
            }

            previous = Some(probe);
            extent = measure(size);
        }

        warn!(
            "Fit search gave up after {} probes at size {} (width {} vs {})",
            MAX_FIT_ITERATIONS, size, extent.width, target_width
        );
        FitResult::new(size, extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ten pixels of width per unit of font size.
    fn linear(size: f32) -> TextExtent {
        TextExtent::new((size * 10.0) as i32, size as i32)
    }

    #[test]
    fn test_grows_then_steps_back() {
        let sizer = TextFitSizer::new(6.0);
        let fit = sizer.fit(245, 12.0, linear);
        assert_eq!(fit.size, 24.0);
        assert_eq!(fit.measured_width, 240);
        assert_eq!(fit.measured_height, 24);
    }

    #[test]
    fn test_shrinks_until_narrower() {
        let sizer = TextFitSizer::new(6.0);
        let fit = sizer.fit(245, 60.0, linear);
        assert_eq!(fit.size, 24.0);
        assert_eq!(fit.measured_width, 240);
    }

    #[test]
    fn test_exact_fit_short_circuits() {
        let sizer = TextFitSizer::new(6.0);
        let mut probes = 0;
        let fit = sizer.fit(240, 12.0, |size| {
            probes += 1;
            linear(size)
        });
        assert_eq!(fit.size, 24.0);
        assert_eq!(probes, 3, "12, 18, then the exact match at 24");
    }

    #[test]
    fn test_non_positive_step_keeps_initial_size() {
        for step in [0.0, -6.0, f32::NAN] {
            let fit = TextFitSizer::new(step).fit(245, 12.0, linear);
            assert_eq!(fit.size, 12.0);
            assert_eq!(fit.measured_width, 120);
        }
    }

    #[test]
    fn test_unfittable_text_terminates_with_positive_size() {
        let sizer = TextFitSizer::new(6.0);
        let fit = sizer.fit(0, 12.0, linear);
        assert_eq!(fit.size, 6.0);
        assert!(fit.measured_width > 0, "overflow is accepted rather than looping");
    }

    #[test]
    fn test_non_positive_initial_size_starts_at_one_step() {
        let sizer = TextFitSizer::new(6.0);
        let fit = sizer.fit(245, 0.0, linear);
        assert_eq!(fit.size, 24.0);
    }

    #[test]
    fn test_result_fits_and_is_maximal() {
        for step in [1.0f32, 2.5, 6.0] {
            for initial in [1.0f32, 12.0, 100.0, 400.0] {
                for target in (100..2000).step_by(37) {
                    let fit = TextFitSizer::new(step).fit(target, initial, linear);
                    assert!(
                        fit.measured_width <= target,
                        "step {step} initial {initial} target {target}: {fit:?} overflows"
                    );
                    assert!(
                        linear(fit.size + step).width > target,
                        "step {step} initial {initial} target {target}: {fit:?} is not maximal"
                    );
                }
            }
        }
    }

    #[test]
    fn test_probe_count_is_bounded_by_distance() {
        let step = 6.0;
        for (initial, target) in [(12.0f32, 3000), (500.0, 100), (30.0, 310)] {
            let mut probes = 0usize;
            TextFitSizer::new(step).fit(target, initial, |size| {
                probes += 1;
                linear(size)
            });
            let distance = (linear(initial).width - target).unsigned_abs() as f32;
            let bound = (distance / (step * 10.0)) as usize + 3;
            assert!(
                probes <= bound,
                "initial {initial} target {target}: {probes} probes exceeds {bound}"
            );
        }
    }
}
