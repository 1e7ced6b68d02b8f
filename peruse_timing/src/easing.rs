// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Easing curve applied to normalized animation progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Cubic ease-in/ease-out: zero velocity at both ends.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Maps progress `t` (clamped to `[0, 1]`) through the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn ease_in_out_hits_endpoints_and_midpoint() {
        let e = Easing::EaseInOut;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ease_in_out_is_monotonic_and_symmetric() {
        let e = Easing::EaseInOut;
        let mut last = 0.0;
        for i in 1..=100 {
            let t = f64::from(i) / 100.0;
            let v = e.apply(t);
            assert!(v >= last, "easing must not go backwards at t={t}");
            assert!((v + e.apply(1.0 - t) - 1.0).abs() < 1e-12);
            last = v;
        }
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::EaseInOut.apply(2.0), 1.0);
    }
}
