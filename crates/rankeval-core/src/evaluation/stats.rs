//! Paired significance testing between two evaluation runs

use crate::error::{EvalError, Result};

/// Result of a paired two-sided t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// Positive when sample A scores higher than sample B on average
    pub t_statistic: f64,
    /// Two-sided p-value from Student's t with `df` degrees of freedom
    pub p_value: f64,
    pub df: usize,
    /// Mean of the paired differences `a_i - b_i`
    pub mean_difference: f64,
}

impl TTestResult {
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// `t(df)=..., p=...`, starred when significant at 0.05
    pub fn format(&self) -> String {
        let marker = if self.is_significant(0.05) { "*" } else { "" };
        format!(
            "t({})={:.3}, p={:.4}{}",
            self.df, self.t_statistic, self.p_value, marker
        )
    }
}

/// Paired two-sided t-test on matched samples
///
/// Both samples must have the same length, at least two observations and only
/// finite values. When every difference is exactly zero the result is
/// `t = 0, p = 1`. When the differences are constant but non-zero the
/// statistic is infinite and `p = 0`.
pub fn paired_ttest(sample_a: &[f64], sample_b: &[f64]) -> Result<TTestResult> {
    if sample_a.len() != sample_b.len() {
        return Err(EvalError::invalid_argument(
            "sample_b",
            format!(
                "paired samples must have equal length, got {} and {}",
                sample_a.len(),
                sample_b.len()
            ),
        ));
    }
    if sample_a.len() < 2 {
        return Err(EvalError::invalid_argument(
            "sample_a",
            format!(
                "paired t-test needs at least 2 observations, got {}",
                sample_a.len()
            ),
        ));
    }
    if sample_a.iter().chain(sample_b).any(|v| !v.is_finite()) {
        return Err(EvalError::invalid_argument(
            "sample_a",
            "samples must contain only finite values",
        ));
    }

    let n = sample_a.len();
    let df = n - 1;

    let diffs: Vec<f64> = sample_a
        .iter()
        .zip(sample_b)
        .map(|(a, b)| a - b)
        .collect();

    if diffs.iter().all(|d| *d == 0.0) {
        return Ok(TTestResult {
            t_statistic: 0.0,
            p_value: 1.0,
            df,
            mean_difference: 0.0,
        });
    }

    let mean = diffs.iter().sum::<f64>() / n as f64;
    let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / df as f64;
    let std_error = variance.sqrt() / (n as f64).sqrt();

    let t_statistic = if std_error > 0.0 {
        mean / std_error
    } else if mean == 0.0 {
        0.0
    } else {
        f64::INFINITY.copysign(mean)
    };

    Ok(TTestResult {
        t_statistic,
        p_value: students_t_two_sided(t_statistic, df),
        df,
        mean_difference: mean,
    })
}

/// Two-sided tail probability of Student's t
///
/// Uses `P(|T| >= t) = I_{df/(df+t²)}(df/2, 1/2)`.
fn students_t_two_sided(t: f64, df: usize) -> f64 {
    if t.is_infinite() {
        return 0.0;
    }
    let df = df as f64;
    let x = df / (df + t * t);
    regularized_incomplete_beta(df / 2.0, 0.5, x).clamp(0.0, 1.0)
}

/// Regularized incomplete beta function `I_x(a, b)`
fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_front = libm::lgamma(a + b) - libm::lgamma(a) - libm::lgamma(b)
        + a * x.ln()
        + b * (-x).ln_1p();
    let front = ln_front.exp();

    // The continued fraction converges fastest on this side of the mean
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x) / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x) / b
    }
}

/// Modified Lentz evaluation of the incomplete beta continued fraction
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 300;
    const EPS: f64 = 1e-15;
    const TINY: f64 = 1e-300;

    let guard = |v: f64| if v.abs() < TINY { TINY } else { v };

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 / guard(1.0 - qab * x / qap);
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let even = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 / guard(1.0 + even * d);
        c = guard(1.0 + even / c);
        h *= d * c;

        let odd = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 / guard(1.0 + odd * d);
        c = guard(1.0 + odd / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }

    h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_identical_samples() {
        let a = [0.3, 0.5, 0.9, 0.1];
        let result = paired_ttest(&a, &a).unwrap();
        assert_eq!(result.t_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert_eq!(result.df, 3);
    }

    #[test]
    fn test_symmetric_differences_cancel() {
        let result = paired_ttest(&[1.0, 0.5], &[0.5, 1.0]).unwrap();
        assert_eq!(result.mean_difference, 0.0);
        assert_eq!(result.t_statistic, 0.0);
        assert!(close(result.p_value, 1.0, 1e-12));
    }

    #[test]
    fn test_known_statistic_and_p_value() {
        // differences -1, 0, 1, 2, 3: mean 1, sd sqrt(2.5), t = sqrt(2)
        let result = paired_ttest(&[1.0, 2.0, 3.0, 4.0, 5.0], &[2.0; 5]).unwrap();
        assert!(close(result.t_statistic, 2f64.sqrt(), 1e-12));
        assert!(close(result.p_value, 0.230_199_641_080_498_6, 1e-9));
        assert_eq!(result.df, 4);
    }

    #[test]
    fn test_p_value_matches_cauchy_for_one_degree_of_freedom() {
        for t in [0.5, 1.0, 2.0, 5.0, 20.0] {
            let expected = 1.0 - 2.0 / std::f64::consts::PI * f64::atan(t);
            assert!(close(students_t_two_sided(t, 1), expected, 1e-12), "t = {t}");
        }
    }

    #[test]
    fn test_p_value_matches_closed_form_for_two_degrees_of_freedom() {
        for t in [0.5_f64, 1.0, 2.0, 5.0, 20.0] {
            let expected = 1.0 - t / (2.0 + t * t).sqrt();
            assert!(close(students_t_two_sided(t, 2), expected, 1e-12), "t = {t}");
        }
    }

    #[test]
    fn test_p_value_is_symmetric_in_sign() {
        let forward = paired_ttest(&[0.9, 0.8, 0.7, 0.95], &[0.5, 0.6, 0.65, 0.4]).unwrap();
        let backward = paired_ttest(&[0.5, 0.6, 0.65, 0.4], &[0.9, 0.8, 0.7, 0.95]).unwrap();
        assert!(forward.t_statistic > 0.0);
        assert!(close(forward.t_statistic, -backward.t_statistic, 1e-12));
        assert!(close(forward.p_value, backward.p_value, 1e-12));
    }

    #[test]
    fn test_constant_nonzero_difference() {
        let result = paired_ttest(&[0.6, 0.7, 0.8], &[0.5, 0.6, 0.7]).unwrap();
        assert!(result.p_value < 1e-6);
        assert!(result.t_statistic > 0.0);
    }

    #[test]
    fn test_degenerate_samples_rejected() {
        assert!(matches!(
            paired_ttest(&[0.1, 0.2], &[0.1]),
            Err(EvalError::InvalidArgument { .. })
        ));
        assert!(matches!(
            paired_ttest(&[0.1], &[0.2]),
            Err(EvalError::InvalidArgument { .. })
        ));
        assert!(paired_ttest(&[], &[]).is_err());
        assert!(paired_ttest(&[0.1, f64::NAN], &[0.1, 0.2]).is_err());
    }

    #[test]
    fn test_significance_threshold() {
        let result = TTestResult {
            t_statistic: 2.5,
            p_value: 0.03,
            df: 9,
            mean_difference: 0.1,
        };
        assert!(result.is_significant(0.05));
        assert!(!result.is_significant(0.01));
        assert_eq!(result.format(), "t(9)=2.500, p=0.0300*");
    }
}
