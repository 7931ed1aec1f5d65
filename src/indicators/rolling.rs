// =============================================================================
// Rolling statistics
// =============================================================================
//
// Windowed mean and sample standard deviation over a value-or-undefined
// series.  Position `i` of the output covers input positions
// `[i - w + 1, i]`; it is defined only when every one of those `w` inputs
// exists and is defined.  An undefined input inside the window propagates to
// the output — there is no skipping or interpolation.
//
// The standard deviation uses the sample convention (divisor `w - 1`), which
// is what the band definitions downstream are stated in.  A one-bar window
// therefore has no defined standard deviation.

use crate::errors::AnalysisError;

/// Rolling arithmetic mean with window `w`.
///
/// The first `w - 1` positions are undefined (insufficient history), as is
/// any position whose window contains an undefined input.
pub fn rolling_mean(
    values: &[Option<f64>],
    window: usize,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window(window)?;

    let mut out = vec![None; values.len()];
    for i in (window - 1)..values.len() {
        let slot: Vec<f64> = values[i + 1 - window..=i].iter().copied().flatten().collect();
        if slot.len() == window {
            out[i] = Some(slot.iter().sum::<f64>() / window as f64);
        }
    }
    Ok(out)
}

/// Rolling sample standard deviation with window `w`.
///
/// Undefined for the first `w - 1` positions, for any window containing an
/// undefined input, and everywhere when `w == 1` (the sample convention has
/// no single-observation deviation).
pub fn rolling_std(
    values: &[Option<f64>],
    window: usize,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    check_window(window)?;

    let mut out = vec![None; values.len()];
    if window < 2 {
        return Ok(out);
    }

    for i in (window - 1)..values.len() {
        let slot: Vec<f64> = values[i + 1 - window..=i].iter().copied().flatten().collect();
        if slot.len() == window {
            let mean = slot.iter().sum::<f64>() / window as f64;
            let variance = slot.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
                / (window - 1) as f64;
            out[i] = Some(variance.sqrt());
        }
    }
    Ok(out)
}

fn check_window(window: usize) -> Result<(), AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::Configuration {
            name: "window",
            value: 0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn mean_has_undefined_warmup_prefix() {
        let input = defined(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let out = rolling_mean(&input, 3).unwrap();
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn mean_window_one_is_identity() {
        let input = defined(&[1.0, 2.0, 3.0]);
        let out = rolling_mean(&input, 1).unwrap();
        assert_eq!(out, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn mean_window_longer_than_series_is_all_undefined() {
        let input = defined(&[1.0, 2.0]);
        let out = rolling_mean(&input, 5).unwrap();
        assert_eq!(out, vec![None, None]);
    }

    #[test]
    fn mean_propagates_undefined_inputs() {
        let input = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)];
        let out = rolling_mean(&input, 3).unwrap();
        // Every window touching the undefined input is undefined.
        assert_eq!(out[2], None);
        assert_eq!(out[3], None);
        assert_eq!(out[4], None);
        // The undefined input has rolled out of the window.
        assert_eq!(out[5], Some(5.0));
    }

    #[test]
    fn std_uses_sample_convention() {
        let input = defined(&[1.0, 2.0, 3.0]);
        let out = rolling_std(&input, 3).unwrap();
        // Sample variance of [1,2,3] = (1 + 0 + 1) / 2 = 1.
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert!((out[2].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn std_of_constant_window_is_zero() {
        let input = defined(&[7.0; 5]);
        let out = rolling_std(&input, 3).unwrap();
        assert!((out[4].unwrap() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn std_window_one_is_all_undefined() {
        let input = defined(&[1.0, 2.0, 3.0]);
        let out = rolling_std(&input, 1).unwrap();
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn std_propagates_undefined_inputs() {
        let input = vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)];
        let out = rolling_std(&input, 2).unwrap();
        assert_eq!(out[1], None);
        assert_eq!(out[2], None);
        assert!(out[3].is_some());
    }

    #[test]
    fn zero_window_is_a_configuration_error() {
        let input = defined(&[1.0, 2.0]);
        assert_eq!(
            rolling_mean(&input, 0),
            Err(AnalysisError::Configuration {
                name: "window",
                value: 0
            })
        );
        assert_eq!(
            rolling_std(&input, 0),
            Err(AnalysisError::Configuration {
                name: "window",
                value: 0
            })
        );
    }
}
