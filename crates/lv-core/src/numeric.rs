use crate::LvError;

/// Floating point type used throughout the simulation.
pub type Real = f64;

/// Absolute + relative comparison tolerance.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, LvError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LvError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances::default();
        assert!(nearly_equal(50.0, 50.0 + 1e-9, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(50.0, 50.1, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "gain").unwrap_err();
        assert!(format!("{err}").contains("Non-finite"));
    }
}
