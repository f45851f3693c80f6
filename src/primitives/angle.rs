//! Angles normalized into [0, 2π).

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Returns 2π in the requested float type.
#[inline]
pub(crate) fn tau<F: Float>() -> F {
    F::from(std::f64::consts::TAU).unwrap()
}

/// An angle in radians, kept in [0, 2π).
///
/// The only way to hold exactly 2π is [`Angle::two_pi`] or
/// [`Angle::set_to_two_pi`]; the visibility sweep uses it to place bearings
/// on the far side of the 0/2π seam.
///
/// # Example
///
/// ```
/// use visum::primitives::Angle;
///
/// let a: Angle<f64> = Angle::new(-std::f64::consts::FRAC_PI_2);
/// assert!((a.radians() - 1.5 * std::f64::consts::PI).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Angle<F> {
    radians: F,
}

impl<F: Float> Angle<F> {
    /// Creates an angle from radians, reducing it into [0, 2π).
    pub fn new(radians: F) -> Self {
        let tau = tau::<F>();
        let radians = if radians >= F::zero() {
            radians % tau
        } else {
            let wrapped = tau + radians % tau;
            if wrapped == tau {
                F::zero()
            } else {
                wrapped
            }
        };
        Self { radians }
    }

    /// Creates the angle of the direction `(run, rise)`, in [0, 2π).
    ///
    /// A zero vector yields 0.
    pub fn from_rise_run(rise: F, run: F) -> Self {
        let radians = rise.atan2(run);
        if radians < F::zero() {
            Self {
                radians: tau::<F>() + radians,
            }
        } else {
            Self { radians }
        }
    }

    /// The zero angle.
    #[inline]
    pub fn zero() -> Self {
        Self {
            radians: F::zero(),
        }
    }

    /// The full turn, exactly 2π.
    #[inline]
    pub fn two_pi() -> Self {
        Self { radians: tau() }
    }

    /// Returns the angle in radians.
    #[inline]
    pub fn radians(self) -> F {
        self.radians
    }

    /// Replaces the angle, reducing it into [0, 2π).
    #[inline]
    pub fn set(&mut self, radians: F) {
        *self = Self::new(radians);
    }

    /// Sets the angle to exactly 2π.
    #[inline]
    pub fn set_to_two_pi(&mut self) {
        self.radians = tau();
    }

    /// Returns `true` if the angle is exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.radians == F::zero()
    }

    /// Length of the shorter arc between `self` and `other`.
    #[inline]
    pub fn geodesic_distance(self, other: Self) -> F {
        geodesic_distance(self, other)
    }
}

/// Length of the shorter arc between two angles, in [0, π].
pub fn geodesic_distance<F: Float>(a: Angle<F>, b: Angle<F>) -> F {
    let direct = (a.radians - b.radians).abs();
    let around = tau::<F>() - direct;
    direct.min(around)
}

/// Direction of the shorter arc from `a` to `b`.
///
/// Returns `1` for counter-clockwise and `-1` for clockwise. Equal arcs
/// resolve to clockwise when `a <= b` and to counter-clockwise otherwise.
pub fn geodesic_direction<F: Float>(a: Angle<F>, b: Angle<F>) -> F {
    let direct = (a.radians - b.radians).abs();
    let around = tau::<F>() - direct;
    let shorter_is_direct = direct < around;
    if (a <= b) == shorter_is_direct {
        F::one()
    } else {
        -F::one()
    }
}

impl<F: Float> Add for Angle<F> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.radians + other.radians)
    }
}

impl<F: Float> Sub for Angle<F> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.radians - other.radians)
    }
}
