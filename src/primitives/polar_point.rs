//! Points carrying polar coordinates about a chosen origin.

use super::{Angle, Point2};
use num_traits::Float;
use std::cmp::Ordering;

/// A point together with its range and bearing about a polar origin.
///
/// Setters keep the Cartesian and polar data consistent: changing `x`,
/// `y` or the origin recomputes range and bearing, changing range or
/// bearing recomputes `x` and `y`.
#[derive(Debug, Clone, Copy)]
pub struct PolarPoint<F> {
    point: Point2<F>,
    origin: Point2<F>,
    range: F,
    bearing: Angle<F>,
}

impl<F: Float> PolarPoint<F> {
    /// Creates the polar representation of `point` about `origin`.
    ///
    /// A point within `epsilon` of the origin gets range 0 and bearing 0.
    /// If either point is unset, range and bearing are NaN.
    pub fn new(origin: Point2<F>, point: Point2<F>, epsilon: F) -> Self {
        let (range, bearing) = if !origin.is_set() || !point.is_set() {
            (F::nan(), Angle::new(F::nan()))
        } else if origin.distance(point) <= epsilon {
            (F::zero(), Angle::zero())
        } else {
            (
                origin.distance(point),
                Angle::from_rise_run(point.y - origin.y, point.x - origin.x),
            )
        };
        Self {
            point,
            origin,
            range,
            bearing,
        }
    }

    /// The Cartesian position.
    #[inline]
    pub fn point(&self) -> Point2<F> {
        self.point
    }

    #[inline]
    pub fn x(&self) -> F {
        self.point.x
    }

    #[inline]
    pub fn y(&self) -> F {
        self.point.y
    }

    /// The polar origin.
    #[inline]
    pub fn origin(&self) -> Point2<F> {
        self.origin
    }

    /// Distance from the polar origin.
    #[inline]
    pub fn range(&self) -> F {
        self.range
    }

    /// Direction from the polar origin.
    #[inline]
    pub fn bearing(&self) -> Angle<F> {
        self.bearing
    }

    /// Moves the polar origin, recomputing range and bearing.
    pub fn set_origin(&mut self, origin: Point2<F>) {
        *self = Self::new(origin, self.point, F::zero());
    }

    /// Moves the point horizontally, recomputing range and bearing.
    pub fn set_x(&mut self, x: F) {
        *self = Self::new(self.origin, Point2::new(x, self.point.y), F::zero());
    }

    /// Moves the point vertically, recomputing range and bearing.
    pub fn set_y(&mut self, y: F) {
        *self = Self::new(self.origin, Point2::new(self.point.x, y), F::zero());
    }

    /// Changes the range, recomputing the Cartesian position.
    pub fn set_range(&mut self, range: F) {
        self.range = range;
        self.update_cartesian();
    }

    /// Changes the bearing, recomputing the Cartesian position.
    pub fn set_bearing(&mut self, bearing: Angle<F>) {
        self.bearing = bearing;
        self.update_cartesian();
    }

    /// Sets the bearing to exactly 2π without moving the point.
    #[inline]
    pub fn set_bearing_to_two_pi(&mut self) {
        self.bearing.set_to_two_pi();
    }

    /// Orders by bearing, then range. `None` if any coordinate is NaN.
    pub fn polar_cmp(&self, other: &Self) -> Option<Ordering> {
        if !self.is_complete() || !other.is_complete() {
            return None;
        }
        match self.bearing.partial_cmp(&other.bearing)? {
            Ordering::Equal => self.range.partial_cmp(&other.range),
            ord => Some(ord),
        }
    }

    fn is_complete(&self) -> bool {
        self.origin.is_set() && !self.range.is_nan() && !self.bearing.radians().is_nan()
    }

    fn update_cartesian(&mut self) {
        let (sin, cos) = self.bearing.radians().sin_cos();
        self.point = Point2::new(
            self.origin.x + self.range * cos,
            self.origin.y + self.range * sin,
        );
    }
}

impl<F: Float> PartialEq for PolarPoint<F> {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin && self.range == other.range && self.bearing == other.bearing
    }
}

impl<F: Float> PartialOrd for PolarPoint<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.polar_cmp(other)? {
            Ordering::Equal if self.origin != other.origin => None,
            ord => Some(ord),
        }
    }
}
