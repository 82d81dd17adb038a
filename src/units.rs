use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul, Neg};

/// A length in PDF points (1/72 of an inch). All page coordinates, font sizes and
/// layout constants in this crate are expressed in points, with the origin at the
/// bottom-left corner of the page.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    Sub,
    AddAssign,
    SubAssign,
    Sum,
    Deref,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Pt(pub f32);

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Mul<Pt> for f32 {
    type Output = Pt;

    fn mul(self, rhs: Pt) -> Pt {
        Pt(self * rhs.0)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Neg for Pt {
    type Output = Pt;

    fn neg(self) -> Pt {
        Pt(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_stays_in_points() {
        let mut y = Pt(100.0);
        y -= Pt(22.0);
        assert_eq!(y, Pt(78.0));
        assert_eq!(y * 2.0, Pt(156.0));
        assert_eq!(0.5 * y, Pt(39.0));
        assert_eq!(-y, Pt(-78.0));
        assert_eq!(*(y / 2.0), 39.0);
    }

    #[test]
    fn sums() {
        let total: Pt = [Pt(1.0), Pt(2.5)].into_iter().sum();
        assert_eq!(total, Pt(3.5));
    }
}
