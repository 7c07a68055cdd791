use std::ops::{Add, Neg};

/// Curvature of a scalar expression in the DCP sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curvature {
    Constant,
    Affine,
    Convex,
    Concave,
    Unknown,
}

impl Curvature {
    pub fn is_constant(&self) -> bool {
        matches!(self, Curvature::Constant)
    }

    pub fn is_affine(&self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine)
    }

    pub fn is_convex(&self) -> bool {
        self.is_affine() || matches!(self, Curvature::Convex)
    }

    pub fn is_concave(&self) -> bool {
        self.is_affine() || matches!(self, Curvature::Concave)
    }

    /// Curvature after scaling by a constant `c`
    pub fn scale<T: num_traits::Float>(self, c: T) -> Self {
        if c.is_zero() {
            Curvature::Constant
        } else if c.is_sign_negative() {
            -self
        } else {
            self
        }
    }
}

impl Neg for Curvature {
    type Output = Curvature;

    fn neg(self) -> Curvature {
        match self {
            Curvature::Convex => Curvature::Concave,
            Curvature::Concave => Curvature::Convex,
            c => c,
        }
    }
}

// curvature of a sum
impl Add for Curvature {
    type Output = Curvature;

    fn add(self, rhs: Curvature) -> Curvature {
        use Curvature::*;
        match (self, rhs) {
            (Constant, c) | (c, Constant) => c,
            (Affine, c) | (c, Affine) => c,
            (Convex, Convex) => Convex,
            (Concave, Concave) => Concave,
            _ => Unknown,
        }
    }
}

#[test]
fn test_curvature_sums() {
    use Curvature::*;
    assert_eq!(Constant + Affine, Affine);
    assert_eq!(Affine + Convex, Convex);
    assert_eq!(Convex + Concave, Unknown);
    assert_eq!(Unknown + Constant, Unknown);
    assert_eq!(Convex.scale(-2.0), Concave);
    assert_eq!(Convex.scale(0.0), Constant);
    assert!(Affine.is_convex() && Affine.is_concave());
    assert!(!Unknown.is_convex() && !Unknown.is_concave());
}
