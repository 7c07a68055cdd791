#![allow(non_snake_case)]
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Scalar type of problem data, KKT systems and results.
///
/// Blanket implemented for every type with the listed
/// [`num_traits`](num_traits) and formatting bounds, so `f32` and `f64`.
pub trait FloatT:
    'static + Send + Sync + Float + NumAssign + FromPrimitive + Default + Display + LowerExp + Debug
{
}

impl<T> FloatT for T where
    T: 'static + Send + Sync + Float + NumAssign + FromPrimitive + Default + Display + LowerExp + Debug
{
}

/// Conversion of primitive constants into a [`FloatT`], e.g.
/// `(0.5).as_T()` in generic code and settings defaults.
///
/// A value the target cannot represent becomes NaN.
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($($ty:ty => $from:ident),* $(,)?) => {$(
        impl<T: Float + FromPrimitive> AsFloatT<T> for $ty {
            #[inline]
            fn as_T(&self) -> T {
                T::$from(*self).unwrap_or_else(T::nan)
            }
        }
    )*};
}

impl_as_FloatT!(f32 => from_f32, f64 => from_f64, usize => from_usize);

#[test]
fn test_as_float() {
    let half: f32 = (0.5).as_T();
    assert_eq!(half, 0.5f32);
    let n: f64 = 3usize.as_T();
    assert_eq!(n, 3.);
}
