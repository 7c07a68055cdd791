use super::FloatT;

/// Operations on dense vectors of [`FloatT`](crate::algebra::FloatT),
/// implemented for slices.
pub trait VectorMath {
    type T;

    /// Multiply every entry by `c`
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Flip the sign of every entry
    fn negate(&mut self) -> &mut Self;

    /// `self += a*x`
    fn axpy(&mut self, a: Self::T, x: &Self) -> &mut Self;

    fn dot(&self, y: &Self) -> Self::T;

    /// Euclidean distance between `self` and `y`
    fn dist(&self, y: &Self) -> Self::T;

    /// Largest absolute entry.  NaN if any entry is NaN.
    fn norm_inf(&self) -> Self::T;

    /// Largest absolute entry of `self - y`
    fn norm_inf_diff(&self, y: &Self) -> Self::T;

    /// False if any entry is Inf or NaN
    fn all_finite(&self) -> bool;
}

/// Operations on sparse matrices of [`FloatT`](crate::algebra::FloatT)
pub trait MatrixMath {
    type T: FloatT;

    fn scale(&mut self, c: Self::T);

    fn negate(&mut self);

    /// `y += a*M*x`
    fn mul_acc(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T);

    /// `y += a*Mᵀ*x`
    fn mul_t_acc(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T);

    /// `y += a*S*x`, where `S` is the symmetric matrix whose upper
    /// triangle is stored in `M`.  Entries below the diagonal are ignored.
    fn sym_mul_acc(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T);

    /// `xᵀMx` over every stored entry, with no symmetry assumed
    fn quad_form(&self, x: &[Self::T]) -> Self::T;
}
