use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;

    fn scale(&mut self, c: T) -> &mut Self {
        self.iter_mut().for_each(|v| *v *= c);
        self
    }

    fn negate(&mut self) -> &mut Self {
        self.iter_mut().for_each(|v| *v = -*v);
        self
    }

    fn axpy(&mut self, a: T, x: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        zip(&mut *self, x).for_each(|(y, &x)| *y += a * x);
        self
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y).fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    fn dist(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y)
            .fold(T::zero(), |acc, (&a, &b)| acc + (a - b) * (a - b))
            .sqrt()
    }

    fn norm_inf(&self) -> T {
        // fold with max would silently drop NaN entries
        let mut out = T::zero();
        for &v in self {
            if v.is_nan() {
                return T::nan();
            }
            out = out.max(v.abs());
        }
        out
    }

    fn norm_inf_diff(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        zip(self, y).fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs()))
    }

    fn all_finite(&self) -> bool {
        self.iter().all(|v| v.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reductions() {
        let x = [3., -4., 0.];
        assert_eq!(x.dot(&[1., 1., 7.]), -1.);
        assert_eq!(x.dist(&[0., 0., 0.]), 5.);
        assert_eq!(x.norm_inf(), 4.);
        assert_eq!(x.norm_inf_diff(&[3., -3., 2.]), 2.);
        assert!([1., f64::NAN].norm_inf().is_nan());
        assert!(x.all_finite());
        assert!(![1., f64::INFINITY].all_finite());
    }

    #[test]
    fn test_in_place_updates() {
        let mut y = vec![1., 2., 3.];
        y.axpy(2., &[1., 0., -1.]);
        assert_eq!(y, vec![3., 2., 1.]);
        y.scale(0.5).negate();
        assert_eq!(y, vec![-1.5, -1., -0.5]);
    }
}
