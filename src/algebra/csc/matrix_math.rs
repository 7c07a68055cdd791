#![allow(non_snake_case)]

use crate::algebra::*;

impl<T: FloatT> MatrixMath for CscMatrix<T> {
    type T = T;

    fn scale(&mut self, c: T) {
        self.nzval.scale(c);
    }

    fn negate(&mut self) {
        self.nzval.negate();
    }

    fn mul_acc(&self, y: &mut [T], x: &[T], a: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);
        for (row, col, v) in self.triplets() {
            y[row] += a * v * x[col];
        }
    }

    fn mul_t_acc(&self, y: &mut [T], x: &[T], a: T) {
        assert_eq!(x.len(), self.m);
        assert_eq!(y.len(), self.n);
        for (row, col, v) in self.triplets() {
            y[col] += a * v * x[row];
        }
    }

    fn sym_mul_acc(&self, y: &mut [T], x: &[T], a: T) {
        assert!(self.is_square());
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.n);
        for (row, col, v) in self.triplets().filter(|&(row, col, _)| row <= col) {
            y[row] += a * v * x[col];
            if row != col {
                y[col] += a * v * x[row];
            }
        }
    }

    fn quad_form(&self, x: &[T]) -> T {
        assert!(self.is_square());
        assert_eq!(x.len(), self.n);
        self.triplets()
            .fold(T::zero(), |acc, (row, col, v)| acc + x[row] * v * x[col])
    }
}
