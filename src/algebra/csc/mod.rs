// CscMatrix itself is declared in matrix_types.rs.  The modules
// here only add inherent and trait impls.

mod core;
mod matrix_math;
mod stack;
