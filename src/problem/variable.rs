use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_VARIABLE_ID: AtomicUsize = AtomicUsize::new(0);

/// Unique identifier of a decision variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl VariableId {
    fn next() -> Self {
        VariableId(NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "var{}", self.0)
    }
}

/// Structural kind of a decision variable.
///
/// Only [`Plain`](VariableKind::Plain) and
/// [`SymmetricUpperTri`](VariableKind::SymmetricUpperTri) variables
/// can be handled by a KKT solve.  The remaining kinds need integer
/// or conic machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Dense, unstructured real variable
    Plain,
    /// Symmetric matrix variable parameterised by its upper triangle
    SymmetricUpperTri,
    /// Boolean valued variable
    Boolean,
    /// Integer valued variable
    Integer,
    /// Positive semidefinite matrix variable
    Psd,
}

impl VariableKind {
    /// True for the kinds a KKT based solve supports
    pub fn is_ls_compatible(&self) -> bool {
        matches!(self, VariableKind::Plain | VariableKind::SymmetricUpperTri)
    }
}

/// Sign restriction attached to a variable at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Nonnegative,
    Nonpositive,
}

/// A decision variable.
///
/// Each variable owns a contiguous block of the flattened unknown.  The
/// block length is `rows*cols`, except for symmetric variables stored by
/// their upper triangle, which use `n(n+1)/2` entries.
///
/// ```
/// use eqkkt::problem::{Variable, VariableKind};
///
/// let x = Variable::new((3, 2));
/// assert_eq!(x.size(), 6);
///
/// let s = Variable::symmetric(3);
/// assert_eq!(s.size(), 6);
/// assert_eq!(s.kind(), VariableKind::SymmetricUpperTri);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    id: VariableId,
    shape: (usize, usize),
    kind: VariableKind,
    domain: Option<Domain>,
}

impl Variable {
    /// New plain variable of the given (rows, cols) shape
    pub fn new(shape: (usize, usize)) -> Self {
        Self::with_id(VariableId::next(), shape, VariableKind::Plain, None)
    }

    /// New plain column vector variable
    pub fn vector(n: usize) -> Self {
        Self::new((n, 1))
    }

    /// New plain scalar variable
    pub fn scalar() -> Self {
        Self::new((1, 1))
    }

    /// New symmetric `n x n` variable stored by its upper triangle
    pub fn symmetric(n: usize) -> Self {
        Self::with_id(
            VariableId::next(),
            (n, n),
            VariableKind::SymmetricUpperTri,
            None,
        )
    }

    /// Builds a variable from explicit parts, e.g. when re-creating
    /// variables known to another part of a modeling system.  Callers
    /// are responsible for keeping ids unique.
    pub fn with_id(
        id: VariableId,
        shape: (usize, usize),
        kind: VariableKind,
        domain: Option<Domain>,
    ) -> Self {
        if kind == VariableKind::SymmetricUpperTri || kind == VariableKind::Psd {
            assert_eq!(shape.0, shape.1, "matrix variable must be square");
        }
        Variable {
            id,
            shape,
            kind,
            domain,
        }
    }

    /// Same variable with a different kind
    pub fn with_kind(self, kind: VariableKind) -> Self {
        Self::with_id(self.id, self.shape, kind, self.domain)
    }

    /// Same variable with a sign restriction
    pub fn with_domain(self, domain: Domain) -> Self {
        Self::with_id(self.id, self.shape, self.kind, Some(domain))
    }

    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn shape(&self) -> (usize, usize) {
        self.shape
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// Number of entries of the flattened unknown owned by this variable
    pub fn size(&self) -> usize {
        let (m, n) = self.shape;
        match self.kind {
            VariableKind::SymmetricUpperTri => n * (n + 1) / 2,
            _ => m * n,
        }
    }
}

#[test]
fn test_variable_ids_unique() {
    let x = Variable::vector(3);
    let y = Variable::vector(3);
    assert_ne!(x.id(), y.id());
    assert_eq!(x.clone(), x);

    let z = x.clone().with_kind(VariableKind::Integer);
    assert_eq!(z.id(), x.id());
    assert_ne!(z, x);
}

#[test]
fn test_kind_compatibility() {
    assert!(VariableKind::Plain.is_ls_compatible());
    assert!(VariableKind::SymmetricUpperTri.is_ls_compatible());
    assert!(!VariableKind::Boolean.is_ls_compatible());
    assert!(!VariableKind::Integer.is_ls_compatible());
    assert!(!VariableKind::Psd.is_ls_compatible());
}
