use super::LsError;
use crate::problem::{Constraint, Expression, Objective, Variable, VariableId};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
struct VarSlot {
    var: Variable,
    offset: usize,
}

/// Variable offset map.
///
/// Assigns every variable a contiguous block of the flattened unknown
/// `x` of length [`x_length`](SymData::x_length).  Blocks are laid out
/// without gaps in the order the variables were first seen.
///
/// ```
/// use eqkkt::problem::Variable;
/// use eqkkt::solver::SymData;
///
/// let x = Variable::new((2, 3));
/// let y = Variable::scalar();
/// let symdata = SymData::new(&[x.clone(), y.clone(), x.clone()]).unwrap();
///
/// assert_eq!(symdata.x_length(), 7);
/// assert_eq!(symdata.slot(x.id()), Some((0, 6)));
/// assert_eq!(symdata.slot(y.id()), Some((6, 1)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SymData {
    slots: IndexMap<VariableId, VarSlot>,
    x_length: usize,
}

impl SymData {
    /// Builds the offset map from a list of variables.  Repeated
    /// variables are skipped, but a repeated id with a different
    /// shape or kind is rejected.
    pub fn new(variables: &[Variable]) -> Result<Self, LsError> {
        let mut slots: IndexMap<VariableId, VarSlot> = IndexMap::with_capacity(variables.len());
        let mut offset = 0;

        for var in variables {
            if let Some(slot) = slots.get(&var.id()) {
                if slot.var.shape() != var.shape() || slot.var.kind() != var.kind() {
                    return Err(LsError::InconsistentVariable { id: var.id() });
                }
                continue;
            }
            slots.insert(
                var.id(),
                VarSlot {
                    var: var.clone(),
                    offset,
                },
            );
            offset += var.size();
        }

        Ok(Self {
            slots,
            x_length: offset,
        })
    }

    /// Offset map over the objective variables followed by the
    /// variables of each constraint in turn
    pub fn from_problem<O, E>(
        objective: &Objective<O>,
        constraints: &[Constraint<E>],
    ) -> Result<Self, LsError>
    where
        O: Expression,
        E: Expression,
    {
        let mut vars = objective.variables();
        for c in constraints {
            vars.extend(c.variables());
        }
        Self::new(&vars)
    }

    /// Total length `N` of the flattened unknown
    pub fn x_length(&self) -> usize {
        self.x_length
    }

    /// Number of distinct variables
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(offset, size)` of the block owned by a variable
    pub fn slot(&self, id: VariableId) -> Option<(usize, usize)> {
        self.slots.get(&id).map(|s| (s.offset, s.var.size()))
    }

    pub fn offset(&self, id: VariableId) -> Option<usize> {
        self.slots.get(&id).map(|s| s.offset)
    }

    pub fn size(&self, id: VariableId) -> Option<usize> {
        self.slots.get(&id).map(|s| s.var.size())
    }

    pub fn shape(&self, id: VariableId) -> Option<(usize, usize)> {
        self.slots.get(&id).map(|s| s.var.shape())
    }

    /// Variables in offset order
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.slots.values().map(|s| &s.var)
    }

    /// The part of a flattened vector owned by a variable
    pub fn extract<'a, T>(&self, id: VariableId, x: &'a [T]) -> Option<&'a [T]> {
        let (offset, size) = self.slot(id)?;
        x.get(offset..offset + size)
    }
}
