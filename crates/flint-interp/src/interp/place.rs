// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Places: the locations that assignment, swap and move act on.

use flint_ast::expr::{Expr, ExprKind};
use flint_ast::NodeId;
use flint_types::Resolution;
use num_bigint::BigInt;

use crate::value::Value;

use super::{Interpreter, RuntimeDiagnostic, RuntimeError};

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Root {
    Local(NodeId),
    Global(String),
    /// `self` in the current frame.
    Receiver,
    Storage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Step {
    Field(String),
    Index(usize),
}

/// A root followed by field and index steps. References are resolved while
/// the place is built, so a place never passes through one.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Place {
    pub root: Root,
    pub steps: Vec<Step>,
}

impl Place {
    pub(super) fn new(root: Root) -> Self {
        Self { root, steps: Vec::new() }
    }

    fn storage_slot(&self) -> Option<&str> {
        match &self.root {
            Root::Storage(slot) => Some(slot),
            _ => None,
        }
    }
}

static NIL: Value = Value::Nil;

fn navigate<'v>(mut value: &'v Value, steps: &[Step], place: &Place) -> Result<&'v Value, RuntimeError> {
    for step in steps {
        value = step_into(value, step, place)?;
    }
    Ok(value)
}

fn step_into<'v>(value: &'v Value, step: &Step, place: &Place) -> Result<&'v Value, RuntimeError> {
    match (value, step) {
        (Value::Composite { fields, .. }, Step::Field(name)) => fields
            .get(name)
            .ok_or_else(|| RuntimeError::UninitializedField { field: name.clone() }),
        (Value::Array(items), Step::Index(i)) => items.get(*i).ok_or_else(|| RuntimeError::IndexOutOfBounds {
            index: i.to_string(),
            len: items.len(),
        }),
        (other, _) => Err(not_a_container(other, place)),
    }
}

fn step_into_mut<'v>(value: &'v mut Value, step: &Step, place: &Place) -> Result<&'v mut Value, RuntimeError> {
    match (value, step) {
        (Value::Composite { fields, .. }, Step::Field(name)) => fields
            .get_mut(name)
            .ok_or_else(|| RuntimeError::UninitializedField { field: name.clone() }),
        (Value::Array(items), Step::Index(i)) => {
            let len = items.len();
            items.get_mut(*i).ok_or_else(|| RuntimeError::IndexOutOfBounds {
                index: i.to_string(),
                len,
            })
        }
        (other, _) => Err(not_a_container(other, place)),
    }
}

fn not_a_container(value: &Value, place: &Place) -> RuntimeError {
    match (value, place.storage_slot()) {
        (Value::Nil, Some(slot)) => RuntimeError::DanglingReference { slot: slot.to_string() },
        (Value::Invalidated, _) => RuntimeError::InvalidatedValue,
        (other, _) => RuntimeError::TypeError(format!("cannot access a member of {}", other.type_name())),
    }
}

/// Convert an evaluated index operand.
pub(super) fn to_index(value: &Value, len: usize) -> Result<usize, RuntimeError> {
    let Value::Integer(n) = value else {
        return Err(RuntimeError::TypeError(format!("cannot index with {}", value.type_name())));
    };
    let n: BigInt = n.to_bigint();
    match usize::try_from(&n) {
        Ok(i) if i < len => Ok(i),
        _ => Err(RuntimeError::IndexOutOfBounds {
            index: n.to_string(),
            len,
        }),
    }
}

impl<'p> Interpreter<'p> {
    /// The storage key of a `storage[T]` expression: the rendered slot type.
    pub(super) fn storage_key(&self, expr: &Expr) -> String {
        let typed = self.typed();
        let ty = typed.type_of(expr.id);
        let slot = ty.unwrap_optional().unwrap_or(ty);
        typed.types.display(slot)
    }

    /// Resolve an expression to a place, or `None` for temporaries.
    pub(super) fn place(&mut self, expr: &Expr) -> Result<Option<Place>, RuntimeDiagnostic> {
        let place = match &expr.kind {
            ExprKind::Ident(_) => match self.typed().resolutions.get(&expr.id) {
                Some(Resolution::Local(id)) => Place::new(Root::Local(*id)),
                Some(Resolution::Global(name)) => Place::new(Root::Global(name.clone())),
                _ => return Ok(None),
            },
            ExprKind::SelfRef => Place::new(Root::Receiver),
            ExprKind::StorageIndex(_) => Place::new(Root::Storage(self.storage_key(expr))),
            ExprKind::Field { object, field } => {
                let Some(base) = self.place(object)? else { return Ok(None) };
                let mut base = self.follow_reference(base).map_err(|e| RuntimeDiagnostic::new(e, object.span))?;
                base.steps.push(Step::Field(field.clone()));
                base
            }
            ExprKind::Index { object, index } => {
                let Some(base) = self.place(object)? else { return Ok(None) };
                let mut base = self.follow_reference(base).map_err(|e| RuntimeDiagnostic::new(e, object.span))?;
                let index_value = self.eval_expr(index)?;
                let len = match self.slot(&base) {
                    Ok(Value::Array(items)) => items.len(),
                    Ok(other) => return Err(RuntimeDiagnostic::new(not_a_container(other, &base), object.span)),
                    Err(e) => return Err(RuntimeDiagnostic::new(e, object.span)),
                };
                let i = to_index(&index_value, len).map_err(|e| RuntimeDiagnostic::new(e, index.span))?;
                base.steps.push(Step::Index(i));
                base
            }
            _ => return Ok(None),
        };
        Ok(Some(place))
    }

    /// A place holding a reference stands for the storage slot it refers to.
    pub(super) fn follow_reference(&self, place: Place) -> Result<Place, RuntimeError> {
        match self.slot(&place)? {
            Value::Reference(slot) => Ok(Place::new(Root::Storage(slot.clone()))),
            _ => Ok(place),
        }
    }

    fn root(&self, root: &Root) -> Result<&Value, RuntimeError> {
        match root {
            Root::Local(id) => self
                .frame()
                .and_then(|frame| frame.env.get(*id))
                .ok_or(RuntimeError::InvalidatedValue),
            Root::Global(name) => self.globals.get(name).ok_or(RuntimeError::InvalidatedValue),
            Root::Receiver => self
                .frame()
                .and_then(|frame| frame.receiver.as_ref())
                .ok_or(RuntimeError::InvalidatedValue),
            Root::Storage(slot) => Ok(self.storage.get(slot).unwrap_or(&NIL)),
        }
    }

    fn root_mut(&mut self, root: &Root) -> Result<&mut Value, RuntimeError> {
        match root {
            Root::Local(id) => self
                .frame_mut()
                .and_then(|frame| frame.env.get_mut(*id))
                .ok_or(RuntimeError::InvalidatedValue),
            Root::Global(name) => self.globals.get_mut(name).ok_or(RuntimeError::InvalidatedValue),
            Root::Receiver => self
                .frame_mut()
                .and_then(|frame| frame.receiver.as_mut())
                .ok_or(RuntimeError::InvalidatedValue),
            Root::Storage(slot) => Ok(self.storage.slot_mut(slot)),
        }
    }

    /// The value at a place, without checking it.
    pub(super) fn slot(&self, place: &Place) -> Result<&Value, RuntimeError> {
        navigate(self.root(&place.root)?, &place.steps, place)
    }

    fn slot_mut(&mut self, place: &Place) -> Result<&mut Value, RuntimeError> {
        let mut value = self.root_mut(&place.root)?;
        for step in &place.steps {
            value = step_into_mut(value, step, place)?;
        }
        Ok(value)
    }

    pub(super) fn read_place(&self, place: &Place) -> Result<Value, RuntimeError> {
        match self.slot(place)? {
            Value::Invalidated => Err(RuntimeError::InvalidatedValue),
            value => Ok(value.clone()),
        }
    }

    /// Move the value out, leaving the place invalidated.
    pub(super) fn take_place(&mut self, place: &Place) -> Result<Value, RuntimeError> {
        let slot = self.slot_mut(place)?;
        match std::mem::replace(slot, Value::Invalidated) {
            Value::Invalidated => Err(RuntimeError::InvalidatedValue),
            value => Ok(value),
        }
    }

    /// Store into a place. The last field step may name a field that is not
    /// yet initialized.
    pub(super) fn write_place(&mut self, place: &Place, value: Value) -> Result<(), RuntimeError> {
        if let (Some(slot), true) = (place.storage_slot(), place.steps.is_empty()) {
            let occupied = self.storage.get(slot).is_some_and(Value::holds_resource);
            if occupied && value.holds_resource() {
                return Err(RuntimeError::DuplicateResource { slot: slot.to_string() });
            }
            tracing::trace!(slot, "storage write");
        }

        let Some((last, parents)) = place.steps.split_last() else {
            *self.root_mut(&place.root)? = value;
            return Ok(());
        };
        let mut parent = self.root_mut(&place.root)?;
        for step in parents {
            parent = step_into_mut(parent, step, place)?;
        }
        match (parent, last) {
            (Value::Composite { fields, .. }, Step::Field(name)) => {
                fields.insert(name.clone(), value);
                Ok(())
            }
            (parent, step) => {
                *step_into_mut(parent, step, place)? = value;
                Ok(())
            }
        }
    }

    /// Exchange the contents of two places.
    pub(super) fn swap_places(&mut self, left: &Place, right: &Place) -> Result<(), RuntimeError> {
        let a = self.take_place(left)?;
        let b = self.take_place(right)?;
        if left.storage_slot().is_some() || right.storage_slot().is_some() {
            tracing::trace!("storage swap");
        }
        *self.slot_mut(left)? = b;
        *self.slot_mut(right)? = a;
        Ok(())
    }
}
