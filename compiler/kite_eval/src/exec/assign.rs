//! Assignment places.
//!
//! A place is a root name plus a path of evaluated keys. Reads walk the path
//! by reference; writes walk it mutably, turning any slot that is not a
//! container into one (`[key]` makes an Array, `.field` a Struct).

use super::expr::{lookup_index, member_name};
use crate::interpreter::Interpreter;
use crate::operators::{evaluate_binary, step, Promote};
use kite_ir::ast::{Access, BinaryOp, ExprKind, UpdateOp};
use kite_ir::ExprId;
use kite_value::{
    ArrayValue, ControlAction, EvalError, EvalResult, ExecResult, StructValue, Symbol, Value,
};
use smallvec::SmallVec;
use std::borrow::Cow;

#[derive(Clone, Debug)]
pub(crate) struct PathSegment {
    pub(crate) key: Value,
    pub(crate) access: Access,
}

/// A resolved lvalue.
#[derive(Clone, Debug)]
pub(crate) struct Place {
    pub(crate) root: &'static str,
    pub(crate) path: SmallVec<[PathSegment; 2]>,
}

impl Interpreter {
    /// Resolve `id` to a place, evaluating its keys left to right.
    ///
    /// `None` if the expression is not a name or an index chain rooted at
    /// a name.
    pub(crate) fn resolve_place(&mut self, id: ExprId) -> Result<Option<Place>, ControlAction> {
        let kind = self.arena.expr(id).kind;
        match kind {
            ExprKind::Ident(name) => Ok(Some(Place {
                root: self.name(name),
                path: SmallVec::new(),
            })),
            ExprKind::Index { base, key, access } => {
                let Some(mut place) = self.resolve_place(base)? else {
                    return Ok(None);
                };
                let key = self.eval_expr(key)?;
                place.path.push(PathSegment { key, access });
                Ok(Some(place))
            }
            _ => Ok(None),
        }
    }

    /// Current value at `place`, or `Void` where the path runs out.
    pub(crate) fn read_place(&self, place: &Place) -> Value {
        let mut current: Cow<'_, Value> = match self.env.lookup(place.root) {
            Some(Symbol::Variable(value)) => Cow::Borrowed(value),
            Some(Symbol::Function(sig)) => Cow::Owned(Value::Function(sig.clone())),
            Some(Symbol::Class(_)) | None => return Value::Void,
        };
        for segment in &place.path {
            let next = match current {
                Cow::Borrowed(value) => lookup_index(value, &segment.key),
                Cow::Owned(value) => {
                    lookup_index(&value, &segment.key).map(|child| Cow::Owned(child.into_owned()))
                }
            };
            match next {
                Some(next) => current = next,
                None => return Value::Void,
            }
        }
        current.into_owned()
    }

    /// Store `value` at `place` in the current scope.
    ///
    /// Fails only when padding an array out to an index cannot be
    /// allocated.
    pub(crate) fn write_place(&mut self, place: &Place, value: Value) -> ExecResult {
        let Some((last, parents)) = place.path.split_last() else {
            self.bind_name(place.root, value);
            return Ok(());
        };
        let Some(mut slot) = self.local_root(place.root) else {
            return Ok(());
        };
        for segment in parents {
            match child_slot(slot, segment)? {
                Some(child) => slot = child,
                None => return Ok(()),
            }
        }
        assign_slot(slot, last, value)?;
        Ok(())
    }

    /// Mutable root variable in the current scope, seeded from the value the
    /// name reads as when it is not bound here.
    fn local_root(&mut self, root: &str) -> Option<&mut Value> {
        if !matches!(self.env.current().lookup(root), Some(Symbol::Variable(_))) {
            let seed = self.env.read(root);
            self.env.current_mut().add_variable(root, seed);
        }
        self.env.current_mut().variable_mut(root)
    }

    /// Bind `name` in the current scope. Function values become function
    /// bindings.
    pub(crate) fn bind_name(&mut self, name: &str, value: Value) {
        let scope = self.env.current_mut();
        match value {
            Value::Function(sig) => scope.add_function(name, sig),
            other => scope.add_variable(name, other),
        }
    }

    /// `target = value` and `target op= value`.
    pub(crate) fn eval_assign(
        &mut self,
        target: ExprId,
        op: Option<BinaryOp>,
        value: ExprId,
    ) -> EvalResult {
        let rhs = self.eval_expr(value)?;
        let Some(place) = self.resolve_place(target)? else {
            return Ok(rhs);
        };
        let result = match op {
            None => rhs,
            Some(op) => evaluate_binary(op, self.read_place(&place), rhs, Promote::Right)?,
        };
        self.write_place(&place, result.clone())?;
        Ok(result)
    }

    /// `++x`, `x++`, `--x`, `x--`.
    pub(crate) fn eval_update(&mut self, op: UpdateOp, prefix: bool, target: ExprId) -> EvalResult {
        match self.resolve_place(target)? {
            Some(place) => {
                let (result, stored) = step(op, prefix, &self.read_place(&place));
                self.write_place(&place, stored)?;
                Ok(result)
            }
            None => {
                let current = self.eval_expr(target)?;
                Ok(step(op, prefix, &current).0)
            }
        }
    }
}

/// Replace `slot` with an empty container unless it already is one.
fn vivify(slot: &mut Value, access: Access) {
    if matches!(slot, Value::Array(_) | Value::Struct(_)) {
        return;
    }
    *slot = match access {
        Access::Element => Value::Array(ArrayValue::new()),
        Access::Field => Value::Struct(StructValue::new()),
    };
}

fn child_slot<'a>(
    slot: &'a mut Value,
    segment: &PathSegment,
) -> Result<Option<&'a mut Value>, EvalError> {
    vivify(slot, segment.access);
    match slot {
        Value::Array(array) => array_slot(array, &segment.key),
        Value::Struct(object) => {
            let name = member_name(&segment.key);
            if !matches!(object.members().lookup(&name), Some(Symbol::Variable(_))) {
                object.set_field(&name, Value::Void);
            }
            Ok(object.field_mut(&name))
        }
        _ => Ok(None),
    }
}

fn array_slot<'a>(
    array: &'a mut ArrayValue,
    key: &Value,
) -> Result<Option<&'a mut Value>, EvalError> {
    match key {
        Value::Int(_) | Value::Float(_) | Value::Bool(_) => array.slot(key.to_int()),
        Value::Str(name) => Ok(Some(array.key_slot(name))),
        other => Ok(Some(array.key_slot(&other.to_bytes()))),
    }
}

fn assign_slot(slot: &mut Value, segment: &PathSegment, value: Value) -> Result<(), EvalError> {
    vivify(slot, segment.access);
    match slot {
        Value::Struct(object) => {
            let name = member_name(&segment.key);
            match value {
                Value::Function(sig) => object.set_method(&name, sig),
                other => object.set_field(&name, other),
            }
        }
        Value::Array(array) => {
            if let Some(target) = array_slot(array, &segment.key)? {
                *target = value;
            }
        }
        _ => {}
    }
    Ok(())
}
