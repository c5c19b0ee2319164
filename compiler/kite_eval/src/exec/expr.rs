//! Expression evaluation.

use crate::escape::decode_escapes;
use crate::interpreter::Interpreter;
use crate::operators::{evaluate_binary, evaluate_unary, Promote};
use kite_ir::ast::{BinaryOp, ExprKind, FieldRange};
use kite_ir::{ExprId, FunctionId};
use kite_stack::ensure_sufficient_stack;
use kite_value::{
    ArrayValue, EvalResult, ParamSpec, Prototype, Signature, StructValue, Symbol, UserFunction,
    Value,
};
use std::borrow::Cow;

impl Interpreter {
    /// Evaluate an expression. Fatal errors raised inside pick up this
    /// node's location unless a deeper node already supplied one.
    pub(crate) fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id)).map_err(|action| {
            action.with_location_if_missing(|| self.location(self.arena.expr(id).span))
        })
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> EvalResult {
        let expr = *self.arena.expr(id);
        match expr.kind {
            ExprKind::Void => Ok(Value::Void),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Int(n) => Ok(Value::Int(n)),
            ExprKind::Float(f) => Ok(Value::Float(f)),
            ExprKind::Str(raw) => {
                let bytes = decode_escapes(self.name(raw).as_bytes())?;
                Ok(Value::Str(bytes.into_owned()))
            }
            ExprKind::File => Ok(Value::string(self.name(self.arena.source().file()))),
            ExprKind::Line => Ok(Value::Int(i64::from(self.arena.source().line(expr.span)))),
            ExprKind::Ident(name) => Ok(self.env.read(self.name(name))),

            ExprKind::ArrayLit(fields) => self.eval_array_literal(fields),
            ExprKind::StructLit(fields) => self.eval_struct_literal(fields),

            ExprKind::Index { base, key, .. } => match self.resolve_place(id)? {
                Some(place) => Ok(self.read_place(&place)),
                None => {
                    let base = self.eval_expr(base)?;
                    let key = self.eval_expr(key)?;
                    Ok(lookup_index(&base, &key).map_or(Value::Void, Cow::into_owned))
                }
            },

            ExprKind::Assign { target, op, value } => self.eval_assign(target, op, value),
            ExprKind::Update { op, prefix, target } => self.eval_update(op, prefix, target),

            ExprKind::Cast { ty, expr } => Ok(self.eval_expr(expr)?.into_cast(ty)?),

            ExprKind::Binary {
                op: BinaryOp::And,
                left,
                right,
            } => {
                let holds = self.eval_expr(left)?.to_bool() && self.eval_expr(right)?.to_bool();
                Ok(Value::Bool(holds))
            }
            ExprKind::Binary {
                op: BinaryOp::Or,
                left,
                right,
            } => {
                let holds = self.eval_expr(left)?.to_bool() || self.eval_expr(right)?.to_bool();
                Ok(Value::Bool(holds))
            }
            ExprKind::Binary { op, left, right } => {
                let promote = Promote::for_operands(
                    self.arena.expr(left).kind.is_literal(),
                    self.arena.expr(right).kind.is_literal(),
                );
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                Ok(evaluate_binary(op, left, right, promote)?)
            }
            ExprKind::Unary { op, operand } => Ok(evaluate_unary(op, &self.eval_expr(operand)?)),

            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.eval_expr(cond)?.to_bool() {
                    self.eval_expr(then_expr)
                } else {
                    self.eval_expr(else_expr)
                }
            }

            // Only meaningful as a call argument; elsewhere it is the value.
            ExprKind::Reference(inner) => self.eval_expr(inner),

            ExprKind::Lambda(function) => Ok(Value::Function(self.lambda(function))),

            ExprKind::Call { callee, args } => self.eval_call(callee, args),
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => self.eval_method_call(receiver, method, args),
            ExprKind::New { class, args } => self.eval_new(class, args),
            ExprKind::StaticCall {
                class,
                member,
                args,
            } => self.eval_static_call(class, member, args),
            ExprKind::StaticField { class, member } => self.eval_static_field(class, member),
        }
    }

    /// `[a, "k": b]`. Integer keys address positions; other keys are
    /// string keys.
    fn eval_array_literal(&mut self, fields: FieldRange) -> EvalResult {
        let arena = self.arena.clone();
        let entries = arena.fields(fields);
        let mut array = ArrayValue::with_capacity(entries.len());
        for entry in entries {
            let key = entry.key.map(|key| self.eval_expr(key)).transpose()?;
            let value = self.eval_expr(entry.value)?;
            match key {
                None => array.push(value),
                Some(Value::Int(index)) => {
                    array.set(index, value)?;
                }
                Some(key) => array.push_keyed(key.to_bytes(), value),
            }
        }
        Ok(Value::Array(array))
    }

    /// `{ x: 1, "y": 2 }`. Function values become methods.
    fn eval_struct_literal(&mut self, fields: FieldRange) -> EvalResult {
        let arena = self.arena.clone();
        let mut object = StructValue::new();
        for entry in arena.fields(fields) {
            let key = match entry.key {
                Some(key) => self.eval_expr(key)?,
                None => Value::Void,
            };
            let name = member_name(&key);
            match self.eval_expr(entry.value)? {
                Value::Function(sig) => object.set_method(&name, sig),
                value => object.set_field(&name, value),
            }
        }
        Ok(Value::Struct(object))
    }

    /// Function value for a lambda, named `{lambda#N}`.
    fn lambda(&mut self, function: FunctionId) -> Signature {
        self.lambda_count += 1;
        let name = format!("{{lambda#{}}}", self.lambda_count);
        self.user_signature(name, function)
    }

    /// Signature of a script function: declared types coerce, `...` adds
    /// a repeating any-type slot.
    pub(crate) fn user_signature(&self, name: String, function: FunctionId) -> Signature {
        let decl = *self.arena.function(function);
        let params = self.arena.params(decl.params);
        let mut specs: Vec<_> = params
            .iter()
            .map(|param| ParamSpec::declared(param.ty))
            .collect();
        if decl.variadic {
            specs.push(ParamSpec::Any);
        }
        Signature::user(
            name,
            UserFunction {
                arena: self.arena.clone(),
                decl: function,
            },
            params.len(),
            Prototype::new(specs, decl.variadic),
            ParamSpec::declared(decl.return_ty),
        )
    }
}

/// Struct member name for a key value.
pub(crate) fn member_name(key: &Value) -> String {
    match key {
        Value::Str(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        other => String::from_utf8_lossy(&other.to_bytes()).into_owned(),
    }
}

/// Read `base[key]` without copying the base.
///
/// Arrays take integer positions (negative from the end) or string keys;
/// structs take member names; strings take integer positions and yield a
/// one-byte string. Anything else is absent.
pub(crate) fn lookup_index<'a>(base: &'a Value, key: &Value) -> Option<Cow<'a, Value>> {
    match base {
        Value::Array(array) => {
            let slot = match key {
                Value::Str(name) => array.get_key(name),
                Value::Int(_) | Value::Float(_) | Value::Bool(_) => array.get(key.to_int()),
                _ => None,
            };
            slot.map(Cow::Borrowed)
        }
        Value::Struct(object) => match object.members().lookup(&member_name(key))? {
            Symbol::Variable(value) => Some(Cow::Borrowed(value)),
            Symbol::Function(sig) => Some(Cow::Owned(Value::Function(sig.clone()))),
            Symbol::Class(_) => None,
        },
        Value::Str(bytes) => {
            let index = match key {
                Value::Int(_) | Value::Float(_) | Value::Bool(_) => key.to_int(),
                _ => return None,
            };
            let len = i64::try_from(bytes.len()).ok()?;
            let pos = if index < 0 { index + len } else { index };
            let byte = usize::try_from(pos).ok().and_then(|pos| bytes.get(pos))?;
            Some(Cow::Owned(Value::Str(vec![*byte])))
        }
        _ => None,
    }
}
