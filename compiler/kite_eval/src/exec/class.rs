//! Classes: inheritance chains, flattened namespaces, `new` and `C::m`.
//!
//! A class has no stored member table. Each use builds one by running the
//! class bodies of its chain, root first, into a single fresh scope, so a
//! derived class's members replace its ancestors' of the same name.

use crate::interpreter::Interpreter;
use kite_ir::ast::ExprRange;
use kite_ir::Name;
use kite_value::{
    cyclic_inheritance, undefined_class, undefined_method, ClassDef, ClassKind, ControlAction,
    EvalError, EvalResult, StructValue, Symbol, SymbolTable, Value, CLASS_FIELD,
};

impl Interpreter {
    /// `new C(args)`
    pub(crate) fn eval_new(&mut self, class: Name, args: ExprRange) -> EvalResult {
        let (values, _) = self.eval_args(args)?;
        self.instantiate(self.name(class), values)
    }

    /// `C::member(args)`: call a member without `this`.
    pub(crate) fn eval_static_call(
        &mut self,
        class: Name,
        member: Name,
        args: ExprRange,
    ) -> EvalResult {
        let class = self.name(class);
        let member = self.name(member);
        let namespace = self.class_namespace(class)?;
        let sig = match namespace.lookup(member) {
            Some(Symbol::Function(sig) | Symbol::Variable(Value::Function(sig))) => sig.clone(),
            _ => return Err(undefined_method(class, member).into()),
        };
        let (values, refs) = self.eval_args(args)?;
        let out = self.invoke(&sig, values, None)?;
        self.write_back(refs, out.args)?;
        Ok(out.value)
    }

    /// `C::member`: a variable member, or `Void`.
    pub(crate) fn eval_static_field(&mut self, class: Name, member: Name) -> EvalResult {
        let namespace = self.class_namespace(self.name(class))?;
        Ok(namespace
            .variable(self.name(member))
            .cloned()
            .unwrap_or_default())
    }

    /// Create an instance of `class_name` and run its constructors.
    ///
    /// Constructors run root first. The most-derived one receives every
    /// argument; ancestors receive as many leading arguments as their
    /// prototype declares. A native constructor's returned struct is
    /// merged into the instance.
    #[tracing::instrument(level = "debug", skip_all, fields(class = class_name))]
    pub(crate) fn instantiate(&mut self, class_name: &str, mut args: Vec<Value>) -> EvalResult {
        let chain = self.class_chain(class_name)?;
        let mut object = StructValue::from_table(self.build_namespace(&chain)?);
        object.set_field(CLASS_FIELD, Value::string(class_name));
        let mut this = Value::Struct(object);

        let last = chain.len().saturating_sub(1);
        for (index, class) in chain.iter().enumerate() {
            let Some(ctor) = this.as_struct().and_then(|object| object.method(&class.name)).cloned()
            else {
                continue;
            };
            let ctor_args = if index == last {
                std::mem::take(&mut args)
            } else {
                args.iter().take(ctor.prototype().len()).cloned().collect()
            };
            let out = self.invoke(&ctor, ctor_args, Some(this.take()))?;
            this = out.this.unwrap_or_default();
            if ctor.is_native() {
                if let (Value::Struct(fields), Some(object)) = (&out.value, this.as_struct_mut()) {
                    object.merge_fields(fields);
                }
            }
        }
        Ok(this)
    }

    fn class_namespace(&mut self, class: &str) -> Result<SymbolTable, ControlAction> {
        let chain = self.class_chain(class)?;
        self.build_namespace(&chain)
    }

    /// `class` and its ancestors, root first.
    fn class_chain(&self, class: &str) -> Result<Vec<ClassDef>, EvalError> {
        let mut chain: Vec<ClassDef> = Vec::new();
        let mut next = Some(class.to_owned());
        while let Some(name) = next {
            if chain.iter().any(|seen| seen.name == name) {
                return Err(cyclic_inheritance(&name));
            }
            let def = match self.env.lookup(&name) {
                Some(Symbol::Class(def)) => def.clone(),
                _ => return Err(undefined_class(&name)),
            };
            next = def.parent.clone();
            chain.push(def);
        }
        chain.reverse();
        Ok(chain)
    }

    /// Run every class body of `chain` into one fresh scope and return it.
    fn build_namespace(&mut self, chain: &[ClassDef]) -> Result<SymbolTable, ControlAction> {
        let mut scoped = self.scoped(SymbolTable::new());
        for class in chain {
            match &class.kind {
                ClassKind::Native(ctor) => {
                    scoped.env.current_mut().add_function(&class.name, ctor.clone());
                }
                ClassKind::User { arena, decl } => {
                    let body = arena.class(*decl).body;
                    let outer = std::mem::replace(&mut scoped.arena, arena.clone());
                    let result = scoped.exec_block(body);
                    scoped.arena = outer;
                    match result {
                        Ok(())
                        | Err(ControlAction::Break | ControlAction::Continue | ControlAction::Return(_)) => {}
                        Err(other) => return Err(other),
                    }
                }
            }
        }
        Ok(scoped.finish())
    }
}
