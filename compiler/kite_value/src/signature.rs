//! Callable signatures and prototype strings.
//!
//! A prototype has one letter per parameter drawn from `v b i f s a t c r ?`
//! (void, bool, int, float, string, array, struct, callable, resource, any).
//! Lowercase letters demand an exact type, uppercase letters coerce, and a
//! trailing `*` repeats the last spec for any further arguments.

use crate::errors::EvalResult;
use crate::host::CallHost;
use crate::value::Value;
use kite_ir::{FunctionId, SharedArena, TypeTag};
use std::fmt;

/// Native function entry point. Arguments arrive already checked against
/// the prototype; the slice is written back for `&` arguments.
pub type NativeFn = fn(&mut dyn CallHost, &mut [Value]) -> EvalResult;

/// How one argument (or the return value) is checked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamSpec {
    Any,
    Exact(TypeTag),
    Coerce(TypeTag),
}

impl ParamSpec {
    pub fn from_letter(letter: char) -> Option<ParamSpec> {
        if letter == '?' {
            return Some(ParamSpec::Any);
        }
        let tag = TypeTag::from_letter(letter)?;
        Some(if letter.is_ascii_uppercase() {
            ParamSpec::Coerce(tag)
        } else {
            ParamSpec::Exact(tag)
        })
    }

    pub fn letter(self) -> char {
        match self {
            ParamSpec::Any => '?',
            ParamSpec::Exact(tag) => tag.letter(),
            ParamSpec::Coerce(tag) => tag.letter().to_ascii_uppercase(),
        }
    }

    /// Spec for a declared parameter or return type: typed slots coerce.
    pub fn declared(ty: Option<TypeTag>) -> ParamSpec {
        ty.map_or(ParamSpec::Any, ParamSpec::Coerce)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrototypeError {
    UnknownLetter(char),
    /// `*` somewhere other than after the last letter.
    MisplacedRepeat,
    ArityExceedsPrototype { min_arity: usize, len: usize },
}

impl fmt::Display for PrototypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLetter(c) => write!(f, "unknown prototype letter '{c}'"),
            Self::MisplacedRepeat => {
                write!(f, "'*' must follow the last parameter letter")
            }
            Self::ArityExceedsPrototype { min_arity, len } => write!(
                f,
                "minimum arity {min_arity} exceeds the {len} declared parameters"
            ),
        }
    }
}

impl std::error::Error for PrototypeError {}

/// Parsed parameter list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prototype {
    params: Vec<ParamSpec>,
    repeat: bool,
}

impl Prototype {
    pub fn new(params: Vec<ParamSpec>, repeat: bool) -> Self {
        Prototype { params, repeat }
    }

    pub fn parse(text: &str) -> Result<Prototype, PrototypeError> {
        let mut params = Vec::with_capacity(text.len());
        let mut repeat = false;
        for c in text.chars() {
            if repeat {
                return Err(PrototypeError::MisplacedRepeat);
            }
            if c == '*' {
                if params.is_empty() {
                    return Err(PrototypeError::MisplacedRepeat);
                }
                repeat = true;
                continue;
            }
            params.push(ParamSpec::from_letter(c).ok_or(PrototypeError::UnknownLetter(c))?);
        }
        Ok(Prototype { params, repeat })
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Number of declared positions, not counting repeats.
    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether the last spec repeats for extra arguments.
    #[inline]
    pub fn repeats(&self) -> bool {
        self.repeat
    }

    /// Spec governing argument `index`, or `None` if the call has too many
    /// arguments.
    pub fn spec_for(&self, index: usize) -> Option<ParamSpec> {
        match self.params.get(index) {
            Some(spec) => Some(*spec),
            None if self.repeat => self.params.last().copied(),
            None => None,
        }
    }
}

impl fmt::Display for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for spec in &self.params {
            write!(f, "{}", spec.letter())?;
        }
        if self.repeat {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Body of a script-defined function.
#[derive(Clone)]
pub struct UserFunction {
    /// Arena holding the declaration; kept alive by every signature copy.
    pub arena: SharedArena,
    pub decl: FunctionId,
}

#[derive(Clone)]
pub enum SignatureKind {
    Native(NativeFn),
    User(UserFunction),
}

/// A callable: native or user, with its argument and return contract.
#[derive(Clone)]
pub struct Signature {
    name: String,
    kind: SignatureKind,
    min_arity: usize,
    prototype: Prototype,
    returns: ParamSpec,
}

impl Signature {
    /// Native signature from a prototype string and a return letter.
    pub fn native(
        name: impl Into<String>,
        function: NativeFn,
        min_arity: usize,
        prototype: &str,
        returns: char,
    ) -> Result<Signature, PrototypeError> {
        let prototype = Prototype::parse(prototype)?;
        if min_arity > prototype.len() && !prototype.repeats() {
            return Err(PrototypeError::ArityExceedsPrototype {
                min_arity,
                len: prototype.len(),
            });
        }
        let returns = ParamSpec::from_letter(returns).ok_or(PrototypeError::UnknownLetter(returns))?;
        Ok(Signature {
            name: name.into(),
            kind: SignatureKind::Native(function),
            min_arity,
            prototype,
            returns,
        })
    }

    pub fn user(
        name: impl Into<String>,
        function: UserFunction,
        min_arity: usize,
        prototype: Prototype,
        returns: ParamSpec,
    ) -> Signature {
        Signature {
            name: name.into(),
            kind: SignatureKind::User(function),
            min_arity,
            prototype,
            returns,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &SignatureKind {
        &self.kind
    }

    #[inline]
    pub fn min_arity(&self) -> usize {
        self.min_arity
    }

    #[inline]
    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    #[inline]
    pub fn returns(&self) -> ParamSpec {
        self.returns
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, SignatureKind::Native(_))
    }
}

/// Identity: same name and same native entry point or user declaration.
impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && match (&self.kind, &other.kind) {
                (SignatureKind::Native(a), SignatureKind::Native(b)) => *a as usize == *b as usize,
                (SignatureKind::User(a), SignatureKind::User(b)) => {
                    a.decl == b.decl && a.arena.ptr_eq(&b.arena)
                }
                _ => false,
            }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_native() { "native" } else { "user" };
        write!(
            f,
            "Signature({kind} {}({}) -> {}, min {})",
            self.name,
            self.prototype,
            self.returns.letter(),
            self.min_arity
        )
    }
}

#[cfg(test)]
mod tests;
