//! The nine runtime value variants as a plain tag.

use std::fmt;

/// Variant tag of a runtime value.
///
/// Used for casts, typed declarations and the one-letter prototype codes of
/// call signatures.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeTag {
    Void,
    Bool,
    Int,
    Float,
    String,
    Array,
    Struct,
    Function,
    Resource,
}

impl TypeTag {
    pub const ALL: [TypeTag; 9] = [
        TypeTag::Void,
        TypeTag::Bool,
        TypeTag::Int,
        TypeTag::Float,
        TypeTag::String,
        TypeTag::Array,
        TypeTag::Struct,
        TypeTag::Function,
        TypeTag::Resource,
    ];

    /// Keyword spelling, also what `typeof` reports.
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::Void => "void",
            TypeTag::Bool => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Struct => "struct",
            TypeTag::Function => "function",
            TypeTag::Resource => "resource",
        }
    }

    pub fn from_keyword(word: &str) -> Option<TypeTag> {
        TypeTag::ALL.into_iter().find(|tag| tag.name() == word)
    }

    /// Lowercase prototype letter.
    pub const fn letter(self) -> char {
        match self {
            TypeTag::Void => 'v',
            TypeTag::Bool => 'b',
            TypeTag::Int => 'i',
            TypeTag::Float => 'f',
            TypeTag::String => 's',
            TypeTag::Array => 'a',
            TypeTag::Struct => 't',
            TypeTag::Function => 'c',
            TypeTag::Resource => 'r',
        }
    }

    /// Inverse of [`letter`](Self::letter), case-insensitive.
    pub fn from_letter(letter: char) -> Option<TypeTag> {
        let lower = letter.to_ascii_lowercase();
        TypeTag::ALL.into_iter().find(|tag| tag.letter() == lower)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
