//! Tokenizer for Kite source text.
//!
//! A `logos`-generated [`RawToken`] matcher does the scanning; [`lex`] then
//! interns identifiers and string bodies and converts everything into the
//! shared [`TokenKind`] vocabulary from `kite_ir`.

use kite_ir::{Span, StringInterner, Token, TokenKind, TokenList, TypeTag};
use logos::Logos;

/// Problem found while scanning.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unrecognized character sequence `{text}`")]
    InvalidToken { text: String, span: Span },
    #[error("numeric literal `{text}` is out of range")]
    NumberOutOfRange { text: String, span: Span },
    #[error("unterminated block comment")]
    UnterminatedComment { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidToken { span, .. }
            | LexError::NumberOutOfRange { span, .. }
            | LexError::UnterminatedComment { span } => *span,
        }
    }
}

/// Tokens plus every error met along the way. Erroneous input still yields an
/// [`TokenKind::Error`] token so the parser can report in context.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    pub errors: Vec<LexError>,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,
    /// `true` when the closing `*/` was found.
    #[token("/*", block_comment)]
    BlockComment(bool),

    // Keywords
    #[token("function")]
    Function,
    #[token("class")]
    Class,
    #[token("extends")]
    Extends,
    #[token("new")]
    New,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("for")]
    For,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("throw")]
    Throw,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,
    #[token("var")]
    Var,
    #[token("__FILE__")]
    File,
    #[token("__LINE__")]
    Line,

    // Type keywords
    #[token("void")]
    VoidType,
    #[token("bool")]
    BoolType,
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("string")]
    StringType,
    #[token("array")]
    ArrayType,
    #[token("struct")]
    StructType,
    #[token("resource")]
    ResourceType,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,

    // Operators
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("!")]
    Bang,

    // Literals. Number callbacks only validate shape; conversion happens in
    // `lex` so overflow can be reported with the literal text.
    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexInt,
    #[regex(r"[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,
    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    String,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Consume a block comment body. An unclosed comment swallows the rest of
/// the input.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Tokenize `source`, interning identifiers and raw string bodies.
pub fn lex(source: &str, interner: &StringInterner) -> LexOutput {
    let mut output = LexOutput::default();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let slice = lexer.slice();
        let kind = match result {
            Ok(raw) => match convert(raw, slice, span, interner) {
                Ok(Some(kind)) => kind,
                Ok(None) => continue,
                Err(err) => {
                    output.errors.push(err);
                    TokenKind::Error
                }
            },
            Err(()) => {
                output.errors.push(LexError::InvalidToken {
                    text: slice.to_owned(),
                    span,
                });
                TokenKind::Error
            }
        };
        output.tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    output
        .tokens
        .push(Token::new(TokenKind::Eof, Span::new(end, end)));
    output
}

/// Map a raw token to its final kind; `Ok(None)` for comments.
fn convert(
    raw: RawToken,
    slice: &str,
    span: Span,
    interner: &StringInterner,
) -> Result<Option<TokenKind>, LexError> {
    let kind = match raw {
        RawToken::LineComment | RawToken::BlockComment(true) => return Ok(None),
        RawToken::BlockComment(false) => return Err(LexError::UnterminatedComment { span }),

        RawToken::Function => TokenKind::Function,
        RawToken::Class => TokenKind::Class,
        RawToken::Extends => TokenKind::Extends,
        RawToken::New => TokenKind::New,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Do => TokenKind::Do,
        RawToken::For => TokenKind::For,
        RawToken::Switch => TokenKind::Switch,
        RawToken::Case => TokenKind::Case,
        RawToken::Default => TokenKind::Default,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Return => TokenKind::Return,
        RawToken::Try => TokenKind::Try,
        RawToken::Catch => TokenKind::Catch,
        RawToken::Throw => TokenKind::Throw,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Var => TokenKind::Var,
        RawToken::File => TokenKind::File,
        RawToken::Line => TokenKind::Line,

        RawToken::VoidType => TokenKind::Type(TypeTag::Void),
        RawToken::BoolType => TokenKind::Type(TypeTag::Bool),
        RawToken::IntType => TokenKind::Type(TypeTag::Int),
        RawToken::FloatType => TokenKind::Type(TypeTag::Float),
        RawToken::StringType => TokenKind::Type(TypeTag::String),
        RawToken::ArrayType => TokenKind::Type(TypeTag::Array),
        RawToken::StructType => TokenKind::Type(TypeTag::Struct),
        RawToken::ResourceType => TokenKind::Type(TypeTag::Resource),

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::DoubleColon => TokenKind::DoubleColon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Question => TokenKind::Question,
        RawToken::Ellipsis => TokenKind::Ellipsis,
        RawToken::Dot => TokenKind::Dot,

        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::AmpEq => TokenKind::AmpEq,
        RawToken::PipeEq => TokenKind::PipeEq,
        RawToken::CaretEq => TokenKind::CaretEq,
        RawToken::ShlEq => TokenKind::ShlEq,
        RawToken::ShrEq => TokenKind::ShrEq,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::AndAnd => TokenKind::AndAnd,
        RawToken::OrOr => TokenKind::OrOr,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Bang => TokenKind::Bang,

        RawToken::HexInt => i64::from_str_radix(&slice[2..], 16)
            .map(TokenKind::Int)
            .map_err(|_| out_of_range(slice, span))?,
        RawToken::Int => slice
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| out_of_range(slice, span))?,
        RawToken::Float => match slice.parse::<f64>() {
            Ok(value) if value.is_finite() => TokenKind::Float(value),
            _ => return Err(out_of_range(slice, span)),
        },
        RawToken::String => {
            // Quotes are always one byte each.
            let body = &slice[1..slice.len() - 1];
            TokenKind::Str(interner.intern(body))
        }
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
    };
    Ok(Some(kind))
}

#[cold]
fn out_of_range(slice: &str, span: Span) -> LexError {
    LexError::NumberOutOfRange {
        text: slice.to_owned(),
        span,
    }
}
