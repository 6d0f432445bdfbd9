//! Shared vocabulary for arkmirror
//!
//! Defines the node-kind discriminants reported by the native context,
//! the scalar enums stored in node fields, and the flag sets attached
//! to functions and declarations.

pub mod flags;
pub mod kind;

pub use flags::{ModifierFlags, ScriptFunctionFlags};
pub use kind::{describe_discriminant, NodeCategory, NodeKind};

use serde::{Deserialize, Serialize};

/// Raw discriminant as reported by the native layer
pub type Discriminant = u32;

/// Kind of a member access (`a.b` vs `a[b]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberExpressionKind {
    /// `object.property`
    Property,
    /// `object[index]`
    Element,
}

/// Binding keyword of a variable declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableDeclarationKind {
    Let,
    Const,
    Var,
}

impl VariableDeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Let => "let",
            Self::Const => "const",
            Self::Var => "var",
        }
    }
}

/// Role of a method definition inside a class body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodDefinitionKind {
    Constructor,
    Method,
    Get,
    Set,
    #[serde(rename = "extension")]
    ExtensionMethod,
}

/// Operator tokens used by binary and assignment expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// `===`
    #[serde(rename = "===")]
    StrictEqual,
    /// `!==`
    #[serde(rename = "!==")]
    NotStrictEqual,
    /// `==`
    #[serde(rename = "==")]
    Equal,
    /// `!=`
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "&&")]
    LogicalAnd,
    #[serde(rename = "||")]
    LogicalOr,
    /// `??`
    #[serde(rename = "??")]
    NullishCoalescing,
    /// `=`
    #[serde(rename = "=")]
    Substitution,
    /// `+=`
    #[serde(rename = "+=")]
    PlusEqual,
    /// `-=`
    #[serde(rename = "-=")]
    MinusEqual,
}

impl TokenType {
    /// Source spelling of the operator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StrictEqual => "===",
            Self::NotStrictEqual => "!==",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::NullishCoalescing => "??",
            Self::Substitution => "=",
            Self::PlusEqual => "+=",
            Self::MinusEqual => "-=",
        }
    }

    /// Whether the token is valid as an assignment operator
    pub fn is_assignment(&self) -> bool {
        matches!(self, Self::Substitution | Self::PlusEqual | Self::MinusEqual)
    }
}

/// Built-in primitive types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// Byte range of a node in its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: u32,
    pub end: u32,
}

impl SourceRange {
    pub const DUMMY: SourceRange = SourceRange { start: 0, end: 0 };

    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_tokens() {
        assert!(TokenType::Substitution.is_assignment());
        assert!(TokenType::PlusEqual.is_assignment());
        assert!(!TokenType::StrictEqual.is_assignment());
        assert_eq!(TokenType::StrictEqual.as_str(), "===");
    }

    #[test]
    fn test_dummy_range() {
        assert!(SourceRange::DUMMY.is_dummy());
        assert!(!SourceRange::new(3, 9).is_dummy());
    }
}
