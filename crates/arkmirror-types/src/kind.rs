//! Node-kind discriminants
//!
//! The native context tags every node with a numeric discriminant. The
//! host mirrors the subset of kinds it knows how to wrap; any other
//! discriminant is foreign to the host and cannot be resolved.

use crate::Discriminant;

/// Every node kind the host mirror can wrap.
///
/// The numeric values are the discriminants reported by the native
/// layer and must stay in sync with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum NodeKind {
    // Program and statements
    EtsModule = 1,
    BlockStatement = 2,
    ExpressionStatement = 3,
    VariableDeclaration = 4,
    VariableDeclarator = 5,
    ReturnStatement = 6,
    IfStatement = 7,
    WhileStatement = 8,

    // Declarations and class elements
    FunctionDeclaration = 20,
    ClassDeclaration = 21,
    StructDeclaration = 22,
    ClassDefinition = 23,
    ClassProperty = 24,
    MethodDefinition = 25,
    ImportDeclaration = 26,
    EtsImportDeclaration = 27,
    ImportSpecifier = 28,

    // Functions
    ScriptFunction = 40,
    FunctionExpression = 41,
    ArrowFunctionExpression = 42,
    EtsParameterExpression = 43,
    SpreadElement = 44,

    // Expressions
    Identifier = 60,
    NumberLiteral = 61,
    StringLiteral = 62,
    BooleanLiteral = 63,
    NullLiteral = 64,
    UndefinedLiteral = 65,
    ThisExpression = 66,
    MemberExpression = 67,
    ChainExpression = 68,
    CallExpression = 69,
    BinaryExpression = 70,
    AssignmentExpression = 71,
    ConditionalExpression = 72,
    BlockExpression = 73,

    // Type annotations
    EtsPrimitiveType = 90,
    EtsTypeReference = 91,
    EtsUnionType = 92,
}

/// Coarse grouping of node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Program,
    Statement,
    Declaration,
    ClassElement,
    Function,
    Expression,
    Type,
}

/// "Is effectively a" relaxations accepted when a wrapper of one kind is
/// built from a handle of another kind: (actual, expected).
const LENIENT_KINDS: &[(NodeKind, NodeKind)] = &[
    (NodeKind::StructDeclaration, NodeKind::ClassDeclaration),
    (NodeKind::EtsImportDeclaration, NodeKind::ImportDeclaration),
    (NodeKind::EtsModule, NodeKind::BlockStatement),
];

impl NodeKind {
    /// All mirrored kinds, in discriminant order
    pub const ALL: &'static [NodeKind] = &[
        NodeKind::EtsModule,
        NodeKind::BlockStatement,
        NodeKind::ExpressionStatement,
        NodeKind::VariableDeclaration,
        NodeKind::VariableDeclarator,
        NodeKind::ReturnStatement,
        NodeKind::IfStatement,
        NodeKind::WhileStatement,
        NodeKind::FunctionDeclaration,
        NodeKind::ClassDeclaration,
        NodeKind::StructDeclaration,
        NodeKind::ClassDefinition,
        NodeKind::ClassProperty,
        NodeKind::MethodDefinition,
        NodeKind::ImportDeclaration,
        NodeKind::EtsImportDeclaration,
        NodeKind::ImportSpecifier,
        NodeKind::ScriptFunction,
        NodeKind::FunctionExpression,
        NodeKind::ArrowFunctionExpression,
        NodeKind::EtsParameterExpression,
        NodeKind::SpreadElement,
        NodeKind::Identifier,
        NodeKind::NumberLiteral,
        NodeKind::StringLiteral,
        NodeKind::BooleanLiteral,
        NodeKind::NullLiteral,
        NodeKind::UndefinedLiteral,
        NodeKind::ThisExpression,
        NodeKind::MemberExpression,
        NodeKind::ChainExpression,
        NodeKind::CallExpression,
        NodeKind::BinaryExpression,
        NodeKind::AssignmentExpression,
        NodeKind::ConditionalExpression,
        NodeKind::BlockExpression,
        NodeKind::EtsPrimitiveType,
        NodeKind::EtsTypeReference,
        NodeKind::EtsUnionType,
    ];

    /// Numeric discriminant shared with the native layer
    pub fn discriminant(self) -> Discriminant {
        self as Discriminant
    }

    /// Decode a native discriminant; `None` for kinds the host does not mirror
    pub fn from_discriminant(discriminant: Discriminant) -> Option<NodeKind> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.discriminant() == discriminant)
    }

    /// Name of the kind as the native dump spells it
    pub fn name(self) -> &'static str {
        match self {
            Self::EtsModule => "ETSModule",
            Self::BlockStatement => "BlockStatement",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::VariableDeclaration => "VariableDeclaration",
            Self::VariableDeclarator => "VariableDeclarator",
            Self::ReturnStatement => "ReturnStatement",
            Self::IfStatement => "IfStatement",
            Self::WhileStatement => "WhileStatement",
            Self::FunctionDeclaration => "FunctionDeclaration",
            Self::ClassDeclaration => "ClassDeclaration",
            Self::StructDeclaration => "StructDeclaration",
            Self::ClassDefinition => "ClassDefinition",
            Self::ClassProperty => "ClassProperty",
            Self::MethodDefinition => "MethodDefinition",
            Self::ImportDeclaration => "ImportDeclaration",
            Self::EtsImportDeclaration => "ETSImportDeclaration",
            Self::ImportSpecifier => "ImportSpecifier",
            Self::ScriptFunction => "ScriptFunction",
            Self::FunctionExpression => "FunctionExpression",
            Self::ArrowFunctionExpression => "ArrowFunctionExpression",
            Self::EtsParameterExpression => "ETSParameterExpression",
            Self::SpreadElement => "SpreadElement",
            Self::Identifier => "Identifier",
            Self::NumberLiteral => "NumberLiteral",
            Self::StringLiteral => "StringLiteral",
            Self::BooleanLiteral => "BooleanLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::UndefinedLiteral => "UndefinedLiteral",
            Self::ThisExpression => "ThisExpression",
            Self::MemberExpression => "MemberExpression",
            Self::ChainExpression => "ChainExpression",
            Self::CallExpression => "CallExpression",
            Self::BinaryExpression => "BinaryExpression",
            Self::AssignmentExpression => "AssignmentExpression",
            Self::ConditionalExpression => "ConditionalExpression",
            Self::BlockExpression => "BlockExpression",
            Self::EtsPrimitiveType => "ETSPrimitiveType",
            Self::EtsTypeReference => "ETSTypeReference",
            Self::EtsUnionType => "ETSUnionType",
        }
    }

    pub fn category(self) -> NodeCategory {
        match self {
            Self::EtsModule => NodeCategory::Program,
            Self::BlockStatement
            | Self::ExpressionStatement
            | Self::VariableDeclaration
            | Self::VariableDeclarator
            | Self::ReturnStatement
            | Self::IfStatement
            | Self::WhileStatement => NodeCategory::Statement,
            Self::FunctionDeclaration
            | Self::ClassDeclaration
            | Self::StructDeclaration
            | Self::ClassDefinition
            | Self::ImportDeclaration
            | Self::EtsImportDeclaration
            | Self::ImportSpecifier => NodeCategory::Declaration,
            Self::ClassProperty | Self::MethodDefinition => NodeCategory::ClassElement,
            Self::ScriptFunction | Self::EtsParameterExpression => NodeCategory::Function,
            Self::FunctionExpression
            | Self::ArrowFunctionExpression
            | Self::SpreadElement
            | Self::Identifier
            | Self::NumberLiteral
            | Self::StringLiteral
            | Self::BooleanLiteral
            | Self::NullLiteral
            | Self::UndefinedLiteral
            | Self::ThisExpression
            | Self::MemberExpression
            | Self::ChainExpression
            | Self::CallExpression
            | Self::BinaryExpression
            | Self::AssignmentExpression
            | Self::ConditionalExpression
            | Self::BlockExpression => NodeCategory::Expression,
            Self::EtsPrimitiveType | Self::EtsTypeReference | Self::EtsUnionType => {
                NodeCategory::Type
            }
        }
    }

    /// Whether a node of kind `self` may be wrapped as `expected`.
    ///
    /// Exact matches always pass; otherwise only the fixed lenient pairs do.
    pub fn is_effectively(self, expected: NodeKind) -> bool {
        self == expected
            || LENIENT_KINDS
                .iter()
                .any(|&(actual, target)| actual == self && target == expected)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Human-readable description of a raw discriminant
pub fn describe_discriminant(discriminant: Discriminant) -> String {
    match NodeKind::from_discriminant(discriminant) {
        Some(kind) => format!("{} ({})", kind.name(), discriminant),
        None => format!("<unknown> ({})", discriminant),
    }
}
