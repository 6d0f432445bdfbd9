//! Serialized form of a tree dump
//!
//! Every node is an object tagged with its kind name:
//!
//! ```json
//! { "type": "MemberExpression",
//!   "object": { "type": "Identifier", "name": "a" },
//!   "property": { "type": "Identifier", "name": "b" },
//!   "optional": true }
//! ```
//!
//! Optional children, empty lists and false flags may be omitted.

use arkmirror_types::{
    MemberExpressionKind, MethodDefinitionKind, ModifierFlags, NodeKind, PrimitiveType,
    ScriptFunctionFlags, SourceRange, TokenType, VariableDeclarationKind,
};
use serde::{Deserialize, Serialize};

type Child = Box<SyntaxNode>;

/// One node of a dump, with the bookkeeping every node carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    #[serde(flatten)]
    pub syntax: Syntax,
    #[serde(default, skip_serializing_if = "no_modifiers")]
    pub modifiers: ModifierFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SourceRange>,
}

fn no_modifiers(flags: &ModifierFlags) -> bool {
    flags.is_empty()
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

fn property_access() -> MemberExpressionKind {
    MemberExpressionKind::Property
}

fn no_function_flags(flags: &ScriptFunctionFlags) -> bool {
    flags.is_empty()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Syntax {
    #[serde(rename = "ETSModule")]
    EtsModule {
        name: String,
        #[serde(default)]
        statements: Vec<SyntaxNode>,
    },
    BlockStatement {
        #[serde(default)]
        statements: Vec<SyntaxNode>,
    },
    ExpressionStatement {
        expression: Child,
    },
    VariableDeclaration {
        kind: VariableDeclarationKind,
        declarations: Vec<SyntaxNode>,
    },
    VariableDeclarator {
        id: Child,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Child>,
    },
    ReturnStatement {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        argument: Option<Child>,
    },
    IfStatement {
        test: Child,
        consequent: Child,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alternate: Option<Child>,
    },
    WhileStatement {
        test: Child,
        body: Child,
    },
    FunctionDeclaration {
        function: Child,
    },
    ClassDeclaration {
        definition: Child,
    },
    StructDeclaration {
        definition: Child,
    },
    ClassDefinition {
        ident: Child,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        super_class: Option<Child>,
        #[serde(default)]
        body: Vec<SyntaxNode>,
    },
    ClassProperty {
        key: Child,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Child>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_annotation: Option<Child>,
        #[serde(default, skip_serializing_if = "is_false")]
        computed: bool,
    },
    MethodDefinition {
        kind: MethodDefinitionKind,
        key: Child,
        value: Child,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        overloads: Vec<SyntaxNode>,
        #[serde(default, skip_serializing_if = "is_false")]
        computed: bool,
        /// Set on an overload signature whose back-reference points at the
        /// method definition listing it
        #[serde(default, skip_serializing_if = "is_false")]
        linked_to_base: bool,
    },
    ImportDeclaration {
        source: Child,
        #[serde(default)]
        specifiers: Vec<SyntaxNode>,
    },
    #[serde(rename = "ETSImportDeclaration")]
    EtsImportDeclaration {
        source: Child,
        #[serde(default)]
        specifiers: Vec<SyntaxNode>,
    },
    ImportSpecifier {
        imported: Child,
        local: Child,
    },
    ScriptFunction {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<Child>,
        #[serde(default)]
        params: Vec<SyntaxNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        return_type: Option<Child>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Child>,
        #[serde(default, skip_serializing_if = "no_function_flags")]
        flags: ScriptFunctionFlags,
    },
    FunctionExpression {
        function: Child,
    },
    ArrowFunctionExpression {
        function: Child,
    },
    /// `binding` is an `Identifier`, or a `SpreadElement` for rest parameters
    #[serde(rename = "ETSParameterExpression")]
    EtsParameterExpression {
        binding: Child,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initializer: Option<Child>,
    },
    SpreadElement {
        argument: Child,
    },
    Identifier {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        type_annotation: Option<Child>,
    },
    NumberLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    UndefinedLiteral,
    ThisExpression,
    MemberExpression {
        object: Child,
        property: Child,
        #[serde(default = "property_access")]
        kind: MemberExpressionKind,
        #[serde(default, skip_serializing_if = "is_false")]
        computed: bool,
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
    },
    ChainExpression {
        expression: Child,
    },
    CallExpression {
        callee: Child,
        #[serde(default)]
        arguments: Vec<SyntaxNode>,
        #[serde(default, skip_serializing_if = "is_false")]
        optional: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trailing_block: Option<Child>,
    },
    BinaryExpression {
        left: Child,
        right: Child,
        operator: TokenType,
    },
    AssignmentExpression {
        left: Child,
        right: Child,
        operator: TokenType,
    },
    ConditionalExpression {
        test: Child,
        consequent: Child,
        alternate: Child,
    },
    BlockExpression {
        #[serde(default)]
        statements: Vec<SyntaxNode>,
    },
    #[serde(rename = "ETSPrimitiveType")]
    EtsPrimitiveType {
        primitive: PrimitiveType,
    },
    #[serde(rename = "ETSTypeReference")]
    EtsTypeReference {
        name: Child,
    },
    #[serde(rename = "ETSUnionType")]
    EtsUnionType {
        types: Vec<SyntaxNode>,
    },
}

impl SyntaxNode {
    pub fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            modifiers: ModifierFlags::NONE,
            range: None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.syntax.kind()
    }
}

impl From<Syntax> for SyntaxNode {
    fn from(syntax: Syntax) -> Self {
        Self::new(syntax)
    }
}

impl Syntax {
    pub fn kind(&self) -> NodeKind {
        match self {
            Syntax::EtsModule { .. } => NodeKind::EtsModule,
            Syntax::BlockStatement { .. } => NodeKind::BlockStatement,
            Syntax::ExpressionStatement { .. } => NodeKind::ExpressionStatement,
            Syntax::VariableDeclaration { .. } => NodeKind::VariableDeclaration,
            Syntax::VariableDeclarator { .. } => NodeKind::VariableDeclarator,
            Syntax::ReturnStatement { .. } => NodeKind::ReturnStatement,
            Syntax::IfStatement { .. } => NodeKind::IfStatement,
            Syntax::WhileStatement { .. } => NodeKind::WhileStatement,
            Syntax::FunctionDeclaration { .. } => NodeKind::FunctionDeclaration,
            Syntax::ClassDeclaration { .. } => NodeKind::ClassDeclaration,
            Syntax::StructDeclaration { .. } => NodeKind::StructDeclaration,
            Syntax::ClassDefinition { .. } => NodeKind::ClassDefinition,
            Syntax::ClassProperty { .. } => NodeKind::ClassProperty,
            Syntax::MethodDefinition { .. } => NodeKind::MethodDefinition,
            Syntax::ImportDeclaration { .. } => NodeKind::ImportDeclaration,
            Syntax::EtsImportDeclaration { .. } => NodeKind::EtsImportDeclaration,
            Syntax::ImportSpecifier { .. } => NodeKind::ImportSpecifier,
            Syntax::ScriptFunction { .. } => NodeKind::ScriptFunction,
            Syntax::FunctionExpression { .. } => NodeKind::FunctionExpression,
            Syntax::ArrowFunctionExpression { .. } => NodeKind::ArrowFunctionExpression,
            Syntax::EtsParameterExpression { .. } => NodeKind::EtsParameterExpression,
            Syntax::SpreadElement { .. } => NodeKind::SpreadElement,
            Syntax::Identifier { .. } => NodeKind::Identifier,
            Syntax::NumberLiteral { .. } => NodeKind::NumberLiteral,
            Syntax::StringLiteral { .. } => NodeKind::StringLiteral,
            Syntax::BooleanLiteral { .. } => NodeKind::BooleanLiteral,
            Syntax::NullLiteral => NodeKind::NullLiteral,
            Syntax::UndefinedLiteral => NodeKind::UndefinedLiteral,
            Syntax::ThisExpression => NodeKind::ThisExpression,
            Syntax::MemberExpression { .. } => NodeKind::MemberExpression,
            Syntax::ChainExpression { .. } => NodeKind::ChainExpression,
            Syntax::CallExpression { .. } => NodeKind::CallExpression,
            Syntax::BinaryExpression { .. } => NodeKind::BinaryExpression,
            Syntax::AssignmentExpression { .. } => NodeKind::AssignmentExpression,
            Syntax::ConditionalExpression { .. } => NodeKind::ConditionalExpression,
            Syntax::BlockExpression { .. } => NodeKind::BlockExpression,
            Syntax::EtsPrimitiveType { .. } => NodeKind::EtsPrimitiveType,
            Syntax::EtsTypeReference { .. } => NodeKind::EtsTypeReference,
            Syntax::EtsUnionType { .. } => NodeKind::EtsUnionType,
        }
    }
}
