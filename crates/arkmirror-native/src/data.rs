//! Node payloads as stored by the native context
//!
//! One payload per node kind. Child links are raw handles into the same
//! context; scalars are stored inline.

use crate::handle::RawHandle;
use arkmirror_types::{
    Discriminant, MemberExpressionKind, MethodDefinitionKind, NodeKind, PrimitiveType,
    ScriptFunctionFlags, TokenType, VariableDeclarationKind,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ModuleData {
    pub name: String,
    pub statements: Vec<RawHandle>,
}

/// Statement list shared by block statements and block expressions
#[derive(Debug, Clone, PartialEq)]
pub struct BlockData {
    pub statements: Vec<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatementData {
    pub expression: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationData {
    pub kind: VariableDeclarationKind,
    pub declarators: Vec<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaratorData {
    pub id: RawHandle,
    pub init: Option<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatementData {
    pub argument: Option<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatementData {
    pub test: RawHandle,
    pub consequent: RawHandle,
    pub alternate: Option<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatementData {
    pub test: RawHandle,
    pub body: RawHandle,
}

/// A node whose only child is a script function
/// (function declarations, function and arrow expressions)
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionHolderData {
    pub function: RawHandle,
}

/// Shared by class and struct declarations
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclarationData {
    pub definition: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinitionData {
    pub ident: RawHandle,
    pub super_class: Option<RawHandle>,
    pub body: Vec<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassPropertyData {
    pub key: RawHandle,
    pub value: Option<RawHandle>,
    pub type_annotation: Option<RawHandle>,
    pub is_computed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDefinitionData {
    pub kind: MethodDefinitionKind,
    pub key: RawHandle,
    pub value: RawHandle,
    pub is_computed: bool,
    /// Attached after construction
    pub overloads: Vec<RawHandle>,
    /// Back-reference from an overload to the method it belongs to.
    /// Metadata only: not part of the node's structure.
    pub base_overload_method: Option<RawHandle>,
}

/// Shared by plain and ETS import declarations
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclarationData {
    pub source: RawHandle,
    pub specifiers: Vec<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpecifierData {
    pub imported: RawHandle,
    pub local: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFunctionData {
    pub id: Option<RawHandle>,
    pub params: Vec<RawHandle>,
    /// Attached after construction
    pub return_type: Option<RawHandle>,
    pub body: Option<RawHandle>,
    pub flags: ScriptFunctionFlags,
}

/// A parameter binds either a plain identifier or a rest element;
/// exactly one slot is filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterData {
    pub ident: Option<RawHandle>,
    pub spread: Option<RawHandle>,
    pub initializer: Option<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadElementData {
    pub argument: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierData {
    pub name: String,
    /// Attached after construction
    pub type_annotation: Option<RawHandle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpressionData {
    pub object: RawHandle,
    pub property: RawHandle,
    pub kind: MemberExpressionKind,
    pub computed: bool,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChainExpressionData {
    pub expression: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpressionData {
    pub callee: RawHandle,
    pub arguments: Vec<RawHandle>,
    pub optional: bool,
    /// Attached after construction
    pub trailing_block: Option<RawHandle>,
}

/// Shared by binary and assignment expressions
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpressionData {
    pub left: RawHandle,
    pub right: RawHandle,
    pub operator: TokenType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpressionData {
    pub test: RawHandle,
    pub consequent: RawHandle,
    pub alternate: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeReferenceData {
    pub name: RawHandle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionTypeData {
    pub types: Vec<RawHandle>,
}

/// A node of a kind the host does not mirror
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignData {
    pub discriminant: Discriminant,
    pub children: Vec<RawHandle>,
}

/// Payload of one native node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    EtsModule(ModuleData),
    BlockStatement(BlockData),
    ExpressionStatement(ExpressionStatementData),
    VariableDeclaration(VariableDeclarationData),
    VariableDeclarator(VariableDeclaratorData),
    ReturnStatement(ReturnStatementData),
    IfStatement(IfStatementData),
    WhileStatement(WhileStatementData),
    FunctionDeclaration(FunctionHolderData),
    ClassDeclaration(ClassDeclarationData),
    StructDeclaration(ClassDeclarationData),
    ClassDefinition(ClassDefinitionData),
    ClassProperty(ClassPropertyData),
    MethodDefinition(MethodDefinitionData),
    ImportDeclaration(ImportDeclarationData),
    EtsImportDeclaration(ImportDeclarationData),
    ImportSpecifier(ImportSpecifierData),
    ScriptFunction(ScriptFunctionData),
    FunctionExpression(FunctionHolderData),
    ArrowFunctionExpression(FunctionHolderData),
    EtsParameterExpression(ParameterData),
    SpreadElement(SpreadElementData),
    Identifier(IdentifierData),
    NumberLiteral(f64),
    StringLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    UndefinedLiteral,
    ThisExpression,
    MemberExpression(MemberExpressionData),
    ChainExpression(ChainExpressionData),
    CallExpression(CallExpressionData),
    BinaryExpression(BinaryExpressionData),
    AssignmentExpression(BinaryExpressionData),
    ConditionalExpression(ConditionalExpressionData),
    BlockExpression(BlockData),
    EtsPrimitiveType(PrimitiveType),
    EtsTypeReference(TypeReferenceData),
    EtsUnionType(UnionTypeData),
    Foreign(ForeignData),
}

impl NodeData {
    /// Host kind of the payload; `None` for foreign nodes
    pub fn kind(&self) -> Option<NodeKind> {
        let kind = match self {
            NodeData::EtsModule(_) => NodeKind::EtsModule,
            NodeData::BlockStatement(_) => NodeKind::BlockStatement,
            NodeData::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            NodeData::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            NodeData::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            NodeData::ReturnStatement(_) => NodeKind::ReturnStatement,
            NodeData::IfStatement(_) => NodeKind::IfStatement,
            NodeData::WhileStatement(_) => NodeKind::WhileStatement,
            NodeData::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            NodeData::ClassDeclaration(_) => NodeKind::ClassDeclaration,
            NodeData::StructDeclaration(_) => NodeKind::StructDeclaration,
            NodeData::ClassDefinition(_) => NodeKind::ClassDefinition,
            NodeData::ClassProperty(_) => NodeKind::ClassProperty,
            NodeData::MethodDefinition(_) => NodeKind::MethodDefinition,
            NodeData::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            NodeData::EtsImportDeclaration(_) => NodeKind::EtsImportDeclaration,
            NodeData::ImportSpecifier(_) => NodeKind::ImportSpecifier,
            NodeData::ScriptFunction(_) => NodeKind::ScriptFunction,
            NodeData::FunctionExpression(_) => NodeKind::FunctionExpression,
            NodeData::ArrowFunctionExpression(_) => NodeKind::ArrowFunctionExpression,
            NodeData::EtsParameterExpression(_) => NodeKind::EtsParameterExpression,
            NodeData::SpreadElement(_) => NodeKind::SpreadElement,
            NodeData::Identifier(_) => NodeKind::Identifier,
            NodeData::NumberLiteral(_) => NodeKind::NumberLiteral,
            NodeData::StringLiteral(_) => NodeKind::StringLiteral,
            NodeData::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            NodeData::NullLiteral => NodeKind::NullLiteral,
            NodeData::UndefinedLiteral => NodeKind::UndefinedLiteral,
            NodeData::ThisExpression => NodeKind::ThisExpression,
            NodeData::MemberExpression(_) => NodeKind::MemberExpression,
            NodeData::ChainExpression(_) => NodeKind::ChainExpression,
            NodeData::CallExpression(_) => NodeKind::CallExpression,
            NodeData::BinaryExpression(_) => NodeKind::BinaryExpression,
            NodeData::AssignmentExpression(_) => NodeKind::AssignmentExpression,
            NodeData::ConditionalExpression(_) => NodeKind::ConditionalExpression,
            NodeData::BlockExpression(_) => NodeKind::BlockExpression,
            NodeData::EtsPrimitiveType(_) => NodeKind::EtsPrimitiveType,
            NodeData::EtsTypeReference(_) => NodeKind::EtsTypeReference,
            NodeData::EtsUnionType(_) => NodeKind::EtsUnionType,
            NodeData::Foreign(_) => return None,
        };
        Some(kind)
    }

    /// Numeric discriminant as reported across the native boundary
    pub fn discriminant(&self) -> Discriminant {
        match self {
            NodeData::Foreign(foreign) => foreign.discriminant,
            other => other.kind().map_or(0, NodeKind::discriminant),
        }
    }

    /// Structural child links in declared order.
    ///
    /// The overload back-reference is metadata and is not included.
    pub fn children(&self) -> Vec<RawHandle> {
        let mut out = Vec::new();
        match self {
            NodeData::EtsModule(d) => out.extend(&d.statements),
            NodeData::BlockStatement(d) | NodeData::BlockExpression(d) => {
                out.extend(&d.statements)
            }
            NodeData::ExpressionStatement(d) => out.push(d.expression),
            NodeData::VariableDeclaration(d) => out.extend(&d.declarators),
            NodeData::VariableDeclarator(d) => {
                out.push(d.id);
                out.extend(d.init);
            }
            NodeData::ReturnStatement(d) => out.extend(d.argument),
            NodeData::IfStatement(d) => {
                out.push(d.test);
                out.push(d.consequent);
                out.extend(d.alternate);
            }
            NodeData::WhileStatement(d) => {
                out.push(d.test);
                out.push(d.body);
            }
            NodeData::FunctionDeclaration(d)
            | NodeData::FunctionExpression(d)
            | NodeData::ArrowFunctionExpression(d) => out.push(d.function),
            NodeData::ClassDeclaration(d) | NodeData::StructDeclaration(d) => {
                out.push(d.definition)
            }
            NodeData::ClassDefinition(d) => {
                out.push(d.ident);
                out.extend(d.super_class);
                out.extend(&d.body);
            }
            NodeData::ClassProperty(d) => {
                out.push(d.key);
                out.extend(d.value);
                out.extend(d.type_annotation);
            }
            NodeData::MethodDefinition(d) => {
                out.push(d.key);
                out.push(d.value);
                out.extend(&d.overloads);
            }
            NodeData::ImportDeclaration(d) | NodeData::EtsImportDeclaration(d) => {
                out.push(d.source);
                out.extend(&d.specifiers);
            }
            NodeData::ImportSpecifier(d) => {
                out.push(d.imported);
                out.push(d.local);
            }
            NodeData::ScriptFunction(d) => {
                out.extend(d.id);
                out.extend(&d.params);
                out.extend(d.return_type);
                out.extend(d.body);
            }
            NodeData::EtsParameterExpression(d) => {
                out.extend(d.ident);
                out.extend(d.spread);
                out.extend(d.initializer);
            }
            NodeData::SpreadElement(d) => out.push(d.argument),
            NodeData::Identifier(d) => out.extend(d.type_annotation),
            NodeData::MemberExpression(d) => {
                out.push(d.object);
                out.push(d.property);
            }
            NodeData::ChainExpression(d) => out.push(d.expression),
            NodeData::CallExpression(d) => {
                out.push(d.callee);
                out.extend(&d.arguments);
                out.extend(d.trailing_block);
            }
            NodeData::BinaryExpression(d) | NodeData::AssignmentExpression(d) => {
                out.push(d.left);
                out.push(d.right);
            }
            NodeData::ConditionalExpression(d) => {
                out.push(d.test);
                out.push(d.consequent);
                out.push(d.alternate);
            }
            NodeData::EtsTypeReference(d) => out.push(d.name),
            NodeData::EtsUnionType(d) => out.extend(&d.types),
            NodeData::Foreign(d) => out.extend(&d.children),
            NodeData::NumberLiteral(_)
            | NodeData::StringLiteral(_)
            | NodeData::BooleanLiteral(_)
            | NodeData::NullLiteral
            | NodeData::UndefinedLiteral
            | NodeData::ThisExpression
            | NodeData::EtsPrimitiveType(_) => {}
        }
        out
    }
}
