//! Generic rebuilding traversal
//!
//! A pass implements [`AstVisitor::visit`]; the default walks the children
//! and rebuilds the node. Passes that want a bottom-up rewrite call
//! [`visit_each_child`] first and then inspect the rebuilt node. Returning
//! a node without calling it prunes the subtree.
//!
//! Children are visited in the declared order of each kind's fields. A node
//! whose children all come back identical is reused as is, so a pass that
//! changes nothing allocates nothing.

use arkmirror_native::Result;

use crate::context::Context;
use crate::nodes::{resolve, AstNode, Node, ParameterBinding};

pub trait AstVisitor {
    fn visit(&mut self, ctx: &mut Context, node: AstNode) -> Result<AstNode> {
        visit_each_child(self, ctx, node)
    }
}

fn visit_all<V: AstVisitor + ?Sized>(
    visitor: &mut V,
    ctx: &mut Context,
    nodes: Vec<AstNode>,
) -> Result<Vec<AstNode>> {
    nodes
        .into_iter()
        .map(|node| visitor.visit(ctx, node))
        .collect()
}

fn visit_opt<V: AstVisitor + ?Sized>(
    visitor: &mut V,
    ctx: &mut Context,
    node: Option<AstNode>,
) -> Result<Option<AstNode>> {
    node.map(|node| visitor.visit(ctx, node)).transpose()
}

/// Visit a child held in a typed slot and convert the result back.
fn visit_typed<V: AstVisitor + ?Sized, N: Node>(
    visitor: &mut V,
    ctx: &mut Context,
    node: N,
) -> Result<N> {
    let visited = visitor.visit(ctx, node.to_node(ctx)?)?;
    N::from_node(ctx, visited)
}

fn visit_typed_all<V: AstVisitor + ?Sized, N: Node>(
    visitor: &mut V,
    ctx: &mut Context,
    nodes: Vec<N>,
) -> Result<Vec<N>> {
    nodes
        .into_iter()
        .map(|node| visit_typed(visitor, ctx, node))
        .collect()
}

fn visit_typed_opt<V: AstVisitor + ?Sized, N: Node>(
    visitor: &mut V,
    ctx: &mut Context,
    node: Option<N>,
) -> Result<Option<N>> {
    node.map(|node| visit_typed(visitor, ctx, node))
        .transpose()
}

/// Visit every child of `node`, then rebuild it through its kind's `update`.
pub fn visit_each_child<V: AstVisitor + ?Sized>(
    visitor: &mut V,
    ctx: &mut Context,
    node: AstNode,
) -> Result<AstNode> {
    // Re-resolve so that dispatch follows the native kind
    let node = resolve(ctx, node.raw())?;
    let rebuilt: AstNode = match node {
        AstNode::EtsModule(n) => {
            let name = n.name(ctx)?;
            let statements = n.statements(ctx)?;
            let statements = visit_all(visitor, ctx, statements)?;
            n.update(ctx, &name, statements)?.into()
        }
        AstNode::BlockStatement(n) => {
            let statements = n.statements(ctx)?;
            let statements = visit_all(visitor, ctx, statements)?;
            n.update(ctx, statements)?.into()
        }
        AstNode::ExpressionStatement(n) => {
            let expression = n.expression(ctx)?;
            let expression = visitor.visit(ctx, expression)?;
            n.update(ctx, expression)?.into()
        }
        AstNode::VariableDeclaration(n) => {
            let kind = n.kind(ctx)?;
            let declarators = n.declarators(ctx)?;
            let declarators = visit_typed_all(visitor, ctx, declarators)?;
            n.update(ctx, kind, declarators)?.into()
        }
        AstNode::VariableDeclarator(n) => {
            let id = n.id(ctx)?;
            let id = visit_typed(visitor, ctx, id)?;
            let init = n.init(ctx)?;
            let init = visit_opt(visitor, ctx, init)?;
            n.update(ctx, id, init)?.into()
        }
        AstNode::ReturnStatement(n) => {
            let argument = n.argument(ctx)?;
            let argument = visit_opt(visitor, ctx, argument)?;
            n.update(ctx, argument)?.into()
        }
        AstNode::IfStatement(n) => {
            let test = n.test(ctx)?;
            let test = visitor.visit(ctx, test)?;
            let consequent = n.consequent(ctx)?;
            let consequent = visitor.visit(ctx, consequent)?;
            let alternate = n.alternate(ctx)?;
            let alternate = visit_opt(visitor, ctx, alternate)?;
            n.update(ctx, test, consequent, alternate)?.into()
        }
        AstNode::WhileStatement(n) => {
            let test = n.test(ctx)?;
            let test = visitor.visit(ctx, test)?;
            let body = n.body(ctx)?;
            let body = visitor.visit(ctx, body)?;
            n.update(ctx, test, body)?.into()
        }
        AstNode::FunctionDeclaration(n) => {
            let function = n.function(ctx)?;
            let function = visit_typed(visitor, ctx, function)?;
            n.update(ctx, function)?.into()
        }
        AstNode::FunctionExpression(n) => {
            let function = n.function(ctx)?;
            let function = visit_typed(visitor, ctx, function)?;
            n.update(ctx, function)?.into()
        }
        AstNode::ArrowFunctionExpression(n) => {
            let function = n.function(ctx)?;
            let function = visit_typed(visitor, ctx, function)?;
            n.update(ctx, function)?.into()
        }
        AstNode::ClassDeclaration(n) => {
            let definition = n.definition(ctx)?;
            let definition = visit_typed(visitor, ctx, definition)?;
            n.update(ctx, definition)?.into()
        }
        AstNode::StructDeclaration(n) => {
            let definition = n.definition(ctx)?;
            let definition = visit_typed(visitor, ctx, definition)?;
            n.update(ctx, definition)?.into()
        }
        AstNode::ClassDefinition(n) => {
            let ident = n.ident(ctx)?;
            let ident = visit_typed(visitor, ctx, ident)?;
            let super_class = n.super_class(ctx)?;
            let super_class = visit_opt(visitor, ctx, super_class)?;
            let body = n.body(ctx)?;
            let body = visit_all(visitor, ctx, body)?;
            n.update(ctx, ident, super_class, body)?.into()
        }
        AstNode::ClassProperty(n) => {
            let key = n.key(ctx)?;
            let key = visitor.visit(ctx, key)?;
            let value = n.value(ctx)?;
            let value = visit_opt(visitor, ctx, value)?;
            let annotation = n.type_annotation(ctx)?;
            let annotation = visit_opt(visitor, ctx, annotation)?;
            let computed = n.is_computed(ctx)?;
            n.update(ctx, key, value, annotation, computed)?.into()
        }
        AstNode::MethodDefinition(n) => {
            let kind = n.kind(ctx)?;
            let key = n.key(ctx)?;
            let key = visitor.visit(ctx, key)?;
            let value = n.value(ctx)?;
            let value = visit_typed(visitor, ctx, value)?;
            let overloads = n.overloads(ctx)?;
            let overloads = visit_typed_all(visitor, ctx, overloads)?;
            let computed = n.is_computed(ctx)?;
            n.update(ctx, kind, key, value, overloads, computed)?.into()
        }
        AstNode::ImportDeclaration(n) => {
            let source = n.source(ctx)?;
            let source = visit_typed(visitor, ctx, source)?;
            let specifiers = n.specifiers(ctx)?;
            let specifiers = visit_typed_all(visitor, ctx, specifiers)?;
            n.update(ctx, source, specifiers)?.into()
        }
        AstNode::EtsImportDeclaration(n) => {
            let source = n.source(ctx)?;
            let source = visit_typed(visitor, ctx, source)?;
            let specifiers = n.specifiers(ctx)?;
            let specifiers = visit_typed_all(visitor, ctx, specifiers)?;
            n.update(ctx, source, specifiers)?.into()
        }
        AstNode::ImportSpecifier(n) => {
            let imported = n.imported(ctx)?;
            let imported = visit_typed(visitor, ctx, imported)?;
            let local = n.local(ctx)?;
            let local = visit_typed(visitor, ctx, local)?;
            n.update(ctx, imported, local)?.into()
        }
        AstNode::ScriptFunction(n) => {
            let id = n.id(ctx)?;
            let id = visit_typed_opt(visitor, ctx, id)?;
            let params = n.params(ctx)?;
            let params = visit_typed_all(visitor, ctx, params)?;
            let return_type = n.return_type(ctx)?;
            let return_type = visit_opt(visitor, ctx, return_type)?;
            let body = n.body(ctx)?;
            let body = visit_opt(visitor, ctx, body)?;
            let flags = n.flags(ctx)?;
            n.update(ctx, id, params, return_type, body, flags)?.into()
        }
        AstNode::EtsParameterExpression(n) => {
            let binding = match n.binding(ctx)? {
                ParameterBinding::Identifier(ident) => {
                    ParameterBinding::Identifier(visit_typed(visitor, ctx, ident)?)
                }
                ParameterBinding::Rest(spread) => {
                    ParameterBinding::Rest(visit_typed(visitor, ctx, spread)?)
                }
            };
            let initializer = n.initializer(ctx)?;
            let initializer = visit_opt(visitor, ctx, initializer)?;
            n.update(ctx, binding, initializer)?.into()
        }
        AstNode::SpreadElement(n) => {
            let argument = n.argument(ctx)?;
            let argument = visitor.visit(ctx, argument)?;
            n.update(ctx, argument)?.into()
        }
        AstNode::Identifier(n) => {
            let name = n.name(ctx)?;
            let annotation = n.type_annotation(ctx)?;
            let annotation = visit_opt(visitor, ctx, annotation)?;
            n.update(ctx, &name, annotation)?.into()
        }
        AstNode::MemberExpression(n) => {
            let object = n.object(ctx)?;
            let object = visitor.visit(ctx, object)?;
            let property = n.property(ctx)?;
            let property = visitor.visit(ctx, property)?;
            let kind = n.kind(ctx)?;
            let computed = n.is_computed(ctx)?;
            let optional = n.is_optional(ctx)?;
            n.update(ctx, object, property, kind, computed, optional)?
                .into()
        }
        AstNode::ChainExpression(n) => {
            let expression = n.expression(ctx)?;
            let expression = visitor.visit(ctx, expression)?;
            n.update(ctx, expression)?.into()
        }
        AstNode::CallExpression(n) => {
            let callee = n.callee(ctx)?;
            let callee = visitor.visit(ctx, callee)?;
            let arguments = n.arguments(ctx)?;
            let arguments = visit_all(visitor, ctx, arguments)?;
            let trailing_block = n.trailing_block(ctx)?;
            let trailing_block = visit_typed_opt(visitor, ctx, trailing_block)?;
            let optional = n.is_optional(ctx)?;
            n.update(ctx, callee, arguments, optional, trailing_block)?
                .into()
        }
        AstNode::BinaryExpression(n) => {
            let left = n.left(ctx)?;
            let left = visitor.visit(ctx, left)?;
            let right = n.right(ctx)?;
            let right = visitor.visit(ctx, right)?;
            let operator = n.operator(ctx)?;
            n.update(ctx, left, right, operator)?.into()
        }
        AstNode::AssignmentExpression(n) => {
            let left = n.left(ctx)?;
            let left = visitor.visit(ctx, left)?;
            let right = n.right(ctx)?;
            let right = visitor.visit(ctx, right)?;
            let operator = n.operator(ctx)?;
            n.update(ctx, left, right, operator)?.into()
        }
        AstNode::ConditionalExpression(n) => {
            let test = n.test(ctx)?;
            let test = visitor.visit(ctx, test)?;
            let consequent = n.consequent(ctx)?;
            let consequent = visitor.visit(ctx, consequent)?;
            let alternate = n.alternate(ctx)?;
            let alternate = visitor.visit(ctx, alternate)?;
            n.update(ctx, test, consequent, alternate)?.into()
        }
        AstNode::BlockExpression(n) => {
            let statements = n.statements(ctx)?;
            let statements = visit_all(visitor, ctx, statements)?;
            n.update(ctx, statements)?.into()
        }
        AstNode::EtsTypeReference(n) => {
            let name = n.name(ctx)?;
            let name = visit_typed(visitor, ctx, name)?;
            n.update(ctx, name)?.into()
        }
        AstNode::EtsUnionType(n) => {
            let types = n.types(ctx)?;
            let types = visit_all(visitor, ctx, types)?;
            n.update(ctx, types)?.into()
        }
        AstNode::NumberLiteral(_)
        | AstNode::StringLiteral(_)
        | AstNode::BooleanLiteral(_)
        | AstNode::NullLiteral(_)
        | AstNode::UndefinedLiteral(_)
        | AstNode::ThisExpression(_)
        | AstNode::EtsPrimitiveType(_) => node,
    };
    Ok(rebuilt)
}
