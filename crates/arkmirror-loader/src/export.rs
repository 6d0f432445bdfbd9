//! Native tree back to dump form

use arkmirror_ast::{
    resolve, AsRaw, AstNode, Context, MethodDefinition, ParameterBinding, RawHandle, Result,
};
use log::debug;

use crate::syntax::{Syntax, SyntaxNode};

fn boxed(ctx: &Context, node: impl AsRaw) -> Result<Box<SyntaxNode>> {
    Ok(Box::new(export_raw(ctx, node.raw())?))
}

fn boxed_opt<N: AsRaw>(ctx: &Context, node: Option<N>) -> Result<Option<Box<SyntaxNode>>> {
    node.map(|node| boxed(ctx, node)).transpose()
}

fn list<N: AsRaw>(ctx: &Context, nodes: Vec<N>) -> Result<Vec<SyntaxNode>> {
    nodes
        .into_iter()
        .map(|node| export_raw(ctx, node.raw()))
        .collect()
}

/// Overload signatures of `method`, marking the ones linked back to it.
/// A back-reference to any other method has no dump form and is dropped.
fn overloads(ctx: &Context, method: MethodDefinition) -> Result<Vec<SyntaxNode>> {
    let mut exported = Vec::new();
    for overload in method.overloads(ctx)? {
        let mut node = export_raw(ctx, overload.raw())?;
        match overload.base_overload_method(ctx)? {
            Some(base) if base == method => {
                if let Syntax::MethodDefinition { linked_to_base, .. } = &mut node.syntax {
                    *linked_to_base = true;
                }
            }
            Some(base) => debug!(
                "overload {} points at {}, not its owner {}",
                overload.raw(),
                base.raw(),
                method.raw()
            ),
            None => {}
        }
        exported.push(node);
    }
    Ok(exported)
}

fn export_raw(ctx: &Context, raw: RawHandle) -> Result<SyntaxNode> {
    export(ctx, resolve(ctx, raw)?)
}

/// Read `node` and its subtree back into dump form
pub fn export(ctx: &Context, node: AstNode) -> Result<SyntaxNode> {
    let node = resolve(ctx, node.raw())?;
    let syntax = match node {
        AstNode::EtsModule(n) => Syntax::EtsModule {
            name: n.name(ctx)?,
            statements: list(ctx, n.statements(ctx)?)?,
        },
        AstNode::BlockStatement(n) => Syntax::BlockStatement {
            statements: list(ctx, n.statements(ctx)?)?,
        },
        AstNode::ExpressionStatement(n) => Syntax::ExpressionStatement {
            expression: boxed(ctx, n.expression(ctx)?)?,
        },
        AstNode::VariableDeclaration(n) => Syntax::VariableDeclaration {
            kind: n.kind(ctx)?,
            declarations: list(ctx, n.declarators(ctx)?)?,
        },
        AstNode::VariableDeclarator(n) => Syntax::VariableDeclarator {
            id: boxed(ctx, n.id(ctx)?)?,
            init: boxed_opt(ctx, n.init(ctx)?)?,
        },
        AstNode::ReturnStatement(n) => Syntax::ReturnStatement {
            argument: boxed_opt(ctx, n.argument(ctx)?)?,
        },
        AstNode::IfStatement(n) => Syntax::IfStatement {
            test: boxed(ctx, n.test(ctx)?)?,
            consequent: boxed(ctx, n.consequent(ctx)?)?,
            alternate: boxed_opt(ctx, n.alternate(ctx)?)?,
        },
        AstNode::WhileStatement(n) => Syntax::WhileStatement {
            test: boxed(ctx, n.test(ctx)?)?,
            body: boxed(ctx, n.body(ctx)?)?,
        },
        AstNode::FunctionDeclaration(n) => Syntax::FunctionDeclaration {
            function: boxed(ctx, n.function(ctx)?)?,
        },
        AstNode::ClassDeclaration(n) => Syntax::ClassDeclaration {
            definition: boxed(ctx, n.definition(ctx)?)?,
        },
        AstNode::StructDeclaration(n) => Syntax::StructDeclaration {
            definition: boxed(ctx, n.definition(ctx)?)?,
        },
        AstNode::ClassDefinition(n) => Syntax::ClassDefinition {
            ident: boxed(ctx, n.ident(ctx)?)?,
            super_class: boxed_opt(ctx, n.super_class(ctx)?)?,
            body: list(ctx, n.body(ctx)?)?,
        },
        AstNode::ClassProperty(n) => Syntax::ClassProperty {
            key: boxed(ctx, n.key(ctx)?)?,
            value: boxed_opt(ctx, n.value(ctx)?)?,
            type_annotation: boxed_opt(ctx, n.type_annotation(ctx)?)?,
            computed: n.is_computed(ctx)?,
        },
        AstNode::MethodDefinition(n) => Syntax::MethodDefinition {
            kind: n.kind(ctx)?,
            key: boxed(ctx, n.key(ctx)?)?,
            value: boxed(ctx, n.value(ctx)?)?,
            overloads: overloads(ctx, n)?,
            computed: n.is_computed(ctx)?,
            linked_to_base: false,
        },
        AstNode::ImportDeclaration(n) => Syntax::ImportDeclaration {
            source: boxed(ctx, n.source(ctx)?)?,
            specifiers: list(ctx, n.specifiers(ctx)?)?,
        },
        AstNode::EtsImportDeclaration(n) => Syntax::EtsImportDeclaration {
            source: boxed(ctx, n.source(ctx)?)?,
            specifiers: list(ctx, n.specifiers(ctx)?)?,
        },
        AstNode::ImportSpecifier(n) => Syntax::ImportSpecifier {
            imported: boxed(ctx, n.imported(ctx)?)?,
            local: boxed(ctx, n.local(ctx)?)?,
        },
        AstNode::ScriptFunction(n) => Syntax::ScriptFunction {
            id: boxed_opt(ctx, n.id(ctx)?)?,
            params: list(ctx, n.params(ctx)?)?,
            return_type: boxed_opt(ctx, n.return_type(ctx)?)?,
            body: boxed_opt(ctx, n.body(ctx)?)?,
            flags: n.flags(ctx)?,
        },
        AstNode::FunctionExpression(n) => Syntax::FunctionExpression {
            function: boxed(ctx, n.function(ctx)?)?,
        },
        AstNode::ArrowFunctionExpression(n) => Syntax::ArrowFunctionExpression {
            function: boxed(ctx, n.function(ctx)?)?,
        },
        AstNode::EtsParameterExpression(n) => Syntax::EtsParameterExpression {
            binding: match n.binding(ctx)? {
                ParameterBinding::Identifier(ident) => boxed(ctx, ident)?,
                ParameterBinding::Rest(spread) => boxed(ctx, spread)?,
            },
            initializer: boxed_opt(ctx, n.initializer(ctx)?)?,
        },
        AstNode::SpreadElement(n) => Syntax::SpreadElement {
            argument: boxed(ctx, n.argument(ctx)?)?,
        },
        AstNode::Identifier(n) => Syntax::Identifier {
            name: n.name(ctx)?,
            type_annotation: boxed_opt(ctx, n.type_annotation(ctx)?)?,
        },
        AstNode::NumberLiteral(n) => Syntax::NumberLiteral {
            value: n.value(ctx)?,
        },
        AstNode::StringLiteral(n) => Syntax::StringLiteral {
            value: n.value(ctx)?,
        },
        AstNode::BooleanLiteral(n) => Syntax::BooleanLiteral {
            value: n.value(ctx)?,
        },
        AstNode::NullLiteral(_) => Syntax::NullLiteral,
        AstNode::UndefinedLiteral(_) => Syntax::UndefinedLiteral,
        AstNode::ThisExpression(_) => Syntax::ThisExpression,
        AstNode::MemberExpression(n) => Syntax::MemberExpression {
            object: boxed(ctx, n.object(ctx)?)?,
            property: boxed(ctx, n.property(ctx)?)?,
            kind: n.kind(ctx)?,
            computed: n.is_computed(ctx)?,
            optional: n.is_optional(ctx)?,
        },
        AstNode::ChainExpression(n) => Syntax::ChainExpression {
            expression: boxed(ctx, n.expression(ctx)?)?,
        },
        AstNode::CallExpression(n) => Syntax::CallExpression {
            callee: boxed(ctx, n.callee(ctx)?)?,
            arguments: list(ctx, n.arguments(ctx)?)?,
            optional: n.is_optional(ctx)?,
            trailing_block: boxed_opt(ctx, n.trailing_block(ctx)?)?,
        },
        AstNode::BinaryExpression(n) => Syntax::BinaryExpression {
            left: boxed(ctx, n.left(ctx)?)?,
            right: boxed(ctx, n.right(ctx)?)?,
            operator: n.operator(ctx)?,
        },
        AstNode::AssignmentExpression(n) => Syntax::AssignmentExpression {
            left: boxed(ctx, n.left(ctx)?)?,
            right: boxed(ctx, n.right(ctx)?)?,
            operator: n.operator(ctx)?,
        },
        AstNode::ConditionalExpression(n) => Syntax::ConditionalExpression {
            test: boxed(ctx, n.test(ctx)?)?,
            consequent: boxed(ctx, n.consequent(ctx)?)?,
            alternate: boxed(ctx, n.alternate(ctx)?)?,
        },
        AstNode::BlockExpression(n) => Syntax::BlockExpression {
            statements: list(ctx, n.statements(ctx)?)?,
        },
        AstNode::EtsPrimitiveType(n) => Syntax::EtsPrimitiveType {
            primitive: n.primitive(ctx)?,
        },
        AstNode::EtsTypeReference(n) => Syntax::EtsTypeReference {
            name: boxed(ctx, n.name(ctx)?)?,
        },
        AstNode::EtsUnionType(n) => Syntax::EtsUnionType {
            types: list(ctx, n.types(ctx)?)?,
        },
    };

    let range = ctx.range(node.raw())?;
    Ok(SyntaxNode {
        syntax,
        modifiers: ctx.modifiers(node.raw())?,
        range: (!range.is_dummy()).then_some(range),
    })
}
