//! Dump to native tree, through the node factory

use arkmirror_ast::{
    ArrowFunctionExpression, AssignmentExpression, AstNode, BinaryExpression, BlockExpression,
    BlockStatement, BooleanLiteral, CallExpression, ChainExpression, ClassDeclaration,
    ClassDefinition, ClassProperty, ConditionalExpression, Context, EtsImportDeclaration,
    EtsModule, EtsParameterExpression, EtsPrimitiveType, EtsTypeReference, EtsUnionType,
    ExpressionStatement, FunctionDeclaration, FunctionExpression, Identifier, IfStatement,
    ImportDeclaration, ImportSpecifier, MemberExpression, MethodDefinition, MirrorError, Node,
    NullLiteral, NumberLiteral, ParameterBinding, Result, ReturnStatement, ScriptFunction,
    SpreadElement, StringLiteral, StructDeclaration, ThisExpression, UndefinedLiteral,
    VariableDeclaration, VariableDeclarator, WhileStatement,
};
use arkmirror_types::NodeKind;

use crate::syntax::{Syntax, SyntaxNode};

pub(crate) struct Builder<'c> {
    ctx: &'c mut Context,
}

impl<'c> Builder<'c> {
    pub(crate) fn new(ctx: &'c mut Context) -> Self {
        Self { ctx }
    }

    fn all(&mut self, nodes: &[SyntaxNode]) -> Result<Vec<AstNode>> {
        nodes.iter().map(|node| self.build(node)).collect()
    }

    fn opt(&mut self, node: &Option<Box<SyntaxNode>>) -> Result<Option<AstNode>> {
        node.as_deref().map(|node| self.build(node)).transpose()
    }

    /// Build a child that sits in a typed slot
    fn typed<N: Node>(&mut self, node: &SyntaxNode) -> Result<N> {
        let built = self.build(node)?;
        N::from_node(self.ctx, built)
    }

    fn typed_all<N: Node>(&mut self, nodes: &[SyntaxNode]) -> Result<Vec<N>> {
        nodes.iter().map(|node| self.typed(node)).collect()
    }

    fn typed_opt<N: Node>(&mut self, node: &Option<Box<SyntaxNode>>) -> Result<Option<N>> {
        node.as_deref().map(|node| self.typed(node)).transpose()
    }

    pub(crate) fn build(&mut self, node: &SyntaxNode) -> Result<AstNode> {
        let built = self.build_syntax(&node.syntax)?;
        if !node.modifiers.is_empty() {
            self.ctx.set_modifiers(built.raw(), node.modifiers)?;
        }
        if let Some(range) = node.range {
            self.ctx.set_range(built.raw(), range)?;
        }
        Ok(built)
    }

    fn build_syntax(&mut self, syntax: &Syntax) -> Result<AstNode> {
        let node: AstNode = match syntax {
            Syntax::EtsModule { name, statements } => {
                let statements = self.all(statements)?;
                EtsModule::create(self.ctx, name, statements)?.into()
            }
            Syntax::BlockStatement { statements } => {
                let statements = self.all(statements)?;
                BlockStatement::create(self.ctx, statements)?.into()
            }
            Syntax::ExpressionStatement { expression } => {
                let expression = self.build(expression)?;
                ExpressionStatement::create(self.ctx, expression)?.into()
            }
            Syntax::VariableDeclaration { kind, declarations } => {
                let declarators = self.typed_all(declarations)?;
                VariableDeclaration::create(self.ctx, *kind, declarators)?.into()
            }
            Syntax::VariableDeclarator { id, init } => {
                let id = self.typed(id)?;
                let init = self.opt(init)?;
                VariableDeclarator::create(self.ctx, id, init)?.into()
            }
            Syntax::ReturnStatement { argument } => {
                let argument = self.opt(argument)?;
                ReturnStatement::create(self.ctx, argument)?.into()
            }
            Syntax::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                let test = self.build(test)?;
                let consequent = self.build(consequent)?;
                let alternate = self.opt(alternate)?;
                IfStatement::create(self.ctx, test, consequent, alternate)?.into()
            }
            Syntax::WhileStatement { test, body } => {
                let test = self.build(test)?;
                let body = self.build(body)?;
                WhileStatement::create(self.ctx, test, body)?.into()
            }
            Syntax::FunctionDeclaration { function } => {
                let function = self.typed(function)?;
                FunctionDeclaration::create(self.ctx, function)?.into()
            }
            Syntax::ClassDeclaration { definition } => {
                let definition = self.typed(definition)?;
                ClassDeclaration::create(self.ctx, definition)?.into()
            }
            Syntax::StructDeclaration { definition } => {
                let definition = self.typed(definition)?;
                StructDeclaration::create(self.ctx, definition)?.into()
            }
            Syntax::ClassDefinition {
                ident,
                super_class,
                body,
            } => {
                let ident = self.typed(ident)?;
                let super_class = self.opt(super_class)?;
                let body = self.all(body)?;
                ClassDefinition::create(self.ctx, ident, super_class, body)?.into()
            }
            Syntax::ClassProperty {
                key,
                value,
                type_annotation,
                computed,
            } => {
                let key = self.build(key)?;
                let value = self.opt(value)?;
                let annotation = self.opt(type_annotation)?;
                ClassProperty::create(self.ctx, key, value, annotation, *computed)?.into()
            }
            Syntax::MethodDefinition {
                kind,
                key,
                value,
                overloads,
                computed,
                ..
            } => {
                let key = self.build(key)?;
                let value = self.typed(value)?;
                let built: Vec<MethodDefinition> = self.typed_all(overloads)?;
                let method =
                    MethodDefinition::create(self.ctx, *kind, key, value, built.clone(), *computed)?;
                for (overload, syntax) in built.iter().zip(overloads) {
                    if let Syntax::MethodDefinition {
                        linked_to_base: true,
                        ..
                    } = syntax.syntax
                    {
                        overload.set_base_overload_method(self.ctx, Some(method))?;
                    }
                }
                method.into()
            }
            Syntax::ImportDeclaration { source, specifiers } => {
                let source = self.typed(source)?;
                let specifiers = self.typed_all(specifiers)?;
                ImportDeclaration::create(self.ctx, source, specifiers)?.into()
            }
            Syntax::EtsImportDeclaration { source, specifiers } => {
                let source = self.typed(source)?;
                let specifiers = self.typed_all(specifiers)?;
                EtsImportDeclaration::create(self.ctx, source, specifiers)?.into()
            }
            Syntax::ImportSpecifier { imported, local } => {
                let imported = self.typed(imported)?;
                let local = self.typed(local)?;
                ImportSpecifier::create(self.ctx, imported, local)?.into()
            }
            Syntax::ScriptFunction {
                id,
                params,
                return_type,
                body,
                flags,
            } => {
                let id = self.typed_opt(id)?;
                let params = self.typed_all(params)?;
                let return_type = self.opt(return_type)?;
                let body = self.opt(body)?;
                ScriptFunction::create(self.ctx, id, params, return_type, body, *flags)?.into()
            }
            Syntax::FunctionExpression { function } => {
                let function = self.typed(function)?;
                FunctionExpression::create(self.ctx, function)?.into()
            }
            Syntax::ArrowFunctionExpression { function } => {
                let function = self.typed(function)?;
                ArrowFunctionExpression::create(self.ctx, function)?.into()
            }
            Syntax::EtsParameterExpression {
                binding,
                initializer,
            } => {
                let binding = match self.build(binding)? {
                    AstNode::Identifier(ident) => ParameterBinding::Identifier(ident),
                    AstNode::SpreadElement(spread) => ParameterBinding::Rest(spread),
                    other => {
                        return Err(MirrorError::KindMismatch {
                            expected: NodeKind::Identifier,
                            actual: other.kind().discriminant(),
                        })
                    }
                };
                let initializer = self.opt(initializer)?;
                EtsParameterExpression::create(self.ctx, binding, initializer)?.into()
            }
            Syntax::SpreadElement { argument } => {
                let argument = self.build(argument)?;
                SpreadElement::create(self.ctx, argument)?.into()
            }
            Syntax::Identifier {
                name,
                type_annotation,
            } => {
                let annotation = self.opt(type_annotation)?;
                Identifier::create_annotated(self.ctx, name, annotation)?.into()
            }
            Syntax::NumberLiteral { value } => NumberLiteral::create(self.ctx, *value)?.into(),
            Syntax::StringLiteral { value } => StringLiteral::create(self.ctx, value)?.into(),
            Syntax::BooleanLiteral { value } => BooleanLiteral::create(self.ctx, *value)?.into(),
            Syntax::NullLiteral => NullLiteral::create(self.ctx)?.into(),
            Syntax::UndefinedLiteral => UndefinedLiteral::create(self.ctx)?.into(),
            Syntax::ThisExpression => ThisExpression::create(self.ctx)?.into(),
            Syntax::MemberExpression {
                object,
                property,
                kind,
                computed,
                optional,
            } => {
                let object = self.build(object)?;
                let property = self.build(property)?;
                MemberExpression::create(self.ctx, object, property, *kind, *computed, *optional)?
                    .into()
            }
            Syntax::ChainExpression { expression } => {
                let expression = self.build(expression)?;
                ChainExpression::create(self.ctx, expression)?.into()
            }
            Syntax::CallExpression {
                callee,
                arguments,
                optional,
                trailing_block,
            } => {
                let callee = self.build(callee)?;
                let arguments = self.all(arguments)?;
                let trailing_block = self.typed_opt(trailing_block)?;
                CallExpression::create(self.ctx, callee, arguments, *optional, trailing_block)?
                    .into()
            }
            Syntax::BinaryExpression {
                left,
                right,
                operator,
            } => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                BinaryExpression::create(self.ctx, left, right, *operator)?.into()
            }
            Syntax::AssignmentExpression {
                left,
                right,
                operator,
            } => {
                let left = self.build(left)?;
                let right = self.build(right)?;
                AssignmentExpression::create(self.ctx, left, right, *operator)?.into()
            }
            Syntax::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                let test = self.build(test)?;
                let consequent = self.build(consequent)?;
                let alternate = self.build(alternate)?;
                ConditionalExpression::create(self.ctx, test, consequent, alternate)?.into()
            }
            Syntax::BlockExpression { statements } => {
                let statements = self.all(statements)?;
                BlockExpression::create(self.ctx, statements)?.into()
            }
            Syntax::EtsPrimitiveType { primitive } => {
                EtsPrimitiveType::create(self.ctx, *primitive)?.into()
            }
            Syntax::EtsTypeReference { name } => {
                let name = self.typed(name)?;
                EtsTypeReference::create(self.ctx, name)?.into()
            }
            Syntax::EtsUnionType { types } => {
                let types = self.all(types)?;
                EtsUnionType::create(self.ctx, types)?.into()
            }
        };
        Ok(node)
    }
}
