//! Optional-chaining elimination
//!
//! `object?.property` becomes a block expression
//!
//! ```text
//! ({
//!   let gensym%%_1 = object;
//!   gensym%%_1 === undefined ? undefined : gensym%%_1.property;
//! })
//! ```
//!
//! Rewrites run after a node's children were visited, so in `a?.b?.c` the
//! inner access is already a plain block expression when the outer one is
//! lowered and is bound to the outer temporary like any other object.

use arkmirror_ast::{
    visit_each_child, AsRaw, AstNode, AstVisitor, BinaryExpression, BlockExpression,
    ConditionalExpression, Context, EtsModule, ExpressionStatement, Identifier, MemberExpression,
    Node, Result, UndefinedLiteral, VariableDeclaration, VariableDeclarator,
};
use arkmirror_types::{TokenType, VariableDeclarationKind};
use log::debug;

use crate::names::TempNames;
use crate::pipeline::{visit_module, Transformer};

pub struct OptionalChainLowering<'n> {
    names: &'n mut TempNames,
    lowered: usize,
}

impl<'n> OptionalChainLowering<'n> {
    pub fn new(names: &'n mut TempNames) -> Self {
        Self { names, lowered: 0 }
    }

    /// Accesses rewritten so far
    pub fn lowered(&self) -> usize {
        self.lowered
    }

    fn lower(&mut self, ctx: &mut Context, member: MemberExpression) -> Result<AstNode> {
        let object = member.object(ctx)?;
        let property = member.property(ctx)?;
        let kind = member.kind(ctx)?;
        let computed = member.is_computed(ctx)?;
        let temp = self.names.fresh();

        // let <temp> = <object>;
        let binding = Identifier::create(ctx, &temp)?;
        let declarator = VariableDeclarator::create(ctx, binding, Some(object))?;
        let declaration =
            VariableDeclaration::create(ctx, VariableDeclarationKind::Let, vec![declarator])?;

        // <temp> === undefined ? undefined : <temp>.<property>;
        let tested = Identifier::create(ctx, &temp)?;
        let undefined = UndefinedLiteral::create(ctx)?;
        let test = BinaryExpression::create(
            ctx,
            tested.into(),
            undefined.into(),
            TokenType::StrictEqual,
        )?;
        let fallback = UndefinedLiteral::create(ctx)?;
        let receiver = Identifier::create(ctx, &temp)?;
        let access = MemberExpression::create(ctx, receiver.into(), property, kind, computed, false)?;
        let conditional =
            ConditionalExpression::create(ctx, test.into(), fallback.into(), access.into())?;
        let value = ExpressionStatement::create(ctx, conditional.into())?;

        let block = BlockExpression::create(ctx, vec![declaration.into(), value.into()])?;
        block.set_range(ctx, member.range(ctx)?)?;
        ctx.set_origin(block.raw(), member.raw())?;

        debug!("lowered optional access {} through `{}`", member.raw(), temp);
        self.lowered += 1;
        Ok(block.into())
    }
}

impl AstVisitor for OptionalChainLowering<'_> {
    fn visit(&mut self, ctx: &mut Context, node: AstNode) -> Result<AstNode> {
        let node = visit_each_child(self, ctx, node)?;
        match node {
            AstNode::ChainExpression(chain) => match chain.expression(ctx)? {
                AstNode::MemberExpression(member) => self.lower(ctx, member),
                _ => Ok(node),
            },
            AstNode::MemberExpression(member) if member.is_optional(ctx)? => {
                self.lower(ctx, member)
            }
            _ => Ok(node),
        }
    }
}

impl Transformer for OptionalChainLowering<'_> {
    fn name(&self) -> &'static str {
        "optional-chaining"
    }

    fn transform(&mut self, ctx: &mut Context, root: EtsModule) -> Result<EtsModule> {
        visit_module(self, ctx, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkmirror_ast::{print, ChainExpression, NumberLiteral};
    use arkmirror_types::MemberExpressionKind;

    fn member(ctx: &mut Context, object: AstNode, property: &str, optional: bool) -> AstNode {
        let property = Identifier::create(ctx, property).unwrap();
        MemberExpression::create(
            ctx,
            object,
            property.into(),
            MemberExpressionKind::Property,
            false,
            optional,
        )
        .unwrap()
        .into()
    }

    fn module_of(ctx: &mut Context, expression: AstNode) -> EtsModule {
        let statement = ExpressionStatement::create(ctx, expression).unwrap();
        EtsModule::create(ctx, "test", vec![statement.into()]).unwrap()
    }

    #[test]
    fn test_optional_member_becomes_block() {
        let mut ctx = Context::new();
        let a = Identifier::create(&mut ctx, "a").unwrap();
        let access = member(&mut ctx, a.into(), "b", true);
        let module = module_of(&mut ctx, access);

        let mut names = TempNames::default();
        let mut pass = OptionalChainLowering::new(&mut names);
        let lowered = pass.transform(&mut ctx, module).unwrap();
        assert_eq!(pass.lowered(), 1);

        assert_eq!(
            print(&ctx, lowered.into()).unwrap(),
            "({\n  let gensym%%_1 = a;\n  (gensym%%_1 === undefined) ? undefined : gensym%%_1.b;\n});\n"
        );
    }

    #[test]
    fn test_nested_chain_uses_two_temps() {
        let mut ctx = Context::new();
        let a = Identifier::create(&mut ctx, "a").unwrap();
        let inner = member(&mut ctx, a.into(), "b", true);
        let outer = member(&mut ctx, inner, "c", true);
        let chain = ChainExpression::create(&mut ctx, outer).unwrap();
        let module = module_of(&mut ctx, chain.into());

        let mut names = TempNames::default();
        let lowered = OptionalChainLowering::new(&mut names)
            .transform(&mut ctx, module)
            .unwrap();
        assert_eq!(names.issued(), 2);

        let text = print(&ctx, lowered.into()).unwrap();
        assert!(text.contains("let gensym%%_1 = a;"));
        assert!(text.contains("gensym%%_2.c"));
        assert!(!text.contains("?."));
    }

    #[test]
    fn test_chain_over_plain_member_is_lowered() {
        let mut ctx = Context::new();
        let a = Identifier::create(&mut ctx, "a").unwrap();
        let access = member(&mut ctx, a.into(), "b", false);
        let chain = ChainExpression::create(&mut ctx, access).unwrap();
        let module = module_of(&mut ctx, chain.into());

        let mut names = TempNames::default();
        let lowered = OptionalChainLowering::new(&mut names)
            .transform(&mut ctx, module)
            .unwrap();
        let statement = lowered.statements(&ctx).unwrap()[0];
        let AstNode::ExpressionStatement(statement) = statement else {
            panic!("expected an expression statement, got {}", statement);
        };
        assert_eq!(
            statement.expression(&ctx).unwrap().kind(),
            arkmirror_types::NodeKind::BlockExpression
        );
    }

    #[test]
    fn test_chain_over_non_member_passes_through() {
        let mut ctx = Context::new();
        let one = NumberLiteral::create(&mut ctx, 1.0).unwrap();
        let chain = ChainExpression::create(&mut ctx, one.into()).unwrap();
        let module = module_of(&mut ctx, chain.into());

        let mut names = TempNames::default();
        let lowered = OptionalChainLowering::new(&mut names)
            .transform(&mut ctx, module)
            .unwrap();
        assert_eq!(lowered, module);
        assert_eq!(names.issued(), 0);
        assert_eq!(ctx.reallocations(), 0);
    }

    #[test]
    fn test_lowered_block_keeps_range_and_origin() {
        let mut ctx = Context::new();
        let a = Identifier::create(&mut ctx, "a").unwrap();
        let access = member(&mut ctx, a.into(), "b", true);
        let range = arkmirror_types::SourceRange::new(4, 8);
        ctx.set_range(access.raw(), range).unwrap();
        let module = module_of(&mut ctx, access);

        let mut names = TempNames::default();
        let lowered = OptionalChainLowering::new(&mut names)
            .transform(&mut ctx, module)
            .unwrap();
        let AstNode::ExpressionStatement(statement) = lowered.statements(&ctx).unwrap()[0] else {
            panic!("expected an expression statement");
        };
        let block = statement.expression(&ctx).unwrap();
        assert_eq!(ctx.range(block.raw()).unwrap(), range);
        assert_eq!(ctx.origin(block.raw()), Some(access.raw()));
    }
}
