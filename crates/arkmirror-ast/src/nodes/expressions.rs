//! Expression nodes

use arkmirror_native::{
    BinaryExpressionData, BlockData, CallExpressionData, ChainExpressionData,
    ConditionalExpressionData, IdentifierData, MemberExpressionData, NodeData, Result,
};
use arkmirror_types::{MemberExpressionKind, TokenType};

use super::{
    ast_node, payload, raw_opt, raws, resolve, resolve_all, resolve_opt, wrap_opt, AsRaw,
    AstNode, BlockStatement, Node,
};
use crate::context::Context;
use crate::identity::IsSame;

ast_node!(Identifier);

impl Identifier {
    pub fn create(ctx: &mut Context, name: &str) -> Result<Self> {
        Self::create_annotated(ctx, name, None)
    }

    /// Identifier with a type annotation (`x: int`)
    pub fn create_annotated(
        ctx: &mut Context,
        name: &str,
        type_annotation: Option<AstNode>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::Identifier(IdentifierData {
            name: name.to_string(),
            type_annotation: None,
        }))?;
        if let Some(annotation) = type_annotation {
            ctx.native_mut()
                .set_type_annotation(raw, Some(annotation.raw()))?;
        }
        Ok(Self::wrap(raw))
    }

    pub fn name(&self, ctx: &Context) -> Result<String> {
        Ok(payload!(ctx, self, Identifier).name.clone())
    }

    pub fn type_annotation(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, Identifier).type_annotation)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        name: &str,
        type_annotation: Option<AstNode>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, Identifier);
        if data.name.as_str().is_same(name)
            && data.type_annotation.is_same(&raw_opt(type_annotation))
        {
            return Ok(self);
        }
        let node = Self::create_annotated(ctx, name, type_annotation)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(NumberLiteral);

impl NumberLiteral {
    pub fn create(ctx: &mut Context, value: f64) -> Result<Self> {
        Ok(Self::wrap(ctx.alloc(NodeData::NumberLiteral(value))?))
    }

    pub fn value(&self, ctx: &Context) -> Result<f64> {
        Ok(*payload!(ctx, self, NumberLiteral))
    }

    pub fn update(self, ctx: &mut Context, value: f64) -> Result<Self> {
        if payload!(ctx, self, NumberLiteral).is_same(&value) {
            return Ok(self);
        }
        let node = Self::create(ctx, value)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(StringLiteral);

impl StringLiteral {
    pub fn create(ctx: &mut Context, value: &str) -> Result<Self> {
        Ok(Self::wrap(
            ctx.alloc(NodeData::StringLiteral(value.to_string()))?,
        ))
    }

    pub fn value(&self, ctx: &Context) -> Result<String> {
        Ok(payload!(ctx, self, StringLiteral).clone())
    }

    pub fn update(self, ctx: &mut Context, value: &str) -> Result<Self> {
        if payload!(ctx, self, StringLiteral).as_str().is_same(value) {
            return Ok(self);
        }
        let node = Self::create(ctx, value)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(BooleanLiteral);

impl BooleanLiteral {
    pub fn create(ctx: &mut Context, value: bool) -> Result<Self> {
        Ok(Self::wrap(ctx.alloc(NodeData::BooleanLiteral(value))?))
    }

    pub fn value(&self, ctx: &Context) -> Result<bool> {
        Ok(*payload!(ctx, self, BooleanLiteral))
    }

    pub fn update(self, ctx: &mut Context, value: bool) -> Result<Self> {
        if payload!(ctx, self, BooleanLiteral).is_same(&value) {
            return Ok(self);
        }
        let node = Self::create(ctx, value)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(NullLiteral);
ast_node!(UndefinedLiteral);
ast_node!(ThisExpression);

impl NullLiteral {
    pub fn create(ctx: &mut Context) -> Result<Self> {
        Ok(Self::wrap(ctx.alloc(NodeData::NullLiteral)?))
    }
}

impl UndefinedLiteral {
    pub fn create(ctx: &mut Context) -> Result<Self> {
        Ok(Self::wrap(ctx.alloc(NodeData::UndefinedLiteral)?))
    }
}

impl ThisExpression {
    pub fn create(ctx: &mut Context) -> Result<Self> {
        Ok(Self::wrap(ctx.alloc(NodeData::ThisExpression)?))
    }
}

ast_node!(
    /// `object.property`, `object[property]`, or their `?.` forms
    MemberExpression
);

impl MemberExpression {
    pub fn create(
        ctx: &mut Context,
        object: AstNode,
        property: AstNode,
        kind: MemberExpressionKind,
        computed: bool,
        optional: bool,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::MemberExpression(MemberExpressionData {
            object: object.raw(),
            property: property.raw(),
            kind,
            computed,
            optional,
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn object(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, MemberExpression).object)
    }

    pub fn property(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, MemberExpression).property)
    }

    pub fn kind(&self, ctx: &Context) -> Result<MemberExpressionKind> {
        Ok(payload!(ctx, self, MemberExpression).kind)
    }

    pub fn is_computed(&self, ctx: &Context) -> Result<bool> {
        Ok(payload!(ctx, self, MemberExpression).computed)
    }

    pub fn is_optional(&self, ctx: &Context) -> Result<bool> {
        Ok(payload!(ctx, self, MemberExpression).optional)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        object: AstNode,
        property: AstNode,
        kind: MemberExpressionKind,
        computed: bool,
        optional: bool,
    ) -> Result<Self> {
        let data = payload!(ctx, self, MemberExpression);
        if data.object.is_same(&object.raw())
            && data.property.is_same(&property.raw())
            && data.kind.is_same(&kind)
            && data.computed.is_same(&computed)
            && data.optional.is_same(&optional)
        {
            return Ok(self);
        }
        let node = Self::create(ctx, object, property, kind, computed, optional)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(
    /// Marks the extent of an optional chain
    ChainExpression
);

impl ChainExpression {
    pub fn create(ctx: &mut Context, expression: AstNode) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ChainExpression(ChainExpressionData {
            expression: expression.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn expression(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, ChainExpression).expression)
    }

    pub fn update(self, ctx: &mut Context, expression: AstNode) -> Result<Self> {
        if payload!(ctx, self, ChainExpression)
            .expression
            .is_same(&expression.raw())
        {
            return Ok(self);
        }
        let node = Self::create(ctx, expression)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(CallExpression);

impl CallExpression {
    pub fn create(
        ctx: &mut Context,
        callee: AstNode,
        arguments: Vec<AstNode>,
        optional: bool,
        trailing_block: Option<BlockStatement>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::CallExpression(CallExpressionData {
            callee: callee.raw(),
            arguments: raws(&arguments),
            optional,
            trailing_block: None,
        }))?;
        if let Some(block) = trailing_block {
            ctx.native_mut().set_trailing_block(raw, Some(block.raw()))?;
        }
        Ok(Self::wrap(raw))
    }

    pub fn callee(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, CallExpression).callee)
    }

    pub fn arguments(&self, ctx: &Context) -> Result<Vec<AstNode>> {
        resolve_all(ctx, &payload!(ctx, self, CallExpression).arguments)
    }

    pub fn is_optional(&self, ctx: &Context) -> Result<bool> {
        Ok(payload!(ctx, self, CallExpression).optional)
    }

    pub fn trailing_block(&self, ctx: &Context) -> Result<Option<BlockStatement>> {
        wrap_opt(ctx, payload!(ctx, self, CallExpression).trailing_block)
    }

    /// Rebuild the call. A `trailing_block` of `None` keeps whatever block
    /// the original carries; it is never a reason to reallocate.
    pub fn update(
        self,
        ctx: &mut Context,
        callee: AstNode,
        arguments: Vec<AstNode>,
        optional: bool,
        trailing_block: Option<BlockStatement>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, CallExpression);
        let block_same = match trailing_block {
            Some(block) => data.trailing_block.is_same(&Some(block.raw())),
            None => true,
        };
        if block_same
            && data.callee.is_same(&callee.raw())
            && data.arguments.is_same(&raws(&arguments))
            && data.optional.is_same(&optional)
        {
            return Ok(self);
        }
        let trailing_block = match trailing_block {
            Some(block) => Some(block),
            None => self.trailing_block(ctx)?,
        };
        let node = Self::create(ctx, callee, arguments, optional, trailing_block)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

macro_rules! binary_like {
    ($name:ident) => {
        impl $name {
            pub fn create(
                ctx: &mut Context,
                left: AstNode,
                right: AstNode,
                operator: TokenType,
            ) -> Result<Self> {
                let raw = ctx.alloc(NodeData::$name(BinaryExpressionData {
                    left: left.raw(),
                    right: right.raw(),
                    operator,
                }))?;
                Ok(Self::wrap(raw))
            }

            pub fn left(&self, ctx: &Context) -> Result<AstNode> {
                resolve(ctx, payload!(ctx, self, $name).left)
            }

            pub fn right(&self, ctx: &Context) -> Result<AstNode> {
                resolve(ctx, payload!(ctx, self, $name).right)
            }

            pub fn operator(&self, ctx: &Context) -> Result<TokenType> {
                Ok(payload!(ctx, self, $name).operator)
            }

            pub fn update(
                self,
                ctx: &mut Context,
                left: AstNode,
                right: AstNode,
                operator: TokenType,
            ) -> Result<Self> {
                let data = payload!(ctx, self, $name);
                if data.left.is_same(&left.raw())
                    && data.right.is_same(&right.raw())
                    && data.operator.is_same(&operator)
                {
                    return Ok(self);
                }
                let node = Self::create(ctx, left, right, operator)?;
                node.on_update(ctx, &self)?;
                Ok(node)
            }
        }
    };
}

ast_node!(BinaryExpression);
ast_node!(AssignmentExpression);
binary_like!(BinaryExpression);
binary_like!(AssignmentExpression);

ast_node!(
    /// `test ? consequent : alternate`
    ConditionalExpression
);

impl ConditionalExpression {
    pub fn create(
        ctx: &mut Context,
        test: AstNode,
        consequent: AstNode,
        alternate: AstNode,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ConditionalExpression(ConditionalExpressionData {
            test: test.raw(),
            consequent: consequent.raw(),
            alternate: alternate.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn test(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, ConditionalExpression).test)
    }

    pub fn consequent(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, ConditionalExpression).consequent)
    }

    pub fn alternate(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, ConditionalExpression).alternate)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        test: AstNode,
        consequent: AstNode,
        alternate: AstNode,
    ) -> Result<Self> {
        let data = payload!(ctx, self, ConditionalExpression);
        if data.test.is_same(&test.raw())
            && data.consequent.is_same(&consequent.raw())
            && data.alternate.is_same(&alternate.raw())
        {
            return Ok(self);
        }
        let node = Self::create(ctx, test, consequent, alternate)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(
    /// A statement list used as an expression; its value is the value of
    /// the last statement.
    BlockExpression
);

impl BlockExpression {
    pub fn create(ctx: &mut Context, statements: Vec<AstNode>) -> Result<Self> {
        let raw = ctx.alloc(NodeData::BlockExpression(BlockData {
            statements: raws(&statements),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn statements(&self, ctx: &Context) -> Result<Vec<AstNode>> {
        resolve_all(ctx, &payload!(ctx, self, BlockExpression).statements)
    }

    pub fn update(self, ctx: &mut Context, statements: Vec<AstNode>) -> Result<Self> {
        if payload!(ctx, self, BlockExpression)
            .statements
            .is_same(&raws(&statements))
        {
            return Ok(self);
        }
        let node = Self::create(ctx, statements)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{EtsPrimitiveType, ExpressionStatement};
    use arkmirror_types::PrimitiveType;

    fn member(ctx: &mut Context, optional: bool) -> MemberExpression {
        let a = Identifier::create(ctx, "a").unwrap();
        let b = Identifier::create(ctx, "b").unwrap();
        MemberExpression::create(
            ctx,
            a.into(),
            b.into(),
            MemberExpressionKind::Property,
            false,
            optional,
        )
        .unwrap()
    }

    #[test]
    fn test_member_accessors() {
        let mut ctx = Context::new();
        let m = member(&mut ctx, true);
        assert!(m.is_optional(&ctx).unwrap());
        assert!(!m.is_computed(&ctx).unwrap());
        assert_eq!(m.kind(&ctx).unwrap(), MemberExpressionKind::Property);
        match m.object(&ctx).unwrap() {
            AstNode::Identifier(id) => assert_eq!(id.name(&ctx).unwrap(), "a"),
            other => panic!("unexpected object {other}"),
        }
    }

    #[test]
    fn test_member_update_scalar_change() {
        let mut ctx = Context::new();
        let m = member(&mut ctx, true);
        let object = m.object(&ctx).unwrap();
        let property = m.property(&ctx).unwrap();

        let same = m
            .update(&mut ctx, object, property, MemberExpressionKind::Property, false, true)
            .unwrap();
        assert_eq!(same, m);

        let plain = m
            .update(&mut ctx, object, property, MemberExpressionKind::Property, false, false)
            .unwrap();
        assert_ne!(plain, m);
        assert_eq!(plain.object(&ctx).unwrap(), object);
        assert!(!plain.is_optional(&ctx).unwrap());
    }

    #[test]
    fn test_number_literal_nan_is_identical() {
        let mut ctx = Context::new();
        let nan = NumberLiteral::create(&mut ctx, f64::NAN).unwrap();
        assert_eq!(nan.update(&mut ctx, f64::NAN).unwrap(), nan);
        assert_eq!(ctx.reallocations(), 0);
    }

    #[test]
    fn test_identifier_annotation() {
        let mut ctx = Context::new();
        let int = EtsPrimitiveType::create(&mut ctx, PrimitiveType::Int).unwrap();
        let x = Identifier::create_annotated(&mut ctx, "x", Some(int.into())).unwrap();
        assert_eq!(x.type_annotation(&ctx).unwrap(), Some(int.into()));
        assert_eq!(ctx.parent(int.raw()).unwrap(), Some(x.raw()));

        let bare = Identifier::create(&mut ctx, "y").unwrap();
        assert_eq!(bare.type_annotation(&ctx).unwrap(), None);
        let annotated = bare.update(&mut ctx, "y", Some(int.into())).unwrap();
        assert_ne!(annotated, bare);
    }

    #[test]
    fn test_call_trailing_block_kept_on_none() {
        let mut ctx = Context::new();
        let f = Identifier::create(&mut ctx, "f").unwrap();
        let g = Identifier::create(&mut ctx, "g").unwrap();
        let one = NumberLiteral::create(&mut ctx, 1.0).unwrap();
        let stmt = ExpressionStatement::create(&mut ctx, one.into()).unwrap();
        let block = BlockStatement::create(&mut ctx, vec![stmt.into()]).unwrap();
        let call = CallExpression::create(&mut ctx, f.into(), Vec::new(), false, Some(block))
            .unwrap();

        let same = call
            .update(&mut ctx, f.into(), Vec::new(), false, None)
            .unwrap();
        assert_eq!(same, call);

        let renamed = call
            .update(&mut ctx, g.into(), Vec::new(), false, None)
            .unwrap();
        assert_ne!(renamed, call);
        assert_eq!(renamed.trailing_block(&ctx).unwrap(), Some(block));
    }

    #[test]
    fn test_call_without_trailing_block_allocates_one_node() {
        let mut ctx = Context::new();
        let f = Identifier::create(&mut ctx, "f").unwrap();
        let before = ctx.native().node_count();
        let call = CallExpression::create(&mut ctx, f.into(), Vec::new(), false, None).unwrap();
        assert_eq!(ctx.native().node_count(), before + 1);
        assert_eq!(call.trailing_block(&ctx).unwrap(), None);
    }

    #[test]
    fn test_binary_and_assignment_are_distinct() {
        let mut ctx = Context::new();
        let a = Identifier::create(&mut ctx, "a").unwrap();
        let one = NumberLiteral::create(&mut ctx, 1.0).unwrap();
        let assign =
            AssignmentExpression::create(&mut ctx, a.into(), one.into(), TokenType::Substitution)
                .unwrap();
        assert!(BinaryExpression::from_raw(&ctx, assign.raw()).is_err());
        assert_eq!(assign.operator(&ctx).unwrap(), TokenType::Substitution);
    }
}
