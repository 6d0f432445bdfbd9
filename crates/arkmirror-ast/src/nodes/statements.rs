//! Statement nodes

use arkmirror_native::{
    BlockData, ExpressionStatementData, IfStatementData, MirrorError, ModuleData, NodeData,
    RawHandle, ReturnStatementData, Result, VariableDeclarationData, VariableDeclaratorData,
    WhileStatementData,
};
use arkmirror_types::VariableDeclarationKind;

use super::{
    ast_node, payload, raw_opt, raws, resolve, resolve_all, resolve_opt, wrap_all, AsRaw,
    AstNode, Identifier, Node,
};
use crate::context::Context;
use crate::identity::IsSame;

ast_node!(
    /// `{ ... }`. A module root is accepted wherever a block is expected.
    BlockStatement
);

impl BlockStatement {
    pub fn create(ctx: &mut Context, statements: Vec<AstNode>) -> Result<Self> {
        let raw = ctx.alloc(NodeData::BlockStatement(BlockData {
            statements: raws(&statements),
        }))?;
        Ok(Self::wrap(raw))
    }

    fn statement_raws<'c>(&self, ctx: &'c Context) -> Result<&'c [RawHandle]> {
        match ctx.data(self.raw())? {
            NodeData::BlockStatement(block) => Ok(block.statements.as_slice()),
            NodeData::EtsModule(module) => Ok(module.statements.as_slice()),
            other => Err(MirrorError::KindMismatch {
                expected: Self::KIND,
                actual: other.discriminant(),
            }),
        }
    }

    pub fn statements(&self, ctx: &Context) -> Result<Vec<AstNode>> {
        resolve_all(ctx, self.statement_raws(ctx)?)
    }

    /// Rebuild with new statements. A module viewed as a block stays a module.
    pub fn update(self, ctx: &mut Context, statements: Vec<AstNode>) -> Result<Self> {
        if self.statement_raws(ctx)?.is_same(raws(&statements).as_slice()) {
            return Ok(self);
        }
        let module_name = match ctx.data(self.raw())? {
            NodeData::EtsModule(module) => Some(module.name.clone()),
            _ => None,
        };
        let node = match module_name {
            Some(name) => Self::wrap(ctx.alloc(NodeData::EtsModule(ModuleData {
                name,
                statements: raws(&statements),
            }))?),
            None => Self::create(ctx, statements)?,
        };
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(ExpressionStatement);

impl ExpressionStatement {
    pub fn create(ctx: &mut Context, expression: AstNode) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ExpressionStatement(ExpressionStatementData {
            expression: expression.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn expression(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, ExpressionStatement).expression)
    }

    pub fn update(self, ctx: &mut Context, expression: AstNode) -> Result<Self> {
        let data = payload!(ctx, self, ExpressionStatement);
        if data.expression.is_same(&expression.raw()) {
            return Ok(self);
        }
        let node = Self::create(ctx, expression)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(VariableDeclaration);

impl VariableDeclaration {
    pub fn create(
        ctx: &mut Context,
        kind: VariableDeclarationKind,
        declarators: Vec<VariableDeclarator>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::VariableDeclaration(VariableDeclarationData {
            kind,
            declarators: raws(&declarators),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn kind(&self, ctx: &Context) -> Result<VariableDeclarationKind> {
        Ok(payload!(ctx, self, VariableDeclaration).kind)
    }

    pub fn declarators(&self, ctx: &Context) -> Result<Vec<VariableDeclarator>> {
        wrap_all(ctx, &payload!(ctx, self, VariableDeclaration).declarators)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        kind: VariableDeclarationKind,
        declarators: Vec<VariableDeclarator>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, VariableDeclaration);
        if data.kind.is_same(&kind) && data.declarators.is_same(&raws(&declarators)) {
            return Ok(self);
        }
        let node = Self::create(ctx, kind, declarators)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(VariableDeclarator);

impl VariableDeclarator {
    pub fn create(ctx: &mut Context, id: Identifier, init: Option<AstNode>) -> Result<Self> {
        let raw = ctx.alloc(NodeData::VariableDeclarator(VariableDeclaratorData {
            id: id.raw(),
            init: raw_opt(init),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn id(&self, ctx: &Context) -> Result<Identifier> {
        Identifier::from_raw(ctx, payload!(ctx, self, VariableDeclarator).id)
    }

    pub fn init(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, VariableDeclarator).init)
    }

    pub fn update(self, ctx: &mut Context, id: Identifier, init: Option<AstNode>) -> Result<Self> {
        let data = payload!(ctx, self, VariableDeclarator);
        if data.id.is_same(&id.raw()) && data.init.is_same(&raw_opt(init)) {
            return Ok(self);
        }
        let node = Self::create(ctx, id, init)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(ReturnStatement);

impl ReturnStatement {
    pub fn create(ctx: &mut Context, argument: Option<AstNode>) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ReturnStatement(ReturnStatementData {
            argument: raw_opt(argument),
        }))?;
        Ok(Self::wrap(raw))
    }

    /// `None` for a bare `return;`
    pub fn argument(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, ReturnStatement).argument)
    }

    pub fn update(self, ctx: &mut Context, argument: Option<AstNode>) -> Result<Self> {
        let data = payload!(ctx, self, ReturnStatement);
        if data.argument.is_same(&raw_opt(argument)) {
            return Ok(self);
        }
        let node = Self::create(ctx, argument)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(IfStatement);

impl IfStatement {
    pub fn create(
        ctx: &mut Context,
        test: AstNode,
        consequent: AstNode,
        alternate: Option<AstNode>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::IfStatement(IfStatementData {
            test: test.raw(),
            consequent: consequent.raw(),
            alternate: raw_opt(alternate),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn test(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, IfStatement).test)
    }

    pub fn consequent(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, IfStatement).consequent)
    }

    pub fn alternate(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, IfStatement).alternate)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        test: AstNode,
        consequent: AstNode,
        alternate: Option<AstNode>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, IfStatement);
        if data.test.is_same(&test.raw())
            && data.consequent.is_same(&consequent.raw())
            && data.alternate.is_same(&raw_opt(alternate))
        {
            return Ok(self);
        }
        let node = Self::create(ctx, test, consequent, alternate)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(WhileStatement);

impl WhileStatement {
    pub fn create(ctx: &mut Context, test: AstNode, body: AstNode) -> Result<Self> {
        let raw = ctx.alloc(NodeData::WhileStatement(WhileStatementData {
            test: test.raw(),
            body: body.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn test(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, WhileStatement).test)
    }

    pub fn body(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, WhileStatement).body)
    }

    pub fn update(self, ctx: &mut Context, test: AstNode, body: AstNode) -> Result<Self> {
        let data = payload!(ctx, self, WhileStatement);
        if data.test.is_same(&test.raw()) && data.body.is_same(&body.raw()) {
            return Ok(self);
        }
        let node = Self::create(ctx, test, body)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}
