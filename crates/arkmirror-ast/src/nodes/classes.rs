//! Class-like declarations and class elements

use arkmirror_native::{
    ClassDeclarationData, ClassDefinitionData, ClassPropertyData, MethodDefinitionData,
    NodeData, Result,
};
use arkmirror_types::MethodDefinitionKind;

use super::{
    ast_node, payload, raw_opt, raws, resolve, resolve_all, resolve_opt, wrap_all, wrap_opt,
    AsRaw, AstNode, FunctionExpression, Identifier, Node,
};
use crate::context::Context;
use crate::identity::IsSame;

ast_node!(
    /// `class Name { ... }`. Struct declarations read as class declarations.
    ClassDeclaration
);

impl ClassDeclaration {
    pub fn create(ctx: &mut Context, definition: ClassDefinition) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ClassDeclaration(ClassDeclarationData {
            definition: definition.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn definition(&self, ctx: &Context) -> Result<ClassDefinition> {
        let data = payload!(ctx, self, ClassDeclaration | StructDeclaration);
        ClassDefinition::from_raw(ctx, data.definition)
    }

    /// Rebuild; a struct viewed through this wrapper stays a struct.
    pub fn update(self, ctx: &mut Context, definition: ClassDefinition) -> Result<Self> {
        let data = payload!(ctx, self, ClassDeclaration | StructDeclaration);
        if data.definition.is_same(&definition.raw()) {
            return Ok(self);
        }
        let is_struct = matches!(ctx.data(self.raw())?, NodeData::StructDeclaration(_));
        let data = ClassDeclarationData {
            definition: definition.raw(),
        };
        let raw = if is_struct {
            ctx.alloc(NodeData::StructDeclaration(data))?
        } else {
            ctx.alloc(NodeData::ClassDeclaration(data))?
        };
        let node = Self::wrap(raw);
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(StructDeclaration);

impl StructDeclaration {
    pub fn create(ctx: &mut Context, definition: ClassDefinition) -> Result<Self> {
        let raw = ctx.alloc(NodeData::StructDeclaration(ClassDeclarationData {
            definition: definition.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn definition(&self, ctx: &Context) -> Result<ClassDefinition> {
        ClassDefinition::from_raw(ctx, payload!(ctx, self, StructDeclaration).definition)
    }

    pub fn update(self, ctx: &mut Context, definition: ClassDefinition) -> Result<Self> {
        if payload!(ctx, self, StructDeclaration)
            .definition
            .is_same(&definition.raw())
        {
            return Ok(self);
        }
        let node = Self::create(ctx, definition)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(ClassDefinition);

impl ClassDefinition {
    pub fn create(
        ctx: &mut Context,
        ident: Identifier,
        super_class: Option<AstNode>,
        body: Vec<AstNode>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ClassDefinition(ClassDefinitionData {
            ident: ident.raw(),
            super_class: raw_opt(super_class),
            body: raws(&body),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn ident(&self, ctx: &Context) -> Result<Identifier> {
        Identifier::from_raw(ctx, payload!(ctx, self, ClassDefinition).ident)
    }

    pub fn super_class(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, ClassDefinition).super_class)
    }

    pub fn body(&self, ctx: &Context) -> Result<Vec<AstNode>> {
        resolve_all(ctx, &payload!(ctx, self, ClassDefinition).body)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        ident: Identifier,
        super_class: Option<AstNode>,
        body: Vec<AstNode>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, ClassDefinition);
        if data.ident.is_same(&ident.raw())
            && data.super_class.is_same(&raw_opt(super_class))
            && data.body.is_same(&raws(&body))
        {
            return Ok(self);
        }
        let node = Self::create(ctx, ident, super_class, body)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(ClassProperty);

impl ClassProperty {
    pub fn create(
        ctx: &mut Context,
        key: AstNode,
        value: Option<AstNode>,
        type_annotation: Option<AstNode>,
        is_computed: bool,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ClassProperty(ClassPropertyData {
            key: key.raw(),
            value: raw_opt(value),
            type_annotation: None,
            is_computed,
        }))?;
        if let Some(annotation) = type_annotation {
            ctx.native_mut()
                .set_type_annotation(raw, Some(annotation.raw()))?;
        }
        Ok(Self::wrap(raw))
    }

    pub fn key(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, ClassProperty).key)
    }

    pub fn value(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, ClassProperty).value)
    }

    pub fn type_annotation(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, ClassProperty).type_annotation)
    }

    pub fn is_computed(&self, ctx: &Context) -> Result<bool> {
        Ok(payload!(ctx, self, ClassProperty).is_computed)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        key: AstNode,
        value: Option<AstNode>,
        type_annotation: Option<AstNode>,
        is_computed: bool,
    ) -> Result<Self> {
        let data = payload!(ctx, self, ClassProperty);
        if data.key.is_same(&key.raw())
            && data.value.is_same(&raw_opt(value))
            && data.type_annotation.is_same(&raw_opt(type_annotation))
            && data.is_computed.is_same(&is_computed)
        {
            return Ok(self);
        }
        let node = Self::create(ctx, key, value, type_annotation, is_computed)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(
    /// A method, constructor or accessor. Overload signatures hang off the
    /// implementation they belong to and point back at it.
    MethodDefinition {
        fn on_update(&self, ctx: &mut Context, original: &Self) -> Result<()> {
            ctx.supersede(original.raw(), self.raw())?;
            let base = ctx.native().base_overload_method(original.raw())?;
            ctx.native_mut().set_base_overload_method(self.raw(), base)
        }
    }
);

impl MethodDefinition {
    pub fn create(
        ctx: &mut Context,
        kind: MethodDefinitionKind,
        key: AstNode,
        value: FunctionExpression,
        overloads: Vec<MethodDefinition>,
        is_computed: bool,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::MethodDefinition(MethodDefinitionData {
            kind,
            key: key.raw(),
            value: value.raw(),
            is_computed,
            overloads: Vec::new(),
            base_overload_method: None,
        }))?;
        if !overloads.is_empty() {
            ctx.native_mut().set_overloads(raw, raws(&overloads))?;
        }
        Ok(Self::wrap(raw))
    }

    pub fn kind(&self, ctx: &Context) -> Result<MethodDefinitionKind> {
        Ok(payload!(ctx, self, MethodDefinition).kind)
    }

    pub fn key(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, MethodDefinition).key)
    }

    pub fn value(&self, ctx: &Context) -> Result<FunctionExpression> {
        FunctionExpression::from_raw(ctx, payload!(ctx, self, MethodDefinition).value)
    }

    pub fn overloads(&self, ctx: &Context) -> Result<Vec<MethodDefinition>> {
        wrap_all(ctx, &payload!(ctx, self, MethodDefinition).overloads)
    }

    pub fn is_computed(&self, ctx: &Context) -> Result<bool> {
        Ok(payload!(ctx, self, MethodDefinition).is_computed)
    }

    pub fn is_constructor(&self, ctx: &Context) -> Result<bool> {
        Ok(self.kind(ctx)? == MethodDefinitionKind::Constructor)
    }

    /// Method this overload belongs to
    pub fn base_overload_method(&self, ctx: &Context) -> Result<Option<MethodDefinition>> {
        wrap_opt(ctx, ctx.native().base_overload_method(self.raw())?)
    }

    /// Point this overload at `base`. Metadata only: never reallocates.
    pub fn set_base_overload_method(
        &self,
        ctx: &mut Context,
        base: Option<MethodDefinition>,
    ) -> Result<()> {
        ctx.native_mut()
            .set_base_overload_method(self.raw(), raw_opt(base))
    }

    pub fn update(
        self,
        ctx: &mut Context,
        kind: MethodDefinitionKind,
        key: AstNode,
        value: FunctionExpression,
        overloads: Vec<MethodDefinition>,
        is_computed: bool,
    ) -> Result<Self> {
        let data = payload!(ctx, self, MethodDefinition);
        if data.kind.is_same(&kind)
            && data.key.is_same(&key.raw())
            && data.value.is_same(&value.raw())
            && data.overloads.is_same(&raws(&overloads))
            && data.is_computed.is_same(&is_computed)
        {
            return Ok(self);
        }
        let node = Self::create(ctx, kind, key, value, overloads, is_computed)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}
