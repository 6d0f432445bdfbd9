//! Functions, function literals and parameters

use arkmirror_native::{
    FunctionHolderData, MirrorError, NodeData, ParameterData, RawHandle, Result,
    ScriptFunctionData, SpreadElementData,
};
use arkmirror_types::ScriptFunctionFlags;

use super::{
    ast_node, payload, raw_opt, raws, resolve, resolve_opt, wrap_all, wrap_opt, AsRaw, AstNode,
    Identifier, Node,
};
use crate::context::Context;
use crate::identity::IsSame;

ast_node!(
    /// The function proper: signature plus optional body. Declarations,
    /// function expressions, arrows and methods all hold one.
    ScriptFunction
);

impl ScriptFunction {
    pub fn create(
        ctx: &mut Context,
        id: Option<Identifier>,
        params: Vec<EtsParameterExpression>,
        return_type: Option<AstNode>,
        body: Option<AstNode>,
        flags: ScriptFunctionFlags,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ScriptFunction(ScriptFunctionData {
            id: raw_opt(id),
            params: raws(&params),
            return_type: None,
            body: raw_opt(body),
            flags,
        }))?;
        if let Some(return_type) = return_type {
            ctx.native_mut()
                .set_return_type(raw, Some(return_type.raw()))?;
        }
        Ok(Self::wrap(raw))
    }

    pub fn id(&self, ctx: &Context) -> Result<Option<Identifier>> {
        wrap_opt(ctx, payload!(ctx, self, ScriptFunction).id)
    }

    pub fn params(&self, ctx: &Context) -> Result<Vec<EtsParameterExpression>> {
        wrap_all(ctx, &payload!(ctx, self, ScriptFunction).params)
    }

    pub fn return_type(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, ScriptFunction).return_type)
    }

    /// `None` for overload signatures and ambient declarations
    pub fn body(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, ScriptFunction).body)
    }

    pub fn flags(&self, ctx: &Context) -> Result<ScriptFunctionFlags> {
        Ok(payload!(ctx, self, ScriptFunction).flags)
    }

    pub fn is_constructor(&self, ctx: &Context) -> Result<bool> {
        Ok(self.flags(ctx)?.contains(ScriptFunctionFlags::CONSTRUCTOR))
    }

    pub fn is_setter(&self, ctx: &Context) -> Result<bool> {
        Ok(self.flags(ctx)?.contains(ScriptFunctionFlags::SETTER))
    }

    pub fn update(
        self,
        ctx: &mut Context,
        id: Option<Identifier>,
        params: Vec<EtsParameterExpression>,
        return_type: Option<AstNode>,
        body: Option<AstNode>,
        flags: ScriptFunctionFlags,
    ) -> Result<Self> {
        let data = payload!(ctx, self, ScriptFunction);
        if data.id.is_same(&raw_opt(id))
            && data.params.is_same(&raws(&params))
            && data.return_type.is_same(&raw_opt(return_type))
            && data.body.is_same(&raw_opt(body))
            && data.flags.is_same(&flags)
        {
            return Ok(self);
        }
        let node = Self::create(ctx, id, params, return_type, body, flags)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

macro_rules! function_holder {
    ($name:ident) => {
        impl $name {
            pub fn create(ctx: &mut Context, function: ScriptFunction) -> Result<Self> {
                let raw = ctx.alloc(NodeData::$name(FunctionHolderData {
                    function: function.raw(),
                }))?;
                Ok(Self::wrap(raw))
            }

            pub fn function(&self, ctx: &Context) -> Result<ScriptFunction> {
                ScriptFunction::from_raw(ctx, payload!(ctx, self, $name).function)
            }

            pub fn update(self, ctx: &mut Context, function: ScriptFunction) -> Result<Self> {
                if payload!(ctx, self, $name).function.is_same(&function.raw()) {
                    return Ok(self);
                }
                let node = Self::create(ctx, function)?;
                node.on_update(ctx, &self)?;
                Ok(node)
            }
        }
    };
}

ast_node!(FunctionDeclaration);
ast_node!(FunctionExpression);
ast_node!(ArrowFunctionExpression);
function_holder!(FunctionDeclaration);
function_holder!(FunctionExpression);
function_holder!(ArrowFunctionExpression);

/// What a parameter binds: a plain name or a rest element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterBinding {
    Identifier(Identifier),
    Rest(SpreadElement),
}

impl AsRaw for ParameterBinding {
    fn raw(&self) -> RawHandle {
        match self {
            ParameterBinding::Identifier(ident) => ident.raw(),
            ParameterBinding::Rest(spread) => spread.raw(),
        }
    }
}

impl From<ParameterBinding> for AstNode {
    fn from(binding: ParameterBinding) -> Self {
        match binding {
            ParameterBinding::Identifier(ident) => ident.into(),
            ParameterBinding::Rest(spread) => spread.into(),
        }
    }
}

ast_node!(EtsParameterExpression);

impl EtsParameterExpression {
    pub fn create(
        ctx: &mut Context,
        binding: ParameterBinding,
        initializer: Option<AstNode>,
    ) -> Result<Self> {
        let (ident, spread) = match binding {
            ParameterBinding::Identifier(ident) => (Some(ident.raw()), None),
            ParameterBinding::Rest(spread) => (None, Some(spread.raw())),
        };
        let raw = ctx.alloc(NodeData::EtsParameterExpression(ParameterData {
            ident,
            spread,
            initializer: raw_opt(initializer),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn binding(&self, ctx: &Context) -> Result<ParameterBinding> {
        let data = payload!(ctx, self, EtsParameterExpression);
        match (data.ident, data.spread) {
            (Some(ident), _) => Ok(ParameterBinding::Identifier(Identifier::from_raw(
                ctx, ident,
            )?)),
            (None, Some(spread)) => Ok(ParameterBinding::Rest(SpreadElement::from_raw(
                ctx, spread,
            )?)),
            (None, None) => Err(MirrorError::InvalidHandle {
                operation: "EtsParameterExpression::binding",
            }),
        }
    }

    pub fn is_rest(&self, ctx: &Context) -> Result<bool> {
        Ok(matches!(self.binding(ctx)?, ParameterBinding::Rest(_)))
    }

    pub fn initializer(&self, ctx: &Context) -> Result<Option<AstNode>> {
        resolve_opt(ctx, payload!(ctx, self, EtsParameterExpression).initializer)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        binding: ParameterBinding,
        initializer: Option<AstNode>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, EtsParameterExpression);
        let binding_same = match binding {
            ParameterBinding::Identifier(ident) => data.ident.is_same(&Some(ident.raw())),
            ParameterBinding::Rest(spread) => data.spread.is_same(&Some(spread.raw())),
        };
        if binding_same && data.initializer.is_same(&raw_opt(initializer)) {
            return Ok(self);
        }
        let node = Self::create(ctx, binding, initializer)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(
    /// `...argument`
    SpreadElement
);

impl SpreadElement {
    pub fn create(ctx: &mut Context, argument: AstNode) -> Result<Self> {
        let raw = ctx.alloc(NodeData::SpreadElement(SpreadElementData {
            argument: argument.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn argument(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, payload!(ctx, self, SpreadElement).argument)
    }

    pub fn update(self, ctx: &mut Context, argument: AstNode) -> Result<Self> {
        if payload!(ctx, self, SpreadElement)
            .argument
            .is_same(&argument.raw())
        {
            return Ok(self);
        }
        let node = Self::create(ctx, argument)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{BlockStatement, EtsPrimitiveType};
    use arkmirror_types::PrimitiveType;

    fn param(ctx: &mut Context, name: &str) -> EtsParameterExpression {
        let ident = Identifier::create(ctx, name).unwrap();
        EtsParameterExpression::create(ctx, ParameterBinding::Identifier(ident), None).unwrap()
    }

    #[test]
    fn test_script_function_fields() {
        let mut ctx = Context::new();
        let name = Identifier::create(&mut ctx, "f").unwrap();
        let p = param(&mut ctx, "x");
        let body = BlockStatement::create(&mut ctx, Vec::new()).unwrap();
        let function = ScriptFunction::create(
            &mut ctx,
            Some(name),
            vec![p],
            None,
            Some(body.into()),
            ScriptFunctionFlags::NONE,
        )
        .unwrap();

        assert_eq!(function.id(&ctx).unwrap(), Some(name));
        assert_eq!(function.params(&ctx).unwrap(), vec![p]);
        assert_eq!(function.return_type(&ctx).unwrap(), None);
        assert_eq!(function.body(&ctx).unwrap(), Some(body.into()));
        assert!(!function.is_constructor(&ctx).unwrap());
    }

    #[test]
    fn test_script_function_return_type_change() {
        let mut ctx = Context::new();
        let body = BlockStatement::create(&mut ctx, Vec::new()).unwrap();
        let function = ScriptFunction::create(
            &mut ctx,
            None,
            Vec::new(),
            None,
            Some(body.into()),
            ScriptFunctionFlags::METHOD,
        )
        .unwrap();
        let void = EtsPrimitiveType::create(&mut ctx, PrimitiveType::Void).unwrap();

        let annotated = function
            .update(
                &mut ctx,
                None,
                Vec::new(),
                Some(void.into()),
                Some(body.into()),
                ScriptFunctionFlags::METHOD,
            )
            .unwrap();
        assert_ne!(annotated, function);
        assert_eq!(annotated.return_type(&ctx).unwrap(), Some(void.into()));
        assert_eq!(annotated.body(&ctx).unwrap(), Some(body.into()));
        assert_eq!(annotated.flags(&ctx).unwrap(), ScriptFunctionFlags::METHOD);
    }

    #[test]
    fn test_parameter_binding_slots() {
        let mut ctx = Context::new();
        let rest_name = Identifier::create(&mut ctx, "rest").unwrap();
        let spread = SpreadElement::create(&mut ctx, rest_name.into()).unwrap();
        let rest = EtsParameterExpression::create(&mut ctx, ParameterBinding::Rest(spread), None)
            .unwrap();
        assert!(rest.is_rest(&ctx).unwrap());
        assert_eq!(
            rest.update(&mut ctx, ParameterBinding::Rest(spread), None)
                .unwrap(),
            rest
        );

        // Switching from the rest slot to the identifier slot reallocates
        let plain = rest
            .update(&mut ctx, ParameterBinding::Identifier(rest_name), None)
            .unwrap();
        assert_ne!(plain, rest);
        assert_eq!(
            plain.binding(&ctx).unwrap(),
            ParameterBinding::Identifier(rest_name)
        );
    }

    #[test]
    fn test_holder_update() {
        let mut ctx = Context::new();
        let f1 = ScriptFunction::create(
            &mut ctx,
            None,
            Vec::new(),
            None,
            None,
            ScriptFunctionFlags::ARROW,
        )
        .unwrap();
        let f2 = ScriptFunction::create(
            &mut ctx,
            None,
            Vec::new(),
            None,
            None,
            ScriptFunctionFlags::ARROW,
        )
        .unwrap();
        let arrow = ArrowFunctionExpression::create(&mut ctx, f1).unwrap();
        assert_eq!(arrow.update(&mut ctx, f1).unwrap(), arrow);
        let other = arrow.update(&mut ctx, f2).unwrap();
        assert_eq!(other.function(&ctx).unwrap(), f2);
        assert_eq!(ctx.reallocations(), 1);
    }
}
