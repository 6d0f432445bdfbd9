//! Overload base-linking
//!
//! Every overload signature of a method points back at the method that
//! owns it. The link is metadata: stamping it never reallocates anything,
//! and stamping it again overwrites it with the same value.

use arkmirror_ast::{
    visit_each_child, AsRaw, AstNode, AstVisitor, Context, EtsModule, MethodDefinition, Result,
};
use log::debug;

use crate::pipeline::{visit_module, Transformer};

#[derive(Debug, Default)]
pub struct OverloadLinking {
    linked: usize,
}

impl OverloadLinking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overload signatures stamped so far
    pub fn linked(&self) -> usize {
        self.linked
    }

    fn link(&mut self, ctx: &mut Context, method: MethodDefinition) -> Result<AstNode> {
        let overloads = method.overloads(ctx)?;
        if overloads.is_empty() {
            return Ok(method.into());
        }
        for overload in &overloads {
            overload.set_base_overload_method(ctx, Some(method))?;
        }
        debug!("linked {} overloads to {}", overloads.len(), method.raw());
        self.linked += overloads.len();

        let kind = method.kind(ctx)?;
        let key = method.key(ctx)?;
        let value = method.value(ctx)?;
        let computed = method.is_computed(ctx)?;
        Ok(method
            .update(ctx, kind, key, value, overloads, computed)?
            .into())
    }
}

impl AstVisitor for OverloadLinking {
    fn visit(&mut self, ctx: &mut Context, node: AstNode) -> Result<AstNode> {
        let node = visit_each_child(self, ctx, node)?;
        match node {
            AstNode::MethodDefinition(method) => self.link(ctx, method),
            _ => Ok(node),
        }
    }
}

impl Transformer for OverloadLinking {
    fn name(&self) -> &'static str {
        "overload-linking"
    }

    fn transform(&mut self, ctx: &mut Context, root: EtsModule) -> Result<EtsModule> {
        visit_module(self, ctx, root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkmirror_ast::{
        BlockStatement, ClassDeclaration, ClassDefinition, FunctionExpression, Identifier,
        ScriptFunction,
    };
    use arkmirror_types::{MethodDefinitionKind, ScriptFunctionFlags};

    fn method(ctx: &mut Context, body: bool, overloads: Vec<MethodDefinition>) -> MethodDefinition {
        let body = if body {
            Some(BlockStatement::create(ctx, Vec::new()).unwrap().into())
        } else {
            None
        };
        let flags = if body.is_some() {
            ScriptFunctionFlags::METHOD
        } else {
            ScriptFunctionFlags::METHOD | ScriptFunctionFlags::OVERLOAD
        };
        let f = ScriptFunction::create(ctx, None, Vec::new(), None, body, flags).unwrap();
        let value = FunctionExpression::create(ctx, f).unwrap();
        let key = Identifier::create(ctx, "m").unwrap();
        MethodDefinition::create(
            ctx,
            MethodDefinitionKind::Method,
            key.into(),
            value,
            overloads,
            false,
        )
        .unwrap()
    }

    fn class_module(ctx: &mut Context, members: Vec<AstNode>) -> EtsModule {
        let name = Identifier::create(ctx, "C").unwrap();
        let definition = ClassDefinition::create(ctx, name, None, members).unwrap();
        let class = ClassDeclaration::create(ctx, definition).unwrap();
        EtsModule::create(ctx, "test", vec![class.into()]).unwrap()
    }

    #[test]
    fn test_overloads_point_at_their_method() {
        let mut ctx = Context::new();
        let overloads: Vec<_> = (0..3).map(|_| method(&mut ctx, false, Vec::new())).collect();
        let base = method(&mut ctx, true, overloads.clone());
        let module = class_module(&mut ctx, vec![base.into()]);

        let mut pass = OverloadLinking::new();
        let out = pass.transform(&mut ctx, module).unwrap();
        assert_eq!(out, module);
        assert_eq!(ctx.reallocations(), 0);
        assert_eq!(pass.linked(), 3);
        for overload in overloads {
            assert_eq!(overload.base_overload_method(&ctx).unwrap(), Some(base));
        }
        assert_eq!(base.base_overload_method(&ctx).unwrap(), None);
    }

    #[test]
    fn test_relinking_is_fixed_point() {
        let mut ctx = Context::new();
        let overload = method(&mut ctx, false, Vec::new());
        let base = method(&mut ctx, true, vec![overload]);
        let module = class_module(&mut ctx, vec![base.into()]);

        let first = OverloadLinking::new().transform(&mut ctx, module).unwrap();
        let second = OverloadLinking::new().transform(&mut ctx, first).unwrap();
        assert_eq!(second, first);
        assert_eq!(ctx.reallocations(), 0);
        assert_eq!(overload.base_overload_method(&ctx).unwrap(), Some(base));
    }

    #[test]
    fn test_method_without_overloads_untouched() {
        let mut ctx = Context::new();
        let plain = method(&mut ctx, true, Vec::new());
        let module = class_module(&mut ctx, vec![plain.into()]);
        let mut pass = OverloadLinking::new();
        assert_eq!(pass.transform(&mut ctx, module).unwrap(), module);
        assert_eq!(pass.linked(), 0);
    }

    #[test]
    fn test_links_survive_export_and_reload() {
        let mut ctx = Context::new();
        let overloads: Vec<_> = (0..2).map(|_| method(&mut ctx, false, Vec::new())).collect();
        let base = method(&mut ctx, true, overloads);
        let module = class_module(&mut ctx, vec![base.into()]);
        let linked = OverloadLinking::new().transform(&mut ctx, module).unwrap();

        let dump = arkmirror_loader::export(&ctx, linked.into()).unwrap();
        let text = serde_json::to_string(&dump).unwrap();
        assert_eq!(text.matches("\"linkedToBase\":true").count(), 2);

        let mut reloaded = Context::new();
        let module = arkmirror_loader::load_tree(&mut reloaded, &dump).unwrap();
        let AstNode::ClassDeclaration(class) = module.statements(&reloaded).unwrap()[0] else {
            panic!("expected a class");
        };
        let members = class.definition(&reloaded).unwrap().body(&reloaded).unwrap();
        let AstNode::MethodDefinition(owner) = members[0] else {
            panic!("expected a method");
        };
        let overloads = owner.overloads(&reloaded).unwrap();
        assert_eq!(overloads.len(), 2);
        for overload in overloads {
            assert_eq!(overload.base_overload_method(&reloaded).unwrap(), Some(owner));
        }
        assert_eq!(arkmirror_loader::export(&reloaded, module.into()).unwrap(), dump);
    }
}
