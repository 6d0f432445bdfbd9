//! Void return-type inference
//!
//! A function with no return-type annotation whose own body never returns a
//! value gets an explicit `void` annotation. Constructors and setters are
//! left alone, as are bodiless signatures.

use std::collections::HashSet;

use arkmirror_ast::{
    visit_each_child, AsRaw, AstNode, AstVisitor, Context, EtsModule, EtsPrimitiveType, RawHandle,
    Result, ScriptFunction,
};
use arkmirror_types::{MethodDefinitionKind, PrimitiveType};
use log::debug;

use crate::pipeline::{visit_module, Transformer};

/// Looks for a value-carrying `return` in one function body.
///
/// Nested function literals are not entered: their returns belong to them.
#[derive(Debug, Default)]
pub struct ReturnFinder {
    found: bool,
}

impl ReturnFinder {
    /// Whether `body` returns a value. Expression bodies always do.
    pub fn returns_value(ctx: &mut Context, body: AstNode) -> Result<bool> {
        if !matches!(body, AstNode::BlockStatement(_)) {
            return Ok(true);
        }
        let mut finder = ReturnFinder::default();
        finder.visit(ctx, body)?;
        Ok(finder.found)
    }
}

impl AstVisitor for ReturnFinder {
    fn visit(&mut self, ctx: &mut Context, node: AstNode) -> Result<AstNode> {
        if self.found || node.is_function_literal() {
            return Ok(node);
        }
        if let AstNode::ReturnStatement(ret) = node {
            self.found = ret.argument(ctx)?.is_some();
            return Ok(node);
        }
        visit_each_child(self, ctx, node)
    }
}

#[derive(Debug, Default)]
pub struct VoidReturnInference {
    /// Script functions that implement a constructor or setter method
    exempt: HashSet<RawHandle>,
    annotated: usize,
}

impl VoidReturnInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Functions annotated so far
    pub fn annotated(&self) -> usize {
        self.annotated
    }

    fn infer(
        &mut self,
        ctx: &mut Context,
        function: ScriptFunction,
        original: RawHandle,
    ) -> Result<AstNode> {
        if self.exempt.contains(&original)
            || function.return_type(ctx)?.is_some()
            || function.is_constructor(ctx)?
            || function.is_setter(ctx)?
        {
            return Ok(function.into());
        }
        let Some(body) = function.body(ctx)? else {
            return Ok(function.into());
        };
        if ReturnFinder::returns_value(ctx, body)? {
            return Ok(function.into());
        }

        let void = EtsPrimitiveType::create(ctx, PrimitiveType::Void)?;
        let id = function.id(ctx)?;
        let params = function.params(ctx)?;
        let flags = function.flags(ctx)?;
        let updated = function.update(ctx, id, params, Some(void.into()), Some(body), flags)?;

        match id {
            Some(id) => debug!("inferred void return for `{}`", id.name(ctx)?),
            None => debug!("inferred void return for anonymous function {}", original),
        }
        self.annotated += 1;
        Ok(updated.into())
    }
}

impl AstVisitor for VoidReturnInference {
    fn visit(&mut self, ctx: &mut Context, node: AstNode) -> Result<AstNode> {
        if let AstNode::MethodDefinition(method) = node {
            if matches!(
                method.kind(ctx)?,
                MethodDefinitionKind::Constructor | MethodDefinitionKind::Set
            ) {
                let function = method.value(ctx)?.function(ctx)?;
                self.exempt.insert(function.raw());
            }
        }
        let original = node.raw();
        let node = visit_each_child(self, ctx, node)?;
        match node {
            AstNode::ScriptFunction(function) => self.infer(ctx, function, original),
            _ => Ok(node),
        }
    }
}

impl Transformer for VoidReturnInference {
    fn name(&self) -> &'static str {
        "void-return-inference"
    }

    fn transform(&mut self, ctx: &mut Context, root: EtsModule) -> Result<EtsModule> {
        visit_module(self, ctx, root)
    }
}
