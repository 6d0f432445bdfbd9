//! Module root and imports

use arkmirror_native::{ImportDeclarationData, ImportSpecifierData, ModuleData, NodeData, Result};

use super::{
    ast_node, payload, raws, resolve_all, wrap_all, AsRaw, AstNode, Identifier, Node,
    StringLiteral,
};
use crate::context::Context;
use crate::identity::IsSame;

ast_node!(
    /// Root of a compilation unit
    EtsModule
);

impl EtsModule {
    pub fn create(ctx: &mut Context, name: &str, statements: Vec<AstNode>) -> Result<Self> {
        let raw = ctx.alloc(NodeData::EtsModule(ModuleData {
            name: name.to_string(),
            statements: raws(&statements),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn name(&self, ctx: &Context) -> Result<String> {
        Ok(payload!(ctx, self, EtsModule).name.clone())
    }

    pub fn statements(&self, ctx: &Context) -> Result<Vec<AstNode>> {
        resolve_all(ctx, &payload!(ctx, self, EtsModule).statements)
    }

    pub fn update(self, ctx: &mut Context, name: &str, statements: Vec<AstNode>) -> Result<Self> {
        let data = payload!(ctx, self, EtsModule);
        if data.name.as_str().is_same(name) && data.statements.is_same(&raws(&statements)) {
            return Ok(self);
        }
        let node = Self::create(ctx, name, statements)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(
    /// `import { a, b as c } from "source"`. Also reads ETS imports.
    ImportDeclaration
);

impl ImportDeclaration {
    pub fn create(
        ctx: &mut Context,
        source: StringLiteral,
        specifiers: Vec<ImportSpecifier>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ImportDeclaration(import_data(source, &specifiers)))?;
        Ok(Self::wrap(raw))
    }

    pub fn source(&self, ctx: &Context) -> Result<StringLiteral> {
        let data = payload!(ctx, self, ImportDeclaration | EtsImportDeclaration);
        StringLiteral::from_raw(ctx, data.source)
    }

    pub fn specifiers(&self, ctx: &Context) -> Result<Vec<ImportSpecifier>> {
        let data = payload!(ctx, self, ImportDeclaration | EtsImportDeclaration);
        wrap_all(ctx, &data.specifiers)
    }

    /// Rebuild; an ETS import viewed through this wrapper stays an ETS import.
    pub fn update(
        self,
        ctx: &mut Context,
        source: StringLiteral,
        specifiers: Vec<ImportSpecifier>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, ImportDeclaration | EtsImportDeclaration);
        if data.source.is_same(&source.raw()) && data.specifiers.is_same(&raws(&specifiers)) {
            return Ok(self);
        }
        let is_ets = matches!(ctx.data(self.raw())?, NodeData::EtsImportDeclaration(_));
        let data = import_data(source, &specifiers);
        let raw = if is_ets {
            ctx.alloc(NodeData::EtsImportDeclaration(data))?
        } else {
            ctx.alloc(NodeData::ImportDeclaration(data))?
        };
        let node = Self::wrap(raw);
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(EtsImportDeclaration);

impl EtsImportDeclaration {
    pub fn create(
        ctx: &mut Context,
        source: StringLiteral,
        specifiers: Vec<ImportSpecifier>,
    ) -> Result<Self> {
        let raw = ctx.alloc(NodeData::EtsImportDeclaration(import_data(
            source,
            &specifiers,
        )))?;
        Ok(Self::wrap(raw))
    }

    pub fn source(&self, ctx: &Context) -> Result<StringLiteral> {
        StringLiteral::from_raw(ctx, payload!(ctx, self, EtsImportDeclaration).source)
    }

    pub fn specifiers(&self, ctx: &Context) -> Result<Vec<ImportSpecifier>> {
        wrap_all(ctx, &payload!(ctx, self, EtsImportDeclaration).specifiers)
    }

    pub fn update(
        self,
        ctx: &mut Context,
        source: StringLiteral,
        specifiers: Vec<ImportSpecifier>,
    ) -> Result<Self> {
        let data = payload!(ctx, self, EtsImportDeclaration);
        if data.source.is_same(&source.raw()) && data.specifiers.is_same(&raws(&specifiers)) {
            return Ok(self);
        }
        let node = Self::create(ctx, source, specifiers)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

fn import_data(source: StringLiteral, specifiers: &[ImportSpecifier]) -> ImportDeclarationData {
    ImportDeclarationData {
        source: source.raw(),
        specifiers: raws(specifiers),
    }
}

ast_node!(ImportSpecifier);

impl ImportSpecifier {
    pub fn create(ctx: &mut Context, imported: Identifier, local: Identifier) -> Result<Self> {
        let raw = ctx.alloc(NodeData::ImportSpecifier(ImportSpecifierData {
            imported: imported.raw(),
            local: local.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn imported(&self, ctx: &Context) -> Result<Identifier> {
        Identifier::from_raw(ctx, payload!(ctx, self, ImportSpecifier).imported)
    }

    pub fn local(&self, ctx: &Context) -> Result<Identifier> {
        Identifier::from_raw(ctx, payload!(ctx, self, ImportSpecifier).local)
    }

    pub fn update(self, ctx: &mut Context, imported: Identifier, local: Identifier) -> Result<Self> {
        let data = payload!(ctx, self, ImportSpecifier);
        if data.imported.is_same(&imported.raw()) && data.local.is_same(&local.raw()) {
            return Ok(self);
        }
        let node = Self::create(ctx, imported, local)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkmirror_types::NodeKind;

    fn specifier(ctx: &mut Context, name: &str) -> ImportSpecifier {
        let imported = Identifier::create(ctx, name).unwrap();
        let local = Identifier::create(ctx, name).unwrap();
        ImportSpecifier::create(ctx, imported, local).unwrap()
    }

    #[test]
    fn test_module_update() {
        let mut ctx = Context::new();
        let module = EtsModule::create(&mut ctx, "main", Vec::new()).unwrap();
        assert_eq!(module.update(&mut ctx, "main", Vec::new()).unwrap(), module);

        let renamed = module.update(&mut ctx, "other", Vec::new()).unwrap();
        assert_ne!(renamed, module);
        assert_eq!(renamed.name(&ctx).unwrap(), "other");
    }

    #[test]
    fn test_ets_import_read_as_plain_import() {
        let mut ctx = Context::new();
        let source = StringLiteral::create(&mut ctx, "std/core").unwrap();
        let a = specifier(&mut ctx, "a");
        let b = specifier(&mut ctx, "b");
        let ets = EtsImportDeclaration::create(&mut ctx, source, vec![a]).unwrap();

        let plain = ImportDeclaration::from_raw(&ctx, ets.raw()).unwrap();
        assert_eq!(plain.source(&ctx).unwrap(), source);
        assert_eq!(plain.specifiers(&ctx).unwrap(), vec![a]);

        let rebuilt = plain.update(&mut ctx, source, vec![a, b]).unwrap();
        assert_eq!(
            ctx.native().kind(rebuilt.raw()).unwrap(),
            NodeKind::EtsImportDeclaration
        );
    }

    #[test]
    fn test_specifier_update() {
        let mut ctx = Context::new();
        let spec = specifier(&mut ctx, "x");
        let imported = spec.imported(&ctx).unwrap();
        let alias = Identifier::create(&mut ctx, "y").unwrap();
        let local = spec.local(&ctx).unwrap();
        assert_eq!(spec.update(&mut ctx, imported, local).unwrap(), spec);
        let aliased = spec.update(&mut ctx, imported, alias).unwrap();
        assert_eq!(aliased.local(&ctx).unwrap().name(&ctx).unwrap(), "y");
    }
}
