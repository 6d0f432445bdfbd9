//! Host-side view of a native context
//!
//! `Context` owns the native arena plus the bookkeeping that only the host
//! cares about: the origin of every node produced by an `update`, and a
//! running count of such reallocations.

use std::collections::HashMap;

use arkmirror_native::{NativeContext, NodeData, RawHandle, Result};
use arkmirror_types::{ModifierFlags, NodeKind, SourceRange};

use crate::nodes::{AsRaw, EtsModule, Node};

#[derive(Debug, Default)]
pub struct Context {
    native: NativeContext,
    /// Rebuilt node -> first node it superseded
    origins: HashMap<RawHandle, RawHandle>,
    reallocations: usize,
}

impl Context {
    pub fn new() -> Self {
        Self::from_native(NativeContext::new())
    }

    pub fn from_native(native: NativeContext) -> Self {
        Self {
            native,
            origins: HashMap::new(),
            reallocations: 0,
        }
    }

    pub fn native(&self) -> &NativeContext {
        &self.native
    }

    pub fn native_mut(&mut self) -> &mut NativeContext {
        &mut self.native
    }

    pub fn into_native(self) -> NativeContext {
        self.native
    }

    /// Number of nodes reallocated by `update` so far
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub(crate) fn data(&self, raw: RawHandle) -> Result<&NodeData> {
        self.native.data(raw)
    }

    pub(crate) fn alloc(&mut self, data: NodeData) -> Result<RawHandle> {
        self.native.alloc(data)
    }

    pub fn modifiers(&self, raw: RawHandle) -> Result<ModifierFlags> {
        self.native.modifiers(raw)
    }

    pub fn set_modifiers(&mut self, raw: RawHandle, modifiers: ModifierFlags) -> Result<()> {
        self.native.set_modifiers(raw, modifiers)
    }

    pub fn range(&self, raw: RawHandle) -> Result<SourceRange> {
        self.native.range(raw)
    }

    pub fn set_range(&mut self, raw: RawHandle, range: SourceRange) -> Result<()> {
        self.native.set_range(raw, range)
    }

    pub fn parent(&self, raw: RawHandle) -> Result<Option<RawHandle>> {
        self.native.parent(raw)
    }

    /// First node `raw` superseded, if it was produced by an `update`
    pub fn origin(&self, raw: RawHandle) -> Option<RawHandle> {
        self.origins.get(&raw).copied()
    }

    pub fn set_origin(&mut self, raw: RawHandle, origin: RawHandle) -> Result<()> {
        self.native.check(raw, "Context::set_origin")?;
        self.native.check(origin, "Context::set_origin")?;
        self.origins.insert(raw, origin);
        Ok(())
    }

    /// Carry host and native bookkeeping from `original` over to the node
    /// that replaces it.
    pub(crate) fn supersede(&mut self, original: RawHandle, replacement: RawHandle) -> Result<()> {
        let modifiers = self.native.modifiers(original)?;
        let range = self.native.range(original)?;
        self.native.set_modifiers(replacement, modifiers)?;
        self.native.set_range(replacement, range)?;

        let origin = self.origin(original).unwrap_or(original);
        self.origins.insert(replacement, origin);
        self.reallocations += 1;

        log::trace!(
            "reallocated {} {} -> {}",
            self.native.kind(replacement).map_or("<foreign>", NodeKind::name),
            original,
            replacement
        );
        Ok(())
    }

    /// Current program root
    pub fn program(&self) -> Result<EtsModule> {
        let raw = self.native.program()?;
        EtsModule::from_raw(self, raw)
    }

    pub fn set_program(&mut self, module: EtsModule) -> Result<()> {
        self.native.set_program(module.raw())
    }

    /// Tear down the native context; every handle issued so far goes stale.
    pub fn destroy(&mut self) {
        self.native.destroy();
        self.origins.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Identifier, NumberLiteral};
    use arkmirror_native::MirrorError;

    #[test]
    fn test_supersede_carries_bookkeeping() {
        let mut ctx = Context::new();
        let a = Identifier::create(&mut ctx, "a").unwrap();
        let b = Identifier::create(&mut ctx, "b").unwrap();
        let c = Identifier::create(&mut ctx, "c").unwrap();
        ctx.set_modifiers(a.raw(), ModifierFlags::EXPORT).unwrap();
        ctx.set_range(a.raw(), SourceRange::new(3, 4)).unwrap();

        ctx.supersede(a.raw(), b.raw()).unwrap();
        ctx.supersede(b.raw(), c.raw()).unwrap();

        assert_eq!(ctx.modifiers(c.raw()).unwrap(), ModifierFlags::EXPORT);
        assert_eq!(ctx.range(c.raw()).unwrap(), SourceRange::new(3, 4));
        assert_eq!(ctx.origin(c.raw()), Some(a.raw()));
        assert_eq!(ctx.origin(a.raw()), None);
        assert_eq!(ctx.reallocations(), 2);
    }

    #[test]
    fn test_program_requires_module() {
        let mut ctx = Context::new();
        assert!(matches!(ctx.program(), Err(MirrorError::MissingProgram { .. })));

        let module = EtsModule::create(&mut ctx, "main", Vec::new()).unwrap();
        ctx.set_program(module).unwrap();
        assert_eq!(ctx.program().unwrap(), module);
    }

    #[test]
    fn test_destroy_makes_program_stale() {
        let mut ctx = Context::new();
        let one = NumberLiteral::create(&mut ctx, 1.0).unwrap();
        ctx.destroy();
        assert_eq!(
            one.value(&ctx),
            Err(MirrorError::StaleHandle {
                operation: "NativeContext::data"
            })
        );
        assert!(matches!(ctx.program(), Err(MirrorError::StaleHandle { .. })));
    }
}
