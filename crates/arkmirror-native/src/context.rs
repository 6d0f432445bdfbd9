//! The native compilation context
//!
//! Owns every node of one compilation unit in a flat arena. Nodes are
//! never freed individually; the whole arena goes away with the context.
//! Handles carry the id of the context that issued them, so a handle used
//! after `destroy()` or against another context is rejected instead of
//! silently reading foreign memory.

use crate::data::{ForeignData, NodeData};
use crate::error::{MirrorError, Result};
use crate::handle::{fresh_context_id, ContextId, RawHandle};
use arkmirror_types::{Discriminant, ModifierFlags, NodeKind, SourceRange};

/// Index of the next node in an arena already holding `allocated` nodes
fn next_index(allocated: usize) -> Result<u32> {
    u32::try_from(allocated).map_err(|_| MirrorError::ArenaExhausted { allocated })
}

/// One node as owned by the native side
#[derive(Debug, Clone)]
pub struct NativeNode {
    pub data: NodeData,
    /// Last node this one was attached to as a child
    pub parent: Option<RawHandle>,
    pub modifiers: ModifierFlags,
    pub range: SourceRange,
}

#[derive(Debug)]
pub struct NativeContext {
    id: ContextId,
    nodes: Vec<NativeNode>,
    program: Option<RawHandle>,
    alive: bool,
}

impl Default for NativeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeContext {
    pub fn new() -> Self {
        Self {
            id: fresh_context_id(),
            nodes: Vec::new(),
            program: None,
            alive: true,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Number of nodes allocated so far
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Tear the context down. Every handle it issued becomes stale.
    pub fn destroy(&mut self) {
        log::debug!("destroying native context {} ({} nodes)", self.id, self.nodes.len());
        self.alive = false;
        self.nodes.clear();
        self.program = None;
    }

    fn slot(&self, handle: RawHandle, operation: &'static str) -> Result<usize> {
        if handle.is_null() {
            return Err(MirrorError::InvalidHandle { operation });
        }
        if !self.alive || handle.context() != self.id {
            return Err(MirrorError::StaleHandle { operation });
        }
        let index = handle.index() as usize;
        if index >= self.nodes.len() {
            return Err(MirrorError::InvalidHandle { operation });
        }
        Ok(index)
    }

    /// Check that `handle` refers to a live node of this context
    pub fn check(&self, handle: RawHandle, operation: &'static str) -> Result<()> {
        self.slot(handle, operation).map(|_| ())
    }

    pub fn node(&self, handle: RawHandle) -> Result<&NativeNode> {
        let index = self.slot(handle, "NativeContext::node")?;
        Ok(&self.nodes[index])
    }

    fn node_mut(&mut self, handle: RawHandle, operation: &'static str) -> Result<&mut NativeNode> {
        let index = self.slot(handle, operation)?;
        Ok(&mut self.nodes[index])
    }

    pub fn data(&self, handle: RawHandle) -> Result<&NodeData> {
        let index = self.slot(handle, "NativeContext::data")?;
        Ok(&self.nodes[index].data)
    }

    /// Allocate a node. Every child link must be live in this context.
    pub fn alloc(&mut self, data: NodeData) -> Result<RawHandle> {
        if !self.alive {
            return Err(MirrorError::StaleHandle {
                operation: "NativeContext::alloc",
            });
        }
        let children = data.children();
        for &child in &children {
            self.check(child, "NativeContext::alloc")?;
        }

        let handle = RawHandle::new(self.id, next_index(self.nodes.len())?);
        self.nodes.push(NativeNode {
            data,
            parent: None,
            modifiers: ModifierFlags::NONE,
            range: SourceRange::DUMMY,
        });
        for child in children {
            self.nodes[child.index() as usize].parent = Some(handle);
        }
        Ok(handle)
    }

    /// Allocate a node of a kind the host does not mirror
    pub fn alloc_foreign(
        &mut self,
        discriminant: Discriminant,
        children: Vec<RawHandle>,
    ) -> Result<RawHandle> {
        self.alloc(NodeData::Foreign(ForeignData {
            discriminant,
            children,
        }))
    }

    /// Node-kind discriminant of any live node
    pub fn discriminant(&self, handle: RawHandle) -> Result<Discriminant> {
        let index = self.slot(handle, "NativeContext::discriminant")?;
        Ok(self.nodes[index].data.discriminant())
    }

    /// Decoded node kind; fails for discriminants the host does not mirror
    pub fn kind(&self, handle: RawHandle) -> Result<NodeKind> {
        let discriminant = self.discriminant(handle)?;
        NodeKind::from_discriminant(discriminant)
            .ok_or(MirrorError::UnknownNodeKind { discriminant })
    }

    pub fn parent(&self, handle: RawHandle) -> Result<Option<RawHandle>> {
        Ok(self.node(handle)?.parent)
    }

    pub fn modifiers(&self, handle: RawHandle) -> Result<ModifierFlags> {
        Ok(self.node(handle)?.modifiers)
    }

    pub fn set_modifiers(&mut self, handle: RawHandle, modifiers: ModifierFlags) -> Result<()> {
        self.node_mut(handle, "NativeContext::set_modifiers")?.modifiers = modifiers;
        Ok(())
    }

    pub fn range(&self, handle: RawHandle) -> Result<SourceRange> {
        Ok(self.node(handle)?.range)
    }

    pub fn set_range(&mut self, handle: RawHandle, range: SourceRange) -> Result<()> {
        self.node_mut(handle, "NativeContext::set_range")?.range = range;
        Ok(())
    }

    fn check_optional(&self, child: Option<RawHandle>, operation: &'static str) -> Result<()> {
        match child {
            Some(child) => self.check(child, operation),
            None => Ok(()),
        }
    }

    fn adopt(&mut self, parent: RawHandle, children: &[RawHandle]) {
        for child in children {
            self.nodes[child.index() as usize].parent = Some(parent);
        }
    }

    /// Attach (or clear) a script function's return-type annotation
    pub fn set_return_type(
        &mut self,
        function: RawHandle,
        return_type: Option<RawHandle>,
    ) -> Result<()> {
        const OP: &str = "NativeContext::set_return_type";
        self.check_optional(return_type, OP)?;
        let node = self.node_mut(function, OP)?;
        match &mut node.data {
            NodeData::ScriptFunction(data) => data.return_type = return_type,
            other => {
                return Err(MirrorError::UnsupportedAttribute {
                    attribute: "return_type",
                    kind: other.discriminant(),
                })
            }
        }
        self.adopt(function, return_type.as_slice());
        Ok(())
    }

    /// Attach (or clear) the type annotation of an identifier or class property
    pub fn set_type_annotation(
        &mut self,
        target: RawHandle,
        annotation: Option<RawHandle>,
    ) -> Result<()> {
        const OP: &str = "NativeContext::set_type_annotation";
        self.check_optional(annotation, OP)?;
        let node = self.node_mut(target, OP)?;
        match &mut node.data {
            NodeData::Identifier(data) => data.type_annotation = annotation,
            NodeData::ClassProperty(data) => data.type_annotation = annotation,
            other => {
                return Err(MirrorError::UnsupportedAttribute {
                    attribute: "type_annotation",
                    kind: other.discriminant(),
                })
            }
        }
        self.adopt(target, annotation.as_slice());
        Ok(())
    }

    /// Replace a method definition's overload list
    pub fn set_overloads(&mut self, method: RawHandle, overloads: Vec<RawHandle>) -> Result<()> {
        const OP: &str = "NativeContext::set_overloads";
        for &overload in &overloads {
            self.check(overload, OP)?;
        }
        let node = self.node_mut(method, OP)?;
        match &mut node.data {
            NodeData::MethodDefinition(data) => data.overloads = overloads.clone(),
            other => {
                return Err(MirrorError::UnsupportedAttribute {
                    attribute: "overloads",
                    kind: other.discriminant(),
                })
            }
        }
        self.adopt(method, &overloads);
        Ok(())
    }

    /// Attach (or clear) a call expression's trailing block
    pub fn set_trailing_block(&mut self, call: RawHandle, block: Option<RawHandle>) -> Result<()> {
        const OP: &str = "NativeContext::set_trailing_block";
        self.check_optional(block, OP)?;
        let node = self.node_mut(call, OP)?;
        match &mut node.data {
            NodeData::CallExpression(data) => data.trailing_block = block,
            other => {
                return Err(MirrorError::UnsupportedAttribute {
                    attribute: "trailing_block",
                    kind: other.discriminant(),
                })
            }
        }
        self.adopt(call, block.as_slice());
        Ok(())
    }

    /// Stamp an overload's back-reference to its owning method.
    ///
    /// The back-reference does not adopt the target as a child.
    pub fn set_base_overload_method(
        &mut self,
        overload: RawHandle,
        base: Option<RawHandle>,
    ) -> Result<()> {
        const OP: &str = "NativeContext::set_base_overload_method";
        self.check_optional(base, OP)?;
        let node = self.node_mut(overload, OP)?;
        match &mut node.data {
            NodeData::MethodDefinition(data) => {
                data.base_overload_method = base;
                Ok(())
            }
            other => Err(MirrorError::UnsupportedAttribute {
                attribute: "base_overload_method",
                kind: other.discriminant(),
            }),
        }
    }

    pub fn base_overload_method(&self, overload: RawHandle) -> Result<Option<RawHandle>> {
        match &self.node(overload)?.data {
            NodeData::MethodDefinition(data) => Ok(data.base_overload_method),
            other => Err(MirrorError::UnsupportedAttribute {
                attribute: "base_overload_method",
                kind: other.discriminant(),
            }),
        }
    }

    /// Root of the program AST, if one has been committed
    pub fn program(&self) -> Result<RawHandle> {
        if !self.alive {
            return Err(MirrorError::StaleHandle {
                operation: "NativeContext::program",
            });
        }
        self.program.ok_or(MirrorError::MissingProgram {
            operation: "NativeContext::program",
        })
    }

    /// Replace the program AST root
    pub fn set_program(&mut self, root: RawHandle) -> Result<()> {
        let discriminant = self.discriminant(root)?;
        if discriminant != NodeKind::EtsModule.discriminant() {
            return Err(MirrorError::KindMismatch {
                expected: NodeKind::EtsModule,
                actual: discriminant,
            });
        }
        log::debug!("committing program root {}", root);
        self.program = Some(root);
        Ok(())
    }
}
