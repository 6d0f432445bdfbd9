//! Type annotation nodes

use arkmirror_native::{NodeData, Result, TypeReferenceData, UnionTypeData};
use arkmirror_types::PrimitiveType;

use super::{ast_node, payload, raws, resolve_all, AsRaw, AstNode, Identifier, Node};
use crate::context::Context;
use crate::identity::IsSame;

ast_node!(EtsPrimitiveType);

impl EtsPrimitiveType {
    pub fn create(ctx: &mut Context, primitive: PrimitiveType) -> Result<Self> {
        Ok(Self::wrap(ctx.alloc(NodeData::EtsPrimitiveType(primitive))?))
    }

    pub fn primitive(&self, ctx: &Context) -> Result<PrimitiveType> {
        Ok(*payload!(ctx, self, EtsPrimitiveType))
    }

    pub fn update(self, ctx: &mut Context, primitive: PrimitiveType) -> Result<Self> {
        if payload!(ctx, self, EtsPrimitiveType).is_same(&primitive) {
            return Ok(self);
        }
        let node = Self::create(ctx, primitive)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(
    /// A named type such as `Array` or `Promise`
    EtsTypeReference
);

impl EtsTypeReference {
    pub fn create(ctx: &mut Context, name: Identifier) -> Result<Self> {
        let raw = ctx.alloc(NodeData::EtsTypeReference(TypeReferenceData {
            name: name.raw(),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn name(&self, ctx: &Context) -> Result<Identifier> {
        Identifier::from_raw(ctx, payload!(ctx, self, EtsTypeReference).name)
    }

    pub fn update(self, ctx: &mut Context, name: Identifier) -> Result<Self> {
        if payload!(ctx, self, EtsTypeReference).name.is_same(&name.raw()) {
            return Ok(self);
        }
        let node = Self::create(ctx, name)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

ast_node!(EtsUnionType);

impl EtsUnionType {
    pub fn create(ctx: &mut Context, types: Vec<AstNode>) -> Result<Self> {
        let raw = ctx.alloc(NodeData::EtsUnionType(UnionTypeData {
            types: raws(&types),
        }))?;
        Ok(Self::wrap(raw))
    }

    pub fn types(&self, ctx: &Context) -> Result<Vec<AstNode>> {
        resolve_all(ctx, &payload!(ctx, self, EtsUnionType).types)
    }

    pub fn update(self, ctx: &mut Context, types: Vec<AstNode>) -> Result<Self> {
        if payload!(ctx, self, EtsUnionType).types.is_same(&raws(&types)) {
            return Ok(self);
        }
        let node = Self::create(ctx, types)?;
        node.on_update(ctx, &self)?;
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_update() {
        let mut ctx = Context::new();
        let int = EtsPrimitiveType::create(&mut ctx, PrimitiveType::Int).unwrap();
        assert_eq!(int.update(&mut ctx, PrimitiveType::Int).unwrap(), int);
        let long = int.update(&mut ctx, PrimitiveType::Long).unwrap();
        assert_eq!(long.primitive(&ctx).unwrap(), PrimitiveType::Long);
    }

    #[test]
    fn test_union_members() {
        let mut ctx = Context::new();
        let name = Identifier::create(&mut ctx, "Foo").unwrap();
        let reference = EtsTypeReference::create(&mut ctx, name).unwrap();
        let int = EtsPrimitiveType::create(&mut ctx, PrimitiveType::Int).unwrap();
        let union = EtsUnionType::create(&mut ctx, vec![reference.into(), int.into()]).unwrap();
        assert_eq!(
            union.types(&ctx).unwrap(),
            vec![AstNode::from(reference), AstNode::from(int)]
        );
        assert_eq!(reference.name(&ctx).unwrap(), name);
    }
}
