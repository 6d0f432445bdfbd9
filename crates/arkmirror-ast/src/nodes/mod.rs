//! Typed wrappers over native nodes
//!
//! Every wrapper holds exactly one native handle. Field accessors read
//! through the context; `create` always allocates, `update` reuses the
//! original when every field is identical to what it already holds.

mod classes;
mod expressions;
mod functions;
mod module;
mod statements;
mod types;

pub use classes::*;
pub use expressions::*;
pub use functions::*;
pub use module::*;
pub use statements::*;
pub use types::*;

use arkmirror_native::{MirrorError, RawHandle, Result};
use arkmirror_types::{ModifierFlags, NodeKind, SourceRange};

use crate::context::Context;
use crate::identity::IsSame;

/// Anything backed by a native handle
pub trait AsRaw {
    fn raw(&self) -> RawHandle;
}

pub trait Node: AsRaw + Copy + Sized {
    const KIND: NodeKind;

    #[doc(hidden)]
    fn wrap(raw: RawHandle) -> Self;

    /// Wrap `raw`, checking that the native node is of this kind (or is
    /// allowed to stand in for it).
    fn from_raw(ctx: &Context, raw: RawHandle) -> Result<Self> {
        if raw.is_null() {
            return Err(MirrorError::InvalidHandle {
                operation: "Node::from_raw",
            });
        }
        let discriminant = ctx.native().discriminant(raw)?;
        match NodeKind::from_discriminant(discriminant) {
            Some(actual) if actual.is_effectively(Self::KIND) => Ok(Self::wrap(raw)),
            _ => Err(MirrorError::KindMismatch {
                expected: Self::KIND,
                actual: discriminant,
            }),
        }
    }

    fn from_node(ctx: &Context, node: AstNode) -> Result<Self> {
        Self::from_raw(ctx, node.raw())
    }

    /// Resolve to the node's actual kind
    fn to_node(&self, ctx: &Context) -> Result<AstNode> {
        resolve(ctx, self.raw())
    }

    /// Called on a freshly created node that replaces `original`
    fn on_update(&self, ctx: &mut Context, original: &Self) -> Result<()> {
        ctx.supersede(original.raw(), self.raw())
    }

    fn modifiers(&self, ctx: &Context) -> Result<ModifierFlags> {
        ctx.modifiers(self.raw())
    }

    fn set_modifiers(&self, ctx: &mut Context, modifiers: ModifierFlags) -> Result<()> {
        ctx.set_modifiers(self.raw(), modifiers)
    }

    fn range(&self, ctx: &Context) -> Result<SourceRange> {
        ctx.range(self.raw())
    }

    fn set_range(&self, ctx: &mut Context, range: SourceRange) -> Result<()> {
        ctx.set_range(self.raw(), range)
    }

    /// The node this one was rebuilt from, if any
    fn origin(&self, ctx: &Context) -> Option<Self> {
        ctx.origin(self.raw()).map(Self::wrap)
    }
}

/// Borrow the payload of `$node`, failing if it is not one of `$variant`s.
macro_rules! payload {
    ($ctx:expr, $node:expr, $($variant:ident)|+) => {
        match $ctx.data($node.raw())? {
            $(arkmirror_native::NodeData::$variant(data))|+ => data,
            other => {
                return Err(arkmirror_native::MirrorError::KindMismatch {
                    expected: <Self as $crate::nodes::Node>::KIND,
                    actual: other.discriminant(),
                })
            }
        }
    };
}
pub(crate) use payload;

/// Declare a wrapper struct and its trait plumbing. Items in braces go
/// into the `Node` impl.
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident) => {
        $crate::nodes::ast_node!($(#[$meta])* $name {});
    };
    ($(#[$meta:meta])* $name:ident { $($node_impl:tt)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            raw: arkmirror_native::RawHandle,
        }

        impl $crate::nodes::AsRaw for $name {
            fn raw(&self) -> arkmirror_native::RawHandle {
                self.raw
            }
        }

        impl $crate::nodes::Node for $name {
            const KIND: arkmirror_types::NodeKind = arkmirror_types::NodeKind::$name;

            fn wrap(raw: arkmirror_native::RawHandle) -> Self {
                Self { raw }
            }

            $($node_impl)*
        }

        impl $crate::identity::IsSame for $name {
            fn is_same(&self, other: &Self) -> bool {
                self.raw == other.raw
            }
        }

        impl From<$name> for $crate::nodes::AstNode {
            fn from(node: $name) -> Self {
                $crate::nodes::AstNode::$name(node)
            }
        }
    };
}
pub(crate) use ast_node;

/// A node of any kind.
///
/// Built from a typed wrapper with `From`, the variant follows the
/// wrapper's static type; `resolve` always yields the native node's
/// actual kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstNode {
    EtsModule(EtsModule),
    BlockStatement(BlockStatement),
    ExpressionStatement(ExpressionStatement),
    VariableDeclaration(VariableDeclaration),
    VariableDeclarator(VariableDeclarator),
    ReturnStatement(ReturnStatement),
    IfStatement(IfStatement),
    WhileStatement(WhileStatement),
    FunctionDeclaration(FunctionDeclaration),
    ClassDeclaration(ClassDeclaration),
    StructDeclaration(StructDeclaration),
    ClassDefinition(ClassDefinition),
    ClassProperty(ClassProperty),
    MethodDefinition(MethodDefinition),
    ImportDeclaration(ImportDeclaration),
    EtsImportDeclaration(EtsImportDeclaration),
    ImportSpecifier(ImportSpecifier),
    ScriptFunction(ScriptFunction),
    FunctionExpression(FunctionExpression),
    ArrowFunctionExpression(ArrowFunctionExpression),
    EtsParameterExpression(EtsParameterExpression),
    SpreadElement(SpreadElement),
    Identifier(Identifier),
    NumberLiteral(NumberLiteral),
    StringLiteral(StringLiteral),
    BooleanLiteral(BooleanLiteral),
    NullLiteral(NullLiteral),
    UndefinedLiteral(UndefinedLiteral),
    ThisExpression(ThisExpression),
    MemberExpression(MemberExpression),
    ChainExpression(ChainExpression),
    CallExpression(CallExpression),
    BinaryExpression(BinaryExpression),
    AssignmentExpression(AssignmentExpression),
    ConditionalExpression(ConditionalExpression),
    BlockExpression(BlockExpression),
    EtsPrimitiveType(EtsPrimitiveType),
    EtsTypeReference(EtsTypeReference),
    EtsUnionType(EtsUnionType),
}

impl AsRaw for AstNode {
    fn raw(&self) -> RawHandle {
        match self {
            AstNode::EtsModule(n) => n.raw(),
            AstNode::BlockStatement(n) => n.raw(),
            AstNode::ExpressionStatement(n) => n.raw(),
            AstNode::VariableDeclaration(n) => n.raw(),
            AstNode::VariableDeclarator(n) => n.raw(),
            AstNode::ReturnStatement(n) => n.raw(),
            AstNode::IfStatement(n) => n.raw(),
            AstNode::WhileStatement(n) => n.raw(),
            AstNode::FunctionDeclaration(n) => n.raw(),
            AstNode::ClassDeclaration(n) => n.raw(),
            AstNode::StructDeclaration(n) => n.raw(),
            AstNode::ClassDefinition(n) => n.raw(),
            AstNode::ClassProperty(n) => n.raw(),
            AstNode::MethodDefinition(n) => n.raw(),
            AstNode::ImportDeclaration(n) => n.raw(),
            AstNode::EtsImportDeclaration(n) => n.raw(),
            AstNode::ImportSpecifier(n) => n.raw(),
            AstNode::ScriptFunction(n) => n.raw(),
            AstNode::FunctionExpression(n) => n.raw(),
            AstNode::ArrowFunctionExpression(n) => n.raw(),
            AstNode::EtsParameterExpression(n) => n.raw(),
            AstNode::SpreadElement(n) => n.raw(),
            AstNode::Identifier(n) => n.raw(),
            AstNode::NumberLiteral(n) => n.raw(),
            AstNode::StringLiteral(n) => n.raw(),
            AstNode::BooleanLiteral(n) => n.raw(),
            AstNode::NullLiteral(n) => n.raw(),
            AstNode::UndefinedLiteral(n) => n.raw(),
            AstNode::ThisExpression(n) => n.raw(),
            AstNode::MemberExpression(n) => n.raw(),
            AstNode::ChainExpression(n) => n.raw(),
            AstNode::CallExpression(n) => n.raw(),
            AstNode::BinaryExpression(n) => n.raw(),
            AstNode::AssignmentExpression(n) => n.raw(),
            AstNode::ConditionalExpression(n) => n.raw(),
            AstNode::BlockExpression(n) => n.raw(),
            AstNode::EtsPrimitiveType(n) => n.raw(),
            AstNode::EtsTypeReference(n) => n.raw(),
            AstNode::EtsUnionType(n) => n.raw(),
        }
    }
}

impl AstNode {
    /// Kind of the variant (see the type-level note on `From`)
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::EtsModule(_) => NodeKind::EtsModule,
            AstNode::BlockStatement(_) => NodeKind::BlockStatement,
            AstNode::ExpressionStatement(_) => NodeKind::ExpressionStatement,
            AstNode::VariableDeclaration(_) => NodeKind::VariableDeclaration,
            AstNode::VariableDeclarator(_) => NodeKind::VariableDeclarator,
            AstNode::ReturnStatement(_) => NodeKind::ReturnStatement,
            AstNode::IfStatement(_) => NodeKind::IfStatement,
            AstNode::WhileStatement(_) => NodeKind::WhileStatement,
            AstNode::FunctionDeclaration(_) => NodeKind::FunctionDeclaration,
            AstNode::ClassDeclaration(_) => NodeKind::ClassDeclaration,
            AstNode::StructDeclaration(_) => NodeKind::StructDeclaration,
            AstNode::ClassDefinition(_) => NodeKind::ClassDefinition,
            AstNode::ClassProperty(_) => NodeKind::ClassProperty,
            AstNode::MethodDefinition(_) => NodeKind::MethodDefinition,
            AstNode::ImportDeclaration(_) => NodeKind::ImportDeclaration,
            AstNode::EtsImportDeclaration(_) => NodeKind::EtsImportDeclaration,
            AstNode::ImportSpecifier(_) => NodeKind::ImportSpecifier,
            AstNode::ScriptFunction(_) => NodeKind::ScriptFunction,
            AstNode::FunctionExpression(_) => NodeKind::FunctionExpression,
            AstNode::ArrowFunctionExpression(_) => NodeKind::ArrowFunctionExpression,
            AstNode::EtsParameterExpression(_) => NodeKind::EtsParameterExpression,
            AstNode::SpreadElement(_) => NodeKind::SpreadElement,
            AstNode::Identifier(_) => NodeKind::Identifier,
            AstNode::NumberLiteral(_) => NodeKind::NumberLiteral,
            AstNode::StringLiteral(_) => NodeKind::StringLiteral,
            AstNode::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            AstNode::NullLiteral(_) => NodeKind::NullLiteral,
            AstNode::UndefinedLiteral(_) => NodeKind::UndefinedLiteral,
            AstNode::ThisExpression(_) => NodeKind::ThisExpression,
            AstNode::MemberExpression(_) => NodeKind::MemberExpression,
            AstNode::ChainExpression(_) => NodeKind::ChainExpression,
            AstNode::CallExpression(_) => NodeKind::CallExpression,
            AstNode::BinaryExpression(_) => NodeKind::BinaryExpression,
            AstNode::AssignmentExpression(_) => NodeKind::AssignmentExpression,
            AstNode::ConditionalExpression(_) => NodeKind::ConditionalExpression,
            AstNode::BlockExpression(_) => NodeKind::BlockExpression,
            AstNode::EtsPrimitiveType(_) => NodeKind::EtsPrimitiveType,
            AstNode::EtsTypeReference(_) => NodeKind::EtsTypeReference,
            AstNode::EtsUnionType(_) => NodeKind::EtsUnionType,
        }
    }

    pub fn raw(&self) -> RawHandle {
        AsRaw::raw(self)
    }

    /// True for function literals that open a new function scope
    pub fn is_function_literal(&self) -> bool {
        matches!(
            self,
            AstNode::ScriptFunction(_)
                | AstNode::FunctionDeclaration(_)
                | AstNode::FunctionExpression(_)
                | AstNode::ArrowFunctionExpression(_)
        )
    }
}

impl IsSame for AstNode {
    fn is_same(&self, other: &Self) -> bool {
        self.raw() == other.raw()
    }
}

impl std::fmt::Display for AstNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.raw())
    }
}

/// Wrap any native node in the wrapper matching its actual kind.
pub fn resolve(ctx: &Context, raw: RawHandle) -> Result<AstNode> {
    if raw.is_null() {
        return Err(MirrorError::InvalidHandle { operation: "resolve" });
    }
    let node = match ctx.native().kind(raw)? {
        NodeKind::EtsModule => AstNode::EtsModule(EtsModule::wrap(raw)),
        NodeKind::BlockStatement => AstNode::BlockStatement(BlockStatement::wrap(raw)),
        NodeKind::ExpressionStatement => {
            AstNode::ExpressionStatement(ExpressionStatement::wrap(raw))
        }
        NodeKind::VariableDeclaration => {
            AstNode::VariableDeclaration(VariableDeclaration::wrap(raw))
        }
        NodeKind::VariableDeclarator => AstNode::VariableDeclarator(VariableDeclarator::wrap(raw)),
        NodeKind::ReturnStatement => AstNode::ReturnStatement(ReturnStatement::wrap(raw)),
        NodeKind::IfStatement => AstNode::IfStatement(IfStatement::wrap(raw)),
        NodeKind::WhileStatement => AstNode::WhileStatement(WhileStatement::wrap(raw)),
        NodeKind::FunctionDeclaration => {
            AstNode::FunctionDeclaration(FunctionDeclaration::wrap(raw))
        }
        NodeKind::ClassDeclaration => AstNode::ClassDeclaration(ClassDeclaration::wrap(raw)),
        NodeKind::StructDeclaration => AstNode::StructDeclaration(StructDeclaration::wrap(raw)),
        NodeKind::ClassDefinition => AstNode::ClassDefinition(ClassDefinition::wrap(raw)),
        NodeKind::ClassProperty => AstNode::ClassProperty(ClassProperty::wrap(raw)),
        NodeKind::MethodDefinition => AstNode::MethodDefinition(MethodDefinition::wrap(raw)),
        NodeKind::ImportDeclaration => AstNode::ImportDeclaration(ImportDeclaration::wrap(raw)),
        NodeKind::EtsImportDeclaration => {
            AstNode::EtsImportDeclaration(EtsImportDeclaration::wrap(raw))
        }
        NodeKind::ImportSpecifier => AstNode::ImportSpecifier(ImportSpecifier::wrap(raw)),
        NodeKind::ScriptFunction => AstNode::ScriptFunction(ScriptFunction::wrap(raw)),
        NodeKind::FunctionExpression => AstNode::FunctionExpression(FunctionExpression::wrap(raw)),
        NodeKind::ArrowFunctionExpression => {
            AstNode::ArrowFunctionExpression(ArrowFunctionExpression::wrap(raw))
        }
        NodeKind::EtsParameterExpression => {
            AstNode::EtsParameterExpression(EtsParameterExpression::wrap(raw))
        }
        NodeKind::SpreadElement => AstNode::SpreadElement(SpreadElement::wrap(raw)),
        NodeKind::Identifier => AstNode::Identifier(Identifier::wrap(raw)),
        NodeKind::NumberLiteral => AstNode::NumberLiteral(NumberLiteral::wrap(raw)),
        NodeKind::StringLiteral => AstNode::StringLiteral(StringLiteral::wrap(raw)),
        NodeKind::BooleanLiteral => AstNode::BooleanLiteral(BooleanLiteral::wrap(raw)),
        NodeKind::NullLiteral => AstNode::NullLiteral(NullLiteral::wrap(raw)),
        NodeKind::UndefinedLiteral => AstNode::UndefinedLiteral(UndefinedLiteral::wrap(raw)),
        NodeKind::ThisExpression => AstNode::ThisExpression(ThisExpression::wrap(raw)),
        NodeKind::MemberExpression => AstNode::MemberExpression(MemberExpression::wrap(raw)),
        NodeKind::ChainExpression => AstNode::ChainExpression(ChainExpression::wrap(raw)),
        NodeKind::CallExpression => AstNode::CallExpression(CallExpression::wrap(raw)),
        NodeKind::BinaryExpression => AstNode::BinaryExpression(BinaryExpression::wrap(raw)),
        NodeKind::AssignmentExpression => {
            AstNode::AssignmentExpression(AssignmentExpression::wrap(raw))
        }
        NodeKind::ConditionalExpression => {
            AstNode::ConditionalExpression(ConditionalExpression::wrap(raw))
        }
        NodeKind::BlockExpression => AstNode::BlockExpression(BlockExpression::wrap(raw)),
        NodeKind::EtsPrimitiveType => AstNode::EtsPrimitiveType(EtsPrimitiveType::wrap(raw)),
        NodeKind::EtsTypeReference => AstNode::EtsTypeReference(EtsTypeReference::wrap(raw)),
        NodeKind::EtsUnionType => AstNode::EtsUnionType(EtsUnionType::wrap(raw)),
    };
    Ok(node)
}

pub(crate) fn raws<N: AsRaw>(nodes: &[N]) -> Vec<RawHandle> {
    nodes.iter().map(AsRaw::raw).collect()
}

pub(crate) fn raw_opt<N: AsRaw>(node: Option<N>) -> Option<RawHandle> {
    node.map(|n| n.raw())
}

pub(crate) fn resolve_all(ctx: &Context, raws: &[RawHandle]) -> Result<Vec<AstNode>> {
    raws.iter().map(|&raw| resolve(ctx, raw)).collect()
}

pub(crate) fn resolve_opt(ctx: &Context, raw: Option<RawHandle>) -> Result<Option<AstNode>> {
    raw.map(|raw| resolve(ctx, raw)).transpose()
}

pub(crate) fn wrap_all<N: Node>(ctx: &Context, raws: &[RawHandle]) -> Result<Vec<N>> {
    raws.iter().map(|&raw| N::from_raw(ctx, raw)).collect()
}

pub(crate) fn wrap_opt<N: Node>(ctx: &Context, raw: Option<RawHandle>) -> Result<Option<N>> {
    raw.map(|raw| N::from_raw(ctx, raw)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkmirror_native::{ClassDeclarationData, NodeData};

    /// One factory-built node of every kind
    fn one_of_each_kind(ctx: &mut Context) -> Vec<AstNode> {
        use arkmirror_types::{
            MemberExpressionKind, MethodDefinitionKind, PrimitiveType, ScriptFunctionFlags,
            TokenType, VariableDeclarationKind,
        };

        let a = Identifier::create(ctx, "a").unwrap();
        let b = Identifier::create(ctx, "b").unwrap();
        let one = NumberLiteral::create(ctx, 1.0).unwrap();
        let text = StringLiteral::create(ctx, "./lib").unwrap();
        let yes = BooleanLiteral::create(ctx, true).unwrap();
        let null = NullLiteral::create(ctx).unwrap();
        let undefined = UndefinedLiteral::create(ctx).unwrap();
        let this = ThisExpression::create(ctx).unwrap();
        let member = MemberExpression::create(
            ctx,
            a.into(),
            b.into(),
            MemberExpressionKind::Property,
            false,
            true,
        )
        .unwrap();
        let chain = ChainExpression::create(ctx, member.into()).unwrap();
        let call = CallExpression::create(ctx, a.into(), vec![one.into()], false, None).unwrap();
        let binary =
            BinaryExpression::create(ctx, a.into(), undefined.into(), TokenType::StrictEqual)
                .unwrap();
        let assign =
            AssignmentExpression::create(ctx, b.into(), one.into(), TokenType::Substitution)
                .unwrap();
        let conditional =
            ConditionalExpression::create(ctx, yes.into(), null.into(), this.into()).unwrap();

        let stmt = ExpressionStatement::create(ctx, chain.into()).unwrap();
        let ret = ReturnStatement::create(ctx, Some(one.into())).unwrap();
        let block = BlockStatement::create(ctx, vec![stmt.into(), ret.into()]).unwrap();
        let block_expr = BlockExpression::create(ctx, vec![stmt.into()]).unwrap();
        let declarator = VariableDeclarator::create(ctx, a, Some(one.into())).unwrap();
        let declaration =
            VariableDeclaration::create(ctx, VariableDeclarationKind::Let, vec![declarator])
                .unwrap();
        let if_stmt = IfStatement::create(ctx, yes.into(), block.into(), None).unwrap();
        let while_stmt = WhileStatement::create(ctx, yes.into(), block.into()).unwrap();

        let int = EtsPrimitiveType::create(ctx, PrimitiveType::Int).unwrap();
        let reference = EtsTypeReference::create(ctx, b).unwrap();
        let union = EtsUnionType::create(ctx, vec![int.into(), reference.into()]).unwrap();

        let spread = SpreadElement::create(ctx, a.into()).unwrap();
        let param = EtsParameterExpression::create(ctx, ParameterBinding::Rest(spread), None)
            .unwrap();
        let function = ScriptFunction::create(
            ctx,
            Some(a),
            vec![param],
            Some(int.into()),
            Some(block.into()),
            ScriptFunctionFlags::NONE,
        )
        .unwrap();
        let declaration_fn = FunctionDeclaration::create(ctx, function).unwrap();
        let function_expr = FunctionExpression::create(ctx, function).unwrap();
        let arrow = ArrowFunctionExpression::create(ctx, function).unwrap();

        let property = ClassProperty::create(ctx, b.into(), None, Some(int.into()), false).unwrap();
        let method = MethodDefinition::create(
            ctx,
            MethodDefinitionKind::Method,
            a.into(),
            function_expr,
            Vec::new(),
            false,
        )
        .unwrap();
        let definition =
            ClassDefinition::create(ctx, a, None, vec![property.into(), method.into()]).unwrap();
        let class = ClassDeclaration::create(ctx, definition).unwrap();
        let structure = StructDeclaration::create(ctx, definition).unwrap();

        let specifier = ImportSpecifier::create(ctx, a, b).unwrap();
        let import = ImportDeclaration::create(ctx, text, vec![specifier]).unwrap();
        let ets_import = EtsImportDeclaration::create(ctx, text, vec![specifier]).unwrap();
        let module = EtsModule::create(ctx, "main", vec![import.into(), class.into()]).unwrap();

        vec![
            module.into(),
            block.into(),
            stmt.into(),
            declaration.into(),
            declarator.into(),
            ret.into(),
            if_stmt.into(),
            while_stmt.into(),
            declaration_fn.into(),
            class.into(),
            structure.into(),
            definition.into(),
            property.into(),
            method.into(),
            import.into(),
            ets_import.into(),
            specifier.into(),
            function.into(),
            function_expr.into(),
            arrow.into(),
            param.into(),
            spread.into(),
            a.into(),
            one.into(),
            text.into(),
            yes.into(),
            null.into(),
            undefined.into(),
            this.into(),
            member.into(),
            chain.into(),
            call.into(),
            binary.into(),
            assign.into(),
            conditional.into(),
            block_expr.into(),
            int.into(),
            reference.into(),
            union.into(),
        ]
    }

    #[test]
    fn test_resolve_exact_kind() {
        let mut ctx = Context::new();
        let nodes = one_of_each_kind(&mut ctx);
        let kinds: Vec<NodeKind> = nodes.iter().map(AstNode::kind).collect();
        assert_eq!(kinds, NodeKind::ALL.to_vec());

        for node in nodes {
            assert_eq!(ctx.native().kind(node.raw()).unwrap(), node.kind());
            let resolved = resolve(&ctx, node.raw()).unwrap();
            assert_eq!(resolved, node);
            assert_eq!(resolved.kind(), node.kind());
        }
    }

    #[test]
    fn test_resolve_foreign_kind() {
        let mut ctx = Context::new();
        let foreign = ctx.native_mut().alloc_foreign(999, Vec::new()).unwrap();
        assert_eq!(
            resolve(&ctx, foreign),
            Err(MirrorError::UnknownNodeKind { discriminant: 999 })
        );
        assert_eq!(
            resolve(&ctx, RawHandle::NULL),
            Err(MirrorError::InvalidHandle { operation: "resolve" })
        );
    }

    #[test]
    fn test_from_raw_checks_kind() {
        let mut ctx = Context::new();
        let one = NumberLiteral::create(&mut ctx, 1.0).unwrap();
        let err = Identifier::from_raw(&ctx, one.raw()).unwrap_err();
        assert_eq!(
            err,
            MirrorError::KindMismatch {
                expected: NodeKind::Identifier,
                actual: NodeKind::NumberLiteral.discriminant(),
            }
        );
        assert_eq!(
            err.to_string(),
            "expected Identifier node, found NumberLiteral (61)"
        );
    }

    #[test]
    fn test_lenient_wrappers() {
        let mut ctx = Context::new();
        let module = EtsModule::create(&mut ctx, "main", Vec::new()).unwrap();
        let block = BlockStatement::from_raw(&ctx, module.raw()).unwrap();
        assert!(block.statements(&ctx).unwrap().is_empty());

        let name = Identifier::create(&mut ctx, "Point").unwrap();
        let definition = ClassDefinition::create(&mut ctx, name, None, Vec::new()).unwrap();
        let raw = ctx
            .native_mut()
            .alloc(NodeData::StructDeclaration(ClassDeclarationData {
                definition: definition.raw(),
            }))
            .unwrap();
        let class = ClassDeclaration::from_raw(&ctx, raw).unwrap();
        assert_eq!(class.definition(&ctx).unwrap(), definition);
        assert_eq!(
            resolve(&ctx, raw).unwrap().kind(),
            NodeKind::StructDeclaration
        );

        // The relaxation is one-way
        let real_block = BlockStatement::create(&mut ctx, Vec::new()).unwrap();
        assert!(EtsModule::from_raw(&ctx, real_block.raw()).is_err());
        let real_class = ClassDeclaration::create(&mut ctx, definition).unwrap();
        assert!(StructDeclaration::from_raw(&ctx, real_class.raw()).is_err());
        assert!(ClassDeclaration::from_raw(&ctx, definition.raw()).is_err());
    }

    #[test]
    fn test_ets_import_reads_as_import() {
        let mut ctx = Context::new();
        let source = StringLiteral::create(&mut ctx, "std/math").unwrap();
        let a = Identifier::create(&mut ctx, "sqrt").unwrap();
        let specifier = ImportSpecifier::create(&mut ctx, a, a).unwrap();
        let ets = EtsImportDeclaration::create(&mut ctx, source, vec![specifier]).unwrap();

        let import = ImportDeclaration::from_raw(&ctx, ets.raw()).unwrap();
        assert_eq!(import.source(&ctx).unwrap(), source);
        assert_eq!(import.specifiers(&ctx).unwrap(), vec![specifier]);
        assert_eq!(
            resolve(&ctx, ets.raw()).unwrap().kind(),
            NodeKind::EtsImportDeclaration
        );

        let plain = ImportDeclaration::create(&mut ctx, source, Vec::new()).unwrap();
        assert!(EtsImportDeclaration::from_raw(&ctx, plain.raw()).is_err());
    }

    #[test]
    fn test_null_handle_wrapping() {
        let ctx = Context::new();
        assert_eq!(
            Identifier::from_raw(&ctx, RawHandle::NULL),
            Err(MirrorError::InvalidHandle {
                operation: "Node::from_raw"
            })
        );
    }
}
