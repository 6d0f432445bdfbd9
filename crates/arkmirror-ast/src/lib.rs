//! Typed host-side mirror of the native AST
//!
//! Wrappers in [`nodes`] read and build native nodes through a [`Context`].
//! Rewrites go through each kind's `update`, which reuses the original node
//! whenever nothing changed; [`visitor`] drives such rewrites over whole
//! trees.
//!
//! ```
//! use arkmirror_ast::{print, Context, Identifier, MemberExpression};
//! use arkmirror_types::MemberExpressionKind;
//!
//! let mut ctx = Context::new();
//! let a = Identifier::create(&mut ctx, "a")?;
//! let b = Identifier::create(&mut ctx, "b")?;
//! let member = MemberExpression::create(
//!     &mut ctx,
//!     a.into(),
//!     b.into(),
//!     MemberExpressionKind::Property,
//!     false,
//!     true,
//! )?;
//! assert_eq!(print(&ctx, member.into())?, "a?.b");
//! # Ok::<(), arkmirror_ast::MirrorError>(())
//! ```

pub mod context;
pub mod identity;
pub mod nodes;
pub mod printer;
pub mod visitor;

pub use arkmirror_native::{MirrorError, RawHandle, Result};
pub use context::Context;
pub use identity::IsSame;
pub use nodes::*;
pub use printer::print;
pub use visitor::{visit_each_child, AstVisitor};
