//! Lowering passes for the mirrored AST
//!
//! Each pass is an [`AstVisitor`](arkmirror_ast::AstVisitor) that rewrites
//! bottom-up through the node factory, so untouched subtrees are shared
//! between input and output:
//! - Optional-chaining elimination (`a?.b` to a temporary and a conditional)
//! - Void return-type inference
//! - Overload base-linking
//!
//! [`Pipeline`] runs them in that order and commits the result.

pub mod names;
pub mod optional_chain;
pub mod overloads;
pub mod pipeline;
pub mod void_return;

pub use names::TempNames;
pub use optional_chain::OptionalChainLowering;
pub use overloads::OverloadLinking;
pub use pipeline::{
    PassReport, Pipeline, PipelineConfig, PipelineError, PipelineReport, Transformer,
};
pub use void_return::{ReturnFinder, VoidReturnInference};
