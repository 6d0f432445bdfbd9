//! Pass sequencing
//!
//! Passes run in a fixed order: optional chaining, void inference, overload
//! linking. Overload linking goes last because it needs the final overload
//! lists. The lowered root is committed to the context once, after every
//! pass succeeded; a failing pass leaves the committed program untouched.

use arkmirror_ast::{AstVisitor, Context, EtsModule, MirrorError, Node, Result};
use arkmirror_diagnostics::{Diagnostic, DiagnosticCode};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::names::{TempNames, DEFAULT_TEMP_PREFIX};
use crate::optional_chain::OptionalChainLowering;
use crate::overloads::OverloadLinking;
use crate::void_return::VoidReturnInference;

/// A rewrite over a whole module
pub trait Transformer {
    /// Name used in logs and reports
    fn name(&self) -> &'static str;

    fn transform(&mut self, ctx: &mut Context, root: EtsModule) -> Result<EtsModule>;

    /// Transform the committed program and commit the result
    fn run_on_program(&mut self, ctx: &mut Context) -> Result<EtsModule> {
        let root = ctx.program()?;
        let lowered = self.transform(ctx, root)?;
        ctx.set_program(lowered)?;
        Ok(lowered)
    }
}

/// Drive `visitor` over `root`; the result must still be a module.
pub(crate) fn visit_module<V: AstVisitor>(
    visitor: &mut V,
    ctx: &mut Context,
    root: EtsModule,
) -> Result<EtsModule> {
    let lowered = visitor.visit(ctx, root.into())?;
    EtsModule::from_node(ctx, lowered)
}

/// Which passes run, as read from the `[pipeline]` table of `arkmirror.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub optional_chaining: bool,
    pub void_return_inference: bool,
    pub overload_linking: bool,
    pub temp_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            optional_chaining: true,
            void_return_inference: true,
            overload_linking: true,
            temp_prefix: DEFAULT_TEMP_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    pub pass: &'static str,
    /// Nodes rebuilt by `update` during the pass
    pub reallocations: usize,
    pub root_changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub passes: Vec<PassReport>,
    pub root_changed: bool,
    /// Temporary bindings introduced during this run
    pub temps_introduced: u64,
}

impl PipelineReport {
    pub fn total_reallocations(&self) -> usize {
        self.passes.iter().map(|pass| pass.reallocations).sum()
    }

    /// Nothing was rebuilt and the root is the one passed in
    pub fn is_fixed_point(&self) -> bool {
        !self.root_changed && self.total_reallocations() == 0
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error("rerunning the pipeline rebuilt {reallocations} nodes (first in {pass})")]
    NotAFixedPoint {
        pass: &'static str,
        reallocations: usize,
    },
}

impl PipelineError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            PipelineError::Mirror(err) => err.to_diagnostic(),
            PipelineError::NotAFixedPoint { pass, .. } => {
                Diagnostic::new(DiagnosticCode::NotAFixedPoint, self.to_string())
                    .with_origin(*pass)
                    .with_help("a pass left behind a pattern it is supposed to eliminate")
                    .build()
            }
        }
    }
}

pub struct Pipeline {
    config: PipelineConfig,
    names: TempNames,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let names = TempNames::new(config.temp_prefix.clone());
        Self { config, names }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn names(&self) -> &TempNames {
        &self.names
    }

    /// Run every enabled pass over `root` without committing anything
    pub fn run_on(
        &mut self,
        ctx: &mut Context,
        root: EtsModule,
    ) -> Result<(EtsModule, PipelineReport)> {
        let issued = self.names.issued();
        let mut passes: Vec<Box<dyn Transformer + '_>> = Vec::new();
        if self.config.optional_chaining {
            passes.push(Box::new(OptionalChainLowering::new(&mut self.names)));
        }
        if self.config.void_return_inference {
            passes.push(Box::new(VoidReturnInference::new()));
        }
        if self.config.overload_linking {
            passes.push(Box::new(OverloadLinking::new()));
        }

        let mut report = PipelineReport::default();
        let mut current = root;
        for pass in &mut passes {
            let before = ctx.reallocations();
            let lowered = pass.transform(ctx, current)?;
            let reallocations = ctx.reallocations() - before;
            info!("{}: {} nodes rebuilt", pass.name(), reallocations);
            report.passes.push(PassReport {
                pass: pass.name(),
                reallocations,
                root_changed: lowered != current,
            });
            current = lowered;
        }
        drop(passes);

        report.root_changed = current != root;
        report.temps_introduced = self.names.issued() - issued;
        Ok((current, report))
    }

    /// Lower the committed program and commit the result
    pub fn run(&mut self, ctx: &mut Context) -> Result<PipelineReport> {
        let root = ctx.program()?;
        let (lowered, report) = self.run_on(ctx, root)?;
        ctx.set_program(lowered)?;
        Ok(report)
    }

    /// Rerun the passes over the committed program and fail if anything
    /// would still change. Nothing is committed.
    pub fn verify_fixed_point(&mut self, ctx: &mut Context) -> Result<(), PipelineError> {
        let root = ctx.program()?;
        let (_, report) = self.run_on(ctx, root)?;
        if report.is_fixed_point() {
            return Ok(());
        }
        let culprit = report
            .passes
            .iter()
            .find(|pass| pass.reallocations > 0 || pass.root_changed);
        Err(PipelineError::NotAFixedPoint {
            pass: culprit.map_or("pipeline", |pass| pass.pass),
            reallocations: report.total_reallocations(),
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkmirror_ast::{
        AstNode, BlockStatement, ExpressionStatement, FunctionDeclaration, Identifier,
        MemberExpression, ScriptFunction,
    };
    use arkmirror_types::{MemberExpressionKind, ScriptFunctionFlags};

    /// `function f() { a?.b; }`
    fn program(ctx: &mut Context) -> EtsModule {
        let a = Identifier::create(ctx, "a").unwrap();
        let b = Identifier::create(ctx, "b").unwrap();
        let access = MemberExpression::create(
            ctx,
            a.into(),
            b.into(),
            MemberExpressionKind::Property,
            false,
            true,
        )
        .unwrap();
        let statement = ExpressionStatement::create(ctx, access.into()).unwrap();
        let body = BlockStatement::create(ctx, vec![statement.into()]).unwrap();
        let id = Identifier::create(ctx, "f").unwrap();
        let function = ScriptFunction::create(
            ctx,
            Some(id),
            Vec::new(),
            None,
            Some(body.into()),
            ScriptFunctionFlags::NONE,
        )
        .unwrap();
        let declaration = FunctionDeclaration::create(ctx, function).unwrap();
        let module = EtsModule::create(ctx, "main", vec![declaration.into()]).unwrap();
        ctx.set_program(module).unwrap();
        module
    }

    #[test]
    fn test_run_commits_lowered_root() {
        let mut ctx = Context::new();
        let original = program(&mut ctx);
        let mut pipeline = Pipeline::default();
        let report = pipeline.run(&mut ctx).unwrap();

        assert!(report.root_changed);
        assert_eq!(report.temps_introduced, 1);
        assert_eq!(
            report.passes.iter().map(|p| p.pass).collect::<Vec<_>>(),
            vec!["optional-chaining", "void-return-inference", "overload-linking"]
        );
        assert_eq!(report.passes[2].reallocations, 0);
        assert_ne!(ctx.program().unwrap(), original);
    }

    #[test]
    fn test_verify_after_run_succeeds() {
        let mut ctx = Context::new();
        program(&mut ctx);
        let mut pipeline = Pipeline::default();
        pipeline.run(&mut ctx).unwrap();
        let committed = ctx.program().unwrap();

        pipeline.verify_fixed_point(&mut ctx).unwrap();
        assert_eq!(ctx.program().unwrap(), committed);
        assert_eq!(pipeline.names().issued(), 1);
    }

    #[test]
    fn test_verify_before_run_fails() {
        let mut ctx = Context::new();
        program(&mut ctx);
        let err = Pipeline::default().verify_fixed_point(&mut ctx).unwrap_err();
        match &err {
            PipelineError::NotAFixedPoint { pass, .. } => assert_eq!(*pass, "optional-chaining"),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(err.to_diagnostic().code, DiagnosticCode::NotAFixedPoint);
    }

    #[test]
    fn test_disabled_passes_do_not_run() {
        let mut ctx = Context::new();
        let original = program(&mut ctx);
        let config = PipelineConfig {
            optional_chaining: false,
            void_return_inference: false,
            ..PipelineConfig::default()
        };
        let mut pipeline = Pipeline::new(config);
        let report = pipeline.run(&mut ctx).unwrap();
        assert_eq!(report.passes.len(), 1);
        assert!(report.is_fixed_point());
        assert_eq!(ctx.program().unwrap(), original);
    }

    #[test]
    fn test_failed_run_leaves_program_alone() {
        let mut ctx = Context::new();
        assert!(matches!(
            Pipeline::default().run(&mut ctx),
            Err(MirrorError::MissingProgram { .. })
        ));
    }

    #[test]
    fn test_names_continue_across_runs() {
        let mut ctx = Context::new();
        let mut pipeline = Pipeline::default();
        program(&mut ctx);
        pipeline.run(&mut ctx).unwrap();
        program(&mut ctx);
        pipeline.run(&mut ctx).unwrap();

        let AstNode::FunctionDeclaration(f) = ctx.program().unwrap().statements(&ctx).unwrap()[0]
        else {
            panic!("expected a function declaration");
        };
        let text = arkmirror_ast::print(&ctx, f.into()).unwrap();
        assert!(text.contains("gensym%%_2"), "{}", text);
    }

    #[test]
    fn test_config_defaults_fill_missing_keys() {
        let config: PipelineConfig = toml::from_str("overload_linking = false").unwrap();
        assert!(config.optional_chaining);
        assert!(!config.overload_linking);
        assert_eq!(config.temp_prefix, "gensym%%_");
    }

    #[test]
    fn test_run_on_program_commits() {
        let mut ctx = Context::new();
        let original = program(&mut ctx);
        let lowered = VoidReturnInference::new().run_on_program(&mut ctx).unwrap();
        assert_ne!(lowered, original);
        assert_eq!(ctx.program().unwrap(), lowered);
    }
}
