//! Lower command - run the pipeline over tree dumps

use anyhow::{anyhow, Result};
use arkmirror_ast::{print, Context};
use arkmirror_diagnostics::{
    Diagnostic, DiagnosticCode, DiagnosticEmitter, Diagnostics, JsonEmitter, TerminalEmitter,
};
use arkmirror_loader::SyntaxNode;
use arkmirror_transform::{Pipeline, PipelineConfig, PipelineReport};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct LowerArgs {
    /// Tree dump (.json) or directory of dumps
    pub input: PathBuf,

    /// Configuration file (default: ./arkmirror.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip optional-chaining elimination
    #[arg(long)]
    pub no_optional_chaining: bool,

    /// Skip void return-type inference
    #[arg(long)]
    pub no_void_inference: bool,

    /// Skip overload base-linking
    #[arg(long)]
    pub no_overload_linking: bool,

    /// Print a unified diff of the source before and after lowering
    #[arg(long)]
    pub diff: bool,

    /// Rerun the passes on the result and warn unless nothing changes
    #[arg(long)]
    pub verify: bool,
}

impl LowerArgs {
    fn pipeline_config(&self, mut config: PipelineConfig) -> PipelineConfig {
        if self.no_optional_chaining {
            config.optional_chaining = false;
        }
        if self.no_void_inference {
            config.void_return_inference = false;
        }
        if self.no_overload_linking {
            config.overload_linking = false;
        }
        config
    }
}

/// One lowered input file
struct Lowered {
    path: PathBuf,
    before: String,
    after: String,
    dump: SyntaxNode,
    report: PipelineReport,
}

/// Collect all tree dumps under `path`
fn collect_dumps(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    files.sort();
    files
}

fn with_origin(mut diagnostic: Diagnostic, path: &Path) -> Diagnostic {
    diagnostic.origin = Some(path.display().to_string());
    diagnostic
}

fn lower_file(
    path: &Path,
    config: &PipelineConfig,
    verify: bool,
    diagnostics: &mut Diagnostics,
) -> Result<Lowered, Diagnostic> {
    let text = fs::read_to_string(path).map_err(|e| {
        Diagnostic::error(DiagnosticCode::InternalError, format!("cannot read file: {}", e))
            .build()
    })?;

    let mut ctx = Context::new();
    let module = arkmirror_loader::load_str(&mut ctx, &text).map_err(|e| e.to_diagnostic())?;
    if module.statements(&ctx).map_err(|e| e.to_diagnostic())?.is_empty() {
        warn!("{} holds an empty module", path.display());
    }
    let before = print(&ctx, module.into()).map_err(|e| e.to_diagnostic())?;

    let mut pipeline = Pipeline::new(config.clone());
    let report = pipeline.run(&mut ctx).map_err(|e| e.to_diagnostic())?;
    if verify {
        if let Err(err) = pipeline.verify_fixed_point(&mut ctx) {
            let diagnostic = err.to_diagnostic();
            if diagnostic.is_error() {
                return Err(diagnostic);
            }
            diagnostics.push(with_origin(diagnostic, path));
        }
    }

    let lowered = ctx.program().map_err(|e| e.to_diagnostic())?;
    let after = print(&ctx, lowered.into()).map_err(|e| e.to_diagnostic())?;
    let dump = arkmirror_loader::export_program(&ctx).map_err(|e| e.to_diagnostic())?;
    Ok(Lowered {
        path: path.to_path_buf(),
        before,
        after,
        dump,
        report,
    })
}

fn print_diff(lowered: &Lowered, use_color: bool) {
    let diff = TextDiff::from_lines(&lowered.before, &lowered.after);
    let name = lowered.path.display().to_string();
    println!("--- {}\n+++ {} (lowered)", name, name);
    for hunk in diff.unified_diff().iter_hunks() {
        println!("{}", hunk.header());
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            let line = format!("{}{}", sign, change.to_string().trim_end_matches('\n'));
            match change.tag() {
                ChangeTag::Delete if use_color => println!("{}", console::style(line).red()),
                ChangeTag::Insert if use_color => println!("{}", console::style(line).green()),
                _ => println!("{}", line),
            }
        }
    }
}

fn report_json(report: &PipelineReport) -> serde_json::Value {
    serde_json::json!({
        "root_changed": report.root_changed,
        "temps_introduced": report.temps_introduced,
        "passes": report.passes.iter().map(|pass| serde_json::json!({
            "pass": pass.pass,
            "reallocations": pass.reallocations,
            "root_changed": pass.root_changed,
        })).collect::<Vec<_>>(),
    })
}

pub fn run(args: LowerArgs, format: OutputFormat, use_color: bool, quiet: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = match Config::discover(args.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(err) => {
            let mut stderr = TerminalEmitter::new(std::io::stderr(), use_color);
            stderr.emit(&err.to_diagnostic())?;
            return Err(anyhow!("invalid configuration"));
        }
    };
    let pipeline_config = args.pipeline_config(config.pipeline.clone());

    let files = collect_dumps(&args.input);
    let mut diagnostics = Diagnostics::new();
    if files.is_empty() {
        warn!("no tree dumps under {}", args.input.display());
        diagnostics.push(
            Diagnostic::new(
                DiagnosticCode::NoInputs,
                format!("no .json files under {}", args.input.display()),
            )
            .build(),
        );
    }

    let progress = if files.len() > 1 && !quiet && matches!(format, OutputFormat::Text) {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")?);
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut lowered = Vec::new();
    for file in &files {
        progress.set_message(file.display().to_string());
        match lower_file(file, &pipeline_config, args.verify, &mut diagnostics) {
            Ok(result) => lowered.push(result),
            Err(diagnostic) => diagnostics.push(with_origin(diagnostic, file)),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    match format {
        OutputFormat::Text => {
            for result in &lowered {
                if args.diff {
                    print_diff(result, use_color);
                } else if !quiet {
                    if files.len() > 1 {
                        println!("// {}", result.path.display());
                    }
                    print!("{}", result.after);
                }
            }
            if !diagnostics.is_empty() {
                let mut stderr = TerminalEmitter::new(std::io::stderr(), use_color);
                stderr.emit_all(&diagnostics)?;
                stderr.emit_summary(&diagnostics)?;
            }
        }
        OutputFormat::Json => {
            let files: Vec<_> = lowered
                .iter()
                .map(|result| {
                    serde_json::json!({
                        "path": result.path.to_string_lossy(),
                        "lowered": result.dump,
                        "report": report_json(&result.report),
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "success": !diagnostics.has_errors(),
                    "files": files,
                }))?
            );
            let mut stderr = JsonEmitter::new(std::io::stderr());
            stderr.emit_all(&diagnostics)?;
            stderr.emit_summary(&diagnostics)?;
        }
    }

    if diagnostics.has_errors() {
        return Err(anyhow!(
            "lowering failed with {} error(s)",
            diagnostics.error_count()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DUMP: &str = r#"{
        "type": "ETSModule",
        "name": "main",
        "statements": [{
            "type": "ExpressionStatement",
            "expression": {
                "type": "MemberExpression",
                "object": { "type": "Identifier", "name": "a" },
                "property": { "type": "Identifier", "name": "b" },
                "optional": true
            }
        }]
    }"#;

    #[test]
    fn test_lower_file_reports_passes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.json");
        fs::write(&path, DUMP).unwrap();

        let mut diagnostics = Diagnostics::new();
        let result =
            lower_file(&path, &PipelineConfig::default(), true, &mut diagnostics).unwrap();
        assert!(diagnostics.is_empty());
        assert_eq!(result.before, "a?.b;\n");
        assert!(result.after.contains("let gensym%%_1 = a;"));
        assert!(result.report.root_changed);
        assert_eq!(result.report.temps_introduced, 1);
    }

    #[test]
    fn test_disabled_pass_keeps_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("main.json");
        fs::write(&path, DUMP).unwrap();

        let args = LowerArgs {
            input: path.clone(),
            config: None,
            no_optional_chaining: true,
            no_void_inference: false,
            no_overload_linking: false,
            diff: false,
            verify: false,
        };
        let config = args.pipeline_config(PipelineConfig::default());
        let mut diagnostics = Diagnostics::new();
        let result = lower_file(&path, &config, false, &mut diagnostics).unwrap();
        assert_eq!(result.after, result.before);
    }

    #[test]
    fn test_bad_dump_becomes_diagnostic() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{ "type": "Identifier", "name": "x" }"#).unwrap();

        let mut diagnostics = Diagnostics::new();
        let err = lower_file(&path, &PipelineConfig::default(), false, &mut diagnostics)
            .err()
            .unwrap();
        assert_eq!(err.code, DiagnosticCode::NotAModule);
    }

    #[test]
    fn test_collects_only_json_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.json"), DUMP).unwrap();
        fs::write(dir.path().join("nested/a.json"), DUMP).unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_dumps(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "json"));
        assert!(files.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
