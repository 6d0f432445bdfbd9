//! Explain command - explain diagnostic codes

use anyhow::{anyhow, Result};
use arkmirror_diagnostics::DiagnosticCode;
use clap::Args;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Diagnostic code to explain (e.g., M003, L001)
    pub code: String,
}

struct Explanation {
    code: DiagnosticCode,
    title: &'static str,
    description: &'static str,
    suggestion: Option<&'static str>,
    related: &'static [&'static str],
}

const EXPLANATIONS: &[Explanation] = &[
    // Mirror consistency errors
    Explanation {
        code: DiagnosticCode::InvalidHandle,
        title: "Invalid Node Handle",
        description: "An operation needed a live node but was given the null handle or an index the native context never issued.",
        suggestion: Some("This is an internal error in a pass or in the loader. Run with -vvv to see the last rewrites before the failure."),
        related: &["M002"],
    },
    Explanation {
        code: DiagnosticCode::StaleHandle,
        title: "Stale Node Handle",
        description: "A node handle outlived the native context that issued it, or was used with a different context.",
        suggestion: Some("Keep wrapper nodes scoped to the compilation that produced them."),
        related: &["M001"],
    },
    Explanation {
        code: DiagnosticCode::UnknownNodeKind,
        title: "Unknown Node Kind",
        description: r#"The native tree contains a node whose kind has no host wrapper.

The set of node kinds mirrored on the host side is fixed. A native compiler
that grew new node kinds has to be matched by a new host release."#,
        suggestion: Some("Check that the host and native compiler versions match."),
        related: &["M004"],
    },
    Explanation {
        code: DiagnosticCode::KindMismatch,
        title: "Node Kind Mismatch",
        description: "A field that only accepts one kind of node (e.g. a declarator's name, which must be an identifier) holds a node of another kind.",
        suggestion: Some("If this comes from a dump, fix the offending node. If it comes from a pass, the pass replaced a typed child with an incompatible node."),
        related: &["M003", "L001"],
    },
    Explanation {
        code: DiagnosticCode::UnsupportedAttribute,
        title: "Unsupported Attribute",
        description: "A post-construction attribute (return type, type annotation, overload list, trailing block) was set on a node kind that does not carry it.",
        suggestion: None,
        related: &["M004"],
    },
    Explanation {
        code: DiagnosticCode::MissingProgram,
        title: "No Program Loaded",
        description: "A pass asked for the program root before any module was committed to the context.",
        suggestion: Some("Load a module dump before running the pipeline."),
        related: &["L002"],
    },
    Explanation {
        code: DiagnosticCode::ArenaExhausted,
        title: "Node Arena Exhausted",
        description: "The native context has handed out every node index a handle can address. Each rewrite allocates fresh nodes, so a runaway pass can get here long before the input is that large.",
        suggestion: Some("Split the input into smaller modules, or look for a pass that rebuilds nodes on every visit."),
        related: &["W002"],
    },
    // Input errors
    Explanation {
        code: DiagnosticCode::MalformedDump,
        title: "Malformed Tree Dump",
        description: "The input is not valid JSON, or a node object has an unknown \"type\" tag or is missing a required field.",
        suggestion: Some("Node objects are tagged with their native kind name, e.g. { \"type\": \"Identifier\", \"name\": \"x\" }."),
        related: &["L002"],
    },
    Explanation {
        code: DiagnosticCode::NotAModule,
        title: "Dump Is Not a Module",
        description: "The root of a tree dump must be an ETSModule node.",
        suggestion: Some("Dump whole programs rather than individual declarations or expressions."),
        related: &["L001"],
    },
    // Driver warnings
    Explanation {
        code: DiagnosticCode::NoInputs,
        title: "No Inputs",
        description: "The input directory contains no .json tree dumps.",
        suggestion: None,
        related: &[],
    },
    Explanation {
        code: DiagnosticCode::NotAFixedPoint,
        title: "Lowering Is Not a Fixed Point",
        description: r#"Running the pipeline a second time over its own output rebuilt nodes.

Every pass removes all instances of the pattern it rewrites, so a second run
is expected to return the very same tree. Anything else points at a pass
that leaves work behind."#,
        suggestion: Some("Report the input that triggers this, along with the pass named in the diagnostic."),
        related: &[],
    },
    // Configuration
    Explanation {
        code: DiagnosticCode::InvalidConfig,
        title: "Invalid Configuration",
        description: "arkmirror.toml could not be read or contains a value of the wrong type.",
        suggestion: Some("Run `arkmirror init --force` to regenerate a default configuration."),
        related: &[],
    },
    // Internal
    Explanation {
        code: DiagnosticCode::InternalError,
        title: "Internal Error",
        description: "An unexpected failure outside the mirror layer, such as an I/O error while writing output.",
        suggestion: None,
        related: &[],
    },
];

pub fn run(args: ExplainArgs, format: OutputFormat, use_color: bool) -> Result<()> {
    let code = DiagnosticCode::parse(&args.code)
        .ok_or_else(|| anyhow!("Unknown diagnostic code: {}", args.code))?;
    let explanation = EXPLANATIONS
        .iter()
        .find(|e| e.code == code)
        .ok_or_else(|| anyhow!("No explanation recorded for {}", code))?;
    let code = code.as_str();

    match format {
        OutputFormat::Text => {
            if use_color {
                println!(
                    "\n{}: {}\n{}",
                    console::style(code).bold().cyan(),
                    console::style(explanation.title).bold(),
                    "=".repeat(code.len() + explanation.title.len() + 2)
                );
            } else {
                println!(
                    "\n{}: {}\n{}",
                    code,
                    explanation.title,
                    "=".repeat(code.len() + explanation.title.len() + 2)
                );
            }

            println!("\n{}\n", explanation.description);

            if let Some(suggestion) = explanation.suggestion {
                if use_color {
                    println!("{}:", console::style("Suggestion").bold().green());
                } else {
                    println!("Suggestion:");
                }
                for line in suggestion.lines() {
                    println!("  {}", line);
                }
                println!();
            }

            if !explanation.related.is_empty() {
                if use_color {
                    println!(
                        "{}: {}",
                        console::style("Related").dim(),
                        explanation.related.join(", ")
                    );
                } else {
                    println!("Related: {}", explanation.related.join(", "));
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "code": code,
                "severity": explanation.code.default_severity().as_str(),
                "title": explanation.title,
                "description": explanation.description,
                "suggestion": explanation.suggestion,
                "related": explanation.related,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_explained() {
        for code in DiagnosticCode::ALL {
            assert!(
                EXPLANATIONS.iter().any(|e| e.code == *code),
                "{} has no explanation",
                code
            );
        }
    }

    #[test]
    fn test_related_codes_exist() {
        for explanation in EXPLANATIONS {
            for related in explanation.related {
                assert!(DiagnosticCode::parse(related).is_some(), "{}", related);
            }
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let args = ExplainArgs {
            code: "m003".to_string(),
        };
        run(args, OutputFormat::Json, false).unwrap();

        let args = ExplainArgs {
            code: "Z999".to_string(),
        };
        assert!(run(args, OutputFormat::Json, false).is_err());
    }
}
