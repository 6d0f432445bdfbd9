//! JSON tree dumps
//!
//! A dump mirrors what the native parser hands over: one tagged object per
//! node, see [`syntax`]. Loading builds every node through the factory and
//! commits the module as the program; exporting reads any subtree back.
//!
//! ```
//! use arkmirror_ast::{print, Context};
//!
//! let mut ctx = Context::new();
//! let module = arkmirror_loader::load_str(
//!     &mut ctx,
//!     r#"{ "type": "ETSModule", "name": "main", "statements": [
//!         { "type": "ExpressionStatement",
//!           "expression": { "type": "Identifier", "name": "x" } } ] }"#,
//! )?;
//! assert_eq!(print(&ctx, module.into())?, "x;\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod build;
mod error;
mod export;
pub mod syntax;

use arkmirror_ast::{AstNode, Context, EtsModule, Node};
use arkmirror_types::NodeKind;
use log::debug;

pub use error::LoadError;
pub use export::export;
pub use syntax::{Syntax, SyntaxNode};

/// Build `node` and its subtree without committing anything
pub fn build(ctx: &mut Context, node: &SyntaxNode) -> Result<AstNode, LoadError> {
    Ok(build::Builder::new(ctx).build(node)?)
}

/// Build a whole-program dump and commit it as the program
pub fn load_tree(ctx: &mut Context, tree: &SyntaxNode) -> Result<EtsModule, LoadError> {
    let found = tree.kind();
    if found != NodeKind::EtsModule {
        return Err(LoadError::NotAModule { found });
    }
    let before = ctx.native().node_count();
    let root = build(ctx, tree)?;
    let module = EtsModule::from_node(ctx, root)?;
    ctx.set_program(module)?;
    debug!(
        "loaded module with {} nodes",
        ctx.native().node_count() - before
    );
    Ok(module)
}

pub fn load_value(ctx: &mut Context, value: serde_json::Value) -> Result<EtsModule, LoadError> {
    let tree: SyntaxNode = serde_json::from_value(value)?;
    load_tree(ctx, &tree)
}

pub fn load_str(ctx: &mut Context, text: &str) -> Result<EtsModule, LoadError> {
    let tree: SyntaxNode = serde_json::from_str(text)?;
    load_tree(ctx, &tree)
}

/// Dump the committed program
pub fn export_program(ctx: &Context) -> Result<SyntaxNode, LoadError> {
    let program = ctx.program()?;
    Ok(export(ctx, program.into())?)
}

/// Pretty-printed JSON for `node`
pub fn to_json_string(ctx: &Context, node: AstNode) -> Result<String, LoadError> {
    Ok(serde_json::to_string_pretty(&export(ctx, node)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkmirror_ast::{print, MirrorError};
    use arkmirror_types::{ModifierFlags, SourceRange};
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "type": "ETSModule",
            "name": "main",
            "statements": [
                {
                    "type": "FunctionDeclaration",
                    "modifiers": "EXPORT",
                    "range": { "start": 0, "end": 40 },
                    "function": {
                        "type": "ScriptFunction",
                        "id": { "type": "Identifier", "name": "get" },
                        "params": [{
                            "type": "ETSParameterExpression",
                            "binding": {
                                "type": "Identifier",
                                "name": "o",
                                "typeAnnotation": {
                                    "type": "ETSTypeReference",
                                    "name": { "type": "Identifier", "name": "Obj" }
                                }
                            }
                        }],
                        "body": {
                            "type": "BlockStatement",
                            "statements": [{
                                "type": "ReturnStatement",
                                "argument": {
                                    "type": "MemberExpression",
                                    "object": { "type": "Identifier", "name": "o" },
                                    "property": { "type": "Identifier", "name": "x" },
                                    "kind": "property",
                                    "optional": true
                                }
                            }]
                        }
                    }
                }
            ]
        })
    }

    #[test]
    fn test_load_commits_program() {
        let mut ctx = Context::new();
        let module = load_value(&mut ctx, sample()).unwrap();
        assert_eq!(ctx.program().unwrap(), module);
        assert_eq!(
            print(&ctx, module.into()).unwrap(),
            "export function get(o: Obj) {\n  return o?.x;\n}\n"
        );
    }

    #[test]
    fn test_export_reproduces_dump() {
        let mut ctx = Context::new();
        let module = load_value(&mut ctx, sample()).unwrap();
        let exported = export(&ctx, module.into()).unwrap();
        assert_eq!(serde_json::to_value(&exported).unwrap(), sample());

        let statement = &exported.syntax;
        let Syntax::EtsModule { statements, .. } = statement else {
            panic!("expected a module");
        };
        assert_eq!(statements[0].modifiers, ModifierFlags::EXPORT);
        assert_eq!(statements[0].range, Some(SourceRange::new(0, 40)));
    }

    #[test]
    fn test_root_must_be_module() {
        let mut ctx = Context::new();
        let err = load_value(&mut ctx, json!({ "type": "NullLiteral" })).unwrap_err();
        assert!(matches!(
            err,
            LoadError::NotAModule {
                found: NodeKind::NullLiteral
            }
        ));
        assert_eq!(err.to_diagnostic().code.as_str(), "L002");
        assert!(ctx.program().is_err());
    }

    #[test]
    fn test_wrong_kind_in_typed_slot() {
        let mut ctx = Context::new();
        let err = load_value(
            &mut ctx,
            json!({
                "type": "ETSModule",
                "name": "main",
                "statements": [{
                    "type": "VariableDeclaration",
                    "kind": "let",
                    "declarations": [{
                        "type": "VariableDeclarator",
                        "id": { "type": "NumberLiteral", "value": 1 }
                    }]
                }]
            }),
        )
        .unwrap_err();
        match err {
            LoadError::Mirror(MirrorError::KindMismatch { expected, .. }) => {
                assert_eq!(expected, NodeKind::Identifier)
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_json() {
        let mut ctx = Context::new();
        let err = load_str(&mut ctx, "{ \"type\": \"ETSModule\"").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert_eq!(err.to_diagnostic().code.as_str(), "L001");

        let err = load_str(&mut ctx, r#"{ "type": "Decorator" }"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_rest_parameter_binding() {
        let mut ctx = Context::new();
        let param: SyntaxNode = serde_json::from_value(json!({
            "type": "ETSParameterExpression",
            "binding": {
                "type": "SpreadElement",
                "argument": { "type": "Identifier", "name": "rest" }
            }
        }))
        .unwrap();
        let built = build(&mut ctx, &param).unwrap();
        let AstNode::EtsParameterExpression(param) = built else {
            panic!("expected a parameter, got {}", built);
        };
        assert!(param.is_rest(&ctx).unwrap());
    }

    #[test]
    fn test_overload_links_load_from_dump() {
        fn overload(linked: bool) -> serde_json::Value {
            let mut node = json!({
                "type": "MethodDefinition",
                "kind": "method",
                "key": { "type": "Identifier", "name": "area" },
                "value": {
                    "type": "FunctionExpression",
                    "function": {
                        "type": "ScriptFunction",
                        "params": [],
                        "flags": "METHOD | OVERLOAD"
                    }
                }
            });
            if linked {
                node["linkedToBase"] = json!(true);
            }
            node
        }
        let dump = json!({
            "type": "ETSModule",
            "name": "main",
            "statements": [{
                "type": "ClassDeclaration",
                "definition": {
                    "type": "ClassDefinition",
                    "ident": { "type": "Identifier", "name": "Shape" },
                    "body": [{
                        "type": "MethodDefinition",
                        "kind": "method",
                        "key": { "type": "Identifier", "name": "area" },
                        "value": {
                            "type": "FunctionExpression",
                            "function": {
                                "type": "ScriptFunction",
                                "params": [],
                                "body": { "type": "BlockStatement", "statements": [] },
                                "flags": "METHOD"
                            }
                        },
                        "overloads": [overload(true), overload(false)]
                    }]
                }
            }]
        });

        let mut ctx = Context::new();
        let module = load_value(&mut ctx, dump.clone()).unwrap();
        let AstNode::ClassDeclaration(class) = module.statements(&ctx).unwrap()[0] else {
            panic!("expected a class");
        };
        let AstNode::MethodDefinition(owner) =
            class.definition(&ctx).unwrap().body(&ctx).unwrap()[0]
        else {
            panic!("expected a method");
        };
        let overloads = owner.overloads(&ctx).unwrap();
        assert_eq!(overloads[0].base_overload_method(&ctx).unwrap(), Some(owner));
        assert_eq!(overloads[1].base_overload_method(&ctx).unwrap(), None);

        let exported = export(&ctx, module.into()).unwrap();
        assert_eq!(serde_json::to_value(&exported).unwrap(), dump);
    }
}
