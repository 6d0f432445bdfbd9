//! Source rendering of a (sub)tree
//!
//! Output is ETS-like and meant for people: diffs in the CLI, assertions in
//! tests. It is not guaranteed to round-trip through a parser.

use arkmirror_native::Result;
use arkmirror_types::{MemberExpressionKind, MethodDefinitionKind, ModifierFlags};

use crate::context::Context;
use crate::nodes::{
    resolve, AstNode, ClassDefinition, EtsParameterExpression, Identifier, ImportSpecifier,
    ParameterBinding, ScriptFunction, StringLiteral,
};

const INDENT: &str = "  ";

/// Render `node` and everything below it.
pub fn print(ctx: &Context, node: AstNode) -> Result<String> {
    let mut printer = Printer { ctx, depth: 0 };
    let node = resolve(ctx, node.raw())?;
    let mut out = printer.node(node)?;
    if let AstNode::EtsModule(_) = node {
        out.push('\n');
    }
    Ok(out)
}

struct Printer<'c> {
    ctx: &'c Context,
    depth: usize,
}

impl<'c> Printer<'c> {
    fn pad(&self) -> String {
        INDENT.repeat(self.depth)
    }

    fn modifiers(&self, node: AstNode) -> Result<String> {
        let flags: ModifierFlags = self.ctx.modifiers(node.raw())?;
        let mut out = String::new();
        for keyword in flags.keywords() {
            out.push_str(keyword);
            out.push(' ');
        }
        Ok(out)
    }

    fn block(&mut self, statements: Vec<AstNode>) -> Result<String> {
        if statements.is_empty() {
            return Ok("{}".to_string());
        }
        self.depth += 1;
        let mut out = String::from("{\n");
        for statement in statements {
            out.push_str(&self.pad());
            out.push_str(&self.node(statement)?);
            out.push('\n');
        }
        self.depth -= 1;
        out.push_str(&self.pad());
        out.push('}');
        Ok(out)
    }

    fn list(&mut self, nodes: Vec<AstNode>) -> Result<String> {
        let parts = nodes
            .into_iter()
            .map(|node| self.node(node))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(", "))
    }

    /// An identifier in a binding position, with its annotation
    fn binding(&mut self, ident: Identifier) -> Result<String> {
        let mut out = ident.name(self.ctx)?;
        if let Some(annotation) = ident.type_annotation(self.ctx)? {
            out.push_str(": ");
            out.push_str(&self.node(annotation)?);
        }
        Ok(out)
    }

    fn parameter(&mut self, param: EtsParameterExpression) -> Result<String> {
        let mut out = match param.binding(self.ctx)? {
            ParameterBinding::Identifier(ident) => self.binding(ident)?,
            ParameterBinding::Rest(spread) => match spread.argument(self.ctx)? {
                AstNode::Identifier(ident) => format!("...{}", self.binding(ident)?),
                other => format!("...{}", self.node(other)?),
            },
        };
        if let Some(initializer) = param.initializer(self.ctx)? {
            out.push_str(" = ");
            out.push_str(&self.node(initializer)?);
        }
        Ok(out)
    }

    /// `(params): ret body`, the part every function form shares
    fn signature(&mut self, function: ScriptFunction) -> Result<String> {
        let params = function
            .params(self.ctx)?
            .into_iter()
            .map(|param| self.parameter(param))
            .collect::<Result<Vec<_>>>()?;
        let mut out = format!("({})", params.join(", "));
        if let Some(return_type) = function.return_type(self.ctx)? {
            out.push_str(": ");
            out.push_str(&self.node(return_type)?);
        }
        match function.body(self.ctx)? {
            Some(body) => {
                out.push(' ');
                out.push_str(&self.node(body)?);
            }
            None => out.push(';'),
        }
        Ok(out)
    }

    fn class(&mut self, keyword: &str, definition: ClassDefinition) -> Result<String> {
        let mut out = format!("{} {}", keyword, definition.ident(self.ctx)?.name(self.ctx)?);
        if let Some(super_class) = definition.super_class(self.ctx)? {
            out.push_str(" extends ");
            out.push_str(&self.node(super_class)?);
        }
        out.push(' ');
        let body = definition.body(self.ctx)?;
        out.push_str(&self.block(body)?);
        Ok(out)
    }

    /// Operand of a binary-like expression, parenthesized when compound
    fn operand(&mut self, node: AstNode) -> Result<String> {
        let text = self.node(node)?;
        Ok(match node {
            AstNode::BinaryExpression(_)
            | AstNode::AssignmentExpression(_)
            | AstNode::ConditionalExpression(_) => format!("({})", text),
            _ => text,
        })
    }

    fn node(&mut self, node: AstNode) -> Result<String> {
        let ctx = self.ctx;
        let text = match node {
            AstNode::EtsModule(n) => {
                let statements = n
                    .statements(ctx)?
                    .into_iter()
                    .map(|statement| self.node(statement))
                    .collect::<Result<Vec<_>>>()?;
                statements.join("\n")
            }
            AstNode::BlockStatement(n) => self.block(n.statements(ctx)?)?,
            AstNode::ExpressionStatement(n) => format!("{};", self.node(n.expression(ctx)?)?),
            AstNode::VariableDeclaration(n) => {
                let declarators = n
                    .declarators(ctx)?
                    .into_iter()
                    .map(|d| self.node(d.into()))
                    .collect::<Result<Vec<_>>>()?;
                format!(
                    "{}{} {};",
                    self.modifiers(node)?,
                    n.kind(ctx)?.as_str(),
                    declarators.join(", ")
                )
            }
            AstNode::VariableDeclarator(n) => {
                let mut out = self.binding(n.id(ctx)?)?;
                if let Some(init) = n.init(ctx)? {
                    out.push_str(" = ");
                    out.push_str(&self.node(init)?);
                }
                out
            }
            AstNode::ReturnStatement(n) => match n.argument(ctx)? {
                Some(argument) => format!("return {};", self.node(argument)?),
                None => "return;".to_string(),
            },
            AstNode::IfStatement(n) => {
                let mut out = format!(
                    "if ({}) {}",
                    self.node(n.test(ctx)?)?,
                    self.node(n.consequent(ctx)?)?
                );
                if let Some(alternate) = n.alternate(ctx)? {
                    out.push_str(" else ");
                    out.push_str(&self.node(alternate)?);
                }
                out
            }
            AstNode::WhileStatement(n) => format!(
                "while ({}) {}",
                self.node(n.test(ctx)?)?,
                self.node(n.body(ctx)?)?
            ),
            AstNode::FunctionDeclaration(n) => {
                let function = n.function(ctx)?;
                let name = match function.id(ctx)? {
                    Some(id) => id.name(ctx)?,
                    None => String::new(),
                };
                format!(
                    "{}function {}{}",
                    self.modifiers(node)?,
                    name,
                    self.signature(function)?
                )
            }
            AstNode::ClassDeclaration(n) => {
                let modifiers = self.modifiers(node)?;
                format!("{}{}", modifiers, self.class("class", n.definition(ctx)?)?)
            }
            AstNode::StructDeclaration(n) => {
                let modifiers = self.modifiers(node)?;
                format!("{}{}", modifiers, self.class("struct", n.definition(ctx)?)?)
            }
            AstNode::ClassDefinition(n) => self.class("class", n)?,
            AstNode::ClassProperty(n) => {
                let mut out = self.modifiers(node)?;
                let key = self.node(n.key(ctx)?)?;
                if n.is_computed(ctx)? {
                    out.push_str(&format!("[{}]", key));
                } else {
                    out.push_str(&key);
                }
                if let Some(annotation) = n.type_annotation(ctx)? {
                    out.push_str(": ");
                    out.push_str(&self.node(annotation)?);
                }
                if let Some(value) = n.value(ctx)? {
                    out.push_str(" = ");
                    out.push_str(&self.node(value)?);
                }
                out.push(';');
                out
            }
            AstNode::MethodDefinition(n) => {
                let mut out = String::new();
                for overload in n.overloads(ctx)? {
                    out.push_str(&self.node(overload.into())?);
                    out.push('\n');
                    out.push_str(&self.pad());
                }
                out.push_str(&self.modifiers(node)?);
                let key = self.node(n.key(ctx)?)?;
                let key = if n.is_computed(ctx)? {
                    format!("[{}]", key)
                } else {
                    key
                };
                let function = n.value(ctx)?.function(ctx)?;
                match n.kind(ctx)? {
                    MethodDefinitionKind::Constructor => out.push_str("constructor"),
                    MethodDefinitionKind::Get => out.push_str(&format!("get {}", key)),
                    MethodDefinitionKind::Set => out.push_str(&format!("set {}", key)),
                    MethodDefinitionKind::Method | MethodDefinitionKind::ExtensionMethod => {
                        out.push_str(&key)
                    }
                }
                out.push_str(&self.signature(function)?);
                out
            }
            AstNode::ImportDeclaration(n) => {
                let specifiers = n.specifiers(ctx)?;
                let source = n.source(ctx)?;
                self.import(specifiers, source)?
            }
            AstNode::EtsImportDeclaration(n) => {
                let specifiers = n.specifiers(ctx)?;
                let source = n.source(ctx)?;
                self.import(specifiers, source)?
            }
            AstNode::ImportSpecifier(n) => {
                let imported = n.imported(ctx)?.name(ctx)?;
                let local = n.local(ctx)?.name(ctx)?;
                if imported == local {
                    imported
                } else {
                    format!("{} as {}", imported, local)
                }
            }
            AstNode::ScriptFunction(n) => format!("function{}", self.signature(n)?),
            AstNode::FunctionExpression(n) => {
                let function = n.function(ctx)?;
                let name = match function.id(ctx)? {
                    Some(id) => format!(" {}", id.name(ctx)?),
                    None => String::new(),
                };
                format!("function{}{}", name, self.signature(function)?)
            }
            AstNode::ArrowFunctionExpression(n) => {
                let function = n.function(ctx)?;
                let params = function
                    .params(ctx)?
                    .into_iter()
                    .map(|param| self.parameter(param))
                    .collect::<Result<Vec<_>>>()?;
                let mut out = format!("({})", params.join(", "));
                if let Some(return_type) = function.return_type(ctx)? {
                    out.push_str(": ");
                    out.push_str(&self.node(return_type)?);
                }
                out.push_str(" => ");
                match function.body(ctx)? {
                    Some(body) => out.push_str(&self.node(body)?),
                    None => out.push_str("{}"),
                }
                out
            }
            AstNode::EtsParameterExpression(n) => self.parameter(n)?,
            AstNode::SpreadElement(n) => format!("...{}", self.node(n.argument(ctx)?)?),
            AstNode::Identifier(n) => n.name(ctx)?,
            AstNode::NumberLiteral(n) => number(n.value(ctx)?),
            AstNode::StringLiteral(n) => quote(&n.value(ctx)?),
            AstNode::BooleanLiteral(n) => n.value(ctx)?.to_string(),
            AstNode::NullLiteral(_) => "null".to_string(),
            AstNode::UndefinedLiteral(_) => "undefined".to_string(),
            AstNode::ThisExpression(_) => "this".to_string(),
            AstNode::MemberExpression(n) => {
                let object = self.operand(n.object(ctx)?)?;
                let property = self.node(n.property(ctx)?)?;
                let optional = n.is_optional(ctx)?;
                match (n.kind(ctx)?, n.is_computed(ctx)?, optional) {
                    (MemberExpressionKind::Element, _, false) | (_, true, false) => {
                        format!("{}[{}]", object, property)
                    }
                    (MemberExpressionKind::Element, _, true) | (_, true, true) => {
                        format!("{}?.[{}]", object, property)
                    }
                    (MemberExpressionKind::Property, false, false) => {
                        format!("{}.{}", object, property)
                    }
                    (MemberExpressionKind::Property, false, true) => {
                        format!("{}?.{}", object, property)
                    }
                }
            }
            AstNode::ChainExpression(n) => self.node(n.expression(ctx)?)?,
            AstNode::CallExpression(n) => {
                let callee = self.operand(n.callee(ctx)?)?;
                let arguments = self.list(n.arguments(ctx)?)?;
                let mut out = if n.is_optional(ctx)? {
                    format!("{}?.({})", callee, arguments)
                } else {
                    format!("{}({})", callee, arguments)
                };
                if let Some(block) = n.trailing_block(ctx)? {
                    out.push(' ');
                    out.push_str(&self.node(block.into())?);
                }
                out
            }
            AstNode::BinaryExpression(n) => format!(
                "{} {} {}",
                self.operand(n.left(ctx)?)?,
                n.operator(ctx)?.as_str(),
                self.operand(n.right(ctx)?)?
            ),
            AstNode::AssignmentExpression(n) => format!(
                "{} {} {}",
                self.node(n.left(ctx)?)?,
                n.operator(ctx)?.as_str(),
                self.operand(n.right(ctx)?)?
            ),
            AstNode::ConditionalExpression(n) => format!(
                "{} ? {} : {}",
                self.operand(n.test(ctx)?)?,
                self.operand(n.consequent(ctx)?)?,
                self.operand(n.alternate(ctx)?)?
            ),
            AstNode::BlockExpression(n) => format!("({})", self.block(n.statements(ctx)?)?),
            AstNode::EtsPrimitiveType(n) => n.primitive(ctx)?.as_str().to_string(),
            AstNode::EtsTypeReference(n) => n.name(ctx)?.name(ctx)?,
            AstNode::EtsUnionType(n) => {
                let types = n
                    .types(ctx)?
                    .into_iter()
                    .map(|ty| self.node(ty))
                    .collect::<Result<Vec<_>>>()?;
                types.join(" | ")
            }
        };
        Ok(text)
    }

    fn import(
        &mut self,
        specifiers: Vec<ImportSpecifier>,
        source: StringLiteral,
    ) -> Result<String> {
        let names = self.list(specifiers.into_iter().map(AstNode::from).collect())?;
        Ok(format!(
            "import {{ {} }} from {};",
            names,
            quote(&source.value(self.ctx)?)
        ))
    }
}

fn number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        value.to_string()
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::*;
    use arkmirror_types::{
        PrimitiveType, ScriptFunctionFlags, TokenType, VariableDeclarationKind,
    };

    fn ident(ctx: &mut Context, name: &str) -> AstNode {
        Identifier::create(ctx, name).unwrap().into()
    }

    #[test]
    fn test_print_optional_member() {
        let mut ctx = Context::new();
        let a = ident(&mut ctx, "a");
        let b = ident(&mut ctx, "b");
        let member =
            MemberExpression::create(&mut ctx, a, b, MemberExpressionKind::Property, false, true)
                .unwrap();
        let chain = ChainExpression::create(&mut ctx, member.into()).unwrap();
        assert_eq!(print(&ctx, chain.into()).unwrap(), "a?.b");

        let index = ident(&mut ctx, "i");
        let element =
            MemberExpression::create(&mut ctx, a, index, MemberExpressionKind::Element, true, false)
                .unwrap();
        assert_eq!(print(&ctx, element.into()).unwrap(), "a[i]");
    }

    #[test]
    fn test_print_block_expression_indents() {
        let mut ctx = Context::new();
        let t = Identifier::create(&mut ctx, "t").unwrap();
        let a = ident(&mut ctx, "a");
        let declarator = VariableDeclarator::create(&mut ctx, t, Some(a)).unwrap();
        let decl =
            VariableDeclaration::create(&mut ctx, VariableDeclarationKind::Let, vec![declarator])
                .unwrap();
        let undefined = UndefinedLiteral::create(&mut ctx).unwrap();
        let test = BinaryExpression::create(
            &mut ctx,
            t.into(),
            undefined.into(),
            TokenType::StrictEqual,
        )
        .unwrap();
        let stmt = ExpressionStatement::create(&mut ctx, test.into()).unwrap();
        let block = BlockExpression::create(&mut ctx, vec![decl.into(), stmt.into()]).unwrap();
        let x = Identifier::create(&mut ctx, "x").unwrap();
        let outer = VariableDeclarator::create(&mut ctx, x, Some(block.into())).unwrap();
        let outer =
            VariableDeclaration::create(&mut ctx, VariableDeclarationKind::Const, vec![outer])
                .unwrap();
        let module = EtsModule::create(&mut ctx, "main", vec![outer.into()]).unwrap();

        assert_eq!(
            print(&ctx, module.into()).unwrap(),
            "const x = ({\n  let t = a;\n  t === undefined;\n});\n"
        );
    }

    #[test]
    fn test_print_function_with_return_type() {
        let mut ctx = Context::new();
        let name = Identifier::create(&mut ctx, "f").unwrap();
        let int = EtsPrimitiveType::create(&mut ctx, PrimitiveType::Int).unwrap();
        let x = Identifier::create_annotated(&mut ctx, "x", Some(int.into())).unwrap();
        let param =
            EtsParameterExpression::create(&mut ctx, ParameterBinding::Identifier(x), None)
                .unwrap();
        let ret = ReturnStatement::create(&mut ctx, Some(x.into())).unwrap();
        let body = BlockStatement::create(&mut ctx, vec![ret.into()]).unwrap();
        let void = EtsPrimitiveType::create(&mut ctx, PrimitiveType::Void).unwrap();
        let function = ScriptFunction::create(
            &mut ctx,
            Some(name),
            vec![param],
            Some(void.into()),
            Some(body.into()),
            ScriptFunctionFlags::NONE,
        )
        .unwrap();
        let decl = FunctionDeclaration::create(&mut ctx, function).unwrap();
        decl.set_modifiers(&mut ctx, ModifierFlags::EXPORT).unwrap();

        assert_eq!(
            print(&ctx, decl.into()).unwrap(),
            "export function f(x: int): void {\n  return x;\n}"
        );
    }

    #[test]
    fn test_print_literals() {
        let mut ctx = Context::new();
        let n = NumberLiteral::create(&mut ctx, 1.5).unwrap();
        let i = NumberLiteral::create(&mut ctx, 3.0).unwrap();
        let s = StringLiteral::create(&mut ctx, "say \"hi\"").unwrap();
        assert_eq!(print(&ctx, n.into()).unwrap(), "1.5");
        assert_eq!(print(&ctx, i.into()).unwrap(), "3");
        assert_eq!(print(&ctx, s.into()).unwrap(), "\"say \\\"hi\\\"\"");
    }
}
