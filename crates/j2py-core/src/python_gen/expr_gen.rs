//! Expression translation.
//!
//! One recursive rule per expression variant. Binary operators other than
//! `||`/`&&` keep their Java spelling; literals other than `null` pass
//! through verbatim, numeric suffixes and quoting included.

use super::context::CodeGenContext;
use crate::ast::{Expr, Literal, UpdateOp};

pub(crate) fn codegen_expr(expr: &Expr, ctx: &CodeGenContext) -> String {
    match expr {
        Expr::Assign { target, op, value } => format!(
            "{} {} {}",
            codegen_expr(target, ctx),
            op,
            codegen_expr(value, ctx)
        ),
        Expr::Binary { left, op, right } => {
            let op = match op.as_str() {
                "||" => "or",
                "&&" => "and",
                other => other,
            };
            format!(
                "{} {} {}",
                codegen_expr(left, ctx),
                op,
                codegen_expr(right, ctx)
            )
        }
        Expr::Unary { op, operand } => {
            if op == "!" {
                format!("not {}", codegen_expr(operand, ctx))
            } else {
                format!("{}{}", op, codegen_expr(operand, ctx))
            }
        }
        // pre/post value semantics are collapsed to the side effect
        Expr::Update { target, op, .. } => {
            let op = match op {
                UpdateOp::Increment => "+=",
                UpdateOp::Decrement => "-=",
            };
            format!("{} {} 1", codegen_expr(target, ctx), op)
        }
        Expr::Ternary {
            condition,
            consequence,
            alternative,
        } => {
            // the conditional expression supplies its own grouping, so one
            // layer of condition parentheses is dropped
            let condition = match condition.as_ref() {
                Expr::Paren(inner) => codegen_expr(inner, ctx),
                other => codegen_expr(other, ctx),
            };
            format!(
                "({} if {} else {})",
                codegen_expr(consequence, ctx),
                condition,
                codegen_expr(alternative, ctx)
            )
        }
        Expr::MethodCall {
            receiver,
            name,
            args,
        } => {
            let args = codegen_args(args, ctx);
            match receiver {
                Some(object) => {
                    let object = codegen_expr(object, ctx);
                    if object == "System.out" && name == "println" {
                        format!("print({args})")
                    } else {
                        format!("{object}.{name}({args})")
                    }
                }
                None => format!("{name}({args})"),
            }
        }
        Expr::FieldAccess { object, field } => {
            if field == "println" {
                "print".to_string()
            } else {
                format!("{}.{}", codegen_expr(object, ctx), field)
            }
        }
        Expr::ArrayIndex { array, index } => format!(
            "{}[{}]",
            codegen_expr(array, ctx),
            codegen_expr(index, ctx)
        ),
        // casts have no Python counterpart; the inner expression stands alone
        Expr::Cast { value } => codegen_expr(value, ctx),
        Expr::New { class, args } => format!("{}({})", class, codegen_args(args, ctx)),
        Expr::NewArray {
            init: Some(items), ..
        } => format!("[{}]", codegen_args(items, ctx)),
        Expr::NewArray { init: None, dims } => {
            if dims.is_empty() {
                "[]".to_string()
            } else {
                // dimensions collapse into one flat list sized by their product
                let dims: Vec<String> = dims.iter().map(|d| codegen_expr(d, ctx)).collect();
                format!("[None] * {}", dims.join(" * "))
            }
        }
        Expr::Paren(inner) => format!("({})", codegen_expr(inner, ctx)),
        Expr::This => "self".to_string(),
        Expr::Super => "super()".to_string(),
        Expr::Ident(name) => {
            if ctx.field_table.contains_key(name) && !ctx.local_vars.contains(name) {
                format!("self.{name}")
            } else {
                name.clone()
            }
        }
        Expr::Literal(Literal::Null) => "None".to_string(),
        Expr::Literal(Literal::Bool(text)) => text.to_lowercase(),
        Expr::Literal(Literal::Other(text)) => text.clone(),
        Expr::Verbatim(text) => text.clone(),
    }
}

fn codegen_args(args: &[Expr], ctx: &CodeGenContext) -> String {
    args.iter()
        .map(|arg| codegen_expr(arg, ctx))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    #[test]
    fn logical_operators_are_mapped() {
        let ctx = CodeGenContext::new();
        let expr = Expr::Binary {
            left: Box::new(ident("a")),
            op: "||".to_string(),
            right: Box::new(Expr::Binary {
                left: Box::new(ident("b")),
                op: "&&".to_string(),
                right: Box::new(ident("c")),
            }),
        };
        assert_eq!(codegen_expr(&expr, &ctx), "a or b and c");
    }

    #[test]
    fn println_on_system_out_becomes_print() {
        let ctx = CodeGenContext::new();
        let expr = Expr::MethodCall {
            receiver: Some(Box::new(Expr::FieldAccess {
                object: Box::new(ident("System")),
                field: "out".to_string(),
            })),
            name: "println".to_string(),
            args: vec![ident("x")],
        };
        assert_eq!(codegen_expr(&expr, &ctx), "print(x)");
    }

    #[test]
    fn ternary_drops_the_condition_parentheses() {
        let ctx = CodeGenContext::new();
        let expr = Expr::Ternary {
            condition: Box::new(Expr::Paren(Box::new(ident("c")))),
            consequence: Box::new(ident("a")),
            alternative: Box::new(ident("b")),
        };
        assert_eq!(codegen_expr(&expr, &ctx), "(a if c else b)");
    }

    #[test]
    fn fields_are_qualified_unless_shadowed() {
        let mut ctx = CodeGenContext::new();
        ctx.field_table.insert("count".to_string(), "int".to_string());
        assert_eq!(codegen_expr(&ident("count"), &ctx), "self.count");
        ctx.local_vars.insert("count".to_string());
        assert_eq!(codegen_expr(&ident("count"), &ctx), "count");
    }

    #[test]
    fn uninitialized_array_creation_prefills_none() {
        let ctx = CodeGenContext::new();
        let expr = Expr::NewArray {
            init: None,
            dims: vec![
                Expr::Literal(Literal::Other("2".to_string())),
                Expr::Literal(Literal::Other("3".to_string())),
            ],
        };
        assert_eq!(codegen_expr(&expr, &ctx), "[None] * 2 * 3");
    }
}
