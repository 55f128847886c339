//! Statement translation.
//!
//! One rule per statement variant. Statements emit fully indented lines
//! into the context buffer; anywhere Python requires a non-empty suite, an
//! empty translation falls back to `pass`.

use super::context::CodeGenContext;
use super::expr_gen::codegen_expr;
use crate::ast::{Block, CatchClause, Expr, ForInit, Stmt, SwitchGroup, SwitchLabel, VariableDeclarator};

pub(crate) fn codegen_stmt(stmt: &Stmt, ctx: &mut CodeGenContext) {
    match stmt {
        // Java's block scoping is flattened; statements emit at the
        // current level
        Stmt::Block(block) => {
            for inner in &block.statements {
                codegen_stmt(inner, ctx);
            }
        }
        Stmt::LocalVar { declarators, .. } => codegen_local_var(declarators, ctx),
        Stmt::If {
            condition,
            consequence,
            alternative,
        } => codegen_if_stmt(condition, consequence, alternative.as_deref(), ctx),
        Stmt::Switch { scrutinee, groups } => codegen_switch_stmt(scrutinee, groups, ctx),
        Stmt::For {
            init,
            condition,
            updates,
            body,
        } => codegen_for_stmt(init.as_ref(), condition.as_ref(), updates, body, ctx),
        Stmt::ForEach {
            variable,
            iterable,
            body,
        } => {
            ctx.local_vars.insert(variable.clone());
            let iterable = codegen_expr(iterable, ctx);
            ctx.line(&format!("for {variable} in {iterable}:"));
            codegen_body(body, ctx);
        }
        Stmt::While { condition, body } => {
            let condition = codegen_expr(condition, ctx);
            ctx.line(&format!("while {condition}:"));
            codegen_body(body, ctx);
        }
        Stmt::DoWhile { body, condition } => codegen_do_while_stmt(body, condition, ctx),
        Stmt::Try {
            body,
            catches,
            finally,
        } => codegen_try_stmt(body, catches, finally.as_ref(), ctx),
        Stmt::Return(value) => match value {
            Some(value) => {
                let value = codegen_expr(value, ctx);
                ctx.line(&format!("return {value}"));
            }
            None => ctx.line("return"),
        },
        Stmt::Break => ctx.line("break"),
        Stmt::Continue => ctx.line("continue"),
        Stmt::Throw(value) => {
            let value = codegen_expr(value, ctx);
            ctx.line(&format!("raise {value}"));
        }
        Stmt::Expr(expr) => {
            let expr = codegen_expr(expr, ctx);
            ctx.line(&expr);
        }
        Stmt::Empty => {}
        Stmt::Verbatim(text) => {
            for line in text.lines() {
                ctx.line(line);
            }
        }
    }
}

/// Emit a statement as an indented suite, falling back to `pass` when the
/// translation yields no text (Python blocks cannot be empty).
fn codegen_body(body: &Stmt, ctx: &mut CodeGenContext) {
    ctx.with_indent(|ctx| {
        let before = ctx.emitted();
        codegen_stmt(body, ctx);
        if ctx.emitted() == before {
            ctx.line("pass");
        }
    });
}

/// As [`codegen_body`], for a statement list.
pub(crate) fn codegen_suite(stmts: &[Stmt], ctx: &mut CodeGenContext) {
    ctx.with_indent(|ctx| {
        let before = ctx.emitted();
        for stmt in stmts {
            codegen_stmt(stmt, ctx);
        }
        if ctx.emitted() == before {
            ctx.line("pass");
        }
    });
}

pub(crate) fn codegen_local_var(declarators: &[VariableDeclarator], ctx: &mut CodeGenContext) {
    // every declared name is in scope before any initializer is rendered
    for declarator in declarators {
        ctx.local_vars.insert(declarator.name.clone());
    }
    for declarator in declarators {
        let line = match &declarator.init {
            Some(init) => format!("{} = {}", declarator.name, codegen_expr(init, ctx)),
            None if declarator.array_dims => format!("{} = []", declarator.name),
            None => format!("{} = None", declarator.name),
        };
        ctx.line(&line);
    }
}

fn codegen_if_stmt(
    condition: &Expr,
    consequence: &Stmt,
    alternative: Option<&Stmt>,
    ctx: &mut CodeGenContext,
) {
    let condition = codegen_expr(condition, ctx);
    ctx.line(&format!("if {condition}:"));
    codegen_body(consequence, ctx);
    // a chained `else if` becomes `elif`; only a direct if-statement
    // alternate continues the chain
    let mut tail = alternative;
    while let Some(stmt) = tail {
        match stmt {
            Stmt::If {
                condition,
                consequence,
                alternative,
            } => {
                let condition = codegen_expr(condition, ctx);
                ctx.line(&format!("elif {condition}:"));
                codegen_body(consequence, ctx);
                tail = alternative.as_deref();
            }
            other => {
                ctx.line("else:");
                codegen_body(other, ctx);
                tail = None;
            }
        }
    }
}

fn codegen_switch_stmt(scrutinee: &Expr, groups: &[SwitchGroup], ctx: &mut CodeGenContext) {
    let scrutinee = codegen_expr(scrutinee, ctx);
    ctx.line(&format!("match {scrutinee}:"));
    ctx.with_indent(|ctx| {
        let mut has_default = false;
        for group in groups {
            // fallthrough groups emit every label before the shared body
            for label in &group.labels {
                match label {
                    SwitchLabel::Case(value) => {
                        let value = codegen_expr(value, ctx);
                        ctx.line(&format!("case {value}:"));
                    }
                    SwitchLabel::Default => {
                        ctx.line("case _:");
                        has_default = true;
                    }
                }
            }
            ctx.with_indent(|ctx| {
                let before = ctx.emitted();
                for stmt in &group.body {
                    // `match` does not fall through, so Java's `break` is
                    // dropped rather than translated
                    if matches!(stmt, Stmt::Break) {
                        continue;
                    }
                    codegen_stmt(stmt, ctx);
                }
                if ctx.emitted() == before {
                    ctx.line("pass");
                }
            });
        }
        if !has_default {
            ctx.line("case _:");
            ctx.with_indent(|ctx| ctx.line("pass"));
        }
    });
}

/// A classic three-clause `for` has no Python equivalent: the initializer
/// runs before a `while` on the condition, and the update trails the body.
fn codegen_for_stmt(
    init: Option<&ForInit>,
    condition: Option<&Expr>,
    updates: &[Expr],
    body: &Stmt,
    ctx: &mut CodeGenContext,
) {
    match init {
        Some(ForInit::Decl { declarators, .. }) => codegen_local_var(declarators, ctx),
        Some(ForInit::Exprs(exprs)) => {
            for expr in exprs {
                let expr = codegen_expr(expr, ctx);
                ctx.line(&expr);
            }
        }
        None => {}
    }
    let condition = match condition {
        Some(condition) => codegen_expr(condition, ctx),
        // an omitted condition loops forever, as in Java
        None => "True".to_string(),
    };
    ctx.line(&format!("while {condition}:"));
    ctx.with_indent(|ctx| {
        let before = ctx.emitted();
        codegen_stmt(body, ctx);
        for update in updates {
            let update = codegen_expr(update, ctx);
            ctx.line(&update);
        }
        if ctx.emitted() == before {
            ctx.line("pass");
        }
    });
}

/// Do-while lowers to `while True` with a negated exit check after the
/// body, reproducing the unconditional first execution.
fn codegen_do_while_stmt(body: &Stmt, condition: &Expr, ctx: &mut CodeGenContext) {
    ctx.line("while True:");
    ctx.with_indent(|ctx| {
        codegen_stmt(body, ctx);
        let condition = codegen_expr(condition, ctx);
        ctx.line(&format!("if not ({condition}):"));
        ctx.with_indent(|ctx| ctx.line("break"));
    });
}

fn codegen_try_stmt(
    body: &Block,
    catches: &[CatchClause],
    finally: Option<&Block>,
    ctx: &mut CodeGenContext,
) {
    ctx.line("try:");
    codegen_suite(&body.statements, ctx);
    for catch in catches {
        // unmapped exception types keep their source name
        ctx.line(&format!("except {} as {}:", catch.java_type, catch.name));
        codegen_suite(&catch.body.statements, ctx);
    }
    if let Some(finally) = finally {
        ctx.line("finally:");
        codegen_suite(&finally.statements, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Literal;

    fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    #[test]
    fn do_while_executes_the_body_first() {
        let mut ctx = CodeGenContext::new();
        let stmt = Stmt::DoWhile {
            body: Box::new(Stmt::Expr(ident("work()"))),
            condition: Expr::Binary {
                left: Box::new(ident("i")),
                op: "<".to_string(),
                right: Box::new(Expr::Literal(Literal::Other("3".to_string()))),
            },
        };
        codegen_stmt(&stmt, &mut ctx);
        assert_eq!(
            ctx.finish(),
            "while True:\n    work()\n    if not (i < 3):\n        break\n"
        );
    }

    #[test]
    fn switch_without_default_gets_a_synthetic_arm() {
        let mut ctx = CodeGenContext::new();
        let stmt = Stmt::Switch {
            scrutinee: ident("x"),
            groups: vec![SwitchGroup {
                labels: vec![SwitchLabel::Case(Expr::Literal(Literal::Other(
                    "1".to_string(),
                )))],
                body: vec![Stmt::Expr(ident("f()")), Stmt::Break],
            }],
        };
        codegen_stmt(&stmt, &mut ctx);
        let out = ctx.finish();
        assert_eq!(out, "match x:\n    case 1:\n        f()\n    case _:\n        pass\n");
    }

    #[test]
    fn empty_while_body_emits_pass() {
        let mut ctx = CodeGenContext::new();
        let stmt = Stmt::While {
            condition: ident("busy"),
            body: Box::new(Stmt::Block(Block::default())),
        };
        codegen_stmt(&stmt, &mut ctx);
        assert_eq!(ctx.finish(), "while busy:\n    pass\n");
    }

    #[test]
    fn statements_never_leak_an_indent_change() {
        let mut ctx = CodeGenContext::new();
        let nested = Stmt::If {
            condition: ident("a"),
            consequence: Box::new(Stmt::While {
                condition: ident("b"),
                body: Box::new(Stmt::Expr(ident("c"))),
            }),
            alternative: Some(Box::new(Stmt::Expr(ident("d")))),
        };
        codegen_stmt(&nested, &mut ctx);
        assert_eq!(ctx.indent_level(), 0);
    }
}
