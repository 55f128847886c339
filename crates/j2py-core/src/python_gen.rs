//! Python source generation from the typed Java tree.
//!
//! Declaration translation lives in this module; statements and
//! expressions are split into submodules:
//! - [`context`] - per-call translation state (indent, field table, locals)
//! - [`stmt_gen`] - control flow and statement rules
//! - [`expr_gen`] - operator, call and literal rules
//!
//! Translation is one top-down pass with no backtracking: each rule
//! renders its node and recurses into children, appending to the context's
//! output buffer.

use crate::ast::*;
use crate::type_mapping::{default_value, map_java_type};

mod context;
mod expr_gen;
mod stmt_gen;

pub use context::CodeGenContext;

use expr_gen::codegen_expr;
use stmt_gen::codegen_suite;

/// Translate one compilation unit into Python source text.
///
/// Every call builds a fresh [`CodeGenContext`] and discards it with the
/// result, so repeated and concurrent calls never observe each other.
pub fn translate(unit: &CompilationUnit) -> String {
    let mut ctx = CodeGenContext::new();
    codegen_compilation_unit(unit, &mut ctx);
    ctx.finish()
}

fn codegen_compilation_unit(unit: &CompilationUnit, ctx: &mut CodeGenContext) {
    if let Some(package) = &unit.package {
        ctx.line(&format!("# package {package}"));
        ctx.blank_line();
    }
    for import in &unit.imports {
        ctx.line(&format!("# import {import}"));
    }
    if !unit.imports.is_empty() {
        ctx.blank_line();
    }
    for (index, decl) in unit.types.iter().enumerate() {
        if index > 0 {
            ctx.blank_line();
        }
        match decl {
            TypeDecl::Class(class) => codegen_class(class, ctx),
            TypeDecl::Interface(interface) => codegen_interface(interface, ctx),
        }
    }
}

/// A field of the class currently being translated, with its mapped type
/// and declared initializer.
struct FieldSlot<'a> {
    name: &'a str,
    py_type: String,
    array_dims: bool,
    init: Option<&'a Expr>,
}

/// Register every field before any constructor or method is rendered:
/// later bodies classify bare identifiers against the completed table.
fn collect_field_slots<'a>(class: &'a ClassDecl, ctx: &mut CodeGenContext) -> Vec<FieldSlot<'a>> {
    let mut slots = Vec::new();
    for field in &class.fields {
        let py_type = map_java_type(&field.java_type);
        for declarator in &field.declarators {
            ctx.field_table
                .insert(declarator.name.clone(), py_type.clone());
            slots.push(FieldSlot {
                name: &declarator.name,
                py_type: py_type.clone(),
                array_dims: declarator.array_dims,
                init: declarator.init.as_ref(),
            });
        }
    }
    slots
}

fn codegen_class(class: &ClassDecl, ctx: &mut CodeGenContext) {
    ctx.field_table.clear();
    let slots = collect_field_slots(class, ctx);

    // single inheritance and interface implementation share the base list
    if class.supertypes.is_empty() {
        ctx.line(&format!("class {}:", class.name));
    } else {
        ctx.line(&format!("class {}({}):", class.name, class.supertypes.join(", ")));
    }
    ctx.with_indent(|ctx| {
        if class.constructors.is_empty() {
            ctx.local_vars.clear();
            ctx.line("def __init__(self):");
            ctx.with_indent(|ctx| {
                if slots.is_empty() {
                    ctx.line("pass");
                } else {
                    codegen_field_assignments(&slots, ctx);
                }
            });
        } else {
            codegen_merged_init(class, &slots, ctx);
        }
        for method in &class.methods {
            ctx.blank_line();
            codegen_method(method, ctx);
        }
    });
    if class.methods.iter().any(|m| m.name == "main") {
        ctx.blank_line();
        ctx.line("if __name__ == \"__main__\":");
        ctx.with_indent(|ctx| ctx.line(&format!("{}.main([])", class.name)));
    }
}

fn codegen_field_assignments(slots: &[FieldSlot<'_>], ctx: &mut CodeGenContext) {
    for slot in slots {
        let value = match slot.init {
            Some(init) => codegen_expr(init, ctx),
            None if slot.array_dims => "[]".to_string(),
            None => default_value(&slot.py_type).to_string(),
        };
        ctx.line(&format!("self.{} = {}  # Type: {}", slot.name, value, slot.py_type));
    }
}

/// Collapse every declared constructor into a single `__init__`.
///
/// Each field becomes an optional parameter defaulting to its type's
/// default value; field initialization runs first, then each constructor
/// becomes an ordered conditional branch over a runtime type/none check of
/// its own parameter names. The first matching branch wins - declaration
/// order is the only disambiguation, with no arity or specificity ranking.
fn codegen_merged_init(class: &ClassDecl, slots: &[FieldSlot<'_>], ctx: &mut CodeGenContext) {
    let merged: Vec<String> = slots
        .iter()
        .map(|slot| format!("{} = {}", slot.name, default_value(&slot.py_type)))
        .collect();
    if merged.is_empty() {
        ctx.line("def __init__(self):");
    } else {
        ctx.line(&format!("def __init__(self, {}):", merged.join(", ")));
    }
    ctx.with_indent(|ctx| {
        let before = ctx.emitted();
        ctx.local_vars.clear();
        if !slots.is_empty() {
            codegen_field_assignments(slots, ctx);
        }
        let mut branched = false;
        let mut parameterized_seen = false;
        for ctor in &class.constructors {
            // merged parameters and this constructor's own parameters
            // shadow the fields they mirror
            ctx.local_vars.clear();
            for slot in slots.iter() {
                ctx.local_vars.insert(slot.name.to_string());
            }
            for param in &ctor.params {
                ctx.local_vars.insert(param.name.clone());
            }
            if ctor.params.is_empty() {
                if slots.is_empty() {
                    for stmt in &ctor.body.statements {
                        stmt_gen::codegen_stmt(stmt, ctx);
                    }
                } else {
                    // all-defaults is taken as the caller's intent to use
                    // the no-arg form
                    let names: Vec<&str> = slots.iter().map(|slot| slot.name).collect();
                    let keyword = if branched { "elif" } else { "if" };
                    ctx.line(&format!(
                        "{} all(param is None for param in [{}]):",
                        keyword,
                        names.join(", ")
                    ));
                    branched = true;
                    let nones = vec!["None"; slots.len()].join(", ");
                    ctx.with_indent(|ctx| ctx.line(&format!("self.__init__({nones})")));
                }
            } else {
                let guards: Vec<String> = if slots.is_empty() {
                    ctor.params
                        .iter()
                        .map(|p| format!("isinstance({}, {})", p.name, map_java_type(&p.java_type)))
                        .collect()
                } else {
                    ctor.params
                        .iter()
                        .map(|p| format!("{} is not None", p.name))
                        .collect()
                };
                let keyword = if branched { "elif" } else { "if" };
                ctx.line(&format!("{} {}:", keyword, guards.join(" and ")));
                branched = true;
                let emit_body = !parameterized_seen;
                parameterized_seen = true;
                ctx.with_indent(|ctx| {
                    let inner = ctx.emitted();
                    if emit_body {
                        for stmt in &ctor.body.statements {
                            stmt_gen::codegen_stmt(stmt, ctx);
                        }
                    } else {
                        for param in &ctor.params {
                            ctx.line(&format!("self.{} = {}", param.name, param.name));
                        }
                    }
                    if ctx.emitted() == inner {
                        ctx.line("pass");
                    }
                });
            }
        }
        if ctx.emitted() == before {
            ctx.line("pass");
        }
        ctx.local_vars.clear();
    });
}

fn codegen_method(method: &MethodDecl, ctx: &mut CodeGenContext) {
    // fresh lexical scope: locals and parameters shadow class fields
    ctx.local_vars.clear();
    for param in &method.params {
        ctx.local_vars.insert(param.name.clone());
    }
    let params = codegen_params(&method.params);
    if method.name == "main" {
        // `main` keeps no receiver and later gets the entry-point guard
        ctx.line("@staticmethod");
        ctx.line(&format!("def main({params}):"));
    } else if params.is_empty() {
        ctx.line(&format!("def {}(self):", method.name));
    } else {
        ctx.line(&format!("def {}(self, {}):", method.name, params));
    }
    match &method.body {
        Some(body) => codegen_suite(&body.statements, ctx),
        None => ctx.with_indent(|ctx| ctx.line("pass")),
    }
}

/// Interfaces carry no executable semantics: every method becomes a stub
/// with a `pass` body. The stub's name follows the first keyword modifier
/// when one is present, otherwise the declared identifier.
fn codegen_interface(interface: &InterfaceDecl, ctx: &mut CodeGenContext) {
    ctx.line(&format!("class {}:", interface.name));
    ctx.with_indent(|ctx| {
        if interface.methods.is_empty() {
            ctx.line("pass");
        } else {
            for method in &interface.methods {
                let name = method
                    .modifiers
                    .iter()
                    .find(|m| !m.starts_with('@'))
                    .unwrap_or(&method.name);
                let params = codegen_params(&method.params);
                if params.is_empty() {
                    ctx.line(&format!("def {name}(self):"));
                } else {
                    ctx.line(&format!("def {name}(self, {params}):"));
                }
                ctx.with_indent(|ctx| ctx.line("pass"));
            }
        }
    });
}

fn codegen_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, map_java_type(&p.java_type)))
        .collect::<Vec<_>>()
        .join(", ")
}
