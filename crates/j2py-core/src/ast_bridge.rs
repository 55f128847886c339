//! Lowering from the tree-sitter concrete syntax tree to the typed AST.
//!
//! The grammar (and all tokenization and error recovery) belongs to
//! `tree-sitter-java`; this module only reads structure back out of it:
//! child-by-field accessors, presence checks for optional clauses and raw
//! token text. A child the grammar marks as required but which is absent is
//! a malformed tree and fails the whole call; a node kind without a
//! dedicated rule degrades to a verbatim passthrough of its source text.

use crate::ast::*;
use crate::error::TranslationError;
use tree_sitter::{Node, Tree};

type Result<T> = std::result::Result<T, TranslationError>;

/// Lower a parsed tree into a [`CompilationUnit`].
pub fn lower(tree: &Tree, source: &str) -> Result<CompilationUnit> {
    Lowering { source }.compilation_unit(tree.root_node())
}

fn is_comment(kind: &str) -> bool {
    matches!(kind, "line_comment" | "block_comment")
}

struct Lowering<'a> {
    source: &'a str,
}

impl Lowering<'_> {
    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source.as_bytes())
            .unwrap_or_default()
            .to_string()
    }

    fn required<'t>(&self, node: Node<'t>, field: &'static str) -> Result<Node<'t>> {
        node.child_by_field_name(field)
            .ok_or_else(|| TranslationError::MissingChild {
                kind: node.kind().to_string(),
                field,
            })
    }

    /// First named child that is not a comment.
    fn first_named<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let result = node
            .named_children(&mut cursor)
            .find(|child| !is_comment(child.kind()));
        result
    }

    fn compilation_unit(&self, root: Node) -> Result<CompilationUnit> {
        let mut unit = CompilationUnit::default();
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_declaration" => unit.package = Some(self.qualified_name(child)),
                "import_declaration" => unit.imports.push(self.qualified_name(child)),
                "class_declaration" => unit.types.push(TypeDecl::Class(self.class(child)?)),
                "interface_declaration" => {
                    unit.types.push(TypeDecl::Interface(self.interface(child)?))
                }
                // enums, records and annotation types are not modeled
                _ => {}
            }
        }
        Ok(unit)
    }

    fn qualified_name(&self, node: Node) -> String {
        let mut cursor = node.walk();
        let result = node
            .named_children(&mut cursor)
            .find(|child| matches!(child.kind(), "scoped_identifier" | "identifier"))
            .map(|child| self.text(child))
            .unwrap_or_default();
        result
    }

    fn class(&self, node: Node) -> Result<ClassDecl> {
        let name = self.text(self.required(node, "name")?);
        // extends and implements populate the same supertype list
        let mut supertypes = Vec::new();
        if let Some(superclass) = node.child_by_field_name("superclass") {
            if let Some(ty) = superclass.named_child(0) {
                supertypes.push(self.text(ty));
            }
        }
        if let Some(interfaces) = node.child_by_field_name("interfaces") {
            if let Some(list) = interfaces.named_child(0) {
                let mut cursor = list.walk();
                for ty in list.named_children(&mut cursor) {
                    supertypes.push(self.text(ty));
                }
            }
        }
        let body = self.required(node, "body")?;
        let mut class = ClassDecl {
            name,
            supertypes,
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
        };
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" => class.fields.push(FieldDecl {
                    java_type: self.text(self.required(member, "type")?),
                    declarators: self.declarators(member)?,
                }),
                "constructor_declaration" => class.constructors.push(ConstructorDecl {
                    params: self.params(self.required(member, "parameters")?)?,
                    body: self.block(self.required(member, "body")?)?,
                }),
                "method_declaration" => class.methods.push(self.method(member)?),
                // nested type declarations are not modeled
                _ => {}
            }
        }
        Ok(class)
    }

    fn interface(&self, node: Node) -> Result<InterfaceDecl> {
        let name = self.text(self.required(node, "name")?);
        let body = self.required(node, "body")?;
        let mut methods = Vec::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if member.kind() != "method_declaration" {
                continue;
            }
            methods.push(InterfaceMethod {
                modifiers: self.modifiers(member),
                name: self.text(self.required(member, "name")?),
                params: self.params(self.required(member, "parameters")?)?,
            });
        }
        Ok(InterfaceDecl { name, methods })
    }

    fn method(&self, node: Node) -> Result<MethodDecl> {
        let name = self.text(self.required(node, "name")?);
        let params = self.params(self.required(node, "parameters")?)?;
        let body = match node.child_by_field_name("body") {
            Some(body) => Some(self.block(body)?),
            None => None,
        };
        Ok(MethodDecl { name, params, body })
    }

    /// Modifier tokens preceding a member declaration, annotations included.
    fn modifiers(&self, node: Node) -> Vec<String> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "modifiers" {
                let mut inner = child.walk();
                for modifier in child.children(&mut inner) {
                    out.push(self.text(modifier));
                }
            }
        }
        out
    }

    fn params(&self, node: Node) -> Result<Vec<Param>> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "formal_parameter" => out.push(Param {
                    name: self.text(self.required(child, "name")?),
                    java_type: self.text(self.required(child, "type")?),
                }),
                "spread_parameter" => {
                    // varargs: `Type... name`
                    let java_type = child.named_child(0).map(|n| self.text(n)).unwrap_or_default();
                    let mut inner = child.walk();
                    let name = child
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "variable_declarator")
                        .and_then(|d| d.child_by_field_name("name"))
                        .map(|n| self.text(n))
                        .unwrap_or_default();
                    out.push(Param { name, java_type });
                }
                _ => {}
            }
        }
        Ok(out)
    }

    fn declarators(&self, node: Node) -> Result<Vec<VariableDeclarator>> {
        let mut cursor = node.walk();
        let nodes: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        nodes.into_iter().map(|d| self.declarator(d)).collect()
    }

    fn declarator(&self, node: Node) -> Result<VariableDeclarator> {
        let name = self.text(self.required(node, "name")?);
        let array_dims = node.child_by_field_name("dimensions").is_some();
        let init = node
            .child_by_field_name("value")
            .map(|value| self.expr(value));
        Ok(VariableDeclarator { name, array_dims, init })
    }

    fn block(&self, node: Node) -> Result<Block> {
        let mut statements = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if matches!(child.kind(), "{" | "}") || is_comment(child.kind()) {
                continue;
            }
            if !child.is_named() && child.kind() != ";" {
                continue;
            }
            statements.push(self.stmt(child)?);
        }
        Ok(Block { statements })
    }

    fn stmt(&self, node: Node) -> Result<Stmt> {
        match node.kind() {
            "block" => Ok(Stmt::Block(self.block(node)?)),
            "local_variable_declaration" => Ok(Stmt::LocalVar {
                java_type: self.text(self.required(node, "type")?),
                declarators: self.declarators(node)?,
            }),
            "expression_statement" => Ok(match self.first_named(node) {
                Some(expr) => Stmt::Expr(self.expr(expr)),
                None => Stmt::Verbatim(self.text(node)),
            }),
            "if_statement" => {
                let condition = self.condition(node)?;
                let consequence = Box::new(self.stmt(self.required(node, "consequence")?)?);
                let alternative = match node.child_by_field_name("alternative") {
                    Some(alt) => Some(Box::new(self.stmt(alt)?)),
                    None => None,
                };
                Ok(Stmt::If {
                    condition,
                    consequence,
                    alternative,
                })
            }
            "while_statement" => Ok(Stmt::While {
                condition: self.condition(node)?,
                body: Box::new(self.stmt(self.required(node, "body")?)?),
            }),
            "do_statement" => Ok(Stmt::DoWhile {
                body: Box::new(self.stmt(self.required(node, "body")?)?),
                condition: self.condition(node)?,
            }),
            "for_statement" => self.for_stmt(node),
            "enhanced_for_statement" => Ok(Stmt::ForEach {
                variable: self.text(self.required(node, "name")?),
                iterable: self.expr(self.required(node, "value")?),
                body: Box::new(self.stmt(self.required(node, "body")?)?),
            }),
            "switch_expression" | "switch_statement" => self.switch(node),
            "try_statement" => self.try_stmt(node),
            "return_statement" => Ok(Stmt::Return(self.first_named(node).map(|e| self.expr(e)))),
            "break_statement" => Ok(Stmt::Break),
            "continue_statement" => Ok(Stmt::Continue),
            "throw_statement" => Ok(match self.first_named(node) {
                Some(expr) => Stmt::Throw(self.expr(expr)),
                None => Stmt::Verbatim(self.text(node)),
            }),
            ";" => Ok(Stmt::Empty),
            _ => Ok(Stmt::Verbatim(self.text(node))),
        }
    }

    /// A statement's `condition` field, unwrapped from its parentheses.
    fn condition(&self, node: Node) -> Result<Expr> {
        let condition = self.required(node, "condition")?;
        Ok(self.unparenthesized(condition))
    }

    fn unparenthesized(&self, node: Node) -> Expr {
        if node.kind() == "parenthesized_expression" {
            match self.first_named(node) {
                Some(inner) => self.expr(inner),
                None => Expr::Verbatim(self.text(node)),
            }
        } else {
            self.expr(node)
        }
    }

    fn for_stmt(&self, node: Node) -> Result<Stmt> {
        let mut cursor = node.walk();
        let inits: Vec<Node> = node.children_by_field_name("init", &mut cursor).collect();
        let init = if inits.is_empty() {
            None
        } else if inits.len() == 1 && inits[0].kind() == "local_variable_declaration" {
            Some(ForInit::Decl {
                java_type: self.text(self.required(inits[0], "type")?),
                declarators: self.declarators(inits[0])?,
            })
        } else {
            Some(ForInit::Exprs(inits.iter().map(|n| self.expr(*n)).collect()))
        };
        let condition = node
            .child_by_field_name("condition")
            .map(|c| self.unparenthesized(c));
        let mut cursor = node.walk();
        let updates = node
            .children_by_field_name("update", &mut cursor)
            .map(|u| self.expr(u))
            .collect();
        let body = Box::new(self.stmt(self.required(node, "body")?)?);
        Ok(Stmt::For {
            init,
            condition,
            updates,
            body,
        })
    }

    fn switch(&self, node: Node) -> Result<Stmt> {
        let scrutinee = self.condition(node)?;
        let block = self.required(node, "body")?;
        let mut groups = Vec::new();
        let mut cursor = block.walk();
        for group in block.named_children(&mut cursor) {
            // the arrow form (`case X -> ...`) lowers the same way: one
            // label, one body
            if !matches!(group.kind(), "switch_block_statement_group" | "switch_rule") {
                continue;
            }
            let mut labels = Vec::new();
            let mut body = Vec::new();
            let mut inner = group.walk();
            for child in group.named_children(&mut inner) {
                if child.kind() == "switch_label" {
                    labels.push(self.switch_label(child));
                } else if !is_comment(child.kind()) {
                    body.push(self.stmt(child)?);
                }
            }
            groups.push(SwitchGroup { labels, body });
        }
        Ok(Stmt::Switch { scrutinee, groups })
    }

    fn switch_label(&self, node: Node) -> SwitchLabel {
        match self.first_named(node) {
            Some(value) => SwitchLabel::Case(self.expr(value)),
            None => SwitchLabel::Default,
        }
    }

    fn try_stmt(&self, node: Node) -> Result<Stmt> {
        let body = self.block(self.required(node, "body")?)?;
        let mut catches = Vec::new();
        let mut finally = None;
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "catch_clause" => catches.push(self.catch_clause(child)?),
                "finally_clause" => {
                    let mut inner = child.walk();
                    let block_node = child
                        .named_children(&mut inner)
                        .find(|n| n.kind() == "block");
                    if let Some(block) = block_node {
                        finally = Some(self.block(block)?);
                    }
                }
                _ => {}
            }
        }
        Ok(Stmt::Try {
            body,
            catches,
            finally,
        })
    }

    fn catch_clause(&self, node: Node) -> Result<CatchClause> {
        let body = self.block(self.required(node, "body")?)?;
        let mut java_type = String::new();
        let mut name = String::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "catch_formal_parameter" {
                let mut inner = child.walk();
                for part in child.named_children(&mut inner) {
                    match part.kind() {
                        "catch_type" => java_type = self.text(part),
                        "identifier" => name = self.text(part),
                        _ => {}
                    }
                }
            }
        }
        Ok(CatchClause {
            java_type,
            name,
            body,
        })
    }

    fn expr(&self, node: Node) -> Expr {
        match node.kind() {
            "assignment_expression" => match (
                node.child_by_field_name("left"),
                node.child_by_field_name("operator"),
                node.child_by_field_name("right"),
            ) {
                (Some(left), Some(op), Some(right)) => Expr::Assign {
                    target: Box::new(self.expr(left)),
                    op: self.text(op),
                    value: Box::new(self.expr(right)),
                },
                _ => Expr::Verbatim(self.text(node)),
            },
            "binary_expression" => match (
                node.child_by_field_name("left"),
                node.child_by_field_name("operator"),
                node.child_by_field_name("right"),
            ) {
                (Some(left), Some(op), Some(right)) => Expr::Binary {
                    left: Box::new(self.expr(left)),
                    op: self.text(op),
                    right: Box::new(self.expr(right)),
                },
                _ => Expr::Verbatim(self.text(node)),
            },
            "unary_expression" => match (
                node.child_by_field_name("operator"),
                node.child_by_field_name("operand"),
            ) {
                (Some(op), Some(operand)) => Expr::Unary {
                    op: self.text(op),
                    operand: Box::new(self.expr(operand)),
                },
                _ => Expr::Verbatim(self.text(node)),
            },
            "update_expression" => self.update_expr(node),
            "ternary_expression" => match (
                node.child_by_field_name("condition"),
                node.child_by_field_name("consequence"),
                node.child_by_field_name("alternative"),
            ) {
                (Some(condition), Some(consequence), Some(alternative)) => Expr::Ternary {
                    condition: Box::new(self.expr(condition)),
                    consequence: Box::new(self.expr(consequence)),
                    alternative: Box::new(self.expr(alternative)),
                },
                _ => Expr::Verbatim(self.text(node)),
            },
            "cast_expression" => match node.child_by_field_name("value") {
                Some(value) => Expr::Cast {
                    value: Box::new(self.expr(value)),
                },
                None => Expr::Verbatim(self.text(node)),
            },
            "object_creation_expression" => {
                let class = match node.child_by_field_name("type") {
                    Some(ty) => strip_type_args(&self.text(ty)),
                    None => return Expr::Verbatim(self.text(node)),
                };
                let args = node
                    .child_by_field_name("arguments")
                    .map(|a| self.expr_list(a))
                    .unwrap_or_default();
                Expr::New { class, args }
            }
            "array_creation_expression" => self.array_creation(node),
            "array_initializer" => self.array_initializer(node),
            "method_invocation" => {
                let name = match node.child_by_field_name("name") {
                    Some(name) => self.text(name),
                    None => return Expr::Verbatim(self.text(node)),
                };
                let receiver = node
                    .child_by_field_name("object")
                    .map(|o| Box::new(self.expr(o)));
                let args = node
                    .child_by_field_name("arguments")
                    .map(|a| self.expr_list(a))
                    .unwrap_or_default();
                Expr::MethodCall {
                    receiver,
                    name,
                    args,
                }
            }
            "field_access" => match (
                node.child_by_field_name("object"),
                node.child_by_field_name("field"),
            ) {
                (Some(object), Some(field)) => Expr::FieldAccess {
                    object: Box::new(self.expr(object)),
                    field: self.text(field),
                },
                _ => Expr::Verbatim(self.text(node)),
            },
            "array_access" => match (
                node.child_by_field_name("array"),
                node.child_by_field_name("index"),
            ) {
                (Some(array), Some(index)) => Expr::ArrayIndex {
                    array: Box::new(self.expr(array)),
                    index: Box::new(self.expr(index)),
                },
                _ => Expr::Verbatim(self.text(node)),
            },
            "parenthesized_expression" => match self.first_named(node) {
                Some(inner) => Expr::Paren(Box::new(self.expr(inner))),
                None => Expr::Verbatim(self.text(node)),
            },
            "this" => Expr::This,
            "super" => Expr::Super,
            "identifier" => Expr::Ident(self.text(node)),
            "null_literal" => Expr::Literal(Literal::Null),
            "true" | "false" => Expr::Literal(Literal::Bool(self.text(node))),
            "decimal_integer_literal"
            | "hex_integer_literal"
            | "octal_integer_literal"
            | "binary_integer_literal"
            | "decimal_floating_point_literal"
            | "hex_floating_point_literal"
            | "string_literal"
            | "character_literal" => Expr::Literal(Literal::Other(self.text(node))),
            _ => Expr::Verbatim(self.text(node)),
        }
    }

    fn update_expr(&self, node: Node) -> Expr {
        let Some(target) = self.first_named(node) else {
            return Expr::Verbatim(self.text(node));
        };
        let mut op = None;
        let mut prefix = false;
        let mut cursor = node.walk();
        for (index, child) in node.children(&mut cursor).enumerate() {
            match child.kind() {
                "++" => {
                    op = Some(UpdateOp::Increment);
                    prefix = index == 0;
                }
                "--" => {
                    op = Some(UpdateOp::Decrement);
                    prefix = index == 0;
                }
                _ => {}
            }
        }
        match op {
            Some(op) => Expr::Update {
                target: Box::new(self.expr(target)),
                op,
                prefix,
            },
            None => Expr::Verbatim(self.text(node)),
        }
    }

    fn array_creation(&self, node: Node) -> Expr {
        if let Some(value) = node.child_by_field_name("value") {
            return self.array_initializer(value);
        }
        let mut dims = Vec::new();
        let mut cursor = node.walk();
        for dim in node.children_by_field_name("dimensions", &mut cursor) {
            if dim.kind() == "dimensions_expr" {
                if let Some(expr) = self.first_named(dim) {
                    dims.push(self.expr(expr));
                }
            }
        }
        Expr::NewArray { init: None, dims }
    }

    fn array_initializer(&self, node: Node) -> Expr {
        let mut items = Vec::new();
        let mut cursor = node.walk();
        for item in node.named_children(&mut cursor) {
            if is_comment(item.kind()) {
                continue;
            }
            items.push(self.expr(item));
        }
        Expr::NewArray {
            init: Some(items),
            dims: Vec::new(),
        }
    }

    fn expr_list(&self, node: Node) -> Vec<Expr> {
        let mut out = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if is_comment(child.kind()) {
                continue;
            }
            out.push(self.expr(child));
        }
        out
    }
}

/// `new ArrayList<Integer>()` constructs `ArrayList`; the type arguments
/// have no Python counterpart.
fn strip_type_args(ty: &str) -> String {
    match ty.find('<') {
        Some(index) => ty[..index].trim_end().to_string(),
        None => ty.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Expr, Literal, Stmt, TypeDecl, UpdateOp};
    use crate::J2PyPipeline;

    fn parse(source: &str) -> crate::ast::CompilationUnit {
        J2PyPipeline::new()
            .parse(source)
            .expect("lowering should succeed")
    }

    fn first_class(unit: &crate::ast::CompilationUnit) -> &crate::ast::ClassDecl {
        match &unit.types[0] {
            TypeDecl::Class(class) => class,
            other => panic!("expected a class, got {:?}", other),
        }
    }

    #[test]
    fn package_and_imports_are_collected() {
        let unit = parse("package com.example.app;\nimport java.util.List;\nclass A {}\n");
        assert_eq!(unit.package.as_deref(), Some("com.example.app"));
        assert_eq!(unit.imports, vec!["java.util.List".to_string()]);
        assert_eq!(unit.types.len(), 1);
    }

    #[test]
    fn extends_and_implements_share_one_supertype_list() {
        let unit = parse("class A extends B implements C, D {}");
        let class = first_class(&unit);
        assert_eq!(class.supertypes, vec!["B", "C", "D"]);
    }

    #[test]
    fn field_declarators_register_names_and_initializers() {
        let unit = parse("class A { int a, b = 2; }");
        let class = first_class(&unit);
        assert_eq!(class.fields.len(), 1);
        let field = &class.fields[0];
        assert_eq!(field.java_type, "int");
        assert_eq!(field.declarators.len(), 2);
        assert_eq!(field.declarators[0].name, "a");
        assert!(field.declarators[0].init.is_none());
        assert_eq!(field.declarators[1].name, "b");
        assert!(field.declarators[1].init.is_some());
    }

    #[test]
    fn update_expression_records_prefix_and_postfix() {
        let unit = parse("class A { void f() { int i = 0; i++; --i; } }");
        let class = first_class(&unit);
        let body = class.methods[0].body.as_ref().unwrap();
        match &body.statements[1] {
            Stmt::Expr(Expr::Update { op, prefix, .. }) => {
                assert_eq!(*op, UpdateOp::Increment);
                assert!(!prefix);
            }
            other => panic!("expected a postfix update, got {:?}", other),
        }
        match &body.statements[2] {
            Stmt::Expr(Expr::Update { op, prefix, .. }) => {
                assert_eq!(*op, UpdateOp::Decrement);
                assert!(prefix);
            }
            other => panic!("expected a prefix update, got {:?}", other),
        }
    }

    #[test]
    fn unsupported_statement_lowers_to_verbatim() {
        let unit = parse("class A { void f() { synchronized (this) { } } }");
        let class = first_class(&unit);
        let body = class.methods[0].body.as_ref().unwrap();
        match &body.statements[0] {
            Stmt::Verbatim(text) => assert!(text.starts_with("synchronized")),
            other => panic!("expected a verbatim passthrough, got {:?}", other),
        }
    }

    #[test]
    fn null_and_boolean_literals() {
        let unit = parse("class A { void f() { Object o = null; boolean b = true; } }");
        let class = first_class(&unit);
        let body = class.methods[0].body.as_ref().unwrap();
        match &body.statements[0] {
            Stmt::LocalVar { declarators, .. } => {
                assert_eq!(declarators[0].init, Some(Expr::Literal(Literal::Null)));
            }
            other => panic!("expected a local declaration, got {:?}", other),
        }
        match &body.statements[1] {
            Stmt::LocalVar { declarators, .. } => {
                assert_eq!(
                    declarators[0].init,
                    Some(Expr::Literal(Literal::Bool("true".to_string())))
                );
            }
            other => panic!("expected a local declaration, got {:?}", other),
        }
    }

    #[test]
    fn ast_round_trips_through_serde() {
        let unit = parse("class A { int x; void f() { x = 1; } }");
        let json = serde_json::to_string(&unit).unwrap();
        let back: crate::ast::CompilationUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(unit, back);
    }
}
