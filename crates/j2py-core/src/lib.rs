//! # j2py-core
//!
//! Core translation engine for the j2py Java-to-Python transpiler.
//!
//! The pipeline is a single depth-first pass: source text is parsed by the
//! external Java grammar (`tree-sitter-java`), lowered into a typed syntax
//! tree ([`ast::CompilationUnit`]) and walked once by the Python emitter.
//! There is no backtracking and no second pass, and translation is bounded
//! by the size of the input tree.
//!
//! ## Modules
//!
//! - **[`ast`]** - the typed Java syntax tree the translator consumes
//! - **[`ast_bridge`]** - lowering from the parser's concrete tree
//! - **[`python_gen`]** - the tree-to-text translation visitor
//! - **[`type_mapping`]** - Java-to-Python declared-type mapping
//!
//! ## Quick start
//!
//! ```
//! use j2py_core::J2PyPipeline;
//!
//! let pipeline = J2PyPipeline::new();
//! let python = pipeline.transpile("class Greeter {}").unwrap();
//! assert!(python.contains("class Greeter:"));
//! ```

pub mod ast;
pub mod ast_bridge;
pub mod error;
pub mod python_gen;
pub mod type_mapping;

pub use error::TranslationError;
pub use python_gen::translate;

use tracing::debug;

/// One-call surface over parse -> lower -> translate.
///
/// The pipeline itself holds no state; every call builds its own parser
/// and its own translation context, so one instance may be reused or
/// shared across threads freely.
#[derive(Debug, Default)]
pub struct J2PyPipeline;

impl J2PyPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Parse Java source text and lower it to the typed syntax tree.
    pub fn parse(&self, source: &str) -> Result<ast::CompilationUnit, TranslationError> {
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&tree_sitter_java::LANGUAGE.into())?;
        let tree = parser.parse(source, None).ok_or(TranslationError::Parse)?;
        debug!(root = tree.root_node().kind(), "parsed Java source");
        ast_bridge::lower(&tree, source)
    }

    /// Translate Java source text into Python source text.
    pub fn transpile(&self, source: &str) -> Result<String, TranslationError> {
        let unit = self.parse(source)?;
        debug!(
            types = unit.types.len(),
            imports = unit.imports.len(),
            "lowered compilation unit"
        );
        Ok(python_gen::translate(&unit))
    }
}
