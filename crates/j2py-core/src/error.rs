use thiserror::Error;

/// Failures surfaced by the translation pipeline.
///
/// Translation is deterministic and side-effect-free, so there are no
/// retries and no partial recovery: any of these aborts the whole call.
/// Reporting is left entirely to the caller; the core never logs
/// user-facing messages and never touches the filesystem.
#[derive(Debug, Error)]
pub enum TranslationError {
    /// The Java grammar could not be loaded into the parser.
    #[error("failed to load the Java grammar")]
    Language(#[from] tree_sitter::LanguageError),

    /// The parser produced no tree for the input.
    #[error("Java source could not be parsed")]
    Parse,

    /// Malformed tree shape: a child the grammar marks as required is
    /// missing. No partial output is produced.
    #[error("malformed syntax tree: `{kind}` node is missing its `{field}` child")]
    MissingChild { kind: String, field: &'static str },
}
