//! Post-render pipeline shared by every artifact kind.
//!
//! Rendered template text passes through, in order: line-ending
//! normalization, import pruning, and best-effort formatting.

pub mod eol;
pub mod formatter;
pub mod imports;

pub use eol::Eol;
pub use formatter::{ExternalFormatter, FormatError, Formatter, NoopFormatter};
pub use imports::prune_unused_imports;

/// Run rendered text through the shared post-processing steps.
#[must_use]
pub fn finish(rendered: &str, eol: Eol, formatter: &dyn Formatter, source_name: &str) -> String {
    let normalized = eol::normalize(rendered, eol);
    let pruned = prune_unused_imports(&normalized);
    format_best_effort(pruned, formatter, source_name)
}

/// Like [`finish`] but without import pruning, for artifacts that carry no
/// grouped import header (the index re-export list).
#[must_use]
pub fn finish_unpruned(
    rendered: &str,
    eol: Eol,
    formatter: &dyn Formatter,
    source_name: &str,
) -> String {
    let normalized = eol::normalize(rendered, eol);
    format_best_effort(normalized.into_owned(), formatter, source_name)
}

/// Formatting is best-effort: on failure a diagnostic naming the offending
/// source (`sql_name` for entity artifacts, the module name otherwise) is
/// emitted and the unformatted text is used as-is. This is the pipeline's
/// only recovered failure class.
fn format_best_effort(text: String, formatter: &dyn Formatter, source_name: &str) -> String {
    match formatter.format(&text) {
        Ok(formatted) => formatted,
        Err(err) => {
            tracing::warn!(
                source = source_name,
                error = %err,
                "formatter failed, keeping unformatted output"
            );
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysFails;

    impl Formatter for AlwaysFails {
        fn format(&self, _source: &str) -> Result<String, FormatError> {
            Err(FormatError::InvalidOutput {
                command: "broken".to_owned(),
            })
        }
    }

    #[test]
    fn formatter_failure_keeps_pruned_text() {
        let rendered = "import {A,B} from \"x\";\n@A() class Foo {}";
        let finished = finish(rendered, Eol::platform(), &AlwaysFails, "foo_table");
        assert_eq!(finished, "import {A} from \"x\";\n@A() class Foo {}");
    }

    #[test]
    fn formatter_success_wins() {
        struct Upper;
        impl Formatter for Upper {
            fn format(&self, source: &str) -> Result<String, FormatError> {
                Ok(source.to_uppercase())
            }
        }
        let finished = finish("class foo {x} @X(", Eol::platform(), &Upper, "foo");
        assert!(finished.starts_with("CLASS FOO"));
    }
}
