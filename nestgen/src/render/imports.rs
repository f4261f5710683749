//! Import pruning over rendered artifact text.
//!
//! Every entity-level template opens with one grouped import header
//! (`import {A,B,C} from "..."`). Templates import every symbol they might
//! need; this pass drops the ones the rendered body never uses.

/// Base class provided by the shared abstraction; referenced in an
/// `extends` clause rather than as a decorator.
pub const BASE_CLASS: &str = "BaseEntity";

/// Remove unreferenced names from the leading grouped import.
///
/// The first `{`…`}` span is taken as the import group. A name is retained
/// only if the remainder of the text contains a decorator usage of the
/// exact form `@<name>(`, or the name is [`BASE_CLASS`] and appears
/// anywhere in the remainder. Original order is preserved and the pass is
/// idempotent. Text without a `{`/`}` pair has no import group and is
/// returned unchanged.
#[must_use]
pub fn prune_unused_imports(rendered: &str) -> String {
    let (Some(open), Some(close)) = (rendered.find('{'), rendered.find('}')) else {
        return rendered.to_owned();
    };
    if close < open {
        return rendered.to_owned();
    }

    let group = &rendered[open + 1..close];
    let rest = &rendered[close..];
    let retained: Vec<&str> = group
        .split(',')
        .filter(|name| {
            rest.contains(&format!("@{name}(")) || (*name == BASE_CLASS && rest.contains(name))
        })
        .collect();

    format!("{}{}{rest}", &rendered[..=open], retained.join(","))
}
