//! The `fn` and `fnlist` commands.

use glyph_eval::{Diagnostic, FunctionCatalog};

use crate::session::ResponseSink;

use super::errors::DispatchError;
use super::response::ResponseWriter;

/// Writes the source lines of `name`, or `VALUE ERROR` when it is unknown.
///
/// # Errors
///
/// Returns evaluator failures before writing and write failures afterwards.
pub(crate) fn respond_function<C, W>(
    catalog: &C,
    name: &str,
    sink: W,
    end_tag: &str,
) -> Result<(), DispatchError>
where
    C: FunctionCatalog + ?Sized,
    W: ResponseSink,
{
    let body = catalog
        .function_source(name)?
        .and_then(|source| source.rows())
        .map_or_else(|| Diagnostic::ValueError.to_string(), |rows| rows.join("\n"));
    ResponseWriter::new(sink, end_tag).respond(&body)
}

/// Writes every defined function name, one per line.
///
/// # Errors
///
/// Returns evaluator failures before writing and write failures afterwards.
pub(crate) fn respond_function_list<C, W>(
    catalog: &C,
    sink: W,
    end_tag: &str,
) -> Result<(), DispatchError>
where
    C: FunctionCatalog + ?Sized,
    W: ResponseSink,
{
    let names = catalog.function_names()?;
    ResponseWriter::new(sink, end_tag).respond(&names.join("\n"))
}
