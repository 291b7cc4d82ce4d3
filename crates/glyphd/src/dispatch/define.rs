//! The `def` command: materialize a block and define a function from it.

use glyph_array::{Value, materialize};
use glyph_eval::Evaluator;
use tracing::debug;

use crate::session::{BlockSource, ResponseSink};

use super::errors::DispatchError;
use super::response::ResponseWriter;
use super::router::DISPATCH_TARGET;

/// Passes `value` to the evaluator and writes the rendered token.
///
/// The token is rendered the same way whether it names a new function or
/// reports a diagnostic, and the end marker is always written. Exactly two
/// writes reach `sink`.
///
/// # Errors
///
/// Evaluator failures are returned before anything is written. Write
/// failures are returned as [`DispatchError::Io`].
pub fn invoke_and_respond<E, W>(
    value: Value,
    evaluator: &E,
    sink: W,
    end_tag: &str,
) -> Result<(), DispatchError>
where
    E: Evaluator + ?Sized,
    W: ResponseSink,
{
    let token = evaluator.define_from_rows(value)?;
    let text = token.canonical();
    debug!(
        target: DISPATCH_TARGET,
        diagnostic = token.is_diagnostic(),
        result = %text,
        "definition evaluated"
    );
    ResponseWriter::new(sink, end_tag).respond(&text)
}

/// Handles one `def` request on `session`.
///
/// # Errors
///
/// Propagates block framing errors, structural check failures, evaluator
/// failures, and write failures unchanged.
pub fn run_define<S, E>(session: &mut S, evaluator: &E, end_tag: &str) -> Result<(), DispatchError>
where
    S: BlockSource + ResponseSink,
    E: Evaluator + ?Sized,
{
    let lines = session.load_block()?;
    debug!(target: DISPATCH_TARGET, lines = lines.len(), "definition block received");
    let value = materialize(&lines)?;
    invoke_and_respond(value, evaluator, session, end_tag)
}
