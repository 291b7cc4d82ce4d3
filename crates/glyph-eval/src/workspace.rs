//! In-memory workspace evaluator.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use glyph_array::Value;
use tracing::debug;

use crate::error::EvalError;
use crate::evaluator::{Evaluator, FunctionCatalog};
use crate::header::{Header, is_identifier};
use crate::token::{Diagnostic, ResultToken};

const WORKSPACE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::workspace");

/// A defined function and the rows it was defined from.
#[derive(Debug, Clone)]
struct UserFunction {
    header: Header,
    source: Vec<String>,
}

/// Function table shared by every connection to the daemon.
///
/// Definitions replace any earlier function of the same name.
#[derive(Debug, Default)]
pub struct Workspace {
    functions: Mutex<BTreeMap<String, UserFunction>>,
}

impl Workspace {
    /// Creates an empty workspace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, UserFunction>>, EvalError> {
        self.functions.lock().map_err(|_| EvalError::LockPoisoned)
    }
}

impl Evaluator for Workspace {
    fn define_from_rows(&self, value: Value) -> Result<ResultToken, EvalError> {
        let function = match compile(&value) {
            Ok(function) => function,
            Err(diagnostic) => {
                debug!(
                    target: WORKSPACE_TARGET,
                    %diagnostic,
                    rows = value.element_count(),
                    "definition rejected"
                );
                return Ok(diagnostic.into());
            }
        };

        let name = function.header.name.clone();
        let replaced = self.lock()?.insert(name.clone(), function).is_some();
        debug!(target: WORKSPACE_TARGET, %name, replaced, "function defined");
        Ok(ResultToken::defined(name))
    }
}

impl FunctionCatalog for Workspace {
    fn function_names(&self) -> Result<Vec<String>, EvalError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn function_source(&self, name: &str) -> Result<Option<Value>, EvalError> {
        Ok(self.lock()?.get(name).map(|function| {
            Value::nested_vector(
                function
                    .source
                    .iter()
                    .map(|row| Value::char_vector(row))
                    .collect(),
            )
        }))
    }
}

fn compile(value: &Value) -> Result<UserFunction, Diagnostic> {
    let mut source = source_rows(value)?;
    strip_closing_del(&mut source);
    let Some(first) = source.first_mut() else {
        return Err(Diagnostic::DefnError);
    };
    if let Some(rest) = first.trim_start().strip_prefix('∇') {
        *first = rest.to_owned();
    }

    let header = Header::parse(first)?;
    ensure_distinct_labels(&header, source.get(1..).unwrap_or_default())?;
    Ok(UserFunction { header, source })
}

fn source_rows(value: &Value) -> Result<Vec<String>, Diagnostic> {
    let rows = match value.rank() {
        1 => value.rows(),
        // Matrix rows are padded to a common width.
        2 => value
            .rows()
            .map(|rows| rows.into_iter().map(|row| row.trim_end().to_owned()).collect()),
        _ => return Err(Diagnostic::RankError),
    };
    rows.ok_or(Diagnostic::DomainError)
}

fn strip_closing_del(source: &mut Vec<String>) {
    if source.last().is_some_and(|row| row.trim() == "∇") {
        source.pop();
    }
}

fn ensure_distinct_labels(header: &Header, body: &[String]) -> Result<(), Diagnostic> {
    let mut seen: BTreeSet<&str> = header.names().collect();
    for label in body.iter().filter_map(|row| label_of(row)) {
        if !seen.insert(label) {
            return Err(Diagnostic::DefnError);
        }
    }
    Ok(())
}

fn label_of(row: &str) -> Option<&str> {
    let (prefix, _) = row.split_once(':')?;
    let prefix = prefix.trim();
    is_identifier(prefix).then_some(prefix)
}
