//! Result files written at the edge of a run
//!
//! Runs pass [`EvaluationRun`] values around in memory; these writers exist
//! only for external inspection.

use crate::error::{EvalError, Result};
use crate::evaluation::EvaluationRun;
use std::fs;
use std::path::Path;

/// One average precision per line, in query order
pub fn write_average_precisions(path: &Path, run: &EvaluationRun) -> Result<()> {
    let mut content = String::with_capacity(run.len() * 20);
    for record in &run.records {
        content.push_str(&record.average_precision.to_string());
        content.push('\n');
    }
    write(path, &content)
}

pub fn write_p_value(path: &Path, p_value: f64) -> Result<()> {
    write(path, &p_value.to_string())
}

fn write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| EvalError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| EvalError::Io {
        path: path.to_path_buf(),
        source,
    })
}
