use std::{
    fmt::Display,
    io::{self, Write},
};

use anyhow::Result;
use serde::Serialize;

use super::traits::Formattable;
use crate::cli::OutputFormat;

pub(crate) fn porcelain_field(key: &str, value: impl Display) -> String {
    format!("{key}: {value}")
}

/// Writes `value` in the requested format to stdout.
pub(crate) fn output<T: Serialize + Formattable>(value: &T, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    output_to(value, format, &mut handle)
}

pub(crate) fn output_to<T, W>(value: &T, format: OutputFormat, writer: &mut W) -> Result<()>
where
    T: Serialize + Formattable,
    W: Write,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, value)?;
            writeln!(writer)?;
        }
        OutputFormat::Porcelain => {
            let text = value.format_porcelain();
            if !text.is_empty() {
                writeln!(writer, "{text}")?;
            }
        }
    }
    Ok(())
}
