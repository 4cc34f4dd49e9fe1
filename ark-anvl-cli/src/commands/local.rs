//! Offline commands: identifier expansion and record conversion.

use std::io::Write;

use anyhow::{Context, Result};
use ark_anvl::marshal::{record_from_args, record_from_json};
use ark_anvl::{BaseConfig, anvl};

use super::Batch;
use crate::output::Printer;

/// `fq`: prints the fully-qualified form of each identifier.
pub fn fq<W: Write>(base: &BaseConfig, ids: &[String], mut out: W) -> Result<()> {
    let mut batch = Batch::default();
    for id in ids {
        if let Some(ark) = batch.check(id, base.resolve(id)) {
            writeln!(out, "{ark}")?;
        }
    }
    batch.finish(ids.len())
}

/// `anvl`: decodes ANVL text and writes it back out.
pub fn anvl<W: Write>(input: &str, printer: &mut Printer<W>) -> Result<()> {
    let record = anvl::decode(input, None).context("failed to parse ANVL input")?;
    printer.record(&record)
}

/// `args_to_anvl`: writes `name:value` arguments as a record.
pub fn args_to_anvl<W: Write>(elements: &[String], printer: &mut Printer<W>) -> Result<()> {
    let record = record_from_args(elements).context("invalid element argument")?;
    printer.record(&record)
}

/// `array_to_anvl`: writes a JSON object as a record.
pub fn array_to_anvl<W: Write>(input: &str, printer: &mut Printer<W>) -> Result<()> {
    let record = record_from_json(input).context("invalid JSON input")?;
    printer.record(&record)
}
