//! Record output in ANVL, CSV or JSON.

use std::borrow::Cow;
use std::io::Write;

use anyhow::{Context, Result};
use ark_anvl::marshal::record_to_json;
use ark_anvl::{ARK_KEY, AnvlRecord, Columns};

use crate::cli::OutputArgs;

/// How records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// ANVL, records separated by a blank line
    Anvl,
    /// One CSV row per record
    Csv {
        /// Projected columns
        columns: Columns,
        /// Whether the header row is still to be written
        header: bool,
    },
    /// One JSON object per record
    Json,
}

impl Format {
    pub fn from_args(args: &OutputArgs) -> Self {
        match (&args.csv, args.array) {
            (Some(columns), _) => Self::Csv {
                columns: columns.clone(),
                header: args.header,
            },
            (None, true) => Self::Json,
            (None, false) => Self::Anvl,
        }
    }
}

/// Writes a stream of records in one format.
pub struct Printer<W: Write> {
    out: W,
    format: Format,
    fallback_ark: Option<String>,
    written: usize,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, args: &OutputArgs) -> Self {
        Self {
            out,
            format: Format::from_args(args),
            fallback_ark: args.ark.clone(),
            written: 0,
        }
    }

    /// Writes the CSV header, if one was asked for and not yet written.
    pub fn begin(&mut self) -> Result<()> {
        if let Format::Csv { columns, header } = &mut self.format {
            if *header {
                writeln!(self.out, "{}", columns.header())?;
                *header = false;
            }
        }
        Ok(())
    }

    /// Writes one record. `--ark` fills in a missing `ark` element first.
    pub fn record(&mut self, record: &AnvlRecord) -> Result<()> {
        self.begin()?;

        let record = match &self.fallback_ark {
            Some(ark) if !record.contains(ARK_KEY) => {
                let mut filled = record.clone();
                filled.set_ark_fallback(ark);
                Cow::Owned(filled)
            }
            _ => Cow::Borrowed(record),
        };

        match &self.format {
            Format::Anvl => {
                if self.written > 0 {
                    writeln!(self.out)?;
                }
                write!(self.out, "{}", record.to_anvl())?;
            }
            Format::Csv { columns, .. } => writeln!(self.out, "{}", columns.row(&record))?,
            Format::Json => {
                let json = record_to_json(&record).context("failed to serialize record")?;
                writeln!(self.out, "{json}")?;
            }
        }
        self.written += 1;
        Ok(())
    }

    /// Returns the number of records written.
    pub const fn written(&self) -> usize {
        self.written
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
