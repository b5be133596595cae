use crate::config::Command;
use anyhow::Context;
use core::fmt;
use kindid::{Descriptor, Ulid, text};
use std::io::Write;

pub fn run(kind: &Descriptor<'_>, command: &Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::New { count } => {
            tracing::debug!(%kind, count, "minting ids");
            for _ in 0..*count {
                writeln!(out, "{}", mint(kind)?)?;
            }
        }
        Command::Convert { ids } => {
            for id in ids {
                let conversion =
                    convert(kind, id).with_context(|| format!("failed to convert {id:?}"))?;
                writeln!(out, "{conversion}")?;
            }
        }
        Command::DomainSql => writeln!(out, "{};", kind.domain_sql())?,
        Command::GeneratorSql => writeln!(out, "{}", kind.generator_sql())?,
    }
    out.flush()?;
    Ok(())
}

/// A fresh ID of `kind` in short form.
pub fn mint(kind: &Descriptor<'_>) -> anyhow::Result<String> {
    let mut bytes = Ulid::now().to_bytes();
    text::stamp(kind, &mut bytes);
    short_form(kind, &bytes)
}

fn short_form(kind: &Descriptor<'_>, bytes: &[u8; 16]) -> anyhow::Result<String> {
    let mut buf = vec![0; text::encoded_len(kind)];
    text::encode_to(kind, bytes, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Every representation of one ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub short: String,
    pub long: String,
    pub timestamp_ms: u64,
    pub bytes: [u8; 16],
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}\t", self.short, self.long, self.timestamp_ms)?;
        for b in self.bytes {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

pub fn convert(kind: &Descriptor<'_>, input: &str) -> anyhow::Result<Conversion> {
    let bytes = text::decode(kind, input.trim().as_bytes())?;
    let ulid = Ulid::from_bytes(bytes);
    tracing::debug!(%kind, %ulid, "decoded");
    Ok(Conversion {
        short: short_form(kind, &bytes)?,
        long: ulid.to_string(),
        timestamp_ms: u64::try_from(ulid.timestamp())?,
        bytes,
    })
}
