use anyhow::bail;
use clap::{Parser, Subcommand};
use kindid::Descriptor;

/// Command-line configuration for the `kindid` binary.
///
/// The kind is given once, either as flags or through the environment (a
/// `.env` file in the working directory is loaded first), and every
/// subcommand operates on it.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kindid",
    version,
    about = "Mint, convert and inspect kind-tagged ULIDs"
)]
pub struct CliArgs {
    /// Numeric kind tag stored in the last two bytes. Decimal or `0x` hex.
    ///
    /// Environment variable: `KIND_NUMBER`
    #[arg(long, env = "KIND_NUMBER", value_parser = parse_number)]
    pub kind_number: u16,

    /// Full kind name, used for SQL object names (`<ident>_id`).
    ///
    /// Environment variable: `KIND_IDENT`
    #[arg(long, env = "KIND_IDENT")]
    pub kind_ident: String,

    /// Prefix of the short text form (`<short>_...`).
    ///
    /// Environment variable: `KIND_SHORT_IDENT`
    #[arg(long, env = "KIND_SHORT_IDENT")]
    pub kind_short_ident: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Mint new IDs and print their short form.
    New {
        /// How many IDs to mint.
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Decode IDs given in either text form and print every representation.
    Convert {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Print the `CREATE DOMAIN` statement for the kind.
    DomainSql,
    /// Print a PL/pgSQL function generating IDs of the kind.
    GeneratorSql,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub number: u16,
    pub ident: String,
    pub short_ident: String,
    pub command: Command,
}

impl Config {
    pub fn descriptor(&self) -> Descriptor<'_> {
        Descriptor::new(self.number, &self.ident, &self.short_ident)
    }
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        // Both names end up unquoted in SQL or in IDs.
        if !is_sql_ident(&args.kind_ident) {
            bail!(
                "KIND_IDENT ({:?}) must start with a lowercase letter and contain only [a-z0-9_]",
                args.kind_ident
            );
        }
        if args.kind_short_ident.is_empty()
            || !args
                .kind_short_ident
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        {
            bail!(
                "KIND_SHORT_IDENT ({:?}) must be non-empty and contain only [a-z0-9]",
                args.kind_short_ident
            );
        }
        if args.command == (Command::New { count: 0 }) {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            number: args.kind_number,
            ident: args.kind_ident,
            short_ident: args.kind_short_ident,
            command: args.command,
        })
    }
}

fn is_sql_ident(s: &str) -> bool {
    let mut bytes = s.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_lowercase())
        && bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

fn parse_number(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("{s:?} is not a 16-bit number: {e}"))
}
