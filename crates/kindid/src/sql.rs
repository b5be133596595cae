//! PostgreSQL definitions mirroring the in-memory suffix invariant.
//!
//! Only text is produced here; running it is left to whatever migration tool
//! the application uses. Inputs are compile-time identifiers and numbers, so
//! nothing is quoted or escaped.

use crate::{Descriptor, Kind};

/// `CREATE DOMAIN <ident>_id` over `bytea`, accepting exactly the 16-byte
/// values whose bytes 14 and 15 carry `K::NUMBER`.
///
/// ```
/// use kindid::{Kind, sql::domain_sql};
///
/// enum Test {}
///
/// impl Kind for Test {
///     const NUMBER: u16 = 0xFFFF;
///     const IDENT: &'static str = "test";
///     const SHORT_IDENT: &'static str = "tst";
/// }
///
/// assert!(domain_sql::<Test>().contains("get_byte(VALUE, 15) = 255"));
/// ```
#[must_use]
pub fn domain_sql<K: Kind>() -> String {
    Descriptor::of::<K>().domain_sql()
}

/// A PL/pgSQL function `<ident>_id_generate()` minting values of the domain
/// created by [`domain_sql`] inside the database.
#[must_use]
pub fn generator_sql<K: Kind>() -> String {
    Descriptor::of::<K>().generator_sql()
}

impl Descriptor<'_> {
    /// Name of the SQL domain for this kind.
    #[must_use]
    pub fn domain_name(&self) -> String {
        format!("{}_id", self.ident)
    }

    /// See [`domain_sql`].
    #[must_use]
    pub fn domain_sql(&self) -> String {
        let [hi, lo] = self.suffix();
        format!(
            "CREATE DOMAIN {domain} AS bytea
CHECK (
    octet_length(VALUE) = 16 AND
    get_byte(VALUE, 14) = {hi} AND
    get_byte(VALUE, 15) = {lo}
)",
            domain = self.domain_name(),
        )
    }

    /// See [`generator_sql`].
    ///
    /// Layout of the generated value: 6 bytes of Unix milliseconds, 8 random
    /// bytes taken from the non-version bits of a v4 UUID, then the suffix.
    #[must_use]
    pub fn generator_sql(&self) -> String {
        let number = self.number;
        format!(
            "CREATE OR REPLACE FUNCTION {domain}_generate() RETURNS {domain} AS $$
DECLARE
    unix_ms bytea;
    uuid bytea;
BEGIN
    unix_ms = substring(int8send((extract(epoch FROM clock_timestamp()) * 1000)::bigint) FROM 3);
    uuid = uuid_send(gen_random_uuid());
    RETURN (
        unix_ms
        || substring(uuid FROM 1 FOR 6)
        || substring(uuid FROM 10 FOR 2)
        || set_byte(set_byte('\\x0000'::bytea, 0, ({number} >> 8) & 255), 1, {number} & 255)
    )::{domain};
END
$$ LANGUAGE plpgsql VOLATILE;",
            domain = self.domain_name(),
        )
    }
}
