//! widestr-core — Cœur de l’encodeur « wide »
//!
//! Transforme une chaîne en séquence où chaque caractère d’origine est
//! séparé du suivant par un octet nul, puis rend cette séquence sous forme
//! de littéral C (`char name[] = {...};` + `size_t name_len = N;`).
//!
//! ## Modules
//! - `encode` : séquence étiquetée (`Unit::Real` / `Unit::Filler`).
//! - `emit`   : rendu des items, mise en page, déclarations C.
//! - `record` : forme binaire wide, décodage, enregistrements `u32` LE + bloc.
//!
//! ```
//! use widestr_core::{encode, emit::{render_array, Layout}};
//! let enc = encode("AB");
//! assert_eq!(enc.preview().to_string(), "A0B");
//! assert_eq!(render_array("tmp", &enc, &Layout::default()), "char tmp[] = {\n    'A', 0x0, 'B'};");
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms, unused_must_use)]

// ---------- Modules publics ----------
pub mod emit;
pub mod encode;
pub mod record;

// ---------- Reexports de confort ----------
pub use emit::{write_program, Layout, DEFAULT_NAME};
pub use encode::{encode, Encoded, Unit};
pub use record::{decode_wide, read_records, wide_bytes, write_record, Record};

// ---------- Version ----------
/// Version du crate (lisible, via Cargo).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------- Erreurs & Résultat ----------
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Premier argument positionnel absent. Le message est exactement `no args`.
    #[error("no args")]
    MissingArgument,

    /// Écriture de la sortie impossible.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Octet de bourrage non nul dans une forme wide (offset dans le bloc).
    #[error("wide: octet non nul à l’offset {0}")]
    NonZeroPad(usize),

    /// Octets utiles qui ne forment pas de l’UTF-8.
    #[error("utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Enregistrement coupé avant sa fin.
    #[error("enregistrement tronqué à l’offset {offset}")]
    Truncated { offset: usize },

    /// Bloc wide trop grand pour une entête `u32`.
    #[error("bloc de {0} octets trop long pour une entête u32")]
    TooLong(usize),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

// ---------- Tests ----------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_argument_message_is_exact() {
        assert_eq!(Error::MissingArgument.to_string(), "no args");
    }

    #[test]
    fn io_error_is_wrapped() {
        let e: Error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into();
        assert!(matches!(e, Error::Io(_)));
        assert_eq!(e.to_string(), "io: pipe");
    }
}
