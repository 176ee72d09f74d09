//! record.rs — Forme binaire « wide » et enregistrements préfixés
//!
//! - `wide_bytes` : octets UTF-8 de la chaîne, un `0x00` intercalé entre chaque ;
//! - `decode_wide` : inverse (octets pairs), rejette un octet impair non nul ;
//! - enregistrements : `u32` LE (taille du bloc wide) puis le bloc, concaténés
//!   dans un même tampon. Un nom n’y figure qu’une fois.
//!
//! Tout travaille sur des tampons mémoire ; l’appelant choisit où les lire/écrire.

use std::io::Write;
use std::ops::Range;

use log::debug;

use crate::{Error, Result};

/// Taille de l’entête de longueur d’un enregistrement.
pub const LEN_PREFIX: usize = 4;

/// Octets UTF-8 de `s` séparés par des `0x00` (`2n-1` octets, vide si `s` l’est).
#[must_use]
pub fn wide_bytes(s: &str) -> Vec<u8> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity((2 * bytes.len()).saturating_sub(1));
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(0);
        }
        out.push(*b);
    }
    out
}

/// Relit une forme wide : octets d’indice pair, chaque impair doit valoir 0.
///
/// # Errors
/// `Error::NonZeroPad` sur un octet de bourrage non nul,
/// `Error::Utf8` si les octets utiles ne forment pas de l’UTF-8.
pub fn decode_wide(wide: &[u8]) -> Result<String> {
    if let Some((i, _)) = wide.iter().enumerate().skip(1).step_by(2).find(|(_, b)| **b != 0) {
        return Err(Error::NonZeroPad(i));
    }
    let payload: Vec<u8> = wide.iter().step_by(2).copied().collect();
    Ok(String::from_utf8(payload)?)
}

/* ───────────────────────────── Enregistrements ───────────────────────────── */

/// Un enregistrement relu depuis un tampon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Nom décodé.
    pub name: String,
    /// Étendue de l’enregistrement complet (entête comprise) dans le tampon.
    pub span: Range<usize>,
}

/// Écrit un enregistrement : longueur `u32` LE puis le bloc wide.
///
/// # Errors
/// `Error::TooLong` si le bloc dépasse `u32::MAX`, `Error::Io` en écriture.
pub fn write_record<W: Write + ?Sized>(out: &mut W, name: &str) -> Result<()> {
    let wide = wide_bytes(name);
    let len = u32::try_from(wide.len()).map_err(|_| Error::TooLong(wide.len()))?;
    out.write_all(&len.to_le_bytes())?;
    out.write_all(&wide)?;
    Ok(())
}

/// Découpe un tampon en enregistrements.
///
/// # Errors
/// `Error::Truncated` si une entête ou un bloc dépasse la fin du tampon,
/// plus les erreurs de [`decode_wide`].
pub fn read_records(buf: &[u8]) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut i = 0usize;
    while i < buf.len() {
        let header = buf.get(i..i + LEN_PREFIX).ok_or(Error::Truncated { offset: i })?;
        let mut len_le = [0u8; LEN_PREFIX];
        len_le.copy_from_slice(header);
        let len = usize::try_from(u32::from_le_bytes(len_le)).map_err(|_| Error::Truncated { offset: i })?;

        let start = i + LEN_PREFIX;
        let end = start.checked_add(len).ok_or(Error::Truncated { offset: i })?;
        let body = buf.get(start..end).ok_or(Error::Truncated { offset: i })?;
        records.push(Record { name: decode_wide(body)?, span: i..end });
        i = end;
    }
    debug!(target: "widestr::record", "{} enregistrement(s) sur {} octets", records.len(), buf.len());
    Ok(records)
}

/// Ajoute `name` s’il n’est pas déjà présent. Renvoie `true` si ajouté.
///
/// # Errors
/// Tampon existant illisible (voir [`read_records`]) ou nom trop long.
pub fn append_unique(buf: &mut Vec<u8>, name: &str) -> Result<bool> {
    if read_records(buf)?.iter().any(|r| r.name == name) {
        return Ok(false);
    }
    write_record(buf, name)?;
    Ok(true)
}

/// Retire l’enregistrement `name`. Renvoie `true` s’il existait.
///
/// # Errors
/// Tampon illisible (voir [`read_records`]).
pub fn remove_record(buf: &mut Vec<u8>, name: &str) -> Result<bool> {
    let Some(found) = read_records(buf)?.into_iter().find(|r| r.name == name) else {
        return Ok(false);
    };
    buf.drain(found.span);
    Ok(true)
}

// ---------- Tests ----------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn wide_bytes_interleave_zeroes() {
        assert_eq!(wide_bytes("AB"), vec![b'A', 0, b'B']);
        assert_eq!(wide_bytes("X"), vec![b'X']);
        assert!(wide_bytes("").is_empty());
    }

    #[test]
    fn wide_bytes_match_encoded_units_for_ascii() {
        let enc = encode("com.app0");
        assert_eq!(wide_bytes("com.app0").len(), enc.len());
        assert_eq!(decode_wide(&wide_bytes("com.app0")).expect("decode"), enc.real_chars().collect::<String>());
    }

    #[test]
    fn decode_rejects_non_zero_pad() {
        let err = decode_wide(&[b'a', 1, b'b']).unwrap_err();
        assert!(matches!(err, Error::NonZeroPad(1)));
    }

    #[test]
    fn decode_rejects_bad_utf8() {
        assert!(matches!(decode_wide(&[0xff]).unwrap_err(), Error::Utf8(_)));
    }

    #[test]
    fn record_layout_is_len_then_wide() {
        let mut buf = Vec::new();
        write_record(&mut buf, "ab").expect("write");
        assert_eq!(buf, vec![3, 0, 0, 0, b'a', 0, b'b']);
    }

    #[test]
    fn append_skips_duplicates_and_remove_drops_span() {
        let mut buf = Vec::new();
        assert!(append_unique(&mut buf, "com.one").expect("append"));
        assert!(append_unique(&mut buf, "com.two").expect("append"));
        assert!(!append_unique(&mut buf, "com.one").expect("append"));

        let names: Vec<String> = read_records(&buf).expect("read").into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["com.one", "com.two"]);

        assert!(remove_record(&mut buf, "com.one").expect("remove"));
        assert!(!remove_record(&mut buf, "com.one").expect("remove"));
        let left = read_records(&buf).expect("read");
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "com.two");
        assert_eq!(left[0].span, 0..LEN_PREFIX + 13);
    }

    #[test]
    fn truncated_buffers_are_errors() {
        assert!(matches!(read_records(&[1, 0]).unwrap_err(), Error::Truncated { offset: 0 }));
        let mut buf = Vec::new();
        write_record(&mut buf, "abc").expect("write");
        buf.pop();
        assert!(matches!(read_records(&buf).unwrap_err(), Error::Truncated { offset: 0 }));
    }

    proptest! {
        #[test]
        fn wide_round_trip(s in any::<String>()) {
            prop_assert_eq!(decode_wide(&wide_bytes(&s)).expect("decode"), s);
        }

        #[test]
        fn records_round_trip(names in proptest::collection::vec(any::<String>(), 0..8)) {
            let mut buf = Vec::new();
            for n in &names {
                write_record(&mut buf, n).expect("write");
            }
            let back: Vec<String> = read_records(&buf).expect("read").into_iter().map(|r| r.name).collect();
            prop_assert_eq!(back, names);
        }
    }
}
