//! encode.rs — Encodeur « wide » (caractère, nul, caractère, …)
//!
//! Chaque position de la séquence porte son étiquette : un caractère
//! d’origine (`Unit::Real`) ou un octet nul intercalé (`Unit::Filler`).
//! L’émetteur ne compare jamais la valeur au chiffre `'0'` : une entrée
//! contenant `0` reste un caractère réel.

use std::fmt;

use log::debug;

/// Une position de la séquence encodée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Caractère de l’entrée, dans l’ordre d’origine.
    Real(char),
    /// Octet nul intercalé entre deux caractères.
    Filler,
}

impl Unit {
    #[must_use]
    pub const fn is_filler(self) -> bool {
        matches!(self, Unit::Filler)
    }

    /// Caractère porté, `None` pour un filler.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Unit::Real(c) => Some(c),
            Unit::Filler => None,
        }
    }
}

/// Séquence encodée : `2N-1` unités pour une entrée de `N ≥ 1` caractères,
/// vide pour une entrée vide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    units: Vec<Unit>,
}

impl Encoded {
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Unit> {
        self.units.iter()
    }

    /// Caractères d’origine (fillers retirés), dans l’ordre.
    pub fn real_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.units.iter().filter_map(|u| u.as_char())
    }

    /// Ligne d’écho lisible : un filler s’affiche comme le chiffre `0`.
    ///
    /// C’est un aperçu pour l’humain ; le littéral C reste la forme exacte
    /// (filler → `0x0`).
    #[must_use]
    pub fn preview(&self) -> Preview<'_> {
        Preview(self)
    }
}

impl<'a> IntoIterator for &'a Encoded {
    type Item = &'a Unit;
    type IntoIter = std::slice::Iter<'a, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}

/// Adaptateur `Display` de la ligne d’écho (voir [`Encoded::preview`]).
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a>(&'a Encoded);

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        for unit in self.0 {
            match unit {
                Unit::Real(c) => f.write_char(*c)?,
                Unit::Filler => f.write_char('0')?,
            }
        }
        Ok(())
    }
}

/// Intercale un filler entre chaque paire de caractères consécutifs.
///
/// Entrée vide → séquence vide (aucun tour de boucle).
#[must_use]
pub fn encode(input: &str) -> Encoded {
    let n = input.chars().count();
    let mut units = Vec::with_capacity((2 * n).saturating_sub(1));
    for (i, c) in input.chars().enumerate() {
        if i > 0 {
            units.push(Unit::Filler);
        }
        units.push(Unit::Real(c));
    }
    debug!(target: "widestr::encode", "entrée: {n} car. → {} unités", units.len());
    Encoded { units }
}
