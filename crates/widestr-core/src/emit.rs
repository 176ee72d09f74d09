//! emit.rs — Émission du littéral C pour une séquence encodée
//!
//! Deux passes séparées :
//! 1. `render_items` : chaque `Unit` → texte d’item (`'c'` ou `0x0`), sans effet de bord ;
//! 2. `layout_items` : jointure `, ` + retour à la ligne avant chaque item
//!    d’indice multiple de `per_line`.
//!
//! Puis les déclarations :
//! - `char <name>[] = {<items>};`
//! - `size_t <name>_len = <N>;`

use std::io::Write;

use log::debug;

use crate::encode::{Encoded, Unit};
use crate::Result;

/// Nom de variable utilisé quand l’appelant n’en fournit pas.
pub const DEFAULT_NAME: &str = "tmp";

/// Texte d’un filler dans le tableau.
pub const FILLER_LITERAL: &str = "0x0";

/* ───────────────────────────── Mise en page ───────────────────────────── */

/// Paramètres de mise en page du tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Nombre d’items par ligne (un retour à la ligne précède chaque multiple).
    pub per_line: usize,
    /// Indentation en début de ligne.
    pub indent: &'static str,
}

impl Default for Layout {
    fn default() -> Self {
        Self { per_line: 15, indent: "    " }
    }
}

impl Layout {
    #[must_use]
    pub fn with_per_line(mut self, n: usize) -> Self {
        self.per_line = n.max(1);
        self
    }
}

/* ───────────────────────────── Rendus (render_*) ───────────────────────────── */

/// Passe 1 : un texte par unité, dans l’ordre.
#[must_use]
pub fn render_items(encoded: &Encoded) -> Vec<String> {
    encoded.iter().map(|u| render_unit(*u)).collect()
}

/// Rendu d’une unité : caractère quoté, ou `0x0` pour un filler.
#[must_use]
pub fn render_unit(unit: Unit) -> String {
    match unit {
        Unit::Real(c) => quote_char(c),
        Unit::Filler => FILLER_LITERAL.to_string(),
    }
}

/// Littéral caractère C. Les non-ASCII passent tels quels.
fn quote_char(c: char) -> String {
    match c {
        '\'' => r"'\''".into(),
        '\\' => r"'\\'".into(),
        '\n' => r"'\n'".into(),
        '\t' => r"'\t'".into(),
        '\r' => r"'\r'".into(),
        '\0' => r"'\0'".into(),
        c if c.is_ascii_control() => format!(r"'\x{:02x}'", u32::from(c)),
        c => format!("'{c}'"),
    }
}

/// Passe 2 : jointure des items.
///
/// Chaque item sauf le dernier est suivi de `, ` ; un saut de ligne + `indent`
/// précède les items d’indice `0, per_line, 2*per_line, …`.
#[must_use]
pub fn layout_items(items: &[String], layout: &Layout) -> String {
    let per_line = layout.per_line.max(1);
    let last = items.len().saturating_sub(1);
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i % per_line == 0 {
            out.push('\n');
            out.push_str(layout.indent);
        }
        out.push_str(item);
        if i != last {
            out.push_str(", ");
        }
    }
    debug!(
        target: "widestr::emit",
        "{} items sur {} ligne(s)",
        items.len(),
        items.len().div_ceil(per_line)
    );
    out
}

/// `char <name>[] = {…};`
#[must_use]
pub fn render_array(name: &str, encoded: &Encoded, layout: &Layout) -> String {
    let body = layout_items(&render_items(encoded), layout);
    format!("char {name}[] = {{{body}}};")
}

/// `size_t <name>_len = <N>;`
#[must_use]
pub fn render_len(name: &str, encoded: &Encoded) -> String {
    format!("size_t {name}_len = {};", encoded.len())
}

/* ───────────────────────────── Écriture ───────────────────────────── */

/// Écrit la sortie complète : ligne d’écho, tableau, longueur.
///
/// # Errors
/// `Error::Io` si l’écriture échoue.
pub fn write_program<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    encoded: &Encoded,
    layout: &Layout,
) -> Result<()> {
    writeln!(out, "{}", encoded.preview())?;
    writeln!(out, "{}", render_array(name, encoded, layout))?;
    writeln!(out, "{}", render_len(name, encoded))?;
    Ok(())
}
