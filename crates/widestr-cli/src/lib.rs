//! widestr-cli/src/lib.rs — CLI lib pour widestr
//!
//! Usage : `widestr <string> [<identifier>] [ignorés…]`
//!
//! Sortie (stdout) : ligne d’écho, tableau `char <id>[] = {...};`,
//! puis `size_t <id>_len = N;`. Sans `<string>` : `no args` et code 1.
//!
//! Aucun flag : `-v`, `--help`… sont des chaînes comme les autres. Les logs
//! se règlent via `RUST_LOG` (stderr). Seul un `--` isolé en tête est
//! consommé par clap comme séparateur.

use std::ffi::OsString;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};

use widestr_core::{encode, write_program, Error, Layout, DEFAULT_NAME, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "widestr",
    about = "Encode une chaîne en wide (nuls intercalés) et émet le tableau C",
    disable_help_flag = true
)]
pub struct Cli {
    /// Chaîne à encoder
    #[arg(allow_hyphen_values = true)]
    pub input: Option<String>,

    /// Nom de la variable C générée
    #[arg(allow_hyphen_values = true)]
    pub name: Option<String>,

    /// Arguments surnuméraires, ignorés
    #[arg(num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub rest: Vec<String>,
}

/// Point d’entrée du binaire (à appeler depuis src/main.rs)
///
/// # Errors
/// Erreur clap (argument non UTF-8), `Error::MissingArgument`, ou I/O sur stdout.
pub fn run() -> Result<()> {
    init_logger();
    let cli = Cli::try_parse()?;

    let mut out = BufWriter::new(io::stdout().lock());
    execute(&cli, &mut out)?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// Variante testable : arguments explicites (argv[0] inclus), sortie fournie.
///
/// # Errors
/// Voir [`run`].
pub fn run_from<I, T, W>(args: I, out: &mut W) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write + ?Sized,
{
    let cli = Cli::try_parse_from(args)?;
    execute(&cli, out)
}

/// Encode puis écrit les trois sorties.
///
/// # Errors
/// `Error::MissingArgument` si `input` est absent, sinon erreur d’écriture.
pub fn execute<W: Write + ?Sized>(cli: &Cli, out: &mut W) -> Result<()> {
    debug!(target: "widestr", "widestr-core {VERSION}");
    let input = cli.input.as_deref().ok_or(Error::MissingArgument)?;
    let name = cli.name.as_deref().unwrap_or(DEFAULT_NAME);
    info!(target: "widestr", "variable `{name}`, {} car. en entrée", input.chars().count());
    if !cli.rest.is_empty() {
        debug!(target: "widestr", "{} argument(s) en trop ignoré(s)", cli.rest.len());
    }

    let encoded = encode(input);
    write_program(out, name, &encoded, &Layout::default()).context("écriture de la sortie")?;
    Ok(())
}

/// Code de sortie associé à une erreur de `run`.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<clap::Error>() {
        return u8::try_from(e.exit_code()).unwrap_or(2);
    }
    1
}

/// Affiche l’erreur au bon endroit et renvoie le code de sortie.
///
/// `MissingArgument` → `no args` sur stdout ; clap → son propre rendu ;
/// le reste → `error: …` sur stderr. Un flux fermé n’est pas une panique :
/// le code de sortie reste le même.
#[must_use]
pub fn report(err: &anyhow::Error) -> u8 {
    let written = if let Some(e) = err.downcast_ref::<clap::Error>() {
        e.print()
    } else if let Some(Error::MissingArgument) = err.downcast_ref::<Error>() {
        writeln!(io::stdout(), "{}", Error::MissingArgument)
    } else {
        writeln!(io::stderr(), "error: {err:#}")
    };
    if let Err(io_err) = written {
        debug!(target: "widestr", "rapport d’erreur non écrit: {io_err}");
    }
    exit_status(err)
}

fn init_logger() {
    // RUST_LOG, si présent, remplace le niveau par défaut
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .parse_default_env()
        .try_init();
}
