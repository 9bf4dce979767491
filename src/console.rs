// src/console.rs
//
// Mode console (natif seulement) : `calculatrice_arbre --console [--chiffres N] [--profondeur N]`
//
// Boucle : invite ">>> ", une ligne, résultat formaté OU message d’erreur, jusqu’à EOF.
// Une erreur n’arrête pas la boucle ; les lignes vides sont ignorées.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use calculatrice_arbre::noyau::{eval_expression, format::format_resultat, Reglages};

const INVITE: &str = ">>> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Graphique,
    Console,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub reglages: Reglages,
    pub verbeux: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurArguments {
    #[error("option inconnue \"{0}\"")]
    OptionInconnue(String),

    #[error("l’option {0} attend un entier")]
    ValeurAttendue(&'static str),
}

fn lire_entier(
    nom: &'static str,
    valeur: Option<String>,
) -> Result<usize, ErreurArguments> {
    valeur
        .and_then(|v| v.parse().ok())
        .ok_or(ErreurArguments::ValeurAttendue(nom))
}

/// Arguments SANS le nom du programme.
pub fn lire_arguments(
    args: impl IntoIterator<Item = String>,
) -> Result<Options, ErreurArguments> {
    let mut options = Options {
        mode: Mode::Graphique,
        reglages: Reglages::default(),
        verbeux: false,
    };

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--console" | "-c" => options.mode = Mode::Console,
            "--verbeux" | "-v" => options.verbeux = true,
            "--chiffres" => {
                let n = lire_entier("--chiffres", args.next())?;
                options.reglages.set_chiffres(n);
            }
            "--profondeur" => {
                let n = lire_entier("--profondeur", args.next())?;
                options.reglages.set_profondeur_max(n);
            }
            _ => return Err(ErreurArguments::OptionInconnue(arg)),
        }
    }

    Ok(options)
}

/// Une ligne -> texte à afficher (résultat ou erreur).
fn repondre(ligne: &str, reglages: &Reglages) -> String {
    match eval_expression(ligne, reglages) {
        Ok((valeur, _)) => format_resultat(valeur, reglages.chiffres),
        Err(e) => format!("erreur : {e}"),
    }
}

/// REPL générique (testable avec un Cursor et un Vec<u8>).
pub fn boucle<R: BufRead, W: Write>(
    mut entree: R,
    mut sortie: W,
    reglages: &Reglages,
) -> io::Result<()> {
    let mut ligne = String::new();

    loop {
        write!(sortie, "{INVITE}")?;
        sortie.flush()?;

        ligne.clear();
        if entree.read_line(&mut ligne)? == 0 {
            // EOF : on termine proprement la ligne d’invite
            writeln!(sortie)?;
            return Ok(());
        }

        if ligne.trim().is_empty() {
            continue;
        }

        writeln!(sortie, "{}", repondre(&ligne, reglages))?;
    }
}

/// Point d’entrée du mode console (stdin / stdout).
pub fn lancer(reglages: &Reglages) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    boucle(stdin.lock(), stdout.lock(), reglages)
}
