//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> parenthésage de précédence -> arbre -> réduction f64
//!
//! Chaque étape est une fonction pure : aucun état global, on peut évaluer
//! plusieurs expressions en parallèle sans coordination.

use std::f64::consts;

use tracing::{debug, trace};

use super::arbre::{construire_arbre, Noeud};
use super::erreurs::{ErreurCalcul, ErreurSemantique, ErreurSyntaxe};
use super::jetons::{format_jetons, tokenize};
use super::normalisation::parentheser;
use super::reglages::Reglages;

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub normalise: String,
    pub arbre: String,
    pub note: String,
}

/* ------------------------ Réduction de l’arbre ------------------------ */

fn valeur_constante(nom: &str) -> Option<f64> {
    match nom {
        "PI" => Some(consts::PI),
        "E" => Some(consts::E),
        _ => None,
    }
}

fn appliquer_fonction(nom: &str, x: f64) -> Option<f64> {
    let y = match nom {
        "SIN" => x.sin(),
        "COS" => x.cos(),
        "TAN" => x.tan(),
        "ATAN" => x.atan(),
        "EXP" => x.exp(),
        "ABS" => x.abs(),
        "LOG" => x.log10(),
        "LN" => x.ln(),
        // négatif => NaN, propagé tel quel
        "SQRT" => x.sqrt(),
        _ => return None,
    };
    Some(y)
}

/// IEEE-754 : 1/0 = inf, 0/0 = NaN, (-8)^(1/3) = NaN ; jamais d’erreur.
fn appliquer_operateur(op: char, a: f64, b: f64) -> Option<f64> {
    let y = match op {
        '+' => a + b,
        '-' => a - b,
        '*' => a * b,
        '/' => a / b,
        '^' => a.powf(b),
        _ => return None,
    };
    Some(y)
}

fn reduire(noeud: &Noeud, profondeur: usize, limite: usize) -> Result<f64, ErreurCalcul> {
    if profondeur > limite {
        return Err(ErreurCalcul::TropProfond { limite });
    }

    match noeud {
        Noeud::Racine { enfant } => reduire(enfant, profondeur + 1, limite),

        Noeud::Nombre { valeur } => Ok(*valeur),

        Noeud::Constante { nom } => valeur_constante(nom)
            .ok_or_else(|| ErreurSemantique::ConstanteIndefinie(nom.clone()).into()),

        Noeud::Fonction { nom, argument } => {
            // argument d’abord, puis la fonction
            let x = reduire(argument, profondeur + 1, limite)?;
            appliquer_fonction(nom, x)
                .ok_or_else(|| ErreurSemantique::FonctionIndefinie(nom.clone()).into())
        }

        Noeud::Binaire {
            operateur,
            gauche,
            droite,
        } => {
            let a = reduire(gauche, profondeur + 1, limite)?;
            let b = reduire(droite, profondeur + 1, limite)?;
            appliquer_operateur(*operateur, a, b)
                .ok_or_else(|| ErreurSemantique::OperateurIndefini(*operateur).into())
        }
    }
}

/// Réduit un arbre en f64 (lecture seule, chaque noeud visité une fois).
pub fn evaluer_arbre(arbre: &Noeud, profondeur_max: usize) -> Result<f64, ErreurCalcul> {
    reduire(arbre, 0, profondeur_max)
}

/* ------------------------ Pipeline ------------------------ */

/// Les quatre étapes, une seule fois pour les deux points d’entrée.
/// `avec_demarche` : garder aussi le texte des étapes intermédiaires.
fn executer(
    texte: &str,
    reglages: &Reglages,
    avec_demarche: bool,
) -> Result<(f64, Option<DemarcheNoyau>), ErreurCalcul> {
    // 1) Jetons
    let jetons = tokenize(texte)?;
    if jetons.is_empty() {
        return Err(ErreurSyntaxe::ExpressionVide.into());
    }
    debug!(jetons = jetons.len(), "jetonisation");
    trace!("jetons: {}", format_jetons(&jetons));

    // 2) Parenthésage de précédence
    let normalise = parentheser(&jetons);
    debug!(jetons = normalise.len(), "parenthésage");

    // 3) Arbre
    let arbre = construire_arbre(&normalise, reglages.profondeur_max)?;
    trace!("arbre: {arbre}");

    // 4) Réduction
    let valeur = evaluer_arbre(&arbre, reglages.profondeur_max)?;
    debug!(valeur, "évaluation");

    let demarche = avec_demarche.then(|| DemarcheNoyau {
        jetons: format_jetons(&jetons),
        normalise: format_jetons(&normalise),
        arbre: arbre.to_string(),
        note: "Pipeline: jetons → parenthésage de précédence → arbre → réduction f64.".into(),
    });

    Ok((valeur, demarche))
}

/// API publique : évalue une expression avec les réglages par défaut.
pub fn evaluate(texte: &str) -> Result<f64, ErreurCalcul> {
    evaluate_avec(texte, &Reglages::default())
}

/// Comme `evaluate`, avec des réglages explicites (profondeur max).
pub fn evaluate_avec(texte: &str, reglages: &Reglages) -> Result<f64, ErreurCalcul> {
    executer(texte, reglages, false).map(|(valeur, _)| valeur)
}

/// Évalue et retourne aussi la démarche (jetons, suite normalisée, arbre).
pub fn eval_expression(
    texte: &str,
    reglages: &Reglages,
) -> Result<(f64, DemarcheNoyau), ErreurCalcul> {
    let (valeur, demarche) = executer(texte, reglages, true)?;
    Ok((valeur, demarche.unwrap_or_default()))
}
