// src/noyau/normalisation.rs
//
// Parenthésage de précédence : on encode la priorité des opérateurs par la
// profondeur de parenthèses, au lieu d’une table de précédence.
//
// Règles (parenthèses synthétiques) :
// - tout est encadré par 4 "(" ... 4 ")"        (marge pour la réécriture la plus profonde)
// - "(" -> 4 "(" ; ")" -> 4 ")"                   (groupement utilisateur conservé)
// - "^"     -> ") ^ ("
// - "*" "/" -> ") ) OP ( ("
// - "+" "-" -> ") ) ) OP ( ( ("                    (binaire seulement)
//
// Moins/plus unaire : premier jeton, ou juste après "(" ou après un autre opérateur.
// Il est recopié tel quel ; arbre.rs le traite comme "0 OP x".
//
// Invariant : des opérateurs de même niveau ferment/ouvrent le même nombre de
// parenthèses, donc dans une fenêtre équilibrée les opérateurs de profondeur 0
// sont exactement ceux du niveau le plus lâche.

use super::jetons::Jeton;

/// Marge initiale/finale et poids d’une parenthèse utilisateur.
const MARGE: usize = 4;

fn ouvrir(out: &mut Vec<Jeton>, n: usize) {
    out.extend(std::iter::repeat_n(Jeton::ouvrante(), n));
}

fn fermer(out: &mut Vec<Jeton>, n: usize) {
    out.extend(std::iter::repeat_n(Jeton::fermante(), n));
}

/// Nombre de niveaux fermés/rouverts autour d’un opérateur binaire.
fn niveaux(op: char) -> usize {
    match op {
        '^' => 1,
        '*' | '/' => 2,
        _ => 3,
    }
}

/// Un + ou - en position d’opérande attendue est unaire.
fn est_unaire(jetons: &[Jeton], i: usize) -> bool {
    match i.checked_sub(1).map(|p| &jetons[p]) {
        None => true,
        Some(avant) => avant.est_ouvrante() || avant.est_operateur(),
    }
}

/// Réécrit la suite de jetons avec les parenthèses synthétiques de précédence.
/// La sortie est toujours strictement plus longue que l’entrée.
pub fn parentheser(jetons: &[Jeton]) -> Vec<Jeton> {
    let mut out = Vec::with_capacity(jetons.len() * 3 + 2 * MARGE);

    ouvrir(&mut out, MARGE);

    for (i, jeton) in jetons.iter().enumerate() {
        match jeton {
            Jeton::Ponctuation('(') => ouvrir(&mut out, MARGE),
            Jeton::Ponctuation(')') => fermer(&mut out, MARGE),

            Jeton::Operateur(op @ ('+' | '-')) if est_unaire(jetons, i) => {
                out.push(Jeton::Operateur(*op));
            }

            Jeton::Operateur(op) => {
                let n = niveaux(*op);
                fermer(&mut out, n);
                out.push(Jeton::Operateur(*op));
                ouvrir(&mut out, n);
            }

            _ => out.push(jeton.clone()),
        }
    }

    fermer(&mut out, MARGE);

    out
}
