//! Noyau de la calculatrice
//!
//! Organisation interne :
//! - jetons.rs        : tokenisation (vocabulaire fixe, insensible à la casse)
//! - normalisation.rs : parenthésage de précédence (profondeur au lieu d’une table)
//! - arbre.rs         : Noeud + construction récursive (fenêtres / découpe binaire)
//! - eval.rs          : réduction f64 + pipeline complet
//! - erreurs.rs       : erreurs lexicales / syntaxe / sémantiques
//! - reglages.rs      : garde-fous (profondeur) + décimales d’affichage
//! - format.rs        : affichage du résultat

pub mod arbre;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod normalisation;
pub mod reglages;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::ErreurCalcul;
pub use eval::{eval_expression, evaluate, evaluate_avec};
pub use reglages::Reglages;
