// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// - Lexicale  : jetonisation (caractère, nombre, mot-clé)
// - Syntaxe   : construction de l’arbre (opérande manquante, parenthèses)
// - Semantique: noms qui survivent jusqu’à l’évaluation sans être connus
//
// Chaque étape renvoie un Result ; la première erreur remonte telle quelle
// jusqu’à l’appelant (pas de résultat partiel).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurLexicale {
    #[error("caractère indéfini '{0}'")]
    CaractereIndefini(char),

    #[error("opérateur indéfini '{0}'")]
    OperateurIndefini(char),

    #[error("mot-clé indéfini \"{0}\"")]
    MotCleIndefini(String),

    #[error("nombre invalide \"{0}\"")]
    NombreInvalide(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurSyntaxe {
    #[error("expression vide")]
    ExpressionVide,

    #[error("opérande manquante")]
    OperandeManquante,

    #[error("parenthèse non fermée")]
    ParentheseNonFermee,

    #[error("parenthèse fermante sans ouvrante")]
    ParentheseFermanteOrpheline,

    #[error("parenthèse ouvrante attendue")]
    ParentheseAttendue,

    #[error("la fonction {0} attend un argument entre parenthèses")]
    ArgumentAttendu(String),

    #[error("jeton inattendu \"{0}\"")]
    JetonInattendu(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurSemantique {
    #[error("constante indéfinie \"{0}\"")]
    ConstanteIndefinie(String),

    #[error("fonction indéfinie \"{0}\"")]
    FonctionIndefinie(String),

    #[error("opérateur indéfini '{0}'")]
    OperateurIndefini(char),
}

/// Erreur renvoyée par `evaluate` : l’étape fautive + son contexte.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Lexicale(#[from] ErreurLexicale),

    #[error(transparent)]
    Syntaxe(#[from] ErreurSyntaxe),

    #[error(transparent)]
    Semantique(#[from] ErreurSemantique),

    #[error("expression trop imbriquée (limite: {limite})")]
    TropProfond { limite: usize },
}
