//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, réglages, démarche)
//! et offrir des opérations simples (C/CLR/AC/DEL) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de jetons, pas d’arbre).
//! - Actions déterministes, sans effet de bord caché.
//! - Les bornes des réglages sont celles de `noyau::reglages`.

use crate::noyau::format::format_resultat;
use crate::noyau::Reglages;

/// Motifs retirés d’un seul coup par DEL (les plus longs d’abord).
const MOTIFS_DEL: [&str; 10] = [
    "sqrt(", "atan(", "sin(", "cos(", "tan(", "exp(", "abs(", "log(", "ln(", "pi",
];

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub normalise: String,
    pub arbre: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String,     // valeur formatée (ou "indéfini", "∞")
    pub valeur: Option<f64>,  // dernière valeur, pour reformater si `chiffres` change
    pub erreur: String,       // message d’erreur (lexicale / syntaxe / sémantique)

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            valeur: None,
            erreur: String::new(),
            demarche: Demarche::default(),
            reglages: Reglages::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + réglages par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.reglages = Reglages::default();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.valeur = None;
        self.erreur.clear();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// DEL : retire d’un coup les motifs utiles ("sin(", "pi", etc.), sinon un caractère.
    pub fn backspace_entree(&mut self) {
        let nettoyer = |s: &mut String| {
            while s.ends_with(' ') {
                s.pop();
            }
        };

        nettoyer(&mut self.entree);
        if self.entree.is_empty() {
            return;
        }

        let motif = MOTIFS_DEL
            .iter()
            .find(|m| self.entree.to_lowercase().ends_with(*m));

        match motif {
            Some(m) => {
                for _ in 0..m.chars().count() {
                    self.entree.pop();
                }
            }
            None => {
                self.entree.pop();
            }
        }

        nettoyer(&mut self.entree);
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX :
    /// - On CONSERVE le dernier résultat pour ne pas “effacer l’écran” sur une faute.
    /// - La démarche est coupée (elle décrirait une autre expression).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (valeur + démarche).
    pub fn set_resultats(&mut self, valeur: f64, demarche: Demarche) {
        self.erreur.clear();
        self.valeur = Some(valeur);
        self.resultat = format_resultat(valeur, self.reglages.chiffres);
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Borne via `Reglages`, puis reformate le résultat affiché.
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.reglages.set_chiffres(chiffres);
        if let Some(v) = self.valeur {
            self.resultat = format_resultat(v, self.reglages.chiffres);
        }
        self.focus_entree = true;
    }

    pub fn set_profondeur_max(&mut self, profondeur: usize) {
        self.reglages.set_profondeur_max(profondeur);
        self.focus_entree = true;
    }
}
