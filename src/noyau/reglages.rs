// src/noyau/reglages.rs
//
// Réglages du noyau (bornés).
// - profondeur_max : garde-fou anti-pile pour la construction ET l’évaluation de l’arbre
// - chiffres       : décimales d’affichage du résultat (format.rs)

/// Profondeur par défaut, en noeuds imbriqués (binaire, unaire, fonction).
/// Les parenthèses seules ne comptent pas.
pub const PROFONDEUR_DEFAUT: usize = 256;

pub const PROFONDEUR_MIN: usize = 8;

/// Plafond : construction + évaluation + affichage tiennent dans la pile
/// d’un thread par défaut (2 Mio), build debug compris.
pub const PROFONDEUR_MAX: usize = 512;

/// Décimales affichées par défaut.
pub const CHIFFRES_DEFAUT: usize = 12;

/// f64 : au-delà de 17 chiffres significatifs, on n’affiche que du bruit.
pub const CHIFFRES_MAX: usize = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub profondeur_max: usize,
    pub chiffres: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            profondeur_max: PROFONDEUR_DEFAUT,
            chiffres: CHIFFRES_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn avec_profondeur(mut self, profondeur: usize) -> Self {
        self.set_profondeur_max(profondeur);
        self
    }

    pub fn avec_chiffres(mut self, chiffres: usize) -> Self {
        self.set_chiffres(chiffres);
        self
    }

    pub fn set_profondeur_max(&mut self, profondeur: usize) {
        self.profondeur_max = profondeur.clamp(PROFONDEUR_MIN, PROFONDEUR_MAX);
    }

    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.min(CHIFFRES_MAX);
    }
}
