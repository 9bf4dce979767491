// src/noyau/arbre.rs
//
// Suite normalisée -> arbre (Noeud)
//
// Aucune table de précédence ici : normalisation.rs a déjà tout encodé en
// profondeur de parenthèses. Il suffit de :
// - extraire_fenetre : contenu du premier groupe "( ... )" équilibré
// - decouper_binaire : opérateur binaire de profondeur 0 -> (gauche, op, droite)
// - Constructeur     : récursion mutuelle des deux, jusqu’aux feuilles
//
// Le nom des constantes/fonctions n’est PAS vérifié ici (voir eval.rs).

use std::fmt;

use super::erreurs::{ErreurCalcul, ErreurSyntaxe};
use super::jetons::Jeton;

#[derive(Clone, Debug, PartialEq)]
pub enum Noeud {
    Racine {
        enfant: Box<Noeud>,
    },
    Nombre {
        valeur: f64,
    },
    Constante {
        nom: String,
    },
    Fonction {
        nom: String,
        argument: Box<Noeud>,
    },
    Binaire {
        operateur: char,
        gauche: Box<Noeud>,
        droite: Box<Noeud>,
    },
}

impl Noeud {
    pub fn racine(enfant: Noeud) -> Self {
        Noeud::Racine {
            enfant: Box::new(enfant),
        }
    }

    pub fn nombre(valeur: f64) -> Self {
        Noeud::Nombre { valeur }
    }

    pub fn constante(nom: impl Into<String>) -> Self {
        Noeud::Constante { nom: nom.into() }
    }

    pub fn fonction(nom: impl Into<String>, argument: Noeud) -> Self {
        Noeud::Fonction {
            nom: nom.into(),
            argument: Box::new(argument),
        }
    }

    pub fn binaire(operateur: char, gauche: Noeud, droite: Noeud) -> Self {
        Noeud::Binaire {
            operateur,
            gauche: Box::new(gauche),
            droite: Box::new(droite),
        }
    }
}

/// Forme entièrement parenthésée, relisible par `tokenize`.
impl fmt::Display for Noeud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Noeud::Racine { enfant } => write!(f, "{enfant}"),
            Noeud::Nombre { valeur } => write!(f, "{valeur}"),
            Noeud::Constante { nom } => f.write_str(nom),
            Noeud::Fonction { nom, argument } => write!(f, "{nom}({argument})"),
            Noeud::Binaire {
                operateur,
                gauche,
                droite,
            } => write!(f, "({gauche} {operateur} {droite})"),
        }
    }
}

/// Binaire “pré-analysé” : l’opérateur et ses deux tranches brutes,
/// avant leur propre analyse récursive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BinairePrepare<'a> {
    pub operateur: char,
    pub gauche: &'a [Jeton],
    pub droite: &'a [Jeton],
}

/* ------------------------ Fenêtres et découpage ------------------------ */

/// Contenu du premier groupe parenthésé (sans ses bornes) + ce qui suit sa fermante.
/// La tranche doit commencer par "(".
pub fn extraire_fenetre(jetons: &[Jeton]) -> Result<(&[Jeton], &[Jeton]), ErreurSyntaxe> {
    if !jetons.first().is_some_and(Jeton::est_ouvrante) {
        return Err(ErreurSyntaxe::ParentheseAttendue);
    }

    let mut profondeur = 0usize;
    for (i, jeton) in jetons.iter().enumerate() {
        if jeton.est_ouvrante() {
            profondeur += 1;
        } else if jeton.est_fermante() {
            if profondeur == 1 {
                return Ok((&jetons[1..i], &jetons[i + 1..]));
            }
            profondeur -= 1;
        }
    }

    Err(ErreurSyntaxe::ParentheseNonFermee)
}

/// Un opérateur n’est binaire que s’il suit une opérande
/// (pas en tête de fenêtre, pas juste après un autre opérateur).
fn en_position_binaire(jetons: &[Jeton], i: usize) -> bool {
    i > 0 && !jetons[i - 1].est_operateur()
}

/// Cherche l’opérateur binaire de profondeur 0.
///
/// Tous les candidats sont du même niveau (normalisation.rs) ; on coupe au
/// DERNIER, pour que `a - b - c` donne `(a - b) - c` (gauche à droite).
/// `None` : pas de découpe à ce niveau, la tranche est une expression entière.
pub fn decouper_binaire(jetons: &[Jeton]) -> Result<Option<BinairePrepare<'_>>, ErreurSyntaxe> {
    let mut profondeur = 0usize;
    let mut point: Option<(usize, char)> = None;

    for (i, jeton) in jetons.iter().enumerate() {
        match jeton {
            Jeton::Ponctuation('(') => profondeur += 1,
            Jeton::Ponctuation(')') => {
                profondeur = profondeur
                    .checked_sub(1)
                    .ok_or(ErreurSyntaxe::ParentheseFermanteOrpheline)?;
            }
            Jeton::Operateur(op) if profondeur == 0 && en_position_binaire(jetons, i) => {
                point = Some((i, *op));
            }
            _ => {}
        }
    }

    Ok(point.map(|(i, operateur)| BinairePrepare {
        operateur,
        gauche: &jetons[..i],
        droite: &jetons[i + 1..],
    }))
}

/// Rien ne doit suivre une feuille / un groupe complet.
fn rien_apres(reste: &[Jeton]) -> Result<(), ErreurSyntaxe> {
    match reste.first() {
        None => Ok(()),
        Some(j) => Err(ErreurSyntaxe::JetonInattendu(j.to_string())),
    }
}

/// Pré-passe : parenthèses équilibrées, et la profondeur ne retombe à 0
/// qu’au dernier jeton (la suite normalisée est un seul groupe).
fn verifier_equilibre(jetons: &[Jeton]) -> Result<(), ErreurSyntaxe> {
    let mut profondeur = 0usize;
    let dernier = jetons.len().saturating_sub(1);

    for (i, jeton) in jetons.iter().enumerate() {
        if jeton.est_ouvrante() {
            profondeur += 1;
        } else if jeton.est_fermante() {
            profondeur = profondeur
                .checked_sub(1)
                .ok_or(ErreurSyntaxe::ParentheseFermanteOrpheline)?;
            if profondeur == 0 && i != dernier {
                return Err(ErreurSyntaxe::ParentheseFermanteOrpheline);
            }
        }
    }

    if profondeur == 0 {
        Ok(())
    } else {
        Err(ErreurSyntaxe::ParentheseNonFermee)
    }
}

/// Nombre de couches "( ... )" qui englobent TOUTE la tranche (tranche équilibrée).
///
/// Un seul passage : entre la rampe d’ouvrantes de tête et la rampe de fermantes
/// de queue, la profondeur minimale atteinte est le nombre de couches communes.
fn couches_englobantes(jetons: &[Jeton]) -> usize {
    let tete = jetons.iter().take_while(|j| j.est_ouvrante()).count();
    let queue = jetons.iter().rev().take_while(|j| j.est_fermante()).count();
    if tete == 0 || queue == 0 {
        return 0;
    }

    // profondeurs après le dernier '(' de tête .. après le dernier jeton hors queue
    let debut = tete - 1;
    let fin = jetons.len() - queue - 1;

    let mut profondeur = 0usize;
    let mut minimum = usize::MAX;
    for (i, jeton) in jetons.iter().enumerate().take(fin + 1) {
        if jeton.est_ouvrante() {
            profondeur += 1;
        } else if jeton.est_fermante() {
            profondeur = profondeur.saturating_sub(1);
        }
        if i >= debut {
            minimum = minimum.min(profondeur);
        }
    }

    minimum.min(tete).min(queue)
}

/* ------------------------ Analyse récursive ------------------------ */

struct Constructeur {
    limite: usize,
}

impl Constructeur {
    /// La profondeur ne compte que les noeuds créés (binaire, unaire, fonction) :
    /// les couches de parenthèses sont retirées sans récursion.
    fn expression(&self, jetons: &[Jeton], profondeur: usize) -> Result<Noeud, ErreurCalcul> {
        if profondeur > self.limite {
            return Err(ErreurCalcul::TropProfond {
                limite: self.limite,
            });
        }

        let couches = couches_englobantes(jetons);
        let jetons = &jetons[couches..jetons.len() - couches];

        if let Some(prep) = decouper_binaire(jetons)? {
            return self.binaire(prep, profondeur);
        }

        let Some(premier) = jetons.first() else {
            return Err(ErreurSyntaxe::OperandeManquante.into());
        };

        match premier {
            // groupe qui n’englobe pas toute la tranche : quelque chose le suit
            Jeton::Ponctuation('(') => {
                let (_, reste) = extraire_fenetre(jetons)?;
                let suivant = reste.first().map(Jeton::to_string).unwrap_or_default();
                Err(ErreurSyntaxe::JetonInattendu(suivant).into())
            }

            Jeton::Ponctuation(_) => Err(ErreurSyntaxe::ParentheseFermanteOrpheline.into()),

            // unaire : "-x" => "0 - x"
            Jeton::Operateur(op @ ('+' | '-')) => {
                let operande = self.expression(&jetons[1..], profondeur + 1)?;
                Ok(Noeud::binaire(*op, Noeud::nombre(0.0), operande))
            }

            Jeton::Operateur(_) => Err(ErreurSyntaxe::OperandeManquante.into()),

            Jeton::Nombre(v) => {
                rien_apres(&jetons[1..])?;
                Ok(Noeud::nombre(*v))
            }

            Jeton::Constante(nom) => {
                rien_apres(&jetons[1..])?;
                Ok(Noeud::constante(nom.as_str()))
            }

            Jeton::Fonction(nom) => {
                let (fenetre, reste) = extraire_fenetre(&jetons[1..]).map_err(|e| match e {
                    ErreurSyntaxe::ParentheseAttendue => ErreurSyntaxe::ArgumentAttendu(nom.clone()),
                    autre => autre,
                })?;
                rien_apres(reste)?;

                let argument = self.expression(fenetre, profondeur + 1)?;
                Ok(Noeud::fonction(nom.as_str(), argument))
            }
        }
    }

    fn binaire(&self, prep: BinairePrepare<'_>, profondeur: usize) -> Result<Noeud, ErreurCalcul> {
        let gauche = self.expression(prep.gauche, profondeur + 1)?;
        let droite = self.expression(prep.droite, profondeur + 1)?;
        Ok(Noeud::binaire(prep.operateur, gauche, droite))
    }
}

/// Construit l’arbre (enveloppé dans `Noeud::Racine`) à partir de la suite
/// normalisée. `profondeur_max` borne la récursion (garde-fou anti-pile).
pub fn construire_arbre(jetons: &[Jeton], profondeur_max: usize) -> Result<Noeud, ErreurCalcul> {
    verifier_equilibre(jetons)?;

    let constructeur = Constructeur {
        limite: profondeur_max,
    };
    let enfant = constructeur.expression(jetons, 0)?;

    Ok(Noeud::racine(enfant))
}
