// src/noyau/jetons.rs
//
// Jetonisation : texte -> Vec<Jeton>
// - prétraitement : trim + MAJUSCULES (la grammaire est insensible à la casse)
// - lecture caractère par caractère, avec un caractère d’avance et un de retard
// - première erreur => tout est abandonné (pas de liste partielle)

use std::fmt;

use super::erreurs::ErreurLexicale;

/* ------------------------ Vocabulaire (tables fixes) ------------------------ */

pub const OPERATEURS: [char; 5] = ['+', '-', '*', '/', '^'];
pub const PONCTUATION: [char; 2] = ['(', ')'];
pub const CONSTANTES: [&str; 2] = ["PI", "E"];
pub const FONCTIONS: [&str; 9] = [
    "SIN", "COS", "TAN", "ATAN", "EXP", "ABS", "LOG", "LN", "SQRT",
];

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(f64),
    Operateur(char),
    Constante(String),
    Fonction(String),
    Ponctuation(char),
}

impl Jeton {
    pub fn ouvrante() -> Self {
        Jeton::Ponctuation('(')
    }

    pub fn fermante() -> Self {
        Jeton::Ponctuation(')')
    }

    pub fn est_ouvrante(&self) -> bool {
        matches!(self, Jeton::Ponctuation('('))
    }

    pub fn est_fermante(&self) -> bool {
        matches!(self, Jeton::Ponctuation(')'))
    }

    pub fn est_operateur(&self) -> bool {
        matches!(self, Jeton::Operateur(_))
    }
}

impl fmt::Display for Jeton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jeton::Nombre(v) => write!(f, "{v}"),
            Jeton::Operateur(c) | Jeton::Ponctuation(c) => write!(f, "{c}"),
            Jeton::Constante(nom) | Jeton::Fonction(nom) => f.write_str(nom),
        }
    }
}

/* ------------------------ Lecteur de chaîne ------------------------ */

struct Lecteur {
    chars: Vec<char>,
    pos: usize,
}

impl Lecteur {
    fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            pos: 0,
        }
    }

    /// Caractère à `decalage` de la position courante (-1 = précédent, 1 = suivant).
    fn peek(&self, decalage: isize) -> Option<char> {
        let p = self.pos.checked_add_signed(decalage)?;
        self.chars.get(p).copied()
    }

    fn avance(&mut self) {
        self.pos += 1;
    }

    /// Consomme tant que `accepte(courant, avant, apres)` répond true.
    fn lire_tant_que(
        &mut self,
        mut accepte: impl FnMut(char, Option<char>, Option<char>) -> bool,
    ) -> String {
        let mut lu = String::new();
        while let Some(c) = self.peek(0) {
            if !accepte(c, self.peek(-1), self.peek(1)) {
                break;
            }
            lu.push(c);
            self.avance();
        }
        lu
    }
}

/* ------------------------ Lecture des jetons ------------------------ */

/// Lettres latines (ASCII + Latin-1 + Latin étendu).
fn est_lettre_latine(c: char) -> bool {
    c.is_alphabetic()
        && matches!(c,
            'A'..='Z' | 'a'..='z' | '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

/// 1  2  3.14  0.12E4  5.886E-2
fn lire_nombre(l: &mut Lecteur) -> Result<Jeton, ErreurLexicale> {
    let mut vu_point = false;
    let mut vu_exposant = false;

    let texte = l.lire_tant_que(|c, avant, apres| match c {
        '.' if vu_point => false,
        '.' => {
            vu_point = true;
            true
        }
        // E seulement si suivi d’un chiffre ou d’un '-'
        'E' if matches!(apres, Some(a) if a == '-' || a.is_ascii_digit()) => {
            if vu_exposant {
                return false;
            }
            vu_exposant = true;
            true
        }
        '-' => vu_exposant && avant == Some('E'),
        _ => c.is_ascii_digit(),
    });

    match texte.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Jeton::Nombre(v)),
        _ => Err(ErreurLexicale::NombreInvalide(texte)),
    }
}

fn lire_operateur(l: &mut Lecteur) -> Result<Jeton, ErreurLexicale> {
    let c = l.peek(0).unwrap_or('\0');
    l.avance();

    if OPERATEURS.contains(&c) {
        Ok(Jeton::Operateur(c))
    } else {
        Err(ErreurLexicale::OperateurIndefini(c))
    }
}

fn lire_mot_cle(l: &mut Lecteur) -> Result<Jeton, ErreurLexicale> {
    let mot = l.lire_tant_que(|c, _, _| est_lettre_latine(c));

    if CONSTANTES.contains(&mot.as_str()) {
        Ok(Jeton::Constante(mot))
    } else if FONCTIONS.contains(&mot.as_str()) {
        Ok(Jeton::Fonction(mot))
    } else {
        Err(ErreurLexicale::MotCleIndefini(mot))
    }
}

fn lire_ponctuation(l: &mut Lecteur) -> Result<Jeton, ErreurLexicale> {
    let c = l.peek(0).unwrap_or('\0');
    l.avance();

    if PONCTUATION.contains(&c) {
        Ok(Jeton::Ponctuation(c))
    } else {
        Err(ErreurLexicale::CaractereIndefini(c))
    }
}

/// Un jeton, ou `None` quand la fin du texte est atteinte (fin normale).
fn lire_jeton(l: &mut Lecteur) -> Result<Option<Jeton>, ErreurLexicale> {
    l.lire_tant_que(|c, _, _| c.is_whitespace());

    let Some(c) = l.peek(0) else {
        return Ok(None);
    };

    let jeton = if c.is_ascii_digit() {
        lire_nombre(l)?
    } else if OPERATEURS.contains(&c) {
        lire_operateur(l)?
    } else if est_lettre_latine(c) {
        lire_mot_cle(l)?
    } else if PONCTUATION.contains(&c) {
        lire_ponctuation(l)?
    } else {
        return Err(ErreurLexicale::CaractereIndefini(c));
    };

    Ok(Some(jeton))
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres (ex: 12, 3.14, 0.12E4, 5.886E-2)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - constantes PI, E
/// - fonctions SIN COS TAN ATAN EXP ABS LOG LN SQRT
///
/// Une entrée vide donne une liste vide : c’est à l’appelant d’en décider.
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, ErreurLexicale> {
    let prepare = s.trim().to_uppercase();
    let mut lecteur = Lecteur::new(&prepare);
    let mut out = Vec::new();

    while let Some(jeton) = lire_jeton(&mut lecteur)? {
        out.push(jeton);
    }

    Ok(out)
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_jetons(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(Jeton::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
