//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - entrées mutées : seules les erreurs lexicales / de syntaxe sont acceptées
//! - invariant clé : la forme parenthésée de l’arbre se réévalue à l’identique (bit à bit)

use std::time::{Duration, Instant};

use super::erreurs::ErreurCalcul;
use super::jetons::{tokenize, Jeton};
use super::{eval_expression, evaluate, Reglages};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choisir<'a>(&mut self, choix: &[&'a str]) -> &'a str {
        choix[self.pick(choix.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn meme_f64(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

fn is_erreur_attendue(e: &ErreurCalcul) -> bool {
    // Une entrée mutée ne peut échouer qu’à la lecture ou à l’analyse :
    // tout nom qui passe la jetonisation est connu de l’évaluateur.
    matches!(e, ErreurCalcul::Lexicale(_) | ErreurCalcul::Syntaxe(_))
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const NOMBRES: &[&str] = &["0", "1", "2", "3", "0.5", "2.5", "10", "7.", "1E3", "2.5E-2"];
const FONCTIONS: &[&str] = &[
    "sin", "cos", "tan", "atan", "exp", "abs", "log", "ln", "sqrt",
];
const OPERATEURS: &[&str] = &["+", "-", "*", "/", "^"];

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "pi".to_string(),
        1 => "E".to_string(),
        _ => rng.choisir(NOMBRES).to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    match rng.pick(7) {
        0 => gen_atome(rng),
        // sans parenthèses : la précédence est exercée
        1 | 2 => {
            let a = gen_expr(rng, depth - 1);
            let op = rng.choisir(OPERATEURS);
            let b = gen_expr(rng, depth - 1);
            format!("{a} {op} {b}")
        }
        3 => format!("({})", gen_expr(rng, depth - 1)),
        4 => {
            let signe = if rng.coin() { "-" } else { "+" };
            format!("{signe}{}", gen_expr(rng, depth - 1))
        }
        _ => {
            let f = rng.choisir(FONCTIONS);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Supprime ou insère un caractère au hasard (entrée souvent invalide).
fn muter(rng: &mut Rng, expr: &str) -> String {
    let mut chars: Vec<char> = expr.chars().collect();
    let pos = rng.pick(chars.len() as u32 + 1) as usize;

    if rng.coin() && pos < chars.len() {
        chars.remove(pos);
    } else {
        let c = rng.choisir(&["(", ")", "+", "*", ".", "E", "X", "$", " ", "9"]);
        chars.insert(pos, c.chars().next().unwrap_or(' '));
    }
    chars.into_iter().collect()
}

/// Littéral numérique aléatoire valide : entier [. fraction] [E [-] exposant].
fn gen_litteral(rng: &mut Rng) -> String {
    let mut s = String::new();
    for _ in 0..=rng.pick(6) {
        s.push(char::from(b'0' + rng.pick(10) as u8));
    }
    if rng.coin() {
        s.push('.');
        for _ in 0..=rng.pick(4) {
            s.push(char::from(b'0' + rng.pick(10) as u8));
        }
    }
    if rng.coin() {
        s.push('E');
        if rng.coin() {
            s.push('-');
        }
        for _ in 0..=rng.pick(2) {
            s.push(char::from(b'0' + rng.pick(10) as u8));
        }
    }
    s
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_aller_retour_et_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);
    let r = Reglages::default();

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_fini = 0usize;
    let mut seen_special = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 5);

        let (v, d) = eval_expression(&expr, &r)
            .unwrap_or_else(|e| panic!("expr valide refusée: {expr:?} err={e}"));

        let encore = evaluate(&expr).unwrap_or_else(|e| panic!("{expr:?}: {e}"));
        assert!(meme_f64(v, encore), "non déterministe: {expr:?}");

        let relu = evaluate(&d.arbre).unwrap_or_else(|e| panic!("{:?}: {e}", d.arbre));
        assert!(
            meme_f64(v, relu),
            "aller-retour: {expr:?} -> {:?} : {v} != {relu}",
            d.arbre
        );

        if v.is_finite() {
            seen_fini += 1;
        } else {
            seen_special += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_fini > 10, "trop peu de valeurs finies: {seen_fini}");
    assert!(seen_special > 0, "aucun NaN/inf vu: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_entrees_mutees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = muter(&mut rng, &base);

        match evaluate(&expr) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    assert!(seen_ok > 0, "aucune mutation acceptée");
    assert!(seen_err > 10, "trop peu d’erreurs vues: {seen_err}");
}

#[test]
fn fuzz_safe_litteraux() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let s = gen_litteral(&mut rng);
        let attendu: f64 = s.parse().unwrap_or_else(|e| panic!("{s:?}: {e}"));
        assert_eq!(tokenize(&s), Ok(vec![Jeton::Nombre(attendu)]), "s={s:?}");
    }
}

#[test]
fn fuzz_safe_parallele_sans_etat_partage() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xFACADE_u64);
    let exprs: Vec<String> = (0..60).map(|_| gen_expr(&mut rng, 4)).collect();
    let reference: Vec<u64> = exprs
        .iter()
        .map(|e| evaluate(e).map(f64::to_bits).unwrap_or(0))
        .collect();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (e, attendu) in exprs.iter().zip(&reference) {
                    let v = evaluate(e).map(f64::to_bits).unwrap_or(0);
                    assert_eq!(v, *attendu, "{e:?}");
                }
            });
        }
    });
    budget(t0, max);
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("0.5", 800);
    budget(t0, max);

    let v = evaluate(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v, 400.0);
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // parenthèses : acceptées quelle que soit la profondeur, en temps linéaire
    for n in [500, 1000, 3000] {
        let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(evaluate(&expr), Ok(1.0), "n={n}");
        budget(t0, max);
    }

    // noeuds (fonctions, unaires) : refusés au-delà de la limite
    let limite = Reglages::default().profondeur_max;
    for n in [limite + 1, 2 * limite, 3000] {
        let abs = format!("{}1{}", "ABS(".repeat(n), ")".repeat(n));
        let moins = format!("{}1", "-".repeat(n));
        for expr in [abs, moins] {
            assert!(
                matches!(evaluate(&expr), Err(ErreurCalcul::TropProfond { .. })),
                "n={n}"
            );
        }
        budget(t0, max);
    }
}
