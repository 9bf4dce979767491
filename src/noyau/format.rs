// src/noyau/format.rs
//
// Affichage du résultat f64 (lecture humaine).
// - NaN       -> "indéfini"
// - ±inf      -> "∞" / "-∞"
// - sinon     -> arrondi à `chiffres` décimales, zéros finaux retirés

/// Retire les zéros (et le point) inutiles d’un décimal "12.3400" -> "12.34".
fn retire_zeros(mut s: String) -> String {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Format final affiché (console + UI).
pub fn format_resultat(valeur: f64, chiffres: usize) -> String {
    if valeur.is_nan() {
        return "indéfini".to_string();
    }
    if valeur.is_infinite() {
        return if valeur > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let s = retire_zeros(format!("{valeur:.chiffres$}"));

    // "-0" après arrondi : on affiche 0
    if s == "-0" {
        return "0".to_string();
    }
    s
}
