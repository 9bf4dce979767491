// src/main.rs
//
// Calculatrice à arbre — point d’entrée NATIF + WEB (WASM)
// --------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//                                 ou `--console` : REPL texte (console.rs)
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// IMPORTANT (structure projet):
// - Le noyau vit dans la bibliothèque (src/lib.rs), sans UI
// - `impl eframe::App for AppCalc` vit dans src/app.rs
// - Ici: point d’entrée seulement (natif + web)

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
#[cfg(not(target_arch = "wasm32"))]
mod console;

// `crate::noyau` pour les modules de l’app
use calculatrice_arbre::noyau;

use app::AppCalc;

/// Titre unique (natif + web).
pub const TITRE_APP: &str = "Calculatrice à arbre";

/* ------------------------ Journalisation (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(verbeux: bool) {
    use tracing_subscriber::{
        filter::{LevelFilter, Targets},
        fmt::Layer,
        prelude::*,
    };

    let niveau_crate = if verbeux {
        LevelFilter::TRACE
    } else {
        LevelFilter::DEBUG
    };

    // stderr : stdout reste réservé aux réponses du REPL
    tracing_subscriber::registry()
        .with(
            Layer::new()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(
                    Targets::new()
                        .with_default(LevelFilter::INFO)
                        .with_target("calculatrice_arbre", niveau_crate),
                ),
        )
        .init();
}

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    let options = match console::lire_arguments(std::env::args().skip(1)) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: calculatrice_arbre [--console] [--chiffres N] [--profondeur N] [--verbeux]");
            std::process::exit(2);
        }
    };

    // Sans --verbeux, le REPL reste muet (DEBUG seulement en GUI).
    if options.verbeux || options.mode == console::Mode::Graphique {
        init_logging(options.verbeux);
    }

    if options.mode == console::Mode::Console {
        if let Err(e) = console::lancer(&options.reglages) {
            eprintln!("erreur d’entrée/sortie : {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    tracing::info!(reglages = ?options.reglages, "démarrage GUI");

    let viewport = egui::ViewportBuilder::default()
        .with_title(TITRE_APP)
        .with_inner_size([520.0, 760.0])
        .with_min_inner_size([420.0, 620.0]);

    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let reglages = options.reglages;
    eframe::run_native(
        TITRE_APP,
        native,
        Box::new(move |_cc| {
            Ok(Box::new(AppCalc {
                reglages,
                ..AppCalc::default()
            }))
        }),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
