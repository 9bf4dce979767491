// src/lib.rs
//
// Noyau réutilisable (sans UI) : le binaire (GUI + console) s’appuie dessus.

pub mod noyau;

pub use noyau::{evaluate, ErreurCalcul};
