//! Fixed emotion taxonomy.
//!
//! An emotion is *pleasant* iff its name belongs to [`PLEASANT_EMOTIONS`].
//! Every other name, including names outside the taxonomy, is non-pleasant.
//! Matching is exact (case and accents included) because names come from the
//! client's fixed emotion picker.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Positive-affect labels (the "alegría" family).
pub const PLEASANT_EMOTIONS: &[&str] = &[
    "Alegre",
    "Tranquila",
    "Feliz",
    "Segura",
    "Cariñosa",
    "Apasionada",
    "Inspirada",
    "Motivada",
    "Poderosa",
    "Agradecida",
    "Aliviada",
    "Liberada",
    "Emocionada",
    "Ilusionada",
    "Confiada",
    "Aceptada",
    "Respetada",
    "Importante",
    "Satisfecha",
    "Esperanzada",
    "Realizada",
    "Optimista",
    "Valiente",
    "Orgullosa",
    "Eufórica",
    "Sensible",
    "Curiosa",
    "Juguetona",
    "Deseada",
    "Provocativa",
];

static PLEASANT_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| PLEASANT_EMOTIONS.iter().copied().collect());

/// Whether an emotion name is classified as pleasant.
#[must_use]
pub fn is_pleasant(name: &str) -> bool {
    PLEASANT_SET.contains(name)
}
