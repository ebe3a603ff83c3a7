//! Country → locale table for the geographic strategy.
//!
//! Only countries whose primary language has translated content are listed.
//! Multilingual countries (CA, CH) go through header negotiation instead.

use std::collections::HashMap;

use super::Locale;

const SPANISH_SPEAKING: [&str; 21] = [
    "AR", "BO", "CL", "CO", "CR", "CU", "DO", "EC", "ES", "GQ", "GT", "HN", "MX", "NI", "PA", "PE",
    "PR", "PY", "SV", "UY", "VE",
];

const FRENCH_SPEAKING: [&str; 19] = [
    "BE", "BF", "BJ", "CD", "CG", "CI", "CM", "FR", "GA", "GN", "HT", "LU", "MC", "MG", "ML", "NE",
    "SN", "TD", "TG",
];

lazy_static::lazy_static! {
    static ref COUNTRY_LOCALES: HashMap<&'static str, Locale> = SPANISH_SPEAKING
        .iter()
        .map(|code| (*code, Locale::Es))
        .chain(FRENCH_SPEAKING.iter().map(|code| (*code, Locale::Fr)))
        .collect();
}

pub fn locale_for_country(code: &str) -> Option<Locale> {
    let code = code.trim().to_ascii_uppercase();
    COUNTRY_LOCALES.get(code.as_str()).copied()
}
