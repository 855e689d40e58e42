//! Canonical plant names for DASA log file labels.
//!
//! DASA exports are named after a short plant token (`genting.xlsx`,
//! `tbp.xlsx`, ...). The report shows the registered plant name instead.

/// Normalized file-name token → canonical plant name.
const PLANT_NAMES: &[(&str, &str)] = &[
    ("genting", "Genting Sanyen Power Sdn. Bhd."),
    ("jimaheast", "Jimah East Power Sdn Bhd"),
    ("jimahenergy", "Jimah Energy Venture Sdn Bhd"),
    ("kev", "Kapar Energy Ventures Sdn. Bhd."),
    ("pengerang", "Pengerang Power Sdn Bhd"),
    ("prai", "Prai Power Sdn Bhd"),
    ("cameron", "S.J. Cameron Highlands"),
    ("gelugor", "S.J. Gelugor"),
    ("huluterengganu", "S.J. Hulu Terengganu"),
    ("kenyir", "S.J. Kenyir"),
    ("pergau", "S.J. Pergau"),
    ("sg perak", "S.J. Sg Perak"),
    ("pd1", "S.J. Tuanku Jaafar (PD1)"),
    ("pd2", "S.J. Tuanku Jaafar (PD2)"),
    ("ulu jela", "S.J. Ulu Jelai"),
    ("segari", "Segari Energy Ventures Sdn. Bhd."),
    ("tbe", "Tanjung Bin Energy Sdn Bhd"),
    ("tbp", "Tanjung Bin Power Sdn Bhd"),
    ("connaught", "TNB Connaught Bridge Sdn Bhd"),
    ("janamanjung", "TNB Janamanjung Sdn Bhd"),
    ("manjung4", "TNB Janamanjung Sdn Bhd (Manjung4)"),
    ("manjung5", "TNB Manjung Five Sdn Bhd"),
    ("spg", "Southern Power Generation"),
    ("putrajaya", "S.J. Putrajaya"),
    ("tuah", "Edra Energy Sdn Bhd"),
];

/// Look up the canonical plant name for a normalized token.
pub fn canonical_name(token: &str) -> Option<&'static str> {
    PLANT_NAMES
        .iter()
        .find(|(key, _)| *key == token)
        .map(|(_, name)| *name)
}

/// Resolve the report `Source` for a file label.
///
/// The label is trimmed and lower-cased before lookup. Labels without a
/// mapping are returned verbatim, untrimmed.
pub fn resolve_source(label: &str) -> String {
    let normalized = label.trim().to_lowercase();
    canonical_name(&normalized)
        .map(str::to_string)
        .unwrap_or_else(|| label.to_string())
}
