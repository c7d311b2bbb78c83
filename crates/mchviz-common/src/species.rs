//! Species codes used to partition the methylation datasets.
//!
//! Most routes pass the raw species code straight through to the content
//! backend. Only ortholog lookup needs to know which side of the
//! human/mouse pair a code refers to, so that is resolved here through an
//! explicit table instead of string comparisons at the call site.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Primary dataset (`hsa`).
    Human,
    /// Secondary dataset (`mmu`).
    Mouse,
}

/// Code → species table. Codes not listed here resolve to [`Species::PRIMARY`].
const SPECIES_TABLE: &[(&str, Species)] = &[
    ("hsa", Species::Human),
    ("mmu", Species::Mouse),
];

impl Species {
    pub const PRIMARY: Species = Species::Human;

    /// Look up a species code. Unknown codes fall back to the primary species.
    pub fn from_code(code: &str) -> Species {
        SPECIES_TABLE
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, species)| *species)
            .unwrap_or(Self::PRIMARY)
    }

    pub fn code(self) -> &'static str {
        match self {
            Species::Human => "hsa",
            Species::Mouse => "mmu",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which side of the ortholog table a gene id belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrthologQuery {
    Human { gene_id: String },
    Mouse { gene_id: String },
}

impl OrthologQuery {
    pub fn new(species: Species, gene_id: impl Into<String>) -> Self {
        let gene_id = gene_id.into();
        match species {
            Species::Human => OrthologQuery::Human { gene_id },
            Species::Mouse => OrthologQuery::Mouse { gene_id },
        }
    }

    pub fn gene_id(&self) -> &str {
        match self {
            OrthologQuery::Human { gene_id } | OrthologQuery::Mouse { gene_id } => gene_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_resolve() {
        assert_eq!(Species::from_code("mmu"), Species::Mouse);
        assert_eq!(Species::from_code("hsa"), Species::Human);
    }

    #[test]
    fn unknown_codes_fall_back_to_primary() {
        for code in ["", "MMU", "human_combined", "dre"] {
            assert_eq!(Species::from_code(code), Species::PRIMARY, "code {code:?}");
        }
    }

    #[test]
    fn code_round_trips_through_table() {
        for (code, species) in SPECIES_TABLE {
            assert_eq!(species.code(), *code);
        }
    }

    #[test]
    fn ortholog_query_follows_species() {
        let q = OrthologQuery::new(Species::Mouse, "ENSMUSG0001");
        assert_eq!(q, OrthologQuery::Mouse { gene_id: "ENSMUSG0001".into() });
        assert_eq!(q.gene_id(), "ENSMUSG0001");
    }
}
