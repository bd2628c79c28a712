use std::collections::BTreeMap;

/// Shown for keys that have neither an uploaded image nor a static fallback.
pub const DEFAULT_PLACEHOLDER: &str = "assets/images/placeholder.png";

/// Images bundled with the site, used until an admin uploads a replacement.
const BUNDLED: &[(&str, &str)] = &[
    ("logo-main", "assets/logos/0-removebg-preview 1.png"),
    ("logo-fdfp", "assets/logos/fdfp.png"),
    ("logo-metfpa", "assets/logos/Logo-METFPA-2.png"),
    ("hero-main", "assets/images/pic4.jpg"),
    ("about-office", "assets/images/pic7.jpg"),
    (
        "about-team",
        "https://images.unsplash.com/photo-1553877522-43269d4ea984?ixlib=rb-4.0.3&auto=format&fit=crop&w=600&q=80",
    ),
    ("service-formation", "assets/images/pic5.jpg"),
    ("service-conseil", "assets/images/pic8.jpg"),
    ("service-recrutement", "assets/images/pic6.jpg"),
    ("partner-rti", "assets/partenaire_logos/RTI.webp"),
    ("partner-anac", "assets/partenaire_logos/ANAC.png"),
    (
        "partner-port-abidjan",
        "assets/partenaire_logos/Port Autonome Abidjan.png",
    ),
    ("partner-oscn", "assets/partenaire_logos/OSCN.png"),
    ("partner-aderiz", "assets/partenaire_logos/ADERIZ.png"),
    ("partner-codival", "assets/partenaire_logos/codival.svg"),
    ("partner-kaera", "assets/partenaire_logos/Kaera.svg"),
];

/// Static key → path table consulted when the catalog has no URL for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTable {
    paths: BTreeMap<String, String>,
    placeholder: String,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self {
            paths: BUNDLED
                .iter()
                .map(|(key, path)| ((*key).to_string(), (*path).to_string()))
                .collect(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl FallbackTable {
    /// Bundled table with `overrides` layered on top.
    pub fn with_overrides(
        overrides: impl IntoIterator<Item = (String, String)>,
        placeholder: Option<String>,
    ) -> Self {
        let mut table = Self::default();
        table.paths.extend(overrides);
        if let Some(placeholder) = placeholder {
            table.placeholder = placeholder;
        }
        table
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.paths.get(key).map(String::as_str)
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Fallback for `key`, or the placeholder.
    pub fn resolve(&self, key: &str) -> &str {
        self.get(key).unwrap_or(&self.placeholder)
    }
}
