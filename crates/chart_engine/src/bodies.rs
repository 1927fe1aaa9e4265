use ephemeris::Body;

/// Bodies a caller may name, under their canonical response keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Chiron,
    NorthNode,
    SouthNode,
}

/// Requested set when the caller names none
pub const DEFAULT_BODIES: [CanonicalBody; 10] = [
    CanonicalBody::Sun,
    CanonicalBody::Moon,
    CanonicalBody::Mercury,
    CanonicalBody::Venus,
    CanonicalBody::Mars,
    CanonicalBody::Jupiter,
    CanonicalBody::Saturn,
    CanonicalBody::Uranus,
    CanonicalBody::Neptune,
    CanonicalBody::Pluto,
];

const CANONICAL_TABLE: [CanonicalBody; 13] = [
    CanonicalBody::Sun,
    CanonicalBody::Moon,
    CanonicalBody::Mercury,
    CanonicalBody::Venus,
    CanonicalBody::Mars,
    CanonicalBody::Jupiter,
    CanonicalBody::Saturn,
    CanonicalBody::Uranus,
    CanonicalBody::Neptune,
    CanonicalBody::Pluto,
    CanonicalBody::Chiron,
    CanonicalBody::NorthNode,
    CanonicalBody::SouthNode,
];

impl CanonicalBody {
    pub fn name(self) -> &'static str {
        match self {
            CanonicalBody::Sun => "Sun",
            CanonicalBody::Moon => "Moon",
            CanonicalBody::Mercury => "Mercury",
            CanonicalBody::Venus => "Venus",
            CanonicalBody::Mars => "Mars",
            CanonicalBody::Jupiter => "Jupiter",
            CanonicalBody::Saturn => "Saturn",
            CanonicalBody::Uranus => "Uranus",
            CanonicalBody::Neptune => "Neptune",
            CanonicalBody::Pluto => "Pluto",
            CanonicalBody::Chiron => "Chiron",
            CanonicalBody::NorthNode => "North Node",
            CanonicalBody::SouthNode => "South Node",
        }
    }

    /// Body to fetch from the engine. The South Node has none: it is always
    /// mirrored from the North Node.
    pub fn engine_body(self) -> Option<Body> {
        match self {
            CanonicalBody::Sun => Some(Body::Sun),
            CanonicalBody::Moon => Some(Body::Moon),
            CanonicalBody::Mercury => Some(Body::Mercury),
            CanonicalBody::Venus => Some(Body::Venus),
            CanonicalBody::Mars => Some(Body::Mars),
            CanonicalBody::Jupiter => Some(Body::Jupiter),
            CanonicalBody::Saturn => Some(Body::Saturn),
            CanonicalBody::Uranus => Some(Body::Uranus),
            CanonicalBody::Neptune => Some(Body::Neptune),
            CanonicalBody::Pluto => Some(Body::Pluto),
            CanonicalBody::Chiron => Some(Body::Chiron),
            CanonicalBody::NorthNode => Some(Body::MeanNode),
            CanonicalBody::SouthNode => None,
        }
    }
}

/// Canonicalize node aliases; everything else is only trimmed.
///
/// Matching for the node aliases ignores case, `_`/`-` separators and repeated
/// whitespace.
pub fn normalize_body_name(raw: &str) -> String {
    let folded = raw.trim().to_lowercase().replace(['_', '-'], " ");
    let folded = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    match folded.as_str() {
        "north node" | "mean node" | "node" | "ascending node" => CanonicalBody::NorthNode.name().to_string(),
        "south node" | "descending node" => CanonicalBody::SouthNode.name().to_string(),
        _ => raw.trim().to_string(),
    }
}

/// Exact, case-sensitive lookup of a canonical name.
pub fn lookup_body(name: &str) -> Option<CanonicalBody> {
    CANONICAL_TABLE.iter().copied().find(|body| body.name() == name)
}

/// Canonical bodies for a request, in request order.
///
/// `None` selects [`DEFAULT_BODIES`]. Names that do not resolve are dropped.
pub fn resolve_requested(requested: Option<&[&str]>) -> Vec<CanonicalBody> {
    match requested {
        None => DEFAULT_BODIES.to_vec(),
        Some(names) => names
            .iter()
            .filter_map(|raw| {
                let name = normalize_body_name(raw);
                let body = lookup_body(&name);
                if body.is_none() {
                    tracing::debug!("Skipping unknown body '{}'", raw);
                }
                body
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_aliases() {
        for alias in ["north node", "Node", "MEAN_NODE", "ascending-node", "  North   Node "] {
            assert_eq!(normalize_body_name(alias), "North Node", "{alias}");
        }
        for alias in ["south node", "Descending_Node", "south-node"] {
            assert_eq!(normalize_body_name(alias), "South Node", "{alias}");
        }
    }

    #[test]
    fn test_other_names_keep_case() {
        assert_eq!(normalize_body_name("  Sun "), "Sun");
        assert_eq!(normalize_body_name("sun"), "sun");
        assert_eq!(normalize_body_name("Planet X"), "Planet X");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup_body("Sun"), Some(CanonicalBody::Sun));
        assert_eq!(lookup_body("sun"), None);
        assert_eq!(lookup_body("North Node"), Some(CanonicalBody::NorthNode));
        assert_eq!(lookup_body("Planet X"), None);
    }

    #[test]
    fn test_resolve_requested() {
        assert_eq!(resolve_requested(None), DEFAULT_BODIES.to_vec());
        assert_eq!(
            resolve_requested(Some(&["Moon", "Planet X", "node", "Sun"])),
            vec![CanonicalBody::Moon, CanonicalBody::NorthNode, CanonicalBody::Sun]
        );
        assert!(resolve_requested(Some(&[])).is_empty());
    }

    #[test]
    fn test_default_set_is_the_ten_classical_bodies() {
        let names: Vec<_> = DEFAULT_BODIES.iter().map(|b| b.name()).collect();
        assert_eq!(
            names,
            ["Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto"]
        );
        assert!(CanonicalBody::SouthNode.engine_body().is_none());
        assert_eq!(CanonicalBody::NorthNode.engine_body(), Some(Body::MeanNode));
    }
}
