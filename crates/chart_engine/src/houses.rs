/// House systems the service can ask the engine for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HouseSystem {
    #[default]
    Placidus,
    Koch,
    Equal,
    WholeSign,
}

impl HouseSystem {
    /// Single-letter code understood by the engine.
    pub fn code(self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
        }
    }
}

/// Map a caller-supplied alias to a house system.
///
/// Unknown or missing names fall back to Placidus so older clients that send
/// arbitrary labels keep getting houses.
pub fn resolve_house_system(alias: Option<&str>) -> HouseSystem {
    let alias = alias.unwrap_or_default().trim().to_lowercase();
    match alias.as_str() {
        "placidus" | "p" => HouseSystem::Placidus,
        "koch" | "k" => HouseSystem::Koch,
        "equal" | "e" => HouseSystem::Equal,
        "whole" | "w" => HouseSystem::WholeSign,
        _ => HouseSystem::default(),
    }
}
