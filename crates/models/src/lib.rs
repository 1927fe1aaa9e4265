use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use indexmap::IndexMap;
use serde_json::Value;

pub const DEFAULT_HOUSE_SYSTEM_NAME: &str = "Placidus";
pub const DEFAULT_ZODIAC_SYSTEM: &str = "Tropical";

// Settings models
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
	pub host: String,
	pub port: u16,
	pub service_name: String,
	pub hint: String,
}

impl Default for ServiceSettings {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3000,
			service_name: "natal-chart-service".to_string(),
			hint: "POST JSON with utc_datetime, latitude, longitude, requested_planets.".to_string(),
		}
	}
}

// Request models

/// Incoming chart request.
///
/// Decoding is deliberately loose: fields of the wrong JSON type are treated
/// as absent instead of failing the whole body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartRequest {
	#[serde(default)]
	pub utc_datetime: Option<Value>,
	#[serde(default, deserialize_with = "number_or_none")]
	pub latitude: Option<f64>,
	#[serde(default, deserialize_with = "number_or_none")]
	pub longitude: Option<f64>,
	#[serde(default, deserialize_with = "list_or_none")]
	pub requested_planets: Option<Vec<Value>>,
	#[serde(default, deserialize_with = "text_or_none")]
	pub house_system: Option<String>,
	#[serde(default, deserialize_with = "text_or_none")]
	pub zodiac_system: Option<String>,
}

impl ChartRequest {
	/// Both coordinates, or nothing when either one is missing.
	pub fn coordinates(&self) -> Option<(f64, f64)> {
		match (self.latitude, self.longitude) {
			(Some(lat), Some(lon)) => Some((lat, lon)),
			_ => None,
		}
	}

	pub fn house_system_label(&self) -> &str {
		self.house_system.as_deref().unwrap_or(DEFAULT_HOUSE_SYSTEM_NAME)
	}

	pub fn zodiac_label(&self) -> &str {
		self.zodiac_system.as_deref().unwrap_or(DEFAULT_ZODIAC_SYSTEM)
	}

	/// String entries of `requested_planets`, in request order.
	///
	/// Returns `None` when the field is absent or an empty list, so callers can
	/// substitute their default set. Non-string and blank entries are skipped.
	pub fn requested_names(&self) -> Option<Vec<&str>> {
		let raw = self.requested_planets.as_ref().filter(|list| !list.is_empty())?;
		Some(
			raw.iter()
				.filter_map(Value::as_str)
				.filter(|name| !name.trim().is_empty())
				.collect(),
		)
	}
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(Value::as_f64))
}

fn list_or_none<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Value>::deserialize(deserializer)? {
		Some(Value::Array(items)) => Ok(Some(items)),
		_ => Ok(None),
	}
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Value>::deserialize(deserializer)? {
		Some(Value::String(text)) if !text.is_empty() => Ok(Some(text)),
		_ => Ok(None),
	}
}

// Output models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
	Aries,
	Taurus,
	Gemini,
	Cancer,
	Leo,
	Virgo,
	Libra,
	Scorpio,
	Sagittarius,
	Capricorn,
	Aquarius,
	Pisces,
}

impl ZodiacSign {
	pub const ALL: [ZodiacSign; 12] = [
		ZodiacSign::Aries,
		ZodiacSign::Taurus,
		ZodiacSign::Gemini,
		ZodiacSign::Cancer,
		ZodiacSign::Leo,
		ZodiacSign::Virgo,
		ZodiacSign::Libra,
		ZodiacSign::Scorpio,
		ZodiacSign::Sagittarius,
		ZodiacSign::Capricorn,
		ZodiacSign::Aquarius,
		ZodiacSign::Pisces,
	];

	/// Sign at position `index` counted from Aries, wrapping every twelve.
	pub fn from_index(index: usize) -> Self {
		Self::ALL[index % 12]
	}

	pub fn name(&self) -> &'static str {
		match self {
			ZodiacSign::Aries => "Aries",
			ZodiacSign::Taurus => "Taurus",
			ZodiacSign::Gemini => "Gemini",
			ZodiacSign::Cancer => "Cancer",
			ZodiacSign::Leo => "Leo",
			ZodiacSign::Virgo => "Virgo",
			ZodiacSign::Libra => "Libra",
			ZodiacSign::Scorpio => "Scorpio",
			ZodiacSign::Sagittarius => "Sagittarius",
			ZodiacSign::Capricorn => "Capricorn",
			ZodiacSign::Aquarius => "Aquarius",
			ZodiacSign::Pisces => "Pisces",
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BodyPlacement {
	pub longitude: f64,
	pub latitude: f64,
	pub distance: f64,
	pub speed_longitude: f64,
	pub sign: ZodiacSign,
	pub degree: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnglePlacement {
	pub longitude: f64,
	pub sign: ZodiacSign,
	pub degree: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HouseData {
	pub house_system: String,
	pub ascendant: AnglePlacement,
	pub midheaven: AnglePlacement,
	pub cusps: [f64; 12],
}

/// Body placements keyed by canonical name, kept in insertion order.
///
/// Inserting an existing name replaces its placement but keeps its position.
pub type PlanetTable = IndexMap<String, BodyPlacement>;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartMeta {
	pub engine_version: Option<String>,
	pub jd_ut: f64,
	pub utc_datetime: String,
	pub ephe_path: String,
	pub zodiac_system: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartResponse {
	pub meta: ChartMeta,
	pub planets: PlanetTable,
	#[serde(serialize_with = "houses_or_empty")]
	pub houses: Option<HouseData>,
}

// Charts without coordinates report `"houses": {}` rather than null.
fn houses_or_empty<S: Serializer>(houses: &Option<HouseData>, serializer: S) -> Result<S::Ok, S::Error> {
	match houses {
		Some(data) => data.serialize(serializer),
		None => serializer.serialize_map(Some(0))?.end(),
	}
}

#[derive(Debug, Serialize, Clone)]
pub struct HealthResponse {
	pub ok: bool,
	pub service: String,
	pub hint: String,
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn placement(longitude: f64) -> BodyPlacement {
		BodyPlacement {
			longitude,
			latitude: 0.0,
			distance: 1.0,
			speed_longitude: 1.0,
			sign: ZodiacSign::Aries,
			degree: longitude,
		}
	}

	#[test]
	fn test_request_ignores_wrongly_typed_fields() {
		let request: ChartRequest = serde_json::from_value(json!({
			"utc_datetime": "2000-01-01T12:00:00Z",
			"latitude": "51.5",
			"longitude": -0.12,
			"requested_planets": "Sun",
			"house_system": 7,
			"zodiac_system": "",
			"profile_id": "abc"
		}))
		.unwrap();

		assert_eq!(request.latitude, None);
		assert_eq!(request.longitude, Some(-0.12));
		assert!(request.coordinates().is_none());
		assert!(request.requested_planets.is_none());
		assert_eq!(request.house_system_label(), "Placidus");
		assert_eq!(request.zodiac_label(), "Tropical");
	}

	#[test]
	fn test_requested_names_skips_non_strings_and_blanks() {
		let request: ChartRequest = serde_json::from_value(json!({
			"requested_planets": ["Sun", 3, "  ", null, "Moon"]
		}))
		.unwrap();
		assert_eq!(request.requested_names(), Some(vec!["Sun", "Moon"]));

		let empty: ChartRequest = serde_json::from_value(json!({ "requested_planets": [] })).unwrap();
		assert_eq!(empty.requested_names(), None);
	}

	#[test]
	fn test_planet_table_keeps_first_position_on_replace() {
		let mut table = PlanetTable::new();
		table.insert("Sun".to_string(), placement(1.0));
		table.insert("Moon".to_string(), placement(2.0));
		table.insert("Sun".to_string(), placement(3.0));

		assert_eq!(table.len(), 2);
		assert_eq!(table.keys().map(String::as_str).collect::<Vec<_>>(), vec!["Sun", "Moon"]);
		let json = serde_json::to_string(&table).unwrap();
		assert!(json.starts_with(r#"{"Sun":"#));
		assert!(json.find("Sun") < json.find("Moon"));
		assert_eq!(table.get("Sun").map(|p| p.longitude), Some(3.0));
	}

	#[test]
	fn test_missing_houses_serialize_as_empty_object() {
		let response = ChartResponse {
			meta: ChartMeta {
				engine_version: None,
				jd_ut: 2451545.0,
				utc_datetime: "2000-01-01T12:00:00Z".to_string(),
				ephe_path: "/tmp/ephe".to_string(),
				zodiac_system: "Tropical".to_string(),
			},
			planets: PlanetTable::new(),
			houses: None,
		};

		let value = serde_json::to_value(&response).unwrap();
		assert_eq!(value["houses"], json!({}));
		assert_eq!(value["planets"], json!({}));
		assert_eq!(value["meta"]["engine_version"], Value::Null);
	}

	#[test]
	fn test_sign_serializes_as_name() {
		assert_eq!(serde_json::to_value(ZodiacSign::Sagittarius).unwrap(), json!("Sagittarius"));
		assert_eq!(ZodiacSign::from_index(13), ZodiacSign::Taurus);
	}
}
