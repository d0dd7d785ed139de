use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const GUEST_PREFIX: &str = "guest#";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub car_id: String,
    pub label: String,
    pub driver_person_id: String,
    pub fare_go: f64,
    pub fare_return: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub cars: Vec<Car>,
}

impl Config {
    pub fn person(&self, person_id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.person_id == person_id)
    }

    pub fn car(&self, car_id: &str) -> Option<&Car> {
        self.cars.iter().find(|c| c.car_id == car_id)
    }

    pub fn car_ids(&self) -> Vec<String> {
        self.cars.iter().map(|c| c.car_id.clone()).collect()
    }

    pub fn display_name(&self, person_id: &str) -> String {
        if let Some(label) = guest_label(person_id) {
            return label;
        }
        self.person(person_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| person_id.to_string())
    }
}

// Riders are sets: a duplicated id in a payload must not charge twice,
// and BTreeSet keeps iteration order deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub went: BTreeSet<String>,
    #[serde(default)]
    pub returned: BTreeSet<String>,
}

pub fn is_guest(person_id: &str) -> bool {
    person_id.starts_with(GUEST_PREFIX)
}

pub fn guest_id(name: &str) -> String {
    format!("{GUEST_PREFIX}{}", slug(name))
}

pub fn guest_label(person_id: &str) -> Option<String> {
    person_id
        .strip_prefix(GUEST_PREFIX)
        .map(|rest| rest.replace('_', " "))
}

pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.to_lowercase().chars().map(fold_char) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

pub(crate) fn collation_key(name: &str) -> String {
    name.to_lowercase().chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_folds_diacritics_and_collapses_runs() {
        assert_eq!(slug("João Paulo"), "joao_paulo");
        assert_eq!(slug("  Érico -- da Silva  "), "erico_da_silva");
        assert_eq!(slug("Ana"), "ana");
    }

    #[test]
    fn guest_id_round_trips_to_a_label() {
        let id = guest_id("João Paulo");
        assert_eq!(id, "guest#joao_paulo");
        assert!(is_guest(&id));
        assert_eq!(guest_label(&id).unwrap(), "joao paulo");
    }

    #[test]
    fn guest_label_ignores_registered_ids() {
        assert_eq!(guest_label("p1"), None);
    }

    #[test]
    fn display_name_falls_back_to_raw_id() {
        let config = Config {
            people: vec![Person {
                person_id: "p1".into(),
                name: "Ana".into(),
                photo_url: None,
            }],
            cars: vec![],
        };
        assert_eq!(config.display_name("p1"), "Ana");
        assert_eq!(config.display_name("guest#joao_paulo"), "joao paulo");
        assert_eq!(config.display_name("p999"), "p999");
    }

    #[test]
    fn trip_riders_deduplicate() {
        let trip: Trip =
            serde_json::from_str(r#"{"went":["p1","p1","p2"],"returned":[]}"#).unwrap();
        assert_eq!(trip.went.len(), 2);
        assert!(trip.returned.is_empty());
    }
}
