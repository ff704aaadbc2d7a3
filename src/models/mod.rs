//! Wire-level data model for the Spy Cat Agency backend.
//!
//! Response records are read-mostly cached copies of backend state; the
//! client never invents or patches them locally. Request payloads are
//! separate types so that a draft form is always converted into an exact,
//! fixed payload shape.

use serde::{Deserialize, Deserializer, Serialize};

/// A hired operative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpyCat {
    pub id: i64,
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

impl SpyCat {
    /// Salary formatted for display, e.g. `$50,000` or `$49,999.50`.
    pub fn display_salary(&self) -> String {
        format_salary(self.salary)
    }

    /// Experience formatted for display, e.g. `5 years`.
    pub fn display_experience(&self) -> String {
        match self.years_of_experience {
            1 => "1 year".to_string(),
            n => format!("{} years", n),
        }
    }
}

/// A mission grouping 1-3 targets, optionally assigned to one cat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    /// `None` means unassigned. A present id is trusted, not verified;
    /// resolution against the cached cat list happens at render time.
    #[serde(default)]
    pub cat_id: Option<i64>,
    #[serde(deserialize_with = "bool_lenient")]
    pub complete: bool,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Mission {
    pub fn is_unassigned(&self) -> bool {
        self.cat_id.is_none()
    }
}

/// A single objective belonging to exactly one mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: i64,
    pub mission_id: i64,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub notes: String,
    #[serde(deserialize_with = "bool_lenient")]
    pub complete: bool,
}

/// Payload for `POST /spy-cats/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatCreate {
    pub name: String,
    pub years_of_experience: u32,
    pub breed: String,
    pub salary: f64,
}

/// Payload for `PUT /spy-cats/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryUpdate {
    pub salary: f64,
}

/// One target entry inside a mission-creation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCreate {
    pub name: String,
    pub country: String,
    pub notes: String,
}

/// Payload for `POST /missions/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionCreate {
    pub targets: Vec<TargetCreate>,
}

/// Payload for `PUT /targets/{id}`. Fields left `None` are omitted from
/// the body so the backend only touches what was edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TargetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

/// Payload for `PUT /missions/{id}/assign`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionAssign {
    pub cat_id: i64,
}

/// One entry from the breed catalog; everything except the name is dropped.
#[derive(Debug, Clone, Deserialize)]
pub struct Breed {
    pub name: String,
}

/// Accept JSON `true`/`false` as well as sqlite-style `0`/`1` integers.
/// The backend stores completion flags in integer columns and returns raw
/// rows for missions and targets.
fn bool_lenient<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl serde::de::Visitor<'_> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a boolean or a 0/1 integer")
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v != 0)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}

/// Format a non-negative amount as `$1,234` (cents shown only when present).
pub fn format_salary(amount: f64) -> String {
    let mut whole = amount.trunc() as i64;
    let mut cents = ((amount - amount.trunc()) * 100.0).round() as i64;
    if cents >= 100 {
        whole += 1;
        cents = 0;
    }

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if cents > 0 {
        format!("${}.{:02}", grouped, cents)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_deserialize() {
        let json = r#"{
            "id": 1,
            "name": "Tom",
            "years_of_experience": 5,
            "breed": "Siamese",
            "salary": 50000.0
        }"#;

        let cat: SpyCat = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, 1);
        assert_eq!(cat.name, "Tom");
        assert_eq!(cat.years_of_experience, 5);
        assert_eq!(cat.breed, "Siamese");
        assert_eq!(cat.salary, 50000.0);
    }

    #[test]
    fn test_mission_deserialize_integer_flags() {
        // The backend returns raw sqlite rows: completion flags arrive as 0/1.
        let json = r#"{
            "id": 7,
            "cat_id": null,
            "complete": 0,
            "targets": [
                {"id": 9, "mission_id": 7, "name": "Jerry", "country": "US", "notes": "", "complete": 1}
            ]
        }"#;

        let mission: Mission = serde_json::from_str(json).unwrap();
        assert!(mission.is_unassigned());
        assert!(!mission.complete);
        assert_eq!(mission.targets.len(), 1);
        assert!(mission.targets[0].complete);
    }

    #[test]
    fn test_mission_deserialize_bool_flags() {
        let json = r#"{"id": 7, "cat_id": 2, "complete": true, "targets": []}"#;

        let mission: Mission = serde_json::from_str(json).unwrap();
        assert_eq!(mission.cat_id, Some(2));
        assert!(mission.complete);
        assert!(mission.targets.is_empty());
    }

    #[test]
    fn test_cat_create_payload_shape() {
        let payload = CatCreate {
            name: "Tom".to_string(),
            years_of_experience: 5,
            breed: "Siamese".to_string(),
            salary: 50000.0,
        };

        let json: serde_json::Value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Tom",
                "years_of_experience": 5,
                "breed": "Siamese",
                "salary": 50000.0
            })
        );
    }

    #[test]
    fn test_target_update_omits_unset_fields() {
        let notes_only = TargetUpdate {
            notes: Some("spotted".to_string()),
            complete: None,
        };
        assert_eq!(
            serde_json::to_string(&notes_only).unwrap(),
            r#"{"notes":"spotted"}"#
        );

        let complete_only = TargetUpdate {
            notes: None,
            complete: Some(true),
        };
        assert_eq!(
            serde_json::to_string(&complete_only).unwrap(),
            r#"{"complete":true}"#
        );
    }

    #[test]
    fn test_mission_assign_payload_shape() {
        let payload = MissionAssign { cat_id: 2 };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"cat_id":2}"#);
    }

    #[test]
    fn test_breed_keeps_only_name() {
        // TheCatAPI entries carry many more fields; they must not break us.
        let json = r#"{"id": "siam", "name": "Siamese", "origin": "Thailand", "life_span": "12 - 15"}"#;
        let breed: Breed = serde_json::from_str(json).unwrap();
        assert_eq!(breed.name, "Siamese");
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(50000.0), "$50,000");
        assert_eq!(format_salary(1234567.0), "$1,234,567");
        assert_eq!(format_salary(999.0), "$999");
        assert_eq!(format_salary(0.0), "$0");
        assert_eq!(format_salary(49999.5), "$49,999.50");
    }

    #[test]
    fn test_display_experience() {
        let mut cat = SpyCat {
            id: 1,
            name: "Tom".to_string(),
            years_of_experience: 5,
            breed: "Siamese".to_string(),
            salary: 50000.0,
        };
        assert_eq!(cat.display_experience(), "5 years");
        cat.years_of_experience = 1;
        assert_eq!(cat.display_experience(), "1 year");
    }
}
