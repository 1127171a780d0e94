//! Records decoded from the external vehicle feed.

use serde::{Deserialize, Serialize};

/// One element of the feed's JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: i64,
    pub brand: String,
    pub model: String,
    #[serde(alias = "year")]
    pub manufacture_year: i64,
    pub color: String,
    /// Kilometers.
    pub mileage: f64,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_fields() {
        let json = r#"{"id":1,"brand":"Toyota","model":"Corolla","manufactureYear":2019,
            "color":"Red","mileage":42000.5,"price":15999.0}"#;
        let vehicle: VehicleRecord = serde_json::from_str(json).unwrap();

        assert_eq!(vehicle.id, 1);
        assert_eq!(vehicle.brand, "Toyota");
        assert_eq!(vehicle.manufacture_year, 2019);
        assert!((vehicle.mileage - 42000.5).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_year_alias() {
        let json = r#"{"id":2,"brand":"Ford","model":"Focus","year":2015,
            "color":"Blue","mileage":1.0,"price":2.0}"#;
        let vehicle: VehicleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.manufacture_year, 2015);
    }

    #[test]
    fn rejects_missing_brand() {
        let json = r#"{"id":3,"model":"Focus","year":2015,"color":"Blue","mileage":1.0,"price":2.0}"#;
        assert!(serde_json::from_str::<VehicleRecord>(json).is_err());
    }
}
