use climate_core::{Observation, PrecipitationRecord, TemperatureRecord, TemperatureSummary};
use serde_json::json;

fn observation() -> Observation {
    Observation {
        station: "USC00519281".to_string(),
        date: "2017-04-14".to_string(),
        precipitation: None,
        temperature: 74.0,
    }
}

#[test]
fn precipitation_record_serializes_exactly_date_and_precipitation() {
    let record = PrecipitationRecord::from(observation());

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value, json!({"date": "2017-04-14", "precipitation": null}));
}

#[test]
fn temperature_record_serializes_exactly_date_and_temperature() {
    let record = TemperatureRecord::from(observation());

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value, json!({"date": "2017-04-14", "temperature": 74.0}));
}

#[test]
fn temperature_summary_serializes_as_three_element_array() {
    let summary = TemperatureSummary {
        min: Some(58.0),
        avg: Some(74.5),
        max: Some(87.0),
    };

    let value = serde_json::to_value(summary).unwrap();
    assert_eq!(value, json!([58.0, 74.5, 87.0]));
}

#[test]
fn empty_temperature_summary_serializes_as_nulls() {
    let summary = TemperatureSummary::default();

    assert!(summary.is_empty());
    assert_eq!(serde_json::to_string(&summary).unwrap(), "[null,null,null]");
}
