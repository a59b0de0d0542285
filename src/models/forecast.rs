// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Forecast and tide models, plus the merged per-hour record returned to clients.

use crate::models::{FavoriteSpot, Spot};
use serde::{Deserialize, Serialize};

/// Estimates of one quantity from each forecast model source.
///
/// No canonical value is picked; sources missing upstream stay `None`
/// and are omitted from output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dwd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fcoo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meteo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noaa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sg: Option<f64>,
}

/// One hourly entry of the upstream `hours` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastHour {
    pub time: String,
    pub wind_wave_direction: SourceValues,
    pub wind_wave_height: SourceValues,
    pub wind_wave_period: SourceValues,
    pub swell_direction: SourceValues,
    pub swell_height: SourceValues,
    pub swell_period: SourceValues,
    pub wave_direction: SourceValues,
    pub wave_height: SourceValues,
    pub wave_period: SourceValues,
    pub wind_direction: SourceValues,
    pub wind_speed: SourceValues,
    pub gust: SourceValues,
    pub water_temperature: SourceValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideType {
    High,
    Low,
    #[serde(other)]
    Other,
}

/// A tide extreme from the upstream `data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TideEvent {
    pub height: f64,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: TideType,
}

/// A subject (spot or favorite) joined with one forecast hour and the
/// full tide window.
///
/// Every record built for the same subject carries the same tide lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord<S> {
    #[serde(flatten)]
    pub subject: S,
    pub time: String,
    pub wave_height: SourceValues,
    pub wave_direction: SourceValues,
    pub wave_period: SourceValues,
    pub swell_direction: SourceValues,
    pub water_temperature: SourceValues,
    pub wind_speed: SourceValues,
    pub wind_direction: SourceValues,
    pub high_tide: Vec<TideEvent>,
    pub low_tide: Vec<TideEvent>,
}

pub type SpotForecastRecord = ForecastRecord<Spot>;
pub type FavoriteForecastRecord = ForecastRecord<FavoriteSpot>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_hour_tolerates_missing_quantities() {
        let hour: ForecastHour = serde_json::from_value(serde_json::json!({
            "time": "2026-10-18T00:00:00+00:00",
            "waveHeight": {"sg": 1.2, "noaa": 1.1, "ecmwf": 1.3},
        }))
        .unwrap();

        assert_eq!(hour.wave_height.sg, Some(1.2));
        assert_eq!(hour.wave_height.noaa, Some(1.1));
        assert_eq!(hour.wave_height.dwd, None);
        assert_eq!(hour.gust, SourceValues::default());
    }

    #[test]
    fn test_tide_type_parsing() {
        let events: Vec<TideEvent> = serde_json::from_value(serde_json::json!([
            {"height": 1.1, "time": "2026-10-18T04:00:00+00:00", "type": "high"},
            {"height": -0.2, "time": "2026-10-18T10:00:00+00:00", "type": "low"},
            {"height": 0.0, "time": "2026-10-18T12:00:00+00:00", "type": "slack"},
        ]))
        .unwrap();

        let kinds: Vec<TideType> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![TideType::High, TideType::Low, TideType::Other]);
    }

    #[test]
    fn test_source_values_omit_missing_sources() {
        let values = SourceValues {
            sg: Some(2.0),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&values).unwrap(),
            serde_json::json!({"sg": 2.0})
        );
    }
}
