// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merging of spot metadata with forecast and tide data.

use crate::models::{
    FavoriteSpot, ForecastHour, ForecastRecord, GeoPoint, Spot, TideEvent, TideType,
};
use crate::services::forecast::{Fetched, ForecastClient};
use futures_util::{stream, StreamExt};

/// Anything with a location that forecasts can be attached to.
pub trait ForecastSubject: Clone {
    fn subject_id(&self) -> &str;
    fn coords(&self) -> GeoPoint;
}

impl ForecastSubject for Spot {
    fn subject_id(&self) -> &str {
        &self.id
    }

    fn coords(&self) -> GeoPoint {
        self.coords
    }
}

impl ForecastSubject for FavoriteSpot {
    fn subject_id(&self) -> &str {
        &self.id
    }

    fn coords(&self) -> GeoPoint {
        self.coords
    }
}

/// Split tide events into (high, low), keeping upstream order.
///
/// Events of any other type land in neither list.
pub fn partition_tides(events: &[TideEvent]) -> (Vec<TideEvent>, Vec<TideEvent>) {
    let mut high = Vec::new();
    let mut low = Vec::new();
    for event in events {
        match event.kind {
            TideType::High => high.push(event.clone()),
            TideType::Low => low.push(event.clone()),
            TideType::Other => {}
        }
    }
    (high, low)
}

/// One record per forecast hour, each carrying the whole tide window.
///
/// No forecast hours means no records.
pub fn build_records<S: ForecastSubject>(
    subject: &S,
    hours: &[ForecastHour],
    tides: &[TideEvent],
) -> Vec<ForecastRecord<S>> {
    if hours.is_empty() {
        return Vec::new();
    }

    let (high_tide, low_tide) = partition_tides(tides);

    hours
        .iter()
        .map(|hour| ForecastRecord {
            subject: subject.clone(),
            time: hour.time.clone(),
            wave_height: hour.wave_height.clone(),
            wave_direction: hour.wave_direction.clone(),
            wave_period: hour.wave_period.clone(),
            swell_direction: hour.swell_direction.clone(),
            water_temperature: hour.water_temperature.clone(),
            wind_speed: hour.wind_speed.clone(),
            wind_direction: hour.wind_direction.clone(),
            high_tide: high_tide.clone(),
            low_tide: low_tide.clone(),
        })
        .collect()
}

/// Fetches upstream data for subjects and merges it into records.
#[derive(Clone)]
pub struct SpotForecaster {
    client: ForecastClient,
    max_concurrent: usize,
}

impl SpotForecaster {
    pub fn new(client: ForecastClient, max_concurrent: usize) -> Self {
        Self {
            client,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Both upstream calls for one subject, issued concurrently.
    pub async fn fetch(&self, coords: GeoPoint) -> (Fetched<ForecastHour>, Fetched<TideEvent>) {
        tokio::join!(
            self.client.fetch_forecast_samples(coords),
            self.client.fetch_tide_events(coords),
        )
    }

    /// All forecast records for a single subject.
    pub async fn records_for<S: ForecastSubject>(&self, subject: &S) -> Vec<ForecastRecord<S>> {
        let (hours, tides) = self.fetch(subject.coords()).await;
        let records = build_records(subject, hours.items(), tides.items());

        tracing::debug!(
            subject = subject.subject_id(),
            hours_unavailable = hours.is_unavailable(),
            tides_unavailable = tides.is_unavailable(),
            records = records.len(),
            "Built forecast records"
        );
        records
    }

    /// Records for many subjects, concatenated in subject order.
    ///
    /// Subjects are fetched with bounded concurrency. A subject whose
    /// forecast is unavailable contributes nothing.
    pub async fn records_for_all<S: ForecastSubject>(
        &self,
        subjects: Vec<S>,
    ) -> Vec<ForecastRecord<S>> {
        stream::iter(subjects)
            .map(|subject| async move { self.records_for(&subject).await })
            .buffered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// First record of each subject, skipping subjects with none.
    pub async fn first_record_for_each<S: ForecastSubject>(
        &self,
        subjects: Vec<S>,
    ) -> Vec<ForecastRecord<S>> {
        stream::iter(subjects)
            .map(|subject| async move { self.records_for(&subject).await.into_iter().next() })
            .buffered(self.max_concurrent)
            .filter_map(|record| async move { record })
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceValues;

    fn spot() -> Spot {
        Spot {
            id: "spot-1".to_string(),
            name: "Test Reef".to_string(),
            address: "1 Beach Rd".to_string(),
            city: "Surf City".to_string(),
            state: "CA".to_string(),
            country: "US".to_string(),
            coords: GeoPoint::new(10.0, -20.0),
            geohash: None,
        }
    }

    fn hour(time: &str, height: f64) -> ForecastHour {
        ForecastHour {
            time: time.to_string(),
            wave_height: SourceValues {
                sg: Some(height),
                noaa: Some(height + 0.1),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn tide(time: &str, kind: TideType) -> TideEvent {
        TideEvent {
            height: 1.0,
            time: time.to_string(),
            kind,
        }
    }

    #[test]
    fn test_one_record_per_hour_with_shared_tides() {
        let hours = vec![
            hour("2026-10-18T00:00:00+00:00", 1.0),
            hour("2026-10-18T01:00:00+00:00", 1.5),
        ];
        let tides = vec![
            tide("2026-10-18T04:00:00+00:00", TideType::High),
            tide("2026-10-18T10:00:00+00:00", TideType::Low),
        ];

        let records = build_records(&spot(), &hours, &tides);

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.subject.id, "spot-1");
            assert_eq!(record.high_tide.len(), 1);
            assert_eq!(record.low_tide.len(), 1);
            assert_eq!(record.high_tide, records[0].high_tide);
            assert_eq!(record.low_tide, records[0].low_tide);
        }
        assert_eq!(records[1].wave_height.sg, Some(1.5));
        assert_eq!(records[1].time, "2026-10-18T01:00:00+00:00");
    }

    #[test]
    fn test_no_hours_no_records() {
        let tides = vec![tide("2026-10-18T04:00:00+00:00", TideType::High)];
        assert!(build_records(&spot(), &[], &tides).is_empty());
    }

    #[test]
    fn test_hours_without_tides() {
        let records = build_records(&spot(), &[hour("t0", 1.0)], &[]);
        assert_eq!(records.len(), 1);
        assert!(records[0].high_tide.is_empty());
        assert!(records[0].low_tide.is_empty());
    }

    #[test]
    fn test_partition_preserves_order_and_is_disjoint() {
        let tides = vec![
            tide("t3", TideType::High),
            tide("t1", TideType::Low),
            tide("t0", TideType::High),
            tide("t2", TideType::Low),
            tide("t4", TideType::Low),
        ];

        let (high, low) = partition_tides(&tides);

        let high_times: Vec<&str> = high.iter().map(|t| t.time.as_str()).collect();
        let low_times: Vec<&str> = low.iter().map(|t| t.time.as_str()).collect();
        assert_eq!(high_times, vec!["t3", "t0"]);
        assert_eq!(low_times, vec!["t1", "t2", "t4"]);
        assert_eq!(high.len() + low.len(), tides.len());
        assert!(high.iter().all(|t| t.kind == TideType::High));
        assert!(low.iter().all(|t| t.kind == TideType::Low));
        assert!(high.iter().all(|h| !low.contains(h)));
    }

    #[test]
    fn test_partition_drops_unknown_types() {
        let tides = vec![tide("t0", TideType::Other), tide("t1", TideType::High)];
        let (high, low) = partition_tides(&tides);
        assert_eq!(high.len(), 1);
        assert!(low.is_empty());
    }

    #[test]
    fn test_record_json_shape() {
        let records = build_records(
            &spot(),
            &[hour("t0", 1.0)],
            &[tide("t1", TideType::High)],
        );
        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["id"], "spot-1");
        assert_eq!(json["name"], "Test Reef");
        assert_eq!(json["coords"]["latitude"], 10.0);
        assert_eq!(json["waveHeight"]["sg"], 1.0);
        assert_eq!(json["highTide"][0]["type"], "high");
        assert!(json["lowTide"].as_array().unwrap().is_empty());
        assert!(json.get("gust").is_none());
    }
}
