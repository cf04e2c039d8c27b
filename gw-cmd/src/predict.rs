//! Prediction API requests and the local prediction history.

use crate::{config::AppConfig, input::write_output};
use anyhow::Context;
use chrono::Utc;
use gw_wells::{
    history::{PredictionHistory, PredictionRecord},
    prediction::{PredictionClient, PredictionRequest},
};
use log::info;

/// Request a prediction and append it to the history log.
///
/// `endpoints`, when non-empty, replaces the configured endpoint list.
pub async fn run_predict(
    config: &AppConfig,
    latitude: f64,
    longitude: f64,
    date: &str,
    endpoints: Vec<String>,
) -> anyhow::Result<()> {
    let mut prediction_config = config.prediction.clone();
    if !endpoints.is_empty() {
        prediction_config.endpoints = endpoints;
    }
    let client = PredictionClient::new(prediction_config)?;
    let request = PredictionRequest::new(latitude, longitude, date);
    let response = client
        .predict(&request)
        .await
        .context("prediction request failed")?;

    let record = response.to_record(&request, Utc::now());
    append_history(config, record.clone())?;

    write_output(None, &serde_json::to_string_pretty(&record)?)
}

/// Report the first endpoint whose health check passes.
pub async fn run_health(config: &AppConfig, endpoints: Vec<String>) -> anyhow::Result<()> {
    let mut prediction_config = config.prediction.clone();
    if !endpoints.is_empty() {
        prediction_config.endpoints = endpoints;
    }
    let client = PredictionClient::new(prediction_config)?;
    match client.first_healthy_endpoint().await {
        Some(endpoint) => {
            println!("{endpoint}");
            Ok(())
        }
        None => anyhow::bail!(
            "none of {} prediction endpoints is healthy",
            client.endpoints().len()
        ),
    }
}

/// Add a record to the history file, evicting the oldest beyond capacity.
pub fn append_history(config: &AppConfig, record: PredictionRecord) -> anyhow::Result<()> {
    let path = &config.history.path;
    let mut history = PredictionHistory::load(path, config.history.capacity)
        .with_context(|| format!("loading history {}", path.display()))?;
    history.push(record);
    history
        .save(path)
        .with_context(|| format!("saving history {}", path.display()))?;
    info!("History now holds {} predictions", history.len());
    Ok(())
}

/// Print up to `limit` history records, newest first, or clear the log.
pub fn run_history(
    config: &AppConfig,
    limit: usize,
    clear: bool,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let path = &config.history.path;
    let mut history = PredictionHistory::load(path, config.history.capacity)
        .with_context(|| format!("loading history {}", path.display()))?;
    if clear {
        history.clear();
        history.save(path)?;
        info!("Cleared prediction history {}", path.display());
        return Ok(());
    }
    let recent: Vec<&PredictionRecord> = history.recent(limit).collect();
    write_output(output, &serde_json::to_string_pretty(&recent)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryConfig;
    use serde_json::Value;

    fn config_in(dir: &tempfile::TempDir, capacity: usize) -> AppConfig {
        AppConfig {
            history: HistoryConfig {
                path: dir.path().join("history.json"),
                capacity,
            },
            ..AppConfig::default()
        }
    }

    fn record(prediction: f64) -> PredictionRecord {
        PredictionRecord {
            latitude: 12.9716,
            longitude: 77.5946,
            date: "2025-06-01".to_string(),
            prediction,
            confidence: None,
            units: None,
            requested_at: Utc::now(),
        }
    }

    #[test]
    fn test_append_history_respects_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 2);
        for i in 0..3 {
            append_history(&config, record(i as f64)).unwrap();
        }
        let history = PredictionHistory::load(&config.history.path, 10).unwrap();
        let kept: Vec<f64> = history.iter().map(|r| r.prediction).collect();
        assert_eq!(kept, vec![1.0, 2.0]);
    }

    #[test]
    fn test_run_history_newest_first_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 10);
        for i in 0..4 {
            append_history(&config, record(i as f64)).unwrap();
        }
        let output = dir.path().join("recent.json");
        run_history(&config, 2, false, Some(output.to_str().unwrap())).unwrap();
        let value: Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let predictions: Vec<f64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["prediction"].as_f64().unwrap())
            .collect();
        assert_eq!(predictions, vec![3.0, 2.0]);

        run_history(&config, 2, true, None).unwrap();
        let history = PredictionHistory::load(&config.history.path, 10).unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_run_predict_rejects_invalid_request() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 10);
        let result = run_predict(&config, 95.0, 0.0, "2025-06-01", Vec::new()).await;
        assert!(result.is_err());
        assert!(!config.history.path.exists());
    }

    #[tokio::test]
    async fn test_run_health_fails_without_server() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, 10);
        let endpoints = vec!["http://127.0.0.1:9".to_string()];
        assert!(run_health(&config, endpoints).await.is_err());
    }
}
