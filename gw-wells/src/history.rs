//! Bounded log of past predictions.
//!
//! Records are kept oldest first. Once the log holds `capacity` records,
//! each new one evicts the oldest.

use crate::error::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Default number of predictions kept on disk.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// One prediction as shown in the history screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Requested date, "YYYY-MM-DD".
    pub date: String,
    /// Predicted depth to water level.
    pub prediction: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
    pub requested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionHistory {
    capacity: usize,
    records: VecDeque<PredictionRecord>,
}

impl Default for PredictionHistory {
    fn default() -> Self {
        PredictionHistory::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl PredictionHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        PredictionHistory {
            capacity,
            records: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record, evicting the oldest ones beyond capacity.
    pub fn push(&mut self, record: PredictionRecord) {
        self.records.push_back(record);
        self.evict();
    }

    /// Up to `limit` records, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &PredictionRecord> {
        self.records.iter().rev().take(limit)
    }

    /// All records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &PredictionRecord> {
        self.records.iter()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Read a history file. A missing file is an empty history; a file with
    /// more than `capacity` records keeps only the newest ones.
    pub fn load(path: &Path, capacity: usize) -> Result<Self> {
        let mut history = PredictionHistory::with_capacity(capacity);
        if !path.exists() {
            debug!("no prediction history at {}", path.display());
            return Ok(history);
        }
        let body = std::fs::read_to_string(path)?;
        let records: Vec<PredictionRecord> = serde_json::from_str(&body)?;
        history.records.extend(records);
        history.evict();
        Ok(history)
    }

    /// Write the history as a JSON array, oldest first.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&self.records)?;
        std::fs::write(path, body)?;
        Ok(())
    }

    fn evict(&mut self) {
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(prediction: f64) -> PredictionRecord {
        PredictionRecord {
            latitude: 12.9716,
            longitude: 77.5946,
            date: "2025-06-01".to_string(),
            prediction,
            confidence: Some(0.8),
            units: Some("meters below ground level".to_string()),
            requested_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_push_evicts_oldest_beyond_capacity() {
        let mut history = PredictionHistory::with_capacity(3);
        for i in 0..5 {
            history.push(record(i as f64));
        }
        assert_eq!(history.len(), 3);
        let kept: Vec<f64> = history.iter().map(|r| r.prediction).collect();
        assert_eq!(kept, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_huge_capacity_allocates_lazily() {
        let mut history = PredictionHistory::with_capacity(usize::MAX);
        history.push(record(1.0));
        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), usize::MAX);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut history = PredictionHistory::default();
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
        for i in 0..4 {
            history.push(record(i as f64));
        }
        let recent: Vec<f64> = history.recent(2).map(|r| r.prediction).collect();
        assert_eq!(recent, vec![3.0, 2.0]);
        assert_eq!(history.recent(10).count(), 4);
    }

    #[test]
    fn test_default_capacity_is_one_hundred() {
        let mut history = PredictionHistory::default();
        for i in 0..150 {
            history.push(record(i as f64));
        }
        assert_eq!(history.len(), 100);
        assert_eq!(history.iter().next().unwrap().prediction, 50.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");
        let mut history = PredictionHistory::with_capacity(10);
        history.push(record(1.5));
        history.push(record(2.5));
        history.save(&path).unwrap();

        let loaded = PredictionHistory::load(&path, 10).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn test_load_trims_to_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let mut history = PredictionHistory::with_capacity(10);
        for i in 0..6 {
            history.push(record(i as f64));
        }
        history.save(&path).unwrap();

        let loaded = PredictionHistory::load(&path, 2).unwrap();
        let kept: Vec<f64> = loaded.iter().map(|r| r.prediction).collect();
        assert_eq!(kept, vec![4.0, 5.0]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PredictionHistory::load(&dir.path().join("absent.json"), 5).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.capacity(), 5);
    }

    #[test]
    fn test_load_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[{").unwrap();
        assert!(PredictionHistory::load(&path, 5).is_err());
    }

    #[test]
    fn test_clear() {
        let mut history = PredictionHistory::with_capacity(3);
        history.push(record(1.0));
        history.clear();
        assert!(history.is_empty());
    }
}
