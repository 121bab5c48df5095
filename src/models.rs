use crate::selection::SelectionSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Decimal(f64),
}

impl MetricValue {
    pub fn as_f64(self) -> f64 {
        match self {
            MetricValue::Integer(value) => value as f64,
            MetricValue::Decimal(value) => value,
        }
    }
}

/// One day's values, serialized flat so the chart can key series by metric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, MetricValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<DailyRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&DailyRecord> {
        self.records.last()
    }

    /// The day before `latest`, if the dataset spans more than one day.
    pub fn previous(&self) -> Option<&DailyRecord> {
        self.records.len().checked_sub(2).map(|index| &self.records[index])
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub metrics: Option<String>,
    pub toggle: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartPayload {
    pub data: Dataset,
    pub series_keys: Vec<String>,
    pub colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub id: String,
    pub name: String,
    pub color: String,
    pub value: String,
    pub change: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub project_id: String,
    pub title: String,
    pub generated_on: String,
    pub selection: SelectionSet,
    pub chart: ChartPayload,
    pub summary: Vec<SummaryCard>,
}
