// src/models/mod.rs

use serde::Serialize;
use sqlx::FromRow;

// ───────────────────────────────────────
// Rows read from the reporting database
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Attribute {
    pub name: String,
}

/// One (teacher, attribute) group with the number of students in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AggregationRow {
    pub teacher_name: String,
    pub count: i64,
    pub attribute: String,
}

impl AggregationRow {
    pub fn new(teacher_name: impl Into<String>, count: i64, attribute: impl Into<String>) -> Self {
        Self {
            teacher_name: teacher_name.into(),
            count,
            attribute: attribute.into(),
        }
    }
}

// ───────────────────────────────────────
// Chart matrix
// ───────────────────────────────────────

/// A single matrix cell: a label (header / teacher name) or a student count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ChartCell {
    Label(String),
    Count(i64),
}

impl From<&str> for ChartCell {
    fn from(s: &str) -> Self {
        ChartCell::Label(s.to_string())
    }
}

impl From<String> for ChartCell {
    fn from(s: String) -> Self {
        ChartCell::Label(s)
    }
}

impl From<i64> for ChartCell {
    fn from(n: i64) -> Self {
        ChartCell::Count(n)
    }
}

pub type ChartMatrix = Vec<Vec<ChartCell>>;

// ───────────────────────────────────────
// DTOs for endpoints
// ───────────────────────────────────────
#[derive(Debug, Serialize)]
pub struct AttributeList {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub chart_type: String,
    pub data: ChartMatrix,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: String,
    pub chart_area: ChartArea,
    pub h_axis: HAxis,
    pub v_axis: VAxis,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArea { pub width: String }

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HAxis { pub min_value: i64 }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VAxis { pub title: String }

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend { pub position: String }

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: "Attribute Distribution for All Teachers".into(),
            chart_area: ChartArea { width: "80%".into() },
            h_axis: HAxis { min_value: 0 },
            v_axis: VAxis { title: "Number of Students".into() },
            legend: Legend { position: "bottom".into() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_options_serialize_with_camel_case_keys() {
        let v = serde_json::to_value(ChartOptions::default()).expect("serialize");
        assert_eq!(v["chartArea"]["width"], "80%");
        assert_eq!(v["hAxis"]["minValue"], 0);
        assert_eq!(v["vAxis"]["title"], "Number of Students");
        assert_eq!(v["legend"]["position"], "bottom");
    }

    #[test]
    fn cells_serialize_as_bare_json_values() {
        let row: Vec<ChartCell> = vec!["Einstein".into(), 3i64.into()];
        assert_eq!(serde_json::to_string(&row).expect("serialize"), r#"["Einstein",3]"#);
    }
}
