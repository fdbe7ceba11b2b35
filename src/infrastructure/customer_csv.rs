//! Batch input: one customer per CSV row.
//!
//! Expected headers are `customer_id` plus the six feature names; extra columns
//! are ignored. A bad cell only invalidates its own row.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

use crate::application::AssessmentService;
use crate::domain::assessment::BatchEntry;
use crate::domain::customer::{CustomerFeatures, CustomerRecord, FeatureField};
use crate::domain::errors::ScoringError;

/// A parsed row: the id is always known, the features may be invalid
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub customer_id: String,
    pub features: Result<CustomerFeatures, ScoringError>,
}

pub fn read_customers_file(path: &Path) -> Result<Vec<CustomerRow>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open customer file {:?}", path))?;
    let rows = read_customers(BufReader::new(file))?;
    info!("Loaded {} customer rows from {:?}", rows.len(), path);
    Ok(rows)
}

pub fn read_customers<R: Read>(reader: R) -> Result<Vec<CustomerRow>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize::<HashMap<String, String>>().enumerate() {
        let cells = result.with_context(|| format!("Malformed CSV record {}", index + 1))?;

        let customer_id = cells
            .get("customer_id")
            .filter(|id| !id.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("row-{}", index + 1));

        let features = parse_features(&cells);
        if let Err(e) = &features {
            warn!("Customer {} rejected: {}", customer_id, e);
        }
        rows.push(CustomerRow {
            customer_id,
            features,
        });
    }
    Ok(rows)
}

/// Scores valid rows in parallel and reports invalid ones as failures, keeping file order
pub fn assess_rows(service: &AssessmentService, rows: Vec<CustomerRow>) -> Vec<BatchEntry> {
    let mut records = Vec::new();
    let mut slots = Vec::with_capacity(rows.len());
    for row in rows {
        match row.features {
            Ok(features) => {
                slots.push(None);
                records.push(CustomerRecord::new(row.customer_id, features));
            }
            Err(e) => slots.push(Some(service.reject(row.customer_id, e))),
        }
    }

    let mut assessed = service.assess_batch(&records).into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| assessed.next()))
        .collect()
}

fn parse_features(cells: &HashMap<String, String>) -> Result<CustomerFeatures, ScoringError> {
    let read = |field: FeatureField| -> Result<f64, ScoringError> {
        match cells.get(field.name()).map(String::as_str) {
            None | Some("") => Err(ScoringError::validation(field.name(), "is required")),
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                ScoringError::validation(field.name(), format!("must be numeric, got '{}'", raw))
            }),
        }
    };

    let features = CustomerFeatures {
        tenure_months: read(FeatureField::TenureMonths)?,
        monthly_revenue: read(FeatureField::MonthlyRevenue)?,
        total_interactions: read(FeatureField::TotalInteractions)?,
        support_tickets: read(FeatureField::SupportTickets)?,
        last_login_days: read(FeatureField::LastLoginDays)?,
        feature_usage_score: read(FeatureField::FeatureUsageScore)?,
    };
    features.validate()?;
    Ok(features)
}
