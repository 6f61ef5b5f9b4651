//! Response decoding
//!
//! Turns raw response bodies into typed values. Shared by every gateway
//! implementation so the browser and native clients agree on the schema.

use serde::Deserialize;

use super::error::DecodeError;
use super::{DATA_PATH, REGIONS_PATH};
use crate::model::UsageRecord;

/// Wire shape of one `/api/data` element
#[derive(Debug, Deserialize)]
struct UsageRecordDto {
    region: String,
    datetime: String,
    usage_mw: f64,
}

impl From<UsageRecordDto> for UsageRecord {
    fn from(dto: UsageRecordDto) -> Self {
        UsageRecord {
            region: dto.region,
            timestamp: dto.datetime,
            usage_mw: dto.usage_mw,
        }
    }
}

/// Decode a `/api/regions` body: a JSON array of strings
pub fn decode_regions(body: &str) -> Result<Vec<String>, DecodeError> {
    serde_json::from_str::<Vec<String>>(body)
        .map_err(|e| DecodeError::new(REGIONS_PATH, e.to_string()))
}

/// Decode a `/api/data` body: a JSON array of `{region, datetime, usage_mw}`
pub fn decode_usage(body: &str) -> Result<Vec<UsageRecord>, DecodeError> {
    let records: Vec<UsageRecordDto> = serde_json::from_str(body)
        .map_err(|e| DecodeError::new(DATA_PATH, e.to_string()))?;
    Ok(records.into_iter().map(UsageRecord::from).collect())
}
