use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;
use uuid::Uuid;

use super::SnapshotImportError;
use crate::accounting::domain::{
    AccountId, Plan, PlanId, ProductionCosts, Transfer, TransferType, MAX_PLAN_TIMEFRAME_DAYS,
};

pub(crate) fn parse_plans<R: Read>(reader: R) -> Result<Vec<Plan>, SnapshotImportError> {
    parse_rows::<R, PlanRow, Plan>(reader, PlanRow::into_plan)
}

pub(crate) fn parse_transfers<R: Read>(reader: R) -> Result<Vec<Transfer>, SnapshotImportError> {
    parse_rows::<R, TransferRow, Transfer>(reader, TransferRow::into_transfer)
}

fn parse_rows<R, Row, Out>(
    reader: R,
    convert: fn(Row) -> Result<Out, String>,
) -> Result<Vec<Out>, SnapshotImportError>
where
    R: Read,
    Row: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut parsed = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |position| position.line());
        let row: Row = record.deserialize(Some(&headers))?;
        let value = convert(row).map_err(|message| SnapshotImportError::InvalidRow { line, message })?;
        parsed.push(value);
    }

    Ok(parsed)
}

#[derive(Debug, Deserialize)]
struct PlanRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    approval_date: Option<String>,
    timeframe_days: u32,
    is_public_service: String,
    means_cost: String,
    resource_cost: String,
    labour_cost: String,
}

impl PlanRow {
    fn into_plan(self) -> Result<Plan, String> {
        let id = match self.id.as_deref() {
            Some(raw) => PlanId(
                Uuid::parse_str(raw).map_err(|err| format!("invalid plan id '{raw}': {err}"))?,
            ),
            None => PlanId::new(),
        };
        let approval_date = self
            .approval_date
            .as_deref()
            .map(|raw| parse_datetime(raw).ok_or_else(|| format!("invalid approval_date '{raw}'")))
            .transpose()?;
        if self.timeframe_days == 0 {
            return Err("timeframe_days must be positive".to_string());
        }
        if self.timeframe_days > MAX_PLAN_TIMEFRAME_DAYS {
            return Err(format!(
                "timeframe_days must not exceed {MAX_PLAN_TIMEFRAME_DAYS}, got {}",
                self.timeframe_days
            ));
        }

        Ok(Plan {
            id,
            name: self.name,
            approval_date,
            timeframe_days: self.timeframe_days,
            is_public_service: parse_flag(&self.is_public_service)?,
            production_costs: ProductionCosts {
                means_cost: parse_cost("means_cost", &self.means_cost)?,
                resource_cost: parse_cost("resource_cost", &self.resource_cost)?,
                labour_cost: parse_cost("labour_cost", &self.labour_cost)?,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct TransferRow {
    date: String,
    #[serde(rename = "type")]
    transfer_type: String,
    debit_account: String,
    credit_account: String,
    value: String,
}

impl TransferRow {
    fn into_transfer(self) -> Result<Transfer, String> {
        let date = parse_datetime(&self.date).ok_or_else(|| format!("invalid date '{}'", self.date))?;
        let transfer_type = TransferType::from_label(&self.transfer_type)
            .ok_or_else(|| format!("unknown transfer type '{}'", self.transfer_type))?;
        let value = parse_decimal(&self.value).ok_or_else(|| format!("invalid value '{}'", self.value))?;

        Ok(Transfer {
            date,
            debit_account: AccountId::new(self.debit_account),
            credit_account: AccountId::new(self.credit_account),
            value,
            transfer_type,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        other => Err(format!("invalid is_public_service flag '{other}'")),
    }
}

fn parse_cost(field: &str, value: &str) -> Result<Decimal, String> {
    match parse_decimal(value) {
        Some(cost) if cost >= Decimal::ZERO => Ok(cost),
        Some(cost) => Err(format!("{field} must not be negative, got {cost}")),
        None => Err(format!("invalid {field} '{value}'")),
    }
}

// Parsed from the literal text so fractional hours stay exact.
fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
pub(crate) fn parse_datetime_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_datetime(value)
}
