//! Daycare feeding fees
//!
//! Each feeding log is billed per day: a base boarding rate plus an
//! add-on for the feeding plan.

use crate::types::{FeedingLog, FeedingPlan};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    #[error("fee for {num_days} day(s) starting {start_date} overflows")]
    Overflow { start_date: NaiveDate, num_days: u32 },
}

/// Per-day prices, configurable in the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    pub base_per_day: u64,
    pub once: u64,
    pub twice: u64,
    pub thrice: u64,
    pub currency: String,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            base_per_day: 350,
            once: 85,
            twice: 170,
            thrice: 255,
            currency: "₱".to_string(),
        }
    }
}

impl FeeSchedule {
    /// Daily add-on for a feeding plan
    pub fn addon(&self, plan: FeedingPlan) -> u64 {
        match plan {
            FeedingPlan::None => 0,
            FeedingPlan::Once => self.once,
            FeedingPlan::Twice => self.twice,
            FeedingPlan::Thrice => self.thrice,
        }
    }

    /// Total fee for one log: days x (base + add-on)
    pub fn fee(&self, log: &FeedingLog) -> Result<u64, BillingError> {
        self.base_per_day
            .checked_add(self.addon(log.plan))
            .and_then(|daily| daily.checked_mul(u64::from(log.num_days)))
            .ok_or(BillingError::Overflow {
                start_date: log.start_date,
                num_days: log.num_days,
            })
    }

    /// Format an amount with the currency symbol
    pub fn money(&self, amount: u64) -> String {
        format!("{}{}", self.currency, amount)
    }
}

/// One billed feeding log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceLine {
    pub start_date: NaiveDate,
    pub num_days: u32,
    pub plan: FeedingPlan,
    pub base: u64,
    pub addon: u64,
    pub fee: u64,
}

/// Feeding invoice for a pet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invoice {
    pub lines: Vec<InvoiceLine>,
    pub total: u64,
}

impl Invoice {
    pub fn build(schedule: &FeeSchedule, logs: &[FeedingLog]) -> Result<Self, BillingError> {
        let mut invoice = Invoice::default();

        for log in logs {
            let fee = schedule.fee(log)?;
            invoice.total = invoice
                .total
                .checked_add(fee)
                .ok_or(BillingError::Overflow {
                    start_date: log.start_date,
                    num_days: log.num_days,
                })?;
            invoice.lines.push(InvoiceLine {
                start_date: log.start_date,
                num_days: log.num_days,
                plan: log.plan,
                base: schedule.base_per_day,
                addon: schedule.addon(log.plan),
                fee,
            });
        }

        Ok(invoice)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Receipt text, one entry per line plus the total
    pub fn receipt(&self, schedule: &FeeSchedule) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() * 2 + 1);
        for line in &self.lines {
            out.push(format!(
                "{} | {} day(s) | Plan: {}",
                line.start_date,
                line.num_days,
                line.plan.label()
            ));
            out.push(line.breakdown(schedule));
        }
        out.push(format!(
            "TOTAL FEEDING INVOICE: {}",
            schedule.money(self.total)
        ));
        out
    }
}

impl InvoiceLine {
    pub fn breakdown(&self, schedule: &FeeSchedule) -> String {
        format!(
            "Breakdown: {} x ({} base + {} feeding) = {}",
            self.num_days,
            schedule.money(self.base),
            schedule.money(self.addon),
            schedule.money(self.fee)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(num_days: u32, plan: FeedingPlan) -> FeedingLog {
        FeedingLog {
            id: None,
            pet_id: 1,
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            num_days,
            plan,
        }
    }

    #[test]
    fn test_fee_per_plan() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.fee(&log(3, FeedingPlan::Twice)), Ok(1560));
        assert_eq!(fees.fee(&log(1, FeedingPlan::Once)), Ok(435));
        assert_eq!(fees.fee(&log(2, FeedingPlan::Thrice)), Ok(1210));
        assert_eq!(fees.fee(&log(4, FeedingPlan::None)), Ok(1400));
        assert_eq!(fees.fee(&log(0, FeedingPlan::Thrice)), Ok(0));
    }

    #[test]
    fn test_fee_overflow() {
        let fees = FeeSchedule {
            base_per_day: u64::MAX,
            ..FeeSchedule::default()
        };
        assert!(matches!(
            fees.fee(&log(2, FeedingPlan::None)),
            Err(BillingError::Overflow { num_days: 2, .. })
        ));
    }

    #[test]
    fn test_invoice_total_and_receipt() {
        let fees = FeeSchedule::default();
        let invoice = Invoice::build(
            &fees,
            &[log(3, FeedingPlan::Twice), log(1, FeedingPlan::Once)],
        )
        .unwrap();

        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.total, 1995);

        let receipt = invoice.receipt(&fees);
        assert_eq!(receipt[0], "2024-03-15 | 3 day(s) | Plan: Twice");
        assert_eq!(
            receipt[1],
            "Breakdown: 3 x (₱350 base + ₱170 feeding) = ₱1560"
        );
        assert_eq!(receipt.last().unwrap(), "TOTAL FEEDING INVOICE: ₱1995");
    }

    #[test]
    fn test_empty_invoice() {
        let invoice = Invoice::build(&FeeSchedule::default(), &[]).unwrap();
        assert!(invoice.is_empty());
        assert_eq!(invoice.total, 0);
    }
}
