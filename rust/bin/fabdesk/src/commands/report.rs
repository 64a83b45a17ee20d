//! Dashboard summaries.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use fabdesk_registry::{Registry, report};
use serde_json::Value;

use crate::output::{self, Format};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Report {
    Customers,
    Employees,
    Materials,
    Shipments,
    Projects,
    Processing,
    Costs,
}

pub fn summary(reg: &Registry, which: Report) -> Result<Value> {
    let value = match which {
        Report::Customers => serde_json::to_value(report::customer_summary(reg))?,
        Report::Employees => serde_json::to_value(report::employee_summary(reg))?,
        Report::Materials => serde_json::to_value(report::material_summary(reg))?,
        Report::Shipments => serde_json::to_value(report::shipment_summary(reg))?,
        Report::Projects => serde_json::to_value(report::project_summary(reg))?,
        Report::Processing => serde_json::to_value(report::processing_summary(reg))?,
        Report::Costs => serde_json::to_value(report::cost_summary(reg))?,
    };
    Ok(value)
}

pub fn show(out: &mut dyn Write, reg: &Registry, which: Report, format: Format) -> Result<()> {
    output::emit(out, format, &summary(reg, which)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabdesk_registry::Seed;

    #[test]
    fn every_report_renders() {
        let reg = Registry::in_memory(Seed::demo()).unwrap();
        for which in Report::value_variants() {
            let mut buf = Vec::new();
            show(&mut buf, &reg, *which, Format::Table).unwrap();
            assert!(!buf.is_empty(), "{:?}", which);
        }
    }

    #[test]
    fn customer_totals_in_json() {
        let reg = Registry::in_memory(Seed::demo()).unwrap();
        let v = summary(&reg, Report::Customers).unwrap();
        assert_eq!(v[0]["completedAmount"], 1_500_000.0);
        assert_eq!(v[1]["transactionCount"], 1);
    }

    #[test]
    fn cost_alerts_in_json() {
        let reg = Registry::in_memory(Seed::demo()).unwrap();
        let v = summary(&reg, Report::Costs).unwrap();
        assert_eq!(v["byKind"]["material"]["planned"], 200_000.0);
        assert_eq!(v["alerts"][0]["kind"], "material");
        assert_eq!(v["alerts"][1]["threshold"], 85);
    }
}
