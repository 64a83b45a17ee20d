//! Dashboard aggregates computed from store snapshots.
//!
//! All figures are raw `f64`/counts; rounding is left to the front end.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::*;
use crate::service::Registry;

fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values.into_iter().fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 * 100.0 / whole as f64 }
}

// ── Customers ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub customer_id: u64,
    pub name: String,
    pub transaction_count: usize,
    pub completed_amount: f64,
    pub pending_amount: f64,
}

/// Per customer: completed and pending transaction totals.
pub fn customer_summary(reg: &Registry) -> Vec<CustomerSummary> {
    reg.list::<Customer>()
        .iter()
        .map(|c| {
            let mine: Vec<&Transaction> = reg
                .list::<Transaction>()
                .iter()
                .filter(|t| t.customer_id == c.id)
                .collect();
            let total = |status: TransactionStatus| {
                mine.iter()
                    .filter(|t| t.status == status)
                    .map(|t| t.amount)
                    .sum::<f64>()
            };
            CustomerSummary {
                customer_id: c.id,
                name: c.name.clone(),
                transaction_count: mine.len(),
                completed_amount: total(TransactionStatus::Completed),
                pending_amount: total(TransactionStatus::Pending),
            }
        })
        .collect()
}

// ── Employees ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub headcount: usize,
    pub salary_total: f64,
    /// Share of total headcount, percent.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBand {
    pub from: f64,
    /// Exclusive, except for the top band.
    pub to: f64,
    pub headcount: usize,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub headcount: usize,
    pub active: usize,
    /// Active share of headcount, percent.
    pub active_rate: f64,
    pub average_salary: f64,
    pub departments: BTreeMap<String, DepartmentSummary>,
    pub salary_bands: Vec<SalaryBand>,
}

const SALARY_BANDS: &[(f64, f64)] = &[(4000.0, 6000.0), (6000.0, 8000.0), (8000.0, 10000.0)];

pub fn employee_summary(reg: &Registry) -> EmployeeSummary {
    let all = reg.list::<Employee>();
    let headcount = all.len();
    let active = all.iter().filter(|e| e.status == ActiveStatus::Active).count();

    let mut departments: BTreeMap<String, DepartmentSummary> = BTreeMap::new();
    for e in all {
        let d = departments
            .entry(e.department.clone())
            .or_insert(DepartmentSummary {
                headcount: 0,
                salary_total: 0.0,
                share: 0.0,
            });
        d.headcount += 1;
        d.salary_total += e.salary;
    }
    for d in departments.values_mut() {
        d.share = percent(d.headcount, headcount);
    }

    let last = SALARY_BANDS.len() - 1;
    let salary_bands = SALARY_BANDS
        .iter()
        .enumerate()
        .map(|(i, &(from, to))| {
            let n = all
                .iter()
                .filter(|e| e.salary >= from && (e.salary < to || (i == last && e.salary == to)))
                .count();
            SalaryBand {
                from,
                to,
                headcount: n,
                share: percent(n, headcount),
            }
        })
        .collect();

    EmployeeSummary {
        headcount,
        active,
        active_rate: percent(active, headcount),
        average_salary: mean(all.iter().map(|e| e.salary)),
        departments,
        salary_bands,
    }
}

// ── Materials ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialTypeSummary {
    pub material_type: MaterialType,
    pub count: usize,
    pub average_price: f64,
}

/// Count and average unit price per material type, in catalogue order.
pub fn material_summary(reg: &Registry) -> Vec<MaterialTypeSummary> {
    let all = reg.list::<Material>();
    [
        MaterialType::Profile,
        MaterialType::Glass,
        MaterialType::Hardware,
        MaterialType::Auxiliary,
    ]
    .into_iter()
    .map(|ty| {
        let prices: Vec<f64> = all
            .iter()
            .filter(|m| m.material_type == ty)
            .map(|m| m.price)
            .collect();
        MaterialTypeSummary {
            material_type: ty,
            count: prices.len(),
            average_price: mean(prices),
        }
    })
    .collect()
}

// ── Shipments ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentSummary {
    pub by_status: BTreeMap<String, usize>,
    /// Quantity of shipments that left the yard (shipped or delivered).
    pub shipped_quantity: f64,
}

pub fn shipment_summary(reg: &Registry) -> ShipmentSummary {
    let mut by_status: BTreeMap<String, usize> =
        ShipmentStatus::ALL.iter().map(|s| (s.to_string(), 0)).collect();
    let mut shipped_quantity = 0.0;
    for s in reg.list::<Shipment>() {
        *by_status.entry(s.status.to_string()).or_default() += 1;
        if s.status != ShipmentStatus::Pending {
            shipped_quantity += s.total_quantity;
        }
    }
    ShipmentSummary {
        by_status,
        shipped_quantity,
    }
}

// ── Projects ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub project_id: u64,
    pub name: String,
    pub progress: u8,
    /// Mean progress of the project's schedule tasks; `None` without tasks.
    pub schedule_progress: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub count: usize,
    pub contract_total: f64,
    pub average_progress: f64,
    pub by_status: BTreeMap<String, usize>,
    pub projects: Vec<ProjectProgress>,
}

pub fn project_summary(reg: &Registry) -> ProjectSummary {
    let all = reg.list::<Project>();
    let tasks = reg.list::<ScheduleTask>();

    let mut by_status: BTreeMap<String, usize> =
        ProjectStatus::ALL.iter().map(|s| (s.to_string(), 0)).collect();
    for p in all {
        *by_status.entry(p.status.to_string()).or_default() += 1;
    }

    let projects = all
        .iter()
        .map(|p| {
            let mine: Vec<f64> = tasks
                .iter()
                .filter(|t| t.project_id == p.id)
                .map(|t| f64::from(t.progress))
                .collect();
            ProjectProgress {
                project_id: p.id,
                name: p.name.clone(),
                progress: p.progress,
                schedule_progress: (!mine.is_empty()).then(|| mean(mine)),
            }
        })
        .collect();

    ProjectSummary {
        count: all.len(),
        contract_total: all.iter().map(|p| p.contract_amount).sum(),
        average_progress: mean(all.iter().map(|p| f64::from(p.progress))),
        by_status,
        projects,
    }
}

// ── Processing ──────────────────────────────────────────────────────

/// Total processed quantity per workshop category (every category listed).
pub fn processing_summary(reg: &Registry) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> =
        ProcessingCategory::ALL.iter().map(|c| (c.to_string(), 0.0)).collect();
    for r in reg.list::<ProcessingRecord>() {
        *totals.entry(r.category.to_string()).or_default() += r.quantity;
    }
    totals
}

// ── Costs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUsage {
    pub planned: f64,
    pub actual: f64,
    /// Actual as a percentage of planned; 0 without a plan.
    pub usage: f64,
}

impl BudgetUsage {
    fn of<'a>(records: impl IntoIterator<Item = &'a CostRecord>) -> Self {
        let (planned, actual) = records
            .into_iter()
            .fold((0.0, 0.0), |(p, a), r| (p + r.planned_cost, a + r.actual_cost));
        let usage = if planned > 0.0 { actual * 100.0 / planned } else { 0.0 };
        BudgetUsage { planned, actual, usage }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostAlert {
    pub rule_id: u64,
    pub name: String,
    pub kind: CostKind,
    pub threshold: u8,
    pub usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub by_kind: BTreeMap<String, BudgetUsage>,
    pub total: BudgetUsage,
    /// Ids of cost lines whose actual spend is above plan.
    pub overruns: Vec<u64>,
    /// Active rules whose budget usage is past the threshold.
    pub alerts: Vec<CostAlert>,
}

/// Planned against actual spend per cost kind, and the alert rules that fire.
pub fn cost_summary(reg: &Registry) -> CostSummary {
    let all = reg.list::<CostRecord>();
    let by_kind: BTreeMap<String, BudgetUsage> = [CostKind::Labor, CostKind::Material]
        .into_iter()
        .map(|kind| {
            let usage = BudgetUsage::of(all.iter().filter(|r| r.kind == kind));
            (kind.to_string(), usage)
        })
        .collect();

    let alerts = reg
        .list::<AlertRule>()
        .iter()
        .filter(|rule| rule.status == ActiveStatus::Active)
        .filter_map(|rule| {
            let usage = by_kind.get(rule.kind.as_str())?.usage;
            (usage > f64::from(rule.threshold)).then(|| CostAlert {
                rule_id: rule.id,
                name: rule.name.clone(),
                kind: rule.kind,
                threshold: rule.threshold,
                usage,
            })
        })
        .collect();

    CostSummary {
        total: BudgetUsage::of(all),
        overruns: all
            .iter()
            .filter(|r| r.actual_cost > r.planned_cost)
            .map(|r| r.id)
            .collect(),
        by_kind,
        alerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;

    fn demo() -> Registry {
        Registry::in_memory(Seed::demo()).unwrap()
    }

    #[test]
    fn customers() {
        let rows = customer_summary(&demo());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].transaction_count, 2);
        assert_eq!(rows[0].completed_amount, 1_500_000.0);
        assert_eq!(rows[0].pending_amount, 800_000.0);
        assert_eq!(rows[1].completed_amount, 2_000_000.0);
    }

    #[test]
    fn employees() {
        let s = employee_summary(&demo());
        assert_eq!(s.headcount, 4);
        assert_eq!(s.active, 3);
        assert_eq!(s.active_rate, 75.0);
        assert_eq!(s.average_salary, 7250.0);
        assert_eq!(s.departments["工程部"].headcount, 2);
        assert_eq!(s.departments["工程部"].salary_total, 15000.0);
        assert_eq!(s.departments["生产部"].share, 50.0);
        let bands: Vec<usize> = s.salary_bands.iter().map(|b| b.headcount).collect();
        assert_eq!(bands, vec![0, 3, 1]);
    }

    #[test]
    fn empty_registry_has_no_nans() {
        let reg = Registry::in_memory(Seed::default()).unwrap();
        let s = employee_summary(&reg);
        assert_eq!(s.average_salary, 0.0);
        assert_eq!(s.active_rate, 0.0);
        assert_eq!(project_summary(&reg).average_progress, 0.0);
        assert!(material_summary(&reg).iter().all(|m| m.average_price == 0.0));
    }

    #[test]
    fn materials_and_processing() {
        let reg = demo();
        let m = material_summary(&reg);
        assert_eq!(m[0].material_type, MaterialType::Profile);
        assert_eq!(m[0].count, 1);
        assert_eq!(m[0].average_price, 45.5);

        let p = processing_summary(&reg);
        assert_eq!(p["cutting"], 100.0);
        assert_eq!(p["welding"], 0.0);
        assert_eq!(p.len(), 6);
    }

    #[test]
    fn shipments_and_projects() {
        let reg = demo();
        let s = shipment_summary(&reg);
        assert_eq!(s.by_status["shipped"], 1);
        assert_eq!(s.by_status["pending"], 0);
        assert_eq!(s.shipped_quantity, 100.0);

        let p = project_summary(&reg);
        assert_eq!(p.count, 1);
        assert_eq!(p.contract_total, 2_000_000.0);
        assert_eq!(p.by_status["in_progress"], 1);
        assert_eq!(p.projects[0].schedule_progress, Some(18.75));
    }

    #[test]
    fn costs_and_alerts() {
        let mut reg = demo();
        let c = cost_summary(&reg);
        assert_eq!(c.by_kind["labor"].planned, 50_000.0);
        assert_eq!(c.by_kind["labor"].usage, 96.0);
        assert_eq!(c.by_kind["material"].actual, 178_000.0);
        assert_eq!(c.by_kind["material"].usage, 89.0);
        assert_eq!(c.total.planned, 250_000.0);
        assert!(c.overruns.is_empty());
        let fired: Vec<u64> = c.alerts.iter().map(|a| a.rule_id).collect();
        assert_eq!(fired, vec![1, 2]);

        let patch = serde_json::json!({"threshold": "100"});
        reg.update::<AlertRule>(2, patch.as_object().unwrap()).unwrap();
        let patch = serde_json::json!({"status": "inactive"});
        reg.update::<AlertRule>(1, patch.as_object().unwrap()).unwrap();
        let patch = serde_json::json!({"actualCost": "55000"});
        reg.update::<CostRecord>(1, patch.as_object().unwrap()).unwrap();

        let c = cost_summary(&reg);
        assert_eq!(c.overruns, vec![1]);
        assert_eq!(c.by_kind["labor"].usage, 110.0);
        let fired: Vec<u64> = c.alerts.iter().map(|a| a.rule_id).collect();
        assert_eq!(fired, vec![2]);
    }

    #[test]
    fn costs_without_plan_have_zero_usage() {
        let reg = Registry::in_memory(Seed::default()).unwrap();
        let c = cost_summary(&reg);
        assert_eq!(c.total.usage, 0.0);
        assert_eq!(c.by_kind.len(), 2);
        assert!(c.alerts.is_empty());
    }
}
