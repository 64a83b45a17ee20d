//! Initial records handed to the stores on the very first run.

use crate::model::*;

/// Seed collections, one per store. `Seed::default()` is all-empty.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub customers: Vec<Customer>,
    pub suppliers: Vec<Supplier>,
    pub material_prices: Vec<MaterialPrice>,
    pub materials: Vec<Material>,
    pub transactions: Vec<Transaction>,
    pub shipments: Vec<Shipment>,
    pub processing_records: Vec<ProcessingRecord>,
    pub logistics: Vec<LogisticsRecord>,
    pub employees: Vec<Employee>,
    pub projects: Vec<Project>,
    pub schedule_tasks: Vec<ScheduleTask>,
    pub cost_records: Vec<CostRecord>,
    pub alert_rules: Vec<AlertRule>,
}

fn s(v: &str) -> String {
    v.to_string()
}

impl Seed {
    /// The demo data set a fresh install starts with.
    pub fn demo() -> Self {
        let jan15 = "2024-01-15";
        let feb01 = "2024-02-01";

        let customers = vec![
            Customer {
                id: 1,
                name: s("华润置地"),
                contact_person: s("张经理"),
                phone: s("13800138000"),
                email: s("zhangsan@huarun.com"),
                address: s("北京市朝阳区"),
                status: ActiveStatus::Active,
                created_at: s(jan15),
                updated_at: s(jan15),
            },
            Customer {
                id: 2,
                name: s("万科集团"),
                contact_person: s("李总"),
                phone: s("13900139000"),
                email: s("lisi@vanke.com"),
                address: s("深圳市南山区"),
                status: ActiveStatus::Active,
                created_at: s(feb01),
                updated_at: s(feb01),
            },
        ];

        let suppliers = vec![
            Supplier {
                id: 1,
                name: s("上海玻璃制品有限公司"),
                contact_person: s("王经理"),
                phone: s("13811111111"),
                email: s("wang@glass.com"),
                address: s("上海市浦东新区"),
                business_license: s("91310000123456789X"),
                tax_number: s("91310000123456789X"),
                status: ActiveStatus::Active,
                created_at: s(jan15),
                updated_at: s(jan15),
            },
            Supplier {
                id: 2,
                name: s("广州铝材有限公司"),
                contact_person: s("陈总"),
                phone: s("13922222222"),
                email: s("chen@alu.com"),
                address: s("广州市番禺区"),
                business_license: s("91440000987654321X"),
                tax_number: s("91440000987654321X"),
                status: ActiveStatus::Active,
                created_at: s(feb01),
                updated_at: s(feb01),
            },
        ];

        let price = |id, supplier_id, name: &str, spec: &str, unit: &str, price, from: &str, remark: &str| {
            MaterialPrice {
                id,
                supplier_id,
                material_name: s(name),
                specification: s(spec),
                unit: s(unit),
                price,
                effective_date: s(from),
                expiry_date: s("2024-12-31"),
                remark: s(remark),
                created_at: s(from),
                updated_at: s(from),
            }
        };
        let material_prices = vec![
            price(1, 1, "钢化玻璃", "10mm厚", "平方米", 280.0, jan15, "包含运输费用"),
            price(2, 1, "中空玻璃", "6+12A+6mm", "平方米", 320.0, jan15, "包含安装费用"),
            price(3, 2, "铝合金型材", "100系列", "米", 85.0, feb01, "不含表面处理"),
        ];

        let material = |id, name: &str, ty, spec: &str, unit: &str, price, supplier_id, desc: &str| Material {
            id,
            name: s(name),
            material_type: ty,
            specification: s(spec),
            unit: s(unit),
            price,
            supplier_id,
            image_url: None,
            description: s(desc),
            created_at: s(jan15),
            updated_at: s(jan15),
        };
        let materials = vec![
            material(1, "铝合金型材", MaterialType::Profile, "100mm*50mm", "米", 45.5, 2, "高品质铝合金型材"),
            material(2, "钢化玻璃", MaterialType::Glass, "1000mm*2000mm", "平方米", 180.0, 1, "高强度钢化玻璃"),
            material(3, "门窗五金件", MaterialType::Hardware, "标准型号", "套", 120.0, 2, "优质门窗配件"),
            material(4, "密封胶条", MaterialType::Auxiliary, "10mm", "米", 8.5, 2, "防水密封胶条"),
        ];

        let transaction = |id, customer_id, order: &str, amount, date: &str, status, desc: &str| Transaction {
            id,
            customer_id,
            order_number: s(order),
            amount,
            date: s(date),
            status,
            description: s(desc),
            created_at: s(date),
            updated_at: s(date),
        };
        let transactions = vec![
            transaction(1, 1, "DD20240115001", 1_500_000.0, jan15, TransactionStatus::Completed, "幕墙工程项目"),
            transaction(2, 1, "DD20240120002", 800_000.0, "2024-01-20", TransactionStatus::Pending, "门窗安装项目"),
            transaction(3, 2, "DD20240201001", 2_000_000.0, feb01, TransactionStatus::Completed, "玻璃幕墙工程"),
        ];

        let shipments = vec![Shipment {
            id: 1,
            order_number: s("CK20240115001"),
            customer_id: 1,
            items: vec![ShipmentItem {
                material_id: 1,
                quantity: 100.0,
                unit: s("米"),
            }],
            total_quantity: 100.0,
            status: ShipmentStatus::Shipped,
            tracking_number: s("SF1234567890"),
            delivery_address: s("北京市朝阳区"),
            contact_person: s("张经理"),
            contact_phone: s("13800138000"),
            created_at: s(jan15),
            updated_at: s(jan15),
        }];

        let processing_records = vec![ProcessingRecord {
            id: 1,
            material_id: 1,
            material_name: s("铝合金型材"),
            category: ProcessingCategory::Cutting,
            quantity: 100.0,
            unit: s("米"),
            processing_date: s("2024-03-25"),
            operator: s("张三"),
            remarks: String::new(),
            status: ProcessingStatus::Completed,
            created_at: s("2024-03-25"),
            updated_at: s("2024-03-25"),
        }];

        let logistics = vec![LogisticsRecord {
            id: 1,
            order_number: s("ORD001"),
            destination: s("上海"),
            estimated_delivery: s("2024-03-20"),
            actual_delivery: None,
            status: LogisticsStatus::InTransit,
            created_at: s("2024-03-10"),
            updated_at: s("2024-03-10"),
        }];

        let employee = |id, name: &str, dept: &str, position: &str, phone: &str, email: &str, salary, hired: &str, status| {
            Employee {
                id,
                name: s(name),
                position: s(position),
                department: s(dept),
                phone: s(phone),
                email: s(email),
                salary,
                hire_date: s(hired),
                status,
                created_at: s(hired),
                updated_at: s(hired),
            }
        };
        let employees = vec![
            employee(1, "张三", "工程部", "施工员", "13800138000", "zhangsan@company.com", 8000.0, "2023-01-15", ActiveStatus::Active),
            employee(2, "李四", "生产部", "技术员", "13800138001", "lisi@company.com", 7500.0, "2023-03-20", ActiveStatus::Active),
            employee(3, "王五", "工程部", "安全员", "13800138002", "wangwu@company.com", 7000.0, "2023-06-10", ActiveStatus::Active),
            employee(4, "赵六", "生产部", "质检员", "13800138003", "zhaoliu@company.com", 6500.0, "2022-09-01", ActiveStatus::Inactive),
        ];

        let projects = vec![Project {
            id: 1,
            name: s("某大厦幕墙工程"),
            customer_id: 1,
            contract_amount: 2_000_000.0,
            start_date: s("2024-03-01"),
            end_date: s("2024-06-30"),
            progress: 35,
            status: ProjectStatus::InProgress,
            created_at: s("2024-03-01"),
            updated_at: s("2024-03-01"),
        }];

        let task = |id, name: &str, start: &str, end: &str, progress| ScheduleTask {
            id,
            project_id: 1,
            name: s(name),
            start: s(start),
            end: s(end),
            progress,
            created_at: s("2024-03-01"),
            updated_at: s("2024-03-01"),
        };
        let schedule_tasks = vec![
            task(1, "前期准备", "2024-03-01", "2024-03-15", 45),
            task(2, "材料采购", "2024-03-10", "2024-04-10", 30),
            task(3, "施工安装", "2024-04-01", "2024-05-15", 0),
            task(4, "验收交付", "2024-05-15", "2024-05-30", 0),
        ];

        let cost = |id, kind, category: &str, description: &str, planned, actual, date: &str, supplier_id| {
            CostRecord {
                id,
                kind,
                category: s(category),
                description: s(description),
                planned_cost: planned,
                actual_cost: actual,
                date: s(date),
                project_id: 1,
                supplier_id,
                created_at: s(date),
                updated_at: s(date),
            }
        };
        let cost_records = vec![
            cost(1, CostKind::Labor, "安装工人", "幕墙安装人工费", 50_000.0, 48_000.0, "2024-03-01", None),
            cost(2, CostKind::Material, "密封胶", "幕墙安装辅材", 20_000.0, 18_000.0, "2024-03-01", None),
            cost(3, CostKind::Material, "铝合金型材", "型材采购", 100_000.0, 85_000.0, "2024-03-20", Some(2)),
            cost(4, CostKind::Material, "钢化玻璃", "玻璃采购", 80_000.0, 75_000.0, "2024-03-22", Some(1)),
        ];

        let alert_rules = vec![
            AlertRule {
                id: 1,
                name: s("材料成本预警"),
                kind: CostKind::Material,
                threshold: 80,
                status: ActiveStatus::Active,
                created_at: s(jan15),
                updated_at: s(jan15),
            },
            AlertRule {
                id: 2,
                name: s("人工成本预警"),
                kind: CostKind::Labor,
                threshold: 85,
                status: ActiveStatus::Active,
                created_at: s(jan15),
                updated_at: s(jan15),
            },
        ];

        Seed {
            customers,
            suppliers,
            material_prices,
            materials,
            transactions,
            shipments,
            processing_records,
            logistics,
            employees,
            projects,
            schedule_tasks,
            cost_records,
            alert_rules,
        }
    }
}
