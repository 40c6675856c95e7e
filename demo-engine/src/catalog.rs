//! Static step/metric content per product module.

use crate::error::{CatalogError, Result};
use crate::metric::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_MODULE: &str = "commerce";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl Step {
    pub fn new(title: &str, description: &str, metrics: Vec<Metric>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            metrics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Launcher label. Falls back to the module key when absent.
    #[serde(default)]
    pub label: Option<String>,
    /// Walkthrough order. Never empty once validated.
    pub steps: Vec<Step>,
}

/// Immutable table of demo modules keyed by module type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    default_module: String,
    modules: BTreeMap<String, ModuleConfig>,
}

impl Catalog {
    pub fn new(default_module: &str, modules: BTreeMap<String, ModuleConfig>) -> Result<Self> {
        let catalog = Self {
            default_module: default_module.to_string(),
            modules,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Built-in catalog, constructed once per process.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(builtin_catalog)
    }

    pub fn default_module(&self) -> &str {
        &self.default_module
    }

    pub fn get(&self, module_type: &str) -> Option<&ModuleConfig> {
        self.modules.get(module_type)
    }

    /// Looks up a module, falling back to the default for unknown keys.
    /// Returns the key that was actually used.
    pub fn resolve(&self, module_type: &str) -> (&str, &ModuleConfig) {
        if let Some((key, config)) = self.modules.get_key_value(module_type) {
            return (key.as_str(), config);
        }
        tracing::debug!(
            requested = module_type,
            fallback = %self.default_module,
            "unknown module type, using default"
        );
        let (key, config) = self
            .modules
            .get_key_value(&self.default_module)
            .expect("validated catalog contains its default module");
        (key.as_str(), config)
    }

    /// Module keys in sorted order.
    pub fn module_keys(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn label<'a>(&'a self, module_type: &'a str) -> &'a str {
        self.modules
            .get(module_type)
            .and_then(|m| m.label.as_deref())
            .unwrap_or(module_type)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse(json, "<inline>")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::parse(&raw, &path.display().to_string())?;
        tracing::info!(
            path = %path.display(),
            modules = catalog.modules.len(),
            "loaded demo catalog"
        );
        Ok(catalog)
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                path: origin.to_string(),
                source,
            })?;
        Self::new(&file.default_module, file.modules)
    }

    fn validate(&self) -> Result<()> {
        if self.modules.is_empty() {
            return Err(CatalogError::validation("modules", "catalog has no modules"));
        }
        if !self.modules.contains_key(&self.default_module) {
            return Err(CatalogError::validation(
                "default_module",
                format!("'{}' is not a module in the catalog", self.default_module),
            ));
        }
        for (key, module) in &self.modules {
            if module.steps.is_empty() {
                return Err(CatalogError::validation(
                    format!("modules.{}.steps", key),
                    "module has no steps",
                ));
            }
            if let Some(i) = module.steps.iter().position(|s| s.title.trim().is_empty()) {
                return Err(CatalogError::validation(
                    format!("modules.{}.steps[{}].title", key, i),
                    "title is blank",
                ));
            }
        }
        Ok(())
    }
}

/// On-disk shape; only becomes a [`Catalog`] after validation.
#[derive(Deserialize)]
struct CatalogFile {
    default_module: String,
    modules: BTreeMap<String, ModuleConfig>,
}

fn module(label: &str, steps: Vec<Step>) -> ModuleConfig {
    ModuleConfig {
        label: Some(label.to_string()),
        steps,
    }
}

fn builtin_catalog() -> Catalog {
    let mut modules = BTreeMap::new();

    modules.insert(
        "commerce".to_string(),
        module(
            "IB Commerce",
            vec![
                Step::new(
                    "Order Orchestration",
                    "Orders from every channel land in one queue and route to the right warehouse automatically.",
                    vec![
                        Metric::new("Active Orders", 847.0, "+12%"),
                        Metric::new("Fulfillment Rate", "98.2%", "+1.4%"),
                        Metric::new("Avg. Ship Time", "1.8 days", "-0.6 days"),
                    ],
                ),
                Step::new(
                    "Catalog & Pricing",
                    "One product catalog with rule-based pricing pushed to every storefront at once.",
                    vec![
                        Metric::new("Live SKUs", 12480.0, "+320"),
                        Metric::new("Price Rules", 64.0, "+8"),
                        Metric::new("Margin Uplift", "4.6%", "+0.9%"),
                    ],
                ),
                Step::new(
                    "Revenue Insights",
                    "Sales, conversion and churn signals roll up into a single live revenue view.",
                    vec![
                        Metric::new("Revenue", "₹2.4Cr", "+18%"),
                        Metric::new("Conversion", "23.4%", "+2.1%"),
                        Metric::new("Churn Risk", "3.1%", "-1.5%"),
                    ],
                ),
            ],
        ),
    );

    modules.insert(
        "finance".to_string(),
        module(
            "IB Finance",
            vec![
                Step::new(
                    "Accounts Receivable",
                    "Invoices, collections and reminders run from one ledger that reconciles itself.",
                    vec![
                        Metric::new("DSO", "28 days", "-5 days"),
                        Metric::new("Collected This Month", "₹1.8Cr", "+22%"),
                        Metric::new("Overdue Invoices", 37.0, "-14%"),
                    ],
                ),
                Step::new(
                    "Cash Flow Forecasting",
                    "Receivables, payables and payroll combine into a rolling thirteen-week cash forecast.",
                    vec![
                        Metric::new("Projected Cash", "₹4.2Cr", "+9%"),
                        Metric::new("Forecast Accuracy", "94.5%", "+3.2%"),
                        Metric::new("Runway", "14 months", "+2 months"),
                    ],
                ),
                Step::new(
                    "Financial Close",
                    "Reconciliations and adjustments are tracked to a checklist so the books close in days.",
                    vec![
                        Metric::new("Close Cycle", "4 days", "-3 days"),
                        Metric::new("Auto-Reconciled", "91%", "+11%"),
                        Metric::new("Open Adjustments", 12.0, "-40%"),
                    ],
                ),
            ],
        ),
    );

    modules.insert(
        "procurement".to_string(),
        module(
            "IB Procurement",
            vec![
                Step::new(
                    "Requisition to PO",
                    "Requests are approved against budget and converted to purchase orders without email chains.",
                    vec![
                        Metric::new("Open Requisitions", 126.0, "-18%"),
                        Metric::new("Approval Time", "2 days", "-3 days"),
                        Metric::new("On-Contract Spend", "87%", "+9%"),
                    ],
                ),
                Step::new(
                    "Supplier Scorecards",
                    "Delivery, quality and price performance are scored for every supplier continuously.",
                    vec![
                        Metric::new("Active Suppliers", 214.0, "+6"),
                        Metric::new("On-Time Delivery", "93.7%", "+2.5%"),
                        Metric::new("Defect Rate", "0.8%", "-0.3%"),
                    ],
                ),
                Step::new(
                    "Spend Analytics",
                    "Spend is classified by category and supplier to surface savings opportunities.",
                    vec![
                        Metric::new("Spend Under Management", "₹9.6Cr", "+14%"),
                        Metric::new("Savings Identified", "₹38L", "+21%"),
                        Metric::new("Maverick Spend", "6%", "-4%"),
                    ],
                ),
            ],
        ),
    );

    modules.insert(
        "revenue".to_string(),
        module(
            "IB Revenue",
            vec![
                Step::new(
                    "Pipeline Health",
                    "Leads and opportunities are scored so the team works the deals most likely to close.",
                    vec![
                        Metric::new("Qualified Leads", 392.0, "+27%"),
                        Metric::new("Pipeline Value", "₹6.1Cr", "+15%"),
                        Metric::new("Win Rate", "31.2%", "+4.3%"),
                    ],
                ),
                Step::new(
                    "Quote to Cash",
                    "Approved quotes become orders and invoices with no re-keying between systems.",
                    vec![
                        Metric::new("Quotes Sent", 158.0, "+11%"),
                        Metric::new("Quote Turnaround", "6 hours", "-40%"),
                        Metric::new("Sales Cycle", "19 days", "-7 days"),
                    ],
                ),
                Step::new(
                    "Renewals",
                    "Contracts approaching renewal are flagged early with a health score per account.",
                    vec![
                        Metric::new("Renewals Due", 48.0, "+5"),
                        Metric::new("Net Retention", "112%", "+6%"),
                        Metric::new("At-Risk Accounts", 7.0, "-3"),
                    ],
                ),
            ],
        ),
    );

    modules.insert(
        "intelligence".to_string(),
        module(
            "IB Intelligence",
            vec![
                Step::new(
                    "Live Dashboards",
                    "Operational KPIs from every module stream into one dashboard without exports.",
                    vec![
                        Metric::new("Data Sources", 23.0, "+4"),
                        Metric::new("Refresh Latency", "2.5s", "-60%"),
                        Metric::new("Dashboard Users", 318.0, "+35%"),
                    ],
                ),
                Step::new(
                    "Anomaly Detection",
                    "Unusual spikes in orders, spend or collections are flagged as they happen.",
                    vec![
                        Metric::new("Alerts Today", 14.0, "-22%"),
                        Metric::new("Precision", "89.4%", "+5.1%"),
                        Metric::new("Mean Time to Detect", "3 days", "-9 days"),
                    ],
                ),
                Step::new(
                    "Forecasting",
                    "Demand and revenue forecasts update nightly from the latest transactions.",
                    vec![
                        Metric::new("Forecast Horizon", "90 days", "+30 days"),
                        Metric::new("MAPE", "7.8%", "-2.4%"),
                        Metric::new("Models Deployed", 12.0, "+3"),
                    ],
                ),
            ],
        ),
    );

    Catalog {
        default_module: DEFAULT_MODULE.to_string(),
        modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.default_module(), "commerce");
        assert!(std::ptr::eq(catalog, Catalog::builtin()));
    }

    #[test]
    fn test_finance_content() {
        let finance = Catalog::builtin().get("finance").unwrap();
        assert_eq!(finance.steps.len(), 3);
        assert_eq!(finance.steps[0].title, "Accounts Receivable");
        assert_eq!(finance.steps[2].title, "Financial Close");
        assert!(finance.steps[0]
            .metrics
            .contains(&Metric::new("DSO", "28 days", "-5 days")));
    }

    #[test]
    fn test_unknown_module_falls_back_to_default() {
        let catalog = Catalog::builtin();
        let (key, fallback) = catalog.resolve("nonexistent");
        let (_, commerce) = catalog.resolve("commerce");
        assert_eq!(key, "commerce");
        assert_eq!(fallback.steps, commerce.steps);

        // Same answer every time.
        let (again, _) = catalog.resolve("nonexistent");
        assert_eq!(again, key);
    }

    #[test]
    fn test_module_keys_sorted() {
        let keys: Vec<_> = Catalog::builtin().module_keys().collect();
        assert_eq!(
            keys,
            vec!["commerce", "finance", "intelligence", "procurement", "revenue"]
        );
    }

    #[test]
    fn test_label_falls_back_to_key() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.label("finance"), "IB Finance");
        assert_eq!(catalog.label("unknown"), "unknown");
    }

    #[test]
    fn test_load_json() {
        let json = r#"{
            "default_module": "hr",
            "modules": {
                "hr": {
                    "steps": [
                        {"title": "Onboarding", "description": "New hires ready on day one.",
                         "metrics": [{"label": "Time to Productivity", "value": "12 days", "trend": "-4 days"}]}
                    ]
                }
            }
        }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let (key, module) = catalog.resolve("anything");
        assert_eq!(key, "hr");
        assert_eq!(module.steps[0].title, "Onboarding");
        assert_eq!(catalog.label("hr"), "hr");
    }

    #[test]
    fn test_rejects_missing_default() {
        let json = r#"{"default_module": "x", "modules": {"y": {"steps": [{"title": "t", "description": "d"}]}}}"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref field, .. } if field == "default_module"));
    }

    #[test]
    fn test_rejects_empty_steps() {
        let json = r#"{"default_module": "y", "modules": {"y": {"steps": []}}}"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::Validation { ref field, .. } if field == "modules.y.steps"));
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[test]
    fn test_new_validates() {
        assert!(Catalog::new("commerce", BTreeMap::new()).is_err());
    }
}
