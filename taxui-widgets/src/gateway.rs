//! Gateway traits the widget layer depends on.
//!
//! Production wires these to the HTTP client in `taxui-net`; simulations
//! and tests use the fixture implementations below. Keeping the traits here
//! keeps the widget crate transport-free.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::enhancer::FormFlavor;

/// Where year lists come from.
#[async_trait]
pub trait YearSource: Send + Sync {
    /// Valid tax years for `association_id` under the given form flavor.
    async fn tax_years(
        &self,
        flavor: FormFlavor,
        association_id: &str,
    ) -> anyhow::Result<Vec<String>>;
}

/// Outcome of a management-company creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanyOutcome {
    Created { id: String, name: String },
    Rejected { message: String },
}

#[async_trait]
pub trait CompanyGateway: Send + Sync {
    async fn create_company(&self, fields: &[(String, String)]) -> anyhow::Result<CompanyOutcome>;
}

/// Fixture-backed year source: a map from association id to year list.
/// Unknown associations get an empty list, like the live endpoint.
#[derive(Debug, Clone, Default)]
pub struct StaticYears {
    years: BTreeMap<String, Vec<String>>,
}

impl StaticYears {
    pub fn new(years: BTreeMap<String, Vec<String>>) -> Self {
        Self { years }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl YearSource for StaticYears {
    async fn tax_years(
        &self,
        _flavor: FormFlavor,
        association_id: &str,
    ) -> anyhow::Result<Vec<String>> {
        Ok(self.years.get(association_id).cloned().unwrap_or_default())
    }
}

/// Fixture gateway that accepts every creation with sequential ids.
#[derive(Debug, Default)]
pub struct StaticCompanies {
    next_id: std::sync::atomic::AtomicU64,
}

impl StaticCompanies {
    pub fn new() -> Self {
        Self {
            next_id: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl CompanyGateway for StaticCompanies {
    async fn create_company(&self, fields: &[(String, String)]) -> anyhow::Result<CompanyOutcome> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let name = fields
            .iter()
            .find(|(k, _)| k == "name")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        Ok(CompanyOutcome::Created {
            id: id.to_string(),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_years_unknown_association_is_empty() {
        let source = StaticYears::new(BTreeMap::from([(
            "1".to_string(),
            vec!["2022".to_string(), "2023".to_string()],
        )]));

        let years = source.tax_years(FormFlavor::Extension, "1").await.unwrap();
        assert_eq!(years, vec!["2022", "2023"]);
        assert!(source
            .tax_years(FormFlavor::Form1120h, "9")
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_static_companies_assign_sequential_ids() {
        let gateway = StaticCompanies::new();
        let fields = vec![("name".to_string(), "Acme Management".to_string())];

        let first = gateway.create_company(&fields).await.unwrap();
        let second = gateway.create_company(&fields).await.unwrap();
        assert_eq!(
            first,
            CompanyOutcome::Created {
                id: "1".into(),
                name: "Acme Management".into()
            }
        );
        assert!(matches!(second, CompanyOutcome::Created { id, .. } if id == "2"));
    }
}
