use cee_graph::FactorType;

use crate::patterns::QuantityKind;

/// Fixed label/heuristic table for `factor_type`.
#[must_use]
pub fn factor_type_for(kind: QuantityKind, unit: Option<&str>) -> FactorType {
    match kind {
        QuantityKind::Currency => {
            let unit = unit.unwrap_or_default().to_lowercase();
            if ["mrr", "arr", "revenue", "sales"].iter().any(|u| unit.contains(u)) {
                FactorType::Revenue
            } else {
                FactorType::Cost
            }
        }
        QuantityKind::Count => FactorType::Demand,
        QuantityKind::Time => FactorType::Time,
        QuantityKind::Percentage => FactorType::Probability,
    }
}

/// Type-indexed guidance table, at least 3 distinct entries per type where
/// available.
#[must_use]
pub fn uncertainty_drivers_for(factor_type: FactorType) -> Vec<String> {
    let entries: &[&str] = match factor_type {
        FactorType::Cost => &["vendor pricing volatility", "currency fluctuation", "scope creep"],
        FactorType::Price => &["competitor response", "demand elasticity", "discount pressure"],
        FactorType::Time => &["resource availability", "scope changes", "external dependencies"],
        FactorType::Probability => &["sample size", "measurement noise", "model calibration"],
        FactorType::Revenue => &["market growth rate", "customer retention", "pricing changes"],
        FactorType::Demand => &["seasonality", "marketing reach", "competitive pressure"],
        FactorType::Quality => &["process variability", "staff turnover", "tooling maturity"],
        FactorType::Other => &["incomplete data", "expert disagreement", "measurement error"],
    };
    entries.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_with_revenue_unit_maps_to_revenue() {
        assert_eq!(factor_type_for(QuantityKind::Currency, Some("mrr")), FactorType::Revenue);
    }

    #[test]
    fn currency_without_revenue_unit_maps_to_cost() {
        assert_eq!(factor_type_for(QuantityKind::Currency, None), FactorType::Cost);
    }

    #[test]
    fn every_factor_type_has_at_least_three_drivers() {
        for ft in [
            FactorType::Cost,
            FactorType::Price,
            FactorType::Time,
            FactorType::Probability,
            FactorType::Revenue,
            FactorType::Demand,
            FactorType::Quality,
            FactorType::Other,
        ] {
            assert!(uncertainty_drivers_for(ft).len() >= 3);
        }
    }
}
