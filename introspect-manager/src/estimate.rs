//! The estimate engine: a pure function from responses to a cost
//! calculation, plus the display breakdown and budget-range helpers.

use chrono::Utc;
use shared_types::{
    BudgetBounds, BudgetRange, Complexity, CostBreakdown, CostCalculation, FeatureCostLine,
    Integration, IntegrationCostLine, PlatformCostLine, QuestionnaireResponses, SelectedFeature,
};

use crate::pricing;

/// Recomputes the full cost calculation from the current responses.
///
/// Deterministic and infallible: unknown identifiers fall back to the
/// item's own cost, then to zero (logged). The total is never negative and
/// the global complexity multiplier is capped at 2.0.
pub fn calculate_project_cost(responses: &QuestionnaireResponses) -> CostCalculation {
    let base_feature_cost: f64 = responses
        .features
        .iter()
        .filter(|f| f.selected)
        .map(|f| resolved_feature_cost(f) as f64 * pricing::complexity_multiplier(f.complexity))
        .sum();

    // Highest multiplier wins when several platforms are chosen; N
    // platforms cost what the hardest one costs, not the sum.
    let platform_multiplier = responses
        .platforms
        .iter()
        .map(|p| pricing::platform_multiplier(*p))
        .reduce(f64::max)
        .unwrap_or(1.0);

    let integration_costs: f64 = responses
        .integrations
        .iter()
        .map(|i| resolved_integration_cost(i) as f64 * pricing::complexity_multiplier(i.complexity))
        .sum();

    let complexity_multiplier = global_complexity_multiplier(responses);

    // Integrations are platform-agnostic; the platform factor applies to
    // feature work only.
    let subtotal = base_feature_cost * platform_multiplier + integration_costs;
    let total_estimate = (subtotal * complexity_multiplier).round() as i64;

    CostCalculation {
        base_feature_cost,
        platform_multiplier,
        integration_costs,
        complexity_multiplier,
        total_estimate: total_estimate.max(0),
        last_calculated: Some(Utc::now().timestamp()),
    }
}

/// Project-wide complexity factor: extra platforms, complex-tier features
/// and integrations beyond the second each add to the score, capped at 2.0.
pub fn global_complexity_multiplier(responses: &QuestionnaireResponses) -> f64 {
    let mut score = 1.0;

    let platform_count = responses.platforms.len();
    if platform_count > 1 {
        score += 0.2 * (platform_count - 1) as f64;
    }

    let complex_features = responses
        .features
        .iter()
        .filter(|f| f.selected && f.complexity == Complexity::Complex)
        .count();
    score += 0.1 * complex_features as f64;

    let integration_count = responses.integrations.len();
    if integration_count > 2 {
        score += 0.05 * (integration_count - 2) as f64;
    }

    score.min(2.0)
}

/// Per-line-item view of the estimate for display.
pub fn cost_breakdown(responses: &QuestionnaireResponses) -> CostBreakdown {
    let totals = calculate_project_cost(responses);

    let features = responses
        .features
        .iter()
        .filter(|f| f.selected)
        .map(|f| {
            let base_cost = resolved_feature_cost(f);
            FeatureCostLine {
                name: f.name.clone(),
                base_cost,
                complexity: f.complexity,
                final_cost: base_cost as f64 * pricing::complexity_multiplier(f.complexity),
            }
        })
        .collect();

    let platforms = responses
        .platforms
        .iter()
        .map(|p| PlatformCostLine {
            platform: *p,
            multiplier: pricing::platform_multiplier(*p),
        })
        .collect();

    let integrations = responses
        .integrations
        .iter()
        .map(|i| {
            let base_cost = resolved_integration_cost(i);
            IntegrationCostLine {
                name: i.name.clone(),
                base_cost,
                complexity: i.complexity,
                final_cost: base_cost as f64 * pricing::complexity_multiplier(i.complexity),
            }
        })
        .collect();

    let budget_bounds = responses.budget_range.map(|range| {
        let (min, max) = budget_range_bounds(range);
        BudgetBounds { min, max }
    });
    let within_budget = responses
        .budget_range
        .map(|range| is_within_budget(totals.total_estimate, range));

    CostBreakdown {
        features,
        platforms,
        integrations,
        totals,
        budget_bounds,
        within_budget,
    }
}

/// Dollar bounds for a selected budget range.
pub fn budget_range_bounds(range: BudgetRange) -> (i64, i64) {
    match range {
        BudgetRange::Under25k => (10_000, 25_000),
        BudgetRange::From25kTo50k => (25_000, 50_000),
        BudgetRange::From50kTo100k => (50_000, 100_000),
        BudgetRange::From100kTo250k => (100_000, 250_000),
        BudgetRange::From250kTo500k => (250_000, 500_000),
        BudgetRange::Over500k => (500_000, 1_000_000),
    }
}

pub fn is_within_budget(total_estimate: i64, range: BudgetRange) -> bool {
    let (min, max) = budget_range_bounds(range);
    total_estimate >= min && total_estimate <= max
}

fn resolved_feature_cost(feature: &SelectedFeature) -> i64 {
    match pricing::base_feature_cost(&feature.id) {
        Some(cost) => cost,
        None if feature.base_cost > 0 => feature.base_cost,
        None => {
            tracing::warn!(
                feature = %feature.id,
                "feature missing from pricing table and carries no base cost; pricing it at zero"
            );
            0
        }
    }
}

fn resolved_integration_cost(integration: &Integration) -> i64 {
    match pricing::integration_cost(&integration.id) {
        Some(cost) => cost,
        None if integration.estimated_cost > 0 => integration.estimated_cost,
        None => {
            tracing::warn!(
                integration = %integration.id,
                "integration missing from pricing table and carries no estimated cost; pricing it at zero"
            );
            0
        }
    }
}
