use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The wizard's budget tiers. An absent tier yields a "custom quote"
/// estimate instead of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum BudgetTier {
    Basic,
    Professional,
    Enterprise,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessDetails {
    pub business_name: String,
    pub business_description: String,
    pub target_customers: Vec<String>,
    pub differentiators: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SiteGoals {
    pub visitor_goals: Vec<String>,
    pub payment_methods: Vec<String>,
    pub booking_type: String,
    pub contact_preference: String,
    pub additional_features: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageSelection {
    pub selected_pages: Vec<String>,
    /// Page name to content readiness ("ready", "needs-work", "missing").
    pub content_status: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DesignPreferences {
    pub example_websites: Vec<String>,
    pub design_likes: Vec<String>,
    pub emotional_tone: Vec<String>,
    pub logo_status: String,
    pub color_preferences: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MaintenancePlan {
    pub who_updates: String,
    pub update_frequency: String,
    pub domain_status: String,
    pub email_needs: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BudgetTimeline {
    pub budget_tier: Option<BudgetTier>,
    pub launch_timeline: String,
    pub urgency_reason: String,
}

/// The full submit payload: every section of the intake form. Only the
/// business name is hard-required; everything else degrades to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScopeRequest {
    pub business: BusinessDetails,
    #[serde(default)]
    pub goals: SiteGoals,
    #[serde(default)]
    pub pages: PageSelection,
    #[serde(default)]
    pub design: DesignPreferences,
    #[serde(default)]
    pub maintenance: MaintenancePlan,
    #[serde(default)]
    pub budget: BudgetTimeline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BusinessSummary {
    pub name: String,
    pub description: String,
    pub target_audience: String,
    pub unique_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectGoals {
    pub primary: Vec<String>,
    pub features: Vec<String>,
    pub pages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TechStack {
    pub framework: String,
    pub ecommerce: Option<String>,
    pub booking: Option<String>,
    pub database: Option<String>,
    pub hosting: String,
    pub cms: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelinePhase {
    pub phase: String,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelineEstimate {
    pub estimated: String,
    pub phases: Vec<TimelinePhase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BudgetBreakdown {
    pub design: String,
    pub development: String,
    pub setup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BudgetEstimate {
    pub estimate: String,
    pub breakdown: Option<BudgetBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DesignDirection {
    pub tone: String,
    pub style: String,
    pub colors: String,
    pub logo_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TechnicalRequirements {
    pub maintenance: String,
    pub update_frequency: String,
    pub domain: String,
    pub email: Vec<String>,
}

/// The generated scope document object, consumed by the sales/production
/// team and rendered into the downloadable artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectScope {
    pub business_summary: BusinessSummary,
    pub project_goals: ProjectGoals,
    pub tech_stack: TechStack,
    pub timeline: TimelineEstimate,
    pub budget: BudgetEstimate,
    pub design_direction: DesignDirection,
    pub technical_requirements: TechnicalRequirements,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScopeData {
    pub project_scope: ProjectScope,
    pub submission_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScopeResponse {
    pub success: bool,
    pub message: String,
    pub data: ScopeData,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScopeDocumentRequest {
    pub project_scope: ProjectScope,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScopeDocumentResponse {
    pub filename: String,
    pub markdown: String,
    /// Prefilled `mailto:` URL carrying the document as the email body.
    pub mailto: String,
}
