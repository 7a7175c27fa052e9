use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod questionnaire;
pub mod scope;

pub use questionnaire::{
    BudgetBounds, BudgetRange, BusinessType, Complexity, ConditionalVisibility, ContactInfo,
    ContactPreference, CostBreakdown, CostCalculation, CreateSessionRequest, EstimateResponse,
    FeatureCategory, FeatureCostLine, Integration, IntegrationCategory, IntegrationCostLine,
    NavigateRequest, Platform, PlatformCostLine, ProjectGoal, QuestionnaireResponses,
    QuestionnaireSession, ResponseUpdate, SelectedFeature, SessionResponse, TimelineOption,
    UpdateResponseRequest, TOTAL_STEPS,
};
pub use scope::{
    BudgetBreakdown, BudgetEstimate, BudgetTier, BudgetTimeline, BusinessDetails, BusinessSummary,
    DesignDirection, DesignPreferences, MaintenancePlan, PageSelection, ProjectGoals, ProjectScope,
    ScopeData, ScopeDocumentRequest, ScopeDocumentResponse, ScopeRequest, ScopeResponse, SiteGoals,
    TechStack, TechnicalRequirements, TimelineEstimate, TimelinePhase,
};

// Shared models for the introspect manager and its web frontend

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ServerStatus {
    pub status: String,
    pub version: String,
    pub uptime: u64,
}

/// JSON error envelope returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
