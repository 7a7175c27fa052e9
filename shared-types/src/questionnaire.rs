use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Number of steps in the intake flow. Conditional steps are skipped, not
/// removed, so this bound never changes at runtime.
pub const TOTAL_STEPS: u32 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum BusinessType {
    Restaurant,
    Retail,
    ProfessionalServices,
    Healthcare,
    Education,
    Nonprofit,
    Ecommerce,
    Saas,
    Manufacturing,
    RealEstate,
    Fitness,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ProjectGoal {
    IncreaseSales,
    ImproveEfficiency,
    BetterCustomerService,
    ExpandMarketReach,
    ReduceCosts,
    ModernizeOperations,
    ComplyRegulations,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum FeatureCategory {
    CoreFunctionality,
    UserManagement,
    PaymentProcessing,
    ContentManagement,
    AnalyticsReporting,
    Integrations,
    MobileFeatures,
    AdvancedFeatures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Platform {
    WebResponsive,
    IosNative,
    AndroidNative,
    DesktopApp,
    WebAppPwa,
}

impl Platform {
    pub fn is_native_mobile(&self) -> bool {
        matches!(self, Platform::IosNative | Platform::AndroidNative)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum IntegrationCategory {
    Payment,
    Crm,
    Marketing,
    Analytics,
    Communication,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BudgetRange {
    #[serde(rename = "under-25k")]
    Under25k,
    #[serde(rename = "25k-50k")]
    From25kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "100k-250k")]
    From100kTo250k,
    #[serde(rename = "250k-500k")]
    From250kTo500k,
    #[serde(rename = "over-500k")]
    Over500k,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TimelineOption {
    #[serde(rename = "asap")]
    Asap,
    #[serde(rename = "3-months")]
    ThreeMonths,
    #[serde(rename = "6-months")]
    SixMonths,
    #[serde(rename = "12-months")]
    TwelveMonths,
    #[serde(rename = "flexible")]
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum ContactPreference {
    Email,
    Phone,
    Either,
}

/// A feature the user can toggle on a selection step. `base_cost` is the
/// item's own price, used only when the feature id is missing from the
/// static pricing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SelectedFeature {
    pub id: String,
    pub name: String,
    pub category: FeatureCategory,
    pub base_cost: i64,
    pub complexity: Complexity,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Integration {
    pub id: String,
    pub name: String,
    pub category: IntegrationCategory,
    pub estimated_cost: i64,
    pub complexity: Complexity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub phone: Option<String>,
    pub preferred_contact: ContactPreference,
}

/// Every answer the intake flow collects. The key set is closed; clients
/// mutate it one key at a time through [`ResponseUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireResponses {
    pub business_type: Option<BusinessType>,
    pub business_name: String,
    pub business_description: String,
    pub target_customers: Vec<String>,
    pub problem_statement: String,
    pub primary_goal: Option<ProjectGoal>,
    pub success_metrics: Vec<String>,
    pub features: Vec<SelectedFeature>,
    pub platforms: Vec<Platform>,
    pub integrations: Vec<Integration>,
    pub budget_range: Option<BudgetRange>,
    pub timeline_preference: Option<TimelineOption>,
    pub contact_info: Option<ContactInfo>,
}

/// A single-answer mutation, tagged by question key so the closed key set
/// is enforced at the deserialization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "question", content = "value", rename_all = "camelCase")]
#[ts(export)]
pub enum ResponseUpdate {
    BusinessType(BusinessType),
    BusinessName(String),
    BusinessDescription(String),
    TargetCustomers(Vec<String>),
    ProblemStatement(String),
    PrimaryGoal(ProjectGoal),
    SuccessMetrics(Vec<String>),
    Features(Vec<SelectedFeature>),
    Platforms(Vec<Platform>),
    Integrations(Vec<Integration>),
    BudgetRange(BudgetRange),
    TimelinePreference(TimelineOption),
    ContactInfo(ContactInfo),
}

impl ResponseUpdate {
    /// Cost-bearing keys trigger an estimate recomputation on apply.
    pub fn affects_cost(&self) -> bool {
        matches!(
            self,
            ResponseUpdate::Features(_)
                | ResponseUpdate::Platforms(_)
                | ResponseUpdate::Integrations(_)
        )
    }
}

/// Derived estimate, recomputed wholesale from the responses. Never edited
/// directly by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostCalculation {
    pub base_feature_cost: f64,
    pub platform_multiplier: f64,
    pub integration_costs: f64,
    pub complexity_multiplier: f64,
    pub total_estimate: i64,
    pub last_calculated: Option<i64>,
}

impl Default for CostCalculation {
    fn default() -> Self {
        Self {
            base_feature_cost: 0.0,
            platform_multiplier: 1.0,
            integration_costs: 0.0,
            complexity_multiplier: 1.0,
            total_estimate: 0,
            last_calculated: None,
        }
    }
}

/// Visibility flags for the optional steps, one per named predicate.
/// Always a pure function of the responses, never persisted on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConditionalVisibility {
    pub show_advanced_features: bool,
    pub show_ecommerce_details: bool,
    pub show_mobile_details: bool,
}

/// One user's questionnaire run: answers, progress and the derived
/// estimate. Owns its responses, cost calculation and visibility flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireSession {
    pub session_id: String,
    pub current_step: u32,
    pub is_complete: bool,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    pub last_saved: Option<i64>,
    pub responses: QuestionnaireResponses,
    pub cost_calculation: CostCalculation,
    pub conditional_visibility: ConditionalVisibility,
}

impl QuestionnaireSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            current_step: 1,
            is_complete: false,
            started_at: None,
            completed_at: None,
            last_saved: None,
            responses: QuestionnaireResponses::default(),
            cost_calculation: CostCalculation::default(),
            conditional_visibility: ConditionalVisibility::default(),
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Utc::now().timestamp());
        self.current_step = 1;
    }

    pub fn complete(&mut self) {
        self.is_complete = true;
        self.completed_at = Some(Utc::now().timestamp());
        self.current_step = TOTAL_STEPS;
    }
}

impl Default for QuestionnaireSession {
    fn default() -> Self {
        Self::new()
    }
}

// API request/response types

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateSessionRequest {
    /// When present, a non-expired saved snapshot with this id is restored
    /// instead of starting fresh.
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionResponse {
    pub session: QuestionnaireSession,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UpdateResponseRequest {
    pub update: ResponseUpdate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[serde(tag = "op", rename_all = "kebab-case")]
#[ts(export)]
pub enum NavigateRequest {
    Next,
    Previous,
    Jump { step: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeatureCostLine {
    pub name: String,
    pub base_cost: i64,
    pub complexity: Complexity,
    pub final_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlatformCostLine {
    pub platform: Platform,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IntegrationCostLine {
    pub name: String,
    pub base_cost: i64,
    pub complexity: Complexity,
    pub final_cost: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BudgetBounds {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CostBreakdown {
    pub features: Vec<FeatureCostLine>,
    pub platforms: Vec<PlatformCostLine>,
    pub integrations: Vec<IntegrationCostLine>,
    pub totals: CostCalculation,
    pub budget_bounds: Option<BudgetBounds>,
    pub within_budget: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EstimateResponse {
    pub estimate: CostBreakdown,
}
