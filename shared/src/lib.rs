use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a student's visa application, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Lead,
    Applied,
    OfferReceived,
    VisaGranted,
    VisaRejected,
    Alumni,
}

impl ApplicationStatus {
    /// Every status in declared pipeline order
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Lead,
        ApplicationStatus::Applied,
        ApplicationStatus::OfferReceived,
        ApplicationStatus::VisaGranted,
        ApplicationStatus::VisaRejected,
        ApplicationStatus::Alumni,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Lead => "Lead",
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::OfferReceived => "OfferReceived",
            ApplicationStatus::VisaGranted => "VisaGranted",
            ApplicationStatus::VisaRejected => "VisaRejected",
            ApplicationStatus::Alumni => "Alumni",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Commission claim state for a placed student.
///
/// An absent value on the student is treated the same as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommissionStatus {
    Pending,
    Claimed,
    Received,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Pending => "Pending",
            CommissionStatus::Claimed => "Claimed",
            CommissionStatus::Received => "Received",
        }
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of an invoice. Toggles between exactly these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
}

impl InvoiceStatus {
    pub fn toggled(self) -> Self {
        match self {
            InvoiceStatus::Paid => InvoiceStatus::Pending,
            InvoiceStatus::Pending => InvoiceStatus::Paid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
        }
    }
}

/// Expense category drawn from a closed set.
///
/// Any string outside the set deserializes as `Other` so stored records
/// never drop out of the category breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseCategory {
    Salaries,
    Rent,
    Marketing,
    Utilities,
    Software,
    Office,
    Travel,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        ExpenseCategory::Salaries,
        ExpenseCategory::Rent,
        ExpenseCategory::Marketing,
        ExpenseCategory::Utilities,
        ExpenseCategory::Software,
        ExpenseCategory::Office,
        ExpenseCategory::Travel,
        ExpenseCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Salaries => "Salaries",
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Marketing => "Marketing",
            ExpenseCategory::Utilities => "Utilities",
            ExpenseCategory::Software => "Software",
            ExpenseCategory::Office => "Office",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Parse a category name, case-insensitively, falling back to `Other`
    pub fn parse_lenient(value: &str) -> Self {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or(ExpenseCategory::Other)
    }
}

impl From<String> for ExpenseCategory {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<ExpenseCategory> for String {
    fn from(category: ExpenseCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role attached to a signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Counsellor,
    Student,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub destination: Option<String>,
    pub status: ApplicationStatus,
    pub commission_status: Option<CommissionStatus>,
    /// Commission value with the fallback amount already applied
    pub commission_amount: f64,
    /// Branch with the `main` default already applied
    pub branch_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub student_id: Option<String>,
    pub description: Option<String>,
    pub amount: f64,
    pub status: InvoiceStatus,
    pub branch_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    /// RFC 3339 timestamp of when the expense was recorded
    pub date: String,
    pub recorded_by: String,
    pub branch_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencySettings {
    pub agency_name: String,
    pub currency: String,
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub email: String,
    pub role: Role,
}

/// Query parameters for the dashboard endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    /// `All` or a branch id; defaults to `All`
    pub branch: Option<String>,
    /// Case-insensitive student name filter for the commission lists
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub revenue: f64,
    pub expenses: f64,
}

/// Projected six-period series. Always illustrative, never historical data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub synthetic: bool,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionSummary {
    pub ready_count: usize,
    pub ready_value: f64,
    pub claimed_count: usize,
    pub claimed_value: f64,
    pub received_count: usize,
    pub received_value: f64,
}

/// Money figures pre-rendered with the agency currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTotals {
    pub realized_revenue: String,
    pub outstanding_revenue: String,
    pub total_expenses: String,
    pub net_profit: String,
    pub student_count: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub branch: String,
    pub currency: String,
    pub realized_revenue: f64,
    pub outstanding_revenue: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub conversion_rate: u32,
    pub student_count: usize,
    pub status_distribution: Vec<StatusCount>,
    pub ready_to_claim: Vec<Student>,
    pub awaiting_receipt: Vec<Student>,
    pub commission_summary: CommissionSummary,
    pub expense_breakdown: Vec<CategoryTotal>,
    pub trend: TrendSeries,
    pub formatted: FormattedTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListRequest {
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

/// Whether a guarded action ran or was skipped because another was in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Applied,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionActionResponse {
    pub outcome: ActionOutcome,
    pub student: Option<Student>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleInvoiceResponse {
    pub outcome: ActionOutcome,
    pub invoice: Option<Invoice>,
    pub message: String,
}

/// Raw expense form input; amount stays a string until validated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordExpenseRequest {
    pub amount: String,
    /// Missing or unknown names record as `Other`
    #[serde(default)]
    pub category: String,
    pub description: String,
    /// Active branch filter; `All` or absent records against `main`
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub students: usize,
    pub invoices: usize,
    pub expenses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
