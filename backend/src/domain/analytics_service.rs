//! Dashboard analytics.
//!
//! Pure functions from the raw collections plus a branch filter to the metrics
//! bundle the dashboard renders. Each collection is filtered by branch on its
//! own before any figure is computed; nothing here joins across collections or
//! touches its inputs.

use shared::{
    ApplicationStatus, CategoryTotal, CommissionStatus, CommissionSummary, ExpenseCategory,
    StatusCount, TrendPoint, TrendSeries,
};
use tracing::debug;

use super::branch_filter::BranchFilter;
use super::dashboard_store::DashboardSnapshot;
use super::models::{expense::Expense, invoice::Invoice, student::Student};

/// Period labels of the projected trend
pub const TREND_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const TREND_REVENUE_FACTORS: [f64; 6] = [0.45, 0.55, 0.7, 0.65, 0.85, 1.0];
const TREND_EXPENSE_FACTORS: [f64; 6] = [0.8, 0.85, 0.9, 0.95, 0.9, 1.0];

/// Input to [`AnalyticsService::build_dashboard`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardQuery {
    pub branch: BranchFilter,
    pub search: String,
}

/// Every figure the dashboard shows, computed from one branch-filtered view
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub branch: BranchFilter,
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
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    pub fn build_dashboard(
        &self,
        snapshot: &DashboardSnapshot,
        query: &DashboardQuery,
    ) -> DashboardMetrics {
        let students = query.branch.apply(&snapshot.students);
        let invoices = query.branch.apply(&snapshot.invoices);
        let expenses = query.branch.apply(&snapshot.expenses);
        debug!(
            "Building dashboard for branch {}: {} students, {} invoices, {} expenses",
            query.branch,
            students.len(),
            invoices.len(),
            expenses.len()
        );

        let realized_revenue = self.realized_revenue(&invoices);
        let total_expenses = self.total_expenses(&expenses);

        DashboardMetrics {
            branch: query.branch.clone(),
            currency: snapshot.settings.display_currency().to_string(),
            realized_revenue,
            outstanding_revenue: self.outstanding_revenue(&invoices),
            total_expenses,
            net_profit: realized_revenue - total_expenses,
            conversion_rate: self.conversion_rate(&students),
            student_count: students.len(),
            status_distribution: self.status_distribution(&students),
            ready_to_claim: self.ready_to_claim(&students, &query.search),
            awaiting_receipt: self.awaiting_receipt(&students, &query.search),
            commission_summary: self.commission_summary(&students),
            expense_breakdown: self.expense_breakdown(&expenses),
            trend: self.trend(realized_revenue, total_expenses),
        }
    }

    pub fn realized_revenue(&self, invoices: &[Invoice]) -> f64 {
        sum_invoices(invoices, Invoice::is_paid)
    }

    pub fn outstanding_revenue(&self, invoices: &[Invoice]) -> f64 {
        sum_invoices(invoices, |i| !i.is_paid())
    }

    pub fn total_expenses(&self, expenses: &[Expense]) -> f64 {
        expenses.iter().map(|e| e.amount).sum()
    }

    /// Percentage of students with a granted visa, rounded. 0 for no students.
    pub fn conversion_rate(&self, students: &[Student]) -> u32 {
        if students.is_empty() {
            return 0;
        }
        let granted = students
            .iter()
            .filter(|s| s.status == ApplicationStatus::VisaGranted)
            .count();
        (100.0 * granted as f64 / students.len() as f64).round() as u32
    }

    /// Count per status in pipeline order, zero counts included
    pub fn status_distribution(&self, students: &[Student]) -> Vec<StatusCount> {
        ApplicationStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: students.iter().filter(|s| s.status == *status).count(),
            })
            .collect()
    }

    pub fn ready_to_claim(&self, students: &[Student], search: &str) -> Vec<Student> {
        let needle = search.to_lowercase();
        students
            .iter()
            .filter(|s| s.is_ready_to_claim() && s.name_matches(&needle))
            .cloned()
            .collect()
    }

    pub fn awaiting_receipt(&self, students: &[Student], search: &str) -> Vec<Student> {
        let needle = search.to_lowercase();
        students
            .iter()
            .filter(|s| s.is_awaiting_receipt() && s.name_matches(&needle))
            .cloned()
            .collect()
    }

    pub fn commission_summary(&self, students: &[Student]) -> CommissionSummary {
        let mut summary = CommissionSummary {
            ready_count: 0,
            ready_value: 0.0,
            claimed_count: 0,
            claimed_value: 0.0,
            received_count: 0,
            received_value: 0.0,
        };

        for student in students {
            let value = student.commission_value();
            match student.effective_commission_status() {
                CommissionStatus::Pending if student.is_ready_to_claim() => {
                    summary.ready_count += 1;
                    summary.ready_value += value;
                }
                CommissionStatus::Pending => {}
                CommissionStatus::Claimed => {
                    summary.claimed_count += 1;
                    summary.claimed_value += value;
                }
                CommissionStatus::Received => {
                    summary.received_count += 1;
                    summary.received_value += value;
                }
            }
        }

        summary
    }

    /// Totals per category in declared order, empty categories kept
    pub fn expense_breakdown(&self, expenses: &[Expense]) -> Vec<CategoryTotal> {
        ExpenseCategory::ALL
            .iter()
            .map(|category| {
                let in_category = expenses.iter().filter(|e| e.category == *category);
                let (total, count) = in_category
                    .fold((0.0, 0), |(total, count), e| (total + e.amount, count + 1));
                CategoryTotal {
                    category: *category,
                    total,
                    count,
                }
            })
            .collect()
    }

    /// Illustrative six-period projection scaled from the current totals.
    /// Deterministic, and always flagged synthetic.
    pub fn trend(&self, realized_revenue: f64, total_expenses: f64) -> TrendSeries {
        let points = TREND_LABELS
            .iter()
            .zip(TREND_REVENUE_FACTORS.iter().zip(TREND_EXPENSE_FACTORS.iter()))
            .map(|(label, (revenue_factor, expense_factor))| TrendPoint {
                label: label.to_string(),
                revenue: round_cents(realized_revenue * revenue_factor),
                expenses: round_cents(total_expenses * expense_factor),
            })
            .collect();

        TrendSeries {
            synthetic: true,
            points,
        }
    }
}

fn sum_invoices<P>(invoices: &[Invoice], include: P) -> f64
where
    P: Fn(&Invoice) -> bool,
{
    invoices
        .iter()
        .filter(|i| include(*i))
        .map(|i| i.amount)
        .sum()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::settings::AgencySettings;
    use crate::storage::csv::test_utils::{sample_expense, sample_invoice, sample_student};
    use shared::InvoiceStatus;

    fn student_in(id: &str, name: &str, status: ApplicationStatus, branch: Option<&str>) -> Student {
        let mut student = sample_student(id, name, status);
        student.branch_id = branch.map(str::to_string);
        student
    }

    fn snapshot() -> DashboardSnapshot {
        let mut claimed = student_in("s3", "Ana Lima", ApplicationStatus::VisaGranted, Some("perth"));
        claimed.commission_status = Some(CommissionStatus::Claimed);
        claimed.commission_amount = Some(2000.0);

        let mut perth_invoice = sample_invoice("i3", 400.0, InvoiceStatus::Paid);
        perth_invoice.branch_id = Some("perth".to_string());

        let mut perth_expense = sample_expense("e2", 80.0, ExpenseCategory::Travel, "2025-03-02T10:00:00Z");
        perth_expense.branch_id = Some("perth".to_string());

        DashboardSnapshot {
            students: vec![
                student_in("s1", "Wei Chen", ApplicationStatus::VisaGranted, None),
                student_in("s2", "Omar Haddad", ApplicationStatus::Applied, Some("main")),
                claimed,
                student_in("s4", "Lucia Rossi", ApplicationStatus::Lead, Some("perth")),
            ],
            invoices: vec![
                sample_invoice("i1", 100.0, InvoiceStatus::Paid),
                sample_invoice("i2", 50.0, InvoiceStatus::Pending),
                perth_invoice,
            ],
            expenses: vec![
                sample_expense("e1", 30.0, ExpenseCategory::Rent, "2025-03-01T10:00:00Z"),
                perth_expense,
            ],
            settings: AgencySettings::default(),
        }
    }

    #[test]
    fn test_revenue_split_by_status() {
        let service = AnalyticsService::new();
        let invoices = vec![
            sample_invoice("i1", 100.0, InvoiceStatus::Paid),
            sample_invoice("i2", 50.0, InvoiceStatus::Pending),
        ];
        assert_eq!(service.realized_revenue(&invoices), 100.0);
        assert_eq!(service.outstanding_revenue(&invoices), 50.0);
    }

    #[test]
    fn test_conversion_rate_empty_is_zero() {
        assert_eq!(AnalyticsService::new().conversion_rate(&[]), 0);
    }

    #[test]
    fn test_conversion_rate_rounds_percentage() {
        let service = AnalyticsService::new();
        let students = vec![
            sample_student("a", "A", ApplicationStatus::VisaGranted),
            sample_student("b", "B", ApplicationStatus::Applied),
            sample_student("c", "C", ApplicationStatus::Lead),
            sample_student("d", "D", ApplicationStatus::Alumni),
        ];
        assert_eq!(service.conversion_rate(&students), 25);
        assert_eq!(service.conversion_rate(&students[..3]), 33);
    }

    #[test]
    fn test_status_distribution_keeps_every_status_in_order() {
        let students = vec![
            sample_student("a", "A", ApplicationStatus::VisaGranted),
            sample_student("b", "B", ApplicationStatus::VisaGranted),
            sample_student("c", "C", ApplicationStatus::Applied),
        ];
        let distribution = AnalyticsService::new().status_distribution(&students);

        let expected = vec![
            (ApplicationStatus::Lead, 0),
            (ApplicationStatus::Applied, 1),
            (ApplicationStatus::OfferReceived, 0),
            (ApplicationStatus::VisaGranted, 2),
            (ApplicationStatus::VisaRejected, 0),
            (ApplicationStatus::Alumni, 0),
        ];
        let actual: Vec<(ApplicationStatus, usize)> =
            distribution.into_iter().map(|c| (c.status, c.count)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_commission_lists_filter_by_name_case_insensitively() {
        let service = AnalyticsService::new();
        let mut claimed = sample_student("c", "Ana Lima", ApplicationStatus::VisaGranted);
        claimed.commission_status = Some(CommissionStatus::Claimed);
        let mut pending = sample_student("p", "Wei Chen", ApplicationStatus::VisaGranted);
        pending.commission_status = Some(CommissionStatus::Pending);
        let students = vec![
            sample_student("u", "Weiland Ng", ApplicationStatus::VisaGranted),
            pending,
            sample_student("x", "Wei Applied", ApplicationStatus::Applied),
            claimed,
        ];

        let ready: Vec<String> = service
            .ready_to_claim(&students, "WEI")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ready, vec!["u", "p"]);

        assert_eq!(service.awaiting_receipt(&students, "").len(), 1);
        assert!(service.awaiting_receipt(&students, "chen").is_empty());
    }

    #[test]
    fn test_name_search_keeps_surrounding_spaces() {
        let service = AnalyticsService::new();
        let students = vec![
            sample_student("w", "Weiland Ng", ApplicationStatus::VisaGranted),
            sample_student("c", "Wei Chen", ApplicationStatus::VisaGranted),
        ];

        let ready: Vec<String> = service
            .ready_to_claim(&students, "wei ")
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ready, vec!["c"]);
    }

    #[test]
    fn test_dashboard_currency_comes_from_settings() {
        let mut data = snapshot();
        data.settings.currency = "AUD".to_string();

        let metrics = AnalyticsService::new().build_dashboard(&data, &DashboardQuery::default());
        assert_eq!(metrics.currency, "AUD");
    }

    #[test]
    fn test_dashboard_for_all_branches() {
        let metrics = AnalyticsService::new().build_dashboard(&snapshot(), &DashboardQuery::default());

        assert_eq!(metrics.realized_revenue, 500.0);
        assert_eq!(metrics.outstanding_revenue, 50.0);
        assert_eq!(metrics.total_expenses, 110.0);
        assert_eq!(metrics.net_profit, 390.0);
        assert_eq!(metrics.student_count, 4);
        assert_eq!(metrics.conversion_rate, 50);
        assert_eq!(metrics.currency, "USD");
        assert_eq!(metrics.ready_to_claim.len(), 1);
        assert_eq!(metrics.awaiting_receipt.len(), 1);
    }

    #[test]
    fn test_dashboard_only_uses_selected_branch() {
        let query = DashboardQuery {
            branch: BranchFilter::parse(Some("main")),
            search: String::new(),
        };
        let metrics = AnalyticsService::new().build_dashboard(&snapshot(), &query);

        assert_eq!(metrics.realized_revenue, 100.0);
        assert_eq!(metrics.outstanding_revenue, 50.0);
        assert_eq!(metrics.total_expenses, 30.0);
        assert_eq!(metrics.student_count, 2);
        assert_eq!(metrics.conversion_rate, 50);
        assert!(metrics.awaiting_receipt.is_empty());
        assert_eq!(metrics.commission_summary.ready_count, 1);
        assert_eq!(metrics.commission_summary.ready_value, 1500.0);
        assert_eq!(metrics.commission_summary.claimed_count, 0);
    }

    #[test]
    fn test_unknown_branch_yields_zeroes_not_errors() {
        let query = DashboardQuery {
            branch: BranchFilter::parse(Some("nowhere")),
            search: String::new(),
        };
        let metrics = AnalyticsService::new().build_dashboard(&snapshot(), &query);
        assert_eq!(metrics.student_count, 0);
        assert_eq!(metrics.conversion_rate, 0);
        assert_eq!(metrics.realized_revenue, 0.0);
        assert!(metrics.status_distribution.iter().all(|c| c.count == 0));
        assert_eq!(metrics.status_distribution.len(), 6);
    }

    #[test]
    fn test_build_dashboard_leaves_snapshot_untouched() {
        let before = snapshot();
        let copy = before.clone();
        let _ = AnalyticsService::new().build_dashboard(&before, &DashboardQuery::default());
        assert_eq!(before, copy);
    }

    #[test]
    fn test_expense_breakdown_covers_every_category() {
        let expenses = vec![
            sample_expense("e1", 30.0, ExpenseCategory::Rent, "2025-03-01T10:00:00Z"),
            sample_expense("e2", 20.0, ExpenseCategory::Rent, "2025-03-02T10:00:00Z"),
            sample_expense("e3", 5.0, ExpenseCategory::parse_lenient("Snacks"), "2025-03-03T10:00:00Z"),
        ];
        let breakdown = AnalyticsService::new().expense_breakdown(&expenses);

        assert_eq!(breakdown.len(), ExpenseCategory::ALL.len());
        let rent = breakdown.iter().find(|c| c.category == ExpenseCategory::Rent).unwrap();
        assert_eq!((rent.total, rent.count), (50.0, 2));
        let other = breakdown.iter().find(|c| c.category == ExpenseCategory::Other).unwrap();
        assert_eq!((other.total, other.count), (5.0, 1));
        let total: f64 = breakdown.iter().map(|c| c.total).sum();
        assert_eq!(total, 55.0);
    }

    #[test]
    fn test_trend_is_deterministic_and_flagged() {
        let service = AnalyticsService::new();
        let first = service.trend(1000.0, 200.0);
        let second = service.trend(1000.0, 200.0);

        assert_eq!(first, second);
        assert!(first.synthetic);
        assert_eq!(first.points.len(), 6);
        assert_eq!(first.points[0].label, "Jan");
        assert_eq!(first.points[5].revenue, 1000.0);
        assert_eq!(first.points[5].expenses, 200.0);
    }
}
