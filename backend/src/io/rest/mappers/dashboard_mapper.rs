use shared::{DashboardResponse, FormattedTotals};

use super::record_mapper::RecordMapper;
use crate::domain::formatting::{format_count, format_money};
use crate::domain::DashboardMetrics;

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_response(metrics: DashboardMetrics) -> DashboardResponse {
        let currency = metrics.currency.as_str();
        let formatted = FormattedTotals {
            realized_revenue: format_money(metrics.realized_revenue, currency),
            outstanding_revenue: format_money(metrics.outstanding_revenue, currency),
            total_expenses: format_money(metrics.total_expenses, currency),
            net_profit: format_money(metrics.net_profit, currency),
            student_count: format_count(metrics.student_count),
        };

        DashboardResponse {
            branch: metrics.branch.to_string(),
            currency: metrics.currency.clone(),
            realized_revenue: metrics.realized_revenue,
            outstanding_revenue: metrics.outstanding_revenue,
            total_expenses: metrics.total_expenses,
            net_profit: metrics.net_profit,
            conversion_rate: metrics.conversion_rate,
            student_count: metrics.student_count,
            status_distribution: metrics.status_distribution,
            ready_to_claim: metrics.ready_to_claim.iter().map(RecordMapper::to_student_dto).collect(),
            awaiting_receipt: metrics.awaiting_receipt.iter().map(RecordMapper::to_student_dto).collect(),
            commission_summary: metrics.commission_summary,
            expense_breakdown: metrics.expense_breakdown,
            trend: metrics.trend,
            formatted,
        }
    }
}
