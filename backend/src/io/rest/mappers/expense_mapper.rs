use shared::{
    Expense as SharedExpense, ExpenseCategory, ExpenseListResponse, RecordExpenseRequest,
    RecordExpenseResponse,
};

use crate::domain::formatting::format_money;
use crate::domain::models::{expense::Expense as DomainExpense, Branched};
use crate::domain::{BranchFilter, ExpenseForm};

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(domain: &DomainExpense) -> SharedExpense {
        SharedExpense {
            id: domain.id.clone(),
            amount: domain.amount,
            category: domain.category,
            description: domain.description.clone(),
            date: domain.date.clone(),
            recorded_by: domain.recorded_by.clone(),
            branch_id: domain.branch().to_string(),
        }
    }

    pub fn to_list_dto(expenses: &[DomainExpense]) -> ExpenseListResponse {
        ExpenseListResponse {
            expenses: expenses.iter().map(Self::to_dto).collect(),
        }
    }

    /// Split a request into the raw form and the branch it is recorded under.
    /// Unknown categories land in `Other`.
    pub fn to_form(request: RecordExpenseRequest) -> (ExpenseForm, BranchFilter) {
        let branch = BranchFilter::parse(request.branch.as_deref());
        let form = ExpenseForm {
            amount: request.amount,
            category: ExpenseCategory::parse_lenient(&request.category),
            description: request.description,
        };
        (form, branch)
    }

    pub fn to_record_response(expense: &DomainExpense, currency: &str) -> RecordExpenseResponse {
        RecordExpenseResponse {
            expense: Self::to_dto(expense),
            success_message: format!(
                "Recorded {} expense of {}",
                expense.category,
                format_money(expense.amount, currency)
            ),
        }
    }
}
