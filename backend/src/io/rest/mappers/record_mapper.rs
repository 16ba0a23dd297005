use shared::{
    AgencySettings as SharedSettings, Invoice as SharedInvoice, InvoiceListResponse,
    Student as SharedStudent, StudentListResponse,
};

use crate::domain::models::{
    invoice::Invoice as DomainInvoice, settings::AgencySettings as DomainSettings,
    student::Student as DomainStudent, Branched,
};

/// Mapper for students, invoices and settings. Defaults for missing
/// commission amounts, branches and currency are applied on the way out.
pub struct RecordMapper;

impl RecordMapper {
    pub fn to_student_dto(domain: &DomainStudent) -> SharedStudent {
        SharedStudent {
            id: domain.id.clone(),
            name: domain.name.clone(),
            email: domain.email.clone(),
            destination: domain.destination.clone(),
            status: domain.status,
            commission_status: domain.commission_status,
            commission_amount: domain.commission_value(),
            branch_id: domain.branch().to_string(),
        }
    }

    pub fn to_student_list_dto(students: &[DomainStudent]) -> StudentListResponse {
        StudentListResponse {
            students: students.iter().map(Self::to_student_dto).collect(),
        }
    }

    pub fn to_invoice_dto(domain: &DomainInvoice) -> SharedInvoice {
        SharedInvoice {
            id: domain.id.clone(),
            student_id: domain.student_id.clone(),
            description: domain.description.clone(),
            amount: domain.amount,
            status: domain.status,
            branch_id: domain.branch().to_string(),
        }
    }

    pub fn to_invoice_list_dto(invoices: &[DomainInvoice]) -> InvoiceListResponse {
        InvoiceListResponse {
            invoices: invoices.iter().map(Self::to_invoice_dto).collect(),
        }
    }

    pub fn to_settings_dto(domain: &DomainSettings) -> SharedSettings {
        SharedSettings {
            agency_name: domain.agency_name.clone(),
            currency: domain.display_currency().to_string(),
            branches: domain.branches.clone(),
        }
    }
}
