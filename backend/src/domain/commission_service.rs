//! Commission claim workflow.
//!
//! A student's commission moves Pending -> Claimed -> Received and never back.
//! Claims and receipt confirmations each run behind their own single-flight
//! guard: while one claim is being persisted, any other claim request (for any
//! student) is turned away as [`Guarded::Busy`].

use tracing::{info, warn};

use super::dashboard_store::DashboardStore;
use super::errors::{Guarded, WorkflowError};
use super::models::student::{CommissionTransitionError, Student};
use super::single_flight::SingleFlight;
use crate::storage::Connection;

type Transition = fn(&Student) -> Result<Student, CommissionTransitionError>;

#[derive(Clone)]
pub struct CommissionService<C: Connection> {
    store: DashboardStore<C>,
    claim_flight: SingleFlight,
    receipt_flight: SingleFlight,
}

impl<C: Connection> CommissionService<C> {
    pub fn new(store: DashboardStore<C>) -> Self {
        Self {
            store,
            claim_flight: SingleFlight::new("commission-claim"),
            receipt_flight: SingleFlight::new("commission-receipt"),
        }
    }

    /// Mark a student's commission as claimed
    pub async fn claim(&self, student_id: &str) -> Result<Guarded<Student>, WorkflowError> {
        let Some(_permit) = self.claim_flight.try_acquire() else {
            info!("Claim for {} ignored, another claim is in flight", student_id);
            return Ok(Guarded::Busy);
        };

        let student = self.advance(student_id, Student::with_commission_claimed).await?;
        info!("Commission claimed for {} ({})", student.name, student.id);
        Ok(Guarded::Applied(student))
    }

    /// Mark a claimed commission as received
    pub async fn confirm_receipt(
        &self,
        student_id: &str,
    ) -> Result<Guarded<Student>, WorkflowError> {
        let Some(_permit) = self.receipt_flight.try_acquire() else {
            info!("Receipt for {} ignored, another confirmation is in flight", student_id);
            return Ok(Guarded::Busy);
        };

        let student = self.advance(student_id, Student::with_commission_received).await?;
        info!("Commission received for {} ({})", student.name, student.id);
        Ok(Guarded::Applied(student))
    }

    pub fn claim_in_flight(&self) -> bool {
        self.claim_flight.is_in_flight()
    }

    pub fn receipt_in_flight(&self) -> bool {
        self.receipt_flight.is_in_flight()
    }

    async fn advance(
        &self,
        student_id: &str,
        transition: Transition,
    ) -> Result<Student, WorkflowError> {
        let result = self
            .store
            .update_students(|students: &mut Vec<Student>| -> Result<Student, WorkflowError> {
                let student = students
                    .iter_mut()
                    .find(|s| s.id == student_id)
                    .ok_or_else(|| WorkflowError::student_not_found(student_id))?;
                let updated = transition(student)?;
                *student = updated.clone();
                Ok(updated)
            })
            .await;

        if let Err(e) = &result {
            warn!("Commission update for {} failed: {}", student_id, e);
        }
        result
    }
}
