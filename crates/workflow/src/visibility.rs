//! Role-scoped request visibility.

use stipend_core::{Actor, RequestStatus, RequestSummary, Role};

/// Decide whether `actor` may see `request`.
///
/// Employees are ownership-scoped while supervisors are
/// department-scoped: a supervisor sees every request in their
/// department, not only the ones awaiting their review. HR sees anything
/// that has left draft; finance only what has cleared HR.
///
/// Pure and uncached: callers re-evaluate on every access so a status
/// change is reflected immediately.
#[must_use]
pub fn can_view(actor: &Actor, request: &RequestSummary) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Employee => actor.id == request.employee_id,
        Role::Supervisor => actor.department == request.department,
        Role::Hr => request.status != RequestStatus::Draft,
        Role::Finance => matches!(
            request.status,
            RequestStatus::ApprovedByHr
                | RequestStatus::Processed
                | RequestStatus::RejectedByFinance
        ),
    }
}
