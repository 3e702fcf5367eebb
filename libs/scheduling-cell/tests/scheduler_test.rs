use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use notification_cell::EmailNotifier;
use scheduling_cell::models::{
    AppointmentStatus, PatientContact, PractitionerContact, ResourceKind, SchedulingError,
};
use scheduling_cell::{
    AppointmentCascade, AppointmentStore, FixedClock, PatientDirectory, PractitionerDirectory,
    SchedulingService,
};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 1, hour, minute, 0).unwrap()
}

// Canned directory: patients 1-10 exist (patient 7 with a broken email
// address), practitioners 10 and 11 exist.
struct StaticDirectory;

#[async_trait]
impl PatientDirectory for StaticDirectory {
    async fn find_patient(&self, patient_id: u64) -> Option<PatientContact> {
        let (full_name, email) = match patient_id {
            1 => ("Ana Silva".to_string(), "ana.silva@example.com".to_string()),
            7 => ("Bruno Costa".to_string(), "bruno.costa.example.com".to_string()),
            2..=10 => (
                format!("Test Patient {patient_id}"),
                format!("patient{patient_id}@example.com"),
            ),
            _ => return None,
        };
        Some(PatientContact {
            id: patient_id,
            full_name,
            email,
        })
    }
}

#[async_trait]
impl PractitionerDirectory for StaticDirectory {
    async fn find_practitioner(&self, practitioner_id: u64) -> Option<PractitionerContact> {
        let (full_name, specialty) = match practitioner_id {
            10 => ("Gregory House", "Cardiology"),
            11 => ("Meredith Grey", "Dermatology"),
            _ => return None,
        };
        Some(PractitionerContact {
            id: practitioner_id,
            full_name: full_name.to_string(),
            specialty: specialty.to_string(),
        })
    }
}

// The clock is pinned to 08:00 on the test day, so any `at(...)` from
// 08:00 onwards is in the future.
fn service() -> (SchedulingService, EmailNotifier) {
    let directory = Arc::new(StaticDirectory);
    let notifier = EmailNotifier::new();
    let scheduler = SchedulingService::new(
        AppointmentStore::new(),
        directory.clone(),
        directory,
        Arc::new(notifier.clone()),
        Arc::new(FixedClock(at(8, 0))),
    );
    (scheduler, notifier)
}

#[tokio::test]
async fn test_schedule_persists_and_confirms() {
    let (scheduler, notifier) = service();

    let appointment = scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    assert_eq!(appointment.id, 1);
    assert_eq!(appointment.patient_id, 1);
    assert_eq!(appointment.practitioner_id, 10);
    assert_eq!(appointment.start_time, at(9, 0));
    assert_eq!(appointment.end_time, at(9, 30));
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.notes.as_deref(), Some("Email status: Sent"));

    let stored = scheduler.get_appointment(appointment.id).await.unwrap();
    assert_eq!(stored, appointment);

    let history = notifier.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].recipient, "ana.silva@example.com");
    assert_eq!(
        history[0].subject,
        "Appointment confirmation with Dr. Gregory House"
    );
    assert_eq!(
        history[0].body,
        "Patient: Ana Silva\nDate: 2026-09-01 09:00\nPractitioner: Gregory House (Cardiology)"
    );
    assert!(history[0].delivered);
}

#[tokio::test]
async fn test_schedule_unknown_patient() {
    let (scheduler, notifier) = service();

    let err = scheduler.schedule(99, 10, at(9, 0), 30).await.unwrap_err();
    assert_matches!(err, SchedulingError::PatientNotFound(99));

    assert!(scheduler.get_all().await.is_empty());
    assert!(notifier.history().await.is_empty());
}

#[tokio::test]
async fn test_schedule_unknown_practitioner() {
    let (scheduler, _notifier) = service();

    let err = scheduler.schedule(1, 99, at(9, 0), 30).await.unwrap_err();
    assert_matches!(err, SchedulingError::PractitionerNotFound(99));
}

#[tokio::test]
async fn test_existence_is_checked_before_time_validation() {
    let (scheduler, _notifier) = service();

    // Bad patient AND bad time: the missing patient must be reported.
    let err = scheduler.schedule(99, 10, at(7, 0), 0).await.unwrap_err();
    assert_matches!(err, SchedulingError::PatientNotFound(99));
}

#[tokio::test]
async fn test_schedule_rejects_past_start() {
    let (scheduler, _notifier) = service();

    let err = scheduler.schedule(1, 10, at(7, 59), 30).await.unwrap_err();
    assert_matches!(err, SchedulingError::InvalidTime(_));
    assert!(scheduler.get_all().await.is_empty());
}

#[tokio::test]
async fn test_schedule_accepts_start_equal_to_now() {
    let (scheduler, _notifier) = service();

    scheduler
        .schedule(1, 10, at(8, 0), 30)
        .await
        .expect("start exactly at the current instant is allowed");
}

#[tokio::test]
async fn test_schedule_rejects_non_positive_duration() {
    let (scheduler, _notifier) = service();

    assert_matches!(
        scheduler.schedule(1, 10, at(9, 0), 0).await.unwrap_err(),
        SchedulingError::InvalidTime(_)
    );
    assert_matches!(
        scheduler.schedule(1, 10, at(9, 0), -15).await.unwrap_err(),
        SchedulingError::InvalidTime(_)
    );
    assert!(scheduler.get_all().await.is_empty());
}

#[tokio::test]
async fn test_schedule_rejects_out_of_range_duration() {
    let (scheduler, _notifier) = service();

    assert_matches!(
        scheduler
            .schedule(1, 10, at(9, 0), i64::MAX)
            .await
            .unwrap_err(),
        SchedulingError::InvalidTime(_)
    );
    // Within the duration type's range but past the end of the calendar.
    assert_matches!(
        scheduler
            .schedule(1, 10, at(9, 0), 200_000_000_000)
            .await
            .unwrap_err(),
        SchedulingError::InvalidTime(_)
    );
    assert!(scheduler.get_all().await.is_empty());
}

#[tokio::test]
async fn test_practitioner_double_booking_rejected() {
    let (scheduler, notifier) = service();
    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    let err = scheduler.schedule(2, 10, at(9, 15), 30).await.unwrap_err();
    assert_matches!(
        err,
        SchedulingError::Conflict {
            resource: ResourceKind::Practitioner
        }
    );
    assert_eq!(
        err.to_string(),
        "The practitioner has another appointment at that time"
    );

    assert_eq!(scheduler.get_all().await.len(), 1);
    assert_eq!(
        notifier.history().await.len(),
        1,
        "No email for a rejected booking"
    );
}

#[tokio::test]
async fn test_patient_double_booking_rejected() {
    let (scheduler, _notifier) = service();
    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    // Different practitioner, same patient, overlapping window.
    let err = scheduler.schedule(1, 11, at(9, 15), 30).await.unwrap_err();
    assert_matches!(
        err,
        SchedulingError::Conflict {
            resource: ResourceKind::Patient
        }
    );
    assert_eq!(
        err.to_string(),
        "The patient has another appointment at that time"
    );
}

#[tokio::test]
async fn test_practitioner_conflict_reported_when_both_collide() {
    let (scheduler, _notifier) = service();
    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    // Same patient and same practitioner: both calendars collide, the
    // practitioner side is the one reported.
    let err = scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap_err();
    assert_matches!(
        err,
        SchedulingError::Conflict {
            resource: ResourceKind::Practitioner
        }
    );
}

#[tokio::test]
async fn test_back_to_back_appointments_are_not_conflicts() {
    let (scheduler, _notifier) = service();
    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    let after = scheduler.schedule(2, 10, at(9, 30), 30).await.unwrap();
    assert_eq!(after.start_time, at(9, 30));

    let before = scheduler.schedule(3, 10, at(8, 30), 30).await.unwrap();
    assert_eq!(before.end_time, at(9, 0));
}

#[tokio::test]
async fn test_cancel_frees_the_slot() {
    let (scheduler, _notifier) = service();
    let appointment = scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    let cancelled = scheduler.cancel(appointment.id).await.unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    // The record survives, but the slot is open again.
    let rebooked = scheduler.schedule(2, 10, at(9, 0), 30).await.unwrap();
    assert_eq!(rebooked.status, AppointmentStatus::Scheduled);
    assert_eq!(scheduler.get_all().await.len(), 2);
}

#[tokio::test]
async fn test_cancel_unknown_appointment() {
    let (scheduler, _notifier) = service();

    assert_matches!(
        scheduler.cancel(404).await,
        Err(SchedulingError::AppointmentNotFound(404))
    );
}

#[tokio::test]
async fn test_attended_slot_is_reusable() {
    let (scheduler, _notifier) = service();
    let appointment = scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    let attended = scheduler.mark_attended(appointment.id).await.unwrap();
    assert_eq!(attended.status, AppointmentStatus::Attended);

    scheduler
        .schedule(2, 10, at(9, 0), 30)
        .await
        .expect("attended appointments no longer block the calendar");
}

#[tokio::test]
async fn test_transitions_have_no_terminal_guard() {
    let (scheduler, _notifier) = service();
    let appointment = scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    scheduler.mark_attended(appointment.id).await.unwrap();
    let reverted = scheduler.cancel(appointment.id).await.unwrap();
    assert_eq!(reverted.status, AppointmentStatus::Cancelled);

    let again = scheduler.cancel(appointment.id).await.unwrap();
    assert_eq!(again.status, AppointmentStatus::Cancelled);
}

#[tokio::test]
async fn test_delete_removes_the_record_entirely() {
    let (scheduler, _notifier) = service();
    let appointment = scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();

    scheduler.delete(appointment.id).await.unwrap();

    assert_matches!(
        scheduler.get_appointment(appointment.id).await,
        Err(SchedulingError::AppointmentNotFound(_))
    );
    assert_matches!(
        scheduler.delete(appointment.id).await,
        Err(SchedulingError::AppointmentNotFound(_))
    );

    // The slot is free again as well.
    scheduler.schedule(2, 10, at(9, 0), 30).await.unwrap();
}

#[tokio::test]
async fn test_failed_email_does_not_roll_back_the_booking() {
    let (scheduler, notifier) = service();

    // Patient 7's address has no '@', so delivery fails.
    let appointment = scheduler.schedule(7, 10, at(9, 0), 30).await.unwrap();
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.notes.as_deref(), Some("Email status: Not sent"));

    let stored = scheduler.get_appointment(appointment.id).await.unwrap();
    assert_eq!(stored.notes.as_deref(), Some("Email status: Not sent"));

    let history = notifier.history().await;
    assert_eq!(history.len(), 1);
    assert!(!history[0].delivered);
}

#[tokio::test]
async fn test_cascade_delete_for_patient() {
    let (scheduler, _notifier) = service();

    let kept = scheduler.schedule(2, 10, at(8, 0), 30).await.unwrap();
    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();
    let second = scheduler.schedule(1, 11, at(10, 0), 30).await.unwrap();
    let third = scheduler.schedule(1, 10, at(11, 0), 30).await.unwrap();
    // Terminal statuses are swept too.
    scheduler.cancel(second.id).await.unwrap();
    scheduler.mark_attended(third.id).await.unwrap();

    let removed = scheduler
        .cascade_delete_for_resource(1, ResourceKind::Patient)
        .await
        .unwrap();
    assert_eq!(removed, 3);

    assert!(scheduler.get_by_patient(1).await.is_empty());
    let survivors: Vec<u64> = scheduler.get_all().await.iter().map(|a| a.id).collect();
    assert_eq!(survivors, vec![kept.id]);

    // Nothing left to sweep on a second pass.
    let removed_again = scheduler
        .cascade_delete_for_resource(1, ResourceKind::Patient)
        .await
        .unwrap();
    assert_eq!(removed_again, 0);
}

#[tokio::test]
async fn test_cascade_delete_for_practitioner() {
    let (scheduler, _notifier) = service();

    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();
    scheduler.schedule(2, 10, at(10, 0), 30).await.unwrap();
    let other = scheduler.schedule(3, 11, at(9, 0), 30).await.unwrap();

    let removed = scheduler
        .cascade_delete_for_resource(10, ResourceKind::Practitioner)
        .await
        .unwrap();
    assert_eq!(removed, 2);

    assert!(scheduler.get_by_practitioner(10).await.is_empty());
    let survivors = scheduler.get_all().await;
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, other.id);
}

#[tokio::test]
async fn test_concurrent_booking_admits_exactly_one() {
    let (scheduler, _notifier) = service();

    let mut handles = Vec::new();
    for i in 0..10 {
        let scheduler = scheduler.clone();
        handles.push(tokio::spawn(async move {
            scheduler.schedule(i + 1, 10, at(9, 0), 30).await
        }));
    }

    let mut booked = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => booked += 1,
            Err(SchedulingError::Conflict { .. }) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(booked, 1);
    assert_eq!(conflicts, 9);
    assert_eq!(scheduler.get_all().await.len(), 1);
}

#[tokio::test]
async fn test_cascade_closes_the_calendar_against_racing_bookings() {
    let (scheduler, _notifier) = service();

    scheduler.schedule(1, 10, at(9, 0), 30).await.unwrap();
    scheduler.schedule(1, 10, at(10, 0), 30).await.unwrap();
    scheduler.schedule(1, 10, at(11, 0), 30).await.unwrap();

    // Bookings in distinct one-minute slots, so none can conflict: each
    // either lands before the sweep or is turned away after it.
    let mut handles = Vec::new();
    for i in 0..20u32 {
        let scheduler = scheduler.clone();
        handles.push(tokio::spawn(async move {
            scheduler.schedule(1, 11, at(13, i), 1).await
        }));
    }

    let removed = scheduler
        .cascade_delete_for_resource(1, ResourceKind::Patient)
        .await
        .unwrap();
    assert!(removed >= 3);

    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) | Err(SchedulingError::PatientNotFound(1)) => {}
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    // No appointment survives the teardown, however the tasks interleaved.
    assert!(scheduler.get_by_patient(1).await.is_empty());

    // The calendar stays closed even though the directory still resolves
    // the patient.
    assert_matches!(
        scheduler.schedule(1, 10, at(15, 0), 30).await.unwrap_err(),
        SchedulingError::PatientNotFound(1)
    );
}
