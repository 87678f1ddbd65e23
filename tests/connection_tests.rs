
use chrono::{Duration, Utc};
use mockall::predicate::*;
use uuid::Uuid;

use mentor_bridge::{
    entities::connection::{
        ConnectionParty, ConnectionRequest, ConnectionStatus, NewConnectionRequest,
        UpdateConnectionStatus,
    },
    errors::AppError,
    settings::LifecycleSettings,
    use_cases::connections::ConnectionHandler,
};
use test_utils::{pending_request, MockAlumniRepo, MockConnectionRepo, MockStudentRepo};

type Handler = ConnectionHandler<MockConnectionRepo, MockStudentRepo, MockAlumniRepo>;

fn handler(connections: MockConnectionRepo, students: MockStudentRepo, alumni: MockAlumniRepo) -> Handler {
    ConnectionHandler::new(connections, students, alumni, LifecycleSettings::default())
}

fn parties_exist() -> (MockStudentRepo, MockAlumniRepo) {
    let mut students = MockStudentRepo::new();
    students.expect_student_exists().returning(|_| Ok(true));
    let mut alumni = MockAlumniRepo::new();
    alumni.expect_alumnus_exists().returning(|_| Ok(true));
    (students, alumni)
}

// === Create ===

#[actix_rt::test]
async fn test_create_request_success() {
    let (students, alumni) = parties_exist();
    let student_id = Uuid::new_v4();
    let alumni_id = Uuid::new_v4();

    let mut connections = MockConnectionRepo::new();
    connections.expect_find_pending()
        .returning(|_, _| Ok(None));
    connections.expect_create_request()
        .withf(move |s, a| *s == student_id && *a == alumni_id)
        .times(1)
        .returning(|s, a| Ok(pending_request(*s, *a, Utc::now())));

    let created = handler(connections, students, alumni)
        .create_request(NewConnectionRequest { student_id, alumni_id })
        .await
        .unwrap();

    assert_eq!(created.status, ConnectionStatus::Pending);
    assert_eq!(created.student_id, student_id);
}

#[actix_rt::test]
async fn test_create_request_duplicate_pending_conflicts() {
    let (students, alumni) = parties_exist();
    let student_id = Uuid::new_v4();
    let alumni_id = Uuid::new_v4();

    let mut connections = MockConnectionRepo::new();
    connections.expect_find_pending()
        .returning(move |_, _| Ok(Some(pending_request(student_id, alumni_id, Utc::now()))));
    connections.expect_create_request().times(0);

    let result = handler(connections, students, alumni)
        .create_request(NewConnectionRequest { student_id, alumni_id })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[actix_rt::test]
async fn test_create_request_unknown_student_is_not_found() {
    let mut students = MockStudentRepo::new();
    students.expect_student_exists().returning(|_| Ok(false));
    let alumni = MockAlumniRepo::new();
    let mut connections = MockConnectionRepo::new();
    connections.expect_create_request().times(0);

    let result = handler(connections, students, alumni)
        .create_request(NewConnectionRequest {
            student_id: Uuid::new_v4(),
            alumni_id: Uuid::new_v4(),
        })
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Student not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[actix_rt::test]
async fn test_create_request_unknown_alumnus_is_not_found() {
    let mut students = MockStudentRepo::new();
    students.expect_student_exists().returning(|_| Ok(true));
    let mut alumni = MockAlumniRepo::new();
    alumni.expect_alumnus_exists().returning(|_| Ok(false));

    let result = handler(MockConnectionRepo::new(), students, alumni)
        .create_request(NewConnectionRequest {
            student_id: Uuid::new_v4(),
            alumni_id: Uuid::new_v4(),
        })
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Alumni not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

// === Listing with auto-accept ===

#[actix_rt::test]
async fn test_listing_after_window_accepts_pending_request() {
    let (students, alumni) = parties_exist();
    let t = Utc::now() - Duration::hours(1);
    let student_id = Uuid::new_v4();
    let request = pending_request(student_id, Uuid::new_v4(), t);
    let request_id = request.id;

    let mut connections = MockConnectionRepo::new();
    let listed = request.clone();
    connections.expect_list_by_party()
        .with(eq(ConnectionParty::Student(student_id)))
        .times(1)
        .returning(move |_| Ok(vec![listed.clone()]));
    connections.expect_mark_accepted()
        .withf(move |ids| ids == [request_id])
        .times(1)
        .returning(move |_| {
            Ok(vec![ConnectionRequest {
                status: ConnectionStatus::Accepted,
                updated_at: t + Duration::seconds(61),
                ..request.clone()
            }])
        });

    let requests = handler(connections, students, alumni)
        .list_for_student_at(&student_id.to_string(), t + Duration::seconds(61))
        .await
        .unwrap();

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, ConnectionStatus::Accepted);
}

#[actix_rt::test]
async fn test_listing_inside_window_leaves_request_pending() {
    let (students, alumni) = parties_exist();
    let t = Utc::now();
    let alumni_id = Uuid::new_v4();
    let request = pending_request(Uuid::new_v4(), alumni_id, t);

    let mut connections = MockConnectionRepo::new();
    connections.expect_list_by_party()
        .with(eq(ConnectionParty::Alumnus(alumni_id)))
        .returning(move |_| Ok(vec![request.clone()]));
    connections.expect_mark_accepted().times(0);

    let requests = handler(connections, students, alumni)
        .list_for_alumnus_at(&alumni_id.to_string(), t + Duration::seconds(30))
        .await
        .unwrap();

    assert_eq!(requests[0].status, ConnectionStatus::Pending);
}

#[actix_rt::test]
async fn test_listing_never_reopens_rejected_request() {
    let (students, alumni) = parties_exist();
    let t = Utc::now() - Duration::days(1);
    let student_id = Uuid::new_v4();
    let mut rejected = pending_request(student_id, Uuid::new_v4(), t);
    rejected.status = ConnectionStatus::Rejected;

    let mut connections = MockConnectionRepo::new();
    connections.expect_list_by_party()
        .returning(move |_| Ok(vec![rejected.clone()]));
    connections.expect_mark_accepted().times(0);

    let requests = handler(connections, students, alumni)
        .list_for_student(&student_id.to_string())
        .await
        .unwrap();

    assert_eq!(requests[0].status, ConnectionStatus::Rejected);
}

#[actix_rt::test]
async fn test_failed_sweep_write_fails_listing() {
    let (students, alumni) = parties_exist();
    let t = Utc::now() - Duration::minutes(5);
    let student_id = Uuid::new_v4();
    let request = pending_request(student_id, Uuid::new_v4(), t);

    let mut connections = MockConnectionRepo::new();
    connections.expect_list_by_party()
        .returning(move |_| Ok(vec![request.clone()]));
    connections.expect_mark_accepted()
        .returning(|_| Err(AppError::InternalError("connection reset".into())));

    let result = handler(connections, students, alumni)
        .list_for_student(&student_id.to_string())
        .await;

    assert!(matches!(result, Err(AppError::InternalError(_))));
}

#[actix_rt::test]
async fn test_concurrent_change_during_sweep_relists() {
    let (students, alumni) = parties_exist();
    let t = Utc::now() - Duration::minutes(5);
    let student_id = Uuid::new_v4();
    let request = pending_request(student_id, Uuid::new_v4(), t);

    let mut rejected_meanwhile = request.clone();
    rejected_meanwhile.status = ConnectionStatus::Rejected;

    let mut seq = mockall::Sequence::new();
    let mut connections = MockConnectionRepo::new();
    connections.expect_list_by_party()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_| Ok(vec![request.clone()]));
    connections.expect_mark_accepted()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(vec![]));
    connections.expect_list_by_party()
        .times(1)
        .in_sequence(&mut seq)
        .returning(move |_| Ok(vec![rejected_meanwhile.clone()]));

    let requests = handler(connections, students, alumni)
        .list_for_student(&student_id.to_string())
        .await
        .unwrap();

    assert_eq!(requests[0].status, ConnectionStatus::Rejected);
}

// === Manual status ===

#[actix_rt::test]
async fn test_set_status_parses_case_insensitively() {
    let (students, alumni) = parties_exist();
    let request = pending_request(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
    let request_id = request.id;

    let mut connections = MockConnectionRepo::new();
    connections.expect_update_status()
        .with(eq(request_id), eq(ConnectionStatus::Rejected))
        .times(1)
        .returning(move |_, status| Ok(ConnectionRequest { status, ..request.clone() }));

    let updated = handler(connections, students, alumni)
        .set_status(&request_id.to_string(), UpdateConnectionStatus { status: "rejected".into() })
        .await
        .unwrap();

    assert_eq!(updated.status, ConnectionStatus::Rejected);
}

#[actix_rt::test]
async fn test_set_status_rejects_unknown_value() {
    let (students, alumni) = parties_exist();
    let mut connections = MockConnectionRepo::new();
    connections.expect_update_status().times(0);

    let result = handler(connections, students, alumni)
        .set_status(&Uuid::new_v4().to_string(), UpdateConnectionStatus { status: "archived".into() })
        .await;

    assert!(matches!(result, Err(AppError::InvalidArgument(_))));
}

#[actix_rt::test]
async fn test_set_status_unknown_request_is_not_found() {
    let (students, alumni) = parties_exist();
    let mut connections = MockConnectionRepo::new();
    connections.expect_update_status()
        .returning(|_, _| Err(AppError::NotFound("Record not found".into())));

    let result = handler(connections, students, alumni)
        .set_status(&Uuid::new_v4().to_string(), UpdateConnectionStatus { status: "Accepted".into() })
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Connection request not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[actix_rt::test]
async fn test_manual_transition_can_reopen_accepted_request() {
    let (students, alumni) = parties_exist();
    let mut accepted = pending_request(Uuid::new_v4(), Uuid::new_v4(), Utc::now());
    accepted.status = ConnectionStatus::Accepted;
    let request_id = accepted.id;

    let mut connections = MockConnectionRepo::new();
    connections.expect_update_status()
        .returning(move |_, status| Ok(ConnectionRequest { status, ..accepted.clone() }));

    let updated = handler(connections, students, alumni)
        .set_status(&request_id.to_string(), UpdateConnectionStatus { status: "Pending".into() })
        .await
        .unwrap();

    assert_eq!(updated.status, ConnectionStatus::Pending);
}
