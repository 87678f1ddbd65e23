
use uuid::Uuid;

use mentor_bridge::{
    entities::email::EmailToMentor,
    errors::AppError,
    use_cases::email::EmailHandler,
};
use test_utils::{alumnus, student, MockAlumniRepo, MockSmtpMailer, MockStudentRepo};

const MENTOR_INBOX: &str = "mentors@mentorbridge.io";

fn email_request() -> EmailToMentor {
    EmailToMentor {
        student_id: Uuid::new_v4(),
        alumni_id: Uuid::new_v4(),
        subject: "Guidance on ML roles".into(),
        message: "Could you review my resume?".into(),
    }
}

fn repos(student_found: bool) -> (MockStudentRepo, MockAlumniRepo) {
    let mut students = MockStudentRepo::new();
    students.expect_get_student_by_id()
        .returning(move |_| Ok(student_found.then(|| student(Some("Python")))));
    let mut alumni = MockAlumniRepo::new();
    alumni.expect_get_alumnus_by_id()
        .returning(|_| Ok(Some(alumnus("ALU7", None, true))));
    (students, alumni)
}

#[actix_rt::test]
async fn test_mail_goes_to_inbox_with_student_reply_to() {
    let (students, alumni) = repos(true);
    let mut mailer = MockSmtpMailer::new();
    mailer.expect_send()
        .withf(|email| {
            email.to == MENTOR_INBOX
                && email.reply_to == "priya@college.edu"
                && email.from_name == "Priya Raman"
                && email.body.contains("Could you review my resume?")
                && email.body.contains("ALU7")
        })
        .times(1)
        .returning(|_| Ok(()));

    let response = EmailHandler::new(students, alumni, mailer, MENTOR_INBOX.to_string())
        .send_to_mentor(email_request())
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.sent_to, MENTOR_INBOX);
    assert_eq!(response.reply_to, "priya@college.edu");
}

#[actix_rt::test]
async fn test_missing_party_is_not_found() {
    let (students, alumni) = repos(false);
    let mut mailer = MockSmtpMailer::new();
    mailer.expect_send().times(0);

    let result = EmailHandler::new(students, alumni, mailer, MENTOR_INBOX.to_string())
        .send_to_mentor(email_request())
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Student or Alumni not found"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[actix_rt::test]
async fn test_relay_failure_is_upstream_unavailable() {
    let (students, alumni) = repos(true);
    let mut mailer = MockSmtpMailer::new();
    mailer.expect_send()
        .times(1)
        .returning(|_| Err(AppError::UpstreamUnavailable("Failed to send email.".into())));

    let result = EmailHandler::new(students, alumni, mailer, MENTOR_INBOX.to_string())
        .send_to_mentor(email_request())
        .await;

    assert!(matches!(result, Err(AppError::UpstreamUnavailable(_))));
}

#[actix_rt::test]
async fn test_empty_subject_fails_validation() {
    let (students, alumni) = repos(true);
    let mut mailer = MockSmtpMailer::new();
    mailer.expect_send().times(0);

    let request = EmailToMentor { subject: String::new(), ..email_request() };
    let result = EmailHandler::new(students, alumni, mailer, MENTOR_INBOX.to_string())
        .send_to_mentor(request)
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}
