use std::sync::atomic::Ordering;

use marathon_domain::id::PARTICIPANT_ID_LEN;
use marathon_notify::Template;
use marathon_participants::domain::types::MAX_ID_ATTEMPTS;
use marathon_participants::error::ParticipantsServiceError;
use marathon_participants::usecase::registration::{
    CheckDuplicateInput, CheckDuplicateUseCase, RegisterUseCase,
};
use marathon_testing::notify::RecordingNotifier;

use crate::helpers::{MockParticipantRepo, TEST_PHONE, form, participant};

fn register(repo: MockParticipantRepo) -> RegisterUseCase<MockParticipantRepo, RecordingNotifier> {
    RegisterUseCase {
        participants: repo,
        notifier: RecordingNotifier::new(),
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_store_participant_and_send_registration_message() {
    let repo = MockParticipantRepo::empty();
    let rows = repo.rows_handle();
    let uc = register(repo);
    let sent = uc.notifier.sent_handle();

    let p = uc.execute(form("Asha", "Rao", TEST_PHONE)).await.unwrap();

    assert_eq!(p.id.as_str().len(), PARTICIPANT_ID_LEN);
    assert!(!p.is_bib_given && !p.is_tshirt_given);
    assert_eq!(p.bib_num, None);
    assert_eq!(rows.lock().unwrap().len(), 1);

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, TEST_PHONE);
    assert_eq!(
        sent[0].1,
        Template::RegistrationSuccess {
            name: "Asha Rao".to_owned(),
            distance: "21K".to_owned(),
            participant_id: p.id.to_string(),
        }
    );
}

#[tokio::test]
async fn should_keep_registration_when_message_fails() {
    let repo = MockParticipantRepo::empty();
    let rows = repo.rows_handle();
    let uc = RegisterUseCase {
        participants: repo,
        notifier: RecordingNotifier::failing(),
    };

    let result = uc.execute(form("Asha", "Rao", TEST_PHONE)).await;

    assert!(result.is_ok());
    assert_eq!(rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_same_name_and_phone_case_insensitively() {
    let repo = MockParticipantRepo::new(vec![participant("Ab12Cd", "Asha", "Rao", 0)]);
    let rows = repo.rows_handle();
    let uc = register(repo);
    let sent = uc.notifier.sent_handle();

    let err = uc.execute(form("ASHA", "rao", TEST_PHONE)).await.unwrap_err();

    assert!(matches!(err, ParticipantsServiceError::DuplicateParticipant));
    assert_eq!(rows.lock().unwrap().len(), 1);
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_duplicate_caught_only_at_insert() {
    let repo = MockParticipantRepo {
        stale_duplicate_check: true,
        ..MockParticipantRepo::new(vec![participant("Ab12Cd", "Asha", "Rao", 0)])
    };
    let rows = repo.rows_handle();
    let uc = register(repo);
    let sent = uc.notifier.sent_handle();

    let err = uc.execute(form("asha", "RAO", TEST_PHONE)).await.unwrap_err();

    assert!(matches!(err, ParticipantsServiceError::DuplicateParticipant));
    assert_eq!(rows.lock().unwrap().len(), 1);
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_accept_same_name_with_different_phone() {
    let repo = MockParticipantRepo::new(vec![participant("Ab12Cd", "Asha", "Rao", 0)]);
    let rows = repo.rows_handle();

    register(repo)
        .execute(form("Asha", "Rao", "+919811111111"))
        .await
        .unwrap();

    assert_eq!(rows.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn should_regenerate_id_after_collision_on_check() {
    let repo = MockParticipantRepo {
        collisions_on_check: 3,
        ..MockParticipantRepo::empty()
    };
    let exists_calls = repo.exists_calls.clone();
    let insert_calls = repo.insert_calls.clone();

    register(repo).execute(form("Asha", "Rao", TEST_PHONE)).await.unwrap();

    assert_eq!(exists_calls.load(Ordering::SeqCst), 4);
    assert_eq!(insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn should_regenerate_id_when_insert_loses_race() {
    let repo = MockParticipantRepo {
        collisions_on_insert: 2,
        ..MockParticipantRepo::empty()
    };
    let rows = repo.rows_handle();
    let insert_calls = repo.insert_calls.clone();

    register(repo).execute(form("Asha", "Rao", TEST_PHONE)).await.unwrap();

    assert_eq!(insert_calls.load(Ordering::SeqCst), 3);
    assert_eq!(rows.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_give_up_after_max_id_attempts() {
    let repo = MockParticipantRepo {
        collisions_on_check: usize::MAX,
        ..MockParticipantRepo::empty()
    };
    let exists_calls = repo.exists_calls.clone();
    let rows = repo.rows_handle();

    let err = register(repo)
        .execute(form("Asha", "Rao", TEST_PHONE))
        .await
        .unwrap_err();

    assert!(matches!(err, ParticipantsServiceError::Internal(_)));
    assert_eq!(exists_calls.load(Ordering::SeqCst), MAX_ID_ATTEMPTS);
    assert!(rows.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_never_store_two_participants_under_one_id() {
    let repo = MockParticipantRepo::empty();
    let rows = repo.rows_handle();
    let uc = register(repo);

    for i in 0..50 {
        uc.execute(form("Runner", &format!("No{i}"), TEST_PHONE))
            .await
            .unwrap();
    }

    let rows = rows.lock().unwrap();
    let mut ids: Vec<_> = rows.iter().map(|p| p.id.to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[tokio::test]
async fn should_reject_missing_required_field_before_touching_store() {
    let repo = MockParticipantRepo::empty();
    let exists_calls = repo.exists_calls.clone();
    let mut incomplete = form("Asha", "Rao", TEST_PHONE);
    incomplete.distance = None;

    let err = register(repo).execute(incomplete).await.unwrap_err();

    assert!(matches!(err, ParticipantsServiceError::MissingField("Distance is required")));
    assert_eq!(exists_calls.load(Ordering::SeqCst), 0);
}

// ── CheckDuplicate ───────────────────────────────────────────────────────────

fn duplicate_input(first: &str, last: &str, phone: &str) -> CheckDuplicateInput {
    CheckDuplicateInput {
        first_name: Some(first.to_owned()),
        last_name: Some(last.to_owned()),
        phone_number: Some(phone.to_owned()),
    }
}

#[tokio::test]
async fn should_report_existing_registration() {
    let uc = CheckDuplicateUseCase {
        participants: MockParticipantRepo::new(vec![participant("Ab12Cd", "Asha", "Rao", 0)]),
    };
    assert!(uc.execute(duplicate_input(" asha ", "RAO", TEST_PHONE)).await.unwrap());
    assert!(!uc.execute(duplicate_input("Asha", "Rao", "+919811111111")).await.unwrap());
}

#[tokio::test]
async fn should_require_all_duplicate_fields() {
    let uc = CheckDuplicateUseCase {
        participants: MockParticipantRepo::empty(),
    };
    let err = uc
        .execute(CheckDuplicateInput {
            phone_number: None,
            ..duplicate_input("Asha", "Rao", "")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ParticipantsServiceError::MissingField("Missing required fields")));
}
