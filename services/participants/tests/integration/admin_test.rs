use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use marathon_domain::id::AdminId;
use marathon_notify::{Template, TicketDetails};
use marathon_participants::domain::stats::{Bucket, CounterRow, StatsSnapshot, TREND_DAYS};
use marathon_participants::domain::types::{CheckIn, ParticipantUpdate};
use marathon_participants::error::ParticipantsServiceError;
use marathon_participants::usecase::admin::{
    CheckInUseCase, LogScanInput, LogScanUseCase, UpdateParticipantUseCase,
};
use marathon_participants::usecase::lookup::{
    CheckParticipantUseCase, GetParticipantUseCase, ListPassesUseCase, RelatedParticipantsUseCase,
};
use marathon_participants::usecase::stats::DashboardStatsUseCase;
use marathon_participants::usecase::ticket::SendTicketUseCase;
use marathon_testing::notify::RecordingNotifier;

use crate::helpers::{
    MockParticipantRepo, MockScanLogRepo, MockStatsRepo, TEST_PHONE, participant, with_bib,
    with_phone,
};

const PLACEHOLDER: &str = "https://cdn.example.com/placeholder.png";

fn family() -> MockParticipantRepo {
    MockParticipantRepo::new(vec![
        participant("Fam003", "Chitra", "Rao", 3),
        participant("Fam001", "Asha", "Rao", 1),
        participant("Fam002", "Bina", "Rao", 2),
        with_phone(participant("Other1", "Dev", "Iyer", 4), "+919811111111"),
    ])
}

// ── Lookups ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_not_found_for_unknown_or_malformed_id() {
    let uc = GetParticipantUseCase {
        participants: family(),
    };
    assert!(matches!(
        uc.execute("Zzz999").await.unwrap_err(),
        ParticipantsServiceError::ParticipantNotFound
    ));
    assert!(matches!(
        uc.execute("not an id").await.unwrap_err(),
        ParticipantsServiceError::ParticipantNotFound
    ));
    assert_eq!(uc.execute("Fam002").await.unwrap().first_name, "Bina");
}

#[tokio::test]
async fn should_list_passes_for_phone_by_first_name() {
    let uc = ListPassesUseCase {
        participants: family(),
    };
    let passes = uc.execute(TEST_PHONE).await.unwrap();
    let names: Vec<_> = passes.iter().map(|p| p.first_name.as_str()).collect();
    assert_eq!(names, ["Asha", "Bina", "Chitra"]);
}

#[tokio::test]
async fn should_list_related_excluding_self() {
    let uc = RelatedParticipantsUseCase {
        participants: family(),
    };
    let related = uc.execute("Fam002").await.unwrap();
    let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["Fam001", "Fam003"]);

    assert!(uc.execute("Other1").await.unwrap().is_empty());
    assert!(matches!(
        uc.execute("Zzz999").await.unwrap_err(),
        ParticipantsServiceError::ParticipantNotFound
    ));
}

#[tokio::test]
async fn should_check_existence_without_failing_on_bad_id() {
    let uc = CheckParticipantUseCase {
        participants: family(),
    };
    assert!(uc.execute("Fam001").await.unwrap());
    assert!(!uc.execute("Zzz999").await.unwrap());
    assert!(!uc.execute("../etc").await.unwrap());
}

// ── Update ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_write_only_supplied_fields() {
    let repo = MockParticipantRepo::new(vec![with_bib(participant("Fam001", "Asha", "Rao", 1), "42")]);
    let rows = repo.rows_handle();
    let uc = UpdateParticipantUseCase { participants: repo };

    let updated = uc
        .execute(
            "Fam001",
            ParticipantUpdate {
                tshirt_size: Some("XL".to_owned()),
                middle_name: Some(Some("K".to_owned())),
                bib_num: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.tshirt_size, "XL");
    assert_eq!(updated.middle_name.as_deref(), Some("K"));
    assert_eq!(updated.bib_num, None);
    assert_eq!(updated.first_name, "Asha");
    assert!(updated.updated_at > updated.created_at);
    assert_eq!(rows.lock().unwrap()[0], updated);
}

#[tokio::test]
async fn should_reject_blanking_required_field() {
    let uc = UpdateParticipantUseCase {
        participants: family(),
    };
    let err = uc
        .execute(
            "Fam001",
            ParticipantUpdate {
                first_name: Some("  ".to_owned()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ParticipantsServiceError::Validation(_)));
}

#[tokio::test]
async fn should_return_not_found_when_updating_unknown_participant() {
    let uc = UpdateParticipantUseCase {
        participants: family(),
    };
    let err = uc
        .execute("Zzz999", ParticipantUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ParticipantsServiceError::ParticipantNotFound));
}

// ── Check-in ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_check_in_desk_fields() {
    let uc = CheckInUseCase {
        participants: family(),
    };
    let p = uc
        .execute(
            "Fam001",
            CheckIn {
                bib_num: Some(Some("1042".to_owned())),
                counter_no: Some(Some("C2".to_owned())),
                is_bib_given: Some(true),
                is_tshirt_given: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(p.bib_num.as_deref(), Some("1042"));
    assert_eq!(p.counter_no.as_deref(), Some("C2"));
    assert!(p.is_bib_given);
    assert!(!p.is_tshirt_given);
}

#[tokio::test]
async fn should_require_at_least_one_check_in_field() {
    let uc = CheckInUseCase {
        participants: family(),
    };
    let err = uc.execute("Fam001", CheckIn::default()).await.unwrap_err();
    assert!(matches!(err, ParticipantsServiceError::MissingField(_)));
}

// ── Log scan ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_scan_with_admin_from_token() {
    let scans = MockScanLogRepo::default();
    let logs = scans.logs_handle();
    let admin_id = AdminId(Uuid::new_v4());
    let uc = LogScanUseCase {
        participants: family(),
        scans,
    };

    let log = uc
        .execute(LogScanInput {
            user_id: Some("Fam002".to_owned()),
            admin_id,
        })
        .await
        .unwrap();

    assert_eq!(log.participant_id.as_str(), "Fam002");
    assert_eq!(log.admin_id, admin_id);
    assert_eq!(logs.lock().unwrap().as_slice(), [log]);
}

#[tokio::test]
async fn should_require_user_id_for_scan() {
    let scans = MockScanLogRepo::default();
    let logs = scans.logs_handle();
    let uc = LogScanUseCase {
        participants: family(),
        scans,
    };

    for user_id in [None, Some(String::new()), Some("  ".to_owned())] {
        let err = uc
            .execute(LogScanInput {
                user_id,
                admin_id: AdminId(Uuid::new_v4()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ParticipantsServiceError::MissingField("User ID is required")));
    }
    assert!(logs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_not_log_scan_of_unknown_participant() {
    let scans = MockScanLogRepo::default();
    let logs = scans.logs_handle();
    let uc = LogScanUseCase {
        participants: family(),
        scans,
    };
    let err = uc
        .execute(LogScanInput {
            user_id: Some("Zzz999".to_owned()),
            admin_id: AdminId(Uuid::new_v4()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ParticipantsServiceError::ParticipantNotFound));
    assert!(logs.lock().unwrap().is_empty());
}

// ── Ticket confirmation ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_fill_missing_ticket_details() {
    let notifier = RecordingNotifier::new();
    let sent = notifier.sent_handle();
    let uc = SendTicketUseCase {
        participants: family(),
        notifier,
        pass_placeholder: PLACEHOLDER.to_owned(),
    };

    uc.execute("Fam001").await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent[0].0, TEST_PHONE);
    assert_eq!(
        sent[0].1,
        Template::TicketConfirmation(TicketDetails {
            name: "Asha Rao".to_owned(),
            category: "21K".to_owned(),
            bib_number: "N/A".to_owned(),
            counter: "N/A".to_owned(),
            pass_link: PLACEHOLDER.to_owned(),
        })
    );
}

#[tokio::test]
async fn should_surface_ticket_delivery_failure() {
    let uc = SendTicketUseCase {
        participants: family(),
        notifier: RecordingNotifier::failing(),
        pass_placeholder: PLACEHOLDER.to_owned(),
    };
    let err = uc.execute("Fam001").await.unwrap_err();
    assert!(matches!(err, ParticipantsServiceError::DeliveryFailed(_)));
}

// ── Dashboard ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_shape_dashboard_from_snapshot() {
    let today = Utc::now().date_naive();
    let repo = MockStatsRepo::new(StatsSnapshot {
        total: 12,
        bibs_given: 5,
        tshirts_given: 4,
        daily: vec![(today, 3)],
        by_distance: vec![Bucket {
            name: "21K".to_owned(),
            value: 12,
        }],
        by_tshirt_size: vec![],
        by_gender: vec![],
        counters: vec![
            CounterRow {
                counter_no: Some("C2".to_owned()),
                total: 4,
                bibs: 2,
                tshirts: 1,
            },
            CounterRow {
                counter_no: None,
                total: 6,
                bibs: 0,
                tshirts: 0,
            },
            CounterRow {
                counter_no: Some("C1".to_owned()),
                total: 2,
                bibs: 2,
                tshirts: 2,
            },
        ],
    });
    let since = repo.since.clone();

    let stats = DashboardStatsUseCase { stats: repo }.execute().await.unwrap();

    assert_eq!(stats.total_users, 12);
    assert_eq!(stats.trend.len(), TREND_DAYS as usize);
    assert_eq!(stats.trend.last().unwrap().count, 3);
    let counters: Vec<_> = stats.counters.iter().map(|c| c.counter_no.as_str()).collect();
    assert_eq!(counters, ["C1", "C2"]);

    let since: NaiveDate = (*since.lock().unwrap()).expect("snapshot queried");
    assert_eq!((today - since).num_days(), TREND_DAYS - 1);
}
