use marathon_domain::pagination::PageRequest;
use marathon_domain::search::{ParticipantFilter, Relevance, SearchTerms};
use marathon_participants::domain::types::Participant;
use marathon_participants::usecase::admin::{
    SearchParticipantsInput, SearchParticipantsOutput, SearchParticipantsUseCase,
};

use crate::helpers::{MockParticipantRepo, participant, with_bib, with_phone};

/// 25 participants; `R00` is the oldest, `R24` the newest.
fn twenty_five() -> Vec<Participant> {
    (0..25)
        .map(|i| {
            let p = participant(&format!("Run0{i:02}"), &format!("Runner{i:02}"), "Doe", i);
            with_phone(p, &format!("+9190000000{i:02}"))
        })
        .collect()
}

async fn search(
    rows: Vec<Participant>,
    filter: ParticipantFilter,
    page: PageRequest,
    export: bool,
) -> SearchParticipantsOutput {
    SearchParticipantsUseCase {
        participants: MockParticipantRepo::new(rows),
    }
    .execute(SearchParticipantsInput {
        filter,
        page,
        export,
    })
    .await
    .unwrap()
}

fn searching(raw: &str) -> ParticipantFilter {
    ParticipantFilter {
        search: SearchTerms::parse(raw),
        ..Default::default()
    }
}

fn ids(out: &SearchParticipantsOutput) -> Vec<String> {
    out.users
        .iter()
        .map(|u| u.participant.id.to_string())
        .collect()
}

#[tokio::test]
async fn should_return_second_page_of_newest_first_listing() {
    let out = search(
        twenty_five(),
        ParticipantFilter::default(),
        PageRequest { page: 2, limit: 10 },
        false,
    )
    .await;

    // Newest first: page 1 is R24..R15, page 2 is R14..R05.
    let expected: Vec<String> = (5..15).rev().map(|i| format!("Run0{i:02}")).collect();
    assert_eq!(ids(&out), expected);
    assert_eq!(out.pagination.total, 25);
    assert_eq!(out.pagination.pages, 3);
    assert_eq!(out.pagination.current, 2);
    assert_eq!(out.pagination.limit, 10);
    assert!(out.users.iter().all(|u| u.relevance.is_none()));
}

#[tokio::test]
async fn should_return_everything_on_export() {
    let out = search(
        twenty_five(),
        ParticipantFilter::default(),
        PageRequest { page: 3, limit: 5 },
        true,
    )
    .await;

    assert_eq!(out.users.len(), 25);
    assert_eq!(out.pagination.pages, 1);
    assert_eq!(out.pagination.limit, 25);
    assert_eq!(out.pagination.total, 25);
}

#[tokio::test]
async fn should_honor_large_limit() {
    let out = search(
        twenty_five(),
        ParticipantFilter::default(),
        PageRequest { page: 0, limit: 1000 },
        false,
    )
    .await;

    assert_eq!(out.pagination.limit, 1000);
    assert_eq!(out.pagination.current, 1);
    assert_eq!(out.pagination.pages, 1);
    assert_eq!(out.users.len(), 25);
}

#[tokio::test]
async fn should_rank_exact_bib_then_prefix_and_exclude_non_matches() {
    let rows = vec![
        with_bib(participant("Bib200", "Carol", "Iyer", 3), "200"),
        with_bib(participant("Bib1k5", "Bina", "Shah", 2), "1005"),
        with_bib(participant("Bib100", "Anil", "Kumar", 1), "100"),
    ];

    let out = search(rows, searching("100"), PageRequest::default(), false).await;

    assert_eq!(ids(&out), ["Bib100", "Bib1k5"]);
    assert_eq!(out.users[0].relevance, Some(Relevance::ExactBib));
    assert_eq!(out.users[1].relevance, Some(Relevance::BibPrefix));
    assert_eq!(out.pagination.total, 2);
}

#[tokio::test]
async fn should_break_rank_ties_by_newest() {
    let rows = vec![
        participant("Old001", "Shanti", "Rao", 1),
        participant("New001", "Shreya", "Das", 9),
        participant("Mid001", "Anil", "Sharma", 5),
    ];

    let out = search(rows, searching("sh"), PageRequest::default(), false).await;

    assert_eq!(ids(&out), ["New001", "Mid001", "Old001"]);
    assert!(
        out.users
            .iter()
            .all(|u| u.relevance == Some(Relevance::NamePrefix))
    );
}

#[tokio::test]
async fn should_require_every_token_to_match() {
    let rows = vec![
        with_bib(participant("Tok001", "John", "Doe", 1), "1234"),
        with_bib(participant("Tok002", "John", "Roe", 2), "900"),
        with_bib(participant("Tok003", "Mary", "Doe", 3), "1235"),
    ];
    let rows = rows
        .into_iter()
        .map(|p| with_phone(p, "+919800000000"))
        .collect();

    let out = search(rows, searching("john 123"), PageRequest::default(), false).await;

    assert_eq!(ids(&out), ["Tok001"]);
}

#[tokio::test]
async fn should_apply_only_supplied_filters() {
    let mut given = participant("Flag01", "Asha", "Rao", 1);
    given.is_bib_given = true;
    let mut ten_k = participant("Flag02", "Bina", "Shah", 2);
    ten_k.distance = "10K".to_owned();
    let plain = participant("Flag03", "Carol", "Iyer", 3);
    let rows = vec![given, ten_k, plain];

    let out = search(
        rows.clone(),
        ParticipantFilter::default(),
        PageRequest::default(),
        false,
    )
    .await;
    assert_eq!(out.pagination.total, 3);

    let out = search(
        rows.clone(),
        ParticipantFilter {
            is_bib_given: Some(false),
            ..Default::default()
        },
        PageRequest::default(),
        false,
    )
    .await;
    assert_eq!(ids(&out), ["Flag03", "Flag02"]);

    let out = search(
        rows,
        ParticipantFilter {
            distance: Some("21K".to_owned()),
            is_bib_given: Some(true),
            ..Default::default()
        },
        PageRequest::default(),
        false,
    )
    .await;
    assert_eq!(ids(&out), ["Flag01"]);
}

#[tokio::test]
async fn should_treat_wildcards_in_search_as_literal_text() {
    let rows = vec![participant("Lit001", "Asha", "Rao", 1)];
    let out = search(rows, searching("%"), PageRequest::default(), false).await;
    assert!(out.users.is_empty());
}
