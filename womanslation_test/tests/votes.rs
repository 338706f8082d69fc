use futures_util::future::join_all;
use womanslation_test::prelude::*;


const FIRST_VOTER: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 1);
const SECOND_VOTER: Ipv4Addr = Ipv4Addr::new(10, 0, 0, 2);


async fn create_phrase(server: &TestServer, request: PhraseCreationRequest) -> Phrase {
    server
        .request(Method::POST, "/api/v1/phrases")
        .with_json_body(request)
        .send()
        .await
        .success_data::<Phrase>()
}

fn vote_path(phrase: &Phrase, meaning_index: usize, like: bool) -> String {
    format!(
        "/api/v1/phrases/{}/meanings/{}/vote?like={like}",
        phrase.id, phrase.meanings[meaning_index].id
    )
}


#[tokio::test]
async fn voting_again_overwrites_the_previous_vote() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;


    let response = server
        .request(Method::POST, vote_path(&phrase, 0, true))
        .from_voter(FIRST_VOTER)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let envelope = response.envelope::<VoteCastResponse>();
    assert_eq!(envelope.message.as_deref(), Some("Vote created successfully"));

    let first_vote = envelope.data.unwrap();
    assert!(first_vote.newly_created);
    assert!(first_vote.vote.like);
    assert_eq!(first_vote.vote.ip, "10.0.0.1");
    assert_eq!(first_vote.like_count, 1);


    let response = server
        .request(Method::POST, vote_path(&phrase, 0, false))
        .from_voter(FIRST_VOTER)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let envelope = response.envelope::<VoteCastResponse>();
    assert_eq!(envelope.message.as_deref(), Some("Vote Updated successfully"));

    let second_vote = envelope.data.unwrap();
    assert!(!second_vote.newly_created);
    assert!(!second_vote.vote.like);
    assert_eq!(second_vote.vote.id, first_vote.vote.id);
    assert_eq!(second_vote.like_count, 0);
}

#[tokio::test]
async fn concurrent_votes_from_one_voter_leave_one_record() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;
    let like_path = vote_path(&phrase, 0, true);

    let responses = join_all((0..16).map(|_| {
        server
            .request(Method::POST, like_path.as_str())
            .from_voter(FIRST_VOTER)
            .send()
    }))
    .await;

    let mut newly_created_votes = 0;
    for response in &responses {
        response.assert_status_equals(StatusCode::OK);

        let cast_vote = response.success_data::<VoteCastResponse>();
        assert_eq!(cast_vote.like_count, 1);

        if cast_vote.newly_created {
            newly_created_votes += 1;
        }
    }

    assert_eq!(newly_created_votes, 1);


    let (vote_records,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM womanslation.meaning_vote WHERE meaning_id = $1",
    )
    .bind(phrase.meanings[0].id.into_uuid())
    .fetch_one(server.database_pool())
    .await
    .unwrap();

    assert_eq!(vote_records, 1);
}

#[tokio::test]
async fn like_aggregates_depend_on_the_voter() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, we_need_to_talk()).await;

    for voter in [FIRST_VOTER, SECOND_VOTER] {
        server
            .request(Method::POST, vote_path(&phrase, 1, true))
            .from_voter(voter)
            .send()
            .await
            .assert_status_equals(StatusCode::OK);
    }

    server
        .request(Method::POST, vote_path(&phrase, 0, true))
        .from_voter(SECOND_VOTER)
        .send()
        .await
        .assert_status_equals(StatusCode::OK);


    let meanings_for_first_voter = server
        .request(Method::GET, format!("/api/v1/phrases/{}/meanings", phrase.id))
        .from_voter(FIRST_VOTER)
        .send()
        .await
        .success_data::<Vec<MeaningWithVotes>>();

    assert_eq!(meanings_for_first_voter[0].like_count, 1);
    assert!(!meanings_for_first_voter[0].is_liked_by_user);
    assert_eq!(meanings_for_first_voter[1].like_count, 2);
    assert!(meanings_for_first_voter[1].is_liked_by_user);


    let own_likes = server
        .request(Method::GET, "/api/v1/votes/mine")
        .from_voter(SECOND_VOTER)
        .send()
        .await
        .success_data::<Vec<Vote>>();

    assert_eq!(own_likes.len(), 2);
    assert!(own_likes.iter().all(|vote| vote.ip == "10.0.0.2" && vote.like));
}

#[tokio::test]
async fn forwarded_for_header_identifies_the_voter() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;

    let cast_vote = server
        .request(Method::POST, vote_path(&phrase, 0, true))
        .from_voter(FIRST_VOTER)
        .with_forwarded_for("203.0.113.7, 10.0.0.1")
        .send()
        .await
        .success_data::<VoteCastResponse>();

    assert_eq!(cast_vote.vote.ip, "203.0.113.7");
}

#[tokio::test]
async fn vote_without_a_usable_voter_address_is_rejected() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;

    let response = server
        .request(Method::POST, vote_path(&phrase, 0, true))
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    response.assert_failure_message("IP must be a string and at least 7 characters long");
}

#[tokio::test]
async fn votes_on_missing_meanings_and_missing_votes_are_not_found() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;
    let missing_id = "0190b6f2-1a2b-7c3d-8e4f-0123456789aa";


    let response = server
        .request(
            Method::POST,
            format!(
                "/api/v1/phrases/{}/meanings/{missing_id}/vote?like=true",
                phrase.id
            ),
        )
        .from_voter(FIRST_VOTER)
        .send()
        .await;

    response.assert_status_equals(StatusCode::NOT_FOUND);
    response.assert_failure_message("Meaning not found!");


    let cast_vote = server
        .request(Method::POST, vote_path(&phrase, 0, true))
        .from_voter(FIRST_VOTER)
        .send()
        .await
        .success_data::<VoteCastResponse>();

    let delete_path = format!(
        "/api/v1/phrases/{}/meanings/{}/vote/{}",
        phrase.id, phrase.meanings[0].id, cast_vote.vote.id
    );

    let response = server.request(Method::DELETE, delete_path.as_str()).send().await;

    response.assert_status_equals(StatusCode::OK);
    response.assert_json_body_matches(ResponseEnvelope::<()> {
        success: true,
        message: Some("Vote deleted successfully".to_string()),
        data: None,
    });


    let response = server.request(Method::DELETE, delete_path).send().await;

    response.assert_status_equals(StatusCode::NOT_FOUND);
    response.assert_failure_message("Vote not found!");
}

#[tokio::test]
async fn we_need_to_talk_scenario() {
    let server = initialize_test_server().await;

    let voter = Ipv4Addr::new(1, 2, 3, 4);

    let phrase = create_phrase(&server, we_need_to_talk()).await;
    assert_eq!(phrase.tags, vec!["comedic".to_string(), "ominous".to_string()]);

    let festered_index = phrase
        .meanings
        .iter()
        .position(|meaning| meaning.meaning == "Something festered.")
        .unwrap();

    let festered = &phrase.meanings[festered_index];
    assert_eq!(festered.tone, Tone::AngryConfrontational);
    assert_eq!(festered.confidence, 98);
    assert_eq!(festered.warning_level, 5);
    assert_eq!(festered.like_count, 0);


    let liked = server
        .request(Method::POST, vote_path(&phrase, festered_index, true))
        .from_voter(voter)
        .send()
        .await
        .success_data::<VoteCastResponse>();

    assert_eq!(liked.like_count, 1);


    let response = server
        .request(Method::PUT, format!("/api/v1/phrases/{}/view", phrase.id))
        .from_voter(voter)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let envelope = response.envelope::<Phrase>();
    assert_eq!(envelope.message.as_deref(), Some("Phrase viewed successfully"));

    let viewed_phrase = envelope.data.unwrap();
    assert_eq!(viewed_phrase.views, 1);
    assert_eq!(viewed_phrase.meanings[festered_index].like_count, 1);
    assert!(viewed_phrase.meanings[festered_index].is_liked_by_user);


    let unliked = server
        .request(Method::POST, vote_path(&phrase, festered_index, false))
        .from_voter(voter)
        .send()
        .await
        .success_data::<VoteCastResponse>();

    assert_eq!(unliked.like_count, 0);
    assert_eq!(unliked.vote.id, liked.vote.id);

    let (vote_records,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM womanslation.meaning_vote WHERE ip = '1.2.3.4'")
            .fetch_one(server.database_pool())
            .await
            .unwrap();

    assert_eq!(vote_records, 1);


    let response = server
        .request(Method::DELETE, format!("/api/v1/phrases/{}", phrase.id))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let envelope = response.envelope::<PhraseDeletionResponse>();
    assert_eq!(envelope.message.as_deref(), Some("Phrase deleted successfully"));
    assert_eq!(envelope.data, Some(PhraseDeletionResponse { deleted_votes: 1 }));

    server
        .request(Method::GET, format!("/api/v1/phrases/{}", phrase.id))
        .send()
        .await
        .assert_status_equals(StatusCode::NOT_FOUND);
}
