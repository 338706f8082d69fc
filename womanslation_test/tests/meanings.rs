use futures_util::future::join_all;
use womanslation_test::prelude::*;


async fn create_phrase(server: &TestServer, request: PhraseCreationRequest) -> Phrase {
    server
        .request(Method::POST, "/api/v1/phrases")
        .with_json_body(request)
        .send()
        .await
        .success_data::<Phrase>()
}


#[tokio::test]
async fn duplicate_meaning_is_only_rejected_within_the_same_phrase() {
    let server = initialize_test_server().await;

    let first_phrase = create_phrase(&server, im_fine()).await;
    let second_phrase = create_phrase(&server, do_whatever_you_want()).await;

    let repeated_meaning = sample_meaning("I am not fine at all.", Tone::PassiveAggressive);


    let response = server
        .request(
            Method::POST,
            format!("/api/v1/phrases/{}/meanings", first_phrase.id),
        )
        .with_json_body(&repeated_meaning)
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    response.assert_failure_message("Meaning already exists in the database");


    // Same text with a different tone is a different meaning.
    let response = server
        .request(
            Method::POST,
            format!("/api/v1/phrases/{}/meanings", first_phrase.id),
        )
        .with_json_body(sample_meaning("I am not fine at all.", Tone::HurtIndirect))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let envelope = response.envelope::<MeaningWithVotes>();
    assert_eq!(envelope.message.as_deref(), Some("Meaning added successfully"));
    assert_eq!(envelope.data.unwrap().phrase_id, first_phrase.id);


    let response = server
        .request(
            Method::POST,
            format!("/api/v1/phrases/{}/meanings", second_phrase.id),
        )
        .with_json_body(&repeated_meaning)
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);


    let meanings = server
        .request(
            Method::GET,
            format!("/api/v1/phrases/{}/meanings", first_phrase.id),
        )
        .send()
        .await
        .success_data::<Vec<MeaningWithVotes>>();

    assert_eq!(meanings.len(), 2);
    assert_eq!(meanings[0].tone, Tone::PassiveAggressive);
    assert_eq!(meanings[1].tone, Tone::HurtIndirect);
}

#[tokio::test]
async fn concurrent_identical_meanings_are_added_once() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, do_whatever_you_want()).await;

    let meanings_path = format!("/api/v1/phrases/{}/meanings", phrase.id);
    let contested_meaning = sample_meaning("You will regret this.", Tone::AngryConfrontational);

    let responses = join_all((0..8).map(|_| {
        server
            .request(Method::POST, meanings_path.as_str())
            .with_json_body(&contested_meaning)
            .send()
    }))
    .await;

    let mut added_meanings = 0;
    for response in &responses {
        if response.status() == StatusCode::OK {
            added_meanings += 1;
        } else {
            response.assert_status_equals(StatusCode::BAD_REQUEST);
            response.assert_failure_message("Meaning already exists in the database");
        }
    }

    assert_eq!(added_meanings, 1);


    let meanings = server
        .request(Method::GET, meanings_path.as_str())
        .send()
        .await
        .success_data::<Vec<MeaningWithVotes>>();

    let contested_copies = meanings
        .iter()
        .filter(|meaning| {
            meaning.meaning == "You will regret this."
                && meaning.tone == Tone::AngryConfrontational
        })
        .count();

    assert_eq!(meanings.len(), 2);
    assert_eq!(contested_copies, 1);
}

#[tokio::test]
async fn meaning_fields_are_validated() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;

    let response = server
        .request(Method::POST, format!("/api/v1/phrases/{}/meanings", phrase.id))
        .with_json_body(MeaningCreationRequest {
            meaning: "Fine.".to_string(),
            tone: Tone::Other,
            confidence: 101,
            warning_level: 0,
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::BAD_REQUEST);
    response.assert_failure_message("Confidence level must be an integer between 0 and 100");
}

#[tokio::test]
async fn meaning_update_replaces_fields_in_place() {
    let server = initialize_test_server().await;

    let phrase = create_phrase(&server, im_fine()).await;
    let meaning = &phrase.meanings[0];

    let response = server
        .request(
            Method::PUT,
            format!("/api/v1/phrases/{}/meanings/{}", phrase.id, meaning.id),
        )
        .with_json_body(MeaningUpdateRequest {
            meaning: "Ask me again in ten minutes.".to_string(),
            tone: Tone::Testing,
            confidence: 70,
            warning_level: 3,
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let updated_meaning = response.success_data::<MeaningWithVotes>();
    assert_eq!(updated_meaning.id, meaning.id);
    assert_eq!(updated_meaning.create_date, meaning.create_date);
    assert_eq!(updated_meaning.meaning, "Ask me again in ten minutes.");
    assert_eq!(updated_meaning.tone, Tone::Testing);
    assert_eq!(updated_meaning.confidence, 70);
    assert_eq!(updated_meaning.warning_level, 3);


    let other_phrase = create_phrase(&server, we_need_to_talk()).await;

    let response = server
        .request(
            Method::PUT,
            format!("/api/v1/phrases/{}/meanings/{}", other_phrase.id, meaning.id),
        )
        .with_json_body(MeaningUpdateRequest {
            meaning: "Wrong phrase.".to_string(),
            tone: Tone::Other,
            confidence: 50,
            warning_level: 0,
        })
        .send()
        .await;

    response.assert_status_equals(StatusCode::NOT_FOUND);
    response.assert_failure_message("Meaning not found!");
}

#[tokio::test]
async fn deleting_meanings_removes_their_votes() {
    let server = initialize_test_server().await;

    let voter = Ipv4Addr::new(10, 0, 0, 1);
    let phrase = create_phrase(&server, we_need_to_talk()).await;

    for meaning in &phrase.meanings {
        server
            .request(
                Method::POST,
                format!(
                    "/api/v1/phrases/{}/meanings/{}/vote?like=true",
                    phrase.id, meaning.id
                ),
            )
            .from_voter(voter)
            .send()
            .await
            .assert_status_equals(StatusCode::OK);
    }


    let response = server
        .request(
            Method::DELETE,
            format!(
                "/api/v1/phrases/{}/meanings/{}",
                phrase.id, phrase.meanings[0].id
            ),
        )
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);
    assert_eq!(
        response.success_data::<MeaningDeletionResponse>(),
        MeaningDeletionResponse { deleted_votes: 1 }
    );


    let response = server
        .request(Method::DELETE, format!("/api/v1/phrases/{}/meanings", phrase.id))
        .send()
        .await;

    response.assert_status_equals(StatusCode::OK);

    let envelope = response.envelope::<MeaningsDeletionResponse>();
    assert_eq!(
        envelope.message,
        Some(format!("All meanings for phrase {} deleted successfully", phrase.id))
    );
    assert_eq!(
        envelope.data,
        Some(MeaningsDeletionResponse {
            deleted_meanings: 1,
            deleted_votes: 1,
        })
    );


    let response = server
        .request(Method::GET, format!("/api/v1/phrases/{}/meanings", phrase.id))
        .send()
        .await;

    response.assert_status_equals(StatusCode::NOT_FOUND);
    response.assert_failure_message("Meanings not found!");


    let own_likes = server
        .request(Method::GET, "/api/v1/votes/mine")
        .from_voter(voter)
        .send()
        .await
        .success_data::<Vec<Vote>>();

    assert!(own_likes.is_empty());
}
