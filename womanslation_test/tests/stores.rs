use womanslation_core::voter::VoterIp;
use womanslation_database::store::{PhraseStore, StoreError, VoteStore};
use womanslation_test::prelude::*;


async fn count_votes(server: &TestServer) -> i64 {
    let (vote_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM womanslation.meaning_vote")
        .fetch_one(server.database_pool())
        .await
        .unwrap();

    vote_count
}


#[tokio::test]
async fn phrase_deletion_leaves_votes_until_cascaded() {
    let server = initialize_test_server().await;

    let voter = VoterIp::new("10.0.0.1");
    let mut connection = server.database_pool().acquire().await.unwrap();

    let phrase = PhraseStore::create(&mut connection, we_need_to_talk(), &voter)
        .await
        .unwrap();

    for meaning in &phrase.meanings {
        VoteStore::create_or_update(
            &mut connection,
            phrase.phrase.id,
            meaning.meaning.id,
            &voter,
            true,
        )
        .await
        .unwrap();
    }

    assert_eq!(count_votes(&server).await, 2);


    PhraseStore::delete(&mut connection, phrase.phrase.id)
        .await
        .unwrap();

    assert!(matches!(
        PhraseStore::get_by_id(&mut connection, phrase.phrase.id, &voter).await,
        Err(StoreError::NotFound(_))
    ));
    assert_eq!(count_votes(&server).await, 2);


    let deleted_votes = VoteStore::delete_by_phrase_id(&mut connection, phrase.phrase.id)
        .await
        .unwrap();

    assert_eq!(deleted_votes, 2);
    assert_eq!(count_votes(&server).await, 0);
}

#[tokio::test]
async fn rejected_meaning_aborts_phrase_creation() {
    let server = initialize_test_server().await;

    let voter = VoterIp::new("10.0.0.1");
    let mut connection = server.database_pool().acquire().await.unwrap();

    let mut request = im_fine();
    request.meanings.push(request.meanings[0].clone());

    let result = PhraseStore::create(&mut connection, request, &voter).await;
    assert!(matches!(result, Err(StoreError::Duplicate(_))));

    assert!(PhraseStore::is_empty(&mut connection).await.unwrap());
}
