//! Integration tests for the access layer: interceptors, façades and
//! failure classification, driven through a scripted transport.

use chrono::NaiveDate;
use tourney_client::{classify, ApiClient, ApiClientBuilder, ApiError, NO_RESPONSE_MESSAGE};
use tourney_protocol::{
    Credentials, FileUpload, MatchForm, MatchId, TournamentForm, TournamentId, UserId,
};
use tourney_session::{EndReason, SessionContext, SessionEvent};
use tourney_transport::{Method, PartValue, RequestBody, ScriptedTransport, TransportError};

use std::sync::{Arc, Mutex};

const TOURNAMENT: &str = r#"{"id":3,"name":"Spring Cup","rules":"Best of 3","nb_players":8,
    "image":null,"creator_id":7,"created_at":"2024-03-01 10:00:00","updated_at":null}"#;

fn client_with_session(token: Option<&str>) -> (ApiClient<ScriptedTransport>, ScriptedTransport) {
    let session = SessionContext::in_memory();
    if let Some(token) = token {
        session.start(token, Some(UserId(7))).expect("start session");
    }
    let transport = ScriptedTransport::new();
    let client = ApiClientBuilder::new()
        .session(session)
        .build(transport.clone());
    (client, transport)
}

// ---------------------------------------------------------------------------
// Interceptors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_bearer_header_on_every_request() {
    let (client, transport) = client_with_session(Some("tok-1"));
    transport.respond(Method::Get, "/tournaments", 200, r#"{"Tournois":[]}"#);
    transport.respond(Method::Get, "/matches", 200, r#"{"matches":[]}"#);

    client.tournaments().list().await.unwrap();
    client.matches().list().await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    for request in requests {
        assert_eq!(request.headers.get("Authorization"), Some("Bearer tok-1"));
    }
}

#[tokio::test]
async fn test_no_bearer_header_without_token() {
    let (client, transport) = client_with_session(None);
    transport.respond(Method::Post, "/login", 200, r#"{"token":"fresh"}"#);

    client
        .auth()
        .login(&Credentials::new("a@b.c", "secret"))
        .await
        .unwrap();

    let sent = transport.last_request().unwrap();
    assert!(!sent.headers.contains("authorization"));
    assert_eq!(sent.headers.get("content-type"), Some("application/json"));
    let RequestBody::Json(bytes) = &sent.body else {
        panic!("login should be JSON, got {:?}", sent.body);
    };
    let json: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(json["email"], "a@b.c");
}

#[tokio::test]
async fn test_token_change_applies_to_next_request() {
    let (client, transport) = client_with_session(None);
    transport.respond(Method::Get, "/user", 200, r#"{"id":7,"name":"Ada","email":"a@b.c"}"#);

    client.session().start("late", None).unwrap();
    client.auth().profile().await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.headers.get("authorization"), Some("Bearer late"));
}

#[tokio::test]
async fn test_multipart_upload_has_no_json_content_type() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(Method::Post, "/tournaments", 201, &format!(r#"{{"tournoi":{TOURNAMENT}}}"#));

    let form = TournamentForm {
        name: "Spring Cup".into(),
        rules: "Best of 3".into(),
        nb_players: 8,
        image: Some(FileUpload::new("cup.png", vec![0x89, b'P', b'N', b'G']).with_content_type("image/png")),
    };
    client.tournaments().create(&form).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert!(sent.body.is_multipart());
    assert!(!sent.headers.contains("content-type"));
    assert_eq!(sent.headers.get("accept"), Some("application/json"));
    assert_eq!(
        sent.body.part("nb_players"),
        Some(&PartValue::Text("8".into()))
    );
    assert!(matches!(sent.body.part("image"), Some(PartValue::File(f)) if f.file_name == "cup.png"));
}

#[tokio::test]
async fn test_update_without_new_image_omits_the_part() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(Method::Put, "/tournaments/3", 200, "");

    let form = TournamentForm {
        name: "Renamed".into(),
        rules: "r".into(),
        nb_players: 4,
        image: None,
    };
    client.tournaments().update(TournamentId(3), &form).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert!(sent.body.is_multipart());
    assert!(sent.body.part("image").is_none());
}

#[tokio::test]
async fn test_tournament_write_ignores_loose_echo() {
    let (client, transport) = client_with_session(Some("tok"));
    transport
        .respond(
            Method::Post,
            "/tournaments",
            201,
            r#"{"tournoi":{"id":10,"name":"Cup","rules":"r","nb_players":"8"}}"#,
        )
        .respond(Method::Put, "/tournaments/10", 200, r#"{"tournoi":{"id":10,"name":"Cup","nb_players":8}}"#);

    let form = TournamentForm {
        name: "Cup".into(),
        rules: "r".into(),
        nb_players: 8,
        image: None,
    };
    client.tournaments().create(&form).await.unwrap();
    client.tournaments().update(TournamentId(10), &form).await.unwrap();

    assert_eq!(transport.requests().len(), 2);
}

// ---------------------------------------------------------------------------
// 401 teardown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_401_ends_session_and_emits_event() {
    let (client, transport) = client_with_session(Some("expired"));
    transport.respond(Method::Get, "/tournaments", 401, r#"{"message":"Unauthenticated."}"#);

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    client
        .session()
        .subscribe(move |event| sink.lock().unwrap().push(event.clone()));

    let err = client.tournaments().list().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!client.session().is_authenticated());
    assert_eq!(client.session().user_id(), None);
    assert_eq!(
        *events.lock().unwrap(),
        vec![SessionEvent::Ended {
            reason: EndReason::Unauthorized
        }]
    );
}

#[tokio::test]
async fn test_other_failures_keep_the_session() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(Method::Delete, "/tournaments/3", 403, r#"{"error":"Not the creator"}"#);

    let err = client.tournaments().delete(TournamentId(3)).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(client.session().is_authenticated());
}

// ---------------------------------------------------------------------------
// Façades
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_tournament_list_unwraps_envelope() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(Method::Get, "/tournaments", 200, &format!(r#"{{"Tournois":[{TOURNAMENT}]}}"#));

    let list = client.tournaments().list().await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].name, "Spring Cup");
    assert_eq!(list[0].creator_id, UserId(7));
}

#[tokio::test]
async fn test_missing_tournament_is_protocol_error() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(Method::Get, "/tournaments/9", 200, "{}");

    let err = client.tournaments().get(TournamentId(9)).await.unwrap_err();
    assert!(matches!(err, ApiError::Protocol(_)));
}

#[tokio::test]
async fn test_roster_paths() {
    let (client, transport) = client_with_session(Some("tok"));
    transport
        .respond(Method::Post, "/tournoi/3/add-player", 200, r#"{"message":"joined"}"#)
        .respond(
            Method::Get,
            "/tournoi/3/players",
            200,
            r#"{"players":[{"id":1,"player_id":7,"created_at":"2024-03-02T09:00:00Z"}]}"#,
        )
        .respond(Method::Delete, "/tournoi/3/remove-player", 200, "");

    let tournaments = client.tournaments();
    tournaments.add_player(TournamentId(3)).await.unwrap();
    let roster = tournaments.players(TournamentId(3)).await.unwrap();
    tournaments.remove_player(TournamentId(3)).await.unwrap();

    assert_eq!(roster[0].player_id, UserId(7));
    let methods: Vec<_> = transport.requests().iter().map(|r| r.method).collect();
    assert_eq!(methods, [Method::Post, Method::Get, Method::Delete]);
}

#[tokio::test]
async fn test_match_details_is_a_get() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(
        Method::Get,
        "/matches/5",
        200,
        r#"{"matche":{"id":5,"tournoi_id":3,"player_1_id":7,"player_2_id":8,
            "score_player_1":2,"score_player_2":1,"match_date":"2024-05-01T00:00:00.000000Z"}}"#,
    );

    let m = client.matches().get(MatchId(5)).await.unwrap();

    assert_eq!(m.match_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    assert_eq!(transport.requests_to(Method::Get, "/matches/5").len(), 1);
    assert!(transport.requests_to(Method::Post, "/matches/5").is_empty());
}

#[tokio::test]
async fn test_match_update_is_json() {
    let (client, transport) = client_with_session(Some("tok"));
    transport.respond(Method::Put, "/matches/5", 200, r#"{"message":"updated"}"#);

    let form = MatchForm {
        tournoi_id: Some(TournamentId(3)),
        player_1_id: UserId(7),
        player_2_id: UserId(8),
        score_player_1: 3,
        score_player_2: 0,
        match_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
    };
    client.matches().update(MatchId(5), &form).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.headers.get("content-type"), Some("application/json"));
    let RequestBody::Json(bytes) = &sent.body else {
        panic!("match update should be JSON");
    };
    let json: serde_json::Value = serde_json::from_slice(bytes).unwrap();
    assert_eq!(json["score_player_1"], 3);
    assert_eq!(json["match_date"], "2024-05-02");
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_classify_server_and_network_failures() {
    let (client, transport) = client_with_session(Some("tok"));
    transport
        .respond(Method::Post, "/tournoi/3/add-player", 422, r#"{"error":"Tournament is full"}"#)
        .fail(
            Method::Get,
            "/matches",
            TransportError::NoResponse("connection refused".into()),
        );

    let full = client.tournaments().add_player(TournamentId(3)).await.unwrap_err();
    let failure = classify(&full);
    assert_eq!(failure.status, 422);
    assert_eq!(failure.message, "Tournament is full");

    let offline = client.matches().list().await.unwrap_err();
    let failure = classify(&offline);
    assert_eq!(failure.status, 0);
    assert_eq!(failure.message, NO_RESPONSE_MESSAGE);
}
