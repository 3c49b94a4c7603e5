//! Integration tests for the CLI command handlers and listen controller.
//!
//! Commands run against a wiremock server standing in for the backend and
//! the AI service; output is captured into a buffer.

use audiobook_cli::{cli::Cli, commands, CliError, Context, ListenController};
use audiobook_client::{AudiobookClient, AuthSession, ClientConfig, ClientError, MemorySessionStore};
use audiobook_core::User;
use audiobook_playback::{ListenPhase, PlaybackError};
use clap::Parser;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AudiobookClient {
    AudiobookClient::new(ClientConfig::new(server.uri(), server.uri())).unwrap()
}

fn user_json(role: &str) -> serde_json::Value {
    json!({
        "username": "an",
        "fullname": "Nguyễn An",
        "email": "an@example.com",
        "phonenumber": "0900000000",
        "role": role
    })
}

fn context(server: &MockServer, role: Option<&str>) -> Context {
    let store = match role {
        Some(role) => MemorySessionStore::with_blob(user_json(role).to_string()),
        None => MemorySessionStore::new(),
    };
    Context::new(client_for(server), AuthSession::hydrated(store))
}

fn user() -> User {
    serde_json::from_value(user_json("USER")).unwrap()
}

fn book_detail_json() -> serde_json::Value {
    json!({
        "id": 1,
        "title": "Truyện Kiều",
        "author": "Nguyễn Du",
        "category": "Văn học",
        "rating": 4.5,
        "listChapter": [
            {
                "id": 11,
                "title_chapter": "Chương 1",
                "text": "Trăm năm trong cõi người ta",
                "listAudio": [
                    { "id": 101, "audio_name": "Giọng nam", "audio_file": "http://media/c1-nam.mp3" },
                    { "id": 102, "audio_name": "Giọng nữ", "audio_file": "http://media/c1-nu.mp3" }
                ]
            },
            {
                "id": 12,
                "title_chapter": "Chương 2",
                "text": "Chữ tài chữ mệnh khéo là ghét nhau",
                "listAudio": []
            }
        ]
    })
}

fn voices_json() -> serde_json::Value {
    json!([
        { "id": 5, "audio_name": "Giọng của tôi", "audio_url": "http://media/voice.wav", "username": "an" }
    ])
}

async fn mount_book(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/book/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(book_detail_json()))
        .mount(server)
        .await;
}

async fn mount_voices(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/getMyAudio/an"))
        .respond_with(ResponseTemplate::new(200).set_body_json(voices_json()))
        .mount(server)
        .await;
}

async fn run(ctx: &Context, args: &[&str]) -> (Result<(), CliError>, String) {
    let mut argv = vec!["audiobook"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    let result = commands::dispatch(ctx, cli.command, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

// =============================================================================
// Listen Controller Tests
// =============================================================================

mod listen_controller {
    use super::*;

    #[tokio::test]
    async fn test_generate_plays_and_records_history() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;
        mount_voices(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_string_contains("Trăm năm trong cõi người ta"))
            .and(body_string_contains("http://media/voice.wav"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "audio_file_url": "http://ai/out/c1.wav"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/listenHistory"))
            .and(body_string_contains("\"titleOfBook\":\"Truyện Kiều\""))
            .and(body_string_contains("\"titleOfChapter\":\"Chương 1\""))
            .and(body_string_contains(
                "\"nameOfAudio\":\"Truyện Kiều - Chương 1 (Giọng của tôi)\"",
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let mut controller = ListenController::open(&client, Some(user()), 1).await.unwrap();
        assert_eq!(controller.session().voices().len(), 1);

        {
            let session = controller.session_mut();
            session.set_source(audiobook_playback::AudioSource::User);
            session.select_voice(5).unwrap();
            assert!(session.controls_locked());
        }

        let generated = controller.generate().await.unwrap().unwrap();
        assert_eq!(generated.url, "http://ai/out/c1.wav");
        assert!(generated.recorded);

        let session = controller.session();
        assert_eq!(session.phase(), ListenPhase::UserSourceReady);
        assert_eq!(session.source_url(), Some("http://ai/out/c1.wav"));
        assert!(session.is_playing());
        assert!(!session.controls_locked());
    }

    #[tokio::test]
    async fn test_tts_failure_returns_to_ungenerated() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;
        mount_voices(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/listenHistory"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let mut controller = ListenController::open(&client, Some(user()), 1).await.unwrap();
        controller
            .session_mut()
            .set_source(audiobook_playback::AudioSource::User);
        controller.session_mut().select_voice(5).unwrap();

        match controller.generate().await.unwrap_err() {
            CliError::Client(ClientError::Status { status, .. }) => assert_eq!(status, 500),
            e => panic!("Expected Status, got: {:?}", e),
        }

        let session = controller.session();
        assert_eq!(session.phase(), ListenPhase::UserSourceUngenerated);
        assert!(session.controls_locked());
        assert!(!session.is_playing());

        // A failed render can be retried
        assert!(controller.session_mut().begin_generation().is_ok());
    }

    #[tokio::test]
    async fn test_history_failure_keeps_generated_audio() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;
        mount_voices(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "audio_file_url": "http://ai/out/c1.wav"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/listenHistory"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let mut controller = ListenController::open(&client, Some(user()), 1).await.unwrap();
        controller
            .session_mut()
            .set_source(audiobook_playback::AudioSource::User);
        controller.session_mut().select_voice(5).unwrap();

        let generated = controller.generate().await.unwrap().unwrap();
        assert!(!generated.recorded);
        assert_eq!(controller.session().phase(), ListenPhase::UserSourceReady);
    }

    #[tokio::test]
    async fn test_anonymous_listener_has_no_voices() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/getMyAudio/an"))
            .respond_with(ResponseTemplate::new(200).set_body_json(voices_json()))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let mut controller = ListenController::open(&client, None, 1).await.unwrap();
        assert!(controller.session().voices().is_empty());

        controller
            .session_mut()
            .set_source(audiobook_playback::AudioSource::User);
        match controller.generate().await.unwrap_err() {
            CliError::Playback(PlaybackError::NoVoiceSelected) => {}
            e => panic!("Expected NoVoiceSelected, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_missing_book_fails_to_open() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/book/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(ListenController::open(&client, None, 404).await.is_err());
    }
}

// =============================================================================
// Command Tests
// =============================================================================

mod account_commands {
    use super::*;

    #[tokio::test]
    async fn test_whoami_logged_out() {
        let mock_server = MockServer::start().await;
        let ctx = context(&mock_server, None);

        let (result, out) = run(&ctx, &["whoami"]).await;
        result.unwrap();
        assert_eq!(out, "Not logged in\n");
    }

    #[tokio::test]
    async fn test_whoami_shows_restored_session() {
        let mock_server = MockServer::start().await;
        let ctx = context(&mock_server, Some("ADMIN"));

        let (result, out) = run(&ctx, &["whoami"]).await;
        result.unwrap();
        assert!(out.starts_with("an (ADMIN)\n"));
        assert!(out.contains("Nguyễn An"));
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mock_server = MockServer::start().await;
        let ctx = context(&mock_server, Some("USER"));

        let (result, _) = run(&ctx, &["logout"]).await;
        result.unwrap();
        assert!(!ctx.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_history_requires_login() {
        let mock_server = MockServer::start().await;
        let ctx = context(&mock_server, None);

        let (result, _) = run(&ctx, &["history"]).await;
        match result.unwrap_err() {
            CliError::NotLoggedIn => {}
            e => panic!("Expected NotLoggedIn, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_history_marks_played_entry() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/listenHistory/an"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    {
                        "id": 1, "username": "an", "titleOfBook": "Truyện Kiều",
                        "titleOfChapter": "Chương 1", "audioUrl": "http://ai/out/c1.wav",
                        "nameOfAudio": "Giọng của tôi", "time": "2024-05-01 10:00"
                    },
                    {
                        "id": 2, "username": "an", "titleOfBook": "Text to Speech",
                        "titleOfChapter": "Text to Speech", "audioUrl": "http://ai/out/tts.wav",
                        "nameOfAudio": "Giọng của tôi", "time": "2024-05-02 09:30"
                    }
                ],
                "totalPages": 1,
                "totalElements": 2
            })))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("USER"));
        let (result, out) = run(&ctx, &["history", "--play", "2"]).await;
        result.unwrap();

        assert!(out.contains("  1. 2024-05-01 10:00  Truyện Kiều / Chương 1"));
        assert!(out.contains("> 2. 2024-05-02 09:30  Text to Speech"));
        assert!(out.contains("page 1/1 (2 total)"));

        let (result, _) = run(&ctx, &["history", "--play", "3"]).await;
        match result.unwrap_err() {
            CliError::NotFound(what) => assert_eq!(what, "history entry 3"),
            e => panic!("Expected NotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_profile_update_keeps_unset_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/user/update-profile/an"))
            .and(body_json(json!({
                "fullname": "Nguyễn Văn An",
                "email": "an@example.com",
                "phonenumber": "0900000000"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/get-user/an"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "an",
                "fullname": "Nguyễn Văn An",
                "email": "an@example.com",
                "phonenumber": "0900000000"
            })))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("USER"));
        let (result, out) = run(&ctx, &["profile", "update", "--fullname", "Nguyễn Văn An"]).await;
        result.unwrap();
        assert!(out.contains("Profile updated: Nguyễn Văn An"));
        assert_eq!(ctx.session.current_user().unwrap().fullname, "Nguyễn Văn An");
    }
}

mod catalog_commands {
    use super::*;

    #[tokio::test]
    async fn test_books_list_prints_page() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bookInCategory/page/0/0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [
                    { "id": 1, "title": "Truyện Kiều", "author": "Nguyễn Du", "category": "Văn học", "rating": 4.5 },
                    { "id": 2, "title": "Số đỏ", "author": "Vũ Trọng Phụng", "category": "" }
                ],
                "totalPages": 3,
                "totalElements": 25,
                "number": 0
            })))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, None);
        let (result, out) = run(&ctx, &["books", "list"]).await;
        result.unwrap();

        assert!(out.contains("[1] Truyện Kiều - Nguyễn Du (Văn học, 4.5)"));
        assert!(out.contains("[2] Số đỏ - Vũ Trọng Phụng (uncategorised, unrated)"));
        assert!(out.contains("page 1/3 (25 total)"));
    }

    #[tokio::test]
    async fn test_featured_survives_category_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/featuredBook"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "title": "Truyện Kiều", "image": "", "rating": 4.5, "category": "Văn học" }
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/category/getCategories"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, None);
        let (result, out) = run(&ctx, &["books", "featured"]).await;
        result.unwrap();

        assert!(out.contains("[1] Truyện Kiều (Văn học, 4.5)"));
        assert!(out.ends_with("Categories\n"));
    }

    #[tokio::test]
    async fn test_categories_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/category/getCategories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "name": "Văn học", "books": 12 },
                { "id": 2, "name": "Thiếu nhi" }
            ])))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, None);
        let (result, out) = run(&ctx, &["categories", "list"]).await;
        result.unwrap();
        assert_eq!(out, "[1] Văn học (12 books)\n[2] Thiếu nhi\n");
    }

    #[tokio::test]
    async fn test_show_lists_chapters_and_reviews() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/1/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 9, "review": "Hay lắm", "rating": 5, "user": { "username": "lan" } }
            ])))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, None);
        let (result, out) = run(&ctx, &["books", "show", "1"]).await;
        result.unwrap();

        assert!(out.starts_with("Truyện Kiều by Nguyễn Du\n"));
        assert!(out.contains("1. Chương 1 (Giọng nam, Giọng nữ)"));
        assert!(out.contains("2. Chương 2 (no audio)"));
        assert!(out.contains("[9] ★★★★★ lan (-): Hay lắm"));
    }
}

mod listen_command {
    use super::*;

    #[tokio::test]
    async fn test_admin_source_resolves_selected_rendition() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;

        let ctx = context(&mock_server, None);
        let (result, out) = run(&ctx, &["listen", "1", "--audio", "2", "--rate", "1.5"]).await;
        result.unwrap();

        assert!(out.contains("Chapter 1/2: Chương 1"));
        assert!(out.contains("Voice: Giọng nữ (narrated)"));
        assert!(out.contains("Source: http://media/c1-nu.mp3"));
        assert!(out.contains("Playing at 0:00"));
        assert!(out.contains("rate 1.50x") || out.contains("rate 1.5x"));
    }

    #[tokio::test]
    async fn test_chapter_without_audio_has_nothing_to_play() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;

        let ctx = context(&mock_server, None);
        let (result, out) = run(&ctx, &["listen", "1", "--chapter", "2"]).await;
        result.unwrap();

        assert!(out.contains("This chapter has no narrated audio"));
        assert!(out.contains("Nothing to play"));
        assert!(out.contains("Paused"));
    }

    #[tokio::test]
    async fn test_chapter_out_of_range() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;

        let ctx = context(&mock_server, None);
        let (result, _) = run(&ctx, &["listen", "1", "--chapter", "9"]).await;
        match result.unwrap_err() {
            CliError::Playback(PlaybackError::NoChapter(8)) => {}
            e => panic!("Expected NoChapter, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_user_source_generates_before_playing() {
        let mock_server = MockServer::start().await;
        mount_book(&mock_server).await;
        mount_voices(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "audio_file_url": "http://ai/out/c1.wav"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/listenHistory"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("USER"));
        let (result, out) =
            run(&ctx, &["listen", "1", "--source", "user", "--voice", "5", "--volume", "40"]).await;
        result.unwrap();

        assert!(out.contains("Voice: Giọng của tôi (generated)"));
        assert!(out.contains("Source: http://ai/out/c1.wav"));
        assert!(out.contains("volume 40%"));
    }
}

mod admin_commands {
    use super::*;

    #[tokio::test]
    async fn test_admin_requires_login() {
        let mock_server = MockServer::start().await;
        let ctx = context(&mock_server, None);

        let (result, _) = run(&ctx, &["admin", "books", "list"]).await;
        match result.unwrap_err() {
            CliError::NotLoggedIn => {}
            e => panic!("Expected NotLoggedIn, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_admin_requires_admin_role() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/book/0/0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("USER"));
        let (result, _) = run(&ctx, &["admin", "books", "list"]).await;
        match result.unwrap_err() {
            CliError::NotAdmin => {}
            e => panic!("Expected NotAdmin, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_user_update_changes_only_role() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/get-user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "username": "lan", "fullname": "Trần Lan", "email": "lan@example.com", "role": "USER" }
            ])))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/user/lan"))
            .and(body_json(json!({
                "fullname": "Trần Lan",
                "email": "lan@example.com",
                "role": "ADMIN"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("ADMIN"));
        let (result, out) = run(&ctx, &["admin", "users", "update", "lan", "--role", "admin"]).await;
        result.unwrap();
        assert_eq!(out, "User lan updated (ADMIN)\n");
    }

    #[tokio::test]
    async fn test_user_update_unknown_user() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/get-user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("ADMIN"));
        let (result, _) = run(&ctx, &["admin", "users", "update", "ghost", "--role", "user"]).await;
        match result.unwrap_err() {
            CliError::NotFound(what) => assert_eq!(what, "user ghost"),
            e => panic!("Expected NotFound, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_stats_prints_distribution_and_top_rated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/book/0/0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "title": "Truyện Kiều", "author": "Nguyễn Du", "rating": 4.6 },
                { "id": 2, "title": "Số đỏ", "author": "Vũ Trọng Phụng", "rating": 3.2 },
                { "id": 3, "title": "Chí Phèo", "author": "Nam Cao" }
            ])))
            .mount(&mock_server)
            .await;

        let ctx = context(&mock_server, Some("ADMIN"));
        let (result, out) = run(&ctx, &["admin", "stats", "--top", "1"]).await;
        result.unwrap();

        assert!(out.starts_with("3 books, 2 rated"));
        assert!(out.contains("Top rated"));
        assert!(out.contains("Truyện Kiều"));
        assert!(!out.contains("Số đỏ"));
    }
}
