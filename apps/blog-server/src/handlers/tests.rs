use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use sea_orm::{ConnectionTrait, Schema};
use serde::Serialize;

use quill_core::domain::{Post, User};
use quill_core::ports::{BaseRepository, PostRepository, SessionTokenService};
use quill_infra::database::{Database, DatabaseConfig, entity};
use quill_infra::session::{JwtSessionService, SessionConfig};

use crate::requester::SESSION_COOKIE;
use crate::state::{self, AppState};

use super::configure_routes;

#[derive(Serialize)]
struct PostForm {
    title: String,
    content: String,
}

struct TestApp {
    state: web::Data<AppState>,
    sessions: web::Data<Arc<dyn SessionTokenService>>,
}

/// Fresh application state over an in-memory SQLite store with the schema
/// created from the entities. One pooled connection, so every handler sees
/// the same store.
async fn test_app() -> TestApp {
    let db = Database::open(&DatabaseConfig {
        url: "sqlite::memory:".to_owned(),
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .unwrap();

    let conn = db.handle();
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    conn.execute(backend.build(&schema.create_table_from_entity(entity::user::Entity)))
        .await
        .unwrap();
    conn.execute(backend.build(&schema.create_table_from_entity(entity::post::Entity)))
        .await
        .unwrap();

    let templates =
        state::load_templates(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*")).unwrap();
    let state = AppState::new(&db, templates);

    let sessions: Arc<dyn SessionTokenService> = Arc::new(JwtSessionService::new(SessionConfig {
        secret: "test-secret-key".to_owned(),
        ttl_hours: 1,
        issuer: "test".to_owned(),
    }));

    TestApp {
        state: web::Data::new(state),
        sessions: web::Data::new(sessions),
    }
}

async fn seed_user(app: &TestApp, username: &str) -> User {
    app.state
        .users
        .save(User::new(username.to_owned()))
        .await
        .unwrap()
}

async fn seed_post(app: &TestApp, author: &User, title: &str) -> Post {
    app.state
        .posts
        .save(Post::new(author.id, title.to_owned(), "Content".to_owned()))
        .await
        .unwrap()
}

fn session_cookie(app: &TestApp, user: &User) -> Cookie<'static> {
    let token = app.sessions.issue_token(user.id, &user.username).unwrap();
    Cookie::new(SESSION_COOKIE, token)
}

#[actix_web::test]
async fn list_with_empty_store_renders_empty_list() {
    let app = test_app().await;
    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&srv, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert_eq!(body.matches("<li>").count(), 0);
}

#[actix_web::test]
async fn list_renders_every_post() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    seed_post(&app, &alice, "First Post").await;
    seed_post(&app, &alice, "Second Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&srv, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert_eq!(body.matches("<li>").count(), 2);
    assert!(body.contains("First Post"));
    assert!(body.contains("Second Post"));
}

#[actix_web::test]
async fn detail_shows_post_and_author() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let post = seed_post(&app, &alice, "A Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::get()
            .uri(&format!("/post/{}/", post.id))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("A Post"));
    assert!(body.contains("alice"));
}

#[actix_web::test]
async fn detail_of_missing_post_is_not_found() {
    let app = test_app().await;
    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::get().uri("/post/42/").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn add_without_session_is_unauthorized() {
    let app = test_app().await;
    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri("/add/")
            .set_form(PostForm {
                title: "T".to_owned(),
                content: "C".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn add_form_without_session_is_unauthorized() {
    let app = test_app().await;
    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(&srv, test::TestRequest::get().uri("/add/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn add_creates_post_and_redirects_to_detail() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri("/add/")
            .cookie(session_cookie(&app, &alice))
            .set_form(PostForm {
                title: "T".to_owned(),
                content: "C".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    let posts = app.state.posts.find_all().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "T");
    assert_eq!(posts[0].content, "C");
    assert_eq!(posts[0].author_id, alice.id);
    assert_eq!(location, format!("/post/{}/", posts[0].id));

    let resp = test::call_service(&srv, test::TestRequest::get().uri(&location).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn add_with_empty_title_is_bad_request() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri("/add/")
            .cookie(session_cookie(&app, &alice))
            .set_form(PostForm {
                title: "  ".to_owned(),
                content: "C".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(app.state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn edit_form_is_prefilled() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let post = seed_post(&app, &alice, "Old Title").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::get()
            .uri(&format!("/{}/edit", post.id))
            .cookie(session_cookie(&app, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Old Title"));
}

#[actix_web::test]
async fn edit_updates_post_in_place() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let post = seed_post(&app, &alice, "Old Title").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri(&format!("/{}/edit", post.id))
            .cookie(session_cookie(&app, &alice))
            .set_form(PostForm {
                title: "New Title".to_owned(),
                content: "New Content".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get(header::LOCATION).unwrap();
    assert_eq!(location, &format!("/post/{}/", post.id));

    let updated = app.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "New Title");
    assert_eq!(updated.content, "New Content");
    assert_eq!(updated.author_id, alice.id);
    assert_eq!(app.state.posts.find_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn edit_by_non_author_is_forbidden() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let bob = seed_user(&app, "bob").await;
    let post = seed_post(&app, &alice, "Alice's Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri(&format!("/{}/edit", post.id))
            .cookie(session_cookie(&app, &bob))
            .set_form(PostForm {
                title: "Hijacked".to_owned(),
                content: "Hijacked".to_owned(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let unchanged = app.state.posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(unchanged.title, "Alice's Post");
}

#[actix_web::test]
async fn delete_by_author_removes_post_and_redirects_to_list() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let post = seed_post(&app, &alice, "Doomed Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri(&format!("/{}/delete/", post.id))
            .cookie(session_cookie(&app, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let resp = test::call_service(
        &srv,
        test::TestRequest::get()
            .uri(&format!("/post/{}/", post.id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_by_non_author_is_forbidden_and_keeps_post() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let bob = seed_user(&app, "bob").await;
    let post = seed_post(&app, &alice, "Alice's Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri(&format!("/{}/delete/", post.id))
            .cookie(session_cookie(&app, &bob))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert!(
        app.state
            .posts
            .find_by_id(post.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn delete_without_session_is_unauthorized() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let post = seed_post(&app, &alice, "A Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::post()
            .uri(&format!("/{}/delete/", post.id))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn delete_with_get_is_method_not_allowed() {
    let app = test_app().await;
    let alice = seed_user(&app, "alice").await;
    let post = seed_post(&app, &alice, "A Post").await;

    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::get()
            .uri(&format!("/{}/delete/", post.id))
            .cookie(session_cookie(&app, &alice))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(
        app.state
            .posts
            .find_by_id(post.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[actix_web::test]
async fn unmatched_path_is_not_found() {
    let app = test_app().await;
    let srv = test::init_service(
        App::new()
            .app_data(app.state.clone())
            .app_data(app.sessions.clone())
            .configure(configure_routes),
    )
    .await;

    let resp = test::call_service(
        &srv,
        test::TestRequest::get().uri("/no/such/page/").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
