//! Post handlers.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use quill_core::domain::Post;
use quill_core::ports::{BaseRepository, PostRepository};

use crate::error::{PageError, PageResult};
use crate::requester::Requester;
use crate::state::AppState;

/// Form body shared by the add and edit views.
#[derive(Debug, Deserialize)]
pub(super) struct PostForm {
    title: String,
    content: String,
}

impl PostForm {
    /// Both fields are required; surrounding whitespace does not count.
    fn validate(&self) -> Result<(), PageError> {
        if self.title.trim().is_empty() {
            return Err(PageError::BadRequest("title must not be empty".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(PageError::BadRequest(
                "content must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// GET / - every post, newest first.
pub(super) async fn list(state: web::Data<AppState>) -> PageResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    let mut ctx = tera::Context::new();
    ctx.insert("posts", &posts);
    render(&state, "index.html.tera", &ctx)
}

/// GET /post/{pk}/ - a single post with its author.
pub(super) async fn detail(
    state: web::Data<AppState>,
    pk: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let pk = pk.into_inner();
    let post = state
        .posts
        .find_by_id(pk)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("post {pk}")))?;
    let author = state.users.find_by_id(post.author_id).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("post", &post);
    ctx.insert("author", &author);
    render(&state, "detail.html.tera", &ctx)
}

/// GET /add/ - blank submission form.
pub(super) async fn add_form(
    state: web::Data<AppState>,
    _requester: Requester,
) -> PageResult<HttpResponse> {
    let mut ctx = tera::Context::new();
    ctx.insert("post", &None::<Post>);
    ctx.insert("action", "/add/");
    render(&state, "form.html.tera", &ctx)
}

/// POST /add/ - create a post owned by the requester.
pub(super) async fn add(
    state: web::Data<AppState>,
    requester: Requester,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let form = form.into_inner();
    form.validate()?;

    let post = state
        .posts
        .save(Post::new(requester.user_id, form.title, form.content))
        .await?;
    tracing::info!(post_id = post.id, author = %requester.username, "created post");

    Ok(see_other(&format!("/post/{}/", post.id)))
}

/// GET /{pk}/edit - submission form pre-filled with the existing post.
pub(super) async fn edit_form(
    state: web::Data<AppState>,
    requester: Requester,
    pk: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let post = fetch_owned(&state, pk.into_inner(), &requester).await?;

    let mut ctx = tera::Context::new();
    ctx.insert("action", &format!("/{}/edit", post.id));
    ctx.insert("post", &Some(post));
    render(&state, "form.html.tera", &ctx)
}

/// POST /{pk}/edit - update title and content in place.
pub(super) async fn edit(
    state: web::Data<AppState>,
    requester: Requester,
    pk: web::Path<i32>,
    form: web::Form<PostForm>,
) -> PageResult<HttpResponse> {
    let mut post = fetch_owned(&state, pk.into_inner(), &requester).await?;
    let form = form.into_inner();
    form.validate()?;

    post.title = form.title;
    post.content = form.content;
    let post = state.posts.save(post).await?;

    Ok(see_other(&format!("/post/{}/", post.id)))
}

/// POST /{pk}/delete/ - delete the requester's own post.
pub(super) async fn delete(
    state: web::Data<AppState>,
    requester: Requester,
    pk: web::Path<i32>,
) -> PageResult<HttpResponse> {
    let post = fetch_owned(&state, pk.into_inner(), &requester).await?;

    state.posts.delete(post.id).await?;
    tracing::info!(post_id = post.id, author = %requester.username, "deleted post");

    Ok(see_other("/"))
}

/// Look up a post and check the requester owns it, before any mutation.
async fn fetch_owned(state: &AppState, pk: i32, requester: &Requester) -> Result<Post, PageError> {
    let post = state
        .posts
        .find_by_id(pk)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("post {pk}")))?;

    if post.author_id != requester.user_id {
        return Err(PageError::Forbidden);
    }

    Ok(post)
}

fn render(state: &AppState, name: &str, ctx: &tera::Context) -> PageResult<HttpResponse> {
    let body = state
        .templates
        .render(name, ctx)
        .map_err(|e| PageError::Internal(format!("template {name}: {e}")))?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}
