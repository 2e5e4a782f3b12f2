//! API client consuming the Autogram HTTP contract; the counterpart of
//! the server in `routes/`. Pages hold one `ApiClient` and issue at most
//! one request per user action; there is no retry, cancellation or
//! caching here.

pub mod filter;
pub mod pagination;
pub mod session;
pub mod validate;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::models::{
    admin::Admin,
    announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    consumer::Consumer,
    helper::{Helper, HelperCreateRequest},
    producer::{Producer, ProducerCreateRequest},
    sns_user::{RequestByWeek, SnsRaiseUser, UserActionVerification},
    unfollower::{
        UnfollowCheckRequest, UnfollowCheckResult, Unfollower, UnfollowerServiceRegisterRequest,
        UnfollowerServiceRegisterResponse,
    },
};
use session::{Session, LOGIN_REDIRECT};

/// Fallback when a failure body carries no usable `detail`.
const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),
    /// Non-401 API failure; `detail` is the server's message verbatim.
    #[error("{detail}")]
    Api { status: u16, detail: String },
    /// Any 401. The token is already cleared; navigate to `redirect_to`.
    #[error("unauthorized")]
    Unauthorized { redirect_to: &'static str },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMessage {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SnsUserPage {
    pub users: Vec<SnsRaiseUser>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct HelperPage {
    pub helpers: Vec<Helper>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementPage {
    pub announcements: Vec<Announcement>,
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}

#[derive(Debug, Deserialize)]
pub struct OwnerUnfollowers {
    pub owner: String,
    pub count: usize,
    pub unfollowers: Vec<Unfollower>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token when one is stored.
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Decode a response, applying the two contract-wide rules: any 401
    /// drops the session and redirects to the login page, and error
    /// bodies surface `detail` verbatim.
    async fn decode<T: DeserializeOwned>(&mut self, res: Response) -> Result<T, ClientError> {
        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            return Err(ClientError::Unauthorized {
                redirect_to: LOGIN_REDIRECT,
            });
        }
        if status.is_success() {
            return Ok(res.json::<T>().await?);
        }

        let detail = res
            .json::<ErrorEnvelope>()
            .await
            .map(|e| e.detail)
            .unwrap_or_else(|_| GENERIC_ERROR.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    /// Like `decode` for endpoints answering 204.
    async fn decode_no_content(&mut self, res: Response) -> Result<(), ClientError> {
        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.clear();
            return Err(ClientError::Unauthorized {
                redirect_to: LOGIN_REDIRECT,
            });
        }
        if status.is_success() {
            return Ok(());
        }

        let detail = res
            .json::<ErrorEnvelope>()
            .await
            .map(|e| e.detail)
            .unwrap_or_else(|_| GENERIC_ERROR.to_string());
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    // Public endpoints

    pub async fn announcements(&mut self) -> Result<Vec<Announcement>, ClientError> {
        let res = self.http.get(self.url("/api/announcements")).send().await?;
        self.decode(res).await
    }

    pub async fn requests_by_week(
        &mut self,
        username: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RequestByWeek>, ClientError> {
        let mut params = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(username) = username {
            params.push(("username", username.to_string()));
        }
        let res = self
            .http
            .get(self.url("/api/request-by-week"))
            .query(&params)
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn user_action_verifications(
        &mut self,
        username: Option<&str>,
        limit: i64,
    ) -> Result<Vec<UserActionVerification>, ClientError> {
        let mut params = vec![("limit", limit.to_string())];
        if let Some(username) = username {
            params.push(("username", username.to_string()));
        }
        let res = self
            .http
            .get(self.url("/api/user-action-verification"))
            .query(&params)
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn register_consumer(
        &mut self,
        instagram_username: &str,
    ) -> Result<Consumer, ClientError> {
        validate::required(instagram_username, "인스타그램 사용자명을 입력해주세요")?;
        validate::instagram_handle(instagram_username)?;

        let res = self
            .http
            .post(self.url("/api/consumer"))
            .json(&json!({ "instagram_username": instagram_username }))
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn consumer(&mut self, username: &str) -> Result<Consumer, ClientError> {
        validate::required(username, "사용자명을 입력해주세요")?;
        let res = self
            .http
            .get(self.url(&format!("/api/consumer/{username}")))
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn delete_consumer(&mut self, username: &str) -> Result<DeleteMessage, ClientError> {
        validate::required(username, "사용자명을 입력해주세요")?;
        let res = self
            .http
            .delete(self.url(&format!("/api/consumer/{username}")))
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn register_producer(
        &mut self,
        form: &ProducerCreateRequest,
    ) -> Result<Producer, ClientError> {
        validate::required(&form.instagram_username, "인스타그램 사용자명을 입력해주세요")?;
        validate::instagram_handle(&form.instagram_username)?;
        validate::required(&form.instagram_password, "비밀번호를 입력해주세요")?;

        let res = self
            .http
            .post(self.url("/api/producer"))
            .json(form)
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn producer(&mut self, username: &str) -> Result<Producer, ClientError> {
        validate::required(username, "사용자명을 입력해주세요")?;
        let res = self
            .http
            .get(self.url(&format!("/api/producer/{username}")))
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn delete_producer(&mut self, username: &str) -> Result<DeleteMessage, ClientError> {
        validate::required(username, "사용자명을 입력해주세요")?;
        let res = self
            .http
            .delete(self.url(&format!("/api/producer/{username}")))
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn check_unfollowers(
        &mut self,
        form: &UnfollowCheckRequest,
    ) -> Result<UnfollowCheckResult, ClientError> {
        validate::required(&form.instagram_username, "인스타그램 사용자명을 입력해주세요")?;
        validate::instagram_handle(&form.instagram_username)?;
        validate::required(&form.instagram_password, "비밀번호를 입력해주세요")?;

        let res = self
            .http
            .post(self.url("/api/unfollow-checker"))
            .json(form)
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn register_unfollower_service(
        &mut self,
        form: &UnfollowerServiceRegisterRequest,
    ) -> Result<UnfollowerServiceRegisterResponse, ClientError> {
        validate::required(&form.username, "사용자명을 입력해주세요")?;
        validate::required(&form.password, "비밀번호를 입력해주세요")?;

        let res = self
            .http
            .post(self.url("/api/unfollower-service/register"))
            .json(form)
            .send()
            .await?;
        self.decode(res).await
    }

    pub async fn unfollowers(&mut self, owner: &str) -> Result<OwnerUnfollowers, ClientError> {
        validate::required(owner, "사용자명을 입력해주세요")?;
        let res = self
            .http
            .get(self.url(&format!("/api/unfollowers/{owner}")))
            .send()
            .await?;
        self.decode(res).await
    }

    // Admin endpoints

    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        validate::required(username, "아이디를 입력해주세요")?;
        validate::required(password, "비밀번호를 입력해주세요")?;

        let res = self
            .http
            .post(self.url("/api/admin/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        #[derive(Deserialize)]
        struct Token {
            access_token: String,
        }
        let token: Token = self.decode(res).await?;
        self.session.store(token.access_token);
        Ok(())
    }

    pub fn logout(&mut self) {
        self.session.clear();
    }

    pub async fn me(&mut self) -> Result<Admin, ClientError> {
        let req = self.authorized(self.http.get(self.url("/api/admin/me")));
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn sns_users(
        &mut self,
        page: i64,
        limit: i64,
        search: &str,
    ) -> Result<SnsUserPage, ClientError> {
        let req = self.authorized(
            self.http
                .get(self.url("/api/admin/sns-users"))
                .query(&[("page", page.to_string()), ("limit", limit.to_string()), ("search", search.to_string())]),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn create_sns_user(&mut self, username: &str) -> Result<SnsRaiseUser, ClientError> {
        validate::required(username, "사용자명을 입력해주세요")?;
        let req = self.authorized(
            self.http
                .post(self.url("/api/admin/sns-users"))
                .json(&json!({ "username": username })),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn update_sns_user(
        &mut self,
        id: i64,
        username: &str,
    ) -> Result<SnsRaiseUser, ClientError> {
        validate::required(username, "사용자명을 입력해주세요")?;
        let req = self.authorized(
            self.http
                .put(self.url(&format!("/api/admin/sns-users/{id}")))
                .json(&json!({ "username": username })),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn delete_sns_user(&mut self, id: i64) -> Result<(), ClientError> {
        let req = self.authorized(
            self.http
                .delete(self.url(&format!("/api/admin/sns-users/{id}"))),
        );
        let res = req.send().await?;
        self.decode_no_content(res).await
    }

    pub async fn helpers(
        &mut self,
        page: i64,
        limit: i64,
        search: &str,
    ) -> Result<HelperPage, ClientError> {
        let req = self.authorized(
            self.http
                .get(self.url("/api/admin/helpers"))
                .query(&[("page", page.to_string()), ("limit", limit.to_string()), ("search", search.to_string())]),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn create_helper(
        &mut self,
        form: &HelperCreateRequest,
    ) -> Result<Helper, ClientError> {
        validate::required(&form.instagram_username, "인스타그램 사용자명을 입력해주세요")?;
        validate::instagram_handle(&form.instagram_username)?;
        validate::required(&form.instagram_password, "비밀번호를 입력해주세요")?;

        let req = self.authorized(
            self.http
                .post(self.url("/api/admin/helpers"))
                .json(form),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn set_helper_active(
        &mut self,
        id: i64,
        is_active: bool,
    ) -> Result<Helper, ClientError> {
        let req = self.authorized(
            self.http
                .put(self.url(&format!("/api/admin/helpers/{id}")))
                .json(&json!({ "is_active": is_active })),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn delete_helper(&mut self, id: i64) -> Result<(), ClientError> {
        let req = self.authorized(
            self.http
                .delete(self.url(&format!("/api/admin/helpers/{id}"))),
        );
        let res = req.send().await?;
        self.decode_no_content(res).await
    }

    pub async fn admin_announcements(
        &mut self,
        page: i64,
        limit: i64,
        search: &str,
    ) -> Result<AnnouncementPage, ClientError> {
        let req = self.authorized(
            self.http
                .get(self.url("/api/admin/announcements"))
                .query(&[("page", page.to_string()), ("limit", limit.to_string()), ("search", search.to_string())]),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn create_announcement(
        &mut self,
        form: &CreateAnnouncementRequest,
    ) -> Result<Announcement, ClientError> {
        validate::required(&form.title, "제목을 입력해주세요")?;
        validate::required(&form.content, "내용을 입력해주세요")?;

        let req = self.authorized(
            self.http
                .post(self.url("/api/admin/announcements"))
                .json(form),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn update_announcement(
        &mut self,
        id: i64,
        form: &UpdateAnnouncementRequest,
    ) -> Result<Announcement, ClientError> {
        let req = self.authorized(
            self.http
                .put(self.url(&format!("/api/admin/announcements/{id}")))
                .json(form),
        );
        let res = req.send().await?;
        self.decode(res).await
    }

    pub async fn delete_announcement(&mut self, id: i64) -> Result<(), ClientError> {
        let req = self.authorized(
            self.http
                .delete(self.url(&format!("/api/admin/announcements/{id}"))),
        );
        let res = req.send().await?;
        self.decode_no_content(res).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, routing::post, Json, Router};

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_empty_required_field_sends_no_request() {
        // Unroutable base URL: reaching the network would fail loudly,
        // but validation must reject first.
        let mut client = ApiClient::new("http://127.0.0.1:9");
        let err = client.register_consumer("").await.unwrap_err();
        match err {
            ClientError::Validation(msg) => {
                assert_eq!(msg, "인스타그램 사용자명을 입력해주세요")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_handle_sends_no_request() {
        let mut client = ApiClient::new("http://127.0.0.1:9");
        let err = client.register_consumer("has space").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_401_clears_token_and_redirects() {
        let router = Router::new().route(
            "/api/admin/me",
            get(|| async {
                (
                    axum::http::StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({ "detail": "Invalid authentication credentials" })),
                )
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        client.session.store("stale-token".into());

        let err = client.me().await.unwrap_err();
        match err {
            ClientError::Unauthorized { redirect_to } => assert_eq!(redirect_to, "/admin/login"),
            other => panic!("expected unauthorized, got {other:?}"),
        }
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_error_detail_surfaced_verbatim() {
        let router = Router::new().route(
            "/api/consumer",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "detail": "이미 등록된 사용자입니다." })),
                )
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        let err = client.register_consumer("kimchi").await.unwrap_err();
        match err {
            ClientError::Api { status, detail } => {
                assert_eq!(status, 400);
                assert_eq!(detail, "이미 등록된 사용자입니다.");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_error_body_falls_back() {
        let router = Router::new().route(
            "/api/consumer",
            post(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        let err = client.register_consumer("kimchi").await.unwrap_err();
        match err {
            ClientError::Api { detail, .. } => assert_eq!(detail, GENERIC_ERROR),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_stores_token_and_logout_clears() {
        let router = Router::new().route(
            "/api/admin/login",
            post(|| async {
                Json(serde_json::json!({
                    "access_token": "jwt-abc",
                    "token_type": "bearer",
                }))
            }),
        );
        let base = spawn(router).await;

        let mut client = ApiClient::new(base);
        assert!(!client.session().is_authenticated());

        client.login("staff", "hunter2").await.unwrap();
        assert!(client.session().is_authenticated());
        assert_eq!(client.session().token(), Some("jwt-abc"));

        client.logout();
        assert!(!client.session().is_authenticated());
    }
}
