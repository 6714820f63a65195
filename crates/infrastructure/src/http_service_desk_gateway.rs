use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use servicedesk_application::{AssetGateway, TicketGateway, UserDirectory};
use servicedesk_core::{AppError, AppResult, Role, UserId};
use servicedesk_domain::{
    Asset, NewAsset, NewTicket, NewUser, Ticket, TicketId, TicketPriority, TicketStatus,
    UserRecord,
};
use tracing::debug;
use url::Url;

#[derive(Debug, Serialize)]
struct StatusBody {
    status: TicketStatus,
}

#[derive(Debug, Serialize)]
struct AssigneeBody<'a> {
    assignee_id: &'a str,
}

#[derive(Debug, Serialize)]
struct RoleBody {
    role: Role,
}

#[derive(Debug, Serialize)]
struct CreateTicketBody<'a> {
    creator_id: UserId,
    title: &'a str,
    description: &'a str,
    priority: TicketPriority,
    category: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateAssetBody<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    asset_type: &'a str,
    serial_number: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    name: &'a str,
    email: &'a str,
    role: Role,
}

/// JSON-over-HTTP client for a remote service desk backend.
#[derive(Debug, Clone)]
pub struct HttpServiceDeskGateway {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpServiceDeskGateway {
    /// Creates a gateway for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))?;

        Self::with_client(http_client, base_url)
    }

    /// Creates a gateway reusing an existing client.
    pub fn with_client(http_client: reqwest::Client, base_url: &str) -> AppResult<Self> {
        Ok(Self {
            http_client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path)
            .map_err(|error| AppError::Internal(format!("invalid backend path '{path}': {error}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> AppResult<T> {
        debug!(%url, "backend GET");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    async fn send_json<B, T>(&self, method: reqwest::Method, url: Url, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(%method, %url, "backend request");
        let response = self
            .http_client
            .request(method, url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    async fn put_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> AppResult<()> {
        debug!(%url, "backend PUT");
        let response = self
            .http_client
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }
}

#[async_trait]
impl TicketGateway for HttpServiceDeskGateway {
    async fn fetch_tickets(&self, caller_id: UserId, caller_role: Role) -> AppResult<Vec<Ticket>> {
        let mut url = self.endpoint("tickets")?;
        url.query_pairs_mut()
            .append_pair("caller_id", &caller_id.to_string())
            .append_pair("caller_role", caller_role.as_str());

        self.get_json(url).await
    }

    async fn update_ticket_status(
        &self,
        ticket_id: TicketId,
        status: TicketStatus,
    ) -> AppResult<()> {
        let url = self.endpoint(&format!("tickets/{ticket_id}/status"))?;
        self.put_json(url, &StatusBody { status }).await
    }

    async fn assign_ticket(&self, ticket_id: TicketId, assignee_id: &str) -> AppResult<()> {
        let url = self.endpoint(&format!("tickets/{ticket_id}/assignee"))?;
        self.put_json(url, &AssigneeBody { assignee_id }).await
    }

    async fn search_tickets(&self, query: &str) -> AppResult<Vec<Ticket>> {
        let mut url = self.endpoint("tickets/search")?;
        url.query_pairs_mut().append_pair("q", query);

        self.get_json(url).await
    }

    async fn create_ticket(&self, creator: UserId, ticket: NewTicket) -> AppResult<Ticket> {
        let url = self.endpoint("tickets")?;
        let body = CreateTicketBody {
            creator_id: creator,
            title: ticket.title(),
            description: ticket.description(),
            priority: ticket.priority(),
            category: ticket.category(),
        };

        self.send_json(reqwest::Method::POST, url, &body).await
    }
}

#[async_trait]
impl AssetGateway for HttpServiceDeskGateway {
    async fn fetch_assets(&self) -> AppResult<Vec<Asset>> {
        self.get_json(self.endpoint("assets")?).await
    }

    async fn create_asset(&self, asset: NewAsset) -> AppResult<Asset> {
        let body = CreateAssetBody {
            name: asset.name(),
            asset_type: asset.asset_type(),
            serial_number: asset.serial_number(),
        };

        self.send_json(reqwest::Method::POST, self.endpoint("assets")?, &body)
            .await
    }
}

#[async_trait]
impl UserDirectory for HttpServiceDeskGateway {
    async fn fetch_users(&self) -> AppResult<Vec<UserRecord>> {
        self.get_json(self.endpoint("users")?).await
    }

    async fn update_user_role(&self, user_id: UserId, role: Role) -> AppResult<()> {
        let url = self.endpoint(&format!("users/{user_id}/role"))?;
        self.put_json(url, &RoleBody { role }).await
    }

    async fn create_user(&self, user: NewUser) -> AppResult<UserRecord> {
        let body = CreateUserBody {
            name: user.name(),
            email: user.email(),
            role: user.role(),
        };

        self.send_json(reqwest::Method::POST, self.endpoint("users")?, &body)
            .await
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let mut url = self.endpoint("users/lookup")?;
        url.query_pairs_mut().append_pair("email", email);

        debug!(%url, "backend GET");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }
}

fn normalize_base_url(base_url: &str) -> AppResult<Url> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash).map_err(|error| {
        AppError::Validation(format!("invalid backend base URL '{base_url}': {error}"))
    })?;
    if url.cannot_be_a_base() {
        return Err(AppError::Validation(format!(
            "backend base URL '{base_url}' cannot carry paths"
        )));
    }

    Ok(url)
}

fn transport_error(error: reqwest::Error) -> AppError {
    if error.is_timeout() {
        return AppError::Internal(format!("backend request timed out: {error}"));
    }
    AppError::Internal(format!("backend transport error: {error}"))
}

async fn ensure_success(response: reqwest::Response) -> AppResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<response body unavailable>".to_owned());
    Err(status_error(status, body))
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    ensure_success(response)
        .await?
        .json::<T>()
        .await
        .map_err(|error| AppError::Internal(format!("backend returned malformed JSON: {error}")))
}

fn status_error(status: reqwest::StatusCode, body: String) -> AppError {
    let message = if body.trim().is_empty() {
        format!("backend responded with status {status}")
    } else {
        body
    };

    match status.as_u16() {
        400 | 422 => AppError::Validation(message),
        401 => AppError::Unauthorized(message),
        403 => AppError::Forbidden(message),
        404 => AppError::NotFound(message),
        409 => AppError::Conflict(message),
        _ => AppError::Internal(message),
    }
}
