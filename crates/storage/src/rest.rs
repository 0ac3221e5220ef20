//! REST
//!
//! Access to the Firestore REST API. Every request is authorized by the ID token of the signed-in
//! user. Writes are only possible while a connection is available.

use chrono::{DateTime, Utc};
use gloo_net::http::{Request, RequestBuilder, Response};
use log::debug;
use socialift_domain as domain;
use socialift_web_app::Settings;

use crate::firestore::{self, Document, Fields, ListDocumentsResponse, Value};

const FIRESTORE_URL: &str = "https://firestore.googleapis.com/v1";

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
    pub settings: Settings,
    pub id_token: String,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new(settings: Settings, id_token: String) -> Self {
        Self {
            sender: GlooNetSendRequest,
            settings,
            id_token,
        }
    }
}

#[derive(strum::AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    Users,
    Workouts,
    Friends,
    Groups,
    Members,
}

impl<S: SendRequest> REST<S> {
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!(
            "{FIRESTORE_URL}/projects/{}/databases/(default)/documents",
            self.settings.project_id
        )
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.documents_url())
    }

    fn authorize(&self, builder: RequestBuilder) -> Result<RequestBuilder, FetchError> {
        if self.id_token.is_empty() {
            return Err(FetchError::NoSession);
        }
        Ok(builder.header("Authorization", &format!("Bearer {}", self.id_token)))
    }

    pub(crate) async fn fetch<T>(&self, request: Request) -> Result<T, FetchError>
    where
        T: 'static + for<'de> serde::Deserialize<'de>,
    {
        let Ok(response) = self.sender.send_request(request).await else {
            return Err(FetchError::NoConnection);
        };
        match response.status() {
            200..=299 => response
                .json::<T>()
                .await
                .map_err(|err| FetchError::Deserialization(err.to_string())),
            401 | 403 => Err(FetchError::NoSession),
            409 => Err(FetchError::Conflict),
            status => Err(FetchError::Status(status, response.status_text())),
        }
    }

    async fn list_documents(&self, path: &str) -> Result<Vec<Document>, FetchError> {
        let mut documents = vec![];
        let mut page_token: Option<String> = None;
        loop {
            let mut params = vec![];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.as_str()));
            }
            let request = self
                .authorize(Request::get(&self.url(path)).query(params))?
                .build()?;
            let response: ListDocumentsResponse = self.fetch(request).await?;
            documents.extend(response.documents);
            match response.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        debug!("read {} documents from {path}", documents.len());
        Ok(documents)
    }

    async fn get_document(&self, path: &str) -> Result<Document, FetchError> {
        let request = self.authorize(Request::get(&self.url(path)))?.build()?;
        self.fetch(request).await
    }

    async fn create_document(&self, path: &str, fields: Fields) -> Result<Document, FetchError> {
        let request = self
            .authorize(Request::post(&self.url(path)))?
            .json(&Document::new(fields))?;
        self.fetch(request).await
    }

    /// Only the given fields are written, all other fields of the document stay unchanged.
    async fn patch_document(&self, path: &str, fields: Fields) -> Result<Document, FetchError> {
        let mask = fields
            .keys()
            .map(|key| ("updateMask.fieldPaths", key.as_str()))
            .collect::<Vec<_>>();
        let builder = self.authorize(Request::patch(&self.url(path)).query(mask))?;
        let request = builder.json(&Document::new(fields))?;
        self.fetch(request).await
    }
}

#[must_use]
pub fn user_collection(user_id: &domain::UserID, collection: Collection) -> String {
    format!(
        "{}/{user_id}/{}",
        Collection::Users.as_ref(),
        collection.as_ref()
    )
}

#[must_use]
pub fn group_document(id: &domain::GroupID) -> String {
    format!("{}/{id}", Collection::Groups.as_ref())
}

#[must_use]
pub fn group_members(id: &domain::GroupID) -> String {
    format!("{}/{}", group_document(id), Collection::Members.as_ref())
}

impl<S: SendRequest> domain::WorkoutRepository for REST<S> {
    async fn read_workouts(
        &self,
        user_id: &domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .list_documents(&user_collection(user_id, Collection::Workouts))
            .await?
            .iter()
            .map(firestore::workout_from_document)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn create_workout(
        &self,
        user_id: &domain::UserID,
        document: domain::WorkoutDocument,
    ) -> Result<domain::Workout, domain::CreateError> {
        let created = self
            .create_document(
                &user_collection(user_id, Collection::Workouts),
                firestore::workout_fields(&document),
            )
            .await?;
        Ok(domain::Workout {
            id: created.id().into(),
            document,
        })
    }
}

impl<S: SendRequest> domain::FriendRepository for REST<S> {
    async fn read_friends(
        &self,
        user_id: &domain::UserID,
    ) -> Result<Vec<domain::Member>, domain::ReadError> {
        Ok(self
            .list_documents(&user_collection(user_id, Collection::Friends))
            .await?
            .iter()
            .map(firestore::friend_from_document)
            .collect::<Result<Vec<_>, _>>()?)
    }
}

impl<S: SendRequest> domain::GroupRepository for REST<S> {
    async fn create_group(
        &self,
        name: domain::Name,
        image_url: String,
        created_at: DateTime<Utc>,
    ) -> Result<domain::Group, domain::CreateError> {
        let created = self
            .create_document(
                Collection::Groups.as_ref(),
                firestore::group_fields(&name, &image_url, created_at),
            )
            .await?;
        Ok(domain::Group {
            id: created.id().into(),
            name,
            image_url,
            created_at,
        })
    }

    async fn modify_group(
        &self,
        id: &domain::GroupID,
        name: Option<domain::Name>,
        image_url: Option<String>,
    ) -> Result<domain::Group, domain::UpdateError> {
        let mut fields = Fields::new();
        if let Some(name) = name {
            fields.insert(String::from("group_name"), Value::string(name.as_str()));
        }
        if let Some(image_url) = image_url {
            fields.insert(String::from("group_img_url"), Value::string(image_url));
        }
        let document = if fields.is_empty() {
            self.get_document(&group_document(id)).await?
        } else {
            self.patch_document(&group_document(id), fields).await?
        };
        Ok(firestore::group_from_document(&document)?)
    }

    async fn read_group(&self, id: &domain::GroupID) -> Result<domain::Group, domain::ReadError> {
        let document = self.get_document(&group_document(id)).await?;
        Ok(firestore::group_from_document(&document)?)
    }

    async fn read_group_members(
        &self,
        id: &domain::GroupID,
    ) -> Result<Vec<domain::Member>, domain::ReadError> {
        Ok(self
            .list_documents(&group_members(id))
            .await?
            .iter()
            .map(firestore::member_from_document)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn create_group_member(
        &self,
        id: &domain::GroupID,
        member: domain::Member,
    ) -> Result<domain::Member, domain::CreateError> {
        self.create_document(&group_members(id), firestore::member_fields(&member))
            .await?;
        Ok(member)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("conflict")]
    Conflict,
    #[error("{0} {1}")]
    Status(u16, String),
    #[error("deserialization failed: {0}")]
    Deserialization(String),
    #[error(transparent)]
    Request(#[from] gloo_net::Error),
}

impl From<FetchError> for domain::StorageError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NoConnection => domain::StorageError::NoConnection,
            FetchError::NoSession => domain::StorageError::NoSession,
            _ => domain::StorageError::Other(Box::new(value)),
        }
    }
}

impl From<FetchError> for domain::ReadError {
    fn from(value: FetchError) -> Self {
        domain::ReadError::Storage(value.into())
    }
}

impl From<FetchError> for domain::CreateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Conflict => domain::CreateError::Conflict,
            _ => domain::CreateError::Storage(value.into()),
        }
    }
}

impl From<FetchError> for domain::UpdateError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::Conflict => domain::UpdateError::Conflict,
            _ => domain::UpdateError::Storage(value.into()),
        }
    }
}
