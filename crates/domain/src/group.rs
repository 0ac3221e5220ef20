use chrono::{DateTime, Utc};
use derive_more::{Deref, Display};

use crate::{CreateError, Name, NameError, ReadError, UpdateError, User, UserID};

#[allow(async_fn_in_trait)]
pub trait GroupService {
    async fn get_friends(&self, user_id: &UserID) -> Result<Vec<Member>, ReadError>;
    async fn get_group(&self, id: &GroupID) -> Result<Group, ReadError>;
    async fn get_group_members(&self, id: &GroupID) -> Result<Vec<Member>, ReadError>;
    async fn create_group(
        &self,
        creator: &User,
        draft: &GroupDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Group, CreateGroupError>;
    async fn modify_group(
        &self,
        id: &GroupID,
        name: Option<Name>,
        image_url: Option<String>,
    ) -> Result<Group, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait FriendRepository {
    async fn read_friends(&self, user_id: &UserID) -> Result<Vec<Member>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait GroupRepository {
    async fn create_group(
        &self,
        name: Name,
        image_url: String,
        created_at: DateTime<Utc>,
    ) -> Result<Group, CreateError>;
    async fn modify_group(
        &self,
        id: &GroupID,
        name: Option<Name>,
        image_url: Option<String>,
    ) -> Result<Group, UpdateError>;
    async fn read_group(&self, id: &GroupID) -> Result<Group, ReadError>;
    async fn read_group_members(&self, id: &GroupID) -> Result<Vec<Member>, ReadError>;
    async fn create_group_member(
        &self,
        id: &GroupID,
        member: Member,
    ) -> Result<Member, CreateError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupID,
    pub name: Name,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deref, Display, Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupID(String);

impl From<&str> for GroupID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GroupID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A user as listed in a friends list or among the members of a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: UserID,
    pub name: String,
    pub image_url: String,
}

impl From<&User> for Member {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.display_name.clone(),
            image_url: user.photo_url.clone(),
        }
    }
}

/// The input of the group creation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupDraft {
    pub name: String,
    pub image_url: String,
    members: Vec<Member>,
}

impl GroupDraft {
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn is_member(&self, id: &UserID) -> bool {
        self.members.iter().any(|m| m.id == *id)
    }

    /// Adds the member if absent and removes it otherwise. Returns whether it is a member
    /// afterwards.
    pub fn toggle_member(&mut self, member: Member) -> bool {
        if self.is_member(&member.id) {
            self.members.retain(|m| m.id != member.id);
            false
        } else {
            self.members.push(member);
            true
        }
    }

    pub fn validate(&self) -> Result<(Name, String), GroupError> {
        let name = Name::new(&self.name)?;
        let image_url = self.image_url.trim();
        if image_url.is_empty() {
            return Err(GroupError::NoImage);
        }
        Ok((name, image_url.to_string()))
    }

    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GroupError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error("Group image must be chosen")]
    NoImage,
}

#[derive(thiserror::Error, Debug)]
pub enum CreateGroupError {
    #[error(transparent)]
    Invalid(#[from] GroupError),
    #[error(transparent)]
    Create(#[from] CreateError),
}
