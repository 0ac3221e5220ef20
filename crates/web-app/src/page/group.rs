use socialift_domain::{
    Group, GroupError, GroupID, GroupService, Member, Name, ReadError, UpdateError,
};

use crate::{Context, Navigator};

/// State of the group page, showing the group and its members.
pub struct Page {
    id: GroupID,
    group: Option<Group>,
    members: Vec<Member>,
}

impl Page {
    #[must_use]
    pub fn new(id: GroupID) -> Self {
        Self {
            id,
            group: None,
            members: vec![],
        }
    }

    #[must_use]
    pub fn id(&self) -> &GroupID {
        &self.id
    }

    #[must_use]
    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Loads the group and its members. Members stay empty if the group cannot be read.
    pub async fn load<S: GroupService, N>(
        &mut self,
        context: &Context<S, N>,
    ) -> Result<(), ReadError> {
        self.group = Some(context.service.get_group(&self.id).await?);
        self.members = context.service.get_group_members(&self.id).await?;
        Ok(())
    }

    pub async fn rename<S: GroupService, N>(
        &mut self,
        context: &Context<S, N>,
        name: &str,
    ) -> Result<(), ModifyError> {
        let name = Name::new(name).map_err(GroupError::from)?;
        self.modify(context, Some(name), None).await
    }

    pub async fn change_image<S: GroupService, N>(
        &mut self,
        context: &Context<S, N>,
        image_url: &str,
    ) -> Result<(), ModifyError> {
        let image_url = image_url.trim();
        if image_url.is_empty() {
            return Err(GroupError::NoImage.into());
        }
        self.modify(context, None, Some(image_url.to_string())).await
    }

    async fn modify<S: GroupService, N>(
        &mut self,
        context: &Context<S, N>,
        name: Option<Name>,
        image_url: Option<String>,
    ) -> Result<(), ModifyError> {
        let group = context
            .service
            .modify_group(&self.id, name, image_url)
            .await?;
        self.group = Some(group);
        Ok(())
    }

    pub fn back<S, N: Navigator>(&self, context: &Context<S, N>) {
        context.navigator.go_back();
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ModifyError {
    #[error(transparent)]
    Invalid(#[from] GroupError),
    #[error(transparent)]
    Update(#[from] UpdateError),
}
