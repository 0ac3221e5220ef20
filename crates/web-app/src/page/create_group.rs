use chrono::{DateTime, Utc};
use socialift_domain::{
    CreateGroupError, Group, GroupDraft, GroupService, Member, ReadError, UserID,
};

use crate::{Context, Navigator, Route};

#[derive(Default)]
pub struct Page {
    pub draft: GroupDraft,
    friends: Vec<Member>,
}

impl Page {
    #[must_use]
    pub fn friends(&self) -> &[Member] {
        &self.friends
    }

    pub async fn load_friends<S: GroupService, N>(
        &mut self,
        context: &Context<S, N>,
    ) -> Result<(), ReadError> {
        self.friends = context.service.get_friends(&context.user.id).await?;
        Ok(())
    }

    /// Returns whether the friend is selected afterwards. Unknown IDs are ignored.
    pub fn toggle_member(&mut self, id: &UserID) -> bool {
        match self.friends.iter().find(|f| f.id == *id) {
            Some(friend) => self.draft.toggle_member(friend.clone()),
            None => false,
        }
    }

    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.draft.is_submittable()
    }

    /// Creates the group and shows it. The draft stays untouched on failure.
    pub async fn create<S: GroupService, N: Navigator>(
        &mut self,
        context: &Context<S, N>,
        now: DateTime<Utc>,
    ) -> Result<Group, CreateGroupError> {
        let group = context
            .service
            .create_group(&context.user, &self.draft, now)
            .await?;
        self.draft = GroupDraft::default();
        context.navigator.navigate(Route::Group {
            id: group.id.clone(),
        });
        Ok(group)
    }

    pub fn back<S, N: Navigator>(&self, context: &Context<S, N>) {
        context.navigator.go_back();
    }
}
