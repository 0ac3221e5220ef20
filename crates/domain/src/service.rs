use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use log::{debug, error, info};

use crate::{
    CatalogExercise, CreateError, CreateGroupError, ExerciseCatalogRepository,
    ExerciseCatalogService, FriendRepository, Group, GroupDraft, GroupID, GroupRepository,
    GroupService, Member, MuscleGroup, Name, ReadError, UpdateError, User, UserID, Workout,
    WorkoutDocument, WorkoutRepository, WorkoutService,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ExerciseCatalogRepository> ExerciseCatalogService for Service<R> {
    async fn get_exercises_by_muscle(
        &self,
        muscle: MuscleGroup,
    ) -> Result<Vec<CatalogExercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises_by_muscle(muscle),
            ReadError,
            "get",
            "exercises"
        )
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn log_workout(
        &self,
        user_id: &UserID,
        document: WorkoutDocument,
    ) -> Result<Workout, CreateError> {
        let result = log_on_error!(
            self.repository.create_workout(user_id, document),
            CreateError,
            "log",
            "workout"
        );
        if let Ok(ref workout) = result {
            info!("logged workout {}", workout.id);
        }
        result
    }
}

impl<R: GroupRepository + FriendRepository> GroupService for Service<R> {
    async fn get_friends(&self, user_id: &UserID) -> Result<Vec<Member>, ReadError> {
        log_on_error!(
            self.repository.read_friends(user_id),
            ReadError,
            "get",
            "friends"
        )
    }

    async fn get_group(&self, id: &GroupID) -> Result<Group, ReadError> {
        log_on_error!(self.repository.read_group(id), ReadError, "get", "group")
    }

    async fn get_group_members(&self, id: &GroupID) -> Result<Vec<Member>, ReadError> {
        log_on_error!(
            self.repository.read_group_members(id),
            ReadError,
            "get",
            "group members"
        )
    }

    async fn create_group(
        &self,
        creator: &User,
        draft: &GroupDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Group, CreateGroupError> {
        let (name, image_url) = draft.validate()?;
        let group = log_on_error!(
            self.repository.create_group(name, image_url, created_at),
            CreateError,
            "create",
            "group"
        )?;

        let mut members = draft.members().to_vec();
        if !draft.is_member(&creator.id) {
            members.push(Member::from(creator));
        }
        log_on_error!(
            try_join_all(
                members
                    .into_iter()
                    .map(|member| self.repository.create_group_member(&group.id, member)),
            ),
            CreateError,
            "add",
            "group members"
        )?;

        info!("created group {}", group.id);
        Ok(group)
    }

    async fn modify_group(
        &self,
        id: &GroupID,
        name: Option<Name>,
        image_url: Option<String>,
    ) -> Result<Group, UpdateError> {
        log_on_error!(
            self.repository.modify_group(id, name, image_url),
            UpdateError,
            "modify",
            "group"
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    use crate::{
        DraftExercise, DraftSet, DraftWorkout, GroupError, NameError, StorageError, WorkoutID,
    };

    use super::*;

    #[derive(Default)]
    struct FakeRepository {
        calls: RefCell<Vec<String>>,
        workouts: RefCell<Vec<Workout>>,
        members: RefCell<Vec<(GroupID, Member)>>,
        offline: bool,
        failing_member: Option<UserID>,
    }

    impl FakeRepository {
        fn offline() -> Self {
            Self {
                offline: true,
                ..Self::default()
            }
        }

        fn connection(&self) -> Result<(), StorageError> {
            if self.offline {
                Err(StorageError::NoConnection)
            } else {
                Ok(())
            }
        }
    }

    impl ExerciseCatalogRepository for FakeRepository {
        async fn read_exercises_by_muscle(
            &self,
            muscle: MuscleGroup,
        ) -> Result<Vec<CatalogExercise>, ReadError> {
            self.calls
                .borrow_mut()
                .push(format!("read exercises {}", muscle.as_ref()));
            self.connection()?;
            Ok(vec![CatalogExercise {
                name: String::from("Barbell Curl"),
                muscle: muscle.as_ref().to_string(),
                ..CatalogExercise::default()
            }])
        }
    }

    impl WorkoutRepository for FakeRepository {
        async fn read_workouts(&self, user_id: &UserID) -> Result<Vec<Workout>, ReadError> {
            self.calls
                .borrow_mut()
                .push(format!("read workouts {user_id}"));
            self.connection()?;
            Ok(self.workouts.borrow().clone())
        }

        async fn create_workout(
            &self,
            user_id: &UserID,
            document: WorkoutDocument,
        ) -> Result<Workout, CreateError> {
            self.calls
                .borrow_mut()
                .push(format!("create workout {user_id}"));
            self.connection()?;
            let workout = Workout {
                id: WorkoutID::from(format!("w{}", self.workouts.borrow().len() + 1)),
                document,
            };
            self.workouts.borrow_mut().push(workout.clone());
            Ok(workout)
        }
    }

    impl FriendRepository for FakeRepository {
        async fn read_friends(&self, user_id: &UserID) -> Result<Vec<Member>, ReadError> {
            self.calls
                .borrow_mut()
                .push(format!("read friends {user_id}"));
            self.connection()?;
            Ok(vec![member("f1"), member("f2")])
        }
    }

    impl GroupRepository for FakeRepository {
        async fn create_group(
            &self,
            name: Name,
            image_url: String,
            created_at: DateTime<Utc>,
        ) -> Result<Group, CreateError> {
            self.calls.borrow_mut().push(format!("create group {name}"));
            self.connection()?;
            Ok(Group {
                id: "g1".into(),
                name,
                image_url,
                created_at,
            })
        }

        async fn modify_group(
            &self,
            id: &GroupID,
            name: Option<Name>,
            image_url: Option<String>,
        ) -> Result<Group, UpdateError> {
            self.calls.borrow_mut().push(format!("modify group {id}"));
            self.connection()?;
            Ok(Group {
                id: id.clone(),
                name: name.unwrap_or(Name::new("Unchanged").unwrap()),
                image_url: image_url.unwrap_or_default(),
                created_at: created_at(),
            })
        }

        async fn read_group(&self, id: &GroupID) -> Result<Group, ReadError> {
            self.calls.borrow_mut().push(format!("read group {id}"));
            self.connection()?;
            Ok(Group {
                id: id.clone(),
                name: Name::new("Lifters").unwrap(),
                image_url: String::from("https://img/g.jpg"),
                created_at: created_at(),
            })
        }

        async fn read_group_members(&self, id: &GroupID) -> Result<Vec<Member>, ReadError> {
            self.connection()?;
            Ok(self
                .members
                .borrow()
                .iter()
                .filter(|(group_id, _)| group_id == id)
                .map(|(_, m)| m.clone())
                .collect())
        }

        async fn create_group_member(
            &self,
            id: &GroupID,
            member: Member,
        ) -> Result<Member, CreateError> {
            self.calls
                .borrow_mut()
                .push(format!("add member {}", member.id));
            if self.failing_member.as_ref() == Some(&member.id) {
                return Err(CreateError::Other("permission denied".into()));
            }
            self.members.borrow_mut().push((id.clone(), member.clone()));
            Ok(member)
        }
    }

    fn member(id: &str) -> Member {
        Member {
            id: id.into(),
            name: id.to_uppercase(),
            image_url: String::new(),
        }
    }

    fn user() -> User {
        User {
            id: "u1".into(),
            display_name: String::from("Alice"),
            photo_url: String::from("https://img/alice.jpg"),
        }
    }

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 5, 17, 18, 30, 0).unwrap()
    }

    fn draft(members: &[&str]) -> GroupDraft {
        let mut draft = GroupDraft::default();
        draft.name = String::from("Lifters");
        draft.image_url = String::from("https://img/g.jpg");
        for id in members {
            draft.toggle_member(member(id));
        }
        draft
    }

    fn document() -> WorkoutDocument {
        let mut workout = DraftWorkout::new(NaiveDate::from_ymd_opt(2023, 5, 17).unwrap());
        workout.add_exercise(
            DraftExercise::new(
                "Bench Press",
                vec![DraftSet::parse("Bench Press", "100", "10", "ok")],
            )
            .unwrap(),
        );
        workout.to_document()
    }

    #[tokio::test]
    async fn test_get_exercises_by_muscle() {
        let service = Service::new(FakeRepository::default());

        let exercises = service
            .get_exercises_by_muscle(MuscleGroup::Biceps)
            .await
            .unwrap();

        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].muscle, "biceps");
        assert_eq!(
            *service.repository().calls.borrow(),
            vec![String::from("read exercises biceps")]
        );
    }

    #[tokio::test]
    async fn test_get_exercises_by_muscle_offline() {
        let service = Service::new(FakeRepository::offline());

        assert!(matches!(
            service.get_exercises_by_muscle(MuscleGroup::Neck).await,
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
    }

    #[tokio::test]
    async fn test_log_workout() {
        let service = Service::new(FakeRepository::default());

        let workout = service.log_workout(&"u1".into(), document()).await.unwrap();

        assert_eq!(workout.id, WorkoutID::from("w1"));
        assert_eq!(workout.document, document());
        assert_eq!(
            service.get_workouts(&"u1".into()).await.unwrap(),
            vec![workout]
        );
        assert_eq!(
            *service.repository().calls.borrow(),
            vec![
                String::from("create workout u1"),
                String::from("read workouts u1")
            ]
        );
    }

    #[tokio::test]
    async fn test_log_workout_offline() {
        let service = Service::new(FakeRepository::offline());

        assert!(matches!(
            service.log_workout(&"u1".into(), document()).await,
            Err(CreateError::Storage(StorageError::NoConnection))
        ));
    }

    #[tokio::test]
    async fn test_get_friends() {
        let service = Service::new(FakeRepository::default());

        assert_eq!(
            service.get_friends(&"u1".into()).await.unwrap(),
            vec![member("f1"), member("f2")]
        );
    }

    #[tokio::test]
    async fn test_create_group() {
        let service = Service::new(FakeRepository::default());

        let group = service
            .create_group(&user(), &draft(&["f1", "f2"]), created_at())
            .await
            .unwrap();

        assert_eq!(
            group,
            Group {
                id: "g1".into(),
                name: Name::new("Lifters").unwrap(),
                image_url: String::from("https://img/g.jpg"),
                created_at: created_at(),
            }
        );
        assert_eq!(
            service.get_group_members(&group.id).await.unwrap(),
            vec![member("f1"), member("f2"), Member::from(&user())]
        );
        assert_eq!(
            service.repository().calls.borrow()[0],
            String::from("create group Lifters")
        );
    }

    #[tokio::test]
    async fn test_create_group_creator_selected() {
        let service = Service::new(FakeRepository::default());
        let mut draft = draft(&[]);
        draft.toggle_member(Member::from(&user()));

        let group = service
            .create_group(&user(), &draft, created_at())
            .await
            .unwrap();

        assert_eq!(
            service.get_group_members(&group.id).await.unwrap(),
            vec![Member::from(&user())]
        );
    }

    #[tokio::test]
    async fn test_create_group_invalid() {
        let service = Service::new(FakeRepository::default());
        let mut draft = draft(&["f1"]);
        draft.name = String::from(" ");

        assert!(matches!(
            service.create_group(&user(), &draft, created_at()).await,
            Err(CreateGroupError::Invalid(GroupError::Name(NameError::Empty)))
        ));
        assert!(service.repository().calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_create_group_member_failure() {
        let service = Service::new(FakeRepository {
            failing_member: Some("f2".into()),
            ..FakeRepository::default()
        });

        assert!(matches!(
            service
                .create_group(&user(), &draft(&["f1", "f2"]), created_at())
                .await,
            Err(CreateGroupError::Create(CreateError::Other(error)))
                if error.to_string() == "permission denied"
        ));
    }

    #[tokio::test]
    async fn test_get_group() {
        let service = Service::new(FakeRepository::default());

        let group = service.get_group(&"g1".into()).await.unwrap();

        assert_eq!(group.id, GroupID::from("g1"));
        assert_eq!(group.name, Name::new("Lifters").unwrap());
        assert_eq!(
            *service.repository().calls.borrow(),
            vec![String::from("read group g1")]
        );
    }

    #[tokio::test]
    async fn test_get_group_offline() {
        let service = Service::new(FakeRepository::offline());

        assert!(matches!(
            service.get_group(&"g1".into()).await,
            Err(ReadError::Storage(StorageError::NoConnection))
        ));
    }

    #[tokio::test]
    async fn test_modify_group() {
        let service = Service::new(FakeRepository::default());

        let group = service
            .modify_group(
                &"g1".into(),
                Some(Name::new("Lifters 2").unwrap()),
                Some(String::from("https://img/g2.jpg")),
            )
            .await
            .unwrap();

        assert_eq!(group.name, Name::new("Lifters 2").unwrap());
        assert_eq!(group.image_url, "https://img/g2.jpg");
    }
}
