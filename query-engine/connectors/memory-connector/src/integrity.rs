use crate::error::ConnectorError;
use crate::store::DataStore;
use social_models::prelude::*;
use uuid::Uuid;

/// Validates foreign keys before a write is committed and runs the cascade
/// pass after a user delete. Holds no state of its own; all side effects land
/// in the entity stores.
///
/// Cross-kind sections take per-kind locks in the fixed order User, Profile,
/// Post, MemberType, Subscription and only ever acquire upward, so two
/// concurrent cascades cannot deadlock.
pub struct IntegrityEnforcer<'a> {
    store: &'a DataStore,
}

impl<'a> IntegrityEnforcer<'a> {
    pub fn new(store: &'a DataStore) -> Self {
        Self { store }
    }

    // ---- users ----

    pub fn create_user(&self, input: UserCreateInput) -> User {
        self.store.create_user(input)
    }

    pub fn update_user(&self, id: Uuid, input: UserUpdateInput) -> crate::Result<User> {
        self.store.update_user(id, input)
    }

    /// Deletes the user and cascades: its profile, every post it authored and
    /// every subscription edge it appears in, in that order. The user lock is
    /// held across the pass so no dependent can pass a foreign-key check
    /// mid-cascade, and the cascade completes before this returns.
    pub fn delete_user(&self, id: Uuid) -> crate::Result<User> {
        let mut users = self.store.users.write();
        let user = users
            .shift_remove(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::User, id))?;

        let mut profiles_removed = 0usize;
        self.store.profiles.write().retain(|_, profile| {
            let keep = profile.user_id != id;
            if !keep {
                profiles_removed += 1;
            }
            keep
        });

        let mut posts_removed = 0usize;
        self.store.posts.write().retain(|_, post| {
            let keep = post.author_id != id;
            if !keep {
                posts_removed += 1;
            }
            keep
        });

        let mut edges_removed = 0usize;
        self.store.subscriptions.write().retain(|_, edge| {
            let keep = edge.subscriber_id != id && edge.author_id != id;
            if !keep {
                edges_removed += 1;
            }
            keep
        });

        tracing::debug!(
            user_id = %id,
            profiles_removed,
            posts_removed,
            edges_removed,
            "cascaded user delete"
        );

        Ok(user)
    }

    // ---- profiles ----

    pub fn create_profile(&self, input: ProfileCreateInput) -> crate::Result<Profile> {
        let users = self.store.users.read();
        if !users.contains_key(&input.user_id) {
            return Err(ConnectorError::foreign_key_violation(
                "userId",
                EntityKind::User,
                input.user_id,
            ));
        }
        if self.store.find_member_type(input.member_type_id).is_none() {
            return Err(ConnectorError::foreign_key_violation(
                "memberTypeId",
                EntityKind::MemberType,
                input.member_type_id,
            ));
        }

        // User lock stays held: the user cannot be cascade-deleted between
        // the check above and the insert.
        self.store.create_profile(input)
    }

    pub fn update_profile(&self, id: Uuid, input: ProfileUpdateInput) -> crate::Result<Profile> {
        if let Some(member_type_id) = input.member_type_id {
            if self.store.find_member_type(member_type_id).is_none() {
                return Err(ConnectorError::foreign_key_violation(
                    "memberTypeId",
                    EntityKind::MemberType,
                    member_type_id,
                ));
            }
        }

        self.store.update_profile(id, input)
    }

    pub fn delete_profile(&self, id: Uuid) -> crate::Result<Profile> {
        self.store.delete_profile(id)
    }

    // ---- posts ----

    pub fn create_post(&self, input: PostCreateInput) -> crate::Result<Post> {
        let users = self.store.users.read();
        if !users.contains_key(&input.author_id) {
            return Err(ConnectorError::foreign_key_violation(
                "authorId",
                EntityKind::User,
                input.author_id,
            ));
        }

        Ok(self.store.create_post(input))
    }

    pub fn update_post(&self, id: Uuid, input: PostUpdateInput) -> crate::Result<Post> {
        self.store.update_post(id, input)
    }

    pub fn delete_post(&self, id: Uuid) -> crate::Result<Post> {
        self.store.delete_post(id)
    }

    // ---- member types ----

    pub fn create_member_type(&self, input: MemberTypeCreateInput) -> crate::Result<MemberType> {
        self.store.create_member_type(input)
    }

    pub fn update_member_type(
        &self,
        id: MemberTypeId,
        input: MemberTypeUpdateInput,
    ) -> crate::Result<MemberType> {
        self.store.update_member_type(id, input)
    }

    pub fn delete_member_type(&self, id: MemberTypeId) -> crate::Result<MemberType> {
        self.store.delete_member_type(id)
    }

    // ---- subscriptions ----

    /// Both endpoints must exist. Self-subscription is permitted; the edge is
    /// still composite-unique and dies with either endpoint.
    pub fn create_subscription(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> crate::Result<Subscription> {
        let users = self.store.users.read();
        if !users.contains_key(&subscriber_id) {
            return Err(ConnectorError::foreign_key_violation(
                "subscriberId",
                EntityKind::User,
                subscriber_id,
            ));
        }
        if !users.contains_key(&author_id) {
            return Err(ConnectorError::foreign_key_violation(
                "authorId",
                EntityKind::User,
                author_id,
            ));
        }

        self.store.create_subscription(subscriber_id, author_id)
    }

    pub fn delete_subscription(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> crate::Result<Subscription> {
        self.store.delete_subscription(subscriber_id, author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded_store() -> (DataStore, User) {
        let store = DataStore::new();
        store
            .create_member_type(MemberTypeCreateInput {
                id: MemberTypeId::Basic,
                discount: 2.5,
                month_posts_limit: 10,
            })
            .unwrap();
        let user = store.create_user(UserCreateInput {
            name: "Al".into(),
            balance: 100.0,
        });
        (store, user)
    }

    #[test]
    fn profile_create_rejects_unknown_member_type() {
        let store = DataStore::new();
        let user = store.create_user(UserCreateInput {
            name: "Al".into(),
            balance: 0.0,
        });
        let enforcer = IntegrityEnforcer::new(&store);

        let err = enforcer
            .create_profile(ProfileCreateInput {
                is_male: true,
                year_of_birth: 1990,
                user_id: user.id,
                member_type_id: MemberTypeId::Business,
            })
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn profile_create_rejects_unknown_user() {
        let (store, _) = seeded_store();
        let enforcer = IntegrityEnforcer::new(&store);

        let err = enforcer
            .create_profile(ProfileCreateInput {
                is_male: true,
                year_of_birth: 1990,
                user_id: Uuid::new_v4(),
                member_type_id: MemberTypeId::Basic,
            })
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn post_create_rejects_unknown_author() {
        let store = DataStore::new();
        let enforcer = IntegrityEnforcer::new(&store);

        let err = enforcer
            .create_post(PostCreateInput {
                title: "t".into(),
                content: "c".into(),
                author_id: Uuid::new_v4(),
            })
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn subscription_requires_both_endpoints() {
        let (store, user) = seeded_store();
        let enforcer = IntegrityEnforcer::new(&store);

        assert!(enforcer
            .create_subscription(user.id, Uuid::new_v4())
            .unwrap_err()
            .is_validation());
        assert!(enforcer
            .create_subscription(Uuid::new_v4(), user.id)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn self_subscription_is_permitted() {
        let (store, user) = seeded_store();
        let enforcer = IntegrityEnforcer::new(&store);

        let edge = enforcer.create_subscription(user.id, user.id).unwrap();
        assert_eq!(edge.subscriber_id, edge.author_id);

        // still composite-unique
        assert!(enforcer
            .create_subscription(user.id, user.id)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn user_delete_cascades_profile_posts_and_edges() {
        let (store, user) = seeded_store();
        let other = store.create_user(UserCreateInput {
            name: "Bo".into(),
            balance: 0.0,
        });
        let enforcer = IntegrityEnforcer::new(&store);

        enforcer
            .create_profile(ProfileCreateInput {
                is_male: true,
                year_of_birth: 1990,
                user_id: user.id,
                member_type_id: MemberTypeId::Basic,
            })
            .unwrap();
        for _ in 0..3 {
            enforcer
                .create_post(PostCreateInput {
                    title: "t".into(),
                    content: "c".into(),
                    author_id: user.id,
                })
                .unwrap();
        }
        // user as subscriber and as author
        enforcer.create_subscription(user.id, other.id).unwrap();
        enforcer.create_subscription(other.id, user.id).unwrap();

        let deleted = enforcer.delete_user(user.id).unwrap();
        assert_eq!(deleted.id, user.id);

        assert!(store.find_user(user.id).is_none());
        assert!(store.profile_by_user(user.id).is_none());
        assert_eq!(store.posts_by_author(user.id), vec![]);
        assert_eq!(store.subscriptions(), vec![]);
        // the other user is untouched
        assert!(store.find_user(other.id).is_some());
    }

    #[test]
    fn deleting_author_removes_edge_from_subscribers_view() {
        let (store, subscriber) = seeded_store();
        let author = store.create_user(UserCreateInput {
            name: "Bo".into(),
            balance: 0.0,
        });
        let enforcer = IntegrityEnforcer::new(&store);

        enforcer
            .create_subscription(subscriber.id, author.id)
            .unwrap();
        enforcer.delete_user(author.id).unwrap();

        assert_eq!(store.subscriptions_by_subscriber(subscriber.id), vec![]);
    }

    #[test]
    fn unsubscribe_of_missing_edge_is_not_found() {
        let (store, user) = seeded_store();
        let enforcer = IntegrityEnforcer::new(&store);

        let err = enforcer
            .delete_subscription(user.id, Uuid::new_v4())
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
