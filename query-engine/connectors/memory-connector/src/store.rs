use crate::error::ConnectorError;
use indexmap::IndexMap;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use social_models::prelude::*;
use std::hash::Hash;
use uuid::Uuid;

/// One entity kind's records behind a single lock. Every operation on it is
/// atomic with respect to that kind; readers proceed concurrently.
#[derive(Debug)]
pub(crate) struct EntityMap<K, R> {
    records: RwLock<IndexMap<K, R>>,
}

impl<K, R> Default for EntityMap<K, R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }
}

impl<K, R> EntityMap<K, R>
where
    K: Eq + Hash + Clone,
    R: Clone,
{
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, IndexMap<K, R>> {
        self.records.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, IndexMap<K, R>> {
        self.records.write()
    }

    fn find(&self, key: &K) -> Option<R> {
        self.read().get(key).cloned()
    }

    fn all(&self) -> Vec<R> {
        self.read().values().cloned().collect()
    }

    fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.read().values().filter(|r| predicate(r)).cloned().collect()
    }
}

/// The sole owner of entity lifetime. Holds one `EntityMap` per kind; no
/// record is ever shared or aliased outside these maps. Cross-entity rules
/// live in [`crate::IntegrityEnforcer`], not here.
#[derive(Debug, Default)]
pub struct DataStore {
    pub(crate) users: EntityMap<Uuid, User>,
    pub(crate) profiles: EntityMap<Uuid, Profile>,
    pub(crate) posts: EntityMap<Uuid, Post>,
    pub(crate) member_types: EntityMap<MemberTypeId, MemberType>,
    pub(crate) subscriptions: EntityMap<(Uuid, Uuid), Subscription>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- users ----

    pub fn create_user(&self, input: UserCreateInput) -> User {
        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            balance: input.balance,
        };
        self.users.write().insert(user.id, user.clone());
        tracing::trace!(user_id = %user.id, "created user");
        user
    }

    pub fn find_user(&self, id: Uuid) -> Option<User> {
        self.users.find(&id)
    }

    pub fn user(&self, id: Uuid) -> crate::Result<User> {
        self.find_user(id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::User, id))
    }

    pub fn users(&self) -> Vec<User> {
        self.users.all()
    }

    pub fn update_user(&self, id: Uuid, input: UserUpdateInput) -> crate::Result<User> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::User, id))?;

        if let Some(name) = input.name {
            user.name = name;
        }
        if let Some(balance) = input.balance {
            user.balance = balance;
        }

        Ok(user.clone())
    }

    /// Removes the bare user record. Dependent records are the integrity
    /// enforcer's concern; almost every caller wants
    /// [`crate::IntegrityEnforcer::delete_user`] instead.
    pub fn delete_user(&self, id: Uuid) -> crate::Result<User> {
        self.users
            .write()
            .shift_remove(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::User, id))
    }

    // ---- profiles ----

    /// Creates a profile, enforcing the one-profile-per-user constraint under
    /// the profile lock. Foreign keys are checked a level up.
    pub fn create_profile(&self, input: ProfileCreateInput) -> crate::Result<Profile> {
        let mut profiles = self.profiles.write();

        if profiles.values().any(|p| p.user_id == input.user_id) {
            return Err(ConnectorError::unique_violation(format!(
                "Profile.userId (user `{}` already has a profile)",
                input.user_id
            )));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id,
        };
        profiles.insert(profile.id, profile.clone());
        tracing::trace!(profile_id = %profile.id, user_id = %profile.user_id, "created profile");

        Ok(profile)
    }

    pub fn find_profile(&self, id: Uuid) -> Option<Profile> {
        self.profiles.find(&id)
    }

    pub fn profile(&self, id: Uuid) -> crate::Result<Profile> {
        self.find_profile(id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::Profile, id))
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.all()
    }

    pub fn profile_by_user(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles
            .filter(|p| p.user_id == user_id)
            .into_iter()
            .next()
    }

    pub fn profiles_by_member_type(&self, member_type_id: MemberTypeId) -> Vec<Profile> {
        self.profiles.filter(|p| p.member_type_id == member_type_id)
    }

    pub fn update_profile(&self, id: Uuid, input: ProfileUpdateInput) -> crate::Result<Profile> {
        let mut profiles = self.profiles.write();
        let profile = profiles
            .get_mut(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::Profile, id))?;

        if let Some(is_male) = input.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = input.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
        if let Some(member_type_id) = input.member_type_id {
            profile.member_type_id = member_type_id;
        }

        Ok(profile.clone())
    }

    pub fn delete_profile(&self, id: Uuid) -> crate::Result<Profile> {
        self.profiles
            .write()
            .shift_remove(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::Profile, id))
    }

    // ---- posts ----

    pub fn create_post(&self, input: PostCreateInput) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        };
        self.posts.write().insert(post.id, post.clone());
        tracing::trace!(post_id = %post.id, author_id = %post.author_id, "created post");
        post
    }

    pub fn find_post(&self, id: Uuid) -> Option<Post> {
        self.posts.find(&id)
    }

    pub fn post(&self, id: Uuid) -> crate::Result<Post> {
        self.find_post(id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::Post, id))
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.all()
    }

    pub fn posts_by_author(&self, author_id: Uuid) -> Vec<Post> {
        self.posts.filter(|p| p.author_id == author_id)
    }

    pub fn update_post(&self, id: Uuid, input: PostUpdateInput) -> crate::Result<Post> {
        let mut posts = self.posts.write();
        let post = posts
            .get_mut(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::Post, id))?;

        if let Some(title) = input.title {
            post.title = title;
        }
        if let Some(content) = input.content {
            post.content = content;
        }

        Ok(post.clone())
    }

    pub fn delete_post(&self, id: Uuid) -> crate::Result<Post> {
        self.posts
            .write()
            .shift_remove(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::Post, id))
    }

    // ---- member types ----

    pub fn create_member_type(&self, input: MemberTypeCreateInput) -> crate::Result<MemberType> {
        let mut member_types = self.member_types.write();

        if member_types.contains_key(&input.id) {
            return Err(ConnectorError::unique_violation(format!(
                "MemberType.id (`{}` already exists)",
                input.id
            )));
        }

        let member_type = MemberType {
            id: input.id,
            discount: input.discount,
            month_posts_limit: input.month_posts_limit,
        };
        member_types.insert(member_type.id, member_type.clone());

        Ok(member_type)
    }

    pub fn find_member_type(&self, id: MemberTypeId) -> Option<MemberType> {
        self.member_types.find(&id)
    }

    pub fn member_type(&self, id: MemberTypeId) -> crate::Result<MemberType> {
        self.find_member_type(id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::MemberType, id))
    }

    pub fn member_types(&self) -> Vec<MemberType> {
        self.member_types.all()
    }

    pub fn update_member_type(
        &self,
        id: MemberTypeId,
        input: MemberTypeUpdateInput,
    ) -> crate::Result<MemberType> {
        let mut member_types = self.member_types.write();
        let member_type = member_types
            .get_mut(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::MemberType, id))?;

        if let Some(discount) = input.discount {
            member_type.discount = discount;
        }
        if let Some(month_posts_limit) = input.month_posts_limit {
            member_type.month_posts_limit = month_posts_limit;
        }

        Ok(member_type.clone())
    }

    /// Leaf delete: profiles referencing the member type keep their dangling
    /// id and surface it at relation-resolution time.
    pub fn delete_member_type(&self, id: MemberTypeId) -> crate::Result<MemberType> {
        self.member_types
            .write()
            .shift_remove(&id)
            .ok_or_else(|| ConnectorError::record_not_found(EntityKind::MemberType, id))
    }

    // ---- subscriptions ----

    /// Inserts a subscriber → author edge; the composite key is unique at the
    /// store level, so a duplicate create is rejected rather than absorbed.
    pub fn create_subscription(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> crate::Result<Subscription> {
        let edge = Subscription {
            subscriber_id,
            author_id,
        };
        let mut subscriptions = self.subscriptions.write();

        if subscriptions.contains_key(&edge.key()) {
            return Err(ConnectorError::unique_violation(format!(
                "Subscription (subscriberId `{subscriber_id}`, authorId `{author_id}`)"
            )));
        }

        subscriptions.insert(edge.key(), edge.clone());
        Ok(edge)
    }

    pub fn delete_subscription(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> crate::Result<Subscription> {
        self.subscriptions
            .write()
            .shift_remove(&(subscriber_id, author_id))
            .ok_or_else(|| {
                ConnectorError::record_not_found(
                    EntityKind::Subscription,
                    format!("{subscriber_id} -> {author_id}"),
                )
            })
    }

    pub fn find_subscription(&self, subscriber_id: Uuid, author_id: Uuid) -> Option<Subscription> {
        self.subscriptions.find(&(subscriber_id, author_id))
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.all()
    }

    pub fn subscriptions_by_subscriber(&self, subscriber_id: Uuid) -> Vec<Subscription> {
        self.subscriptions
            .filter(|edge| edge.subscriber_id == subscriber_id)
    }

    pub fn subscriptions_by_author(&self, author_id: Uuid) -> Vec<Subscription> {
        self.subscriptions.filter(|edge| edge.author_id == author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with_user(name: &str) -> (DataStore, User) {
        let store = DataStore::new();
        let user = store.create_user(UserCreateInput {
            name: name.into(),
            balance: 100.0,
        });
        (store, user)
    }

    #[test]
    fn created_records_read_back_with_assigned_ids() {
        let (store, user) = store_with_user("Al");

        assert_eq!(store.user(user.id).unwrap(), user);
        assert_eq!(user.name, "Al");
        assert_eq!(user.balance, 100.0);
    }

    #[test]
    fn get_of_unknown_id_is_record_not_found() {
        let store = DataStore::new();
        let err = store.user(Uuid::new_v4()).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn update_only_changes_supplied_fields() {
        let (store, user) = store_with_user("Al");

        let updated = store
            .update_user(
                user.id,
                UserUpdateInput {
                    balance: Some(55.5),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Al");
        assert_eq!(updated.balance, 55.5);
        assert_eq!(store.user(user.id).unwrap(), updated);
    }

    #[test]
    fn second_profile_for_same_user_violates_uniqueness() {
        let (store, user) = store_with_user("Al");
        let input = ProfileCreateInput {
            is_male: true,
            year_of_birth: 1990,
            user_id: user.id,
            member_type_id: MemberTypeId::Basic,
        };

        store.create_profile(input.clone()).unwrap();
        let err = store.create_profile(input).unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn posts_filter_by_author() {
        let (store, author) = store_with_user("Al");
        let (_, other) = store_with_user("Bo");

        for title in ["one", "two"] {
            store.create_post(PostCreateInput {
                title: title.into(),
                content: "text".into(),
                author_id: author.id,
            });
        }
        store.create_post(PostCreateInput {
            title: "unrelated".into(),
            content: "text".into(),
            author_id: other.id,
        });

        let titles: Vec<_> = store
            .posts_by_author(author.id)
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["one", "two"]);
    }

    #[test]
    fn duplicate_subscription_edge_is_rejected() {
        let (store, subscriber) = store_with_user("Al");
        let author = store.create_user(UserCreateInput {
            name: "Bo".into(),
            balance: 0.0,
        });

        store.create_subscription(subscriber.id, author.id).unwrap();
        assert!(store.find_subscription(subscriber.id, author.id).is_some());

        let err = store
            .create_subscription(subscriber.id, author.id)
            .unwrap_err();
        assert!(err.is_validation());

        // the reverse edge is a different key
        store.create_subscription(author.id, subscriber.id).unwrap();
        assert!(store.find_subscription(author.id, subscriber.id).is_some());
    }

    #[test]
    fn deleting_a_missing_subscription_is_not_found() {
        let store = DataStore::new();
        let err = store
            .delete_subscription(Uuid::new_v4(), Uuid::new_v4())
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn member_type_ids_are_store_unique() {
        let store = DataStore::new();
        let input = MemberTypeCreateInput {
            id: MemberTypeId::Basic,
            discount: 2.5,
            month_posts_limit: 10,
        };

        store.create_member_type(input.clone()).unwrap();
        assert!(store.create_member_type(input).unwrap_err().is_validation());
    }
}
