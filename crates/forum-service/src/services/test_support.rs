//! In-memory repositories for service unit tests

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use forum_common::{PasswordService, SharedSecret};
use forum_core::entities::{
    NewPost, NewTopic, NewUser, Post, PostWithAuthor, Topic, TopicWithAuthor, User,
};
use forum_core::error::DomainError;
use forum_core::traits::{PostRepository, RepoResult, TopicRepository, UserRepository};
use forum_core::value_objects::{PostId, TopicId, UserId};

use super::context::ServiceContext;

#[derive(Default)]
struct State {
    next_id: i64,
    users: Vec<(User, String)>,
    topics: Vec<Topic>,
    posts: Vec<Post>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: UserId) -> RepoResult<User> {
        self.users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone())
            .ok_or(DomainError::UserNotFound(id))
    }
}

/// One store backing all three repository traits
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Build a service context over this store with cheap hashing
    pub fn context(self: &Arc<Self>, upgrade_secret: &str) -> ServiceContext {
        ServiceContext::new(
            self.clone(),
            self.clone(),
            self.clone(),
            Arc::new(PasswordService::with_cost(1024, 1, 1).unwrap()),
            SharedSecret::new(upgrade_secret),
        )
    }

    pub fn make_admin(&self, id: UserId) {
        let mut state = self.lock();
        if let Some((user, _)) = state.users.iter_mut().find(|(u, _)| u.id == id) {
            user.admin = true;
        }
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn post_count(&self) -> usize {
        self.lock().posts.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.lock().user(id).ok())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(DomainError::UsernameTaken);
        }
        let created = User {
            id: UserId::new(state.next_id()),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            member: false,
            admin: false,
            created_at: Utc::now(),
        };
        state.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, hash)| hash.clone()))
    }

    async fn set_member(&self, id: UserId, member: bool) -> RepoResult<()> {
        let mut state = self.lock();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.member = member;
        Ok(())
    }
}

#[async_trait]
impl TopicRepository for MemoryStore {
    async fn find_by_id(&self, id: TopicId) -> RepoResult<Option<Topic>> {
        Ok(self.lock().topics.iter().find(|t| t.id == id).cloned())
    }

    async fn find_with_author(&self, id: TopicId) -> RepoResult<Option<TopicWithAuthor>> {
        let state = self.lock();
        let Some(topic) = state.topics.iter().find(|t| t.id == id).cloned() else {
            return Ok(None);
        };
        let author = state.user(topic.author_id)?.as_author();
        Ok(Some(TopicWithAuthor { topic, author }))
    }

    async fn list_with_authors(&self) -> RepoResult<Vec<TopicWithAuthor>> {
        let state = self.lock();
        state
            .topics
            .iter()
            .rev()
            .map(|topic| {
                Ok(TopicWithAuthor {
                    topic: topic.clone(),
                    author: state.user(topic.author_id)?.as_author(),
                })
            })
            .collect()
    }

    async fn create(&self, topic: &NewTopic) -> RepoResult<Topic> {
        let mut state = self.lock();
        state.user(topic.author_id)?;
        let created = Topic {
            id: TopicId::new(state.next_id()),
            title: topic.title.clone(),
            content: topic.content.clone(),
            author_id: topic.author_id,
            created_at: Utc::now(),
        };
        state.topics.push(created.clone());
        Ok(created)
    }

    async fn delete_cascade(&self, id: TopicId) -> RepoResult<u64> {
        let mut state = self.lock();
        if !state.topics.iter().any(|t| t.id == id) {
            return Err(DomainError::TopicNotFound(id));
        }
        let before = state.posts.len();
        state.posts.retain(|p| p.topic_id != id);
        let removed = (before - state.posts.len()) as u64;
        state.topics.retain(|t| t.id != id);
        Ok(removed)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        Ok(self.lock().posts.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_topic(&self, topic_id: TopicId) -> RepoResult<Vec<PostWithAuthor>> {
        let state = self.lock();
        state
            .posts
            .iter()
            .filter(|p| p.topic_id == topic_id)
            .map(|post| {
                Ok(PostWithAuthor {
                    post: post.clone(),
                    author: state.user(post.author_id)?.as_author(),
                })
            })
            .collect()
    }

    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut state = self.lock();
        if !state.topics.iter().any(|t| t.id == post.topic_id) {
            return Err(DomainError::TopicNotFound(post.topic_id));
        }
        let created = Post {
            id: PostId::new(state.next_id()),
            topic_id: post.topic_id,
            author_id: post.author_id,
            content: post.content.clone(),
            created_at: Utc::now(),
        };
        state.posts.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: PostId) -> RepoResult<Option<TopicId>> {
        let mut state = self.lock();
        let Some(index) = state.posts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        Ok(Some(state.posts.remove(index).topic_id))
    }
}
