//! Hand-written port doubles shared by the unit tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::entities::{Credentials, TokenPair, UserProfile};
use crate::error::Error;
use crate::events::AuthEvent;
use crate::ports::{AuthApi, AuthEventSink, CredentialStore};

#[derive(Default)]
pub struct FakeStore {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    rejected_keys: Mutex<HashSet<String>>,
}

impl FakeStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.set(key, value).unwrap();
        }
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Make `set` fail for `key` only; removals still succeed
    pub fn fail_writes_to(&self, key: &str) {
        self.rejected_keys.lock().unwrap().insert(key.to_string());
    }

    fn check_writable(&self) -> Result<(), Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::CredentialStorage("store is read-only".to_string()));
        }
        Ok(())
    }
}

impl CredentialStore for FakeStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.check_writable()?;
        if self.rejected_keys.lock().unwrap().contains(key) {
            return Err(Error::CredentialStorage(format!("cannot write '{}'", key)));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.check_writable()?;
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Scripted remote API. Each queue holds the responses for successive calls;
/// an exhausted queue answers with a network error.
#[derive(Default)]
pub struct FakeApi {
    login_responses: Mutex<VecDeque<Result<TokenPair, Error>>>,
    user_responses: Mutex<VecDeque<Result<UserProfile, Error>>>,
    logout_responses: Mutex<VecDeque<Result<(), Error>>>,
    pub login_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    /// (access, refresh) pairs seen by `logout`
    pub logout_args: Mutex<Vec<(String, String)>>,
    /// access tokens seen by `fetch_user`
    pub user_tokens: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn on_login(&self, response: Result<TokenPair, Error>) -> &Self {
        self.login_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn on_fetch_user(&self, response: Result<UserProfile, Error>) -> &Self {
        self.user_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn on_logout(&self, response: Result<(), Error>) -> &Self {
        self.logout_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn exhausted<T>() -> Result<T, Error> {
        Err(Error::Network("no scripted response".to_string()))
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, _credentials: &Credentials) -> Result<TokenPair, Error> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Self::exhausted)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<UserProfile, Error> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.user_tokens
            .lock()
            .unwrap()
            .push(access_token.to_string());
        self.user_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Self::exhausted)
    }

    async fn logout(&self, access_token: &str, refresh_token: &str) -> Result<(), Error> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout_args
            .lock()
            .unwrap()
            .push((access_token.to_string(), refresh_token.to_string()));
        self.logout_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Self::exhausted)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<AuthEvent>>,
}

impl RecordingSink {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }
}

impl AuthEventSink for RecordingSink {
    fn record(&self, event: &AuthEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
