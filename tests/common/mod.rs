//! Shared test doubles: an in-memory secret store and a scripted prompter.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use paykeys::PaykeysError;
use paykeys::prompt::Prompter;
use paykeys::secrets::SecretManager;
use secrecy::SecretString;

pub const FINIX_KEY: &str = "PK_live_0123456789abcdef";
pub const FINIX_SECRET: &str = "SK_live_0123456789abcdef";
pub const PLAID_CLIENT_ID: &str = "5f2a9c0e11d4b2";
pub const PLAID_SECRET: &str = "0f9e8d7c6b5a4f3e2d1c0b9a";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSecret {
    pub value: String,
    pub description: String,
}

#[derive(Default)]
struct Inner {
    secrets: Mutex<HashMap<String, StoredSecret>>,
    calls: Mutex<Vec<String>>,
    fail_update: Mutex<HashSet<String>>,
    fail_create: Mutex<HashSet<String>>,
    identity_error: Mutex<Option<String>>,
}

/// Secret store held in memory. Clones share state, so a test can keep a
/// handle after passing one into the code under test.
#[derive(Clone, Default)]
pub struct MemorySecretManager {
    inner: Arc<Inner>,
}

impl MemorySecretManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose identity check fails like missing credentials.
    pub fn unauthenticated() -> Self {
        let manager = Self::new();
        *manager.inner.identity_error.lock().unwrap() = Some("no credentials".to_string());
        manager
    }

    pub fn with_secret(self, name: &str, value: &str) -> Self {
        self.inner.secrets.lock().unwrap().insert(
            name.to_string(),
            StoredSecret {
                value: value.to_string(),
                description: String::new(),
            },
        );
        self
    }

    pub fn failing_update(self, name: &str) -> Self {
        self.inner.fail_update.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn failing_create(self, name: &str) -> Self {
        self.inner.fail_create.lock().unwrap().insert(name.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<StoredSecret> {
        self.inner.secrets.lock().unwrap().get(name).cloned()
    }

    pub fn get_json(&self, name: &str) -> Option<serde_json::Value> {
        self.get(name)
            .map(|s| serde_json::from_str(&s.value).expect("stored value is JSON"))
    }

    pub fn len(&self) -> usize {
        self.inner.secrets.lock().unwrap().len()
    }

    /// Backend calls in order, as `"update:<name>"` / `"create:<name>"`.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str, name: &str) {
        self.inner
            .calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", call, name));
    }
}

pub fn reference_for(name: &str) -> String {
    format!("arn:memory:secretsmanager:{}", name)
}

#[async_trait]
impl SecretManager for MemorySecretManager {
    fn kind(&self) -> &str {
        "memory"
    }

    async fn identity(&self) -> Result<String, PaykeysError> {
        match self.inner.identity_error.lock().unwrap().clone() {
            Some(message) => Err(PaykeysError::provider("memory", message)),
            None => Ok("123456789012".to_string()),
        }
    }

    async fn create(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, PaykeysError> {
        self.record("create", name);
        if self.inner.fail_create.lock().unwrap().contains(name) {
            return Err(PaykeysError::provider("memory", "create rejected"));
        }

        let mut secrets = self.inner.secrets.lock().unwrap();
        if secrets.contains_key(name) {
            return Err(PaykeysError::provider("memory", "secret already exists"));
        }
        secrets.insert(
            name.to_string(),
            StoredSecret {
                value: value.to_string(),
                description: description.to_string(),
            },
        );
        Ok(reference_for(name))
    }

    async fn update(
        &self,
        name: &str,
        value: &str,
        description: &str,
    ) -> Result<String, PaykeysError> {
        self.record("update", name);
        if self.inner.fail_update.lock().unwrap().contains(name) {
            return Err(PaykeysError::provider("memory", "AccessDeniedException"));
        }

        let mut secrets = self.inner.secrets.lock().unwrap();
        match secrets.get_mut(name) {
            Some(secret) => {
                secret.value = value.to_string();
                secret.description = description.to_string();
                Ok(reference_for(name))
            }
            None => Err(PaykeysError::not_found(format!("{} not found", name))),
        }
    }
}

/// Replays canned answers; running out of answers behaves like an interrupt.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    fn next(&mut self, prompt: &str) -> Result<String, PaykeysError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(PaykeysError::Cancelled)
    }

    pub fn said(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<String, PaykeysError> {
        self.next(prompt).map(|a| a.trim().to_string())
    }

    fn ask_secret(&mut self, prompt: &str) -> Result<SecretString, PaykeysError> {
        self.next(prompt)
            .map(|a| SecretString::from(a.trim().to_string()))
    }

    fn say(&mut self, line: &str) {
        self.output.push(line.to_string());
    }
}
