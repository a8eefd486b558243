//! Recording fakes shared by unit tests.

use std::io;
use std::sync::Mutex;

use crate::error::StoreError;
use crate::hooks::{Navigator, Notifier};
use crate::session::{SessionInvalidator, SessionStore};

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn display(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

#[derive(Default)]
pub struct CountingInvalidator {
    calls: Mutex<usize>,
}

impl CountingInvalidator {
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl SessionInvalidator for CountingInvalidator {
    fn invalidate(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }
}

impl SessionStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(Self::error())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(Self::error())
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(Self::error())
    }
}
