#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use xoarchive::upstream::ApodUpstream;
use xoarchive::{ApodError, ApodResult, DateRange};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// This is panic-safe (restores variables on unwind) and also serializes access to
/// process-global env vars to avoid flaky tests when Rust runs tests in parallel.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid test date")
}

/// Upstream body for every day of `range`, newest first the way some APOD
/// mirrors answer, with deliberately irregular formatting.
pub fn upstream_body(range: DateRange) -> String {
    let items: Vec<String> = range
        .start
        .iter_days()
        .take_while(|d| *d <= range.end)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .map(|d| {
            format!(
                r#"{{"title": "Sky on {d}", "date":"{d}", "url": "https://apod.nasa.gov/apod/image/{d}.jpg",  "hdurl": "https://apod.nasa.gov/apod/image/{d}_hd.jpg", "explanation": "Picture for {d}.", "media_type": "image", "service_version": "v1"}}"#
            )
        })
        .collect();
    format!("[\n  {}\n]", items.join(",\n  "))
}

/// What a [`FakeUpstream`] answers with.
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// One entry per day of the requested range.
    Daily,
    /// A fixed body.
    Body(String),
    Fail(ApodError),
}

/// In-memory upstream recording every requested range.
pub struct FakeUpstream {
    reply: Mutex<FakeReply>,
    pub requests: Mutex<Vec<DateRange>>,
}

impl FakeUpstream {
    pub fn new(reply: FakeReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn set_reply(&self, reply: FakeReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn requests(&self) -> Vec<DateRange> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApodUpstream for FakeUpstream {
    async fn fetch_raw(&self, range: DateRange) -> ApodResult<String> {
        self.requests.lock().unwrap().push(range);
        let reply = self.reply.lock().unwrap().clone();
        match reply {
            FakeReply::Daily => Ok(upstream_body(range)),
            FakeReply::Body(body) => Ok(body),
            FakeReply::Fail(err) => Err(err),
        }
    }
}
