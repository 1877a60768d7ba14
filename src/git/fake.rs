//! In-memory [`Vcs`] serving canned output

use anyhow::{anyhow, bail, Result};
use std::cell::RefCell;
use std::collections::HashMap;

use super::vcs::Vcs;

pub(crate) struct FakeVcs {
    status: Option<String>,
    diff: Option<String>,
    logs: HashMap<String, String>,
    contents: HashMap<String, String>,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub(crate) fn new() -> Self {
        Self {
            status: Some(String::new()),
            diff: Some(String::new()),
            logs: HashMap::new(),
            contents: HashMap::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn with_status(mut self, output: &str) -> Self {
        self.status = Some(output.to_string());
        self
    }

    pub(crate) fn failing_status(mut self) -> Self {
        self.status = None;
        self
    }

    pub(crate) fn with_diff(mut self, output: &str) -> Self {
        self.diff = Some(output.to_string());
        self
    }

    pub(crate) fn failing_diff(mut self) -> Self {
        self.diff = None;
        self
    }

    pub(crate) fn with_log(mut self, path: &str, output: &str) -> Self {
        self.logs.insert(path.to_string(), output.to_string());
        self
    }

    pub(crate) fn with_content(mut self, path: &str, content: &str) -> Self {
        self.contents.insert(path.to_string(), content.to_string());
        self
    }

    fn record(&self, query: &str, args: &[&str]) {
        let mut call = query.to_string();
        for arg in args {
            call.push(' ');
            call.push_str(arg);
        }
        self.calls.borrow_mut().push(call);
    }
}

impl Vcs for FakeVcs {
    fn status(&self, args: &[&str]) -> Result<String> {
        self.record("status", args);
        self.status.clone().ok_or_else(|| anyhow!("status failed"))
    }

    fn diff(&self, args: &[&str]) -> Result<String> {
        self.record("diff", args);
        self.diff.clone().ok_or_else(|| anyhow!("diff failed"))
    }

    fn log(&self, args: &[&str]) -> Result<String> {
        self.record("log", args);
        match args.last().and_then(|path| self.logs.get(*path)) {
            Some(output) => Ok(output.clone()),
            None => bail!("log failed"),
        }
    }

    fn show_content_at_revision(&self, path: &str, revision: &str) -> Result<String> {
        self.record("show", &[revision, path]);
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("{} does not exist at {}", path, revision))
    }
}
