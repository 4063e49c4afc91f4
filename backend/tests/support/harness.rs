//! Shared world fixture for the behaviour suites.
//!
//! Steps run synchronously under rstest-bdd, so the world owns a runtime
//! and exposes `block_on` for driving the async service stack.

use std::cell::RefCell;
use std::future::Future;

use tokio::runtime::Runtime;

use treehouse_backend::domain::{Error, Profile, Session};
use treehouse_backend::test_support::TestStack;

/// Administrator email wired into every scenario's stack.
pub const ADMIN_EMAIL: &str = "root@example.com";

/// Mutable scenario context shared between steps.
#[derive(Default)]
pub struct Ctx {
    /// Outcome of the most recent sign-up attempt.
    pub last_sign_up: Option<Result<Profile, Error>>,
    /// Session opened for the administrator.
    pub admin: Option<Session>,
    /// Ids of posts created by the scenario.
    pub post_ids: Vec<String>,
}

/// World handed to every step: the service stack plus scenario context.
pub struct World {
    runtime: Runtime,
    /// Fully wired in-memory service stack.
    pub stack: TestStack,
    /// Scenario-scoped mutable state.
    pub ctx: RefCell<Ctx>,
}

impl World {
    /// Drive a future to completion on the world's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Build a fresh world with an empty backend.
pub fn world() -> World {
    let runtime = Runtime::new().expect("tokio runtime builds");
    let stack = TestStack::new(vec![ADMIN_EMAIL.to_owned()]);
    World {
        runtime,
        stack,
        ctx: RefCell::new(Ctx::default()),
    }
}
