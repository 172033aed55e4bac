//! Black-box scenarios shared by the mock-server and live-server suites.
//!
//! Each scenario arranges its own tasks, makes one call under test, asserts on
//! status and body, then deletes what it created. Cleanup is best-effort: a
//! failed assertion leaves its tasks behind.

use todo_core::{HttpResponse, Session, Task, TodoClient};
use todo_testing::{random_date, random_object_id, random_text};

const TEXT_LEN: usize = todo_testing::fixtures::DEFAULT_TEXT_LEN;

pub struct Ctx {
    pub client: TodoClient,
    pub session: Session,
}

impl Ctx {
    fn create(&self, text: &str, date: &str) -> Task {
        let resp = self.client.create_task(&self.session, text, date).unwrap();
        assert!(resp.is_success(), "create failed: {} {}", resp.status, resp.text());
        resp.json().unwrap()
    }

    fn create_random(&self) -> Task {
        self.create(&random_text(TEXT_LEN), &random_date())
    }

    fn cleanup(&self, task_id: &str) {
        let _ = self.client.delete_task(&self.session, task_id);
    }
}

fn assert_status(resp: &HttpResponse, expected: u16) {
    assert_eq!(
        resp.status, expected,
        "unexpected status (expected {expected}), body: {}",
        resp.text()
    );
}

pub fn create_task(ctx: &Ctx) {
    let text = random_text(TEXT_LEN);
    let date = random_date();

    let resp = ctx.client.create_task(&ctx.session, &text, &date).unwrap();
    assert!(resp.is_success(), "create failed: {}", resp.status);
    let task: Task = resp.json().unwrap();
    assert_eq!(task.text, text, "the task's Text did not match");
    assert_eq!(task.date, date, "the task's Date did not match");
    assert!(!task.done, "a new task must not be Done");

    ctx.cleanup(&task.id);
}

pub fn read_one_task(ctx: &Ctx) {
    let text = random_text(TEXT_LEN);
    let date = random_date();
    let created = ctx.create(&text, &date);

    let resp = ctx.client.read_task(&ctx.session, &created.id).unwrap();
    assert!(resp.is_success());
    let task: Task = resp.json().unwrap();
    assert_eq!(task.id, created.id);
    assert_eq!(task.text, text);
    assert_eq!(task.date, date);
    assert!(!task.done);

    ctx.cleanup(&task.id);
}

pub fn read_all_tasks(ctx: &Ctx) {
    let created: Vec<Task> = (0..3).map(|_| ctx.create_random()).collect();

    let resp = ctx.client.read_all_tasks(&ctx.session).unwrap();
    assert!(resp.is_success());
    let tasks: Vec<Task> = resp.json().unwrap();
    for task in &created {
        assert!(tasks.iter().any(|t| t.id == task.id), "task {} missing from list", task.id);
    }
    let user_id = tasks[0].user_id.clone();
    assert!(user_id.is_some(), "listed tasks carry a UserId");
    for task in &tasks {
        assert_eq!(task.user_id, user_id, "a task returned an unexpected UserId");
    }

    for task in &created {
        ctx.cleanup(&task.id);
    }
}

pub fn update_task(ctx: &Ctx) {
    let created = ctx.create_random();
    let done = !created.done;

    let resp = ctx.client.update_task(&ctx.session, &created.id, done).unwrap();
    assert!(resp.is_success(), "update failed: {}", resp.status);
    let updated: Task = resp.json().unwrap();
    assert_eq!(updated.done, done);
    assert_eq!(updated.text, created.text);

    let reread: Task = ctx.client.read_task(&ctx.session, &created.id).unwrap().json().unwrap();
    assert_eq!(reread.done, done, "update did not persist");

    ctx.cleanup(&created.id);
}

pub fn delete_task(ctx: &Ctx) {
    let created = ctx.create_random();

    let resp = ctx.client.delete_task(&ctx.session, &created.id).unwrap();
    assert!(resp.is_success(), "delete failed: {}", resp.status);

    let resp = ctx.client.read_task(&ctx.session, &created.id).unwrap();
    assert!(!resp.is_success(), "reading a deleted task succeeded");
    assert_status(&resp, 404);
}

pub fn read_current_user(ctx: &Ctx) {
    let resp = ctx.client.read_current_user(&ctx.session).unwrap();
    assert!(resp.is_success());
    let user: serde_json::Value = resp.json().unwrap();
    assert!(user.get("Id").is_some(), "no Id field in user data");
    assert!(user.get("UserName").is_some(), "no UserName field in user data");
    assert!(user.get("Email").is_some(), "no Email field in user data");
}

pub fn read_unknown_task(ctx: &Ctx) {
    let resp = ctx.client.read_task(&ctx.session, &random_object_id()).unwrap();
    assert_status(&resp, 404);
}

pub fn delete_unknown_task(ctx: &Ctx) {
    let resp = ctx.client.delete_task(&ctx.session, &random_object_id()).unwrap();
    assert_status(&resp, 404);
}

pub fn update_unknown_task(ctx: &Ctx) {
    let resp = ctx.client.update_task(&ctx.session, &random_object_id(), true).unwrap();
    assert_status(&resp, 404);
}

pub fn delete_malformed_id(ctx: &Ctx) {
    let resp = ctx.client.delete_task(&ctx.session, &random_text(12)).unwrap();
    assert_status(&resp, 500);
}

pub fn unauthorized_read(ctx: &Ctx) {
    let resp = ctx.client.read_all_tasks(&Session::from("")).unwrap();
    assert_status(&resp, 401);
}

pub fn incomplete_create_task(ctx: &Ctx) {
    let resp = ctx.client.create_task(&ctx.session, "", &random_date()).unwrap();
    if resp.is_success() {
        if let Ok(task) = resp.json::<Task>() {
            ctx.cleanup(&task.id);
        }
    }
    assert!(!resp.is_success(), "task created with no Text");

    let resp = ctx.client.create_task(&ctx.session, &random_text(TEXT_LEN), "").unwrap();
    if resp.is_success() {
        if let Ok(task) = resp.json::<Task>() {
            ctx.cleanup(&task.id);
        }
    }
    assert!(!resp.is_success(), "task created with no Date");
}
