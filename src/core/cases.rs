use crate::core::{Operation, Resource, TestCase};
use serde_json::json;

const READ_ID: u64 = 3;
const DELETE_ID: u64 = 5;

/// 每種資源的 (create payload, update payload)
fn payloads(resource: Resource) -> (serde_json::Value, serde_json::Value) {
    match resource {
        Resource::Users => (
            json!({"name": "Test User", "age": 25, "email": "test@example.com"}),
            json!({"name": "Updated User", "age": 30, "email": "updated@example.com"}),
        ),
        Resource::Posts => (
            json!({"title": "Test Post", "body": "This is a test post.", "userId": 2}),
            json!({"title": "Updated Post", "body": "This is an updated post.", "userId": 2}),
        ),
        Resource::Comments => (
            json!({"body": "This is a test comment.", "postId": 2}),
            json!({"body": "This is an updated comment.", "postId": 2}),
        ),
        Resource::Tasks => (
            json!({"title": "Test Task", "completed": false, "userId": 2}),
            json!({"title": "Updated Task", "completed": true, "userId": 2}),
        ),
        Resource::Categories => (
            json!({"name": "Test Category"}),
            json!({"name": "Updated Category"}),
        ),
    }
}

/// The twenty built-in procedures, numbered 01..=20 in execution order:
/// create, read, update, delete for users, posts, comments, tasks, categories.
pub fn default_cases() -> Vec<TestCase> {
    let mut cases = Vec::with_capacity(Resource::ALL.len() * 4);

    for (index, resource) in Resource::ALL.into_iter().enumerate() {
        let base = index as u32 * 4;
        let (create, update) = payloads(resource);

        cases.push(TestCase::new(base + 1, resource, Operation::Create).with_payload(create));
        cases.push(TestCase::new(base + 2, resource, Operation::Read).with_id(READ_ID));
        cases.push(
            TestCase::new(base + 3, resource, Operation::Update)
                .with_id(READ_ID)
                .with_payload(update),
        );
        cases.push(TestCase::new(base + 4, resource, Operation::Delete).with_id(DELETE_ID));
    }

    cases
}
