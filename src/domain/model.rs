use crate::utils::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Dispatcher 支援的 HTTP 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// 只有 POST / PUT 會帶 JSON body
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = HarnessError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // 大小寫與空白都必須完全相符
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(HarnessError::InvalidMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Target API 暴露的資源集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Posts,
    Comments,
    Tasks,
    Categories,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Users,
        Resource::Posts,
        Resource::Comments,
        Resource::Tasks,
        Resource::Categories,
    ];

    /// Collection path segment, e.g. `users`
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Posts => "posts",
            Resource::Comments => "comments",
            Resource::Tasks => "tasks",
            Resource::Categories => "categories",
        }
    }

    pub fn plural_title(&self) -> &'static str {
        match self {
            Resource::Users => "Users",
            Resource::Posts => "Posts",
            Resource::Comments => "Comments",
            Resource::Tasks => "Tasks",
            Resource::Categories => "Categories",
        }
    }

    pub fn singular_title(&self) -> &'static str {
        match self {
            Resource::Users => "User",
            Resource::Posts => "Post",
            Resource::Comments => "Comment",
            Resource::Tasks => "Task",
            Resource::Categories => "Category",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl std::str::FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "users" | "user" => Ok(Resource::Users),
            "posts" | "post" => Ok(Resource::Posts),
            "comments" | "comment" => Ok(Resource::Comments),
            "tasks" | "task" => Ok(Resource::Tasks),
            "categories" | "category" => Ok(Resource::Categories),
            _ => Err(format!("Unknown resource: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    pub fn method(&self) -> HttpMethod {
        match self {
            Operation::Create => HttpMethod::Post,
            Operation::Read => HttpMethod::Get,
            Operation::Update => HttpMethod::Put,
            Operation::Delete => HttpMethod::Delete,
        }
    }

    /// Create 回 201，其餘回 200
    pub fn expected_status(&self) -> u16 {
        match self {
            Operation::Create => 201,
            Operation::Read | Operation::Update | Operation::Delete => 200,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Operation::Create => "Create",
            Operation::Read => "Read",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title().to_lowercase())
    }
}

/// 單次請求的回應：狀態碼與原始 body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// 將 body 解析為 JSON
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Reporting metadata attached to a test case. Never affects execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub resource: Resource,
    pub operation: Operation,
    pub description: String,
    pub feature: String,
    pub title: String,
}

impl CaseMetadata {
    pub fn new(resource: Resource, operation: Operation) -> Self {
        let title = format!("{} {}", operation.title(), resource.singular_title());
        Self {
            resource,
            operation,
            description: format!(
                "{} `{}` via {} and expect {}",
                title,
                resource.path(),
                operation.method(),
                operation.expected_status()
            ),
            feature: format!("CRUD Operations - {}", resource.plural_title()),
            title,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub number: u32,
    pub resource: Resource,
    pub operation: Operation,
    pub id: Option<u64>,
    pub payload: Option<serde_json::Value>,
    pub expected_status: u16,
    pub metadata: CaseMetadata,
}

impl TestCase {
    pub fn new(number: u32, resource: Resource, operation: Operation) -> Self {
        Self {
            number,
            resource,
            operation,
            id: None,
            payload: None,
            expected_status: operation.expected_status(),
            metadata: CaseMetadata::new(resource, operation),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_expected_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.operation.method()
    }

    /// `users` for a create, `users/3` for the rest
    pub fn path(&self) -> String {
        match self.id {
            Some(id) => format!("{}/{}", self.resource.path(), id),
            None => self.resource.path().to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!("{:02} {}", self.number, self.metadata.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    Failed {
        expected: u16,
        actual: u16,
        body: String,
    },
    Errored {
        message: String,
    },
}

impl CaseOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseOutcome::Passed => "passed",
            CaseOutcome::Failed { .. } => "failed",
            CaseOutcome::Errored { .. } => "errored",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CaseResult {
    pub case: TestCase,
    pub outcome: CaseOutcome,
    pub actual_status: Option<u16>,
    pub duration: Duration,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome == CaseOutcome::Passed
    }
}
