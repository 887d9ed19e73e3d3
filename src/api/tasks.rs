//! Task CRUD endpoints

use super::types::{MessageResponse, PagedData, Task, TaskDraft, TaskQuery};
use super::ApiClient;
use crate::error::Result;
use reqwest::Method;

impl ApiClient {
    /// `POST /tasks`
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let builder = self.request(Method::POST, "/tasks")?.json(draft);
        let task: Task = self.send_json(builder).await?;
        tracing::info!("Created task {} ({})", task.id, task.title);
        Ok(task)
    }

    /// `GET /tasks` with paging, sorting and filters
    pub async fn list_tasks(&self, query: &TaskQuery) -> Result<PagedData<Task>> {
        let builder = self.request(Method::GET, "/tasks")?.query(query);
        let page: PagedData<Task> = self.send_json(builder).await?;
        tracing::debug!(
            "Fetched {} of {} tasks (page {}/{})",
            page.content.len(),
            page.total_elements,
            page.current_page,
            page.total_pages
        );
        Ok(page)
    }

    /// `GET /tasks/{id}`
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let builder = self.request(Method::GET, &format!("/tasks/{}", id))?;
        self.send_json(builder).await
    }

    /// `PUT /tasks/{id}`
    pub async fn update_task(&self, id: &str, draft: &TaskDraft) -> Result<Task> {
        let builder = self
            .request(Method::PUT, &format!("/tasks/{}", id))?
            .json(draft);
        let task: Task = self.send_json(builder).await?;
        tracing::info!("Updated task {}", task.id);
        Ok(task)
    }

    /// `DELETE /tasks/{id}`
    pub async fn delete_task(&self, id: &str) -> Result<MessageResponse> {
        let builder = self.request(Method::DELETE, &format!("/tasks/{}", id))?;
        let response = self.send(builder).await?;
        // Some backends answer 204 with no body
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(MessageResponse::default());
        }
        Ok(serde_json::from_str(&text)?)
    }
}
