//! Post repository (数据库访问层)

use crate::{error::AppError, models::post::Post};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostRepository {
    db: PgPool,
}

impl PostRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出所有帖子（全表扫描，最新的在前）
    pub async fn find_all(&self) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts ORDER BY created_at DESC"
        )
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    /// 根据 ID 查找帖子
    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(post)
    }

    /// 创建帖子
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        creator_id: Uuid,
    ) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, creator_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#
        )
        .bind(title)
        .bind(content)
        .bind(creator_id)
        .fetch_one(&self.db)
        .await?;

        Ok(post)
    }

    /// 覆盖标题与正文
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET
                title = $2,
                content = $3,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(&self.db)
        .await?;

        Ok(post)
    }

    /// 删除帖子
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
