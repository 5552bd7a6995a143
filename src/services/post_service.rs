//! 帖子服务：增删改查与所有权校验

use crate::{
    error::AppError,
    models::post::{CreatePostRequest, Post, UpdatePostRequest},
    models::user::Creator,
    repository::{post_repo::PostRepository, user_repo::UserRepository},
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PostService {
    db: PgPool,
}

impl PostService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 列出所有帖子
    /// 无分页、无过滤
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let post_repo = PostRepository::new(self.db.clone());
        post_repo.find_all().await
    }

    /// 创建帖子
    /// creator_id 来自认证上下文；返回帖子与创建者摘要
    pub async fn create_post(
        &self,
        req: CreatePostRequest,
        creator_id: Uuid,
    ) -> Result<(Post, Creator), AppError> {
        // 请求校验（422）
        req.validate()?;

        let user_repo = UserRepository::new(self.db.clone());
        let post_repo = PostRepository::new(self.db.clone());

        // 加载创建者（认证过的用户应当存在，缺失视为内部错误）
        let user = user_repo
            .find_by_id(&creator_id)
            .await?
            .ok_or_else(|| AppError::internal_error("Creator does not exist"))?;

        let post = post_repo.create(&req.title, &req.content, creator_id).await?;

        tracing::info!(post_id = %post.id, creator_id = %creator_id, "Post created");

        Ok((post, Creator::from(&user)))
    }

    /// 更新帖子
    /// 404 不存在，403 非所有者，否则覆盖标题与正文
    pub async fn update_post(
        &self,
        post_id: Uuid,
        req: UpdatePostRequest,
        requester_id: Uuid,
    ) -> Result<Post, AppError> {
        // 请求校验（422）
        req.validate()?;

        let post_repo = PostRepository::new(self.db.clone());

        let post = post_repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        // 所有权校验：只有创建者可以修改
        if post.creator_id != requester_id {
            return Err(AppError::Forbidden);
        }

        let updated = post_repo
            .update(post_id, &req.title, &req.content)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        tracing::info!(post_id = %post_id, "Post updated");

        Ok(updated)
    }

    /// 删除帖子
    /// 404 不存在，403 非所有者
    pub async fn delete_post(&self, post_id: Uuid, requester_id: Uuid) -> Result<(), AppError> {
        let post_repo = PostRepository::new(self.db.clone());

        let post = post_repo
            .find_by_id(&post_id)
            .await?
            .ok_or_else(|| AppError::not_found("Post not found"))?;

        // 所有权校验：只有创建者可以删除
        if post.creator_id != requester_id {
            return Err(AppError::Forbidden);
        }

        post_repo.delete(post_id).await?;

        tracing::info!(post_id = %post_id, "Post deleted");

        Ok(())
    }
}
