//! 认证服务：注册与登录

use crate::{
    auth::jwt::JwtService,
    auth::password::PasswordHasher,
    error::{self, AppError, FieldIssue},
    models::auth::{LoginRequest, LoginResponse},
    models::user::{SignupRequest, User},
    repository::user_repo::UserRepository,
};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct AuthService {
    db: PgPool,
    jwt_service: Arc<JwtService>,
    /// 最小密码长度来自 SecurityConfig，按去除首尾空白后的字符数计
    password_min_length: usize,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_service: Arc<JwtService>, password_min_length: usize) -> Self {
        Self {
            db,
            jwt_service,
            password_min_length,
        }
    }

    /// 用户注册
    /// 校验请求，预检邮箱唯一性，哈希密码后落库，返回新用户 ID
    pub async fn signup(&self, req: SignupRequest) -> Result<Uuid, AppError> {
        // 请求校验（422，携带字段级错误）
        // 密码策略可配置，故在这里与 derive 校验的结果合并
        let mut issues: Vec<FieldIssue> = match req.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => error::field_issues(&errors),
        };

        let password = req.password.trim();
        if password.chars().count() < self.password_min_length {
            issues.push(FieldIssue::new(
                "password",
                &format!(
                    "Password must be at least {} characters long.",
                    self.password_min_length
                ),
            ));
        }

        if !issues.is_empty() {
            return Err(AppError::Validation(issues));
        }

        let user_repo = UserRepository::new(self.db.clone());

        // 邮箱唯一性预检（非原子，并发窗口由 UNIQUE 约束兜底为 500）
        if user_repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::validation(
                "email",
                "E-Mail address already exists!",
            ));
        }

        // 哈希密码（存储去空白后的密码）
        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(password)?;

        let user = user_repo
            .create(&req.email, &password_hash, &req.name)
            .await?;

        tracing::info!(user_id = %user.id, "User created");

        Ok(user.id)
    }

    /// 用户登录
    /// 查找用户、验证密码、签发令牌
    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        let user_repo = UserRepository::new(self.db.clone());

        // 获取用户
        let user: User = user_repo
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;

        // 验证密码（注册时存的是去空白后的密码，这里同样处理）
        let hasher = PasswordHasher::new();
        hasher.verify(req.password.trim(), &user.password_hash)?;

        // 签发令牌（嵌入邮箱与用户 ID）
        let token = self.jwt_service.generate_token(&user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            token,
            user_id: user.id,
        })
    }
}
