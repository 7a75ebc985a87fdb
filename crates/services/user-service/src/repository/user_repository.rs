//! User repository implementation with reference expansion.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::entities::{
    user, user_advert, user_message, AdvertEntity, MessageEntity, UserAdvertEntity, UserEntity,
    UserMessageEntity,
};
use common::{AppError, AppResult, OptionExt};
use domain::{
    Advert, Message, NewUser, PageRequest, PasswordEncryption, UpdateOutcome, User, UserPage,
    UserSettings,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User ids bound per reference query, well under the SQLite and Postgres
/// bind-parameter limits.
const EXPANSION_CHUNK_SIZE: usize = 1000;

/// User repository trait for dependency injection.
///
/// Reads return users with adverts and messages expanded. A missing user is
/// `None` or an empty list; only the read-then-write operations turn it into
/// `AppError::NotFound`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user with a fresh salt and hashed password
    async fn create(&self, options: NewUser) -> AppResult<User>;

    /// Find one user by ID
    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find every user with the given username
    async fn find_by_username(&self, username: &str) -> AppResult<Vec<User>>;

    /// List all users
    async fn all(&self) -> AppResult<Vec<User>>;

    /// List one page of users along with the total page count
    async fn all_users_with_pagination(&self, page: PageRequest) -> AppResult<UserPage>;

    /// Set the picture URL of the stored user matching `user.id`
    async fn update_user_image(&self, user: &User, new_image_url: &str)
        -> AppResult<UpdateOutcome>;

    /// Set the phone number of the stored user matching `user.id`
    async fn update_user_phone_number(
        &self,
        user: &User,
        new_phone_number: &str,
    ) -> AppResult<UpdateOutcome>;

    /// Merge non-empty contact fields from `settings` into the user
    async fn update_user(&self, id: Uuid, settings: UserSettings) -> AppResult<User>;

    /// Append an advert reference to the user
    async fn add_advert(&self, id: Uuid, advert_id: Uuid) -> AppResult<User>;

    /// Append a message reference to the user with the given username
    async fn add_message(&self, username: &str, message_id: Uuid) -> AppResult<User>;

    /// List the username of every user
    async fn get_all_usernames(&self) -> AppResult<Vec<String>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
    encryption: Arc<dyn PasswordEncryption>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection, encryption: Arc<dyn PasswordEncryption>) -> Self {
        Self { db, encryption }
    }

    /// Users in natural order: creation time, then ID.
    fn ordered() -> Select<UserEntity> {
        UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
    }

    async fn expand_one(&self, model: user::Model) -> AppResult<User> {
        self.expand(vec![model])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("Expanded user missing"))
    }

    /// Resolve advert and message references for a result set.
    async fn expand(&self, models: Vec<user::Model>) -> AppResult<Vec<User>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut adverts = self.adverts_by_user(&ids).await?;
        let mut messages = self.messages_by_user(&ids).await?;

        Ok(models
            .into_iter()
            .map(|model| {
                let user_adverts = adverts.remove(&model.id).unwrap_or_default();
                let user_messages = messages.remove(&model.id).unwrap_or_default();
                model.into_user(user_adverts, user_messages)
            })
            .collect())
    }

    /// Each chunk holds every reference of its users, so per-user order is kept.
    async fn adverts_by_user(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Vec<Advert>>> {
        let mut grouped: HashMap<Uuid, Vec<Advert>> = HashMap::new();

        for chunk in ids.chunks(EXPANSION_CHUNK_SIZE) {
            let rows = UserAdvertEntity::find()
                .find_also_related(AdvertEntity)
                .filter(user_advert::Column::UserId.is_in(chunk.iter().copied()))
                .order_by_asc(user_advert::Column::Id)
                .all(&self.db)
                .await?;

            for (link, advert) in rows {
                // dangling references are skipped
                if let Some(advert) = advert {
                    grouped.entry(link.user_id).or_default().push(advert.into());
                }
            }
        }
        Ok(grouped)
    }

    async fn messages_by_user(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, Vec<Message>>> {
        let mut grouped: HashMap<Uuid, Vec<Message>> = HashMap::new();

        for chunk in ids.chunks(EXPANSION_CHUNK_SIZE) {
            let rows = UserMessageEntity::find()
                .find_also_related(MessageEntity)
                .filter(user_message::Column::UserId.is_in(chunk.iter().copied()))
                .order_by_asc(user_message::Column::Id)
                .all(&self.db)
                .await?;

            for (link, message) in rows {
                if let Some(message) = message {
                    grouped.entry(link.user_id).or_default().push(message.into());
                }
            }
        }
        Ok(grouped)
    }

    async fn page_users(&self, page: PageRequest) -> AppResult<Vec<User>> {
        let Some(offset) = page.offset() else {
            return Ok(Vec::new());
        };

        let models = Self::ordered()
            .offset(offset)
            .limit(page.page_size)
            .all(&self.db)
            .await?;
        self.expand(models).await
    }

    async fn set_column(
        &self,
        id: Uuid,
        column: user::Column,
        value: &str,
    ) -> AppResult<UpdateOutcome> {
        let result = UserEntity::update_many()
            .col_expr(column, Expr::value(value.to_string()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(UpdateOutcome {
            rows_affected: result.rows_affected,
        })
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, options: NewUser) -> AppResult<User> {
        let salt = self.encryption.generate_salt();
        let hash_pass = self
            .encryption
            .generate_hashed_password(&salt, &options.password)?;

        let txn = self.db.begin().await?;

        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(options.username),
            email: Set(options.email),
            picture_url: Set(options.picture_url),
            phone_number: Set(options.phone_number),
            salt: Set(salt),
            password: Set(options.password),
            hash_pass: Set(hash_pass),
            created_at: Set(Utc::now()),
        };
        let model = active_model.insert(&txn).await?;

        for advert_id in options.adverts {
            UserAdvertEntity::insert(user_advert::ActiveModel {
                user_id: Set(model.id),
                advert_id: Set(advert_id),
                ..Default::default()
            })
            .exec(&txn)
            .await?;
        }
        for message_id in options.messages {
            UserMessageEntity::insert(user_message::ActiveModel {
                user_id: Set(model.id),
                message_id: Set(message_id),
                ..Default::default()
            })
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;
        debug!(user_id = %model.id, username = %model.username, "user created");

        self.expand_one(model).await
    }

    async fn get_user_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        match UserEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => self.expand_one(model).await.map(Some),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Vec<User>> {
        let models = Self::ordered()
            .filter(user::Column::Username.eq(username))
            .all(&self.db)
            .await?;

        self.expand(models).await
    }

    async fn all(&self) -> AppResult<Vec<User>> {
        let models = Self::ordered().all(&self.db).await?;
        self.expand(models).await
    }

    async fn all_users_with_pagination(&self, page: PageRequest) -> AppResult<UserPage> {
        page.validate()?;

        let users = self.page_users(page);
        let total = async { UserEntity::find().count(&self.db).await.map_err(AppError::from) };

        let (users, total) = futures::try_join!(users, total)?;

        Ok(UserPage {
            users,
            page_count: page.page_count(total),
        })
    }

    async fn update_user_image(
        &self,
        user: &User,
        new_image_url: &str,
    ) -> AppResult<UpdateOutcome> {
        self.set_column(user.id, user::Column::PictureUrl, new_image_url)
            .await
    }

    async fn update_user_phone_number(
        &self,
        user: &User,
        new_phone_number: &str,
    ) -> AppResult<UpdateOutcome> {
        self.set_column(user.id, user::Column::PhoneNumber, new_phone_number)
            .await
    }

    async fn update_user(&self, id: Uuid, settings: UserSettings) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.clone().into();
        if let Some(email) = settings.email() {
            active.email = Set(email.to_string());
        }
        if let Some(phone_number) = settings.phone_number() {
            active.phone_number = Set(Some(phone_number.to_string()));
        }
        if let Some(picture_url) = settings.picture_url() {
            active.picture_url = Set(Some(picture_url.to_string()));
        }

        // Only the replaced columns are written
        if active.is_changed() {
            active.update(&self.db).await?;
            debug!(user_id = %id, "user updated");
        }

        let mut user = self.expand_one(model).await?;
        settings.apply(&mut user);
        Ok(user)
    }

    async fn add_advert(&self, id: Uuid, advert_id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        UserAdvertEntity::insert(user_advert::ActiveModel {
            user_id: Set(model.id),
            advert_id: Set(advert_id),
            ..Default::default()
        })
        .exec(&self.db)
        .await?;
        debug!(user_id = %id, advert_id = %advert_id, "advert appended");

        self.expand_one(model).await
    }

    async fn add_message(&self, username: &str, message_id: Uuid) -> AppResult<User> {
        let model = Self::ordered()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        UserMessageEntity::insert(user_message::ActiveModel {
            user_id: Set(model.id),
            message_id: Set(message_id),
            ..Default::default()
        })
        .exec(&self.db)
        .await?;
        debug!(user_id = %model.id, message_id = %message_id, "message appended");

        self.expand_one(model).await
    }

    async fn get_all_usernames(&self) -> AppResult<Vec<String>> {
        let usernames = Self::ordered()
            .select_only()
            .column(user::Column::Username)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(usernames)
    }
}
