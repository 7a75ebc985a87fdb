//! User inspection commands.
//!
//! Each command renders printable lines from a repository so the CLI and
//! the tests share the same code path.

use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{PageRequest, User};

use crate::repository::UserRepository;

/// User inspection action.
#[derive(Debug, Clone)]
pub enum UsersAction {
    List(PageRequest),
    Usernames,
    Show(Uuid),
}

/// Execute a users action and print its output.
pub async fn execute(repo: &dyn UserRepository, action: UsersAction) -> AppResult<()> {
    let lines = match action {
        UsersAction::List(page) => list_page(repo, page).await?,
        UsersAction::Usernames => repo.get_all_usernames().await?,
        UsersAction::Show(id) => vec![show_user(repo, id).await?],
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

/// One line per user followed by a page footer.
pub async fn list_page(repo: &dyn UserRepository, page: PageRequest) -> AppResult<Vec<String>> {
    let result = repo.all_users_with_pagination(page).await?;

    let mut lines: Vec<String> = result.users.iter().map(summary).collect();
    lines.push(format!(
        "page {} of {}",
        page.page_number.saturating_add(1),
        result.page_count
    ));
    Ok(lines)
}

/// Pretty JSON for a single user.
pub async fn show_user(repo: &dyn UserRepository, id: Uuid) -> AppResult<String> {
    let user = repo.get_user_by_id(id).await?.ok_or_not_found()?;
    serde_json::to_string_pretty(&user).map_err(|e| AppError::internal(e.to_string()))
}

fn summary(user: &User) -> String {
    format!(
        "{}  {}  <{}>  adverts={} messages={}",
        user.id,
        user.username,
        user.email,
        user.adverts.len(),
        user.messages.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserPage;
    use mockall::predicate::eq;

    use crate::repository::MockUserRepository;

    fn create_test_user(username: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            picture_url: None,
            phone_number: None,
            salt: "salt".to_string(),
            password: "secret".to_string(),
            hash_pass: "hashed".to_string(),
            messages: vec![],
            adverts: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_page_renders_users_and_footer() {
        let mut repo = MockUserRepository::new();
        repo.expect_all_users_with_pagination()
            .with(eq(PageRequest::new(1, 2)))
            .returning(|_| {
                Ok(UserPage {
                    users: vec![create_test_user("alice"), create_test_user("bob")],
                    page_count: 3,
                })
            });

        let lines = list_page(&repo, PageRequest::new(1, 2)).await.unwrap();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("alice"));
        assert!(lines[1].contains("<bob@example.com>"));
        assert_eq!(lines[2], "page 2 of 3");
    }

    #[tokio::test]
    async fn test_list_page_footer_at_last_page_number() {
        let mut repo = MockUserRepository::new();
        repo.expect_all_users_with_pagination().returning(|_| {
            Ok(UserPage {
                users: vec![],
                page_count: 0,
            })
        });

        let lines = list_page(&repo, PageRequest::new(u64::MAX, 1)).await.unwrap();

        assert_eq!(lines, vec![format!("page {} of 0", u64::MAX)]);
    }

    #[tokio::test]
    async fn test_show_user_hides_secrets() {
        let user = create_test_user("carol");
        let id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(user.clone())));

        let json = show_user(&repo, id).await.unwrap();

        assert!(json.contains("carol"));
        assert!(!json.contains("hashed"));
        assert!(!json.contains("secret"));
    }

    #[tokio::test]
    async fn test_show_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user_by_id().returning(|_| Ok(None));

        let result = show_user(&repo, Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_page_propagates_store_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_all_users_with_pagination()
            .returning(|_| Err(AppError::from(sea_orm::DbErr::Custom("boom".to_string()))));

        let result = list_page(&repo, PageRequest::default()).await;

        assert!(result.unwrap_err().is_store());
    }
}
