use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use hazard_map::entity::user as user_entity;
use hazard_map::models::{CreateHazardReport, CreateUser, HazardReport, User};
use hazard_map::repositories::{HazardReportRepository, UserRepository};
use hazard_map::services::AuthService;
use hazard_map::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub access: String,
    pub refresh: String,
}

#[allow(dead_code)]
impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.access)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a regular test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let user = self
            .create_user_with_email(&format!("test-{}@example.com", Uuid::new_v4()), "secret123")
            .await;
        self.auth_for(&user)
    }

    /// Create a staff (admin) test user and return auth info
    pub async fn create_staff_user(&self) -> TestAuth {
        let user = self
            .create_user_with_email(&format!("admin-{}@example.com", Uuid::new_v4()), "secret123")
            .await;

        // Promote to staff directly in storage, then re-read so the issued
        // token carries the staff claim
        let model = user_entity::Entity::find()
            .filter(user_entity::Column::UserId.eq(user.user_id))
            .one(&self.state.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: user_entity::ActiveModel = model.into();
        active.is_staff = Set(true);
        active.update(&self.state.db).await.unwrap();

        let user = UserRepository::find_by_user_id(&self.state.db, user.user_id)
            .await
            .unwrap();
        self.auth_for(&user)
    }

    /// Create a test user with specific email
    pub async fn create_user_with_email(&self, email: &str, password: &str) -> User {
        let input = CreateUser {
            email: email.to_string(),
            name: Some("Test User".to_string()),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap()
    }

    fn auth_for(&self, user: &User) -> TestAuth {
        let tokens = AuthService::generate_token_pair(user, &self.state.config).unwrap();

        TestAuth {
            user_id: user.user_id,
            email: user.email.clone(),
            access: tokens.access,
            refresh: tokens.refresh,
        }
    }

    /// Create a hazard report directly in storage
    pub async fn create_report(
        &self,
        user_id: Option<Uuid>,
        name: &str,
        street_name: &str,
        status: &str,
    ) -> HazardReport {
        let input = CreateHazardReport {
            user_id,
            name: name.to_string(),
            street_name: street_name.to_string(),
            latitude: "40.0".to_string(),
            longitude: "-75.0".to_string(),
            description: format!("{} near {}", name, street_name),
            report_type: "road".to_string(),
            status: status.to_string(),
            severity: "medium".to_string(),
        };

        HazardReportRepository::create(&self.state.db, &input)
            .await
            .unwrap()
    }
}
