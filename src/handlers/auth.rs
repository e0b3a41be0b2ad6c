use validator::Validate;

use crate::client::ApiClient;
use crate::entities::user::{LoginRequest, RegisterRequest, UserInfo};
use crate::error::{AppError, AppResult};
use crate::utils::password::{password_strength, strength_label, StrengthLabel, MIN_SIGNUP_STRENGTH};
use crate::AppState;

const SIGNUP_FALLBACK_MESSAGE: &str = "Signup failed. Please try again.";

#[derive(Debug, Clone, Default, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    pub password: String,
    pub agree_terms: bool,
}

impl SignupForm {
    pub fn strength(&self) -> u8 {
        password_strength(&self.password)
    }

    pub fn strength_label(&self) -> StrengthLabel {
        strength_label(self.strength())
    }

    /// Client-side checks; failing any of them means nothing is sent.
    pub fn check(&self) -> AppResult<RegisterRequest> {
        if !self.agree_terms {
            return Err(AppError::Validation(
                "You must agree to the Terms & Conditions".to_string(),
            ));
        }
        if self.strength() < MIN_SIGNUP_STRENGTH {
            return Err(AppError::Validation("Please use a stronger password".to_string()));
        }

        let trimmed = SignupForm {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            ..self.clone()
        };
        trimmed.validate()?;

        Ok(RegisterRequest {
            name: trimmed.name,
            email: trimmed.email,
            password: trimmed.password,
        })
    }

    /// Register the account. Server-side failures carry the backend's
    /// message when it sent one.
    pub async fn submit(&self, client: &ApiClient) -> AppResult<()> {
        let request = self.check()?;
        client.register(&request).await.map_err(|e| match e {
            AppError::Network(detail) => {
                tracing::warn!(error = %detail, "Signup request failed");
                AppError::Network(SIGNUP_FALLBACK_MESSAGE.to_string())
            }
            other => other,
        })?;
        tracing::info!(email = %request.email, "Account registered");
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub password_visible: bool,
}

impl LoginForm {
    pub fn toggle_password_visibility(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Log in and store the session token in the application context.
    pub async fn submit(&self, state: &mut AppState) -> AppResult<Option<UserInfo>> {
        let trimmed = LoginForm {
            email: self.email.trim().to_string(),
            ..self.clone()
        };
        trimmed.validate()?;
        let response = state
            .client
            .login(&LoginRequest {
                email: trimmed.email,
                password: trimmed.password,
            })
            .await?;
        state.sign_in(response.token)?;
        Ok(response.user)
    }
}

pub fn logout(state: &mut AppState) {
    state.sign_out();
}
