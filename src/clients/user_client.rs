use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{Role, User, UserCreate};
use crate::forms::{ProfileForm, SignInForm, SignUpForm};
use crate::notify::{Notification, SharedNotifier};
use crate::user_actor::UserError;

/// Simulated account-service behaviour.
#[derive(Debug, Clone)]
pub struct AccountSettings {
    pub auth_delay: Duration,
    pub profile_delay: Duration,
    /// The one password sign-in accepts.
    pub demo_password: String,
}

/// Client for the account store: sign-up, sign-in and profile edits.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
    notifier: SharedNotifier,
    settings: AccountSettings,
}

impl_client_methods!(UserClient, User, String, UserError, user);

impl UserClient {
    pub fn new(inner: ResourceClient<User>, notifier: SharedNotifier, settings: AccountSettings) -> Self {
        Self { inner, notifier, settings }
    }

    /// Case-insensitive lookup by email.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        debug!("Sending request");
        let wanted = email.trim().to_lowercase();
        let mut found = self.inner.query(move |user| user.email.to_lowercase() == wanted).await?;
        Ok(found.pop())
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_up(&self, form: SignUpForm, role: Role) -> Result<User, UserError> {
        if let Err(errors) = form.validate() {
            warn!(%errors, "Sign-up form rejected");
            return Err(UserError::ValidationError(errors));
        }
        let email = form.email.trim().to_string();
        if self.find_by_email(&email).await?.is_some() {
            return Err(self.already_registered(email));
        }

        tokio::time::sleep(self.settings.auth_delay).await;
        // The store enforces one account per email; a sign-up racing this one
        // may have taken it during the delay.
        let user = match self.create(form.into_user(role)).await {
            Err(UserError::AlreadyExists(_)) => return Err(self.already_registered(email)),
            other => other?,
        };

        info!(user_id = %user.id, "Account created");
        self.notifier.notify(Notification::info(
            "Account Created!",
            format!("Successfully registered as {}", role),
        ));
        Ok(user)
    }

    /// Accepts only the demo password. A first-time email gets a fresh
    /// profile named after its local part.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_in(&self, form: SignInForm, role: Role) -> Result<User, UserError> {
        if let Err(errors) = form.validate() {
            warn!(%errors, "Sign-in form rejected");
            return Err(UserError::ValidationError(errors));
        }
        if form.password != self.settings.demo_password {
            warn!("Wrong password");
            self.notifier.notify(Notification::error("Authentication Failed", "Invalid email or password"));
            return Err(UserError::AuthenticationFailed);
        }

        tokio::time::sleep(self.settings.auth_delay).await;
        let user = match self.find_by_email(&form.email).await? {
            Some(user) => user,
            None => {
                let email = form.email.trim().to_string();
                let name = email.split('@').next().unwrap_or_default().to_string();
                let guest = UserCreate {
                    name,
                    email: email.clone(),
                    phone: String::new(),
                    business_name: String::new(),
                    location: String::new(),
                    role,
                };
                match self.create(guest).await {
                    // A concurrent sign-in created the guest first; use theirs.
                    Err(UserError::AlreadyExists(_)) => self
                        .find_by_email(&email)
                        .await?
                        .ok_or_else(|| UserError::NotFound(email.clone()))?,
                    other => other?,
                }
            }
        };

        info!(user_id = %user.id, "Signed in");
        self.notifier.notify(Notification::info("Welcome Back!", format!("Signed in as {}", user.name)));
        Ok(user)
    }

    #[instrument(skip(self, form))]
    pub async fn update_profile(&self, id: &str, form: ProfileForm) -> Result<User, UserError> {
        let current = self
            .get_user(id.to_string())
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        if let Err(errors) = form.validate(current.role) {
            warn!(%errors, "Profile form rejected");
            if let Some(first) = errors.first() {
                self.notifier.notify(Notification::error(ProfileForm::headline(first), first.message.clone()));
            }
            return Err(UserError::ValidationError(errors));
        }

        tokio::time::sleep(self.settings.profile_delay).await;
        debug!("Sending request");
        let email = form.email.trim().to_string();
        let user = match self.inner.update(id.to_string(), form.into_patch()).await {
            Err(UserError::AlreadyExists(_)) => {
                warn!("Email belongs to another account");
                self.notifier.notify(Notification::error(
                    "Email Already Registered",
                    format!("Another account already uses {}.", email),
                ));
                return Err(UserError::AlreadyExists(email));
            }
            other => other?,
        };

        info!(user_id = %user.id, "Profile updated");
        self.notifier.notify(Notification::info(
            "Profile Updated!",
            "Your profile has been successfully updated",
        ));
        Ok(user)
    }

    fn already_registered(&self, email: String) -> UserError {
        warn!("Email already registered");
        self.notifier.notify(Notification::error(
            "Sign Up Failed",
            format!("An account for {} already exists.", email),
        ));
        UserError::AlreadyExists(email)
    }

    async fn create(&self, params: UserCreate) -> Result<User, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        self.get_user(id.clone()).await?.ok_or(UserError::NotFound(id))
    }
}
