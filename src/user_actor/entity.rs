use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};
use crate::forms::{is_valid_email, FieldErrors};
use super::error::UserError;

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: UserCreate) -> Result<Self, UserError> {
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
            phone: params.phone,
            business_name: params.business_name,
            location: params.location,
            role: params.role,
            avatar: None,
        })
    }

    /// One account per email, compared without case or surrounding spaces.
    fn unique_key(&self) -> Option<String> {
        Some(self.email.trim().to_lowercase())
    }

    /// Every stored account needs a well-formed email; it is the sign-in key.
    fn on_create(&mut self) -> Result<(), UserError> {
        if !is_valid_email(&self.email) {
            let mut errors = FieldErrors::new();
            errors.invalid("email", "Please enter a valid email address (e.g., abc@xyz.com)");
            return Err(UserError::ValidationError(errors));
        }
        Ok(())
    }

    /// Applies the fields present in `patch`. An email change must stay well-formed.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), UserError> {
        if let Some(email) = patch.email {
            if !is_valid_email(&email) {
                let mut errors = FieldErrors::new();
                errors.invalid("email", "Please enter a valid email address (e.g., abc@xyz.com)");
                return Err(UserError::ValidationError(errors));
            }
            self.email = email;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(business_name) = patch.business_name {
            self.business_name = business_name;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = Some(avatar);
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}
