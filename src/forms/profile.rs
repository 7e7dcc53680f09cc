use super::{is_blank, is_valid_email, FieldError, FieldErrors, Issue};
use crate::domain::{Role, UserPatch};

/// The edit-profile form. Every field is required.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub location: String,
    pub avatar: Option<String>,
}

impl ProfileForm {
    pub fn validate(&self, role: Role) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name, "Please enter your full name");
        if is_blank(&self.email) {
            errors.missing("email", "Please enter your email address");
        } else if !is_valid_email(self.email.trim()) {
            errors.invalid("email", "Please enter a valid email address (e.g., abc@xyz.com)");
        }
        errors.require("phone", &self.phone, "Please enter your phone number");
        errors.require(
            "businessName",
            &self.business_name,
            format!("Please enter your {}", role.business_noun()),
        );
        errors.require("location", &self.location, "Please enter your location");
        errors.into_result()
    }

    pub fn headline(error: &FieldError) -> &'static str {
        match (error.issue, error.field) {
            (Issue::Invalid, _) => "Invalid Email",
            (Issue::Missing, "name") => "Name Required",
            (Issue::Missing, "email") => "Email Required",
            (Issue::Missing, "phone") => "Phone Required",
            (Issue::Missing, "businessName") => "Business Name Required",
            (Issue::Missing, _) => "Location Required",
        }
    }

    pub fn into_patch(self) -> UserPatch {
        UserPatch {
            name: Some(self.name.trim().to_string()),
            email: Some(self.email.trim().to_string()),
            phone: Some(self.phone.trim().to_string()),
            business_name: Some(self.business_name.trim().to_string()),
            location: Some(self.location.trim().to_string()),
            avatar: self.avatar,
        }
    }
}
