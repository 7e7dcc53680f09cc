use super::{is_blank, is_valid_email, FieldErrors};
use crate::domain::{Role, UserCreate};

fn check_credentials(errors: &mut FieldErrors, email: &str, password: &str) {
    if is_blank(email) {
        errors.missing("email", "Please enter your email address");
    } else if !is_valid_email(email.trim()) {
        errors.invalid("email", "Please enter a valid email address (e.g., abc@xyz.com)");
    }
    errors.require("password", password, "Please enter your password");
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_credentials(&mut errors, &self.email, &self.password);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub business_name: String,
    pub location: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_credentials(&mut errors, &self.email, &self.password);
        errors.require("name", &self.name, "Please enter your full name");
        errors.require("businessName", &self.business_name, "Please enter your business name");
        errors.require("location", &self.location, "Please enter your location");
        errors.require("phone", &self.phone, "Please enter your phone number");
        errors.into_result()
    }

    /// Trimmed account details for the user store. The password is not kept.
    pub fn into_user(self, role: Role) -> UserCreate {
        UserCreate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            business_name: self.business_name.trim().to_string(),
            location: self.location.trim().to_string(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_needs_valid_email_and_password() {
        let errors = SignInForm { email: "abc".into(), password: " ".into() }.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address (e.g., abc@xyz.com)"));
        assert_eq!(errors.get("password"), Some("Please enter your password"));

        let ok = SignInForm { email: "abc@xyz.com".into(), password: "demo123".into() };
        assert_eq!(ok.validate(), Ok(()));
    }

    #[test]
    fn sign_up_requires_profile_fields() {
        let form = SignUpForm {
            email: "abc@xyz.com".into(),
            password: "secret".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "businessName", "location", "phone"]);
    }

    #[test]
    fn sign_up_trims_into_user() {
        let form = SignUpForm {
            email: " raj@chaat.in ".into(),
            password: "secret".into(),
            name: " Raj ".into(),
            phone: "9876543210".into(),
            business_name: "Raj's Chaat Corner".into(),
            location: "CP, Delhi".into(),
        };
        let user = form.into_user(Role::Vendor);
        assert_eq!(user.email, "raj@chaat.in");
        assert_eq!(user.name, "Raj");
        assert_eq!(user.role, Role::Vendor);
    }
}
