use super::{is_blank, is_valid_email, FieldError, FieldErrors, Issue};

/// Delivery and payment details collected at checkout.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,
}

const MIN_PHONE_LEN: usize = 10;
const MIN_CARD_DIGITS: usize = 8;

impl CheckoutForm {
    fn fields(&self) -> [(&'static str, &'static str, &str); 10] {
        [
            ("fullName", "full name", &self.full_name),
            ("email", "email", &self.email),
            ("phone", "phone", &self.phone),
            ("address", "address", &self.address),
            ("city", "city", &self.city),
            ("pincode", "pincode", &self.pincode),
            ("cardNumber", "card number", &self.card_number),
            ("expiryDate", "expiry date", &self.expiry_date),
            ("cvv", "cvv", &self.cvv),
            ("cardName", "card name", &self.card_name),
        ]
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, label, value) in self.fields() {
            errors.require(field, value, format!("Please fill in {}", label));
        }

        if !is_blank(&self.email) && !is_valid_email(self.email.trim()) {
            errors.invalid("email", "Please enter a valid email address");
        }
        if !is_blank(&self.phone) && self.phone.trim().len() < MIN_PHONE_LEN {
            errors.invalid("phone", "Please enter a valid phone number");
        }
        let card_digits = self.card_number.chars().filter(char::is_ascii_digit).count();
        if !is_blank(&self.card_number) && card_digits < MIN_CARD_DIGITS {
            errors.invalid("cardNumber", "Invalid card number");
        }

        errors.into_result()
    }

    /// Notification title for a failed field.
    pub fn headline(error: &FieldError) -> &'static str {
        match (error.issue, error.field) {
            (Issue::Missing, _) => "Missing Information",
            (Issue::Invalid, "email") => "Invalid Email",
            (Issue::Invalid, "phone") => "Invalid Phone",
            (Issue::Invalid, _) => "Invalid Card",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CheckoutForm {
        CheckoutForm {
            full_name: "Raj Malhotra".into(),
            email: "raj@chaat.in".into(),
            phone: "9876543210".into(),
            address: "12 Janpath".into(),
            city: "Delhi".into(),
            pincode: "110001".into(),
            card_number: "4111 1111 1111 1111".into(),
            expiry_date: "12/27".into(),
            cvv: "123".into(),
            card_name: "RAJ MALHOTRA".into(),
        }
    }

    #[test]
    fn complete_form_passes() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn every_blank_field_is_reported_in_form_order() {
        let errors = CheckoutForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 10);
        assert_eq!(errors.first().map(|e| e.message.as_str()), Some("Please fill in full name"));
        assert_eq!(errors.get("cardName"), Some("Please fill in card name"));
    }

    #[test]
    fn malformed_values() {
        let mut form = filled();
        form.email = "raj@chaat".into();
        form.phone = "98765".into();
        form.card_number = "4111".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("phone"), Some("Please enter a valid phone number"));
        assert_eq!(errors.get("cardNumber"), Some("Invalid card number"));
        let titles: Vec<&str> = errors.iter().map(CheckoutForm::headline).collect();
        assert_eq!(titles, vec!["Invalid Email", "Invalid Phone", "Invalid Card"]);
    }
}
