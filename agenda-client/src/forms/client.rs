//! Client form

use shared::{Client, ClientPayload};
use validator::Validate;

use super::{Form, FormContext, FormErrors, optional};
use crate::messages::Text;

/// Raw client input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Debug, Validate)]
struct ClientInput {
    #[validate(length(min = 2, code = "name_too_short"))]
    name: String,
    #[validate(email(code = "email_invalid"))]
    email: Option<String>,
    #[validate(length(min = 6, code = "phone_too_short"))]
    phone: Option<String>,
    notes: Option<String>,
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone().unwrap_or_default(),
            phone: client.phone.clone().unwrap_or_default(),
            notes: client.notes.clone().unwrap_or_default(),
        }
    }
}

impl Form for ClientForm {
    type Payload = ClientPayload;

    fn validate(&self, ctx: &FormContext) -> Result<ClientPayload, FormErrors> {
        let input = ClientInput {
            name: self.name.trim().to_string(),
            email: optional(&self.email),
            phone: optional(&self.phone),
            notes: optional(&self.notes),
        };

        let mut errors = FormErrors::new();
        if input.name.is_empty() {
            errors.require("name", Text::NameRequired, ctx.locale);
        }
        if let Err(e) = input.validate() {
            errors.merge_validation(&e, ctx.locale);
        }

        errors.into_result(|| ClientPayload {
            name: input.name,
            email: input.email,
            phone: input.phone,
            notes: input.notes,
        })
    }
}
